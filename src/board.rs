use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;
use thiserror::Error;

use crate::location::Location;
use crate::protocol;

/// Identifies one painted region. Doubles as the index into the board's [`Palette`].
pub type RegionId = usize;

/// Reasons a [`Board`] cannot be constructed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    /// Boards must be at least 1x1.
    #[error("board size must be at least 1")]
    InvalidSize,
    /// No lines were given to build a board from.
    #[error("no input lines")]
    EmptyInput,
    /// Some line's length disagrees with the number of lines.
    #[error("board must be square: line {line} has length {len}, expected {expected}")]
    NonSquare {
        /// Zero-based index of the offending line.
        line: usize,
        /// Its actual length in characters.
        len: usize,
        /// The expected length, i.e. the number of lines.
        expected: usize,
    },
}

/// The ordered table of region labels.
///
/// Index is the region id. Append-only within a session; region ids stored on
/// a board must stay below [`len`](Self::len). The wire format ignores these
/// labels and spells ids positionally as `A`-`Z`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Palette {
    labels: Vec<char>,
}

impl Palette {
    /// Append a label, returning the region id it now names.
    pub fn push(&mut self, label: char) -> RegionId {
        self.labels.push(label);
        self.labels.len() - 1
    }

    /// The label assigned to `id`, if any.
    pub fn label(&self, id: RegionId) -> Option<char> {
        self.labels.get(id).copied()
    }

    /// Number of regions this palette names.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether no labels have been assigned yet.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// An N x N paintable board of region ids.
///
/// Cells start unpainted and are filled one at a time by [`paint`](Self::paint)
/// as the user drags over them, or wholesale by [`from_lines`](Self::from_lines).
/// A board handed to a [`Session`](crate::session::Session) must be fully
/// painted with every region 4-connected; see [`validate`](crate::region::validate).
#[derive(Debug)]
pub struct Board {
    pub(crate) cells: Array2<Option<RegionId>>,
    palette: Palette,
}

impl Board {
    /// An entirely unpainted board of side `n`.
    pub fn new(n: usize) -> Result<Self, BoardError> {
        if n < 1 {
            return Err(BoardError::InvalidSize);
        }

        Ok(Self {
            cells: Array2::from_elem((n, n), None),
            palette: Palette::default(),
        })
    }

    /// Build a board from equal-length lines over an arbitrary alphabet.
    ///
    /// Each distinct character maps to a region id in sorted character order,
    /// so two inputs over the same character set always map identically. The
    /// induced alphabet becomes the palette, observable via
    /// [`region_count`](Self::region_count).
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self, BoardError> {
        if lines.is_empty() {
            return Err(BoardError::EmptyInput);
        }

        let n = lines.len();
        for (ind, line) in lines.iter().enumerate() {
            let len = line.as_ref().chars().count();
            if len != n {
                return Err(BoardError::NonSquare { line: ind, len, expected: n });
            }
        }

        let alphabet = lines.iter()
            .flat_map(|line| line.as_ref().chars())
            .sorted()
            .dedup()
            .collect_vec();

        let mut palette = Palette::default();
        for label in &alphabet {
            palette.push(*label);
        }

        let mut cells = Array2::from_elem((n, n), None);
        for (row, line) in lines.iter().enumerate() {
            for (col, ch) in line.as_ref().chars().enumerate() {
                // the alphabet is sorted and complete, so this cannot miss
                cells[[row, col]] = Some(alphabet.binary_search(&ch).unwrap());
            }
        }

        Ok(Self { cells, palette })
    }

    /// Paint the cell at `(row, col)` with `id`.
    ///
    /// # Panics
    /// If `row` or `col` is outside the grid. Callers clip coordinates before
    /// calling; an out-of-range paint is a contract violation, not a runtime
    /// error.
    pub fn paint(&mut self, row: usize, col: usize, id: RegionId) {
        self.cells[[row, col]] = Some(id);
    }

    /// Side length N.
    pub fn size(&self) -> usize {
        self.cells.nrows()
    }

    /// The region painted at `(row, col)`, or `None` if unpainted or out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<RegionId> {
        self.cells.get((row, col)).copied().flatten()
    }

    /// Number of regions the palette names.
    pub fn region_count(&self) -> usize {
        self.palette.len()
    }

    /// The label table for this board.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Mutable access to the label table, for appending labels as the user
    /// extends the palette.
    pub fn palette_mut(&mut self) -> &mut Palette {
        &mut self.palette
    }

    /// The cells of every painted region, keyed ascending by id.
    ///
    /// Cells appear in row-major order. Region ids with zero cells are vacuous
    /// and do not appear.
    pub(crate) fn region_cells(&self) -> BTreeMap<RegionId, Vec<Location>> {
        let mut regions: BTreeMap<RegionId, Vec<Location>> = BTreeMap::new();
        for ((row, col), cell) in self.cells.indexed_iter() {
            if let Some(id) = cell {
                regions.entry(*id).or_default().push(Location(row, col));
            }
        }

        regions
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut out = String::with_capacity(self.size() * (self.size() + 1));
        for row in self.cells.rows() {
            for cell in row {
                out.push(match cell {
                    Some(id) => protocol::wire_letter(*id).unwrap_or('?'),
                    None => '.',
                });
            }
            out.push('\n');
        }

        write!(f, "{}", out)
    }
}

//! The text wire format spoken with the external solver.
//!
//! [`encode`] renders a board in the solver's input format; [`decode_output`]
//! reads the result file back. The trace file shares this module's marker-row
//! parsing and lives in [`trace`](crate::trace).

use ndarray::Array2;
use thiserror::Error;

use crate::board::{Board, RegionId};

/// Number of region ids the wire alphabet `A`-`Z` can spell.
pub const MAX_WIRE_REGIONS: usize = 26;

/// The line separating the solution grid from trailing metadata.
const META_MARKER: &str = "---META---";
/// The line declaring an unsolvable board.
const NO_SOLUTION: &str = "No Solution";

/// Reasons a board cannot be put on the wire.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// The wire alphabet stops at `Z`; boards with more than
    /// [`MAX_WIRE_REGIONS`] regions cannot be round-tripped.
    #[error("board uses more than {MAX_WIRE_REGIONS} regions, which the wire alphabet cannot spell")]
    TooManyRegions,
    /// An unpainted cell has no letter. Boards are validated before encoding,
    /// so this surfaces only on call-order misuse.
    #[error("cannot encode a board with unpainted cells")]
    Unpainted,
}

/// The letter spelling `id` on the wire, if the alphabet reaches it.
pub(crate) fn wire_letter(id: RegionId) -> Option<char> {
    (id < MAX_WIRE_REGIONS).then(|| (b'A' + id as u8) as char)
}

/// Render `board` in the solver's input format: N newline-terminated lines of
/// exactly N uppercase letters, no header, no separators.
///
/// A cell with an id past `Z` fails with [`ProtocolError::TooManyRegions`]
/// rather than truncating silently.
pub fn encode(board: &Board) -> Result<String, ProtocolError> {
    let n = board.size();
    let mut out = String::with_capacity(n * (n + 1));

    for row in board.cells.rows() {
        for cell in row {
            let id = cell.ok_or(ProtocolError::Unpainted)?;
            out.push(wire_letter(id).ok_or(ProtocolError::TooManyRegions)?);
        }
        out.push('\n');
    }

    Ok(out)
}

/// Timing and search-effort figures the solver reports after its grid.
///
/// Values are kept as the decimal strings the solver wrote and are never
/// reformatted here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolveMeta {
    /// Wall-clock duration of the search, in milliseconds.
    pub elapsed_ms: String,
    /// Number of search iterations performed.
    pub iterations: String,
}

/// A decoded solution grid plus whatever metadata the solver attached.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    /// `true` where the solver placed a marker.
    pub markers: Array2<bool>,
    /// Present when the solver reported at least two metadata lines.
    pub meta: Option<SolveMeta>,
}

/// What one solver run produced.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The solver proved the board unsolvable.
    NoSolution,
    /// The solver found a placement.
    Solved(Solution),
}

#[derive(Clone, Copy)]
enum OutputState {
    ReadingGrid,
    ReadingMeta,
}

/// Fill row `row` of `markers` from one wire line: `#` means present, any
/// other character absent. Columns past the grid are ignored, not rejected.
pub(crate) fn fill_marker_row(markers: &mut Array2<bool>, row: usize, line: &str) {
    let n = markers.ncols();
    for (col, ch) in line.chars().take(n).enumerate() {
        markers[[row, col]] = ch == '#';
    }
}

/// Decode the solver's output file contents for a board of side `n`.
///
/// Returns `None` when `text` holds no lines at all ("nothing to show").
/// A first non-empty line of `No Solution` short-circuits to
/// [`Outcome::NoSolution`]. Otherwise the grid is read until a `---META---`
/// line flips the decoder into metadata mode; at least two metadata lines
/// yield a [`SolveMeta`], fewer mean metadata is simply absent. Rows and
/// columns beyond `n` are ignored; the original producer emitted ragged lines
/// and this decoder deliberately keeps that leniency.
pub fn decode_output(text: &str, n: usize) -> Option<Outcome> {
    if text.lines().next().is_none() {
        return None;
    }

    let mut state = OutputState::ReadingGrid;
    let mut grid_rows: Vec<&str> = Vec::with_capacity(n);
    let mut meta_lines: Vec<&str> = Vec::new();
    let mut seen_content = false;

    for line in text.lines() {
        match state {
            OutputState::ReadingGrid => {
                if line == META_MARKER {
                    state = OutputState::ReadingMeta;
                    continue;
                }

                if !seen_content {
                    if line.is_empty() {
                        continue;
                    }
                    seen_content = true;
                    if line == NO_SOLUTION {
                        return Some(Outcome::NoSolution);
                    }
                }

                grid_rows.push(line);
            }
            OutputState::ReadingMeta => meta_lines.push(line),
        }
    }

    let mut markers = Array2::from_elem((n, n), false);
    for (row, line) in grid_rows.iter().take(n).enumerate() {
        fill_marker_row(&mut markers, row, line);
    }

    let meta = (meta_lines.len() >= 2).then(|| SolveMeta {
        elapsed_ms: meta_lines[0].to_owned(),
        iterations: meta_lines[1].to_owned(),
    });

    Some(Outcome::Solved(Solution { markers, meta }))
}

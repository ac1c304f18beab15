//! On-demand reader for the solver's iteration trace file.
//!
//! The trace is diagnostic, not load-bearing: a solve never needs it, and a
//! malformed block is dropped rather than sinking the whole parse.

use std::io;
use std::path::Path;
use std::{fs, mem};

use ndarray::Array2;

use crate::protocol::fill_marker_row;

/// The prefix opening one recorded iteration block.
const ITERATION_PREFIX: &str = "---ITERATION";
/// The label split point used to recover the block's iteration number.
const ITERATION_LABEL: &str = "ITERATION ";
/// The block terminator. Optional for the final block.
const END_MARKER: &str = "---END---";

/// One intermediate search state the solver recorded.
#[derive(Clone, Debug, PartialEq)]
pub struct IterationSnapshot {
    /// The iteration number the solver stamped on the block.
    pub number: u64,
    /// `true` where a marker stood at this point in the search.
    pub markers: Array2<bool>,
}

enum TraceState {
    Idle,
    InBlock { number: Option<u64>, rows: Vec<String> },
}

/// Recover the iteration number from a block header such as `---ITERATION 5---`.
///
/// Splits on the `ITERATION ` substring and strips `---` and whitespace from
/// the remainder. `None` when no integer is parsable.
fn iteration_number(line: &str) -> Option<u64> {
    let (_, rest) = line.split_once(ITERATION_LABEL)?;
    rest.replace("---", "").trim().parse().ok()
}

fn flush(state: &mut TraceState, snapshots: &mut Vec<IterationSnapshot>, n: usize) {
    if let TraceState::InBlock { number: Some(number), rows } = mem::replace(state, TraceState::Idle) {
        // numberless blocks fall through the `if let` and are dropped with it
        if rows.is_empty() {
            return;
        }

        let mut markers = Array2::from_elem((n, n), false);
        for (row, line) in rows.iter().take(n).enumerate() {
            fill_marker_row(&mut markers, row, line);
        }

        snapshots.push(IterationSnapshot { number, markers });
    }
}

/// Parse trace text for a board of side `n` into its ordered snapshots.
///
/// A line starting with `---ITERATION` opens a block, flushing the previous
/// one; `---END---` terminates a block and carries no data; blank lines are
/// skipped; anything else is a board row for the open block. The final block
/// is flushed at end of input even without its terminator. Blocks with no
/// parsable number or zero rows are dropped. Parsing is pure, so re-reading
/// the same text always yields an identical sequence.
pub fn parse(text: &str, n: usize) -> Vec<IterationSnapshot> {
    let mut snapshots = Vec::new();
    let mut state = TraceState::Idle;

    for line in text.lines() {
        if line.starts_with(ITERATION_PREFIX) {
            flush(&mut state, &mut snapshots, n);
            state = TraceState::InBlock { number: iteration_number(line), rows: Vec::new() };
        } else if line == END_MARKER || line.trim().is_empty() {
            continue;
        } else if let TraceState::InBlock { rows, .. } = &mut state {
            rows.push(line.to_owned());
        }
    }

    flush(&mut state, &mut snapshots, n);
    snapshots
}

/// Read and parse the trace file at `path` for a board of side `n`.
///
/// A missing file yields an empty sequence, not an error; callers that care
/// whether a solve ever happened check for the file themselves first.
pub fn read_all(path: impl AsRef<Path>, n: usize) -> io::Result<Vec<IterationSnapshot>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Vec::new());
    }

    Ok(parse(&fs::read_to_string(path)?, n))
}

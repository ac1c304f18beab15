use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Bfs;
use strum::VariantArray;
use thiserror::Error;

use crate::board::{Board, RegionId};
use crate::location::{Location, Step};

/// Reasons a board fails structural validation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// At least one cell is still unpainted.
    #[error("board is incomplete: unpainted cells remain")]
    Incomplete,
    /// The named region's cells do not form a single 4-connected component.
    #[error("region {0} is not 4-connected")]
    Disconnected(RegionId),
}

/// Check that every cell is painted and every region is a single 4-connected
/// component.
///
/// The board is expressed as an undirected graph whose edges join 4-adjacent
/// cells sharing a region, then each region is walked breadth-first from its
/// first cell in row-major order. Reaching fewer cells than the region holds
/// means it is split. Connectivity does not depend on traversal order, but
/// regions are scanned ascending by id so the first offender named by
/// [`ValidationError::Disconnected`] is reproducible.
///
/// Pure with respect to the board snapshot; no side effects.
pub fn validate(board: &Board) -> Result<(), ValidationError> {
    if board.cells.iter().any(|cell| cell.is_none()) {
        return Err(ValidationError::Incomplete);
    }

    let n = board.size();
    let mut graph: UnGraphMap<Location, ()> =
        UnGraphMap::with_capacity(n * n, 2 * n * n.saturating_sub(1));

    for ((row, col), cell) in board.cells.indexed_iter() {
        let location = Location(row, col);
        graph.add_node(location);

        for step in Step::VARIANTS {
            let neighbor = step.attempt_from(location);
            // adding an edge twice, once from each endpoint, is harmless on a GraphMap
            if board.get(neighbor.0, neighbor.1) == *cell {
                graph.add_edge(location, neighbor, ());
            }
        }
    }

    for (id, cells) in board.region_cells() {
        let mut reached = 0usize;
        let mut bfs = Bfs::new(&graph, cells[0]);
        while bfs.next(&graph).is_some() {
            reached += 1;
        }

        if reached < cells.len() {
            return Err(ValidationError::Disconnected(id));
        }
    }

    Ok(())
}

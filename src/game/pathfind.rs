//! Breadth-first route finding over the maze.
//!
//! Neighbors are explored in [`Direction::ALL`] order (up, down, left,
//! right). With a FIFO queue that order decides which of several equally
//! short routes is returned, so results are reproducible.
//!
//! [`Direction::ALL`]: crate::game::Direction::ALL

use std::collections::VecDeque;

use crate::game::{Grid, Position};

/// A route from start to end, both inclusive. Empty when there is none.
pub type Path = Vec<Position>;

/// Find a shortest 4-connected route from `start` to `end`.
///
/// Returns an empty path if either endpoint is not walkable or `end` cannot
/// be reached. When `start == end` the path is that single cell.
///
/// Runs in O(width × height) and allocates its own bookkeeping, so repeated
/// calls with the same inputs return identical paths.
#[must_use]
pub fn find_path(grid: &Grid, start: Position, end: Position) -> Path {
    let (Some(start_idx), Some(end_idx)) = (grid.index(start), grid.index(end)) else {
        return Path::new();
    };
    if !grid.is_walkable(start) || !grid.is_walkable(end) {
        return Path::new();
    }

    // parent[idx] is the cell idx was discovered from; the start points at itself.
    let mut parent: Vec<Option<usize>> = vec![None; grid.len()];
    parent[start_idx] = Some(start_idx);

    let mut queue = VecDeque::new();
    queue.push_back(start);

    let mut found = false;
    while let Some(current) = queue.pop_front() {
        let Some(current_idx) = grid.index(current) else {
            continue;
        };
        if current_idx == end_idx {
            found = true;
            break;
        }

        for next in grid.walkable_neighbors(current) {
            let Some(next_idx) = grid.index(next) else {
                continue;
            };
            if parent[next_idx].is_none() {
                parent[next_idx] = Some(current_idx);
                queue.push_back(next);
            }
        }
    }

    if !found {
        return Path::new();
    }

    let mut path = Path::new();
    let mut idx = end_idx;
    loop {
        let Some(pos) = grid.position(idx) else {
            return Path::new();
        };
        path.push(pos);
        if idx == start_idx {
            break;
        }
        match parent[idx] {
            Some(prev) => idx = prev,
            None => return Path::new(),
        }
    }
    path.reverse();
    path
}

/// Number of moves on a shortest route, or `None` if unreachable.
#[must_use]
pub fn hop_count(grid: &Grid, start: Position, end: Position) -> Option<usize> {
    find_path(grid, start, end).len().checked_sub(1)
}

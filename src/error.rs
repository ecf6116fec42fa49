//! Error types for loading mazes and setting up a game.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::game::Position;

/// Which special cell a setup error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRole {
    /// Where the player starts.
    Start,
    /// The cell the player must reach.
    Exit,
}

impl fmt::Display for CellRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Exit => write!(f, "exit"),
        }
    }
}

/// Errors raised while loading a maze or building a game from it.
///
/// Nothing inside a running game produces an error: illegal moves,
/// unreachable routes and under-filled spawns are ordinary outcomes.
#[derive(Debug, Error)]
pub enum MazeError {
    /// The maze file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The maze has no rows, or its first row is empty.
    #[error("maze is empty")]
    Empty,
    /// A row's length differs from the first row.
    #[error("line {line} has {found} cells, expected {expected}")]
    Ragged {
        /// 1-based line number.
        line: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// A side is longer than the grid can address.
    #[error("maze is {width}x{height}, sides are limited to 65535 cells")]
    TooLarge {
        /// Width in cells.
        width: usize,
        /// Height in cells.
        height: usize,
    },
    /// The maze cannot hold a start and an exit inside a border.
    #[error("maze is {width}x{height}, need at least 3x3")]
    TooSmall {
        /// Width in cells.
        width: u16,
        /// Height in cells.
        height: u16,
    },
    /// The start or exit cell is a wall.
    #[error("{role} cell {position} is a wall")]
    BlockedCell {
        /// Which cell is blocked.
        role: CellRole,
        /// Where it is.
        position: Position,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MazeError::Ragged {
            line: 4,
            expected: 10,
            found: 7,
        };
        assert_eq!(err.to_string(), "line 4 has 7 cells, expected 10");

        let err = MazeError::BlockedCell {
            role: CellRole::Exit,
            position: Position::new(8, 3),
        };
        assert_eq!(err.to_string(), "exit cell (8, 3) is a wall");
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error as _;

        let err = MazeError::Io {
            path: PathBuf::from("maze.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().starts_with("failed to read maze.txt"));
        assert!(err.source().is_some());
    }
}

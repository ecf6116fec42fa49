// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Mazerun: a terminal maze game.
//!
//! The player walks from the top-left of a fixed maze to the exit in the
//! bottom-right while enemies wander at random and drain health on contact.
//! A breadth-first route finder can show the way on request.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     CLI host (ratatui/crossterm)    │
//! ├─────────────────────────────────────┤
//! │   Game::tick(intent) -> Snapshot    │
//! ├──────────────┬──────────────────────┤
//! │  find_path   │  EnemyController     │
//! ├──────────────┴──────────────────────┤
//! │          Grid::is_walkable          │
//! └─────────────────────────────────────┘
//! ```
//!
//! The core never sleeps, reads keys or draws. A host feeds one
//! [`Intent`] per tick and renders the returned [`Snapshot`].

pub mod error;
pub mod game;
pub mod render;

pub use error::{CellRole, MazeError};

// Re-export key game types at crate root for convenience
pub use game::{
    Direction, Game, GameConfig, GameState, Grid, Intent, Path, Player, Position, Snapshot,
    Status, find_path,
};

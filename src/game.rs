//! Game layer for mazerun.
//!
//! Implements the rules of the maze:
//! - Grid with walls and floor
//! - Breadth-first route finding
//! - Player movement and damage
//! - Randomly wandering enemies
//! - The tick-based game loop

mod actor;
mod enemy;
mod grid;
mod invariants;
mod pathfind;
mod state;

pub use actor::{HIT_DAMAGE, MAX_HEALTH, Player, resolve_collisions};
pub use enemy::{EnemyAction, EnemyController, SPAWN_ATTEMPTS};
pub use grid::{Cell, Direction, Grid, Position, WALL_GLYPH};
pub use invariants::{InvariantViolation, check_invariants};
pub use pathfind::{Path, find_path, hop_count};
pub use state::{
    DEFAULT_ENEMIES, DEFAULT_TICK_MS, Game, GameConfig, GameState, Intent, Snapshot, Status,
    exit_cell, start_cell,
};

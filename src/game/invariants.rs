//! Game invariants - sanity checks that detect bugs.
//!
//! None of these should ever trigger while a game is driven through
//! [`Game::tick`](crate::game::Game::tick). They exist for tests and for
//! hand-built states.

use std::fmt;

use crate::game::{GameState, Status};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut violation = |message: String| violations.push(InvariantViolation { message });

    if !state.grid.is_walkable(state.player.position) {
        violation(format!("player stands on {} which is not walkable", state.player.position));
    }

    if !state.grid.is_walkable(state.exit) {
        violation(format!("exit {} is not walkable", state.exit));
    }

    if state.player.health > state.config.max_health {
        violation(format!(
            "player health {} exceeds max {}",
            state.player.health, state.config.max_health
        ));
    }

    if state.status == Status::Won && state.player.position != state.exit {
        violation(format!("game won with player at {}", state.player.position));
    }

    for (slot, enemy) in state.enemies.iter().enumerate() {
        if !state.grid.is_walkable(*enemy) {
            violation(format!("enemy {slot} stands on {enemy} which is not walkable"));
        }
    }

    if let Some(path) = &state.last_path {
        if let Some(first) = path.first() {
            if *first != state.player.position {
                violation(format!(
                    "route starts at {first} but player is at {}",
                    state.player.position
                ));
            }
        }
        if let Some(last) = path.last() {
            if *last != state.exit {
                violation(format!("route ends at {last}, not at exit {}", state.exit));
            }
        }
        for pair in path.windows(2) {
            if pair[0].manhattan(pair[1]) != 1 {
                violation(format!("route jumps from {} to {}", pair[0], pair[1]));
            }
        }
        for cell in path {
            if !state.grid.is_walkable(*cell) {
                violation(format!("route crosses {cell} which is not walkable"));
            }
        }
    }

    violations
}

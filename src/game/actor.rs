//! Player state, movement and damage.

use crate::game::{Direction, Grid, Position};

/// Health a player starts with.
pub const MAX_HEALTH: u32 = 100;

/// Health lost per enemy on the player's cell (20% of max).
pub const HIT_DAMAGE: u32 = 20;

/// The player's mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    /// Current cell.
    pub position: Position,
    /// Remaining health, never below zero.
    pub health: u32,
}

impl Player {
    /// Create a player at `position` with `health`.
    #[must_use]
    pub const fn new(position: Position, health: u32) -> Self {
        Self { position, health }
    }

    /// Step one cell in `direction` if the target is walkable.
    ///
    /// Returns `true` if the player moved. A blocked move leaves the
    /// position unchanged.
    pub fn try_move(&mut self, grid: &Grid, direction: Direction) -> bool {
        let target = self.position.step(direction);
        if grid.is_walkable(target) {
            self.position = target;
            true
        } else {
            false
        }
    }

    /// Subtract `amount` from health, stopping at zero.
    pub fn apply_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Whether health has run out.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Health as a percentage of `max_health`, rounded down.
    #[must_use]
    pub fn health_percent(&self, max_health: u32) -> u32 {
        if max_health == 0 {
            return 0;
        }
        let percent = u64::from(self.health) * 100 / u64::from(max_health);
        u32::try_from(percent.min(100)).unwrap_or(100)
    }
}

/// Damage the player once for every enemy standing on its cell.
///
/// Hits stack: two enemies on the player's cell deal damage twice.
/// Returns the total damage dealt.
pub fn resolve_collisions(player: &mut Player, enemies: &[Position], damage: u32) -> u32 {
    let mut dealt = 0u32;
    for enemy in enemies {
        if *enemy == player.position {
            player.apply_damage(damage);
            dealt = dealt.saturating_add(damage);
        }
    }
    if dealt > 0 {
        log::debug!(
            "player hit for {dealt} at {}, health now {}",
            player.position,
            player.health
        );
    }
    dealt
}

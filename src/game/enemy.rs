//! Enemy placement and random-walk movement.
//!
//! All randomness comes from the generator the controller owns, so a
//! seeded controller replays the exact same enemy behavior.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::game::{Direction, Grid, Position};

/// Default cap on placement attempts across all enemies.
pub const SPAWN_ATTEMPTS: u32 = 1000;

/// What an enemy does on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyAction {
    /// Stay on the current cell.
    Stay,
    /// Try to step one cell.
    Move(Direction),
}

impl EnemyAction {
    /// Number of equally likely actions.
    pub const COUNT: u32 = 5;

    /// Map a roll in `0..COUNT` to an action.
    #[must_use]
    pub const fn from_roll(roll: u32) -> Self {
        match roll {
            0 => Self::Move(Direction::Up),
            1 => Self::Move(Direction::Down),
            2 => Self::Move(Direction::Left),
            3 => Self::Move(Direction::Right),
            _ => Self::Stay,
        }
    }
}

/// Places enemies and moves them with an injected random source.
#[derive(Debug, Clone)]
pub struct EnemyController<R> {
    rng: R,
}

impl EnemyController<ChaCha8Rng> {
    /// Controller backed by a ChaCha generator seeded with `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> EnemyController<R> {
    /// Wrap a random source.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Place up to `count` enemies on distinct walkable cells, avoiding
    /// the player's cell.
    ///
    /// Candidates are drawn from the interior (`1..width-1`, `1..height-1`).
    /// Each draw uses one of `max_attempts`; when they run out the result
    /// simply holds fewer than `count` enemies.
    pub fn spawn(
        &mut self,
        count: usize,
        grid: &Grid,
        player: Position,
        max_attempts: u32,
    ) -> Vec<Position> {
        let mut enemies = Vec::with_capacity(count);
        let width = i32::from(grid.width());
        let height = i32::from(grid.height());
        if width < 3 || height < 3 {
            log::warn!("maze {width}x{height} has no interior, no enemies spawned");
            return enemies;
        }

        let mut attempts = 0u32;
        while enemies.len() < count && attempts < max_attempts {
            attempts += 1;
            let candidate = Position::new(
                self.rng.gen_range(1..width - 1),
                self.rng.gen_range(1..height - 1),
            );
            if grid.is_walkable(candidate)
                && candidate != player
                && !enemies.contains(&candidate)
            {
                enemies.push(candidate);
            }
        }

        if enemies.len() < count {
            log::warn!(
                "placed {} of {count} enemies after {attempts} attempts",
                enemies.len()
            );
        } else {
            log::debug!("placed {count} enemies in {attempts} attempts");
        }
        enemies
    }

    /// Roll one action for every enemy and apply it.
    ///
    /// A move is kept only if the target is walkable and is not the
    /// player's cell. Enemies may end up sharing a cell with each other.
    /// Returns how many enemies changed cell.
    pub fn step(&mut self, enemies: &mut [Position], grid: &Grid, player: Position) -> usize {
        let mut moved = 0;
        for enemy in enemies.iter_mut() {
            let action = EnemyAction::from_roll(self.rng.gen_range(0..EnemyAction::COUNT));
            let EnemyAction::Move(direction) = action else {
                continue;
            };
            let target = enemy.step(direction);
            if grid.is_walkable(target) && target != player {
                *enemy = target;
                moved += 1;
            }
        }
        log::trace!("{moved} of {} enemies moved", enemies.len());
        moved
    }
}

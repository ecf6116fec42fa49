//! Game state and the per-tick update.
//!
//! A tick runs in a fixed order:
//!
//! 1. terminal check (`Lost` before `Won`)
//! 2. quit
//! 3. player move, route request or visibility toggle
//! 4. enemy step and collision damage, while enemies are visible
//!
//! The host drives [`Game::tick`] at its own pace and renders the returned
//! [`Snapshot`]; nothing here sleeps or touches the terminal.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{CellRole, MazeError};
use crate::game::{
    EnemyController, Grid, Path, Player, Position, find_path, resolve_collisions, Direction,
    HIT_DAMAGE, MAX_HEALTH, SPAWN_ATTEMPTS,
};

/// Default number of enemies.
pub const DEFAULT_ENEMIES: usize = 3;

/// Default pause between ticks, in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 200;

/// Game settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Enemies to place at start.
    pub enemy_count: usize,
    /// Placement attempts shared by all enemies.
    pub spawn_attempts: u32,
    /// Starting (and maximum) health.
    pub max_health: u32,
    /// Health lost per enemy contact.
    pub hit_damage: u32,
    /// Pause between ticks for real-time hosts.
    pub tick_ms: u64,
    /// Seed for enemy randomness; `None` lets the host pick one.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            enemy_count: DEFAULT_ENEMIES,
            spawn_attempts: SPAWN_ATTEMPTS,
            max_health: MAX_HEALTH,
            hit_damage: HIT_DAMAGE,
            tick_ms: DEFAULT_TICK_MS,
            seed: None,
        }
    }
}

/// One user command, consumed by a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Intent {
    /// No input this tick.
    #[default]
    Idle,
    /// Step the player.
    Move(Direction),
    /// Compute a route from the player to the exit.
    RequestPath,
    /// Show or hide enemies. Hidden enemies are frozen and harmless.
    ToggleEnemyVisibility,
    /// End the game.
    Quit,
}

/// Where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Still playing.
    Running,
    /// Health ran out.
    Lost,
    /// The player reached the exit.
    Won,
    /// The player gave up.
    Quit,
}

impl Status {
    /// Whether the game has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// What a renderer needs after a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Ticks processed so far.
    pub tick: u64,
    /// Status after this tick.
    pub status: Status,
    /// Player cell.
    pub player: Position,
    /// Remaining health.
    pub health: u32,
    /// Remaining health in percent.
    pub health_percent: u32,
    /// Enemy cells; empty while enemies are hidden.
    pub enemies: Vec<Position>,
    /// Whether enemies are shown.
    pub enemies_visible: bool,
    /// Last requested route, until the player moves.
    pub path: Option<Path>,
    /// Damage taken during this tick.
    pub damage_taken: u32,
}

/// The whole mutable game.
#[derive(Debug, Clone)]
pub struct GameState {
    /// The maze.
    pub grid: Grid,
    /// Cell the player must reach.
    pub exit: Position,
    /// The player.
    pub player: Player,
    /// Enemy cells, one per slot.
    pub enemies: Vec<Position>,
    /// Whether enemies are shown and active.
    pub enemies_visible: bool,
    /// Route from the player's current cell to the exit, if requested.
    pub last_path: Option<Path>,
    /// Current status.
    pub status: Status,
    /// Ticks processed.
    pub tick: u64,
    /// Settings the game was created with.
    pub config: GameConfig,
}

impl GameState {
    /// Set up a game with the player at `(1, 1)` and the exit at
    /// `(width - 2, height - 2)`. No enemies are placed.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::TooSmall`] for grids under 3x3 and
    /// [`MazeError::BlockedCell`] if the start or exit is a wall.
    pub fn new(grid: Grid, config: GameConfig) -> Result<Self, MazeError> {
        if grid.width() < 3 || grid.height() < 3 {
            return Err(MazeError::TooSmall {
                width: grid.width(),
                height: grid.height(),
            });
        }
        let start = start_cell();
        let exit = exit_cell(&grid);
        if !grid.is_walkable(start) {
            return Err(MazeError::BlockedCell {
                role: CellRole::Start,
                position: start,
            });
        }
        if !grid.is_walkable(exit) {
            return Err(MazeError::BlockedCell {
                role: CellRole::Exit,
                position: exit,
            });
        }

        Ok(Self {
            grid,
            exit,
            player: Player::new(start, config.max_health),
            enemies: Vec::new(),
            enemies_visible: true,
            last_path: None,
            status: Status::Running,
            tick: 0,
            config,
        })
    }

    /// Route from the player's cell to the exit.
    #[must_use]
    pub fn route_to_exit(&self) -> Path {
        find_path(&self.grid, self.player.position, self.exit)
    }

    /// Check for a terminal condition and record it.
    ///
    /// Loss is checked before the win, so dying on the exit is still a loss.
    fn update_terminal(&mut self) -> bool {
        if self.player.is_dead() {
            self.status = Status::Lost;
        } else if self.player.position == self.exit {
            self.status = Status::Won;
        }
        self.status.is_terminal()
    }

    /// Capture what a renderer needs.
    #[must_use]
    pub fn snapshot(&self, damage_taken: u32) -> Snapshot {
        Snapshot {
            tick: self.tick,
            status: self.status,
            player: self.player.position,
            health: self.player.health,
            health_percent: self.player.health_percent(self.config.max_health),
            enemies: if self.enemies_visible {
                self.enemies.clone()
            } else {
                Vec::new()
            },
            enemies_visible: self.enemies_visible,
            path: self.last_path.clone(),
            damage_taken,
        }
    }
}

/// Where the player starts.
#[must_use]
pub const fn start_cell() -> Position {
    Position::new(1, 1)
}

/// The exit cell for a grid: one in from the bottom-right corner.
#[must_use]
pub fn exit_cell(grid: &Grid) -> Position {
    Position::new(i32::from(grid.width()) - 2, i32::from(grid.height()) - 2)
}

/// A game plus the random source driving its enemies.
#[derive(Debug, Clone)]
pub struct Game<R = ChaCha8Rng> {
    state: GameState,
    controller: EnemyController<R>,
}

impl Game<ChaCha8Rng> {
    /// Start a game whose enemies are driven by `config.seed`.
    ///
    /// A config without a seed uses seed 0; hosts that want a fresh game
    /// each run pick a seed before calling this.
    ///
    /// # Errors
    ///
    /// See [`GameState::new`].
    pub fn from_config(grid: Grid, config: GameConfig) -> Result<Self, MazeError> {
        let seed = config.seed.unwrap_or_default();
        Self::new(grid, config, EnemyController::seeded(seed))
    }

    /// Start a game whose enemies are driven by `seed`, overriding any seed
    /// in `config`. The stored config records the seed actually used.
    ///
    /// # Errors
    ///
    /// See [`GameState::new`].
    pub fn seeded(grid: Grid, config: GameConfig, seed: u64) -> Result<Self, MazeError> {
        Self::from_config(
            grid,
            GameConfig {
                seed: Some(seed),
                ..config
            },
        )
    }
}

impl<R: Rng> Game<R> {
    /// Set up the game and spawn enemies with `controller`.
    ///
    /// # Errors
    ///
    /// See [`GameState::new`].
    pub fn new(
        grid: Grid,
        config: GameConfig,
        mut controller: EnemyController<R>,
    ) -> Result<Self, MazeError> {
        let mut state = GameState::new(grid, config)?;
        state.enemies = controller.spawn(
            config.enemy_count,
            &state.grid,
            state.player.position,
            config.spawn_attempts,
        );
        log::info!(
            "game started on {}x{} maze, exit at {}, {} enemies",
            state.grid.width(),
            state.grid.height(),
            state.exit,
            state.enemies.len()
        );
        Ok(Self { state, controller })
    }

    /// Wrap an existing state, e.g. one arranged by hand.
    #[must_use]
    pub const fn from_state(state: GameState, controller: EnemyController<R>) -> Self {
        Self { state, controller }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.state.status
    }

    /// Snapshot of the current state without advancing.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot(0)
    }

    /// Advance one tick with `intent`.
    ///
    /// Once the status is terminal, further ticks change nothing.
    pub fn tick(&mut self, intent: Intent) -> Snapshot {
        if self.state.status.is_terminal() {
            return self.state.snapshot(0);
        }
        self.state.tick += 1;

        if self.state.update_terminal() {
            log::info!(
                "game ended {:?} after {} ticks",
                self.state.status,
                self.state.tick
            );
            return self.state.snapshot(0);
        }

        match intent {
            Intent::Idle => {}
            Intent::Quit => {
                self.state.status = Status::Quit;
                log::info!("player quit after {} ticks", self.state.tick);
                return self.state.snapshot(0);
            }
            Intent::Move(direction) => {
                if self.state.player.try_move(&self.state.grid, direction) {
                    self.state.last_path = None;
                }
            }
            Intent::RequestPath => {
                let path = self.state.route_to_exit();
                if path.is_empty() {
                    log::debug!("no route from {} to exit", self.state.player.position);
                } else {
                    log::debug!("route to exit is {} moves", path.len() - 1);
                }
                self.state.last_path = Some(path);
            }
            Intent::ToggleEnemyVisibility => {
                self.state.enemies_visible = !self.state.enemies_visible;
            }
        }

        let mut damage = 0;
        if self.state.enemies_visible {
            let state = &mut self.state;
            self.controller
                .step(&mut state.enemies, &state.grid, state.player.position);
            damage = resolve_collisions(&mut state.player, &state.enemies, state.config.hit_damage);
        }

        self.state.snapshot(damage)
    }
}

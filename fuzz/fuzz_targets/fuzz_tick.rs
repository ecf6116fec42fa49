#![no_main]

//! Full game fuzzer.
//!
//! Builds a maze from a fuzzer-chosen wall mask, then drives the tick loop
//! with a fuzzer-chosen intent stream:
//! 1. Parse the maze (setup errors are fine, the input is skipped)
//! 2. Spawn enemies from the seed
//! 3. Apply one intent per tick
//! 4. Check invariants after every tick
//!
//! Also checks that a finished game stays finished.

use arbitrary::Arbitrary;
use mazerun::game::{check_invariants, Direction, Game, GameConfig, Grid, Intent};
use libfuzzer_sys::fuzz_target;

/// A fuzzer-generated intent.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzIntent {
    Idle,
    Up,
    Down,
    Left,
    Right,
    RequestPath,
    ToggleEnemies,
    Quit,
}

impl FuzzIntent {
    fn to_intent(self) -> Intent {
        match self {
            Self::Idle => Intent::Idle,
            Self::Up => Intent::Move(Direction::Up),
            Self::Down => Intent::Move(Direction::Down),
            Self::Left => Intent::Move(Direction::Left),
            Self::Right => Intent::Move(Direction::Right),
            Self::RequestPath => Intent::RequestPath,
            Self::ToggleEnemies => Intent::ToggleEnemyVisibility,
            Self::Quit => Intent::Quit,
        }
    }
}

/// Structured input for game fuzzing.
#[derive(Arbitrary, Debug)]
struct TickInput {
    /// Maze width before clamping.
    width: u8,
    /// Maze height before clamping.
    height: u8,
    /// Wall bits, row-major; missing bits are floor.
    walls: Vec<u8>,
    /// Enemy count before clamping.
    enemies: u8,
    /// Seed for enemy movement.
    seed: u64,
    /// One intent per tick.
    intents: Vec<FuzzIntent>,
}

fuzz_target!(|input: TickInput| {
    // Cap sizes to keep runs short
    let width = usize::from(input.width % 30) + 3;
    let height = usize::from(input.height % 30) + 3;
    let intents: Vec<_> = input.intents.into_iter().take(500).collect();

    let mut text = String::with_capacity((width + 1) * height);
    for y in 0..height {
        for x in 0..width {
            let bit = y * width + x;
            let wall = input
                .walls
                .get(bit / 8)
                .is_some_and(|byte| byte & (1 << (bit % 8)) != 0);
            text.push(if wall { '#' } else { ' ' });
        }
        text.push('\n');
    }
    let grid = Grid::parse(&text).expect("generated maze is rectangular");

    let config = GameConfig {
        enemy_count: usize::from(input.enemies % 16),
        seed: Some(input.seed),
        ..GameConfig::default()
    };
    let Ok(mut game) = Game::from_config(grid, config) else {
        return;
    };

    let violations = check_invariants(game.state());
    assert!(violations.is_empty(), "Invariants violated at start: {violations:?}");

    for (tick, intent) in intents.iter().enumerate() {
        let before = game.state().player.health;
        let snap = game.tick(intent.to_intent());
        assert!(snap.health <= before, "health rose on tick {tick}");

        let violations = check_invariants(game.state());
        assert!(
            violations.is_empty(),
            "Invariants violated after tick {tick}: {violations:?}"
        );

        if snap.status.is_terminal() {
            let frozen = game.state().clone();
            let again = game.tick(Intent::Idle);
            assert_eq!(again.status, snap.status);
            assert_eq!(game.state().player, frozen.player);
            assert_eq!(game.state().enemies, frozen.enemies);
            break;
        }
    }
});

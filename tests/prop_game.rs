//! Property-based tests for game mechanics.
//!
//! These tests verify properties of movement, route finding, damage,
//! spawning and the tick loop on randomly generated mazes.
//! Run with: cargo test --release prop_game

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use mazerun::game::{
    check_invariants, find_path, Direction, EnemyController, Game, GameConfig, Grid, Intent,
    Player, Position, SPAWN_ATTEMPTS,
};

/// Build a maze from a cell mask (`true` = floor).
fn grid_from_mask(width: usize, mask: &[bool]) -> Grid {
    let mut text = String::with_capacity(mask.len() + mask.len() / width);
    for row in mask.chunks(width) {
        text.extend(row.iter().map(|open| if *open { ' ' } else { '#' }));
        text.push('\n');
    }
    Grid::parse(&text).unwrap()
}

/// Random maze between 3x3 and 12x12, about 70% floor.
fn arb_grid() -> impl Strategy<Value = Grid> {
    (3usize..=12, 3usize..=12).prop_flat_map(|(w, h)| {
        proptest::collection::vec(proptest::bool::weighted(0.7), w * h)
            .prop_map(move |mask| grid_from_mask(w, &mask))
    })
}

fn arb_position() -> impl Strategy<Value = Position> {
    (-1i32..13, -1i32..13).prop_map(|(x, y)| Position::new(x, y))
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn arb_intent() -> impl Strategy<Value = Intent> {
    prop_oneof![
        4 => arb_direction().prop_map(Intent::Move),
        1 => Just(Intent::Idle),
        1 => Just(Intent::RequestPath),
        1 => Just(Intent::ToggleEnemyVisibility),
    ]
}

/// Shortest hop count by repeated relaxation, independent of the BFS.
fn reference_distance(grid: &Grid, start: Position, end: Position) -> Option<usize> {
    if !grid.is_walkable(start) || !grid.is_walkable(end) {
        return None;
    }
    let mut dist = vec![usize::MAX; grid.len()];
    dist[grid.index(start).unwrap()] = 0;
    let mut changed = true;
    while changed {
        changed = false;
        for (pos, _) in grid.iter() {
            let here = dist[grid.index(pos).unwrap()];
            if here == usize::MAX {
                continue;
            }
            for next in grid.walkable_neighbors(pos) {
                let idx = grid.index(next).unwrap();
                if dist[idx] > here + 1 {
                    dist[idx] = here + 1;
                    changed = true;
                }
            }
        }
    }
    let d = dist[grid.index(end).unwrap()];
    (d != usize::MAX).then_some(d)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// A move lands on a walkable neighbor or changes nothing.
    #[test]
    fn prop_move_stays_walkable(
        grid in arb_grid(),
        pick in any::<prop::sample::Index>(),
        dir in arb_direction()
    ) {
        let open: Vec<Position> = grid
            .iter()
            .filter(|(pos, _)| grid.is_walkable(*pos))
            .map(|(pos, _)| pos)
            .collect();
        if open.is_empty() {
            return Ok(());
        }
        let start = open[pick.index(open.len())];

        let mut player = Player::new(start, 100);
        let moved = player.try_move(&grid, dir);

        prop_assert!(grid.is_walkable(player.position));
        if moved {
            prop_assert_eq!(player.position, start.step(dir));
        } else {
            prop_assert_eq!(player.position, start);
        }
    }

    /// Route length matches the true shortest distance; empty iff unreachable.
    #[test]
    fn prop_path_is_shortest(
        grid in arb_grid(),
        start in arb_position(),
        end in arb_position()
    ) {
        let path = find_path(&grid, start, end);
        match reference_distance(&grid, start, end) {
            None => prop_assert!(path.is_empty()),
            Some(d) => {
                prop_assert_eq!(path.len(), d + 1);
                prop_assert_eq!(path[0], start);
                prop_assert_eq!(*path.last().unwrap(), end);
                for pair in path.windows(2) {
                    prop_assert_eq!(pair[0].manhattan(pair[1]), 1);
                }
                for cell in &path {
                    prop_assert!(grid.is_walkable(*cell));
                }
            }
        }
    }

    /// Route finding is a pure function of its inputs.
    #[test]
    fn prop_path_repeatable(
        grid in arb_grid(),
        start in arb_position(),
        end in arb_position()
    ) {
        prop_assert_eq!(find_path(&grid, start, end), find_path(&grid, start, end));
    }

    /// Health never goes below zero no matter how much damage lands.
    #[test]
    fn prop_damage_floors_at_zero(
        health in 0u32..=100,
        hits in proptest::collection::vec(0u32..200, 0..20)
    ) {
        let mut player = Player::new(Position::new(1, 1), health);
        let mut expected = i64::from(health);
        for hit in hits {
            player.apply_damage(hit);
            expected = (expected - i64::from(hit)).max(0);
            prop_assert_eq!(i64::from(player.health), expected);
        }
    }

    /// Spawning on an open room fills every slot with distinct legal cells.
    #[test]
    fn prop_spawn_distinct(
        w in 4usize..12,
        h in 4usize..12,
        count in 0usize..=3,
        seed in any::<u64>()
    ) {
        let mask: Vec<bool> = (0..w * h)
            .map(|i| {
                let (x, y) = (i % w, i / w);
                x != 0 && y != 0 && x != w - 1 && y != h - 1
            })
            .collect();
        let grid = grid_from_mask(w, &mask);
        let player = Position::new(1, 1);

        let mut controller = EnemyController::seeded(seed);
        let enemies = controller.spawn(count, &grid, player, SPAWN_ATTEMPTS);

        prop_assert_eq!(enemies.len(), count);
        for (i, enemy) in enemies.iter().enumerate() {
            prop_assert!(grid.is_walkable(*enemy));
            prop_assert_ne!(*enemy, player);
            prop_assert!(!enemies[i + 1..].contains(enemy));
        }
    }

    /// Any intent sequence keeps the game consistent, and a finished game
    /// stays finished.
    #[test]
    fn prop_ticks_keep_invariants(
        w in 5usize..12,
        h in 5usize..12,
        seed in any::<u64>(),
        intents in proptest::collection::vec(arb_intent(), 1..200)
    ) {
        let mask: Vec<bool> = (0..w * h)
            .map(|i| {
                let (x, y) = (i % w, i / w);
                x != 0 && y != 0 && x != w - 1 && y != h - 1 && (x % 3 != 0 || y % 2 == 1)
            })
            .collect();
        let grid = grid_from_mask(w, &mask);
        let Ok(mut game) = Game::seeded(grid, GameConfig::default(), seed) else {
            // Start or exit landed on a wall for this shape.
            return Ok(());
        };

        for intent in intents {
            let before = game.state().player.health;
            let snap = game.tick(intent);
            prop_assert!(snap.health <= before);
            let violations = check_invariants(game.state());
            prop_assert!(violations.is_empty(), "{:?}", violations);

            if snap.status.is_terminal() {
                let frozen = game.state().clone();
                let again = game.tick(Intent::Move(Direction::Right));
                prop_assert_eq!(again.status, snap.status);
                prop_assert_eq!(game.state().player, frozen.player);
                prop_assert_eq!(&game.state().enemies, &frozen.enemies);
                break;
            }
        }
    }
}

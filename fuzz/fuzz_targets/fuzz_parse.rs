#![no_main]

//! Maze text parser fuzzer.
//!
//! Any input must either be rejected with an error or produce a grid that
//! prints back to text parsing to the same grid.

use libfuzzer_sys::fuzz_target;
use mazerun::game::Grid;

fuzz_target!(|text: &str| {
    let Ok(grid) = Grid::parse(text) else {
        return;
    };

    assert_eq!(grid.len(), usize::from(grid.width()) * usize::from(grid.height()));
    assert!(grid.walkable_count() <= grid.len());

    let reparsed = Grid::parse(&grid.to_string()).expect("printed grid parses");
    assert_eq!(reparsed, grid);
});

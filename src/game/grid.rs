//! Maze grid and walkability queries.

use std::fmt;
use std::fs;
use std::path::Path as FsPath;

use serde::{Deserialize, Serialize};

use crate::error::MazeError;

/// Glyph that marks a wall in maze files. Every other glyph is floor.
pub const WALL_GLYPH: char = '#';

/// A cell position on the grid.
///
/// Coordinates are signed so that a step off the edge produces a position
/// that [`Grid::is_walkable`] rejects instead of wrapping around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate (column).
    pub x: i32,
    /// Y coordinate (row).
    pub y: i32,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The position one cell away in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Manhattan distance to another position.
    #[must_use]
    pub const fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four grid directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Away from row 0.
    Down,
    /// Towards column 0.
    Left,
    /// Away from column 0.
    Right,
}

impl Direction {
    /// All directions in neighbor exploration order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// The `(dx, dy)` offset of one step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Terrain of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Impassable.
    Wall,
    /// Open floor.
    Floor,
}

impl Cell {
    /// Classify a maze file glyph.
    #[must_use]
    pub const fn from_glyph(glyph: char) -> Self {
        if glyph == WALL_GLYPH { Self::Wall } else { Self::Floor }
    }

    /// Glyph used when writing the cell back out.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Wall => WALL_GLYPH,
            Self::Floor => ' ',
        }
    }
}

/// The maze. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Width in cells.
    width: u16,
    /// Height in cells.
    height: u16,
    /// Cells stored in row-major order.
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a grid from rows of glyphs.
    ///
    /// Trailing `\r` is stripped from each line and trailing blank lines are
    /// ignored, so files saved on any platform load the same.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::Empty`] for input without rows,
    /// [`MazeError::Ragged`] if rows differ in length and
    /// [`MazeError::TooLarge`] if a side exceeds `u16::MAX` cells.
    pub fn parse(text: &str) -> Result<Self, MazeError> {
        let mut rows: Vec<&str> = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();
        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }

        let Some(first) = rows.first() else {
            return Err(MazeError::Empty);
        };
        let expected = first.chars().count();
        if expected == 0 {
            return Err(MazeError::Empty);
        }

        let mut cells = Vec::with_capacity(expected * rows.len());
        for (idx, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != expected {
                return Err(MazeError::Ragged {
                    line: idx + 1,
                    expected,
                    found,
                });
            }
            cells.extend(row.chars().map(Cell::from_glyph));
        }

        let too_large = || MazeError::TooLarge {
            width: expected,
            height: rows.len(),
        };
        let width = u16::try_from(expected).map_err(|_| too_large())?;
        let height = u16::try_from(rows.len()).map_err(|_| too_large())?;

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Read and parse a maze file.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::Io`] if the file cannot be read, otherwise any
    /// error from [`Grid::parse`].
    pub fn load(path: &FsPath) -> Result<Self, MazeError> {
        let text = fs::read_to_string(path).map_err(|source| MazeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Get the width of the grid.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the height of the grid.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Number of cells in the grid.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// A parsed grid always has at least one cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Check if a position is within the grid bounds.
    #[must_use]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && pos.x < i32::from(self.width)
            && pos.y < i32::from(self.height)
    }

    /// Row-major index of a position, or `None` when out of bounds.
    #[must_use]
    pub fn index(&self, pos: Position) -> Option<usize> {
        if !self.in_bounds(pos) {
            return None;
        }
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        Some(y * usize::from(self.width) + x)
    }

    /// Position of a row-major index.
    #[must_use]
    pub fn position(&self, index: usize) -> Option<Position> {
        if index >= self.cells.len() {
            return None;
        }
        let width = usize::from(self.width);
        let x = i32::try_from(index % width).ok()?;
        let y = i32::try_from(index / width).ok()?;
        Some(Position::new(x, y))
    }

    /// Get the cell at a position.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Whether an actor may stand on `pos`.
    ///
    /// Out-of-bounds positions and walls are never walkable. Every movement
    /// and search rule in the game goes through this check.
    #[must_use]
    #[inline]
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.get(pos) == Some(Cell::Floor)
    }

    /// Walkable 4-neighbors of `pos`, in [`Direction::ALL`] order.
    pub fn walkable_neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        Direction::ALL
            .into_iter()
            .map(move |dir| pos.step(dir))
            .filter(|next| self.is_walkable(*next))
    }

    /// Iterate over all positions and cells.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        let width = usize::from(self.width);
        self.cells.iter().enumerate().map(move |(idx, cell)| {
            // Both fit in i32: width and height are u16.
            let x = i32::try_from(idx % width).unwrap_or_default();
            let y = i32::try_from(idx / width).unwrap_or_default();
            (Position::new(x, y), *cell)
        })
    }

    /// Count floor cells.
    #[must_use]
    pub fn walkable_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell == Cell::Floor).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(usize::from(self.width)) {
            let line: String = row.iter().map(|cell| cell.glyph()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "#####\n#   #\n# # #\n#   #\n#####\n";

    #[test]
    fn test_parse_dimensions() {
        let grid = Grid::parse(SMALL).unwrap();
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 5);
        assert_eq!(grid.len(), 25);
        assert_eq!(grid.walkable_count(), 7);
    }

    #[test]
    fn test_parse_crlf_and_trailing_blank_lines() {
        let grid = Grid::parse("###\r\n# #\r\n###\r\n\r\n\n").unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert!(grid.is_walkable(Position::new(1, 1)));
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Grid::parse(""), Err(MazeError::Empty)));
        assert!(matches!(Grid::parse("\n\n"), Err(MazeError::Empty)));
    }

    #[test]
    fn test_parse_ragged() {
        let err = Grid::parse("###\n#\n###").unwrap_err();
        assert!(matches!(
            err,
            MazeError::Ragged {
                line: 2,
                expected: 3,
                found: 1
            }
        ));
    }

    #[test]
    fn test_any_non_wall_glyph_is_floor() {
        let grid = Grid::parse("#.E\n@ X").unwrap();
        assert!(!grid.is_walkable(Position::new(0, 0)));
        assert!(grid.is_walkable(Position::new(1, 0)));
        assert!(grid.is_walkable(Position::new(2, 0)));
        assert!(grid.is_walkable(Position::new(0, 1)));
    }

    #[test]
    fn test_out_of_bounds_not_walkable() {
        let grid = Grid::parse("   \n   \n   ").unwrap();
        assert!(grid.is_walkable(Position::new(0, 0)));
        assert!(!grid.is_walkable(Position::new(-1, 0)));
        assert!(!grid.is_walkable(Position::new(0, -1)));
        assert!(!grid.is_walkable(Position::new(3, 0)));
        assert!(!grid.is_walkable(Position::new(0, 3)));
    }

    #[test]
    fn test_index_position_roundtrip() {
        let grid = Grid::parse(SMALL).unwrap();
        assert_eq!(grid.index(Position::new(3, 2)), Some(13));
        assert_eq!(grid.position(13), Some(Position::new(3, 2)));
        assert_eq!(grid.index(Position::new(5, 0)), None);
        assert_eq!(grid.position(25), None);
    }

    #[test]
    fn test_walkable_neighbors_order() {
        let grid = Grid::parse(SMALL).unwrap();
        let around: Vec<_> = grid.walkable_neighbors(Position::new(1, 2)).collect();
        // Left and right are walls at (0,2) and (2,2).
        assert_eq!(around, vec![Position::new(1, 1), Position::new(1, 3)]);
    }

    #[test]
    fn test_display_roundtrip() {
        let grid = Grid::parse(SMALL).unwrap();
        assert_eq!(Grid::parse(&grid.to_string()).unwrap(), grid);
    }

    #[test]
    fn test_step_and_manhattan() {
        let pos = Position::new(2, 2);
        assert_eq!(pos.step(Direction::Up), Position::new(2, 1));
        assert_eq!(pos.step(Direction::Left), Position::new(1, 2));
        assert_eq!(pos.manhattan(Position::new(5, 0)), 5);
    }
}

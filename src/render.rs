//! Plain-text rendering of the maze.
//!
//! The same [`glyph_at`] decision drives both the text output here and the
//! colored TUI, so the two always agree on what sits in each cell.

// Allow format! with push_str for readability - the allocation overhead is negligible for text rendering
#![allow(clippy::format_push_string)]

use crate::game::{Cell, GameState, Grid, Position};

/// Width of the health bar in characters.
pub const HEALTH_BAR_WIDTH: u32 = 20;

/// What to draw in one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// Impassable cell.
    Wall,
    /// Empty floor.
    Floor,
    /// Floor on the displayed route.
    Route,
    /// The exit.
    Exit,
    /// One or more enemies.
    Enemy,
    /// The player.
    Player,
}

impl Glyph {
    /// Character for this glyph.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Floor => ' ',
            Self::Route => '*',
            Self::Exit => 'X',
            Self::Enemy => 'E',
            Self::Player => '@',
        }
    }
}

/// Things drawn on top of the grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overlay<'a> {
    /// Player cell, if any.
    pub player: Option<Position>,
    /// Exit cell, if any.
    pub exit: Option<Position>,
    /// Enemy cells to show.
    pub enemies: &'a [Position],
    /// Route cells to show.
    pub route: &'a [Position],
}

impl<'a> Overlay<'a> {
    /// Overlay for a game state; hidden enemies are left out.
    #[must_use]
    pub fn from_state(state: &'a GameState) -> Self {
        Self {
            player: Some(state.player.position),
            exit: Some(state.exit),
            enemies: if state.enemies_visible { state.enemies.as_slice() } else { &[] },
            route: state.last_path.as_deref().unwrap_or(&[]),
        }
    }
}

/// Decide what to draw at `pos`.
///
/// Player beats enemies, enemies beat the exit, the exit beats the route.
#[must_use]
pub fn glyph_at(grid: &Grid, overlay: &Overlay<'_>, pos: Position) -> Glyph {
    if overlay.player == Some(pos) {
        Glyph::Player
    } else if overlay.enemies.contains(&pos) {
        Glyph::Enemy
    } else if overlay.exit == Some(pos) {
        Glyph::Exit
    } else if overlay.route.contains(&pos) {
        Glyph::Route
    } else if grid.get(pos) == Some(Cell::Floor) {
        Glyph::Floor
    } else {
        Glyph::Wall
    }
}

/// Render the grid with an overlay, one line per row.
#[must_use]
pub fn render_grid(grid: &Grid, overlay: &Overlay<'_>) -> String {
    let mut output = String::with_capacity(grid.len() + usize::from(grid.height()));
    for y in 0..i32::from(grid.height()) {
        for x in 0..i32::from(grid.width()) {
            output.push(glyph_at(grid, overlay, Position::new(x, y)).symbol());
        }
        output.push('\n');
    }
    output
}

/// Health bar such as `[##########__________]`.
///
/// `filled` is `percent` of `width`, rounded to the nearest cell.
#[must_use]
pub fn health_bar(width: u32, percent: u32) -> String {
    let percent = percent.min(100);
    let filled = (percent * width + 50) / 100;
    let filled = usize::try_from(filled).unwrap_or_default();
    let empty = usize::try_from(width).unwrap_or_default().saturating_sub(filled);
    format!("[{}{}]", "#".repeat(filled), "_".repeat(empty))
}

/// Render a full frame: maze, health bar and status line.
///
/// Output format:
/// ```text
/// #####
/// #@ E#
/// #*  #
/// #**X#
/// #####
/// [################____] 80%
/// Tick 7 | Running | enemies shown
/// ```
#[must_use]
pub fn render_text(state: &GameState) -> String {
    let mut output = render_grid(&state.grid, &Overlay::from_state(state));

    let percent = state.player.health_percent(state.config.max_health);
    output.push_str(&format!("{} {percent}%\n", health_bar(HEALTH_BAR_WIDTH, percent)));

    let enemies = if state.enemies_visible { "shown" } else { "hidden" };
    output.push_str(&format!(
        "Tick {} | {:?} | enemies {enemies}\n",
        state.tick, state.status
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;

    fn state() -> GameState {
        let grid = Grid::parse("#####\n#   #\n#   #\n#   #\n#####").unwrap();
        GameState::new(grid, GameConfig::default()).unwrap()
    }

    #[test]
    fn test_health_bar() {
        assert_eq!(health_bar(20, 100), format!("[{}]", "#".repeat(20)));
        assert_eq!(health_bar(20, 0), format!("[{}]", "_".repeat(20)));
        assert_eq!(health_bar(20, 40), "[########____________]");
        assert_eq!(health_bar(10, 150), "[##########]");
        assert_eq!(health_bar(4, 60), "[##__]");
    }

    #[test]
    fn test_render_plain_state() {
        let text = render_text(&state());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "#####");
        assert_eq!(lines[1], "#@  #");
        assert_eq!(lines[3], "#  X#");
        assert_eq!(lines[5], "[####################] 100%");
        assert_eq!(lines[6], "Tick 0 | Running | enemies shown");
    }

    #[test]
    fn test_render_route_and_enemies() {
        let mut state = state();
        state.last_path = Some(state.route_to_exit());
        state.enemies = vec![Position::new(3, 1)];
        let text = render_text(&state);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "#@ E#");
        assert_eq!(lines[2], "#*  #");
        assert_eq!(lines[3], "#**X#");
    }

    #[test]
    fn test_hidden_enemies_not_drawn() {
        let mut state = state();
        state.enemies = vec![Position::new(3, 1)];
        state.enemies_visible = false;
        let text = render_text(&state);
        assert_eq!(text.lines().nth(1), Some("#@  #"));
        assert!(text.contains("enemies hidden"));
    }

    #[test]
    fn test_player_drawn_over_enemy() {
        let grid = Grid::parse("###\n# #\n###").unwrap();
        let enemies = [Position::new(1, 1)];
        let overlay = Overlay {
            player: Some(Position::new(1, 1)),
            enemies: &enemies,
            ..Overlay::default()
        };
        assert_eq!(glyph_at(&grid, &overlay, Position::new(1, 1)), Glyph::Player);
        assert_eq!(glyph_at(&grid, &overlay, Position::new(9, 9)), Glyph::Wall);
    }
}

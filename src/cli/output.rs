//! Output formatting utilities for CLI.

use mazerun::game::{Grid, Path, Position};
use mazerun::render::{render_grid, Overlay};
use serde::Serialize;

/// JSON-serializable route.
#[derive(Debug, Serialize)]
pub(super) struct JsonRoute {
    /// Route start.
    pub(super) start: Position,
    /// Route end.
    pub(super) end: Position,
    /// Whether a route exists.
    pub(super) found: bool,
    /// Number of moves (null if no route).
    pub(super) moves: Option<usize>,
    /// Cells from start to end as `[x, y]` pairs.
    pub(super) path: Vec<[i32; 2]>,
}

impl JsonRoute {
    /// Create from a computed path.
    pub(super) fn from_path(start: Position, end: Position, path: &Path) -> Self {
        Self {
            start,
            end,
            found: !path.is_empty(),
            moves: path.len().checked_sub(1),
            path: path.iter().map(|p| [p.x, p.y]).collect(),
        }
    }
}

/// Format a route as the maze with the route drawn in, plus a summary.
pub(super) fn format_text(grid: &Grid, start: Position, end: Position, path: &Path) -> String {
    let overlay = Overlay {
        player: Some(start),
        exit: Some(end),
        route: path,
        ..Overlay::default()
    };
    let mut output = render_grid(grid, &overlay);
    output.push('\n');

    match path.len().checked_sub(1) {
        Some(moves) => {
            output.push_str(&format!("Route from {start} to {end}: {moves} moves\n"));
        }
        None => output.push_str(&format!("No route from {start} to {end}\n")),
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazerun::find_path;

    #[test]
    fn test_json_route() {
        let grid = Grid::parse("####\n#  #\n####").unwrap();
        let (start, end) = (Position::new(1, 1), Position::new(2, 1));
        let route = JsonRoute::from_path(start, end, &find_path(&grid, start, end));
        let json = serde_json::to_value(&route).unwrap();
        assert_eq!(json["found"], true);
        assert_eq!(json["moves"], 1);
        assert_eq!(json["path"], serde_json::json!([[1, 1], [2, 1]]));
        assert_eq!(json["start"], serde_json::json!({"x": 1, "y": 1}));
    }

    #[test]
    fn test_text_no_route() {
        let grid = Grid::parse("#####\n# # #\n#####").unwrap();
        let (start, end) = (Position::new(1, 1), Position::new(3, 1));
        let text = format_text(&grid, start, end, &Vec::new());
        assert!(text.starts_with("#####\n#@#X#\n"));
        assert!(text.ends_with("No route from (1, 1) to (3, 1)\n"));
    }
}

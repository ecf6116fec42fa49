//! Solve command implementation.

use super::output::{format_text, JsonRoute};
use super::{CliError, OutputFormat};
use mazerun::game::{exit_cell, find_path, start_cell, Grid, Position};
use std::path::PathBuf;

/// Execute the solve command.
///
/// Prints the shortest route between two cells, defaulting to the game's
/// start and exit. An unreachable exit is reported, not treated as an error.
///
/// # Errors
///
/// Returns an error if the maze cannot be loaded or serialized.
pub(crate) fn execute(
    maze: PathBuf,
    from: Option<Position>,
    to: Option<Position>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let grid = Grid::load(&maze)?;
    let start = from.unwrap_or_else(start_cell);
    let end = to.unwrap_or_else(|| exit_cell(&grid));

    let path = find_path(&grid, start, end);
    log::debug!(
        "solved {} from {start} to {end}: {} cells",
        maze.display(),
        path.len()
    );

    match format {
        OutputFormat::Text => {
            print!("{}", format_text(&grid, start, end, &path));
        }
        OutputFormat::Json => {
            let route = JsonRoute::from_path(start, end, &path);
            let json = serde_json::to_string_pretty(&route)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}

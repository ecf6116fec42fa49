//! Maze validation command implementation.

use super::CliError;
use mazerun::game::{hop_count, GameConfig, GameState, Grid};
use std::path::PathBuf;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the maze cannot be loaded or is not playable.
pub(crate) fn execute(maze: PathBuf) -> Result<(), CliError> {
    println!("Validating: {}", maze.display());
    println!();

    let grid = match Grid::load(&maze) {
        Ok(grid) => {
            print_check("Rectangular maze", true);
            grid
        }
        Err(e) => {
            print_check("Rectangular maze", false);
            return Err(e.into());
        }
    };

    let state = match GameState::new(grid, GameConfig::default()) {
        Ok(state) => {
            print_check("Start and exit are open", true);
            state
        }
        Err(e) => {
            print_check(&format!("Playable layout: {e}"), false);
            return Err(e.into());
        }
    };
    let grid = &state.grid;
    let (start, exit) = (state.player.position, state.exit);

    let moves = hop_count(grid, start, exit);
    print_check("Exit reachable from start", moves.is_some());

    println!();
    println!("Summary:");
    println!("  Size:         {}x{}", grid.width(), grid.height());
    println!("  Open cells:   {}", grid.walkable_count());
    match moves {
        Some(moves) => println!("  Shortest run: {moves} moves"),
        None => println!("  Shortest run: none"),
    }

    if moves.is_none() {
        return Err(CliError::new("Exit cannot be reached from the start"));
    }

    println!();
    println!("Validation successful!");

    Ok(())
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn maze_file(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{text}").unwrap();
        file
    }

    #[test]
    fn test_validate_accepts_open_maze() {
        let file = maze_file("#####\n#   #\n#   #\n#####\n");
        assert!(execute(file.path().to_path_buf()).is_ok());
    }

    #[test]
    fn test_validate_reports_setup_errors() {
        let blocked_exit = maze_file("####\n#  #\n# ##\n####\n");
        let err = execute(blocked_exit.path().to_path_buf()).unwrap_err();
        assert!(err.to_string().contains("exit cell (2, 2) is a wall"));

        let tiny = maze_file("  \n  \n");
        let err = execute(tiny.path().to_path_buf()).unwrap_err();
        assert!(err.to_string().contains("need at least 3x3"));
    }

    #[test]
    fn test_validate_rejects_unreachable_exit() {
        let file = maze_file("#####\n# # #\n#####\n");
        let err = execute(file.path().to_path_buf()).unwrap_err();
        assert!(err.to_string().contains("cannot be reached"));
    }
}

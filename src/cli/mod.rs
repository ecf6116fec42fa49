//! CLI command implementations for mazerun.

pub(crate) mod play;
pub(crate) mod solve;
pub(crate) mod validate;

mod output;

use clap::ValueEnum;
use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use mazerun::{MazeError, Position};
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::path::Path;

/// Output format for the `solve` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Maze with the route drawn in.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<MazeError> for CliError {
    fn from(e: MazeError) -> Self {
        Self::new(e.to_string())
    }
}

/// Initialize the global logger.
///
/// `RUST_LOG` wins when set. Otherwise `verbose` selects debug over warn.
/// With `log_file` all records go to that file. Without one, `quiet`
/// leaves logging off for commands that own the terminal.
pub(crate) fn init_logging(
    verbose: bool,
    log_file: Option<&Path>,
    quiet: bool,
) -> Result<(), CliError> {
    if log_file.is_none() && quiet {
        return Ok(());
    }

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);

    if let Some(path) = log_file {
        let file = File::create(path).map_err(|e| {
            CliError::new(format!("Failed to create log file {}: {e}", path.display()))
        })?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    // `try_init` only fails if a logger was already set.
    let _ = builder.try_init();
    Ok(())
}

/// Parse a position written as `X,Y`.
pub(crate) fn parse_position(s: &str) -> Result<Position, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{s}'"))?;
    let x = x
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("bad X in '{s}': {e}"))?;
    let y = y
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("bad Y in '{s}': {e}"))?;
    Ok(Position::new(x, y))
}

/// Seed from the clock, for runs that did not ask for one.
pub(crate) fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}

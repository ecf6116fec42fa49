//! Mazerun CLI - play, solve and check maze files in the terminal.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use mazerun::game::{Position, Status, DEFAULT_ENEMIES, DEFAULT_TICK_MS};
use std::path::PathBuf;
use std::process::ExitCode;

/// Mazerun - reach the exit before the enemies wear you down
#[derive(Parser, Debug)]
#[command(name = "mazerun")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a maze in the terminal
    Play {
        /// Maze file ('#' is wall, anything else is floor)
        #[arg(default_value = "maze.txt")]
        maze: PathBuf,

        /// Random seed for enemies (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of enemies
        #[arg(short, long, default_value_t = DEFAULT_ENEMIES)]
        enemies: usize,

        /// Tick delay in milliseconds
        #[arg(long, default_value_t = DEFAULT_TICK_MS)]
        speed: u64,
    },

    /// Print the shortest route through a maze
    Solve {
        /// Maze file
        #[arg(required = true)]
        maze: PathBuf,

        /// Start cell as X,Y (default: 1,1)
        #[arg(long, value_parser = cli::parse_position)]
        from: Option<Position>,

        /// End cell as X,Y (default: the exit)
        #[arg(long, value_parser = cli::parse_position)]
        to: Option<Position>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Check that a maze file is playable
    Validate {
        /// Maze file
        #[arg(required = true)]
        maze: PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let quiet = matches!(args.command, Commands::Play { .. });
    if let Err(e) = cli::init_logging(args.verbose, args.log_file.as_deref(), quiet) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    let result = match args.command {
        Commands::Play {
            maze,
            seed,
            enemies,
            speed,
        } => cli::play::execute(maze, seed, enemies, speed).map(|status| match status {
            Status::Won => println!("You win! Congratulations!"),
            Status::Lost => println!("Game over! You died."),
            Status::Running | Status::Quit => {}
        }),

        Commands::Solve {
            maze,
            from,
            to,
            format,
        } => cli::solve::execute(maze, from, to, format),

        Commands::Validate { maze } => cli::validate::execute(maze),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

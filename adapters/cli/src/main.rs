#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Gridlock levels in the terminal.

mod files;
mod render;
mod script;
mod session;

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gridlock_core::{Coord, Direction, LevelData};
use gridlock_system_editor::Editor;
use gridlock_world::{GameRun, Rules};
use tracing_subscriber::EnvFilter;

use crate::session::Session;

/// Turn-based grid puzzles with stealthy enemies.
#[derive(Debug, Parser)]
#[command(name = "gridlock", version, about, long_about = None)]
struct Cli {
    /// Log filter directives, overriding `RUST_LOG` (for example `gridlock_world=debug`).
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Validate a level and report its configuration errors.
    Check {
        /// Path to a JSON level file.
        level: PathBuf,
    },
    /// Play a level from a move script or from standard input.
    Play {
        /// Path to a JSON level file.
        level: PathBuf,
        /// Moves to replay: `R D L U` step, `n` or `tab` selects the next hero.
        #[arg(long)]
        moves: Option<String>,
        /// Path to a TOML rules file.
        #[arg(long)]
        rules: Option<PathBuf>,
        /// Print only the final state.
        #[arg(long)]
        quiet: bool,
    },
    /// Draw a level without playing it.
    Render {
        /// Path to a JSON level file.
        level: PathBuf,
    },
    /// Print an empty walled level to start editing from.
    New {
        /// Number of columns.
        columns: u32,
        /// Number of rows.
        rows: u32,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.log.as_deref())?;

    match cli.command {
        CliCommand::Check { level } => check(&level),
        CliCommand::Play {
            level,
            moves,
            rules,
            quiet,
        } => play(&level, moves.as_deref(), rules.as_deref(), quiet),
        CliCommand::Render { level } => {
            let run = GameRun::new(&files::load_level(&level)?);
            print!("{}", render::render(&run));
            Ok(ExitCode::SUCCESS)
        }
        CliCommand::New { columns, rows } => {
            let level = walled_level(columns, rows);
            let json = serde_json::to_string_pretty(&level).context("failed to encode level")?;
            println!("{json}");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_tracing(directives: Option<&str>) -> Result<()> {
    let filter = match directives {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid log filter `{directives}`"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn check(level: &Path) -> Result<ExitCode> {
    let run = GameRun::new(&files::load_level(level)?);
    let messages = run.error_messages();
    if messages.is_empty() {
        println!("{}", run.game_state());
        return Ok(ExitCode::SUCCESS);
    }
    for message in messages {
        println!("{message}");
    }
    Ok(ExitCode::FAILURE)
}

fn play(level: &Path, moves: Option<&str>, rules: Option<&Path>, quiet: bool) -> Result<ExitCode> {
    let rules = match rules {
        Some(path) => files::load_rules(path)?,
        None => Rules::default(),
    };
    let run = GameRun::with_rules(&files::load_level(level)?, rules);
    if !run.errors().is_empty() {
        for message in run.error_messages() {
            eprintln!("{message}");
        }
        return Ok(ExitCode::FAILURE);
    }

    let mut session = Session::new(run, quiet);
    let mut stdout = io::stdout().lock();
    match moves {
        Some(script) => {
            let inputs = script::parse_script(script)?;
            session.print_frame(&mut stdout)?;
            session.play(&inputs, &mut stdout)?;
        }
        None => session.play_interactive(io::stdin().lock(), &mut stdout)?,
    }
    writeln!(stdout, "{}", session.game_state())?;
    Ok(ExitCode::SUCCESS)
}

/// Blank level whose outer border is walled off.
fn walled_level(columns: u32, rows: u32) -> LevelData {
    let mut editor = Editor::blank(columns, rows);
    let last_column = i32::try_from(columns).unwrap_or(i32::MAX) - 1;
    let last_row = i32::try_from(rows).unwrap_or(i32::MAX) - 1;
    for x in 0..=last_column {
        editor.toggle_wall(Coord::new(x, 0), Direction::Down);
        editor.toggle_wall(Coord::new(x, last_row), Direction::Up);
    }
    for y in 0..=last_row {
        editor.toggle_wall(Coord::new(0, y), Direction::Left);
        editor.toggle_wall(Coord::new(last_column, y), Direction::Right);
    }
    editor.into_level()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn play_arguments_parse() {
        let cli = Cli::try_parse_from([
            "gridlock", "play", "level.json", "--moves", "RRU", "--quiet", "--log", "debug",
        ])
        .expect("valid arguments");

        assert_eq!(cli.log.as_deref(), Some("debug"));
        match cli.command {
            CliCommand::Play {
                level,
                moves,
                rules,
                quiet,
            } => {
                assert_eq!(level, PathBuf::from("level.json"));
                assert_eq!(moves.as_deref(), Some("RRU"));
                assert!(rules.is_none());
                assert!(quiet);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn walled_level_seals_the_border() {
        let level = walled_level(2, 2);
        let corner = level.tile(Coord::new(0, 0)).copied().expect("corner");

        assert!(corner.wall(Direction::Left).exists);
        assert!(corner.wall(Direction::Down).exists);
        assert!(!corner.wall(Direction::Right).exists);
        assert!(!corner.wall(Direction::Up).exists);

        let opposite = level.tile(Coord::new(1, 1)).copied().expect("corner");
        assert!(opposite.wall(Direction::Right).exists);
        assert!(opposite.wall(Direction::Up).exists);
    }

    #[test]
    fn walled_single_row_has_both_horizontal_edges() {
        let level = walled_level(1, 1);
        let tile = level.tile(Coord::new(0, 0)).copied().expect("tile");

        assert!(Direction::ALL
            .iter()
            .all(|direction| tile.wall(*direction).exists));
    }
}

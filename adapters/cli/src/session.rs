//! Turn loop driving a run from scripted or typed input.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use gridlock_core::{Command, Event, GameState};
use gridlock_system_control::{Control, ControlInput};
use gridlock_world::{apply, query, GameRun};

use crate::{render::render, script::parse_script};

/// Owns a run together with the control system feeding it.
pub(crate) struct Session {
    run: GameRun,
    control: Control,
    events: Vec<Event>,
    commands: Vec<Command>,
    quiet: bool,
}

impl Session {
    pub(crate) fn new(run: GameRun, quiet: bool) -> Self {
        Self {
            run,
            control: Control::new(),
            events: Vec::new(),
            commands: Vec::new(),
            quiet,
        }
    }

    pub(crate) fn game_state(&self) -> GameState {
        self.run.game_state()
    }

    /// Feeds inputs one by one, stopping early once the run is over.
    pub(crate) fn play(&mut self, inputs: &[ControlInput], out: &mut impl Write) -> Result<()> {
        for input in inputs {
            if self.game_state().is_terminal() {
                break;
            }
            self.step(*input, out)?;
        }
        Ok(())
    }

    /// Reads scripts line by line until the input ends or the run is over.
    pub(crate) fn play_interactive(
        &mut self,
        input: impl BufRead,
        out: &mut impl Write,
    ) -> Result<()> {
        self.print_frame(out)?;
        for line in input.lines() {
            let line = line.context("failed to read moves from input")?;
            match parse_script(&line) {
                Ok(inputs) => self.play(&inputs, out)?,
                Err(error) => writeln!(out, "{error}")?,
            }
            if self.game_state().is_terminal() {
                break;
            }
        }
        Ok(())
    }

    fn step(&mut self, input: ControlInput, out: &mut impl Write) -> Result<()> {
        let events = std::mem::take(&mut self.events);
        self.control.handle(
            &events,
            input,
            query::player_count(&self.run),
            &mut self.commands,
        );

        if self.commands.is_empty() {
            if input.cycle_player && !self.quiet {
                writeln!(out, "selected hero {}", self.control.selected())?;
            }
            return Ok(());
        }

        for command in self.commands.drain(..) {
            apply(&mut self.run, command, &mut self.events);
        }
        for event in &self.events {
            tracing::debug!(?event, "event");
        }
        for enemy in query::enemies(&self.run) {
            tracing::trace!(coord = %enemy.coord(), pursuit = ?enemy.pursuit(), "enemy");
        }
        self.print_frame(out)
    }

    pub(crate) fn print_frame(&self, out: &mut impl Write) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        write!(out, "{}", render(&self.run))?;
        writeln!(
            out,
            "{} players={} selected={}",
            self.run.game_state(),
            query::player_count(&self.run),
            self.control.selected()
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use gridlock_core::{
        Coord, Direction, DoorColor, DoorKind, LevelData, OccupierKind, TileState, WallState,
    };

    use super::*;

    fn escape_level() -> LevelData {
        LevelData::new(3, 1)
            .with_tile(
                Coord::new(0, 0),
                TileState::default().with_occupier(OccupierKind::Hero),
            )
            .with_tile(
                Coord::new(2, 0),
                TileState::default()
                    .with_occupier(OccupierKind::Hero)
                    .with_wall(
                        Direction::Right,
                        WallState::with_door(DoorKind::Exit, DoorColor::Red),
                    ),
            )
    }

    #[test]
    fn script_plays_until_won() {
        let mut session = Session::new(GameRun::new(&escape_level()), true);
        let inputs = parse_script("n R L R R R").expect("valid script");
        let mut out = Vec::new();

        session.play(&inputs, &mut out).expect("play");

        assert_eq!(session.game_state(), GameState::Won);
        assert!(out.is_empty(), "quiet sessions print nothing");
    }

    #[test]
    fn frames_follow_each_turn() {
        let mut session = Session::new(GameRun::new(&escape_level()), false);
        let inputs = parse_script("R").expect("valid script");
        let mut out = Vec::new();

        session.play(&inputs, &mut out).expect("play");

        let printed = String::from_utf8(out).expect("utf8");
        assert!(printed.contains(" . @ @X"), "{printed}");
        assert!(printed.ends_with("PLAYING players=2 selected=0\n"), "{printed}");
    }

    #[test]
    fn interactive_input_reports_bad_lines_and_continues() {
        let mut session = Session::new(GameRun::new(&escape_level()), false);
        let mut out = Vec::new();

        session
            .play_interactive("q\nn\nR\nRRR\n".as_bytes(), &mut out)
            .expect("play");

        let printed = String::from_utf8(out).expect("utf8");
        assert!(printed.contains("unknown move `q` in script"));
        assert!(printed.contains("selected hero 1"));
        assert!(printed.contains("WON players=0"));
        assert_eq!(session.game_state(), GameState::Won);
    }
}

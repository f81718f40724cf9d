#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure input system that turns player intent into move commands.

use gridlock_core::{Command, Direction, Event, GameState};

/// Input snapshot distilled from adapter-provided key presses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlInput {
    /// Direction requested this turn, if any.
    pub direction: Option<Direction>,
    /// Indicates whether the player asked to select the next hero.
    pub cycle_player: bool,
}

impl ControlInput {
    /// Creates a new input descriptor with explicit field values.
    #[must_use]
    pub const fn new(direction: Option<Direction>, cycle_player: bool) -> Self {
        Self {
            direction,
            cycle_player,
        }
    }
}

/// Tracks the selected hero and emits moves on its behalf.
#[derive(Debug, Clone)]
pub struct Control {
    selected: usize,
    active: bool,
}

impl Default for Control {
    fn default() -> Self {
        Self::new()
    }
}

impl Control {
    /// Creates a control system selecting the first hero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            selected: 0,
            active: true,
        }
    }

    /// Index of the currently selected hero.
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Reports whether the system still emits commands.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Consumes world events and input to emit at most one move command.
    ///
    /// `player_count` should mirror the world's `query::player_count` after
    /// `events` were produced. The selection keeps its index when a hero
    /// leaves and wraps to the front when it falls off the end.
    pub fn handle(
        &mut self,
        events: &[Event],
        input: ControlInput,
        player_count: usize,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            match event {
                Event::GameStateChanged { state } => self.active = *state == GameState::Playing,
                Event::PlayerEscaped { .. } => self.wrap(player_count),
                _ => {}
            }
        }

        if !self.active || player_count == 0 {
            return;
        }
        self.wrap(player_count);

        if input.cycle_player {
            self.selected = (self.selected + 1) % player_count;
        }

        if let Some(direction) = input.direction {
            out.push(Command::MakeMove {
                player: self.selected,
                direction,
            });
        }
    }

    fn wrap(&mut self, player_count: usize) {
        self.selected = self.selected.checked_rem(player_count).unwrap_or(0);
    }
}

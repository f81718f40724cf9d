//! Button registration and press bookkeeping.

use std::collections::BTreeMap;

use gridlock_core::{Coord, DoorColor};

/// Registered and pressed button counts per colour.
///
/// `pressed(color) <= registered(color)` holds at all times. Door predicates
/// are derived from these counts on every query.
#[derive(Clone, Debug, Default)]
pub struct ButtonsState {
    total: BTreeMap<DoorColor, u32>,
    pressed: BTreeMap<DoorColor, u32>,
}

impl ButtonsState {
    /// Creates a state with no registered buttons.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one more button of the provided colour.
    pub fn register_button(&mut self, color: DoorColor) {
        *self.total.entry(color).or_insert(0) += 1;
    }

    /// Records an occupant stepping onto a button.
    ///
    /// # Panics
    ///
    /// Panics when no button of `color` was registered or when every
    /// registered button of `color` is already pressed.
    pub fn button_pressed(&mut self, color: DoorColor, coord: Coord) {
        let total = self.registered(color);
        assert!(
            total > 0,
            "button {color} at {coord} pressed but never registered"
        );
        let pressed = self.pressed.entry(color).or_insert(0);
        assert!(
            *pressed < total,
            "button {color} at {coord} pressed while all {total} are down"
        );
        *pressed += 1;
        self.trace_change("button pressed", color, coord);
    }

    /// Records an occupant stepping off a button.
    ///
    /// # Panics
    ///
    /// Panics when no button of `color` is currently pressed.
    pub fn button_released(&mut self, color: DoorColor, coord: Coord) {
        match self.pressed.get_mut(&color) {
            Some(pressed) if *pressed > 0 => *pressed -= 1,
            _ => panic!("button {color} at {coord} released while none are pressed"),
        }
        self.trace_change("button released", color, coord);
    }

    /// At least one button of the colour is pressed.
    #[must_use]
    pub fn is_any_button_pressed(&self, color: DoorColor) -> bool {
        self.pressed(color) > 0
    }

    /// Every registered button of the colour is pressed.
    ///
    /// A colour without registered buttons is never "all pressed".
    #[must_use]
    pub fn are_all_buttons_pressed(&self, color: DoorColor) -> bool {
        let pressed = self.pressed(color);
        pressed > 0 && pressed == self.registered(color)
    }

    /// Every registered colour has at least one pressed button.
    ///
    /// Vacuously true when nothing is registered.
    #[must_use]
    pub fn are_all_colors_pressed(&self) -> bool {
        self.total
            .keys()
            .all(|color| self.is_any_button_pressed(*color))
    }

    /// Number of buttons registered for the colour.
    #[must_use]
    pub fn registered(&self, color: DoorColor) -> u32 {
        self.total.get(&color).copied().unwrap_or(0)
    }

    /// Number of buttons of the colour currently held down.
    #[must_use]
    pub fn pressed(&self, color: DoorColor) -> u32 {
        self.pressed.get(&color).copied().unwrap_or(0)
    }

    fn trace_change(&self, message: &'static str, color: DoorColor, coord: Coord) {
        tracing::debug!(
            %coord,
            %color,
            pressed = self.pressed(color),
            total = self.registered(color),
            any = self.is_any_button_pressed(color),
            all = self.are_all_buttons_pressed(color),
            rainbow = self.are_all_colors_pressed(),
            "{message}"
        );
    }
}

//! Portal pairing by colour.

use std::collections::BTreeMap;

use gridlock_core::{Coord, DoorColor};

use crate::ConfigurationError;

/// Registered portal ends, grouped by colour in registration order.
#[derive(Clone, Debug, Default)]
pub struct PortalsState {
    portals: BTreeMap<DoorColor, Vec<Coord>>,
}

impl PortalsState {
    /// Creates a state without portals.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one end of a portal.
    pub fn register_portal(&mut self, color: DoorColor, coord: Coord) {
        self.portals.entry(color).or_default().push(coord);
    }

    /// Confirms that every registered colour has exactly two ends.
    ///
    /// Reports the first offending colour in palette order.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (color, coords) in &self.portals {
            if coords.len() != 2 {
                return Err(ConfigurationError::InvalidPortalCount {
                    color: *color,
                    count: coords.len(),
                });
            }
        }
        Ok(())
    }

    /// End of the pair opposite to `coord`.
    ///
    /// Returns `None` when the colour is unknown, when the pair is incomplete,
    /// or when `coord` is not one of its ends.
    #[must_use]
    pub fn other_portal_coords(&self, color: DoorColor, coord: Coord) -> Option<Coord> {
        match self.portals.get(&color)?.as_slice() {
            [first, second] if *first == coord => Some(*second),
            [first, second] if *second == coord => Some(*first),
            _ => None,
        }
    }
}

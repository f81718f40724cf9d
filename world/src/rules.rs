//! Tunable movement rules.

use gridlock_core::Direction;
use serde::{Deserialize, Serialize};

use crate::Tile;

/// Rule switches that adjust how moves resolve.
///
/// The defaults reproduce the classic behaviour. Adapters may load overrides
/// from a configuration file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// An exit only counts while a wall exists on its edge.
    pub exit_requires_wall: bool,
    /// A hero that pushes a stone also steps into the vacated tile.
    pub push_advances_player: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            exit_requires_wall: true,
            push_advances_player: false,
        }
    }
}

impl Rules {
    /// Reports whether leaving `tile` towards `direction` escapes the level.
    #[must_use]
    pub fn tile_has_exit(&self, tile: &Tile, direction: Direction) -> bool {
        tile.has_exit(direction) && (!self.exit_requires_wall || tile.wall(direction).exists)
    }
}

//! Level configuration problems detected while building a run.

use gridlock_core::{Coord, DoorColor};

/// Reasons a level cannot be played.
///
/// Every problem found during construction is collected; the run then stays
/// in the error state and ignores moves.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// The level contains no hero.
    #[error("NO PLAYER ON THE LEVEL")]
    NoPlayer,
    /// A portal colour does not have exactly two ends.
    #[error("PORTAL COUNT INVALID: {count} IS NOT 2 for color {color}")]
    InvalidPortalCount {
        /// Colour of the offending portals.
        color: DoorColor,
        /// Number of portals registered for the colour.
        count: usize,
    },
    /// The descriptor declares tiles it does not provide.
    ///
    /// Only the first gap is reported.
    #[error("TILE MISSING at {coord}")]
    MissingTile {
        /// First coordinate without a descriptor.
        coord: Coord,
    },
    /// A tile carries a portal colour without a portal floor.
    #[error("PORTAL FLOOR MISSING at {coord}")]
    PortalFloorMismatch {
        /// Tile holding the stray portal colour.
        coord: Coord,
    },
}

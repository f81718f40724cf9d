#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure level-editing system operating on level descriptors.
//!
//! Wall edits are mirrored onto the neighbouring tile's opposite edge so that
//! both sides of an edge always agree. Exits are the exception: they belong to
//! the single tile a hero leaves from. Coordinates outside the level are
//! ignored by every operation.

use gridlock_core::{
    Coord, Direction, DoorColor, DoorKind, FloorKind, LevelData, OccupierKind, TileState,
    WallState,
};

/// Editing session over a single level descriptor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Editor {
    level: LevelData,
}

impl Editor {
    /// Starts editing the provided level.
    #[must_use]
    pub const fn new(level: LevelData) -> Self {
        Self { level }
    }

    /// Starts editing an empty level of the provided size.
    #[must_use]
    pub fn blank(columns: u32, rows: u32) -> Self {
        Self::new(LevelData::new(columns, rows))
    }

    /// Level in its current edited form.
    #[must_use]
    pub const fn level(&self) -> &LevelData {
        &self.level
    }

    /// Finishes the session, yielding the edited level.
    #[must_use]
    pub fn into_level(self) -> LevelData {
        self.level
    }

    /// Adds or removes the wall on an edge, on both of its sides.
    ///
    /// Door settings survive the toggle so a re-added wall keeps its door.
    pub fn toggle_wall(&mut self, coord: Coord, direction: Direction) {
        self.edit_edge(coord, direction, |wall| wall.exists = !wall.exists);
    }

    /// Marks an existing wall as an exit, or turns an exit back into a plain wall.
    ///
    /// Only the edited side changes.
    pub fn toggle_exit(&mut self, coord: Coord, direction: Direction) {
        if let Some(wall) = self.existing_wall(coord, direction) {
            wall.door = match wall.door {
                DoorKind::Exit => DoorKind::Plain,
                _ => DoorKind::Exit,
            };
        }
    }

    /// Places a door of the provided colour on an existing wall.
    ///
    /// Toggling a door of the same colour again clears it.
    pub fn toggle_door(&mut self, coord: Coord, direction: Direction, color: DoorColor) {
        self.toggle_keyed(coord, direction, DoorKind::Door, color);
    }

    /// Places a single-colour gate on an existing wall.
    ///
    /// Toggling a gate of the same colour again clears it.
    pub fn toggle_gate(&mut self, coord: Coord, direction: Direction, color: DoorColor) {
        self.toggle_keyed(coord, direction, DoorKind::GateSingle, color);
    }

    /// Places or clears a rainbow gate on an existing wall.
    pub fn toggle_rainbow_gate(&mut self, coord: Coord, direction: Direction) {
        self.edit_edge(coord, direction, |wall| {
            if wall.exists {
                wall.door = match wall.door {
                    DoorKind::GateRainbow => DoorKind::Plain,
                    _ => DoorKind::GateRainbow,
                };
            }
        });
    }

    /// Places a button of the colour, or removes a button of the same colour.
    pub fn toggle_button(&mut self, coord: Coord, color: DoorColor) {
        if let Some(tile) = self.level.tile_mut(coord) {
            tile.button = toggled(tile.button, color);
        }
    }

    /// Places a portal of the colour, or removes a portal of the same colour.
    ///
    /// The floor follows the portal so the two never disagree.
    pub fn toggle_portal(&mut self, coord: Coord, color: DoorColor) {
        if let Some(tile) = self.level.tile_mut(coord) {
            tile.portal = toggled(tile.portal, color);
            tile.floor = match tile.portal {
                Some(_) => FloorKind::Portal,
                None => FloorKind::Empty,
            };
        }
    }

    /// Floods or drains the tile. Flooding removes any portal.
    pub fn toggle_water(&mut self, coord: Coord) {
        if let Some(tile) = self.level.tile_mut(coord) {
            if tile.floor == FloorKind::Water {
                tile.floor = FloorKind::Empty;
            } else {
                tile.floor = FloorKind::Water;
                tile.portal = None;
            }
        }
    }

    /// Replaces the occupant of the tile.
    pub fn set_occupier(&mut self, coord: Coord, occupier: OccupierKind) {
        if let Some(tile) = self.level.tile_mut(coord) {
            tile.occupier = occupier;
        }
    }

    /// Removes the occupant of the tile if it is of the provided kind.
    pub fn clear_occupier(&mut self, coord: Coord, occupier: OccupierKind) {
        if let Some(tile) = self.level.tile_mut(coord) {
            if tile.occupier == occupier {
                tile.occupier = OccupierKind::Empty;
            }
        }
    }

    /// Steps the occupant through empty, enemy and hero.
    ///
    /// A stone counts as empty and becomes an enemy.
    pub fn cycle_occupier(&mut self, coord: Coord) {
        if let Some(tile) = self.level.tile_mut(coord) {
            tile.occupier = match tile.occupier {
                OccupierKind::Empty | OccupierKind::Stone => OccupierKind::Enemy,
                OccupierKind::Enemy => OccupierKind::Hero,
                OccupierKind::Hero => OccupierKind::Empty,
            };
        }
    }

    /// Replaces a whole tile descriptor.
    pub fn set_tile(&mut self, coord: Coord, tile: TileState) {
        if let Some(slot) = self.level.tile_mut(coord) {
            *slot = tile;
        }
    }

    fn toggle_keyed(&mut self, coord: Coord, direction: Direction, door: DoorKind, color: DoorColor) {
        self.edit_edge(coord, direction, |wall| {
            if !wall.exists {
                return;
            }
            if wall.door == door && wall.color == color {
                wall.door = DoorKind::Plain;
            } else {
                wall.door = door;
                wall.color = color;
            }
        });
    }

    /// Applies `edit` to the edge on this tile and to its mirror on the neighbour.
    fn edit_edge<F>(&mut self, coord: Coord, direction: Direction, mut edit: F)
    where
        F: FnMut(&mut WallState),
    {
        if !self.level.contains(coord) {
            return;
        }
        if let Some(tile) = self.level.tile_mut(coord) {
            edit(tile.wall_mut(direction));
        }
        if let Some(tile) = self.level.tile_mut(coord.offset(direction)) {
            edit(tile.wall_mut(direction.opposite()));
        }
    }

    fn existing_wall(&mut self, coord: Coord, direction: Direction) -> Option<&mut WallState> {
        let wall = self.level.tile_mut(coord)?.wall_mut(direction);
        wall.exists.then_some(wall)
    }
}

fn toggled(current: Option<DoorColor>, color: DoorColor) -> Option<DoorColor> {
    if current == Some(color) {
        None
    } else {
        Some(color)
    }
}

//! Per-tile move legality, door evaluation, and occupant transfers.

use gridlock_core::{
    Coord, Direction, DoorColor, DoorKind, Event, FloorKind, OccupierKind, TileState, WallState,
};

use crate::{ButtonsState, PortalsState};

/// Reports whether an existing wall carrying the provided door lets occupants through.
///
/// Door state is never cached; it is derived from the button counts each time.
#[must_use]
pub fn door_is_open(door: DoorKind, color: DoorColor, buttons: &ButtonsState) -> bool {
    match door {
        DoorKind::Plain => false,
        DoorKind::Exit => true,
        DoorKind::Door => buttons.is_any_button_pressed(color),
        DoorKind::GateSingle => buttons.are_all_buttons_pressed(color),
        DoorKind::GateRainbow => buttons.are_all_colors_pressed(),
    }
}

/// Live tile owned by a running level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    coord: Coord,
    state: TileState,
}

impl Tile {
    /// Wraps a descriptor placed at the provided coordinate.
    #[must_use]
    pub const fn new(coord: Coord, state: TileState) -> Self {
        Self { coord, state }
    }

    /// Location of the tile.
    #[must_use]
    pub const fn coord(&self) -> Coord {
        self.coord
    }

    /// Current descriptor of the tile.
    #[must_use]
    pub const fn state(&self) -> &TileState {
        &self.state
    }

    /// Entity standing on the tile.
    #[must_use]
    pub const fn occupier(&self) -> OccupierKind {
        self.state.occupier
    }

    /// Terrain of the tile.
    #[must_use]
    pub const fn floor(&self) -> FloorKind {
        self.state.floor
    }

    /// Colour of the button on the tile, if any.
    #[must_use]
    pub const fn button(&self) -> Option<DoorColor> {
        self.state.button
    }

    /// Colour of the portal on the tile, if any.
    #[must_use]
    pub const fn portal(&self) -> Option<DoorColor> {
        self.state.portal
    }

    /// Wall on the provided edge.
    #[must_use]
    pub const fn wall(&self, direction: Direction) -> WallState {
        self.state.wall(direction)
    }

    /// Reports whether the edge towards `direction` can be crossed right now.
    #[must_use]
    pub fn allows_move(&self, direction: Direction, buttons: &ButtonsState) -> bool {
        let wall = self.wall(direction);
        !wall.exists || door_is_open(wall.door, wall.color, buttons)
    }

    /// Reports whether the edge towards `direction` is marked as an exit.
    ///
    /// Wall presence is not considered here; see `Rules::tile_has_exit`.
    #[must_use]
    pub const fn has_exit(&self, direction: Direction) -> bool {
        matches!(self.wall(direction).door, DoorKind::Exit)
    }

    /// Partner of this tile's portal, if it has one with a complete pair.
    #[must_use]
    pub fn other_portal_coord(&self, portals: &PortalsState) -> Option<Coord> {
        let color = self.portal()?;
        portals.other_portal_coords(color, self.coord)
    }

    /// Relocates this tile's occupant onto `target`, keeping button counts in step.
    ///
    /// # Panics
    ///
    /// Panics when `target` is not empty.
    pub(crate) fn move_occupier_to(
        &mut self,
        target: &mut Tile,
        buttons: &mut ButtonsState,
        out_events: &mut Vec<Event>,
    ) {
        assert_eq!(
            target.occupier(),
            OccupierKind::Empty,
            "cannot move onto occupied tile {}",
            target.coord
        );

        let occupier = self.state.occupier;
        target.state.occupier = occupier;
        self.state.occupier = OccupierKind::Empty;
        out_events.push(Event::OccupierMoved {
            from: self.coord,
            to: target.coord,
            occupier,
        });

        self.release_button(buttons, out_events);
        target.press_button(buttons, out_events);
    }

    /// Removes a caught hero.
    ///
    /// # Panics
    ///
    /// Panics when the tile is not occupied by a hero.
    pub(crate) fn kill_player(&mut self, buttons: &mut ButtonsState, out_events: &mut Vec<Event>) {
        self.clear_hero();
        self.release_button(buttons, out_events);
    }

    /// Removes an escaping hero, announcing the removal in place.
    ///
    /// # Panics
    ///
    /// Panics when the tile is not occupied by a hero.
    pub(crate) fn free_player(&mut self, buttons: &mut ButtonsState, out_events: &mut Vec<Event>) {
        self.clear_hero();
        out_events.push(Event::OccupierMoved {
            from: self.coord,
            to: self.coord,
            occupier: OccupierKind::Hero,
        });
        self.release_button(buttons, out_events);
    }

    fn clear_hero(&mut self) {
        assert_eq!(
            self.occupier(),
            OccupierKind::Hero,
            "no hero to remove at {}",
            self.coord
        );
        self.state.occupier = OccupierKind::Empty;
    }

    fn release_button(&self, buttons: &mut ButtonsState, out_events: &mut Vec<Event>) {
        if let Some(color) = self.button() {
            buttons.button_released(color, self.coord);
            out_events.push(Event::ButtonReleased {
                color,
                coord: self.coord,
            });
        }
    }

    fn press_button(&self, buttons: &mut ButtonsState, out_events: &mut Vec<Event>) {
        if let Some(color) = self.button() {
            buttons.button_pressed(color, self.coord);
            out_events.push(Event::ButtonPressed {
                color,
                coord: self.coord,
            });
        }
    }
}

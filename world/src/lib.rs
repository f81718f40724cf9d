#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative simulation of a single Gridlock playthrough.
//!
//! A [`GameRun`] is built once from a [`LevelData`] descriptor and then
//! mutated exclusively through [`apply`]. Each command resolves as one
//! synchronous turn: the player's step settles first, then every enemy takes
//! its turn in discovery order. Everything observable is appended to the
//! caller's event buffer; read access goes through the [`query`] module.

mod buttons;
mod error;
mod grid;
mod portals;
mod pursuit;
mod rules;
mod tile;

pub use buttons::ButtonsState;
pub use error::ConfigurationError;
pub use grid::Grid;
pub use portals::PortalsState;
pub use pursuit::{EnemyState, EnemyTurn, Pursuit};
pub use rules::Rules;
pub use tile::{door_is_open, Tile};

use gridlock_core::{
    Command, Coord, Direction, Event, FloorKind, GameState, LevelData, OccupierKind,
};

/// Tiles plus the button and portal bookkeeping they share.
#[derive(Clone, Debug, Default)]
struct Board {
    grid: Grid<Tile>,
    buttons: ButtonsState,
    portals: PortalsState,
}

impl Board {
    /// Builds live tiles from a descriptor, registering buttons and portals.
    fn from_level(level: &LevelData, errors: &mut Vec<ConfigurationError>) -> Self {
        let mut board = Self::default();
        if let Some(coord) = level.first_missing() {
            errors.push(ConfigurationError::MissingTile { coord });
        }
        for (coord, state) in level.tiles() {
            board.grid.set_tile(coord, Tile::new(coord, *state));
        }

        for tile in board.grid.iter() {
            let state = tile.state();
            if let Some(color) = state.button {
                board.buttons.register_button(color);
                if state.occupier != OccupierKind::Empty {
                    board.buttons.button_pressed(color, tile.coord());
                }
            }
            if let Some(color) = state.portal {
                if state.floor != FloorKind::Portal {
                    errors.push(ConfigurationError::PortalFloorMismatch {
                        coord: tile.coord(),
                    });
                }
                board.portals.register_portal(color, tile.coord());
            }
        }
        board
    }

    fn allows_move(&self, coord: Coord, direction: Direction) -> bool {
        self.grid
            .tile(coord)
            .is_some_and(|tile| tile.allows_move(direction, &self.buttons))
    }

    fn occupier(&self, coord: Coord) -> Option<OccupierKind> {
        self.grid.tile(coord).map(Tile::occupier)
    }

    /// Moves the occupant of `from` onto the empty tile `to`.
    fn transfer(&mut self, from: Coord, to: Coord, out_events: &mut Vec<Event>) {
        match self.grid.pair_mut(from, to) {
            Some((source, target)) => {
                source.move_occupier_to(target, &mut self.buttons, out_events);
            }
            None => tracing::warn!(%from, %to, "transfer between missing tiles ignored"),
        }
    }
}

/// One playthrough of a level.
#[derive(Clone, Debug)]
pub struct GameRun {
    board: Board,
    players: Vec<Coord>,
    enemies: Vec<EnemyState>,
    state: GameState,
    errors: Vec<ConfigurationError>,
    rules: Rules,
}

impl GameRun {
    /// Builds a run with the default rules.
    #[must_use]
    pub fn new(level: &LevelData) -> Self {
        Self::with_rules(level, Rules::default())
    }

    /// Builds a run from a level descriptor.
    ///
    /// Configuration problems do not abort construction; they are collected
    /// and leave the run in [`GameState::Error`].
    #[must_use]
    pub fn with_rules(level: &LevelData, rules: Rules) -> Self {
        let mut errors = Vec::new();
        let board = Board::from_level(level, &mut errors);

        let mut players = Vec::new();
        let mut enemies = Vec::new();
        for tile in board.grid.iter() {
            match tile.occupier() {
                OccupierKind::Hero => players.push(tile.coord()),
                OccupierKind::Enemy => enemies.push(EnemyState::new(tile.coord())),
                OccupierKind::Empty | OccupierKind::Stone => {}
            }
        }

        if players.is_empty() {
            errors.push(ConfigurationError::NoPlayer);
        }
        if let Err(error) = board.portals.validate() {
            errors.push(error);
        }

        let state = if errors.is_empty() {
            GameState::Playing
        } else {
            for error in &errors {
                tracing::warn!(%error, "level rejected");
            }
            GameState::Error
        };

        Self {
            board,
            players,
            enemies,
            state,
            errors,
            rules,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn game_state(&self) -> GameState {
        self.state
    }

    /// Configuration problems found during construction.
    #[must_use]
    pub fn errors(&self) -> &[ConfigurationError] {
        &self.errors
    }

    /// Human-readable configuration problems.
    #[must_use]
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Attempts a single step for the selected player, then lets enemies react.
    ///
    /// Illegal steps are silently ignored. Nothing happens once the run has
    /// left [`GameState::Playing`] or when no direction is provided.
    pub fn make_move(
        &mut self,
        player: usize,
        direction: Option<Direction>,
        out_events: &mut Vec<Event>,
    ) {
        if self.state != GameState::Playing {
            return;
        }
        let Some(direction) = direction else {
            return;
        };
        let Some(&origin) = self.players.get(player) else {
            tracing::warn!(
                player,
                players = self.players.len(),
                "move for unknown player ignored"
            );
            return;
        };
        let Some(origin_tile) = self.board.grid.tile(origin) else {
            return;
        };

        if self.rules.tile_has_exit(origin_tile, direction) {
            self.escape(player, origin, out_events);
            return;
        }

        let target = origin.offset(direction);
        let Some(target_tile) = self.board.grid.tile(target) else {
            return;
        };

        if target_tile.occupier() == OccupierKind::Stone {
            if !self.push_stone(origin, target, direction, out_events) {
                return;
            }
            if !self.rules.push_advances_player {
                self.move_enemies(out_events);
                return;
            }
        }

        if let Some(destination) = self.portal_destination(target) {
            self.teleport(player, origin, target, destination, direction, out_events);
            return;
        }

        if self.board.occupier(target) == Some(OccupierKind::Empty)
            && self.board.allows_move(origin, direction)
        {
            self.board.transfer(origin, target, out_events);
            self.players[player] = target;
            self.move_enemies(out_events);
        }
    }

    /// Ends the run as lost. Has no effect once the run is already over.
    pub fn player_lost(&mut self, out_events: &mut Vec<Event>) {
        if self.state.is_terminal() {
            return;
        }
        self.set_state(GameState::Lost, out_events);
    }

    fn escape(&mut self, player: usize, origin: Coord, out_events: &mut Vec<Event>) {
        if let Some(tile) = self.board.grid.tile_mut(origin) {
            tile.free_player(&mut self.board.buttons, out_events);
        }
        let _ = self.players.remove(player);
        out_events.push(Event::PlayerEscaped {
            player,
            coord: origin,
        });

        if self.players.is_empty() {
            self.set_state(GameState::Won, out_events);
        } else {
            self.move_enemies(out_events);
        }
    }

    fn push_stone(
        &mut self,
        origin: Coord,
        stone: Coord,
        direction: Direction,
        out_events: &mut Vec<Event>,
    ) -> bool {
        let beyond = stone.offset(direction);
        let pushable = self.board.occupier(beyond) == Some(OccupierKind::Empty)
            && self.board.allows_move(origin, direction)
            && self.board.allows_move(stone, direction);
        if pushable {
            self.board.transfer(stone, beyond, out_events);
        }
        pushable
    }

    /// Partner coordinate when `target` is a paired portal.
    fn portal_destination(&self, target: Coord) -> Option<Coord> {
        let tile = self.board.grid.tile(target)?;
        if tile.floor() != FloorKind::Portal {
            return None;
        }
        tile.other_portal_coord(&self.board.portals)
    }

    fn teleport(
        &mut self,
        player: usize,
        origin: Coord,
        entry: Coord,
        destination: Coord,
        direction: Direction,
        out_events: &mut Vec<Event>,
    ) {
        let reachable = self.board.occupier(entry) == Some(OccupierKind::Empty)
            && self.board.allows_move(origin, direction);
        let landing_free = self.board.occupier(destination) == Some(OccupierKind::Empty);
        if !reachable || !landing_free {
            return;
        }

        self.board.transfer(origin, destination, out_events);
        self.players[player] = destination;
        self.move_enemies(out_events);
    }

    fn move_enemies(&mut self, out_events: &mut Vec<Event>) {
        let mut caught = false;
        for enemy in &mut self.enemies {
            if let EnemyTurn::Caught(coord) = enemy.take_turn(&mut self.board, out_events) {
                self.players.retain(|player| *player != coord);
                caught = true;
            }
        }
        if caught {
            self.player_lost(out_events);
        }
    }

    fn set_state(&mut self, state: GameState, out_events: &mut Vec<Event>) {
        tracing::info!(from = %self.state, to = %state, "game state changed");
        self.state = state;
        out_events.push(Event::GameStateChanged { state });
    }
}

/// Applies the provided command to the run, resolving one full turn.
pub fn apply(run: &mut GameRun, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::MakeMove { player, direction } => {
            run.make_move(player, Some(direction), out_events);
        }
    }
}

/// Query functions that provide read-only access to a run.
pub mod query {
    use gridlock_core::{
        Coord, Direction, DoorColor, FloorKind, GameState, LevelData, OccupierKind, WallState,
    };

    use super::{ButtonsState, ConfigurationError, GameRun};

    /// Current lifecycle state of the run.
    #[must_use]
    pub fn game_state(run: &GameRun) -> GameState {
        run.state
    }

    /// Configuration problems collected at construction.
    #[must_use]
    pub fn errors(run: &GameRun) -> &[ConfigurationError] {
        &run.errors
    }

    /// Number of heroes still in play.
    #[must_use]
    pub fn player_count(run: &GameRun) -> usize {
        run.players.len()
    }

    /// Tile of the player at the provided selection index.
    #[must_use]
    pub fn player_coord(run: &GameRun, player: usize) -> Option<Coord> {
        run.players.get(player).copied()
    }

    /// Tiles of every live player in selection order.
    #[must_use]
    pub fn player_coords(run: &GameRun) -> &[Coord] {
        &run.players
    }

    /// Tiles of every enemy in turn order.
    #[must_use]
    pub fn enemy_coords(run: &GameRun) -> Vec<Coord> {
        run.enemies.iter().map(|enemy| enemy.coord()).collect()
    }

    /// Enemy agents in turn order, including their pursuit memory.
    #[must_use]
    pub fn enemies(run: &GameRun) -> &[super::EnemyState] {
        &run.enemies
    }

    /// Number of columns and rows of the live grid.
    #[must_use]
    pub fn grid_size(run: &GameRun) -> (usize, usize) {
        run.board.grid.size()
    }

    /// Occupant of the tile, or `None` outside the grid.
    #[must_use]
    pub fn occupier_at(run: &GameRun, coord: Coord) -> Option<OccupierKind> {
        run.board.occupier(coord)
    }

    /// Floor of the tile, or `None` outside the grid.
    #[must_use]
    pub fn floor_at(run: &GameRun, coord: Coord) -> Option<FloorKind> {
        run.board.grid.tile(coord).map(|tile| tile.floor())
    }

    /// Wall on one edge of the tile, or `None` outside the grid.
    #[must_use]
    pub fn wall_at(run: &GameRun, coord: Coord, direction: Direction) -> Option<WallState> {
        run.board
            .grid
            .tile(coord)
            .map(|tile| tile.wall(direction))
    }

    /// Colour of the button on the tile, if any.
    #[must_use]
    pub fn button_at(run: &GameRun, coord: Coord) -> Option<DoorColor> {
        run.board.grid.tile(coord)?.button()
    }

    /// Colour of the portal on the tile, if any.
    #[must_use]
    pub fn portal_at(run: &GameRun, coord: Coord) -> Option<DoorColor> {
        run.board.grid.tile(coord)?.portal()
    }

    /// Reports whether the edge can currently be crossed.
    ///
    /// Missing tiles never allow a move.
    #[must_use]
    pub fn door_is_open(run: &GameRun, coord: Coord, direction: Direction) -> bool {
        run.board.allows_move(coord, direction)
    }

    /// Button bookkeeping driving the doors.
    #[must_use]
    pub fn buttons(run: &GameRun) -> &ButtonsState {
        &run.board.buttons
    }

    /// Current tiles captured as a level descriptor.
    #[must_use]
    pub fn snapshot(run: &GameRun) -> LevelData {
        let (columns, rows) = run.board.grid.size();
        let mut level = LevelData::new(
            u32::try_from(columns).unwrap_or(u32::MAX),
            u32::try_from(rows).unwrap_or(u32::MAX),
        );
        for tile in run.board.grid.iter() {
            if let Some(slot) = level.tile_mut(tile.coord()) {
                *slot = *tile.state();
            }
        }
        level
    }
}

#[cfg(test)]
mod tests {
    use gridlock_core::TileState;

    use super::*;

    fn hero_level() -> LevelData {
        LevelData::new(3, 1).with_tile(
            Coord::new(1, 0),
            TileState::default().with_occupier(OccupierKind::Hero),
        )
    }

    #[test]
    fn apply_routes_make_move() {
        let mut run = GameRun::new(&hero_level());
        let mut events = Vec::new();

        apply(
            &mut run,
            Command::MakeMove {
                player: 0,
                direction: Direction::Right,
            },
            &mut events,
        );

        assert_eq!(query::player_coord(&run, 0), Some(Coord::new(2, 0)));
        assert_eq!(
            events,
            vec![Event::OccupierMoved {
                from: Coord::new(1, 0),
                to: Coord::new(2, 0),
                occupier: OccupierKind::Hero,
            }]
        );
    }

    #[test]
    fn missing_direction_is_ignored() {
        let mut run = GameRun::new(&hero_level());
        let mut events = Vec::new();

        run.make_move(0, None, &mut events);

        assert!(events.is_empty());
        assert_eq!(query::player_coord(&run, 0), Some(Coord::new(1, 0)));
    }

    #[test]
    fn player_lost_is_idempotent() {
        let mut run = GameRun::new(&hero_level());
        let mut events = Vec::new();

        run.player_lost(&mut events);
        run.player_lost(&mut events);

        assert_eq!(run.game_state(), GameState::Lost);
        assert_eq!(
            events,
            vec![Event::GameStateChanged {
                state: GameState::Lost
            }]
        );
    }

    #[test]
    fn snapshot_mirrors_live_tiles() {
        let mut run = GameRun::new(&hero_level());
        run.make_move(0, Some(Direction::Left), &mut Vec::new());

        let snapshot = query::snapshot(&run);
        assert_eq!(snapshot.columns(), 3);
        assert_eq!(snapshot.rows(), 1);
        assert_eq!(
            snapshot.tile(Coord::new(0, 0)).map(|tile| tile.occupier),
            Some(OccupierKind::Hero)
        );
        assert_eq!(
            snapshot.tile(Coord::new(1, 0)).map(|tile| tile.occupier),
            Some(OccupierKind::Empty)
        );
    }
}

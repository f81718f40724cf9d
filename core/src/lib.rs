#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Gridlock engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative game run, and pure systems. Adapters submit [`Command`]
//! values describing a player's intent, the world resolves each command as a
//! single synchronous turn via its `apply` entry point, and then appends
//! [`Event`] values that adapters drain to mirror the changes. Level
//! descriptors ([`LevelData`], [`TileState`], [`WallState`]) are plain data
//! and carry no game rules.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Commands that express all permissible mutations of a running level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Requests that a player attempt a single step in the given direction.
    MakeMove {
        /// Index of the player in selection order.
        player: usize,
        /// Direction of the attempted step.
        direction: Direction,
    },
}

/// Events appended by the world while resolving a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// An occupant was relocated between two tiles.
    ///
    /// `from == to` signals that the occupant was removed in place, which
    /// happens when a hero escapes through an exit.
    OccupierMoved {
        /// Tile the occupant left.
        from: Coord,
        /// Tile the occupant now stands on.
        to: Coord,
        /// Kind of occupant that moved.
        occupier: OccupierKind,
    },
    /// An occupant stepped onto a button tile.
    ButtonPressed {
        /// Colour of the pressed button.
        color: DoorColor,
        /// Location of the button.
        coord: Coord,
    },
    /// An occupant stepped off a button tile.
    ButtonReleased {
        /// Colour of the released button.
        color: DoorColor,
        /// Location of the button.
        coord: Coord,
    },
    /// A hero left the level through an exit.
    PlayerEscaped {
        /// Index the player held before leaving the player list.
        player: usize,
        /// Tile the player escaped from.
        coord: Coord,
    },
    /// An enemy reached a hero.
    PlayerCaught {
        /// Tile the hero was standing on.
        coord: Coord,
    },
    /// An enemy acquired a hero along one of its sightlines.
    EnemySpotted {
        /// Tile the enemy was standing on when it looked.
        enemy: Coord,
        /// Tile the hero was standing on.
        hero: Coord,
        /// Number of steps separating the two.
        distance: u32,
    },
    /// The run entered a new state.
    GameStateChanged {
        /// State that became active.
        state: GameState,
    },
}

/// Lifecycle state of a single playthrough.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Moves are accepted.
    #[default]
    Playing,
    /// The level is malformed and cannot be played.
    Error,
    /// Every hero escaped.
    Won,
    /// An enemy caught a hero.
    Lost,
}

impl GameState {
    /// Reports whether the run stopped accepting moves.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Playing => "PLAYING",
            Self::Error => "ERROR",
            Self::Won => "WON",
            Self::Lost => "LOST",
        };
        f.write_str(label)
    }
}

/// Grid-relative tile coordinate. Zero-based, no wraparound.
///
/// Coordinates are signed so that neighbours of edge tiles remain
/// representable; they simply resolve to nothing when looked up.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Coord {
    x: i32,
    y: i32,
}

impl Coord {
    /// Creates a new coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Column index.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Row index. Grows towards [`Direction::Up`].
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the neighbouring coordinate in the provided direction.
    #[must_use]
    pub const fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal directions, in the order used to index tile walls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Towards increasing x.
    Right,
    /// Towards decreasing y.
    Down,
    /// Towards decreasing x.
    Left,
    /// Towards increasing y.
    Up,
}

impl Direction {
    /// Every direction in scan order.
    pub const ALL: [Direction; 4] = [Self::Right, Self::Down, Self::Left, Self::Up];

    /// Position of the direction within [`Direction::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction stored at `index` within [`Direction::ALL`], wrapping modulo four.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Unit step associated with the direction.
    ///
    /// Down maps to `-y`, so the row index grows upwards.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Right => (1, 0),
            Self::Down => (0, -1),
            Self::Left => (-1, 0),
            Self::Up => (0, 1),
        }
    }

    /// Direction rotated by half a turn.
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }
}

/// Mobile entity standing on a tile. A tile holds exactly one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OccupierKind {
    /// Nothing stands on the tile.
    #[default]
    Empty,
    /// A pursuing enemy.
    Enemy,
    /// A player-controlled hero.
    Hero,
    /// A pushable stone that also blocks sight.
    Stone,
}

/// Terrain of a tile, independent of its occupant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FloorKind {
    /// Plain floor.
    #[default]
    Empty,
    /// Water. Enemies refuse to step onto it; heroes walk through.
    Water,
    /// One end of a coloured portal pair.
    Portal,
}

/// Behaviour attached to an existing wall edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoorKind {
    /// No door. An existing wall is solid.
    #[default]
    Plain,
    /// Always open; stepping through removes the hero from play.
    Exit,
    /// Open while any button of its colour is pressed.
    Door,
    /// Open while every button of its colour is pressed.
    GateSingle,
    /// Open while every registered colour has a pressed button.
    GateRainbow,
}

/// One of the four fixed colours shared by doors, buttons and portals.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum DoorColor {
    /// First colour.
    #[default]
    Red,
    /// Second colour.
    Green,
    /// Third colour.
    Cyan,
    /// Fourth colour.
    Magenta,
}

impl DoorColor {
    /// Every colour in palette order.
    pub const ALL: [DoorColor; 4] = [Self::Red, Self::Green, Self::Cyan, Self::Magenta];
}

impl fmt::Display for DoorColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Red => "RED",
            Self::Green => "GREEN",
            Self::Cyan => "CYAN",
            Self::Magenta => "MAGENTA",
        };
        f.write_str(label)
    }
}

/// Barrier descriptor for one edge of a tile.
///
/// `door` and `color` only matter while `exists` is set; a missing wall is
/// fully open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct WallState {
    /// Whether a wall occupies the edge.
    pub exists: bool,
    /// Door behaviour of the wall.
    pub door: DoorKind,
    /// Colour keying the door to buttons.
    pub color: DoorColor,
}

impl WallState {
    /// An edge without a wall.
    #[must_use]
    pub const fn open() -> Self {
        Self {
            exists: false,
            door: DoorKind::Plain,
            color: DoorColor::Red,
        }
    }

    /// A plain, impassable wall.
    #[must_use]
    pub const fn solid() -> Self {
        Self {
            exists: true,
            door: DoorKind::Plain,
            color: DoorColor::Red,
        }
    }

    /// An existing wall carrying the provided door.
    #[must_use]
    pub const fn with_door(door: DoorKind, color: DoorColor) -> Self {
        Self {
            exists: true,
            door,
            color,
        }
    }
}

/// Per-cell level descriptor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TileState {
    /// Entity standing on the tile.
    pub occupier: OccupierKind,
    /// Terrain of the tile.
    pub floor: FloorKind,
    /// Edges indexed by [`Direction::index`].
    pub walls: [WallState; 4],
    /// Colour of the button on the tile, if any.
    pub button: Option<DoorColor>,
    /// Colour of the portal on the tile, if any.
    pub portal: Option<DoorColor>,
}

impl TileState {
    /// Wall on the provided edge.
    #[must_use]
    pub const fn wall(&self, direction: Direction) -> WallState {
        self.walls[direction.index()]
    }

    /// Mutable access to the wall on the provided edge.
    pub fn wall_mut(&mut self, direction: Direction) -> &mut WallState {
        &mut self.walls[direction.index()]
    }

    /// Replaces the occupant.
    #[must_use]
    pub fn with_occupier(mut self, occupier: OccupierKind) -> Self {
        self.occupier = occupier;
        self
    }

    /// Replaces the floor.
    #[must_use]
    pub fn with_floor(mut self, floor: FloorKind) -> Self {
        self.floor = floor;
        self
    }

    /// Replaces the wall on one edge.
    #[must_use]
    pub fn with_wall(mut self, direction: Direction, wall: WallState) -> Self {
        self.walls[direction.index()] = wall;
        self
    }

    /// Places a button of the provided colour.
    #[must_use]
    pub fn with_button(mut self, color: DoorColor) -> Self {
        self.button = Some(color);
        self
    }

    /// Places a portal of the provided colour and marks the floor accordingly.
    #[must_use]
    pub fn with_portal(mut self, color: DoorColor) -> Self {
        self.portal = Some(color);
        self.floor = FloorKind::Portal;
        self
    }
}

/// Rectangular level descriptor stored column-major (`tiles[x][y]`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelData {
    columns: u32,
    rows: u32,
    tiles: Vec<Vec<TileState>>,
}

impl LevelData {
    /// Creates a level of the provided size filled with empty tiles.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        let column_len = usize::try_from(rows).unwrap_or(0);
        let column_count = usize::try_from(columns).unwrap_or(0);
        Self {
            columns,
            rows,
            tiles: vec![vec![TileState::default(); column_len]; column_count],
        }
    }

    /// Number of columns declared by the descriptor.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows declared by the descriptor.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the coordinate lies inside the declared size.
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        self.index(coord).is_some()
    }

    /// Tile stored at the coordinate, if any.
    #[must_use]
    pub fn tile(&self, coord: Coord) -> Option<&TileState> {
        let (x, y) = self.index(coord)?;
        self.tiles.get(x)?.get(y)
    }

    /// Mutable tile stored at the coordinate, if any.
    pub fn tile_mut(&mut self, coord: Coord) -> Option<&mut TileState> {
        let (x, y) = self.index(coord)?;
        self.tiles.get_mut(x)?.get_mut(y)
    }

    /// Replaces the tile at the coordinate. Out-of-range coordinates are ignored.
    #[must_use]
    pub fn with_tile(mut self, coord: Coord, tile: TileState) -> Self {
        if let Some(slot) = self.tile_mut(coord) {
            *slot = tile;
        }
        self
    }

    /// Every coordinate inside the declared size, column-major.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let columns = i32::try_from(self.columns).unwrap_or(i32::MAX);
        let rows = i32::try_from(self.rows).unwrap_or(i32::MAX);
        (0..columns).flat_map(move |x| (0..rows).map(move |y| Coord::new(x, y)))
    }

    /// Stored tiles that lie inside the declared size, column-major.
    ///
    /// Only visits what the descriptor actually provides, so a declared size
    /// far larger than the stored data costs nothing.
    pub fn tiles(&self) -> impl Iterator<Item = (Coord, &TileState)> + '_ {
        let columns = usize::try_from(self.columns).unwrap_or(usize::MAX);
        let rows = usize::try_from(self.rows).unwrap_or(usize::MAX);
        self.tiles
            .iter()
            .take(columns)
            .enumerate()
            .flat_map(move |(x, column)| {
                column
                    .iter()
                    .take(rows)
                    .enumerate()
                    .filter_map(move |(y, tile)| Some((grid_coord(x, y)?, tile)))
            })
    }

    /// First declared coordinate the descriptor does not provide a tile for.
    ///
    /// Inspects each stored column once instead of every declared cell.
    #[must_use]
    pub fn first_missing(&self) -> Option<Coord> {
        let columns = usize::try_from(self.columns).unwrap_or(usize::MAX);
        let rows = usize::try_from(self.rows).unwrap_or(usize::MAX);
        if rows == 0 {
            return None;
        }
        for x in 0..columns.min(self.tiles.len()) {
            let provided = self.tiles[x].len();
            if provided < rows {
                return Some(clamped_coord(x, provided));
            }
        }
        (self.tiles.len() < columns).then(|| clamped_coord(self.tiles.len(), 0))
    }

    fn index(&self, coord: Coord) -> Option<(usize, usize)> {
        let x = u32::try_from(coord.x()).ok()?;
        let y = u32::try_from(coord.y()).ok()?;
        if x >= self.columns || y >= self.rows {
            return None;
        }
        Some((usize::try_from(x).ok()?, usize::try_from(y).ok()?))
    }
}

fn grid_coord(x: usize, y: usize) -> Option<Coord> {
    Some(Coord::new(i32::try_from(x).ok()?, i32::try_from(y).ok()?))
}

fn clamped_coord(x: usize, y: usize) -> Coord {
    Coord::new(
        i32::try_from(x).unwrap_or(i32::MAX),
        i32::try_from(y).unwrap_or(i32::MAX),
    )
}

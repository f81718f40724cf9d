//! Straight-line enemy pursuit.

use gridlock_core::{Coord, Direction, Event, FloorKind, OccupierKind};

use crate::Board;

/// Remembered sighting that an enemy keeps walking towards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pursuit {
    direction: Direction,
    distance: u32,
    last_seen: Coord,
}

impl Pursuit {
    /// Direction of the sighting.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Remaining steps before the remembered tile is reached.
    #[must_use]
    pub const fn distance(&self) -> u32 {
        self.distance
    }

    /// Tile the hero occupied when last seen.
    #[must_use]
    pub const fn last_seen(&self) -> Coord {
        self.last_seen
    }
}

/// Outcome of a single enemy turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyTurn {
    /// No hero in sight and nothing remembered.
    Idle,
    /// A pursuit is active but the next step is blocked.
    Held,
    /// The enemy stepped one tile along its pursuit.
    Advanced,
    /// The enemy reached a hero standing on the provided tile.
    Caught(Coord),
}

/// Enemy agent with its pursuit memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemyState {
    coord: Coord,
    pursuit: Option<Pursuit>,
    seen_this_turn: bool,
}

impl EnemyState {
    /// Creates an idle enemy standing on `coord`.
    #[must_use]
    pub const fn new(coord: Coord) -> Self {
        Self {
            coord,
            pursuit: None,
            seen_this_turn: false,
        }
    }

    /// Tile the enemy stands on.
    #[must_use]
    pub const fn coord(&self) -> Coord {
        self.coord
    }

    /// Active pursuit, if any.
    #[must_use]
    pub const fn pursuit(&self) -> Option<Pursuit> {
        self.pursuit
    }

    /// Resolves one enemy turn against the board.
    pub(crate) fn take_turn(&mut self, board: &mut Board, out_events: &mut Vec<Event>) -> EnemyTurn {
        self.seen_this_turn = false;
        self.seek(board, out_events);

        let Some(pursuit) = self.pursuit else {
            return EnemyTurn::Idle;
        };
        let direction = pursuit.direction;

        if !board.allows_move(self.coord, direction) {
            return EnemyTurn::Held;
        }

        let target = self.coord.offset(direction);
        let Some(next) = board.grid.tile(target) else {
            return EnemyTurn::Held;
        };
        if next.floor() == FloorKind::Water {
            return EnemyTurn::Held;
        }

        match next.occupier() {
            OccupierKind::Hero => {
                if let Some(tile) = board.grid.tile_mut(target) {
                    tile.kill_player(&mut board.buttons, out_events);
                }
                out_events.push(Event::PlayerCaught { coord: target });
                board.transfer(self.coord, target, out_events);
                self.coord = target;
                self.pursuit = None;
                tracing::info!(enemy = %self.coord, "hero caught");
                EnemyTurn::Caught(target)
            }
            OccupierKind::Empty => {
                board.transfer(self.coord, target, out_events);
                self.coord = target;
                self.pursuit = match pursuit.distance.saturating_sub(1) {
                    0 => None,
                    distance => Some(Pursuit {
                        distance,
                        ..pursuit
                    }),
                };
                self.seek(board, out_events);
                EnemyTurn::Advanced
            }
            OccupierKind::Enemy | OccupierKind::Stone => EnemyTurn::Held,
        }
    }

    fn seek(&mut self, board: &Board, out_events: &mut Vec<Event>) {
        for direction in Direction::ALL {
            if board.allows_move(self.coord, direction) {
                self.seek_along(board, direction, out_events);
            }
        }
    }

    fn seek_along(&mut self, board: &Board, direction: Direction, out_events: &mut Vec<Event>) {
        let mut current = self.coord;
        let mut distance = 0;
        while board.allows_move(current, direction) {
            distance += 1;
            current = current.offset(direction);
            let Some(tile) = board.grid.tile(current) else {
                break;
            };
            match tile.occupier() {
                OccupierKind::Stone => break,
                OccupierKind::Hero => self.spot(direction, distance, current, out_events),
                OccupierKind::Empty | OccupierKind::Enemy => {}
            }
        }
    }

    fn spot(
        &mut self,
        direction: Direction,
        distance: u32,
        hero: Coord,
        out_events: &mut Vec<Event>,
    ) {
        if self.seen_this_turn && self.pursuit.is_some_and(|seen| seen.distance <= distance) {
            return;
        }
        self.seen_this_turn = true;
        self.pursuit = Some(Pursuit {
            direction,
            distance,
            last_seen: hero,
        });
        tracing::debug!(enemy = %self.coord, %hero, distance, "enemy spotted hero");
        out_events.push(Event::EnemySpotted {
            enemy: self.coord,
            hero,
            distance,
        });
    }
}

//! ASCII frames of a running level.
//!
//! Tiles sit at odd character positions with their edges in between, and the
//! top line shows the highest row.

use gridlock_core::{Coord, Direction, DoorColor, DoorKind, FloorKind, OccupierKind};
use gridlock_world::{query, GameRun};

/// Draws the current state of the run.
pub(crate) fn render(run: &GameRun) -> String {
    let (columns, rows) = query::grid_size(run);
    let width = columns * 2 + 1;
    let height = rows * 2 + 1;
    let mut canvas = vec![vec![' '; width]; height];

    for line in (0..height).step_by(2) {
        for column in (0..width).step_by(2) {
            canvas[line][column] = '+';
        }
    }

    for x in 0..columns {
        for y in 0..rows {
            let Some(coord) = coord(x, y) else {
                continue;
            };
            let column = x * 2 + 1;
            let line = (rows - 1 - y) * 2 + 1;

            canvas[line][column] = tile_glyph(run, coord);
            canvas[line][column + 1] = edge_glyph(run, coord, Direction::Right);
            canvas[line - 1][column] = edge_glyph(run, coord, Direction::Up);
            if x == 0 {
                canvas[line][column - 1] = edge_glyph(run, coord, Direction::Left);
            }
            if y == 0 {
                canvas[line + 1][column] = edge_glyph(run, coord, Direction::Down);
            }
        }
    }

    let mut frame = String::with_capacity(height * (width + 1));
    for line in canvas {
        frame.extend(line);
        frame.push('\n');
    }
    frame
}

fn coord(x: usize, y: usize) -> Option<Coord> {
    Some(Coord::new(i32::try_from(x).ok()?, i32::try_from(y).ok()?))
}

fn tile_glyph(run: &GameRun, coord: Coord) -> char {
    match query::occupier_at(run, coord) {
        Some(OccupierKind::Hero) => return '@',
        Some(OccupierKind::Enemy) => return 'E',
        Some(OccupierKind::Stone) => return 'o',
        Some(OccupierKind::Empty) => {}
        None => return ' ',
    }
    if let Some(color) = query::button_at(run, coord) {
        return color_glyph(color).to_ascii_lowercase();
    }
    if let Some(color) = query::portal_at(run, coord) {
        return color_glyph(color);
    }
    match query::floor_at(run, coord) {
        Some(FloorKind::Water) => '~',
        _ => '.',
    }
}

/// Glyph for the edge leaving `coord` towards `direction`.
///
/// Both sides of the edge are consulted so that one-sided exits and doors
/// still show up whichever tile owns them.
fn edge_glyph(run: &GameRun, coord: Coord, direction: Direction) -> char {
    let neighbour = coord.offset(direction);
    let sides = [
        (coord, direction),
        (neighbour, direction.opposite()),
    ];
    let walls: Vec<_> = sides
        .into_iter()
        .filter_map(|(at, towards)| {
            query::wall_at(run, at, towards)
                .filter(|wall| wall.exists)
                .map(|wall| (at, towards, wall))
        })
        .collect();

    if walls.is_empty() {
        return ' ';
    }
    if walls.iter().any(|(_, _, wall)| wall.door == DoorKind::Exit) {
        return 'X';
    }
    if let Some((at, towards, wall)) = walls
        .iter()
        .find(|(_, _, wall)| wall.door != DoorKind::Plain)
    {
        if query::door_is_open(run, *at, *towards) {
            return '/';
        }
        return match wall.door {
            DoorKind::GateSingle => 'G',
            DoorKind::GateRainbow => '*',
            _ => 'D',
        };
    }
    match direction {
        Direction::Left | Direction::Right => '|',
        Direction::Up | Direction::Down => '-',
    }
}

fn color_glyph(color: DoorColor) -> char {
    match color {
        DoorColor::Red => 'R',
        DoorColor::Green => 'G',
        DoorColor::Cyan => 'C',
        DoorColor::Magenta => 'M',
    }
}

#[cfg(test)]
mod tests {
    use gridlock_core::{LevelData, TileState, WallState};

    use super::*;

    #[test]
    fn frame_puts_highest_row_on_top() {
        let level = LevelData::new(2, 2)
            .with_tile(
                Coord::new(0, 1),
                TileState::default().with_occupier(OccupierKind::Hero),
            )
            .with_tile(
                Coord::new(1, 0),
                TileState::default().with_occupier(OccupierKind::Enemy),
            );
        let run = GameRun::new(&level);

        assert_eq!(render(&run), "+ + +\n @ . \n+ + +\n . E \n+ + +\n");
    }

    #[test]
    fn walls_doors_and_exits_are_drawn() {
        let level = LevelData::new(2, 1)
            .with_tile(
                Coord::new(0, 0),
                TileState::default()
                    .with_occupier(OccupierKind::Hero)
                    .with_wall(Direction::Left, WallState::solid())
                    .with_wall(
                        Direction::Right,
                        WallState::with_door(DoorKind::Door, DoorColor::Green),
                    )
                    .with_wall(Direction::Up, WallState::with_door(DoorKind::Exit, DoorColor::Red)),
            )
            .with_tile(
                Coord::new(1, 0),
                TileState::default()
                    .with_button(DoorColor::Green)
                    .with_floor(FloorKind::Water)
                    .with_wall(Direction::Down, WallState::solid()),
            );
        let run = GameRun::new(&level);

        assert_eq!(render(&run), "+X+ +\n|@Dg \n+ +-+\n");
    }

    #[test]
    fn open_door_and_features_use_their_glyphs() {
        let door = WallState::with_door(DoorKind::Door, DoorColor::Cyan);
        let level = LevelData::new(3, 1)
            .with_tile(
                Coord::new(0, 0),
                TileState::default()
                    .with_occupier(OccupierKind::Hero)
                    .with_button(DoorColor::Cyan)
                    .with_wall(Direction::Right, door),
            )
            .with_tile(
                Coord::new(1, 0),
                TileState::default()
                    .with_floor(FloorKind::Water)
                    .with_wall(Direction::Left, door),
            )
            .with_tile(
                Coord::new(2, 0),
                TileState::default().with_occupier(OccupierKind::Stone),
            );
        let run = GameRun::new(&level);

        assert_eq!(render(&run), "+ + + +\n @/~ o \n+ + + +\n");
    }
}

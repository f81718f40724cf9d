//! Dense column-major storage addressed by tile coordinates.

use gridlock_core::{Coord, Direction};

/// Growable 2D container mapping coordinates to cell values.
///
/// Storage is a list of columns. Writes grow the columns needed to reach the
/// coordinate; reads outside the written extent yield `None` rather than
/// failing. The container owns no game semantics.
#[derive(Clone, Debug)]
pub struct Grid<T> {
    columns: Vec<Vec<Option<T>>>,
}

impl<T> Default for Grid<T> {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
        }
    }
}

impl<T> Grid<T> {
    /// Creates an empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` at `coord`, growing storage as needed.
    ///
    /// Negative coordinates cannot be stored and are ignored.
    pub fn set_tile(&mut self, coord: Coord, value: T) {
        let Some((x, y)) = index(coord) else {
            return;
        };
        if self.columns.len() <= x {
            self.columns.resize_with(x + 1, Vec::new);
        }
        let column = &mut self.columns[x];
        if column.len() <= y {
            column.resize_with(y + 1, || None);
        }
        column[y] = Some(value);
    }

    /// Value stored at `coord`, or `None` outside the stored extent.
    #[must_use]
    pub fn tile(&self, coord: Coord) -> Option<&T> {
        let (x, y) = index(coord)?;
        self.columns.get(x)?.get(y)?.as_ref()
    }

    /// Mutable value stored at `coord`, or `None` outside the stored extent.
    pub fn tile_mut(&mut self, coord: Coord) -> Option<&mut T> {
        let (x, y) = index(coord)?;
        self.columns.get_mut(x)?.get_mut(y)?.as_mut()
    }

    /// Value stored next to `coord` in the provided direction.
    #[must_use]
    pub fn adjacent(&self, coord: Coord, direction: Direction) -> Option<&T> {
        self.tile(coord.offset(direction))
    }

    /// Number of columns and the length of the first column.
    #[must_use]
    pub fn size(&self) -> (usize, usize) {
        match self.columns.first() {
            Some(first) => (self.columns.len(), first.len()),
            None => (0, 0),
        }
    }

    /// Stored values in column-major order (every `y` of `x = 0`, then `x = 1`, ...).
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.columns
            .iter()
            .flat_map(|column| column.iter().filter_map(Option::as_ref))
    }

    /// Two disjoint mutable cells.
    ///
    /// Returns `None` when the coordinates coincide or either cell is empty.
    pub fn pair_mut(&mut self, first: Coord, second: Coord) -> Option<(&mut T, &mut T)> {
        let (fx, fy) = index(first)?;
        let (sx, sy) = index(second)?;

        if fx == sx {
            if fy == sy {
                return None;
            }
            let column = self.columns.get_mut(fx)?;
            let split = fy.max(sy);
            if split >= column.len() {
                return None;
            }
            let (low, high) = column.split_at_mut(split);
            let (a, b) = if fy < sy {
                (&mut low[fy], &mut high[0])
            } else {
                (&mut high[0], &mut low[sy])
            };
            return Some((a.as_mut()?, b.as_mut()?));
        }

        let split = fx.max(sx);
        if split >= self.columns.len() {
            return None;
        }
        let (low, high) = self.columns.split_at_mut(split);
        let (first_column, second_column) = if fx < sx {
            (&mut low[fx], &mut high[0])
        } else {
            (&mut high[0], &mut low[sx])
        };
        let a = first_column.get_mut(fy)?.as_mut()?;
        let b = second_column.get_mut(sy)?.as_mut()?;
        Some((a, b))
    }
}

fn index(coord: Coord) -> Option<(usize, usize)> {
    let x = usize::try_from(coord.x()).ok()?;
    let y = usize::try_from(coord.y()).ok()?;
    Some((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_outside_extent_return_none() {
        let mut grid = Grid::new();
        grid.set_tile(Coord::new(1, 1), 'a');

        assert_eq!(grid.tile(Coord::new(1, 1)), Some(&'a'));
        assert_eq!(grid.tile(Coord::new(-1, 0)), None);
        assert_eq!(grid.tile(Coord::new(0, -1)), None);
        assert_eq!(grid.tile(Coord::new(2, 0)), None);
        assert_eq!(grid.tile(Coord::new(1, 2)), None);
        assert_eq!(grid.tile(Coord::new(0, 0)), None, "gap filled with nothing");
    }

    #[test]
    fn writes_grow_storage() {
        let mut grid = Grid::new();
        assert_eq!(grid.size(), (0, 0));

        for x in 0..3 {
            for y in 0..2 {
                grid.set_tile(Coord::new(x, y), x * 10 + y);
            }
        }

        assert_eq!(grid.size(), (3, 2));
        assert_eq!(grid.tile(Coord::new(2, 1)), Some(&21));
    }

    #[test]
    fn negative_writes_are_ignored() {
        let mut grid = Grid::new();
        grid.set_tile(Coord::new(-1, 0), 1);
        assert_eq!(grid.size(), (0, 0));
    }

    #[test]
    fn adjacent_follows_direction_offsets() {
        let mut grid = Grid::new();
        grid.set_tile(Coord::new(1, 0), "down");
        grid.set_tile(Coord::new(1, 1), "centre");
        grid.set_tile(Coord::new(1, 2), "up");
        grid.set_tile(Coord::new(2, 1), "right");

        let centre = Coord::new(1, 1);
        assert_eq!(grid.adjacent(centre, Direction::Down), Some(&"down"));
        assert_eq!(grid.adjacent(centre, Direction::Up), Some(&"up"));
        assert_eq!(grid.adjacent(centre, Direction::Right), Some(&"right"));
        assert_eq!(grid.adjacent(centre, Direction::Left), None);
    }

    #[test]
    fn iteration_is_column_major() {
        let mut grid = Grid::new();
        for x in 0..2 {
            for y in 0..2 {
                grid.set_tile(Coord::new(x, y), (x, y));
            }
        }

        let visited: Vec<_> = grid.iter().copied().collect();
        assert_eq!(visited, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn pair_mut_returns_disjoint_cells() {
        let mut grid = Grid::new();
        for x in 0..3 {
            for y in 0..3 {
                grid.set_tile(Coord::new(x, y), 0);
            }
        }

        {
            let (a, b) = grid
                .pair_mut(Coord::new(0, 2), Coord::new(0, 0))
                .expect("same column pair");
            *a = 1;
            *b = 2;
        }
        {
            let (a, b) = grid
                .pair_mut(Coord::new(2, 1), Coord::new(1, 1))
                .expect("cross column pair");
            *a = 3;
            *b = 4;
        }

        assert_eq!(grid.tile(Coord::new(0, 2)), Some(&1));
        assert_eq!(grid.tile(Coord::new(0, 0)), Some(&2));
        assert_eq!(grid.tile(Coord::new(2, 1)), Some(&3));
        assert_eq!(grid.tile(Coord::new(1, 1)), Some(&4));
        assert!(grid.pair_mut(Coord::new(1, 1), Coord::new(1, 1)).is_none());
        assert!(grid.pair_mut(Coord::new(1, 1), Coord::new(5, 1)).is_none());
    }
}

//! Boolean reachability grid.

use crate::Position;

/// One flag per board cell, set where a piece could move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveGrid {
    rows: i32,
    columns: i32,
    cells: Vec<bool>,
}

impl MoveGrid {
    /// Creates a grid with every cell unset.
    pub fn new(rows: i32, columns: i32) -> Self {
        MoveGrid {
            rows,
            columns,
            cells: vec![false; (rows.max(0) * columns.max(0)) as usize],
        }
    }

    fn index(&self, position: Position) -> Option<usize> {
        let inside = position.row() >= 0
            && position.row() < self.rows
            && position.column() >= 0
            && position.column() < self.columns;
        inside.then(|| (position.row() * self.columns + position.column()) as usize)
    }

    /// Returns true if `position` is flagged. Off-grid positions never are.
    #[inline]
    pub fn get(&self, position: Position) -> bool {
        self.index(position).map_or(false, |i| self.cells[i])
    }

    /// Flags `position`. Off-grid positions are ignored.
    #[inline]
    pub fn mark(&mut self, position: Position) {
        if let Some(i) = self.index(position) {
            self.cells[i] = true;
        }
    }

    /// Clears `position`.
    #[inline]
    pub fn unmark(&mut self, position: Position) {
        if let Some(i) = self.index(position) {
            self.cells[i] = false;
        }
    }

    /// Returns true if any cell is flagged.
    pub fn any(&self) -> bool {
        self.cells.iter().any(|&c| c)
    }

    /// Returns the number of flagged cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Iterates over the flagged positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c)
            .map(move |(i, _)| Position::new(i as i32 / columns, i as i32 % columns))
    }

    /// Returns the flags as nested rows, top row first.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.cells
            .chunks(self.columns.max(1) as usize)
            .map(<[bool]>::to_vec)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_and_query() {
        let mut grid = MoveGrid::new(8, 8);
        assert!(!grid.any());

        grid.mark(Position::new(4, 4));
        grid.mark(Position::new(0, 7));
        grid.mark(Position::new(9, 9));

        assert!(grid.any());
        assert_eq!(grid.count(), 2);
        assert!(grid.get(Position::new(4, 4)));
        assert!(!grid.get(Position::new(4, 5)));
        assert!(!grid.get(Position::new(-1, 0)));

        grid.unmark(Position::new(4, 4));
        assert_eq!(grid.count(), 1);
    }

    #[test]
    fn positions_in_row_major_order() {
        let mut grid = MoveGrid::new(3, 2);
        grid.mark(Position::new(2, 1));
        grid.mark(Position::new(0, 1));
        let marked: Vec<_> = grid.positions().collect();
        assert_eq!(marked, vec![Position::new(0, 1), Position::new(2, 1)]);

        let rows = grid.to_rows();
        assert_eq!(rows, vec![vec![false, true], vec![false, false], vec![false, true]]);
    }
}

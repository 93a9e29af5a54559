//! Zero-based grid coordinates.

use std::fmt;

/// A `(row, column)` coordinate on a board.
///
/// Coordinates are signed so a position can step off the board while
/// scanning; [`Board::position_exists`](crate::Board::position_exists)
/// decides whether it is on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    row: i32,
    column: i32,
}

impl Position {
    /// Creates a position.
    #[inline]
    pub const fn new(row: i32, column: i32) -> Self {
        Position { row, column }
    }

    /// Returns the zero-based row, rank 8 being row 0 on a chess board.
    #[inline]
    pub const fn row(self) -> i32 {
        self.row
    }

    /// Returns the zero-based column.
    #[inline]
    pub const fn column(self) -> i32 {
        self.column
    }

    /// Moves this position in place.
    #[inline]
    pub fn set_values(&mut self, row: i32, column: i32) {
        self.row = row;
        self.column = column;
    }

    /// Returns the position shifted by the given deltas.
    #[inline]
    pub const fn offset(self, rows: i32, columns: i32) -> Self {
        Position::new(self.row + rows, self.column + columns)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset() {
        let p = Position::new(3, 4);
        assert_eq!(p.offset(-1, 2), Position::new(2, 6));
        assert_eq!(p.offset(-4, 0).row(), -1);
    }

    #[test]
    fn set_values() {
        let mut p = Position::new(0, 0);
        p.set_values(5, 7);
        assert_eq!((p.row(), p.column()), (5, 7));
    }

    #[test]
    fn display() {
        assert_eq!(Position::new(6, 4).to_string(), "(6, 4)");
    }
}

//! The cell grid.
//!
//! [`Board`] knows about bounds and occupancy, nothing else. It owns the
//! pieces placed on it and keeps each piece's stored position in sync with
//! the cell holding it through the [`Placeable`] hook.

use thiserror::Error;

use crate::Position;

/// Errors raised by board accessors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid board dimensions {rows}x{columns}: at least 1 row and 1 column required")]
    InvalidBoardDimensions { rows: i32, columns: i32 },

    #[error("position {0} is not on the board")]
    OutOfBounds(Position),

    #[error("there is already a piece at {0}")]
    OccupiedCell(Position),
}

/// Something that can sit in a board cell and remember where it is.
pub trait Placeable {
    /// Called with `Some` when placed and `None` when removed.
    fn set_position(&mut self, position: Option<Position>);
}

/// A `rows x columns` grid holding zero or one piece per cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board<P> {
    rows: i32,
    columns: i32,
    cells: Vec<Option<P>>,
}

impl<P: Placeable> Board<P> {
    /// Creates an empty board.
    pub fn new(rows: i32, columns: i32) -> Result<Self, BoardError> {
        if rows < 1 || columns < 1 {
            return Err(BoardError::InvalidBoardDimensions { rows, columns });
        }
        let mut cells = Vec::new();
        cells.resize_with((rows * columns) as usize, || None);
        Ok(Board {
            rows,
            columns,
            cells,
        })
    }

    /// Returns the number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Returns the number of columns.
    #[inline]
    pub fn columns(&self) -> i32 {
        self.columns
    }

    /// Returns true if the position lies on the grid.
    #[inline]
    pub fn position_exists(&self, position: Position) -> bool {
        position.row() >= 0
            && position.row() < self.rows
            && position.column() >= 0
            && position.column() < self.columns
    }

    fn index(&self, position: Position) -> Result<usize, BoardError> {
        if !self.position_exists(position) {
            return Err(BoardError::OutOfBounds(position));
        }
        Ok((position.row() * self.columns + position.column()) as usize)
    }

    /// Returns the piece at `position`.
    pub fn piece(&self, position: Position) -> Result<Option<&P>, BoardError> {
        let index = self.index(position)?;
        Ok(self.cells[index].as_ref())
    }

    /// Returns the piece at `position`, treating off-board positions as empty.
    #[inline]
    pub fn get(&self, position: Position) -> Option<&P> {
        self.piece(position).ok().flatten()
    }

    /// Returns true if a piece occupies `position`.
    pub fn there_is_a_piece(&self, position: Position) -> Result<bool, BoardError> {
        Ok(self.piece(position)?.is_some())
    }

    /// Places a piece on an empty cell and records its position.
    pub fn place_piece(&mut self, mut piece: P, position: Position) -> Result<(), BoardError> {
        let index = self.index(position)?;
        if self.cells[index].is_some() {
            return Err(BoardError::OccupiedCell(position));
        }
        piece.set_position(Some(position));
        self.cells[index] = Some(piece);
        Ok(())
    }

    /// Detaches and returns the piece at `position`, if any.
    pub fn remove_piece(&mut self, position: Position) -> Result<Option<P>, BoardError> {
        let index = self.index(position)?;
        let mut piece = self.cells[index].take();
        if let Some(piece) = piece.as_mut() {
            piece.set_position(None);
        }
        Ok(piece)
    }

    /// Iterates over every piece on the board in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = &P> {
        self.cells.iter().flatten()
    }

    /// Returns the rows of the grid, top row first.
    pub fn grid(&self) -> Vec<Vec<Option<&P>>> {
        self.cells
            .chunks(self.columns as usize)
            .map(|row| row.iter().map(Option::as_ref).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Token {
        name: char,
        position: Option<Position>,
    }

    impl Token {
        fn new(name: char) -> Self {
            Token {
                name,
                position: None,
            }
        }
    }

    impl Placeable for Token {
        fn set_position(&mut self, position: Option<Position>) {
            self.position = position;
        }
    }

    #[test]
    fn invalid_dimensions() {
        assert_eq!(
            Board::<Token>::new(0, 8).unwrap_err(),
            BoardError::InvalidBoardDimensions { rows: 0, columns: 8 }
        );
        assert!(Board::<Token>::new(8, 0).is_err());
        assert!(Board::<Token>::new(1, 1).is_ok());
    }

    #[test]
    fn place_and_remove() {
        let mut board = Board::new(8, 8).unwrap();
        let at = Position::new(2, 3);
        board.place_piece(Token::new('x'), at).unwrap();

        let placed = board.piece(at).unwrap().unwrap();
        assert_eq!(placed.position, Some(at));
        assert!(board.there_is_a_piece(at).unwrap());

        let removed = board.remove_piece(at).unwrap().unwrap();
        assert_eq!(removed.name, 'x');
        assert_eq!(removed.position, None);
        assert!(!board.there_is_a_piece(at).unwrap());
        assert_eq!(board.remove_piece(at).unwrap(), None);
    }

    #[test]
    fn occupied_cell() {
        let mut board = Board::new(8, 8).unwrap();
        let at = Position::new(0, 0);
        board.place_piece(Token::new('a'), at).unwrap();
        assert_eq!(
            board.place_piece(Token::new('b'), at),
            Err(BoardError::OccupiedCell(at))
        );
        assert_eq!(board.get(at).map(|t| t.name), Some('a'));
    }

    #[test]
    fn out_of_bounds() {
        let mut board = Board::<Token>::new(8, 8).unwrap();
        let off = Position::new(8, 0);
        assert_eq!(board.piece(off), Err(BoardError::OutOfBounds(off)));
        assert_eq!(board.remove_piece(off), Err(BoardError::OutOfBounds(off)));
        assert!(board.there_is_a_piece(off).is_err());
        assert!(board.get(off).is_none());
        assert!(!board.position_exists(Position::new(-1, 3)));
    }

    #[test]
    fn rectangular_grid() {
        let mut board = Board::new(2, 3).unwrap();
        board.place_piece(Token::new('q'), Position::new(1, 2)).unwrap();
        assert!(!board.position_exists(Position::new(2, 0)));
        assert!(board.position_exists(Position::new(1, 2)));

        let grid = board.grid();
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0].len(), 3);
        assert_eq!(grid[1][2].map(|t| t.name), Some('q'));
        assert_eq!(board.pieces().count(), 1);
    }

    proptest! {
        #[test]
        fn stored_position_matches_cell(row in 0i32..8, column in 0i32..8) {
            let mut board = Board::new(8, 8).unwrap();
            let at = Position::new(row, column);
            board.place_piece(Token::new('p'), at).unwrap();
            prop_assert_eq!(board.pieces().count(), 1);
            prop_assert_eq!(board.get(at).and_then(|t| t.position), Some(at));
        }

        #[test]
        fn positions_outside_are_rejected(row in -20i32..20, column in -20i32..20) {
            let board = Board::<Token>::new(8, 8).unwrap();
            let at = Position::new(row, column);
            let inside = (0..8).contains(&row) && (0..8).contains(&column);
            prop_assert_eq!(board.position_exists(at), inside);
            prop_assert_eq!(board.piece(at).is_ok(), inside);
        }
    }
}

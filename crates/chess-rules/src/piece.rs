//! Pieces owned by a match.

use chess_board::{Board, Color, MoveGrid, PieceKind, Placeable, Position};

use crate::movegen;

/// Stable identity of a piece within one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(u16);

impl PieceId {
    #[inline]
    pub(crate) const fn new(raw: u16) -> Self {
        PieceId(raw)
    }
}

/// Match state that move generation reads besides the board itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveContext {
    /// The pawn that double-stepped on the previous ply.
    pub en_passant_vulnerable: Option<PieceId>,
    /// Whether the side to move is currently in check.
    pub in_check: bool,
}

/// A chess piece.
///
/// The board owns live pieces and the match owns captured ones; a piece only
/// borrows the board when generating moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessPiece {
    id: PieceId,
    kind: PieceKind,
    color: Color,
    position: Option<Position>,
    move_count: u32,
}

impl ChessPiece {
    pub(crate) fn new(id: PieceId, kind: PieceKind, color: Color) -> Self {
        ChessPiece {
            id,
            kind,
            color,
            position: None,
            move_count: 0,
        }
    }

    /// Returns the identity assigned when the piece entered the match.
    #[inline]
    pub fn id(&self) -> PieceId {
        self.id
    }

    /// Returns the piece kind.
    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns the side this piece belongs to.
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the current square, or `None` once captured.
    #[inline]
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Returns how many times this piece has moved.
    #[inline]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub(crate) fn increase_move_count(&mut self) {
        self.move_count += 1;
    }

    /// Steps the counter back; `None` if the piece has never moved.
    pub(crate) fn decrease_move_count(&mut self) -> Option<()> {
        self.move_count = self.move_count.checked_sub(1)?;
        Some(())
    }

    /// Returns the piece letter, upper-case for White and lower-case for Black.
    pub fn to_char(&self) -> char {
        match self.color {
            Color::White => self.kind.code(),
            Color::Black => self.kind.code().to_ascii_lowercase(),
        }
    }

    /// Returns every square this piece could move to, ignoring king safety.
    pub fn possible_moves(&self, board: &Board<ChessPiece>, context: &MoveContext) -> MoveGrid {
        movegen::possible_moves(self, board, context)
    }

    /// Returns true if `target` is among [`possible_moves`](Self::possible_moves).
    pub fn possible_move(
        &self,
        board: &Board<ChessPiece>,
        context: &MoveContext,
        target: Position,
    ) -> bool {
        self.possible_moves(board, context).get(target)
    }

    /// Returns true if this piece has at least one pseudo-legal move.
    pub fn is_there_any_possible_move(
        &self,
        board: &Board<ChessPiece>,
        context: &MoveContext,
    ) -> bool {
        self.possible_moves(board, context).any()
    }
}

impl Placeable for ChessPiece {
    fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_counter() {
        let mut piece = ChessPiece::new(PieceId::new(0), PieceKind::Rook, Color::White);
        piece.increase_move_count();
        piece.increase_move_count();
        assert_eq!(piece.decrease_move_count(), Some(()));
        assert_eq!(piece.move_count(), 1);
    }

    #[test]
    fn move_counter_never_goes_below_zero() {
        let mut piece = ChessPiece::new(PieceId::new(0), PieceKind::Pawn, Color::Black);
        assert_eq!(piece.decrease_move_count(), None);
        assert_eq!(piece.move_count(), 0);
    }

    #[test]
    fn to_char() {
        let white = ChessPiece::new(PieceId::new(0), PieceKind::Knight, Color::White);
        let black = ChessPiece::new(PieceId::new(1), PieceKind::Queen, Color::Black);
        assert_eq!(white.to_char(), 'N');
        assert_eq!(black.to_char(), 'q');
    }

    #[test]
    fn placement_tracks_position() {
        let mut board = Board::new(8, 8).unwrap();
        let piece = ChessPiece::new(PieceId::new(7), PieceKind::Bishop, Color::Black);
        board.place_piece(piece, Position::new(3, 3)).unwrap();
        assert_eq!(
            board.get(Position::new(3, 3)).and_then(ChessPiece::position),
            Some(Position::new(3, 3))
        );
        let removed = board.remove_piece(Position::new(3, 3)).unwrap().unwrap();
        assert_eq!(removed.position(), None);
        assert_eq!(removed.id(), PieceId::new(7));
    }
}

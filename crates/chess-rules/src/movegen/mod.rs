//! Pseudo-legal move generation.
//!
//! Each kind marks the squares it could reach on a [`MoveGrid`] sized to the
//! board. Whether a move would leave the mover's own king attacked is not
//! considered here; [`MatchEngine`](crate::MatchEngine) filters that by
//! applying and undoing the move.

mod castling;
mod leapers;
mod pawn;
mod sliders;

use chess_board::{Board, MoveGrid, PieceKind, Position};

use crate::{ChessPiece, MoveContext};

pub(crate) use castling::{KINGSIDE_ROOK, QUEENSIDE_ROOK};
pub use leapers::{KING_OFFSETS, KNIGHT_OFFSETS};
pub use sliders::{BISHOP_DIRECTIONS, QUEEN_DIRECTIONS, ROOK_DIRECTIONS};

/// Generates the pseudo-legal destinations of `piece`.
///
/// A piece that is not on the board has no moves.
pub fn possible_moves(piece: &ChessPiece, board: &Board<ChessPiece>, context: &MoveContext) -> MoveGrid {
    let mut moves = MoveGrid::new(board.rows(), board.columns());
    let Some(from) = piece.position() else {
        return moves;
    };

    match piece.kind() {
        PieceKind::Pawn => pawn::generate(piece, from, board, context, &mut moves),
        PieceKind::Knight => leapers::generate(piece, from, board, &KNIGHT_OFFSETS, &mut moves),
        PieceKind::Bishop => sliders::generate(piece, from, board, &BISHOP_DIRECTIONS, &mut moves),
        PieceKind::Rook => sliders::generate(piece, from, board, &ROOK_DIRECTIONS, &mut moves),
        PieceKind::Queen => sliders::generate(piece, from, board, &QUEEN_DIRECTIONS, &mut moves),
        PieceKind::King => {
            leapers::generate(piece, from, board, &KING_OFFSETS, &mut moves);
            castling::generate(piece, from, board, context, &mut moves);
        }
    }

    moves
}

/// Returns true if `position` holds a piece of the other color.
#[inline]
fn is_there_opponent_piece(piece: &ChessPiece, board: &Board<ChessPiece>, position: Position) -> bool {
    board
        .get(position)
        .map_or(false, |other| other.color() != piece.color())
}

/// Returns true if `position` is on the board and empty.
#[inline]
fn is_empty(board: &Board<ChessPiece>, position: Position) -> bool {
    board.position_exists(position) && board.get(position).is_none()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chess_board::{AlgebraicPosition, Board, Color, MoveGrid, PieceKind, Position};

    use crate::{ChessPiece, PieceId};

    /// Parses an algebraic square.
    pub fn sq(name: &str) -> Position {
        name.parse::<AlgebraicPosition>().unwrap().to_position()
    }

    /// Builds a board from `(square, kind, color)` triples; ids follow input order.
    pub fn board_with(pieces: &[(&str, PieceKind, Color)]) -> Board<ChessPiece> {
        let mut board = Board::new(8, 8).unwrap();
        for (i, &(square, kind, color)) in pieces.iter().enumerate() {
            let piece = ChessPiece::new(PieceId::new(i as u16), kind, color);
            board.place_piece(piece, sq(square)).unwrap();
        }
        board
    }

    /// Returns the flagged squares in algebraic notation, sorted.
    pub fn squares(grid: &MoveGrid) -> Vec<String> {
        let mut names: Vec<String> = grid
            .positions()
            .map(|p| AlgebraicPosition::from_position(p).unwrap().to_string())
            .collect();
        names.sort();
        names
    }
}

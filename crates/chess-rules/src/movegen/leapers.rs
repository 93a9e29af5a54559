//! Fixed-offset pieces: knight and the king's single steps.

use chess_board::{Board, MoveGrid, Position};

use super::is_there_opponent_piece;
use crate::ChessPiece;

pub const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Marks every offset square that is empty or holds an opponent.
pub(super) fn generate(
    piece: &ChessPiece,
    from: Position,
    board: &Board<ChessPiece>,
    offsets: &[(i32, i32)],
    moves: &mut MoveGrid,
) {
    for &(dr, dc) in offsets {
        let target = from.offset(dr, dc);
        if !board.position_exists(target) {
            continue;
        }
        if board.get(target).is_none() || is_there_opponent_piece(piece, board, target) {
            moves.mark(target);
        }
    }
}

#[cfg(test)]
mod tests {
    use chess_board::{Color, PieceKind};

    use crate::movegen::fixtures::{board_with, sq, squares};
    use crate::movegen::possible_moves;
    use crate::MoveContext;

    #[test]
    fn knight_in_center() {
        let board = board_with(&[("d4", PieceKind::Knight, Color::White)]);
        let knight = board.get(sq("d4")).unwrap();
        let moves = possible_moves(knight, &board, &MoveContext::default());
        assert_eq!(
            squares(&moves),
            vec!["b3", "b5", "c2", "c6", "e2", "e6", "f3", "f5"]
        );
    }

    #[test]
    fn knight_in_corner_skips_own_pieces() {
        let board = board_with(&[
            ("a1", PieceKind::Knight, Color::Black),
            ("b3", PieceKind::Pawn, Color::Black),
            ("c2", PieceKind::Pawn, Color::White),
        ]);
        let knight = board.get(sq("a1")).unwrap();
        let moves = possible_moves(knight, &board, &MoveContext::default());
        assert_eq!(squares(&moves), vec!["c2"]);
    }

    #[test]
    fn king_steps() {
        let board = board_with(&[
            ("e1", PieceKind::King, Color::White),
            ("d1", PieceKind::Queen, Color::White),
            ("f2", PieceKind::Pawn, Color::Black),
        ]);
        let king = board.get(sq("e1")).unwrap();
        let moves = possible_moves(king, &board, &MoveContext::default());
        assert_eq!(squares(&moves), vec!["d2", "e2", "f1", "f2"]);
    }
}

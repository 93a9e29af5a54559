//! Castling pseudo-moves.
//!
//! Only the king's two-square jump is marked here. Relocating the rook and
//! rejecting a jump through an attacked square belong to the match engine.

use chess_board::{Board, MoveGrid, PieceKind, Position};

use crate::{ChessPiece, MoveContext};

/// Column offset from the king to the kingside rook.
pub(crate) const KINGSIDE_ROOK: i32 = 3;
/// Column offset from the king to the queenside rook.
pub(crate) const QUEENSIDE_ROOK: i32 = -4;

pub(super) fn generate(
    king: &ChessPiece,
    from: Position,
    board: &Board<ChessPiece>,
    context: &MoveContext,
    moves: &mut MoveGrid,
) {
    if king.move_count() != 0 || context.in_check {
        return;
    }

    for rook_offset in [KINGSIDE_ROOK, QUEENSIDE_ROOK] {
        let step = rook_offset.signum();
        if !is_castling_rook(king, board, from.offset(0, rook_offset)) {
            continue;
        }
        let path_clear = (1..rook_offset.abs())
            .map(|i| from.offset(0, i * step))
            .all(|square| board.get(square).is_none());
        if path_clear {
            moves.mark(from.offset(0, 2 * step));
        }
    }
}

fn is_castling_rook(king: &ChessPiece, board: &Board<ChessPiece>, position: Position) -> bool {
    board.get(position).map_or(false, |rook| {
        rook.kind() == PieceKind::Rook && rook.color() == king.color() && rook.move_count() == 0
    })
}

#[cfg(test)]
mod tests {
    use chess_board::{Color, PieceKind};

    use crate::movegen::fixtures::{board_with, sq};
    use crate::movegen::possible_moves;
    use crate::MoveContext;

    #[test]
    fn both_sides_available() {
        let board = board_with(&[
            ("e1", PieceKind::King, Color::White),
            ("a1", PieceKind::Rook, Color::White),
            ("h1", PieceKind::Rook, Color::White),
        ]);
        let king = board.get(sq("e1")).unwrap();
        let moves = possible_moves(king, &board, &MoveContext::default());
        assert!(moves.get(sq("g1")));
        assert!(moves.get(sq("c1")));
    }

    #[test]
    fn blocked_path() {
        let board = board_with(&[
            ("e8", PieceKind::King, Color::Black),
            ("a8", PieceKind::Rook, Color::Black),
            ("b8", PieceKind::Knight, Color::Black),
            ("h8", PieceKind::Rook, Color::Black),
        ]);
        let king = board.get(sq("e8")).unwrap();
        let moves = possible_moves(king, &board, &MoveContext::default());
        assert!(moves.get(sq("g8")));
        assert!(!moves.get(sq("c8")));
    }

    #[test]
    fn no_castling_in_check_or_with_foreign_rook() {
        let board = board_with(&[
            ("e1", PieceKind::King, Color::White),
            ("h1", PieceKind::Rook, Color::Black),
        ]);
        let king = board.get(sq("e1")).unwrap();
        assert!(!possible_moves(king, &board, &MoveContext::default()).get(sq("g1")));

        let own = board_with(&[
            ("e1", PieceKind::King, Color::White),
            ("h1", PieceKind::Rook, Color::White),
        ]);
        let king = own.get(sq("e1")).unwrap();
        let context = MoveContext {
            in_check: true,
            ..MoveContext::default()
        };
        assert!(!possible_moves(king, &own, &context).get(sq("g1")));
    }
}

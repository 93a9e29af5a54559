//! Pawn pushes, captures and en passant.

use chess_board::{Board, Color, MoveGrid, PieceKind, Position};

use super::{is_empty, is_there_opponent_piece};
use crate::{ChessPiece, MoveContext};

/// Returns the row a pawn of `color` must stand on to capture en passant.
fn en_passant_row(color: Color, rows: i32) -> i32 {
    match color {
        Color::White => 3,
        Color::Black => rows - 4,
    }
}

pub(super) fn generate(
    piece: &ChessPiece,
    from: Position,
    board: &Board<ChessPiece>,
    context: &MoveContext,
    moves: &mut MoveGrid,
) {
    let forward = piece.color().forward();

    let one = from.offset(forward, 0);
    if is_empty(board, one) {
        moves.mark(one);

        let two = from.offset(2 * forward, 0);
        if piece.move_count() == 0 && is_empty(board, two) {
            moves.mark(two);
        }
    }

    for side in [-1, 1] {
        let diagonal = from.offset(forward, side);
        if is_there_opponent_piece(piece, board, diagonal) {
            moves.mark(diagonal);
        }
    }

    if from.row() != en_passant_row(piece.color(), board.rows()) {
        return;
    }
    let Some(vulnerable) = context.en_passant_vulnerable else {
        return;
    };
    for side in [-1, 1] {
        let beside = from.offset(0, side);
        let capturable = board.get(beside).map_or(false, |other| {
            other.id() == vulnerable
                && other.kind() == PieceKind::Pawn
                && other.color() != piece.color()
        });
        if capturable {
            moves.mark(beside.offset(forward, 0));
        }
    }
}

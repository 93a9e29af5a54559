//! Ray-scanning pieces: bishop, rook, queen.

use chess_board::{Board, MoveGrid, Position};

use super::is_there_opponent_piece;
use crate::ChessPiece;

pub const ROOK_DIRECTIONS: [(i32, i32); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

pub const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

pub const QUEEN_DIRECTIONS: [(i32, i32); 8] = [
    (-1, 0),
    (0, -1),
    (0, 1),
    (1, 0),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Walks each ray until the edge or the first piece, which is included when
/// it belongs to the opponent.
pub(super) fn generate(
    piece: &ChessPiece,
    from: Position,
    board: &Board<ChessPiece>,
    directions: &[(i32, i32)],
    moves: &mut MoveGrid,
) {
    for &(dr, dc) in directions {
        let mut cursor = from.offset(dr, dc);
        while board.position_exists(cursor) && board.get(cursor).is_none() {
            moves.mark(cursor);
            cursor.set_values(cursor.row() + dr, cursor.column() + dc);
        }
        if is_there_opponent_piece(piece, board, cursor) {
            moves.mark(cursor);
        }
    }
}

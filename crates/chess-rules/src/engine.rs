//! Match state and the move protocol.
//!
//! [`MatchEngine`] owns the board, the captured pieces and the match flags.
//! Every move runs as a transaction on the one board: apply, probe whether
//! the mover's king is attacked, and either commit or undo. Checkmate search
//! repeats the same apply/probe/undo cycle for every reply of the side in
//! check.

use chess_board::{
    AlgebraicError, AlgebraicPosition, Board, BoardError, Color, MoveGrid, PieceKind, Position,
};
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::config::{MatchConfig, PromotionPolicy};
use crate::movegen::{KINGSIDE_ROOK, QUEENSIDE_ROOK};
use crate::{ChessPiece, MoveContext, PieceId};

const BOARD_SIZE: i32 = 8;
const KING_COLUMN: i32 = 4;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Error type for match operations.
///
/// Rule violations leave the match exactly as it was before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Algebraic(#[from] AlgebraicError),

    #[error("there is no piece at {0}")]
    NoPieceAtSource(Position),

    #[error("the chosen piece is {piece}, but it is {to_move}'s turn")]
    NotYourTurn { piece: Color, to_move: Color },

    #[error("the piece at {0} has no possible moves")]
    NoPossibleMove(Position),

    #[error("the piece at {from} cannot move to {to}")]
    IllegalTarget { from: Position, to: Position },

    #[error("the move would leave your own king in check")]
    SelfCheck,

    #[error("there is no promotion to resolve")]
    NoPromotionPending,

    #[error("the pawn at {0} must be promoted before the next move")]
    PromotionPending(Position),

    /// Undo found the match in a state the move could not have produced.
    #[error("cannot undo the move at {0}: the match does not reflect it")]
    InconsistentUndo(Position),

    /// The match lost track of a king. Never raised under legal play.
    #[error("there is no {0} king on the board")]
    MissingKing(Color),
}

/// Coarse match status derived from the check flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    Ongoing,
    Check,
    CheckMate,
}

/// What [`MatchEngine::make_move`] took off the board, and from where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Capture {
    id: PieceId,
    square: Position,
}

/// A chess match.
///
/// A new match has `turn == 1`, White to move and no check. After a move
/// that mates, `check_mate` is set and `current_player` stays the side that
/// delivered it.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    board: Board<ChessPiece>,
    config: MatchConfig,
    turn: u32,
    current_player: Color,
    /// Whether the side about to move is in check.
    check: bool,
    check_mate: bool,
    en_passant_vulnerable: Option<PieceId>,
    /// Square of the pawn awaiting a promotion choice.
    promoted: Option<Position>,
    captured: Vec<ChessPiece>,
    next_id: u16,
}

impl MatchEngine {
    /// Creates a match with the standard starting position.
    pub fn new(config: MatchConfig) -> Result<Self, MatchError> {
        let mut game = Self::empty(config)?;
        game.initial_setup()?;
        Ok(game)
    }

    /// Creates a match from a custom placement.
    ///
    /// `check` and `check_mate` are evaluated for `current_player`. If that
    /// side is already mated, `current_player` is set to the winner, as it
    /// would be after the mating move.
    pub fn with_pieces<I>(
        config: MatchConfig,
        current_player: Color,
        placements: I,
    ) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = (AlgebraicPosition, PieceKind, Color)>,
    {
        let mut game = Self::empty(config)?;
        game.current_player = current_player;
        for (at, kind, color) in placements {
            game.place_new_piece(at, kind, color)?;
        }

        game.check = game.test_check(current_player)?;
        game.check_mate = game.check && !game.has_escape(current_player)?;
        if game.check_mate {
            game.current_player = current_player.opposite();
        }
        Ok(game)
    }

    fn empty(config: MatchConfig) -> Result<Self, MatchError> {
        Ok(MatchEngine {
            board: Board::new(BOARD_SIZE, BOARD_SIZE)?,
            config,
            turn: 1,
            current_player: Color::White,
            check: false,
            check_mate: false,
            en_passant_vulnerable: None,
            promoted: None,
            captured: Vec::new(),
            next_id: 0,
        })
    }

    fn initial_setup(&mut self) -> Result<(), MatchError> {
        for (column, kind) in ('a'..='h').zip(BACK_RANK) {
            self.place_new_piece(AlgebraicPosition::new(column, 1)?, kind, Color::White)?;
            self.place_new_piece(AlgebraicPosition::new(column, 2)?, PieceKind::Pawn, Color::White)?;
            self.place_new_piece(AlgebraicPosition::new(column, 7)?, PieceKind::Pawn, Color::Black)?;
            self.place_new_piece(AlgebraicPosition::new(column, 8)?, kind, Color::Black)?;
        }
        Ok(())
    }

    fn place_new_piece(
        &mut self,
        at: AlgebraicPosition,
        kind: PieceKind,
        color: Color,
    ) -> Result<(), MatchError> {
        let square = at.to_position();
        let mut piece = self.new_piece(kind, color);
        if !self.is_home_square(kind, color, square) {
            piece.increase_move_count();
        }
        self.board.place_piece(piece, square)?;
        Ok(())
    }

    /// Returns false for a pawn, king or rook away from its starting square.
    ///
    /// Such pieces count as having moved, so they can neither double-step nor
    /// castle. Move history never matters for the other kinds.
    fn is_home_square(&self, kind: PieceKind, color: Color, square: Position) -> bool {
        let back_row = self.promotion_row(color.opposite());
        match kind {
            PieceKind::Pawn => square.row() == back_row + color.forward(),
            PieceKind::King => square == Position::new(back_row, KING_COLUMN),
            PieceKind::Rook => {
                square == Position::new(back_row, KING_COLUMN + KINGSIDE_ROOK)
                    || square == Position::new(back_row, KING_COLUMN + QUEENSIDE_ROOK)
            }
            _ => true,
        }
    }

    fn new_piece(&mut self, kind: PieceKind, color: Color) -> ChessPiece {
        let id = PieceId::new(self.next_id);
        self.next_id += 1;
        ChessPiece::new(id, kind, color)
    }

    // ---- accessors ----

    /// Returns the settings this match was created with.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Returns the board with every live piece.
    pub fn board(&self) -> &Board<ChessPiece> {
        &self.board
    }

    /// Returns the board rows, rank 8 first.
    pub fn pieces(&self) -> Vec<Vec<Option<&ChessPiece>>> {
        self.board.grid()
    }

    /// Returns every piece captured so far, in capture order.
    pub fn captured_pieces(&self) -> &[ChessPiece] {
        &self.captured
    }

    /// Returns the ply counter, starting at 1.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Returns the side to move, or the winner once mated.
    pub fn current_player(&self) -> Color {
        self.current_player
    }

    /// Returns true if the side to move is in check.
    pub fn check(&self) -> bool {
        self.check
    }

    /// Returns true once a move has delivered checkmate.
    pub fn check_mate(&self) -> bool {
        self.check_mate
    }

    /// Returns the coarse status built from [`check`](Self::check) and
    /// [`check_mate`](Self::check_mate).
    pub fn state(&self) -> MatchState {
        match (self.check, self.check_mate) {
            (_, true) => MatchState::CheckMate,
            (true, false) => MatchState::Check,
            (false, false) => MatchState::Ongoing,
        }
    }

    /// Returns the pawn that may be captured en passant on this ply.
    pub fn en_passant_vulnerable(&self) -> Option<&ChessPiece> {
        let id = self.en_passant_vulnerable?;
        self.board.pieces().find(|p| p.id() == id)
    }

    /// Returns the pawn awaiting a promotion choice.
    pub fn promoted(&self) -> Option<&ChessPiece> {
        self.promoted.and_then(|square| self.board.get(square))
    }

    fn context(&self) -> MoveContext {
        MoveContext {
            en_passant_vulnerable: self.en_passant_vulnerable,
            in_check: self.check,
        }
    }

    // ---- move queries ----

    /// Returns the pseudo-legal destinations of the piece at `source`.
    ///
    /// Moves that would expose the mover's king are still flagged; use
    /// [`legal_moves`](Self::legal_moves) for the filtered grid.
    pub fn possible_moves(&self, source: AlgebraicPosition) -> Result<MoveGrid, MatchError> {
        let source = source.to_position();
        let piece = self.validate_source_position(source)?;
        Ok(piece.possible_moves(&self.board, &self.context()))
    }

    /// Returns the destinations of the piece at `source` that keep its king safe.
    pub fn legal_moves(&mut self, source: AlgebraicPosition) -> Result<MoveGrid, MatchError> {
        let source = source.to_position();
        let mut moves = self
            .validate_source_position(source)?
            .possible_moves(&self.board, &self.context());
        let targets: Vec<Position> = moves.positions().collect();
        for target in targets {
            if !self.is_safe_move(source, target)? {
                moves.unmark(target);
            }
        }
        Ok(moves)
    }

    /// Returns true if the side to move is not in check but has no legal move.
    pub fn is_stalemate(&mut self) -> Result<bool, MatchError> {
        if self.check || self.check_mate || self.promoted.is_some() {
            return Ok(false);
        }
        Ok(!self.has_escape(self.current_player)?)
    }

    // ---- move protocol ----

    /// Moves the piece at `source` to `target`, returning the captured piece.
    pub fn perform_move(
        &mut self,
        source: AlgebraicPosition,
        target: AlgebraicPosition,
    ) -> Result<Option<ChessPiece>, MatchError> {
        self.perform(source.to_position(), target.to_position())
    }

    pub(crate) fn perform(
        &mut self,
        source: Position,
        target: Position,
    ) -> Result<Option<ChessPiece>, MatchError> {
        if let Some(pending) = self.promoted {
            return Err(MatchError::PromotionPending(pending));
        }
        self.validate_source_position(source)?;
        self.validate_target_position(source, target)?;

        let mover = self.current_player;
        let capture = self.make_move(source, target)?;
        let exposed = match self.exposes_king(mover, source, target) {
            Ok(exposed) => exposed,
            Err(err) => {
                self.undo_move(source, target, capture)?;
                return Err(err);
            }
        };
        if exposed {
            self.undo_move(source, target, capture)?;
            debug!(%mover, from = %square_name(source), to = %square_name(target), "move rejected: self-check");
            return Err(MatchError::SelfCheck);
        }

        let (kind, id) = match self.board.get(target) {
            Some(moved) => (moved.kind(), moved.id()),
            None => return Err(MatchError::NoPieceAtSource(target)),
        };
        let captured = capture.and_then(|c| self.captured.iter().rev().find(|p| p.id() == c.id).cloned());
        debug!(
            %mover,
            turn = self.turn,
            from = %square_name(source),
            to = %square_name(target),
            captured = ?captured.as_ref().map(ChessPiece::kind),
            "move applied"
        );

        let double_step = kind == PieceKind::Pawn && (target.row() - source.row()).abs() == 2;
        self.en_passant_vulnerable = double_step.then_some(id);

        if kind == PieceKind::Pawn && target.row() == self.promotion_row(mover) {
            self.promoted = Some(target);
            match self.config.promotion {
                PromotionPolicy::Auto => {
                    self.promote(target, self.config.auto_promotion)?;
                    self.promoted = None;
                }
                PromotionPolicy::Manual => {
                    debug!(square = %square_name(target), "promotion pending");
                    return Ok(captured);
                }
            }
        }

        self.conclude_move()?;
        Ok(captured)
    }

    /// Resolves a pending promotion by replacing the pawn with `kind`.
    ///
    /// Kinds a pawn cannot become leave the pawn in place and the promotion
    /// pending; the pawn is returned unchanged.
    pub fn replace_promoted_piece(&mut self, kind: PieceKind) -> Result<&ChessPiece, MatchError> {
        let square = self.promoted.ok_or(MatchError::NoPromotionPending)?;
        if kind.is_promotion_target() {
            self.promote(square, kind)?;
            self.promoted = None;
            self.conclude_move()?;
        }
        self.board.get(square).ok_or(MatchError::NoPromotionPending)
    }

    /// Like [`replace_promoted_piece`](Self::replace_promoted_piece), taking a
    /// letter code (`"R"`, `"N"`, `"B"` or `"Q"`).
    pub fn replace_promoted_piece_code(&mut self, code: &str) -> Result<&ChessPiece, MatchError> {
        let kind = PieceKind::from_code(code).unwrap_or(PieceKind::Pawn);
        self.replace_promoted_piece(kind)
    }

    fn validate_source_position(&self, position: Position) -> Result<&ChessPiece, MatchError> {
        let piece = self
            .board
            .piece(position)?
            .ok_or(MatchError::NoPieceAtSource(position))?;
        if piece.color() != self.current_player {
            return Err(MatchError::NotYourTurn {
                piece: piece.color(),
                to_move: self.current_player,
            });
        }
        if !piece.is_there_any_possible_move(&self.board, &self.context()) {
            return Err(MatchError::NoPossibleMove(position));
        }
        Ok(piece)
    }

    fn validate_target_position(&self, source: Position, target: Position) -> Result<(), MatchError> {
        let piece = self
            .board
            .piece(source)?
            .ok_or(MatchError::NoPieceAtSource(source))?;
        if !piece.possible_move(&self.board, &self.context(), target) {
            return Err(MatchError::IllegalTarget {
                from: source,
                to: target,
            });
        }
        Ok(())
    }

    /// Evaluates the opponent's check and mate status, then hands over the turn.
    fn conclude_move(&mut self) -> Result<(), MatchError> {
        let opponent = self.current_player.opposite();
        self.check = self.test_check(opponent)?;
        self.check_mate = self.check && !self.has_escape(opponent)?;
        if self.check_mate {
            info!(winner = %self.current_player, turn = self.turn, "checkmate");
        } else {
            self.next_turn();
        }
        Ok(())
    }

    fn next_turn(&mut self) {
        self.turn += 1;
        self.current_player = self.current_player.opposite();
    }

    fn promotion_row(&self, color: Color) -> i32 {
        match color {
            Color::White => 0,
            Color::Black => self.board.rows() - 1,
        }
    }

    fn promote(&mut self, square: Position, kind: PieceKind) -> Result<(), MatchError> {
        let pawn = self
            .board
            .remove_piece(square)?
            .ok_or(MatchError::NoPromotionPending)?;
        let replacement = self.new_piece(kind, pawn.color());
        debug!(square = %square_name(square), to = %kind, "pawn promoted");
        self.board.place_piece(replacement, square)?;
        Ok(())
    }

    // ---- apply / undo ----

    /// Applies a move without judging it. The returned capture feeds
    /// [`undo_move`](Self::undo_move).
    pub(crate) fn make_move(
        &mut self,
        source: Position,
        target: Position,
    ) -> Result<Option<Capture>, MatchError> {
        let mut piece = self
            .board
            .remove_piece(source)?
            .ok_or(MatchError::NoPieceAtSource(source))?;
        piece.increase_move_count();
        let kind = piece.kind();

        let mut captured = self.board.remove_piece(target)?.map(|p| (p, target));
        self.board.place_piece(piece, target)?;

        let shift = target.column() - source.column();
        if kind == PieceKind::King && shift.abs() == 2 {
            let rook_offset = if shift > 0 { KINGSIDE_ROOK } else { QUEENSIDE_ROOK };
            self.shift_rook(source.offset(0, rook_offset), source.offset(0, shift.signum()), true)?;
        }

        if kind == PieceKind::Pawn && shift != 0 && captured.is_none() {
            let beside = Position::new(source.row(), target.column());
            captured = self.board.remove_piece(beside)?.map(|p| (p, beside));
        }

        Ok(captured.map(|(piece, square)| {
            let capture = Capture {
                id: piece.id(),
                square,
            };
            self.captured.push(piece);
            capture
        }))
    }

    /// Reverts [`make_move`](Self::make_move) exactly.
    pub(crate) fn undo_move(
        &mut self,
        source: Position,
        target: Position,
        capture: Option<Capture>,
    ) -> Result<(), MatchError> {
        let mut piece = self
            .board
            .remove_piece(target)?
            .ok_or(MatchError::NoPieceAtSource(target))?;
        piece
            .decrease_move_count()
            .ok_or(MatchError::InconsistentUndo(target))?;
        let kind = piece.kind();
        self.board.place_piece(piece, source)?;

        if let Some(capture) = capture {
            let index = self
                .captured
                .iter()
                .rposition(|p| p.id() == capture.id)
                .ok_or(MatchError::InconsistentUndo(capture.square))?;
            let restored = self.captured.remove(index);
            self.board.place_piece(restored, capture.square)?;
        }

        let shift = target.column() - source.column();
        if kind == PieceKind::King && shift.abs() == 2 {
            let rook_offset = if shift > 0 { KINGSIDE_ROOK } else { QUEENSIDE_ROOK };
            self.shift_rook(source.offset(0, shift.signum()), source.offset(0, rook_offset), false)?;
        }
        Ok(())
    }

    fn shift_rook(&mut self, from: Position, to: Position, forward: bool) -> Result<(), MatchError> {
        if let Some(mut rook) = self.board.remove_piece(from)? {
            if forward {
                rook.increase_move_count();
            } else {
                rook.decrease_move_count().ok_or(MatchError::InconsistentUndo(from))?;
            }
            self.board.place_piece(rook, to)?;
        }
        Ok(())
    }

    /// Applies, probes and undoes a move; true if the mover's king stays safe.
    fn is_safe_move(&mut self, source: Position, target: Position) -> Result<bool, MatchError> {
        let color = self
            .board
            .get(source)
            .map(ChessPiece::color)
            .ok_or(MatchError::NoPieceAtSource(source))?;
        let capture = self.make_move(source, target)?;
        let exposed = self.exposes_king(color, source, target);
        self.undo_move(source, target, capture)?;
        Ok(!exposed?)
    }

    /// Checks an already applied move: is `color`'s king attacked, or did a
    /// castling king pass through an attacked square?
    fn exposes_king(&self, color: Color, source: Position, target: Position) -> Result<bool, MatchError> {
        if self.test_check(color)? {
            return Ok(true);
        }
        let castled = self
            .board
            .get(target)
            .map_or(false, |p| p.kind() == PieceKind::King)
            && (target.column() - source.column()).abs() == 2;
        if castled {
            let transit = Position::new(source.row(), (source.column() + target.column()) / 2);
            return Ok(self.is_attacked(transit, color.opposite()));
        }
        Ok(false)
    }

    /// Returns true if some legal move takes `color` out of (or keeps it out of) check.
    fn has_escape(&mut self, color: Color) -> Result<bool, MatchError> {
        let context = self.context();
        let candidates: Vec<(Position, Vec<Position>)> = self
            .board
            .pieces()
            .filter(|p| p.color() == color)
            .filter_map(|p| {
                let from = p.position()?;
                Some((from, p.possible_moves(&self.board, &context).positions().collect()))
            })
            .collect();

        for (from, targets) in candidates {
            for to in targets {
                trace!(from = %square_name(from), to = %square_name(to), "probing reply");
                if self.is_safe_move(from, to)? {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    // ---- attack detection ----

    fn king(&self, color: Color) -> Result<&ChessPiece, MatchError> {
        self.board
            .pieces()
            .find(|p| p.kind() == PieceKind::King && p.color() == color)
            .ok_or(MatchError::MissingKing(color))
    }

    /// Returns true if `color`'s king is attacked.
    pub(crate) fn test_check(&self, color: Color) -> Result<bool, MatchError> {
        let king = self
            .king(color)?
            .position()
            .ok_or(MatchError::MissingKing(color))?;
        Ok(self.is_attacked(king, color.opposite()))
    }

    fn is_attacked(&self, square: Position, by: Color) -> bool {
        let context = self.context();
        self.board
            .pieces()
            .filter(|p| p.color() == by)
            .any(|p| p.possible_move(&self.board, &context, square))
    }
}

fn square_name(position: Position) -> String {
    AlgebraicPosition::from_position(position)
        .map(|a| a.to_string())
        .unwrap_or_else(|_| position.to_string())
}

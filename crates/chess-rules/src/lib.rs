//! Chess rules engine.
//!
//! This crate provides:
//! - [`ChessPiece`] - a piece on (or captured from) the board, with its move counter
//! - Per-kind pseudo-legal move generation in [`movegen`]
//! - [`MatchEngine`] - the match state machine: turn, check, checkmate,
//!   en passant and promotion
//! - [`MatchConfig`] - TOML-loadable match settings
//!
//! # Move protocol
//!
//! A move is applied to the single board in place, then probed for
//! self-check and undone if it exposes the mover's king. Checkmate search
//! uses the same apply/undo transaction for every candidate reply, so the
//! board is never copied.
//!
//! # Example
//!
//! ```
//! use chess_rules::{MatchConfig, MatchEngine};
//!
//! let mut game = MatchEngine::new(MatchConfig::default()).unwrap();
//! game.perform_move("e2".parse().unwrap(), "e4".parse().unwrap()).unwrap();
//! game.perform_move("e7".parse().unwrap(), "e5".parse().unwrap()).unwrap();
//! assert_eq!(game.turn(), 3);
//! ```

mod config;
mod engine;
pub mod movegen;
mod piece;

pub use chess_board::{
    AlgebraicError, AlgebraicPosition, Board, BoardError, Color, MoveGrid, PieceKind, Position,
};
pub use config::{ConfigError, MatchConfig, PromotionPolicy};
pub use engine::{MatchEngine, MatchError, MatchState};
pub use piece::{ChessPiece, MoveContext, PieceId};

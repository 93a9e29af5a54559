//! Board primitives for chess.
//!
//! This crate provides the rule-agnostic building blocks used by the rules
//! engine:
//! - [`Color`] and [`PieceKind`] for piece identity
//! - [`Position`] for zero-based grid coordinates
//! - [`AlgebraicPosition`] for the `a1`..`h8` notation
//! - [`Board`], a bounds-checked grid holding at most one piece per cell
//! - [`MoveGrid`], the boolean reachability grid produced by move generation

mod algebraic;
mod board;
mod color;
mod grid;
mod piece;
mod position;

pub use algebraic::{AlgebraicError, AlgebraicPosition};
pub use board::{Board, BoardError, Placeable};
pub use color::Color;
pub use grid::MoveGrid;
pub use piece::PieceKind;
pub use position::Position;

//! Algebraic coordinates (`a1`..`h8`).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::Position;

/// Errors that can occur when building an [`AlgebraicPosition`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlgebraicError {
    #[error("invalid position {column}{row}: valid values are from a1 to h8")]
    OutOfRange { column: char, row: i32 },

    #[error("invalid position '{0}': expected a column letter followed by a row number")]
    Malformed(String),
}

/// A square in human notation: column `'a'..='h'`, row `1..=8`.
///
/// Column `'a'` is array column 0 and row 8 is array row 0.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlgebraicPosition {
    column: char,
    row: u8,
}

impl AlgebraicPosition {
    /// Creates a position from a column letter and row number.
    pub fn new(column: char, row: u8) -> Result<Self, AlgebraicError> {
        let column = column.to_ascii_lowercase();
        if !('a'..='h').contains(&column) || !(1..=8).contains(&row) {
            return Err(AlgebraicError::OutOfRange {
                column,
                row: i32::from(row),
            });
        }
        Ok(AlgebraicPosition { column, row })
    }

    /// Returns the column letter, always lower-case.
    #[inline]
    pub const fn column(self) -> char {
        self.column
    }

    /// Returns the rank number, 1 to 8.
    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Converts to a zero-based grid position.
    pub fn to_position(self) -> Position {
        Position::new(
            8 - i32::from(self.row),
            self.column as i32 - 'a' as i32,
        )
    }

    /// Converts a grid position back to algebraic notation.
    pub fn from_position(position: Position) -> Result<Self, AlgebraicError> {
        let row = 8 - position.row();
        let column = u32::try_from('a' as i32 + position.column())
            .ok()
            .and_then(char::from_u32)
            .unwrap_or('?');
        match u8::try_from(row) {
            Ok(row) => Self::new(column, row),
            Err(_) => Err(AlgebraicError::OutOfRange { column, row }),
        }
    }
}

impl FromStr for AlgebraicPosition {
    type Err = AlgebraicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let column = chars
            .next()
            .filter(char::is_ascii_alphabetic)
            .ok_or_else(|| AlgebraicError::Malformed(s.to_string()))?;
        let row = chars
            .as_str()
            .parse::<u8>()
            .map_err(|_| AlgebraicError::Malformed(s.to_string()))?;
        Self::new(column, row)
    }
}

impl fmt::Debug for AlgebraicPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AlgebraicPosition({})", self)
    }
}

impl fmt::Display for AlgebraicPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

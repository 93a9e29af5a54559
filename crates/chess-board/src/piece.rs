//! Chess piece kinds.

use serde::{Deserialize, Serialize};

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// All piece kinds in order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Returns the single-letter code for this kind.
    pub const fn code(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Parses a single-letter code (`"R"`, `"n"`, ...).
    pub fn from_code(code: &str) -> Option<Self> {
        let mut chars = code.trim().chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.code() == c.to_ascii_uppercase())
    }

    /// Returns true if a pawn may be promoted to this kind.
    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes() {
        assert_eq!(PieceKind::Knight.code(), 'N');
        assert_eq!(PieceKind::King.code(), 'K');
    }

    #[test]
    fn from_code() {
        assert_eq!(PieceKind::from_code("R"), Some(PieceKind::Rook));
        assert_eq!(PieceKind::from_code("n"), Some(PieceKind::Knight));
        assert_eq!(PieceKind::from_code(" Q "), Some(PieceKind::Queen));
        assert_eq!(PieceKind::from_code("X"), None);
        assert_eq!(PieceKind::from_code("QQ"), None);
        assert_eq!(PieceKind::from_code(""), None);
    }

    #[test]
    fn promotion_targets() {
        assert!(!PieceKind::Pawn.is_promotion_target());
        assert!(PieceKind::Knight.is_promotion_target());
        assert!(PieceKind::Bishop.is_promotion_target());
        assert!(PieceKind::Rook.is_promotion_target());
        assert!(PieceKind::Queen.is_promotion_target());
        assert!(!PieceKind::King.is_promotion_target());
    }
}

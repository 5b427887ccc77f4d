//! Move representation.

use crate::{LayoutError, Piece, PieceKind, Square};
use std::fmt;
use std::str::FromStr;

/// A move from one square to another.
///
/// Special moves are not tagged: castling, en passant and promotion are
/// recognised from the position when the move is applied.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }

    /// Returns the coordinate notation for this move (e.g., "e2e4").
    pub fn to_uci(self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// Parses a move from coordinate notation.
    ///
    /// A trailing `q` is accepted since promotion is always to a queen.
    pub fn from_uci(s: &str) -> Option<Self> {
        let s = s.trim();
        match s.len() {
            4 => {}
            5 if s.ends_with(['q', 'Q']) => {}
            _ => return None,
        }
        let from = Square::from_algebraic(s.get(0..2)?)?;
        let to = Square::from_algebraic(s.get(2..4)?)?;
        Some(Move::new(from, to))
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl FromStr for Move {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::from_uci(s).ok_or_else(|| LayoutError::InvalidMove(s.to_string()))
    }
}

/// The most recently committed move, kept for the en passant window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LastMove {
    /// The piece as it stood before moving.
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
}

impl LastMove {
    /// Returns true if this was a pawn advancing two ranks.
    #[inline]
    pub fn is_double_pawn_push(&self) -> bool {
        self.piece.kind == PieceKind::Pawn && self.from.rank().abs_diff(self.to.rank()) == 2
    }

    /// Returns the move without the piece.
    #[inline]
    pub const fn as_move(&self) -> Move {
        Move::new(self.from, self.to)
    }
}

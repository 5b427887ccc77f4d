//! Chess piece representation.

use crate::{Color, Square};
use std::fmt;

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// Returns the material value of this kind.
    ///
    /// The king has no material value and is excluded from scoring.
    #[inline]
    pub const fn value(self) -> Option<i32> {
        match self {
            PieceKind::Pawn => Some(1),
            PieceKind::Knight | PieceKind::Bishop => Some(3),
            PieceKind::Rook => Some(5),
            PieceKind::Queen => Some(9),
            PieceKind::King => None,
        }
    }

    /// Returns true for the kinds whose first move matters for castling.
    #[inline]
    pub const fn tracks_moved(self) -> bool {
        matches!(self, PieceKind::Rook | PieceKind::King)
    }

    /// Returns the lowercase layout letter for this kind.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
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

/// A piece standing on the board: its kind, its color, and whether it has
/// moved since the game started.
///
/// Only rooks and kings ever record a move; for every other kind `has_moved`
/// stays false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    has_moved: bool,
}

impl Piece {
    /// Creates a piece that has not moved yet.
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece {
            kind,
            color,
            has_moved: false,
        }
    }

    /// Returns true if this rook or king has moved since the game started.
    #[inline]
    pub const fn has_moved(self) -> bool {
        self.has_moved
    }

    /// Records that the piece has moved. No-op for kinds other than rook and king.
    #[inline]
    pub fn mark_moved(&mut self) {
        if self.kind.tracks_moved() {
            self.has_moved = true;
        }
    }

    /// Returns true if this is a pawn and `to` lies on its promotion rank.
    #[inline]
    pub const fn is_promotion(self, to: Square) -> bool {
        matches!(self.kind, PieceKind::Pawn) && to.rank() == self.color.promotion_rank()
    }

    /// Returns the layout letter for this piece (uppercase for White).
    pub const fn to_char(self) -> char {
        let c = self.kind.letter();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses a layout letter into an unmoved piece.
    pub const fn from_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some(Piece::new(kind, color))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}

//! Board-layout descriptor parsing and serialization.
//!
//! A descriptor lists the eight ranks from rank 8 down to rank 1, separated
//! by `/`. Each rank is a run of piece letters (`pnbrqk`, uppercase for
//! White) and digits counting consecutive empty squares, for example
//! `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`.

use crate::{Piece, Square};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing layout descriptors and notation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("invalid layout: expected 8 ranks, got {0}")]
    RankCount(usize),

    #[error("invalid layout: unexpected character '{ch}' in rank {rank}")]
    InvalidCharacter { ch: char, rank: u8 },

    #[error("invalid layout: rank {rank} has {squares} squares, expected 8")]
    RankLength { rank: u8, squares: u32 },

    #[error("invalid side to move: expected 'w' or 'b', got '{0}'")]
    InvalidSideToMove(String),

    #[error("invalid square: {0}")]
    InvalidSquare(String),

    #[error("invalid move: {0}")]
    InvalidMove(String),
}

/// Occupancy of all 64 squares, indexed by [`Square::index`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    squares: [Option<Piece>; Square::COUNT],
}

impl Layout {
    /// Placement of the standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    /// Creates a layout with every square empty.
    pub const fn empty() -> Self {
        Layout {
            squares: [None; Square::COUNT],
        }
    }

    /// Parses a placement descriptor. Every piece starts out unmoved.
    pub fn parse(descriptor: &str) -> Result<Self, LayoutError> {
        let ranks: Vec<&str> = descriptor.split('/').collect();
        if ranks.len() != 8 {
            return Err(LayoutError::RankCount(ranks.len()));
        }

        let mut layout = Layout::empty();
        for (i, text) in ranks.iter().enumerate() {
            let rank = 7 - i as u8;
            let label = rank + 1;
            let mut file = 0u32;

            for ch in text.chars() {
                if let Some(run @ 1..=8) = ch.to_digit(10) {
                    file += run;
                } else if let Some(piece) = Piece::from_char(ch) {
                    if let Some(sq) = Square::at(file as u8, rank) {
                        layout.squares[sq.index()] = Some(piece);
                    }
                    file += 1;
                } else {
                    return Err(LayoutError::InvalidCharacter { ch, rank: label });
                }
                if file > 8 {
                    return Err(LayoutError::RankLength {
                        rank: label,
                        squares: file,
                    });
                }
            }

            if file != 8 {
                return Err(LayoutError::RankLength {
                    rank: label,
                    squares: file,
                });
            }
        }

        Ok(layout)
    }

    /// Returns the occupant of a square.
    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Consumes the layout, returning the raw squares.
    pub fn into_squares(self) -> [Option<Piece>; Square::COUNT] {
        self.squares
    }

    /// Builds a layout from raw squares.
    pub fn from_squares(squares: [Option<Piece>; Square::COUNT]) -> Self {
        Layout { squares }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromStr for Layout {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Layout::parse(s)
    }
}

impl fmt::Display for Layout {
    /// Writes the placement descriptor, rank 8 first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                let piece = Square::at(file, rank).and_then(|sq| self.get(sq));
                match piece {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{}", empty)?;
                            empty = 0;
                        }
                        write!(f, "{}", piece.to_char())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{}", empty)?;
            }
            if rank > 0 {
                write!(f, "/")?;
            }
        }
        Ok(())
    }
}

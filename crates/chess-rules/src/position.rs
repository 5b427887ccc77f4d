//! Chess position representation.

use std::fmt;
use std::str::FromStr;

use chess_core::{Color, LastMove, Layout, LayoutError, Piece, PieceKind, Square};

use crate::movegen::en_passant_victim;

/// Board occupancy plus the state the rules need: side to move and the
/// previous move (for the en passant window).
///
/// Each square owns at most one [`Piece`]; castling eligibility lives in the
/// pieces' own has-moved flags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) board: [Option<Piece>; Square::COUNT],
    pub(crate) side_to_move: Color,
    pub(crate) last_move: Option<LastMove>,
}

/// Everything needed to take back a simulated move.
///
/// Holds the exact pieces that were lifted off the board, moved-flags
/// included, so [`Position::undo`] restores them as they were.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a simulated move must be undone"]
pub struct Undo {
    from: Square,
    to: Square,
    piece: Piece,
    captured: Option<(Square, Piece)>,
}

impl Undo {
    /// Returns the piece removed by the simulated move and where it stood.
    pub fn captured(&self) -> Option<(Square, Piece)> {
        self.captured
    }
}

impl Position {
    /// Creates a position from a placement descriptor and the side to move.
    pub fn new(placement: &str, side_to_move: Color) -> Result<Self, LayoutError> {
        let layout = Layout::parse(placement)?;
        Ok(Self::from_layout(layout, side_to_move))
    }

    /// Creates a position from an already parsed layout.
    pub fn from_layout(layout: Layout, side_to_move: Color) -> Self {
        Position {
            board: layout.into_squares(),
            side_to_move,
            last_move: None,
        }
    }

    /// Creates an empty board with White to move.
    pub fn empty() -> Self {
        Self::from_layout(Layout::empty(), Color::White)
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        match Layout::parse(Layout::STARTPOS) {
            Ok(layout) => Self::from_layout(layout, Color::White),
            Err(_) => unreachable!("STARTPOS is a valid layout"),
        }
    }

    /// Renders the occupancy back into a placement descriptor.
    pub fn to_layout(&self) -> String {
        Layout::from_squares(self.board).to_string()
    }

    /// Returns the piece on the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index()]
    }

    /// Places a piece on (or clears) a square, returning the previous occupant.
    ///
    /// Meant for setting up positions; it does not touch the side to move or
    /// the last move.
    pub fn put(&mut self, sq: Square, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.board[sq.index()], piece)
    }

    /// Returns the side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns the most recently committed move.
    #[inline]
    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    /// Iterates over all occupied squares from a1 to h8.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Returns the square of the given color's king.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.kind == PieceKind::King && p.color == color)
            .map(|(sq, _)| sq)
    }

    /// Moves the piece on `from` to `to` without committing anything.
    ///
    /// Captures (including an en passant victim) are lifted off the board and
    /// kept in the returned [`Undo`]. Side to move, last move and moved-flags
    /// are left alone. Returns `None` if `from` is empty.
    pub fn simulate(&mut self, from: Square, to: Square) -> Option<Undo> {
        let piece = self.piece_at(from)?;
        let captured = match en_passant_victim(self, piece, from, to) {
            Some(victim) => self.put(victim, None).map(|p| (victim, p)),
            None => self.put(to, None).map(|p| (to, p)),
        };
        self.put(from, None);
        self.put(to, Some(piece));
        Some(Undo {
            from,
            to,
            piece,
            captured,
        })
    }

    /// Takes back a simulated move.
    pub fn undo(&mut self, undo: Undo) {
        self.put(undo.to, None);
        self.put(undo.from, Some(undo.piece));
        if let Some((sq, piece)) = undo.captured {
            self.put(sq, Some(piece));
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl FromStr for Position {
    type Err = LayoutError;

    /// Parses `"<placement> [w|b]"`. The side defaults to White; any further
    /// FEN fields are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_whitespace();
        let placement = fields.next().unwrap_or_default();
        let side = match fields.next() {
            None => Color::White,
            Some(field) => {
                let mut chars = field.chars();
                match (chars.next().and_then(Color::from_char), chars.next()) {
                    (Some(color), None) => color,
                    _ => return Err(LayoutError::InvalidSideToMove(field.to_string())),
                }
            }
        };
        Position::new(placement, side)
    }
}

impl fmt::Display for Position {
    /// Writes the placement descriptor followed by the side-to-move letter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.to_layout(), self.side_to_move.to_char())
    }
}

//! Committing moves to a position.

use std::fmt;

use chess_core::{LastMove, Move, Piece, PieceKind, Square};
use tracing::{debug, warn};

use crate::movegen::{castling_rook_squares, en_passant_victim};
use crate::{Position, RulesError};

/// How a committed move was carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// A move to an empty square.
    Normal,
    /// A capture on the destination square.
    Capture,
    /// A pawn capture of a pawn that just advanced two squares.
    EnPassant,
    /// King and rook on the king's side.
    CastleKingside,
    /// King and rook on the queen's side.
    CastleQueenside,
    /// A pawn reaching the far rank and becoming a queen.
    Promotion,
}

impl MoveKind {
    /// Returns true if a piece was taken off the board.
    pub fn is_capture(self) -> bool {
        matches!(self, MoveKind::Capture | MoveKind::EnPassant)
    }
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveKind::Normal => "move",
            MoveKind::Capture => "capture",
            MoveKind::EnPassant => "en passant",
            MoveKind::CastleKingside => "kingside castling",
            MoveKind::CastleQueenside => "queenside castling",
            MoveKind::Promotion => "promotion",
        };
        write!(f, "{}", name)
    }
}

impl Position {
    /// Plays `from` to `to` for the side to move.
    ///
    /// The move is checked against [`Position::legal_destinations`] first;
    /// on any error the position is left unchanged.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<MoveKind, RulesError> {
        let piece = self.piece_at(from).ok_or(RulesError::EmptySquare(from))?;
        if piece.color != self.side_to_move {
            warn!(%from, %to, "move by the side not on turn");
            return Err(RulesError::WrongSide {
                expected: self.side_to_move,
                found: piece.color,
            });
        }
        if !self.legal_destinations(from)?.contains(to) {
            warn!(%from, %to, "illegal move rejected");
            return Err(RulesError::IllegalMove(Move::new(from, to)));
        }
        Ok(self.commit(piece, from, to))
    }

    /// Commits a move already known to be legal.
    pub(crate) fn commit(&mut self, piece: Piece, from: Square, to: Square) -> MoveKind {
        let mut kind = if self.piece_at(to).is_some() {
            MoveKind::Capture
        } else {
            MoveKind::Normal
        };

        if let Some(victim) = en_passant_victim(self, piece, from, to) {
            self.put(victim, None);
            kind = MoveKind::EnPassant;
        }

        self.put(from, None);
        let mut placed = if piece.is_promotion(to) {
            kind = MoveKind::Promotion;
            Piece::new(PieceKind::Queen, piece.color)
        } else {
            piece
        };
        placed.mark_moved();
        self.put(to, Some(placed));

        if piece.kind == PieceKind::King {
            if let Some((rook_from, rook_to)) = castling_rook_squares(from, to) {
                if let Some(mut rook) = self.put(rook_from, None) {
                    rook.mark_moved();
                    self.put(rook_to, Some(rook));
                }
                kind = if to.file() > from.file() {
                    MoveKind::CastleKingside
                } else {
                    MoveKind::CastleQueenside
                };
            }
        }

        self.last_move = Some(LastMove { piece, from, to });
        self.side_to_move = self.side_to_move.opposite();

        debug!(%piece, %from, %to, %kind, "move committed");
        kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Color;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn pawn_push_flips_side_and_records_move() {
        let mut position = Position::startpos();
        let kind = position.apply_move(sq("e2"), sq("e4")).unwrap();
        assert_eq!(kind, MoveKind::Normal);
        assert_eq!(position.side_to_move(), Color::Black);
        assert_eq!(position.piece_at(sq("e2")), None);
        assert_eq!(
            position.piece_at(sq("e4")),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );

        let last = position.last_move().unwrap();
        assert_eq!(last.as_move(), Move::new(sq("e2"), sq("e4")));
        assert!(last.is_double_pawn_push());
        assert_eq!(
            position.to_layout(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR"
        );
    }

    #[test]
    fn rejected_moves_leave_position_unchanged() {
        let mut position = Position::startpos();
        let before = position.clone();

        assert_eq!(
            position.apply_move(sq("e2"), sq("e5")),
            Err(RulesError::IllegalMove(Move::new(sq("e2"), sq("e5"))))
        );
        assert_eq!(
            position.apply_move(sq("e7"), sq("e5")),
            Err(RulesError::WrongSide {
                expected: Color::White,
                found: Color::Black
            })
        );
        assert_eq!(
            position.apply_move(sq("e4"), sq("e5")),
            Err(RulesError::EmptySquare(sq("e4")))
        );
        assert_eq!(position, before);
    }

    #[test]
    fn capture_is_reported() {
        let mut position =
            Position::new("4k3/8/8/3p4/4P3/8/8/4K3", Color::White).unwrap();
        let kind = position.apply_move(sq("e4"), sq("d5")).unwrap();
        assert_eq!(kind, MoveKind::Capture);
        assert!(kind.is_capture());
        assert_eq!(position.to_layout(), "4k3/8/8/3P4/8/8/8/4K3");
    }

    #[test]
    fn king_move_marks_king_as_moved() {
        let mut position = Position::new("4k3/8/8/8/8/8/8/R3K2R", Color::White).unwrap();
        position.apply_move(Square::E1, Square::F1).unwrap();
        assert!(position.piece_at(Square::F1).unwrap().has_moved());
        position.apply_move(Square::E8, sq("e7")).unwrap();
        position.apply_move(Square::F1, Square::E1).unwrap();
        position.apply_move(sq("e7"), Square::E8).unwrap();

        let dests = position.legal_destinations(Square::E1).unwrap();
        assert!(!dests.contains(Square::G1));
        assert!(!dests.contains(Square::C1));
    }

    #[test]
    fn rook_move_only_spoils_its_own_side() {
        let mut position = Position::new("4k3/8/8/8/8/8/8/R3K2R", Color::White).unwrap();
        position.apply_move(Square::H1, sq("h2")).unwrap();
        position.apply_move(Square::E8, Square::D8).unwrap();
        position.apply_move(sq("h2"), Square::H1).unwrap();
        position.apply_move(Square::D8, Square::E8).unwrap();

        let dests = position.legal_destinations(Square::E1).unwrap();
        assert!(!dests.contains(Square::G1));
        assert!(dests.contains(Square::C1));
    }

    #[test]
    fn queenside_castling_moves_the_rook() {
        let mut position = Position::new("r3k3/8/8/8/8/8/8/4K3", Color::Black).unwrap();
        let kind = position.apply_move(Square::E8, Square::C8).unwrap();
        assert_eq!(kind, MoveKind::CastleQueenside);
        assert_eq!(position.to_layout(), "2kr4/8/8/8/8/8/8/4K3");
        assert!(position.piece_at(Square::D8).unwrap().has_moved());
        assert!(position.piece_at(Square::C8).unwrap().has_moved());
    }

    #[test]
    fn promotion_to_queen() {
        let mut position = Position::new("k7/7P/8/8/8/8/8/K7", Color::White).unwrap();
        assert!(position.is_pawn_promotion(sq("h7"), Square::H8));
        let kind = position.apply_move(sq("h7"), Square::H8).unwrap();
        assert_eq!(kind, MoveKind::Promotion);
        assert_eq!(
            position.piece_at(Square::H8),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );
        assert_eq!(
            position.last_move().map(|m| m.piece.kind),
            Some(PieceKind::Pawn)
        );
    }

    #[test]
    fn move_kind_display() {
        assert_eq!(MoveKind::EnPassant.to_string(), "en passant");
        assert_eq!(MoveKind::CastleKingside.to_string(), "kingside castling");
        assert!(!MoveKind::Promotion.is_capture());
    }
}

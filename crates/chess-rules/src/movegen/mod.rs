//! Legal move generation.
//!
//! Candidates come from the pseudo-legal predicates in [`attacks`]; each one
//! is simulated on a scratch copy of the position and kept only if the
//! mover's king is safe afterwards. Castling and en passant fall out of the
//! same scan: the king predicate already checks castling eligibility, and
//! simulating an en passant capture lifts the victim pawn before the safety
//! test.

mod attacks;
pub mod perft;

use chess_core::{Move, Piece, PieceKind, Square};
use tracing::trace;

use crate::{Position, RulesError, SquareSet};

pub use attacks::{
    attacks, castling_allowed, castling_rook_squares, en_passant_victim, is_attacked_by,
    is_pseudo_legal,
};

impl Position {
    /// Returns every square the piece on `from` may legally move to.
    ///
    /// Works for either color, regardless of the side to move.
    pub fn legal_destinations(&self, from: Square) -> Result<SquareSet, RulesError> {
        let piece = self.piece_at(from).ok_or(RulesError::EmptySquare(from))?;
        let mut scratch = self.clone();
        let mut legal = SquareSet::EMPTY;

        for to in Square::all() {
            if !is_pseudo_legal(&scratch, piece, from, to) {
                continue;
            }
            if scratch.keeps_king_safe(piece, from, to)? {
                legal.insert(to);
            }
        }

        trace!(%from, %piece, count = legal.len(), "legal destinations");
        Ok(legal)
    }

    /// Returns all legal moves for the side to move.
    pub fn legal_moves(&self) -> Result<Vec<Move>, RulesError> {
        let mut moves = Vec::new();
        for (from, piece) in self.pieces() {
            if piece.color != self.side_to_move {
                continue;
            }
            moves.extend(
                self.legal_destinations(from)?
                    .iter()
                    .map(|to| Move::new(from, to)),
            );
        }
        Ok(moves)
    }

    /// Returns true if moving the piece on `from` to `to` would promote it.
    pub fn is_pawn_promotion(&self, from: Square, to: Square) -> bool {
        self.piece_at(from).is_some_and(|p| p.is_promotion(to))
    }

    /// Simulates `from` to `to` and reports whether the mover's king is left
    /// unattacked. The position is restored before returning.
    ///
    /// A moving king is tested directly on its destination square; any other
    /// piece asks the check oracle about its own king.
    fn keeps_king_safe(
        &mut self,
        piece: Piece,
        from: Square,
        to: Square,
    ) -> Result<bool, RulesError> {
        let Some(undo) = self.simulate(from, to) else {
            return Err(RulesError::EmptySquare(from));
        };
        let safe = if piece.kind == PieceKind::King {
            Ok(!is_attacked_by(self, to, piece.color.opposite()))
        } else {
            self.is_in_check(piece.color).map(|check| !check)
        };
        self.undo(undo);
        safe
    }
}

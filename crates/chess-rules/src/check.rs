//! Check and checkmate detection.

use chess_core::{Color, Square};
use tracing::debug;

use crate::movegen::{is_attacked_by, is_pseudo_legal};
use crate::{Position, RulesError};

impl Position {
    /// Returns true if any piece of color `by` attacks `sq`.
    #[inline]
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        is_attacked_by(self, sq, by)
    }

    /// Returns true if `color`'s king is attacked.
    ///
    /// Fails with [`RulesError::MissingKing`] if that king is not on the board.
    pub fn is_in_check(&self, color: Color) -> Result<bool, RulesError> {
        let king = self
            .king_square(color)
            .ok_or(RulesError::MissingKing(color))?;
        Ok(is_attacked_by(self, king, color.opposite()))
    }

    /// Returns true if `color` is in check and no move gets it out.
    ///
    /// Every piece of `color` is tried against every square, each candidate
    /// simulated and undone on a scratch copy.
    pub fn is_checkmate(&self, color: Color) -> Result<bool, RulesError> {
        if !self.is_in_check(color)? {
            return Ok(false);
        }

        let mut scratch = self.clone();
        let defenders: Vec<_> = self.pieces().filter(|(_, p)| p.color == color).collect();
        for (from, piece) in defenders {
            for to in Square::all() {
                if !is_pseudo_legal(&scratch, piece, from, to) {
                    continue;
                }
                let Some(undo) = scratch.simulate(from, to) else {
                    continue;
                };
                let escaped = !scratch.is_in_check(color)?;
                scratch.undo(undo);
                if escaped {
                    return Ok(false);
                }
            }
        }

        debug!(%color, "checkmate");
        Ok(true)
    }
}

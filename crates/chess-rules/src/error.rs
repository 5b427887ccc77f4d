//! Error types for the rules engine.

use chess_core::{Color, LayoutError, Move, Square};
use thiserror::Error;

/// Errors raised by position queries and move application.
///
/// All of these point at a caller or input mistake; none are transient.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RulesError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("it is {expected}'s turn, not {found}'s")]
    WrongSide { expected: Color, found: Color },

    #[error("illegal move: {0}")]
    IllegalMove(Move),

    #[error("position has no {0} king")]
    MissingKing(Color),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RulesError::EmptySquare(Square::E1);
        assert_eq!(err.to_string(), "no piece on e1");

        let err = RulesError::WrongSide {
            expected: Color::White,
            found: Color::Black,
        };
        assert_eq!(err.to_string(), "it is White's turn, not Black's");

        let err = RulesError::IllegalMove(Move::new(Square::E1, Square::E8));
        assert_eq!(err.to_string(), "illegal move: e1e8");

        let err = RulesError::MissingKing(Color::Black);
        assert_eq!(err.to_string(), "position has no Black king");
    }

    #[test]
    fn layout_errors_convert() {
        let err: RulesError = LayoutError::RankCount(2).into();
        assert_eq!(err.to_string(), LayoutError::RankCount(2).to_string());
    }
}

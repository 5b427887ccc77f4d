//! Game management with history tracking.
//!
//! [`Game`] wraps a [`Position`] for a front end: it keeps the moves played
//! so far, notices when the side to move has been checkmated, and refuses
//! further moves afterwards.

use chess_core::{Color, LastMove, Move, Square};
use thiserror::Error;
use tracing::info;

use crate::{MoveKind, Position, RulesError, SquareSet};

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
}

/// Error type for game operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("game has already ended")]
    GameOver,

    #[error("invalid move notation: {0}")]
    InvalidNotation(String),

    #[error(transparent)]
    Rules(#[from] RulesError),
}

/// A game in progress, with its move history.
#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    start: Position,
    history: Vec<LastMove>,
    outcome: Option<Outcome>,
}

impl Game {
    /// Creates a new game from the standard starting position.
    pub fn new() -> Self {
        let position = Position::startpos();
        Game {
            start: position.clone(),
            position,
            history: Vec::new(),
            outcome: None,
        }
    }

    /// Creates a game from a custom starting position.
    ///
    /// Fails if either king is missing.
    pub fn from_position(position: Position) -> Result<Self, RulesError> {
        for color in Color::BOTH {
            position
                .king_square(color)
                .ok_or(RulesError::MissingKing(color))?;
        }
        let mut game = Game {
            start: position.clone(),
            position,
            history: Vec::new(),
            outcome: None,
        };
        game.check_outcome()?;
        Ok(game)
    }

    /// Returns the current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the position the game started from.
    pub fn start_position(&self) -> &Position {
        &self.start
    }

    /// Returns the moves played so far.
    pub fn history(&self) -> &[LastMove] {
        &self.history
    }

    /// Returns the outcome once the game has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Returns true if the game has ended.
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Returns the side to move.
    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> Result<bool, RulesError> {
        self.position.is_in_check(self.side_to_move())
    }

    /// Returns the legal destinations of a piece belonging to the side to move.
    pub fn destinations(&self, from: Square) -> Result<SquareSet, GameError> {
        let piece = self
            .position
            .piece_at(from)
            .ok_or(RulesError::EmptySquare(from))?;
        if piece.color != self.side_to_move() {
            return Err(RulesError::WrongSide {
                expected: self.side_to_move(),
                found: piece.color,
            }
            .into());
        }
        Ok(self.position.legal_destinations(from)?)
    }

    /// Plays a move for the side to move.
    pub fn make_move(&mut self, from: Square, to: Square) -> Result<MoveKind, GameError> {
        if self.outcome.is_some() {
            return Err(GameError::GameOver);
        }
        let kind = self.position.apply_move(from, to)?;
        if let Some(last) = self.position.last_move() {
            self.history.push(last);
        }
        self.check_outcome()?;
        Ok(kind)
    }

    /// Plays a move given in coordinate notation (e.g., "e2e4").
    pub fn make_move_uci(&mut self, text: &str) -> Result<MoveKind, GameError> {
        let m = Move::from_uci(text)
            .ok_or_else(|| GameError::InvalidNotation(text.to_string()))?;
        self.make_move(m.from, m.to)
    }

    fn check_outcome(&mut self) -> Result<(), RulesError> {
        let side = self.side_to_move();
        if self.position.is_checkmate(side)? {
            let winner = side.opposite();
            info!(%winner, moves = self.history.len(), "game over by checkmate");
            self.outcome = Some(Outcome::Checkmate { winner });
        }
        Ok(())
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

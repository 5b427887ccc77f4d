//! Chess rules on a square-by-square board.
//!
//! This crate provides:
//! - [`Position`] - board occupancy, side to move and the last move
//! - Legal destination queries with full check-safety filtering,
//!   castling, en passant and promotion
//! - Check and checkmate detection
//! - Move application with rook relocation, en passant capture and
//!   promotion to a queen
//! - [`Game`] - move history and end-of-game tracking for front ends
//! - [`material_balance`] and [`perft`](movegen::perft::perft) helpers
//!
//! # Example
//!
//! ```
//! use chess_rules::Position;
//! use chess_core::Square;
//!
//! let mut position = Position::startpos();
//! let knight = Square::B1;
//! let dests = position.legal_destinations(knight).unwrap();
//! assert_eq!(dests.len(), 2);
//!
//! let to = dests.iter().next().unwrap();
//! position.apply_move(knight, to).unwrap();
//! assert!(!position.is_checkmate(position.side_to_move()).unwrap());
//! ```
//!
//! # Concurrency
//!
//! Queries take `&self` and simulate on a private copy, so a shared
//! `Position` may be queried from several threads. Committing a move needs
//! `&mut self`; hosts that share a position guard it with a single lock.

mod apply;
mod check;
mod error;
mod game;
mod material;
pub mod movegen;
mod position;
mod square_set;

pub use apply::MoveKind;
pub use error::RulesError;
pub use game::{Game, GameError, Outcome};
pub use material::material_balance;
pub use movegen::perft::{perft, perft_divide};
pub use position::{Position, Undo};
pub use square_set::{SquareSet, SquareSetIter};

//! Core types for chess.
//!
//! This crate provides the value types shared by the rules engine and its
//! front ends:
//! - [`Piece`], [`PieceKind`] and [`Color`] for piece representation
//! - [`Square`] for board coordinates
//! - [`Move`] and [`LastMove`] for move representation
//! - [`Layout`] for board-layout descriptor parsing and serialization

mod color;
mod layout;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use layout::{Layout, LayoutError};
pub use mov::{LastMove, Move};
pub use piece::{Piece, PieceKind};
pub use square::Square;

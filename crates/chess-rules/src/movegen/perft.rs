//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! Promotions are always to a queen, so counts only match the published
//! tables up to the first depth at which a pawn can promote.

use crate::{Position, RulesError};

/// Counts the number of leaf nodes at the given depth.
pub fn perft(position: &Position, depth: u32) -> Result<u64, RulesError> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = position.legal_moves()?;
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0u64;
    for m in moves {
        nodes += perft(&child(position, m.from, m.to)?, depth - 1)?;
    }
    Ok(nodes)
}

/// Perft with divide - node count below each root move, sorted by move.
pub fn perft_divide(position: &Position, depth: u32) -> Result<Vec<(String, u64)>, RulesError> {
    let mut results = Vec::new();
    for m in position.legal_moves()? {
        let nodes = if depth > 1 {
            perft(&child(position, m.from, m.to)?, depth - 1)?
        } else {
            1
        };
        results.push((m.to_uci(), nodes));
    }
    results.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(results)
}

fn child(
    position: &Position,
    from: chess_core::Square,
    to: chess_core::Square,
) -> Result<Position, RulesError> {
    let piece = position
        .piece_at(from)
        .ok_or(RulesError::EmptySquare(from))?;
    let mut next = position.clone();
    next.commit(piece, from, to);
    Ok(next)
}

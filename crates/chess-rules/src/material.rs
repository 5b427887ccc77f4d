//! Material counting.

use chess_core::Color;

use crate::Position;

/// Sums piece values for both sides: positive favours White.
///
/// Kings carry no material value and are skipped.
pub fn material_balance(position: &Position) -> i32 {
    position
        .pieces()
        .filter_map(|(_, piece)| {
            let value = piece.kind.value()?;
            Some(match piece.color {
                Color::White => value,
                Color::Black => -value,
            })
        })
        .sum()
}

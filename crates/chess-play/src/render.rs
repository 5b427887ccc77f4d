//! Text rendering of positions.

use chess_core::Square;
use chess_rules::{Position, SquareSet};

/// Draws the board with rank 8 at the top.
pub fn board(position: &Position) -> String {
    board_with_marks(position, SquareSet::EMPTY)
}

/// Draws the board, flagging marked squares: `*` for an empty destination
/// and `x` for a capture.
pub fn board_with_marks(position: &Position, marks: SquareSet) -> String {
    let mut out = String::new();
    for rank in (0..8u8).rev() {
        out.push((b'1' + rank) as char);
        out.push(' ');
        for file in 0..8u8 {
            let Some(sq) = Square::at(file, rank) else {
                continue;
            };
            let cell = match (position.piece_at(sq), marks.contains(sq)) {
                (None, false) => '.',
                (None, true) => '*',
                (Some(_), true) => 'x',
                (Some(piece), false) => piece.to_char(),
            };
            out.push(cell);
            out.push(' ');
        }
        out.pop();
        out.push('\n');
    }
    out.push_str("  a b c d e f g h");
    out
}

/// Lists squares in algebraic notation, separated by spaces.
pub fn square_list(squares: SquareSet) -> String {
    squares
        .iter()
        .map(|sq| sq.to_algebraic())
        .collect::<Vec<_>>()
        .join(" ")
}

//! Per-kind movement predicates.
//!
//! Two predicates live here. [`attacks`] answers "does this piece hit that
//! square": geometry and path only, with kings limited to their eight
//! neighbours and pawns to their forward diagonals. [`is_pseudo_legal`]
//! answers "may this piece move there, ignoring its own king's safety",
//! adding occupancy rules, pawn pushes, en passant and castling.
//!
//! Attack queries never evaluate the castling rule, so the castling check
//! (which asks whether squares are attacked) cannot recurse into itself.

use chess_core::{Color, Piece, PieceKind, Square};

use crate::Position;

#[inline]
fn deltas(from: Square, to: Square) -> (i8, i8) {
    (
        to.file() as i8 - from.file() as i8,
        to.rank() as i8 - from.rank() as i8,
    )
}

/// Returns true if every square strictly between `from` and `to` is empty.
///
/// The two squares must share a file, rank or diagonal.
fn path_clear(position: &Position, from: Square, to: Square) -> bool {
    let (df, dr) = deltas(from, to);
    let (step_f, step_r) = (df.signum(), dr.signum());
    let mut next = from.offset(step_f, step_r);
    while let Some(sq) = next {
        if sq == to {
            return true;
        }
        if position.piece_at(sq).is_some() {
            return false;
        }
        next = sq.offset(step_f, step_r);
    }
    false
}

/// Returns true if `piece` standing on `from` attacks `target`, whatever
/// occupies `target`.
pub fn attacks(position: &Position, piece: Piece, from: Square, target: Square) -> bool {
    if from == target {
        return false;
    }
    let (df, dr) = deltas(from, target);
    let straight = df == 0 || dr == 0;
    let diagonal = df.abs() == dr.abs();

    match piece.kind {
        PieceKind::Pawn => dr == piece.color.pawn_direction() && df.abs() == 1,
        PieceKind::Knight => matches!((df.abs(), dr.abs()), (1, 2) | (2, 1)),
        PieceKind::Bishop => diagonal && path_clear(position, from, target),
        PieceKind::Rook => straight && path_clear(position, from, target),
        PieceKind::Queen => (straight || diagonal) && path_clear(position, from, target),
        PieceKind::King => df.abs() <= 1 && dr.abs() <= 1,
    }
}

/// Returns true if any piece of color `by` attacks `target`.
pub fn is_attacked_by(position: &Position, target: Square, by: Color) -> bool {
    position
        .pieces()
        .any(|(sq, piece)| piece.color == by && attacks(position, piece, sq, target))
}

/// Returns true if `piece` on `from` may move to `to` by its movement rules.
///
/// Blind to whether the move leaves the mover's own king in check.
pub fn is_pseudo_legal(position: &Position, piece: Piece, from: Square, to: Square) -> bool {
    if from == to {
        return false;
    }
    let target = position.piece_at(to);
    if target.is_some_and(|t| t.color == piece.color) {
        return false;
    }

    match piece.kind {
        PieceKind::Pawn => pawn_may_move(position, piece, from, to, target.is_some()),
        PieceKind::King => {
            attacks(position, piece, from, to) || castling_allowed(position, piece, from, to)
        }
        _ => attacks(position, piece, from, to),
    }
}

fn pawn_may_move(
    position: &Position,
    pawn: Piece,
    from: Square,
    to: Square,
    occupied: bool,
) -> bool {
    let dir = pawn.color.pawn_direction();
    let (df, dr) = deltas(from, to);

    if df == 0 && dr == dir {
        return !occupied;
    }
    if df == 0 && dr == 2 * dir && from.rank() == pawn.color.pawn_rank() {
        let skipped = from.offset(0, dir);
        return !occupied && skipped.is_some_and(|sq| position.piece_at(sq).is_none());
    }
    if df.abs() == 1 && dr == dir {
        return occupied || en_passant_victim(position, pawn, from, to).is_some();
    }
    false
}

/// Returns the square of the pawn captured en passant if `pawn` moving
/// `from` to `to` is an en passant capture.
///
/// The previous move must have been an opposing pawn's two-square advance
/// that landed beside `from`, on the file the capturing pawn moves to.
pub fn en_passant_victim(
    position: &Position,
    pawn: Piece,
    from: Square,
    to: Square,
) -> Option<Square> {
    if pawn.kind != PieceKind::Pawn || position.piece_at(to).is_some() {
        return None;
    }
    let (df, dr) = deltas(from, to);
    if df.abs() != 1 || dr != pawn.color.pawn_direction() {
        return None;
    }

    let last = position.last_move()?;
    let victim = Square::at(to.file(), from.rank())?;
    let victim_is_pawn = position
        .piece_at(victim)
        .is_some_and(|p| p.kind == PieceKind::Pawn && p.color != pawn.color);

    (last.is_double_pawn_push()
        && last.piece.color != pawn.color
        && last.to == victim
        && victim_is_pawn)
        .then_some(victim)
}

/// Castling geometry for a king hop `from` to `to`: the rook's corner square
/// and the square it lands on. Checks shape only, not eligibility.
pub fn castling_rook_squares(from: Square, to: Square) -> Option<(Square, Square)> {
    let (df, dr) = deltas(from, to);
    if dr != 0 || df.abs() != 2 {
        return None;
    }
    let corner = if df > 0 { 7 } else { 0 };
    let rook_from = Square::at(corner, from.rank())?;
    let rook_to = from.offset(df.signum(), 0)?;
    Some((rook_from, rook_to))
}

/// Returns true if `king` on `from` may castle to `to`.
///
/// Requires an unmoved king on its back rank, an unmoved rook of the same
/// color in the corner, empty squares in between, a king not in check, and
/// no attacked square on the king's way (destination included).
pub fn castling_allowed(position: &Position, king: Piece, from: Square, to: Square) -> bool {
    if king.kind != PieceKind::King || king.has_moved() || from.rank() != king.color.back_rank() {
        return false;
    }
    let Some((rook_from, _)) = castling_rook_squares(from, to) else {
        return false;
    };
    let rook_ready = position.piece_at(rook_from).is_some_and(|rook| {
        rook.kind == PieceKind::Rook && rook.color == king.color && !rook.has_moved()
    });
    if !rook_ready || !path_clear(position, from, rook_from) {
        return false;
    }

    let enemy = king.color.opposite();
    if is_attacked_by(position, from, enemy) {
        return false;
    }
    let step = if to.file() > from.file() { 1 } else { -1 };
    let transit = [from.offset(step, 0), Some(to)];
    transit
        .into_iter()
        .flatten()
        .all(|sq| !is_attacked_by(position, sq, enemy))
}

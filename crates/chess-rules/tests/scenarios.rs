//! End-to-end rule scenarios: castling, en passant, promotion and mates,
//! played through the public API the way a front end would.

use chess_core::{Color, Piece, PieceKind, Square};
use chess_rules::{MoveKind, Position, RulesError};

fn sq(s: &str) -> Square {
    Square::from_algebraic(s).unwrap()
}

fn play(position: &mut Position, moves: &[&str]) {
    for m in moves {
        let (from, to) = m.split_at(2);
        position
            .apply_move(sq(from), sq(to))
            .unwrap_or_else(|e| panic!("{m}: {e}"));
    }
}

#[test]
fn startpos_knight_and_no_captures() {
    let position = Position::startpos();
    let dests = position.legal_destinations(Square::B1).unwrap();
    let squares: Vec<Square> = dests.iter().collect();
    assert_eq!(squares, vec![sq("a3"), sq("c3")]);

    let captures = position
        .legal_moves()
        .unwrap()
        .into_iter()
        .filter(|m| position.piece_at(m.to).is_some())
        .count();
    assert_eq!(captures, 0);
}

#[test]
fn castling_kingside_and_queenside() {
    let mut position =
        Position::new("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R", Color::White).unwrap();
    let dests = position.legal_destinations(Square::E1).unwrap();
    assert!(dests.contains(Square::G1));
    assert!(dests.contains(Square::C1));

    let kind = position.apply_move(Square::E1, Square::G1).unwrap();
    assert_eq!(kind, MoveKind::CastleKingside);
    assert_eq!(
        position.piece_at(Square::G1).map(|p| p.kind),
        Some(PieceKind::King)
    );
    assert_eq!(
        position.piece_at(Square::F1).map(|p| p.kind),
        Some(PieceKind::Rook)
    );
    assert_eq!(position.piece_at(Square::H1), None);
    assert_eq!(position.piece_at(Square::E1), None);
    assert_eq!(
        position.to_layout(),
        "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R4RK1"
    );
}

#[test]
fn en_passant_capture_removes_the_pawn() {
    let mut position = Position::startpos();
    play(&mut position, &["g1f3", "d7d5", "f3g1", "d5d4"]);
    play(&mut position, &["e2e4"]);

    let dests = position.legal_destinations(sq("d4")).unwrap();
    assert!(dests.contains(sq("e3")));
    assert!(dests.contains(sq("d3")));

    let kind = position.apply_move(sq("d4"), sq("e3")).unwrap();
    assert_eq!(kind, MoveKind::EnPassant);
    assert_eq!(position.piece_at(sq("e4")), None);
    assert_eq!(
        position.piece_at(sq("e3")),
        Some(Piece::new(PieceKind::Pawn, Color::Black))
    );
    assert_eq!(
        position.to_layout(),
        "rnbqkbnr/ppp1pppp/8/8/8/4p3/PPPP1PPP/RNBQKBNR"
    );
}

#[test]
fn en_passant_window_closes_after_one_move() {
    let mut position = Position::startpos();
    play(&mut position, &["g1f3", "d7d5", "f3g1", "d5d4", "e2e4", "a7a6", "a2a3"]);
    let dests = position.legal_destinations(sq("d4")).unwrap();
    assert!(!dests.contains(sq("e3")));
}

#[test]
fn en_passant_refused_when_it_exposes_the_king() {
    // Taking on e3 would clear the fourth rank between the rook and the king.
    let mut position = Position::new("8/8/8/8/k2p3R/8/4P3/4K3", Color::White).unwrap();
    play(&mut position, &["e2e4"]);
    let dests = position.legal_destinations(sq("d4")).unwrap();
    assert!(!dests.contains(sq("e3")));
    assert!(dests.contains(sq("d3")));
}

#[test]
fn promotion_replaces_pawn_with_queen() {
    let mut position = Position::new("k7/7P/8/8/8/8/7p/K7", Color::White).unwrap();
    assert!(position.is_pawn_promotion(sq("h7"), Square::H8));
    assert_eq!(
        position.apply_move(sq("h7"), Square::H8),
        Ok(MoveKind::Promotion)
    );
    assert_eq!(
        position.piece_at(Square::H8),
        Some(Piece::new(PieceKind::Queen, Color::White))
    );
    assert_eq!(position.is_in_check(Color::Black), Ok(true));

    play(&mut position, &["a8a7", "a1b2"]);
    assert!(position.is_pawn_promotion(sq("h2"), Square::H1));
    position.apply_move(sq("h2"), Square::H1).unwrap();
    assert_eq!(
        position.piece_at(Square::H1),
        Some(Piece::new(PieceKind::Queen, Color::Black))
    );
    assert_eq!(position.to_layout(), "7Q/k7/8/8/8/8/1K6/7q");
}

#[test]
fn back_rank_mate() {
    let position = Position::new("3R2k1/5ppp/8/8/8/8/8/6K1", Color::Black).unwrap();
    assert_eq!(position.is_in_check(Color::Black), Ok(true));
    assert_eq!(position.is_checkmate(Color::Black), Ok(true));
    assert_eq!(position.legal_moves().map(|m| m.len()), Ok(0));
}

#[test]
fn back_rank_mate_with_blocker_added() {
    let blocked = Position::new("3Rr1k1/5ppp/8/8/8/8/8/6K1", Color::Black).unwrap();
    assert_eq!(blocked.is_in_check(Color::Black), Ok(false));
    assert_eq!(blocked.is_checkmate(Color::Black), Ok(false));

    let interposer = Position::new("3R2k1/5ppp/4n3/8/8/8/8/6K1", Color::Black).unwrap();
    assert_eq!(interposer.is_in_check(Color::Black), Ok(true));
    assert_eq!(interposer.is_checkmate(Color::Black), Ok(false));
}

#[test]
fn back_rank_mate_delivered_in_play() {
    let mut mated = Position::new("6k1/5ppp/8/8/8/8/8/3R2K1", Color::White).unwrap();
    play(&mut mated, &["d1d8"]);
    assert_eq!(mated.side_to_move(), Color::Black);
    assert_eq!(mated.is_checkmate(Color::Black), Ok(true));

    let mut defended = Position::new("6k1/5ppp/8/b7/8/8/8/3R2K1", Color::White).unwrap();
    play(&mut defended, &["d1d8"]);
    assert_eq!(defended.is_in_check(Color::Black), Ok(true));
    assert_eq!(defended.is_checkmate(Color::Black), Ok(false));
    assert!(defended
        .legal_destinations(sq("a5"))
        .unwrap()
        .contains(sq("d8")));
}

#[test]
fn layout_errors_surface_at_construction() {
    assert!(matches!(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP".parse::<Position>(),
        Err(chess_core::LayoutError::RankCount(7))
    ));
    let err: RulesError = Position::new("8/8/8/8/8/8/8/7x", Color::White)
        .unwrap_err()
        .into();
    assert!(matches!(err, RulesError::Layout(_)));
}

#[test]
fn black_can_castle_after_white_moves() {
    let mut position =
        Position::new("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R", Color::White).unwrap();
    play(&mut position, &["a2a3", "e8c8"]);
    assert_eq!(
        position.to_layout(),
        "2kr3r/pppppppp/8/8/8/P7/1PPPPPPP/R3K2R"
    );
}

//! Interactive two-player session over a line-based terminal.
//!
//! Players type a square to pick up a piece and a second square to drop
//! it, or a whole move such as `e2e4`. `board`, `moves` and `quit` are also
//! understood.

use std::io::{self, BufRead, Write};

use chess_core::{Move, Square};
use chess_rules::{Game, GameError, Outcome};
use tracing::{debug, warn};

use crate::render;

enum Command {
    Quit,
    Board,
    Moves,
    Select(Square),
    Play(Move),
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        let word = line.trim();
        if word.is_empty() {
            return None;
        }
        Some(match word {
            "quit" | "exit" => Command::Quit,
            "board" => Command::Board,
            "moves" => Command::Moves,
            _ => {
                if let Ok(sq) = word.parse::<Square>() {
                    Command::Select(sq)
                } else if let Ok(m) = word.parse::<Move>() {
                    Command::Play(m)
                } else {
                    Command::Unknown(word.to_string())
                }
            }
        })
    }
}

/// Runs a session until the game ends, the player quits or input runs out.
pub struct Session<'a, W> {
    game: &'a mut Game,
    out: W,
    show_hints: bool,
    selected: Option<Square>,
}

impl<'a, W: Write> Session<'a, W> {
    pub fn new(game: &'a mut Game, out: W, show_hints: bool) -> Self {
        Session {
            game,
            out,
            show_hints,
            selected: None,
        }
    }

    /// Reads commands from `input` and returns the outcome, if the game
    /// finished.
    pub fn run<R: BufRead>(mut self, input: R) -> io::Result<Option<Outcome>> {
        self.show_position()?;
        if let Some(outcome) = self.game.outcome() {
            self.announce(outcome)?;
            return Ok(Some(outcome));
        }
        self.prompt()?;

        for line in input.lines() {
            let Some(command) = Command::parse(&line?) else {
                self.prompt()?;
                continue;
            };
            match command {
                Command::Quit => break,
                Command::Board => self.show_position()?,
                Command::Moves => self.list_moves()?,
                Command::Select(sq) => self.select(sq)?,
                Command::Play(m) => self.play(m)?,
                Command::Unknown(word) => {
                    writeln!(self.out, "unrecognised input: {word}")?;
                }
            }
            if let Some(outcome) = self.game.outcome() {
                self.announce(outcome)?;
                return Ok(Some(outcome));
            }
            self.prompt()?;
        }
        Ok(None)
    }

    fn prompt(&mut self) -> io::Result<()> {
        match self.selected {
            Some(sq) => write!(self.out, "{} ({sq})> ", self.game.side_to_move())?,
            None => write!(self.out, "{}> ", self.game.side_to_move())?,
        }
        self.out.flush()
    }

    fn show_position(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", render::board(self.game.position()))?;
        if self.game.is_check().unwrap_or(false) {
            writeln!(self.out, "{} is in check", self.game.side_to_move())?;
        }
        Ok(())
    }

    fn list_moves(&mut self) -> io::Result<()> {
        match self.game.position().legal_moves() {
            Ok(moves) => {
                let list: Vec<String> = moves.iter().map(|m| m.to_uci()).collect();
                writeln!(self.out, "{}", list.join(" "))
            }
            Err(e) => writeln!(self.out, "error: {e}"),
        }
    }

    /// Handles a bare square: drops the held piece there if it is a legal
    /// destination, otherwise picks up whatever stands on it.
    fn select(&mut self, sq: Square) -> io::Result<()> {
        if let Some(from) = self.selected.take() {
            let legal = self
                .game
                .destinations(from)
                .is_ok_and(|dests| dests.contains(sq));
            if legal {
                return self.play(Move::new(from, sq));
            }
        }

        match self.game.destinations(sq) {
            Ok(dests) if dests.is_empty() => {
                writeln!(self.out, "the piece on {sq} has no legal moves")
            }
            Ok(dests) => {
                self.selected = Some(sq);
                if self.show_hints {
                    writeln!(
                        self.out,
                        "{}",
                        render::board_with_marks(self.game.position(), dests)
                    )?;
                    writeln!(self.out, "destinations: {}", render::square_list(dests))?;
                }
                Ok(())
            }
            Err(e) => writeln!(self.out, "error: {e}"),
        }
    }

    fn play(&mut self, m: Move) -> io::Result<()> {
        self.selected = None;
        let promotes = self.game.position().is_pawn_promotion(m.from, m.to);
        match self.game.make_move(m.from, m.to) {
            Ok(kind) => {
                debug!(%m, %kind, "move played");
                if promotes {
                    writeln!(self.out, "{m}: pawn promoted to a queen")?;
                } else {
                    writeln!(self.out, "{m}: {kind}")?;
                }
                self.show_position()
            }
            Err(GameError::GameOver) => writeln!(self.out, "the game is over"),
            Err(e) => {
                warn!(%m, error = %e, "move rejected");
                writeln!(self.out, "error: {e}")
            }
        }
    }

    fn announce(&mut self, outcome: Outcome) -> io::Result<()> {
        match outcome {
            Outcome::Checkmate { winner } => writeln!(self.out, "Checkmate. {winner} wins."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Color;
    use chess_rules::Position;

    fn run(game: &mut Game, script: &str, show_hints: bool) -> (Option<Outcome>, String) {
        let mut out = Vec::new();
        let outcome = Session::new(game, &mut out, show_hints)
            .run(script.as_bytes())
            .unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn fools_mate() {
        let mut game = Game::new();
        let (outcome, out) = run(&mut game, "f2f3\ne7e5\ng2g4\nd8h4\n", false);
        assert_eq!(
            outcome,
            Some(Outcome::Checkmate {
                winner: Color::Black
            })
        );
        assert!(out.ends_with("Checkmate. Black wins.\n"));
        assert_eq!(game.history().len(), 4);
    }

    #[test]
    fn select_then_drop() {
        let mut game = Game::new();
        let (outcome, out) = run(&mut game, "g1\nf3\n", true);
        assert_eq!(outcome, None);
        assert!(out.contains("destinations: f3 h3"));
        assert!(out.contains("White (g1)> "));
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(
            game.position().to_layout(),
            "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R"
        );
    }

    #[test]
    fn hints_can_be_disabled() {
        let mut game = Game::new();
        let (_, out) = run(&mut game, "g1\n", false);
        assert!(!out.contains("destinations"));
    }

    #[test]
    fn reselecting_another_piece() {
        let mut game = Game::new();
        let (_, out) = run(&mut game, "g1\nb1\nc3\n", true);
        assert!(out.contains("destinations: a3 c3"));
        assert_eq!(
            game.position().piece_at("c3".parse().unwrap()).map(|p| p.color),
            Some(Color::White)
        );
    }

    #[test]
    fn errors_do_not_end_the_session() {
        let mut game = Game::new();
        let (outcome, out) = run(&mut game, "e2e5\ne7\nhello\ne4\ne2e4\nquit\ne7e5\n", false);
        assert_eq!(outcome, None);
        assert!(out.contains("error: illegal move: e2e5"));
        assert!(out.contains("error: it is White's turn, not Black's"));
        assert!(out.contains("unrecognised input: hello"));
        assert!(out.contains("error: no piece on e4"));
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn promotion_is_announced() {
        let position = Position::new("k7/7P/8/8/8/8/8/K7", Color::White).unwrap();
        let mut game = Game::from_position(position).unwrap();
        let (_, out) = run(&mut game, "h7h8\n", false);
        assert!(out.contains("h7h8: pawn promoted to a queen"));
        assert!(out.contains("8 k . . . . . . Q"));
    }

    #[test]
    fn mated_start_is_announced_immediately() {
        let position = Position::new("3R2k1/5ppp/8/8/8/8/8/6K1", Color::Black).unwrap();
        let mut game = Game::from_position(position).unwrap();
        let (outcome, out) = run(&mut game, "", false);
        assert_eq!(
            outcome,
            Some(Outcome::Checkmate {
                winner: Color::White
            })
        );
        assert!(out.contains("Black is in check"));
    }
}

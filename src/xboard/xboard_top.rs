//! Xboard (CECP) protocol front-end and command loop.
//!
//! Keeps the game position, the side the engine plays and an undo history,
//! and answers moves with engine moves unless force mode is on.

use std::io::{self, BufRead, Write};

use log::debug;
use rand::rngs::StdRng;

use crate::game_state::chess_types::{CheckStatus, Side};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::{apply_checked_move, apply_move};
use crate::move_generation::legal_move_checks::{check_status, is_stalemate};
use crate::search::search_engine::SearchEngine;
use crate::utils::long_algebraic::{move_to_coordinate, parse_coordinate_move};
use crate::utils::render_game_state::render_board;

const ENGINE_NAME: &str = concat!("ivory_chess ", env!("CARGO_PKG_VERSION"));

const HELP_LINES: &[&str] = &[
    "new            start a new game, engine plays black",
    "setboard FEN   set up a position",
    "go             engine plays the side to move",
    "force          stop replying to moves",
    "white | black  choose the engine's side",
    "sd N           set the search depth",
    "undo | remove  take back one or two plies",
    "show | fen     print the board or its FEN",
    "e2e4 | e7e8q   play a move",
    "quit           leave",
];

/// Commands xboard may send that need no answer here.
const IGNORED_COMMANDS: &[&str] = &[
    "accepted", "rejected", "random", "level", "st", "time", "otim", "post", "nopost", "hard",
    "easy", "computer", "name", "rating", "result", "draw", "hint", "bk", "analyze", "exit", ".",
];

pub fn run_stdio_loop(mut state: XboardState) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = state.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

pub struct XboardState {
    position: Position,
    side_to_move: Side,
    engine_side: Side,
    force_mode: bool,
    history: Vec<(Position, Side)>,
    engine: SearchEngine,
    rng: StdRng,
    unicode: bool,
}

impl XboardState {
    pub fn new(engine: SearchEngine, rng: StdRng, unicode: bool) -> Self {
        Self {
            position: Position::new_game(),
            side_to_move: Side::White,
            engine_side: Side::Black,
            force_mode: false,
            history: Vec::new(),
            engine,
            rng,
            unicode,
        }
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// Process one input line. Returns `true` when the session should end.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }
        debug!(">> {trimmed}");

        let (cmd, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (trimmed, ""),
        };

        match cmd {
            "xboard" => {}
            "protover" => {
                respond(out, &format!("feature myname=\"{ENGINE_NAME}\""))?;
                for feature in ["ping=1", "setboard=1", "sigint=0", "sigterm=0", "usermove=0"] {
                    respond(out, &format!("feature {feature}"))?;
                }
                respond(out, "feature done=1")?;
            }
            "new" => {
                self.position = Position::new_game();
                self.side_to_move = Side::White;
                self.engine_side = Side::Black;
                self.force_mode = false;
                self.history.clear();
            }
            "ping" => respond(out, &format!("pong {rest}"))?,
            "setboard" => match Position::from_fen(rest) {
                Ok((position, side)) => {
                    self.position = position;
                    self.side_to_move = side;
                    self.history.clear();
                }
                Err(err) => respond(out, &format!("Error (bad position): {err}"))?,
            },
            "force" => self.force_mode = true,
            "go" => {
                self.force_mode = false;
                self.engine_side = self.side_to_move;
                self.play_engine_move(out)?;
            }
            "sd" => match rest.parse::<u8>() {
                Ok(depth) if depth > 0 => self.engine.set_depth(depth),
                _ => respond(out, &format!("Error (bad depth): {rest}"))?,
            },
            "undo" => {
                if !self.take_back(1) {
                    respond(out, "# nothing to undo")?;
                }
            }
            "remove" => {
                if !self.take_back(2) {
                    respond(out, "# nothing to remove")?;
                }
            }
            "show" => self.show(out)?,
            "fen" => respond(out, &self.position.to_fen(self.side_to_move))?,
            "help" => {
                for line in HELP_LINES {
                    respond(out, &format!("# {line}"))?;
                }
            }
            "white" => {
                self.engine_side = Side::White;
                respond(out, "# playing white")?;
            }
            "black" => {
                self.engine_side = Side::Black;
                respond(out, "# playing black")?;
            }
            "quit" => return Ok(true),
            _ if looks_like_move(trimmed) => self.handle_user_move(trimmed, out)?,
            _ if IGNORED_COMMANDS.contains(&cmd) => {}
            _ => respond(out, &format!("Error (unknown command): {trimmed}"))?,
        }

        Ok(false)
    }

    fn handle_user_move(&mut self, text: &str, out: &mut impl Write) -> io::Result<()> {
        let applied = parse_coordinate_move(text)
            .and_then(|mv| apply_checked_move(&self.position, &mv, self.side_to_move));

        let next = match applied {
            Ok(next) => next,
            Err(err) => {
                debug!("rejected {text}: {err}");
                return respond(out, &format!("Illegal move: {text}"));
            }
        };

        self.history.push((self.position.clone(), self.side_to_move));
        self.position = next;
        self.side_to_move = self.side_to_move.opponent();

        if self.force_mode || self.side_to_move != self.engine_side {
            return Ok(());
        }
        self.play_engine_move(out)
    }

    fn play_engine_move(&mut self, out: &mut impl Write) -> io::Result<()> {
        let side = self.side_to_move;
        let outcome = match self.engine.best_move(&self.position, side, &mut self.rng) {
            Ok(outcome) => outcome,
            Err(err) => return respond(out, &format!("Error (engine): {err}")),
        };

        match outcome.best_move {
            Some(mv) => {
                respond(out, &format!("move {}", move_to_coordinate(&mv)))?;
                let next = apply_move(&self.position, &mv, side);
                self.history.push((self.position.clone(), side));
                self.position = next;
                self.side_to_move = side.opponent();
                self.announce_result(out)?;
            }
            None => match is_stalemate(&self.position, side) {
                Ok(true) => respond(out, "1/2-1/2 {Stalemate}")?,
                Ok(false) => respond(out, "resign")?,
                Err(err) => respond(out, &format!("Error (engine): {err}"))?,
            },
        }

        Ok(())
    }

    /// Report check, mate or stalemate for the side to move.
    fn announce_result(&self, out: &mut impl Write) -> io::Result<()> {
        let defender = self.side_to_move;
        match check_status(&self.position, defender) {
            Ok(CheckStatus::Check) => respond(out, "# check"),
            Ok(CheckStatus::Checkmate) => match defender.opponent() {
                Side::White => respond(out, "1-0 {White mates}"),
                Side::Black => respond(out, "0-1 {Black mates}"),
            },
            Ok(CheckStatus::None) => match is_stalemate(&self.position, defender) {
                Ok(true) => respond(out, "1/2-1/2 {Stalemate}"),
                _ => Ok(()),
            },
            Err(err) => {
                debug!("no result for {defender}: {err}");
                Ok(())
            }
        }
    }

    /// Restore the position from `plies` half-moves ago. Leaves the game
    /// untouched and returns `false` when the history is shorter than that.
    fn take_back(&mut self, plies: usize) -> bool {
        if self.history.len() < plies {
            return false;
        }
        let keep = self.history.len() - plies;
        if let Some((position, side)) = self.history.drain(keep..).next() {
            self.position = position;
            self.side_to_move = side;
        }
        true
    }

    fn show(&self, out: &mut impl Write) -> io::Result<()> {
        for line in render_board(&self.position, self.unicode).lines() {
            respond(out, &format!("# {line}"))?;
        }
        respond(out, &format!("# engine plays: {}", self.engine_side))?;
        respond(out, &format!("# search depth: {}", self.engine.config().depth))?;
        let book_size = self.engine.book().map_or(0, |book| book.len());
        respond(out, &format!("# book positions: {book_size}"))?;
        respond(out, &format!("# to move: {}", self.side_to_move))?;
        respond(out, &format!("# fen: {}", self.position.to_fen(self.side_to_move)))
    }
}

fn respond(out: &mut impl Write, text: &str) -> io::Result<()> {
    debug!("<< {text}");
    writeln!(out, "{text}")
}

/// Coordinate move shape: two squares and an optional promotion letter.
fn looks_like_move(text: &str) -> bool {
    let bytes = text.as_bytes();
    (bytes.len() == 4 || bytes.len() == 5)
        && (b'a'..=b'h').contains(&bytes[0])
        && (b'1'..=b'8').contains(&bytes[1])
        && (b'a'..=b'h').contains(&bytes[2])
        && (b'1'..=b'8').contains(&bytes[3])
}

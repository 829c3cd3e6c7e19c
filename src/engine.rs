//! Move selection for the computer player.
//!
//! Three fixed policies, picked by [`Difficulty`]:
//! - `Easy`: a uniformly random empty cell
//! - `Medium`: win if possible, else block, else a coin flip between the
//!   full search and a random cell
//! - `Hard`: opening shortcuts, then the full search
//!
//! The caller's board is never modified; search runs on a private copy.

use std::fmt;
use std::str::FromStr;

use fastrand::Rng;
use tracing::warn;

use crate::board::{Board, Mark, Point};
use crate::constants::{CELLS, CENTER, MEDIUM_SEARCH_PROB, OPENING_SQUARES};
use crate::error::ParseError;
use crate::search::Search;

/// Strength of the computer player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    #[default]
    Hard,
}

impl Difficulty {
    /// Parse a difficulty name, falling back to `Hard` (with a warning) for
    /// anything unrecognized.
    pub fn parse_lenient(s: &str) -> Difficulty {
        s.parse().unwrap_or_else(|_| {
            warn!(difficulty = s, "unknown difficulty, defaulting to Hard");
            Difficulty::Hard
        })
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Difficulty {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseError::Difficulty(s.to_string())),
        }
    }
}

/// Pick the computer's next move, or `None` if the board is full.
///
/// The returned point is always an empty cell of `board`.
pub fn select_move(
    board: &Board,
    difficulty: Difficulty,
    computer: Mark,
    rng: &mut Rng,
) -> Option<Point> {
    let moves = board.empty_cells();
    if moves.is_empty() {
        return None;
    }

    match difficulty {
        Difficulty::Easy => Some(random_choice(&moves, rng)),
        Difficulty::Medium => {
            if let Some(pt) = completing_move(board, &moves, computer) {
                return Some(pt);
            }
            if let Some(pt) = completing_move(board, &moves, computer.opponent()) {
                return Some(pt);
            }
            if rng.f64() < MEDIUM_SEARCH_PROB {
                full_search(board, computer, rng)
            } else {
                Some(random_choice(&moves, rng))
            }
        }
        Difficulty::Hard => {
            if moves.len() == CELLS {
                return Some(random_choice(&OPENING_SQUARES, rng));
            }
            if moves.len() == CELLS - 1 && board.get(CENTER).is_none() {
                return Some(CENTER);
            }
            full_search(board, computer, rng)
        }
    }
}

/// First empty cell (row-major) where `mark` would complete a line.
fn completing_move(board: &Board, moves: &[Point], mark: Mark) -> Option<Point> {
    let mut scratch = *board;
    moves.iter().copied().find(|&pt| {
        scratch.set(pt, Some(mark));
        let won = scratch.has_won(mark);
        scratch.clear(pt);
        won
    })
}

fn random_choice(moves: &[Point], rng: &mut Rng) -> Point {
    moves[rng.usize(..moves.len())]
}

fn full_search(board: &Board, computer: Mark, rng: &mut Rng) -> Option<Point> {
    let mut scratch = *board;
    Search::new(computer).best_move(&mut scratch, rng)
}

/// A computer opponent with its own random source.
pub struct AiPlayer {
    mark: Mark,
    difficulty: Difficulty,
    rng: Rng,
}

impl AiPlayer {
    pub fn new(mark: Mark, difficulty: Difficulty) -> Self {
        Self::with_rng(mark, difficulty, Rng::new())
    }

    /// Deterministic player, for tests and reproducible games.
    pub fn with_seed(mark: Mark, difficulty: Difficulty, seed: u64) -> Self {
        Self::with_rng(mark, difficulty, Rng::with_seed(seed))
    }

    fn with_rng(mark: Mark, difficulty: Difficulty, rng: Rng) -> Self {
        Self {
            mark,
            difficulty,
            rng,
        }
    }

    pub fn mark(&self) -> Mark {
        self.mark
    }

    pub fn set_mark(&mut self, mark: Mark) {
        self.mark = mark;
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Choose a move on `board` for this player's mark.
    pub fn choose(&mut self, board: &Board) -> Option<Point> {
        select_move(board, self.difficulty, self.mark, &mut self.rng)
    }
}

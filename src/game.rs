//! Round and session bookkeeping around the engine.
//!
//! A [`Game`] owns the board, knows whose turn it is, and keeps a running
//! [`Scoreboard`] across rounds. Front ends drive it with
//! [`Game::play_human`] and [`Game::play_computer`] and read the result back
//! through [`Game::outcome`].

use std::fmt;

use tracing::info;

use crate::board::{Board, Line, Mark, Point, str_coord};
use crate::engine::{AiPlayer, Difficulty};
use crate::error::MoveError;

/// Cue key for a human placement.
pub const CLICK_CUE: &str = "click";

/// Choices made before a round starts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// The human's mark; the computer plays the other one
    pub human: Mark,
    /// Mark that moves first each round
    pub first: Mark,
    pub difficulty: Difficulty,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            human: Mark::X,
            first: Mark::X,
            difficulty: Difficulty::Hard,
        }
    }
}

/// How a round ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    HumanWin(Line),
    ComputerWin(Line),
    Draw,
}

impl Outcome {
    /// Cue key a front end can map to a sound or animation.
    pub fn cue(&self) -> &'static str {
        match self {
            Outcome::HumanWin(_) => "win",
            Outcome::ComputerWin(_) => "lose",
            Outcome::Draw => "draw",
        }
    }

    /// Cells to highlight, if someone won.
    pub fn line(&self) -> Option<Line> {
        match *self {
            Outcome::HumanWin(line) | Outcome::ComputerWin(line) => Some(line),
            Outcome::Draw => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::HumanWin(_) => write!(f, "You win!"),
            Outcome::ComputerWin(_) => write!(f, "AI wins!"),
            Outcome::Draw => write!(f, "It's a draw!"),
        }
    }
}

/// Results tallied across rounds. Lives in memory only.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub player: u32,
    pub ai: u32,
    pub draws: u32,
}

impl fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Player: {} Draws: {} AI: {}",
            self.player, self.draws, self.ai
        )
    }
}

/// A human-versus-computer session.
pub struct Game {
    board: Board,
    config: GameConfig,
    ai: AiPlayer,
    to_move: Mark,
    outcome: Option<Outcome>,
    scores: Scoreboard,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self::with_ai(config, AiPlayer::new(config.human.opponent(), config.difficulty))
    }

    /// A session whose computer player draws from a seeded random source.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_ai(
            config,
            AiPlayer::with_seed(config.human.opponent(), config.difficulty, seed),
        )
    }

    fn with_ai(config: GameConfig, ai: AiPlayer) -> Self {
        Self {
            board: Board::new(),
            config,
            ai,
            to_move: config.first,
            outcome: None,
            scores: Scoreboard::default(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn scores(&self) -> Scoreboard {
        self.scores
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// True until the current round is decided.
    pub fn is_active(&self) -> bool {
        self.outcome.is_none()
    }

    pub fn human(&self) -> Mark {
        self.config.human
    }

    pub fn computer(&self) -> Mark {
        self.ai.mark()
    }

    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    pub fn is_computer_turn(&self) -> bool {
        self.is_active() && self.to_move == self.computer()
    }

    /// Place the human's mark at `pt`.
    pub fn play_human(&mut self, pt: Point) -> Result<(), MoveError> {
        if !self.is_active() {
            return Err(MoveError::RoundOver);
        }
        if self.to_move != self.human() {
            return Err(MoveError::NotYourTurn);
        }
        self.board.place(pt, self.human())?;
        self.to_move = self.computer();
        self.check_state();
        Ok(())
    }

    /// Let the computer move. Returns the point it played, or `None` if the
    /// board had no empty cell.
    pub fn play_computer(&mut self) -> Result<Option<Point>, MoveError> {
        if !self.is_active() {
            return Err(MoveError::RoundOver);
        }
        if self.to_move != self.computer() {
            return Err(MoveError::NotYourTurn);
        }
        let Some(pt) = self.ai.choose(&self.board) else {
            self.check_state();
            return Ok(None);
        };
        self.board.place(pt, self.computer())?;
        self.to_move = self.human();
        self.check_state();
        Ok(Some(pt))
    }

    /// Settle the round if someone has a line or the board is full.
    fn check_state(&mut self) {
        let outcome = if let Some(line) = self.board.winning_line() {
            if self.board.get(line[0]) == Some(self.human()) {
                self.scores.player += 1;
                Outcome::HumanWin(line)
            } else {
                self.scores.ai += 1;
                Outcome::ComputerWin(line)
            }
        } else if self.board.is_full() {
            self.scores.draws += 1;
            Outcome::Draw
        } else {
            return;
        };

        info!(
            outcome = %outcome,
            line = ?outcome.line().map(|l| l.map(str_coord)),
            scores = %self.scores,
            "round over"
        );
        self.outcome = Some(outcome);
    }

    /// Start a new round with the same players. Scores are kept.
    pub fn restart(&mut self) {
        self.board = Board::new();
        self.outcome = None;
        self.to_move = self.config.first;
    }

    /// Change difficulty; like any settings change this starts a new round.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.config.difficulty = difficulty;
        self.ai.set_difficulty(difficulty);
        self.restart();
    }

    /// Choose the human's mark and which mark opens, then start a new round.
    pub fn set_players(&mut self, human: Mark, first: Mark) {
        self.config.human = human;
        self.config.first = first;
        self.ai.set_mark(human.opponent());
        self.restart();
    }

    /// One-line status for a front end.
    pub fn status(&self) -> String {
        match self.outcome {
            Some(outcome) => outcome.to_string(),
            None if self.to_move == self.human() => "Your turn!".to_string(),
            None => "AI's turn".to_string(),
        }
    }
}

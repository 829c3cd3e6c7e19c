//! A line-oriented text protocol for driving a game from another process.
//!
//! The framing follows the Go Text Protocol: each command is one line with an
//! optional numeric id, and each response is `=` (success) or `?` (failure),
//! the echoed id, a space, the payload, and a blank line. A GUI shell can
//! run the engine as a child process and exchange commands over stdio.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version` - Engine identification
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the command loop
//! - `setup <x|o> [first|second]` - Human's mark and move order; starts a new round
//! - `difficulty [easy|medium|hard]` - Show or change difficulty; starts a new round
//! - `clear_board` - Start a new round, keeping scores
//! - `play <vertex>` - Human move; replies with the outcome cue if the round ended
//! - `genmove` - Computer move; replies `<vertex>` plus the cue if the round ended
//! - `showboard` - Print the board
//! - `winner` - Vertices of the winning line, or `none`
//! - `score` - Running tally
//! - `status` - One-line round status
//!
//! Vertices are a column letter and a row number from the top, `a1` to `c3`.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use tracing::debug;

use crate::board::{Mark, parse_coord, str_coord};
use crate::engine::Difficulty;
use crate::error::ProtocolError;
use crate::game::{Game, GameConfig};

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "clear_board",
    "difficulty",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "score",
    "setup",
    "showboard",
    "status",
    "version",
    "winner",
];

/// Protocol front end over a [`Game`].
pub struct ProtocolEngine {
    game: Game,
}

impl Default for ProtocolEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolEngine {
    /// Engine with default settings: human is X and opens, Hard difficulty.
    pub fn new() -> Self {
        Self::with_game(Game::new(GameConfig::default()))
    }

    pub fn with_game(game: Game) -> Self {
        Self { game }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the command loop on stdin/stdout.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run_with<R, W>(&mut self, input: R, mut output: W) -> anyhow::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        for line in input.lines() {
            let line = line.context("failed to read command")?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            debug!(%command, ?args, "protocol command");
            let (prefix, message) = match self.execute(&command, args) {
                Ok(message) => ('=', message),
                Err(err) => ('?', err.to_string()),
            };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n")
                .context("failed to write response")?;
            output.flush().context("failed to flush response")?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute one command and return its payload.
    fn execute(&mut self, command: &str, args: &[&str]) -> Result<String, ProtocolError> {
        match command {
            "name" => Ok(env!("CARGO_PKG_NAME").to_string()),

            "version" => Ok(env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => Ok("1".to_string()),

            "list_commands" => Ok(KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let cmd = args.first().ok_or(ProtocolError::MissingArgument)?;
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                Ok(known.to_string())
            }

            "quit" => Ok(String::new()),

            "setup" => {
                let human: Mark = args
                    .first()
                    .ok_or(ProtocolError::MissingArgument)?
                    .parse()?;
                let first = match args.get(1).map(|s| s.to_lowercase()).as_deref() {
                    None => Mark::X,
                    Some("first") => human,
                    Some("second") => human.opponent(),
                    Some(other) => other.parse()?,
                };
                self.game.set_players(human, first);
                Ok(String::new())
            }

            "difficulty" => {
                if let Some(level) = args.first() {
                    self.game.set_difficulty(Difficulty::parse_lenient(level));
                }
                Ok(self.game.config().difficulty.to_string())
            }

            "clear_board" => {
                self.game.restart();
                Ok(String::new())
            }

            "play" => {
                let vertex = args.first().ok_or(ProtocolError::MissingArgument)?;
                let pt = parse_coord(vertex)?;
                self.game.play_human(pt)?;
                Ok(self.game.outcome().map(|o| o.cue().to_string()).unwrap_or_default())
            }

            "genmove" => match self.game.play_computer()? {
                None => Ok("none".to_string()),
                Some(pt) => {
                    let vertex = str_coord(pt);
                    Ok(match self.game.outcome() {
                        Some(outcome) => format!("{vertex} {}", outcome.cue()),
                        None => vertex,
                    })
                }
            },

            "showboard" => Ok(format!("\n{}", self.game.board().to_string().trim_end())),

            "winner" => Ok(match self.game.board().winning_line() {
                Some(line) => line.map(str_coord).join(" "),
                None => "none".to_string(),
            }),

            "score" => {
                let scores = self.game.scores();
                Ok(format!(
                    "player {} ai {} draws {}",
                    scores.player, scores.ai, scores.draws
                ))
            }

            "status" => Ok(self.game.status()),

            _ => Err(ProtocolError::UnknownCommand(command.to_string())),
        }
    }
}

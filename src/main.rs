//! Tictac-Rust: play tic-tac-toe against the engine.
//!
//! ## Usage
//!
//! - `tictac-rust` - Show a demo
//! - `tictac-rust play` - Play a game in the terminal
//! - `tictac-rust protocol` - Serve the text protocol on stdin/stdout
//! - `tictac-rust demo` - Let the engine play itself
//!
//! Log verbosity follows `RUST_LOG` (default `warn`); logs go to stderr.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tictac_rust::board::{Board, Mark, parse_coord, str_coord};
use tictac_rust::constants::AI_THINK_DELAY_MS;
use tictac_rust::engine::{AiPlayer, Difficulty};
use tictac_rust::game::{CLICK_CUE, Game, GameConfig};
use tictac_rust::protocol::ProtocolEngine;

/// Tictac-Rust: tic-tac-toe against an exact minimax opponent
#[derive(Parser)]
#[command(name = "tictac-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer in the terminal
    Play(PlayArgs),
    /// Serve the line-based text protocol for an external front end
    Protocol {
        /// Seed for the computer's random choices
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Let two Hard players play each other
    Demo {
        /// Number of rounds to play
        #[arg(long, default_value_t = 3)]
        rounds: u32,
        /// Seed for the players' random choices
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args)]
struct PlayArgs {
    /// Computer strength: easy, medium, or hard
    #[arg(short, long, default_value = "hard")]
    difficulty: Difficulty,
    /// Your mark: x or o
    #[arg(short, long, default_value = "x")]
    mark: Mark,
    /// Let the computer move first
    #[arg(long)]
    second: bool,
    /// Seed for the computer's random choices
    #[arg(long)]
    seed: Option<u64>,
    /// Pause before the computer's move, in milliseconds
    #[arg(long, default_value_t = AI_THINK_DELAY_MS)]
    delay_ms: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play(args)) => run_play(args),
        Some(Commands::Protocol { seed }) => {
            let game = match seed {
                Some(seed) => Game::with_seed(GameConfig::default(), seed),
                None => Game::new(GameConfig::default()),
            };
            ProtocolEngine::with_game(game).run()
        }
        Some(Commands::Demo { rounds, seed }) => run_demo(rounds, seed),
        None => run_demo(1, None),
    }
}

fn run_play(args: PlayArgs) -> Result<()> {
    let config = GameConfig {
        human: args.mark,
        first: if args.second { args.mark.opponent() } else { args.mark },
        difficulty: args.difficulty,
    };
    let mut game = match args.seed {
        Some(seed) => Game::with_seed(config, seed),
        None => Game::new(config),
    };
    let delay = Duration::from_millis(args.delay_ms);

    println!("Tictac-Rust ({} difficulty)", config.difficulty);
    println!("You are {}. Enter moves like b2, or q to quit.\n", config.human);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        while game.is_active() {
            if game.is_computer_turn() {
                println!("AI thinking...");
                thread::sleep(delay);
                if let Some(pt) = game.play_computer()? {
                    println!("AI plays {}", str_coord(pt));
                }
                continue;
            }

            println!("{}", game.board());
            print!("Your move ({}): ", game.human());
            io::stdout().flush().context("failed to flush stdout")?;

            let Some(line) = lines.next() else {
                return Ok(());
            };
            let line = line.context("failed to read move")?;
            let input = line.trim();
            if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
                return Ok(());
            }

            let played = parse_coord(input)
                .map_err(anyhow::Error::from)
                .and_then(|pt| game.play_human(pt).map_err(anyhow::Error::from));
            match played {
                Ok(()) => tracing::trace!(cue = CLICK_CUE, "human move"),
                Err(err) => println!("{err}"),
            }
        }

        println!("{}", game.board());
        if let Some(outcome) = game.outcome() {
            match outcome.line() {
                Some(line) => println!("{outcome} ({})", line.map(str_coord).join("-")),
                None => println!("{outcome}"),
            }
        }
        println!("{}\n", game.scores());

        print!("Play again? [y/N] ");
        io::stdout().flush().context("failed to flush stdout")?;
        let again = match lines.next() {
            Some(line) => line.context("failed to read answer")?,
            None => return Ok(()),
        };
        if !again.trim().eq_ignore_ascii_case("y") {
            return Ok(());
        }
        game.restart();
    }
}

fn run_demo(rounds: u32, seed: Option<u64>) -> Result<()> {
    println!("Tictac-Rust: Hard vs Hard\n");

    let (mut x, mut o) = match seed {
        Some(seed) => (
            AiPlayer::with_seed(Mark::X, Difficulty::Hard, seed),
            AiPlayer::with_seed(Mark::O, Difficulty::Hard, seed.wrapping_add(1)),
        ),
        None => (
            AiPlayer::new(Mark::X, Difficulty::Hard),
            AiPlayer::new(Mark::O, Difficulty::Hard),
        ),
    };

    for round in 1..=rounds {
        let mut board = Board::new();
        let mut moves = Vec::new();
        while board.winning_line().is_none() {
            let player = match board.to_move() {
                Mark::X => &mut x,
                Mark::O => &mut o,
            };
            let Some(pt) = player.choose(&board) else {
                break;
            };
            board
                .place(pt, player.mark())
                .with_context(|| format!("demo player chose {}", str_coord(pt)))?;
            moves.push(str_coord(pt));
        }

        println!("=== Round {round} ===");
        println!("Moves: {}", moves.join(" "));
        print!("{board}");
        match board.winner() {
            Some(mark) => println!("{mark} wins\n"),
            None => println!("Draw\n"),
        }
    }
    Ok(())
}

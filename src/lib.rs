//! Tictac-Rust: a tic-tac-toe engine with an exact minimax opponent.
//!
//! The crate is the computational core of a human-versus-computer game. A
//! front end (GUI, terminal, or another process over the text protocol)
//! owns presentation and calls in through a narrow interface.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, win lines, and engine parameters
//! - [`board`] - Board state and the rules (empty cells, wins, full board)
//! - [`search`] - Minimax with alpha-beta pruning
//! - [`engine`] - Difficulty policies and move selection
//! - [`game`] - Rounds, turn order, and the running score
//! - [`protocol`] - Line-based text protocol for external front ends
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```
//! use tictac_rust::board::{Board, Mark};
//! use tictac_rust::engine::{Difficulty, select_move};
//!
//! let mut board = Board::new();
//! board.place((0, 0), Mark::X).unwrap();
//!
//! let mut rng = fastrand::Rng::with_seed(1);
//! let reply = select_move(&board, Difficulty::Hard, Mark::O, &mut rng);
//! assert_eq!(reply, Some((1, 1)));
//! ```

pub mod board;
pub mod constants;
pub mod engine;
pub mod error;
pub mod game;
pub mod protocol;
pub mod search;

pub use board::{Board, Line, Mark, Point, create_empty_board};
pub use engine::{AiPlayer, Difficulty, select_move};
pub use error::{MoveError, ParseError, ProtocolError};

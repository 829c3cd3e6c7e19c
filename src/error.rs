//! Error types.

use thiserror::Error;

/// A rejected placement.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// Coordinates outside the 3x3 grid
    #[error("Illegal move: ({row}, {col}) is off the board")]
    OutOfBounds { row: usize, col: usize },

    /// Cell already holds a mark
    #[error("Illegal move: ({row}, {col}) is not empty")]
    Occupied { row: usize, col: usize },

    /// The round has already been decided
    #[error("Illegal move: the round is over")]
    RoundOver,

    /// The other side is to move
    #[error("Illegal move: not your turn")]
    NotYourTurn,
}

/// Text that could not be turned into a game value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid vertex: {0}")]
    Vertex(String),

    #[error("invalid mark: {0}")]
    Mark(String),

    #[error("invalid difficulty: {0}")]
    Difficulty(String),

    #[error("invalid board: {reason}")]
    Board { reason: String },
}

/// Failure of a single text-protocol command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("missing argument")]
    MissingArgument,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Move(#[from] MoveError),
}

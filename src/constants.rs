//! Constants for board geometry, search scores, and engine tuning.
//!
//! Everything the engine treats as a fixed parameter lives here so the rules
//! and search modules stay free of magic numbers.

use crate::board::{Line, Point};

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN). Only the standard 3x3 game is supported.
pub const N: usize = 3;

/// Number of cells on the board.
pub const CELLS: usize = N * N;

/// The center cell.
pub const CENTER: Point = (1, 1);

/// Every line of three, in detection order: rows top-to-bottom, columns
/// left-to-right, then the main and anti diagonals.
pub const LINES: [Line; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// Squares Hard picks from on an empty board: the four corners and the center.
pub const OPENING_SQUARES: [Point; 5] = [(0, 0), (0, 2), (2, 0), (2, 2), CENTER];

// =============================================================================
// Search Scores
// =============================================================================

/// Score of a position the computer has won.
pub const WIN: i32 = 1;

/// Score of a position the opponent has won.
pub const LOSS: i32 = -1;

/// Score of a full board with no winner.
pub const DRAW: i32 = 0;

/// Stand-in for negative infinity. Scores are only compared, never negated.
pub const NEG_INF: i32 = i32::MIN;

/// Stand-in for positive infinity.
pub const POS_INF: i32 = i32::MAX;

// =============================================================================
// Difficulty Tuning
// =============================================================================

/// Probability that Medium runs the full search after its win/block checks.
pub const MEDIUM_SEARCH_PROB: f64 = 0.5;

/// Pause a front end may insert before showing the computer's move.
pub const AI_THINK_DELAY_MS: u64 = 500;

//! Exact game-tree search: minimax with alpha-beta pruning.
//!
//! The tree is small enough that every line is played out to a terminal
//! position, so there is no depth limit and no heuristic evaluation. Scores
//! are always from the computer's point of view: `WIN`, `LOSS` or `DRAW`.
//!
//! Speculative marks are written into the board passed in and removed again
//! before each call returns.

use fastrand::Rng;
use tracing::debug;

use crate::board::{Board, Mark, Point, str_coord};
use crate::constants::{DRAW, LOSS, NEG_INF, POS_INF, WIN};

/// Search state for one side.
pub struct Search {
    computer: Mark,
    opponent: Mark,
    nodes_searched: u64,
}

impl Search {
    /// Search on behalf of `computer`; the opponent is the other mark.
    pub fn new(computer: Mark) -> Self {
        Self {
            computer,
            opponent: computer.opponent(),
            nodes_searched: 0,
        }
    }

    /// Nodes visited since this search was created.
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    /// Minimax value of `board` with the given side to move.
    ///
    /// Stops scanning a node's children once `beta <= alpha`; this changes
    /// which nodes are visited but never the value returned.
    pub fn minimax(
        &mut self,
        board: &mut Board,
        computer_to_move: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes_searched += 1;

        if board.has_won(self.computer) {
            return WIN;
        }
        if board.has_won(self.opponent) {
            return LOSS;
        }
        if board.is_full() {
            return DRAW;
        }

        let moves = board.empty_cells();

        if computer_to_move {
            let mut best = NEG_INF;
            for pt in moves {
                board.set(pt, Some(self.computer));
                let score = self.minimax(board, false, alpha, beta);
                board.clear(pt);
                best = best.max(score);
                alpha = alpha.max(best);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = POS_INF;
            for pt in moves {
                board.set(pt, Some(self.opponent));
                let score = self.minimax(board, true, alpha, beta);
                board.clear(pt);
                best = best.min(score);
                beta = beta.min(best);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }

    /// Full search: the computer's highest-valued move, or `None` on a full board.
    ///
    /// Candidates are shuffled first so equally valued moves are picked
    /// unpredictably. Among equal values a move that completes a line on the
    /// spot is preferred over one that only forces a later win.
    pub fn best_move(&mut self, board: &mut Board, rng: &mut Rng) -> Option<Point> {
        let mut moves = board.empty_cells();
        rng.shuffle(&mut moves);
        let first = *moves.first()?;

        let mut best: Option<(Point, i32, bool)> = None;
        for &pt in &moves {
            board.set(pt, Some(self.computer));
            let wins_now = board.has_won(self.computer);
            let score = self.minimax(board, false, NEG_INF, POS_INF);
            board.clear(pt);

            let better = match best {
                None => score > NEG_INF,
                Some((_, best_score, best_now)) => {
                    score > best_score || (score == best_score && wins_now && !best_now)
                }
            };
            if better {
                best = Some((pt, score, wins_now));
            }
        }

        let chosen = best.map_or(first, |(pt, _, _)| pt);
        debug!(
            mark = %self.computer,
            chosen = %str_coord(chosen),
            score = best.map_or(DRAW, |(_, score, _)| score),
            nodes = self.nodes_searched,
            "full search finished"
        );
        Some(chosen)
    }
}

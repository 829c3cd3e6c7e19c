//! Exhaustive checks of the search.
//!
//! - The pruned minimax agrees with a plain, unpruned solver on every
//!   reachable position.
//! - Hard never loses, whatever the opponent plays, for either mark and
//!   either turn order.

use std::collections::{HashMap, HashSet};

use tictac_rust::board::{Board, Mark};
use tictac_rust::constants::{NEG_INF, POS_INF};
use tictac_rust::engine::{AiPlayer, Difficulty};
use tictac_rust::search::Search;

// =============================================================================
// Helper functions
// =============================================================================

fn is_terminal(board: &Board) -> bool {
    board.winning_line().is_some() || board.is_full()
}

/// Every position reachable from the empty board with X moving first.
fn reachable_positions() -> HashSet<Board> {
    fn visit(board: Board, seen: &mut HashSet<Board>) {
        if !seen.insert(board) || is_terminal(&board) {
            return;
        }
        let mover = board.to_move();
        for pt in board.empty_cells() {
            let mut next = board;
            next.place(pt, mover).unwrap();
            visit(next, seen);
        }
    }
    let mut seen = HashSet::new();
    visit(Board::new(), &mut seen);
    seen
}

/// Plain minimax without pruning, memoized, from `computer`'s point of view.
fn reference_value(
    board: &Board,
    computer: Mark,
    computer_to_move: bool,
    memo: &mut HashMap<(Board, bool), i32>,
) -> i32 {
    if board.has_won(computer) {
        return 1;
    }
    if board.has_won(computer.opponent()) {
        return -1;
    }
    if board.is_full() {
        return 0;
    }
    if let Some(&v) = memo.get(&(*board, computer_to_move)) {
        return v;
    }

    let mover = if computer_to_move {
        computer
    } else {
        computer.opponent()
    };
    let values = board.empty_cells().into_iter().map(|pt| {
        let mut next = *board;
        next.place(pt, mover).unwrap();
        reference_value(&next, computer, !computer_to_move, memo)
    });
    let v = if computer_to_move {
        values.max()
    } else {
        values.min()
    }
    .unwrap();

    memo.insert((*board, computer_to_move), v);
    v
}

/// Play every opponent reply against `ai`; returns the number of finished games.
fn explore(board: Board, computer_to_move: bool, ai: &mut AiPlayer) -> u32 {
    let computer = ai.mark();
    if is_terminal(&board) {
        assert!(
            !board.has_won(computer.opponent()),
            "Hard ({computer}) lost:\n{board}"
        );
        return 1;
    }

    if computer_to_move {
        let pt = ai.choose(&board).expect("non-full board must yield a move");
        assert_eq!(board.get(pt), None, "picked occupied {pt:?}\n{board}");
        let mut next = board;
        next.place(pt, computer).unwrap();
        explore(next, false, ai)
    } else {
        board
            .empty_cells()
            .into_iter()
            .map(|pt| {
                let mut next = board;
                next.place(pt, computer.opponent()).unwrap();
                explore(next, true, ai)
            })
            .sum()
    }
}

// =============================================================================
// Minimax exactness
// =============================================================================

#[test]
fn test_reachable_position_count() {
    // Well-known count of legal tic-tac-toe positions.
    assert_eq!(reachable_positions().len(), 5478);
}

#[test]
fn test_minimax_matches_unpruned_solver() {
    let positions = reachable_positions();
    for computer in [Mark::X, Mark::O] {
        let mut memo = HashMap::new();
        for board in positions.iter().filter(|b| !is_terminal(b)) {
            let computer_to_move = board.to_move() == computer;
            let expected = reference_value(board, computer, computer_to_move, &mut memo);

            let mut scratch = *board;
            let mut search = Search::new(computer);
            let got = search.minimax(&mut scratch, computer_to_move, NEG_INF, POS_INF);

            assert_eq!(got, expected, "computer {computer}\n{board}");
            assert_eq!(&scratch, board, "search must restore the board");
        }
    }
}

#[test]
fn test_empty_board_value_is_draw() {
    let mut memo = HashMap::new();
    assert_eq!(reference_value(&Board::new(), Mark::X, true, &mut memo), 0);
    let mut b = Board::new();
    assert_eq!(Search::new(Mark::X).minimax(&mut b, true, NEG_INF, POS_INF), 0);
}

#[test]
fn test_pruning_visits_fewer_nodes() {
    fn count_unpruned(board: &Board, mover: Mark) -> u64 {
        if is_terminal(board) {
            return 1;
        }
        let mut n = 1;
        for pt in board.empty_cells() {
            let mut next = *board;
            next.place(pt, mover).unwrap();
            n += count_unpruned(&next, mover.opponent());
        }
        n
    }

    let mut b = Board::new();
    let mut search = Search::new(Mark::X);
    search.minimax(&mut b, true, NEG_INF, POS_INF);
    assert!(search.nodes_searched() < count_unpruned(&b, Mark::X));
}

// =============================================================================
// Hard never loses
// =============================================================================

#[test]
fn test_hard_never_loses_moving_first() {
    for seed in 0..4 {
        for computer in [Mark::X, Mark::O] {
            let mut ai = AiPlayer::with_seed(computer, Difficulty::Hard, seed);
            let games = explore(Board::new(), true, &mut ai);
            assert!(games > 0);
        }
    }
}

#[test]
fn test_hard_never_loses_moving_second() {
    for seed in 0..4 {
        for computer in [Mark::X, Mark::O] {
            let mut ai = AiPlayer::with_seed(computer, Difficulty::Hard, seed);
            // All nine first moves by the opponent are explored.
            let games = explore(Board::new(), false, &mut ai);
            assert!(games >= 9);
        }
    }
}

#[test]
fn test_hard_self_play_draws() {
    for seed in 0..10 {
        let mut x = AiPlayer::with_seed(Mark::X, Difficulty::Hard, seed);
        let mut o = AiPlayer::with_seed(Mark::O, Difficulty::Hard, seed + 100);
        let mut board = Board::new();
        while !is_terminal(&board) {
            let player = if board.to_move() == Mark::X { &mut x } else { &mut o };
            let pt = player.choose(&board).unwrap();
            board.place(pt, player.mark()).unwrap();
        }
        assert_eq!(board.winning_line(), None, "seed {seed}\n{board}");
    }
}

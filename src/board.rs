//! Board state and the rules of three-in-a-row.
//!
//! All rule queries are pure: they borrow the board and leave it untouched.
//! The engine does not check that a board is reachable (mark counts
//! alternating, at most one winner); callers are trusted to hand it one.

use std::fmt;
use std::str::FromStr;

use crate::constants::{DRAW, LINES, LOSS, N, WIN};
use crate::error::{MoveError, ParseError};

/// One of the two symbols a player places.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// The other mark.
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

impl FromStr for Mark {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Mark::X),
            "o" => Ok(Mark::O),
            _ => Err(ParseError::Mark(s.to_string())),
        }
    }
}

/// Zero-based (row, column) coordinates.
pub type Point = (usize, usize);

/// Three cells forming a row, column, or diagonal.
pub type Line = [Point; 3];

/// A 3x3 grid where each cell is empty or holds a mark.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Mark>; N]; N],
}

impl Board {
    /// A fresh board with every cell empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of a cell, `None` for empty or off-board coordinates.
    pub fn get(&self, (row, col): Point) -> Option<Mark> {
        if row >= N || col >= N {
            return None;
        }
        self.cells[row][col]
    }

    /// Place `mark` on an empty, on-board cell.
    pub fn place(&mut self, (row, col): Point, mark: Mark) -> Result<(), MoveError> {
        if row >= N || col >= N {
            return Err(MoveError::OutOfBounds { row, col });
        }
        if self.cells[row][col].is_some() {
            return Err(MoveError::Occupied { row, col });
        }
        self.cells[row][col] = Some(mark);
        Ok(())
    }

    /// Unchecked write. Search uses this for speculative placements.
    pub(crate) fn set(&mut self, (row, col): Point, cell: Option<Mark>) {
        self.cells[row][col] = cell;
    }

    /// Unchecked removal of whatever `set` placed.
    pub(crate) fn clear(&mut self, pt: Point) {
        self.set(pt, None);
    }

    /// All empty cells in row-major order. Empty iff the board is full.
    pub fn empty_cells(&self) -> Vec<Point> {
        (0..N)
            .flat_map(|row| (0..N).map(move |col| (row, col)))
            .filter(|&(row, col)| self.cells[row][col].is_none())
            .collect()
    }

    /// True iff no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    /// True iff `mark` fills some row, column, or diagonal.
    pub fn has_won(&self, mark: Mark) -> bool {
        LINES
            .iter()
            .any(|line| line.iter().all(|&pt| self.get(pt) == Some(mark)))
    }

    /// The first completed line, scanning rows, then columns, then the
    /// main and anti diagonals.
    pub fn winning_line(&self) -> Option<Line> {
        LINES.iter().copied().find(|line| {
            let first = self.get(line[0]);
            first.is_some() && line.iter().all(|&pt| self.get(pt) == first)
        })
    }

    /// Mark occupying the first completed line, if any.
    pub fn winner(&self) -> Option<Mark> {
        self.winning_line().and_then(|line| self.get(line[0]))
    }

    /// `WIN` if `for_mark` has a line, `LOSS` if `against` does, else `DRAW`.
    pub fn score(&self, for_mark: Mark, against: Mark) -> i32 {
        if self.has_won(for_mark) {
            WIN
        } else if self.has_won(against) {
            LOSS
        } else {
            DRAW
        }
    }

    /// Number of cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == Some(mark))
            .count()
    }

    /// Mark to move on an alternately played board where X went first.
    pub fn to_move(&self) -> Mark {
        if self.count(Mark::X) > self.count(Mark::O) {
            Mark::O
        } else {
            Mark::X
        }
    }
}

/// Create an empty board.
pub fn create_empty_board() -> Board {
    Board::new()
}

impl FromStr for Board {
    type Err = ParseError;

    /// Parse nine cell symbols in row-major order. `X`/`O` (any case) are
    /// marks, `.`, `_` and `-` are empty; `/`, `|` and whitespace are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Board::new();
        let mut k = 0;
        for ch in s.chars() {
            let cell = match ch {
                'X' | 'x' => Some(Mark::X),
                'O' | 'o' => Some(Mark::O),
                '.' | '_' | '-' => None,
                '/' | '|' => continue,
                c if c.is_whitespace() => continue,
                c => {
                    return Err(ParseError::Board {
                        reason: format!("unexpected symbol {c:?}"),
                    });
                }
            };
            if k >= N * N {
                return Err(ParseError::Board {
                    reason: "more than 9 cells".to_string(),
                });
            }
            board.cells[k / N][k % N] = cell;
            k += 1;
        }
        if k != N * N {
            return Err(ParseError::Board {
                reason: format!("expected 9 cells, got {k}"),
            });
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  a b c")?;
        for row in 0..N {
            write!(f, "{} ", row + 1)?;
            for col in 0..N {
                let ch = match self.cells[row][col] {
                    Some(Mark::X) => 'X',
                    Some(Mark::O) => 'O',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parse a vertex such as `b3` (column letter, 1-based row from the top).
pub fn parse_coord(s: &str) -> Result<Point, ParseError> {
    let lower = s.trim().to_ascii_lowercase();
    let bytes = lower.as_bytes();
    if bytes.len() != 2 {
        return Err(ParseError::Vertex(s.to_string()));
    }
    let col = bytes[0].wrapping_sub(b'a') as usize;
    let row = bytes[1].wrapping_sub(b'1') as usize;
    if row >= N || col >= N {
        return Err(ParseError::Vertex(s.to_string()));
    }
    Ok((row, col))
}

/// Format a point as a vertex, the inverse of [`parse_coord`].
pub fn str_coord((row, col): Point) -> String {
    format!("{}{}", (b'a' + col as u8) as char, row + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_board_is_empty() {
        let b = create_empty_board();
        assert_eq!(b.empty_cells().len(), 9);
        assert!(!b.is_full());
        assert_eq!(b.winning_line(), None);
    }

    #[test]
    fn test_empty_cells_row_major() {
        let b = board("X.O/.X./O..");
        assert_eq!(b.empty_cells(), vec![(0, 1), (1, 0), (1, 2), (2, 1), (2, 2)]);
    }

    #[test]
    fn test_full_board() {
        let b = board("XOX/XOO/OXX");
        assert!(b.is_full());
        assert!(b.empty_cells().is_empty());
        assert_eq!(b.winning_line(), None);
        assert_eq!(b.score(Mark::X, Mark::O), DRAW);
    }

    #[test]
    fn test_has_won_each_kind_of_line() {
        assert!(board("XXX/OO./...").has_won(Mark::X));
        assert!(board("XO./XO./.O.").has_won(Mark::O));
        assert!(board("X.O/OX./..X").has_won(Mark::X));
        assert!(board("X.O/XO./O.X").has_won(Mark::O));
        assert!(!board("X.O/XO./O.X").has_won(Mark::X));
    }

    #[test]
    fn test_winning_line_scan_order() {
        // Column 0 and the main diagonal are both complete; columns come first.
        let b = board("XOO/XX./XOX");
        assert_eq!(b.winning_line(), Some([(0, 0), (1, 0), (2, 0)]));

        let b = board("O.X/OX./X..");
        assert_eq!(b.winning_line(), Some([(0, 2), (1, 1), (2, 0)]));
        assert_eq!(b.winner(), Some(Mark::X));
    }

    #[test]
    fn test_score() {
        let b = board("OOO/XX./X..");
        assert_eq!(b.score(Mark::O, Mark::X), WIN);
        assert_eq!(b.score(Mark::X, Mark::O), LOSS);
    }

    #[test]
    fn test_place_rejects_occupied_and_off_board() {
        let mut b = Board::new();
        assert!(b.place((1, 1), Mark::X).is_ok());
        assert_eq!(
            b.place((1, 1), Mark::O),
            Err(MoveError::Occupied { row: 1, col: 1 })
        );
        assert_eq!(
            b.place((3, 0), Mark::O),
            Err(MoveError::OutOfBounds { row: 3, col: 0 })
        );
        assert_eq!(b.get((1, 1)), Some(Mark::X));
        assert_eq!(b.to_move(), Mark::O);
    }

    #[test]
    fn test_set_and_clear() {
        let mut b = board("X../.../...");
        b.set((2, 2), Some(Mark::O));
        assert_eq!(b.get((2, 2)), Some(Mark::O));
        b.clear((2, 2));
        b.clear((0, 0));
        assert_eq!(b, Board::new());
    }

    #[test]
    fn test_parse_board_errors() {
        assert!("XX".parse::<Board>().is_err());
        assert!("XXXXXXXXXX".parse::<Board>().is_err());
        assert!("XX?/.../...".parse::<Board>().is_err());
    }

    #[test]
    fn test_coord_roundtrip() {
        for row in 0..N {
            for col in 0..N {
                assert_eq!(parse_coord(&str_coord((row, col))), Ok((row, col)));
            }
        }
        assert_eq!(parse_coord("C1"), Ok((0, 2)));
        assert!(parse_coord("d1").is_err());
        assert!(parse_coord("a0").is_err());
        assert!(parse_coord("a").is_err());
    }

    #[test]
    fn test_display() {
        let b = board("X../.O./...");
        assert_eq!(b.to_string(), "  a b c\n1 X . . \n2 . O . \n3 . . . \n");
    }
}

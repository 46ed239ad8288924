//! Tic-tac-toe on a 3x3 grid.
//!
//! Scoring: a completed line ends the game with score 1 credited to the player who
//! completed it. A full board without a line ends it with score 0, credited to the
//! player who filled the last cell.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;
use thiserror::Error;

use crate::game_state::{GameMove, GameState, MoveGenerator, Score, StateFlags, StateStatus};

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Places the mover's mark at `(row, col)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TicTacToeMove {
    pub row: u8,
    pub col: u8,
}

impl TicTacToeMove {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    fn index(self) -> Option<usize> {
        (self.row < 3 && self.col < 3).then(|| self.row as usize * 3 + self.col as usize)
    }
}

impl fmt::Display for TicTacToeMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TicTacToe {
    cells: [Option<Mark>; 9],
    player: Mark,
    score: Score,
    flags: StateFlags,
}

impl TicTacToe {
    pub fn new() -> Self {
        Self {
            cells: [None; 9],
            player: Mark::X,
            score: 0,
            flags: StateFlags::NONE,
        }
    }

    /// The canonical result of any rejected move.
    pub fn illegal() -> Self {
        Self {
            flags: StateFlags::ILLEGAL,
            ..Self::new()
        }
    }

    pub fn get(&self, row: u8, col: u8) -> Option<Mark> {
        TicTacToeMove::new(row, col)
            .index()
            .and_then(|index| self.cells[index])
    }

    /// Empty cells in row-major order; empty once the game is over.
    pub fn open_cells(&self) -> SmallVec<[TicTacToeMove; 9]> {
        if self.flags.status() != StateStatus::Live {
            return SmallVec::new();
        }
        (0..9u8)
            .filter(|&index| self.cells[index as usize].is_none())
            .map(|index| TicTacToeMove::new(index / 3, index % 3))
            .collect()
    }

    fn has_line(cells: &[Option<Mark>; 9], mark: Mark) -> bool {
        LINES
            .iter()
            .any(|line| line.iter().all(|&index| cells[index] == Some(mark)))
    }

    fn is_full(cells: &[Option<Mark>; 9]) -> bool {
        cells.iter().all(Option::is_some)
    }

    /// Builds the state after `mover` has just marked a cell of `cells`.
    fn after_move(cells: [Option<Mark>; 9], mover: Mark) -> Self {
        if Self::has_line(&cells, mover) {
            Self {
                cells,
                player: mover,
                score: 1,
                flags: StateFlags::TERMINAL,
            }
        } else if Self::is_full(&cells) {
            Self {
                cells,
                player: mover,
                score: 0,
                flags: StateFlags::TERMINAL,
            }
        } else {
            Self {
                cells,
                player: mover.opponent(),
                score: 0,
                flags: StateFlags::NONE,
            }
        }
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for TicTacToe {
    type Player = Mark;

    fn initial() -> Self {
        Self::new()
    }

    fn score(&self) -> Score {
        self.score
    }

    fn flags(&self) -> StateFlags {
        self.flags
    }

    fn player(&self) -> Mark {
        self.player
    }
}

impl GameMove for TicTacToeMove {
    type State = TicTacToe;

    fn successor(&self, state: &TicTacToe) -> TicTacToe {
        if state.flags.status() != StateStatus::Live {
            return TicTacToe::illegal();
        }

        match self.index() {
            Some(index) if state.cells[index].is_none() => {
                let mut cells = state.cells;
                cells[index] = Some(state.player);
                TicTacToe::after_move(cells, state.player)
            }
            _ => TicTacToe::illegal(),
        }
    }
}

/// Cycles through the open cells of a position in row-major order.
#[derive(Clone, Copy, Debug, Default)]
pub struct TicTacToeMoves;

impl MoveGenerator<TicTacToe> for TicTacToeMoves {
    type Move = TicTacToeMove;

    fn candidate(&self, state: &TicTacToe, index: usize) -> TicTacToeMove {
        let open = state.open_cells();
        if open.is_empty() {
            // A finished game has a single self-cycling candidate.
            return TicTacToeMove::new(0, 0);
        }
        open[index % open.len()]
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PositionError {
    #[error("expected 3 rows separated by '/', got {0}")]
    RowCount(usize),
    #[error("row {row} must have 3 cells, got {len}")]
    RowLength { row: usize, len: usize },
    #[error("unexpected character {0:?}, expected 'x', 'o' or '.'")]
    InvalidCell(char),
    #[error("X must have the same number of marks as O or one more")]
    MarkCount,
    #[error("both players have a completed line")]
    TwoWinners,
}

/// Parses rows like `"x.o/.x./..o"`. The player on turn follows from the mark counts,
/// and a completed line or full board yields a terminal state.
impl FromStr for TicTacToe {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.trim().split('/').collect();
        if rows.len() != 3 {
            return Err(PositionError::RowCount(rows.len()));
        }

        let mut cells = [None; 9];
        for (row, text) in rows.iter().enumerate() {
            let chars: Vec<char> = text.chars().collect();
            if chars.len() != 3 {
                return Err(PositionError::RowLength {
                    row,
                    len: chars.len(),
                });
            }
            for (col, c) in chars.into_iter().enumerate() {
                cells[row * 3 + col] = match c {
                    'x' | 'X' => Some(Mark::X),
                    'o' | 'O' => Some(Mark::O),
                    '.' => None,
                    other => return Err(PositionError::InvalidCell(other)),
                };
            }
        }

        let count = |mark| cells.iter().filter(|&&cell| cell == Some(mark)).count();
        let (xs, os) = (count(Mark::X), count(Mark::O));
        if xs != os && xs != os + 1 {
            return Err(PositionError::MarkCount);
        }

        let (x_line, o_line) = (
            TicTacToe::has_line(&cells, Mark::X),
            TicTacToe::has_line(&cells, Mark::O),
        );
        if x_line && o_line {
            return Err(PositionError::TwoWinners);
        }

        if xs + os == 0 {
            return Ok(TicTacToe::new());
        }

        // The last mark placed belongs to whoever is not on turn.
        let last_mover = if xs > os { Mark::X } else { Mark::O };
        if o_line && last_mover != Mark::O || x_line && last_mover != Mark::X {
            return Err(PositionError::MarkCount);
        }
        Ok(TicTacToe::after_move(cells, last_mover))
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            let line: String = (0..3)
                .map(|col| self.cells[row * 3 + col].map_or('.', Mark::to_char))
                .collect();
            writeln!(f, "{}", line)?;
        }
        write!(
            f,
            "player: {}, score: {}, flags: {:?}",
            self.player, self.score, self.flags
        )
    }
}

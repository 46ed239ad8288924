//! Reference games implementing the state contract.
//!
//! These are consumers of the engine, used by the tests, benchmarks and the binary.

pub mod nim;
pub mod random_tree;
pub mod tictactoe;

pub use nim::{Nim, NimMoves, Take};
pub use random_tree::{Branch, RandomTree, RandomTreeMoves};
pub use tictactoe::{Mark, TicTacToe, TicTacToeMove, TicTacToeMoves};

use std::fmt;

/// Player identifier for games that only need to tell the two sides apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    pub fn opponent(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::First => write!(f, "first"),
            Seat::Second => write!(f, "second"),
        }
    }
}

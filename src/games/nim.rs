//! Single-pile Nim: players alternately take 1, 2 or 3 objects, and whoever takes the
//! last object wins.

use std::fmt;

use crate::game_state::{GameMove, GameState, MoveGenerator, Score, StateFlags, StateStatus};

use super::Seat;

pub const MAX_TAKE: u8 = 3;
pub const DEFAULT_PILE: u8 = 13;

/// Removes the given number of objects from the pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Take(pub u8);

impl fmt::Display for Take {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "take {}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Nim {
    pile: u8,
    player: Seat,
    score: Score,
    flags: StateFlags,
}

impl Nim {
    /// A fresh game with `First` to move. An empty pile is already lost for `First`.
    pub fn with_pile(pile: u8) -> Self {
        if pile == 0 {
            return Self {
                pile,
                player: Seat::First,
                score: -1,
                flags: StateFlags::TERMINAL,
            };
        }
        Self {
            pile,
            player: Seat::First,
            score: 0,
            flags: StateFlags::NONE,
        }
    }

    /// The canonical result of any rejected move.
    pub fn illegal() -> Self {
        Self {
            pile: 0,
            player: Seat::First,
            score: 0,
            flags: StateFlags::ILLEGAL,
        }
    }

    pub fn pile(&self) -> u8 {
        self.pile
    }

    /// Number of distinct legal takes from this state.
    pub fn legal_take_count(&self) -> u8 {
        if self.flags.status() == StateStatus::Live {
            self.pile.min(MAX_TAKE)
        } else {
            0
        }
    }
}

impl GameState for Nim {
    type Player = Seat;

    fn initial() -> Self {
        Self::with_pile(DEFAULT_PILE)
    }

    fn score(&self) -> Score {
        self.score
    }

    fn flags(&self) -> StateFlags {
        self.flags
    }

    fn player(&self) -> Seat {
        self.player
    }
}

impl GameMove for Take {
    type State = Nim;

    fn successor(&self, state: &Nim) -> Nim {
        let Take(count) = *self;
        if state.flags.status() != StateStatus::Live
            || count == 0
            || count > MAX_TAKE
            || count > state.pile
        {
            return Nim::illegal();
        }

        let pile = state.pile - count;
        if pile == 0 {
            Nim {
                pile,
                player: state.player,
                score: 1,
                flags: StateFlags::TERMINAL,
            }
        } else {
            Nim {
                pile,
                player: state.player.opponent(),
                score: 0,
                flags: StateFlags::NONE,
            }
        }
    }
}

/// Cycles through `take 1..=min(3, pile)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NimMoves;

impl MoveGenerator<Nim> for NimMoves {
    type Move = Take;

    fn candidate(&self, state: &Nim, index: usize) -> Take {
        match state.legal_take_count() {
            // Taking nothing is never legal, so this cycles onto an illegal state.
            0 => Take(0),
            legal => Take(1 + (index % legal as usize) as u8),
        }
    }
}

impl fmt::Display for Nim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pile: {}, player: {}, score: {}, flags: {:?}",
            self.pile, self.player, self.score, self.flags
        )
    }
}

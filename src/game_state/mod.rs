//! Core traits a game must implement to be searched.
//!
//! A game plugs into the engine through three pieces:
//! - a `GameState` value type carrying score, flags and the player on turn,
//! - a `GameMove` descriptor that knows how to build the successor state,
//! - a `MoveGenerator` producing the Nth candidate move of a state.
//!
//! The generator never reports how many moves a state has. It must instead be
//! periodic: for every state there is a smallest `K >= 1` with
//! `candidate(state, i) == candidate(state, i + K)` for all `i`. The successor
//! enumerator infers `K` by watching for the first candidate to come around again.

mod flags;

use std::fmt::Debug;

pub use flags::{StateFlag, StateFlags, StateStatus};

/// Scores are credited to the state's `player`, who maximizes them.
///
/// The usable range is `-Score::MAX..=Score::MAX`. Searches flip the sign of scores
/// credited to the opponent, so `Score::MIN` is treated as `-Score::MAX`.
pub type Score = i16;

/// An immutable state of a two-player zero-sum game.
pub trait GameState: Clone + Debug + Send + Sync {
    /// Identifies the player on turn, or the player credited with a terminal score.
    type Player: Copy + Eq + Debug + Send + Sync;

    /// The starting position: score 0, no flags, first player on turn.
    fn initial() -> Self;

    fn score(&self) -> Score;

    fn flags(&self) -> StateFlags;

    fn player(&self) -> Self::Player;

    #[inline]
    fn status(&self) -> StateStatus {
        self.flags().status()
    }

    #[inline]
    fn is_terminal(&self) -> bool {
        self.status() == StateStatus::Terminal
    }

    #[inline]
    fn is_illegal(&self) -> bool {
        self.status() == StateStatus::Illegal
    }
}

/// A move descriptor. The engine never inspects it beyond value equality.
pub trait GameMove: Clone + PartialEq + Debug + Send + Sync {
    type State: GameState;

    /// Builds the state reached by playing this move from `state`.
    ///
    /// Must return an `Illegal` state when the move is not legal in `state`, and a
    /// `Terminal` state, scored for its `player`, when the move ends the game.
    fn successor(&self, state: &Self::State) -> Self::State;
}

/// Produces candidate moves for a state, cyclically.
pub trait MoveGenerator<S: GameState>: Sync {
    type Move: GameMove<State = S>;

    /// Returns the candidate move at `index`. Must be deterministic and periodic in
    /// `index`; a state without legal moves still returns a (self-cycling) candidate.
    fn candidate(&self, state: &S, index: usize) -> Self::Move;
}

/// Any plain function or closure of the right shape is a generator.
impl<S, M, F> MoveGenerator<S> for F
where
    S: GameState,
    M: GameMove<State = S>,
    F: Fn(&S, usize) -> M + Sync,
{
    type Move = M;

    #[inline]
    fn candidate(&self, state: &S, index: usize) -> M {
        self(state, index)
    }
}

//! Lazy enumeration of a state's successors.
//!
//! The enumerator turns a periodic `MoveGenerator` into a finite sequence of child
//! states. It remembers the candidates it has produced and stops as soon as one shows
//! up again, so the number of children is the generator's period for the state as long
//! as the moves within one period are distinct. Because index 0 is always defined, a
//! state with no legal moves still terminates after a single (self-cycling) step.
//!
//! A generator that never returns to its first candidate but settles into some other
//! cycle breaks the contract. Enumeration still ends at the first repeated candidate,
//! with a warning.

use log::warn;
use smallvec::SmallVec;

use crate::game_state::{GameMove, GameState, MoveGenerator, StateStatus};


/// Children collected in enumeration order. Most games have small branching factors.
pub type ChildList<S> = SmallVec<[S; 16]>;

/// Iterator over the successors of a single state, in candidate order.
///
/// Illegal successors are yielded like any other; the search strategies decide what to
/// do with them.
pub struct Successors<'a, S, G>
where
    S: GameState,
    G: MoveGenerator<S>,
{
    state: &'a S,
    move_generator: &'a G,
    seen: SmallVec<[G::Move; 16]>,
    index: usize,
    finished: bool,
}

impl<'a, S, G> Successors<'a, S, G>
where
    S: GameState,
    G: MoveGenerator<S>,
{
    pub fn new(move_generator: &'a G, state: &'a S) -> Self {
        Self {
            state,
            move_generator,
            seen: SmallVec::new(),
            index: 0,
            finished: false,
        }
    }

    /// Number of successors yielded so far.
    pub fn cursor(&self) -> usize {
        self.index
    }

    /// Yields the move descriptor along with each child.
    pub fn with_moves(self) -> WithMoves<'a, S, G> {
        WithMoves { inner: self }
    }

    fn next_move(&mut self) -> Option<G::Move> {
        if self.finished {
            return None;
        }

        let candidate = self.move_generator.candidate(self.state, self.index);
        if let Some(repeat) = self.seen.iter().position(|seen| *seen == candidate) {
            if repeat > 0 {
                warn!(
                    "move generator repeated candidate {} at index {} without returning to index 0: {:?}",
                    repeat, self.index, candidate
                );
            }
            self.finished = true;
            return None;
        }

        self.seen.push(candidate.clone());
        self.index += 1;
        Some(candidate)
    }
}

impl<'a, S, G> Iterator for Successors<'a, S, G>
where
    S: GameState,
    G: MoveGenerator<S>,
{
    type Item = S;

    fn next(&mut self) -> Option<S> {
        self.next_move()
            .map(|game_move| game_move.successor(self.state))
    }
}

impl<'a, S, G> std::iter::FusedIterator for Successors<'a, S, G>
where
    S: GameState,
    G: MoveGenerator<S>,
{
}

/// Adapter returned by `Successors::with_moves`.
pub struct WithMoves<'a, S, G>
where
    S: GameState,
    G: MoveGenerator<S>,
{
    inner: Successors<'a, S, G>,
}

impl<'a, S, G> Iterator for WithMoves<'a, S, G>
where
    S: GameState,
    G: MoveGenerator<S>,
{
    type Item = (G::Move, S);

    fn next(&mut self) -> Option<Self::Item> {
        let game_move = self.inner.next_move()?;
        let child = game_move.successor(self.inner.state);
        Some((game_move, child))
    }
}

/// Enumerates the children of `state`. Calling it again on the same state yields the
/// same sequence.
pub fn enumerate_children<'a, S, G>(move_generator: &'a G, state: &'a S) -> Successors<'a, S, G>
where
    S: GameState,
    G: MoveGenerator<S>,
{
    Successors::new(move_generator, state)
}

/// Collects the non-illegal children of `state`.
pub fn legal_children<S, G>(move_generator: &G, state: &S) -> ChildList<S>
where
    S: GameState,
    G: MoveGenerator<S>,
{
    enumerate_children(move_generator, state)
        .filter(|child| !child.is_illegal())
        .collect()
}

/// Counts the positions in the legal game tree below `state`, down to `depth` plies.
///
/// Every position reachable in `1..=depth` plies is counted once per path. Illegal
/// successors are not counted, terminal states are not expanded and the root itself
/// is not counted.
pub fn count_positions<S, G>(move_generator: &G, state: &S, depth: u8) -> usize
where
    S: GameState,
    G: MoveGenerator<S>,
{
    if depth == 0 || state.status() != StateStatus::Live {
        return 0;
    }

    enumerate_children(move_generator, state)
        .filter(|child| !child.is_illegal())
        .map(|child| 1 + count_positions(move_generator, &child, depth - 1))
        .sum()
}

//! A synthetic game tree grown from a seed.
//!
//! Every node is identified by the path of branches leading to it. The number of
//! branches, the scores and the odd illegal or early-terminal node are all drawn from
//! an `StdRng` seeded with the tree seed mixed with that path, so the same seed always
//! produces the same tree without storing it.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game_state::{GameMove, GameState, MoveGenerator, Score, StateFlags, StateStatus};

use super::Seat;

pub const DEFAULT_BRANCHING: u8 = 4;
pub const DEFAULT_HEIGHT: u8 = 6;

const LEAF_SCORE_RANGE: i16 = 100;
const HEURISTIC_SCORE_RANGE: i16 = 20;
const PATH_MULTIPLIER: u64 = 0x9E37_79B9_7F4A_7C15;

/// Follows the branch with the given index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Branch(pub u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RandomTree {
    seed: u64,
    path: u64,
    ply: u8,
    height: u8,
    branching: u8,
    player: Seat,
    score: Score,
    flags: StateFlags,
}

impl RandomTree {
    /// Root of the tree for `seed`. Nodes have between 1 and `branching` branches and
    /// every path ends in a terminal state after at most `height` plies.
    pub fn new(seed: u64, branching: u8, height: u8) -> Self {
        let flags = if height == 0 {
            StateFlags::TERMINAL
        } else {
            StateFlags::NONE
        };
        Self {
            seed,
            path: 0,
            ply: 0,
            height,
            branching: branching.max(1),
            player: Seat::First,
            score: 0,
            flags,
        }
    }

    /// The canonical result of any rejected move.
    pub fn illegal() -> Self {
        Self {
            seed: 0,
            path: 0,
            ply: 0,
            height: 0,
            branching: 1,
            player: Seat::First,
            score: 0,
            flags: StateFlags::ILLEGAL,
        }
    }

    pub fn ply(&self) -> u8 {
        self.ply
    }

    fn rng(&self, path: u64) -> StdRng {
        StdRng::seed_from_u64(self.seed ^ path)
    }

    /// Number of branches leaving this node, legal or not.
    pub fn branch_count(&self) -> u8 {
        if self.flags.status() != StateStatus::Live {
            return 0;
        }
        self.rng(self.path).gen_range(1..=self.branching)
    }

    fn child_path(&self, branch: u8) -> u64 {
        self.path
            .wrapping_mul(PATH_MULTIPLIER)
            .wrapping_add(branch as u64 + 1)
    }
}

impl Default for RandomTree {
    fn default() -> Self {
        Self::new(0, DEFAULT_BRANCHING, DEFAULT_HEIGHT)
    }
}

impl GameState for RandomTree {
    type Player = Seat;

    fn initial() -> Self {
        Self::default()
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

impl GameMove for Branch {
    type State = RandomTree;

    fn successor(&self, state: &RandomTree) -> RandomTree {
        let Branch(branch) = *self;
        if branch >= state.branch_count() {
            return RandomTree::illegal();
        }

        let path = state.child_path(branch);
        let mut rng = state.rng(path);

        // Branch 0 is always legal so every live node keeps at least one successor.
        if branch > 0 && rng.gen_ratio(1, 8) {
            return RandomTree::illegal();
        }

        let ply = state.ply + 1;
        let child = RandomTree {
            path,
            ply,
            ..*state
        };
        if ply >= state.height || rng.gen_ratio(1, 10) {
            RandomTree {
                player: state.player,
                score: rng.gen_range(-LEAF_SCORE_RANGE..=LEAF_SCORE_RANGE),
                flags: StateFlags::TERMINAL,
                ..child
            }
        } else {
            RandomTree {
                player: state.player.opponent(),
                score: rng.gen_range(-HEURISTIC_SCORE_RANGE..=HEURISTIC_SCORE_RANGE),
                flags: StateFlags::NONE,
                ..child
            }
        }
    }
}

/// Cycles through the branches of a node.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomTreeMoves;

impl MoveGenerator<RandomTree> for RandomTreeMoves {
    type Move = Branch;

    fn candidate(&self, state: &RandomTree, index: usize) -> Branch {
        match state.branch_count() {
            // Out of range, so a finished node cycles on a single illegal successor.
            0 => Branch(u8::MAX),
            count => Branch((index % count as usize) as u8),
        }
    }
}

impl fmt::Display for RandomTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ply: {}, path: {:#018x}, player: {}, score: {}, flags: {:?}",
            self.ply, self.path, self.player, self.score, self.flags
        )
    }
}

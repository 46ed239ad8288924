//! Plain minimax, exhaustive or depth-bounded.

#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::game_state::{GameState, MoveGenerator, Score};
use crate::successors::enumerate_children;

use super::{fold_best, leaf_value, live_leaf_value, Depth, SearchContext};

/// Computes the minimax value of `state` from the root player's perspective.
///
/// `depth` is the number of plies still allowed below `state`; `None` searches until
/// every branch reaches a terminal state.
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
pub(super) fn minimax<S, G>(
    context: &SearchContext,
    move_generator: &G,
    state: &S,
    depth: Option<Depth>,
    root_player: S::Player,
) -> Score
where
    S: GameState,
    G: MoveGenerator<S>,
{
    context.increment_position_count();

    if state.is_terminal() || depth == Some(Depth::ZERO) {
        return leaf_value(context, state, root_player);
    }

    let next_depth = depth.and_then(Depth::decrement);
    let maximizing = state.player() == root_player;
    let mut best = None;

    for child in enumerate_children(move_generator, state) {
        if child.is_illegal() {
            context.increment_illegal_count();
            continue;
        }

        let score = minimax(context, move_generator, &child, next_depth, root_player);
        best = Some(fold_best(best, score, maximizing));
    }

    best.unwrap_or_else(|| live_leaf_value(context, state, root_player))
}

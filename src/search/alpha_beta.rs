//! Alpha-beta pruned minimax.

use std::cmp::{max, min};

#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::game_state::{GameState, MoveGenerator, Score};
use crate::successors::enumerate_children;

use super::{fold_best, leaf_value, live_leaf_value, Depth, SearchContext};

/// Computes the value of `state` within the window `[alpha, beta]`.
///
/// Fail-soft: a value inside the window is exact, a value `<= alpha` is an upper bound
/// and a value `>= beta` is a lower bound. Successors past a cutoff are never built.
///
/// # Parameters
///
/// - `depth` - Plies still allowed below `state`, `None` for unbounded
/// - `alpha` - Best value the maximizing (root) player can already guarantee
/// - `beta` - Best value the minimizing player can already guarantee
#[allow(clippy::too_many_arguments)]
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
pub(super) fn alpha_beta<S, G>(
    context: &SearchContext,
    move_generator: &G,
    state: &S,
    depth: Option<Depth>,
    root_player: S::Player,
    mut alpha: Score,
    mut beta: Score,
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

        let score = alpha_beta(
            context,
            move_generator,
            &child,
            next_depth,
            root_player,
            alpha,
            beta,
        );
        best = Some(fold_best(best, score, maximizing));

        if maximizing {
            alpha = max(alpha, score);
        } else {
            beta = min(beta, score);
        }

        if alpha >= beta {
            context.increment_cutoff_count();
            break;
        }
    }

    best.unwrap_or_else(|| live_leaf_value(context, state, root_player))
}

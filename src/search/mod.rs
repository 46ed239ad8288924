//! Minimax search over any `GameState`.
//!
//! # Strategies
//!
//! - **Naive**: exhaustive minimax down to terminal states. Visits every node, so it
//!   serves as the correctness baseline.
//! - **Depth**: minimax that stops after a fixed number of plies and falls back on the
//!   state's own score.
//! - **Prune**: alpha-beta. Carries the window `[alpha, beta]` through the recursion
//!   and stops enumerating a node's successors once `alpha >= beta`. It picks the same
//!   move as naive minimax while visiting no more nodes. Combines with a depth bound.
//!
//! # Perspective
//!
//! A state's score is credited to its `player`. The search reports every value from the
//! root player's point of view: a state credited to the root player keeps its score,
//! any other state has it negated. A node maximizes when its `player` is the root
//! player and minimizes otherwise.
//!
//! # Move selection
//!
//! Among the root's children the first one (lowest enumeration index) reaching the best
//! value wins. Illegal children are skipped, and a live state without legal children
//! is scored as if it were terminal.
//!
//! # Parallel search
//!
//! With `SearchConfig::parallel` set, the root's children are evaluated on the rayon
//! pool. The pruned strategy then searches each root child with a full window, so the
//! result is the same as the sequential search.

mod alpha_beta;
mod context;
mod minimax;

#[cfg(test)]
mod tests;

use std::time::Instant;

use log::{debug, trace, warn};
use rayon::prelude::*;
use thiserror::Error;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::game_state::{GameState, MoveGenerator, Score, StateStatus};
use crate::successors::enumerate_children;

pub use context::{Depth, SearchConfig, SearchContext, Strategy};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SearchError {
    #[error("no available moves")]
    NoAvailableMoves,
    #[error("depth must not be negative, got {0}")]
    NegativeDepth(i32),
}

/// Value of a state from the root player's perspective. `Score::MIN` is read as
/// `-Score::MAX` so that negation is exact for every score.
#[inline]
fn perspective_score<S: GameState>(state: &S, root_player: S::Player) -> Score {
    let score = state.score().max(-Score::MAX);
    if state.player() == root_player {
        score
    } else {
        -score
    }
}

/// Scores a state from its own `score` without looking further.
fn leaf_value<S: GameState>(context: &SearchContext, state: &S, root_player: S::Player) -> Score {
    context.increment_leaf_count();
    perspective_score(state, root_player)
}

/// Scores a live state that turned out to have no legal successors.
fn live_leaf_value<S: GameState>(
    context: &SearchContext,
    state: &S,
    root_player: S::Player,
) -> Score {
    warn!(
        "state is not terminal but has no legal successors, scoring it as terminal: {:?}",
        state
    );
    leaf_value(context, state, root_player)
}

/// Folds a child's value into the running best for a max or min node.
#[inline]
fn fold_best(best: Option<Score>, score: Score, maximizing: bool) -> Score {
    match best {
        None => score,
        Some(best) if maximizing => best.max(score),
        Some(best) => best.min(score),
    }
}

/// Searches `state` for its best successor using the context's strategy.
///
/// The score of the chosen successor and the node counts are recorded on `context`.
///
/// # Returns
///
/// - `Ok(child)` - The first child, in enumeration order, with the best value
/// - `Err(SearchError::NoAvailableMoves)` - If `state` is terminal or illegal, or all
///   of its successors are illegal
#[must_use = "search returns the chosen successor"]
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
pub fn search<S, G>(
    context: &mut SearchContext,
    move_generator: &G,
    state: &S,
) -> Result<S, SearchError>
where
    S: GameState,
    G: MoveGenerator<S>,
{
    debug!(
        "{} search, depth: {:?}, parallel: {}",
        context.strategy(),
        context.search_depth(),
        context.is_parallel()
    );
    context.reset_stats();

    if state.status() != StateStatus::Live {
        return Err(SearchError::NoAvailableMoves);
    }

    let start = Instant::now();
    let (best_score, best_child) = if context.is_parallel() {
        search_root_parallel(context, move_generator, state)?
    } else {
        search_root_sequential(context, move_generator, state)?
    };

    let duration = start.elapsed();
    context.record_result(best_score, duration);
    debug!(
        "searched {} positions in {:?}, best score: {}",
        context.searched_position_count(),
        duration,
        best_score
    );

    Ok(best_child)
}

/// Scores one root child with the configured strategy.
fn evaluate_root_child<S, G>(
    context: &SearchContext,
    move_generator: &G,
    child: &S,
    root_player: S::Player,
    alpha: Score,
) -> Score
where
    S: GameState,
    G: MoveGenerator<S>,
{
    let depth = context.search_depth();
    if context.config().pruning {
        alpha_beta::alpha_beta(
            context,
            move_generator,
            child,
            depth,
            root_player,
            alpha,
            Score::MAX,
        )
    } else {
        minimax::minimax(context, move_generator, child, depth, root_player)
    }
}

fn search_root_sequential<S, G>(
    context: &SearchContext,
    move_generator: &G,
    state: &S,
) -> Result<(Score, S), SearchError>
where
    S: GameState,
    G: MoveGenerator<S>,
{
    let root_player = state.player();
    let mut best: Option<(Score, S)> = None;

    for (index, child) in enumerate_children(move_generator, state).enumerate() {
        if child.is_illegal() {
            context.increment_illegal_count();
            continue;
        }

        // The root always maximizes; anything not above the best so far cannot
        // replace it, so it only needs to be bounded from below.
        let alpha = best.as_ref().map_or(Score::MIN, |(score, _)| *score);
        let score = evaluate_root_child(context, move_generator, &child, root_player, alpha);
        trace!("root child {}: score {}", index, score);

        let improves = best
            .as_ref()
            .map_or(true, |(best_score, _)| score > *best_score);
        if improves {
            best = Some((score, child));
        }
    }

    best.ok_or(SearchError::NoAvailableMoves)
}

fn search_root_parallel<S, G>(
    context: &SearchContext,
    move_generator: &G,
    state: &S,
) -> Result<(Score, S), SearchError>
where
    S: GameState,
    G: MoveGenerator<S>,
{
    let root_player = state.player();
    let mut children: Vec<(usize, S)> = enumerate_children(move_generator, state)
        .enumerate()
        .filter(|(_, child)| {
            let illegal = child.is_illegal();
            if illegal {
                context.increment_illegal_count();
            }
            !illegal
        })
        .collect();

    let scores: Vec<Score> = children
        .par_iter()
        .map(|(index, child)| {
            let score = evaluate_root_child(context, move_generator, child, root_player, Score::MIN);
            trace!("root child {}: score {}", index, score);
            score
        })
        .collect();

    // First maximum in enumeration order, same as the sequential search.
    let mut best: Option<(Score, usize)> = None;
    for (position, score) in scores.into_iter().enumerate() {
        if best.map_or(true, |(best_score, _)| score > best_score) {
            best = Some((score, position));
        }
    }

    let (best_score, position) = best.ok_or(SearchError::NoAvailableMoves)?;
    let (_, child) = children.swap_remove(position);
    Ok((best_score, child))
}

/// Exhaustive minimax: returns the best successor of `state`.
pub fn search_naive<S, G>(move_generator: &G, state: &S) -> Result<S, SearchError>
where
    S: GameState,
    G: MoveGenerator<S>,
{
    let mut context = SearchContext::new(SearchConfig::naive());
    search(&mut context, move_generator, state)
}

/// Minimax with `depth` plies of lookahead below each of `state`'s successors.
pub fn search_depth<S, G>(move_generator: &G, state: &S, depth: i32) -> Result<S, SearchError>
where
    S: GameState,
    G: MoveGenerator<S>,
{
    let depth = Depth::try_from(depth)?;
    let mut context = SearchContext::new(SearchConfig::depth_bounded(depth));
    search(&mut context, move_generator, state)
}

/// Alpha-beta search to terminal states. Chooses the same successor as `search_naive`.
pub fn search_prune<S, G>(move_generator: &G, state: &S) -> Result<S, SearchError>
where
    S: GameState,
    G: MoveGenerator<S>,
{
    let mut context = SearchContext::new(SearchConfig::pruned());
    search(&mut context, move_generator, state)
}

/// Depth-bounded alpha-beta. Chooses the same successor as `search_depth`.
pub fn search_prune_depth<S, G>(
    move_generator: &G,
    state: &S,
    depth: i32,
) -> Result<S, SearchError>
where
    S: GameState,
    G: MoveGenerator<S>,
{
    let depth = Depth::try_from(depth)?;
    let mut context = SearchContext::new(SearchConfig::pruned_depth_bounded(depth));
    search(&mut context, move_generator, state)
}

/// Plays the context's strategy against itself from `state` until the game ends.
///
/// Returns every state of the game, `state` first. Stops early, with a warning, if a
/// live state has no legal successor.
pub fn play_out<S, G>(
    context: &mut SearchContext,
    move_generator: &G,
    state: &S,
) -> Result<Vec<S>, SearchError>
where
    S: GameState,
    G: MoveGenerator<S>,
{
    let mut states = vec![state.clone()];
    loop {
        let current = &states[states.len() - 1];
        if current.status() != StateStatus::Live {
            break;
        }

        match search(context, move_generator, current) {
            Ok(next) => states.push(next),
            Err(SearchError::NoAvailableMoves) => {
                warn!("live state has no legal successors, ending playout");
                break;
            }
            Err(err) => return Err(err),
        }
    }
    Ok(states)
}

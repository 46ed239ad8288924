//! Common types re-exported for convenience.

pub use crate::game_state::{
    GameMove, GameState, MoveGenerator, Score, StateFlag, StateFlags, StateStatus,
};
pub use crate::search::{
    play_out, search, search_depth, search_naive, search_prune, search_prune_depth, Depth,
    SearchConfig, SearchContext, SearchError, Strategy,
};
pub use crate::successors::{count_positions, enumerate_children, legal_children};

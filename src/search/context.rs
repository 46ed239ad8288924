//! Search configuration, statistics and the context that carries them.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::game_state::Score;

use super::SearchError;

/// A non-negative number of plies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Depth(u32);

impl Depth {
    pub const ZERO: Depth = Depth(0);

    pub const fn new(plies: u32) -> Self {
        Depth(plies)
    }

    pub const fn plies(self) -> u32 {
        self.0
    }

    /// One ply shallower. `None` once the bound is exhausted.
    pub fn decrement(self) -> Option<Depth> {
        self.0.checked_sub(1).map(Depth)
    }
}

impl TryFrom<i32> for Depth {
    type Error = SearchError;

    fn try_from(plies: i32) -> Result<Self, Self::Error> {
        u32::try_from(plies)
            .map(Depth)
            .map_err(|_| SearchError::NegativeDepth(plies))
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The four ways the engine can search a tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    Naive,
    Depth,
    Prune,
    PruneDepth,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Naive,
        Strategy::Depth,
        Strategy::Prune,
        Strategy::PruneDepth,
    ];

    pub fn is_depth_bounded(self) -> bool {
        matches!(self, Strategy::Depth | Strategy::PruneDepth)
    }

    pub fn is_pruned(self) -> bool {
        matches!(self, Strategy::Prune | Strategy::PruneDepth)
    }

    /// Builds a config for this strategy. `depth` is validated only for the
    /// depth-bounded strategies and ignored otherwise.
    pub fn config(self, depth: i32) -> Result<SearchConfig, SearchError> {
        let depth = if self.is_depth_bounded() {
            Some(Depth::try_from(depth)?)
        } else {
            None
        };
        Ok(SearchConfig {
            depth,
            pruning: self.is_pruned(),
            parallel: false,
        })
    }
}

impl FromStr for Strategy {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "naive" => Ok(Strategy::Naive),
            "depth" => Ok(Strategy::Depth),
            "prune" | "alpha-beta" => Ok(Strategy::Prune),
            "prune-depth" => Ok(Strategy::PruneDepth),
            _ => Err("invalid strategy; options are: naive, depth, prune, prune-depth"),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Naive => "naive",
            Strategy::Depth => "depth",
            Strategy::Prune => "prune",
            Strategy::PruneDepth => "prune-depth",
        };
        write!(f, "{}", name)
    }
}

/// Search configuration parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies of lookahead below each root child. `None` searches to terminal states.
    pub depth: Option<Depth>,
    pub pruning: bool,
    /// Evaluate the root's children on the rayon thread pool.
    pub parallel: bool,
}

impl SearchConfig {
    pub fn naive() -> Self {
        Self {
            depth: None,
            pruning: false,
            parallel: false,
        }
    }

    pub fn depth_bounded(depth: Depth) -> Self {
        Self {
            depth: Some(depth),
            ..Self::naive()
        }
    }

    pub fn pruned() -> Self {
        Self {
            pruning: true,
            ..Self::naive()
        }
    }

    pub fn pruned_depth_bounded(depth: Depth) -> Self {
        Self {
            depth: Some(depth),
            pruning: true,
            parallel: false,
        }
    }

    pub fn strategy(&self) -> Strategy {
        match (self.pruning, self.depth.is_some()) {
            (false, false) => Strategy::Naive,
            (false, true) => Strategy::Depth,
            (true, false) => Strategy::Prune,
            (true, true) => Strategy::PruneDepth,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::pruned()
    }
}

/// Statistics collected during search.
struct SearchStats {
    position_count: AtomicUsize,
    leaf_count: AtomicUsize,
    illegal_count: AtomicUsize,
    cutoff_count: AtomicUsize,
    last_score: Option<Score>,
    last_duration: Option<Duration>,
}

impl SearchStats {
    fn new() -> Self {
        Self {
            position_count: AtomicUsize::new(0),
            leaf_count: AtomicUsize::new(0),
            illegal_count: AtomicUsize::new(0),
            cutoff_count: AtomicUsize::new(0),
            last_score: None,
            last_duration: None,
        }
    }

    fn reset(&mut self) {
        self.last_score = None;
        self.last_duration = None;
        self.position_count.store(0, Ordering::SeqCst);
        self.leaf_count.store(0, Ordering::SeqCst);
        self.illegal_count.store(0, Ordering::SeqCst);
        self.cutoff_count.store(0, Ordering::SeqCst);
    }

    fn record_result(&mut self, score: Score, duration: Duration) {
        self.last_score = Some(score);
        self.last_duration = Some(duration);
    }
}

/// Carries the configuration of a search and the statistics of the last run.
///
/// The counters are atomics so the context can be shared across the threads of a
/// parallel root search.
pub struct SearchContext {
    config: SearchConfig,
    stats: SearchStats,
}

impl SearchContext {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            stats: SearchStats::new(),
        }
    }

    pub fn with_parallel(config: SearchConfig, parallel: bool) -> Self {
        Self::new(SearchConfig { parallel, ..config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn strategy(&self) -> Strategy {
        self.config.strategy()
    }

    pub fn search_depth(&self) -> Option<Depth> {
        self.config.depth
    }

    pub fn set_parallel(&mut self, parallel: bool) {
        self.config.parallel = parallel;
    }

    pub fn is_parallel(&self) -> bool {
        self.config.parallel
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Nodes whose value was computed, root children included.
    pub fn searched_position_count(&self) -> usize {
        self.stats.position_count.load(Ordering::SeqCst)
    }

    /// Nodes scored from their own `score`: terminal states, depth-bound leaves and
    /// live states without legal successors.
    pub fn leaf_count(&self) -> usize {
        self.stats.leaf_count.load(Ordering::SeqCst)
    }

    /// Illegal successors skipped.
    pub fn illegal_count(&self) -> usize {
        self.stats.illegal_count.load(Ordering::SeqCst)
    }

    /// Times the alpha-beta window closed and the remaining siblings were skipped.
    pub fn cutoff_count(&self) -> usize {
        self.stats.cutoff_count.load(Ordering::SeqCst)
    }

    /// Value of the chosen child, from the root player's perspective.
    pub fn last_score(&self) -> Option<Score> {
        self.stats.last_score
    }

    pub fn last_search_duration(&self) -> Option<Duration> {
        self.stats.last_duration
    }

    pub(super) fn record_result(&mut self, score: Score, duration: Duration) {
        self.stats.record_result(score, duration);
    }

    pub(super) fn increment_position_count(&self) {
        self.stats.position_count.fetch_add(1, Ordering::SeqCst);
    }

    pub(super) fn increment_leaf_count(&self) {
        self.stats.leaf_count.fetch_add(1, Ordering::SeqCst);
    }

    pub(super) fn increment_illegal_count(&self) {
        self.stats.illegal_count.fetch_add(1, Ordering::SeqCst);
    }

    pub(super) fn increment_cutoff_count(&self) {
        self.stats.cutoff_count.fetch_add(1, Ordering::SeqCst);
    }
}

impl Default for SearchContext {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

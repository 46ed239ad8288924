//! Count positions command - count the positions of the game tree at each depth.

use std::fmt::Display;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::time::{Duration, Instant};

use gamesearch::game_state::{GameState, MoveGenerator};
use gamesearch::search::{search, SearchContext, SearchError, Strategy};
use gamesearch::successors::count_positions;
use structopt::StructOpt;

use super::util::{exit_on_error, GameArgs, GameRunner};
use super::Command;

#[derive(Clone, Copy, Debug)]
pub enum CountPositionsStrategy {
    /// Every legal position.
    All,
    /// The positions a search strategy visits.
    Search(Strategy),
}

impl FromStr for CountPositionsStrategy {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(CountPositionsStrategy::All),
            _ => s
                .parse()
                .map(CountPositionsStrategy::Search)
                .map_err(|_| "invalid strategy; options are: all, naive, depth, prune, prune-depth"),
        }
    }
}

impl CountPositionsStrategy {
    /// Depths to count at, up to `max`. Unbounded searches ignore the depth and are
    /// run once, at `max`.
    fn depths(self, max: u8) -> RangeInclusive<u8> {
        match self {
            CountPositionsStrategy::Search(strategy) if !strategy.is_depth_bounded() => {
                max.max(1)..=max
            }
            _ => 1..=max,
        }
    }
}

#[derive(StructOpt)]
pub struct CountPositionsArgs {
    #[structopt(flatten)]
    pub game: GameArgs,
    #[structopt(short, long, default_value = "4")]
    pub depth: u8,
    #[structopt(short, long, default_value = "all")]
    pub strategy: CountPositionsStrategy,
    #[structopt(short, long)]
    pub parallel: bool,
}

impl Command for CountPositionsArgs {
    fn execute(self) {
        let result = self.game.dispatch(CountPositions {
            depth: self.depth,
            strategy: self.strategy,
            parallel: self.parallel,
        });
        exit_on_error(result);
    }
}

struct CountPositions {
    depth: u8,
    strategy: CountPositionsStrategy,
    parallel: bool,
}

impl GameRunner for CountPositions {
    fn run<S, G>(self, move_generator: &G, state: S) -> Result<(), SearchError>
    where
        S: GameState + Display,
        G: MoveGenerator<S>,
    {
        let mut total_positions = 0;
        let mut total_duration = Duration::ZERO;

        for depth in self.strategy.depths(self.depth) {
            let start = Instant::now();
            let count = match self.strategy {
                CountPositionsStrategy::All => count_positions(move_generator, &state, depth),
                CountPositionsStrategy::Search(strategy) => {
                    // Root successors sit one ply down already.
                    let config = strategy.config(i32::from(depth) - 1)?;
                    let mut context = SearchContext::with_parallel(config, self.parallel);
                    search(&mut context, move_generator, &state)?;
                    context.searched_position_count()
                }
            };
            let duration = start.elapsed();
            let positions_per_second = count as f64 / duration.as_secs_f64();

            total_positions += count;
            total_duration += duration;

            println!(
                "depth: {}, positions: {}, positions per second: {}",
                depth, count, positions_per_second
            );
        }

        println!(
            "total positions: {}, total duration: {:?}, positions per second: {}",
            total_positions,
            total_duration,
            total_positions as f64 / total_duration.as_secs_f64()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count_strategy() {
        assert!(matches!(
            "all".parse::<CountPositionsStrategy>(),
            Ok(CountPositionsStrategy::All)
        ));
        assert!(matches!(
            "prune-depth".parse::<CountPositionsStrategy>(),
            Ok(CountPositionsStrategy::Search(Strategy::PruneDepth))
        ));
        assert!("every".parse::<CountPositionsStrategy>().is_err());
    }

    #[test]
    fn test_unbounded_strategies_count_once() {
        use CountPositionsStrategy::{All, Search};
        let depths = |strategy: CountPositionsStrategy, max| -> Vec<u8> {
            strategy.depths(max).collect()
        };

        assert_eq!(depths(All, 4), vec![1, 2, 3, 4]);
        assert_eq!(depths(Search(Strategy::Depth), 3), vec![1, 2, 3]);
        assert_eq!(depths(Search(Strategy::PruneDepth), 2), vec![1, 2]);
        assert_eq!(depths(Search(Strategy::Naive), 4), vec![4]);
        assert_eq!(depths(Search(Strategy::Prune), 4), vec![4]);
        assert!(depths(Search(Strategy::Prune), 0).is_empty());
    }
}

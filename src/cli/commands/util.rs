//! Shared utilities for CLI commands.

use std::fmt::Display;
use std::str::FromStr;

use gamesearch::game_state::{GameState, MoveGenerator};
use gamesearch::games::{Nim, NimMoves, RandomTree, RandomTreeMoves, TicTacToe, TicTacToeMoves};
use gamesearch::search::{SearchContext, SearchError, Strategy};
use structopt::StructOpt;

#[derive(Clone, Copy, Debug)]
pub enum GameKind {
    TicTacToe,
    Nim,
    Random,
}

impl FromStr for GameKind {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tictactoe" => Ok(GameKind::TicTacToe),
            "nim" => Ok(GameKind::Nim),
            "random" => Ok(GameKind::Random),
            _ => Err("invalid game; options are: tictactoe, nim, random"),
        }
    }
}

/// Selects the game and its starting state.
#[derive(StructOpt)]
pub struct GameArgs {
    #[structopt(short, long, default_value = "tictactoe")]
    pub game: GameKind,
    #[structopt(
        long,
        help = "Tic-tac-toe starting position, rows separated by '/' (e.g. x.o/.x./...)"
    )]
    pub position: Option<TicTacToe>,
    #[structopt(long, default_value = "13", help = "Nim pile size")]
    pub pile: u8,
    #[structopt(long, default_value = "0", help = "Random tree seed")]
    pub seed: u64,
    #[structopt(long, default_value = "4", help = "Random tree maximum branching")]
    pub branching: u8,
    #[structopt(long, default_value = "6", help = "Random tree height")]
    pub height: u8,
}

/// Selects the search strategy.
#[derive(StructOpt)]
pub struct SearchArgs {
    #[structopt(short, long, default_value = "prune")]
    pub strategy: Strategy,
    #[structopt(
        short,
        long,
        default_value = "4",
        allow_hyphen_values = true,
        help = "Plies of lookahead below each successor, for depth and prune-depth"
    )]
    pub depth: i32,
    #[structopt(short, long, help = "Search the root's successors in parallel")]
    pub parallel: bool,
}

impl SearchArgs {
    pub fn context(&self) -> Result<SearchContext, SearchError> {
        let config = self.strategy.config(self.depth)?;
        Ok(SearchContext::with_parallel(config, self.parallel))
    }
}

/// A command body that works for any game.
pub(crate) trait GameRunner {
    fn run<S, G>(self, move_generator: &G, state: S) -> Result<(), SearchError>
    where
        S: GameState + Display,
        G: MoveGenerator<S>;
}

impl GameArgs {
    /// Hands the selected game's generator and starting state to `runner`.
    pub(crate) fn dispatch<R: GameRunner>(&self, runner: R) -> Result<(), SearchError> {
        match self.game {
            GameKind::TicTacToe => {
                runner.run(&TicTacToeMoves, self.position.unwrap_or_default())
            }
            GameKind::Nim => runner.run(&NimMoves, Nim::with_pile(self.pile)),
            GameKind::Random => runner.run(
                &RandomTreeMoves,
                RandomTree::new(self.seed, self.branching, self.height),
            ),
        }
    }
}

pub(crate) fn exit_on_error(result: Result<(), SearchError>) {
    if let Err(err) = result {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

/// Summary of the last search, one `*` line per statistic.
pub(crate) fn format_stats(context: &SearchContext) -> String {
    format!(
        "* Score: {}\n* Positions searched: {} (strategy: {}, depth: {})\n* Cutoffs: {}, illegal successors: {}\n* Move took: {}",
        context
            .last_score()
            .map_or("-".to_string(), |s| s.to_string()),
        context.searched_position_count(),
        context.strategy(),
        context
            .search_depth()
            .map_or("-".to_string(), |d| d.to_string()),
        context.cutoff_count(),
        context.illegal_count(),
        context
            .last_search_duration()
            .map_or("-".to_string(), |d| format!("{:?}", d))
    )
}

//! Best move command - determine the best successor of a starting state.

use std::fmt::Display;

use gamesearch::game_state::{GameState, MoveGenerator};
use gamesearch::search::{search, SearchContext, SearchError};
use structopt::StructOpt;

use super::util::{exit_on_error, format_stats, GameArgs, GameRunner, SearchArgs};
use super::Command;

#[derive(StructOpt)]
pub struct BestMoveArgs {
    #[structopt(flatten)]
    pub game: GameArgs,
    #[structopt(flatten)]
    pub search: SearchArgs,
}

impl Command for BestMoveArgs {
    fn execute(self) {
        let result = self
            .search
            .context()
            .and_then(|context| self.game.dispatch(BestMove { context }));
        exit_on_error(result);
    }
}

struct BestMove {
    context: SearchContext,
}

impl GameRunner for BestMove {
    fn run<S, G>(mut self, move_generator: &G, state: S) -> Result<(), SearchError>
    where
        S: GameState + Display,
        G: MoveGenerator<S>,
    {
        let best = search(&mut self.context, move_generator, &state)?;
        println!("{}", best);
        println!("{}", format_stats(&self.context));
        Ok(())
    }
}

//! Compare command - run every strategy on the same starting state.

use std::fmt::Display;

use gamesearch::game_state::{GameState, MoveGenerator};
use gamesearch::search::{search, SearchContext, SearchError, Strategy};
use structopt::StructOpt;

use super::util::{exit_on_error, format_stats, GameArgs, GameRunner};
use super::Command;

#[derive(StructOpt)]
pub struct CompareArgs {
    #[structopt(flatten)]
    pub game: GameArgs,
    #[structopt(
        short,
        long,
        default_value = "4",
        allow_hyphen_values = true,
        help = "Plies of lookahead for the depth-bounded strategies"
    )]
    pub depth: i32,
    #[structopt(short, long)]
    pub parallel: bool,
}

impl Command for CompareArgs {
    fn execute(self) {
        let result = self.game.dispatch(Compare {
            depth: self.depth,
            parallel: self.parallel,
        });
        exit_on_error(result);
    }
}

struct Compare {
    depth: i32,
    parallel: bool,
}

impl GameRunner for Compare {
    fn run<S, G>(self, move_generator: &G, state: S) -> Result<(), SearchError>
    where
        S: GameState + Display,
        G: MoveGenerator<S>,
    {
        println!("{}\n", state);

        for strategy in Strategy::ALL {
            let config = strategy.config(self.depth)?;
            let mut context = SearchContext::with_parallel(config, self.parallel);
            let best = search(&mut context, move_generator, &state)?;

            println!("== {}", strategy);
            println!("{}", best);
            println!("{}\n", format_stats(&context));
        }
        Ok(())
    }
}

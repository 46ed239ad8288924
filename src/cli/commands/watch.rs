//! Watch command - watch the computer play against itself.

use std::fmt::Display;
use std::thread;
use std::time::Duration;

use gamesearch::game_state::{GameState, MoveGenerator, StateStatus};
use gamesearch::search::{search, SearchContext, SearchError};
use structopt::StructOpt;

use super::util::{exit_on_error, format_stats, GameArgs, GameRunner, SearchArgs};
use super::Command;

#[derive(StructOpt)]
pub struct WatchArgs {
    #[structopt(flatten)]
    pub game: GameArgs,
    #[structopt(flatten)]
    pub search: SearchArgs,
    #[structopt(
        long = "delay",
        default_value = "500",
        help = "Delay between moves in milliseconds"
    )]
    pub delay_ms: u64,
}

impl Command for WatchArgs {
    fn execute(self) {
        let delay = Duration::from_millis(self.delay_ms);
        let result = self
            .search
            .context()
            .and_then(|context| self.game.dispatch(Watch { context, delay }));
        exit_on_error(result);
    }
}

struct Watch {
    context: SearchContext,
    delay: Duration,
}

impl GameRunner for Watch {
    fn run<S, G>(mut self, move_generator: &G, state: S) -> Result<(), SearchError>
    where
        S: GameState + Display,
        G: MoveGenerator<S>,
    {
        println!("{}\n", state);

        let mut current = state;
        while current.status() == StateStatus::Live {
            let next = search(&mut self.context, move_generator, &current)?;
            println!("{}", next);
            println!("{}\n", format_stats(&self.context));
            current = next;

            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
        }

        println!(
            "game over: score {} for {:?}",
            current.score(),
            current.player()
        );
        Ok(())
    }
}

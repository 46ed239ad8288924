//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{
    best_move::BestMoveArgs, compare::CompareArgs, count_positions::CountPositionsArgs,
    watch::WatchArgs,
};

#[derive(StructOpt)]
#[structopt(
    name = "gamesearch",
    about = "Minimax and alpha-beta search over small two-player games"
)]
pub enum Gamesearch {
    #[structopt(
        name = "watch",
        about = "Watch the computer play a game against itself with the given `--strategy` (default: prune). Choose the game with `--game` (default: tictactoe)."
    )]
    Watch(WatchArgs),
    #[structopt(
        name = "best-move",
        about = "Search the starting state of the chosen `--game` and print the best successor with its score. A tic-tac-toe position can be given with `--position`, e.g. `x.o/.x./...`."
    )]
    BestMove(BestMoveArgs),
    #[structopt(
        name = "count-positions",
        about = "Count the positions of the game tree for each depth up to `--depth` (default: 4), and report the time it took to do so. By default this enumerates every legal position; pass a search `--strategy` to count the positions that strategy visits instead."
    )]
    CountPositions(CountPositionsArgs),
    #[structopt(
        name = "compare",
        about = "Run every strategy on the same starting state and report the chosen successor, its score, the positions searched and the time taken for each."
    )]
    Compare(CompareArgs),
}

impl crate::cli::commands::Command for Gamesearch {
    fn execute(self) {
        macro_rules! execute_command {
            ($($variant:ident($cmd:ident)),+ $(,)?) => {
                match self {
                    $(Self::$variant($cmd) => $cmd.execute(),)+
                }
            };
        }

        execute_command! {
            Watch(cmd),
            BestMove(cmd),
            CountPositions(cmd),
            Compare(cmd),
        }
    }
}

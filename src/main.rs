mod cli;

use structopt::StructOpt;

use cli::commands::Command;
use cli::Gamesearch;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    #[cfg(feature = "instrumentation")]
    gamesearch::instrumentation::init_tracing();

    Gamesearch::from_args().execute();

    #[cfg(feature = "instrumentation")]
    gamesearch::instrumentation::print_timing_statistics();
}

//! Generic two-player adversarial search.
//!
//! A game plugs in through the traits in [`game_state`]; [`successors`] turns a
//! periodic move generator into a finite list of children and [`search`] picks the
//! best successor with minimax or alpha-beta, optionally depth-bounded.

pub mod game_state;
pub mod games;
#[cfg(feature = "instrumentation")]
pub mod instrumentation;
pub mod prelude;
pub mod search;
pub mod successors;

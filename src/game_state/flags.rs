//! Status markers a game state can carry.

use std::fmt;

/// The two status markers the search engine interprets. Any other status a game
/// wants to track belongs in its own payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StateFlag {
    /// No further moves should be generated; the state is a leaf.
    Terminal,
    /// The state came from a rejected move attempt and is never chosen.
    Illegal,
}

impl StateFlag {
    #[inline]
    const fn bit(self) -> u8 {
        match self {
            StateFlag::Terminal => 0b01,
            StateFlag::Illegal => 0b10,
        }
    }
}

/// A set of `StateFlag`s, stored as a bitmask.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StateFlags(u8);

impl StateFlags {
    pub const NONE: StateFlags = StateFlags(0);
    pub const TERMINAL: StateFlags = StateFlags(StateFlag::Terminal.bit());
    pub const ILLEGAL: StateFlags = StateFlags(StateFlag::Illegal.bit());

    pub fn contains(self, flag: StateFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    pub fn insert(&mut self, flag: StateFlag) {
        self.0 |= flag.bit();
    }

    pub fn remove(&mut self, flag: StateFlag) {
        self.0 &= !flag.bit();
    }

    pub fn with(mut self, flag: StateFlag) -> Self {
        self.insert(flag);
        self
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Collapses the flags into the single status the search acts on.
    /// `Illegal` takes precedence over `Terminal` when both are set.
    pub fn status(self) -> StateStatus {
        if self.contains(StateFlag::Illegal) {
            StateStatus::Illegal
        } else if self.contains(StateFlag::Terminal) {
            StateStatus::Terminal
        } else {
            StateStatus::Live
        }
    }
}

impl From<StateFlag> for StateFlags {
    fn from(flag: StateFlag) -> Self {
        StateFlags(flag.bit())
    }
}

impl FromIterator<StateFlag> for StateFlags {
    fn from_iter<I: IntoIterator<Item = StateFlag>>(iter: I) -> Self {
        iter.into_iter()
            .fold(StateFlags::NONE, |flags, flag| flags.with(flag))
    }
}

impl fmt::Debug for StateFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        for flag in [StateFlag::Terminal, StateFlag::Illegal] {
            if self.contains(flag) {
                set.entry(&flag);
            }
        }
        set.finish()
    }
}

/// How the search treats a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateStatus {
    Live,
    Terminal,
    Illegal,
}

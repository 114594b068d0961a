use std::{fmt::Display, str::FromStr};

use crate::ConfigError;

mod dfa;
pub use dfa::{Dfa, State, StateIndex, Symbol};

mod builder;
pub use builder::DfaBuilder;

mod canonical;
#[cfg(feature = "minimize")]
pub use canonical::canonical_automaton;
pub use canonical::{build, AutomatonBuilder};

mod reachable;
pub use reachable::MinimalRepresentatives;

/// Determines which words over the generators an automaton built by [`AutomatonBuilder`]
/// accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// All reduced words, i.e. expressions of minimal length, of every group element.
    Reduced,
    /// Only the lexicographically smallest reduced word of every group element.
    #[default]
    Shortlex,
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reduced" => Ok(Mode::Reduced),
            "shortlex" => Ok(Mode::Shortlex),
            other => Err(ConfigError::UnsupportedMode(other.to_string())),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Reduced => write!(f, "reduced"),
            Mode::Shortlex => write!(f, "shortlex"),
        }
    }
}

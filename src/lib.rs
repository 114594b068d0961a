//! Automata recognizing canonical words in Coxeter groups.
//!
//! A Coxeter group is described by a [`coxeter::CoxeterMatrix`], from which the finite set of
//! minimal roots and the action of the simple reflections on them is computed as a
//! [`coxeter::ReflectionTable`]. Following Brink and Howlett, subsets of minimal roots are the
//! states of a deterministic finite automaton whose accepted words over the generators are
//! exactly the reduced words of the group, or, in [`automaton::Mode::Shortlex`], exactly the
//! shortlex normal forms. The automaton is built by [`automaton::AutomatonBuilder`] through a
//! breadth-first subset construction and can afterwards be minimized with Hopcroft's partition
//! refinement algorithm (see `Dfa::minimize`, feature gated behind `minimize`).
//!
//! The resulting [`Dfa`] stores its states in a flat vector addressed by [`StateIndex`], with
//! transitions as maps from generator indices to state indices. It can be queried directly,
//! used to enumerate canonical words, printed as a transition table or exported in the DOT
//! format of graphviz.
//!
//! ```
//! use coxeter_automata::prelude::*;
//!
//! // the symmetric group on four letters
//! let matrix = CoxeterMatrix::from_diagram(&[3, 2, 3]).unwrap();
//! let table = ReflectionTable::from_coxeter_matrix(&matrix).unwrap();
//! let dfa = build(&table, 3, Mode::Shortlex).unwrap();
//! assert_eq!(dfa.size(), 10);
//! assert_eq!(dfa.words_up_to(6).len(), 24);
//! ```
//!
//! With the `minimize` feature, `canonical_automaton` goes through all of
//! these steps at once and returns the minimal automaton, which has 7 states here.
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use coxeter_automata::prelude::*;` should be enough to use the package.
pub mod prelude {
    #[cfg(feature = "minimize")]
    pub use super::automaton::canonical_automaton;
    pub use super::{
        automaton::{build, AutomatonBuilder, Dfa, DfaBuilder, Mode, State, StateIndex, Symbol},
        coxeter::{CoxeterMatrix, MinimalRoots, ReflectionTable, RootSystemOptions, INFINITY},
        dot::Dottable,
        math,
        math::RootSet,
        ConfigError, Show,
    };
}

/// This module contains some definitions of mathematical objects which are used throughout the crate and
/// do not really fit to the top level.
pub mod math;

mod error;
pub use error::ConfigError;

/// Coxeter matrices, minimal roots and the reflection tables derived from them.
pub mod coxeter;

/// Defines the deterministic finite automata and their construction from reflection tables.
pub mod automaton;
pub use automaton::{Dfa, StateIndex, Symbol};

/// Contains the implementation of Hopcroft's minimization algorithm. This is feature gated behind the `minimize` feature.
#[cfg(feature = "minimize")]
pub mod minimization;

/// Export of automata in the DOT format of graphviz.
pub mod dot;

/// Implements the generation of random automata.
#[cfg(feature = "random")]
pub mod random;

/// Helper trait which can be used to display states, transitions and such.
pub trait Show {
    /// Returns a human readable representation of `self`, for a state index that should be
    /// for example q0, q1, q2, ... and for a word over the generators it should be s0s2s1.
    /// Just use something that makes sense. This is mainly used for debugging purposes.
    fn show(&self) -> String;
}

impl Show for usize {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for Option<usize> {
    fn show(&self) -> String {
        match self {
            None => "-".to_string(),
            Some(x) => x.show(),
        }
    }
}

impl Show for bool {
    fn show(&self) -> String {
        match self {
            true => "+",
            false => "-",
        }
        .to_string()
    }
}

impl Show for [Symbol] {
    fn show(&self) -> String {
        if self.is_empty() {
            return "ε".to_string();
        }
        itertools::Itertools::join(&mut self.iter().map(|s| format!("s{s}")), "")
    }
}

impl Show for Vec<Symbol> {
    fn show(&self) -> String {
        self.as_slice().show()
    }
}

impl<S: Show + ?Sized> Show for &S {
    fn show(&self) -> String {
        S::show(*self)
    }
}

#[cfg(test)]
mod tests {
    use crate::Show;

    #[test]
    fn show_words() {
        assert_eq!(vec![0, 2, 1].show(), "s0s2s1");
        assert_eq!(Vec::<usize>::new().show(), "ε");
        assert_eq!(true.show(), "+");
        assert_eq!(None::<usize>.show(), "-");
    }
}

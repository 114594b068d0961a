use std::collections::BTreeSet;

use super::{Dfa, State, StateIndex, Symbol};

/// Helper struct for the construction of a [`Dfa`] from a list of edges and a list of colors,
/// where the color of a state is whether it is accepting.
///
/// # Example
///
/// We want to create a DFA with two states 0 and 1 over the alphabet `[0, 1]`, which accepts
/// a word if it contains an odd number of 1s and has no transition on 0 in state 1.
/// ```
/// use coxeter_automata::prelude::*;
///
/// let dfa = DfaBuilder::default()
///     .with_state_colors([false, true]) // colors given in the order of the states
///     .with_edges([(0, 0, 0), (0, 1, 1), (1, 1, 0)])
///     .into_dfa(0); // 0 is the initial state
/// assert!(dfa.accepts([0, 1, 1, 1]));
/// assert!(!dfa.accepts([1, 0]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DfaBuilder {
    symbols: BTreeSet<Symbol>,
    edges: Vec<(StateIndex, Symbol, StateIndex)>,
    default: Option<bool>,
    colors: Vec<(StateIndex, bool)>,
}

impl DfaBuilder {
    /// Sets the default color for states that have no color specified.
    pub fn default_color(mut self, color: bool) -> Self {
        self.default = Some(color);
        self
    }

    /// By default, the only alphabet symbols in the automaton that is built are the ones that
    /// appear on at least one edge. This method can be used to force additional symbols to appear.
    pub fn with_alphabet_symbols<I>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = Symbol>,
    {
        self.symbols.extend(symbols);
        self
    }

    /// Adds a list of colors to `self`. The colors are assigned to the states in the order in
    /// which they are given.
    pub fn with_state_colors<I: IntoIterator<Item = bool>>(self, iter: I) -> Self {
        iter.into_iter()
            .enumerate()
            .fold(self, |acc, (i, x)| acc.color(i, x))
    }

    /// Assigns the given `color` to the state with the given index `idx`.
    pub fn color(mut self, idx: StateIndex, color: bool) -> Self {
        assert!(self.colors.iter().all(|(q, _c)| q != &idx));
        self.colors.push((idx, color));
        self
    }

    /// Adds a list of edges `(source, symbol, target)` to `self`.
    pub fn with_edges<I>(mut self, edges: I) -> Self
    where
        I: IntoIterator<Item = (StateIndex, Symbol, StateIndex)>,
    {
        self.edges.extend(edges);
        self
    }

    /// Builds the automaton with initial state `initial`. States that are not reachable from
    /// `initial` are dropped, so the indices of the result may differ from the given ones.
    ///
    /// # Panics
    /// If some state has no color and no default color is set, or if a state has two edges
    /// on the same symbol.
    pub fn into_dfa(self, initial: StateIndex) -> Dfa {
        let num_states = self
            .edges
            .iter()
            .flat_map(|(q, _, p)| [*q, *p])
            .chain(self.colors.iter().map(|(q, _)| *q))
            .chain(std::iter::once(initial))
            .max()
            .map_or(0, |max| max + 1);

        let mut states = (0..num_states)
            .map(|i| {
                let color = self
                    .colors
                    .iter()
                    .find_map(|(q, c)| (*q == i).then_some(*c))
                    .or(self.default)
                    .unwrap_or_else(|| {
                        panic!("Default is needed as some states (specifically {i}) have no color")
                    });
                State::new(color)
            })
            .collect::<Vec<_>>();

        for &(q, sym, p) in &self.edges {
            states[q].add_transition(sym, p);
        }

        let alphabet = self
            .symbols
            .into_iter()
            .chain(self.edges.iter().map(|(_, sym, _)| *sym))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        Dfa::new(states, initial, alphabet)
    }
}

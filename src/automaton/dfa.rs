use std::collections::BTreeMap;

use itertools::Itertools;
use tracing::{error, trace};

use crate::{math::RootSet, Show};

/// Index of a state in a [`Dfa`].
pub type StateIndex = usize;
/// A symbol of the alphabet of a [`Dfa`], which is the index of a generator of a Coxeter group.
pub type Symbol = usize;

/// A single state of a [`Dfa`]. States built from a reflection table carry the set of roots
/// they stand for as a label, states of minimized automata do not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    label: Option<RootSet>,
    accepting: bool,
    transitions: BTreeMap<Symbol, StateIndex>,
}

impl State {
    /// Creates an unlabeled state without any transitions.
    pub fn new(accepting: bool) -> Self {
        Self {
            label: None,
            accepting,
            transitions: BTreeMap::new(),
        }
    }

    /// Creates a state with the given root set as label.
    pub fn labeled(label: RootSet, accepting: bool) -> Self {
        Self {
            label: Some(label),
            ..Self::new(accepting)
        }
    }

    /// The set of roots this state stands for, if any.
    pub fn label(&self) -> Option<&RootSet> {
        self.label.as_ref()
    }

    /// Whether `self` is accepting.
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// Adds a transition on `symbol` to `target`.
    ///
    /// # Panics
    /// A state has at most one transition per symbol, adding a second one is a logic error.
    pub fn add_transition(&mut self, symbol: Symbol, target: StateIndex) {
        if let Some(existing) = self.transitions.get(&symbol) {
            error!("state already has transition on {symbol} to {existing}, cannot add one to {target}");
            panic!("state already has a transition on symbol {symbol}");
        }
        self.transitions.insert(symbol, target);
    }

    /// The target of the transition on `symbol`, if it is defined.
    pub fn successor(&self, symbol: Symbol) -> Option<StateIndex> {
        self.transitions.get(&symbol).copied()
    }

    /// Iterates over all defined transitions as pairs of symbol and target, ordered by symbol.
    pub fn transitions(&self) -> impl DoubleEndedIterator<Item = (Symbol, StateIndex)> + '_ {
        self.transitions.iter().map(|(&sym, &target)| (sym, target))
    }

    fn map_targets(&self, f: impl Fn(StateIndex) -> StateIndex) -> Self {
        Self {
            label: self.label.clone(),
            accepting: self.accepting,
            transitions: self
                .transitions
                .iter()
                .map(|(&sym, &target)| (sym, f(target)))
                .collect(),
        }
    }
}

/// A deterministic finite automaton whose transitions may be partial, a word is rejected as
/// soon as it uses an undefined transition. The states live in a flat vector, every one of them
/// is reachable from the initial state, which always has index `0`. Indices are assigned in the
/// order in which a depth-first traversal from the initial state visits the states, where
/// outgoing transitions are followed in the order of their symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    states: Vec<State>,
    alphabet: Vec<Symbol>,
}

impl Dfa {
    /// Collects the states reachable from `initial` into a new automaton over `alphabet`.
    /// Unreachable states are dropped and the remaining ones are renumbered, see [`Dfa`].
    ///
    /// # Panics
    /// If `initial` or the target of some transition is not a valid index into `states`, or
    /// if a transition uses a symbol that is not part of `alphabet`.
    pub fn new(states: Vec<State>, initial: StateIndex, alphabet: Vec<Symbol>) -> Self {
        assert!(initial < states.len(), "initial state {initial} does not exist");
        let alphabet = alphabet.into_iter().sorted().dedup().collect_vec();

        let mut index: Vec<Option<StateIndex>> = vec![None; states.len()];
        let mut order = Vec::with_capacity(states.len());
        let mut stack = vec![initial];

        while let Some(q) = stack.pop() {
            if index[q].is_some() {
                continue;
            }
            index[q] = Some(order.len());
            order.push(q);

            for (sym, target) in states[q].transitions().rev() {
                assert!(
                    alphabet.binary_search(&sym).is_ok(),
                    "symbol {sym} is not part of the alphabet {alphabet:?}"
                );
                if index[target].is_none() {
                    stack.push(target);
                }
            }
        }

        if order.len() < states.len() {
            trace!(
                "dropping {} unreachable states",
                states.len() - order.len()
            );
        }

        let states = order
            .into_iter()
            .map(|q| {
                states[q].map_targets(|p| index[p].expect("targets of reachable states are reachable"))
            })
            .collect();
        Self { states, alphabet }
    }

    /// The index of the initial state.
    pub fn initial(&self) -> StateIndex {
        0
    }

    /// The symbols of the automaton in ascending order.
    pub fn alphabet(&self) -> &[Symbol] {
        &self.alphabet
    }

    /// The number of states, all of which are reachable.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Gives the state with index `q`, if it exists.
    pub fn state(&self, q: StateIndex) -> Option<&State> {
        self.states.get(q)
    }

    /// Iterates over all states together with their indices.
    pub fn states(&self) -> impl Iterator<Item = (StateIndex, &State)> + '_ {
        self.states.iter().enumerate()
    }

    /// Iterates over the indices of all states.
    pub fn state_indices(&self) -> std::ops::Range<StateIndex> {
        0..self.states.len()
    }

    /// Whether the state `q` exists and is accepting.
    pub fn is_accepting(&self, q: StateIndex) -> bool {
        self.state(q).is_some_and(State::is_accepting)
    }

    /// The root set labelling `q`, if `q` exists and is labeled.
    pub fn label(&self, q: StateIndex) -> Option<&RootSet> {
        self.state(q).and_then(State::label)
    }

    /// The target of the transition from `q` on `symbol`, if there is one.
    pub fn successor(&self, q: StateIndex, symbol: Symbol) -> Option<StateIndex> {
        self.state(q).and_then(|state| state.successor(symbol))
    }

    /// Iterates over the transitions leaving `q`, ordered by symbol. Empty if `q` does not exist.
    pub fn transitions_from(
        &self,
        q: StateIndex,
    ) -> impl DoubleEndedIterator<Item = (Symbol, StateIndex)> + '_ {
        self.state(q).into_iter().flat_map(|state| state.transitions())
    }

    /// The total number of transitions.
    pub fn num_transitions(&self) -> usize {
        self.states.iter().map(|s| s.transitions.len()).sum()
    }

    /// Returns true if every state has a transition on every symbol.
    pub fn is_complete(&self) -> bool {
        self.states
            .iter()
            .all(|s| s.transitions.len() == self.alphabet.len())
    }

    /// Reads `word` starting in the initial state and returns the reached state. Returns
    /// `None` if an undefined transition is encountered along the way.
    pub fn run<W>(&self, word: W) -> Option<StateIndex>
    where
        W: IntoIterator<Item = Symbol>,
    {
        self.run_from(self.initial(), word)
    }

    /// Same as [`Self::run`] but starts in `origin`.
    pub fn run_from<W>(&self, origin: StateIndex, word: W) -> Option<StateIndex>
    where
        W: IntoIterator<Item = Symbol>,
    {
        word.into_iter()
            .try_fold(origin, |q, sym| self.successor(q, sym))
    }

    /// Returns true if reading `word` from the initial state ends in an accepting state.
    pub fn accepts<W>(&self, word: W) -> bool
    where
        W: IntoIterator<Item = Symbol>,
    {
        self.accepts_from(self.initial(), word)
    }

    /// Returns true if reading `word` from `origin` ends in an accepting state.
    pub fn accepts_from<W>(&self, origin: StateIndex, word: W) -> bool
    where
        W: IntoIterator<Item = Symbol>,
    {
        self.run_from(origin, word)
            .is_some_and(|q| self.is_accepting(q))
    }

    /// Returns a string representation of the transition table, where the initial state is
    /// highlighted, accepting states are marked with `+` and undefined transitions with `-`.
    pub fn transition_table(&self) -> String {
        use owo_colors::OwoColorize;

        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string())
                .chain(std::iter::once("Label".to_string()))
                .chain(self.alphabet.iter().map(|sym| format!("s{sym}"))),
        );
        for (q, state) in self.states() {
            let name = format!("q{}{}", q, state.is_accepting().show());
            let name = if q == self.initial() {
                name.bold().to_string()
            } else {
                name
            };
            let mut row = vec![
                name,
                state.label().map(Show::show).unwrap_or_default(),
            ];
            row.extend(
                self.alphabet
                    .iter()
                    .map(|&sym| state.successor(sym).map(|p| format!("q{p}")).unwrap_or("-".into())),
            );
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

impl std::fmt::Display for Dfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.transition_table())
    }
}

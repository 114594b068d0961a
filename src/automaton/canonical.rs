use std::collections::VecDeque;

use tracing::{debug, trace};

use super::{Dfa, Mode, State, StateIndex, Symbol};
use crate::{
    coxeter::ReflectionTable,
    math::{Map, RootSet},
    ConfigError,
};

/// Constructs the automaton of a Coxeter group from the action of its simple reflections on
/// a set of roots, usually the minimal roots.
///
/// States are subsets of roots, starting from the empty set. A state `S` has no transition on
/// the generator `i` if `α_i ∈ S`, otherwise it moves to
/// ```text
///   {α_i} ∪ s_i(S)                          in Mode::Reduced
///   {α_i} ∪ s_i(S) ∪ { s_i(α_j) : j < i }   in Mode::Shortlex
/// ```
/// where images outside of the root set are discarded. Every state is accepting, words are
/// rejected solely through undefined transitions.
#[derive(Debug, Clone)]
pub struct AutomatonBuilder<'a> {
    table: &'a ReflectionTable,
    mode: Mode,
}

impl<'a> AutomatonBuilder<'a> {
    /// Creates a builder for the given table, producing shortlex normal forms by default.
    pub fn new(table: &'a ReflectionTable) -> Self {
        Self {
            table,
            mode: Mode::default(),
        }
    }

    /// Sets the kind of words the automaton accepts.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    fn successor_label(&self, label: &RootSet, generator: Symbol) -> Option<RootSet> {
        if label.contains(generator) {
            return None;
        }

        let mut successor = RootSet::with_capacity(self.table.num_roots());
        successor.insert(generator);
        successor.extend(
            label
                .iter()
                .filter_map(|root| self.table.reflect(root, generator)),
        );
        if self.mode == Mode::Shortlex {
            successor.extend((0..generator).filter_map(|j| self.table.reflect(j, generator)));
        }
        Some(successor)
    }

    /// Runs the breadth-first subset construction. Each distinct root set becomes exactly one
    /// state, the initial state is the one labeled with the empty set. Termination relies on
    /// the root set of the table being finite, which it always is for minimal roots.
    pub fn build(&self) -> Dfa {
        let rank = self.table.rank();

        let mut states = vec![State::labeled(RootSet::new(), true)];
        let mut known: Map<RootSet, StateIndex> = Map::default();
        known.insert(RootSet::new(), 0);
        let mut queue = VecDeque::from([0]);

        while let Some(q) = queue.pop_front() {
            for generator in 0..rank {
                if states[q].successor(generator).is_some() {
                    continue;
                }
                let Some(label) = states[q]
                    .label()
                    .and_then(|label| self.successor_label(label, generator))
                else {
                    continue;
                };

                let target = match known.get(&label) {
                    Some(&p) => p,
                    None => {
                        let p = states.len();
                        trace!("discovered state {p} with label {label:?}");
                        known.insert(label.clone(), p);
                        states.push(State::labeled(label, true));
                        queue.push_back(p);
                        p
                    }
                };
                states[q].add_transition(generator, target);
            }
        }

        debug!(
            "built {} automaton of rank {rank} with {} states",
            self.mode,
            states.len()
        );
        Dfa::new(states, 0, (0..rank).collect())
    }
}

/// Builds the automaton recognizing the words of kind `mode` from a reflection table, see
/// [`AutomatonBuilder`]. Fails if the rank of `table` is not `rank`.
pub fn build(table: &ReflectionTable, rank: usize, mode: Mode) -> Result<Dfa, ConfigError> {
    if table.rank() != rank {
        return Err(ConfigError::RankMismatch {
            table: table.rank(),
            requested: rank,
        });
    }
    Ok(AutomatonBuilder::new(table).mode(mode).build())
}

/// Computes the minimal automaton recognizing the words of kind `mode` in the Coxeter group
/// given by `matrix`, going through its minimal roots.
#[cfg(feature = "minimize")]
pub fn canonical_automaton(
    matrix: &crate::coxeter::CoxeterMatrix,
    mode: Mode,
) -> Result<Dfa, ConfigError> {
    let table = ReflectionTable::from_coxeter_matrix(matrix)?;
    Ok(AutomatonBuilder::new(&table).mode(mode).build().minimize())
}

#[cfg(test)]
mod tests {
    use super::{build, AutomatonBuilder};
    use crate::{
        automaton::{tests::all_words, Mode},
        coxeter::{CoxeterMatrix, ReflectionTable, INFINITY},
        math::{RootSet, Set},
        ConfigError,
    };

    fn table(diagram: &[u32]) -> ReflectionTable {
        ReflectionTable::from_coxeter_matrix(&CoxeterMatrix::from_diagram(diagram).unwrap())
            .unwrap()
    }

    #[test]
    fn rank_one_has_two_states() {
        let table = ReflectionTable::new(vec![vec![None]], 1).unwrap();
        for mode in [Mode::Reduced, Mode::Shortlex] {
            let dfa = build(&table, 1, mode).unwrap();
            assert_eq!(dfa.size(), 2);
            assert_eq!(dfa.num_transitions(), 1);
            assert_eq!(dfa.label(0), Some(&RootSet::new()));
            assert_eq!(dfa.label(1), Some(&RootSet::from_iter([0])));
            assert_eq!(dfa.successor(0, 0), Some(1));
            assert_eq!(dfa.successor(1, 0), None);
        }
    }

    #[test]
    fn rank_mismatch_is_reported() {
        let table = table(&[3]);
        assert_eq!(
            build(&table, 3, Mode::Reduced).unwrap_err(),
            ConfigError::RankMismatch {
                table: 2,
                requested: 3
            }
        );
    }

    #[test_log::test]
    fn sizes_of_built_automata() {
        // reduced word automata of finite groups have one state per group element
        let a3 = table(&[3, 2, 3]);
        assert_eq!(build(&a3, 3, Mode::Reduced).unwrap().size(), 24);
        assert_eq!(build(&a3, 3, Mode::Shortlex).unwrap().size(), 10);

        let b3 = table(&[4, 2, 3]);
        assert_eq!(build(&b3, 3, Mode::Reduced).unwrap().size(), 48);
        assert_eq!(build(&b3, 3, Mode::Shortlex).unwrap().size(), 20);

        let h3 = table(&[5, 2, 3]);
        assert_eq!(build(&h3, 3, Mode::Reduced).unwrap().size(), 120);

        let infinite_dihedral = table(&[INFINITY]);
        assert_eq!(build(&infinite_dihedral, 2, Mode::Shortlex).unwrap().size(), 3);

        let triangle = table(&[2, 3, 7]);
        assert_eq!(build(&triangle, 3, Mode::Reduced).unwrap().size(), 40);
        assert_eq!(build(&triangle, 3, Mode::Shortlex).unwrap().size(), 26);
    }

    #[test]
    fn structural_invariants() {
        for diagram in [vec![3, 2, 3], vec![4, 2, 3], vec![3, 3, 3], vec![2, 3, 7]] {
            let table = table(&diagram);
            for mode in [Mode::Reduced, Mode::Shortlex] {
                let dfa = AutomatonBuilder::new(&table).mode(mode).build();

                // labels are unique and bounded by the number of root subsets
                let labels: Set<_> = dfa.states().map(|(q, _)| dfa.label(q).unwrap()).collect();
                assert_eq!(labels.len(), dfa.size());
                assert!((dfa.size() as u128) <= 1u128 << table.num_roots());

                for (q, state) in dfa.states() {
                    assert!(state.is_accepting());
                    let label = state.label().unwrap();
                    for generator in 0..3 {
                        // a transition exists precisely for generators not in the label
                        assert_eq!(
                            state.successor(generator).is_some(),
                            !label.contains(generator),
                            "state {q} with label {label:?} on {generator}"
                        );
                        if let Some(p) = state.successor(generator) {
                            assert!(dfa.label(p).unwrap().contains(generator));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn a2_reduced_words() {
        let table = table(&[3]);
        let dfa = build(&table, 2, Mode::Reduced).unwrap();
        // the longest element has two reduced words, every other one a single one
        let accepted = all_words(&[0, 1], 4)
            .into_iter()
            .filter(|word| dfa.accepts(word.iter().copied()))
            .count();
        assert_eq!(accepted, 1 + 2 + 2 + 2);
        assert!(dfa.accepts([0, 1, 0]));
        assert!(dfa.accepts([1, 0, 1]));
        assert!(!dfa.accepts([0, 1, 0, 1]));
        assert!(!dfa.accepts([1, 1]));

        let shortlex = build(&table, 2, Mode::Shortlex).unwrap();
        assert!(shortlex.accepts([0, 1, 0]));
        assert!(!shortlex.accepts([1, 0, 1]));
    }
}

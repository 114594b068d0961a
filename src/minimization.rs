pub(crate) mod partition_refinement;

use crate::{
    automaton::{Dfa, StateIndex},
    math::Partition,
};

impl Dfa {
    /// Returns the unique minimal automaton that accepts the same words as `self`, computed
    /// with Hopcroft's partition refinement algorithm. States of the result carry no labels,
    /// as a state of the minimal automaton in general stands for several root sets.
    ///
    /// Undefined transitions are treated as moves to a rejecting sink, consequently states
    /// from which no word is accepted are removed. `self` is not modified.
    pub fn minimize(&self) -> Dfa {
        partition_refinement::hopcroft_minimize(self)
    }

    /// Computes the Myhill-Nerode equivalence on the states of `self`, two states are in
    /// the same class if and only if the same words are accepted from them.
    pub fn language_equivalence_classes(&self) -> Partition<StateIndex> {
        partition_refinement::equivalence_classes(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        automaton::{canonical_automaton, tests::all_words, AutomatonBuilder, DfaBuilder, Mode},
        coxeter::{CoxeterMatrix, ReflectionTable, INFINITY},
        math::Partition,
        Dfa,
    };

    fn built(diagram: &[u32], mode: Mode) -> Dfa {
        let matrix = CoxeterMatrix::from_diagram(diagram).unwrap();
        let table = ReflectionTable::from_coxeter_matrix(&matrix).unwrap();
        AutomatonBuilder::new(&table).mode(mode).build()
    }

    fn assert_equivalent(left: &Dfa, right: &Dfa, max_len: usize) {
        assert_eq!(left.alphabet(), right.alphabet());
        for word in all_words(left.alphabet(), max_len) {
            assert_eq!(
                left.accepts(word.iter().copied()),
                right.accepts(word.iter().copied()),
                "automata disagree on {word:?}"
            );
        }
    }

    fn assert_minimal(dfa: &Dfa) {
        for p in dfa.state_indices() {
            for q in dfa.state_indices().filter(|&q| q > p) {
                assert!(
                    dfa.separate(p, q).is_some(),
                    "states {p} and {q} are equivalent in\n{dfa}"
                );
            }
        }
    }

    #[test_log::test]
    fn minimal_sizes() {
        let cases: [(Vec<u32>, usize, usize); 9] = [
            (vec![], 2, 2),
            (vec![3], 6, 4),
            (vec![3, 2, 3], 24, 7),
            (vec![4, 2, 3], 48, 10),
            (vec![5, 2, 3], 120, 16),
            (vec![3, 3, 3], 16, 13),
            (vec![2, 3, 7], 35, 23),
            (vec![INFINITY], 3, 3),
            (vec![3, 2, 2, 3, 2, 3], 120, 11),
        ];

        for (diagram, reduced, shortlex) in cases {
            for (mode, expected) in [(Mode::Reduced, reduced), (Mode::Shortlex, shortlex)] {
                let matrix = CoxeterMatrix::from_diagram(&diagram).unwrap();
                let dfa = canonical_automaton(&matrix, mode).unwrap();
                assert_eq!(dfa.size(), expected, "{mode} automaton of {diagram:?}");
                assert!(dfa.states().all(|(_, state)| state.label().is_none()));
            }
        }
    }

    #[test]
    fn minimization_preserves_language() {
        for diagram in [vec![3, 2, 3], vec![4, 2, 3], vec![3, 3, 3], vec![2, 3, 7]] {
            for mode in [Mode::Reduced, Mode::Shortlex] {
                let dfa = built(&diagram, mode);
                let minimized = dfa.minimize();
                assert!(minimized.size() <= dfa.size());
                assert_equivalent(&dfa, &minimized, 6);
                assert_minimal(&minimized);
                assert_eq!(minimized.minimize().size(), minimized.size());
            }
        }
    }

    #[test]
    fn minimization_does_not_modify_input() {
        let dfa = built(&[2, 3, 7], Mode::Reduced);
        let copy = dfa.clone();
        let _ = dfa.minimize();
        assert_eq!(dfa, copy);
    }

    #[test]
    fn shortlex_growth_of_a3() {
        let dfa = canonical_automaton(
            &CoxeterMatrix::from_diagram(&[3, 2, 3]).unwrap(),
            Mode::Shortlex,
        )
        .unwrap();
        assert_eq!(dfa.growth(7), vec![1, 3, 5, 6, 5, 3, 1, 0]);
        assert_eq!(dfa.words_up_to(10).len(), 24);

        let a2 = canonical_automaton(&CoxeterMatrix::from_diagram(&[3]).unwrap(), Mode::Shortlex)
            .unwrap();
        assert!(a2.accepts([0, 1, 0]));
        assert!(!a2.accepts([1, 0, 1]));
    }

    #[test]
    fn single_block_is_stable() {
        // every state accepts and every transition is defined
        let dfa = DfaBuilder::default()
            .default_color(true)
            .with_edges([(0, 0, 1), (0, 1, 2), (1, 0, 2), (1, 1, 0), (2, 0, 0), (2, 1, 1)])
            .into_dfa(0);
        let minimized = dfa.minimize();
        assert_eq!(minimized.size(), 1);
        assert!(minimized.is_complete());
        assert!(minimized.accepts([0, 1, 1, 0]));

        assert_eq!(
            dfa.language_equivalence_classes(),
            Partition::new([vec![0, 1, 2]])
        );
    }

    #[test]
    fn accepting_and_rejecting_blocks() {
        // words over {0, 1} with an even number of 0s, with redundant copies of both states
        let dfa = DfaBuilder::default()
            .with_state_colors([true, false, true, false])
            .with_edges([
                (0, 0, 1),
                (0, 1, 2),
                (1, 0, 2),
                (1, 1, 3),
                (2, 0, 3),
                (2, 1, 0),
                (3, 0, 0),
                (3, 1, 1),
            ])
            .into_dfa(0);
        let minimized = dfa.minimize();
        assert_eq!(minimized.size(), 2);
        assert_equivalent(&dfa, &minimized, 6);
        assert_minimal(&minimized);

        assert_eq!(
            dfa.language_equivalence_classes(),
            Partition::new([vec![0, 2], vec![1, 3]])
        );
    }

    #[test]
    fn empty_language() {
        let dfa = DfaBuilder::default()
            .default_color(false)
            .with_edges([(0, 0, 1), (1, 1, 0)])
            .into_dfa(0);
        let minimized = dfa.minimize();
        assert_eq!(minimized.size(), 1);
        assert!(!minimized.is_accepting(0));
        assert_eq!(minimized.num_transitions(), 0);
    }

    #[test]
    fn dead_states_are_removed() {
        // state 2 rejects everything, so the transition leading there can be dropped
        let dfa = DfaBuilder::default()
            .with_state_colors([false, true, false])
            .with_edges([(0, 0, 1), (0, 1, 2), (2, 0, 2)])
            .into_dfa(0);
        let minimized = dfa.minimize();
        assert_eq!(minimized.size(), 2);
        assert_eq!(minimized.successor(0, 1), None);
        assert_equivalent(&dfa, &minimized, 4);
    }

    #[cfg(feature = "random")]
    #[test_log::test]
    fn random_partial_automata() {
        use crate::random::generate_random_dfa_with;

        let mut rng = fastrand::Rng::with_seed(0xC0FFEE);
        for _ in 0..200 {
            let dfa = generate_random_dfa_with(&mut rng, 2, 10, 0.25, 0.2);
            let minimized = dfa.minimize();
            assert!(minimized.size() <= dfa.size());
            assert_equivalent(&dfa, &minimized, 7);
            assert_minimal(&minimized);

            let again = minimized.minimize();
            assert_eq!(again.size(), minimized.size());
            assert_eq!(again, minimized);

            let classes = dfa.language_equivalence_classes();
            assert_eq!(classes.iter().map(|class| class.len()).sum::<usize>(), dfa.size());
            for class in classes.iter() {
                let mut members = class.iter();
                let first = *members.next().unwrap();
                for &q in members {
                    assert_eq!(dfa.separate(first, q), None);
                }
            }
        }
    }
}

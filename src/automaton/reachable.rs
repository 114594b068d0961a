use std::collections::VecDeque;

use tracing::warn;

use super::{Dfa, StateIndex, Symbol};
use crate::math::{Map, Set};

/// Type alias for a minimal representative of a state which is its length-lexicographically minimal
/// access sequence and its state index.
pub type MinimalRepresentative = (Vec<Symbol>, StateIndex);

/// Iterator over the minimal representatives of the states of a [`Dfa`]. A minimal representative
/// for a state `q` is the length-lexicographically minimal word with which `q` can be reached
/// from a given origin. States are produced in breadth-first order.
#[derive(Debug, Clone)]
pub struct MinimalRepresentatives<'a> {
    dfa: &'a Dfa,
    seen: Set<StateIndex>,
    queue: VecDeque<MinimalRepresentative>,
}

impl<'a> MinimalRepresentatives<'a> {
    fn new(dfa: &'a Dfa, origin: StateIndex) -> Self {
        let seen = Set::from_iter([origin]);
        let queue = [(vec![], origin)].into_iter().collect();
        Self { dfa, seen, queue }
    }
}

impl Iterator for MinimalRepresentatives<'_> {
    type Item = MinimalRepresentative;

    fn next(&mut self) -> Option<Self::Item> {
        let (access, q) = self.queue.pop_front()?;
        for (sym, p) in self.dfa.transitions_from(q) {
            if self.seen.insert(p) {
                let mut new_access = access.clone();
                new_access.push(sym);
                self.queue.push_back((new_access, p));
            }
        }
        Some((access, q))
    }
}

impl Dfa {
    /// Returns an iterator over the minimal representatives of all states, see
    /// [`MinimalRepresentatives`].
    pub fn minimal_representatives(&self) -> MinimalRepresentatives<'_> {
        MinimalRepresentatives::new(self, self.initial())
    }

    /// Same as [`Self::minimal_representatives`] but starting in `origin`.
    pub fn minimal_representatives_from(&self, origin: StateIndex) -> MinimalRepresentatives<'_> {
        MinimalRepresentatives::new(self, origin)
    }

    /// Collects all accepted words of length at most `max_len` in length-lexicographic order.
    /// For the shortlex automaton of a Coxeter group these are the normal forms of all group
    /// elements of length at most `max_len`.
    pub fn words_up_to(&self, max_len: usize) -> Vec<Vec<Symbol>> {
        let mut words = vec![];
        let mut layer = vec![(vec![], self.initial())];
        for len in 0..=max_len {
            words.extend(
                layer
                    .iter()
                    .filter(|(_, q)| self.is_accepting(*q))
                    .map(|(word, _)| word.clone()),
            );
            if len == max_len {
                break;
            }
            layer = layer
                .into_iter()
                .flat_map(|(word, q)| {
                    self.transitions_from(q).map(move |(sym, p)| {
                        let mut longer = word.clone();
                        longer.push(sym);
                        (longer, p)
                    })
                })
                .collect();
        }
        words
    }

    /// Counts the accepted words of each length up to `max_len`, the entry at position `n`
    /// is the number of accepted words of length `n`. For the shortlex automaton of a Coxeter
    /// group this is the beginning of its growth series.
    ///
    /// Counts grow exponentially for infinite groups. The result stops before the first
    /// length whose count does not fit into a `u128`, so it may have fewer than
    /// `max_len + 1` entries.
    pub fn growth(&self, max_len: usize) -> Vec<u128> {
        let mut counts = vec![0u128; self.size()];
        counts[self.initial()] = 1;

        let mut growth = Vec::with_capacity(max_len + 1);
        for len in 0..=max_len {
            let total = self
                .state_indices()
                .filter(|&q| self.is_accepting(q))
                .try_fold(0u128, |sum, q| sum.checked_add(counts[q]));
            let Some(total) = total else {
                warn!("number of accepted words of length {len} exceeds 128 bits");
                break;
            };
            growth.push(total);
            if len == max_len {
                break;
            }

            let mut next = vec![0u128; self.size()];
            for (q, &count) in counts.iter().enumerate().filter(|(_, c)| **c > 0) {
                for (_, p) in self.transitions_from(q) {
                    let Some(sum) = next[p].checked_add(count) else {
                        warn!("number of words of length {} exceeds 128 bits", len + 1);
                        return growth;
                    };
                    next[p] = sum;
                }
            }
            counts = next;
        }
        growth
    }

    /// Attempts to separate the state `left` from the state `right` by finding a shortest word
    /// that is accepted from one of them but not from the other. An undefined transition
    /// behaves like a move to a rejecting sink. Returns `None` if the states are equivalent.
    pub fn separate(&self, left: StateIndex, right: StateIndex) -> Option<Vec<Symbol>> {
        let accepting = |q: Option<StateIndex>| q.is_some_and(|q| self.is_accepting(q));

        let origin = (Some(left), Some(right));
        let mut seen = Map::default();
        seen.insert(origin, vec![]);
        let mut queue = VecDeque::from([origin]);

        while let Some(pair @ (l, r)) = queue.pop_front() {
            let word = seen[&pair].clone();
            if accepting(l) != accepting(r) {
                return Some(word);
            }
            for &sym in self.alphabet() {
                let next = (
                    l.and_then(|q| self.successor(q, sym)),
                    r.and_then(|q| self.successor(q, sym)),
                );
                if next == (None, None) || seen.contains_key(&next) {
                    continue;
                }
                let mut longer = word.clone();
                longer.push(sym);
                seen.insert(next, longer);
                queue.push_back(next);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::{
        automaton::{build, DfaBuilder, Mode},
        coxeter::{CoxeterMatrix, ReflectionTable, INFINITY},
    };

    #[test]
    fn minimal_representatives() {
        let dfa = DfaBuilder::default()
            .with_state_colors([false, false, true])
            .with_edges([(0, 0, 1), (0, 1, 0), (1, 0, 2), (1, 1, 0), (2, 0, 2), (2, 1, 2)])
            .into_dfa(0);

        assert_eq!(
            dfa.minimal_representatives().collect_vec(),
            vec![(vec![], 0), (vec![0], 1), (vec![0, 0], 2)]
        );
        assert_eq!(
            dfa.minimal_representatives_from(2).collect_vec(),
            vec![(vec![], 2)]
        );
    }

    #[test]
    fn bounded_enumeration_and_growth() {
        // accepts all words over {0, 1} that do not contain 11
        let dfa = DfaBuilder::default()
            .with_state_colors([true, true])
            .with_edges([(0, 0, 0), (0, 1, 1), (1, 0, 0)])
            .into_dfa(0);

        assert_eq!(
            dfa.words_up_to(2),
            vec![vec![], vec![0], vec![1], vec![0, 0], vec![0, 1], vec![1, 0]]
        );
        // Fibonacci numbers
        assert_eq!(dfa.growth(6), vec![1, 2, 3, 5, 8, 13, 21]);
        assert_eq!(dfa.growth(0), vec![1]);
    }

    #[test_log::test]
    fn growth_stops_before_overflow() {
        // the free Coxeter group of rank 4 has 4 * 3^(n-1) elements of length n > 0
        let matrix = CoxeterMatrix::from_diagram(&[INFINITY; 6]).unwrap();
        let table = ReflectionTable::from_coxeter_matrix(&matrix).unwrap();
        let dfa = build(&table, 4, Mode::Shortlex).unwrap();

        let growth = dfa.growth(90);
        assert_eq!(growth.len(), 81);
        assert_eq!(growth[0], 1);
        assert!(growth
            .iter()
            .skip(1)
            .zip(0u32..)
            .all(|(&count, exponent)| count == 4 * 3u128.pow(exponent)));
        assert_eq!(dfa.growth(80), growth);
    }

    #[test]
    fn enumeration_skips_rejecting_states() {
        let dfa = DfaBuilder::default()
            .with_state_colors([false, true])
            .with_edges([(0, 0, 1), (1, 0, 0)])
            .into_dfa(0);
        assert_eq!(dfa.words_up_to(4), vec![vec![0], vec![0, 0, 0]]);
        assert_eq!(dfa.growth(4), vec![0, 1, 0, 1, 0]);
    }

    #[test]
    fn separation() {
        // states 1 and 2 behave the same, 3 has no transition on 1; after renumbering in
        // depth-first order 3 becomes 2 and 2 becomes 3
        let dfa = DfaBuilder::default()
            .default_color(true)
            .with_edges([
                (0, 0, 1),
                (0, 1, 2),
                (1, 0, 3),
                (2, 0, 3),
                (3, 0, 3),
                (1, 1, 3),
                (2, 1, 3),
            ])
            .into_dfa(0);

        assert_eq!(dfa.separate(1, 3), None);
        assert_eq!(dfa.separate(1, 1), None);
        let word = dfa.separate(0, 2).unwrap();
        assert_eq!(word, vec![1]);
        assert_ne!(dfa.accepts_from(0, word.clone()), dfa.accepts_from(2, word));
    }
}

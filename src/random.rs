use tracing::debug;

use crate::automaton::{Dfa, State, StateIndex};

/// Upper bound on the number of states produced by [`generate_random_dfa`].
pub const DEFAULT_MAX_STATES: usize = 32;

/// Uses a sprout-like algorithm to generate a random, possibly partial, [`Dfa`] over the
/// symbols `0..symbols` with random acceptance. The algorithm is as follows:
/// 1. Start with a single state.
/// 2. For each state and each symbol, leave the transition undefined with probability
///    `missing`. Otherwise go through the existing states in order and with probability
///    `probability` add an edge to that state.
/// 3. If no edge was added, insert an edge to a new state, unless there are already
///    `max_states` states, in which case a uniformly drawn existing state is used.
/// 4. Repeat until all states and symbols have been treated.
pub fn generate_random_dfa_with(
    rng: &mut fastrand::Rng,
    symbols: usize,
    max_states: usize,
    probability: f64,
    missing: f64,
) -> Dfa {
    assert!(max_states > 0, "an automaton needs at least one state");
    let mut states = vec![State::new(rng.bool())];
    let mut current: StateIndex = 0;

    while current < states.len() {
        'symbols: for sym in 0..symbols {
            if rng.f64() < missing {
                continue;
            }

            for target in 0..states.len() {
                if rng.f64() < probability {
                    states[current].add_transition(sym, target);
                    continue 'symbols;
                }
            }

            let target = if states.len() < max_states {
                states.push(State::new(rng.bool()));
                states.len() - 1
            } else {
                rng.usize(..states.len())
            };
            states[current].add_transition(sym, target);
        }
        current += 1;
    }

    debug!("generated random automaton with {} states", states.len());
    Dfa::new(states, 0, (0..symbols).collect())
}

/// Works as [`generate_random_dfa_with`] with a fresh random number generator, at most
/// [`DEFAULT_MAX_STATES`] states and one in ten transitions missing.
pub fn generate_random_dfa(symbols: usize, probability: f64) -> Dfa {
    generate_random_dfa_with(
        &mut fastrand::Rng::new(),
        symbols,
        DEFAULT_MAX_STATES,
        probability,
        0.1,
    )
}

#[cfg(test)]
mod tests {
    use super::{generate_random_dfa, generate_random_dfa_with};

    #[test]
    fn random_automata_are_well_formed() {
        let mut rng = fastrand::Rng::with_seed(42);
        for _ in 0..50 {
            let dfa = generate_random_dfa_with(&mut rng, 3, 12, 0.3, 0.2);
            assert!(dfa.size() <= 12);
            assert_eq!(dfa.alphabet(), &[0, 1, 2]);
            assert!(dfa.num_transitions() <= 3 * dfa.size());
        }

        let complete = generate_random_dfa_with(&mut rng, 2, 8, 0.5, 0.0);
        assert!(complete.is_complete());

        let dfa = generate_random_dfa(2, 0.4);
        assert!(dfa.size() <= super::DEFAULT_MAX_STATES);
    }
}

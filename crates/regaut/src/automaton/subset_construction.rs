//! Subset construction algorithm for converting ε-NFA to DFA.

use crate::automaton::dfa::DFA;
use crate::automaton::epsilon_nfa::EpsilonNFA;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::Alphabet;
use crate::error::Result;
use indexmap::IndexMap;
use log::{debug, trace};
use std::collections::VecDeque;

/// Convert an epsilon-NFA to a DFA over its own alphabet.
pub fn determinize(nfa: &EpsilonNFA) -> Result<DFA> {
    subset_construction(nfa, nfa.alphabet())
}

/// Convert an epsilon-NFA to a DFA over `alphabet` using the powerset
/// construction algorithm.
///
/// DFA state `0` is the epsilon closure of the NFA start state; the other
/// states are numbered in discovery order. The result is partial: a symbol
/// leading nowhere from a superstate produces no transition.
pub fn subset_construction(nfa: &EpsilonNFA, alphabet: &Alphabet) -> Result<DFA> {
    nfa.validate()?;

    // Each DFA state corresponds to a set of NFA states, keyed by its
    // canonical sorted member list. The index in the map is the DFA state ID.
    let mut state_mapping: IndexMap<Vec<StateId>, StateSet> = IndexMap::new();
    let mut worklist: VecDeque<StateId> = VecDeque::new();

    let initial_set = nfa.epsilon_closure(&StateSet::singleton(
        nfa.initial_state(),
        nfa.num_states(),
    ));
    state_mapping.insert(initial_set.to_vec(), initial_set);
    worklist.push_back(0);

    let mut dfa = DFA::new(alphabet.clone(), 0);
    dfa.add_state(0);

    while let Some(current) = worklist.pop_front() {
        let Some(current_set) = state_mapping
            .get_index(current as usize)
            .map(|(_, set)| set.clone())
        else {
            continue;
        };

        for symbol in alphabet.iter() {
            let next_set = nfa.epsilon_closure(&nfa.move_on_symbol(&current_set, symbol));
            if next_set.is_empty() {
                continue;
            }

            let (index, previous) = state_mapping.insert_full(next_set.to_vec(), next_set);
            let next = index as StateId;
            if previous.is_none() {
                trace!("discovered superstate {next} via {current} --{symbol}-->");
                dfa.add_state(next);
                worklist.push_back(next);
            }

            dfa.add_transition(current, symbol, next)?;
        }
    }

    let mut mapping = Vec::with_capacity(state_mapping.len());
    for (index, (members, set)) in state_mapping.into_iter().enumerate() {
        if set.intersects(nfa.final_states()) {
            dfa.add_final_state(index as StateId);
        }
        mapping.push(members);
    }
    dfa.set_state_mapping(mapping);

    debug!(
        "determinized {} NFA states into {} DFA states with {} transitions",
        nfa.num_states(),
        dfa.num_states(),
        dfa.num_transitions()
    );

    Ok(dfa)
}

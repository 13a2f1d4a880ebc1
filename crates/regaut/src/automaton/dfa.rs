//! Deterministic Finite Automaton (DFA) implementation.

use crate::automaton::epsilon_nfa::Transition;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{Alphabet, Label, Symbol};
use crate::error::{Malformation, Result};
use indexmap::IndexMap;
use indexmap::map::Entry;

/// A Deterministic Finite Automaton.
///
/// The automaton may be partial: a missing `(state, symbol)` transition is a
/// rejection during simulation, not a structural defect.
#[derive(Debug, Clone)]
pub struct DFA {
    /// Declared states
    states: StateSet,
    /// Start state
    start_state: StateId,
    /// Final (accepting) states
    final_states: StateSet,
    /// Transitions: (source, symbol) -> destination, in insertion order
    transitions: IndexMap<(StateId, Symbol), StateId>,
    /// Declared input symbols
    alphabet: Alphabet,
    /// Mapping from DFA states to original NFA states (if created via subset construction)
    state_mapping: Option<Vec<Vec<StateId>>>,
}

impl DFA {
    /// Create an empty DFA over `alphabet` starting at `start_state`. The
    /// start state still has to be declared with [`DFA::add_state`].
    pub fn new(alphabet: Alphabet, start_state: StateId) -> Self {
        Self {
            states: StateSet::default(),
            start_state,
            final_states: StateSet::default(),
            transitions: IndexMap::new(),
            alphabet,
            state_mapping: None,
        }
    }

    /// Declare a state. Returns `true` if it was not declared yet.
    pub fn add_state(&mut self, state: StateId) -> bool {
        self.states.insert(state)
    }

    /// Add a final (accepting) state.
    pub fn add_final_state(&mut self, state: StateId) {
        self.final_states.insert(state);
    }

    /// Add a transition.
    ///
    /// Fails if the symbol is not in the alphabet or if `source` already has
    /// a different destination on `symbol`.
    pub fn add_transition(&mut self, source: StateId, symbol: Symbol, destination: StateId) -> Result<()> {
        if !self.alphabet.contains(symbol) {
            return Err(Malformation::UndeclaredSymbol(symbol).into());
        }

        match self.transitions.entry((source, symbol)) {
            Entry::Occupied(existing) if *existing.get() != destination => Err(Malformation::Nondeterministic {
                state: source,
                symbol,
            }
            .into()),
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(slot) => {
                slot.insert(destination);
                Ok(())
            }
        }
    }

    /// Get the transition from a state on a symbol.
    pub fn transition(&self, source: StateId, symbol: Symbol) -> Option<StateId> {
        self.transitions.get(&(source, symbol)).copied()
    }

    /// Get the declared states.
    pub fn states(&self) -> &StateSet {
        &self.states
    }

    /// Get the number of states.
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Get the start state.
    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    /// Get the final states.
    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    /// Check whether a state is accepting.
    pub fn is_final(&self, state: StateId) -> bool {
        self.final_states.contains(state)
    }

    /// Get the alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Set the state mapping from original NFA states, indexed by DFA state.
    pub(crate) fn set_state_mapping(&mut self, mapping: Vec<Vec<StateId>>) {
        self.state_mapping = Some(mapping);
    }

    /// The canonical NFA superstate a DFA state stands for, if this DFA was
    /// built by subset construction.
    pub fn superstate(&self, state: StateId) -> Option<&[StateId]> {
        self.state_mapping
            .as_ref()
            .and_then(|mapping| mapping.get(state as usize))
            .map(Vec::as_slice)
    }

    /// A human-readable name for a state: its superstate member list when
    /// known, the bare id otherwise.
    pub fn state_label(&self, state: StateId) -> String {
        match self.superstate(state) {
            Some(members) => format!("{members:?}"),
            None => state.to_string(),
        }
    }

    /// Check every structural invariant of the automaton.
    pub fn validate(&self) -> Result<()> {
        if !self.states.contains(self.start_state) {
            return Err(Malformation::UndeclaredInitial(self.start_state).into());
        }
        if let Some(state) = self.final_states.iter().find(|&s| !self.states.contains(s)) {
            return Err(Malformation::UndeclaredFinal(state).into());
        }
        for (&(from, symbol), &to) in &self.transitions {
            if !self.states.contains(from) || !self.states.contains(to) {
                return Err(Malformation::UndeclaredEndpoint { from, to }.into());
            }
            if !self.alphabet.contains(symbol) {
                return Err(Malformation::UndeclaredSymbol(symbol).into());
            }
        }
        Ok(())
    }

    /// Get the number of transitions.
    pub fn num_transitions(&self) -> usize {
        self.transitions.len()
    }

    /// Get all transitions as an iterator, in insertion order.
    pub fn transitions(&self) -> impl Iterator<Item = Transition> + '_ {
        self.transitions
            .iter()
            .map(|(&(from, symbol), &to)| Transition {
                from,
                label: Label::Symbol(symbol),
                to,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_state() -> DFA {
        let mut dfa = DFA::new(Alphabet::from("ab"), 0);
        dfa.add_state(0);
        dfa.add_state(1);
        dfa.add_final_state(1);
        dfa.add_transition(0, 'a', 1).unwrap();
        dfa.add_transition(1, 'a', 1).unwrap();
        dfa
    }

    #[test]
    fn test_dfa_basic() {
        let dfa = two_state();

        assert_eq!(dfa.num_states(), 2);
        assert_eq!(dfa.num_transitions(), 2);
        assert_eq!(dfa.start_state(), 0);
        assert_eq!(dfa.transition(0, 'a'), Some(1));
        assert_eq!(dfa.transition(1, 'b'), None);
        assert!(dfa.is_final(1));
        assert!(dfa.validate().is_ok());
    }

    #[test]
    fn test_dfa_rejects_conflicting_transition() {
        let mut dfa = two_state();
        assert!(dfa.add_transition(0, 'a', 1).is_ok());

        let err = dfa.add_transition(0, 'a', 0).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::MalformedAutomaton(Malformation::Nondeterministic { state: 0, symbol: 'a' })
        ));
        assert_eq!(dfa.transition(0, 'a'), Some(1));
    }

    #[test]
    fn test_dfa_rejects_unknown_symbol() {
        let mut dfa = two_state();
        assert!(matches!(
            dfa.add_transition(0, 'z', 1),
            Err(crate::Error::MalformedAutomaton(Malformation::UndeclaredSymbol('z')))
        ));
    }

    #[test]
    fn test_dfa_validate_initial() {
        let dfa = DFA::new(Alphabet::from("ab"), 2);
        assert!(matches!(
            dfa.validate(),
            Err(crate::Error::MalformedAutomaton(Malformation::UndeclaredInitial(2)))
        ));
    }

    #[test]
    fn test_dfa_validate_endpoint() {
        let mut dfa = two_state();
        dfa.add_transition(1, 'b', 7).unwrap();
        assert!(matches!(
            dfa.validate(),
            Err(crate::Error::MalformedAutomaton(Malformation::UndeclaredEndpoint { from: 1, to: 7 }))
        ));
    }

    #[test]
    fn test_state_label() {
        let mut dfa = two_state();
        assert_eq!(dfa.state_label(1), "1");

        dfa.set_state_mapping(vec![vec![0, 2], vec![1, 3, 4]]);
        assert_eq!(dfa.state_label(1), "[1, 3, 4]");
        assert_eq!(dfa.superstate(0), Some(&[0, 2][..]));
        assert_eq!(dfa.superstate(5), None);
    }
}

//! Epsilon Non-deterministic Finite Automaton (ε-NFA) implementation.

use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{Alphabet, Label, Symbol};
use crate::error::{Malformation, Result};
use indexmap::IndexMap;

/// A single labeled edge of an automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transition {
    /// Source state.
    pub from: StateId,
    /// Symbol consumed, or epsilon.
    pub label: Label,
    /// Destination state.
    pub to: StateId,
}

impl Transition {
    /// Create a transition.
    pub fn new(from: StateId, label: impl Into<Label>, to: StateId) -> Self {
        Self {
            from,
            label: label.into(),
            to,
        }
    }
}

/// An Epsilon Non-deterministic Finite Automaton.
#[derive(Debug, Clone)]
pub struct EpsilonNFA {
    /// Declared states
    states: StateSet,
    /// The single start state
    initial: StateId,
    /// Final (accepting) states
    final_states: StateSet,
    /// Transitions: (source, label) -> set of destination states, in insertion order
    transitions: IndexMap<(StateId, Label), StateSet>,
    /// All symbols used (excluding epsilon)
    alphabet: Alphabet,
}

impl EpsilonNFA {
    /// Create an empty NFA starting at `initial`. The initial state still
    /// has to be declared with [`EpsilonNFA::add_state`].
    pub fn new(initial: StateId) -> Self {
        Self {
            states: StateSet::default(),
            initial,
            final_states: StateSet::default(),
            transitions: IndexMap::new(),
            alphabet: Alphabet::new(),
        }
    }

    /// Declare a state. Returns `true` if it was not declared yet.
    pub fn add_state(&mut self, state: StateId) -> bool {
        self.states.insert(state)
    }

    /// Declare a symbol that no transition needs to use.
    pub fn add_symbol(&mut self, symbol: Symbol) {
        self.alphabet.insert(symbol);
    }

    /// Add a transition from source to destination on the given label.
    ///
    /// Non-epsilon labels are added to the alphabet. The endpoints must be
    /// declared with [`EpsilonNFA::add_state`]; [`EpsilonNFA::validate`]
    /// reports them otherwise.
    pub fn add_transition(&mut self, source: StateId, label: impl Into<Label>, destination: StateId) {
        let label = label.into();
        if let Label::Symbol(symbol) = label {
            self.alphabet.insert(symbol);
        }

        self.transitions
            .entry((source, label))
            .or_default()
            .insert(destination);
    }

    /// Add an epsilon transition from source to destination.
    pub fn add_epsilon_transition(&mut self, source: StateId, destination: StateId) {
        self.add_transition(source, Label::Epsilon, destination);
    }

    /// Add a final (accepting) state.
    pub fn add_final_state(&mut self, state: StateId) {
        self.final_states.insert(state);
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
    pub fn initial_state(&self) -> StateId {
        self.initial
    }

    /// Get the final states.
    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    /// Get the alphabet (all symbols except epsilon).
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Check that the initial state, final states and transition endpoints
    /// are declared. Transition symbols always belong to the alphabet, since
    /// [`EpsilonNFA::add_transition`] declares them.
    pub fn validate(&self) -> Result<()> {
        if !self.states.contains(self.initial) {
            return Err(Malformation::UndeclaredInitial(self.initial).into());
        }
        if let Some(state) = self.final_states.iter().find(|&s| !self.states.contains(s)) {
            return Err(Malformation::UndeclaredFinal(state).into());
        }
        for Transition { from, to, .. } in self.transitions() {
            if !self.states.contains(from) || !self.states.contains(to) {
                return Err(Malformation::UndeclaredEndpoint { from, to }.into());
            }
        }
        Ok(())
    }

    /// Get the epsilon closure of a set of states: the smallest superset of
    /// `states` closed under epsilon transitions.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = StateSet::with_capacity(self.states.len());
        let mut stack: Vec<StateId> = states.iter().collect();

        while let Some(s) = stack.pop() {
            if !closure.insert(s) {
                continue;
            }

            if let Some(destinations) = self.transitions.get(&(s, Label::Epsilon)) {
                stack.extend(destinations.iter().filter(|&dest| !closure.contains(dest)));
            }
        }

        closure
    }

    /// Get the states reachable from a set of states by exactly one
    /// transition on `symbol`. No epsilon closure is applied.
    pub fn move_on_symbol(&self, states: &StateSet, symbol: Symbol) -> StateSet {
        let mut reached = StateSet::with_capacity(self.states.len());

        for state in states.iter() {
            if let Some(destinations) = self.transitions.get(&(state, Label::Symbol(symbol))) {
                reached.union_with(destinations);
            }
        }

        reached
    }

    /// Get the number of transitions.
    pub fn num_transitions(&self) -> usize {
        self.transitions.values().map(StateSet::len).sum()
    }

    /// Get all transitions as an iterator, in insertion order.
    pub fn transitions(&self) -> impl Iterator<Item = Transition> + '_ {
        self.transitions.iter().flat_map(|(&(from, label), dests)| {
            dests.iter().map(move |to| Transition { from, label, to })
        })
    }
}

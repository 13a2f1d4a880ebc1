//! Graphviz rendering of automata.

use crate::automaton::{DFA, EpsilonNFA, StateId, StateSet, Transition};

/// Quote-safe text for a `"..."` attribute.
fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render a graph in the [dot](https://graphviz.org/docs/layouts/dot/) language.
fn to_dot(
    name: &str,
    initial: StateId,
    states: &StateSet,
    finals: &StateSet,
    transitions: impl Iterator<Item = Transition>,
    state_name: impl Fn(StateId) -> String,
) -> String {
    let nodes = states.iter().map(|state| {
        let shape = if finals.contains(state) {
            "doublecircle"
        } else {
            "circle"
        };
        format!(
            "\t{state} [shape = {shape}, label = \"{}\"];",
            escape(&state_name(state))
        )
    });
    let edges = transitions.map(|Transition { from, label, to }| {
        format!("\t{from} -> {to} [label = \"{}\"];", escape(&label.to_string()))
    });

    format!(
        "digraph {name} {{\n\
            \trankdir = LR;\n\
            \tstart [shape = point];\n\
            \tstart -> {initial};\n\
            {}\n\
            {}\n\
        }}\n",
        nodes.collect::<Vec<_>>().join("\n"),
        edges.collect::<Vec<_>>().join("\n"),
    )
}

impl EpsilonNFA {
    /// Converts the NFA to dot language. Epsilon edges are labeled `ε`.
    pub fn to_dot(&self) -> String {
        to_dot(
            "nfa",
            self.initial_state(),
            self.states(),
            self.final_states(),
            self.transitions(),
            |state| state.to_string(),
        )
    }
}

impl DFA {
    /// Converts the DFA to dot language, labeling each state with its
    /// superstate when known.
    pub fn to_dot(&self) -> String {
        to_dot(
            "dfa",
            self.start_state(),
            self.states(),
            self.final_states(),
            self.transitions(),
            |state| self.state_label(state),
        )
    }
}

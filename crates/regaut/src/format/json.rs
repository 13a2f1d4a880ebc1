//! JSON documents for exchanging automata.
//!
//! Two layouts are supported:
//!
//! - [`AutomatonDocument`]: a state list plus a flat transition list, where an
//!   epsilon edge has a `null` symbol. Used for NFAs with integer states and
//!   for DFAs, whose states are written as their superstate member lists.
//! - [`TableDocument`]: named states with a nested `from -> symbol -> to`
//!   transition table. Used for hand-written DFAs.

use crate::automaton::{Alphabet, DFA, EpsilonNFA, Label, StateId, Symbol, Transition};
use crate::error::{Malformation, Result};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;
use std::io::{Read, Write};

/// An automaton as a list of states and a list of transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonDocument<S> {
    /// Every state.
    pub states: Vec<S>,
    /// Declared symbols. When absent, the non-null transition symbols.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alphabet: Option<Vec<String>>,
    /// Start state.
    pub initial_state: S,
    /// Accepting states.
    pub final_states: Vec<S>,
    /// Edges; a `null` symbol is an epsilon edge.
    pub transitions: Vec<TransitionDocument<S>>,
}

/// One edge of an [`AutomatonDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionDocument<S> {
    /// Source state.
    pub from: S,
    /// Destination state.
    pub to: S,
    /// Consumed symbol, `None` for epsilon.
    pub symbol: Option<String>,
}

impl<S: Serialize + DeserializeOwned> AutomatonDocument<S> {
    /// Parse a document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a document.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Render the document as indented JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the document as indented JSON.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        Ok(serde_json::to_writer_pretty(writer, self)?)
    }
}

fn parse_symbol(symbol: &str) -> Result<Symbol> {
    let mut chars = symbol.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Ok(symbol),
        _ => Err(Malformation::InvalidSymbol(symbol.to_string()).into()),
    }
}

fn parse_alphabet(symbols: &[String]) -> Result<Alphabet> {
    symbols.iter().map(|symbol| parse_symbol(symbol)).collect()
}

fn render_alphabet(alphabet: &Alphabet) -> Vec<String> {
    alphabet.iter().map(String::from).collect()
}

fn transition_document<S>(transition: Transition, name: impl Fn(StateId) -> S) -> TransitionDocument<S> {
    TransitionDocument {
        from: name(transition.from),
        to: name(transition.to),
        symbol: transition.label.symbol().map(String::from),
    }
}

/// Give every distinct state name a dense id, in declaration order.
fn intern_states<S: Clone + Eq + Hash + Debug>(states: &[S]) -> Result<IndexMap<S, StateId>> {
    let mut ids = IndexMap::with_capacity(states.len());
    for state in states {
        let id = ids.len() as StateId;
        if ids.insert(state.clone(), id).is_some() {
            return Err(Malformation::DuplicateState(format!("{state:?}")).into());
        }
    }
    Ok(ids)
}

fn lookup<S: Eq + Hash + Debug>(ids: &IndexMap<S, StateId>, state: &S) -> Result<StateId> {
    ids.get(state)
        .copied()
        .ok_or_else(|| Malformation::UnknownStateName(format!("{state:?}")).into())
}

/// The declared alphabet, or the one implied by the transition symbols.
fn document_alphabet<S>(document: &AutomatonDocument<S>) -> Result<Alphabet> {
    match &document.alphabet {
        Some(symbols) => parse_alphabet(symbols),
        None => document
            .transitions
            .iter()
            .filter_map(|t| t.symbol.as_deref())
            .map(parse_symbol)
            .collect(),
    }
}

impl From<&EpsilonNFA> for AutomatonDocument<StateId> {
    fn from(nfa: &EpsilonNFA) -> Self {
        Self {
            states: nfa.states().to_vec(),
            alphabet: Some(render_alphabet(nfa.alphabet())),
            initial_state: nfa.initial_state(),
            final_states: nfa.final_states().to_vec(),
            transitions: nfa
                .transitions()
                .map(|t| transition_document(t, |state| state))
                .collect(),
        }
    }
}

impl TryFrom<AutomatonDocument<StateId>> for EpsilonNFA {
    type Error = crate::Error;

    fn try_from(document: AutomatonDocument<StateId>) -> Result<Self> {
        let alphabet = document_alphabet(&document)?;

        let mut nfa = EpsilonNFA::new(document.initial_state);
        for state in document.states {
            nfa.add_state(state);
        }
        for symbol in alphabet.iter() {
            nfa.add_symbol(symbol);
        }
        for transition in document.transitions {
            let label = match transition.symbol.as_deref() {
                Some(symbol) => {
                    let symbol = parse_symbol(symbol)?;
                    if !alphabet.contains(symbol) {
                        return Err(Malformation::UndeclaredSymbol(symbol).into());
                    }
                    Label::Symbol(symbol)
                }
                None => Label::Epsilon,
            };
            nfa.add_transition(transition.from, label, transition.to);
        }
        for state in document.final_states {
            nfa.add_final_state(state);
        }

        nfa.validate()?;
        Ok(nfa)
    }
}

impl From<&DFA> for AutomatonDocument<StateId> {
    fn from(dfa: &DFA) -> Self {
        Self {
            states: dfa.states().to_vec(),
            alphabet: Some(render_alphabet(dfa.alphabet())),
            initial_state: dfa.start_state(),
            final_states: dfa.final_states().to_vec(),
            transitions: dfa
                .transitions()
                .map(|t| transition_document(t, |state| state))
                .collect(),
        }
    }
}

/// States are written as their superstate member lists. A state without a
/// known superstate is written as the one-element list of its own id.
impl From<&DFA> for AutomatonDocument<Vec<StateId>> {
    fn from(dfa: &DFA) -> Self {
        let members = |state: StateId| {
            dfa.superstate(state)
                .map_or_else(|| vec![state], <[StateId]>::to_vec)
        };

        Self {
            states: dfa.states().iter().map(members).collect(),
            alphabet: Some(render_alphabet(dfa.alphabet())),
            initial_state: members(dfa.start_state()),
            final_states: dfa.final_states().iter().map(members).collect(),
            transitions: dfa.transitions().map(|t| transition_document(t, members)).collect(),
        }
    }
}

/// Build a DFA from a document whose states are already resolved to ids.
fn dfa_from_document<S>(
    document: &AutomatonDocument<S>,
    resolve: impl Fn(&S) -> Result<StateId>,
) -> Result<DFA> {
    let mut dfa = DFA::new(document_alphabet(document)?, resolve(&document.initial_state)?);
    for state in &document.states {
        dfa.add_state(resolve(state)?);
    }
    for transition in &document.transitions {
        let (from, to) = (resolve(&transition.from)?, resolve(&transition.to)?);
        let Some(symbol) = transition.symbol.as_deref() else {
            return Err(Malformation::EpsilonInDfa { from, to }.into());
        };
        dfa.add_transition(from, parse_symbol(symbol)?, to)?;
    }
    for state in &document.final_states {
        dfa.add_final_state(resolve(state)?);
    }

    dfa.validate()?;
    Ok(dfa)
}

impl TryFrom<AutomatonDocument<StateId>> for DFA {
    type Error = crate::Error;

    fn try_from(document: AutomatonDocument<StateId>) -> Result<Self> {
        dfa_from_document(&document, |&state| Ok(state))
    }
}

/// Superstates are numbered in declaration order and remembered, so
/// [`DFA::superstate`] reports them again.
impl TryFrom<AutomatonDocument<Vec<StateId>>> for DFA {
    type Error = crate::Error;

    fn try_from(document: AutomatonDocument<Vec<StateId>>) -> Result<Self> {
        let canonical = |members: &Vec<StateId>| {
            let mut members = members.clone();
            members.sort_unstable();
            members.dedup();
            members
        };
        let declared: Vec<_> = document.states.iter().map(canonical).collect();
        let ids = intern_states(&declared)?;

        let mut dfa = dfa_from_document(&document, |members| lookup(&ids, &canonical(members)))?;
        dfa.set_state_mapping(ids.into_keys().collect());
        Ok(dfa)
    }
}

impl EpsilonNFA {
    /// Parse an NFA from its JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        AutomatonDocument::<StateId>::from_json(json)?.try_into()
    }

    /// Render the NFA as a JSON document.
    pub fn to_json(&self) -> Result<String> {
        AutomatonDocument::from(self).to_json()
    }
}

impl DFA {
    /// Parse a DFA from a JSON document with integer states.
    pub fn from_json(json: &str) -> Result<Self> {
        AutomatonDocument::<StateId>::from_json(json)?.try_into()
    }

    /// Render the DFA as a JSON document whose states are superstate member
    /// lists.
    pub fn to_json(&self) -> Result<String> {
        AutomatonDocument::<Vec<StateId>>::from(self).to_json()
    }
}

/// A DFA with named states and a nested transition table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDocument {
    /// State names.
    pub states: Vec<String>,
    /// Declared symbols.
    pub alphabet: Vec<String>,
    /// Name of the start state.
    pub initial_state: String,
    /// Names of the accepting states.
    pub final_states: Vec<String>,
    /// `from -> symbol -> to`.
    #[serde(default)]
    pub transitions: IndexMap<String, IndexMap<String, String>>,
}

/// A DFA whose state `i` is called `names[i]`.
#[derive(Debug, Clone)]
pub struct NamedDfa {
    /// The automaton, with states numbered in declaration order.
    pub dfa: DFA,
    /// State names, indexed by state id.
    pub names: Vec<String>,
}

impl NamedDfa {
    /// The name of a state, or its id when it has none.
    pub fn name(&self, state: StateId) -> String {
        self.names
            .get(state as usize)
            .cloned()
            .unwrap_or_else(|| state.to_string())
    }

    /// Parse a tabular DFA document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str::<TableDocument>(json)?.try_into()
    }

    /// Read a tabular DFA document.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader::<_, TableDocument>(reader)?.try_into()
    }

    /// Render as a tabular JSON document.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&TableDocument::from(self))?)
    }
}

impl TryFrom<TableDocument> for NamedDfa {
    type Error = crate::Error;

    fn try_from(document: TableDocument) -> Result<Self> {
        let ids = intern_states(&document.states)?;

        let mut dfa = DFA::new(
            parse_alphabet(&document.alphabet)?,
            lookup(&ids, &document.initial_state)?,
        );
        for &id in ids.values() {
            dfa.add_state(id);
        }
        for (from, row) in &document.transitions {
            let from = lookup(&ids, from)?;
            for (symbol, to) in row {
                dfa.add_transition(from, parse_symbol(symbol)?, lookup(&ids, to)?)?;
            }
        }
        for state in &document.final_states {
            dfa.add_final_state(lookup(&ids, state)?);
        }

        dfa.validate()?;
        Ok(NamedDfa {
            dfa,
            names: ids.into_keys().collect(),
        })
    }
}

impl From<&NamedDfa> for TableDocument {
    fn from(named: &NamedDfa) -> Self {
        let mut transitions: IndexMap<String, IndexMap<String, String>> = IndexMap::new();
        for t in named.dfa.transitions() {
            if let Some(symbol) = t.label.symbol() {
                transitions
                    .entry(named.name(t.from))
                    .or_default()
                    .insert(symbol.to_string(), named.name(t.to));
            }
        }

        Self {
            states: named.dfa.states().iter().map(|s| named.name(s)).collect(),
            alphabet: render_alphabet(named.dfa.alphabet()),
            initial_state: named.name(named.dfa.start_state()),
            final_states: named.dfa.final_states().iter().map(|s| named.name(s)).collect(),
            transitions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::automaton::determinize;

    const NFA_JSON: &str = r#"{
        "states": [0, 1, 2],
        "initial_state": 0,
        "final_states": [2],
        "transitions": [
            {"from": 0, "to": 1, "symbol": null},
            {"from": 1, "to": 2, "symbol": "a"},
            {"from": 2, "to": 1, "symbol": "b"}
        ]
    }"#;

    const TABLE_JSON: &str = r#"{
        "states": ["q0", "q1"],
        "alphabet": ["a", "b"],
        "initial_state": "q0",
        "final_states": ["q1"],
        "transitions": {"q0": {"a": "q1"}, "q1": {"a": "q1"}}
    }"#;

    #[test]
    fn test_nfa_from_json() {
        let nfa = EpsilonNFA::from_json(NFA_JSON).unwrap();

        assert_eq!(nfa.num_states(), 3);
        assert_eq!(nfa.num_transitions(), 3);
        assert_eq!(nfa.alphabet(), &Alphabet::from("ab"));
        assert!(nfa.transitions().any(|t| t == Transition::new(0, Label::Epsilon, 1)));
    }

    #[test]
    fn test_nfa_document_keeps_epsilon_as_null() {
        let nfa = EpsilonNFA::from_json(NFA_JSON).unwrap();
        let document = AutomatonDocument::from(&nfa);

        assert_eq!(document.alphabet, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(
            document.transitions[0],
            TransitionDocument {
                from: 0,
                to: 1,
                symbol: None
            }
        );
        assert!(nfa.to_json().unwrap().contains("\"symbol\": null"));
    }

    #[test]
    fn test_nfa_undeclared_state() {
        let json = r#"{"states": [0], "initial_state": 0, "final_states": [],
                       "transitions": [{"from": 0, "to": 4, "symbol": "a"}]}"#;
        assert!(matches!(
            EpsilonNFA::from_json(json),
            Err(Error::MalformedAutomaton(Malformation::UndeclaredEndpoint { from: 0, to: 4 }))
        ));
    }

    #[test]
    fn test_nfa_symbol_outside_declared_alphabet() {
        let json = r#"{"states": [0, 1], "alphabet": ["a"], "initial_state": 0,
                       "final_states": [1], "transitions": [{"from": 0, "to": 1, "symbol": "b"}]}"#;
        assert!(matches!(
            EpsilonNFA::from_json(json),
            Err(Error::MalformedAutomaton(Malformation::UndeclaredSymbol('b')))
        ));
    }

    #[test]
    fn test_nfa_multi_character_symbol() {
        let json = r#"{"states": [0, 1], "initial_state": 0, "final_states": [1],
                       "transitions": [{"from": 0, "to": 1, "symbol": "ab"}]}"#;
        assert!(matches!(
            EpsilonNFA::from_json(json),
            Err(Error::MalformedAutomaton(Malformation::InvalidSymbol(_)))
        ));
    }

    #[test]
    fn test_dfa_superstate_document() {
        let dfa = determinize(&EpsilonNFA::from_json(NFA_JSON).unwrap()).unwrap();
        let document = AutomatonDocument::<Vec<StateId>>::from(&dfa);

        assert_eq!(document.initial_state, vec![0, 1]);
        assert_eq!(document.states, vec![vec![0, 1], vec![2], vec![1]]);
        assert_eq!(document.final_states, vec![vec![2]]);
        assert_eq!(
            document.transitions[0],
            TransitionDocument {
                from: vec![0, 1],
                to: vec![2],
                symbol: Some("a".to_string())
            }
        );

        let reloaded = DFA::try_from(document).unwrap();
        assert_eq!(reloaded.num_states(), dfa.num_states());
        assert_eq!(reloaded.superstate(1), Some(&[2][..]));
        assert!(reloaded.recognize("aba").accepted());
    }

    #[test]
    fn test_dfa_integer_document() {
        let json = r#"{"states": [3, 7], "alphabet": ["a", "b"], "initial_state": 3,
                       "final_states": [7], "transitions": [{"from": 3, "to": 7, "symbol": "a"}]}"#;
        let dfa = DFA::from_json(json).unwrap();

        assert_eq!(dfa.start_state(), 3);
        assert_eq!(dfa.transition(3, 'a'), Some(7));
        assert_eq!(dfa.superstate(3), None);

        let document = AutomatonDocument::<StateId>::from(&dfa);
        assert_eq!(document.states, vec![3, 7]);
        assert_eq!(document.alphabet, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_undeclared_initial_state() {
        let json = r#"{"states": [0, 1], "alphabet": ["a"], "initial_state": 9,
                       "final_states": [1], "transitions": [{"from": 0, "to": 1, "symbol": "a"}]}"#;
        assert!(matches!(
            EpsilonNFA::from_json(json),
            Err(Error::MalformedAutomaton(Malformation::UndeclaredInitial(9)))
        ));
        assert!(matches!(
            DFA::from_json(json),
            Err(Error::MalformedAutomaton(Malformation::UndeclaredInitial(9)))
        ));
    }

    #[test]
    fn test_dfa_rejects_epsilon() {
        let json = r#"{"states": [0, 1], "initial_state": 0, "final_states": [1],
                       "transitions": [{"from": 0, "to": 1, "symbol": null}]}"#;
        assert!(matches!(
            DFA::from_json(json),
            Err(Error::MalformedAutomaton(Malformation::EpsilonInDfa { from: 0, to: 1 }))
        ));
    }

    #[test]
    fn test_dfa_rejects_nondeterminism() {
        let json = r#"{"states": [0, 1], "initial_state": 0, "final_states": [1],
                       "transitions": [{"from": 0, "to": 1, "symbol": "a"},
                                       {"from": 0, "to": 0, "symbol": "a"}]}"#;
        assert!(matches!(
            DFA::from_json(json),
            Err(Error::MalformedAutomaton(Malformation::Nondeterministic { state: 0, symbol: 'a' }))
        ));
    }

    #[test]
    fn test_table_document() {
        let named = NamedDfa::from_json(TABLE_JSON).unwrap();

        assert_eq!(named.names, vec!["q0", "q1"]);
        assert_eq!(named.dfa.transition(0, 'a'), Some(1));
        assert_eq!(named.dfa.transition(1, 'b'), None);
        assert!(named.dfa.is_final(1));
        assert_eq!(named.name(1), "q1");

        let document = TableDocument::from(&named);
        assert_eq!(document.transitions["q1"]["a"], "q1");
        assert_eq!(document.alphabet, vec!["a", "b"]);
    }

    #[test]
    fn test_table_unknown_state() {
        let json = r#"{"states": ["q0"], "alphabet": ["a"], "initial_state": "q0",
                       "final_states": ["q9"], "transitions": {}}"#;
        assert!(matches!(
            NamedDfa::from_json(json),
            Err(Error::MalformedAutomaton(Malformation::UnknownStateName(name))) if name == "\"q9\""
        ));
    }

    #[test]
    fn test_table_duplicate_state() {
        let json = r#"{"states": ["q0", "q0"], "alphabet": ["a"], "initial_state": "q0",
                       "final_states": [], "transitions": {}}"#;
        assert!(matches!(
            NamedDfa::from_json(json),
            Err(Error::MalformedAutomaton(Malformation::DuplicateState(_)))
        ));
    }
}

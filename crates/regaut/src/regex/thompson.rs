//! Thompson construction: compiling a [`RegexAst`] into an [`EpsilonNFA`].
//!
//! Every fragment produced here has exactly one initial and exactly one final
//! state, which is what lets sequences chain fragments with a single epsilon
//! edge.

use super::ast::RegexAst;
use crate::automaton::{EpsilonNFA, Label, StateId, Transition};
use crate::error::{Error, ExpressionError, Result};
use log::debug;

/// Hands out state ids for one compilation. Ids are never reused.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: StateId,
}

impl IdGenerator {
    /// A generator starting at state `0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// The next unused state id.
    pub fn fresh(&mut self) -> StateId {
        let id = self.next;
        self.next += 1;
        id
    }

    /// How many ids were handed out so far.
    pub fn allocated(&self) -> StateId {
        self.next
    }
}

/// A partially built automaton with a single entry and a single exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Every state of the fragment.
    pub states: Vec<StateId>,
    /// Entry state.
    pub initial: StateId,
    /// The only accepting state.
    pub final_state: StateId,
    /// Edges between the fragment's states.
    pub transitions: Vec<Transition>,
}

impl Fragment {
    /// A fragment made of two fresh, unconnected states.
    fn open(ids: &mut IdGenerator) -> Self {
        let initial = ids.fresh();
        let final_state = ids.fresh();
        Self {
            states: vec![initial, final_state],
            initial,
            final_state,
            transitions: Vec::new(),
        }
    }

    fn epsilon(&mut self, from: StateId, to: StateId) {
        self.transitions.push(Transition::new(from, Label::Epsilon, to));
    }

    /// Take over the states and edges of `other`, leaving entry and exit as is.
    fn absorb(&mut self, other: Fragment) {
        self.states.extend(other.states);
        self.transitions.extend(other.transitions);
    }
}

/// Build the fragment for `ast`, drawing state ids from `ids`.
pub fn build_fragment(ast: &RegexAst, ids: &mut IdGenerator) -> Result<Fragment> {
    match ast {
        RegexAst::Literal(symbol) => {
            let mut fragment = Fragment::open(ids);
            fragment
                .transitions
                .push(Transition::new(fragment.initial, *symbol, fragment.final_state));
            Ok(fragment)
        }
        RegexAst::Alternation(children) => {
            if children.is_empty() {
                return Err(ExpressionError::EmptyAlternation.into());
            }

            let mut fragment = Fragment::open(ids);
            for child in children {
                let branch = build_fragment(child, ids)?;
                fragment.epsilon(fragment.initial, branch.initial);
                fragment.epsilon(branch.final_state, fragment.final_state);
                fragment.absorb(branch);
            }
            Ok(fragment)
        }
        RegexAst::Sequence(children) => {
            let Some((first, rest)) = children.split_first() else {
                return Err(ExpressionError::EmptySequence.into());
            };

            let mut fragment = build_fragment(first, ids)?;
            for child in rest {
                let next = build_fragment(child, ids)?;
                fragment.epsilon(fragment.final_state, next.initial);
                fragment.final_state = next.final_state;
                fragment.absorb(next);
            }
            Ok(fragment)
        }
        RegexAst::KleeneStar(child) => {
            let mut fragment = Fragment::open(ids);
            let body = build_fragment(child, ids)?;

            // enter, repeat, leave after one or more, skip entirely
            fragment.epsilon(fragment.initial, body.initial);
            fragment.epsilon(body.final_state, body.initial);
            fragment.epsilon(body.final_state, fragment.final_state);
            fragment.epsilon(fragment.initial, fragment.final_state);
            fragment.absorb(body);
            Ok(fragment)
        }
    }
}

/// Compile a regular expression into an epsilon-NFA whose alphabet is the
/// set of literal symbols in the expression.
pub fn compile(ast: &RegexAst) -> Result<EpsilonNFA> {
    let mut ids = IdGenerator::new();
    let fragment = build_fragment(ast, &mut ids)?;

    let mut nfa = EpsilonNFA::new(fragment.initial);
    for state in fragment.states {
        nfa.add_state(state);
    }
    for Transition { from, label, to } in fragment.transitions {
        nfa.add_transition(from, label, to);
    }
    nfa.add_final_state(fragment.final_state);

    debug!(
        "compiled expression into {} NFA states with {} transitions",
        nfa.num_states(),
        nfa.num_transitions()
    );

    Ok(nfa)
}

impl TryFrom<&RegexAst> for EpsilonNFA {
    type Error = Error;

    fn try_from(ast: &RegexAst) -> Result<Self> {
        compile(ast)
    }
}

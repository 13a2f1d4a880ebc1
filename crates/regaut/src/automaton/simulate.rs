//! Running a DFA over a word.

use crate::automaton::dfa::DFA;
use crate::automaton::state::StateId;
use crate::automaton::symbol::Symbol;
use log::trace;
use std::fmt;

/// Why a word was not recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The word contains a symbol outside the DFA alphabet.
    UnknownSymbol(Symbol),
    /// The DFA has no edge for this state and symbol.
    MissingTransition {
        /// State the simulation was in.
        state: StateId,
        /// Symbol that could not be consumed.
        symbol: Symbol,
    },
    /// The word was consumed but the last state is not accepting.
    NotFinal(StateId),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::UnknownSymbol(symbol) => write!(f, "symbol {symbol:?} is not in the alphabet"),
            Rejection::MissingTransition { state, symbol } => {
                write!(f, "no transition from state {state} on {symbol:?}")
            }
            Rejection::NotFinal(state) => write!(f, "state {state} is not final"),
        }
    }
}

/// The outcome of one simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recognition {
    /// Every state visited, starting with the start state, up to the point
    /// where the run stopped.
    pub path: Vec<StateId>,
    /// `None` when the word is accepted.
    pub rejection: Option<Rejection>,
}

impl Recognition {
    /// Whether the word was accepted.
    pub fn accepted(&self) -> bool {
        self.rejection.is_none()
    }

    /// The state the run stopped in.
    pub fn last_state(&self) -> Option<StateId> {
        self.path.last().copied()
    }
}

/// Run `dfa` over `word`, recording the path of visited states.
pub fn recognize<I>(dfa: &DFA, word: I) -> Recognition
where
    I: IntoIterator<Item = Symbol>,
{
    let mut current = dfa.start_state();
    let mut path = vec![current];

    for symbol in word {
        if !dfa.alphabet().contains(symbol) {
            return Recognition {
                path,
                rejection: Some(Rejection::UnknownSymbol(symbol)),
            };
        }

        let Some(next) = dfa.transition(current, symbol) else {
            return Recognition {
                path,
                rejection: Some(Rejection::MissingTransition {
                    state: current,
                    symbol,
                }),
            };
        };

        trace!("{current} --{symbol}--> {next}");
        current = next;
        path.push(current);
    }

    let rejection = (!dfa.is_final(current)).then_some(Rejection::NotFinal(current));
    Recognition { path, rejection }
}

impl DFA {
    /// Run the automaton over the characters of `word`.
    pub fn recognize(&self, word: &str) -> Recognition {
        recognize(self, word.chars())
    }
}

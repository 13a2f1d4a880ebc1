//! Finite automata over a declared alphabet.
//!
//! This module provides epsilon-NFA and DFA implementations with:
//! - Epsilon closure computation
//! - Subset construction (NFA to DFA conversion)
//! - DFA simulation with a recorded state path

mod dfa;
mod epsilon_nfa;
mod simulate;
mod state;
mod subset_construction;
mod symbol;

pub use dfa::DFA;
pub use epsilon_nfa::{EpsilonNFA, Transition};
pub use simulate::{Recognition, Rejection, recognize};
pub use state::{StateId, StateSet};
pub use subset_construction::{determinize, subset_construction};
pub use symbol::{Alphabet, Label, Symbol};

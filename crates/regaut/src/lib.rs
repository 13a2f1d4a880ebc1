//! Regular expressions to finite automata.
//!
//! The pipeline has three stages, each consuming the previous stage's
//! immutable output:
//!
//! 1. [`regex::compile`] turns a [`RegexAst`] into an [`EpsilonNFA`] by
//!    Thompson construction.
//! 2. [`automaton::subset_construction`] turns the NFA into a [`DFA`] over a
//!    declared [`Alphabet`].
//! 3. [`automaton::recognize`] runs the DFA over a word and reports the
//!    verdict together with the visited state path.
//!
//! ```
//! use regaut::{Alphabet, RegexAst, Rejection};
//!
//! let ast = RegexAst::from_json(r#"{"op": "kle", "args": [{"simb": "a"}]}"#)?;
//! let dfa = regaut::compile_dfa(&ast, &Alphabet::from("ab"))?;
//!
//! assert!(dfa.recognize("aaa").accepted());
//! assert_eq!(
//!     dfa.recognize("b").rejection,
//!     Some(Rejection::MissingTransition { state: 0, symbol: 'b' })
//! );
//! # Ok::<(), regaut::Error>(())
//! ```

#![deny(missing_docs)]

pub mod automaton;
pub mod format;
pub mod regex;
pub mod report;

mod error;

pub use automaton::{
    Alphabet, DFA, EpsilonNFA, Label, Recognition, Rejection, StateId, StateSet, Symbol, Transition,
};
pub use error::{Error, ExpressionError, Malformation, Result};
pub use regex::RegexAst;
pub use report::Report;

/// Compile `ast` all the way to a DFA over `alphabet`.
///
/// Symbols of the expression missing from `alphabet` can never be matched;
/// symbols of `alphabet` missing from the expression are rejected with
/// [`Rejection::MissingTransition`] rather than [`Rejection::UnknownSymbol`].
pub fn compile_dfa(ast: &RegexAst, alphabet: &Alphabet) -> Result<DFA> {
    let nfa = regex::compile(ast)?;
    automaton::subset_construction(&nfa, alphabet)
}

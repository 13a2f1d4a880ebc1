//! Construction-time errors.
//!
//! Simulation outcomes are not errors; see [`crate::automaton::Rejection`].

use crate::automaton::{StateId, Symbol};
use std::{io, result};
use thiserror::Error;

/// The error type for building, converting and loading automata.
#[derive(Debug, Error)]
pub enum Error {
    /// The regular expression tree is malformed.
    #[error("invalid expression: {0}")]
    InvalidExpression(#[from] ExpressionError),

    /// An automaton violates one of its structural invariants.
    #[error("malformed automaton: {0}")]
    MalformedAutomaton(#[from] Malformation),

    /// A JSON document could not be read or written.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error while persisting or loading a document.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// Why a regular expression tree was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
    /// An alternation with no alternatives.
    #[error("alternation requires at least one argument")]
    EmptyAlternation,

    /// A sequence with no elements.
    #[error("sequence requires at least one argument")]
    EmptySequence,

    /// A Kleene star applied to zero or several expressions.
    #[error("kleene star requires exactly one argument, found {0}")]
    KleeneArity(usize),

    /// A literal that is not exactly one symbol.
    #[error("literal must be a single symbol, found {0:?}")]
    InvalidLiteral(String),

    /// An operator node with an unknown operator name.
    #[error("unknown operator {0:?}")]
    UnknownNode(String),

    /// A JSON value with the shape of neither a literal nor an operator node.
    #[error("malformed expression node: {0}")]
    MalformedNode(String),
}

/// Which automaton invariant was violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Malformation {
    /// The initial state is not among the declared states.
    #[error("initial state {0} is not declared")]
    UndeclaredInitial(StateId),

    /// A final state is not among the declared states.
    #[error("final state {0} is not declared")]
    UndeclaredFinal(StateId),

    /// A transition endpoint is not among the declared states.
    #[error("transition {from} -> {to} uses an undeclared state")]
    UndeclaredEndpoint {
        /// Source of the offending transition.
        from: StateId,
        /// Destination of the offending transition.
        to: StateId,
    },

    /// A transition label is not in the alphabet.
    #[error("symbol {0:?} is not in the alphabet")]
    UndeclaredSymbol(Symbol),

    /// A symbol in a document that is not exactly one character.
    #[error("symbol must be a single character, found {0:?}")]
    InvalidSymbol(String),

    /// A DFA with two different targets for the same state and symbol.
    #[error("state {state} has several transitions on {symbol:?}")]
    Nondeterministic {
        /// The state with the conflicting transitions.
        state: StateId,
        /// The symbol shared by the conflicting transitions.
        symbol: Symbol,
    },

    /// A DFA transition labeled epsilon.
    #[error("epsilon transition {from} -> {to} in a deterministic automaton")]
    EpsilonInDfa {
        /// Source of the offending transition.
        from: StateId,
        /// Destination of the offending transition.
        to: StateId,
    },

    /// A state name that occurs twice in a document.
    #[error("state {0:?} is declared more than once")]
    DuplicateState(String),

    /// A state name that is referenced but never declared.
    #[error("state {0:?} is not declared")]
    UnknownStateName(String),
}

/// A specialized Result type for automaton construction.
pub type Result<T> = result::Result<T, Error>;

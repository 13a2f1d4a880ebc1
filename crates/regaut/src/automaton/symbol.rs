//! Symbol types for automata transitions.

use std::collections::BTreeSet;
use std::fmt;

/// A symbol of the input alphabet.
pub type Symbol = char;

/// The label of an automaton edge: either an input symbol or epsilon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    /// An edge traversed without consuming input. Only valid in an NFA.
    Epsilon,
    /// An edge that consumes exactly this symbol.
    Symbol(Symbol),
}

impl Label {
    /// Check if this is an epsilon label.
    #[inline]
    pub fn is_epsilon(self) -> bool {
        matches!(self, Label::Epsilon)
    }

    /// The consumed symbol, `None` for epsilon.
    #[inline]
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Label::Epsilon => None,
            Label::Symbol(symbol) => Some(symbol),
        }
    }
}

impl From<Symbol> for Label {
    fn from(symbol: Symbol) -> Self {
        Label::Symbol(symbol)
    }
}

impl From<Option<Symbol>> for Label {
    fn from(symbol: Option<Symbol>) -> Self {
        symbol.map_or(Label::Epsilon, Label::Symbol)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Epsilon => f.write_str("ε"),
            Label::Symbol(symbol) => write!(f, "{symbol}"),
        }
    }
}

/// A finite, explicitly declared set of symbols.
///
/// Iteration is in ascending symbol order, which keeps subset construction
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alphabet {
    symbols: BTreeSet<Symbol>,
}

impl Alphabet {
    /// Create an empty alphabet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol. Returns `true` if it was not declared yet.
    pub fn insert(&mut self, symbol: Symbol) -> bool {
        self.symbols.insert(symbol)
    }

    /// Check if the symbol is declared.
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.symbols.contains(&symbol)
    }

    /// Number of declared symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if no symbol is declared.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterate over the symbols in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.symbols.iter().copied()
    }
}

impl FromIterator<Symbol> for Alphabet {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        Self {
            symbols: iter.into_iter().collect(),
        }
    }
}

impl Extend<Symbol> for Alphabet {
    fn extend<I: IntoIterator<Item = Symbol>>(&mut self, iter: I) {
        self.symbols.extend(iter);
    }
}

impl From<&str> for Alphabet {
    fn from(symbols: &str) -> Self {
        symbols.chars().collect()
    }
}

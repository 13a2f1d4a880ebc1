//! Regular expression trees.
//!
//! The JSON form is `{"simb": "a"}` for a literal and
//! `{"op": "alt" | "seq" | "kle", "args": [...]}` for composite nodes.

use crate::automaton::Symbol;
use crate::error::{ExpressionError, Result};
use serde::Deserialize;
use serde_json::Value;

/// A regular expression over single-symbol literals.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawExpr")]
pub enum RegexAst {
    /// Matches exactly one symbol.
    Literal(Symbol),
    /// Matches any of the children.
    Alternation(Vec<RegexAst>),
    /// Matches the children one after another.
    Sequence(Vec<RegexAst>),
    /// Matches zero or more repetitions of the child.
    KleeneStar(Box<RegexAst>),
}

impl RegexAst {
    /// A literal node.
    pub fn literal(symbol: Symbol) -> Self {
        RegexAst::Literal(symbol)
    }

    /// An alternation node.
    pub fn alt(children: impl IntoIterator<Item = RegexAst>) -> Self {
        RegexAst::Alternation(children.into_iter().collect())
    }

    /// A sequence node.
    pub fn seq(children: impl IntoIterator<Item = RegexAst>) -> Self {
        RegexAst::Sequence(children.into_iter().collect())
    }

    /// A Kleene star node.
    pub fn star(child: RegexAst) -> Self {
        RegexAst::KleeneStar(Box::new(child))
    }

    /// A sequence of one literal per character of `word`.
    pub fn word(word: &str) -> Self {
        RegexAst::seq(word.chars().map(RegexAst::literal))
    }

    /// Decode a tree from its JSON form.
    ///
    /// Structural problems (unknown operators, arity, literals longer than
    /// one symbol) are reported as [`crate::Error::InvalidExpression`]; only text
    /// that is not JSON at all is an [`crate::Error::Json`].
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Decode a tree from an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(Self::decode(&value)?)
    }

    fn decode(value: &Value) -> std::result::Result<Self, ExpressionError> {
        let raw = RawExpr::deserialize(value)
            .map_err(|_| ExpressionError::MalformedNode(value.to_string()))?;
        RegexAst::try_from(raw)
    }
}

/// The JSON shape of a single node, before arity and literal checks.
/// Children stay undecoded so a bad one is reported on its own.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawExpr {
    Literal { simb: String },
    Op { op: String, args: Vec<Value> },
}

impl TryFrom<RawExpr> for RegexAst {
    type Error = ExpressionError;

    fn try_from(raw: RawExpr) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawExpr::Literal { simb } => {
                let mut chars = simb.chars();
                match (chars.next(), chars.next()) {
                    (Some(symbol), None) => Ok(RegexAst::Literal(symbol)),
                    _ => Err(ExpressionError::InvalidLiteral(simb)),
                }
            }
            RawExpr::Op { op, args } => {
                let children = args
                    .into_iter()
                    .map(|arg| RegexAst::decode(&arg))
                    .collect::<std::result::Result<Vec<_>, _>>()?;

                match op.as_str() {
                    "alt" if children.is_empty() => Err(ExpressionError::EmptyAlternation),
                    "alt" => Ok(RegexAst::Alternation(children)),
                    "seq" if children.is_empty() => Err(ExpressionError::EmptySequence),
                    "seq" => Ok(RegexAst::Sequence(children)),
                    "kle" => match <[RegexAst; 1]>::try_from(children) {
                        Ok([child]) => Ok(RegexAst::star(child)),
                        Err(children) => Err(ExpressionError::KleeneArity(children.len())),
                    },
                    _ => Err(ExpressionError::UnknownNode(op)),
                }
            }
        }
    }
}

//! Exchange formats: JSON documents and Graphviz output.

pub mod dot;
pub mod json;

pub use json::{AutomatonDocument, NamedDfa, TableDocument, TransitionDocument};

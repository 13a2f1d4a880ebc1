//! Regular expression trees and their compilation into automata.

mod ast;
mod thompson;

pub use ast::RegexAst;
pub use thompson::{Fragment, IdGenerator, build_fragment, compile};

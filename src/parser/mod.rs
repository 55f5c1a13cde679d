//! yalig Parser Module
//!
//! Parses S-expression tokens into an abstract syntax tree.

mod ast;
mod sexpr_parser;

pub use ast::{Expression, Program};
pub use sexpr_parser::SExprParser;

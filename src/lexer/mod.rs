//! Lexical analysis
//!
//! Converts source text into a stream of tokens for the S-expression parser.

mod sexpr_scanner;
mod stream;
mod token;

pub use sexpr_scanner::SExprScanner;
pub use stream::{TokenBuffer, TokenStream};
pub use token::{Keyword, Token, TokenKind};

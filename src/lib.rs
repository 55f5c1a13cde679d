//! # yalig - Yet Another Lisp Interpreter
//!
//! A minimal Lisp dialect with a tree-walking evaluator: integers, strings,
//! lists, first-class closures, and a handful of built-in functions.
//!
//! ## Quick Start
//!
//! ```rust
//! use yalig::{Evaluator, Parser, Scanner, Value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let code = r#"
//!     (def add (fn (a b) (+ a b)))
//!     (add 2 3)
//! "#;
//!
//! // Tokenize (scan)
//! let mut scanner = Scanner::new(code);
//! let tokens = scanner.scan_tokens()?;
//!
//! // Parse into AST
//! let mut parser = Parser::new(tokens);
//! let program = parser.parse_program()?;
//!
//! // Execute
//! let mut evaluator = Evaluator::new();
//! let result = evaluator.execute(&program)?;
//!
//! assert_eq!(result, Value::Int(5));
//! # Ok(())
//! # }
//! ```
//!
//! For whole source texts, [`Session`] runs the three stages form by form:
//!
//! ```rust
//! use yalig::{Config, Session, Value};
//!
//! # fn main() -> yalig::Result<()> {
//! let mut session = Session::new(Config::default());
//! session.eval_str("(def xs '(1 2 3))")?;
//! assert_eq!(session.eval_str("(first (rest xs))")?, Value::Int(2));
//! # Ok(())
//! # }
//! ```
//!
//! ## Language Overview
//!
//! ### Data Types
//!
//! - **Primitives**: integers (`i64`), strings, `true`/`false`, `null`
//! - **Lists**: quoted literals `'(1 2 3)`; elements are evaluated
//! - **Functions**: built-ins and closures created by `fn`
//!
//! ### Special Forms
//!
//! - `(def name expr)` - Bind a name in the current frame
//! - `(defun name (params...) body)` - Shorthand for `(def name (fn ...))`
//! - `(fn (params...) body)` - Closure over a snapshot of the current scope
//! - `(if cond then else)` - `cond` must be a boolean
//! - `(seq expr...)` - Sequential execution, value of the last expression
//!
//! ### Built-in Functions
//!
//! - **Arithmetic**: `(+ a b)`
//! - **Comparison**: `(< a b)`, `(= a b)`
//! - **Lists**: `(first xs)`, `(rest xs)`, `(empty xs)`
//! - **Output**: `(print x)`
//!
//! ## Closures Capture Values
//!
//! A closure sees the bindings as they were when the `fn` form was
//! evaluated. Later definitions do not leak into it:
//!
//! ```rust
//! # use yalig::{Session, Value};
//! let mut session = Session::default();
//! let result = session.eval_str(r#"
//!     (def x 1)
//!     (def f (fn () x))
//!     (def x 2)
//!     (f)
//! "#).unwrap();
//! assert_eq!(result, Value::Int(1));
//! ```
//!
//! Because a closure cannot see its own binding, recursion passes the
//! function to itself:
//!
//! ```rust
//! # use yalig::{Session, Value};
//! let mut session = Session::default();
//! let result = session.eval_str(r#"
//!     (defun sum (self xs)
//!       (if (empty xs) 0 (+ (first xs) (self self (rest xs)))))
//!     (sum sum '(1 2 3 4))
//! "#).unwrap();
//! assert_eq!(result, Value::Int(10));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Source Code → Scanner → Tokens → Parser → AST → Evaluator → Value
//! ```
//!
//! - [`Scanner`] - Tokenizes source code
//! - [`Parser`] - Builds one top-level [`Expression`] per call
//! - [`Evaluator`] - Evaluates expressions against an [`Environment`]
//! - [`BuiltinTable`] - Built-in functions installed in the global frame
//! - [`Session`] - Drives the pipeline over a whole source text
//!
//! ## Error Handling
//!
//! Every stage reports through [`Error`]; [`Error::category`] gives the
//! coarse class:
//!
//! ```rust
//! # use yalig::{ErrorCategory, Session};
//! let mut session = Session::default();
//! let err = session.eval_str("(if 1 2 3)").unwrap_err();
//! assert_eq!(err.category(), ErrorCategory::TypeMismatch);
//! assert!(err.to_string().contains("expected bool"));
//! ```

/// Version of the yalig interpreter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod builtins;
pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod runtime;
pub mod session;
mod stack;

// Re-export main types
pub use builtins::{Builtin, BuiltinTable};
pub use config::Config;
pub use error::{Error, ErrorCategory, Result};
pub use lexer::{Keyword, SExprScanner, Token, TokenKind};
pub use parser::{Expression, Program, SExprParser};
pub use runtime::{Environment, LispEvaluator, Value, ValueKind};
pub use session::{RunSummary, Session};

/// Type alias for the S-expression scanner (lexer).
pub type Scanner = SExprScanner;

/// Type alias for the S-expression parser over a scanned token buffer.
pub type Parser = SExprParser;

/// Type alias for the tree-walking evaluator.
pub type Evaluator = LispEvaluator;

//! Error types for the yalig interpreter

use thiserror::Error;

/// yalig interpreter errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Lexical errors
    /// Malformed input rejected by the scanner
    ///
    /// **Triggered by:** Unknown characters, unterminated strings, malformed integer literals
    /// **Example:** `12abc`, `"never closed`, `#`
    #[error("Parse error: {0}")]
    ParseError(String),

    // Parse errors
    /// Syntax error encountered during parsing
    ///
    /// **Triggered by:** A form that cannot start with the current token
    /// **Example:** `()` (empty form), `(5 6)` (number in function position)
    #[error("Syntax error at line {line}, column {col}: {message}")]
    SyntaxError {
        /// Line number where error occurred
        line: usize,
        /// Column number where error occurred
        col: usize,
        /// Error description
        message: String,
    },

    /// Unexpected token encountered during parsing
    #[error("Unexpected token at line {line}, column {col}: expected {expected}, got {got}")]
    UnexpectedToken {
        /// Expected token description
        expected: String,
        /// Actual token received
        got: String,
        /// Line of the offending token
        line: usize,
        /// Column of the offending token
        col: usize,
    },

    /// Input ended in the middle of a form
    ///
    /// **Example:** `(def x` (binding and `)` missing)
    #[error("Unexpected end of input: expected {expected}")]
    UnexpectedEof {
        /// What the parser was waiting for
        expected: String,
    },

    // Runtime errors
    /// Reference to a name no enclosing frame defines
    ///
    /// **Triggered by:** Using a name before `(def name ...)`
    /// **Example:** `x` (when x was never defined)
    #[error("Undefined variable: {name}")]
    UndefinedVariable {
        /// Variable name
        name: String,
    },

    /// Type mismatch error
    ///
    /// **Triggered by:** Operation expecting one value kind but receiving another
    /// **Example:** `(+ "a" 1)`, `(if 1 2 3)`, `(first 5)`
    #[error("Type error: expected {expected}, got {got}")]
    TypeError {
        /// Expected type
        expected: String,
        /// Actual type
        got: String,
    },

    /// Invalid comparison between incompatible types
    #[error("Invalid comparison between types {left_type} and {right_type}")]
    InvalidComparison {
        /// Left operand type
        left_type: String,
        /// Right operand type
        right_type: String,
    },

    /// Integer arithmetic left the i64 range
    #[error("Integer overflow in {op}")]
    IntegerOverflow {
        /// Operator name
        op: String,
    },

    /// Closure called with the wrong number of arguments
    ///
    /// **Example:** `((fn (x) x) 1 2)` style calls through a bound name
    #[error("Arity mismatch: expected {expected} arguments, got {got}")]
    ArityMismatch {
        /// Number of declared parameters
        expected: usize,
        /// Number of supplied arguments
        got: usize,
    },

    /// Built-in called with fewer arguments than its fixed arity
    #[error("Built-in {name} requires {expected} arguments, got {got}")]
    BuiltinArity {
        /// Built-in name
        name: String,
        /// Required argument count
        expected: usize,
        /// Supplied argument count
        got: usize,
    },

    /// List index out of bounds
    ///
    /// **Example:** `(first '())`
    #[error("Index out of bounds: {index} for list of length {length}")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// List length
        length: usize,
    },

    /// Attempt to call a non-callable value
    #[error("Value is not callable: {type_name}")]
    NotCallable {
        /// Type of non-callable value
        type_name: String,
    },

    // Resource errors
    /// Evaluation nested deeper than the configured bound
    #[error("Recursion limit exceeded (max depth: {limit})")]
    RecursionLimitExceeded {
        /// Maximum allowed nesting depth
        limit: usize,
    },

    /// Writing to the `print` sink failed
    #[error("Output error: {0}")]
    OutputError(String),
}

/// Coarse error classes, one per row of the error taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Lexical or structural parse failure
    Parse,
    /// Identifier not bound in any enclosing frame
    UnboundName,
    /// Wrong runtime value kind for an operation
    TypeMismatch,
    /// Wrong number of call arguments
    Arity,
    /// Calling something that is not a function
    NotCallable,
    /// List access past the end (`first`/`rest` of an empty list)
    OutOfRange,
    /// Host resource limits (recursion depth, output sink)
    Resource,
}

impl Error {
    /// Create a syntax error at a source position
    pub fn syntax(line: usize, col: usize, msg: impl Into<String>) -> Self {
        Error::SyntaxError {
            line,
            col,
            message: msg.into(),
        }
    }

    /// Create a type error from expected/actual type names
    pub fn type_mismatch(expected: impl Into<String>, got: impl Into<String>) -> Self {
        Error::TypeError {
            expected: expected.into(),
            got: got.into(),
        }
    }

    /// Classify the error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::ParseError(_)
            | Error::SyntaxError { .. }
            | Error::UnexpectedToken { .. }
            | Error::UnexpectedEof { .. } => ErrorCategory::Parse,

            Error::UndefinedVariable { .. } => ErrorCategory::UnboundName,

            Error::TypeError { .. }
            | Error::InvalidComparison { .. }
            | Error::IntegerOverflow { .. } => ErrorCategory::TypeMismatch,

            Error::IndexOutOfBounds { .. } => ErrorCategory::OutOfRange,

            Error::ArityMismatch { .. } | Error::BuiltinArity { .. } => ErrorCategory::Arity,

            Error::NotCallable { .. } => ErrorCategory::NotCallable,

            Error::RecursionLimitExceeded { .. } | Error::OutputError(_) => {
                ErrorCategory::Resource
            }
        }
    }

    /// True for errors raised while scanning or parsing
    pub fn is_parse_error(&self) -> bool {
        self.category() == ErrorCategory::Parse
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::OutputError(err.to_string())
    }
}

/// Result type for yalig operations
pub type Result<T> = std::result::Result<T, Error>;

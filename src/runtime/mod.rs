//! Runtime execution for yalig programs

mod environment;
mod lisp_evaluator;
mod value;

pub use environment::Environment;
pub use lisp_evaluator::{LispEvaluator, DEFAULT_MAX_DEPTH};
pub use value::{NativeFn, Value, ValueKind};

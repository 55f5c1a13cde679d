use std::rc::Rc;

use crate::builtins::BuiltinTable;
use crate::error::{Error, Result};
use crate::parser::{Expression, Program};
use crate::runtime::{Environment, Value};
use crate::stack::ensure_sufficient_stack;

/// Default bound on nested `evaluate` calls
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// Tree-walking evaluator
///
/// Evaluates one expression at a time against a chain of environment frames:
/// - `(def name expr)` - bind in the current frame, yields `null`
/// - `(fn (params...) body)` - closure over a frozen copy of the current chain
/// - `(if c a b)` - `c` must be a boolean; only the taken branch is evaluated
/// - `(seq exprs...)` - value of the last expression, `null` when empty
/// - `'(exprs...)` - list of the evaluated elements
/// - `(f args...)` - callee first, then arguments left to right
///
/// Evaluation recurses once per nesting level and grows the host stack on
/// demand. `max_depth` turns running past that bound into
/// [`Error::RecursionLimitExceeded`].
pub struct LispEvaluator {
    /// Top-level frame, pre-populated with the built-in table
    globals: Environment,
    /// Maximum nesting of `evaluate` calls
    max_depth: usize,
    /// Current nesting of `evaluate` calls
    depth: usize,
}

impl LispEvaluator {
    /// Creates an evaluator with the standard built-ins
    pub fn new() -> Self {
        Self::with_builtins(&BuiltinTable::standard())
    }

    /// Creates an evaluator whose top-level frame holds `builtins`
    pub fn with_builtins(builtins: &BuiltinTable) -> Self {
        let globals = Environment::new();
        builtins.install(&globals);
        LispEvaluator {
            globals,
            max_depth: DEFAULT_MAX_DEPTH,
            depth: 0,
        }
    }

    /// Sets the nesting bound
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The top-level environment
    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    /// Execute every form of a program, returning the last value
    pub fn execute(&mut self, program: &Program) -> Result<Value> {
        let mut last_val = Value::Null;

        for form in &program.forms {
            last_val = self.eval(form)?;
        }

        Ok(last_val)
    }

    /// Evaluate a top-level form against the global frame
    pub fn eval(&mut self, expr: &Expression) -> Result<Value> {
        let globals = self.globals.clone();
        self.evaluate(expr, &globals)
    }

    /// Evaluate an expression in `env`
    pub fn evaluate(&mut self, expr: &Expression, env: &Environment) -> Result<Value> {
        if self.depth >= self.max_depth {
            return Err(Error::RecursionLimitExceeded {
                limit: self.max_depth,
            });
        }

        self.depth += 1;
        let result = ensure_sufficient_stack(|| self.evaluate_inner(expr, env));
        self.depth -= 1;
        result
    }

    fn evaluate_inner(&mut self, expr: &Expression, env: &Environment) -> Result<Value> {
        match expr {
            Expression::Number(n) => Ok(Value::Int(*n)),

            Expression::StringLiteral(s) => Ok(Value::String(s.clone())),

            Expression::Identifier(name) => env.get(name),

            Expression::Def { name, binding } => {
                let val = self.evaluate(binding, env)?;
                env.define(name.clone(), val);
                Ok(Value::Null)
            }

            Expression::Func { params, body } => Ok(Value::Closure {
                params: params.as_slice().into(),
                body: Rc::clone(body),
                env: env.freeze(),
            }),

            Expression::If {
                antecedent,
                consequent,
                alternate,
            } => {
                let cond_val = self.evaluate(antecedent, env)?;
                if cond_val.as_bool()? {
                    self.evaluate(consequent, env)
                } else {
                    self.evaluate(alternate, env)
                }
            }

            Expression::Seq(body) => {
                let mut last_val = Value::Null;
                for expr in body {
                    last_val = self.evaluate(expr, env)?;
                }
                Ok(last_val)
            }

            Expression::List(elements) => {
                let values = elements
                    .iter()
                    .map(|elem| self.evaluate(elem, env))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Value::list(values))
            }

            Expression::Call { callee, args } => {
                let func = self.evaluate(callee, env)?;
                let arg_vals = args
                    .iter()
                    .map(|arg| self.evaluate(arg, env))
                    .collect::<Result<Vec<_>>>()?;
                self.call_function(&func, &arg_vals)
            }
        }
    }

    /// Apply a callable value to already evaluated arguments
    pub fn call_function(&mut self, func: &Value, args: &[Value]) -> Result<Value> {
        match func {
            Value::NativeFunction { name, arity, func } => {
                // Surplus arguments are dropped; only a shortfall is an error
                if args.len() < *arity {
                    return Err(Error::BuiltinArity {
                        name: name.to_string(),
                        expected: *arity,
                        got: args.len(),
                    });
                }
                func(&args[..*arity])
            }

            Value::Closure { params, body, env } => {
                if args.len() != params.len() {
                    return Err(Error::ArityMismatch {
                        expected: params.len(),
                        got: args.len(),
                    });
                }

                let frame = env.child();
                for (param, arg) in params.iter().zip(args) {
                    frame.define(param.clone(), arg.clone());
                }
                self.evaluate(body, &frame)
            }

            other => Err(Error::NotCallable {
                type_name: other.type_name(),
            }),
        }
    }
}

impl Default for LispEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

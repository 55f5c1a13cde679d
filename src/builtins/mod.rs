//! Built-in function table
//!
//! The table is built once and installed into the top-level environment when
//! an evaluator is constructed. Each entry has a fixed arity.

pub mod arithmetic;
pub mod io;
pub mod lists;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::runtime::{Environment, Value};

/// Sink that `print` writes to
pub type Output = Rc<RefCell<dyn std::io::Write>>;

/// Builtin trait - every entry of the table implements this
pub trait Builtin {
    /// Name the built-in is bound to
    fn name(&self) -> &'static str;

    /// One-line description
    fn description(&self) -> &str;

    /// Number of arguments the built-in consumes
    fn arity(&self) -> usize;

    /// Run the built-in on exactly `arity()` evaluated arguments
    fn call(&self, args: &[Value]) -> Result<Value>;
}

/// Borrow the first `N` arguments as an array, failing if fewer were given
pub(crate) fn fixed_args<'a, const N: usize>(
    name: &str,
    args: &'a [Value],
) -> Result<&'a [Value; N]> {
    args.get(..N)
        .and_then(|head| head.try_into().ok())
        .ok_or_else(|| Error::BuiltinArity {
            name: name.to_string(),
            expected: N,
            got: args.len(),
        })
}

/// Immutable name -> built-in mapping
pub struct BuiltinTable {
    entries: HashMap<&'static str, Rc<dyn Builtin>>,
}

impl BuiltinTable {
    /// Standard table; `print` writes to stdout
    pub fn standard() -> Self {
        Self::with_output(Rc::new(RefCell::new(std::io::stdout())))
    }

    /// Standard table with `print` redirected to `out`
    pub fn with_output(out: Output) -> Self {
        let mut table = Self::empty();
        io::register(&mut table, out);
        arithmetic::register(&mut table);
        lists::register(&mut table);
        table
    }

    /// Create empty table (for testing)
    pub fn empty() -> Self {
        BuiltinTable {
            entries: HashMap::new(),
        }
    }

    /// Register a built-in, replacing any entry of the same name
    pub fn register<B: Builtin + 'static>(&mut self, builtin: B) {
        self.entries.insert(builtin.name(), Rc::new(builtin));
    }

    /// Looks a built-in up and wraps it as a callable value
    pub fn get(&self, name: &str) -> Option<Value> {
        self.entries.get(name).map(Self::to_value)
    }

    /// Check if a built-in exists
    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// One-line description of a built-in
    pub fn describe(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|builtin| builtin.description())
    }

    /// List all built-in names
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Get built-in count
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no built-ins are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Binds every built-in plus `true`, `false` and `null` in `env`
    pub fn install(&self, env: &Environment) {
        for builtin in self.entries.values() {
            env.define(builtin.name(), Self::to_value(builtin));
        }
        env.define("true", Value::Bool(true));
        env.define("false", Value::Bool(false));
        env.define("null", Value::Null);
    }

    fn to_value(builtin: &Rc<dyn Builtin>) -> Value {
        let target = Rc::clone(builtin);
        Value::native(builtin.name(), builtin.arity(), move |args| {
            target.call(args)
        })
    }
}

impl Default for BuiltinTable {
    fn default() -> Self {
        Self::standard()
    }
}

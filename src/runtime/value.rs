use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::parser::Expression;
use crate::runtime::Environment;

/// Native implementation behind a built-in function
pub type NativeFn = Rc<dyn Fn(&[Value]) -> Result<Value>>;

/// Runtime value representation
///
/// Values are immutable once constructed; lists and closure bodies are shared
/// through reference counting.
#[derive(Clone)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit integer value
    Int(i64),
    /// String value
    String(String),
    /// List of values (reference-counted)
    List(Rc<Vec<Value>>),
    /// Built-in function with a fixed arity
    NativeFunction {
        /// Name the built-in is registered under
        name: &'static str,
        /// Number of arguments the implementation reads
        arity: usize,
        /// The implementation
        func: NativeFn,
    },
    /// User function (closure)
    Closure {
        /// Parameter names
        params: Rc<[String]>,
        /// Body expression
        body: Rc<Expression>,
        /// Frozen snapshot of the defining environment
        env: Environment,
    },
}

/// Variant tag of a [`Value`], used for dynamic type checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `null`
    Null,
    /// `true` / `false`
    Bool,
    /// Integer
    Number,
    /// String
    String,
    /// List
    List,
    /// Built-in function
    NativeFunction,
    /// Closure
    Closure,
}

impl ValueKind {
    /// Type name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::List => "list",
            ValueKind::NativeFunction => "builtin",
            ValueKind::Closure => "function",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// Creates a list value from a vector of values
    pub fn list(values: Vec<Value>) -> Self {
        Value::List(Rc::new(values))
    }

    /// Creates a string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Wraps a native implementation as a built-in function value
    pub fn native(
        name: &'static str,
        arity: usize,
        func: impl Fn(&[Value]) -> Result<Value> + 'static,
    ) -> Self {
        Value::NativeFunction {
            name,
            arity,
            func: Rc::new(func),
        }
    }

    /// Returns the variant tag
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::List(_) => ValueKind::List,
            Value::NativeFunction { .. } => ValueKind::NativeFunction,
            Value::Closure { .. } => ValueKind::Closure,
        }
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> String {
        self.kind().name().to_string()
    }

    /// True for built-ins and closures
    pub fn is_callable(&self) -> bool {
        matches!(
            self,
            Value::NativeFunction { .. } | Value::Closure { .. }
        )
    }

    /// Returns the boolean value, or a type error for any other variant
    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            _ => Err(Error::type_mismatch("bool", self.type_name())),
        }
    }

    /// Returns the integer value, or a type error for any other variant
    pub fn as_int(&self) -> Result<i64> {
        match self {
            Value::Int(n) => Ok(*n),
            _ => Err(Error::type_mismatch("number", self.type_name())),
        }
    }

    /// Returns a reference to the list elements
    pub fn as_list(&self) -> Result<&[Value]> {
        match self {
            Value::List(items) => Ok(items),
            _ => Err(Error::type_mismatch("list", self.type_name())),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, val) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", val)?;
                }
                write!(f, "]")
            }
            Value::NativeFunction { name, arity, .. } => write!(f, "<builtin {}/{}>", name, arity),
            Value::Closure { params, .. } => write!(f, "<function({} params)>", params.len()),
        }
    }
}

// Native closures are not Debug, so spell the variants out
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::NativeFunction { name, arity, .. } => f
                .debug_struct("NativeFunction")
                .field("name", name)
                .field("arity", arity)
                .finish_non_exhaustive(),
            Value::Closure { params, body, .. } => f
                .debug_struct("Closure")
                .field("params", params)
                .field("body", body)
                .finish_non_exhaustive(),
        }
    }
}

// Structural equality for data; functions compare by identity (a closure is
// its shared body plus its captured snapshot)
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::NativeFunction { func: a, .. }, Value::NativeFunction { func: b, .. }) => {
                Rc::ptr_eq(a, b)
            }
            (
                Value::Closure {
                    body: a, env: ea, ..
                },
                Value::Closure {
                    body: b, env: eb, ..
                },
            ) => Rc::ptr_eq(a, b) && ea.ptr_eq(eb),
            _ => false,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::list(values)
    }
}

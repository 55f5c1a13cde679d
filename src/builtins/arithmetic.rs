//! Numeric and equality built-ins: `+`, `<`, `=`

use super::{fixed_args, Builtin, BuiltinTable};
use crate::error::{Error, Result};
use crate::runtime::Value;

/// Register arithmetic built-ins
pub fn register(table: &mut BuiltinTable) {
    table.register(AddTool);
    table.register(LessThanTool);
    table.register(EqualTool);
}

/// `(+ a b)` - integer addition
pub struct AddTool;

impl Builtin for AddTool {
    fn name(&self) -> &'static str {
        "+"
    }

    fn description(&self) -> &str {
        "Add two integers"
    }

    fn arity(&self) -> usize {
        2
    }

    fn call(&self, args: &[Value]) -> Result<Value> {
        let [left, right] = fixed_args::<2>(self.name(), args)?;
        left.as_int()?
            .checked_add(right.as_int()?)
            .map(Value::Int)
            .ok_or_else(|| Error::IntegerOverflow {
                op: self.name().to_string(),
            })
    }
}

/// `(< a b)` - integer comparison
pub struct LessThanTool;

impl Builtin for LessThanTool {
    fn name(&self) -> &'static str {
        "<"
    }

    fn description(&self) -> &str {
        "True if the first integer is smaller than the second"
    }

    fn arity(&self) -> usize {
        2
    }

    fn call(&self, args: &[Value]) -> Result<Value> {
        let [left, right] = fixed_args::<2>(self.name(), args)?;
        Ok(Value::Bool(left.as_int()? < right.as_int()?))
    }
}

/// `(= a b)` - equality of two numbers or two nulls
pub struct EqualTool;

impl Builtin for EqualTool {
    fn name(&self) -> &'static str {
        "="
    }

    fn description(&self) -> &str {
        "Compare two numbers, or two nulls, for equality"
    }

    fn arity(&self) -> usize {
        2
    }

    fn call(&self, args: &[Value]) -> Result<Value> {
        let [left, right] = fixed_args::<2>(self.name(), args)?;
        match (left, right) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a == b)),
            (Value::Null, Value::Null) => Ok(Value::Bool(true)),
            (Value::Int(_), _) | (Value::Null, _) => Err(Error::InvalidComparison {
                left_type: left.type_name(),
                right_type: right.type_name(),
            }),
            _ => Err(Error::type_mismatch("number or null", left.type_name())),
        }
    }
}

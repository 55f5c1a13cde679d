//! List built-ins: `first`, `rest`, `empty`

use super::{fixed_args, Builtin, BuiltinTable};
use crate::error::{Error, Result};
use crate::runtime::Value;

/// Register list built-ins
pub fn register(table: &mut BuiltinTable) {
    table.register(FirstTool);
    table.register(RestTool);
    table.register(EmptyTool);
}

/// `(first list)` - head of a non-empty list
pub struct FirstTool;

impl Builtin for FirstTool {
    fn name(&self) -> &'static str {
        "first"
    }

    fn description(&self) -> &str {
        "First element of a non-empty list"
    }

    fn arity(&self) -> usize {
        1
    }

    fn call(&self, args: &[Value]) -> Result<Value> {
        let [list] = fixed_args::<1>(self.name(), args)?;
        let items = list.as_list()?;
        items.first().cloned().ok_or(Error::IndexOutOfBounds {
            index: 0,
            length: 0,
        })
    }
}

/// `(rest list)` - every element after the head
pub struct RestTool;

impl Builtin for RestTool {
    fn name(&self) -> &'static str {
        "rest"
    }

    fn description(&self) -> &str {
        "All elements of a non-empty list except the first"
    }

    fn arity(&self) -> usize {
        1
    }

    fn call(&self, args: &[Value]) -> Result<Value> {
        let [list] = fixed_args::<1>(self.name(), args)?;
        match list.as_list()? {
            [] => Err(Error::IndexOutOfBounds {
                index: 1,
                length: 0,
            }),
            [_, tail @ ..] => Ok(Value::list(tail.to_vec())),
        }
    }
}

/// `(empty list)` - list emptiness test
pub struct EmptyTool;

impl Builtin for EmptyTool {
    fn name(&self) -> &'static str {
        "empty"
    }

    fn description(&self) -> &str {
        "True if the list has no elements"
    }

    fn arity(&self) -> usize {
        1
    }

    fn call(&self, args: &[Value]) -> Result<Value> {
        let [list] = fixed_args::<1>(self.name(), args)?;
        Ok(Value::Bool(list.as_list()?.is_empty()))
    }
}

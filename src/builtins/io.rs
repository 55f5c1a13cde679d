//! Output built-in: `print`

use std::io::Write;

use super::{fixed_args, Builtin, BuiltinTable, Output};
use crate::error::Result;
use crate::runtime::Value;

/// Register output built-ins writing to `out`
pub fn register(table: &mut BuiltinTable, out: Output) {
    table.register(PrintTool { out });
}

/// `(print value)` - write the rendered value and a newline
pub struct PrintTool {
    out: Output,
}

impl Builtin for PrintTool {
    fn name(&self) -> &'static str {
        "print"
    }

    fn description(&self) -> &str {
        "Print a value followed by a newline; returns null"
    }

    fn arity(&self) -> usize {
        1
    }

    fn call(&self, args: &[Value]) -> Result<Value> {
        let [value] = fixed_args::<1>(self.name(), args)?;
        let mut out = self.out.borrow_mut();
        writeln!(out, "{}", value)?;
        out.flush()?;
        Ok(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_print_writes_rendering() {
        let sink = Rc::new(RefCell::new(Vec::<u8>::new()));
        let print = PrintTool { out: sink.clone() };

        let result = print
            .call(&[Value::list(vec![Value::Int(1), Value::string("a")])])
            .unwrap();
        print.call(&[Value::Bool(true)]).unwrap();

        assert_eq!(result, Value::Null);
        assert_eq!(
            String::from_utf8(sink.borrow().clone()).unwrap(),
            "[1, \"a\"]\ntrue\n"
        );
    }
}

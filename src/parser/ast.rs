use std::fmt;
use std::rc::Rc;

/// Complete parsed program (every top-level form of a source text)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Top-level forms in source order
    pub forms: Vec<Expression>,
}

/// Expression node of the syntax tree
///
/// Nodes are built once by the parser and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Function application: `(callee args...)`
    Call {
        /// Expression in function position
        callee: Box<Expression>,
        /// Argument expressions, left to right
        args: Vec<Expression>,
    },

    /// Anonymous function: `(fn (params...) body)`
    Func {
        /// Parameter names
        params: Vec<String>,
        /// Function body, shared with every closure created from this node
        body: Rc<Expression>,
    },

    /// Binding in the current frame: `(def name binding)`
    Def {
        /// Bound name
        name: String,
        /// Expression producing the bound value
        binding: Box<Expression>,
    },

    /// Conditional: `(if antecedent consequent alternate)`
    If {
        /// Condition, must evaluate to a boolean
        antecedent: Box<Expression>,
        /// Evaluated when the condition is true
        consequent: Box<Expression>,
        /// Evaluated when the condition is false
        alternate: Box<Expression>,
    },

    /// Sequential evaluation: `(seq exprs...)`
    Seq(Vec<Expression>),

    /// Quoted list literal: `'(elements...)`
    List(Vec<Expression>),

    /// Name reference
    Identifier(String),

    /// Integer literal
    Number(i64),

    /// String literal
    StringLiteral(String),
}

impl Expression {
    /// Convenience constructor for an identifier node
    pub fn ident(name: impl Into<String>) -> Self {
        Expression::Identifier(name.into())
    }

    /// Name of the variant, used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::Call { .. } => "call",
            Expression::Func { .. } => "fn",
            Expression::Def { .. } => "def",
            Expression::If { .. } => "if",
            Expression::Seq(_) => "seq",
            Expression::List(_) => "list",
            Expression::Identifier(_) => "identifier",
            Expression::Number(_) => "number",
            Expression::StringLiteral(_) => "string",
        }
    }
}

fn write_list(f: &mut fmt::Formatter, items: &[Expression]) -> fmt::Result {
    write!(f, "[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, "]")
}

/// Structural rendering of the tree
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::Call { callee, args } => {
                write!(f, "Call(Fn={}, Args=", callee)?;
                write_list(f, args)?;
                write!(f, ")")
            }
            Expression::Func { params, body } => {
                write!(f, "Func(Params=[{}], Body={})", params.join(", "), body)
            }
            Expression::Def { name, binding } => {
                write!(f, "Def(Name={}, Binding={})", name, binding)
            }
            Expression::If {
                antecedent,
                consequent,
                alternate,
            } => write!(
                f,
                "If(Antecedent={}, Consequent={}, Alternate={})",
                antecedent, consequent, alternate
            ),
            Expression::Seq(body) => {
                write!(f, "Seq(Body=")?;
                write_list(f, body)?;
                write!(f, ")")
            }
            Expression::List(elements) => {
                write!(f, "List(Elements=")?;
                write_list(f, elements)?;
                write!(f, ")")
            }
            Expression::Identifier(name) => write!(f, "Identifier({:?})", name),
            Expression::Number(n) => write!(f, "Number({})", n),
            Expression::StringLiteral(s) => write!(f, "String({:?})", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_display() {
        let expr = Expression::Call {
            callee: Box::new(Expression::ident("+")),
            args: vec![Expression::Number(1), Expression::Number(2)],
        };
        assert_eq!(
            expr.to_string(),
            r#"Call(Fn=Identifier("+"), Args=[Number(1), Number(2)])"#
        );

        let func = Expression::Func {
            params: vec!["a".to_string(), "b".to_string()],
            body: Rc::new(Expression::ident("a")),
        };
        assert_eq!(
            func.to_string(),
            r#"Func(Params=[a, b], Body=Identifier("a"))"#
        );
    }

    #[test]
    fn test_kind_name() {
        assert_eq!(Expression::Seq(Vec::new()).kind_name(), "seq");
        assert_eq!(Expression::StringLiteral("s".into()).kind_name(), "string");
    }
}

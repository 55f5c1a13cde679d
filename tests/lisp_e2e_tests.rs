/// End-to-end integration tests
/// Demonstrates: Scanner → Parser → Evaluator working together
use std::cell::RefCell;
use std::rc::Rc;

use yalig::builtins::BuiltinTable;
use yalig::lexer::SExprScanner;
use yalig::parser::{Expression, SExprParser};
use yalig::runtime::{LispEvaluator, Value};
use yalig::{Config, Error, ErrorCategory, Session};

fn eval(source: &str) -> yalig::Result<Value> {
    let mut scanner = SExprScanner::new(source);
    let tokens = scanner.scan_tokens()?;
    let mut parser = SExprParser::new(tokens);
    let program = parser.parse_program()?;
    let mut evaluator = LispEvaluator::new();
    evaluator.execute(&program)
}

/// Session whose `print` output is captured
fn capturing_session() -> (Session, Rc<RefCell<Vec<u8>>>) {
    let sink = Rc::new(RefCell::new(Vec::new()));
    let table = BuiltinTable::with_output(sink.clone());
    (Session::with_builtins(Config::default(), &table), sink)
}

fn output(sink: &Rc<RefCell<Vec<u8>>>) -> String {
    String::from_utf8(sink.borrow().clone()).unwrap()
}

#[test]
fn test_e2e_simple_arithmetic() {
    let source = "(+ 1 2)";

    // Lex
    let mut scanner = SExprScanner::new(source);
    let tokens = scanner.scan_tokens().unwrap();

    // Parse
    let mut parser = SExprParser::new(tokens);
    let form = parser.parse().unwrap().unwrap();
    assert!(parser.parse().unwrap().is_none());

    // Evaluate
    let mut evaluator = LispEvaluator::new();
    let result = evaluator.eval(&form).unwrap();

    assert_eq!(result, Value::Int(3));
}

#[test]
fn test_e2e_define_then_reference() {
    let source = r#"
        (def x 10)
        (def y 20)
        (+ x y)
    "#;

    assert_eq!(eval(source).unwrap(), Value::Int(30));
}

#[test]
fn test_e2e_parse_structure_renders() {
    let tokens = SExprScanner::new("(+ 1 2)").scan_tokens().unwrap();
    let form = SExprParser::new(tokens).parse().unwrap().unwrap();
    assert_eq!(
        form.to_string(),
        r#"Call(Fn=Identifier("+"), Args=[Number(1), Number(2)])"#
    );
    assert!(matches!(form, Expression::Call { .. }));
}

#[test]
fn test_e2e_closure_sees_snapshot() {
    let source = r#"
        (def x 1)
        (def f (fn () x))
        (def x 2)
        (f)
    "#;

    assert_eq!(eval(source).unwrap(), Value::Int(1));
}

#[test]
fn test_e2e_closure_returning_closure() {
    let source = r#"
        (def adder (fn (n) (fn (m) (+ n m))))
        (def add5 (adder 5))
        (def add7 (adder 7))
        '((add5 1) (add7 1))
    "#;

    assert_eq!(
        eval(source).unwrap(),
        Value::list(vec![Value::Int(6), Value::Int(8)])
    );
}

#[test]
fn test_e2e_defun_and_self_passing_recursion() {
    let source = r#"
        (defun length (self xs)
          (if (empty xs) 0 (+ 1 (self self (rest xs)))))
        (length length '(5 4 3 2 1))
    "#;

    assert_eq!(eval(source).unwrap(), Value::Int(5));
}

#[test]
fn test_e2e_list_builtins() {
    assert_eq!(eval("(first '(1 2 3))").unwrap(), Value::Int(1));
    assert_eq!(
        eval("(rest '(1 2 3))").unwrap(),
        Value::list(vec![Value::Int(2), Value::Int(3)])
    );
    assert_eq!(eval("(rest '(1))").unwrap(), Value::list(vec![]));
    assert_eq!(eval("(empty '())").unwrap(), Value::Bool(true));
    assert_eq!(eval("(empty '(null))").unwrap(), Value::Bool(false));
}

#[test]
fn test_e2e_equality() {
    assert_eq!(eval("(= 3 3)").unwrap(), Value::Bool(true));
    assert_eq!(eval("(= 3 4)").unwrap(), Value::Bool(false));
    assert_eq!(eval("(= null null)").unwrap(), Value::Bool(true));
    assert!(eval("(= 1 null)").is_err());
    assert!(eval(r#"(= "a" "a")"#).is_err());
}

#[test]
fn test_e2e_print_output() {
    let (mut session, sink) = capturing_session();
    let result = session
        .eval_str(r#"(print "hi") (print '(1 "two" null)) (print (< 1 2))"#)
        .unwrap();

    assert_eq!(result, Value::Null);
    assert_eq!(output(&sink), "\"hi\"\n[1, \"two\", null]\ntrue\n");
}

#[test]
fn test_e2e_if_evaluates_one_branch() {
    let (mut session, sink) = capturing_session();
    session
        .eval_str(r#"(if (< 2 1) (print "then") (print "else"))"#)
        .unwrap();
    assert_eq!(output(&sink), "\"else\"\n");
}

#[test]
fn test_e2e_error_categories() {
    let cases = [
        ("(def x", ErrorCategory::Parse),
        ("12abc", ErrorCategory::Parse),
        ("(5 6)", ErrorCategory::Parse),
        ("nope", ErrorCategory::UnboundName),
        ("(if 0 1 2)", ErrorCategory::TypeMismatch),
        (r#"(+ "a" 1)"#, ErrorCategory::TypeMismatch),
        ("(+ 12-3 1)", ErrorCategory::Parse),
        ("(first '())", ErrorCategory::OutOfRange),
        ("(rest '())", ErrorCategory::OutOfRange),
        ("(seq (def f (fn (x) x)) (f))", ErrorCategory::Arity),
        ("(first)", ErrorCategory::Arity),
        ("(seq (def n 1) (n))", ErrorCategory::NotCallable),
    ];

    for (source, expected) in cases {
        match eval(source) {
            Err(err) => assert_eq!(err.category(), expected, "source: {}", source),
            Ok(v) => panic!("{} evaluated to {} instead of failing", source, v),
        }
    }
}

#[test]
fn test_e2e_integer_overflow_is_reported() {
    assert!(matches!(
        eval("(+ 9223372036854775807 1)"),
        Err(Error::IntegerOverflow { .. })
    ));
}

#[test]
fn test_e2e_session_keeps_going_after_errors() {
    let (mut session, sink) = capturing_session();
    let mut values = Vec::new();
    let summary = session
        .run(
            r#"(print 1) (first 5) (print 2) (undefined-thing) (+ 40 2)"#,
            |v| values.push(v.clone()),
        )
        .unwrap();

    assert_eq!(summary.forms, 5);
    assert_eq!(summary.failures, 2);
    assert_eq!(summary.last, Value::Int(42));
    assert_eq!(values, vec![Value::Null, Value::Null, Value::Int(42)]);
    assert_eq!(output(&sink), "1\n2\n");
}

#[test]
fn test_e2e_session_stops_at_parse_error() {
    let (mut session, sink) = capturing_session();
    let err = session.run("(print 1) (def 2 3) (print 3)", |_| {}).unwrap_err();
    assert!(err.is_parse_error());
    assert_eq!(output(&sink), "1\n");
}

#[test]
fn test_e2e_deep_recursion_is_bounded() {
    let table = BuiltinTable::with_output(Rc::new(RefCell::new(std::io::sink())));
    let mut session = Session::with_builtins(Config::default().with_max_depth(300), &table);
    let err = session
        .eval_str("(defun forever (self) (self self)) (forever forever)")
        .unwrap_err();
    assert_eq!(err, Error::RecursionLimitExceeded { limit: 300 });
}

#[test]
fn test_e2e_default_depth_limit_is_an_error() {
    let (mut session, _) = capturing_session();
    let err = session
        .eval_str("(defun forever (self) (self self)) (forever forever)")
        .unwrap_err();
    assert_eq!(
        err,
        Error::RecursionLimitExceeded {
            limit: yalig::runtime::DEFAULT_MAX_DEPTH
        }
    );
    // The session survives the failure
    assert_eq!(session.eval_str("(+ 1 1)").unwrap(), Value::Int(2));
}

#[test]
fn test_e2e_empty_program() {
    assert_eq!(eval("").unwrap(), Value::Null);
    assert_eq!(eval("  ; just a comment\n").unwrap(), Value::Null);
}

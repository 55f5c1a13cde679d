//! Read-eval surface over whole source texts
//!
//! A [`Session`] keeps one evaluator alive across calls, so definitions made
//! by one source text are visible to the next. Forms are handled strictly in
//! order: form `n` is parsed, evaluated and reported before form `n + 1` is
//! parsed.

use crate::builtins::BuiltinTable;
use crate::config::Config;
use crate::error::Result;
use crate::lexer::SExprScanner;
use crate::parser::SExprParser;
use crate::runtime::{LispEvaluator, Value};

/// Outcome of [`Session::run`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunSummary {
    /// Top-level forms parsed
    pub forms: usize,
    /// Forms whose evaluation failed and was skipped
    pub failures: usize,
    /// Value of the last form that evaluated successfully
    pub last: Value,
}

/// Interpreter session
pub struct Session {
    evaluator: LispEvaluator,
    config: Config,
}

impl Session {
    /// Session with the standard built-ins
    pub fn new(config: Config) -> Self {
        Self::with_builtins(config, &BuiltinTable::standard())
    }

    /// Session whose global frame holds `builtins`
    pub fn with_builtins(config: Config, builtins: &BuiltinTable) -> Self {
        let evaluator = LispEvaluator::with_builtins(builtins).with_max_depth(config.max_depth);
        Session { evaluator, config }
    }

    /// The active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The underlying evaluator
    pub fn evaluator(&mut self) -> &mut LispEvaluator {
        &mut self.evaluator
    }

    /// Evaluates every form of `source` and returns the last value.
    ///
    /// Stops at the first error of any kind. Empty input yields `null`.
    pub fn eval_str(&mut self, source: &str) -> Result<Value> {
        let tokens = SExprScanner::new(source).scan_tokens()?;
        let mut parser = SExprParser::new(tokens);

        let mut last_val = Value::Null;
        while let Some(form) = parser.parse()? {
            last_val = self.evaluator.eval(&form)?;
        }
        Ok(last_val)
    }

    /// Runs `source` form by form, handing each value to `on_value`.
    ///
    /// A lexical or parse error ends the run after every form before it has
    /// been evaluated. Evaluation errors are logged and counted, unless
    /// `fail_fast` is set, in which case the first one is returned.
    pub fn run<F>(&mut self, source: &str, mut on_value: F) -> Result<RunSummary>
    where
        F: FnMut(&Value),
    {
        let (tokens, mut lex_error) = SExprScanner::new(source).scan_prefix();
        let mut parser = SExprParser::new(tokens);
        let mut summary = RunSummary::default();

        loop {
            let form = match parser.parse() {
                Ok(Some(form)) => form,
                Ok(None) => match lex_error.take() {
                    Some(err) => return Err(err),
                    None => break,
                },
                // A form cut short by a lexical error reports the lexical error
                Err(err) => {
                    let err = lex_error.take().unwrap_or(err);
                    tracing::debug!("Parse failed after {} forms: {}", summary.forms, err);
                    return Err(err);
                }
            };

            summary.forms += 1;
            tracing::debug!(
                "Evaluating form {} ({}): {}",
                summary.forms,
                form.kind_name(),
                form
            );

            match self.evaluator.eval(&form) {
                Ok(value) => {
                    on_value(&value);
                    summary.last = value;
                }
                Err(err) if self.config.fail_fast => return Err(err),
                Err(err) => {
                    tracing::warn!("Form {} failed: {}", summary.forms, err);
                    summary.failures += 1;
                }
            }
        }

        Ok(summary)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn quiet_session(config: Config) -> (Session, Rc<RefCell<Vec<u8>>>) {
        let sink = Rc::new(RefCell::new(Vec::new()));
        let session = Session::with_builtins(config, &BuiltinTable::with_output(sink.clone()));
        (session, sink)
    }

    #[test]
    fn test_eval_str_returns_last_value() {
        let (mut session, _) = quiet_session(Config::default());
        assert_eq!(session.eval_str("(def x 2) (+ x 3)").unwrap(), Value::Int(5));
        assert_eq!(session.eval_str("").unwrap(), Value::Null);
        // Definitions persist across calls
        assert_eq!(session.eval_str("x").unwrap(), Value::Int(2));
    }

    #[test]
    fn test_run_reports_each_value() {
        let (mut session, _) = quiet_session(Config::default());
        let mut seen = Vec::new();
        let summary = session
            .run("(def x 1) x (+ x 1)", |v| seen.push(v.clone()))
            .unwrap();
        assert_eq!(seen, vec![Value::Null, Value::Int(1), Value::Int(2)]);
        assert_eq!(summary.forms, 3);
        assert_eq!(summary.failures, 0);
        assert_eq!(summary.last, Value::Int(2));
    }

    #[test]
    fn test_run_skips_failed_forms() {
        let (mut session, _) = quiet_session(Config::default());
        let mut seen = Vec::new();
        let summary = session
            .run("(+ 1 missing) (+ 1 1)", |v| seen.push(v.clone()))
            .unwrap();
        assert_eq!(seen, vec![Value::Int(2)]);
        assert_eq!(summary.failures, 1);
    }

    #[test]
    fn test_run_fail_fast() {
        let (mut session, _) = quiet_session(Config::default().with_fail_fast(true));
        let mut count = 0;
        let result = session.run("(+ 1 missing) (+ 1 1)", |_| count += 1);
        assert!(matches!(result, Err(Error::UndefinedVariable { .. })));
        assert_eq!(count, 0);
    }

    #[test]
    fn test_run_evaluates_forms_before_parse_error() {
        let (mut session, sink) = quiet_session(Config::default());
        let result = session.run("(print 1) (print 2) (5 6) (print 3)", |_| {});
        assert!(matches!(result, Err(Error::SyntaxError { .. })));
        assert_eq!(sink.borrow().as_slice(), b"1\n2\n");
    }

    #[test]
    fn test_run_evaluates_forms_before_lex_error() {
        let (mut session, sink) = quiet_session(Config::default());
        let result = session.run("(print 1) (print 12abc)", |_| {});
        assert!(matches!(result, Err(Error::ParseError(_))));
        assert_eq!(sink.borrow().as_slice(), b"1\n");
    }

    #[test]
    fn test_max_depth_from_config() {
        let (mut session, _) = quiet_session(Config::default().with_max_depth(20));
        let result = session.eval_str("(def f (fn (s) (s s))) (f f)");
        assert!(matches!(
            result,
            Err(Error::RecursionLimitExceeded { limit: 20 })
        ));
    }
}

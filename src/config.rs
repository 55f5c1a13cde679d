//! Interpreter configuration

use crate::runtime::DEFAULT_MAX_DEPTH;

/// Environment variable that overrides [`Config::max_depth`]
pub const MAX_DEPTH_VAR: &str = "YALIG_MAX_DEPTH";

/// Settings shared by the session and the command-line front end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum nesting of evaluator calls before `RecursionLimitExceeded`
    pub max_depth: usize,
    /// Stop at the first evaluation error instead of skipping the form
    pub fail_fast: bool,
    /// Print the value of each top-level form
    pub echo: bool,
    /// Dump the token stream instead of evaluating
    pub dump_tokens: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_depth: DEFAULT_MAX_DEPTH,
            fail_fast: false,
            echo: true,
            dump_tokens: false,
        }
    }
}

impl Config {
    /// Defaults, with `max_depth` taken from `YALIG_MAX_DEPTH` when it holds a
    /// positive integer
    pub fn from_env() -> Self {
        let mut config = Config::default();
        if let Ok(raw) = std::env::var(MAX_DEPTH_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => config.max_depth = depth,
                _ => tracing::warn!(
                    "Ignoring {}={:?}: expected a positive integer",
                    MAX_DEPTH_VAR,
                    raw
                ),
            }
        }
        config
    }

    /// Sets the evaluator nesting bound
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets fail-fast mode
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }
}

//! Stack growth for the recursive parser and evaluator
//!
//! Both recurse once per nesting level of the input. Each recursive step is
//! wrapped in [`ensure_sufficient_stack`], which moves execution onto a fresh
//! heap-allocated segment when the current stack runs low. Nesting is then
//! bounded by the evaluator's `max_depth` and by memory, not by the size of
//! the calling thread's stack.

/// Grow the stack when less than this remains (100 KiB)
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment (1 MiB)
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Runs `f`, first growing the stack if the red zone has been reached
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack
#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

//! Stack growth for the recursive tree walker.
//!
//! Component bodies nest arbitrarily: JSX trees inside list callbacks inside
//! components calling other components. Every recursive entry point of the
//! evaluator goes through [`ensure_sufficient_stack`] so a deeply nested
//! bundle grows the native stack instead of aborting the host.
//!
//! On `wasm32` the helper is a plain call.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

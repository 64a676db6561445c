//! Call stack tracking and evaluation counters.
//!
//! - `CallStack`: live invocation frames, each owning the scope its body
//!   runs in. The depth limit is checked on `push()`.
//! - `EvalCounters`: optional counters reported by `recos render --profile`.
//!
//! When an error leaves a function, the interpreter snapshots the frames
//! into an `EvalBacktrace` via [`CallStack::attach_backtrace`].

use crate::environment::ScopeRef;
use crate::errors::{stack_overflow, EvalBacktrace, EvalError};

/// One active invocation.
#[derive(Clone, Debug)]
pub struct StackFrame {
    /// Function name, or `<anonymous>`.
    pub name: String,
    /// The frame's own scope; its parent is the callee's captured scope or
    /// the interpreter root.
    pub scope: ScopeRef,
}

/// Live call stack (LIFO).
#[derive(Clone, Debug, Default)]
pub struct CallStack {
    frames: Vec<StackFrame>,
    max_depth: Option<usize>,
}

impl CallStack {
    /// `max_depth` is `None` for unbounded recursion (stack growth only).
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a frame, checking the depth limit.
    ///
    /// The frame is not pushed on overflow.
    pub fn push(&mut self, frame: StackFrame) -> Result<(), EvalError> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(stack_overflow(max));
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<StackFrame> {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop()
    }

    /// The innermost frame.
    pub fn top(&self) -> Option<&StackFrame> {
        self.frames.last()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Snapshot frame names, most recent call first.
    pub fn capture(&self) -> EvalBacktrace {
        EvalBacktrace::new(self.frames.iter().rev().map(|f| f.name.clone()).collect())
    }

    /// Attach a backtrace of the current frames to `err`, unless it already
    /// carries one from a deeper frame.
    pub fn attach_backtrace(&self, err: EvalError) -> EvalError {
        if self.frames.is_empty() || err.backtrace.is_some() {
            return err;
        }
        err.with_backtrace(self.capture())
    }
}

/// Evaluation counters, enabled by the host for profiling.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalCounters {
    pub expressions_evaluated: u64,
    pub function_calls: u64,
    pub elements_rendered: u64,
    pub hook_visits: u64,
}

impl EvalCounters {
    #[inline]
    pub fn count_expression(&mut self) {
        self.expressions_evaluated = self.expressions_evaluated.wrapping_add(1);
    }

    #[inline]
    pub fn count_function_call(&mut self) {
        self.function_calls = self.function_calls.wrapping_add(1);
    }

    #[inline]
    pub fn count_element(&mut self) {
        self.elements_rendered = self.elements_rendered.wrapping_add(1);
    }

    #[inline]
    pub fn count_hook(&mut self) {
        self.hook_visits = self.hook_visits.wrapping_add(1);
    }

    /// Format a summary report.
    pub fn report(&self) -> String {
        format!(
            "Evaluation profile:\n  \
             expressions evaluated: {}\n  \
             function calls:        {}\n  \
             elements rendered:     {}\n  \
             hook visits:           {}",
            self.expressions_evaluated,
            self.function_calls,
            self.elements_rendered,
            self.hook_visits,
        )
    }
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    reason = "tests use expect to panic on unexpected state"
)]
mod tests;

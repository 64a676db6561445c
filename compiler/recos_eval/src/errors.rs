//! Evaluation errors.
//!
//! `EvalErrorKind` is the structured category; `EvalError` wraps it with the
//! backtrace of active frames captured when the error left a function.
//! Call sites build errors only through the `#[cold]` factory functions at
//! the bottom of this module.

use std::fmt;

use crate::value::Value;

/// Result of evaluation.
pub type EvalResult<T = Value> = Result<T, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("unsupported operation: {operation}")]
    UnsupportedOperation { operation: String },

    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: i64, len: usize },

    #[error("unresolved identifier: {name}")]
    UnresolvedIdentifier { name: String },

    #[error("cannot destructure {expected} names from an array of {got} elements")]
    DestructureArityMismatch { expected: usize, got: usize },

    #[error("modulo by zero")]
    ModuloByZero,

    #[error("maximum call depth exceeded (limit: {depth})")]
    StackOverflow { depth: usize },
}

/// Immutable snapshot of the call stack at the point an error left a frame.
///
/// Most recent call first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<String>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<String>) -> Self {
        Self { frames }
    }

    /// Frame names, innermost first.
    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "stack backtrace:")?;
        for (i, name) in self.frames.iter().enumerate() {
            writeln!(f, "  {i}: {name}")?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Active frames when the error crossed its first function boundary.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        Self {
            kind,
            backtrace: None,
        }
    }

    /// Attach a backtrace unless one was captured deeper in the stack.
    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        if self.backtrace.is_none() && !backtrace.is_empty() {
            self.backtrace = Some(backtrace);
        }
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

// Type errors

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

/// Called something that is not a function.
#[cold]
pub fn not_callable(got: &str) -> EvalError {
    type_mismatch("function", got)
}

// Unsupported constructs

#[cold]
pub fn unsupported(operation: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedOperation {
        operation: operation.into(),
    })
}

/// Operator applied to operand types it has no meaning for.
#[cold]
pub fn invalid_binary_op(op: &str, left: &str, right: &str) -> EvalError {
    unsupported(format!("`{left} {op} {right}`"))
}

/// A hook intrinsic used outside of a stateful render.
#[cold]
pub fn hook_outside_render(hook: &str) -> EvalError {
    unsupported(format!("`{hook}` called outside of a stateful render"))
}

// Access errors

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len })
}

#[cold]
pub fn unresolved_identifier(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnresolvedIdentifier {
        name: name.to_string(),
    })
}

#[cold]
pub fn destructure_arity_mismatch(expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DestructureArityMismatch { expected, got })
}

// Arithmetic and resource errors

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

#[cold]
pub fn stack_overflow(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth })
}

#[cfg(test)]
mod tests;

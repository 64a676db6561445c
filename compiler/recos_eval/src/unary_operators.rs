//! Unary and update operator implementations for the evaluator.

use recos_ir::{UnaryOp, UpdateOp};

use crate::errors::{type_mismatch, unsupported, EvalError, EvalResult};
use crate::value::{int_to_f64, Value};

/// Evaluate a prefix unary operation.
pub fn evaluate_unary(value: &Value, op: UnaryOp) -> EvalResult {
    match (value, op) {
        (Value::Bool(b), UnaryOp::Not) => Ok(Value::Bool(!b)),
        (Value::Int(n), UnaryOp::Neg) => Ok(n
            .checked_neg()
            .map_or_else(|| Value::Float(-int_to_f64(*n)), Value::Int)),
        (Value::Float(n), UnaryOp::Neg) => Ok(Value::Float(-n)),
        _ => Err(invalid_unary_op(value, op)),
    }
}

/// Next value of an update expression over the current binding.
///
/// Float bindings are truncated first, so `++` on `1.5` yields `2`.
/// Returns `(prior, next)`.
pub fn evaluate_update(current: &Value, op: UpdateOp) -> EvalResult<(i64, i64)> {
    let prior = match current {
        Value::Int(_) | Value::Float(_) => current.as_integer().unwrap_or_default(),
        other => return Err(type_mismatch("number", other.type_name())),
    };
    let next = match op {
        UpdateOp::Increment => prior.checked_add(1),
        UpdateOp::Decrement => prior.checked_sub(1),
    };
    next.map(|next| (prior, next))
        .ok_or_else(|| unsupported(format!("integer overflow in `{}`", op.as_symbol())))
}

#[cold]
fn invalid_unary_op(value: &Value, op: UnaryOp) -> EvalError {
    unsupported(format!("`{}{}`", op.as_symbol(), value.type_name()))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::errors::EvalErrorKind;

    #[test]
    fn test_not() {
        assert_eq!(evaluate_unary(&Value::Bool(true), UnaryOp::Not).unwrap(), Value::Bool(false));
        let err = evaluate_unary(&Value::Int(0), UnaryOp::Not).unwrap_err();
        assert_eq!(
            err.kind,
            EvalErrorKind::UnsupportedOperation {
                operation: "`!number`".into()
            }
        );
    }

    #[test]
    fn test_neg() {
        assert!(matches!(evaluate_unary(&Value::Int(3), UnaryOp::Neg).unwrap(), Value::Int(-3)));
        assert!(matches!(
            evaluate_unary(&Value::Float(1.5), UnaryOp::Neg).unwrap(),
            Value::Float(n) if n == -1.5
        ));
        assert!(matches!(
            evaluate_unary(&Value::Int(i64::MIN), UnaryOp::Neg).unwrap(),
            Value::Float(_)
        ));
        assert!(evaluate_unary(&Value::string("a"), UnaryOp::Neg).is_err());
    }

    #[test]
    fn test_update_steps() {
        assert_eq!(evaluate_update(&Value::Int(1), UpdateOp::Increment).unwrap(), (1, 2));
        assert_eq!(evaluate_update(&Value::Int(1), UpdateOp::Decrement).unwrap(), (1, 0));
    }

    #[test]
    fn test_update_truncates_floats() {
        assert_eq!(evaluate_update(&Value::Float(1.7), UpdateOp::Increment).unwrap(), (1, 2));
        assert_eq!(evaluate_update(&Value::Float(-1.7), UpdateOp::Increment).unwrap(), (-1, 0));
    }

    #[test]
    fn test_update_non_numeric() {
        let err = evaluate_update(&Value::string("1"), UpdateOp::Increment).unwrap_err();
        assert_eq!(
            err.kind,
            EvalErrorKind::TypeMismatch {
                expected: "number".into(),
                got: "string".into()
            }
        );
    }

    #[test]
    fn test_update_overflow() {
        assert!(evaluate_update(&Value::Int(i64::MAX), UpdateOp::Increment).is_err());
    }
}

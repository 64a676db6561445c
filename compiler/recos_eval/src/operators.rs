//! Binary operator implementations for the evaluator.
//!
//! Direct enum-based dispatch. Numbers are one type to scripts: an `Int`
//! result is kept only where the operation is closed over integers (`+` on
//! two ints without overflow, `%`); `-`, `*` and `/` always produce floats.

use recos_ir::BinaryOp;

use crate::errors::{invalid_binary_op, modulo_by_zero, EvalResult};
use crate::value::{format_number, int_to_f64, truncate_to_i64, Value};

/// Evaluate a binary operation. Both operands are already evaluated, so
/// `&&` and `||` are eager.
#[expect(
    clippy::needless_pass_by_value,
    reason = "callers hand over freshly evaluated operands"
)]
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => eval_add(&left, &right),
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => eval_float_arith(&left, &right, op),
        BinaryOp::Mod => eval_mod(&left, &right),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            eval_relational(&left, &right, op)
        }
        BinaryOp::Eq => loose_equals(&left, &right, op).map(Value::Bool),
        BinaryOp::NotEq => loose_equals(&left, &right, op).map(|eq| Value::Bool(!eq)),
        BinaryOp::And | BinaryOp::Or => eval_logical(&left, &right, op),
        BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::BitXor => Err(mismatch(&left, &right, op)),
    }
}

/// `+`: concatenation when either side is a string, numeric addition
/// otherwise.
fn eval_add(left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Ok(a
            .checked_add(*b)
            .map_or_else(|| Value::Float(int_to_f64(*a) + int_to_f64(*b)), Value::Int)),
        (Value::Str(_), _) | (_, Value::Str(_)) => {
            match (concat_operand(left), concat_operand(right)) {
                (Some(a), Some(b)) => Ok(Value::string(a + &b)),
                _ => Err(mismatch(left, right, BinaryOp::Add)),
            }
        }
        _ => match (left.as_number(), right.as_number()) {
            (Some(a), Some(b)) => Ok(Value::Float(a + b)),
            _ => Err(mismatch(left, right, BinaryOp::Add)),
        },
    }
}

/// String form of a scalar for concatenation; collections and functions
/// don't concatenate.
fn concat_operand(value: &Value) -> Option<String> {
    match value {
        Value::Str(s) => Some(s.to_string()),
        Value::Int(n) => Some(n.to_string()),
        Value::Float(n) => Some(format_number(*n)),
        Value::Bool(_) | Value::Null | Value::Undefined => Some(value.to_string()),
        Value::Array(_) | Value::Object(_) | Value::Function(_) => None,
    }
}

fn eval_float_arith(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    let (Some(a), Some(b)) = (left.as_number(), right.as_number()) else {
        return Err(mismatch(left, right, op));
    };
    let result = match op {
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        _ => a / b,
    };
    Ok(Value::Float(result))
}

/// `%` on integer-truncated operands.
fn eval_mod(left: &Value, right: &Value) -> EvalResult {
    let (Some(a), Some(b)) = (left.as_number(), right.as_number()) else {
        return Err(mismatch(left, right, BinaryOp::Mod));
    };
    let (a, b) = (truncate_to_i64(a), truncate_to_i64(b));
    if b == 0 {
        return Err(modulo_by_zero());
    }
    Ok(Value::Int(a.wrapping_rem(b)))
}

fn eval_relational(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    let (Some(a), Some(b)) = (left.as_number(), right.as_number()) else {
        return Err(mismatch(left, right, op));
    };
    let result = match op {
        BinaryOp::Lt => a < b,
        BinaryOp::LtEq => a <= b,
        BinaryOp::Gt => a > b,
        _ => a >= b,
    };
    Ok(Value::Bool(result))
}

/// `==` semantics: numbers compare numerically, same-typed scalars by
/// content, `null`/`undefined` only equal each other, collections and
/// functions by reference. Anything else is not comparable.
fn loose_equals(left: &Value, right: &Value, op: BinaryOp) -> EvalResult<bool> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Ok(a == b),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            Ok(left.as_number() == right.as_number())
        }
        (Value::Str(a), Value::Str(b)) => Ok(a == b),
        (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
        (Value::Null | Value::Undefined, _) | (_, Value::Null | Value::Undefined) => {
            Ok(left.is_nullish() && right.is_nullish())
        }
        (Value::Array(a), Value::Array(b)) => Ok(a.ptr_eq(b)),
        (Value::Object(a), Value::Object(b)) => Ok(a.ptr_eq(b)),
        (Value::Function(_), Value::Function(_)) => Ok(left == right),
        _ => Err(mismatch(left, right, op)),
    }
}

fn eval_logical(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(if op == BinaryOp::And {
            *a && *b
        } else {
            *a || *b
        })),
        _ => Err(mismatch(left, right, op)),
    }
}

#[cold]
fn mismatch(left: &Value, right: &Value, op: BinaryOp) -> crate::errors::EvalError {
    invalid_binary_op(op.as_symbol(), left.type_name(), right.type_name())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;

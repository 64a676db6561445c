//! Runtime values.
//!
//! Scalars are stored inline. Arrays and objects are shared by reference
//! (`Rc<RefCell<_>>`) so a mutation through one alias is visible through
//! every other, as scripts expect. Functions are either declared closures
//! over a captured scope or native callables supplied by the host or by the
//! hook layer.
//!
//! All heap values go through the factory methods on [`Value`].

mod collections;
mod function;
mod json;

use std::fmt;
use std::rc::Rc;

use recos_ir::NumberLiteral;

pub use collections::{ArrayValue, MemberProvider, MemberSetter, ObjectValue};
pub use function::{DeclaredFunction, FunctionValue, NativeFn, NativeFunction};

use crate::errors::{type_mismatch, EvalResult};

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    /// A number that is currently integral.
    Int(i64),
    /// A number with a fractional part, or the result of float arithmetic.
    Float(f64),
    Str(Rc<str>),
    Bool(bool),
    Array(ArrayValue),
    Object(ObjectValue),
    Function(FunctionValue),
    Null,
    Undefined,
}

// Factory Methods

impl Value {
    #[inline]
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::Str(Rc::from(s.as_ref()))
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(ArrayValue::new(items))
    }

    pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Object(ObjectValue::from_entries(entries))
    }

    /// Wrap a host closure as a callable value.
    pub fn native(
        name: impl Into<String>,
        func: impl Fn(&[Value]) -> EvalResult + 'static,
    ) -> Self {
        Value::Function(FunctionValue::native(name, func))
    }
}

impl From<NumberLiteral> for Value {
    fn from(literal: NumberLiteral) -> Self {
        match literal {
            NumberLiteral::Int(n) => Value::Int(n),
            NumberLiteral::Float(n) => Value::Float(n),
        }
    }
}

impl Value {
    /// Conditions are satisfied only by `Bool(true)`; there is no truthiness
    /// coercion.
    #[inline]
    pub fn is_true(&self) -> bool {
        matches!(self, Value::Bool(true))
    }

    #[inline]
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Numeric value in the floating domain.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(int_to_f64(*n)),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric value truncated toward zero.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Float(n) => Some(truncate_to_i64(*n)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionValue> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Get the type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) | Value::Float(_) => "number",
            Value::Str(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
            Value::Null => "null",
            Value::Undefined => "undefined",
        }
    }

    /// The member protocol of this value, if it has one.
    pub fn as_member_provider(&self) -> Option<&dyn MemberProvider> {
        match self {
            Value::Array(array) => Some(array),
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Read `name` through the member protocol.
    pub fn get_member(&self, name: &str) -> EvalResult {
        match self.as_member_provider() {
            Some(provider) => provider.get(name),
            None => Err(type_mismatch("array or object", self.type_name())),
        }
    }

    /// Resolve a write target for `name` through the member protocol.
    pub fn member_setter(&self, name: &str) -> EvalResult<MemberSetter> {
        match self.as_member_provider() {
            Some(provider) => provider.setter(name),
            None => Err(type_mismatch("array or object", self.type_name())),
        }
    }
}

/// Integer to float, the one lossy conversion numbers go through.
#[inline]
#[allow(clippy::cast_precision_loss, reason = "script numbers are doubles")]
pub(crate) fn int_to_f64(n: i64) -> f64 {
    n as f64
}

/// Float to integer, truncating toward zero and saturating at the bounds.
#[inline]
#[allow(
    clippy::cast_possible_truncation,
    reason = "truncation is the documented integer coercion"
)]
pub(crate) fn truncate_to_i64(n: f64) -> i64 {
    n.trunc() as i64
}

/// Decimal rendering of a float: `2.5`, `3`, `NaN`, `Infinity`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() && n.is_sign_positive() {
        "Infinity".to_string()
    } else if n.is_infinite() {
        "-Infinity".to_string()
    } else {
        n.to_string()
    }
}

impl PartialEq for Value {
    /// Numbers compare numerically across `Int`/`Float`; arrays and objects
    /// compare structurally; functions by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                self.as_number() == other.as_number()
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) | (Value::Undefined, Value::Undefined) => true,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => f.write_str(&format_number(*n)),
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Array(array) => write!(f, "{array}"),
            Value::Object(_) => f.write_str("[object Object]"),
            Value::Function(func) => write!(f, "function {}", func.name()),
            Value::Null => f.write_str("null"),
            Value::Undefined => f.write_str("undefined"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(n) => write!(f, "Float({n})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Array(array) => fmt::Debug::fmt(array, f),
            Value::Object(object) => fmt::Debug::fmt(object, f),
            Value::Function(func) => write!(f, "Function({})", func.name()),
            Value::Null => f.write_str("Null"),
            Value::Undefined => f.write_str("Undefined"),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;

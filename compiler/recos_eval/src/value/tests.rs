use pretty_assertions::assert_eq;

use super::*;
use crate::errors::EvalErrorKind;

#[test]
fn test_numbers_compare_across_representations() {
    assert_eq!(Value::Int(3), Value::Float(3.0));
    assert_eq!(Value::Float(2.5), Value::Float(2.5));
    assert_ne!(Value::Int(3), Value::Float(3.5));
    assert_ne!(Value::Int(1), Value::string("1"));
}

#[test]
fn test_nullish_equal_only_themselves() {
    assert_eq!(Value::Null, Value::Null);
    assert_eq!(Value::Undefined, Value::Undefined);
    assert_ne!(Value::Null, Value::Undefined);
}

#[test]
fn test_structural_equality() {
    let a = Value::array(vec![Value::Int(1), Value::string("x")]);
    let b = Value::array(vec![Value::Float(1.0), Value::string("x")]);
    assert_eq!(a, b);

    let o1 = Value::object([("k", Value::Int(1)), ("j", Value::Bool(true))]);
    let o2 = Value::object([("j", Value::Bool(true)), ("k", Value::Int(1))]);
    assert_eq!(o1, o2);
}

/// `[head, <itself>]`
fn self_referencing(head: i64) -> (Value, ArrayValue) {
    let array = ArrayValue::new(vec![Value::Int(head)]);
    array.push(&[Value::Array(array.clone())]);
    (Value::Array(array.clone()), array)
}

#[test]
fn test_cyclic_arrays_compare_structurally() {
    let (a, _) = self_referencing(1);
    let (b, _) = self_referencing(1);
    let (c, _) = self_referencing(2);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, Value::array(vec![Value::Int(1), Value::Int(1)]));
}

#[test]
fn test_cyclic_objects_compare_structurally() {
    let cyclic = || {
        let object = ObjectValue::new();
        object.insert("self", Value::Object(object.clone()));
        Value::Object(object)
    };
    assert_eq!(cyclic(), cyclic());
}

#[test]
fn test_cycles_format_as_circular() {
    let (a, array) = self_referencing(1);
    assert_eq!(a.to_string(), "1,[Circular]");
    assert_eq!(format!("{a:?}"), "[Int(1), [Circular]]");

    let object = ObjectValue::new();
    object.insert("items", Value::Array(array));
    object.insert("self", Value::Object(object.clone()));
    assert_eq!(
        format!("{:?}", Value::Object(object)),
        r#"{"items": [Int(1), [Circular]], "self": [Circular]}"#
    );
}

#[test]
fn test_shared_children_are_not_circular() {
    let inner = Value::array(vec![Value::Int(7)]);
    let outer = Value::array(vec![inner.clone(), inner]);
    assert_eq!(outer.to_string(), "7,7");
}

#[test]
fn test_functions_compare_by_identity() {
    let f = Value::native("f", |_| Ok(Value::Undefined));
    let g = Value::native("f", |_| Ok(Value::Undefined));
    assert_eq!(f, f.clone());
    assert_ne!(f, g);
}

#[test]
fn test_only_bool_true_satisfies_conditions() {
    assert!(Value::Bool(true).is_true());
    assert!(!Value::Bool(false).is_true());
    assert!(!Value::Int(1).is_true());
    assert!(!Value::string("yes").is_true());
}

#[test]
fn test_display() {
    assert_eq!(Value::Int(1).to_string(), "1");
    assert_eq!(Value::Float(2.5).to_string(), "2.5");
    assert_eq!(Value::Float(3.0).to_string(), "3");
    assert_eq!(Value::Float(f64::INFINITY).to_string(), "Infinity");
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(
        Value::array(vec![Value::Int(1), Value::Int(2)]).to_string(),
        "1,2"
    );
    assert_eq!(Value::object([("a", Value::Int(1))]).to_string(), "[object Object]");
}

#[test]
fn test_array_index_reads() {
    let arr = Value::array(vec![Value::Int(10), Value::Int(20)]);
    assert_eq!(arr.get_member("1").unwrap(), Value::Int(20));
    assert_eq!(arr.get_member("length").unwrap(), Value::Int(2));
}

#[test]
fn test_array_index_out_of_bounds() {
    let arr = Value::array(vec![Value::Int(10), Value::Int(20)]);
    let err = arr.get_member("5").unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::IndexOutOfBounds { index: 5, len: 2 });

    let err = arr.get_member("-1").unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::IndexOutOfBounds { index: -1, len: 2 });
}

#[test]
fn test_array_unknown_member_unsupported() {
    let arr = Value::array(vec![]);
    let err = arr.get_member("map").unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::UnsupportedOperation { .. }));
}

#[test]
fn test_array_push_appends_and_returns_length() {
    let arr = Value::array(vec![Value::Int(1)]);
    let Value::Function(FunctionValue::Native(push)) = arr.get_member("push").unwrap() else {
        panic!("push should be a native function");
    };
    assert_eq!(push.call(&[Value::Int(2), Value::Int(3)]).unwrap(), Value::Int(3));
    assert_eq!(arr.get_member("2").unwrap(), Value::Int(3));
}

#[test]
fn test_array_setter_replaces_in_bounds() {
    let arr = Value::array(vec![Value::Int(1), Value::Int(2)]);
    arr.member_setter("0").unwrap().set(Value::string("a")).unwrap();
    assert_eq!(arr.get_member("0").unwrap(), Value::string("a"));

    let err = arr.member_setter("2").unwrap().set(Value::Null).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::IndexOutOfBounds { index: 2, len: 2 });
}

#[test]
fn test_object_get_missing_is_undefined() {
    let obj = Value::object([("a", Value::Int(1))]);
    assert_eq!(obj.get_member("a").unwrap(), Value::Int(1));
    assert_eq!(obj.get_member("b").unwrap(), Value::Undefined);
}

#[test]
fn test_object_setter_upserts() {
    let obj = Value::object([("a", Value::Int(1))]);
    obj.member_setter("a").unwrap().set(Value::Int(2)).unwrap();
    obj.member_setter("b").unwrap().set(Value::Int(3)).unwrap();
    assert_eq!(obj, Value::object([("a", Value::Int(2)), ("b", Value::Int(3))]));
}

#[test]
fn test_aliases_share_storage() {
    let arr = Value::array(vec![]);
    let alias = arr.clone();
    if let Value::Array(a) = &alias {
        a.push(&[Value::Bool(true)]);
    }
    assert_eq!(arr.get_member("length").unwrap(), Value::Int(1));
}

#[test]
fn test_member_access_on_scalar_is_type_mismatch() {
    let err = Value::Int(1).get_member("x").unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::TypeMismatch {
            expected: "array or object".into(),
            got: "number".into()
        }
    );
}

#[test]
fn test_from_json() {
    let json: serde_json::Value =
        serde_json::from_str(r#"{"n": 1, "f": 1.5, "s": "x", "l": [true, null]}"#).unwrap();
    let value = Value::from(&json);
    assert_eq!(
        value,
        Value::object([
            ("n", Value::Int(1)),
            ("f", Value::Float(1.5)),
            ("s", Value::string("x")),
            ("l", Value::array(vec![Value::Bool(true), Value::Null])),
        ])
    );
}

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::errors::EvalErrorKind;

fn eval(left: Value, op: BinaryOp, right: Value) -> Value {
    evaluate_binary(left, right, op).unwrap()
}

fn eval_err(left: Value, op: BinaryOp, right: Value) -> EvalErrorKind {
    evaluate_binary(left, right, op).unwrap_err().kind
}

mod addition {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ints_stay_ints() {
        assert!(matches!(eval(Value::Int(1), BinaryOp::Add, Value::Int(2)), Value::Int(3)));
    }

    #[test]
    fn mixed_is_float() {
        assert!(matches!(
            eval(Value::Int(1), BinaryOp::Add, Value::Float(1.5)),
            Value::Float(n) if (n - 2.5).abs() < f64::EPSILON
        ));
    }

    #[test]
    fn overflow_falls_back_to_float() {
        assert!(matches!(
            eval(Value::Int(i64::MAX), BinaryOp::Add, Value::Int(1)),
            Value::Float(_)
        ));
    }

    #[test]
    fn string_concatenation() {
        assert_eq!(
            eval(Value::string("a"), BinaryOp::Add, Value::Int(1)),
            Value::string("a1")
        );
        assert_eq!(
            eval(Value::Float(2.5), BinaryOp::Add, Value::string("px")),
            Value::string("2.5px")
        );
        assert_eq!(
            eval(Value::string("a"), BinaryOp::Add, Value::string("b")),
            Value::string("ab")
        );
    }

    #[test]
    fn collections_do_not_concatenate() {
        assert!(matches!(
            eval_err(Value::string("a"), BinaryOp::Add, Value::array(vec![])),
            EvalErrorKind::UnsupportedOperation { .. }
        ));
    }

    #[test]
    fn bools_do_not_add() {
        assert_eq!(
            eval_err(Value::Bool(true), BinaryOp::Add, Value::Int(1)),
            EvalErrorKind::UnsupportedOperation {
                operation: "`boolean + number`".into()
            }
        );
    }
}

mod arithmetic {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sub_mul_div_are_float() {
        assert!(matches!(eval(Value::Int(5), BinaryOp::Sub, Value::Int(2)), Value::Float(n) if n == 3.0));
        assert!(matches!(eval(Value::Int(5), BinaryOp::Mul, Value::Int(2)), Value::Float(n) if n == 10.0));
        assert!(matches!(eval(Value::Int(5), BinaryOp::Div, Value::Int(2)), Value::Float(n) if n == 2.5));
    }

    #[test]
    fn divide_by_zero_is_infinite() {
        assert!(matches!(
            eval(Value::Int(1), BinaryOp::Div, Value::Int(0)),
            Value::Float(n) if n.is_infinite()
        ));
    }

    #[test]
    fn modulo_truncates_operands() {
        assert!(matches!(eval(Value::Int(7), BinaryOp::Mod, Value::Int(3)), Value::Int(1)));
        assert!(matches!(eval(Value::Float(7.9), BinaryOp::Mod, Value::Float(3.2)), Value::Int(1)));
        assert!(matches!(eval(Value::Int(-7), BinaryOp::Mod, Value::Int(3)), Value::Int(-1)));
    }

    #[test]
    fn modulo_by_zero() {
        assert_eq!(
            eval_err(Value::Int(7), BinaryOp::Mod, Value::Float(0.5)),
            EvalErrorKind::ModuloByZero
        );
    }

    #[test]
    fn strings_do_not_subtract() {
        assert!(matches!(
            eval_err(Value::string("3"), BinaryOp::Sub, Value::Int(1)),
            EvalErrorKind::UnsupportedOperation { .. }
        ));
    }
}

mod comparison {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn relational_across_representations() {
        assert_eq!(eval(Value::Int(1), BinaryOp::Lt, Value::Float(1.5)), Value::Bool(true));
        assert_eq!(eval(Value::Float(2.0), BinaryOp::LtEq, Value::Int(2)), Value::Bool(true));
        assert_eq!(eval(Value::Int(3), BinaryOp::Gt, Value::Int(3)), Value::Bool(false));
        assert_eq!(eval(Value::Int(3), BinaryOp::GtEq, Value::Int(3)), Value::Bool(true));
    }

    #[test]
    fn relational_requires_numbers() {
        assert!(matches!(
            eval_err(Value::string("a"), BinaryOp::Lt, Value::string("b")),
            EvalErrorKind::UnsupportedOperation { .. }
        ));
    }

    #[test]
    fn equality_is_numeric_and_symmetric() {
        assert_eq!(eval(Value::Int(2), BinaryOp::Eq, Value::Float(2.0)), Value::Bool(true));
        assert_eq!(eval(Value::Float(2.0), BinaryOp::Eq, Value::Int(2)), Value::Bool(true));
        assert_eq!(eval(Value::Int(2), BinaryOp::Eq, Value::Float(2.5)), Value::Bool(false));
        assert_eq!(eval(Value::Float(2.5), BinaryOp::Eq, Value::Int(2)), Value::Bool(false));
        assert_eq!(eval(Value::Int(2), BinaryOp::NotEq, Value::Float(2.5)), Value::Bool(true));
    }

    #[test]
    fn equality_of_strings_and_bools() {
        assert_eq!(eval(Value::string("a"), BinaryOp::Eq, Value::string("a")), Value::Bool(true));
        assert_eq!(eval(Value::Bool(true), BinaryOp::NotEq, Value::Bool(false)), Value::Bool(true));
    }

    #[test]
    fn nullish_equality() {
        assert_eq!(eval(Value::Null, BinaryOp::Eq, Value::Undefined), Value::Bool(true));
        assert_eq!(eval(Value::Null, BinaryOp::Eq, Value::Int(0)), Value::Bool(false));
        assert_eq!(eval(Value::string("x"), BinaryOp::NotEq, Value::Null), Value::Bool(true));
    }

    #[test]
    fn collections_compare_by_reference() {
        let arr = Value::array(vec![Value::Int(1)]);
        let same = arr.clone();
        let lookalike = Value::array(vec![Value::Int(1)]);
        assert_eq!(eval(arr.clone(), BinaryOp::Eq, same), Value::Bool(true));
        assert_eq!(eval(arr, BinaryOp::Eq, lookalike), Value::Bool(false));
    }

    #[test]
    fn mixed_scalars_are_not_comparable() {
        assert!(matches!(
            eval_err(Value::string("1"), BinaryOp::Eq, Value::Int(1)),
            EvalErrorKind::UnsupportedOperation { .. }
        ));
    }
}

mod logical {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn and_or_on_bools() {
        assert_eq!(eval(Value::Bool(true), BinaryOp::And, Value::Bool(false)), Value::Bool(false));
        assert_eq!(eval(Value::Bool(true), BinaryOp::Or, Value::Bool(false)), Value::Bool(true));
    }

    #[test]
    fn no_truthiness_coercion() {
        assert!(matches!(
            eval_err(Value::Int(1), BinaryOp::And, Value::Bool(true)),
            EvalErrorKind::UnsupportedOperation { .. }
        ));
    }

    #[test]
    fn bitwise_unsupported() {
        assert_eq!(
            eval_err(Value::Int(1), BinaryOp::BitAnd, Value::Int(1)),
            EvalErrorKind::UnsupportedOperation {
                operation: "`number & number`".into()
            }
        );
    }
}

proptest! {
    #[test]
    fn string_plus_int_concatenates(s in "[a-z]{0,8}", n in any::<i64>()) {
        let result = evaluate_binary(Value::string(&s), Value::Int(n), BinaryOp::Add).unwrap();
        prop_assert_eq!(result, Value::string(format!("{s}{n}")));
    }

    #[test]
    fn int_addition_matches_checked_add(a in -1_000_000_i64..1_000_000, b in -1_000_000_i64..1_000_000) {
        let result = evaluate_binary(Value::Int(a), Value::Int(b), BinaryOp::Add).unwrap();
        prop_assert_eq!(result, Value::Int(a + b));
    }

    #[test]
    fn equality_is_symmetric(a in -1000_i64..1000, b in -1000.0_f64..1000.0) {
        let forward = evaluate_binary(Value::Int(a), Value::Float(b), BinaryOp::Eq).unwrap();
        let backward = evaluate_binary(Value::Float(b), Value::Int(a), BinaryOp::Eq).unwrap();
        prop_assert_eq!(forward, backward);
    }
}

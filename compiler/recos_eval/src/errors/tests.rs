use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_messages() {
    assert_eq!(
        type_mismatch("number", "string").to_string(),
        "type mismatch: expected number, got string"
    );
    assert_eq!(
        index_out_of_bounds(5, 2).to_string(),
        "index 5 out of bounds for length 2"
    );
    assert_eq!(
        invalid_binary_op("-", "string", "bool").to_string(),
        "unsupported operation: `string - bool`"
    );
    assert_eq!(
        hook_outside_render("useState").to_string(),
        "unsupported operation: `useState` called outside of a stateful render"
    );
    assert_eq!(stack_overflow(64).to_string(), "maximum call depth exceeded (limit: 64)");
}

#[test]
fn test_kind_is_structured() {
    let err = destructure_arity_mismatch(2, 1);
    assert_eq!(
        err.kind,
        EvalErrorKind::DestructureArityMismatch {
            expected: 2,
            got: 1
        }
    );
    assert!(err.backtrace.is_none());
}

#[test]
fn test_first_backtrace_wins() {
    let inner = EvalBacktrace::new(vec!["Item".into(), "List".into()]);
    let outer = EvalBacktrace::new(vec!["List".into()]);
    let err = modulo_by_zero()
        .with_backtrace(inner.clone())
        .with_backtrace(outer);
    assert_eq!(err.backtrace, Some(inner));
}

#[test]
fn test_empty_backtrace_not_attached() {
    let err = modulo_by_zero().with_backtrace(EvalBacktrace::default());
    assert!(err.backtrace.is_none());
}

#[test]
fn test_backtrace_display() {
    let trace = EvalBacktrace::new(vec!["Row".into(), "App".into()]);
    assert_eq!(trace.to_string(), "stack backtrace:\n  0: Row\n  1: App\n");
    assert_eq!(trace.len(), 2);
}

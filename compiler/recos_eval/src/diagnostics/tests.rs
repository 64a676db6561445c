use pretty_assertions::assert_eq;

use super::*;
use crate::environment::{Scope, ScopeRef};
use crate::errors::{type_mismatch, EvalErrorKind};

fn frame(name: &str) -> StackFrame {
    StackFrame {
        name: name.to_string(),
        scope: ScopeRef::new(Scope::new()),
    }
}

#[test]
fn empty_stack() {
    let stack = CallStack::new(Some(100));
    assert!(stack.is_empty());
    assert_eq!(stack.depth(), 0);
    assert!(stack.top().is_none());
}

#[test]
fn push_and_pop() {
    let mut stack = CallStack::new(None);
    stack.push(frame("App")).expect("push should succeed");
    stack.push(frame("Row")).expect("push should succeed");
    assert_eq!(stack.depth(), 2);
    assert_eq!(stack.top().map(|f| f.name.as_str()), Some("Row"));

    let popped = stack.pop().expect("frame present");
    assert_eq!(popped.name, "Row");
    assert_eq!(stack.depth(), 1);
}

#[test]
fn depth_limit_enforced() {
    let mut stack = CallStack::new(Some(2));
    stack.push(frame("a")).expect("within limit");
    stack.push(frame("b")).expect("within limit");

    let err = stack.push(frame("c")).expect_err("push should fail at max depth");
    assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 2 });
    assert_eq!(stack.depth(), 2);
}

#[test]
fn unlimited_depth() {
    let mut stack = CallStack::default();
    for _ in 0..1_000 {
        stack.push(frame("recurse")).expect("unbounded");
    }
    assert_eq!(stack.depth(), 1_000);
}

#[test]
fn capture_is_innermost_first() {
    let mut stack = CallStack::new(None);
    stack.push(frame("App")).expect("push");
    stack.push(frame("List")).expect("push");
    stack.push(frame("Item")).expect("push");

    let trace = stack.capture();
    assert_eq!(trace.frames(), ["Item", "List", "App"]);
}

#[test]
fn attach_keeps_existing_backtrace() {
    let mut stack = CallStack::new(None);
    stack.push(frame("Outer")).expect("push");

    let inner = EvalBacktrace::new(vec!["Inner".into(), "Outer".into()]);
    let err = type_mismatch("number", "string").with_backtrace(inner.clone());
    let err = stack.attach_backtrace(err);
    assert_eq!(err.backtrace, Some(inner));
}

#[test]
fn attach_on_empty_stack_is_noop() {
    let stack = CallStack::new(None);
    let err = stack.attach_backtrace(type_mismatch("number", "string"));
    assert!(err.backtrace.is_none());
}

#[test]
fn counters_report() {
    let mut counters = EvalCounters::default();
    counters.count_expression();
    counters.count_expression();
    counters.count_function_call();
    counters.count_element();
    counters.count_hook();

    assert_eq!(counters.expressions_evaluated, 2);
    let report = counters.report();
    assert!(report.contains("expressions evaluated: 2"));
    assert!(report.contains("hook visits:           1"));
}

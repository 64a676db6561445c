//! End-to-end tests over JSON bundles.
//!
//! Each bundle in `tests/bundles/` is loaded, rendered through the module
//! resolver, and driven the way a host drives it: dispatch an event, check
//! for a re-render request, render again.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use recos_eval::{
    Bundle, ElementKind, HookStore, HookStoreHandle, Interpreter, NamedArgs, RenderNode, Value,
};

const COUNTER: &str = include_str!("bundles/counter.json");
const LIST: &str = include_str!("bundles/list.json");

fn interpreter_for(source: &str) -> Interpreter {
    let bundle = Bundle::from_json(source).expect("bundle should parse");
    Interpreter::builder().resolver(bundle).build()
}

fn args(pairs: &[(&str, serde_json::Value)]) -> NamedArgs {
    pairs
        .iter()
        .map(|(name, json)| ((*name).to_string(), Value::from(json)))
        .collect()
}

fn render(interpreter: &mut Interpreter, name: &str, args: &NamedArgs, store: &HookStoreHandle) -> RenderNode {
    interpreter
        .render_component(name, args, store)
        .unwrap()
        .expect("component should render a node")
}

#[test]
fn counter_renders_initial_tree() {
    let mut interpreter = interpreter_for(COUNTER);
    let store = HookStoreHandle::default();
    let tree = render(
        &mut interpreter,
        "Counter",
        &args(&[("label", serde_json::json!("clicks"))]),
        &store,
    );

    assert_eq!(
        tree.to_string(),
        "<View>\n  \
         <Text style={fontSize: 14} onClick>\n    \
         \"clicks: 0\"\n  \
         </Text>\n  \
         <Image source=\"logo.png\" placeholder=\"placeholder\" />\n\
         </View>\n"
    );
}

#[test]
fn counter_click_requests_rerender_with_new_state() {
    let mut interpreter = interpreter_for(COUNTER);
    let store = HookStoreHandle::default();
    let label = args(&[("label", serde_json::json!("clicks"))]);

    render(&mut interpreter, "Counter", &label, &store);
    assert!(!store.borrow_mut().take_rerender_request());

    for _ in 0..2 {
        let tree = render(&mut interpreter, "Counter", &label, &store);
        let handler = tree.handlers("onClick")[0].clone();
        interpreter.dispatch_event(&handler, vec![]).unwrap();
        assert!(store.borrow_mut().take_rerender_request());
    }

    let tree = render(&mut interpreter, "Counter", &label, &store);
    let text = tree.child_nodes().next().unwrap();
    assert_eq!(text.kind, ElementKind::Text);
    assert_eq!(text.text(), "clicks: 2");
    assert_eq!(store.borrow().state(), [Value::Int(2)]);
}

#[test]
fn rerender_listener_sees_committed_state() {
    let mut interpreter = interpreter_for(COUNTER);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut store = HookStore::new();
    store.on_rerender(move |state| sink.borrow_mut().push(state.to_vec()));
    let store = HookStoreHandle::new(store);

    let tree = render(&mut interpreter, "Counter", &NamedArgs::new(), &store);
    let handler = tree.handlers("onClick")[0].clone();
    interpreter.dispatch_event(&handler, vec![]).unwrap();

    assert_eq!(*seen.borrow(), [vec![Value::Int(1)]]);
}

#[test]
fn list_renders_one_row_per_item() {
    let mut interpreter = interpreter_for(LIST);
    let store = HookStoreHandle::default();
    let tree = render(
        &mut interpreter,
        "Feed",
        &args(&[("items", serde_json::json!(["a", "b", "c"]))]),
        &store,
    );

    assert_eq!(tree.kind, ElementKind::RecyclerView);
    let rows: Vec<String> = tree.child_nodes().map(RenderNode::text).collect();
    assert_eq!(rows, ["row 0", "row 1", "row 2"]);
}

#[test]
fn list_without_items_is_empty() {
    let mut interpreter = interpreter_for(LIST);
    let store = HookStoreHandle::default();
    let tree = render(
        &mut interpreter,
        "Feed",
        &args(&[("items", serde_json::json!([]))]),
        &store,
    );
    assert!(tree.children.is_empty());
}

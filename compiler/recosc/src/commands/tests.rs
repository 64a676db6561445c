use pretty_assertions::assert_eq;
use recos_eval::{EvalErrorKind, Value};

use super::*;

const HELLO: &str = r#"{
  "components": {
    "HelloWorld": {
      "params": ["name"],
      "body": {
        "type": "Block",
        "body": [
          {
            "type": "Return",
            "argument": {
              "type": "JsxElement",
              "name": "Text",
              "attributes": [],
              "children": [
                { "type": "JsxText", "text": "hello " },
                { "type": "Identifier", "name": "name" }
              ]
            }
          }
        ]
      }
    },
    "Empty": {
      "params": [],
      "body": { "type": "Block", "body": [] }
    }
  }
}"#;

const COUNTER: &str = include_str!("../../../recos_eval/tests/bundles/counter.json");

fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|arg| (*arg).to_string()).collect()
}

fn options(args: &[&str]) -> RenderOptions {
    parse_render_options(&strings(args)).unwrap()
}

#[test]
fn test_default_options() {
    let options = options(&[]);
    assert_eq!(options.component, "HelloWorld");
    assert!(options.args.is_empty());
    assert!(options.clicks.is_empty());
    assert!(!options.strict);
    assert!(!options.profile);
    assert_eq!(options.max_depth, recos_eval::EvalConfig::default_max_call_depth());
}

#[test]
fn test_parse_flags() {
    let options = options(&[
        "--component=Counter",
        "--arg=label=clicks",
        "--arg=count=3",
        "--click=0",
        "--click=2",
        "--strict",
        "--lexical-blocks",
        "--max-depth=64",
        "--profile",
    ]);
    assert_eq!(options.component, "Counter");
    assert_eq!(options.args["label"], Value::string("clicks"));
    assert_eq!(options.args["count"], Value::Int(3));
    assert_eq!(options.clicks, [0, 2]);
    assert!(options.strict);
    assert!(options.lexical_blocks);
    assert_eq!(options.max_depth, Some(64));
    assert!(options.profile);
}

#[test]
fn test_unlimited_depth() {
    assert_eq!(options(&["--max-depth=none"]).max_depth, None);
}

#[test]
fn test_bad_flags_rejected() {
    assert!(parse_render_options(&strings(&["--frobnicate"])).is_err());
    assert!(parse_render_options(&strings(&["--arg=label"])).is_err());
    assert!(parse_render_options(&strings(&["--click=first"])).is_err());
    assert!(parse_render_options(&strings(&["--max-depth=-1"])).is_err());
}

#[test]
fn test_render_default_component() {
    let output = render_bundle(HELLO, &options(&["--arg=name=world"])).unwrap();
    let tree = output.tree.unwrap();
    assert_eq!(tree.text(), "hello world");
    assert_eq!(output.renders, 1);
    assert!(output.state.is_empty());
    assert!(output.profile.is_none());
}

#[test]
fn test_render_nothing() {
    let output = render_bundle(HELLO, &options(&["--component=Empty"])).unwrap();
    assert!(output.tree.is_none());
}

#[test]
fn test_missing_component() {
    match render_bundle(HELLO, &options(&["--component=Nope"])).unwrap_err() {
        CommandError::Eval(err) => assert_eq!(
            err.kind,
            EvalErrorKind::UnresolvedIdentifier {
                name: "Nope".into()
            }
        ),
        other => panic!("expected an evaluation error, got {other:?}"),
    }
}

#[test]
fn test_malformed_bundle() {
    let err = render_bundle("{ not json", &RenderOptions::default()).unwrap_err();
    assert!(matches!(err, CommandError::Bundle(_)));
}

#[test]
fn test_clicks_rerender() {
    let output = render_bundle(
        COUNTER,
        &options(&[
            "--component=Counter",
            "--arg=label=clicks",
            "--click=0",
            "--click=0",
            "--click=0",
        ]),
    )
    .unwrap();
    assert_eq!(output.renders, 4);
    assert_eq!(output.state, [Value::Int(3)]);
    let text = output.tree.unwrap();
    let text = text.child_nodes().next().unwrap();
    assert_eq!(text.text(), "clicks: 3");
}

#[test]
fn test_click_out_of_range() {
    let err = render_bundle(COUNTER, &options(&["--component=Counter", "--click=1"])).unwrap_err();
    assert!(matches!(
        err,
        CommandError::NoSuchHandler {
            index: 1,
            available: 1
        }
    ));
}

#[test]
fn test_click_without_tree() {
    let err = render_bundle(HELLO, &options(&["--component=Empty", "--click=0"])).unwrap_err();
    assert!(matches!(err, CommandError::NothingRendered { .. }));
}

#[test]
fn test_profile_report() {
    let output = render_bundle(HELLO, &options(&["--profile"])).unwrap();
    let report = output.profile.unwrap();
    assert!(report.starts_with("Evaluation profile:"));
    assert!(report.contains("elements rendered:     1"));
}

#[test]
fn test_list_components() {
    assert_eq!(list_components(HELLO).unwrap(), ["HelloWorld", "Empty"]);
}

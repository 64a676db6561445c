use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_binary_op_symbols() {
    assert_eq!(BinaryOp::Add.as_symbol(), "+");
    assert_eq!(BinaryOp::NotEq.as_symbol(), "!=");
    assert_eq!(BinaryOp::Or.as_symbol(), "||");
    assert_eq!(BinaryOp::BitXor.as_symbol(), "^");
}

#[test]
fn test_relational_ops() {
    assert!(BinaryOp::Lt.is_relational());
    assert!(BinaryOp::GtEq.is_relational());
    assert!(!BinaryOp::Eq.is_relational());
    assert!(!BinaryOp::Add.is_relational());
}

#[test]
fn test_statement_classification() {
    assert!(Node::block(vec![]).is_statement());
    assert!(Node::ret(None).is_statement());
    assert!(Node::let_("x", Node::int(1)).is_statement());
    assert!(!Node::int(1).is_statement());
    assert!(!Node::jsx("Text", vec![], vec![]).is_statement());
}

#[test]
fn test_member_constructors() {
    let dotted = Node::member(Node::ident("styles"), "title");
    let Node::Member { computed, property, .. } = dotted else {
        panic!("expected a member node");
    };
    assert!(!computed);
    assert_eq!(*property, Node::ident("title"));

    let indexed = Node::index(Node::ident("items"), Node::int(0));
    assert!(matches!(indexed, Node::Member { computed: true, .. }));
}

#[test]
fn test_function_decl_display_name() {
    let named = FunctionDecl::new(Some("Counter"), &[], Node::block(vec![]));
    let anonymous = FunctionDecl::new(None, &["i"], Node::int(0));
    assert_eq!(named.display_name(), "Counter");
    assert_eq!(anonymous.display_name(), "<anonymous>");
    assert_eq!(anonymous.params, vec!["i".to_string()]);
}

#[test]
fn test_number_literal_display() {
    assert_eq!(NumberLiteral::Int(42).to_string(), "42");
    assert_eq!(NumberLiteral::Float(2.5).to_string(), "2.5");
}

//! Shorthand constructors.
//!
//! Hosts embedding the evaluator without a parser (and the test suites)
//! build trees with these instead of spelling out every box.

use std::rc::Rc;

use super::{
    AssignOp, BinaryOp, Declarator, FunctionDecl, JsxAttribute, JsxElement, Node, NumberLiteral,
    ObjectProperty, UnaryOp, UpdateOp,
};

impl Node {
    pub fn int(value: i64) -> Self {
        Node::Number {
            value: NumberLiteral::Int(value),
        }
    }

    pub fn float(value: f64) -> Self {
        Node::Number {
            value: NumberLiteral::Float(value),
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Node::String {
            value: value.into(),
        }
    }

    pub fn bool(value: bool) -> Self {
        Node::Bool { value }
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Node::Identifier { name: name.into() }
    }

    pub fn array(elements: Vec<Node>) -> Self {
        Node::Array { elements }
    }

    /// Object literal with identifier keys.
    pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, Node)>) -> Self {
        Node::Object {
            properties: entries
                .into_iter()
                .map(|(key, value)| ObjectProperty {
                    key: Node::ident(key),
                    value,
                    computed: false,
                })
                .collect(),
        }
    }

    pub fn binary(op: BinaryOp, left: Node, right: Node) -> Self {
        Node::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOp, argument: Node) -> Self {
        Node::Unary {
            op,
            argument: Box::new(argument),
        }
    }

    pub fn call(callee: Node, arguments: Vec<Node>) -> Self {
        Node::Call {
            callee: Box::new(callee),
            arguments,
        }
    }

    /// `object.name`
    pub fn member(object: Node, name: impl Into<String>) -> Self {
        Node::Member {
            object: Box::new(object),
            property: Box::new(Node::ident(name)),
            computed: false,
        }
    }

    /// `object[key]`
    pub fn index(object: Node, key: Node) -> Self {
        Node::Member {
            object: Box::new(object),
            property: Box::new(key),
            computed: true,
        }
    }

    pub fn update(op: UpdateOp, prefix: bool, argument: Node) -> Self {
        Node::Update {
            op,
            prefix,
            argument: Box::new(argument),
        }
    }

    /// `left = right`
    pub fn assign(left: Node, right: Node) -> Self {
        Node::Assign {
            op: AssignOp::Assign,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn sequence(expressions: Vec<Node>) -> Self {
        Node::Sequence { expressions }
    }

    pub fn arrow(params: &[&str], body: Node) -> Self {
        Node::ArrowFunction(Rc::new(FunctionDecl::new(None, params, body)))
    }

    pub fn function(params: &[&str], body: Vec<Node>) -> Self {
        Node::Function(Rc::new(FunctionDecl::new(None, params, Node::block(body))))
    }

    pub fn jsx(name: impl Into<String>, attributes: Vec<JsxAttribute>, children: Vec<Node>) -> Self {
        Node::JsxElement(JsxElement {
            name: name.into(),
            attributes,
            children,
        })
    }

    pub fn jsx_text(text: impl Into<String>) -> Self {
        Node::JsxText { text: text.into() }
    }

    /// `let name = init;`
    pub fn let_(name: impl Into<String>, init: Node) -> Self {
        Node::VarDeclList {
            declarations: vec![Declarator::Var {
                name: name.into(),
                init: Some(init),
            }],
        }
    }

    /// `let [a, b] = init;`
    pub fn let_array(names: &[&str], init: Node) -> Self {
        Node::VarDeclList {
            declarations: vec![Declarator::ArrayPattern {
                names: names.iter().map(ToString::to_string).collect(),
                init,
            }],
        }
    }

    pub fn function_decl(name: &str, params: &[&str], body: Vec<Node>) -> Self {
        Node::FunctionDecl(Rc::new(FunctionDecl::new(
            Some(name),
            params,
            Node::block(body),
        )))
    }

    pub fn block(body: Vec<Node>) -> Self {
        Node::Block { body }
    }

    pub fn for_loop(init: Option<Node>, test: Option<Node>, update: Option<Node>, body: Node) -> Self {
        Node::For {
            init: init.map(Box::new),
            test: test.map(Box::new),
            update: update.map(Box::new),
            body: Box::new(body),
        }
    }

    pub fn if_(test: Node, consequent: Node, alternate: Option<Node>) -> Self {
        Node::If {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: alternate.map(Box::new),
        }
    }

    pub fn ret(argument: Option<Node>) -> Self {
        Node::Return {
            argument: argument.map(Box::new),
        }
    }

    pub fn expr_stmt(expression: Node) -> Self {
        Node::ExprStatement {
            expression: Box::new(expression),
        }
    }
}

impl FunctionDecl {
    pub fn new(name: Option<&str>, params: &[&str], body: Node) -> Self {
        FunctionDecl {
            name: name.map(ToString::to_string),
            params: params.iter().map(ToString::to_string).collect(),
            body: Box::new(body),
        }
    }
}

impl JsxAttribute {
    pub fn new(name: impl Into<String>, value: Node) -> Self {
        JsxAttribute {
            name: name.into(),
            value: Some(value),
        }
    }

    /// A valueless attribute.
    pub fn flag(name: impl Into<String>) -> Self {
        JsxAttribute {
            name: name.into(),
            value: None,
        }
    }
}

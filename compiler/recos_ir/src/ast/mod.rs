//! Syntax tree for the JavaScript/JSX subset Recos evaluates.
//!
//! # Module Structure
//!
//! - `operators`: binary, unary, update and assignment operators
//! - `construct`: shorthand constructors used by hosts and tests
//!
//! # Serialized form
//!
//! With the `serde` feature a [`Node`] is a JSON object tagged by `"type"`:
//!
//! ```text
//! { "type": "Binary", "op": "+", "left": { "type": "Identifier", "name": "a" },
//!   "right": { "type": "Number", "value": 1 } }
//! ```

mod construct;
mod operators;

#[cfg(test)]
mod tests;

use std::fmt;
use std::rc::Rc;

pub use operators::{AssignOp, BinaryOp, UnaryOp, UpdateOp};

/// A numeric literal as the parser saw it.
///
/// Integral literals stay integers so `1 + 1` is `Int(2)` rather than `2.0`.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum NumberLiteral {
    Int(i64),
    Float(f64),
}

/// A syntax tree node: expressions and statements share one enum.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum Node {
    // Literals
    Number {
        value: NumberLiteral,
    },
    String {
        value: String,
    },
    Bool {
        value: bool,
    },
    Null,

    // Expressions
    Identifier {
        name: String,
    },
    Array {
        #[cfg_attr(feature = "serde", serde(default))]
        elements: Vec<Node>,
    },
    Object {
        #[cfg_attr(feature = "serde", serde(default))]
        properties: Vec<ObjectProperty>,
    },
    /// `function (a, b) { ... }` used as a value.
    Function(Rc<FunctionDecl>),
    /// `(a, b) => ...`; the body may be a bare expression.
    ArrowFunction(Rc<FunctionDecl>),
    Binary {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Unary {
        op: UnaryOp,
        argument: Box<Node>,
    },
    Call {
        callee: Box<Node>,
        #[cfg_attr(feature = "serde", serde(default))]
        arguments: Vec<Node>,
    },
    /// `object.property` or, when `computed`, `object[property]`.
    Member {
        object: Box<Node>,
        property: Box<Node>,
        #[cfg_attr(feature = "serde", serde(default))]
        computed: bool,
    },
    Update {
        op: UpdateOp,
        prefix: bool,
        argument: Box<Node>,
    },
    Assign {
        #[cfg_attr(feature = "serde", serde(default))]
        op: AssignOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Sequence {
        expressions: Vec<Node>,
    },
    JsxElement(JsxElement),
    JsxText {
        text: String,
    },

    // Statements
    VarDeclList {
        declarations: Vec<Declarator>,
    },
    /// `function name(a, b) { ... }` at statement position.
    FunctionDecl(Rc<FunctionDecl>),
    Block {
        #[cfg_attr(feature = "serde", serde(default))]
        body: Vec<Node>,
    },
    For {
        #[cfg_attr(feature = "serde", serde(default))]
        init: Option<Box<Node>>,
        #[cfg_attr(feature = "serde", serde(default))]
        test: Option<Box<Node>>,
        #[cfg_attr(feature = "serde", serde(default))]
        update: Option<Box<Node>>,
        body: Box<Node>,
    },
    If {
        test: Box<Node>,
        consequent: Box<Node>,
        #[cfg_attr(feature = "serde", serde(default))]
        alternate: Option<Box<Node>>,
    },
    Return {
        #[cfg_attr(feature = "serde", serde(default))]
        argument: Option<Box<Node>>,
    },
    ExprStatement {
        expression: Box<Node>,
    },
}

impl Node {
    /// Short name of the node kind, for diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Node::Number { .. } => "number literal",
            Node::String { .. } => "string literal",
            Node::Bool { .. } => "boolean literal",
            Node::Null => "null literal",
            Node::Identifier { .. } => "identifier",
            Node::Array { .. } => "array literal",
            Node::Object { .. } => "object literal",
            Node::Function(_) => "function expression",
            Node::ArrowFunction(_) => "arrow function",
            Node::Binary { .. } => "binary expression",
            Node::Unary { .. } => "unary expression",
            Node::Call { .. } => "call expression",
            Node::Member { .. } => "member expression",
            Node::Update { .. } => "update expression",
            Node::Assign { .. } => "assignment",
            Node::Sequence { .. } => "sequence expression",
            Node::JsxElement(_) => "JSX element",
            Node::JsxText { .. } => "JSX text",
            Node::VarDeclList { .. } => "variable declaration",
            Node::FunctionDecl(_) => "function declaration",
            Node::Block { .. } => "block",
            Node::For { .. } => "for loop",
            Node::If { .. } => "if statement",
            Node::Return { .. } => "return statement",
            Node::ExprStatement { .. } => "expression statement",
        }
    }

    /// Whether this node is a statement rather than an expression.
    pub const fn is_statement(&self) -> bool {
        matches!(
            self,
            Node::VarDeclList { .. }
                | Node::FunctionDecl(_)
                | Node::Block { .. }
                | Node::For { .. }
                | Node::If { .. }
                | Node::Return { .. }
                | Node::ExprStatement { .. }
        )
    }
}

/// One `key: value` entry of an object literal.
///
/// A non-computed key is an identifier or a string/number literal naming the
/// key directly; a computed key (`[expr]: value`) is evaluated.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectProperty {
    pub key: Node,
    pub value: Node,
    #[cfg_attr(feature = "serde", serde(default))]
    pub computed: bool,
}

/// A function body with its parameter names.
///
/// Shared by function expressions, arrow functions, function declarations,
/// and components resolved from a bundle.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionDecl {
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub params: Vec<String>,
    /// A `Block`, or for arrow functions any expression (an implicit return).
    pub body: Box<Node>,
}

impl FunctionDecl {
    /// Name for backtraces and logs.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<anonymous>")
    }
}

/// One declarator of a `let`/`const`/`var` list.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind"))]
pub enum Declarator {
    /// `name` or `name = init`.
    Var {
        name: String,
        #[cfg_attr(feature = "serde", serde(default))]
        init: Option<Node>,
    },
    /// `[a, b] = init`.
    ArrayPattern { names: Vec<String>, init: Node },
}

/// `<Name attr={...}>children</Name>`.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JsxElement {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: Vec<JsxAttribute>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<Node>,
}

/// A JSX attribute. `value` is `None` for a bare flag like `<Text bold>`.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JsxAttribute {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: Option<Node>,
}

impl fmt::Display for NumberLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberLiteral::Int(n) => write!(f, "{n}"),
            NumberLiteral::Float(n) => write!(f, "{n}"),
        }
    }
}

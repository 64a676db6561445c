//! Recos IR - syntax tree types for the Recos evaluator.
//!
//! The tree is produced by an external JavaScript/JSX parser and handed to
//! the evaluator pre-parsed, either built in memory or deserialized from a
//! bundle (with the `serde` feature). Nothing here evaluates anything.
//!
//! Nodes are owned boxes rather than arena indices: function bodies are
//! shared behind `Rc<FunctionDecl>` so closures created at run time can keep
//! their body alive without copying the tree.

pub mod ast;

pub use ast::{
    AssignOp, BinaryOp, Declarator, FunctionDecl, JsxAttribute, JsxElement, Node, NumberLiteral,
    ObjectProperty, UnaryOp, UpdateOp,
};

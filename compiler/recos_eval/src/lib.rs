//! Recos Eval - tree-walking evaluator for Recos component bundles.
//!
//! # Architecture
//!
//! The evaluator uses:
//! - `Scope`: name bindings with strong parent links, shared by `ScopeRef`
//! - `CallStack`: live invocation frames, with an optional depth limit
//! - `evaluate_binary` / `evaluate_unary`: direct enum-based operator dispatch
//! - `HookStore` / `HookContext`: positional hook slots that survive render passes
//! - `Interpreter`: plain, render and stateful render evaluation of function bodies
//! - `RenderNode`: the resolved element tree handed to a native renderer
//!
//! Everything here is single-threaded: values and scopes are `Rc`-shared.

mod diagnostics;
mod environment;
pub mod errors;
mod eval_mode;
mod hooks;
pub mod interpreter;
mod operators;
mod render;
mod resolver;
mod unary_operators;
mod value;

pub use diagnostics::{CallStack, EvalCounters, StackFrame};
pub use environment::{Scope, ScopeRef};
pub use errors::{EvalBacktrace, EvalError, EvalErrorKind, EvalResult};
pub use eval_mode::{BlockScoping, EvalConfig, UnresolvedPolicy};
pub use hooks::{EffectRecord, HookContext, HookKind, HookStore, HookStoreHandle, NEED_UPDATE};
pub use interpreter::{Interpreter, InterpreterBuilder, NamedArgs};
pub use operators::evaluate_binary;
pub use render::{ElementKind, EventHandler, RenderChild, RenderNode};
pub use resolver::{Bundle, BundleError, ModuleResolver, NoModules};
pub use unary_operators::{evaluate_unary, evaluate_update};
pub use value::{
    format_number, ArrayValue, DeclaredFunction, FunctionValue, MemberProvider, MemberSetter,
    NativeFn, NativeFunction, ObjectValue, Value,
};

pub use recos_stack::ensure_sufficient_stack;

//! Tree-walking interpreter for Recos component bodies.
//!
//! # Invocation modes
//!
//! Every function body runs in one of two modes:
//!
//! - **Plain**: the body produces a value. Calls inside expressions, effect
//!   bodies and event handlers run this way, with `this` bound to
//!   `undefined`.
//! - **Render**: the body produces an optional [`RenderNode`]. A `return`
//!   of JSX renders it; a `return` of a call to a script function renders
//!   the callee.
//!
//! A *stateful* render is a render that also installs a fresh
//! [`HookContext`] over the host's [`HookStore`](crate::HookStore), so the
//! body's `useState` / `useCallback` / `useEffect` calls address persistent
//! slots. Child components rendered from it share its context.
//!
//! # Module structure
//!
//! - `exec`: statements and `return` handling
//! - `expr`: expressions, member access and assignment
//! - `hooks`: the hook intrinsics
//! - `jsx`: element rendering
//! - `frame_guard`: RAII frame push/pop
//!
//! Every invocation pushes a frame whose scope hangs off the callee's
//! captured scope (or the root for bundle components). The frame is popped
//! by its guard, so also on error.

mod builder;
mod exec;
mod expr;
mod frame_guard;
mod hooks;
mod jsx;

use std::rc::Rc;

use indexmap::IndexMap;
use recos_ir::{FunctionDecl, Node};

pub use builder::InterpreterBuilder;

use crate::diagnostics::{CallStack, EvalCounters};
use crate::environment::{Scope, ScopeRef};
use crate::errors::{unresolved_identifier, unsupported, EvalResult};
use crate::eval_mode::EvalConfig;
use crate::hooks::{HookContext, HookStoreHandle, NEED_UPDATE};
use crate::render::{EventHandler, RenderNode};
use crate::resolver::ModuleResolver;
use crate::value::{FunctionValue, Value};

/// Arguments keyed by parameter name, as hosts pass them.
pub type NamedArgs = IndexMap<String, Value>;

/// How a function body is being run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ExecMode {
    Plain,
    Render,
}

/// Result of executing one statement.
pub(crate) enum Flow {
    /// Fall through to the next statement.
    Next,
    /// A `return` was executed.
    Return(Exit),
}

/// What a function body produced.
pub(crate) enum Exit {
    /// A value. In render mode this renders nothing, but a `View` child
    /// shows it as text.
    Value(Value),
    Render(Option<RenderNode>),
}

impl Exit {
    /// Result of a body that ran off its end.
    fn fall_through(mode: ExecMode) -> Self {
        match mode {
            ExecMode::Plain => Exit::Value(Value::Undefined),
            ExecMode::Render => Exit::Render(None),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Exit::Value(value) => value,
            Exit::Render(_) => Value::Undefined,
        }
    }

    fn into_render(self) -> Option<RenderNode> {
        match self {
            Exit::Render(node) => node,
            Exit::Value(_) => None,
        }
    }
}

/// Tree-walking interpreter.
///
/// Holds the root scope, the call stack and the stack of active hook
/// contexts. Single-threaded; pass it by `&mut`.
pub struct Interpreter {
    /// Bindings visible to every component (`define_global`).
    pub(crate) root: ScopeRef,
    pub(crate) call_stack: CallStack,
    /// One context per active stateful render, innermost last.
    pub(crate) hooks: Vec<HookContext>,
    pub(crate) resolver: Rc<dyn ModuleResolver>,
    pub(crate) config: EvalConfig,
    pub(crate) counters: Option<EvalCounters>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// An interpreter with default configuration and no modules.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    pub fn root_scope(&self) -> &ScopeRef {
        &self.root
    }

    /// Bind `name` in the root scope.
    pub fn define_global(&mut self, name: impl Into<String>, value: Value) {
        self.root.borrow_mut().bind(name, value);
    }

    /// Counters collected so far, if profiling is enabled.
    pub fn counters(&self) -> Option<&EvalCounters> {
        self.counters.as_ref()
    }

    /// Current call depth.
    pub fn call_depth(&self) -> usize {
        self.call_stack.depth()
    }

    /// Run `decl` for its value.
    ///
    /// The frame's scope is a child of `parent`, or of the root scope.
    #[tracing::instrument(level = "debug", skip_all, fields(function = %decl.display_name()))]
    pub fn eval_plain(
        &mut self,
        decl: &Rc<FunctionDecl>,
        parent: Option<&ScopeRef>,
        args: &NamedArgs,
    ) -> EvalResult {
        let args = positional(decl, args);
        self.invoke(decl, parent.cloned(), args, ExecMode::Plain, None)
            .map(Exit::into_value)
    }

    /// Run `decl` as a render without hook persistence of its own.
    #[tracing::instrument(level = "debug", skip_all, fields(function = %decl.display_name()))]
    pub fn render(
        &mut self,
        decl: &Rc<FunctionDecl>,
        parent: Option<&ScopeRef>,
        args: &NamedArgs,
    ) -> EvalResult<Option<RenderNode>> {
        let args = positional(decl, args);
        self.invoke(decl, parent.cloned(), args, ExecMode::Render, None)
            .map(Exit::into_render)
    }

    /// Run `decl` as a render whose hooks address the slots of `store`.
    ///
    /// Hook cursors start from slot 0 on every call.
    #[tracing::instrument(level = "debug", skip_all, fields(function = %decl.display_name()))]
    pub fn render_with_state(
        &mut self,
        decl: &Rc<FunctionDecl>,
        parent: Option<&ScopeRef>,
        args: &NamedArgs,
        store: &HookStoreHandle,
    ) -> EvalResult<Option<RenderNode>> {
        let args = positional(decl, args);
        self.invoke(decl, parent.cloned(), args, ExecMode::Render, Some(store))
            .map(Exit::into_render)
    }

    /// Stateful render of the component `name` from the module resolver.
    pub fn render_component(
        &mut self,
        name: &str,
        args: &NamedArgs,
        store: &HookStoreHandle,
    ) -> EvalResult<Option<RenderNode>> {
        let Some(decl) = self.resolver.resolve(name) else {
            return Err(unresolved_identifier(name));
        };
        self.render_with_state(&decl, None, args, store)
    }

    /// Call a function value in plain mode with positional arguments.
    pub fn call_function(&mut self, function: &FunctionValue, args: Vec<Value>) -> EvalResult {
        match function {
            FunctionValue::Declared(f) => self
                .invoke(&f.decl, f.captured.clone(), args, ExecMode::Plain, None)
                .map(Exit::into_value),
            FunctionValue::Native(f) => {
                self.count(EvalCounters::count_function_call);
                f.call(&args)
            }
        }
    }

    /// Run a rendered event handler.
    ///
    /// Marks the rendering frame with `needUpdate` first, so state setters
    /// called from the handler request a re-render.
    pub fn dispatch_event(&mut self, handler: &EventHandler, args: Vec<Value>) -> EvalResult {
        if let Some(owner) = &handler.owner {
            owner.borrow_mut().bind(NEED_UPDATE, Value::Bool(true));
        }
        tracing::debug!(handler = handler.callback.name(), "dispatching event");
        self.call_function(&handler.callback, args)
    }

    /// Push a frame for `decl`, bind `args` to its parameters and run its
    /// body. `store` makes the invocation a stateful render.
    pub(crate) fn invoke(
        &mut self,
        decl: &Rc<FunctionDecl>,
        parent: Option<ScopeRef>,
        args: Vec<Value>,
        mode: ExecMode,
        store: Option<&HookStoreHandle>,
    ) -> EvalResult<Exit> {
        let parent = parent.unwrap_or_else(|| self.root.clone());
        let scope = Scope::child(&parent);
        {
            let mut frame_scope = scope.borrow_mut();
            if mode == ExecMode::Plain {
                frame_scope.bind("this", Value::Undefined);
            }
            bind_positional(&mut frame_scope, &decl.params, args);
        }
        self.count(EvalCounters::count_function_call);

        let hooks = store.map(|store| HookContext::new(store.clone(), scope.clone()));
        let mut frame = self.enter_frame(decl.display_name(), scope.clone(), hooks)?;
        let result = frame.run_body(decl, &scope, mode);
        result.map_err(|err| frame.call_stack.attach_backtrace(err))
    }

    /// Execute a function body. Expression-bodied arrows return their
    /// expression.
    fn run_body(&mut self, decl: &FunctionDecl, scope: &ScopeRef, mode: ExecMode) -> EvalResult<Exit> {
        match &*decl.body {
            Node::Block { body } => match self.exec_statements(body, scope, mode)? {
                Flow::Return(exit) => Ok(exit),
                Flow::Next => Ok(Exit::fall_through(mode)),
            },
            expression => self.return_exit(Some(expression), scope, mode),
        }
    }

    /// Render a script function's body with `args`, sharing the active hook
    /// context.
    pub(crate) fn render_function(
        &mut self,
        function: &FunctionValue,
        args: Vec<Value>,
    ) -> EvalResult<Option<RenderNode>> {
        match function {
            FunctionValue::Declared(f) => self
                .invoke(&f.decl, f.captured.clone(), args, ExecMode::Render, None)
                .map(Exit::into_render),
            FunctionValue::Native(f) => Err(unsupported(format!(
                "rendering native function `{}`",
                f.name()
            ))),
        }
    }

    #[inline]
    pub(crate) fn count(&mut self, bump: impl FnOnce(&mut EvalCounters)) {
        if let Some(counters) = self.counters.as_mut() {
            bump(counters);
        }
    }

    /// A fresh root scope for the builder.
    fn fresh_root() -> ScopeRef {
        ScopeRef::new(Scope::new())
    }
}

/// Bind `args` to `params` in order. Missing arguments are `undefined`;
/// extras are dropped.
fn bind_positional(scope: &mut Scope, params: &[String], args: Vec<Value>) {
    let mut args = args.into_iter();
    for param in params {
        scope.bind(param.as_str(), args.next().unwrap_or(Value::Undefined));
    }
}

/// Order named arguments by the declaration's parameters.
fn positional(decl: &FunctionDecl, args: &NamedArgs) -> Vec<Value> {
    decl.params
        .iter()
        .map(|param| args.get(param).cloned().unwrap_or(Value::Undefined))
        .collect()
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]

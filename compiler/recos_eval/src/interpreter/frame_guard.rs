//! RAII guard for invocation frames.
//!
//! [`FrameGuard`] holds `&mut Interpreter` and derefs to it, so a body runs
//! through the guard. Dropping it pops the call-stack frame and, for a
//! stateful render, the hook context it installed. Both happen on the error
//! path too, which keeps the stacks balanced after `?`.

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::diagnostics::StackFrame;
use crate::environment::ScopeRef;
use crate::errors::EvalResult;
use crate::hooks::HookContext;

pub(crate) struct FrameGuard<'a> {
    interpreter: &'a mut Interpreter,
    has_hooks: bool,
}

impl Drop for FrameGuard<'_> {
    fn drop(&mut self) {
        if self.has_hooks {
            self.interpreter.hooks.pop();
        }
        self.interpreter.call_stack.pop();
    }
}

impl Deref for FrameGuard<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for FrameGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Push a frame named `name` over `scope`, plus `hooks` if given.
    ///
    /// Fails with `StackOverflow` past the configured depth, in which case
    /// nothing is pushed.
    pub(crate) fn enter_frame(
        &mut self,
        name: &str,
        scope: ScopeRef,
        hooks: Option<HookContext>,
    ) -> EvalResult<FrameGuard<'_>> {
        self.call_stack.push(StackFrame {
            name: name.to_string(),
            scope,
        })?;
        let has_hooks = hooks.is_some();
        if let Some(context) = hooks {
            self.hooks.push(context);
        }
        Ok(FrameGuard {
            interpreter: self,
            has_hooks,
        })
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests {
    use super::*;
    use crate::environment::Scope;
    use crate::hooks::HookStoreHandle;

    fn scope() -> ScopeRef {
        ScopeRef::new(Scope::new())
    }

    #[test]
    fn test_guard_pops_on_drop() {
        let mut interpreter = Interpreter::new();
        {
            let guard = interpreter.enter_frame("App", scope(), None).unwrap();
            assert_eq!(guard.call_stack.depth(), 1);
        }
        assert!(interpreter.call_stack.is_empty());
    }

    #[test]
    fn test_guard_pops_hook_context() {
        let mut interpreter = Interpreter::new();
        let frame_scope = scope();
        let context = HookContext::new(HookStoreHandle::default(), frame_scope.clone());
        {
            let guard = interpreter
                .enter_frame("App", frame_scope, Some(context))
                .unwrap();
            assert_eq!(guard.hooks.len(), 1);
        }
        assert!(interpreter.hooks.is_empty());
    }

    #[test]
    fn test_overflow_pushes_nothing() {
        let mut interpreter = Interpreter::builder().max_call_depth(Some(1)).build();
        let mut guard = interpreter.enter_frame("outer", scope(), None).unwrap();
        let context = HookContext::new(HookStoreHandle::default(), scope());
        assert!(guard.enter_frame("inner", scope(), Some(context)).is_err());
        assert_eq!(guard.call_stack.depth(), 1);
        assert!(guard.hooks.is_empty());
    }
}

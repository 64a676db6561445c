//! Hook intrinsics: `useState`, `useCallback`, `useEffect`.
//!
//! Hooks address the innermost active [`HookContext`](crate::HookContext).
//! Outside any stateful render there is none and the call fails.

use super::Interpreter;
use crate::diagnostics::EvalCounters;
use crate::errors::{hook_outside_render, type_mismatch, EvalResult};
use crate::hooks::{HookContext, HookKind};
use crate::value::{FunctionValue, Value};

impl Interpreter {
    pub(crate) fn eval_hook(&mut self, kind: HookKind, args: Vec<Value>) -> EvalResult {
        if self.hooks.is_empty() {
            return Err(hook_outside_render(kind.name()));
        }
        self.count(EvalCounters::count_hook);
        let mut args = args.into_iter();

        match kind {
            HookKind::State => {
                let default = args.next().unwrap_or(Value::Undefined);
                let (value, setter) = self.hook_context(kind)?.use_state(default);
                Ok(Value::array(vec![value, Value::Function(setter)]))
            }
            HookKind::Callback => {
                let callback = expect_function(args.next())?;
                let callback = self.hook_context(kind)?.use_callback(callback);
                Ok(Value::Function(callback))
            }
            HookKind::Effect => {
                let effect = expect_function(args.next())?;
                let deps = match args.next() {
                    None | Some(Value::Undefined) => None,
                    Some(Value::Array(deps)) => Some(deps.snapshot()),
                    Some(other) => return Err(type_mismatch("dependency array", other.type_name())),
                };
                if self.hook_context(kind)?.use_effect(effect.clone(), deps) {
                    self.call_function(&effect, Vec::new())?;
                }
                Ok(Value::Undefined)
            }
        }
    }

    fn hook_context(&mut self, kind: HookKind) -> EvalResult<&mut HookContext> {
        self.hooks
            .last_mut()
            .ok_or_else(|| hook_outside_render(kind.name()))
    }
}

fn expect_function(arg: Option<Value>) -> EvalResult<FunctionValue> {
    match arg {
        Some(Value::Function(function)) => Ok(function),
        Some(other) => Err(type_mismatch("function", other.type_name())),
        None => Err(type_mismatch("function", "undefined")),
    }
}

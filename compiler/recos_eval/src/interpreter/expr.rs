//! Expression evaluation, member access and assignment.

use recos_ir::{AssignOp, Node, ObjectProperty, UpdateOp};

use super::Interpreter;
use crate::diagnostics::EvalCounters;
use crate::ensure_sufficient_stack;
use crate::environment::ScopeRef;
use crate::errors::{not_callable, type_mismatch, unresolved_identifier, unsupported, EvalResult};
use crate::eval_mode::UnresolvedPolicy;
use crate::hooks::HookKind;
use crate::operators::evaluate_binary;
use crate::unary_operators::{evaluate_unary, evaluate_update};
use crate::value::{truncate_to_i64, FunctionValue, ObjectValue, Value};

impl Interpreter {
    /// Evaluate an expression in `scope`.
    pub(crate) fn eval_expr(&mut self, node: &Node, scope: &ScopeRef) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_inner(node, scope))
    }

    fn eval_expr_inner(&mut self, node: &Node, scope: &ScopeRef) -> EvalResult {
        self.count(EvalCounters::count_expression);
        match node {
            Node::Number { value } => Ok(Value::from(*value)),
            Node::String { value } => Ok(Value::string(value)),
            Node::Bool { value } => Ok(Value::Bool(*value)),
            Node::Null => Ok(Value::Null),
            Node::Identifier { name } => self.resolve_identifier(name, scope),
            Node::Array { elements } => Ok(Value::array(self.eval_args(elements, scope)?)),
            Node::Object { properties } => self.eval_object(properties, scope),
            Node::Function(decl) | Node::ArrowFunction(decl) => Ok(Value::Function(
                FunctionValue::closure(decl.clone(), scope.clone()),
            )),
            Node::Binary { op, left, right } => {
                let left = self.eval_expr(left, scope)?;
                let right = self.eval_expr(right, scope)?;
                evaluate_binary(left, right, *op)
            }
            Node::Unary { op, argument } => {
                let value = self.eval_expr(argument, scope)?;
                evaluate_unary(&value, *op)
            }
            Node::Call { callee, arguments } => self.eval_call(callee, arguments, scope),
            Node::Member {
                object,
                property,
                computed,
            } => {
                let object = self.eval_expr(object, scope)?;
                let name = self.member_name(property, *computed, scope)?;
                object.get_member(&name)
            }
            Node::Update {
                op,
                prefix,
                argument,
            } => self.eval_update(*op, *prefix, argument, scope),
            Node::Assign { op, left, right } => self.eval_assign(*op, left, right, scope),
            Node::Sequence { expressions } => {
                let mut last = Value::Undefined;
                for expression in expressions {
                    last = self.eval_expr(expression, scope)?;
                }
                Ok(last)
            }
            Node::JsxElement(element) => Err(unsupported(format!(
                "`<{}>` outside of a render return",
                element.name
            ))),
            Node::JsxText { .. } => Err(unsupported("JSX text outside of an element")),
            statement => Err(unsupported(format!(
                "{} in expression position",
                statement.kind_name()
            ))),
        }
    }

    /// Evaluate `nodes` left to right.
    pub(crate) fn eval_args(&mut self, nodes: &[Node], scope: &ScopeRef) -> EvalResult<Vec<Value>> {
        nodes.iter().map(|node| self.eval_expr(node, scope)).collect()
    }

    /// Module components first, then the scope chain, then the unresolved
    /// policy.
    fn resolve_identifier(&self, name: &str, scope: &ScopeRef) -> EvalResult {
        if let Some(decl) = self.resolver.resolve(name) {
            return Ok(Value::Function(FunctionValue::component(decl)));
        }
        self.lookup_variable(name, scope)
    }

    fn lookup_variable(&self, name: &str, scope: &ScopeRef) -> EvalResult {
        if let Some(value) = scope.borrow().lookup(name) {
            return Ok(value);
        }
        match self.config.unresolved {
            UnresolvedPolicy::Nullish => Ok(Value::Undefined),
            UnresolvedPolicy::Error => Err(unresolved_identifier(name)),
        }
    }

    fn eval_object(&mut self, properties: &[ObjectProperty], scope: &ScopeRef) -> EvalResult {
        let object = ObjectValue::new();
        for property in properties {
            let key = self.member_name(&property.key, property.computed, scope)?;
            let value = self.eval_expr(&property.value, scope)?;
            object.insert(key, value);
        }
        Ok(Value::Object(object))
    }

    /// The key a member or property expression names.
    ///
    /// Non-computed keys are identifiers or literals taken verbatim. Computed
    /// keys must evaluate to a string or an integral number.
    pub(crate) fn member_name(
        &mut self,
        property: &Node,
        computed: bool,
        scope: &ScopeRef,
    ) -> EvalResult<String> {
        if !computed {
            return match property {
                Node::Identifier { name } => Ok(name.clone()),
                Node::String { value } => Ok(value.clone()),
                Node::Number { value } => Ok(value.to_string()),
                other => Err(unsupported(format!("{} as a property key", other.kind_name()))),
            };
        }
        match self.eval_expr(property, scope)? {
            Value::Int(n) => Ok(n.to_string()),
            Value::Float(n) if n.is_finite() && n.fract() == 0.0 => {
                Ok(truncate_to_i64(n).to_string())
            }
            Value::Str(s) => Ok(s.to_string()),
            other => Err(type_mismatch("string or integer key", other.type_name())),
        }
    }

    /// The hook a call site invokes, if its callee is an unshadowed hook name.
    pub(crate) fn hook_intrinsic(&self, callee: &Node, scope: &ScopeRef) -> Option<HookKind> {
        let Node::Identifier { name } = callee else {
            return None;
        };
        let kind = HookKind::from_name(name)?;
        let shadowed = self.resolver.resolve(name).is_some() || scope.borrow().lookup(name).is_some();
        (!shadowed).then_some(kind)
    }

    fn eval_call(&mut self, callee: &Node, arguments: &[Node], scope: &ScopeRef) -> EvalResult {
        if let Some(kind) = self.hook_intrinsic(callee, scope) {
            let args = self.eval_args(arguments, scope)?;
            return self.eval_hook(kind, args);
        }
        let function = self.eval_expr(callee, scope)?;
        let args = self.eval_args(arguments, scope)?;
        self.call_value(&function, args)
    }

    /// Call `value` in plain mode.
    pub(crate) fn call_value(&mut self, value: &Value, args: Vec<Value>) -> EvalResult {
        match value {
            Value::Function(function) => self.call_function(function, args),
            other => Err(not_callable(other.type_name())),
        }
    }

    /// `target = value`. Only plain `=` is supported.
    fn eval_assign(
        &mut self,
        op: AssignOp,
        target: &Node,
        value: &Node,
        scope: &ScopeRef,
    ) -> EvalResult {
        if op != AssignOp::Assign {
            return Err(unsupported(format!(
                "assignment operator `{}`",
                op.as_symbol()
            )));
        }
        let value = self.eval_expr(value, scope)?;
        match target {
            Node::Identifier { name } => scope.borrow_mut().assign(name, value.clone()),
            Node::Member {
                object,
                property,
                computed,
            } => {
                let object = self.eval_expr(object, scope)?;
                let name = self.member_name(property, *computed, scope)?;
                object.member_setter(&name)?.set(value.clone())?;
            }
            other => {
                return Err(unsupported(format!("assignment to {}", other.kind_name())));
            }
        }
        Ok(value)
    }

    /// `++x`, `x--`, `obj.n++`: writes the next value back and returns the
    /// new (prefix) or prior (postfix) value. Identifiers are rebound in
    /// `scope` itself, shadowing any outer binding.
    fn eval_update(
        &mut self,
        op: UpdateOp,
        prefix: bool,
        target: &Node,
        scope: &ScopeRef,
    ) -> EvalResult {
        let (prior, next) = match target {
            Node::Identifier { name } => {
                let current = self.lookup_variable(name, scope)?;
                let (prior, next) = evaluate_update(&current, op)?;
                scope.borrow_mut().bind(name.as_str(), Value::Int(next));
                (prior, next)
            }
            Node::Member {
                object,
                property,
                computed,
            } => {
                let object = self.eval_expr(object, scope)?;
                let name = self.member_name(property, *computed, scope)?;
                let (prior, next) = evaluate_update(&object.get_member(&name)?, op)?;
                object.member_setter(&name)?.set(Value::Int(next))?;
                (prior, next)
            }
            other => {
                return Err(unsupported(format!(
                    "`{}` on {}",
                    op.as_symbol(),
                    other.kind_name()
                )));
            }
        };
        Ok(Value::Int(if prefix { next } else { prior }))
    }
}

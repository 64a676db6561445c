//! Statement execution.
//!
//! Statements run against an explicit scope and report [`Flow`]: either fall
//! through or a `return` that unwinds to the enclosing function body.

use recos_ir::{Declarator, Node};

use super::{ExecMode, Exit, Flow, Interpreter};
use crate::ensure_sufficient_stack;
use crate::environment::{Scope, ScopeRef};
use crate::errors::{destructure_arity_mismatch, type_mismatch, unsupported, EvalResult};
use crate::eval_mode::BlockScoping;
use crate::value::{FunctionValue, Value};

impl Interpreter {
    /// Run `statements` in order, stopping at the first `return`.
    pub(crate) fn exec_statements(
        &mut self,
        statements: &[Node],
        scope: &ScopeRef,
        mode: ExecMode,
    ) -> EvalResult<Flow> {
        for statement in statements {
            if let Flow::Return(exit) = self.exec_statement(statement, scope, mode)? {
                return Ok(Flow::Return(exit));
            }
        }
        Ok(Flow::Next)
    }

    pub(crate) fn exec_statement(
        &mut self,
        statement: &Node,
        scope: &ScopeRef,
        mode: ExecMode,
    ) -> EvalResult<Flow> {
        ensure_sufficient_stack(|| self.exec_statement_inner(statement, scope, mode))
    }

    fn exec_statement_inner(
        &mut self,
        statement: &Node,
        scope: &ScopeRef,
        mode: ExecMode,
    ) -> EvalResult<Flow> {
        match statement {
            Node::VarDeclList { declarations } => {
                for declarator in declarations {
                    self.exec_declarator(declarator, scope)?;
                }
                Ok(Flow::Next)
            }
            Node::FunctionDecl(decl) => {
                let Some(name) = decl.name.as_deref() else {
                    return Err(unsupported("function declaration without a name"));
                };
                let closure = FunctionValue::closure(decl.clone(), scope.clone());
                scope.borrow_mut().bind(name, Value::Function(closure));
                Ok(Flow::Next)
            }
            Node::Block { body } => match self.config.block_scoping {
                BlockScoping::Shared => self.exec_statements(body, scope, mode),
                BlockScoping::Lexical => {
                    let block_scope = Scope::child(scope);
                    self.exec_statements(body, &block_scope, mode)
                }
            },
            Node::For {
                init,
                test,
                update,
                body,
            } => {
                let loop_scope = Scope::child(scope);
                if let Some(init) = init {
                    self.exec_statement(init, &loop_scope, mode)?;
                }
                loop {
                    if let Some(test) = test {
                        if !self.eval_expr(test, &loop_scope)?.is_true() {
                            break;
                        }
                    }
                    if let Flow::Return(exit) = self.exec_statement(body, &loop_scope, mode)? {
                        return Ok(Flow::Return(exit));
                    }
                    if let Some(update) = update {
                        self.eval_expr(update, &loop_scope)?;
                    }
                }
                Ok(Flow::Next)
            }
            Node::If {
                test,
                consequent,
                alternate,
            } => {
                let branch_scope = Scope::child(scope);
                if self.eval_expr(test, &branch_scope)?.is_true() {
                    self.exec_statement(consequent, &branch_scope, mode)
                } else if let Some(alternate) = alternate {
                    self.exec_statement(alternate, &branch_scope, mode)
                } else {
                    Ok(Flow::Next)
                }
            }
            Node::Return { argument } => Ok(Flow::Return(self.return_exit(
                argument.as_deref(),
                scope,
                mode,
            )?)),
            Node::ExprStatement { expression } => {
                self.eval_expr(expression, scope)?;
                Ok(Flow::Next)
            }
            // A bare expression in statement position, e.g. a `for` init.
            expression => {
                self.eval_expr(expression, scope)?;
                Ok(Flow::Next)
            }
        }
    }

    fn exec_declarator(&mut self, declarator: &Declarator, scope: &ScopeRef) -> EvalResult<()> {
        match declarator {
            Declarator::Var { name, init } => {
                let value = match init {
                    Some(init) => self.eval_expr(init, scope)?,
                    None => Value::Undefined,
                };
                scope.borrow_mut().bind(name.as_str(), value);
            }
            Declarator::ArrayPattern { names, init } => {
                let items = match self.eval_expr(init, scope)? {
                    Value::Array(array) => array.snapshot(),
                    other => return Err(type_mismatch("array", other.type_name())),
                };
                if items.len() < names.len() {
                    return Err(destructure_arity_mismatch(names.len(), items.len()));
                }
                let mut bindings = scope.borrow_mut();
                for (name, value) in names.iter().zip(items) {
                    bindings.bind(name.as_str(), value);
                }
            }
        }
        Ok(())
    }

    /// What `return argument` exits with in `mode`.
    pub(crate) fn return_exit(
        &mut self,
        argument: Option<&Node>,
        scope: &ScopeRef,
        mode: ExecMode,
    ) -> EvalResult<Exit> {
        match mode {
            ExecMode::Plain => {
                let value = match argument {
                    Some(argument) => self.eval_expr(argument, scope)?,
                    None => Value::Undefined,
                };
                Ok(Exit::Value(value))
            }
            ExecMode::Render => self.render_exit(argument, scope),
        }
    }

    /// What a render-mode `return argument` exits with.
    ///
    /// JSX renders. A call to a script function runs the callee in render
    /// mode and exits with whatever it exits with. Any other expression,
    /// native and hook calls included, exits with its value.
    pub(crate) fn render_exit(&mut self, argument: Option<&Node>, scope: &ScopeRef) -> EvalResult<Exit> {
        match argument {
            None => Ok(Exit::Render(None)),
            Some(Node::JsxElement(element)) => Ok(Exit::Render(self.render_element(element, scope)?)),
            Some(Node::Call { callee, arguments }) if self.hook_intrinsic(callee, scope).is_none() => {
                let function = self.eval_expr(callee, scope)?;
                let args = self.eval_args(arguments, scope)?;
                match function {
                    Value::Function(FunctionValue::Declared(f)) => {
                        self.invoke(&f.decl, f.captured.clone(), args, ExecMode::Render, None)
                    }
                    other => Ok(Exit::Value(self.call_value(&other, args)?)),
                }
            }
            Some(other) => Ok(Exit::Value(self.eval_expr(other, scope)?)),
        }
    }
}

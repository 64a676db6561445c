//! Callable values.

use std::fmt;
use std::rc::Rc;

use recos_ir::FunctionDecl;

use super::Value;
use crate::environment::ScopeRef;
use crate::errors::EvalResult;

/// Signature of a native callable.
pub type NativeFn = dyn Fn(&[Value]) -> EvalResult;

/// A function value: a script closure or a native callable.
///
/// Only declared functions take part in scoping; invoking one pushes a frame
/// whose scope hangs off the captured scope.
#[derive(Clone)]
pub enum FunctionValue {
    Declared(DeclaredFunction),
    Native(NativeFunction),
}

/// A script function and the scope it was created in.
#[derive(Clone)]
pub struct DeclaredFunction {
    pub decl: Rc<FunctionDecl>,
    /// `None` for module-level components, which run directly under the
    /// interpreter's root scope.
    pub captured: Option<ScopeRef>,
}

/// A host- or runtime-provided callable.
#[derive(Clone)]
pub struct NativeFunction {
    name: Rc<str>,
    func: Rc<NativeFn>,
}

impl FunctionValue {
    /// A closure over `scope`.
    pub fn closure(decl: Rc<FunctionDecl>, scope: ScopeRef) -> Self {
        FunctionValue::Declared(DeclaredFunction {
            decl,
            captured: Some(scope),
        })
    }

    /// A top-level component with no captured scope.
    pub fn component(decl: Rc<FunctionDecl>) -> Self {
        FunctionValue::Declared(DeclaredFunction {
            decl,
            captured: None,
        })
    }

    pub fn native(name: impl Into<String>, func: impl Fn(&[Value]) -> EvalResult + 'static) -> Self {
        let name: String = name.into();
        FunctionValue::Native(NativeFunction {
            name: Rc::from(name),
            func: Rc::new(func),
        })
    }

    pub fn name(&self) -> &str {
        match self {
            FunctionValue::Declared(f) => f.decl.display_name(),
            FunctionValue::Native(f) => &f.name,
        }
    }

    pub fn as_declared(&self) -> Option<&DeclaredFunction> {
        match self {
            FunctionValue::Declared(f) => Some(f),
            FunctionValue::Native(_) => None,
        }
    }
}

impl NativeFunction {
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn call(&self, args: &[Value]) -> EvalResult {
        (self.func)(args)
    }
}

/// Functions compare by identity: same body and same captured scope, or the
/// same native closure.
impl PartialEq for FunctionValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FunctionValue::Declared(a), FunctionValue::Declared(b)) => {
                Rc::ptr_eq(&a.decl, &b.decl)
                    && match (&a.captured, &b.captured) {
                        (Some(x), Some(y)) => x.ptr_eq(y),
                        (None, None) => true,
                        _ => false,
                    }
            }
            (FunctionValue::Native(a), FunctionValue::Native(b)) => Rc::ptr_eq(&a.func, &b.func),
            _ => false,
        }
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionValue::Declared(func) => write!(
                f,
                "Declared({}/{})",
                func.decl.display_name(),
                func.decl.params.len()
            ),
            FunctionValue::Native(func) => write!(f, "Native({})", func.name),
        }
    }
}

//! Scope chain for variable lookup and closures.
//!
//! Every function invocation gets a fresh `Scope` whose parent is either the
//! closure's captured scope or the interpreter's root scope. Closures hold a
//! strong reference to the scope they were created in, so a callback stored
//! in a hook slot can still read its component's bindings after the frame
//! that created it is gone. Parents never point at children, so the chain
//! is acyclic.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::value::Value;

/// Shared handle to a [`Scope`].
///
/// Frames, closures, hook contexts and rendered event handlers all hold
/// one. Single-threaded: `Rc`, not `Arc`.
#[derive(Clone, Debug)]
pub struct ScopeRef(Rc<RefCell<Scope>>);

impl ScopeRef {
    pub fn new(scope: Scope) -> Self {
        ScopeRef(Rc::new(RefCell::new(scope)))
    }

    /// Whether both handles point at the same scope.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for ScopeRef {
    type Target = RefCell<Scope>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A single scope containing variable bindings.
#[derive(Clone, Default)]
pub struct Scope {
    bindings: FxHashMap<String, Value>,
    parent: Option<ScopeRef>,
}

impl Scope {
    /// Create a new empty scope with no parent.
    pub fn new() -> Self {
        Scope::default()
    }

    /// Create a new scope with a parent.
    pub fn with_parent(parent: ScopeRef) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Allocate a child of `parent`.
    pub fn child(parent: &ScopeRef) -> ScopeRef {
        ScopeRef::new(Scope::with_parent(parent.clone()))
    }

    pub fn parent(&self) -> Option<&ScopeRef> {
        self.parent.as_ref()
    }

    /// Bind `name` in this scope, shadowing any outer binding.
    #[inline]
    pub fn bind(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    /// Look up a variable here, then up the parent chain.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.get(name) {
            return Some(value.clone());
        }
        if let Some(parent) = &self.parent {
            return parent.borrow().lookup(name);
        }
        None
    }

    /// Whether `name` is bound in this scope itself.
    #[inline]
    pub fn has_local(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Write to the nearest scope that already binds `name`; bind locally
    /// when no scope in the chain does.
    pub fn assign(&mut self, name: &str, value: Value) {
        if let Err(value) = self.assign_existing(name, value) {
            self.bind(name, value);
        }
    }

    /// Hands `value` back when nothing in the chain binds `name`.
    fn assign_existing(&mut self, name: &str, value: Value) -> Result<(), Value> {
        if let Some(slot) = self.bindings.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign_existing(name, value),
            None => Err(value),
        }
    }

    /// Number of bindings in this scope alone.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Scope")
            .field("bindings", &names)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

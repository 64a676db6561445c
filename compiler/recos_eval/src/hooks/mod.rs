//! Positional hook state.
//!
//! A component's hooks are identified by call order: the third `useState`
//! call in a render pass always addresses state slot 2. The data lives in a
//! [`HookStore`] owned by the host and shared by handle with every state
//! setter handed out to scripts. A [`HookContext`] holds the per-pass
//! cursors; the interpreter creates one at the start of each stateful render
//! and drops it at the end, so cursors always restart from slot 0.
//!
//! Hook order must be the same on every pass. Nothing here can detect a
//! component that calls hooks conditionally; it would read other slots.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::environment::ScopeRef;
use crate::value::{FunctionValue, Value};

/// Binding consulted by state setters to decide whether a commit should
/// request a re-render. Event dispatch sets it on the rendering frame.
pub const NEED_UPDATE: &str = "needUpdate";

/// The hook intrinsics recognised at call sites.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HookKind {
    State,
    Callback,
    Effect,
}

impl HookKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "useState" => Some(HookKind::State),
            "useCallback" => Some(HookKind::Callback),
            "useEffect" => Some(HookKind::Effect),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            HookKind::State => "useState",
            HookKind::Callback => "useCallback",
            HookKind::Effect => "useEffect",
        }
    }
}

/// A stored effect and the dependencies it last ran with.
#[derive(Clone, Debug)]
pub struct EffectRecord {
    pub function: FunctionValue,
    /// `None` when the effect was declared without a dependency array.
    pub deps: Option<Vec<Value>>,
}

type RerenderListener = Box<dyn FnMut(&[Value])>;

/// Persistent hook data for one component instance.
#[derive(Default)]
pub struct HookStore {
    state: Vec<Value>,
    callbacks: Vec<FunctionValue>,
    effects: Vec<EffectRecord>,
    pending_rerenders: usize,
    listener: Option<RerenderListener>,
}

impl HookStore {
    pub fn new() -> Self {
        HookStore::default()
    }

    pub fn state(&self) -> &[Value] {
        &self.state
    }

    pub fn callbacks(&self) -> &[FunctionValue] {
        &self.callbacks
    }

    pub fn effects(&self) -> &[EffectRecord] {
        &self.effects
    }

    /// Replace the state vector. A re-render is requested only when
    /// `force_rerender` is set.
    pub fn commit(&mut self, new_state: Vec<Value>, force_rerender: bool) {
        self.state = new_state;
        if force_rerender {
            self.pending_rerenders += 1;
            tracing::debug!(slots = self.state.len(), "state committed; re-render requested");
            if let Some(listener) = self.listener.as_mut() {
                listener(&self.state);
            }
        } else {
            tracing::debug!(slots = self.state.len(), "state committed");
        }
    }

    /// Consume all pending re-render requests; `true` if there were any.
    pub fn take_rerender_request(&mut self) -> bool {
        std::mem::take(&mut self.pending_rerenders) > 0
    }

    /// Called with the new state on every commit that requests a re-render.
    ///
    /// The listener runs while the store is mutably borrowed; it must not
    /// touch the store through its handle.
    pub fn on_rerender(&mut self, listener: impl FnMut(&[Value]) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Drop every slot, e.g. when the host unmounts the component.
    pub fn clear(&mut self) {
        self.state.clear();
        self.callbacks.clear();
        self.effects.clear();
        self.pending_rerenders = 0;
    }
}

impl fmt::Debug for HookStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookStore")
            .field("state", &self.state)
            .field("callbacks", &self.callbacks.len())
            .field("effects", &self.effects.len())
            .field("pending_rerenders", &self.pending_rerenders)
            .finish_non_exhaustive()
    }
}

/// Shared handle to a [`HookStore`], held by the host and by state setters.
#[derive(Clone, Debug, Default)]
pub struct HookStoreHandle(Rc<RefCell<HookStore>>);

impl HookStoreHandle {
    pub fn new(store: HookStore) -> Self {
        HookStoreHandle(Rc::new(RefCell::new(store)))
    }

    pub fn borrow(&self) -> std::cell::Ref<'_, HookStore> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, HookStore> {
        self.0.borrow_mut()
    }
}

/// Hook cursors for one stateful render pass.
#[derive(Debug)]
pub struct HookContext {
    store: HookStoreHandle,
    /// Scope of the stateful frame: setters read `needUpdate` from it and
    /// rendered event handlers are bound to it.
    frame_scope: ScopeRef,
    next_state: usize,
    next_callback: usize,
    next_effect: usize,
}

impl HookContext {
    pub fn new(store: HookStoreHandle, frame_scope: ScopeRef) -> Self {
        HookContext {
            store,
            frame_scope,
            next_state: 0,
            next_callback: 0,
            next_effect: 0,
        }
    }

    pub fn frame_scope(&self) -> &ScopeRef {
        &self.frame_scope
    }

    /// Visit the next state slot, creating it with `default` if the store
    /// doesn't have it yet. Returns the slot's current value and its setter.
    pub fn use_state(&mut self, default: Value) -> (Value, FunctionValue) {
        let index = self.next_state;
        self.next_state += 1;

        let value = {
            let mut store = self.store.borrow_mut();
            if let Some(existing) = store.state.get(index) {
                existing.clone()
            } else {
                tracing::trace!(slot = index, "state slot created");
                store.state.resize(index, Value::Undefined);
                store.state.push(default.clone());
                default
            }
        };
        (value, self.state_setter(index))
    }

    /// Setter for state slot `index`: writes the slot and commits the store,
    /// requesting a re-render only if `needUpdate` is truthy for the frame.
    fn state_setter(&self, index: usize) -> FunctionValue {
        let store = self.store.clone();
        let frame_scope = self.frame_scope.clone();
        FunctionValue::native("setState", move |args| {
            let value = args.first().cloned().unwrap_or(Value::Undefined);
            let force = frame_scope
                .borrow()
                .lookup(NEED_UPDATE)
                .is_some_and(|flag| flag.is_true());
            let mut store = store.borrow_mut();
            let mut next = store.state.clone();
            if next.len() <= index {
                next.resize(index + 1, Value::Undefined);
            }
            next[index] = value;
            store.commit(next, force);
            Ok(Value::Undefined)
        })
    }

    /// Visit the next callback slot. An existing slot wins regardless of
    /// dependencies.
    pub fn use_callback(&mut self, callback: FunctionValue) -> FunctionValue {
        let index = self.next_callback;
        self.next_callback += 1;

        let mut store = self.store.borrow_mut();
        if let Some(existing) = store.callbacks.get(index) {
            return existing.clone();
        }
        tracing::trace!(slot = index, "callback slot created");
        store.callbacks.push(callback.clone());
        callback
    }

    /// Visit the next effect slot and decide whether the effect must run.
    ///
    /// Runs when the slot is new, when no dependency array was given, or
    /// when the dependencies differ element-wise from the last run. The slot
    /// is updated before the caller runs the effect.
    pub fn use_effect(&mut self, effect: FunctionValue, deps: Option<Vec<Value>>) -> bool {
        let index = self.next_effect;
        self.next_effect += 1;

        let mut store = self.store.borrow_mut();
        let should_run = match (store.effects.get(index), &deps) {
            (Some(EffectRecord { deps: Some(prior), .. }), Some(current)) => prior != current,
            _ => true,
        };
        tracing::trace!(slot = index, should_run, "effect visited");

        if should_run {
            let record = EffectRecord {
                function: effect,
                deps,
            };
            if index < store.effects.len() {
                store.effects[index] = record;
            } else {
                store.effects.push(record);
            }
        }
        should_run
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]

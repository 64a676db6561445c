//! Arrays, objects, and the member protocol they share.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use super::{FunctionValue, Value};
use crate::errors::{index_out_of_bounds, unsupported, EvalResult};

/// Named and indexed read/write access on a value.
///
/// Member expressions (`a.b`, `a[0]`) read through [`MemberProvider::get`];
/// assignment targets (`a.b = v`, `a[0] = v`) resolve a [`MemberSetter`]
/// first and write through it once the right-hand side is known.
pub trait MemberProvider {
    fn get(&self, name: &str) -> EvalResult;

    fn setter(&self, name: &str) -> EvalResult<MemberSetter>;
}

/// A bound write target produced by [`MemberProvider::setter`].
#[derive(Clone, Debug)]
pub struct MemberSetter {
    target: SetterTarget,
}

#[derive(Clone, Debug)]
enum SetterTarget {
    Object { object: ObjectValue, key: String },
    Array { array: ArrayValue, index: i64 },
}

impl MemberSetter {
    /// Write `value`. Objects upsert; arrays replace an in-bounds element.
    pub fn set(&self, value: Value) -> EvalResult<()> {
        match &self.target {
            SetterTarget::Object { object, key } => {
                object.insert(key.clone(), value);
                Ok(())
            }
            SetterTarget::Array { array, index } => array.replace(*index, value),
        }
    }
}

/// Shared, mutable, ordered list of values.
#[derive(Clone, Default)]
pub struct ArrayValue(Rc<RefCell<Vec<Value>>>);

impl ArrayValue {
    pub fn new(items: Vec<Value>) -> Self {
        ArrayValue(Rc::new(RefCell::new(items)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Copy of the current elements. Nested arrays and objects stay shared.
    pub fn snapshot(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    /// Element at `index`, bounds-checked.
    pub fn index(&self, index: i64) -> EvalResult {
        let items = self.0.borrow();
        usize::try_from(index)
            .ok()
            .and_then(|i| items.get(i))
            .cloned()
            .ok_or_else(|| index_out_of_bounds(index, items.len()))
    }

    /// Append `values`, returning the new length.
    pub fn push(&self, values: &[Value]) -> usize {
        let mut items = self.0.borrow_mut();
        items.extend_from_slice(values);
        items.len()
    }

    fn replace(&self, index: i64, value: Value) -> EvalResult<()> {
        let mut items = self.0.borrow_mut();
        let len = items.len();
        let slot = usize::try_from(index)
            .ok()
            .and_then(|i| items.get_mut(i))
            .ok_or_else(|| index_out_of_bounds(index, len))?;
        *slot = value;
        Ok(())
    }

    /// Whether both handles share the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Array members: integer names index, plus `length` and `push`.
impl MemberProvider for ArrayValue {
    fn get(&self, name: &str) -> EvalResult {
        if let Ok(index) = name.parse::<i64>() {
            return self.index(index);
        }
        match name {
            "length" => Ok(Value::Int(i64::try_from(self.len()).unwrap_or(i64::MAX))),
            "push" => {
                let array = self.clone();
                Ok(Value::Function(FunctionValue::native("push", move |args| {
                    let len = array.push(args);
                    Ok(Value::Int(i64::try_from(len).unwrap_or(i64::MAX)))
                })))
            }
            other => Err(unsupported(format!("array member `{other}`"))),
        }
    }

    fn setter(&self, name: &str) -> EvalResult<MemberSetter> {
        let index = name
            .parse::<i64>()
            .map_err(|_| unsupported(format!("assignment to array member `{name}`")))?;
        Ok(MemberSetter {
            target: SetterTarget::Array {
                array: self.clone(),
                index,
            },
        })
    }
}

impl PartialEq for ArrayValue {
    fn eq(&self, other: &Self) -> bool {
        self.eq_in(other, &mut SeenPairs::new())
    }
}

impl fmt::Display for ArrayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.display_in(f, &FormatPath::default())
    }
}

impl fmt::Debug for ArrayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.debug_in(f, &FormatPath::default())
    }
}

/// Shared, mutable, insertion-ordered string-keyed map.
#[derive(Clone, Default)]
pub struct ObjectValue(Rc<RefCell<IndexMap<String, Value>>>);

impl ObjectValue {
    pub fn new() -> Self {
        ObjectValue::default()
    }

    pub fn from_entries<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        ObjectValue(Rc::new(RefCell::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        )))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Value under `key`, if present.
    pub fn get_key(&self, key: &str) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    /// Insert or overwrite, keeping the original position of existing keys.
    pub fn insert(&self, key: impl Into<String>, value: Value) {
        self.0.borrow_mut().insert(key.into(), value);
    }

    /// Copy of the current entries, in insertion order.
    pub fn snapshot(&self) -> Vec<(String, Value)> {
        self.0
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Object members: any name; missing keys read as `undefined`.
impl MemberProvider for ObjectValue {
    fn get(&self, name: &str) -> EvalResult {
        Ok(self.get_key(name).unwrap_or(Value::Undefined))
    }

    fn setter(&self, name: &str) -> EvalResult<MemberSetter> {
        Ok(MemberSetter {
            target: SetterTarget::Object {
                object: self.clone(),
                key: name.to_string(),
            },
        })
    }
}

impl PartialEq for ObjectValue {
    fn eq(&self, other: &Self) -> bool {
        self.eq_in(other, &mut SeenPairs::new())
    }
}

impl fmt::Debug for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.debug_in(f, &FormatPath::default())
    }
}

// Cycle-aware comparison and formatting.
//
// `a.push(a)` makes an array contain itself, so every structural walk over
// collections carries the storage addresses it has already entered.

/// Collection pairs already entered by one structural comparison.
type SeenPairs = Vec<(*const (), *const ())>;

/// Collections on the path from the value being formatted to the current
/// element, outermost first.
type FormatPath = RefCell<Vec<*const ()>>;

/// Structural equality that treats a revisited pair of collections as
/// equal.
fn values_eq(a: &Value, b: &Value, seen: &mut SeenPairs) -> bool {
    match (a, b) {
        (Value::Array(a), Value::Array(b)) => a.eq_in(b, seen),
        (Value::Object(a), Value::Object(b)) => a.eq_in(b, seen),
        _ => a == b,
    }
}

/// Enter `pair` once. `false` if it was entered before.
fn enter_pair(seen: &mut SeenPairs, pair: (*const (), *const ())) -> bool {
    if seen.contains(&pair) {
        return false;
    }
    seen.push(pair);
    true
}

/// Run `write` with `addr` pushed on `path`, or print `[Circular]` if it is
/// already there.
fn with_path(
    f: &mut fmt::Formatter<'_>,
    path: &FormatPath,
    addr: *const (),
    write: impl FnOnce(&mut fmt::Formatter<'_>) -> fmt::Result,
) -> fmt::Result {
    if path.borrow().contains(&addr) {
        return f.write_str("[Circular]");
    }
    path.borrow_mut().push(addr);
    let result = write(f);
    path.borrow_mut().pop();
    result
}

/// A value formatted as part of an enclosing collection.
struct Nested<'a> {
    value: &'a Value,
    path: &'a FormatPath,
}

impl fmt::Display for Nested<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::Array(array) => array.display_in(f, self.path),
            scalar => fmt::Display::fmt(scalar, f),
        }
    }
}

impl fmt::Debug for Nested<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::Array(array) => array.debug_in(f, self.path),
            Value::Object(object) => object.debug_in(f, self.path),
            scalar => fmt::Debug::fmt(scalar, f),
        }
    }
}

impl ArrayValue {
    fn addr(&self) -> *const () {
        Rc::as_ptr(&self.0).cast()
    }

    fn eq_in(&self, other: &Self, seen: &mut SeenPairs) -> bool {
        if self.ptr_eq(other) || !enter_pair(seen, (self.addr(), other.addr())) {
            return true;
        }
        let (a, b) = (self.0.borrow(), other.0.borrow());
        a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| values_eq(x, y, seen))
    }

    fn display_in(&self, f: &mut fmt::Formatter<'_>, path: &FormatPath) -> fmt::Result {
        with_path(f, path, self.addr(), |f| {
            for (i, item) in self.0.borrow().iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{}", Nested { value: item, path })?;
            }
            Ok(())
        })
    }

    fn debug_in(&self, f: &mut fmt::Formatter<'_>, path: &FormatPath) -> fmt::Result {
        with_path(f, path, self.addr(), |f| {
            f.debug_list()
                .entries(self.0.borrow().iter().map(|value| Nested { value, path }))
                .finish()
        })
    }
}

impl ObjectValue {
    fn addr(&self) -> *const () {
        Rc::as_ptr(&self.0).cast()
    }

    fn eq_in(&self, other: &Self, seen: &mut SeenPairs) -> bool {
        if self.ptr_eq(other) || !enter_pair(seen, (self.addr(), other.addr())) {
            return true;
        }
        let (a, b) = (self.0.borrow(), other.0.borrow());
        a.len() == b.len()
            && a.iter()
                .all(|(k, v)| b.get(k).is_some_and(|w| values_eq(v, w, seen)))
    }

    fn debug_in(&self, f: &mut fmt::Formatter<'_>, path: &FormatPath) -> fmt::Result {
        with_path(f, path, self.addr(), |f| {
            f.debug_map()
                .entries(
                    self.0
                        .borrow()
                        .iter()
                        .map(|(key, value)| (key, Nested { value, path })),
                )
                .finish()
        })
    }
}

//! The keyed, shared-reference container.

use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use super::Value;

/// A mutable mapping from string keys to [`Value`]s with reference semantics.
///
/// Like [`Sequence`](super::Sequence), cloning a `Mapping` copies the handle.
/// Entries are kept sorted by key so iteration and rendering are stable;
/// equality ignores insertion order.
#[derive(Clone, Default)]
pub struct Mapping(Rc<RefCell<BTreeMap<String, Value>>>);

impl Mapping {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Returns `true` if the mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Returns a handle to the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.borrow().contains_key(key)
    }

    /// Stores `value` under `key`, returning the value it replaced.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.borrow_mut().insert(key.into(), value.into())
    }

    /// Removes `key`, returning its value.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0.borrow_mut().remove(key)
    }

    /// Returns the keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().keys().cloned().collect()
    }

    /// Returns handles to every entry, sorted by key.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.0
            .borrow()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Returns `true` if both handles refer to the same container.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn id(&self) -> usize {
        Rc::as_ptr(&self.0).cast::<()>() as usize
    }

    pub(crate) fn borrow(&self) -> Ref<'_, BTreeMap<String, Value>> {
        self.0.borrow()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iterator: I) -> Self {
        let entries = iterator
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();
        Self(Rc::new(RefCell::new(entries)))
    }
}

impl From<BTreeMap<String, Value>> for Mapping {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self(Rc::new(RefCell::new(entries)))
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        Value::Mapping(self.clone()) == Value::Mapping(other.clone())
    }
}

impl std::fmt::Debug for Mapping {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&Value::Mapping(self.clone()), formatter)
    }
}

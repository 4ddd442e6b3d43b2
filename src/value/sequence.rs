//! The ordered, shared-reference container.

use std::cell::RefCell;
use std::rc::Rc;

use super::Value;

/// An ordered, mutable sequence of [`Value`]s with reference semantics.
///
/// Cloning a `Sequence` (or a [`Value`] holding one) copies the *handle*,
/// not the elements: both handles observe every later mutation. Use
/// [`structural_clone`](crate::clone::structural_clone) for an independent
/// copy.
///
/// # Examples
///
/// ```rust
/// use purefn::value::{Sequence, Value};
///
/// let scores = Sequence::from_iter([Value::from(11), Value::from(22)]);
/// let alias = scores.clone();
/// alias.push(33);
///
/// assert_eq!(scores.len(), 3);
/// assert!(scores.ptr_eq(&alias));
/// ```
#[derive(Clone, Default)]
pub struct Sequence(Rc<RefCell<Vec<Value>>>);

impl Sequence {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty sequence with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Rc::new(RefCell::new(Vec::with_capacity(capacity))))
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Returns `true` if the sequence has no elements.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Returns a handle to the element at `index`.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    /// Replaces the element at `index`, returning the previous one.
    ///
    /// Returns `None` and leaves the sequence unchanged if `index` is out of
    /// bounds.
    pub fn set(&self, index: usize, value: impl Into<Value>) -> Option<Value> {
        self.0
            .borrow_mut()
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, value.into()))
    }

    /// Appends an element.
    pub fn push(&self, value: impl Into<Value>) {
        self.0.borrow_mut().push(value.into());
    }

    /// Removes and returns the last element.
    pub fn pop(&self) -> Option<Value> {
        self.0.borrow_mut().pop()
    }

    /// Returns handles to every element, in order.
    ///
    /// The returned `Vec` is a snapshot: pushing to it does not change the
    /// sequence, but the nested containers it holds are still shared.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    /// Returns `true` if both handles refer to the same container.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn id(&self) -> usize {
        Rc::as_ptr(&self.0).cast::<()>() as usize
    }
}

impl FromIterator<Value> for Sequence {
    fn from_iter<I: IntoIterator<Item = Value>>(iterator: I) -> Self {
        Self(Rc::new(RefCell::new(iterator.into_iter().collect())))
    }
}

impl From<Vec<Value>> for Sequence {
    fn from(values: Vec<Value>) -> Self {
        Self(Rc::new(RefCell::new(values)))
    }
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        Value::Sequence(self.clone()) == Value::Sequence(other.clone())
    }
}

impl std::fmt::Debug for Sequence {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&Value::Sequence(self.clone()), formatter)
    }
}

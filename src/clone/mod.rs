//! Structural (deep) cloning.
//!
//! [`Value::clone`] copies handles, so a nested sequence or mapping stays
//! shared between the original and the copy. [`structural_clone`] allocates
//! a fresh container for every container it reaches, so that mutating the
//! copy is never observable through the original, at any depth.
//!
//! # Overview
//!
//! - [`structural_clone`]: Deep copy; no container is shared with the source
//! - [`shallow_clone`]: Fresh top-level container, nested values still shared
//! - [`StructuralClone`]: The deep copy as a trait, for values and the
//!   standard containers that hold them
//!
//! # Cycles and shared sub-containers
//!
//! The copy keeps a map from each source container to the container created
//! for it. A container reached a second time, whether through a cycle or
//! through two paths in the graph, is linked to its existing copy. The clone
//! therefore has the same shape as the source (a container that contains
//! itself is copied into a container that contains itself) and still shares
//! nothing with it.
//!
//! # Examples
//!
//! ```rust
//! use purefn::clone::structural_clone;
//! use purefn::value;
//!
//! let original = value!({"a": 1, "b": {"c": [1, 2, 3]}});
//! let copy = structural_clone(&original);
//! assert_eq!(copy, original);
//!
//! let nested = |root: &purefn::value::Value| {
//!     root.as_mapping().unwrap().get("b").unwrap().as_mapping().unwrap().get("c").unwrap()
//! };
//! nested(&copy).as_sequence().unwrap().push(4);
//!
//! assert_eq!(nested(&original), value!([1, 2, 3]));
//! assert_eq!(nested(&copy), value!([1, 2, 3, 4]));
//! ```

use std::collections::{BTreeMap, HashMap};

use crate::value::{Function, Mapping, Scalar, Sequence, Value};

/// Types that can produce a copy sharing no mutable container with `self`.
///
/// # Laws
///
/// - **Equality**: `x.structural_clone() == x`
/// - **Independence**: mutating `x.structural_clone()` never changes `x`, and
///   mutating `x` never changes a previously produced clone
pub trait StructuralClone {
    /// Returns the deep copy.
    #[must_use]
    fn structural_clone(&self) -> Self;
}

/// Deep-copies `value`.
///
/// Scalars are returned unchanged. Functions are not data and are copied by
/// reference. Every sequence and mapping is replaced by a freshly allocated
/// container of the same kind whose elements are cloned the same way.
pub fn structural_clone(value: &Value) -> Value {
    Cloner::default().clone_value(value)
}

/// Copies the top-level container of `value` and nothing below it.
///
/// This is the spread-operator copy: the result is a distinct container, but
/// every nested container is shared with the source.
///
/// ```rust
/// use purefn::clone::shallow_clone;
/// use purefn::value;
///
/// let original = value!([1, 2, [8, 9, 10]]);
/// let copy = shallow_clone(&original);
/// assert!(!copy.same_reference(&original));
///
/// let inner = copy.as_sequence().unwrap().get(2).unwrap();
/// inner.as_sequence().unwrap().push(5);
/// assert_eq!(original, value!([1, 2, [8, 9, 10, 5]]));
/// ```
pub fn shallow_clone(value: &Value) -> Value {
    match value {
        Value::Sequence(sequence) => Value::sequence(sequence.to_vec()),
        Value::Mapping(mapping) => Value::mapping(mapping.entries()),
        Value::Scalar(_) | Value::Function(_) => value.clone(),
    }
}

#[derive(Default)]
struct Cloner {
    sequences: HashMap<usize, Sequence>,
    mappings: HashMap<usize, Mapping>,
}

impl Cloner {
    fn clone_value(&mut self, value: &Value) -> Value {
        match value {
            Value::Scalar(scalar) => Value::Scalar(scalar.clone()),
            Value::Function(function) => Value::Function(function.clone()),
            Value::Sequence(sequence) => Value::Sequence(self.clone_sequence(sequence)),
            Value::Mapping(mapping) => Value::Mapping(self.clone_mapping(mapping)),
        }
    }

    fn clone_sequence(&mut self, source: &Sequence) -> Sequence {
        if let Some(copy) = self.sequences.get(&source.id()) {
            tracing::trace!("sequence already cloned; linking to its copy");
            return copy.clone();
        }

        // Registered before recursing so a cycle back to `source` finds it.
        let copy = Sequence::with_capacity(source.len());
        self.sequences.insert(source.id(), copy.clone());
        for element in source.to_vec() {
            copy.push(self.clone_value(&element));
        }
        copy
    }

    fn clone_mapping(&mut self, source: &Mapping) -> Mapping {
        if let Some(copy) = self.mappings.get(&source.id()) {
            tracing::trace!("mapping already cloned; linking to its copy");
            return copy.clone();
        }

        let copy = Mapping::new();
        self.mappings.insert(source.id(), copy.clone());
        for (key, entry) in source.entries() {
            copy.insert(key, self.clone_value(&entry));
        }
        copy
    }
}

// =============================================================================
// StructuralClone implementations
// =============================================================================

impl StructuralClone for Value {
    fn structural_clone(&self) -> Self {
        structural_clone(self)
    }
}

impl StructuralClone for Sequence {
    fn structural_clone(&self) -> Self {
        Cloner::default().clone_sequence(self)
    }
}

impl StructuralClone for Mapping {
    fn structural_clone(&self) -> Self {
        Cloner::default().clone_mapping(self)
    }
}

/// Functions are copied by reference.
impl StructuralClone for Function {
    fn structural_clone(&self) -> Self {
        self.clone()
    }
}

macro_rules! impl_structural_clone_by_value {
    ($($type:ty),*) => {
        $(
            impl StructuralClone for $type {
                #[inline]
                fn structural_clone(&self) -> Self {
                    self.clone()
                }
            }
        )*
    };
}

impl_structural_clone_by_value!(Scalar, bool, i64, f64, String);

/// Each element is cloned independently; containers shared between two
/// elements become two separate copies.
impl<T: StructuralClone> StructuralClone for Vec<T> {
    fn structural_clone(&self) -> Self {
        self.iter().map(StructuralClone::structural_clone).collect()
    }
}

impl<T: StructuralClone> StructuralClone for Option<T> {
    fn structural_clone(&self) -> Self {
        self.as_ref().map(StructuralClone::structural_clone)
    }
}

impl<T: StructuralClone> StructuralClone for BTreeMap<String, T> {
    fn structural_clone(&self) -> Self {
        self.iter()
            .map(|(key, value)| (key.clone(), value.structural_clone()))
            .collect()
    }
}

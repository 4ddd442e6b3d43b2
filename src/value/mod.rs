//! Dynamically typed values with reference-semantics containers.
//!
//! [`Value`] is a tagged sum over scalars, two kinds of mutable container
//! ([`Sequence`] and [`Mapping`]) and callable [`Function`]s. Scalars are
//! immutable and copied by value. Containers are shared handles: `clone`
//! produces another handle to the same storage, so a mutation through one
//! handle is visible through every other. This is exactly the aliasing that
//! [`structural_clone`](crate::clone::structural_clone) exists to break.
//!
//! # Examples
//!
//! ```rust
//! use purefn::value;
//! use purefn::value::Value;
//!
//! let x_array = value!([1, 2, 3]);
//! let y_array = x_array.clone();
//! y_array.as_sequence().unwrap().push(4);
//!
//! // Both handles see the push.
//! assert_eq!(x_array, value!([1, 2, 3, 4]));
//! assert!(x_array.same_reference(&y_array));
//! ```
//!
//! # Equality
//!
//! `==` is structural: two containers are equal when their contents are,
//! wherever they live. Functions are only equal to themselves. Comparison
//! terminates on cyclic values.

mod function;
mod mapping;
mod sequence;
#[cfg(feature = "serde")]
mod serialization;

use std::collections::HashSet;
use std::fmt;

pub use function::{Function, compose, curry, pipe};
pub use mapping::Mapping;
pub use sequence::Sequence;

/// An immutable primitive value.
#[derive(Debug, Clone)]
pub enum Scalar {
    /// The absent value.
    Undefined,
    /// The explicit empty value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Integer(i64),
    /// A floating point number.
    ///
    /// Compared by same-value semantics rather than IEEE `==`: every NaN
    /// equals every other NaN, and `0.0` differs from `-0.0`. This keeps
    /// equality reflexive, so a value holding NaN equals its own clone.
    Float(f64),
    /// A string.
    Text(String),
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Integer(left), Self::Integer(right)) => left == right,
            (Self::Float(left), Self::Float(right)) => {
                (left.is_nan() && right.is_nan()) || left.to_bits() == right.to_bits()
            }
            (Self::Text(left), Self::Text(right)) => left == right,
            _ => false,
        }
    }
}

impl Eq for Scalar {}

/// The runtime tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// [`Scalar::Undefined`]
    Undefined,
    /// [`Scalar::Null`]
    Null,
    /// [`Scalar::Bool`]
    Bool,
    /// [`Scalar::Integer`]
    Integer,
    /// [`Scalar::Float`]
    Float,
    /// [`Scalar::Text`]
    Text,
    /// [`Value::Sequence`]
    Sequence,
    /// [`Value::Mapping`]
    Mapping,
    /// [`Value::Function`]
    Function,
}

impl fmt::Display for Kind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
            Self::Function => "function",
        };
        formatter.write_str(name)
    }
}

/// A dynamically typed value.
#[derive(Clone)]
pub enum Value {
    /// An immutable primitive.
    Scalar(Scalar),
    /// An ordered container.
    Sequence(Sequence),
    /// A keyed container.
    Mapping(Mapping),
    /// A callable. Copied by reference, never deep-cloned.
    Function(Function),
}

impl Value {
    /// The absent value.
    pub const fn undefined() -> Self {
        Self::Scalar(Scalar::Undefined)
    }

    /// The explicit empty value.
    pub const fn null() -> Self {
        Self::Scalar(Scalar::Null)
    }

    /// Creates a fresh sequence holding `values`.
    pub fn sequence<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::Sequence(values.into_iter().collect())
    }

    /// Creates a fresh mapping holding `entries`.
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Self)>,
    {
        Self::Mapping(entries.into_iter().collect())
    }

    /// Returns the runtime tag.
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Scalar(Scalar::Undefined) => Kind::Undefined,
            Self::Scalar(Scalar::Null) => Kind::Null,
            Self::Scalar(Scalar::Bool(_)) => Kind::Bool,
            Self::Scalar(Scalar::Integer(_)) => Kind::Integer,
            Self::Scalar(Scalar::Float(_)) => Kind::Float,
            Self::Scalar(Scalar::Text(_)) => Kind::Text,
            Self::Sequence(_) => Kind::Sequence,
            Self::Mapping(_) => Kind::Mapping,
            Self::Function(_) => Kind::Function,
        }
    }

    /// Returns `true` for sequences and mappings.
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Sequence(_) | Self::Mapping(_))
    }

    /// Returns the scalar, if this is one.
    pub const fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Returns the integer, if this is one.
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Scalar(Scalar::Integer(integer)) => Some(*integer),
            _ => None,
        }
    }

    /// Returns the number as `f64`, for integers and floats.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Scalar(Scalar::Integer(integer)) => Some(*integer as f64),
            Self::Scalar(Scalar::Float(float)) => Some(*float),
            _ => None,
        }
    }

    /// Returns the text, if this is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Returns the sequence handle, if this is one.
    pub const fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Self::Sequence(sequence) => Some(sequence),
            _ => None,
        }
    }

    /// Returns the mapping handle, if this is one.
    pub const fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// Returns the function handle, if this is one.
    pub const fn as_function(&self) -> Option<&Function> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Returns `true` if both values are the same container or function.
    ///
    /// Scalars have no identity and always report `false`.
    pub fn same_reference(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Sequence(left), Self::Sequence(right)) => left.ptr_eq(right),
            (Self::Mapping(left), Self::Mapping(right)) => left.ptr_eq(right),
            (Self::Function(left), Self::Function(right)) => left.ptr_eq(right),
            _ => false,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::undefined()
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Scalar(Scalar::Bool(value))
    }
}

macro_rules! impl_from_integer {
    ($($integer:ty),*) => {
        $(
            impl From<$integer> for Value {
                fn from(value: $integer) -> Self {
                    Self::Scalar(Scalar::Integer(i64::from(value)))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Scalar(Scalar::Float(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Scalar(Scalar::Text(value.to_owned()))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Scalar(Scalar::Text(value))
    }
}

impl From<Sequence> for Value {
    fn from(sequence: Sequence) -> Self {
        Self::Sequence(sequence)
    }
}

impl From<Mapping> for Value {
    fn from(mapping: Mapping) -> Self {
        Self::Mapping(mapping)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::sequence(values.into_iter().map(Into::into))
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Self::null, Into::into)
    }
}

/// Builds a [`Value`] from a JSON-like literal.
///
/// Each element is a single token tree: a literal, an identifier, a nested
/// `[...]` / `{...}`, or a parenthesized expression such as `(-1)`.
/// `null` and `undefined` are recognized as keywords.
///
/// ```rust
/// use purefn::value;
///
/// let score = value!({"first": 11, "third": {"a": 1, "b": [1, 2, (-3)]}, "none": null});
/// let third = score.as_mapping().unwrap().get("third").unwrap();
/// assert_eq!(third, value!({"a": 1, "b": [1, 2, (-3)]}));
/// ```
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::value::Value::null()
    };
    (undefined) => {
        $crate::value::Value::undefined()
    };
    ([]) => {
        $crate::value::Value::Sequence($crate::value::Sequence::new())
    };
    ([ $($element:tt),+ $(,)? ]) => {
        $crate::value::Value::sequence([ $( $crate::value!($element) ),+ ])
    };
    ({}) => {
        $crate::value::Value::Mapping($crate::value::Mapping::new())
    };
    ({ $($key:literal : $item:tt),+ $(,)? }) => {
        $crate::value::Value::mapping([ $( ($key, $crate::value!($item)) ),+ ])
    };
    ($other:expr) => {
        $crate::value::Value::from($other)
    };
}

// =============================================================================
// Equality
// =============================================================================

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        structurally_equal(self, other, &mut HashSet::new())
    }
}

/// Pairs already under comparison are assumed equal, which makes comparison
/// of cyclic values terminate.
fn structurally_equal(left: &Value, right: &Value, visiting: &mut HashSet<(usize, usize)>) -> bool {
    match (left, right) {
        (Value::Scalar(left), Value::Scalar(right)) => left == right,
        (Value::Function(left), Value::Function(right)) => left.ptr_eq(right),
        (Value::Sequence(left), Value::Sequence(right)) => {
            if !visiting.insert((left.id(), right.id())) {
                return true;
            }
            let (left, right) = (left.to_vec(), right.to_vec());
            left.len() == right.len()
                && left
                    .iter()
                    .zip(&right)
                    .all(|(left, right)| structurally_equal(left, right, visiting))
        }
        (Value::Mapping(left), Value::Mapping(right)) => {
            if !visiting.insert((left.id(), right.id())) {
                return true;
            }
            let (left, right) = (left.borrow(), right.borrow());
            left.len() == right.len()
                && left.iter().all(|(key, left)| {
                    right
                        .get(key)
                        .is_some_and(|right| structurally_equal(left, right, visiting))
                })
        }
        _ => false,
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Renders values the way a console would, printing `[Circular]` for a
/// container that is already being rendered further up.
struct Render<'a> {
    value: &'a Value,
    quote_text: bool,
}

impl Render<'_> {
    fn write(
        &self,
        value: &Value,
        quote_text: bool,
        ancestors: &mut Vec<usize>,
        formatter: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match value {
            Value::Scalar(Scalar::Undefined) => formatter.write_str("undefined"),
            Value::Scalar(Scalar::Null) => formatter.write_str("null"),
            Value::Scalar(Scalar::Bool(flag)) => write!(formatter, "{flag}"),
            Value::Scalar(Scalar::Integer(integer)) => write!(formatter, "{integer}"),
            Value::Scalar(Scalar::Float(float)) => write!(formatter, "{float}"),
            Value::Scalar(Scalar::Text(text)) if quote_text => write!(formatter, "{text:?}"),
            Value::Scalar(Scalar::Text(text)) => formatter.write_str(text),
            Value::Function(function) => write!(formatter, "[Function/{}]", function.arity()),
            Value::Sequence(sequence) => {
                if ancestors.contains(&sequence.id()) {
                    return formatter.write_str("[Circular]");
                }
                ancestors.push(sequence.id());
                formatter.write_str("[")?;
                for (index, element) in sequence.to_vec().iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(", ")?;
                    }
                    self.write(element, true, ancestors, formatter)?;
                }
                ancestors.pop();
                formatter.write_str("]")
            }
            Value::Mapping(mapping) => {
                if ancestors.contains(&mapping.id()) {
                    return formatter.write_str("[Circular]");
                }
                ancestors.push(mapping.id());
                formatter.write_str("{")?;
                for (index, (key, entry)) in mapping.entries().iter().enumerate() {
                    formatter.write_str(if index > 0 { ", " } else { " " })?;
                    write!(formatter, "{key}: ")?;
                    self.write(entry, true, ancestors, formatter)?;
                }
                ancestors.pop();
                formatter.write_str(if mapping.is_empty() { "}" } else { " }" })
            }
        }
    }
}

impl fmt::Display for Render<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(self.value, self.quote_text, &mut Vec::new(), formatter)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let render = Render {
            value: self,
            quote_text: false,
        };
        fmt::Display::fmt(&render, formatter)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let render = Render {
            value: self,
            quote_text: true,
        };
        fmt::Display::fmt(&render, formatter)
    }
}

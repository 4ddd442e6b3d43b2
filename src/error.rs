//! Error type shared by the combinators and the dynamic value layer.
//!
//! Failures are reported eagerly where the mistake is made: a variadic
//! function is rejected when it is curried, and a non-function stage is
//! rejected when the pipeline is built. A failure raised by a stage while a
//! pipeline runs is never translated; it reaches the caller unchanged.

use crate::compose::Arity;

#[cfg(feature = "value")]
use crate::value::{Kind, Value};

/// Represents errors raised by `purefn`.
///
/// # Examples
///
/// ```rust
/// use purefn::Error;
/// use purefn::compose::Arity;
///
/// let error = Error::ArityMismatch {
///     expected: Arity::Fixed(2),
///     received: 3,
/// };
/// assert_eq!(
///     format!("{error}"),
///     "arity mismatch: expected 2 argument(s), received 3"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A function was given an argument count it cannot accept, or a
    /// variadic function was curried.
    ArityMismatch {
        /// The arity the function declares (or still awaits).
        expected: Arity,
        /// The number of arguments that were supplied.
        received: usize,
    },
    /// A curried application was asked for its result before every argument
    /// was supplied.
    Incomplete {
        /// The number of arguments still awaited.
        remaining: usize,
    },
    /// A pipeline was built from a value that is not callable.
    #[cfg(feature = "value")]
    NonFunctionArgument {
        /// Zero-based position of the offending value in the stage list.
        position: usize,
        /// The kind of value found at that position.
        kind: Kind,
    },
    /// A dynamic function body failed with a raised value.
    #[cfg(feature = "value")]
    Raised(Value),
}

impl Error {
    /// Creates an [`Error::Raised`] carrying `value`.
    ///
    /// ```rust
    /// use purefn::Error;
    /// use purefn::value::Value;
    ///
    /// let error = Error::raise("boom");
    /// assert_eq!(error, Error::Raised(Value::from("boom")));
    /// ```
    #[cfg(feature = "value")]
    pub fn raise(value: impl Into<Value>) -> Self {
        Self::Raised(value.into())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ArityMismatch { expected, received } => write!(
                formatter,
                "arity mismatch: expected {expected} argument(s), received {received}"
            ),
            Self::Incomplete { remaining } => write!(
                formatter,
                "incomplete application: {remaining} argument(s) still awaited"
            ),
            #[cfg(feature = "value")]
            Self::NonFunctionArgument { position, kind } => write!(
                formatter,
                "non-function argument at position {position}: found {kind}"
            ),
            #[cfg(feature = "value")]
            Self::Raised(value) => write!(formatter, "raised: {value}"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_mismatch_display_variadic() {
        let error = Error::ArityMismatch {
            expected: Arity::Variadic,
            received: 0,
        };
        assert_eq!(
            format!("{error}"),
            "arity mismatch: expected variadic argument(s), received 0"
        );
    }

    #[test]
    fn test_incomplete_display() {
        let error = Error::Incomplete { remaining: 2 };
        assert_eq!(
            format!("{error}"),
            "incomplete application: 2 argument(s) still awaited"
        );
    }

    #[cfg(feature = "value")]
    #[test]
    fn test_non_function_argument_display() {
        let error = Error::NonFunctionArgument {
            position: 1,
            kind: Kind::Sequence,
        };
        assert_eq!(
            format!("{error}"),
            "non-function argument at position 1: found sequence"
        );
    }

    #[cfg(feature = "value")]
    #[test]
    fn test_raised_display_uses_value_display() {
        let error = Error::raise(42);
        assert_eq!(format!("{error}"), "raised: 42");
    }

    #[test]
    fn test_error_source_is_none() {
        use std::error::Error as _;

        let error = Error::Incomplete { remaining: 1 };
        assert!(error.source().is_none());
    }

    #[test]
    fn test_error_equality() {
        let first = Error::ArityMismatch {
            expected: Arity::Fixed(1),
            received: 2,
        };
        let second = first.clone();
        assert_eq!(first, second);
        assert_ne!(first, Error::Incomplete { remaining: 1 });
    }
}

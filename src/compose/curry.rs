//! Runtime-arity currying.
//!
//! Rust cannot recover the parameter count of an opaque callable, so the
//! caller declares it with an [`Arity`] when currying. The curried form
//! collects arguments in groups of any size and invokes the underlying
//! function once the declared count has been reached.
//!
//! # Design Decisions
//!
//! Every partial application owns its own argument accumulator. Applying an
//! argument group copies the captured arguments into a fresh [`Curried`]
//! instead of pushing onto a shared buffer, so one partial can be applied
//! any number of times with different remaining arguments. The underlying
//! function is shared behind an [`Rc`] and never mutated.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crate::Error;

/// The declared parameter count of a function.
///
/// # Examples
///
/// ```rust
/// use purefn::compose::Arity;
///
/// assert!(Arity::Fixed(2).accepts(2));
/// assert!(!Arity::Fixed(2).accepts(1));
/// assert!(Arity::Variadic.accepts(7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// Exactly this many parameters.
    Fixed(usize),
    /// Any number of parameters. Variadic functions cannot be curried.
    Variadic,
}

impl Arity {
    /// Returns `true` if a call with `count` arguments satisfies this arity.
    #[inline]
    pub const fn accepts(self, count: usize) -> bool {
        match self {
            Self::Fixed(expected) => expected == count,
            Self::Variadic => true,
        }
    }

    /// Returns `true` for [`Arity::Variadic`].
    #[inline]
    pub const fn is_variadic(self) -> bool {
        matches!(self, Self::Variadic)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(count) => write!(formatter, "{count}"),
            Self::Variadic => formatter.write_str("variadic"),
        }
    }
}

/// A function waiting for the rest of its arguments.
///
/// Created by [`curry`]. Each call to [`Curried::apply`] returns a new value
/// and leaves `self` untouched.
pub struct Curried<T, R> {
    function: Rc<dyn Fn(Vec<T>) -> R>,
    arity: usize,
    captured: Vec<T>,
}

impl<T, R> Curried<T, R> {
    /// The total number of arguments the underlying function takes.
    #[inline]
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// The number of arguments still awaited.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.arity - self.captured.len()
    }

    /// The arguments captured so far, in call order.
    #[inline]
    pub fn captured(&self) -> &[T] {
        &self.captured
    }
}

impl<T: Clone, R> Curried<T, R> {
    /// Supplies a group of arguments.
    ///
    /// Returns [`Applied::Partial`] while arguments are still missing and
    /// [`Applied::Complete`] once the function has been invoked. Supplying
    /// more arguments than [`remaining`](Self::remaining) fails with
    /// [`Error::ArityMismatch`] without invoking the function.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArityMismatch`] if the group holds more arguments
    /// than are still awaited.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use purefn::compose::{Arity, curry};
    ///
    /// let total = curry(Arity::Fixed(3), |arguments: Vec<i32>| arguments.iter().sum::<i32>())
    ///     .unwrap()
    ///     .into_partial()
    ///     .unwrap();
    ///
    /// let with_ten = total.apply([10]).unwrap();
    /// assert_eq!(with_ten.apply([20, 30]).unwrap().complete().unwrap(), 60);
    /// assert_eq!(with_ten.apply([1, 2]).unwrap().complete().unwrap(), 13);
    /// ```
    pub fn apply<I>(&self, arguments: I) -> Result<Applied<T, R>, Error>
    where
        I: IntoIterator<Item = T>,
    {
        let mut captured = self.captured.clone();
        captured.extend(arguments);
        let received = captured.len() - self.captured.len();

        match captured.len().cmp(&self.arity) {
            Ordering::Less => {
                tracing::trace!(
                    arity = self.arity,
                    captured = captured.len(),
                    "curried function partially applied"
                );
                Ok(Applied::Partial(Self {
                    function: Rc::clone(&self.function),
                    arity: self.arity,
                    captured,
                }))
            }
            Ordering::Equal => {
                tracing::trace!(arity = self.arity, "curried function saturated");
                Ok(Applied::Complete((self.function)(captured)))
            }
            Ordering::Greater => Err(Error::ArityMismatch {
                expected: Arity::Fixed(self.remaining()),
                received,
            }),
        }
    }

    /// Supplies a single argument. Equivalent to `apply([argument])`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArityMismatch`] if no argument is awaited.
    pub fn apply_one(&self, argument: T) -> Result<Applied<T, R>, Error> {
        self.apply(std::iter::once(argument))
    }
}

impl<T: Clone, R> Clone for Curried<T, R> {
    fn clone(&self) -> Self {
        Self {
            function: Rc::clone(&self.function),
            arity: self.arity,
            captured: self.captured.clone(),
        }
    }
}

impl<T: fmt::Debug, R> fmt::Debug for Curried<T, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Curried")
            .field("arity", &self.arity)
            .field("captured", &self.captured)
            .finish_non_exhaustive()
    }
}

/// The outcome of supplying arguments to a curried function.
#[derive(Debug, Clone)]
pub enum Applied<T, R> {
    /// More arguments are needed.
    Partial(Curried<T, R>),
    /// The function was invoked and produced this result.
    Complete(R),
}

impl<T: Clone, R> Applied<T, R> {
    /// Continues the application chain.
    ///
    /// A [`Applied::Complete`] value takes no further arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArityMismatch`] when applied to a complete value, or
    /// when the group holds more arguments than are still awaited.
    pub fn apply<I>(&self, arguments: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>,
    {
        match self {
            Self::Partial(curried) => curried.apply(arguments),
            Self::Complete(_) => Err(Error::ArityMismatch {
                expected: Arity::Fixed(0),
                received: arguments.into_iter().count(),
            }),
        }
    }
}

impl<T, R> Applied<T, R> {
    /// Returns `true` if the function has been invoked.
    #[inline]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    /// Extracts the result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Incomplete`] if arguments are still missing.
    pub fn complete(self) -> Result<R, Error> {
        match self {
            Self::Complete(result) => Ok(result),
            Self::Partial(curried) => Err(Error::Incomplete {
                remaining: curried.remaining(),
            }),
        }
    }

    /// Extracts the pending [`Curried`] value, if any.
    pub fn into_partial(self) -> Option<Curried<T, R>> {
        match self {
            Self::Partial(curried) => Some(curried),
            Self::Complete(_) => None,
        }
    }
}

/// Curries `function`, which receives its complete argument list as a `Vec`.
///
/// - [`Arity::Fixed(0)`](Arity::Fixed): there is nothing to wait for, so the
///   function is invoked immediately and [`Applied::Complete`] is returned.
/// - [`Arity::Fixed(n)`](Arity::Fixed) with `n > 0`: returns
///   [`Applied::Partial`] with no captured arguments.
/// - [`Arity::Variadic`]: fails with [`Error::ArityMismatch`], since there is
///   no point at which the argument list is known to be complete.
///
/// # Errors
///
/// Returns [`Error::ArityMismatch`] for [`Arity::Variadic`].
///
/// # Examples
///
/// ```rust
/// use purefn::compose::{Arity, curry};
///
/// let total = |arguments: Vec<i32>| arguments.iter().sum::<i32>();
/// let curried = curry(Arity::Fixed(3), total).unwrap();
///
/// let one_at_a_time = curried.apply([10]).unwrap().apply([20]).unwrap().apply([30]).unwrap();
/// assert_eq!(one_at_a_time.complete().unwrap(), 60);
///
/// let grouped = curried.apply([10, 20]).unwrap().apply([30]).unwrap();
/// assert_eq!(grouped.complete().unwrap(), 60);
/// ```
pub fn curry<T, R, F>(arity: Arity, function: F) -> Result<Applied<T, R>, Error>
where
    F: Fn(Vec<T>) -> R + 'static,
{
    match arity {
        Arity::Variadic => Err(Error::ArityMismatch {
            expected: Arity::Variadic,
            received: 0,
        }),
        Arity::Fixed(0) => {
            tracing::trace!("nullary function curried; invoking immediately");
            Ok(Applied::Complete(function(Vec::new())))
        }
        Arity::Fixed(count) => Ok(Applied::Partial(Curried {
            function: Rc::new(function),
            arity: count,
            captured: Vec::with_capacity(count),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn total(arguments: Vec<i32>) -> i32 {
        arguments.iter().sum()
    }

    #[test]
    fn test_curry_one_at_a_time() {
        let curried = curry(Arity::Fixed(3), total).unwrap();
        let result = curried
            .apply([10])
            .and_then(|applied| applied.apply([20]))
            .and_then(|applied| applied.apply([30]))
            .and_then(Applied::complete);
        assert_eq!(result, Ok(60));
    }

    #[test]
    fn test_curry_preserves_argument_order() {
        let concat = |arguments: Vec<&str>| arguments.concat();
        let curried = curry(Arity::Fixed(3), concat).unwrap();
        let result = curried.apply(["a", "b"]).unwrap().apply(["c"]).unwrap();
        assert_eq!(result.complete().unwrap(), "abc");
    }

    #[test]
    fn test_curry_variadic_rejected() {
        let result = curry(Arity::Variadic, total);
        assert!(matches!(
            result,
            Err(Error::ArityMismatch {
                expected: Arity::Variadic,
                ..
            })
        ));
    }

    #[test]
    fn test_curry_nullary_invokes_immediately() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let applied = curry(Arity::Fixed(0), move |_: Vec<()>| {
            counter.set(counter.get() + 1);
            "done"
        })
        .unwrap();
        assert_eq!(calls.get(), 1);
        assert!(applied.is_complete());
        assert_eq!(applied.complete(), Ok("done"));
    }

    #[test]
    fn test_over_application_rejected_without_invoking() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let curried = curry(Arity::Fixed(2), move |arguments: Vec<i32>| {
            counter.set(counter.get() + 1);
            arguments.len()
        })
        .unwrap();
        let result = curried.apply([1]).unwrap().apply([2, 3]);
        assert_eq!(
            result.unwrap_err(),
            Error::ArityMismatch {
                expected: Arity::Fixed(1),
                received: 2,
            }
        );
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_apply_to_complete_is_mismatch() {
        let applied = curry(Arity::Fixed(1), total).unwrap().apply([1]).unwrap();
        assert!(matches!(
            applied.apply([2]),
            Err(Error::ArityMismatch { received: 1, .. })
        ));
    }

    #[test]
    fn test_complete_on_partial_reports_remaining() {
        let applied = curry(Arity::Fixed(4), total).unwrap().apply([1]).unwrap();
        assert_eq!(applied.complete(), Err(Error::Incomplete { remaining: 3 }));
    }

    #[test]
    fn test_partial_reuse_is_independent() {
        let partial = curry(Arity::Fixed(2), total)
            .unwrap()
            .apply([5])
            .unwrap()
            .into_partial()
            .unwrap();
        let first = partial.apply_one(1).unwrap();
        let second = partial.apply_one(100).unwrap();
        assert_eq!(first.complete(), Ok(6));
        assert_eq!(second.complete(), Ok(105));
        assert_eq!(partial.captured(), &[5]);
        assert_eq!(partial.remaining(), 1);
    }

    #[test]
    fn test_empty_group_keeps_waiting() {
        let partial = curry(Arity::Fixed(2), total).unwrap();
        let still_partial = partial.apply(std::iter::empty()).unwrap();
        assert!(!still_partial.is_complete());
        assert_eq!(still_partial.into_partial().unwrap().remaining(), 2);
    }

    #[test]
    fn test_debug_hides_function() {
        let partial = curry(Arity::Fixed(2), total)
            .unwrap()
            .apply([7])
            .unwrap()
            .into_partial()
            .unwrap();
        let rendered = format!("{partial:?}");
        assert!(rendered.contains("arity: 2"));
        assert!(rendered.contains("captured: [7]"));
    }
}

//! Helper combinators shared by the composition macros.

/// Returns the value unchanged.
///
/// The identity function is the unit of composition, and it is what an empty
/// [`pipe!`](crate::pipe!) or [`compose!`](crate::compose!) evaluates to.
///
/// # Examples
///
/// ```
/// use purefn::compose::identity;
///
/// assert_eq!(identity(42), 42);
/// assert_eq!(identity(vec![1, 2, 3]), vec![1, 2, 3]);
/// ```
#[inline]
pub fn identity<T>(value: T) -> T {
    value
}

//! The `pipe!` macro for left-to-right function composition.

/// Composes functions from left to right.
///
/// `pipe!(f, g, h)(x)` is equivalent to `h(g(f(x)))`. This is the data-flow
/// reading of [`compose!`](crate::compose!): `pipe!(f, g, h)` behaves like
/// `compose!(h, g, f)`.
///
/// # Syntax
///
/// - `pipe!()` - The [`identity`](crate::compose::identity) function
/// - `pipe!(f)` - `f` itself
/// - `pipe!(f, g, ...)` - `|x| ...(g(f(x)))`
///
/// The returned closure can be stored and called any number of times.
///
/// # Examples
///
/// ```
/// use purefn::pipe;
///
/// let add_two = |x: i32| x + 2;
/// let subtract_one = |x: i32| x - 1;
/// let multiply_by_five = |x: i32| x * 5;
///
/// let piped = pipe!(add_two, subtract_one, multiply_by_five);
/// assert_eq!(piped(4), 25);
/// ```
///
/// ## Nested pipelines
///
/// ```
/// use purefn::pipe;
///
/// let strip_spaces = |text: &str| text.split(' ').collect::<String>();
/// let lower = |text: String| text.to_lowercase();
/// let forwards = pipe!(strip_spaces, lower);
///
/// let reverse = |text: String| text.chars().rev().collect::<String>();
/// let backwards = pipe!(&forwards, reverse);
///
/// assert_eq!(forwards("taco cat"), backwards("taco cat"));
/// assert_ne!(forwards("Foo"), backwards("Foo"));
/// ```
#[macro_export]
macro_rules! pipe {
    () => {
        $crate::compose::identity
    };

    ($function:expr $(,)?) => {
        $function
    };

    // pipe!(f, g, h, ...) = pipe!(g, h, ...) after f
    ($first_function:expr, $($remaining_functions:expr),+ $(,)?) => {{
        let first = $first_function;
        let rest = $crate::pipe!($($remaining_functions),+);
        move |input| rest(first(input))
    }};
}

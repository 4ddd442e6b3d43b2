//! The `compose!` macro for right-to-left function composition.

/// Composes functions from right to left.
///
/// `compose!(f, g, h)(x)` is equivalent to `f(g(h(x)))`: the rightmost
/// function runs first, matching nested call notation.
///
/// # Syntax
///
/// - `compose!()` - The [`identity`](crate::compose::identity) function
/// - `compose!(f)` - `f` itself
/// - `compose!(f, g, ...)` - `|x| f(g(...(x)))`
///
/// Every function must be unary. A function that needs extra parameters has
/// to be partially applied (for instance by capturing them in a closure)
/// before it is composed.
///
/// # Laws
///
/// - **Associativity**: `compose!(f, compose!(g, h)) == compose!(compose!(f, g), h)`
/// - **Identity**: `compose!(identity, f) == f == compose!(f, identity)`
///
/// # Examples
///
/// ```
/// use purefn::compose;
///
/// let add_two = |x: i32| x + 2;
/// let subtract_one = |x: i32| x - 1;
/// let multiply_by_five = |x: i32| x * 5;
///
/// // multiply_by_five(subtract_one(add_two(4)))
/// let composed = compose!(multiply_by_five, subtract_one, add_two);
/// assert_eq!(composed(4), 25);
/// ```
///
/// ## Zero functions
///
/// ```
/// use purefn::compose;
///
/// let nothing = compose!();
/// assert_eq!(nothing("unchanged"), "unchanged");
/// ```
#[macro_export]
macro_rules! compose {
    () => {
        $crate::compose::identity
    };

    ($function:expr $(,)?) => {
        $function
    };

    // compose!(f, g, h, ...) = compose!(f, compose!(g, h, ...))
    ($outer_function:expr, $($remaining_functions:expr),+ $(,)?) => {{
        let outer = $outer_function;
        let inner = $crate::compose!($($remaining_functions),+);
        move |input| outer(inner(input))
    }};
}

//! Dynamically typed functions and the combinators that operate on them.
//!
//! A [`Function`] carries its declared [`Arity`] next to its body, standing
//! in for the runtime parameter count a dynamic language would inspect.
//! [`curry`], [`pipe`] and [`compose`] are built on the typed combinators in
//! [`crate::compose`], with [`Value`] as the argument type and
//! [`Error::Raised`] as the failure channel.

use std::fmt;
use std::rc::Rc;

use super::Value;
use crate::Error;
use crate::compose::{self, Applied, Arity, Curried};

type Body = dyn Fn(Vec<Value>) -> Result<Value, Error>;

enum Callable {
    Native { arity: Arity, body: Box<Body> },
    Curried(Curried<Value, Result<Value, Error>>),
}

/// A callable value with a declared arity.
///
/// Cloning a `Function` copies the handle; two handles are equal only if
/// they refer to the same function.
///
/// # Examples
///
/// ```rust
/// use purefn::compose::Arity;
/// use purefn::value::{Function, Value};
///
/// let add = Function::new(Arity::Fixed(2), |arguments| {
///     let sum: i64 = arguments.iter().filter_map(Value::as_integer).sum();
///     Ok(Value::from(sum))
/// });
///
/// assert_eq!(add.call(vec![Value::from(2), Value::from(3)]), Ok(Value::from(5)));
/// assert!(add.call(vec![Value::from(2)]).is_err());
/// ```
#[derive(Clone)]
pub struct Function(Rc<Callable>);

impl Function {
    /// Creates a function from its arity and body.
    ///
    /// The body receives exactly as many arguments as a
    /// [`Fixed`](Arity::Fixed) arity declares; [`call`](Self::call) rejects
    /// any other count before the body runs.
    pub fn new<F>(arity: Arity, body: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Value, Error> + 'static,
    {
        Self(Rc::new(Callable::Native {
            arity,
            body: Box::new(body),
        }))
    }

    /// Creates a function of one argument.
    ///
    /// ```rust
    /// use purefn::value::{Function, Value};
    ///
    /// let add_two = Function::unary(|x| Ok(Value::from(x.as_integer().unwrap_or(0) + 2)));
    /// assert_eq!(add_two.call_one(Value::from(4)), Ok(Value::from(6)));
    /// ```
    pub fn unary<F>(body: F) -> Self
    where
        F: Fn(Value) -> Result<Value, Error> + 'static,
    {
        Self::new(Arity::Fixed(1), move |arguments| {
            body(arguments.into_iter().next().unwrap_or_default())
        })
    }

    fn from_curried(curried: Curried<Value, Result<Value, Error>>) -> Self {
        Self(Rc::new(Callable::Curried(curried)))
    }

    /// The number of arguments this function still expects.
    ///
    /// For a partially applied curried function this is the count still
    /// awaited, not the original arity.
    pub fn arity(&self) -> Arity {
        match self.0.as_ref() {
            Callable::Native { arity, .. } => *arity,
            Callable::Curried(curried) => Arity::Fixed(curried.remaining()),
        }
    }

    /// Calls the function.
    ///
    /// A plain function must receive exactly its declared arity. A curried
    /// function accepts any count up to the number it still awaits and
    /// returns a partially applied [`Value::Function`] until it is complete.
    ///
    /// # Errors
    ///
    /// - [`Error::ArityMismatch`] if the argument count is not accepted.
    /// - Any error returned by the body, unchanged.
    pub fn call(&self, arguments: Vec<Value>) -> Result<Value, Error> {
        match self.0.as_ref() {
            Callable::Native { arity, body } => {
                if !arity.accepts(arguments.len()) {
                    return Err(Error::ArityMismatch {
                        expected: *arity,
                        received: arguments.len(),
                    });
                }
                body(arguments)
            }
            Callable::Curried(curried) => match curried.apply(arguments)? {
                Applied::Partial(partial) => Ok(Value::Function(Self::from_curried(partial))),
                Applied::Complete(result) => result,
            },
        }
    }

    /// Calls the function with a single argument.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub fn call_one(&self, argument: impl Into<Value>) -> Result<Value, Error> {
        self.call(vec![argument.into()])
    }

    /// Returns `true` if both handles refer to the same function.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = formatter.debug_struct("Function");
        debug.field("arity", &self.arity());
        if let Callable::Curried(curried) = self.0.as_ref() {
            debug.field("captured", &curried.captured());
        }
        debug.finish_non_exhaustive()
    }
}

/// Curries a dynamic function.
///
/// For an arity of one or more, returns a [`Value::Function`] that collects
/// arguments across calls and invokes `function` once all of them have been
/// supplied. Each partial application is independent of the others.
///
/// A nullary function has nothing to wait for and is invoked immediately;
/// its result is returned instead of a function. A variadic function fails
/// with [`Error::ArityMismatch`].
///
/// # Errors
///
/// - [`Error::ArityMismatch`] if `function` is variadic.
/// - For a nullary function, any error its body returns.
///
/// # Examples
///
/// ```rust
/// use purefn::compose::Arity;
/// use purefn::value::{self, Function, Value};
///
/// let total = Function::new(Arity::Fixed(3), |arguments| {
///     Ok(Value::from(arguments.iter().filter_map(Value::as_integer).sum::<i64>()))
/// });
///
/// let curried = value::curry(&total).unwrap();
/// let step = |value: Value, argument: i64| {
///     value.as_function().unwrap().call_one(argument).unwrap()
/// };
///
/// let result = step(step(step(curried, 10), 20), 30);
/// assert_eq!(result, Value::from(60));
/// ```
pub fn curry(function: &Function) -> Result<Value, Error> {
    let target = function.clone();
    match compose::curry(function.arity(), move |arguments| target.call(arguments))? {
        Applied::Partial(curried) => Ok(Value::Function(Function::from_curried(curried))),
        Applied::Complete(result) => result,
    }
}

/// Builds a function that passes its argument through `stages` left to right.
///
/// Every stage must be a [`Value::Function`] that accepts one argument; the
/// list is checked here, before anything runs, so a bad stage is reported
/// where the pipeline is assembled. With no stages the result is the
/// identity.
///
/// # Errors
///
/// - [`Error::NonFunctionArgument`] if a stage is not a function.
/// - [`Error::ArityMismatch`] if a stage cannot be called with one argument.
///
/// # Examples
///
/// ```rust
/// use purefn::value::{self, Function, Value};
///
/// let number = |value: &Value| value.as_integer().unwrap_or(0);
/// let add_two = Function::unary(move |x| Ok(Value::from(number(&x) + 2)));
/// let subtract_one = Function::unary(move |x| Ok(Value::from(number(&x) - 1)));
/// let multiply_by_five = Function::unary(move |x| Ok(Value::from(number(&x) * 5)));
///
/// let pipeline = value::pipe([
///     Value::from(add_two),
///     Value::from(subtract_one),
///     Value::from(multiply_by_five),
/// ]).unwrap();
/// assert_eq!(pipeline.call_one(4), Ok(Value::from(25)));
/// ```
pub fn pipe<I>(stages: I) -> Result<Function, Error>
where
    I: IntoIterator<Item = Value>,
{
    let functions = unary_stages(stages)?;
    tracing::debug!(stages = functions.len(), "dynamic pipe built");
    let pipeline = compose::pipe(functions.into_iter().map(into_stage));
    Ok(into_function(pipeline))
}

/// Builds a function that passes its argument through `stages` right to left.
///
/// Positions in [`Error::NonFunctionArgument`] refer to the order the stages
/// were given in. See [`pipe`] for the remaining rules.
///
/// # Errors
///
/// - [`Error::NonFunctionArgument`] if a stage is not a function.
/// - [`Error::ArityMismatch`] if a stage cannot be called with one argument.
pub fn compose<I>(stages: I) -> Result<Function, Error>
where
    I: IntoIterator<Item = Value>,
{
    let functions = unary_stages(stages)?;
    tracing::debug!(stages = functions.len(), "dynamic compose built");
    let pipeline = compose::compose(functions.into_iter().map(into_stage));
    Ok(into_function(pipeline))
}

fn unary_stages<I>(stages: I) -> Result<Vec<Function>, Error>
where
    I: IntoIterator<Item = Value>,
{
    stages
        .into_iter()
        .enumerate()
        .map(|(position, stage)| match stage {
            Value::Function(function) if function.arity().accepts(1) => Ok(function),
            Value::Function(function) => Err(Error::ArityMismatch {
                expected: function.arity(),
                received: 1,
            }),
            other => Err(Error::NonFunctionArgument {
                position,
                kind: other.kind(),
            }),
        })
        .collect()
}

fn into_stage(function: Function) -> compose::Stage<Value, Error> {
    compose::stage(move |value| function.call_one(value))
}

fn into_function(pipeline: compose::Pipeline<Value, Error>) -> Function {
    Function::unary(move |value| pipeline.run(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn integer_function(arity: usize) -> Function {
        Function::new(Arity::Fixed(arity), |arguments| {
            let total: i64 = arguments.iter().filter_map(Value::as_integer).sum();
            Ok(Value::from(total))
        })
    }

    fn offset(amount: i64) -> Value {
        let body = move |x: Value| Ok(Value::from(x.as_integer().unwrap_or(0) + amount));
        Function::unary(body).into()
    }

    #[test]
    fn test_native_call_checks_arity() {
        let function = integer_function(2);
        assert_eq!(
            function.call(vec![Value::from(1)]),
            Err(Error::ArityMismatch {
                expected: Arity::Fixed(2),
                received: 1,
            })
        );
    }

    #[test]
    fn test_variadic_native_accepts_any_count() {
        let function = Function::new(Arity::Variadic, |arguments| Ok(Value::from(arguments)));
        assert_eq!(
            function.call(vec![Value::from(1), Value::from(2)]),
            Ok(Value::sequence([Value::from(1), Value::from(2)]))
        );
        assert!(matches!(curry(&function), Err(Error::ArityMismatch { .. })));
    }

    #[test]
    fn test_curried_partial_reports_remaining_arity() {
        let curried = curry(&integer_function(3)).unwrap();
        let function = curried.as_function().unwrap();
        assert_eq!(function.arity(), Arity::Fixed(3));

        let partial = function.call(vec![Value::from(1)]).unwrap();
        assert_eq!(partial.as_function().unwrap().arity(), Arity::Fixed(2));
    }

    #[test]
    fn test_curried_group_application() {
        let curried = curry(&integer_function(3)).unwrap();
        let function = curried.as_function().unwrap();
        let partial = function
            .call(vec![Value::from(10), Value::from(20)])
            .unwrap();
        let result = partial.as_function().unwrap().call_one(30);
        assert_eq!(result, Ok(Value::from(60)));
    }

    #[test]
    fn test_curried_over_application() {
        let curried = curry(&integer_function(2)).unwrap();
        let result = curried
            .as_function()
            .unwrap()
            .call(vec![Value::from(1), Value::from(2), Value::from(3)]);
        assert_eq!(
            result,
            Err(Error::ArityMismatch {
                expected: Arity::Fixed(2),
                received: 3,
            })
        );
    }

    #[test]
    fn test_curry_nullary_invokes_immediately() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let first_name = Function::new(Arity::Fixed(0), move |_| {
            counter.set(counter.get() + 1);
            Ok(Value::from("Foo"))
        });
        assert_eq!(curry(&first_name), Ok(Value::from("Foo")));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_curry_of_curried_partial() {
        let curried = curry(&integer_function(3)).unwrap();
        let partial = curried.as_function().unwrap().call_one(1).unwrap();
        let recurried = curry(partial.as_function().unwrap()).unwrap();
        let result = recurried
            .as_function()
            .unwrap()
            .call(vec![Value::from(2), Value::from(3)]);
        assert_eq!(result, Ok(Value::from(6)));
    }

    #[test]
    fn test_pipe_rejects_non_function_eagerly() {
        let result = pipe([offset(1), Value::from(5), offset(2)]);
        assert_eq!(
            result.unwrap_err(),
            Error::NonFunctionArgument {
                position: 1,
                kind: crate::value::Kind::Integer,
            }
        );
    }

    #[test]
    fn test_compose_reports_original_position() {
        let result = compose([offset(1), offset(2), Value::sequence(Vec::new())]);
        assert!(matches!(
            result,
            Err(Error::NonFunctionArgument { position: 2, .. })
        ));
    }

    #[test]
    fn test_pipe_rejects_binary_stage() {
        let result = pipe([Value::from(integer_function(2))]);
        assert_eq!(
            result.unwrap_err(),
            Error::ArityMismatch {
                expected: Arity::Fixed(2),
                received: 1,
            }
        );
    }

    #[test]
    fn test_pipe_accepts_curried_partial_as_stage() {
        let divide_by = Function::new(Arity::Fixed(2), |arguments| {
            let divisor = arguments[0].as_float().unwrap_or(1.0);
            let number = arguments[1].as_float().unwrap_or(0.0);
            Ok(Value::from(number / divisor))
        });
        let divide_by_two = curry(&divide_by)
            .unwrap()
            .as_function()
            .unwrap()
            .call_one(2)
            .unwrap();

        let pipeline = pipe([offset(2), offset(-1), divide_by_two]).unwrap();
        assert_eq!(pipeline.call_one(5), Ok(Value::from(3.0)));
    }

    #[test]
    fn test_empty_pipe_and_compose_are_identity() {
        let sequence = Value::sequence([Value::from(1)]);
        let (piped, composed) = (pipe(Vec::new()).unwrap(), compose(Vec::new()).unwrap());
        let piped = piped.call_one(sequence.clone()).unwrap();
        let composed = composed.call_one(sequence.clone()).unwrap();
        assert!(piped.same_reference(&sequence));
        assert!(composed.same_reference(&sequence));
    }

    #[test]
    fn test_raised_error_propagates_unchanged() {
        let failure = Value::sequence([Value::from("reason")]);
        let raised = failure.clone();
        let reached = Rc::new(Cell::new(false));
        let flag = Rc::clone(&reached);
        let pipeline = pipe([
            offset(1),
            Function::unary(move |_| Err(Error::Raised(raised.clone())))
                .into(),
            Function::unary(move |x| {
                flag.set(true);
                Ok(x)
            })
            .into(),
        ])
        .unwrap();

        match pipeline.call_one(0) {
            Err(Error::Raised(value)) => assert!(value.same_reference(&failure)),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(!reached.get());
    }

    #[test]
    fn test_function_equality_is_identity() {
        let first = integer_function(1);
        let second = integer_function(1);
        assert_eq!(first, first.clone());
        assert_ne!(first, second);
    }

    #[test]
    fn test_debug_shows_captured_arguments() {
        let partial = curry(&integer_function(2))
            .unwrap()
            .as_function()
            .unwrap()
            .call_one(7)
            .unwrap();
        let rendered = format!("{:?}", partial.as_function().unwrap());
        assert!(rendered.contains("arity: Fixed(1)"));
        assert!(rendered.contains("captured: [7]"));
    }
}

//! Runtime-sized pipelines of fallible stages.
//!
//! The [`pipe!`](crate::pipe!) and [`compose!`](crate::compose!) macros need
//! their stages at compile time. [`Pipeline`] covers the case where stages
//! are collected at runtime: every stage maps `T` to `Result<T, E>`, and the
//! first `Err` stops the pipeline and is returned to the caller unchanged.

use std::fmt;

/// A boxed pipeline stage.
pub type Stage<T, E> = Box<dyn Fn(T) -> Result<T, E>>;

/// Boxes a fallible function as a [`Stage`].
#[inline]
pub fn stage<T, E, F>(function: F) -> Stage<T, E>
where
    F: Fn(T) -> Result<T, E> + 'static,
{
    Box::new(function)
}

/// Boxes an infallible function as a [`Stage`].
///
/// ```rust
/// use purefn::compose::{lift, pipe};
/// use std::convert::Infallible;
///
/// let pipeline = pipe::<i32, Infallible, _>([
///     lift(|x: i32| x + 2),
///     lift(|x: i32| x - 1),
///     lift(|x: i32| x * 5),
/// ]);
/// assert_eq!(pipeline.run(4), Ok(25));
/// ```
#[inline]
pub fn lift<T, E, F>(function: F) -> Stage<T, E>
where
    F: Fn(T) -> T + 'static,
{
    Box::new(move |value| Ok(function(value)))
}

/// An ordered list of stages executed left to right.
///
/// An empty pipeline is the identity.
pub struct Pipeline<T, E> {
    stages: Vec<Stage<T, E>>,
}

impl<T, E> Pipeline<T, E> {
    /// Creates an empty pipeline.
    #[inline]
    pub const fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Appends a stage that runs after every existing stage.
    #[must_use]
    pub fn then<F>(mut self, function: F) -> Self
    where
        F: Fn(T) -> Result<T, E> + 'static,
    {
        self.stages.push(Box::new(function));
        self
    }

    /// Returns the number of stages.
    #[inline]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns `true` if the pipeline has no stages.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Runs `input` through every stage in order.
    ///
    /// Each stage receives the previous stage's output. If a stage fails, no
    /// later stage runs and its error is returned as is.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by a stage.
    pub fn run(&self, input: T) -> Result<T, E> {
        self.stages
            .iter()
            .enumerate()
            .try_fold(input, |value, (index, stage)| {
                stage(value).inspect_err(|_| {
                    tracing::debug!(stage = index, "pipeline stage failed; short-circuiting");
                })
            })
    }

    /// Converts the pipeline into a plain closure.
    pub fn into_fn(self) -> impl Fn(T) -> Result<T, E> {
        move |input| self.run(input)
    }
}

impl<T, E> Default for Pipeline<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> fmt::Debug for Pipeline<T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Pipeline")
            .field("stages", &self.stages.len())
            .finish()
    }
}

impl<T, E> FromIterator<Stage<T, E>> for Pipeline<T, E> {
    fn from_iter<I: IntoIterator<Item = Stage<T, E>>>(iterator: I) -> Self {
        Self {
            stages: iterator.into_iter().collect(),
        }
    }
}

/// Builds a pipeline that applies `stages` left to right.
///
/// `pipe([f, g, h]).run(x)` evaluates `h(g(f(x)))`.
///
/// # Examples
///
/// ```rust
/// use purefn::compose::{pipe, stage};
///
/// let checked = pipe([
///     stage(|x: i64| x.checked_add(2).ok_or("overflow")),
///     stage(|x: i64| x.checked_mul(5).ok_or("overflow")),
/// ]);
///
/// assert_eq!(checked.run(4), Ok(30));
/// assert_eq!(checked.run(i64::MAX), Err("overflow"));
/// ```
pub fn pipe<T, E, I>(stages: I) -> Pipeline<T, E>
where
    I: IntoIterator<Item = Stage<T, E>>,
{
    let pipeline: Pipeline<T, E> = stages.into_iter().collect();
    tracing::trace!(stages = pipeline.len(), "pipe built");
    pipeline
}

/// Builds a pipeline that applies `stages` right to left.
///
/// `compose([f, g, h]).run(x)` evaluates `f(g(h(x)))`.
///
/// ```rust
/// use purefn::compose::{compose, lift};
/// use std::convert::Infallible;
///
/// let pipeline = compose::<i32, Infallible, _>([
///     lift(|x: i32| x * 5),
///     lift(|x: i32| x - 1),
///     lift(|x: i32| x + 2),
/// ]);
/// assert_eq!(pipeline.run(4), Ok(25));
/// ```
pub fn compose<T, E, I>(stages: I) -> Pipeline<T, E>
where
    I: IntoIterator<Item = Stage<T, E>>,
{
    let mut stages: Vec<_> = stages.into_iter().collect();
    stages.reverse();
    tracing::trace!(stages = stages.len(), "compose built");
    Pipeline { stages }
}

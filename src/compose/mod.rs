//! Function composition and currying.
//!
//! This module provides the higher-order combinators used to build pure
//! function pipelines. None of them mutate the functions they are given;
//! they only wrap and sequence them.
//!
//! # Overview
//!
//! - [`compose!`]: Compose functions right-to-left (mathematical composition)
//! - [`pipe!`]: Compose functions left-to-right (data flow style)
//! - [`pipe`] / [`compose`]: The same over a runtime list of fallible stages
//! - [`curry`]: Collect arguments one group at a time for a function with a
//!   declared [`Arity`]
//! - [`identity`]: The unit of composition
//!
//! The dynamically typed counterparts operating on
//! [`Function`](crate::value::Function) values live in
//! [`value`](crate::value).
//!
//! # Examples
//!
//! ## Pipeline (left-to-right)
//!
//! ```
//! use purefn::pipe;
//!
//! let pipeline = pipe!(|x: i32| x + 2, |x: i32| x - 1, |x: i32| x * 5);
//! assert_eq!(pipeline(4), 25);
//! ```
//!
//! ## Composition (right-to-left)
//!
//! ```
//! use purefn::compose;
//!
//! let composed = compose!(|x: i32| x * 5, |x: i32| x - 1, |x: i32| x + 2);
//! assert_eq!(composed(4), 25);
//! ```
//!
//! ## Currying
//!
//! ```
//! use purefn::compose::{Arity, curry};
//!
//! let total = |arguments: Vec<i32>| arguments.iter().sum::<i32>();
//! let curried = curry(Arity::Fixed(3), total).unwrap();
//!
//! let result = curried.apply([10]).unwrap().apply([20]).unwrap().apply([30]).unwrap();
//! assert_eq!(result.complete().unwrap(), 60);
//! ```
//!
//! # Mathematical Background
//!
//! ```text
//! compose(f, g, h)(x) = f(g(h(x)))
//! pipe(f, g, h)(x)    = h(g(f(x)))
//! curry(f)(a)(b)(c)   = curry(f)(a, b)(c) = f(a, b, c)
//! ```
//!
//! Both directions are folds over the stage list starting from the input:
//! `pipe` folds from the left, `compose` from the right. With no stages the
//! fold returns its seed, which is why the empty pipeline is the identity.

mod compose_macro;
mod curry;
mod pipe_macro;
mod pipeline;
mod utils;

pub use curry::{Applied, Arity, Curried, curry};
pub use pipeline::{Pipeline, Stage, compose, lift, pipe, stage};
pub use utils::identity;

// Re-export macros (they are already at crate root via #[macro_export])
pub use crate::compose;
pub use crate::pipe;

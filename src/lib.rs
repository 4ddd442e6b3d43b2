//! # purefn
//!
//! Building blocks for writing pure functions in Rust: a structural clone
//! that breaks every shared reference in a nested value, and the
//! higher-order combinators `curry`, `pipe` and `compose`.
//!
//! ## Overview
//!
//! - **Value model**: A dynamically typed [`Value`](value::Value) whose
//!   sequences and mappings are shared, mutable containers
//! - **Structural clone**: Deep copies that share no container with their
//!   source, including cyclic ones
//! - **Function composition**: `compose!`, `pipe!`, runtime pipelines of
//!   fallible stages, and currying with an explicit arity
//!
//! ## Feature Flags
//!
//! - `compose`: Function composition and currying
//! - `value`: The dynamic value model and its `Function` combinators
//! - `clone`: Structural and shallow cloning of values
//! - `serde`: `Serialize`/`Deserialize` for values
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use purefn::prelude::*;
//!
//! let scores = value!([11, 22, 33]);
//!
//! // A pure "append": the input is cloned before the mutation.
//! let add_to_history = |history: &Value, score: i64| {
//!     let copy = structural_clone(history);
//!     copy.as_sequence().unwrap().push(score);
//!     copy
//! };
//!
//! assert_eq!(add_to_history(&scores, 44), value!([11, 22, 33, 44]));
//! assert_eq!(add_to_history(&scores, 44), value!([11, 22, 33, 44]));
//! assert_eq!(scores, value!([11, 22, 33]));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// ```rust
/// use purefn::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "compose")]
    pub use crate::Error;

    #[cfg(feature = "compose")]
    pub use crate::compose::*;

    #[cfg(feature = "value")]
    pub use crate::value;
    #[cfg(feature = "value")]
    pub use crate::value::{Function, Kind, Mapping, Scalar, Sequence, Value};

    #[cfg(feature = "clone")]
    pub use crate::clone::*;
}

#[cfg(feature = "compose")]
mod error;

#[cfg(feature = "compose")]
pub use error::Error;

#[cfg(feature = "compose")]
pub mod compose;

#[cfg(feature = "value")]
pub mod value;

#[cfg(feature = "clone")]
pub mod clone;

//! # Slackwater
//!
//! > *"Slack water: the moment the tide turns"*
//!
//! A Rust library for lazy, repeatable sequence composition.
//!
//! ## Philosophy
//!
//! A [`Sequence`] is a description of elements, not the elements themselves.
//! Wrapping one in a filter, a concatenation or a matched-pair check performs
//! no work. Elements are produced only when a cursor is pulled, and every new
//! cursor starts the whole pipeline over:
//! - **Slack** = Composition (nothing moves while you build)
//! - **Water** = Traversal (elements flow, one `next()` at a time)
//!
//! Failures travel with the elements: a cursor yields `Result<Item, Error>`,
//! and the failure surfaces at exactly the `next()` call that hit it.
//!
//! ## Quick Example
//!
//! ```rust
//! use slackwater::prelude::*;
//! use slackwater::{Joined, Matched};
//!
//! let words = Values::new(vec!["hey", "hello", "world"]);
//! let long = words.filter(|w: &&str| w.len() > 4);
//! assert_eq!(long.collect_vec(), Ok(vec!["hello", "world"]));
//!
//! let framed = Joined::append(Joined::prepend("<", long), ">");
//! assert_eq!(framed.collect_vec(), Ok(vec!["<", "hello", "world", ">"]));
//!
//! let checked = Matched::with(
//!     |name: &&str, len: &usize| name.len() == *len,
//!     Values::new(vec!["ann", "bobby"]),
//!     Values::new(vec![3, 5]),
//! );
//! assert_eq!(checked.collect_vec(), Ok(vec!["ann", "bobby"]));
//! ```
//!
//! ## Modules
//!
//! - [`sequence`]: the [`Sequence`] trait and its [`SequenceExt`] combinators
//! - [`source`]: leaf sequences ([`Values`], [`from_fn`], [`Single`], [`Empty`])
//! - [`envelope`]: type-erased sequences
//! - [`filtered`], [`joined`], [`matched`], [`map_err`]: wrappers
//! - [`predicate`]: element predicates
//! - [`recomputable`]: deferred, re-run-on-demand values
//! - [`checked`]: failure translation around actions
//! - [`testing`]: probes and assertion macros

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod checked;
pub mod envelope;
pub mod filtered;
pub mod joined;
pub mod map_err;
pub mod matched;
pub mod predicate;
pub mod recomputable;
pub mod sequence;
pub mod source;
pub mod testing;

// Re-exports
pub use checked::{BoxError, Checked, Failure, Fatal, FatalKind, Outcome};
pub use envelope::{BoxCursor, Envelope};
pub use filtered::{Deferred, Fallible, Filter, Filtered, Plain};
pub use joined::Joined;
pub use map_err::MapErr;
pub use matched::{MatchError, Matched, Mismatch, Side};
pub use predicate::Predicate;
pub use recomputable::Recomputable;
pub use sequence::{Sequence, SequenceExt};
pub use source::{from_fn, Empty, FromFn, Single, Values};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::envelope::Envelope;
    pub use crate::predicate::Predicate;
    pub use crate::recomputable::Recomputable;
    pub use crate::sequence::{Sequence, SequenceExt};
    pub use crate::source::{from_fn, Values};
}

//! Element predicates for [`Filtered`](crate::Filtered)
//!
//! Any `Fn(&T) -> bool` closure is already a [`Predicate`]. Implement the
//! trait by hand when the verdict needs state that outlives one closure,
//! such as a precompiled lookup table.
//!
//! # Example
//!
//! ```rust
//! use slackwater::prelude::*;
//! use std::collections::HashSet;
//!
//! struct Allowed(HashSet<&'static str>);
//!
//! impl Predicate<&'static str> for Allowed {
//!     fn check(&self, name: &&'static str) -> bool {
//!         self.0.contains(name)
//!     }
//! }
//!
//! let allowed = Allowed(["ann", "cyd"].into_iter().collect());
//! let seq = Values::new(vec!["ann", "bob", "cyd"]).filter(allowed);
//! assert_eq!(seq.collect_vec(), Ok(vec!["ann", "cyd"]));
//! ```

/// A verdict on a single element.
///
/// Evaluation may have side effects; a [`Filtered`](crate::Filtered)
/// sequence evaluates its predicate at most once per element per traversal.
pub trait Predicate<T: ?Sized> {
    /// Check if the value satisfies this predicate.
    fn check(&self, value: &T) -> bool;
}

impl<T: ?Sized, F> Predicate<T> for F
where
    F: Fn(&T) -> bool,
{
    #[inline]
    fn check(&self, value: &T) -> bool {
        self(value)
    }
}

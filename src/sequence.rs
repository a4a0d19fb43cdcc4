//! The `Sequence` trait - a repeatable source of cursors.
//!
//! A [`Sequence`] can be asked any number of times for a fresh cursor. The
//! cursor is an ordinary [`Iterator`] over `Result<Item, Error>`:
//!
//! - `None` is end-of-sequence, never a failure;
//! - `Some(Err(e))` is an upstream failure surfaced at the exact `next()`
//!   call that hit it.
//!
//! Producing a cursor takes `&self`, so a sequence is never mutated by being
//! traversed. Sequences can be shared by reference, `Rc`, `Arc` or `Box`
//! across any number of wrappers; cursors are owned by a single traversal.
//!
//! # Design Philosophy
//!
//! This trait follows the same pattern as `Iterator`:
//! - Combinators return concrete types (zero-cost abstractions)
//! - Use `.boxed()` when you need type erasure
//!
//! Nothing is cached. Every call to [`Sequence::cursor`] restarts the
//! underlying computation, including any side effects of the producing
//! function.
//!
//! There is no thread-safety guarantee.
//!
//! # Example
//!
//! ```rust
//! use slackwater::prelude::*;
//!
//! let words = Values::new(vec!["hey", "hello", "world"]);
//! let long = words.filter(|w: &&str| w.len() > 4);
//!
//! assert_eq!(long.collect_vec(), Ok(vec!["hello", "world"]));
//! // A second traversal starts over.
//! assert_eq!(long.collect_vec(), Ok(vec!["hello", "world"]));
//! ```

use std::rc::Rc;
use std::sync::Arc;

use crate::envelope::Envelope;
use crate::filtered::{Deferred, Fallible, Filtered, Plain};
use crate::joined::Joined;
use crate::map_err::MapErr;
use crate::predicate::Predicate;
use crate::recomputable::Recomputable;

/// A repeatable source of cursors over a bounded or unbounded series of elements.
///
/// # Type Parameters
///
/// * `Item` - The element type produced by every cursor
/// * `Error` - The upstream failure a cursor may yield instead of an element
///
/// # Example
///
/// ```rust
/// use slackwater::prelude::*;
///
/// let numbers = Values::new(vec![1, 2, 3]);
/// let mut cursor = numbers.cursor();
///
/// assert_eq!(cursor.next(), Some(Ok(1)));
/// assert_eq!(cursor.next(), Some(Ok(2)));
/// assert_eq!(cursor.next(), Some(Ok(3)));
/// assert_eq!(cursor.next(), None);
/// ```
pub trait Sequence {
    /// The element type.
    type Item;

    /// The failure a cursor may yield.
    type Error;

    /// The single-use, forward-only traversal state.
    type Cursor<'s>: Iterator<Item = Result<Self::Item, Self::Error>>
    where
        Self: 's;

    /// Produce a fresh cursor.
    ///
    /// Every call restarts the traversal from the beginning.
    fn cursor(&self) -> Self::Cursor<'_>;
}

impl<S: Sequence + ?Sized> Sequence for &S {
    type Item = S::Item;
    type Error = S::Error;
    type Cursor<'s>
        = S::Cursor<'s>
    where
        Self: 's;

    #[inline]
    fn cursor(&self) -> Self::Cursor<'_> {
        (**self).cursor()
    }
}

impl<S: Sequence + ?Sized> Sequence for Box<S> {
    type Item = S::Item;
    type Error = S::Error;
    type Cursor<'s>
        = S::Cursor<'s>
    where
        Self: 's;

    #[inline]
    fn cursor(&self) -> Self::Cursor<'_> {
        (**self).cursor()
    }
}

impl<S: Sequence + ?Sized> Sequence for Rc<S> {
    type Item = S::Item;
    type Error = S::Error;
    type Cursor<'s>
        = S::Cursor<'s>
    where
        Self: 's;

    #[inline]
    fn cursor(&self) -> Self::Cursor<'_> {
        (**self).cursor()
    }
}

impl<S: Sequence + ?Sized> Sequence for Arc<S> {
    type Item = S::Item;
    type Error = S::Error;
    type Cursor<'s>
        = S::Cursor<'s>
    where
        Self: 's;

    #[inline]
    fn cursor(&self) -> Self::Cursor<'_> {
        (**self).cursor()
    }
}

/// Extension trait providing combinator methods for all sequences.
///
/// This trait is automatically implemented for all types that implement
/// `Sequence`. You don't need to implement this trait yourself.
///
/// Every combinator except [`collect_vec`](SequenceExt::collect_vec) is lazy:
/// building it performs no traversal and evaluates nothing.
///
/// # Example
///
/// ```rust
/// use slackwater::prelude::*;
///
/// let evens = Values::new(vec![1, 2, 3, 4])
///     .filter(|n: &i32| n % 2 == 0)
///     .chain(Values::new(vec![10]));
///
/// assert_eq!(evens.collect_vec(), Ok(vec![2, 4, 10]));
/// ```
pub trait SequenceExt: Sequence + Sized {
    /// Keep only the elements satisfying a plain predicate.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slackwater::prelude::*;
    ///
    /// let odd = Values::new(vec![1, 2, 3]).filter(|n: &i32| n % 2 == 1);
    /// assert_eq!(odd.collect_vec(), Ok(vec![1, 3]));
    /// ```
    fn filter<P>(self, predicate: P) -> Filtered<Self, Plain<P>>
    where
        P: Predicate<Self::Item>,
    {
        Filtered::new(self, predicate)
    }

    /// Keep only the elements satisfying a predicate that may fail.
    ///
    /// A predicate failure is yielded from the cursor in place of an element.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slackwater::prelude::*;
    ///
    /// let checked = Values::typed(vec![1, 2, 3])
    ///     .try_filter(|n| if *n < 3 { Ok(true) } else { Err("too big") });
    ///
    /// let mut cursor = checked.cursor();
    /// assert_eq!(cursor.next(), Some(Ok(1)));
    /// assert_eq!(cursor.next(), Some(Ok(2)));
    /// assert_eq!(cursor.next(), Some(Err("too big")));
    /// ```
    fn try_filter<F>(self, f: F) -> Filtered<Self, Fallible<F>>
    where
        F: Fn(&Self::Item) -> Result<bool, Self::Error>,
    {
        Filtered::try_new(self, f)
    }

    /// Keep only the elements whose deferred verdict resolves to `true`.
    ///
    /// The verdict is resolved exactly once per pulled element.
    fn filter_deferred<'r, F>(self, f: F) -> Filtered<Self, Deferred<F>>
    where
        F: Fn(&Self::Item) -> Recomputable<'r, bool, Self::Error>,
    {
        Filtered::deferred(self, f)
    }

    /// Concatenate another sequence after this one.
    ///
    /// The other sequence is not asked for a cursor until this one is
    /// exhausted.
    fn chain<'a, S>(self, other: S) -> Joined<Envelope<'a, Self::Item, Self::Error>>
    where
        Self: 'a,
        S: Sequence<Item = Self::Item, Error = Self::Error> + 'a,
    {
        Joined::new(vec![self.boxed(), other.boxed()])
    }

    /// Transform the failure a cursor may yield.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slackwater::prelude::*;
    ///
    /// let seq = Values::typed(vec![1])
    ///     .try_filter(|_| Err("nope"))
    ///     .map_err(|e: &str| format!("wrapped: {}", e));
    /// assert_eq!(seq.collect_vec(), Err("wrapped: nope".to_string()));
    /// ```
    fn map_err<E2, F>(self, f: F) -> MapErr<Self, F>
    where
        F: Fn(Self::Error) -> E2,
    {
        MapErr::new(self, f)
    }

    /// Erase the concrete type behind an [`Envelope`].
    fn boxed<'a>(self) -> Envelope<'a, Self::Item, Self::Error>
    where
        Self: 'a,
    {
        Envelope::new(self)
    }

    /// Traverse once and gather every element, in order.
    ///
    /// Stops at the first failure and returns it.
    fn collect_vec(&self) -> Result<Vec<Self::Item>, Self::Error> {
        self.cursor().collect()
    }
}

impl<S: Sequence> SequenceExt for S {}

//! Filtered sequences
//!
//! [`Filtered`] wraps a source sequence and a predicate. It produces only the
//! elements for which the predicate holds, deciding element by element as the
//! cursor is pulled. Building a `Filtered` evaluates nothing.
//!
//! Three predicate shapes are supported, each behind its own constructor:
//!
//! | Constructor | Predicate | Wrapper |
//! |---|---|---|
//! | [`Filtered::new`] | [`Predicate<T>`] (any `Fn(&T) -> bool`) | [`Plain`] |
//! | [`Filtered::try_new`] | `Fn(&T) -> Result<bool, E>` | [`Fallible`] |
//! | [`Filtered::deferred`] | `Fn(&T) -> Recomputable<bool, E>` | [`Deferred`] |
//!
//! The cursor never looks ahead: answering one `next()` pulls source
//! elements only until one qualifies. On an infinite source whose matches
//! stop, `next()` does not return.
//!
//! There is no thread-safety guarantee.
//!
//! # Example
//!
//! ```rust
//! use slackwater::Filtered;
//! use slackwater::prelude::*;
//!
//! let list = Filtered::of(|s: &&str| s.len() > 4, ["hey", "hello", "world"]);
//! assert_eq!(list.collect_vec(), Ok(vec!["hello", "world"]));
//! ```

use std::fmt;

use crate::predicate::Predicate;
use crate::recomputable::Recomputable;
use crate::sequence::Sequence;
use crate::source::Values;

/// The verdict a [`Filtered`] cursor asks for each pulled element.
///
/// Implemented by the three predicate shapes; you normally never implement
/// it yourself.
pub trait Filter<T, E> {
    /// Decide whether `item` is kept.
    fn accepts(&self, item: &T) -> Result<bool, E>;
}

/// A plain [`Predicate`] that cannot fail.
#[derive(Clone, Copy, Debug)]
pub struct Plain<P>(pub P);

impl<T, E, P: Predicate<T>> Filter<T, E> for Plain<P> {
    #[inline]
    fn accepts(&self, item: &T) -> Result<bool, E> {
        Ok(self.0.check(item))
    }
}

/// A predicate returning `Result<bool, E>`.
#[derive(Clone, Copy)]
pub struct Fallible<F>(pub F);

impl<F> fmt::Debug for Fallible<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Fallible").field(&"<function>").finish()
    }
}

impl<T, E, F> Filter<T, E> for Fallible<F>
where
    F: Fn(&T) -> Result<bool, E>,
{
    #[inline]
    fn accepts(&self, item: &T) -> Result<bool, E> {
        (self.0)(item)
    }
}

/// A predicate returning a deferred verdict, resolved once per element.
#[derive(Clone, Copy)]
pub struct Deferred<F>(pub F);

impl<F> fmt::Debug for Deferred<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Deferred").field(&"<function>").finish()
    }
}

impl<'r, T, E, F> Filter<T, E> for Deferred<F>
where
    F: Fn(&T) -> Recomputable<'r, bool, E>,
{
    #[inline]
    fn accepts(&self, item: &T) -> Result<bool, E> {
        (self.0)(item).resolve()
    }
}

/// A lazily filtered view of a source sequence.
///
/// # Example
///
/// ```rust
/// use slackwater::prelude::*;
/// use slackwater::Filtered;
///
/// let positives = Filtered::new(Values::new(vec![-1, 2, -3, 4]), |n: &i32| *n > 0);
/// assert_eq!(positives.collect_vec(), Ok(vec![2, 4]));
/// ```
#[derive(Clone)]
pub struct Filtered<S, P> {
    source: S,
    predicate: P,
}

impl<S: fmt::Debug, P: fmt::Debug> fmt::Debug for Filtered<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filtered")
            .field("source", &self.source)
            .field("predicate", &self.predicate)
            .finish()
    }
}

impl<S, P> Filtered<S, Plain<P>>
where
    S: Sequence,
    P: Predicate<S::Item>,
{
    /// Filter with a plain predicate.
    pub fn new(source: S, predicate: P) -> Self {
        Filtered {
            source,
            predicate: Plain(predicate),
        }
    }
}

impl<T, P> Filtered<Values<T>, Plain<P>>
where
    T: Clone,
    P: Predicate<T>,
{
    /// Filter a literal list of elements.
    pub fn of(predicate: P, items: impl IntoIterator<Item = T>) -> Self {
        Filtered::new(Values::new(items), predicate)
    }
}

impl<S, F> Filtered<S, Fallible<F>>
where
    S: Sequence,
    F: Fn(&S::Item) -> Result<bool, S::Error>,
{
    /// Filter with a predicate that may fail.
    ///
    /// The predicate's failure is yielded in place of an element.
    pub fn try_new(source: S, predicate: F) -> Self {
        Filtered {
            source,
            predicate: Fallible(predicate),
        }
    }
}

impl<S, F> Filtered<S, Deferred<F>>
where
    S: Sequence,
{
    /// Filter with a predicate returning a deferred verdict.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slackwater::prelude::*;
    /// use slackwater::{Filtered, Recomputable};
    ///
    /// let even = Filtered::deferred(Values::typed(vec![1, 2, 3, 4]), |n: &i32| {
    ///     let n = *n;
    ///     Recomputable::<_, ()>::infallible(move || n % 2 == 0)
    /// });
    /// assert_eq!(even.collect_vec(), Ok(vec![2, 4]));
    /// ```
    pub fn deferred<'r>(source: S, predicate: F) -> Self
    where
        F: Fn(&S::Item) -> Recomputable<'r, bool, S::Error>,
    {
        Filtered {
            source,
            predicate: Deferred(predicate),
        }
    }
}

impl<S, P> Sequence for Filtered<S, P>
where
    S: Sequence,
    P: Filter<S::Item, S::Error>,
{
    type Item = S::Item;
    type Error = S::Error;
    type Cursor<'s>
        = FilteredCursor<'s, S, P>
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        FilteredCursor {
            source: self.source.cursor(),
            predicate: &self.predicate,
        }
    }
}

/// Cursor over a [`Filtered`] sequence.
pub struct FilteredCursor<'s, S, P>
where
    S: Sequence + 's,
{
    source: S::Cursor<'s>,
    predicate: &'s P,
}

impl<'s, S, P> fmt::Debug for FilteredCursor<'s, S, P>
where
    S: Sequence + 's,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilteredCursor")
            .field("source", &"<cursor>")
            .field("predicate", &"<predicate>")
            .finish()
    }
}

impl<'s, S, P> Iterator for FilteredCursor<'s, S, P>
where
    S: Sequence + 's,
    P: Filter<S::Item, S::Error>,
{
    type Item = Result<S::Item, S::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let item = match self.source.next()? {
                Ok(item) => item,
                Err(e) => return Some(Err(e)),
            };
            match self.predicate.accepts(&item) {
                Ok(true) => return Some(Ok(item)),
                Ok(false) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.source.size_hint().1)
    }
}

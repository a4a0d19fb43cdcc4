//! Envelope - a type-erased sequence.
//!
//! Use `Envelope` when you need to:
//! - Store different sequence types in one collection (see [`Joined`](crate::Joined))
//! - Return different sequences from match arms
//! - Hide a long combinator type behind a short name
//!
//! An envelope owns exactly one sequence and delegates every cursor request
//! to it verbatim. It holds no other state and caches nothing.

use std::fmt;

use crate::sequence::Sequence;
use crate::source::from_fn;

/// A boxed cursor borrowed from the sequence that produced it.
pub type BoxCursor<'s, T, E> = Box<dyn Iterator<Item = Result<T, E>> + 's>;

/// Object-safe face of [`Sequence`], used only for erasure.
trait ErasedSequence<T, E> {
    fn erased_cursor(&self) -> BoxCursor<'_, T, E>;
}

impl<S: Sequence> ErasedSequence<S::Item, S::Error> for S {
    fn erased_cursor(&self) -> BoxCursor<'_, S::Item, S::Error> {
        Box::new(self.cursor())
    }
}

/// A type-erased sequence.
///
/// # Example
///
/// ```rust
/// use slackwater::prelude::*;
///
/// // Different sequence types stored side by side
/// let parts: Vec<Envelope<'_, i32, ()>> = vec![
///     Values::typed(vec![1, 2]).boxed(),
///     Values::typed(vec![3, 4, 5]).filter(|n: &i32| n % 2 == 1).boxed(),
///     Envelope::from_fn(|| vec![Ok(7)]),
/// ];
///
/// let flat: Vec<i32> = parts
///     .iter()
///     .flat_map(|part| part.collect_vec().unwrap())
///     .collect();
/// assert_eq!(flat, vec![1, 2, 3, 5, 7]);
/// ```
pub struct Envelope<'a, T, E> {
    inner: Box<dyn ErasedSequence<T, E> + 'a>,
}

impl<T, E> fmt::Debug for Envelope<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope")
            .field("inner", &"<sequence>")
            .finish()
    }
}

impl<'a, T, E> Envelope<'a, T, E> {
    /// Wrap any sequence.
    pub fn new<S>(sequence: S) -> Self
    where
        S: Sequence<Item = T, Error = E> + 'a,
    {
        Envelope {
            inner: Box::new(sequence),
        }
    }

    /// Wrap a thunk producing a fresh iterator of results.
    ///
    /// Shorthand for `Envelope::new(source::from_fn(thunk))`.
    pub fn from_fn<F, I>(thunk: F) -> Self
    where
        F: Fn() -> I + 'a,
        I: IntoIterator<Item = Result<T, E>>,
    {
        Self::new(from_fn(thunk))
    }
}

impl<T, E> Sequence for Envelope<'_, T, E> {
    type Item = T;
    type Error = E;
    type Cursor<'s>
        = BoxCursor<'s, T, E>
    where
        Self: 's;

    #[inline]
    fn cursor(&self) -> Self::Cursor<'_> {
        self.inner.erased_cursor()
    }
}

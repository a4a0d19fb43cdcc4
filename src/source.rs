//! Leaf sequences
//!
//! The building blocks every composition starts from:
//!
//! - [`Values`] - an owned list, yielded by cloning each element
//! - [`FromFn`] - a thunk re-invoked for every cursor
//! - [`Single`] - exactly one element
//! - [`Empty`] - nothing at all
//!
//! # Example
//!
//! ```rust
//! use slackwater::prelude::*;
//! use slackwater::source::from_fn;
//!
//! let countdown = from_fn(|| (1..=3).rev().map(Ok::<_, ()>));
//! assert_eq!(countdown.collect_vec(), Ok(vec![3, 2, 1]));
//! ```

use std::convert::Infallible;
use std::fmt;
use std::iter;
use std::marker::PhantomData;
use std::slice;

use crate::sequence::Sequence;

/// A sequence over an owned list of elements.
///
/// Every cursor walks the list from the start and yields clones, so the list
/// itself is never consumed.
///
/// # Example
///
/// ```rust
/// use slackwater::prelude::*;
///
/// let names = Values::new(vec!["ann", "bob"]);
/// assert_eq!(names.collect_vec(), Ok(vec!["ann", "bob"]));
/// assert_eq!(names.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Values<T, E = Infallible> {
    items: Vec<T>,
    _error: PhantomData<fn() -> E>,
}

impl<T> Values<T> {
    /// Create a sequence that can never fail.
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self::typed(items)
    }
}

impl<T, E> Values<T, E> {
    /// Create a sequence whose error type is picked by the surrounding composition.
    ///
    /// Useful when a fallible filter or a fallible sibling sequence fixes the
    /// error type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slackwater::prelude::*;
    ///
    /// let seq = Values::<_, String>::typed(vec![1, 2]);
    /// assert_eq!(seq.collect_vec(), Ok(vec![1, 2]));
    /// ```
    pub fn typed(items: impl IntoIterator<Item = T>) -> Self {
        Values {
            items: items.into_iter().collect(),
            _error: PhantomData,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list holds no element.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Borrow the underlying elements.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T, E> From<Vec<T>> for Values<T, E> {
    fn from(items: Vec<T>) -> Self {
        Values {
            items,
            _error: PhantomData,
        }
    }
}

impl<T, E> FromIterator<T> for Values<T, E> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::typed(iter)
    }
}

impl<T: Clone, E> Sequence for Values<T, E> {
    type Item = T;
    type Error = E;
    type Cursor<'s>
        = ValuesCursor<'s, T, E>
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        ValuesCursor {
            inner: self.items.iter(),
            _error: PhantomData,
        }
    }
}

/// Cursor over a [`Values`] list.
pub struct ValuesCursor<'s, T, E> {
    inner: slice::Iter<'s, T>,
    _error: PhantomData<fn() -> E>,
}

impl<T: fmt::Debug, E> fmt::Debug for ValuesCursor<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValuesCursor")
            .field("remaining", &self.inner.as_slice())
            .finish()
    }
}

impl<T: Clone, E> Iterator for ValuesCursor<'_, T, E> {
    type Item = Result<T, E>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().cloned().map(Ok)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// A sequence backed by a thunk.
///
/// The thunk is invoked again for every cursor, so any side effect it has
/// runs once per traversal.
///
/// Created by [`from_fn`].
pub struct FromFn<F> {
    thunk: F,
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn")
            .field("thunk", &"<function>")
            .finish()
    }
}

/// Create a sequence from a thunk producing a fresh iterator of results.
///
/// # Example
///
/// ```rust
/// use slackwater::prelude::*;
/// use slackwater::source::from_fn;
/// use std::cell::Cell;
///
/// let built = Cell::new(0);
/// let seq = from_fn(|| {
///     built.set(built.get() + 1);
///     vec![Ok::<_, ()>('x')]
/// });
///
/// assert_eq!(built.get(), 0);
/// seq.collect_vec().unwrap();
/// seq.collect_vec().unwrap();
/// assert_eq!(built.get(), 2);
/// ```
pub fn from_fn<F, I, T, E>(thunk: F) -> FromFn<F>
where
    F: Fn() -> I,
    I: IntoIterator<Item = Result<T, E>>,
{
    FromFn { thunk }
}

impl<F, I, T, E> Sequence for FromFn<F>
where
    F: Fn() -> I,
    I: IntoIterator<Item = Result<T, E>>,
{
    type Item = T;
    type Error = E;
    type Cursor<'s>
        = I::IntoIter
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        (self.thunk)().into_iter()
    }
}

/// A sequence of exactly one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Single<T, E = Infallible> {
    item: T,
    _error: PhantomData<fn() -> E>,
}

impl<T, E> Single<T, E> {
    /// Wrap one element.
    pub fn new(item: T) -> Self {
        Single {
            item,
            _error: PhantomData,
        }
    }
}

impl<T: Clone, E> Sequence for Single<T, E> {
    type Item = T;
    type Error = E;
    type Cursor<'s>
        = iter::Once<Result<T, E>>
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        iter::once(Ok(self.item.clone()))
    }
}

/// A sequence with no element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Empty<T, E = Infallible> {
    _marker: PhantomData<fn() -> (T, E)>,
}

impl<T, E> Empty<T, E> {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Empty {
            _marker: PhantomData,
        }
    }
}

impl<T, E> Default for Empty<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Sequence for Empty<T, E> {
    type Item = T;
    type Error = E;
    type Cursor<'s>
        = iter::Empty<Result<T, E>>
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        iter::empty()
    }
}

//! Testing utilities and helpers for Slackwater
//!
//! This module provides ergonomic utilities for testing code built on
//! sequences. It includes an instrumented source that counts how often it is
//! traversed, assertion macros, and property-based testing support.
//!
//! # Examples
//!
//! ## Probe
//!
//! ```rust
//! use slackwater::prelude::*;
//! use slackwater::testing::Probe;
//!
//! let probe = Probe::new(vec![1, 2, 3]);
//! let evens = probe.clone().filter(|n: &i32| n % 2 == 0);
//!
//! assert_eq!(probe.cursors(), 0);
//! assert_eq!(evens.collect_vec(), Ok(vec![2]));
//! assert_eq!(probe.cursors(), 1);
//! assert_eq!(probe.pulled(), 3);
//! ```
//!
//! ## Assertion Macros
//!
//! ```rust
//! use slackwater::prelude::*;
//! use slackwater::{assert_fails, assert_yields};
//!
//! let ok = Values::new(vec![1, 2]);
//! assert_yields!(ok, vec![1, 2]);
//!
//! let broken = Values::typed(vec![1]).try_filter(|_| Err("broken"));
//! assert_fails!(broken);
//! ```

use std::cell::Cell;
use std::convert::Infallible;
use std::fmt;
use std::rc::Rc;
use std::slice;

use crate::sequence::Sequence;

/// An instrumented source sequence.
///
/// Yields a fixed list of outcomes and records how many cursors were
/// requested and how many outcomes were pulled. Clones share the counters, so
/// a clone can be handed to a composition while the original is kept for
/// inspection.
#[derive(Clone)]
pub struct Probe<T, E = Infallible> {
    items: Rc<Vec<Result<T, E>>>,
    cursors: Rc<Cell<usize>>,
    pulled: Rc<Cell<usize>>,
}

impl<T> Probe<T> {
    /// Create a probe over elements that never fail.
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Probe::outcomes(items.into_iter().map(Ok))
    }
}

impl<T, E> Probe<T, E> {
    /// Create a probe yielding the given outcomes in order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slackwater::Sequence;
    /// use slackwater::testing::Probe;
    ///
    /// let probe = Probe::outcomes(vec![Ok(1), Err("gone")]);
    /// let all: Vec<_> = probe.cursor().collect();
    /// assert_eq!(all, vec![Ok(1), Err("gone")]);
    /// ```
    pub fn outcomes(items: impl IntoIterator<Item = Result<T, E>>) -> Self {
        Probe {
            items: Rc::new(items.into_iter().collect()),
            cursors: Rc::new(Cell::new(0)),
            pulled: Rc::new(Cell::new(0)),
        }
    }

    /// Number of cursors requested so far.
    pub fn cursors(&self) -> usize {
        self.cursors.get()
    }

    /// Number of outcomes pulled so far, across all cursors.
    pub fn pulled(&self) -> usize {
        self.pulled.get()
    }

    /// Reset both counters to zero.
    pub fn reset(&self) {
        self.cursors.set(0);
        self.pulled.set(0);
    }
}

impl<T, E> fmt::Debug for Probe<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Probe")
            .field("len", &self.items.len())
            .field("cursors", &self.cursors.get())
            .field("pulled", &self.pulled.get())
            .finish()
    }
}

impl<T: Clone, E: Clone> Sequence for Probe<T, E> {
    type Item = T;
    type Error = E;
    type Cursor<'s>
        = ProbeCursor<'s, T, E>
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        self.cursors.set(self.cursors.get() + 1);
        ProbeCursor {
            inner: self.items.iter(),
            pulled: &self.pulled,
        }
    }
}

/// Cursor over a [`Probe`].
pub struct ProbeCursor<'s, T, E> {
    inner: slice::Iter<'s, Result<T, E>>,
    pulled: &'s Cell<usize>,
}

impl<T, E> fmt::Debug for ProbeCursor<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeCursor")
            .field("remaining", &self.inner.len())
            .finish()
    }
}

impl<T: Clone, E: Clone> Iterator for ProbeCursor<'_, T, E> {
    type Item = Result<T, E>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        self.pulled.set(self.pulled.get() + 1);
        Some(item.clone())
    }
}

/// Assert that a full traversal succeeds with the expected elements.
///
/// This macro will panic if the traversal fails or yields other elements.
///
/// # Example
///
/// ```rust
/// use slackwater::prelude::*;
/// use slackwater::assert_yields;
///
/// let seq = Values::new(vec!["a", "b"]);
/// assert_yields!(seq, vec!["a", "b"]);
/// ```
#[macro_export]
macro_rules! assert_yields {
    ($sequence:expr, $expected:expr) => {{
        let expected = $expected;
        match $crate::SequenceExt::collect_vec(&$sequence) {
            Ok(items) => {
                assert_eq!(items, expected);
            }
            Err(e) => {
                panic!("Expected elements, got failure: {:?}", e);
            }
        }
    }};
}

/// Assert that a full traversal fails.
///
/// With a second argument, also asserts the failure equals it.
///
/// # Example
///
/// ```rust
/// use slackwater::prelude::*;
/// use slackwater::assert_fails;
///
/// let seq = Values::typed(vec![1]).try_filter(|_| Err("broken"));
/// assert_fails!(seq);
/// assert_fails!(seq, "broken");
/// ```
#[macro_export]
macro_rules! assert_fails {
    ($sequence:expr) => {
        match $crate::SequenceExt::collect_vec(&$sequence) {
            Err(_) => {}
            Ok(items) => {
                panic!("Expected failure, got elements: {:?}", items);
            }
        }
    };
    ($sequence:expr, $expected:expr) => {{
        let expected = $expected;
        match $crate::SequenceExt::collect_vec(&$sequence) {
            Err(e) => {
                assert_eq!(e, expected);
            }
            Ok(items) => {
                panic!(
                    "Expected failure {:?}, got elements: {:?}",
                    expected, items
                );
            }
        }
    }};
}

#[cfg(feature = "proptest")]
use crate::source::Values;
#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl<T> Arbitrary for Values<T>
where
    T: Arbitrary + 'static,
{
    type Parameters = T::Parameters;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        prop::collection::vec(any_with::<T>(args), 0..32)
            .prop_map(Values::from)
            .boxed()
    }
}

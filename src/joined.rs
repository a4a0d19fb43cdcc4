//! Joined sequences
//!
//! [`Joined`] concatenates an ordered group of sequences. Its cursor walks
//! the group left to right and asks each part for a cursor only once the
//! part before it is exhausted, so a part that is never reached is never
//! touched.
//!
//! Three input shapes:
//!
//! - [`Joined::new`] (or `collect()`): a group of same-typed sequences
//! - [`Joined::prepend`]: one element, then a sequence
//! - [`Joined::append`]: a sequence, then one element
//!
//! Mixed sequence types can be grouped by boxing them into
//! [`Envelope`]s first.
//!
//! There is no thread-safety guarantee.
//!
//! # Example
//!
//! ```rust
//! use slackwater::prelude::*;
//! use slackwater::Joined;
//!
//! let all = Joined::new(vec![
//!     Values::new(vec![1, 2]),
//!     Values::new(vec![]),
//!     Values::new(vec![3]),
//! ]);
//! assert_eq!(all.collect_vec(), Ok(vec![1, 2, 3]));
//! ```

use std::fmt;
use std::slice;

use crate::envelope::Envelope;
use crate::sequence::{Sequence, SequenceExt};
use crate::source::Single;

/// The lazy concatenation of an ordered group of sequences.
#[derive(Clone)]
pub struct Joined<S> {
    parts: Vec<S>,
}

impl<S: fmt::Debug> fmt::Debug for Joined<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Joined")
            .field("parts", &self.parts)
            .finish()
    }
}

impl<S: Sequence> Joined<S> {
    /// Concatenate the parts in the given order.
    pub fn new(parts: impl IntoIterator<Item = S>) -> Self {
        Joined {
            parts: parts.into_iter().collect(),
        }
    }

    /// Number of parts in the group, empty parts included.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the group has no part at all.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl<'a, T, E> Joined<Envelope<'a, T, E>>
where
    T: Clone + 'a,
    E: 'a,
{
    /// One element followed by every element of `rest`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slackwater::prelude::*;
    /// use slackwater::Joined;
    ///
    /// let seq = Joined::prepend(0, Values::new(vec![1, 2]));
    /// assert_eq!(seq.collect_vec(), Ok(vec![0, 1, 2]));
    /// ```
    pub fn prepend<S>(item: T, rest: S) -> Self
    where
        S: Sequence<Item = T, Error = E> + 'a,
    {
        Joined::new(vec![Single::new(item).boxed(), rest.boxed()])
    }

    /// Every element of `init` followed by one element.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slackwater::prelude::*;
    /// use slackwater::Joined;
    ///
    /// let seq = Joined::append(Values::new(vec![1, 2]), 3);
    /// assert_eq!(seq.collect_vec(), Ok(vec![1, 2, 3]));
    /// ```
    pub fn append<S>(init: S, item: T) -> Self
    where
        S: Sequence<Item = T, Error = E> + 'a,
    {
        Joined::new(vec![init.boxed(), Single::new(item).boxed()])
    }
}

impl<S: Sequence> FromIterator<S> for Joined<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Joined::new(iter)
    }
}

impl<S: Sequence> Sequence for Joined<S> {
    type Item = S::Item;
    type Error = S::Error;
    type Cursor<'s>
        = JoinedCursor<'s, S>
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        JoinedCursor {
            pending: self.parts.iter(),
            current: None,
        }
    }
}

/// Cursor over a [`Joined`] sequence.
///
/// Holds the parts not yet started and the cursor of the part being walked.
pub struct JoinedCursor<'s, S>
where
    S: Sequence + 's,
{
    pending: slice::Iter<'s, S>,
    current: Option<S::Cursor<'s>>,
}

impl<'s, S> fmt::Debug for JoinedCursor<'s, S>
where
    S: Sequence + 's,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoinedCursor")
            .field("pending", &self.pending.len())
            .field("started", &self.current.is_some())
            .finish()
    }
}

impl<'s, S> Iterator for JoinedCursor<'s, S>
where
    S: Sequence + 's,
{
    type Item = Result<S::Item, S::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(cursor) = self.current.as_mut() {
                if let Some(item) = cursor.next() {
                    return Some(item);
                }
            }
            // Current part exhausted (or none started yet): move right.
            let part = self.pending.next()?;
            self.current = Some(part.cursor());
        }
    }
}

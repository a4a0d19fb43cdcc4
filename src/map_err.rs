//! MapErr combinator - transforms the failure a cursor may yield.

use std::fmt;

use crate::sequence::Sequence;

/// MapErr combinator - transforms the failure of every cursor.
///
/// Elements pass through untouched; the function runs only when a cursor
/// actually yields a failure.
///
/// Created by [`SequenceExt::map_err`](crate::SequenceExt::map_err).
pub struct MapErr<S, F> {
    inner: S,
    f: F,
}

impl<S, F> fmt::Debug for MapErr<S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapErr")
            .field("inner", &"<sequence>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<S, F> MapErr<S, F> {
    pub(crate) fn new(inner: S, f: F) -> Self {
        MapErr { inner, f }
    }
}

impl<S, F, E2> Sequence for MapErr<S, F>
where
    S: Sequence,
    F: Fn(S::Error) -> E2,
{
    type Item = S::Item;
    type Error = E2;
    type Cursor<'s>
        = MapErrCursor<'s, S, F>
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        MapErrCursor {
            inner: self.inner.cursor(),
            f: &self.f,
        }
    }
}

/// Cursor over a [`MapErr`] sequence.
pub struct MapErrCursor<'s, S, F>
where
    S: Sequence + 's,
{
    inner: S::Cursor<'s>,
    f: &'s F,
}

impl<'s, S, F> fmt::Debug for MapErrCursor<'s, S, F>
where
    S: Sequence + 's,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapErrCursor")
            .field("inner", &"<cursor>")
            .finish()
    }
}

impl<'s, S, F, E2> Iterator for MapErrCursor<'s, S, F>
where
    S: Sequence + 's,
    F: Fn(S::Error) -> E2,
{
    type Item = Result<S::Item, E2>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|item| item.map_err(self.f))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

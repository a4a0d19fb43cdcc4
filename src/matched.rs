//! Matched-pair validation
//!
//! [`Matched`] walks two sequences in lockstep and checks that the elements
//! at each position correlate. The correlation can be equality,
//! "ends with", "greater than" or anything else expressible as
//! `Fn(&X, &Y) -> bool`. When every pair correlates and both sides have the
//! same length, the matched sequence yields the first side's elements.
//!
//! # Recomputed, never cached
//!
//! The walk is deferred until a cursor is requested, and it runs again
//! from scratch for **every** cursor: both sides are re-pulled and the
//! correlation is re-evaluated at every position, even after an earlier walk
//! succeeded. A side whose traversal is one-shot will therefore behave
//! differently on a second traversal.
//!
//! # Failures
//!
//! A failed walk makes the cursor yield exactly one `Err` and then end.
//! Mismatches are reported as [`Mismatch`], the invalid-state failure kind,
//! in one of two cases:
//!
//! - [`Mismatch::Size`]: one side ran out before the other
//! - [`Mismatch::Correlation`]: a pair failed the correlation
//!
//! A length mismatch wins over an upstream failure pulled on the same step:
//! if one side is exhausted, whatever the other side yielded is reported as
//! [`Mismatch::Size`]. When both sides yield, a failure on the first side is
//! reported before one on the second.
//!
//! # Example
//!
//! ```rust
//! use slackwater::prelude::*;
//! use slackwater::{MatchError, Matched, Mismatch};
//!
//! let ok = Matched::new(Values::new(vec![1, 2, 3]), Values::new(vec![1, 2, 3]));
//! assert_eq!(ok.collect_vec(), Ok(vec![1, 2, 3]));
//!
//! let short = Matched::new(Values::new(vec![1, 2]), Values::new(vec![1, 2, 3]));
//! match short.collect_vec() {
//!     Err(MatchError::InvalidState(Mismatch::Size { position, .. })) => assert_eq!(position, 2),
//!     other => panic!("expected size mismatch, got {:?}", other),
//! }
//! ```

use std::error::Error as StdError;
use std::fmt;
use std::vec;

use crate::recomputable::Recomputable;
use crate::sequence::Sequence;

/// Which side of a [`Matched`] pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// The first sequence, whose elements are produced.
    First,
    /// The second sequence, only compared against.
    Second,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::First => write!(f, "first"),
            Side::Second => write!(f, "second"),
        }
    }
}

/// The invalid-state failure raised by a [`Matched`] walk.
///
/// # Examples
///
/// ```rust
/// use slackwater::Mismatch;
///
/// let err = Mismatch::Correlation {
///     position: 1,
///     first: "2".to_string(),
///     second: "3".to_string(),
/// };
/// assert_eq!(err.position(), 1);
/// assert_eq!(err.to_string(), "no correlation between `2` and `3` at position 1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mismatch {
    /// One side was exhausted while the other still had elements.
    Size {
        /// Number of pairs walked before the mismatch.
        position: usize,
        /// The side that still had elements.
        longer: Side,
    },
    /// The correlation function rejected a pair.
    Correlation {
        /// Zero-based position of the offending pair.
        position: usize,
        /// `Debug` rendering of the first side's element.
        first: String,
        /// `Debug` rendering of the second side's element.
        second: String,
    },
}

impl Mismatch {
    /// Position at which the walk stopped.
    pub fn position(&self) -> usize {
        match self {
            Mismatch::Size { position, .. } | Mismatch::Correlation { position, .. } => *position,
        }
    }

    /// Returns true for a length mismatch.
    pub fn is_size(&self) -> bool {
        matches!(self, Mismatch::Size { .. })
    }

    /// Returns true for a rejected pair.
    pub fn is_correlation(&self) -> bool {
        matches!(self, Mismatch::Correlation { .. })
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Size { position, longer } => write!(
                f,
                "size mismatch of sequences at position {}: {} sequence is longer",
                position, longer
            ),
            Mismatch::Correlation {
                position,
                first,
                second,
            } => write!(
                f,
                "no correlation between `{}` and `{}` at position {}",
                first, second, position
            ),
        }
    }
}

impl StdError for Mismatch {}

/// Failure yielded by a [`Matched`] cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError<E> {
    /// One of the two sides failed while being walked.
    Upstream(E),
    /// The sides do not match.
    InvalidState(Mismatch),
}

impl<E> MatchError<E> {
    /// Returns the mismatch, if that is what this is.
    pub fn mismatch(&self) -> Option<&Mismatch> {
        match self {
            MatchError::InvalidState(m) => Some(m),
            MatchError::Upstream(_) => None,
        }
    }

    /// Get the upstream failure if present.
    pub fn into_upstream(self) -> Option<E> {
        match self {
            MatchError::Upstream(e) => Some(e),
            MatchError::InvalidState(_) => None,
        }
    }
}

impl<E> From<Mismatch> for MatchError<E> {
    fn from(mismatch: Mismatch) -> Self {
        MatchError::InvalidState(mismatch)
    }
}

impl<E: fmt::Display> fmt::Display for MatchError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::Upstream(e) => write!(f, "{}", e),
            MatchError::InvalidState(m) => write!(f, "{}", m),
        }
    }
}

impl<E: StdError + 'static> StdError for MatchError<E> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            MatchError::Upstream(e) => Some(e),
            MatchError::InvalidState(m) => Some(m),
        }
    }
}

/// Two sequences validated against each other, position by position.
///
/// # Example
///
/// ```rust
/// use slackwater::prelude::*;
/// use slackwater::Matched;
///
/// let files = Values::new(vec!["a.rs", "b.rs"]);
/// let stems = Values::new(vec!["a", "b"]);
/// let checked = Matched::with(
///     |file: &&str, stem: &&str| file.starts_with(stem),
///     files,
///     stems,
/// );
/// assert_eq!(checked.collect_vec(), Ok(vec!["a.rs", "b.rs"]));
/// ```
pub struct Matched<'a, X, E> {
    walk: Recomputable<'a, Vec<X>, MatchError<E>>,
}

impl<X, E> fmt::Debug for Matched<'_, X, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matched").field("walk", &self.walk).finish()
    }
}

impl<'a, X: 'a, E: 'a> Matched<'a, X, E> {
    /// Match two sequences of the same element type by equality.
    pub fn new<A, B>(fst: A, snd: B) -> Self
    where
        A: Sequence<Item = X, Error = E> + 'a,
        B: Sequence<Item = X, Error = E> + 'a,
        X: PartialEq + fmt::Debug,
    {
        Self::with(|a: &X, b: &X| a == b, fst, snd)
    }

    /// Match two sequences with a custom correlation function.
    pub fn with<A, B, F>(correlation: F, fst: A, snd: B) -> Self
    where
        A: Sequence<Item = X, Error = E> + 'a,
        B: Sequence<Error = E> + 'a,
        X: fmt::Debug,
        B::Item: fmt::Debug,
        F: Fn(&X, &B::Item) -> bool + 'a,
    {
        Matched {
            walk: Recomputable::new(move || walk(&fst, &snd, &correlation)),
        }
    }

    /// Run the lockstep walk now and return its result.
    ///
    /// Same walk a cursor request triggers; nothing is remembered between
    /// calls.
    pub fn validate(&self) -> Result<Vec<X>, MatchError<E>> {
        self.walk.resolve()
    }
}

fn walk<A, B, F>(
    fst: &A,
    snd: &B,
    correlation: &F,
) -> Result<Vec<A::Item>, MatchError<A::Error>>
where
    A: Sequence,
    B: Sequence<Error = A::Error>,
    A::Item: fmt::Debug,
    B::Item: fmt::Debug,
    F: Fn(&A::Item, &B::Item) -> bool,
{
    #[cfg(feature = "tracing")]
    tracing::trace!("starting matched walk");

    let mut left = fst.cursor();
    let mut right = snd.cursor();
    let mut matched = Vec::new();
    let mut position = 0;

    loop {
        // Exhaustion is decided before either pulled outcome is inspected.
        let (x, y) = match (left.next(), right.next()) {
            (None, None) => return Ok(matched),
            (Some(_), None) => return Err(size_mismatch(position, Side::First)),
            (None, Some(_)) => return Err(size_mismatch(position, Side::Second)),
            (Some(x), Some(y)) => (x, y),
        };
        let x = x.map_err(MatchError::Upstream)?;
        let y = y.map_err(MatchError::Upstream)?;

        if !correlation(&x, &y) {
            return Err(mismatch(Mismatch::Correlation {
                position,
                first: format!("{:?}", x),
                second: format!("{:?}", y),
            }));
        }
        matched.push(x);
        position += 1;
    }
}

fn size_mismatch<E>(position: usize, longer: Side) -> MatchError<E> {
    mismatch(Mismatch::Size { position, longer })
}

fn mismatch<E>(mismatch: Mismatch) -> MatchError<E> {
    #[cfg(feature = "tracing")]
    tracing::debug!(position = mismatch.position(), "matched walk failed: {}", mismatch);
    MatchError::InvalidState(mismatch)
}

impl<X, E> Sequence for Matched<'_, X, E> {
    type Item = X;
    type Error = MatchError<E>;
    type Cursor<'s>
        = MatchedCursor<X, E>
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        let state = match self.validate() {
            Ok(items) => CursorState::Ready(items.into_iter()),
            Err(e) => CursorState::Failed(Some(e)),
        };
        MatchedCursor { state }
    }
}

/// Cursor over a [`Matched`] sequence.
///
/// Owns the validated elements, or the single failure of the walk.
pub struct MatchedCursor<X, E> {
    state: CursorState<X, E>,
}

enum CursorState<X, E> {
    Ready(vec::IntoIter<X>),
    Failed(Option<MatchError<E>>),
}

impl<X: fmt::Debug, E: fmt::Debug> fmt::Debug for MatchedCursor<X, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            CursorState::Ready(items) => f
                .debug_struct("MatchedCursor")
                .field("remaining", &items.as_slice())
                .finish(),
            CursorState::Failed(err) => f
                .debug_struct("MatchedCursor")
                .field("failure", err)
                .finish(),
        }
    }
}

impl<X, E> Iterator for MatchedCursor<X, E> {
    type Item = Result<X, MatchError<E>>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.state {
            CursorState::Ready(items) => items.next().map(Ok),
            CursorState::Failed(err) => err.take().map(Err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::SequenceExt;
    use crate::source::{from_fn, Values};
    use std::cell::Cell;

    #[test]
    fn test_equal_sides_yield_first() {
        let matched = Matched::new(Values::new(vec![1, 2, 3]), Values::new(vec![1, 2, 3]));
        assert_eq!(matched.collect_vec(), Ok(vec![1, 2, 3]));
    }

    #[test]
    fn test_both_empty() {
        let matched = Matched::new(Values::<i32>::new(vec![]), Values::new(vec![]));
        assert_eq!(matched.collect_vec(), Ok(vec![]));
    }

    #[test]
    fn test_shorter_first_side() {
        let matched = Matched::new(Values::new(vec![1, 2]), Values::new(vec![1, 2, 3]));
        let err = matched.collect_vec().unwrap_err();
        assert_eq!(
            err,
            MatchError::InvalidState(Mismatch::Size {
                position: 2,
                longer: Side::Second,
            })
        );
    }

    #[test]
    fn test_shorter_second_side() {
        let matched = Matched::new(Values::new(vec![1, 2, 3]), Values::new(vec![1]));
        let err = matched.validate().unwrap_err();
        let mismatch = err.mismatch().expect("invalid state");
        assert!(mismatch.is_size());
        assert_eq!(mismatch.position(), 1);
    }

    #[test]
    fn test_correlation_failure_names_pair() {
        let matched = Matched::new(Values::new(vec![1, 2, 3]), Values::new(vec![1, 5, 3]));
        let err = matched.collect_vec().unwrap_err();
        assert_eq!(
            err,
            MatchError::InvalidState(Mismatch::Correlation {
                position: 1,
                first: "2".to_string(),
                second: "5".to_string(),
            })
        );
        assert_eq!(
            err.to_string(),
            "no correlation between `2` and `5` at position 1"
        );
    }

    #[test]
    fn test_heterogeneous_sides() {
        let numbers = Values::new(vec![1, 2, 3]);
        let words = Values::new(vec!["one", "two", "three"]);
        let lengths = Values::new(vec![3usize, 3, 5]);

        let by_length = Matched::with(|w: &&str, n: &usize| w.len() == *n, words, lengths);
        assert_eq!(by_length.collect_vec(), Ok(vec!["one", "two", "three"]));

        let letters = Values::new(vec!["a", "b", "c"]);
        let positive = Matched::with(|n: &i32, _: &&str| *n > 0, numbers, letters);
        assert_eq!(positive.collect_vec(), Ok(vec![1, 2, 3]));
    }

    #[test]
    fn test_construction_walks_nothing() {
        let calls = Cell::new(0);
        let _matched = Matched::with(
            |a: &i32, b: &i32| {
                calls.set(calls.get() + 1);
                a == b
            },
            Values::new(vec![1]),
            Values::new(vec![1]),
        );
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_every_cursor_reruns_walk() {
        let calls = Cell::new(0);
        let matched = Matched::with(
            |a: &i32, b: &i32| {
                calls.set(calls.get() + 1);
                a == b
            },
            Values::new(vec![1, 2, 3]),
            Values::new(vec![1, 2, 3]),
        );

        assert_eq!(matched.collect_vec(), Ok(vec![1, 2, 3]));
        assert_eq!(calls.get(), 3);
        assert_eq!(matched.collect_vec(), Ok(vec![1, 2, 3]));
        assert_eq!(calls.get(), 6);
    }

    #[test]
    fn test_one_shot_side_differs_on_second_traversal() {
        let served = Cell::new(false);
        let one_shot = from_fn(|| {
            if served.replace(true) {
                vec![]
            } else {
                vec![Ok::<_, ()>(1), Ok(2)]
            }
        });
        let matched = Matched::new(Values::typed(vec![1, 2]), one_shot);

        assert_eq!(matched.collect_vec(), Ok(vec![1, 2]));
        let err = matched.collect_vec().unwrap_err();
        assert!(err.mismatch().is_some_and(Mismatch::is_size));
    }

    #[test]
    fn test_upstream_failure_relayed() {
        let broken = from_fn(|| vec![Ok(1), Err("second side broke")]);
        let matched = Matched::new(Values::typed(vec![1, 2]), broken);
        assert_eq!(
            matched.collect_vec(),
            Err(MatchError::Upstream("second side broke"))
        );
    }

    #[test]
    fn test_exhausted_side_wins_over_failure_on_other_side() {
        let late = from_fn(|| vec![Ok(1), Err("late")]);
        let matched = Matched::new(Values::typed(vec![1]), late);
        assert_eq!(
            matched.collect_vec(),
            Err(MatchError::InvalidState(Mismatch::Size {
                position: 1,
                longer: Side::Second,
            }))
        );

        let early = from_fn(|| vec![Ok(1), Err("early")]);
        let matched = Matched::new(early, Values::typed(vec![1]));
        assert_eq!(
            matched.validate(),
            Err(MatchError::InvalidState(Mismatch::Size {
                position: 1,
                longer: Side::First,
            }))
        );
    }

    #[test]
    fn test_first_side_failure_reported_before_second() {
        let first = from_fn(|| vec![Err::<i32, _>("first")]);
        let second = from_fn(|| vec![Err::<i32, _>("second")]);
        let matched = Matched::new(first, second);
        assert_eq!(matched.validate(), Err(MatchError::Upstream("first")));
    }

    #[test]
    fn test_failed_cursor_yields_once() {
        let matched = Matched::new(Values::new(vec![1]), Values::new(vec![2]));
        let mut cursor = matched.cursor();
        assert!(matches!(cursor.next(), Some(Err(MatchError::InvalidState(_)))));
        assert!(cursor.next().is_none());
    }

    #[test]
    fn test_size_display() {
        let err = Mismatch::Size {
            position: 2,
            longer: Side::First,
        };
        assert_eq!(
            err.to_string(),
            "size mismatch of sequences at position 2: first sequence is longer"
        );
    }

    #[test]
    fn test_error_source_chain() {
        let err: MatchError<std::io::Error> = Mismatch::Size {
            position: 0,
            longer: Side::Second,
        }
        .into();
        assert!(err.source().is_some());
        assert!(err.into_upstream().is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_mismatch_serde_round_trip() {
        let original = Mismatch::Correlation {
            position: 4,
            first: "\"x\"".to_string(),
            second: "\"y\"".to_string(),
        };
        let json = serde_json::to_string(&original).unwrap();
        let restored: Mismatch = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }

    #[cfg(feature = "tracing")]
    mod tracing_tests {
        use super::*;
        use crate::source::Values;
        use tracing_test::traced_test;

        #[traced_test]
        #[test]
        fn logs_mismatch_position() {
            let matched = Matched::new(Values::new(vec![1, 2]), Values::new(vec![1, 3]));
            assert!(matched.validate().is_err());
            assert!(logs_contain("starting matched walk"));
            assert!(logs_contain("matched walk failed"));
            assert!(logs_contain("position=1"));
        }
    }
}

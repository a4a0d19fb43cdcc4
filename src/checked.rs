//! Failure translation at a chosen boundary
//!
//! [`Checked`] wraps an action and a mapping function. Running it executes
//! the action and re-types whatever recoverable failure comes out into the
//! caller's chosen error type `E`:
//!
//! | Action result | `exec` returns |
//! |---|---|
//! | `Ok(output)` | `Ok(output)` |
//! | `Failure::Recoverable(err)` where `err` is an `E` | that same `E`, untouched |
//! | any other `Failure::Recoverable(err)` | `mapping(err)` |
//! | `Failure::Fatal(f)` | `f`, untouched; the mapping never sees it |
//!
//! Panics are never caught.
//!
//! The mapping receives the original failure by value, so it can keep it as
//! the new error's `source()`.
//!
//! # Example
//!
//! ```rust
//! use slackwater::checked::{Checked, Failure};
//! use std::io;
//!
//! let parse = Checked::new(
//!     |text: &str| -> Result<i32, Failure> { Ok(text.trim().parse::<i32>()?) },
//!     io::Error::other,
//! );
//!
//! assert_eq!(parse.exec(" 42 ").ok(), Some(42));
//!
//! match parse.exec("forty-two") {
//!     Err(Failure::Recoverable(err)) => {
//!         // Re-typed as io::Error, original kept inside
//!         assert_eq!(err.kind(), io::ErrorKind::Other);
//!         assert!(err.get_ref().unwrap().is::<std::num::ParseIntError>());
//!     }
//!     other => panic!("expected an io::Error, got {:?}", other),
//! }
//! ```

use std::error::Error as StdError;
use std::fmt;
use std::marker::PhantomData;

/// A boxed recoverable failure of any type.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// The category of a [`Fatal`] failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FatalKind {
    /// An internal invariant does not hold.
    InvalidState,
    /// A caller passed something the action cannot work with.
    InvalidArgument,
    /// The operation is not supported.
    Unsupported,
}

impl fmt::Display for FatalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FatalKind::InvalidState => write!(f, "invalid state"),
            FatalKind::InvalidArgument => write!(f, "invalid argument"),
            FatalKind::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// A programming-error failure. Never translated.
///
/// `Fatal` does not implement `std::error::Error`, so `?` never converts it
/// into a recoverable failure.
///
/// # Examples
///
/// ```rust
/// use slackwater::checked::{Fatal, FatalKind};
///
/// let fatal = Fatal::new(FatalKind::InvalidState, "cursor reused");
/// assert_eq!(fatal.kind(), FatalKind::InvalidState);
/// assert_eq!(fatal.to_string(), "invalid state: cursor reused");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fatal {
    kind: FatalKind,
    message: String,
}

impl Fatal {
    /// Create a fatal failure.
    pub fn new(kind: FatalKind, message: impl Into<String>) -> Self {
        Fatal {
            kind,
            message: message.into(),
        }
    }

    /// Shorthand for an [`FatalKind::InvalidState`] failure.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::new(FatalKind::InvalidState, message)
    }

    /// The category.
    pub fn kind(&self) -> FatalKind {
        self.kind
    }

    /// The message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Fatal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl From<crate::matched::Mismatch> for Fatal {
    fn from(mismatch: crate::matched::Mismatch) -> Self {
        Fatal::invalid_state(mismatch.to_string())
    }
}

/// A failure tagged as recoverable or fatal.
///
/// Actions wrapped by [`Checked`] return `Result<O, Failure>`; `Checked`
/// returns `Result<O, Failure<E>>`. Only the `Recoverable` tag is ever
/// translated.
///
/// Any `std::error::Error + Send + Sync + 'static` converts into
/// `Failure::Recoverable` through `?`. Raise a fatal failure explicitly with
/// [`Failure::fatal`] or `Failure::from(fatal)`.
#[derive(Debug)]
pub enum Failure<R = BoxError> {
    /// Expected to be caught and re-typed by calling code.
    Recoverable(R),
    /// A programming error; passed through as is.
    Fatal(Fatal),
}

impl<R> Failure<R> {
    /// Create a fatal failure.
    pub fn fatal(kind: FatalKind, message: impl Into<String>) -> Self {
        Failure::Fatal(Fatal::new(kind, message))
    }

    /// Returns true if this failure may be translated.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Failure::Recoverable(_))
    }

    /// Returns true if this is a programming error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Failure::Fatal(_))
    }

    /// Get the recoverable failure if present.
    pub fn into_recoverable(self) -> Option<R> {
        match self {
            Failure::Recoverable(r) => Some(r),
            Failure::Fatal(_) => None,
        }
    }

    /// Get the fatal failure if present.
    pub fn as_fatal(&self) -> Option<&Fatal> {
        match self {
            Failure::Fatal(f) => Some(f),
            Failure::Recoverable(_) => None,
        }
    }
}

impl Failure {
    /// Box any error as a recoverable failure.
    pub fn recoverable<X>(error: X) -> Self
    where
        X: Into<BoxError>,
    {
        Failure::Recoverable(error.into())
    }
}

impl<X> From<X> for Failure
where
    X: StdError + Send + Sync + 'static,
{
    fn from(error: X) -> Self {
        Failure::Recoverable(Box::new(error))
    }
}

impl<R> From<Fatal> for Failure<R> {
    fn from(fatal: Fatal) -> Self {
        Failure::Fatal(fatal)
    }
}

impl<R: fmt::Display> fmt::Display for Failure<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Recoverable(r) => write!(f, "{}", r),
            Failure::Fatal(fatal) => write!(f, "{}", fatal),
        }
    }
}

/// The terminal state of one [`Checked`] execution.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome<O, E> {
    /// The action finished without failure.
    Completed(O),
    /// The action failed with an `E`; returned without wrapping.
    Passthrough(E),
    /// The action failed with another recoverable failure, re-typed by the mapping.
    Mapped(E),
    /// The action raised a programming error; the mapping was not called.
    Fatal(Fatal),
}

impl<O, E> Outcome<O, E> {
    /// Returns true unless the action completed.
    pub fn is_failure(&self) -> bool {
        !matches!(self, Outcome::Completed(_))
    }

    /// Collapse into the result `exec` returns.
    pub fn into_result(self) -> Result<O, Failure<E>> {
        match self {
            Outcome::Completed(o) => Ok(o),
            Outcome::Passthrough(e) | Outcome::Mapped(e) => Err(Failure::Recoverable(e)),
            Outcome::Fatal(f) => Err(Failure::Fatal(f)),
        }
    }
}

/// An action whose recoverable failures are re-typed into `E`.
///
/// # Type Parameters
///
/// * `A` - The action, `Fn(I) -> Result<O, Failure>`
/// * `M` - The mapping, `Fn(BoxError) -> E`
/// * `E` - The target error type
pub struct Checked<A, M, E> {
    action: A,
    mapping: M,
    _target: PhantomData<fn() -> E>,
}

impl<A, M, E> fmt::Debug for Checked<A, M, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checked")
            .field("action", &"<function>")
            .field("mapping", &"<function>")
            .finish()
    }
}

impl<A, M, E> Checked<A, M, E>
where
    M: Fn(BoxError) -> E,
    E: StdError + 'static,
{
    /// Wrap an action with the mapping used for foreign recoverable failures.
    pub fn new<I, O>(action: A, mapping: M) -> Self
    where
        A: Fn(I) -> Result<O, Failure>,
    {
        Checked {
            action,
            mapping,
            _target: PhantomData,
        }
    }

    /// Execute the action and report which terminal state it reached.
    pub fn run<I, O>(&self, input: I) -> Outcome<O, E>
    where
        A: Fn(I) -> Result<O, Failure>,
    {
        let err = match (self.action)(input) {
            Ok(output) => return Outcome::Completed(output),
            Err(Failure::Fatal(fatal)) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(kind = %fatal.kind(), "fatal failure passed through untranslated");
                return Outcome::Fatal(fatal);
            }
            Err(Failure::Recoverable(err)) => err,
        };

        match err.downcast::<E>() {
            Ok(same) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("failure already of target type, passed through");
                Outcome::Passthrough(*same)
            }
            Err(other) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(original = %other, "recoverable failure mapped to target type");
                Outcome::Mapped((self.mapping)(other))
            }
        }
    }

    /// Execute the action, translating its recoverable failures into `E`.
    pub fn exec<I, O>(&self, input: I) -> Result<O, Failure<E>>
    where
        A: Fn(I) -> Result<O, Failure>,
    {
        self.run(input).into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matched::{Mismatch, Side};
    use std::cell::Cell;
    use std::io;
    use std::num::ParseIntError;

    #[derive(Debug)]
    struct Eof(&'static str);

    impl fmt::Display for Eof {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "end of file: {}", self.0)
        }
    }

    impl StdError for Eof {}

    #[test]
    fn test_fatal_is_not_wrapped() {
        let mapped = Cell::new(false);
        let checked = Checked::new(
            |_: bool| -> Result<(), Failure> {
                Err(Failure::fatal(FatalKind::InvalidState, "runtime1"))
            },
            |e| {
                mapped.set(true);
                io::Error::other(e)
            },
        );

        match checked.exec(true) {
            Err(Failure::Fatal(fatal)) => {
                assert_eq!(fatal.kind(), FatalKind::InvalidState);
                assert_eq!(fatal.message(), "runtime1");
            }
            other => panic!("expected fatal failure, got {:?}", other),
        }
        assert!(!mapped.get());
    }

    #[test]
    fn test_foreign_recoverable_is_mapped() {
        let checked = Checked::new(
            |_: bool| -> Result<(), Failure> { Err(Eof("runtime2").into()) },
            io::Error::other,
        );

        let outcome = checked.run(true);
        let err = match outcome {
            Outcome::Mapped(err) => err,
            other => panic!("expected mapped failure, got {:?}", other),
        };
        assert_eq!(err.kind(), io::ErrorKind::Other);
        let cause = err.get_ref().expect("original kept");
        assert!(cause.is::<Eof>());
        assert_eq!(cause.to_string(), "end of file: runtime2");
    }

    #[test]
    fn test_extra_wrapping_ignored() {
        let checked = Checked::new(
            |_: bool| -> Result<(), Failure> {
                Err(io::Error::new(io::ErrorKind::InvalidData, "runtime3").into())
            },
            io::Error::other,
        );

        let outcome = checked.run(true);
        let err = match outcome {
            Outcome::Passthrough(err) => err,
            other => panic!("expected passthrough, got {:?}", other),
        };
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert_eq!(err.to_string(), "runtime3");
        let inner = err.get_ref().expect("custom payload");
        assert!(!inner.is::<io::Error>());
    }

    #[test]
    fn test_no_failure_runs_action_once() {
        let counter = Cell::new(0);
        let checked = Checked::new(
            |_: bool| -> Result<(), Failure> {
                counter.set(counter.get() + 1);
                Ok(())
            },
            io::Error::other,
        );

        assert!(checked.exec(false).is_ok());
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn test_question_mark_boxes_as_recoverable() {
        fn parse(text: &str) -> Result<i32, Failure> {
            Ok(text.parse::<i32>()?)
        }

        let failure = parse("x").unwrap_err();
        assert!(failure.is_recoverable());
        let boxed = failure.into_recoverable().unwrap();
        assert!(boxed.is::<ParseIntError>());
    }

    #[test]
    fn test_function_form_returns_output() {
        let double = Checked::new(
            |n: i32| -> Result<i32, Failure> { Ok(n * 2) },
            io::Error::other,
        );
        assert!(matches!(double.run(21), Outcome::Completed(42)));
    }

    #[test]
    fn test_mismatch_raised_as_fatal() {
        let checked = Checked::new(
            |_: ()| -> Result<(), Failure> {
                let mismatch = Mismatch::Size {
                    position: 3,
                    longer: Side::First,
                };
                Err(Fatal::from(mismatch).into())
            },
            io::Error::other,
        );

        let failure = checked.exec(()).unwrap_err();
        let fatal = failure.as_fatal().expect("fatal");
        assert_eq!(fatal.kind(), FatalKind::InvalidState);
        assert!(fatal.message().contains("position 3"));
    }

    #[test]
    fn test_outcome_into_result() {
        let mapped: Outcome<(), io::Error> = Outcome::Mapped(io::Error::other("x"));
        assert!(mapped.is_failure());
        assert!(matches!(mapped.into_result(), Err(Failure::Recoverable(_))));

        let done: Outcome<u8, io::Error> = Outcome::Completed(1);
        assert!(!done.is_failure());
        assert_eq!(done.into_result().ok(), Some(1));
    }

    #[test]
    fn test_failure_display() {
        let recoverable: Failure<io::Error> = Failure::Recoverable(io::Error::other("disk full"));
        assert_eq!(recoverable.to_string(), "disk full");

        let fatal: Failure = Failure::fatal(FatalKind::Unsupported, "seek");
        assert_eq!(fatal.to_string(), "unsupported: seek");
        assert!(fatal.is_fatal());
    }

    #[cfg(feature = "tracing")]
    mod tracing_tests {
        use super::*;
        use tracing_test::traced_test;

        #[traced_test]
        #[test]
        fn logs_mapped_failure_with_original() {
            let checked = Checked::new(
                |_: ()| -> Result<(), Failure> {
                    Err(Failure::recoverable(Eof("header")))
                },
                io::Error::other,
            );
            let _ = checked.run(());
            assert!(logs_contain("recoverable failure mapped to target type"));
            assert!(logs_contain("end of file: header"));
        }

        #[traced_test]
        #[test]
        fn logs_fatal_passthrough() {
            let checked = Checked::new(
                |_: ()| -> Result<(), Failure> {
                    Err(Failure::fatal(FatalKind::InvalidArgument, "negative length"))
                },
                io::Error::other,
            );
            let _ = checked.run(());
            assert!(logs_contain("fatal failure passed through untranslated"));
            assert!(logs_contain("invalid argument"));
        }
    }
}

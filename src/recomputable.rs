//! Deferred values that are recomputed on every use
//!
//! A [`Recomputable`] holds a zero-argument function and nothing else.
//! Constructing one evaluates nothing; every call to
//! [`resolve`](Recomputable::resolve) re-invokes the function. There is no
//! memoization.
//!
//! # Example
//!
//! ```
//! use slackwater::Recomputable;
//! use std::cell::Cell;
//!
//! let calls = Cell::new(0);
//! let value = Recomputable::<_, ()>::new(|| {
//!     calls.set(calls.get() + 1);
//!     Ok(calls.get() * 10)
//! });
//!
//! assert_eq!(calls.get(), 0);
//! assert_eq!(value.resolve(), Ok(10));
//! assert_eq!(value.resolve(), Ok(20));
//! assert_eq!(calls.get(), 2);
//! ```

use std::convert::Infallible;
use std::fmt;

/// A value produced by re-running a function on every [`resolve`](Recomputable::resolve).
///
/// # Type Parameters
///
/// * `'a` - Lifetime of whatever the function borrows
/// * `T` - The produced value
/// * `E` - The failure the function may return
pub struct Recomputable<'a, T, E = Infallible> {
    compute: Box<dyn Fn() -> Result<T, E> + 'a>,
}

impl<T, E> fmt::Debug for Recomputable<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recomputable")
            .field("compute", &"<function>")
            .finish()
    }
}

impl<'a, T, E> Recomputable<'a, T, E> {
    /// Defer a computation that may fail.
    pub fn new<F>(compute: F) -> Self
    where
        F: Fn() -> Result<T, E> + 'a,
    {
        Recomputable {
            compute: Box::new(compute),
        }
    }

    /// Defer a computation that never fails.
    ///
    /// # Example
    ///
    /// ```
    /// use slackwater::Recomputable;
    ///
    /// let answer = Recomputable::<_, String>::infallible(|| 6 * 7);
    /// assert_eq!(answer.resolve(), Ok(42));
    /// ```
    pub fn infallible<F>(compute: F) -> Self
    where
        F: Fn() -> T + 'a,
    {
        Self::new(move || Ok(compute()))
    }

    /// A constant; each resolve hands out a fresh clone.
    pub fn constant(value: T) -> Self
    where
        T: Clone + 'a,
    {
        Self::new(move || Ok(value.clone()))
    }

    /// Run the computation again and return its result.
    #[inline]
    pub fn resolve(&self) -> Result<T, E> {
        (self.compute)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_construction_is_lazy() {
        let calls = Cell::new(0);
        let _value = Recomputable::<i32, ()>::infallible(|| {
            calls.set(calls.get() + 1);
            1
        });
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_every_resolve_recomputes() {
        let calls = Cell::new(0);
        let value = Recomputable::<i32, ()>::infallible(|| {
            calls.set(calls.get() + 1);
            calls.get()
        });

        assert_eq!(value.resolve(), Ok(1));
        assert_eq!(value.resolve(), Ok(2));
        assert_eq!(value.resolve(), Ok(3));
    }

    #[test]
    fn test_failure_is_returned_each_time() {
        let value = Recomputable::<i32, _>::new(|| Err("nope"));
        assert_eq!(value.resolve(), Err("nope"));
        assert_eq!(value.resolve(), Err("nope"));
    }

    #[test]
    fn test_constant() {
        let value = Recomputable::<_, ()>::constant(String::from("still"));
        assert_eq!(value.resolve(), Ok(String::from("still")));
        assert_eq!(value.resolve(), Ok(String::from("still")));
    }

    #[test]
    fn test_debug_hides_function() {
        let value = Recomputable::<i32, ()>::constant(1);
        assert!(format!("{:?}", value).contains("<function>"));
    }
}

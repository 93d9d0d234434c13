// Allow must_use_candidate for matcher factory functions since returning the matcher
// without using it is the common pattern for test setup
#![allow(clippy::must_use_candidate)]

//! Matcher trait and assertion entry points.
//!
//! This module provides the constraint side of the crate:
//!
//! - [`Matcher`] trait, implemented by every size matcher
//! - [`Matcher::evaluate`] for turning a match into a pass/fail result
//! - [`assert_that!`](crate::assert_that) for panicking assertions
//! - [`not`] combinator
//!
//! Matchers take the value by `&mut` because measuring a cursor or a
//! one-shot iterator has to drive it.
//!
//! # Example
//!
//! ```rust
//! use testkit_size::assertions::matcher::{not, Matcher};
//! use testkit_size::assertions::has_size;
//!
//! let m = has_size(3);
//! assert!(m.matches(&mut vec![1, 2, 3]));
//!
//! let m = not(has_size(0));
//! assert!(m.matches(&mut vec![1]));
//! ```

use crate::error::{Error, Result};

/// A matcher for testing values.
///
/// # Implementing Custom Matchers
///
/// ```rust
/// use testkit_size::assertions::matcher::Matcher;
///
/// struct AllEven;
///
/// impl Matcher<Vec<i32>> for AllEven {
///     fn matches(&self, value: &mut Vec<i32>) -> bool {
///         value.iter().all(|n| n % 2 == 0)
///     }
///
///     fn describe(&self) -> String {
///         "all even".to_string()
///     }
///
///     fn describe_mismatch(&self, value: &mut Vec<i32>) -> String {
///         format!("{:?} has odd elements", value)
///     }
/// }
///
/// assert!(AllEven.matches(&mut vec![2, 4]));
/// assert!(!AllEven.matches(&mut vec![1, 2]));
/// ```
pub trait Matcher<T: ?Sized> {
    /// Check if the value matches.
    fn matches(&self, value: &mut T) -> bool;

    /// Describe what this matcher expects.
    fn describe(&self) -> String;

    /// Describe why a value didn't match.
    fn describe_mismatch(&self, value: &mut T) -> String;

    /// Evaluate the matcher against a value.
    ///
    /// With `return_result` set, the outcome is returned as `Ok(bool)`.
    /// Otherwise a mismatch is reported as [`Error::AssertionFailed`], with
    /// `description` prepended to the failure message when non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AssertionFailed`] if the value does not match and
    /// `return_result` is false.
    ///
    /// # Example
    ///
    /// ```rust
    /// use testkit_size::assertions::{has_size, matcher::Matcher};
    ///
    /// let m = has_size(2);
    /// assert!(!m.evaluate(&mut vec![1], "", true).unwrap());
    ///
    /// let err = m.evaluate(&mut vec![1], "", false).unwrap_err();
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Assertion failed: Failed asserting that actual size 1 matches expected size 2."
    /// );
    /// ```
    fn evaluate(&self, value: &mut T, description: &str, return_result: bool) -> Result<bool> {
        let matched = self.matches(value);
        if return_result || matched {
            return Ok(matched);
        }

        let mut message = format!("Failed asserting that {}.", self.describe_mismatch(value));
        if !description.is_empty() {
            message = format!("{description}\n{message}");
        }
        Err(Error::AssertionFailed(message))
    }
}

/// Assert that a value matches a matcher.
///
/// The value is borrowed mutably for the duration of the check.
///
/// # Panics
///
/// Panics with the failure message of [`Matcher::evaluate`] if the value
/// doesn't match.
///
/// # Example
///
/// ```rust
/// use testkit_size::{assert_that, assertions::has_size};
///
/// assert_that!(vec![1, 2, 3], has_size(3));
/// assert_that!([0u8; 0], has_size(0), "buffer should start empty");
/// ```
#[macro_export]
macro_rules! assert_that {
    ($value:expr, $matcher:expr) => {{
        let value = &mut $value;
        let matcher = &$matcher;
        if let ::std::result::Result::Err(err) =
            $crate::assertions::matcher::Matcher::evaluate(matcher, value, "", false)
        {
            panic!(
                "{}\n  expected: {}",
                err,
                $crate::assertions::matcher::describe_for(matcher, value)
            );
        }
    }};
    ($value:expr, $matcher:expr, $($arg:tt)+) => {{
        let value = &mut $value;
        let matcher = &$matcher;
        let description = format!($($arg)+);
        if let ::std::result::Result::Err(err) =
            $crate::assertions::matcher::Matcher::evaluate(matcher, value, &description, false)
        {
            panic!(
                "{}\n  expected: {}",
                err,
                $crate::assertions::matcher::describe_for(matcher, value)
            );
        }
    }};
}

/// Describe a matcher, taking the matched type from `value`.
///
/// Used by [`assert_that!`](crate::assert_that): size matchers match every
/// [`Sizeable`](crate::traversable::Sizeable) type, so `describe` alone does
/// not say which `Matcher<T>` impl is meant.
#[doc(hidden)]
pub fn describe_for<T: ?Sized, M: Matcher<T> + ?Sized>(matcher: &M, _value: &mut T) -> String {
    matcher.describe()
}

// =============================================================================
// Combinators
// =============================================================================

/// Create a negating matcher.
///
/// # Example
///
/// ```rust
/// use testkit_size::assertions::{has_size, matcher::{not, Matcher}};
///
/// let m = not(has_size(0));
/// assert!(m.matches(&mut vec![1]));
/// assert!(!m.matches(&mut Vec::<i32>::new()));
/// ```
pub fn not<T: ?Sized, M: Matcher<T> + 'static>(matcher: M) -> NotMatcher<T> {
    NotMatcher {
        inner: Box::new(matcher),
    }
}

/// Matcher that negates another matcher.
pub struct NotMatcher<T: ?Sized> {
    inner: Box<dyn Matcher<T>>,
}

impl<T: ?Sized> Matcher<T> for NotMatcher<T> {
    fn matches(&self, value: &mut T) -> bool {
        !self.inner.matches(value)
    }

    fn describe(&self) -> String {
        format!("not {}", self.inner.describe())
    }

    fn describe_mismatch(&self, _value: &mut T) -> String {
        format!("value unexpectedly matched: {}", self.inner.describe())
    }
}

// Implement Matcher for Box<dyn Matcher> to allow nesting
impl<T: ?Sized> Matcher<T> for Box<dyn Matcher<T>> {
    fn matches(&self, value: &mut T) -> bool {
        (**self).matches(value)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }

    fn describe_mismatch(&self, value: &mut T) -> String {
        (**self).describe_mismatch(value)
    }
}

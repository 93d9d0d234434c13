//! Size assertions.
//!
//! This module provides assertion utilities built on the [`Sizeable`]
//! capability model:
//!
//! - [`has_size`] - Assert the number of elements of a value
//! - [`same_size_as`] - Assert a value has as many elements as another
//! - [`is_empty`] - Assert a value has no elements
//! - [`size_of`] - Measure a value once
//! - [`matcher`] - The [`Matcher`](matcher::Matcher) trait and combinators
//!
//! # Example
//!
//! ```rust
//! use testkit_size::assert_that;
//! use testkit_size::assertions::{has_size, is_empty};
//! use testkit_size::traversable::Generator;
//!
//! assert_that!(vec![1, 2, 3], has_size(3));
//! assert_that!(Vec::<u8>::new(), is_empty());
//!
//! let mut lines = Generator::new("a\nb".lines());
//! assert_that!(lines, has_size(2));
//! ```
//!
//! [`Sizeable`]: crate::traversable::Sizeable

pub mod matcher;
mod size;

pub use size::{has_size, is_empty, same_size_as, size_of, IsEmptyMatcher, Size, SizeMatcher};

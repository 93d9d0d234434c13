//! Size matchers for collections, cursors and one-shot iterators.
//!
//! [`SizeMatcher`] compares the number of elements of any [`Sizeable`] value
//! with an expected count. Collections report their length directly. Cursors
//! and traversables are counted by iterating them:
//!
//! - a rewindable cursor is counted from its first element and then put back
//!   at the key it had before
//! - a one-shot cursor or traversable is counted from where it is, and the
//!   count is remembered so evaluating the same source again gives the same
//!   answer instead of zero
//!
//! # Example
//!
//! ```rust
//! use testkit_size::assertions::{has_size, matcher::Matcher};
//! use testkit_size::traversable::{ArrayCursor, Generator};
//!
//! let m = has_size(3);
//! assert!(m.matches(&mut vec![1, 2, 3]));
//!
//! let mut cursor = ArrayCursor::new(vec!['a', 'b', 'c']);
//! assert!(m.matches(&mut cursor));
//! assert_eq!(cursor.current(), Some(&'a'));
//!
//! let mut generator = Generator::new(1..=3);
//! assert!(m.matches(&mut generator));
//! assert!(m.matches(&mut generator));
//! ```

use std::collections::HashMap;
use std::fmt;

use parking_lot::Mutex;
use tracing::{debug, trace};

use super::matcher::Matcher;
use crate::error::{Error, Result};
use crate::traversable::{Cursor, SizeClass, Sizeable, SourceId, Traversable};

/// Measured size of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Size {
    /// Number of elements.
    Count(usize),
    /// The value has no size.
    Unavailable,
}

impl Size {
    /// The element count, if there is one.
    #[must_use]
    pub fn count(self) -> Option<usize> {
        match self {
            Self::Count(n) => Some(n),
            Self::Unavailable => None,
        }
    }
}

impl From<Option<usize>> for Size {
    fn from(count: Option<usize>) -> Self {
        count.map_or(Self::Unavailable, Self::Count)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Unavailable => f.write_str("unavailable"),
        }
    }
}

/// Create a size matcher.
///
/// # Example
///
/// ```rust
/// use testkit_size::assertions::{has_size, matcher::Matcher};
///
/// let m = has_size(0);
/// assert!(m.matches(&mut Vec::<i32>::new()));
/// assert!(!m.matches(&mut vec![1]));
/// ```
#[must_use]
pub fn has_size(expected: usize) -> SizeMatcher {
    SizeMatcher::new(expected)
}

/// Create a size matcher expecting the size of `reference`.
///
/// The reference is measured once, with the same rules as [`SizeMatcher`].
///
/// # Errors
///
/// Returns [`Error::Uncountable`] if `reference` has no size.
///
/// # Example
///
/// ```rust
/// use testkit_size::assertions::{same_size_as, matcher::Matcher};
/// use std::collections::HashSet;
///
/// let mut reference: HashSet<_> = [1, 2].into_iter().collect();
/// let m = same_size_as(&mut reference).unwrap();
/// assert!(m.matches(&mut vec!["x", "y"]));
/// ```
pub fn same_size_as<S: Sizeable + ?Sized>(reference: &mut S) -> Result<SizeMatcher> {
    match size_of(reference) {
        Size::Count(n) => Ok(SizeMatcher::new(n)),
        Size::Unavailable => Err(Error::Uncountable),
    }
}

/// Create an emptiness matcher.
///
/// # Example
///
/// ```rust
/// use testkit_size::assertions::{is_empty, matcher::Matcher};
///
/// let m = is_empty();
/// assert!(m.matches(&mut Vec::<i32>::new()));
/// assert!(!m.matches(&mut vec![1]));
/// ```
#[must_use]
pub fn is_empty() -> IsEmptyMatcher {
    IsEmptyMatcher {
        inner: SizeMatcher::new(0),
    }
}

/// Measure a value once.
///
/// One-shot sources are consumed; use a [`SizeMatcher`] to get repeatable
/// results across several measurements of the same source.
///
/// ```rust
/// use testkit_size::assertions::{size_of, Size};
///
/// assert_eq!(size_of(&mut vec![1, 2]), Size::Count(2));
/// assert_eq!(size_of(&mut None::<Vec<i32>>), Size::Unavailable);
/// ```
pub fn size_of<S: Sizeable + ?Sized>(value: &mut S) -> Size {
    SizeMatcher::new(0).size_of(value)
}

/// Matcher for the number of elements of a value.
///
/// Counts of non-rewindable sources are cached by [`SourceId`] for the
/// lifetime of the matcher.
#[derive(Debug)]
pub struct SizeMatcher {
    expected: usize,
    resolved: Mutex<HashMap<SourceId, usize>>,
}

impl SizeMatcher {
    /// Create a matcher expecting `expected` elements.
    #[must_use]
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            resolved: Mutex::new(HashMap::new()),
        }
    }

    /// Expected number of elements.
    #[must_use]
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Measure `value`.
    pub fn size_of<S: Sizeable + ?Sized>(&self, value: &mut S) -> Size {
        self.size_of_class(value.size_class())
    }

    fn size_of_class(&self, mut class: SizeClass<'_>) -> Size {
        loop {
            match class {
                SizeClass::Counted(n) => return Size::Count(n),
                SizeClass::Aggregate(aggregate) => class = aggregate.inner(),
                SizeClass::Cursor(cursor) => return Size::Count(self.count_cursor(cursor)),
                SizeClass::Traversable(source) => return Size::Count(self.count_traversable(source)),
                SizeClass::Unsized => return Size::Unavailable,
            }
        }
    }

    fn cached(&self, id: SourceId) -> Option<usize> {
        let count = self.resolved.lock().get(&id).copied();
        if let Some(n) = count {
            trace!(%id, count = n, "using cached size");
        }
        count
    }

    fn remember(&self, id: SourceId, count: usize) {
        trace!(%id, count, "caching size of one-shot source");
        self.resolved.lock().insert(id, count);
    }

    fn count_cursor(&self, cursor: &mut dyn Cursor) -> usize {
        let id = cursor.source_id();
        if let Some(n) = self.cached(id) {
            return n;
        }

        let key = cursor.key();
        let rewindable = try_rewind(cursor);

        let mut count = 0;
        while cursor.valid() {
            cursor.advance();
            count += 1;
        }

        if rewindable {
            if let Err(err) = cursor.rewind() {
                debug!(%id, error = %err, "cursor refused to rewind after counting");
            }
            while cursor.valid() && cursor.key() != key {
                cursor.advance();
            }
        } else {
            self.remember(id, count);
        }

        trace!(%id, count, rewindable, "counted cursor");
        count
    }

    fn count_traversable(&self, source: &mut dyn Traversable) -> usize {
        let id = source.source_id();
        if let Some(n) = self.cached(id) {
            return n;
        }

        let mut count = 0;
        while source.pull() {
            count += 1;
        }
        self.remember(id, count);
        count
    }
}

/// Rewind a cursor if it can be restarted. One-shot cursors are never asked.
fn try_rewind(cursor: &mut dyn Cursor) -> bool {
    if cursor.is_one_shot() {
        return false;
    }
    match cursor.rewind() {
        Ok(()) => true,
        Err(err) => {
            debug!(id = %cursor.source_id(), error = %err, "rewind failed, counting remaining elements");
            false
        }
    }
}

impl<T: Sizeable + ?Sized> Matcher<T> for SizeMatcher {
    fn matches(&self, value: &mut T) -> bool {
        self.size_of(value) == Size::Count(self.expected)
    }

    fn describe(&self) -> String {
        format!("count matches {}", self.expected)
    }

    fn describe_mismatch(&self, value: &mut T) -> String {
        format!(
            "actual size {} matches expected size {}",
            self.size_of(value),
            self.expected
        )
    }
}

/// Matcher for values without elements.
#[derive(Debug)]
pub struct IsEmptyMatcher {
    inner: SizeMatcher,
}

impl<T: Sizeable + ?Sized> Matcher<T> for IsEmptyMatcher {
    fn matches(&self, value: &mut T) -> bool {
        self.inner.matches(value)
    }

    fn describe(&self) -> String {
        "is empty".to_string()
    }

    fn describe_mismatch(&self, value: &mut T) -> String {
        format!("actual size {} is not empty", self.inner.size_of(value))
    }
}

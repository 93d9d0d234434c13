//! Ready-made sources for every [`SizeClass`] that needs iteration.

use std::fmt;

use super::{Aggregate, Cursor, CursorKey, SizeClass, Sizeable, SourceId, Traversable};
use crate::error::{Error, Result};

/// A rewindable cursor over an owned vector.
///
/// # Example
///
/// ```rust
/// use testkit_size::traversable::{ArrayCursor, Cursor};
///
/// let mut cursor = ArrayCursor::new(vec!["a", "b"]);
/// assert_eq!(cursor.current(), Some(&"a"));
/// cursor.advance();
/// assert_eq!(cursor.current(), Some(&"b"));
/// cursor.rewind().unwrap();
/// assert_eq!(cursor.current(), Some(&"a"));
/// ```
pub struct ArrayCursor<T> {
    id: SourceId,
    items: Vec<T>,
    position: usize,
}

impl<T> ArrayCursor<T> {
    /// Create a cursor positioned at the first element.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            id: SourceId::fresh(),
            items,
            position: 0,
        }
    }

    /// Element at the current position.
    pub fn current(&self) -> Option<&T> {
        self.items.get(self.position)
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayCursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayCursor")
            .field("id", &self.id)
            .field("items", &self.items)
            .field("position", &self.position)
            .finish()
    }
}

impl<T> Cursor for ArrayCursor<T> {
    fn source_id(&self) -> SourceId {
        self.id
    }

    fn key(&self) -> Option<CursorKey> {
        self.valid().then(|| CursorKey::from(self.position))
    }

    fn valid(&self) -> bool {
        self.position < self.items.len()
    }

    fn advance(&mut self) {
        if self.valid() {
            self.position += 1;
        }
    }

    fn rewind(&mut self) -> Result<()> {
        self.position = 0;
        Ok(())
    }
}

impl<T> Sizeable for ArrayCursor<T> {
    fn size_class(&mut self) -> SizeClass<'_> {
        SizeClass::Cursor(self)
    }
}

/// A one-shot cursor driving a lazy iterator.
///
/// The first element is pulled when the generator is created, so
/// [`Generator::current`] is available immediately. Once advanced, a
/// generator cannot be rewound.
///
/// # Example
///
/// ```rust
/// use testkit_size::traversable::{Cursor, Generator};
///
/// let mut numbers = Generator::new((1..=3).map(|n| n * 10));
/// assert_eq!(numbers.current(), Some(&10));
/// numbers.advance();
/// assert_eq!(numbers.current(), Some(&20));
/// assert!(numbers.rewind().is_err());
/// ```
pub struct Generator<I: Iterator> {
    id: SourceId,
    iter: I,
    current: Option<I::Item>,
    index: u64,
}

impl<I: Iterator> Generator<I> {
    /// Create a generator over anything iterable.
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        let mut iter = iter.into_iter();
        let current = iter.next();
        Self {
            id: SourceId::fresh(),
            iter,
            current,
            index: 0,
        }
    }

    /// Element at the current position, `None` once exhausted.
    pub fn current(&self) -> Option<&I::Item> {
        self.current.as_ref()
    }
}

impl<I> fmt::Debug for Generator<I>
where
    I: Iterator,
    I::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("id", &self.id)
            .field("current", &self.current)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl<I: Iterator> Cursor for Generator<I> {
    fn source_id(&self) -> SourceId {
        self.id
    }

    fn key(&self) -> Option<CursorKey> {
        self.current.as_ref().map(|_| CursorKey::Index(self.index))
    }

    fn valid(&self) -> bool {
        self.current.is_some()
    }

    fn advance(&mut self) {
        if self.current.is_some() {
            self.current = self.iter.next();
            self.index += 1;
        }
    }

    fn rewind(&mut self) -> Result<()> {
        if self.index == 0 {
            Ok(())
        } else {
            Err(Error::rewind("generator has already been advanced"))
        }
    }

    fn is_one_shot(&self) -> bool {
        true
    }
}

impl<I: Iterator> Sizeable for Generator<I> {
    fn size_class(&mut self) -> SizeClass<'_> {
        SizeClass::Cursor(self)
    }
}

/// Marks a cursor as non-restartable.
///
/// Rewinding is a no-op and size matchers count only the elements that
/// remain. The wrapper has its own identity, so wrapping a borrowed cursor a
/// second time counts it afresh.
///
/// # Example
///
/// ```rust
/// use testkit_size::traversable::{ArrayCursor, Cursor, NoRewind};
///
/// let mut cursor = NoRewind::new(ArrayCursor::new(vec![1, 2, 3]));
/// cursor.advance();
/// cursor.rewind().unwrap();
/// assert_eq!(cursor.get_ref().current(), Some(&2));
/// ```
#[derive(Debug)]
pub struct NoRewind<C> {
    id: SourceId,
    inner: C,
}

impl<C: Cursor> NoRewind<C> {
    /// Wrap a cursor.
    pub fn new(inner: C) -> Self {
        Self {
            id: SourceId::fresh(),
            inner,
        }
    }

    /// Get a reference to the wrapped cursor.
    pub fn get_ref(&self) -> &C {
        &self.inner
    }
}

impl<C: Cursor> Cursor for NoRewind<C> {
    fn source_id(&self) -> SourceId {
        self.id
    }

    fn key(&self) -> Option<CursorKey> {
        self.inner.key()
    }

    fn valid(&self) -> bool {
        self.inner.valid()
    }

    fn advance(&mut self) {
        self.inner.advance();
    }

    fn rewind(&mut self) -> Result<()> {
        Ok(())
    }

    fn is_one_shot(&self) -> bool {
        true
    }
}

impl<C: Cursor> Sizeable for NoRewind<C> {
    fn size_class(&mut self) -> SizeClass<'_> {
        SizeClass::Cursor(self)
    }
}

/// An aggregate that hands out the value it wraps.
///
/// Delegates nest: `Delegate::new(Delegate::new(cursor))` is unwrapped down to
/// `cursor` before counting.
#[derive(Debug)]
pub struct Delegate<S> {
    inner: S,
}

impl<S: Sizeable> Delegate<S> {
    /// Wrap a sizeable value.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Get a reference to the wrapped value.
    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    /// Get a mutable reference to the wrapped value.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.inner
    }
}

impl<S: Sizeable> Aggregate for Delegate<S> {
    fn inner(&mut self) -> SizeClass<'_> {
        self.inner.size_class()
    }
}

impl<S: Sizeable> Sizeable for Delegate<S> {
    fn size_class(&mut self) -> SizeClass<'_> {
        SizeClass::Aggregate(self)
    }
}

/// A forward-only source over any iterator.
///
/// # Example
///
/// ```rust
/// use testkit_size::traversable::{Forward, Traversable};
///
/// let mut letters = Forward::new("abc".chars());
/// assert!(letters.pull());
/// assert!(letters.pull());
/// assert!(letters.pull());
/// assert!(!letters.pull());
/// ```
pub struct Forward<I> {
    id: SourceId,
    iter: I,
}

impl<I: Iterator> Forward<I> {
    /// Create a forward-only source over anything iterable.
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            id: SourceId::fresh(),
            iter: iter.into_iter(),
        }
    }
}

impl<I> fmt::Debug for Forward<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Forward")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl<I: Iterator> Iterator for Forward<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
}

impl<I: Iterator> Traversable for Forward<I> {
    fn source_id(&self) -> SourceId {
        self.id
    }

    fn pull(&mut self) -> bool {
        self.iter.next().is_some()
    }
}

impl<I: Iterator> Sizeable for Forward<I> {
    fn size_class(&mut self) -> SizeClass<'_> {
        SizeClass::Traversable(self)
    }
}

//! Capability model for values whose size can be measured.
//!
//! Every value a size matcher accepts implements [`Sizeable`], which
//! classifies it into exactly one [`SizeClass`]:
//!
//! - [`SizeClass::Counted`] - a collection that knows its own length
//! - [`SizeClass::Aggregate`] - a wrapper around another source
//! - [`SizeClass::Cursor`] - a stateful iterator with a position and a restart
//! - [`SizeClass::Traversable`] - a forward-only, one-shot source
//! - [`SizeClass::Unsized`] - no size at all
//!
//! # Example
//!
//! ```rust
//! use testkit_size::traversable::{SizeClass, Sizeable};
//!
//! let mut v = vec![1, 2, 3];
//! assert!(matches!(v.size_class(), SizeClass::Counted(3)));
//!
//! let mut nothing: Option<Vec<i32>> = None;
//! assert!(matches!(nothing.size_class(), SizeClass::Unsized));
//! ```

mod adapters;

use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Result;

pub use adapters::{ArrayCursor, Delegate, Forward, Generator, NoRewind};

/// Identity of an iteration source.
///
/// Ids are handed out from a process-wide counter, so two sources created
/// independently never compare equal, even when they iterate the same data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(u64);

impl SourceId {
    /// Allocate a new, unique id.
    #[must_use]
    pub fn fresh() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "source#{}", self.0)
    }
}

/// Position of a [`Cursor`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CursorKey {
    /// Positional key.
    Index(u64),
    /// Named key, as produced by map-like cursors.
    Name(String),
}

impl From<u64> for CursorKey {
    fn from(index: u64) -> Self {
        Self::Index(index)
    }
}

impl From<usize> for CursorKey {
    fn from(index: usize) -> Self {
        Self::Index(index as u64)
    }
}

impl From<&str> for CursorKey {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl fmt::Display for CursorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Name(name) => write!(f, "{name:?}"),
        }
    }
}

/// How the size of a value can be obtained.
pub enum SizeClass<'a> {
    /// The value reports its own element count.
    Counted(usize),
    /// The value wraps another source.
    Aggregate(&'a mut dyn Aggregate),
    /// A stateful iterator.
    Cursor(&'a mut dyn Cursor),
    /// A forward-only iterator with no position and no restart.
    Traversable(&'a mut dyn Traversable),
    /// The value has no size.
    Unsized,
}

impl fmt::Debug for SizeClass<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Counted(n) => f.debug_tuple("Counted").field(n).finish(),
            Self::Aggregate(_) => f.write_str("Aggregate"),
            Self::Cursor(c) => f.debug_tuple("Cursor").field(&c.source_id()).finish(),
            Self::Traversable(t) => f.debug_tuple("Traversable").field(&t.source_id()).finish(),
            Self::Unsized => f.write_str("Unsized"),
        }
    }
}

/// A value a size matcher can measure.
///
/// Implement this for your own types by returning the matching
/// [`SizeClass`]. Cursors and traversables return themselves:
///
/// ```rust
/// use testkit_size::traversable::{SizeClass, Sizeable};
///
/// struct Inventory {
///     items: Vec<String>,
/// }
///
/// impl Sizeable for Inventory {
///     fn size_class(&mut self) -> SizeClass<'_> {
///         SizeClass::Counted(self.items.len())
///     }
/// }
/// ```
pub trait Sizeable {
    /// Classify this value.
    fn size_class(&mut self) -> SizeClass<'_>;
}

/// A value wrapping another source, like an iterable container that hands
/// out its iterator.
pub trait Aggregate {
    /// The wrapped source. May itself be another aggregate.
    fn inner(&mut self) -> SizeClass<'_>;
}

/// A stateful iterator that exposes its position and can be restarted.
///
/// Counting a cursor is destructive: it is driven to the end. Rewindable
/// cursors are put back at their previous key afterwards; the others are
/// left exhausted and their count is remembered by [`SourceId`].
pub trait Cursor {
    /// Identity of this cursor.
    fn source_id(&self) -> SourceId;

    /// Key at the current position, `None` once exhausted.
    fn key(&self) -> Option<CursorKey>;

    /// Whether the cursor points at an element.
    fn valid(&self) -> bool;

    /// Move to the next element.
    fn advance(&mut self);

    /// Move back to the first element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rewind`](crate::Error::Rewind) if this cursor cannot
    /// be restarted from where it is.
    fn rewind(&mut self) -> Result<()>;

    /// Whether this cursor is single-use by construction. Size matchers never
    /// call [`Cursor::rewind`] on one-shot cursors.
    fn is_one_shot(&self) -> bool {
        false
    }
}

/// A forward-only source with no position and no restart.
pub trait Traversable {
    /// Identity of this source.
    fn source_id(&self) -> SourceId;

    /// Consume one element. Returns `false` once the source is exhausted.
    fn pull(&mut self) -> bool;
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    fn source_id(&self) -> SourceId {
        (**self).source_id()
    }

    fn key(&self) -> Option<CursorKey> {
        (**self).key()
    }

    fn valid(&self) -> bool {
        (**self).valid()
    }

    fn advance(&mut self) {
        (**self).advance();
    }

    fn rewind(&mut self) -> Result<()> {
        (**self).rewind()
    }

    fn is_one_shot(&self) -> bool {
        (**self).is_one_shot()
    }
}

impl<S: Sizeable + ?Sized> Sizeable for &mut S {
    fn size_class(&mut self) -> SizeClass<'_> {
        (**self).size_class()
    }
}

impl<S: Sizeable + ?Sized> Sizeable for Box<S> {
    fn size_class(&mut self) -> SizeClass<'_> {
        (**self).size_class()
    }
}

impl<S: Sizeable> Sizeable for Option<S> {
    fn size_class(&mut self) -> SizeClass<'_> {
        match self {
            Some(inner) => inner.size_class(),
            None => SizeClass::Unsized,
        }
    }
}

impl<T> Sizeable for [T] {
    fn size_class(&mut self) -> SizeClass<'_> {
        SizeClass::Counted(self.len())
    }
}

impl<T, const N: usize> Sizeable for [T; N] {
    fn size_class(&mut self) -> SizeClass<'_> {
        SizeClass::Counted(N)
    }
}

impl<T> Sizeable for &[T] {
    fn size_class(&mut self) -> SizeClass<'_> {
        SizeClass::Counted(self.len())
    }
}

impl<T, const N: usize> Sizeable for &[T; N] {
    fn size_class(&mut self) -> SizeClass<'_> {
        SizeClass::Counted(N)
    }
}

macro_rules! impl_counted {
    ($($ty:ident<$($param:ident),+>),+ $(,)?) => {
        $(
            impl<$($param),+> Sizeable for $ty<$($param),+> {
                fn size_class(&mut self) -> SizeClass<'_> {
                    SizeClass::Counted(self.len())
                }
            }

            impl<$($param),+> Sizeable for &$ty<$($param),+> {
                fn size_class(&mut self) -> SizeClass<'_> {
                    SizeClass::Counted(self.len())
                }
            }
        )+
    };
}

impl_counted!(
    Vec<T>,
    VecDeque<T>,
    LinkedList<T>,
    BinaryHeap<T>,
    HashSet<T, H>,
    HashMap<K, V, H>,
    BTreeSet<T>,
    BTreeMap<K, V>,
);

macro_rules! impl_unsized {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Sizeable for $ty {
                fn size_class(&mut self) -> SizeClass<'_> {
                    SizeClass::Unsized
                }
            }
        )+
    };
}

impl_unsized!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    fn counted<S: Sizeable + ?Sized>(value: &mut S) -> Option<usize> {
        match value.size_class() {
            SizeClass::Counted(n) => Some(n),
            _ => None,
        }
    }

    #[test]
    fn test_source_ids_are_unique() {
        let a = SourceId::fresh();
        let b = SourceId::fresh();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn test_std_collections_are_counted() {
        assert_eq!(counted(&mut vec![1, 2, 3]), Some(3));
        assert_eq!(counted(&mut [0u8; 4]), Some(4));
        assert_eq!(counted(&mut VecDeque::from(vec![1, 2])), Some(2));

        let mut map = HashMap::new();
        map.insert("a", 1);
        assert_eq!(counted(&mut map), Some(1));

        let mut set: BTreeSet<i32> = (0..10).collect();
        assert_eq!(counted(&mut set), Some(10));

        let slice: &mut [i32] = &mut [];
        assert_eq!(counted(slice), Some(0));
    }

    #[test]
    fn test_boxed_and_borrowed_delegate() {
        let mut boxed = Box::new(vec!['a', 'b']);
        assert_eq!(counted(&mut boxed), Some(2));

        let mut v = vec![1];
        let mut borrowed = &mut v;
        assert_eq!(counted(&mut borrowed), Some(1));
    }

    #[test]
    fn test_shared_references_are_counted() {
        let v = vec![1, 2, 3];
        let slice: &[i32] = &v;
        assert_eq!(counted(&mut &*slice), Some(3));
        assert_eq!(counted(&mut &v), Some(3));
        assert_eq!(counted(&mut &[0u8; 2]), Some(2));

        let map = HashMap::from([(1, 'a'), (2, 'b')]);
        assert_eq!(counted(&mut &map), Some(2));
        let set: BTreeSet<i32> = BTreeSet::new();
        assert_eq!(counted(&mut &set), Some(0));
    }

    #[test]
    fn test_unsized_values() {
        assert!(matches!(42i32.size_class(), SizeClass::Unsized));
        assert!(matches!(true.size_class(), SizeClass::Unsized));

        let mut none: Option<Vec<i32>> = None;
        assert!(matches!(none.size_class(), SizeClass::Unsized));

        let mut some = Some(vec![1, 2]);
        assert!(matches!(some.size_class(), SizeClass::Counted(2)));
    }

    #[test]
    fn test_cursor_key_display() {
        assert_eq!(CursorKey::from(3usize).to_string(), "3");
        assert_eq!(CursorKey::from("name").to_string(), "\"name\"");
        assert_eq!(CursorKey::from(7u64), CursorKey::Index(7));
    }
}

//! # testkit-size
//!
//! > Size assertions that are safe to use on iterators
//!
//! **testkit-size** checks how many elements a value has. Collections report
//! their length directly; cursors and lazy iterators are counted without
//! losing their position, and one-shot sources are counted once and
//! remembered.
//!
//! ## Quick Start
//!
//! ```rust
//! use testkit_size::prelude::*;
//!
//! let mut cursor = ArrayCursor::new(vec![1, 2, 3]);
//! cursor.advance();
//!
//! assert_that!(cursor, has_size(3));
//! assert_eq!(cursor.current(), Some(&2));
//! ```
//!
//! ## Features
//!
//! - 📏 **Size Matchers** - `has_size`, `same_size_as`, `is_empty`
//! - 🔁 **Position Preserving** - Rewindable cursors end where they started
//! - 🎯 **One-shot Aware** - Generators are never rewound, counts are cached
//! - 🧩 **Capability Model** - Plug in your own collections and iterators

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod assertions;
pub mod error;
pub mod traversable;

/// Prelude for convenient imports
///
/// ```rust
/// use testkit_size::prelude::*;
/// ```
pub mod prelude {
    pub use crate::assert_that;
    pub use crate::assertions::matcher::{not, Matcher};
    pub use crate::assertions::{has_size, is_empty, same_size_as, size_of, Size, SizeMatcher};
    pub use crate::error::{Error, Result};
    pub use crate::traversable::{
        Aggregate, ArrayCursor, Cursor, CursorKey, Delegate, Forward, Generator, NoRewind,
        SizeClass, Sizeable, SourceId, Traversable,
    };
}

// Re-exports
pub use error::{Error, Result};

//! Integration tests for size matchers over every kind of source.

use std::collections::{HashMap, HashSet, VecDeque};

use proptest::prelude::*;
use testkit_size::prelude::*;

/// A map-like cursor keyed by name, restartable.
struct Registry {
    id: SourceId,
    names: Vec<String>,
    position: usize,
}

impl Registry {
    fn new(names: &[&str]) -> Self {
        Self {
            id: SourceId::fresh(),
            names: names.iter().map(ToString::to_string).collect(),
            position: 0,
        }
    }
}

impl Cursor for Registry {
    fn source_id(&self) -> SourceId {
        self.id
    }

    fn key(&self) -> Option<CursorKey> {
        self.names.get(self.position).map(|n| CursorKey::from(n.as_str()))
    }

    fn valid(&self) -> bool {
        self.position < self.names.len()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn rewind(&mut self) -> testkit_size::Result<()> {
        self.position = 0;
        Ok(())
    }
}

impl Sizeable for Registry {
    fn size_class(&mut self) -> SizeClass<'_> {
        SizeClass::Cursor(self)
    }
}

#[test]
fn test_arrays() {
    assert!(has_size(3).matches(&mut vec![1, 2, 3]));
    assert!(has_size(0).matches(&mut Vec::<i32>::new()));
    assert!(has_size(2).matches(&mut VecDeque::from(vec!['x', 'y'])));
    assert!(has_size(1).matches(&mut HashSet::from([42])));
}

#[test]
fn test_nested_aggregate_cursor_keeps_position() {
    let m = has_size(2);
    let mut wrapped = Delegate::new(Delegate::new(ArrayCursor::new(vec![1, 2])));

    assert!(m.matches(&mut wrapped));
    assert_eq!(wrapped.get_ref().get_ref().current(), Some(&1));

    wrapped.get_mut().get_mut().advance();
    assert!(m.matches(&mut wrapped));
    assert_eq!(wrapped.get_ref().get_ref().current(), Some(&2));

    wrapped.get_mut().get_mut().advance();
    assert!(m.matches(&mut wrapped));
    assert_eq!(wrapped.get_ref().get_ref().current(), None);
}

#[test]
fn test_named_keys_are_restored() {
    let m = has_size(3);
    let mut registry = Registry::new(&["alpha", "beta", "gamma"]);
    registry.advance();
    registry.advance();

    assert!(m.matches(&mut registry));
    assert_eq!(registry.key(), Some(CursorKey::from("gamma")));
}

#[test]
fn test_generator_not_rewound() {
    let m = has_size(3);
    let mut generator = Generator::new(vec![1, 2, 3]);

    assert!(m.matches(&mut generator));
    assert_eq!(generator.current(), None);
}

#[test]
fn test_advanced_generator_counts_remaining() {
    let m = has_size(2);
    let mut generator = Generator::new(vec![1, 2, 3]);
    generator.advance();

    assert!(m.matches(&mut generator));
    // same exhausted instance, answered from the cache
    assert!(m.matches(&mut generator));
}

#[test]
fn test_no_rewind_wrapper() {
    let m = has_size(2);
    assert!(!m.matches(&mut NoRewind::new(ArrayCursor::new(vec![1, 2, 3]))));
    assert!(m.matches(&mut NoRewind::new(ArrayCursor::new(vec![1, 2]))));
}

#[test]
fn test_forward_traversable() {
    assert!(has_size(5).matches(&mut Forward::new("hello".bytes())));
}

#[test]
fn test_independent_generators_in_either_order() {
    for reversed in [false, true] {
        let m = has_size(3);
        let mut a = Generator::new(vec![7, 8, 9]);
        let mut b = Generator::new(vec![7, 8, 9]);
        if reversed {
            assert!(m.matches(&mut b));
            assert!(m.matches(&mut a));
        } else {
            assert!(m.matches(&mut a));
            assert!(m.matches(&mut b));
        }
    }
}

#[test]
fn test_cache_is_scoped_to_matcher() {
    let mut generator = Generator::new(vec![1, 2, 3]);
    assert!(has_size(3).matches(&mut generator));

    // a new matcher has never seen this generator, which is now exhausted
    assert!(has_size(0).matches(&mut generator));
}

#[test]
fn test_unavailable_is_not_zero() {
    let m = has_size(0);
    let mut missing: Option<HashMap<u8, u8>> = None;
    let mut empty: Option<HashMap<u8, u8>> = Some(HashMap::new());

    assert!(!m.matches(&mut missing));
    assert!(m.matches(&mut empty));
    assert_eq!(size_of(&mut missing), Size::Unavailable);
    assert_eq!(size_of(&mut empty), Size::Count(0));
}

#[test]
fn test_evaluate_failure_message() {
    let m = has_size(4);
    let mut generator = Generator::new(0..3);
    let err = m
        .evaluate(&mut generator, "retries exhausted", false)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Assertion failed: retries exhausted\nFailed asserting that actual size 3 matches expected size 4."
    );
}

#[test]
fn test_assert_that_with_prelude() {
    let mut cursor = ArrayCursor::new(vec!["a", "b", "c"]);
    cursor.advance();
    assert_that!(cursor, has_size(3));
    assert_that!(cursor, not(has_size(2)));
    assert_eq!(cursor.current(), Some(&"b"));
}

#[test]
fn test_read_only_collections() {
    let v = vec![1, 2, 3];
    assert_that!(&v, has_size(3));
    assert_that!(&v[..2], has_size(2));
    assert_that!(&HashSet::from([1, 2]), has_size(2));
    assert_eq!(size_of(&mut &v[..]), Size::Count(3));
}

#[test]
#[should_panic(expected = "actual size unavailable matches expected size 1")]
fn test_assert_that_on_unsized_panics() {
    assert_that!(None::<Vec<i32>>, has_size(1));
}

proptest! {
    #[test]
    fn prop_collections_report_len(items in proptest::collection::vec(any::<i32>(), 0..64)) {
        let len = items.len();
        let mut items = items;
        prop_assert_eq!(size_of(&mut items), Size::Count(len));
        prop_assert!(has_size(len).matches(&mut items));
    }

    #[test]
    fn prop_rewindable_cursor_position_is_preserved(
        items in proptest::collection::vec(any::<u8>(), 0..32),
        skip in 0usize..40,
        rounds in 1usize..4,
    ) {
        let len = items.len();
        let mut cursor = ArrayCursor::new(items);
        for _ in 0..skip {
            cursor.advance();
        }
        let key = cursor.key();

        let m = has_size(len);
        for _ in 0..rounds {
            prop_assert!(m.matches(&mut cursor));
            prop_assert_eq!(cursor.key(), key.clone());
        }
    }

    #[test]
    fn prop_one_shot_counts_remaining_and_caches(
        items in proptest::collection::vec(any::<u8>(), 0..32),
        skip in 0usize..40,
    ) {
        let remaining = items.len().saturating_sub(skip);
        let mut generator = Generator::new(items);
        for _ in 0..skip {
            generator.advance();
        }

        let m = has_size(remaining);
        prop_assert!(m.matches(&mut generator));
        prop_assert!(m.matches(&mut generator));
        prop_assert_eq!(m.size_of(&mut generator), Size::Count(remaining));
    }
}

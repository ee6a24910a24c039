use std::collections::BTreeMap;
use std::ops::Bound;

use proptest::prelude::*;

use navi_tree::NaviTreeMap;

/// Generates random keys in a range small enough to force collisions.
fn key_strategy() -> impl Strategy<Value = i64> {
    -1_000i64..1_000i64
}

fn entries_strategy() -> impl Strategy<Value = Vec<(i64, i64)>> {
    proptest::collection::vec((key_strategy(), any::<i64>()), 0..500)
}

/// Generates a `(from, from_inclusive, to, to_inclusive)` tuple that satisfies
/// the sub-map contract: `from <= to`, and a shared endpoint is not doubly
/// excluded.
fn range_strategy() -> impl Strategy<Value = (i64, bool, i64, bool)> {
    (key_strategy(), any::<bool>(), key_strategy(), any::<bool>()).prop_map(|(a, ai, b, bi)| {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        if lo == hi && !(ai && bi) {
            (lo, true, hi, true)
        } else {
            (lo, ai, hi, bi)
        }
    })
}

fn model_bounds(from: i64, from_inclusive: bool, to: i64, to_inclusive: bool) -> (Bound<i64>, Bound<i64>) {
    let lo = if from_inclusive { Bound::Included(from) } else { Bound::Excluded(from) };
    let hi = if to_inclusive { Bound::Included(to) } else { Bound::Excluded(to) };
    (lo, hi)
}

// ─── Range views vs BTreeMap ranges ──────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A sub-map enumerates exactly the entries a `BTreeMap` range would, in
    /// the same order, and its membership queries agree entry by entry.
    #[test]
    fn sub_map_matches_btreemap_range(
        entries in entries_strategy(),
        (from, from_inclusive, to, to_inclusive) in range_strategy(),
        probes in proptest::collection::vec(key_strategy(), 20),
    ) {
        let mut map: NaviTreeMap<i64, i64> = NaviTreeMap::new();
        let mut model: BTreeMap<i64, i64> = BTreeMap::new();
        for (k, v) in &entries {
            map.put(*k, *v);
            model.insert(*k, *v);
        }

        let view = map.sub_map(from, from_inclusive, to, to_inclusive);
        let bounds = model_bounds(from, from_inclusive, to, to_inclusive);

        let seen: Vec<_> = view.iter().map(|(k, v)| (*k, *v)).collect();
        let expected: Vec<_> = model.range(bounds).map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(&seen, &expected);

        prop_assert_eq!(view.len(), expected.len());
        prop_assert_eq!(view.is_empty(), expected.is_empty());
        prop_assert_eq!(view.first_entry().map(|(k, _)| *k), expected.first().map(|(k, _)| *k));
        prop_assert_eq!(view.last_entry().map(|(k, _)| *k), expected.last().map(|(k, _)| *k));

        for probe in &probes {
            let in_range = model.range(bounds).any(|(k, _)| k == probe);
            prop_assert_eq!(view.contains_key(probe), in_range, "contains_key({})", probe);
            let expected_value = if in_range { model[probe] } else { 0 };
            prop_assert_eq!(view.get(probe), expected_value, "get({})", probe);
        }
    }

    /// Navigation through a view clamps to the view's edges: results match
    /// running the query against only the in-range entries.
    #[test]
    fn view_navigation_clamps_to_the_range(
        entries in entries_strategy(),
        (from, from_inclusive, to, to_inclusive) in range_strategy(),
        probes in proptest::collection::vec(key_strategy(), 20),
    ) {
        let mut map: NaviTreeMap<i64, i64> = NaviTreeMap::new();
        let mut model: BTreeMap<i64, i64> = BTreeMap::new();
        for (k, v) in &entries {
            map.put(*k, *v);
            model.insert(*k, *v);
        }

        let view = map.sub_map(from, from_inclusive, to, to_inclusive);
        let bounds = model_bounds(from, from_inclusive, to, to_inclusive);
        let in_range: Vec<i64> = model.range(bounds).map(|(k, _)| *k).collect();

        for probe in &probes {
            let floor = in_range.iter().rev().find(|k| *k <= probe).copied();
            let ceiling = in_range.iter().find(|k| *k >= probe).copied();
            let lower = in_range.iter().rev().find(|k| *k < probe).copied();
            let higher = in_range.iter().find(|k| *k > probe).copied();

            prop_assert_eq!(view.floor_entry(probe).map(|(k, _)| *k), floor, "floor_entry({})", probe);
            prop_assert_eq!(view.ceiling_entry(probe).map(|(k, _)| *k), ceiling, "ceiling_entry({})", probe);
            prop_assert_eq!(view.lower_entry(probe).map(|(k, _)| *k), lower, "lower_entry({})", probe);
            prop_assert_eq!(view.higher_entry(probe).map(|(k, _)| *k), higher, "higher_entry({})", probe);
        }
    }

    /// A descending view yields the exact reverse of the ascending view, and
    /// flipping twice restores the original order.
    #[test]
    fn descending_view_is_the_exact_reverse(
        entries in entries_strategy(),
        (from, from_inclusive, to, to_inclusive) in range_strategy(),
    ) {
        let mut map: NaviTreeMap<i64, i64> = NaviTreeMap::new();
        for (k, v) in &entries {
            map.put(*k, *v);
        }

        let view = map.sub_map(from, from_inclusive, to, to_inclusive);
        let ascending: Vec<_> = view.iter().map(|(k, v)| (*k, *v)).collect();

        let flipped = view.descending_map();
        let descending: Vec<_> = flipped.iter().map(|(k, v)| (*k, *v)).collect();
        let mut reversed = ascending.clone();
        reversed.reverse();
        prop_assert_eq!(&descending, &reversed);

        let restored: Vec<_> = flipped.descending_map().iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(&restored, &ascending);

        prop_assert_eq!(flipped.first_entry().map(|(k, _)| *k), reversed.first().map(|(k, _)| *k));
        prop_assert_eq!(flipped.last_entry().map(|(k, _)| *k), reversed.last().map(|(k, _)| *k));
    }

    /// Writes through a mutable view are visible in the backing map.
    #[test]
    fn writes_through_a_view_reach_the_map(
        entries in entries_strategy(),
        key in key_strategy(),
        value in any::<i64>(),
    ) {
        let mut map: NaviTreeMap<i64, i64> = NaviTreeMap::new();
        let mut model: BTreeMap<i64, i64> = BTreeMap::new();
        for (k, v) in &entries {
            map.put(*k, *v);
            model.insert(*k, *v);
        }

        {
            let mut view = map.sub_map_mut(key, true, key, true);
            view.put(key, value);
            model.insert(key, value);
        }
        prop_assert_eq!(map.get(&key), value);

        {
            let mut view = map.tail_map_mut(key, true);
            prop_assert_eq!(view.remove(&key), value);
            model.remove(&key);
        }
        prop_assert_eq!(map.len(), model.len());
        prop_assert!(!map.contains_key(&key));
    }
}

// ─── Views stay live over the backing tree ───────────────────────────────────

#[test]
fn a_view_sees_later_mutations() {
    let mut map: NaviTreeMap<i64, i64> = NaviTreeMap::from_arrays(&[1, 5, 9], &[10, 50, 90]);

    let mut view = map.sub_map_mut(2, true, 8, true);
    assert_eq!(view.len(), 1);

    view.put(4, 40);
    view.put(7, 70);
    let keys: Vec<_> = view.keys().copied().collect();
    assert_eq!(keys, [4, 5, 7]);

    assert_eq!(view.remove(&5), 50);
    let keys: Vec<_> = view.keys().copied().collect();
    assert_eq!(keys, [4, 7]);

    // The writes went to the backing map, not a copy.
    let all: Vec<_> = map.keys().copied().collect();
    assert_eq!(all, [1, 4, 7, 9]);
}

#[test]
fn nested_views_narrow() {
    let map: NaviTreeMap<i64, i64> =
        NaviTreeMap::from_arrays(&[1, 2, 3, 4, 5, 6, 7, 8, 9], &[1, 2, 3, 4, 5, 6, 7, 8, 9]);

    let outer = map.sub_map(2, true, 8, true);
    let inner = outer.sub_map(3, true, 6, false);
    let keys: Vec<_> = inner.keys().copied().collect();
    assert_eq!(keys, [3, 4, 5]);

    let head = inner.head_map(5, false);
    let keys: Vec<_> = head.keys().copied().collect();
    assert_eq!(keys, [3, 4]);

    let tail = inner.tail_map(4, true);
    let keys: Vec<_> = tail.keys().copied().collect();
    assert_eq!(keys, [4, 5]);
}

#[test]
#[should_panic(expected = "sub-map range out of bounds of its parent view in NaviTreeMap")]
fn widening_a_view_panics() {
    let map: NaviTreeMap<i64, i64> = NaviTreeMap::from_arrays(&[1, 2, 3, 4, 5], &[1, 2, 3, 4, 5]);
    let outer = map.sub_map(2, true, 4, true);
    let _ = outer.sub_map(1, true, 4, true);
}

#[test]
#[should_panic(expected = "range start is greater than range end in NaviTreeMap")]
fn inverted_bounds_panic() {
    let map: NaviTreeMap<i64, i64> = NaviTreeMap::new();
    let _ = map.sub_map(5, true, 3, true);
}

#[test]
#[should_panic(expected = "`SubMapMut::put()` - key out of range!")]
fn out_of_range_write_panics() {
    let mut map: NaviTreeMap<i64, i64> = NaviTreeMap::from_arrays(&[1, 2, 3], &[1, 2, 3]);
    let mut view = map.sub_map_mut(1, true, 2, true);
    view.put(3, 30);
}

// ─── Cursors through views ───────────────────────────────────────────────────

#[test]
fn cursor_through_a_view_stays_fenced() {
    let mut map: NaviTreeMap<i64, i64> =
        NaviTreeMap::from_arrays(&[1, 2, 3, 4, 5, 6, 7, 8, 9], &[1, 2, 3, 4, 5, 6, 7, 8, 9]);

    let mut view = map.sub_map_mut(3, true, 7, false);
    let mut cursor = view.cursor_mut();
    let mut visited = Vec::new();
    while let Some((key, value)) = cursor.next() {
        visited.push(*key);
        if *value % 2 == 0 {
            cursor.remove_current();
        }
    }
    assert_eq!(visited, [3, 4, 5, 6]);

    let all: Vec<_> = map.keys().copied().collect();
    assert_eq!(all, [1, 2, 3, 5, 7, 8, 9]);
}

#[test]
fn descending_view_cursor_steps_backward() {
    let mut map: NaviTreeMap<i64, i64> =
        NaviTreeMap::from_arrays(&[1, 2, 3, 4, 5], &[10, 20, 30, 40, 50]);

    let mut view = map.sub_map_mut(2, true, 4, true).descending();
    let mut cursor = view.cursor_mut();
    let mut visited = Vec::new();
    while let Some((key, _)) = cursor.next() {
        visited.push(*key);
    }
    assert_eq!(visited, [4, 3, 2]);
}

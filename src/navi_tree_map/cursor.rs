use core::cmp::Ordering;
use core::fmt;
use core::ops::Bound;

use crate::comparator::{Comparator, Natural};
use crate::raw::{Balance, Handle, RawNaviTreeMap, RedBlack, RemoveOutcome};

/// Redirects a cursor position after a removal that went through a successor
/// copy.
///
/// When a two-child node is removed, the tree copies the in-order successor's
/// key and value into it and physically unlinks the successor instead. A
/// cursor still holding the successor's handle would otherwise track a freed
/// (and soon recycled) slot; this points it at the node that absorbed the
/// entry.
fn redirect_on_successor_copy(slot: &mut Option<Handle>, outcome: RemoveOutcome) {
    if *slot == Some(outcome.freed) {
        *slot = outcome.absorbed_into;
    }
}

/// A bidirectional cursor over a [`NaviTreeMap`](super::NaviTreeMap) or one
/// of its mutable range views.
///
/// The cursor sits between entries. [`next`](CursorMut::next) and
/// [`prev`](CursorMut::prev) step over an entry and return it with a mutable
/// value borrow; [`remove_current`](CursorMut::remove_current) and
/// [`set_value`](CursorMut::set_value) act on the entry last stepped over.
/// A cursor obtained from a range view carries the view's bounds as fences
/// and refuses to step past them; a cursor from a descending view steps
/// toward smaller keys on `next`.
///
/// Unlike the iterators, the cursor may remove entries mid-traversal: the
/// tree reports how each removal was carried out physically and the cursor
/// re-anchors itself, so no entry is skipped or returned twice.
///
/// # Examples
///
/// Removing every entry with an odd key:
///
/// ```
/// use navi_tree::NaviTreeMap;
///
/// let mut map: NaviTreeMap<i64, i64> = NaviTreeMap::new();
/// map.insert_entries([(1, 10), (2, 20), (3, 30), (4, 40)]);
///
/// let mut cursor = map.cursor_mut();
/// while let Some((key, _value)) = cursor.next() {
///     if *key % 2 == 1 {
///         cursor.remove_current();
///     }
/// }
/// let keys: Vec<_> = map.keys().copied().collect();
/// assert_eq!(keys, [2, 4]);
/// ```
pub struct CursorMut<'a, K, V, B: Balance = RedBlack, C = Natural> {
    tree: &'a mut RawNaviTreeMap<K, V, B, C>,
    /// Entry the next forward step returns, already fence-checked.
    next: Option<Handle>,
    /// Entry the next backward step returns, already fence-checked.
    prev: Option<Handle>,
    /// Entry last stepped over; cleared by `remove_current`.
    curr: Option<Handle>,
    lo: Bound<K>,
    hi: Bound<K>,
    /// Forward steps move toward smaller keys when set.
    descending: bool,
}

impl<'a, K, V, B: Balance, C: Comparator<K>> CursorMut<'a, K, V, B, C> {
    pub(crate) fn new(
        tree: &'a mut RawNaviTreeMap<K, V, B, C>,
        start: Option<Handle>,
        lo: Bound<K>,
        hi: Bound<K>,
        descending: bool,
    ) -> Self {
        CursorMut {
            tree,
            next: start,
            prev: None,
            curr: None,
            lo,
            hi,
            descending,
        }
    }

    fn within_lo(&self, key: &K) -> bool {
        match &self.lo {
            Bound::Unbounded => true,
            Bound::Included(b) => self.tree.comparator().compare(key, b) != Ordering::Less,
            Bound::Excluded(b) => self.tree.comparator().compare(key, b) == Ordering::Greater,
        }
    }

    fn within_hi(&self, key: &K) -> bool {
        match &self.hi {
            Bound::Unbounded => true,
            Bound::Included(b) => self.tree.comparator().compare(key, b) != Ordering::Greater,
            Bound::Excluded(b) => self.tree.comparator().compare(key, b) == Ordering::Less,
        }
    }

    /// The in-order neighbor of `from` in the cursor's forward direction,
    /// already checked against the forward fence.
    fn step_forward(&self, from: Handle) -> Option<Handle> {
        if self.descending {
            self.tree.predecessor(from).filter(|&h| self.within_lo(self.tree.key(h)))
        } else {
            self.tree.successor(from).filter(|&h| self.within_hi(self.tree.key(h)))
        }
    }

    fn step_backward(&self, from: Handle) -> Option<Handle> {
        if self.descending {
            self.tree.successor(from).filter(|&h| self.within_hi(self.tree.key(h)))
        } else {
            self.tree.predecessor(from).filter(|&h| self.within_lo(self.tree.key(h)))
        }
    }

    /// Steps over the next entry in the cursor's direction and returns it,
    /// or `None` at the fence (or the end of the map).
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<(&K, &mut V)> {
        let candidate = self.next?;
        self.curr = Some(candidate);
        self.prev = Some(candidate);
        self.next = self.step_forward(candidate);
        Some(self.tree.entry_mut(candidate))
    }

    /// Steps back over the previous entry and returns it, or `None` at the
    /// fence. Directly after [`next`](CursorMut::next) this returns the same
    /// entry again.
    pub fn prev(&mut self) -> Option<(&K, &mut V)> {
        let candidate = self.prev?;
        self.curr = Some(candidate);
        self.next = Some(candidate);
        self.prev = self.step_backward(candidate);
        Some(self.tree.entry_mut(candidate))
    }

    /// Removes the entry last returned by [`next`](CursorMut::next) or
    /// [`prev`](CursorMut::prev) and returns it. Traversal continues with no
    /// entry skipped or repeated.
    ///
    /// # Panics
    ///
    /// Panics if no entry has been returned yet, or if the entry was already
    /// removed.
    pub fn remove_current(&mut self) -> (K, V) {
        let curr = self
            .curr
            .take()
            .expect("`CursorMut::remove_current()` - no current entry: call `next()` or `prev()` first!");

        // Move both anchors off the doomed node while its links still exist.
        if self.prev == Some(curr) {
            self.prev = self.step_backward(curr);
        }
        if self.next == Some(curr) {
            self.next = self.step_forward(curr);
        }

        let (key, value, outcome) = self.tree.remove_at(curr);
        redirect_on_successor_copy(&mut self.prev, outcome);
        redirect_on_successor_copy(&mut self.next, outcome);
        (key, value)
    }

    /// Replaces the value of the entry last returned by
    /// [`next`](CursorMut::next) or [`prev`](CursorMut::prev), returning the
    /// old value.
    ///
    /// # Panics
    ///
    /// Panics if no entry has been returned yet, or if the entry was removed.
    pub fn set_value(&mut self, value: V) -> V {
        let curr = self
            .curr
            .expect("`CursorMut::set_value()` - no current entry: call `next()` or `prev()` first!");
        core::mem::replace(self.tree.value_of_mut(curr), value)
    }
}

impl<K: fmt::Debug, V, B: Balance, C> fmt::Debug for CursorMut<'_, K, V, B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("current", &self.curr.map(|h| self.tree.key(h)))
            .field("descending", &self.descending)
            .finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::NaviTreeMap;
    use alloc::vec::Vec;

    #[test]
    fn redirect_moves_only_the_freed_handle() {
        let freed = Handle::from_index(3);
        let absorbing = Handle::from_index(1);
        let outcome = RemoveOutcome {
            freed,
            absorbed_into: Some(absorbing),
        };

        let mut hit = Some(freed);
        redirect_on_successor_copy(&mut hit, outcome);
        assert_eq!(hit, Some(absorbing));

        let mut miss = Some(Handle::from_index(7));
        redirect_on_successor_copy(&mut miss, outcome);
        assert_eq!(miss, Some(Handle::from_index(7)));

        let mut empty = None;
        redirect_on_successor_copy(&mut empty, outcome);
        assert_eq!(empty, None);
    }

    #[test]
    fn redirect_clears_on_plain_removal() {
        let freed = Handle::from_index(2);
        let outcome = RemoveOutcome {
            freed,
            absorbed_into: None,
        };

        let mut slot = Some(freed);
        redirect_on_successor_copy(&mut slot, outcome);
        assert_eq!(slot, None);
    }

    #[test]
    fn removing_a_two_child_node_skips_nothing() {
        let mut map: NaviTreeMap<i64, i64> = NaviTreeMap::new();
        map.insert_entries([(5, 50), (3, 30), (8, 80), (1, 10), (4, 40), (7, 70), (9, 90)]);

        // Key 5 sits on a node with two children; removing it through the
        // cursor triggers the successor copy (7 is unlinked physically).
        let mut seen = Vec::new();
        let mut cursor = map.cursor_mut();
        while let Some((key, _value)) = cursor.next() {
            let key = *key;
            seen.push(key);
            if key == 5 {
                let (removed, value) = cursor.remove_current();
                assert_eq!((removed, value), (5, 50));
            }
        }
        assert_eq!(seen, [1, 3, 4, 5, 7, 8, 9]);
        assert!(!map.contains_key(&5));
        assert_eq!(map.len(), 6);
    }

    #[test]
    fn prev_revisits_the_last_entry() {
        let mut map: NaviTreeMap<i64, i64> = NaviTreeMap::new();
        map.insert_entries([(1, 10), (2, 20)]);

        let mut cursor = map.cursor_mut();
        assert_eq!(cursor.next().map(|(k, _)| *k), Some(1));
        assert_eq!(cursor.prev().map(|(k, _)| *k), Some(1));
        assert_eq!(cursor.next().map(|(k, _)| *k), Some(1));
        assert_eq!(cursor.next().map(|(k, _)| *k), Some(2));
        assert_eq!(cursor.next().map(|(k, _)| *k), None);
        assert_eq!(cursor.prev().map(|(k, _)| *k), Some(2));
    }

    #[test]
    fn set_value_replaces_in_place() {
        let mut map: NaviTreeMap<i64, i64> = NaviTreeMap::new();
        map.insert_entries([(1, 10)]);

        let mut cursor = map.cursor_mut();
        cursor.next();
        assert_eq!(cursor.set_value(11), 10);
        drop(cursor);
        assert_eq!(map.get(&1), 11);
    }

    #[test]
    #[should_panic(expected = "`CursorMut::remove_current()` - no current entry")]
    fn remove_before_positioning_panics() {
        let mut map: NaviTreeMap<i64, i64> = NaviTreeMap::new();
        map.insert_entries([(1, 10)]);
        map.cursor_mut().remove_current();
    }

    #[test]
    #[should_panic(expected = "`CursorMut::remove_current()` - no current entry")]
    fn double_remove_panics() {
        let mut map: NaviTreeMap<i64, i64> = NaviTreeMap::new();
        map.insert_entries([(1, 10), (2, 20)]);
        let mut cursor = map.cursor_mut();
        cursor.next();
        cursor.remove_current();
        cursor.remove_current();
    }

    #[test]
    fn fenced_cursor_stops_at_the_fence() {
        let mut map: NaviTreeMap<i64, i64> = NaviTreeMap::new();
        map.insert_entries([(1, 10), (3, 30), (5, 50), (7, 70)]);

        let mut view = map.sub_map_mut(3, true, 7, false);
        let mut cursor = view.cursor_mut();
        let mut seen = Vec::new();
        while let Some((key, _)) = cursor.next() {
            seen.push(*key);
        }
        assert_eq!(seen, [3, 5]);
        // Backward steps respect the low fence the same way.
        assert_eq!(cursor.prev().map(|(k, _)| *k), Some(5));
        assert_eq!(cursor.prev().map(|(k, _)| *k), Some(3));
        assert_eq!(cursor.prev().map(|(k, _)| *k), None);
    }

    #[test]
    fn descending_cursor_steps_toward_smaller_keys() {
        let mut map: NaviTreeMap<i64, i64> = NaviTreeMap::new();
        map.insert_entries([(1, 10), (2, 20), (3, 30)]);

        let mut view = map.descending_map_mut();
        let mut cursor = view.cursor_mut();
        let mut seen = Vec::new();
        while let Some((key, _)) = cursor.next() {
            seen.push(*key);
        }
        assert_eq!(seen, [3, 2, 1]);
    }
}

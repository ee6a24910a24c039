use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ops::Bound;

use crate::comparator::{Comparator, Natural};
use crate::raw::{Balance, Handle, RawNaviTreeMap, RedBlack};

use super::{CursorMut, NaviTreeMap};

/// The iteration direction of a range view.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Orientation {
    Ascending,
    Descending,
}

impl Orientation {
    pub(crate) fn flipped(self) -> Self {
        match self {
            Orientation::Ascending => Orientation::Descending,
            Orientation::Descending => Orientation::Ascending,
        }
    }
}

pub(crate) fn bound<K>(key: K, inclusive: bool) -> Bound<K> {
    if inclusive { Bound::Included(key) } else { Bound::Excluded(key) }
}

pub(crate) fn above_lo<K, C: Comparator<K>>(cmp: &C, key: &K, lo: &Bound<K>) -> bool {
    match lo {
        Bound::Unbounded => true,
        Bound::Included(b) => cmp.compare(key, b) != Ordering::Less,
        Bound::Excluded(b) => cmp.compare(key, b) == Ordering::Greater,
    }
}

pub(crate) fn below_hi<K, C: Comparator<K>>(cmp: &C, key: &K, hi: &Bound<K>) -> bool {
    match hi {
        Bound::Unbounded => true,
        Bound::Included(b) => cmp.compare(key, b) != Ordering::Greater,
        Bound::Excluded(b) => cmp.compare(key, b) == Ordering::Less,
    }
}

fn in_range<K, C: Comparator<K>>(cmp: &C, key: &K, lo: &Bound<K>, hi: &Bound<K>) -> bool {
    above_lo(cmp, key, lo) && below_hi(cmp, key, hi)
}

/// Panics unless `lo <= hi` (or `lo < hi` when both ends are exclusive, since
/// an exclusive-exclusive range over equal keys cannot even be empty-valid).
fn validate_bounds<K, C: Comparator<K>>(cmp: &C, lo: &Bound<K>, hi: &Bound<K>) {
    if let (Bound::Included(start) | Bound::Excluded(start), Bound::Included(end) | Bound::Excluded(end)) = (lo, hi) {
        let valid = if matches!(lo, Bound::Excluded(_)) && matches!(hi, Bound::Excluded(_)) {
            cmp.compare(start, end) == Ordering::Less
        } else {
            cmp.compare(start, end) != Ordering::Greater
        };
        assert!(valid, "range start is greater than range end in NaviTreeMap");
    }
}

fn lo_within<K, C: Comparator<K>>(cmp: &C, child: &Bound<K>, parent: &Bound<K>) -> bool {
    match (child, parent) {
        (_, Bound::Unbounded) => true,
        (Bound::Unbounded, _) => false,
        (Bound::Included(c) | Bound::Excluded(c), Bound::Included(p)) => cmp.compare(c, p) != Ordering::Less,
        (Bound::Included(c), Bound::Excluded(p)) => cmp.compare(c, p) == Ordering::Greater,
        (Bound::Excluded(c), Bound::Excluded(p)) => cmp.compare(c, p) != Ordering::Less,
    }
}

fn hi_within<K, C: Comparator<K>>(cmp: &C, child: &Bound<K>, parent: &Bound<K>) -> bool {
    match (child, parent) {
        (_, Bound::Unbounded) => true,
        (Bound::Unbounded, _) => false,
        (Bound::Included(c) | Bound::Excluded(c), Bound::Included(p)) => cmp.compare(c, p) != Ordering::Greater,
        (Bound::Included(c), Bound::Excluded(p)) => cmp.compare(c, p) == Ordering::Less,
        (Bound::Excluded(c), Bound::Excluded(p)) => cmp.compare(c, p) != Ordering::Greater,
    }
}

fn assert_within<K, C: Comparator<K>>(cmp: &C, lo: &Bound<K>, hi: &Bound<K>, parent_lo: &Bound<K>, parent_hi: &Bound<K>) {
    assert!(
        lo_within(cmp, lo, parent_lo) && hi_within(cmp, hi, parent_hi),
        "sub-map range out of bounds of its parent view in NaviTreeMap"
    );
}

/// Returns the handle of the smallest in-range node, if any.
pub(crate) fn first_in_range<K, V, B: Balance, C: Comparator<K>>(
    raw: &RawNaviTreeMap<K, V, B, C>,
    lo: &Bound<K>,
    hi: &Bound<K>,
) -> Option<Handle> {
    let h = match lo {
        Bound::Unbounded => raw.first_handle(),
        Bound::Included(k) => raw.lower_bound(k),
        Bound::Excluded(k) => raw.upper_bound(k),
    }?;
    below_hi(raw.comparator(), raw.key(h), hi).then_some(h)
}

/// Returns the handle of the largest in-range node, if any.
pub(crate) fn last_in_range<K, V, B: Balance, C: Comparator<K>>(
    raw: &RawNaviTreeMap<K, V, B, C>,
    lo: &Bound<K>,
    hi: &Bound<K>,
) -> Option<Handle> {
    let h = match hi {
        Bound::Unbounded => raw.last_handle(),
        Bound::Included(k) => raw.upper_bound_inclusive(k),
        Bound::Excluded(k) => raw.lower_bound_exclusive(k),
    }?;
    above_lo(raw.comparator(), raw.key(h), lo).then_some(h)
}

/// A live range view over a [`NaviTreeMap`].
///
/// The view stores its bounds and an orientation, never the entries: reads go
/// straight to the backing tree and are clamped to the range, so the view
/// always reflects the map's current contents. Created by
/// [`sub_map`](NaviTreeMap::sub_map), [`head_map`](NaviTreeMap::head_map),
/// [`tail_map`](NaviTreeMap::tail_map), or
/// [`descending_map`](NaviTreeMap::descending_map).
///
/// A descending view mirrors the directional operations (first ↔ last,
/// floor ↔ ceiling, lower ↔ higher) and iterates in reverse order; the entry
/// set is unchanged. Views narrow further through their own
/// [`sub_map`](SubMap::sub_map)/[`head_map`](SubMap::head_map)/
/// [`tail_map`](SubMap::tail_map), which panic when the child range leaves
/// the parent's.
///
/// # Examples
///
/// ```
/// use navi_tree::NaviTreeMap;
///
/// let mut map: NaviTreeMap<i64, i64> = NaviTreeMap::new();
/// map.insert_entries([(1, 10), (3, 30), (5, 50), (8, 80)]);
///
/// let view = map.sub_map(3, true, 8, false);
/// assert_eq!(view.len(), 2);
/// assert_eq!(*view.first_key(), 3);
/// assert!(!view.contains_key(&8));
///
/// // Descending twice restores the original orientation.
/// let back = view.descending_map().descending_map();
/// let keys: Vec<_> = back.keys().copied().collect();
/// assert_eq!(keys, [3, 5]);
/// ```
#[must_use]
pub struct SubMap<'a, K, V, B: Balance = RedBlack, C = Natural> {
    map: &'a NaviTreeMap<K, V, B, C>,
    lo: Bound<K>,
    hi: Bound<K>,
    orientation: Orientation,
}

impl<'a, K, V, B: Balance, C: Comparator<K>> SubMap<'a, K, V, B, C> {
    pub(crate) fn new(map: &'a NaviTreeMap<K, V, B, C>, lo: Bound<K>, hi: Bound<K>, orientation: Orientation) -> Self {
        validate_bounds(map.raw.comparator(), &lo, &hi);
        SubMap { map, lo, hi, orientation }
    }

    fn cmp(&self) -> &C {
        self.map.raw.comparator()
    }

    /// Returns `true` if `key` is inside the view's range.
    fn key_in_range(&self, key: &K) -> bool {
        in_range(self.cmp(), key, &self.lo, &self.hi)
    }

    /// Handle of the entry a forward traversal of the view starts at.
    fn front_handle(&self) -> Option<Handle> {
        match self.orientation {
            Orientation::Ascending => first_in_range(&self.map.raw, &self.lo, &self.hi),
            Orientation::Descending => last_in_range(&self.map.raw, &self.lo, &self.hi),
        }
    }

    fn back_handle(&self) -> Option<Handle> {
        match self.orientation {
            Orientation::Ascending => last_in_range(&self.map.raw, &self.lo, &self.hi),
            Orientation::Descending => first_in_range(&self.map.raw, &self.lo, &self.hi),
        }
    }

    /// Largest in-range key `<= key`, clamped into the range from above.
    fn floor_handle(&self, key: &K) -> Option<Handle> {
        let raw = &self.map.raw;
        let clamp = match &self.hi {
            Bound::Unbounded => false,
            Bound::Included(b) => self.cmp().compare(key, b) == Ordering::Greater,
            Bound::Excluded(b) => self.cmp().compare(key, b) != Ordering::Less,
        };
        let h = if clamp {
            last_in_range(raw, &self.lo, &self.hi)
        } else {
            raw.upper_bound_inclusive(key)
        }?;
        above_lo(self.cmp(), raw.key(h), &self.lo).then_some(h)
    }

    /// Smallest in-range key `>= key`, clamped into the range from below.
    fn ceiling_handle(&self, key: &K) -> Option<Handle> {
        let raw = &self.map.raw;
        let clamp = match &self.lo {
            Bound::Unbounded => false,
            Bound::Included(b) => self.cmp().compare(key, b) == Ordering::Less,
            Bound::Excluded(b) => self.cmp().compare(key, b) != Ordering::Greater,
        };
        let h = if clamp {
            first_in_range(raw, &self.lo, &self.hi)
        } else {
            raw.lower_bound(key)
        }?;
        below_hi(self.cmp(), raw.key(h), &self.hi).then_some(h)
    }

    /// Largest in-range key `< key`.
    fn lower_handle(&self, key: &K) -> Option<Handle> {
        let raw = &self.map.raw;
        let clamp = match &self.hi {
            Bound::Unbounded => false,
            Bound::Included(b) | Bound::Excluded(b) => self.cmp().compare(key, b) == Ordering::Greater,
        };
        let h = if clamp {
            last_in_range(raw, &self.lo, &self.hi)
        } else {
            raw.lower_bound_exclusive(key)
        }?;
        above_lo(self.cmp(), raw.key(h), &self.lo).then_some(h)
    }

    /// Smallest in-range key `> key`.
    fn higher_handle(&self, key: &K) -> Option<Handle> {
        let raw = &self.map.raw;
        let clamp = match &self.lo {
            Bound::Unbounded => false,
            Bound::Included(b) | Bound::Excluded(b) => self.cmp().compare(key, b) == Ordering::Less,
        };
        let h = if clamp {
            first_in_range(raw, &self.lo, &self.hi)
        } else {
            raw.upper_bound(key)
        }?;
        below_hi(self.cmp(), raw.key(h), &self.hi).then_some(h)
    }

    /// Returns `true` if the view contains an entry for `key`.
    ///
    /// Out-of-range keys are simply not contained; reads never panic.
    pub fn contains_key(&self, key: &K) -> bool {
        self.key_in_range(key) && self.map.raw.search(key).is_some()
    }

    /// Returns a clone of the value for `key`, or the map's default return
    /// value if the key is absent or outside the range.
    #[must_use]
    pub fn get(&self, key: &K) -> V
    where
        V: Clone,
    {
        if !self.key_in_range(key) {
            return self.map.drv.clone();
        }
        self.map.raw.get(key).cloned().unwrap_or_else(|| self.map.drv.clone())
    }

    /// Returns the number of entries inside the range.
    ///
    /// # Complexity
    ///
    /// O(1) when the view is unbounded on both sides, O(range length)
    /// otherwise.
    #[must_use]
    pub fn len(&self) -> usize {
        if matches!(self.lo, Bound::Unbounded) && matches!(self.hi, Bound::Unbounded) {
            return self.map.len();
        }
        self.iter().count()
    }

    /// Returns `true` if no entries fall inside the range.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.front_handle().is_none()
    }

    /// Returns the first key of the view in iteration order (the largest key
    /// for a descending view).
    ///
    /// # Panics
    ///
    /// Panics if the view is empty.
    #[must_use]
    pub fn first_key(&self) -> &K {
        let h = self.front_handle().expect("`SubMap::first_key()` - the sub-map is empty!");
        self.map.raw.key(h)
    }

    /// Returns the last key of the view in iteration order.
    ///
    /// # Panics
    ///
    /// Panics if the view is empty.
    #[must_use]
    pub fn last_key(&self) -> &K {
        let h = self.back_handle().expect("`SubMap::last_key()` - the sub-map is empty!");
        self.map.raw.key(h)
    }

    /// Returns the first entry of the view in iteration order, or `None` if
    /// the view is empty.
    #[allow(clippy::must_use_candidate)]
    pub fn first_entry(&self) -> Option<(&K, &V)> {
        self.front_handle().map(|h| self.map.raw.entry(h))
    }

    /// Returns the last entry of the view in iteration order, or `None` if
    /// the view is empty.
    #[allow(clippy::must_use_candidate)]
    pub fn last_entry(&self) -> Option<(&K, &V)> {
        self.back_handle().map(|h| self.map.raw.entry(h))
    }

    /// Range-clamped [`floor_entry`](NaviTreeMap::floor_entry); on a
    /// descending view this answers the ceiling query instead, matching the
    /// reversed order.
    #[allow(clippy::must_use_candidate)]
    pub fn floor_entry(&self, key: &K) -> Option<(&K, &V)> {
        let h = match self.orientation {
            Orientation::Ascending => self.floor_handle(key),
            Orientation::Descending => self.ceiling_handle(key),
        };
        h.map(|h| self.map.raw.entry(h))
    }

    /// Range-clamped [`ceiling_entry`](NaviTreeMap::ceiling_entry), mirrored
    /// on a descending view.
    #[allow(clippy::must_use_candidate)]
    pub fn ceiling_entry(&self, key: &K) -> Option<(&K, &V)> {
        let h = match self.orientation {
            Orientation::Ascending => self.ceiling_handle(key),
            Orientation::Descending => self.floor_handle(key),
        };
        h.map(|h| self.map.raw.entry(h))
    }

    /// Range-clamped [`lower_entry`](NaviTreeMap::lower_entry), mirrored on a
    /// descending view.
    #[allow(clippy::must_use_candidate)]
    pub fn lower_entry(&self, key: &K) -> Option<(&K, &V)> {
        let h = match self.orientation {
            Orientation::Ascending => self.lower_handle(key),
            Orientation::Descending => self.higher_handle(key),
        };
        h.map(|h| self.map.raw.entry(h))
    }

    /// Range-clamped [`higher_entry`](NaviTreeMap::higher_entry), mirrored on
    /// a descending view.
    #[allow(clippy::must_use_candidate)]
    pub fn higher_entry(&self, key: &K) -> Option<(&K, &V)> {
        let h = match self.orientation {
            Orientation::Ascending => self.higher_handle(key),
            Orientation::Descending => self.lower_handle(key),
        };
        h.map(|h| self.map.raw.entry(h))
    }

    /// Range-clamped [`floor_key`](NaviTreeMap::floor_key), mirrored on a
    /// descending view; returns the map's `no_key_below` marker when no
    /// qualifying key exists.
    #[must_use]
    pub fn floor_key(&self, key: &K) -> K
    where
        K: Clone,
    {
        self.floor_entry(key).map_or_else(|| self.map.no_key_below.clone(), |(k, _)| k.clone())
    }

    /// Range-clamped [`ceiling_key`](NaviTreeMap::ceiling_key), mirrored on a
    /// descending view; returns the map's `no_key_above` marker when no
    /// qualifying key exists.
    #[must_use]
    pub fn ceiling_key(&self, key: &K) -> K
    where
        K: Clone,
    {
        self.ceiling_entry(key).map_or_else(|| self.map.no_key_above.clone(), |(k, _)| k.clone())
    }

    /// Range-clamped [`lower_key`](NaviTreeMap::lower_key), mirrored on a
    /// descending view.
    #[must_use]
    pub fn lower_key(&self, key: &K) -> K
    where
        K: Clone,
    {
        self.lower_entry(key).map_or_else(|| self.map.no_key_below.clone(), |(k, _)| k.clone())
    }

    /// Range-clamped [`higher_key`](NaviTreeMap::higher_key), mirrored on a
    /// descending view.
    #[must_use]
    pub fn higher_key(&self, key: &K) -> K
    where
        K: Clone,
    {
        self.higher_entry(key).map_or_else(|| self.map.no_key_above.clone(), |(k, _)| k.clone())
    }

    /// Gets an iterator over the view's entries in its orientation order.
    pub fn iter(&self) -> SubMapIter<'a, K, V, B, C> {
        let raw = &self.map.raw;
        let front = first_in_range(raw, &self.lo, &self.hi);
        let back = last_in_range(raw, &self.lo, &self.hi);
        SubMapIter {
            tree: core::ptr::from_ref(raw),
            finished: front.is_none() || back.is_none(),
            front,
            back,
            reversed: self.orientation == Orientation::Descending,
            _marker: PhantomData,
        }
    }

    /// Gets an iterator over the view's keys in its orientation order.
    pub fn keys(&self) -> SubMapKeys<'a, K, V, B, C> {
        SubMapKeys { inner: self.iter() }
    }

    /// Narrows the view to keys between `from` and `to` (bounds given in
    /// ascending key order regardless of orientation).
    ///
    /// # Panics
    ///
    /// Panics if the new range is invalid or not fully contained in this
    /// view's range.
    pub fn sub_map(&self, from: K, from_inclusive: bool, to: K, to_inclusive: bool) -> SubMap<'a, K, V, B, C> {
        let lo = bound(from, from_inclusive);
        let hi = bound(to, to_inclusive);
        validate_bounds(self.cmp(), &lo, &hi);
        assert_within(self.cmp(), &lo, &hi, &self.lo, &self.hi);
        SubMap {
            map: self.map,
            lo,
            hi,
            orientation: self.orientation,
        }
    }

    /// Narrows the view's upper bound to `to`.
    ///
    /// # Panics
    ///
    /// Panics if the new range is invalid or not fully contained in this
    /// view's range.
    pub fn head_map(&self, to: K, inclusive: bool) -> SubMap<'a, K, V, B, C>
    where
        K: Clone,
    {
        let hi = bound(to, inclusive);
        validate_bounds(self.cmp(), &self.lo, &hi);
        assert_within(self.cmp(), &self.lo, &hi, &self.lo, &self.hi);
        SubMap {
            map: self.map,
            lo: self.lo.clone(),
            hi,
            orientation: self.orientation,
        }
    }

    /// Narrows the view's lower bound to `from`.
    ///
    /// # Panics
    ///
    /// Panics if the new range is invalid or not fully contained in this
    /// view's range.
    pub fn tail_map(&self, from: K, inclusive: bool) -> SubMap<'a, K, V, B, C>
    where
        K: Clone,
    {
        let lo = bound(from, inclusive);
        validate_bounds(self.cmp(), &lo, &self.hi);
        assert_within(self.cmp(), &lo, &self.hi, &self.lo, &self.hi);
        SubMap {
            map: self.map,
            lo,
            hi: self.hi.clone(),
            orientation: self.orientation,
        }
    }

    /// Returns the same view with the opposite orientation. The bounds are
    /// unchanged, so flipping twice yields an identical view.
    pub fn descending_map(&self) -> SubMap<'a, K, V, B, C>
    where
        K: Clone,
    {
        SubMap {
            map: self.map,
            lo: self.lo.clone(),
            hi: self.hi.clone(),
            orientation: self.orientation.flipped(),
        }
    }
}

impl<K: Clone, V, B: Balance, C> Clone for SubMap<'_, K, V, B, C> {
    fn clone(&self) -> Self {
        SubMap {
            map: self.map,
            lo: self.lo.clone(),
            hi: self.hi.clone(),
            orientation: self.orientation,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, B: Balance, C: Comparator<K>> fmt::Debug for SubMap<'_, K, V, B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, B: Balance, C: Comparator<K>> IntoIterator for &'a SubMap<'a, K, V, B, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = SubMapIter<'a, K, V, B, C>;

    fn into_iter(self) -> SubMapIter<'a, K, V, B, C> {
        self.iter()
    }
}

/// A mutable live range view over a [`NaviTreeMap`].
///
/// Reads behave exactly like [`SubMap`]'s: clamped to the range, never
/// panicking. Writes ([`put`](SubMapMut::put), [`remove`](SubMapMut::remove),
/// [`compute`](SubMapMut::compute)) panic for keys outside the range, so a
/// view can never smuggle entries past its own bounds.
/// [`cursor_mut`](SubMapMut::cursor_mut) yields a [`CursorMut`] fenced to the
/// view's range.
///
/// # Examples
///
/// ```
/// use navi_tree::NaviTreeMap;
///
/// let mut map: NaviTreeMap<i64, i64> = NaviTreeMap::new();
/// map.insert_entries([(1, 10), (5, 50), (9, 90)]);
///
/// let mut view = map.sub_map_mut(4, true, 9, false);
/// view.put(6, 60);
/// assert_eq!(view.remove(&5), 50);
/// assert_eq!(map.get(&6), 60);
/// ```
#[must_use]
pub struct SubMapMut<'a, K, V, B: Balance = RedBlack, C = Natural> {
    map: &'a mut NaviTreeMap<K, V, B, C>,
    lo: Bound<K>,
    hi: Bound<K>,
    orientation: Orientation,
}

impl<'a, K, V, B: Balance, C: Comparator<K>> SubMapMut<'a, K, V, B, C> {
    pub(crate) fn new(map: &'a mut NaviTreeMap<K, V, B, C>, lo: Bound<K>, hi: Bound<K>, orientation: Orientation) -> Self {
        validate_bounds(map.raw.comparator(), &lo, &hi);
        SubMapMut { map, lo, hi, orientation }
    }

    fn key_in_range(&self, key: &K) -> bool {
        in_range(self.map.raw.comparator(), key, &self.lo, &self.hi)
    }

    fn front_handle(&self) -> Option<Handle> {
        match self.orientation {
            Orientation::Ascending => first_in_range(&self.map.raw, &self.lo, &self.hi),
            Orientation::Descending => last_in_range(&self.map.raw, &self.lo, &self.hi),
        }
    }

    fn back_handle(&self) -> Option<Handle> {
        match self.orientation {
            Orientation::Ascending => last_in_range(&self.map.raw, &self.lo, &self.hi),
            Orientation::Descending => first_in_range(&self.map.raw, &self.lo, &self.hi),
        }
    }

    /// Returns `true` if the view contains an entry for `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.key_in_range(key) && self.map.raw.search(key).is_some()
    }

    /// Returns a clone of the value for `key`, or the map's default return
    /// value if the key is absent or outside the range.
    #[must_use]
    pub fn get(&self, key: &K) -> V
    where
        V: Clone,
    {
        if !self.key_in_range(key) {
            return self.map.drv.clone();
        }
        self.map.raw.get(key).cloned().unwrap_or_else(|| self.map.drv.clone())
    }

    /// Returns the number of entries inside the range.
    #[must_use]
    pub fn len(&self) -> usize {
        if matches!(self.lo, Bound::Unbounded) && matches!(self.hi, Bound::Unbounded) {
            return self.map.len();
        }
        self.iter().count()
    }

    /// Returns `true` if no entries fall inside the range.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.front_handle().is_none()
    }

    /// Returns the first key of the view in iteration order.
    ///
    /// # Panics
    ///
    /// Panics if the view is empty.
    #[must_use]
    pub fn first_key(&self) -> &K {
        let h = self.front_handle().expect("`SubMapMut::first_key()` - the sub-map is empty!");
        self.map.raw.key(h)
    }

    /// Returns the last key of the view in iteration order.
    ///
    /// # Panics
    ///
    /// Panics if the view is empty.
    #[must_use]
    pub fn last_key(&self) -> &K {
        let h = self.back_handle().expect("`SubMapMut::last_key()` - the sub-map is empty!");
        self.map.raw.key(h)
    }

    /// Returns the first entry of the view in iteration order, or `None` if
    /// the view is empty.
    #[allow(clippy::must_use_candidate)]
    pub fn first_entry(&self) -> Option<(&K, &V)> {
        self.front_handle().map(|h| self.map.raw.entry(h))
    }

    /// Returns the last entry of the view in iteration order, or `None` if
    /// the view is empty.
    #[allow(clippy::must_use_candidate)]
    pub fn last_entry(&self) -> Option<(&K, &V)> {
        self.back_handle().map(|h| self.map.raw.entry(h))
    }

    /// Gets an iterator over the view's entries in its orientation order.
    pub fn iter(&self) -> SubMapIter<'_, K, V, B, C> {
        let raw = &self.map.raw;
        let front = first_in_range(raw, &self.lo, &self.hi);
        let back = last_in_range(raw, &self.lo, &self.hi);
        SubMapIter {
            tree: core::ptr::from_ref(raw),
            finished: front.is_none() || back.is_none(),
            front,
            back,
            reversed: self.orientation == Orientation::Descending,
            _marker: PhantomData,
        }
    }

    /// Gets an iterator over the view's keys in its orientation order.
    pub fn keys(&self) -> SubMapKeys<'_, K, V, B, C> {
        SubMapKeys { inner: self.iter() }
    }

    /// Inserts a key-value pair through the view.
    ///
    /// # Panics
    ///
    /// Panics if `key` is outside the view's range.
    pub fn put(&mut self, key: K, value: V) -> V
    where
        V: Clone,
    {
        assert!(self.key_in_range(&key), "`SubMapMut::put()` - key out of range!");
        self.map.put(key, value)
    }

    /// Removes the entry for `key` through the view.
    ///
    /// # Panics
    ///
    /// Panics if `key` is outside the view's range.
    pub fn remove(&mut self, key: &K) -> V
    where
        V: Clone,
    {
        assert!(self.key_in_range(key), "`SubMapMut::remove()` - key out of range!");
        self.map.remove(key)
    }

    /// [`compute`](NaviTreeMap::compute)s through the view.
    ///
    /// # Panics
    ///
    /// Panics if `key` is outside the view's range.
    pub fn compute(&mut self, key: K, remap: impl FnOnce(&K, Option<&V>) -> V) -> V
    where
        V: Clone + PartialEq,
    {
        assert!(self.key_in_range(&key), "`SubMapMut::compute()` - key out of range!");
        self.map.compute(key, remap)
    }

    /// Returns the same view with the opposite orientation.
    pub fn descending(mut self) -> Self {
        self.orientation = self.orientation.flipped();
        self
    }

    /// Returns a cursor fenced to the view's range, positioned before its
    /// first entry in orientation order.
    ///
    /// # Examples
    ///
    /// ```
    /// use navi_tree::NaviTreeMap;
    ///
    /// let mut map: NaviTreeMap<i64, i64> = NaviTreeMap::new();
    /// map.insert_entries([(1, 10), (5, 50), (9, 90)]);
    ///
    /// let mut view = map.sub_map_mut(1, true, 9, false);
    /// let mut cursor = view.cursor_mut();
    /// while let Some((key, _value)) = cursor.next() {
    ///     if *key == 5 {
    ///         cursor.remove_current();
    ///     }
    /// }
    /// assert!(!map.contains_key(&5));
    /// assert!(map.contains_key(&9)); // outside the fence, untouched
    /// ```
    pub fn cursor_mut(&mut self) -> CursorMut<'_, K, V, B, C>
    where
        K: Clone,
    {
        let start = self.front_handle();
        CursorMut::new(
            &mut self.map.raw,
            start,
            self.lo.clone(),
            self.hi.clone(),
            self.orientation == Orientation::Descending,
        )
    }
}

impl<K: fmt::Debug, V: fmt::Debug, B: Balance, C: Comparator<K>> fmt::Debug for SubMapMut<'_, K, V, B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// An iterator over the entries of a [`SubMap`] or [`SubMapMut`].
///
/// Both orientations run through the same fenced front/back traversal; a
/// descending view simply swaps which end `next` consumes.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct SubMapIter<'a, K, V, B: Balance = RedBlack, C = Natural> {
    tree: *const RawNaviTreeMap<K, V, B, C>,
    front: Option<Handle>,
    back: Option<Handle>,
    /// Set once the front and back cursors have met and been consumed.
    finished: bool,
    reversed: bool,
    _marker: PhantomData<&'a RawNaviTreeMap<K, V, B, C>>,
}

// SAFETY: SubMapIter behaves as &RawNaviTreeMap, so it is Send/Sync when a
// shared reference to the tree would be.
unsafe impl<K: Sync, V: Sync, B: Balance, C: Sync> Send for SubMapIter<'_, K, V, B, C> {}
unsafe impl<K: Sync, V: Sync, B: Balance, C: Sync> Sync for SubMapIter<'_, K, V, B, C> {}

impl<'a, K, V, B: Balance, C> SubMapIter<'a, K, V, B, C> {
    fn step_front(&mut self) -> Option<(&'a K, &'a V)> {
        if self.finished {
            return None;
        }
        let handle = self.front?;

        // SAFETY: The tree pointer came from a live reference in iter() and
        // the borrow is still active via _marker.
        let tree = unsafe { &*self.tree };
        if self.front == self.back {
            self.finished = true;
        } else {
            self.front = tree.successor(handle);
        }
        Some(tree.entry(handle))
    }

    fn step_back(&mut self) -> Option<(&'a K, &'a V)> {
        if self.finished {
            return None;
        }
        let handle = self.back?;

        // SAFETY: Same as in step_front().
        let tree = unsafe { &*self.tree };
        if self.front == self.back {
            self.finished = true;
        } else {
            self.back = tree.predecessor(handle);
        }
        Some(tree.entry(handle))
    }
}

impl<'a, K, V, B: Balance, C> Iterator for SubMapIter<'a, K, V, B, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.reversed { self.step_back() } else { self.step_front() }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished || self.front.is_none() || self.back.is_none() {
            (0, Some(0))
        } else {
            (1, None)
        }
    }
}

impl<K, V, B: Balance, C> DoubleEndedIterator for SubMapIter<'_, K, V, B, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.reversed { self.step_front() } else { self.step_back() }
    }
}

impl<K, V, B: Balance, C> FusedIterator for SubMapIter<'_, K, V, B, C> {}

impl<K, V, B: Balance, C> Clone for SubMapIter<'_, K, V, B, C> {
    fn clone(&self) -> Self {
        SubMapIter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            finished: self.finished,
            reversed: self.reversed,
            _marker: PhantomData,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, B: Balance, C> fmt::Debug for SubMapIter<'_, K, V, B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubMapIter").field("finished", &self.finished).finish()
    }
}

/// An iterator over the keys of a [`SubMap`] or [`SubMapMut`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct SubMapKeys<'a, K, V, B: Balance = RedBlack, C = Natural> {
    inner: SubMapIter<'a, K, V, B, C>,
}

impl<'a, K, V, B: Balance, C> Iterator for SubMapKeys<'a, K, V, B, C> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, B: Balance, C> DoubleEndedIterator for SubMapKeys<'_, K, V, B, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V, B: Balance, C> FusedIterator for SubMapKeys<'_, K, V, B, C> {}

impl<K, V, B: Balance, C> Clone for SubMapKeys<'_, K, V, B, C> {
    fn clone(&self) -> Self {
        SubMapKeys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V, B: Balance, C> fmt::Debug for SubMapKeys<'_, K, V, B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use crate::NaviTreeMap;
    use alloc::vec::Vec;

    fn sample() -> NaviTreeMap<i64, i64> {
        let mut map: NaviTreeMap<i64, i64> = NaviTreeMap::new();
        map.insert_entries([(1, 10), (3, 30), (5, 50), (7, 70), (9, 90)]);
        map
    }

    #[test]
    fn bounds_clamp_reads() {
        let map = sample();
        let view = map.sub_map(3, true, 7, false);

        assert!(view.contains_key(&3));
        assert!(!view.contains_key(&7));
        assert!(!view.contains_key(&1));
        assert_eq!(view.get(&1), 0);
        assert_eq!(view.floor_key(&9), 5);
        assert_eq!(view.ceiling_key(&0), 3);
        assert_eq!(view.higher_entry(&5), None);
        assert_eq!(view.lower_entry(&3), None);
    }

    #[test]
    fn descending_mirrors_directional_queries() {
        let map = sample();
        let view = map.sub_map(1, true, 9, true).descending_map();

        assert_eq!(*view.first_key(), 9);
        assert_eq!(*view.last_key(), 1);
        // In reversed order, "floor of 6" is the nearest key at or after 6.
        assert_eq!(view.floor_key(&6), 7);
        assert_eq!(view.ceiling_key(&6), 5);

        let keys: Vec<_> = view.keys().copied().collect();
        assert_eq!(keys, [9, 7, 5, 3, 1]);
    }

    #[test]
    fn double_flip_is_identity() {
        let map = sample();
        let view = map.sub_map(3, true, 8, false);
        let twice = view.descending_map().descending_map();

        let a: Vec<_> = view.keys().copied().collect();
        let b: Vec<_> = twice.keys().copied().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn len_counts_by_iteration() {
        let map = sample();
        assert_eq!(map.sub_map(3, true, 7, true).len(), 3);
        assert_eq!(map.head_map(5, false).len(), 2);
        assert_eq!(map.tail_map(5, false).len(), 2);
        assert_eq!(map.descending_map().len(), 5);
        assert!(map.sub_map(4, true, 4, true).is_empty());
    }

    #[test]
    #[should_panic(expected = "range start is greater than range end in NaviTreeMap")]
    fn inverted_bounds_panic() {
        let map = sample();
        let _ = map.sub_map(8, true, 3, true);
    }

    #[test]
    #[should_panic(expected = "sub-map range out of bounds of its parent view in NaviTreeMap")]
    fn widening_a_view_panics() {
        let map = sample();
        let view = map.sub_map(3, true, 7, false);
        let _ = view.sub_map(1, true, 7, false);
    }

    #[test]
    #[should_panic(expected = "`SubMapMut::put()` - key out of range!")]
    fn out_of_range_write_panics() {
        let mut map = sample();
        let mut view = map.sub_map_mut(3, true, 7, false);
        view.put(8, 80);
    }
}

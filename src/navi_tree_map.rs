use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ops::{Bound, Index};

use crate::comparator::{Comparator, Natural};
use crate::raw::{Balance, Handle, RawNaviTreeMap, RedBlack};

mod capacity;
mod cursor;
mod sub_map;

pub use cursor::CursorMut;
pub use sub_map::{SubMap, SubMapIter, SubMapKeys, SubMapMut};

use sub_map::Orientation;

/// A navigable ordered map backed by a self-balancing binary search tree.
///
/// Entries are kept sorted by key under the map's [`Comparator`] (natural
/// order by default), so in-order iteration, minimum/maximum access, and the
/// four proximity queries ([`floor_key`], [`ceiling_key`], [`lower_key`],
/// [`higher_key`]) all run in O(log n) or better. The balancing strategy is a
/// compile-time choice: [`RedBlack`] (the default) or [`Avl`](crate::Avl),
/// selected by the `B` type parameter; both maintain O(log n) height under
/// arbitrary insert/remove sequences.
///
/// It is a logic error for a key to be modified in such a way that the key's
/// ordering relative to any other key, as determined by the comparator,
/// changes while it is in the map. The behavior resulting from such a logic
/// error is not specified, but will be encapsulated to the `NaviTreeMap` that
/// observed the logic error and not result in undefined behavior.
///
/// # Sentinel returns
///
/// The value-returning operations ([`put`], [`get`], [`remove`], [`replace`],
/// the `compute*` family, and [`merge`]) never signal absence through
/// `Option`: they return the map's *default return value* instead, a
/// per-instance `V` initialized to `V::default()` and adjustable through
/// [`set_default_return_value`]. For the `compute*` family and [`merge`], a
/// result equal to the default return value removes the entry rather than
/// storing it. The reference-returning accessors ([`get_entry`], [`get_mut`],
/// [`first_entry`], and friends) use `Option` as usual.
///
/// The key-returning navigation queries do the same with a pair of marker
/// keys, [`no_key_below`] and [`no_key_above`] (both `K::default()` unless
/// changed): `lower_key`/`floor_key` return the former and
/// `ceiling_key`/`higher_key` the latter when no qualifying key exists.
///
/// [`put`]: NaviTreeMap::put
/// [`get`]: NaviTreeMap::get
/// [`remove`]: NaviTreeMap::remove
/// [`replace`]: NaviTreeMap::replace
/// [`merge`]: NaviTreeMap::merge
/// [`get_entry`]: NaviTreeMap::get_entry
/// [`get_mut`]: NaviTreeMap::get_mut
/// [`first_entry`]: NaviTreeMap::first_entry
/// [`floor_key`]: NaviTreeMap::floor_key
/// [`ceiling_key`]: NaviTreeMap::ceiling_key
/// [`lower_key`]: NaviTreeMap::lower_key
/// [`higher_key`]: NaviTreeMap::higher_key
/// [`no_key_below`]: NaviTreeMap::no_key_below
/// [`no_key_above`]: NaviTreeMap::no_key_above
/// [`set_default_return_value`]: NaviTreeMap::set_default_return_value
///
/// # Examples
///
/// ```
/// use navi_tree::NaviTreeMap;
///
/// let mut population: NaviTreeMap<&str, u64> = NaviTreeMap::new();
///
/// population.put("Oslo", 709_037);
/// population.put("Bergen", 291_940);
/// population.put("Trondheim", 214_565);
///
/// // Sentinel semantics: an absent key yields the default return value.
/// assert_eq!(population.get(&"Stavanger"), 0);
///
/// // Keys come back in order.
/// let cities: Vec<_> = population.keys().copied().collect();
/// assert_eq!(cities, ["Bergen", "Oslo", "Trondheim"]);
///
/// // Navigation queries.
/// assert_eq!(population.ceiling_key(&"C"), "Oslo");
/// assert_eq!(*population.first_key(), "Bergen");
/// ```
///
/// Choosing the AVL strategy instead:
///
/// ```
/// use navi_tree::{Avl, NaviTreeMap};
///
/// let mut map: NaviTreeMap<i64, i64, Avl> = NaviTreeMap::new();
/// map.put(1, 10);
/// map.put(2, 20);
/// assert_eq!(map.get(&2), 20);
/// ```
pub struct NaviTreeMap<K, V, B: Balance = RedBlack, C = Natural> {
    raw: RawNaviTreeMap<K, V, B, C>,
    /// Returned by value-returning operations when the key is absent.
    drv: V,
    /// Returned by `lower_key`/`floor_key` when no qualifying key exists.
    no_key_below: K,
    /// Returned by `ceiling_key`/`higher_key` when no qualifying key exists.
    no_key_above: K,
}

impl<K: Default, V: Default, B: Balance> NaviTreeMap<K, V, B, Natural> {
    /// Makes a new, empty `NaviTreeMap` ordered by the keys' natural order.
    ///
    /// Does not allocate anything on its own. The default return value starts
    /// as `V::default()` and both no-key markers as `K::default()`.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use navi_tree::NaviTreeMap;
    ///
    /// let mut map: NaviTreeMap<i64, &str> = NaviTreeMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.put(1, "a");
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }

    /// Builds a map from parallel key and value slices.
    ///
    /// # Panics
    ///
    /// Panics if the slices have different lengths.
    ///
    /// # Examples
    ///
    /// ```
    /// use navi_tree::NaviTreeMap;
    ///
    /// let map: NaviTreeMap<i64, &str> = NaviTreeMap::from_arrays(&[2, 1], &["b", "a"]);
    /// assert_eq!(map.get(&1), "a");
    /// assert_eq!(map.get(&2), "b");
    /// ```
    pub fn from_arrays(keys: &[K], values: &[V]) -> Self
    where
        K: Clone + Ord,
        V: Clone,
    {
        assert!(
            keys.len() == values.len(),
            "`NaviTreeMap::from_arrays()` - {} keys but {} values!",
            keys.len(),
            values.len()
        );
        let mut map = Self::new();
        for (key, value) in keys.iter().zip(values) {
            map.raw.insert(key.clone(), value.clone());
        }
        map
    }
}

impl<K: Default, V: Default, B: Balance, C> NaviTreeMap<K, V, B, C> {
    /// Makes a new, empty `NaviTreeMap` ordered by `cmp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use navi_tree::{NaviTreeMap, RedBlack};
    ///
    /// let mut map: NaviTreeMap<i64, &str, RedBlack, _> =
    ///     NaviTreeMap::with_comparator(|a: &i64, b: &i64| b.cmp(a));
    /// map.put(1, "a");
    /// map.put(2, "b");
    /// assert_eq!(*map.first_key(), 2);
    /// ```
    pub fn with_comparator(cmp: C) -> Self {
        NaviTreeMap {
            raw: RawNaviTreeMap::new(cmp),
            drv: V::default(),
            no_key_below: K::default(),
            no_key_above: K::default(),
        }
    }
}

impl<K, V, B: Balance, C> NaviTreeMap<K, V, B, C> {
    /// Returns the number of entries in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use navi_tree::NaviTreeMap;
    ///
    /// let mut a: NaviTreeMap<i64, &str> = NaviTreeMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.put(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no entries.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Clears the map, removing all entries. The default return value and the
    /// no-key markers are kept.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the value handed out in place of an absent entry.
    pub fn default_return_value(&self) -> &V {
        &self.drv
    }

    /// Sets the value handed out in place of an absent entry.
    ///
    /// A `compute*` or [`merge`](NaviTreeMap::merge) result equal to this
    /// value removes the entry instead of storing it.
    ///
    /// # Examples
    ///
    /// ```
    /// use navi_tree::NaviTreeMap;
    ///
    /// let mut map: NaviTreeMap<i64, i64> = NaviTreeMap::new();
    /// map.set_default_return_value(-1);
    /// assert_eq!(map.get(&42), -1);
    /// ```
    pub fn set_default_return_value(&mut self, value: V) {
        self.drv = value;
    }

    /// Returns the marker [`lower_key`](NaviTreeMap::lower_key) and
    /// [`floor_key`](NaviTreeMap::floor_key) hand out when no qualifying key
    /// exists.
    pub fn no_key_below(&self) -> &K {
        &self.no_key_below
    }

    /// Sets the marker for "no key on the low side".
    pub fn set_no_key_below(&mut self, key: K) {
        self.no_key_below = key;
    }

    /// Returns the marker [`ceiling_key`](NaviTreeMap::ceiling_key) and
    /// [`higher_key`](NaviTreeMap::higher_key) hand out when no qualifying
    /// key exists.
    pub fn no_key_above(&self) -> &K {
        &self.no_key_above
    }

    /// Sets the marker for "no key on the high side".
    pub fn set_no_key_above(&mut self, key: K) {
        self.no_key_above = key;
    }

    /// Returns the smallest key in the map.
    ///
    /// # Panics
    ///
    /// Panics if the map is empty.
    ///
    /// # Complexity
    ///
    /// O(1) - uses the cached minimum handle.
    ///
    /// # Examples
    ///
    /// ```
    /// use navi_tree::NaviTreeMap;
    ///
    /// let mut map: NaviTreeMap<i64, &str> = NaviTreeMap::new();
    /// map.put(2, "b");
    /// map.put(1, "a");
    /// assert_eq!(*map.first_key(), 1);
    /// ```
    #[must_use]
    pub fn first_key(&self) -> &K {
        let first = self.raw.first_handle().expect("`NaviTreeMap::first_key()` - the map is empty!");
        self.raw.key(first)
    }

    /// Returns the largest key in the map.
    ///
    /// # Panics
    ///
    /// Panics if the map is empty.
    ///
    /// # Complexity
    ///
    /// O(1) - uses the cached maximum handle.
    #[must_use]
    pub fn last_key(&self) -> &K {
        let last = self.raw.last_handle().expect("`NaviTreeMap::last_key()` - the map is empty!");
        self.raw.key(last)
    }

    /// Returns the entry with the smallest key, or `None` on an empty map.
    ///
    /// # Examples
    ///
    /// ```
    /// use navi_tree::NaviTreeMap;
    ///
    /// let mut map: NaviTreeMap<i64, &str> = NaviTreeMap::new();
    /// assert_eq!(map.first_entry(), None);
    /// map.insert_entries([(2, "b"), (1, "a")]);
    /// assert_eq!(map.first_entry(), Some((&1, &"a")));
    /// ```
    #[allow(clippy::must_use_candidate)]
    pub fn first_entry(&self) -> Option<(&K, &V)> {
        self.raw.first_handle().map(|h| self.raw.entry(h))
    }

    /// Returns the entry with the largest key, or `None` on an empty map.
    #[allow(clippy::must_use_candidate)]
    pub fn last_entry(&self) -> Option<(&K, &V)> {
        self.raw.last_handle().map(|h| self.raw.entry(h))
    }

    /// Gets an iterator over the entries of the map, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use navi_tree::NaviTreeMap;
    ///
    /// let mut map: NaviTreeMap<i64, &str> = NaviTreeMap::new();
    /// map.insert_entries([(3, "c"), (1, "a"), (2, "b")]);
    ///
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V, B, C> {
        Iter {
            tree: core::ptr::from_ref(&self.raw),
            front: self.raw.first_handle(),
            back: self.raw.last_handle(),
            remaining: self.len(),
            _marker: PhantomData,
        }
    }

    /// Gets a mutable iterator over the entries of the map, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use navi_tree::NaviTreeMap;
    ///
    /// let mut map: NaviTreeMap<&str, i64> = NaviTreeMap::new();
    /// map.insert_entries([("a", 1), ("b", 2), ("c", 3)]);
    ///
    /// // Add 10 to the value if the key isn't "a".
    /// for (key, value) in map.iter_mut() {
    ///     if key != &"a" {
    ///         *value += 10;
    ///     }
    /// }
    /// assert_eq!(map.get(&"b"), 12);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V, B, C> {
        IterMut {
            front: self.raw.first_handle(),
            back: self.raw.last_handle(),
            remaining: self.raw.len(),
            tree: core::ptr::from_mut(&mut self.raw),
            _marker: PhantomData,
        }
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V, B, C> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the keys of the map, in reverse sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use navi_tree::NaviTreeMap;
    ///
    /// let mut map: NaviTreeMap<i64, &str> = NaviTreeMap::new();
    /// map.insert_entries([(1, "a"), (2, "b"), (3, "c")]);
    ///
    /// let keys: Vec<_> = map.descending_keys().copied().collect();
    /// assert_eq!(keys, [3, 2, 1]);
    /// ```
    pub fn descending_keys(&self) -> DescendingKeys<'_, K, V, B, C> {
        DescendingKeys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    pub fn values(&self) -> Values<'_, K, V, B, C> {
        Values { inner: self.iter() }
    }

    /// Gets a mutable iterator over the values of the map, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use navi_tree::NaviTreeMap;
    ///
    /// let mut map: NaviTreeMap<i64, i64> = NaviTreeMap::new();
    /// map.insert_entries([(1, 10), (2, 20)]);
    /// for value in map.values_mut() {
    ///     *value += 1;
    /// }
    /// let values: Vec<_> = map.values().copied().collect();
    /// assert_eq!(values, [11, 21]);
    /// ```
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V, B, C> {
        ValuesMut { inner: self.iter_mut() }
    }
}

impl<K, V, B: Balance, C: Comparator<K>> NaviTreeMap<K, V, B, C> {
    /// Returns `true` if the map contains an entry for the key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use navi_tree::NaviTreeMap;
    ///
    /// let mut map: NaviTreeMap<i64, &str> = NaviTreeMap::new();
    /// map.put(1, "a");
    /// assert!(map.contains_key(&1));
    /// assert!(!map.contains_key(&2));
    /// ```
    pub fn contains_key(&self, key: &K) -> bool {
        self.raw.search(key).is_some()
    }

    /// Returns the stored key and value for `key`, or `None` if absent.
    ///
    /// Unlike [`get`](NaviTreeMap::get) this borrows instead of cloning, and
    /// signals absence through `Option` rather than the default return value.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[allow(clippy::must_use_candidate)]
    pub fn get_entry(&self, key: &K) -> Option<(&K, &V)> {
        self.raw.search(key).map(|h| self.raw.entry(h))
    }

    /// Returns a mutable reference to the value for `key`, or `None` if
    /// absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use navi_tree::NaviTreeMap;
    ///
    /// let mut map: NaviTreeMap<i64, &str> = NaviTreeMap::new();
    /// map.put(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.raw.get_mut(key)
    }

    /// Inserts all entries of the iterator, overwriting on duplicate keys.
    ///
    /// This is [`Extend`] without the `V: Clone` bound that
    /// [`put`](NaviTreeMap::put) needs for its sentinel return.
    pub fn insert_entries<I: IntoIterator<Item = (K, V)>>(&mut self, entries: I) {
        for (key, value) in entries {
            self.raw.insert(key, value);
        }
    }

    /// Removes and returns the entry with the smallest key, or `None` on an
    /// empty map.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// Draining entries in ascending order, while keeping a usable map each
    /// iteration.
    ///
    /// ```
    /// use navi_tree::NaviTreeMap;
    ///
    /// let mut map: NaviTreeMap<i64, &str> = NaviTreeMap::new();
    /// map.insert_entries([(1, "a"), (2, "b")]);
    /// while let Some((key, _value)) = map.pop_first() {
    ///     assert!(map.keys().all(|k| *k > key));
    /// }
    /// assert!(map.is_empty());
    /// ```
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.raw.pop_first()
    }

    /// Removes and returns the entry with the largest key, or `None` on an
    /// empty map.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.raw.pop_last()
    }

    /// Returns the entry with the greatest key strictly less than `key`.
    #[allow(clippy::must_use_candidate)]
    pub fn lower_entry(&self, key: &K) -> Option<(&K, &V)> {
        self.raw.lower_bound_exclusive(key).map(|h| self.raw.entry(h))
    }

    /// Returns the entry with the greatest key less than or equal to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use navi_tree::NaviTreeMap;
    ///
    /// let mut map: NaviTreeMap<i64, &str> = NaviTreeMap::new();
    /// map.insert_entries([(1, "a"), (5, "e"), (7, "g")]);
    /// assert_eq!(map.floor_entry(&6), Some((&5, &"e")));
    /// assert_eq!(map.floor_entry(&5), Some((&5, &"e")));
    /// assert_eq!(map.floor_entry(&0), None);
    /// ```
    #[allow(clippy::must_use_candidate)]
    pub fn floor_entry(&self, key: &K) -> Option<(&K, &V)> {
        self.raw.upper_bound_inclusive(key).map(|h| self.raw.entry(h))
    }

    /// Returns the entry with the smallest key greater than or equal to
    /// `key`.
    #[allow(clippy::must_use_candidate)]
    pub fn ceiling_entry(&self, key: &K) -> Option<(&K, &V)> {
        self.raw.lower_bound(key).map(|h| self.raw.entry(h))
    }

    /// Returns the entry with the smallest key strictly greater than `key`.
    #[allow(clippy::must_use_candidate)]
    pub fn higher_entry(&self, key: &K) -> Option<(&K, &V)> {
        self.raw.upper_bound(key).map(|h| self.raw.entry(h))
    }
}

impl<K: Clone, V, B: Balance, C: Comparator<K>> NaviTreeMap<K, V, B, C> {
    /// Returns the greatest key strictly less than `key`, or the
    /// [`no_key_below`](NaviTreeMap::no_key_below) marker if there is none.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn lower_key(&self, key: &K) -> K {
        self.raw
            .lower_bound_exclusive(key)
            .map_or_else(|| self.no_key_below.clone(), |h| self.raw.key(h).clone())
    }

    /// Returns the greatest key less than or equal to `key`, or the
    /// [`no_key_below`](NaviTreeMap::no_key_below) marker if there is none.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use navi_tree::NaviTreeMap;
    ///
    /// let mut map: NaviTreeMap<i64, i64> = NaviTreeMap::new();
    /// map.insert_entries([(1, 10), (5, 50), (7, 70)]);
    /// assert_eq!(map.floor_key(&6), 5);
    /// assert_eq!(map.floor_key(&0), 0); // the no-key-below marker
    /// ```
    #[must_use]
    pub fn floor_key(&self, key: &K) -> K {
        self.raw
            .upper_bound_inclusive(key)
            .map_or_else(|| self.no_key_below.clone(), |h| self.raw.key(h).clone())
    }

    /// Returns the smallest key greater than or equal to `key`, or the
    /// [`no_key_above`](NaviTreeMap::no_key_above) marker if there is none.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn ceiling_key(&self, key: &K) -> K {
        self.raw
            .lower_bound(key)
            .map_or_else(|| self.no_key_above.clone(), |h| self.raw.key(h).clone())
    }

    /// Returns the smallest key strictly greater than `key`, or the
    /// [`no_key_above`](NaviTreeMap::no_key_above) marker if there is none.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn higher_key(&self, key: &K) -> K {
        self.raw
            .upper_bound(key)
            .map_or_else(|| self.no_key_above.clone(), |h| self.raw.key(h).clone())
    }

    /// Returns a view of the entries whose keys range from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if `from > to`, or if `from == to` and both ends are exclusive.
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
    /// let keys: Vec<_> = view.keys().copied().collect();
    /// assert_eq!(keys, [3, 5]);
    /// ```
    #[must_use]
    pub fn sub_map(&self, from: K, from_inclusive: bool, to: K, to_inclusive: bool) -> SubMap<'_, K, V, B, C> {
        SubMap::new(
            self,
            sub_map::bound(from, from_inclusive),
            sub_map::bound(to, to_inclusive),
            Orientation::Ascending,
        )
    }

    /// Returns a view of the entries whose keys are below `to`.
    #[must_use]
    pub fn head_map(&self, to: K, inclusive: bool) -> SubMap<'_, K, V, B, C> {
        SubMap::new(self, Bound::Unbounded, sub_map::bound(to, inclusive), Orientation::Ascending)
    }

    /// Returns a view of the entries whose keys are above `from`.
    #[must_use]
    pub fn tail_map(&self, from: K, inclusive: bool) -> SubMap<'_, K, V, B, C> {
        SubMap::new(self, sub_map::bound(from, inclusive), Bound::Unbounded, Orientation::Ascending)
    }

    /// Returns a reverse-order view of the whole map.
    ///
    /// # Examples
    ///
    /// ```
    /// use navi_tree::NaviTreeMap;
    ///
    /// let mut map: NaviTreeMap<i64, i64> = NaviTreeMap::new();
    /// map.insert_entries([(1, 10), (2, 20), (3, 30)]);
    ///
    /// let view = map.descending_map();
    /// assert_eq!(*view.first_key(), 3);
    /// let keys: Vec<_> = view.keys().copied().collect();
    /// assert_eq!(keys, [3, 2, 1]);
    /// ```
    #[must_use]
    pub fn descending_map(&self) -> SubMap<'_, K, V, B, C> {
        SubMap::new(self, Bound::Unbounded, Bound::Unbounded, Orientation::Descending)
    }

    /// Returns a mutable view of the entries whose keys range from `from` to
    /// `to`. Writes through the view panic for keys outside the range.
    ///
    /// # Panics
    ///
    /// Panics if `from > to`, or if `from == to` and both ends are exclusive.
    pub fn sub_map_mut(&mut self, from: K, from_inclusive: bool, to: K, to_inclusive: bool) -> SubMapMut<'_, K, V, B, C> {
        SubMapMut::new(
            self,
            sub_map::bound(from, from_inclusive),
            sub_map::bound(to, to_inclusive),
            Orientation::Ascending,
        )
    }

    /// Returns a mutable view of the entries whose keys are below `to`.
    pub fn head_map_mut(&mut self, to: K, inclusive: bool) -> SubMapMut<'_, K, V, B, C> {
        SubMapMut::new(self, Bound::Unbounded, sub_map::bound(to, inclusive), Orientation::Ascending)
    }

    /// Returns a mutable view of the entries whose keys are above `from`.
    pub fn tail_map_mut(&mut self, from: K, inclusive: bool) -> SubMapMut<'_, K, V, B, C> {
        SubMapMut::new(self, sub_map::bound(from, inclusive), Bound::Unbounded, Orientation::Ascending)
    }

    /// Returns a mutable reverse-order view of the whole map.
    pub fn descending_map_mut(&mut self) -> SubMapMut<'_, K, V, B, C> {
        SubMapMut::new(self, Bound::Unbounded, Bound::Unbounded, Orientation::Descending)
    }

    /// Returns a cursor positioned before the first entry.
    ///
    /// The cursor walks the map in either direction and supports removing or
    /// replacing the entry it last returned; see [`CursorMut`].
    ///
    /// # Examples
    ///
    /// ```
    /// use navi_tree::NaviTreeMap;
    ///
    /// let mut map: NaviTreeMap<i64, i64> = NaviTreeMap::new();
    /// map.insert_entries([(1, 10), (2, 20), (3, 30)]);
    ///
    /// let mut cursor = map.cursor_mut();
    /// while let Some((key, value)) = cursor.next() {
    ///     if *key == 2 {
    ///         *value *= 100;
    ///     }
    /// }
    /// assert_eq!(map.get(&2), 2000);
    /// ```
    pub fn cursor_mut(&mut self) -> CursorMut<'_, K, V, B, C> {
        let start = self.raw.first_handle();
        CursorMut::new(&mut self.raw, start, Bound::Unbounded, Bound::Unbounded, false)
    }
}

impl<K, V: Clone, B: Balance, C: Comparator<K>> NaviTreeMap<K, V, B, C> {
    /// Inserts a key-value pair into the map, returning the previous value
    /// for the key, or the default return value if the key was absent.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use navi_tree::NaviTreeMap;
    ///
    /// let mut map: NaviTreeMap<i64, i64> = NaviTreeMap::new();
    /// assert_eq!(map.put(37, 1), 0);
    /// assert_eq!(map.put(37, 2), 1);
    /// assert_eq!(map.get(&37), 2);
    /// ```
    pub fn put(&mut self, key: K, value: V) -> V {
        self.raw.insert(key, value).unwrap_or_else(|| self.drv.clone())
    }

    /// Inserts the pair only if the key is absent. Returns the value left in
    /// the map for the key, or the default return value if it was inserted.
    pub fn put_if_absent(&mut self, key: K, value: V) -> V {
        if let Some(existing) = self.raw.get(&key) {
            return existing.clone();
        }
        self.raw.insert(key, value);
        self.drv.clone()
    }

    /// Returns a clone of the value for `key`, or the default return value if
    /// the key is absent.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use navi_tree::NaviTreeMap;
    ///
    /// let mut map: NaviTreeMap<i64, i64> = NaviTreeMap::new();
    /// map.put(1, 10);
    /// assert_eq!(map.get(&1), 10);
    /// assert_eq!(map.get(&2), 0);
    /// ```
    #[must_use]
    pub fn get(&self, key: &K) -> V {
        self.raw.get(key).cloned().unwrap_or_else(|| self.drv.clone())
    }

    /// Returns a clone of the value for `key`, or `default` if the key is
    /// absent.
    #[must_use]
    pub fn get_or_default(&self, key: &K, default: V) -> V {
        self.raw.get(key).cloned().unwrap_or(default)
    }

    /// Removes the entry for `key`, returning its value, or the default
    /// return value if the key was absent.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use navi_tree::NaviTreeMap;
    ///
    /// let mut map: NaviTreeMap<i64, i64> = NaviTreeMap::new();
    /// map.put(1, 10);
    /// assert_eq!(map.remove(&1), 10);
    /// assert_eq!(map.remove(&1), 0);
    /// ```
    pub fn remove(&mut self, key: &K) -> V {
        self.raw.remove(key).map_or_else(|| self.drv.clone(), |(_, value)| value)
    }

    /// Replaces the value for `key` only if an entry already exists. Returns
    /// the previous value, or the default return value if the key was absent
    /// (in which case nothing is stored).
    pub fn replace(&mut self, key: &K, value: V) -> V {
        match self.raw.get_mut(key) {
            Some(slot) => core::mem::replace(slot, value),
            None => self.drv.clone(),
        }
    }
}

impl<K, V: Clone + PartialEq, B: Balance, C: Comparator<K>> NaviTreeMap<K, V, B, C> {
    /// Removes the entry for `key` only if its value equals `value`. Returns
    /// whether an entry was removed.
    pub fn remove_if_equals(&mut self, key: &K, value: &V) -> bool {
        if self.raw.get(key).is_some_and(|v| v == value) {
            self.raw.remove(key);
            true
        } else {
            false
        }
    }

    /// Computes a new value for `key` from the current one (or `None` if
    /// absent) and stores it, returning the result.
    ///
    /// A result equal to the default return value removes the entry instead
    /// of storing it.
    ///
    /// # Examples
    ///
    /// ```
    /// use navi_tree::NaviTreeMap;
    ///
    /// let mut map: NaviTreeMap<&str, i64> = NaviTreeMap::new();
    /// map.put("hits", 2);
    /// assert_eq!(map.compute("hits", |_, v| v.copied().unwrap_or(0) + 1), 3);
    /// // Computing the default return value (0) removes the entry.
    /// assert_eq!(map.compute("hits", |_, _| 0), 0);
    /// assert!(!map.contains_key(&"hits"));
    /// ```
    pub fn compute(&mut self, key: K, remap: impl FnOnce(&K, Option<&V>) -> V) -> V {
        let result = remap(&key, self.raw.get(&key));
        if result == self.drv {
            self.raw.remove(&key);
        } else {
            self.raw.insert(key, result.clone());
        }
        result
    }

    /// Computes and stores a value for `key` only if the key is absent.
    /// Returns the value left in the map, or the default return value if the
    /// computation produced it (in which case nothing is stored).
    pub fn compute_if_absent(&mut self, key: K, compute: impl FnOnce(&K) -> V) -> V {
        if let Some(existing) = self.raw.get(&key) {
            return existing.clone();
        }
        let result = compute(&key);
        if result != self.drv {
            self.raw.insert(key, result.clone());
        }
        result
    }

    /// Computes a new value for `key` only if an entry exists. Returns the
    /// result, or the default return value if the key was absent; a result
    /// equal to the default return value removes the entry.
    pub fn compute_if_present(&mut self, key: &K, remap: impl FnOnce(&K, &V) -> V) -> V {
        let Some(current) = self.raw.get(key) else {
            return self.drv.clone();
        };
        let result = remap(key, current);
        if result == self.drv {
            self.raw.remove(key);
        } else if let Some(slot) = self.raw.get_mut(key) {
            slot.clone_from(&result);
        }
        result
    }

    /// Inserts `value` when the key is absent or its stored value equals the
    /// default return value; otherwise combines the current value with
    /// `value` through `merge`. A combined result equal to the default return
    /// value removes the entry. Returns the value left in the map (or the
    /// default return value after a removal).
    ///
    /// # Examples
    ///
    /// ```
    /// use navi_tree::NaviTreeMap;
    ///
    /// let mut map: NaviTreeMap<&str, i64> = NaviTreeMap::new();
    /// map.merge("word", 1, |old, new| old + new);
    /// map.merge("word", 1, |old, new| old + new);
    /// assert_eq!(map.get(&"word"), 2);
    /// ```
    pub fn merge(&mut self, key: K, value: V, merge: impl FnOnce(&V, &V) -> V) -> V {
        let result = match self.raw.get(&key) {
            Some(current) if *current != self.drv => merge(current, &value),
            _ => value,
        };
        if result == self.drv {
            self.raw.remove(&key);
        } else {
            self.raw.insert(key, result.clone());
        }
        result
    }

    /// [`merge`](NaviTreeMap::merge)s every entry of the iterator with one
    /// combining function.
    pub fn merge_all<I>(&mut self, entries: I, mut merge: impl FnMut(&V, &V) -> V)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in entries {
            self.merge(key, value, &mut merge);
        }
    }
}

impl<K: Clone, V: Clone, B: Balance, C: Clone> Clone for NaviTreeMap<K, V, B, C> {
    /// A deep structural copy: the clone reproduces the exact tree shape and
    /// balancing metadata, plus the default return value and both no-key
    /// markers.
    fn clone(&self) -> Self {
        NaviTreeMap {
            raw: self.raw.clone(),
            drv: self.drv.clone(),
            no_key_below: self.no_key_below.clone(),
            no_key_above: self.no_key_above.clone(),
        }
    }
}

impl<K: Clone, V: Clone, B: Balance, C: Clone> From<&NaviTreeMap<K, V, B, C>> for NaviTreeMap<K, V, B, C> {
    fn from(map: &NaviTreeMap<K, V, B, C>) -> Self {
        map.clone()
    }
}

impl<K: Default, V: Default, B: Balance, C: Default> Default for NaviTreeMap<K, V, B, C> {
    fn default() -> Self {
        NaviTreeMap::with_comparator(C::default())
    }
}

impl<K: Hash, V: Hash, B: Balance, C> Hash for NaviTreeMap<K, V, B, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl<K: PartialEq, V: PartialEq, B: Balance, C> PartialEq for NaviTreeMap<K, V, B, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq, B: Balance, C> Eq for NaviTreeMap<K, V, B, C> {}

impl<K: PartialOrd, V: PartialOrd, B: Balance, C> PartialOrd for NaviTreeMap<K, V, B, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord, V: Ord, B: Balance, C> Ord for NaviTreeMap<K, V, B, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, B: Balance, C> fmt::Debug for NaviTreeMap<K, V, B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, B: Balance, C: Comparator<K>> Index<&K> for NaviTreeMap<K, V, B, C> {
    type Output = V;

    /// Returns a reference to the value for `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &K) -> &V {
        self.raw.get(key).expect("no entry found for key")
    }
}

impl<K: Default + Ord, V: Default, B: Balance, const N: usize> From<[(K, V); N]> for NaviTreeMap<K, V, B, Natural> {
    /// ```
    /// use navi_tree::NaviTreeMap;
    ///
    /// let map: NaviTreeMap<i64, &str> = NaviTreeMap::from([(2, "b"), (1, "a")]);
    /// assert_eq!(*map.first_key(), 1);
    /// ```
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<K: Default, V: Default, B: Balance, C: Comparator<K> + Default> FromIterator<(K, V)> for NaviTreeMap<K, V, B, C> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = NaviTreeMap::with_comparator(C::default());
        map.insert_entries(iter);
        map
    }
}

impl<K, V, B: Balance, C: Comparator<K>> Extend<(K, V)> for NaviTreeMap<K, V, B, C> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.insert_entries(iter);
    }
}

impl<'a, K: Copy, V: Copy, B: Balance, C: Comparator<K>> Extend<(&'a K, &'a V)> for NaviTreeMap<K, V, B, C> {
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        for (&k, &v) in iter {
            self.raw.insert(k, v);
        }
    }
}

impl<'a, K, V, B: Balance, C> IntoIterator for &'a NaviTreeMap<K, V, B, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, B, C>;

    fn into_iter(self) -> Iter<'a, K, V, B, C> {
        self.iter()
    }
}

impl<'a, K, V, B: Balance, C> IntoIterator for &'a mut NaviTreeMap<K, V, B, C> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V, B, C>;

    fn into_iter(self) -> IterMut<'a, K, V, B, C> {
        self.iter_mut()
    }
}

impl<K, V, B: Balance, C: Comparator<K>> IntoIterator for NaviTreeMap<K, V, B, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use navi_tree::NaviTreeMap;
    ///
    /// let map: NaviTreeMap<i64, &str> = NaviTreeMap::from([(2, "b"), (1, "a")]);
    /// let mut iter = map.into_iter();
    /// assert_eq!(iter.next(), Some((1, "a")));
    /// assert_eq!(iter.next_back(), Some((2, "b")));
    /// assert_eq!(iter.next(), None);
    /// ```
    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.drain_in_order().into_iter(),
        }
    }
}

impl<K, V, B: Balance, C: Comparator<K>> NaviTreeMap<K, V, B, C> {
    /// Creates a consuming iterator over the keys of the map, in sorted
    /// order.
    #[must_use = "iterators are lazy and do nothing unless consumed"]
    pub fn into_keys(self) -> IntoKeys<K, V> {
        IntoKeys { inner: self.into_iter() }
    }

    /// Creates a consuming iterator over the values of the map, in order by
    /// key.
    #[must_use = "iterators are lazy and do nothing unless consumed"]
    pub fn into_values(self) -> IntoValues<K, V> {
        IntoValues { inner: self.into_iter() }
    }
}

// ─── Iterators ───────────────────────────────────────────────────────────────

/// An iterator over the entries of a `NaviTreeMap`.
///
/// This `struct` is created by the [`iter`](NaviTreeMap::iter) method on
/// [`NaviTreeMap`]. See its documentation for more.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V, B: Balance = RedBlack, C = Natural> {
    tree: *const RawNaviTreeMap<K, V, B, C>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
    _marker: PhantomData<&'a RawNaviTreeMap<K, V, B, C>>,
}

// SAFETY: Iter behaves as &RawNaviTreeMap, so it is Send/Sync when a shared
// reference to the tree would be.
unsafe impl<K: Sync, V: Sync, B: Balance, C: Sync> Send for Iter<'_, K, V, B, C> {}
unsafe impl<K: Sync, V: Sync, B: Balance, C: Sync> Sync for Iter<'_, K, V, B, C> {}

impl<'a, K, V, B: Balance, C> Iterator for Iter<'a, K, V, B, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;

        // SAFETY: When remaining > 0 the tree pointer came from a live
        // reference in iter() and the borrow is still active via _marker.
        let tree = unsafe { &*self.tree };
        let entry = tree.entry(handle);

        self.remaining -= 1;
        if self.remaining == 0 {
            self.front = None;
            self.back = None;
        } else {
            self.front = tree.successor(handle);
        }
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, B: Balance, C> DoubleEndedIterator for Iter<'_, K, V, B, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;

        // SAFETY: Same as in next().
        let tree = unsafe { &*self.tree };
        let entry = tree.entry(handle);

        self.remaining -= 1;
        if self.remaining == 0 {
            self.front = None;
            self.back = None;
        } else {
            self.back = tree.predecessor(handle);
        }
        Some(entry)
    }
}

impl<K, V, B: Balance, C> ExactSizeIterator for Iter<'_, K, V, B, C> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V, B: Balance, C> FusedIterator for Iter<'_, K, V, B, C> {}

impl<K: fmt::Debug, V: fmt::Debug, B: Balance, C> fmt::Debug for Iter<'_, K, V, B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("remaining", &self.remaining).finish()
    }
}

impl<K, V, B: Balance, C> Default for Iter<'_, K, V, B, C> {
    /// Creates an empty `navi_tree_map::Iter`.
    ///
    /// ```
    /// # use navi_tree::navi_tree_map;
    /// let iter: navi_tree_map::Iter<'_, u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        Iter {
            // SAFETY: tree is never dereferenced when remaining == 0, so a
            // dangling pointer is safe here.
            tree: core::ptr::NonNull::dangling().as_ptr(),
            front: None,
            back: None,
            remaining: 0,
            _marker: PhantomData,
        }
    }
}

impl<K, V, B: Balance, C> Clone for Iter<'_, K, V, B, C> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

/// A mutable iterator over the entries of a `NaviTreeMap`.
///
/// This `struct` is created by the [`iter_mut`](NaviTreeMap::iter_mut) method
/// on [`NaviTreeMap`]. See its documentation for more.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IterMut<'a, K, V, B: Balance = RedBlack, C = Natural> {
    tree: *mut RawNaviTreeMap<K, V, B, C>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
    _marker: PhantomData<&'a mut (K, V)>,
}

// SAFETY: IterMut behaves as &mut RawNaviTreeMap, so it is Send when K and V
// are Send. It is NOT Sync because mutable iterators should not be shared
// across threads.
unsafe impl<K: Send, V: Send, B: Balance, C: Send> Send for IterMut<'_, K, V, B, C> {}

impl<'a, K, V, B: Balance, C> Iterator for IterMut<'a, K, V, B, C> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;

        // SAFETY: We have exclusive access to the tree through the raw
        // pointer and never visit the same entry twice. Keys live in the
        // nodes arena and values in the values arena (separate allocations);
        // both are reached through field-projected raw pointers so the
        // returned borrows never alias.
        unsafe {
            let key = RawNaviTreeMap::key_ptr(self.tree, handle);
            let value_handle = RawNaviTreeMap::value_handle_ptr(self.tree, handle);
            let value = RawNaviTreeMap::value_mut_ptr(self.tree, value_handle);

            self.remaining -= 1;
            if self.remaining == 0 {
                self.front = None;
                self.back = None;
            } else {
                self.front = RawNaviTreeMap::successor_ptr(self.tree, handle);
            }
            Some((key, value))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, B: Balance, C> DoubleEndedIterator for IterMut<'_, K, V, B, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;

        // SAFETY: Same as in next().
        unsafe {
            let key = RawNaviTreeMap::key_ptr(self.tree, handle);
            let value_handle = RawNaviTreeMap::value_handle_ptr(self.tree, handle);
            let value = RawNaviTreeMap::value_mut_ptr(self.tree, value_handle);

            self.remaining -= 1;
            if self.remaining == 0 {
                self.front = None;
                self.back = None;
            } else {
                self.back = RawNaviTreeMap::predecessor_ptr(self.tree, handle);
            }
            Some((key, value))
        }
    }
}

impl<K, V, B: Balance, C> ExactSizeIterator for IterMut<'_, K, V, B, C> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V, B: Balance, C> FusedIterator for IterMut<'_, K, V, B, C> {}

impl<K: fmt::Debug, V: fmt::Debug, B: Balance, C> fmt::Debug for IterMut<'_, K, V, B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut").field("remaining", &self.remaining).finish()
    }
}

impl<K, V, B: Balance, C> Default for IterMut<'_, K, V, B, C> {
    /// Creates an empty `navi_tree_map::IterMut`.
    ///
    /// ```
    /// # use navi_tree::navi_tree_map;
    /// let iter: navi_tree_map::IterMut<'_, u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        IterMut {
            tree: core::ptr::null_mut(),
            front: None,
            back: None,
            remaining: 0,
            _marker: PhantomData,
        }
    }
}

/// An owning iterator over the entries of a `NaviTreeMap`, sorted by key.
///
/// This `struct` is created by the [`into_iter`](IntoIterator::into_iter)
/// method on [`NaviTreeMap`].
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("len", &self.inner.len()).finish()
    }
}

impl<K, V> Default for IntoIter<K, V> {
    fn default() -> Self {
        IntoIter {
            inner: alloc::vec::Vec::new().into_iter(),
        }
    }
}

/// An iterator over the keys of a `NaviTreeMap`.
///
/// This `struct` is created by the [`keys`](NaviTreeMap::keys) method on
/// [`NaviTreeMap`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V, B: Balance = RedBlack, C = Natural> {
    inner: Iter<'a, K, V, B, C>,
}

impl<'a, K, V, B: Balance, C> Iterator for Keys<'a, K, V, B, C> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, B: Balance, C> DoubleEndedIterator for Keys<'_, K, V, B, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V, B: Balance, C> ExactSizeIterator for Keys<'_, K, V, B, C> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V, B: Balance, C> FusedIterator for Keys<'_, K, V, B, C> {}

impl<K: fmt::Debug, V, B: Balance, C> fmt::Debug for Keys<'_, K, V, B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V, B: Balance, C> Clone for Keys<'_, K, V, B, C> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

/// An iterator over the keys of a `NaviTreeMap` in reverse sorted order.
///
/// This `struct` is created by the
/// [`descending_keys`](NaviTreeMap::descending_keys) method on
/// [`NaviTreeMap`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct DescendingKeys<'a, K, V, B: Balance = RedBlack, C = Natural> {
    inner: Iter<'a, K, V, B, C>,
}

impl<'a, K, V, B: Balance, C> Iterator for DescendingKeys<'a, K, V, B, C> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, B: Balance, C> DoubleEndedIterator for DescendingKeys<'_, K, V, B, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

impl<K, V, B: Balance, C> ExactSizeIterator for DescendingKeys<'_, K, V, B, C> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V, B: Balance, C> FusedIterator for DescendingKeys<'_, K, V, B, C> {}

impl<K: fmt::Debug, V, B: Balance, C> fmt::Debug for DescendingKeys<'_, K, V, B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescendingKeys").field("remaining", &self.inner.remaining).finish()
    }
}

/// An iterator over the values of a `NaviTreeMap`.
///
/// This `struct` is created by the [`values`](NaviTreeMap::values) method on
/// [`NaviTreeMap`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V, B: Balance = RedBlack, C = Natural> {
    inner: Iter<'a, K, V, B, C>,
}

impl<'a, K, V, B: Balance, C> Iterator for Values<'a, K, V, B, C> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, B: Balance, C> DoubleEndedIterator for Values<'_, K, V, B, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V, B: Balance, C> ExactSizeIterator for Values<'_, K, V, B, C> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V, B: Balance, C> FusedIterator for Values<'_, K, V, B, C> {}

impl<K, V: fmt::Debug, B: Balance, C> fmt::Debug for Values<'_, K, V, B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Values").field("remaining", &self.inner.remaining).finish()
    }
}

impl<K, V, B: Balance, C> Clone for Values<'_, K, V, B, C> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

/// A mutable iterator over the values of a `NaviTreeMap`.
///
/// This `struct` is created by the [`values_mut`](NaviTreeMap::values_mut)
/// method on [`NaviTreeMap`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ValuesMut<'a, K, V, B: Balance = RedBlack, C = Natural> {
    inner: IterMut<'a, K, V, B, C>,
}

impl<'a, K, V, B: Balance, C> Iterator for ValuesMut<'a, K, V, B, C> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, B: Balance, C> DoubleEndedIterator for ValuesMut<'_, K, V, B, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V, B: Balance, C> ExactSizeIterator for ValuesMut<'_, K, V, B, C> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V, B: Balance, C> FusedIterator for ValuesMut<'_, K, V, B, C> {}

impl<K, V: fmt::Debug, B: Balance, C> fmt::Debug for ValuesMut<'_, K, V, B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValuesMut").field("remaining", &self.inner.remaining).finish()
    }
}

/// An owning iterator over the keys of a `NaviTreeMap`.
///
/// This `struct` is created by the [`into_keys`](NaviTreeMap::into_keys)
/// method on [`NaviTreeMap`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoKeys<K, V> {
    inner: IntoIter<K, V>,
}

impl<K, V> Iterator for IntoKeys<K, V> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoKeys<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for IntoKeys<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoKeys<K, V> {}

impl<K: fmt::Debug, V> fmt::Debug for IntoKeys<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoKeys").field("len", &self.inner.len()).finish()
    }
}

/// An owning iterator over the values of a `NaviTreeMap`.
///
/// This `struct` is created by the [`into_values`](NaviTreeMap::into_values)
/// method on [`NaviTreeMap`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoValues<K, V> {
    inner: IntoIter<K, V>,
}

impl<K, V> Iterator for IntoValues<K, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoValues<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for IntoValues<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoValues<K, V> {}

impl<K, V: fmt::Debug> fmt::Debug for IntoValues<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoValues").field("len", &self.inner.len()).finish()
    }
}

use super::NaviTreeMap;
use crate::comparator::Natural;
use crate::raw::{Balance, RawNaviTreeMap};

impl<K: Default, V: Default, B: Balance> NaviTreeMap<K, V, B, Natural> {
    /// Creates an empty map with capacity for at least `capacity` entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use navi_tree::NaviTreeMap;
    ///
    /// let map: NaviTreeMap<i32, i32> = NaviTreeMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, Natural)
    }
}

impl<K: Default, V: Default, B: Balance, C> NaviTreeMap<K, V, B, C> {
    /// Creates an empty map ordered by `cmp` with capacity for at least
    /// `capacity` entries.
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        NaviTreeMap {
            raw: RawNaviTreeMap::with_capacity(cmp, capacity),
            drv: V::default(),
            no_key_below: K::default(),
            no_key_above: K::default(),
        }
    }
}

impl<K, V, B: Balance, C> NaviTreeMap<K, V, B, C> {
    /// Returns the current capacity of the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use navi_tree::NaviTreeMap;
    ///
    /// let map: NaviTreeMap<i32, i32> = NaviTreeMap::with_capacity(32);
    /// assert_eq!(map.capacity(), 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}

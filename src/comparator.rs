use core::cmp::Ordering;

/// A total ordering over keys of type `K`.
///
/// A `NaviTreeMap` stores one comparator instance and routes every key
/// comparison through it, so a single generic tree serves both natural and
/// custom orders without per-call dispatch.
///
/// It is a logic error for a comparator to be anything other than a total
/// order, or for a key to change its ordering relative to other keys while it
/// is in a map. The behavior resulting from such a logic error is not
/// specified (it could include panics, incorrect results, or non-termination)
/// but will not be undefined behavior.
///
/// Any `Fn(&K, &K) -> Ordering` closure is a comparator:
///
/// ```
/// use core::cmp::Ordering;
/// use navi_tree::{NaviTreeMap, RedBlack};
///
/// let mut map: NaviTreeMap<i64, i64, RedBlack, _> =
///     NaviTreeMap::with_comparator(|a: &i64, b: &i64| b.cmp(a));
/// map.put(1, 10);
/// map.put(2, 20);
/// // Reversed order: 2 sorts first.
/// assert_eq!(*map.first_key(), 2);
/// ```
pub trait Comparator<K> {
    /// Compares two keys, returning their [`Ordering`] under this comparator.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// The natural order of a key type, as defined by its [`Ord`] implementation.
///
/// This is the default comparator of [`NaviTreeMap`](crate::NaviTreeMap).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Natural;

impl<K: Ord> Comparator<K> for Natural {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

impl<K, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn natural_matches_ord() {
        assert_eq!(Natural.compare(&1, &2), Ordering::Less);
        assert_eq!(Natural.compare(&2, &2), Ordering::Equal);
        assert_eq!(Natural.compare(&3, &2), Ordering::Greater);
    }

    #[test]
    fn closure_comparator() {
        let reversed = |a: &i64, b: &i64| b.cmp(a);
        assert_eq!(reversed.compare(&1, &2), Ordering::Greater);
        assert_eq!(reversed.compare(&2, &1), Ordering::Less);
    }
}

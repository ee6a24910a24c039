use core::fmt;

use super::handle::Handle;
use super::raw_navi_tree_map::RawNaviTreeMap;

/// A self-balancing strategy for the backing binary search tree.
///
/// The strategy owns the per-node balancing metadata (a color bit for
/// red-black, a height for AVL) and the fix-up passes that run after a
/// structural insert or delete. Rotations themselves are pointer surgery on
/// the tree; metadata repair happens here.
///
/// Selected at compile time as a type parameter of
/// [`NaviTreeMap`](crate::NaviTreeMap); this trait is not implementable
/// outside the crate.
#[allow(private_interfaces)]
pub trait Balance: Sized {
    /// Per-node balancing metadata.
    type Meta: Copy + fmt::Debug;

    /// Metadata for a freshly attached leaf node.
    #[doc(hidden)]
    fn leaf_meta() -> Self::Meta;

    /// Restores the balancing invariant after `node` was attached as a leaf.
    #[doc(hidden)]
    fn after_insert<K, V, C>(tree: &mut RawNaviTreeMap<K, V, Self, C>, node: Handle);

    /// Restores the balancing invariant after a node was spliced out.
    ///
    /// `parent` is the parent of the splice point, `replacement` the child
    /// (if any) that took the removed node's place, and `removed_meta` the
    /// metadata of the node that was physically unlinked.
    #[doc(hidden)]
    fn after_remove<K, V, C>(
        tree: &mut RawNaviTreeMap<K, V, Self, C>,
        parent: Option<Handle>,
        replacement: Option<Handle>,
        removed_meta: Self::Meta,
    );

    /// Checks the strategy's own invariant over the whole tree, panicking on
    /// any violation. Test support only.
    #[doc(hidden)]
    #[cfg(test)]
    fn validate<K, V, C>(tree: &RawNaviTreeMap<K, V, Self, C>);
}

// ─── Red-black ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// Red-black balancing: every node carries a color bit; no red node has a red
/// child and every root-to-leaf path crosses the same number of black nodes,
/// bounding the height at 2·log₂(n).
///
/// This is the default strategy of [`NaviTreeMap`](crate::NaviTreeMap).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RedBlack;

impl RedBlack {
    fn color<K, V, C>(tree: &RawNaviTreeMap<K, V, Self, C>, node: Option<Handle>) -> Color {
        // Absent children count as black leaves.
        node.map_or(Color::Black, |h| tree.meta_of(h))
    }
}

#[allow(private_interfaces)]
impl Balance for RedBlack {
    type Meta = Color;

    fn leaf_meta() -> Color {
        // New nodes start red so the black-height invariant cannot break on
        // the way in; only the red-red invariant can, and the loop below
        // repairs that.
        Color::Red
    }

    fn after_insert<K, V, C>(tree: &mut RawNaviTreeMap<K, V, Self, C>, node: Handle) {
        let mut x = node;
        loop {
            let Some(p) = tree.parent_of(x) else {
                tree.set_meta(x, Color::Black);
                return;
            };
            if tree.meta_of(p) == Color::Black {
                return;
            }
            // A red parent is never the root, so the grandparent exists.
            let g = tree.parent_of(p).expect("`RedBlack::after_insert()` - red root!");
            let p_is_left = tree.left_of(g) == Some(p);
            let uncle = if p_is_left { tree.right_of(g) } else { tree.left_of(g) };

            if Self::color(tree, uncle) == Color::Red {
                // Recolor and push the violation two levels up.
                tree.set_meta(p, Color::Black);
                tree.set_meta(uncle.expect("red uncle exists"), Color::Black);
                tree.set_meta(g, Color::Red);
                x = g;
                continue;
            }

            // Black uncle: one or two rotations finish the repair.
            if p_is_left {
                if tree.right_of(p) == Some(x) {
                    tree.rotate_left(p);
                }
                let top = tree.left_of(g).expect("rotation preserved the left child");
                tree.set_meta(top, Color::Black);
                tree.set_meta(g, Color::Red);
                tree.rotate_right(g);
            } else {
                if tree.left_of(p) == Some(x) {
                    tree.rotate_right(p);
                }
                let top = tree.right_of(g).expect("rotation preserved the right child");
                tree.set_meta(top, Color::Black);
                tree.set_meta(g, Color::Red);
                tree.rotate_left(g);
            }
            return;
        }
    }

    fn after_remove<K, V, C>(
        tree: &mut RawNaviTreeMap<K, V, Self, C>,
        parent: Option<Handle>,
        replacement: Option<Handle>,
        removed_meta: Color,
    ) {
        if removed_meta == Color::Red {
            // Unlinking a red node changes no black heights.
            return;
        }

        // The replacement carries a "double black" until it is absorbed by a
        // red node, resolved by rotation, or reaches the root.
        let mut x = replacement;
        let mut p = parent;
        while let Some(ph) = p {
            if Self::color(tree, x) == Color::Red {
                break;
            }
            let x_is_left = tree.left_of(ph) == x;
            if x_is_left {
                let mut w = tree.right_of(ph).expect("`RedBlack::after_remove()` - missing sibling!");
                if tree.meta_of(w) == Color::Red {
                    tree.set_meta(w, Color::Black);
                    tree.set_meta(ph, Color::Red);
                    tree.rotate_left(ph);
                    w = tree.right_of(ph).expect("rotation preserved the right child");
                }
                if Self::color(tree, tree.left_of(w)) == Color::Black
                    && Self::color(tree, tree.right_of(w)) == Color::Black
                {
                    tree.set_meta(w, Color::Red);
                    x = Some(ph);
                    p = tree.parent_of(ph);
                } else {
                    if Self::color(tree, tree.right_of(w)) == Color::Black {
                        let wl = tree.left_of(w).expect("sibling has a red left child");
                        tree.set_meta(wl, Color::Black);
                        tree.set_meta(w, Color::Red);
                        tree.rotate_right(w);
                        w = tree.right_of(ph).expect("rotation preserved the right child");
                    }
                    tree.set_meta(w, tree.meta_of(ph));
                    tree.set_meta(ph, Color::Black);
                    if let Some(wr) = tree.right_of(w) {
                        tree.set_meta(wr, Color::Black);
                    }
                    tree.rotate_left(ph);
                    x = tree.root_handle();
                    break;
                }
            } else {
                let mut w = tree.left_of(ph).expect("`RedBlack::after_remove()` - missing sibling!");
                if tree.meta_of(w) == Color::Red {
                    tree.set_meta(w, Color::Black);
                    tree.set_meta(ph, Color::Red);
                    tree.rotate_right(ph);
                    w = tree.left_of(ph).expect("rotation preserved the left child");
                }
                if Self::color(tree, tree.left_of(w)) == Color::Black
                    && Self::color(tree, tree.right_of(w)) == Color::Black
                {
                    tree.set_meta(w, Color::Red);
                    x = Some(ph);
                    p = tree.parent_of(ph);
                } else {
                    if Self::color(tree, tree.left_of(w)) == Color::Black {
                        let wr = tree.right_of(w).expect("sibling has a red right child");
                        tree.set_meta(wr, Color::Black);
                        tree.set_meta(w, Color::Red);
                        tree.rotate_left(w);
                        w = tree.left_of(ph).expect("rotation preserved the left child");
                    }
                    tree.set_meta(w, tree.meta_of(ph));
                    tree.set_meta(ph, Color::Black);
                    if let Some(wl) = tree.left_of(w) {
                        tree.set_meta(wl, Color::Black);
                    }
                    tree.rotate_right(ph);
                    x = tree.root_handle();
                    break;
                }
            }
        }
        if let Some(x) = x {
            tree.set_meta(x, Color::Black);
        }
    }

    #[cfg(test)]
    fn validate<K, V, C>(tree: &RawNaviTreeMap<K, V, Self, C>) {
        fn black_height<K, V, C>(tree: &RawNaviTreeMap<K, V, RedBlack, C>, node: Option<Handle>) -> usize {
            let Some(h) = node else { return 1 };
            let color = tree.meta_of(h);
            if color == Color::Red {
                assert_eq!(
                    RedBlack::color(tree, tree.left_of(h)),
                    Color::Black,
                    "red node has a red left child"
                );
                assert_eq!(
                    RedBlack::color(tree, tree.right_of(h)),
                    Color::Black,
                    "red node has a red right child"
                );
            }
            let left = black_height(tree, tree.left_of(h));
            let right = black_height(tree, tree.right_of(h));
            assert_eq!(left, right, "unequal black heights below a node");
            left + usize::from(color == Color::Black)
        }

        if let Some(root) = tree.root_handle() {
            assert_eq!(tree.meta_of(root), Color::Black, "root is not black");
        }
        black_height(tree, tree.root_handle());
    }
}

// ─── AVL ─────────────────────────────────────────────────────────────────────

/// AVL balancing: every node carries the height of its subtree and the two
/// child heights never differ by more than one, bounding the height at
/// roughly 1.44·log₂(n). Compared to red-black this trades slightly more
/// rotation work on mutation for flatter lookups.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Avl;

impl Avl {
    fn height<K, V, C>(tree: &RawNaviTreeMap<K, V, Self, C>, node: Option<Handle>) -> u8 {
        node.map_or(0, |h| tree.meta_of(h))
    }

    fn fix_height<K, V, C>(tree: &mut RawNaviTreeMap<K, V, Self, C>, node: Handle) {
        let left = Self::height(tree, tree.left_of(node));
        let right = Self::height(tree, tree.right_of(node));
        tree.set_meta(node, 1 + left.max(right));
    }

    fn balance_factor<K, V, C>(tree: &RawNaviTreeMap<K, V, Self, C>, node: Handle) -> i16 {
        i16::from(Self::height(tree, tree.left_of(node))) - i16::from(Self::height(tree, tree.right_of(node)))
    }

    /// Rebalances a single node, returning the root of the (possibly rotated)
    /// subtree.
    fn rebalance_at<K, V, C>(tree: &mut RawNaviTreeMap<K, V, Self, C>, node: Handle) -> Handle {
        let bf = Self::balance_factor(tree, node);
        if bf > 1 {
            let left = tree.left_of(node).expect("left-heavy node has a left child");
            if Self::balance_factor(tree, left) < 0 {
                // Left-right: rotate the inner grandchild up first.
                let mid = tree.right_of(left).expect("right-heavy child has a right child");
                tree.rotate_left(left);
                Self::fix_height(tree, left);
                Self::fix_height(tree, mid);
            }
            let top = tree.left_of(node).expect("left child survives rotation");
            tree.rotate_right(node);
            Self::fix_height(tree, node);
            Self::fix_height(tree, top);
            top
        } else if bf < -1 {
            let right = tree.right_of(node).expect("right-heavy node has a right child");
            if Self::balance_factor(tree, right) > 0 {
                // Right-left: mirror of the above.
                let mid = tree.left_of(right).expect("left-heavy child has a left child");
                tree.rotate_right(right);
                Self::fix_height(tree, right);
                Self::fix_height(tree, mid);
            }
            let top = tree.right_of(node).expect("right child survives rotation");
            tree.rotate_left(node);
            Self::fix_height(tree, node);
            Self::fix_height(tree, top);
            top
        } else {
            Self::fix_height(tree, node);
            node
        }
    }

    /// Walks from `start` to the root, recomputing heights and rotating where
    /// the balance factor exceeds ±1. Heights can change all the way up, so
    /// the walk never terminates early.
    fn retrace<K, V, C>(tree: &mut RawNaviTreeMap<K, V, Self, C>, start: Option<Handle>) {
        let mut cur = start;
        while let Some(node) = cur {
            let top = Self::rebalance_at(tree, node);
            cur = tree.parent_of(top);
        }
    }
}

#[allow(private_interfaces)]
impl Balance for Avl {
    type Meta = u8;

    fn leaf_meta() -> u8 {
        1
    }

    fn after_insert<K, V, C>(tree: &mut RawNaviTreeMap<K, V, Self, C>, node: Handle) {
        Self::retrace(tree, tree.parent_of(node));
    }

    fn after_remove<K, V, C>(
        tree: &mut RawNaviTreeMap<K, V, Self, C>,
        parent: Option<Handle>,
        _replacement: Option<Handle>,
        _removed_meta: u8,
    ) {
        Self::retrace(tree, parent);
    }

    #[cfg(test)]
    fn validate<K, V, C>(tree: &RawNaviTreeMap<K, V, Self, C>) {
        fn check<K, V, C>(tree: &RawNaviTreeMap<K, V, Avl, C>, node: Option<Handle>) -> u8 {
            let Some(h) = node else { return 0 };
            let left = check(tree, tree.left_of(h));
            let right = check(tree, tree.right_of(h));
            assert!(left.abs_diff(right) <= 1, "balance factor out of range");
            let height = 1 + left.max(right);
            assert_eq!(tree.meta_of(h), height, "stored height is stale");
            height
        }

        check(tree, tree.root_handle());
    }
}

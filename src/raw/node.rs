use super::handle::Handle;

/// A binary search tree node.
///
/// The key lives inline; the value lives in a separate arena and is reached
/// through `value`. Keeping the two apart lets the mutable iterators and the
/// cursor hand out `&mut V` while node links stay borrowed.
///
/// `left`/`right` own their subtrees in the reachability sense (everything
/// alive is reachable from the tree root); `parent` is a plain back-reference
/// used for navigation and rotations, never for lifetime.
pub(crate) struct Node<K, M> {
    pub(crate) key: K,
    /// Handle of this node's value in the values arena.
    pub(crate) value: Handle,
    /// Balancing metadata: a color bit for red-black, a height for AVL.
    pub(crate) meta: M,
    pub(crate) parent: Option<Handle>,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
}

impl<K, M> Node<K, M> {
    /// Creates a detached leaf node holding `key` and `value`.
    pub(crate) fn new(key: K, value: Handle, meta: M) -> Self {
        Self {
            key,
            value,
            meta,
            parent: None,
            left: None,
            right: None,
        }
    }

    /// Returns the single child of a node with at most one child.
    ///
    /// Callers must only invoke this on nodes already reduced to the
    /// zero-or-one-child case during removal.
    pub(crate) fn only_child(&self) -> Option<Handle> {
        debug_assert!(self.left.is_none() || self.right.is_none());
        self.left.or(self.right)
    }
}

impl<K: Clone, M: Clone> Clone for Node<K, M> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            value: self.value,
            meta: self.meta.clone(),
            parent: self.parent,
            left: self.left,
            right: self.right,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_detached() {
        let node: Node<i64, u8> = Node::new(7, Handle::from_index(0), 1);
        assert!(node.parent.is_none());
        assert!(node.left.is_none());
        assert!(node.right.is_none());
        assert_eq!(node.only_child(), None);
    }

    #[test]
    fn only_child_prefers_whichever_side_is_present() {
        let mut node: Node<i64, u8> = Node::new(7, Handle::from_index(0), 1);
        node.right = Some(Handle::from_index(3));
        assert_eq!(node.only_child(), Some(Handle::from_index(3)));
        node.right = None;
        node.left = Some(Handle::from_index(4));
        assert_eq!(node.only_child(), Some(Handle::from_index(4)));
    }
}

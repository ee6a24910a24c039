use core::cmp::Ordering;

use alloc::vec::Vec;

use crate::comparator::Comparator;

use super::arena::Arena;
use super::balance::Balance;
use super::handle::Handle;
use super::node::Node;

/// The core balanced-BST implementation backing `NaviTreeMap`.
pub(crate) struct RawNaviTreeMap<K, V, B: Balance, C> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K, B::Meta>>,
    /// Arena storing all values (separate from nodes so value mutation and
    /// link traversal borrow disjoint memory).
    values: Arena<V>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Handle to the minimum node, if the tree is non-empty.
    first: Option<Handle>,
    /// Handle to the maximum node, if the tree is non-empty.
    last: Option<Handle>,
    /// Total number of key-value pairs in the tree.
    len: usize,
    /// The ordering every key comparison goes through.
    cmp: C,
}

/// What physically happened during a removal.
///
/// When the removed node had two children, its in-order successor's key and
/// value were copied into it and the successor node was unlinked instead; any
/// cursor holding the successor's handle must be redirected to
/// `absorbed_into` or it would silently track the wrong entry (the freed slot
/// is recycled by the arena).
#[derive(Clone, Copy, Debug)]
pub(crate) struct RemoveOutcome {
    /// The handle that was unlinked and returned to the arena free list.
    pub(crate) freed: Handle,
    /// The surviving node that adopted the freed node's key and value, if the
    /// removal went through a successor copy.
    pub(crate) absorbed_into: Option<Handle>,
}

impl<K, V, B: Balance, C> RawNaviTreeMap<K, V, B, C> {
    /// Creates a new, empty tree.
    pub(crate) const fn new(cmp: C) -> Self {
        Self {
            nodes: Arena::new(),
            values: Arena::new(),
            root: None,
            first: None,
            last: None,
            len: 0,
            cmp,
        }
    }

    /// Creates a new tree with the specified capacity.
    pub(crate) fn with_capacity(cmp: C, capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            values: Arena::with_capacity(capacity),
            root: None,
            first: None,
            last: None,
            len: 0,
            cmp,
        }
    }

    /// Returns the number of key-value pairs in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no elements.
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the capacity of the tree.
    pub(crate) fn capacity(&self) -> usize {
        self.values.capacity()
    }

    /// Returns the comparator the tree orders by.
    pub(crate) fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Clears all elements from the tree.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.values.clear();
        self.root = None;
        self.first = None;
        self.last = None;
        self.len = 0;
    }

    /// Returns the root handle, if any.
    pub(crate) fn root_handle(&self) -> Option<Handle> {
        self.root
    }

    /// Returns the handle of the minimum node, if any.
    pub(crate) fn first_handle(&self) -> Option<Handle> {
        self.first
    }

    /// Returns the handle of the maximum node, if any.
    pub(crate) fn last_handle(&self) -> Option<Handle> {
        self.last
    }

    /// Returns a reference to a node by handle from a raw pointer.
    ///
    /// # Safety
    /// - `ptr` must point to a valid, allocated `RawNaviTreeMap`.
    pub(crate) unsafe fn node_ptr<'a>(ptr: *const Self, handle: Handle) -> &'a Node<K, B::Meta> {
        // SAFETY: We only access the `nodes` field through addr_of, avoiding
        // aliasing with the `values` field.
        unsafe { Arena::get_ptr(core::ptr::addr_of!((*ptr).nodes), handle) }
    }

    /// Returns the key of a node from a raw pointer.
    ///
    /// The returned borrow involves `K` alone, so the caller's lifetime needs
    /// no `B::Meta` bound; the node reference stays local to this function.
    ///
    /// # Safety
    /// - `ptr` must point to a valid, allocated `RawNaviTreeMap`.
    pub(crate) unsafe fn key_ptr<'a>(ptr: *const Self, handle: Handle) -> &'a K {
        // SAFETY: Only the `nodes` field is read; the key is projected out
        // through a raw pointer.
        unsafe {
            let node: *const Node<K, B::Meta> = Self::node_ptr(ptr, handle);
            &*core::ptr::addr_of!((*node).key)
        }
    }

    /// Returns the value handle stored in a node, from a raw pointer.
    ///
    /// # Safety
    /// - `ptr` must point to a valid, allocated `RawNaviTreeMap`.
    pub(crate) unsafe fn value_handle_ptr(ptr: *const Self, handle: Handle) -> Handle {
        // SAFETY: Only the `nodes` field is read.
        unsafe { Self::node_ptr(ptr, handle).value }
    }

    /// Returns the key of a node.
    pub(crate) fn key(&self, handle: Handle) -> &K {
        &self.nodes.get(handle).key
    }

    /// Returns the key-value pair stored at a node.
    pub(crate) fn entry(&self, handle: Handle) -> (&K, &V) {
        let node = self.nodes.get(handle);
        (&node.key, self.values.get(node.value))
    }

    /// Returns a reference to the value stored at a node.
    pub(crate) fn value_of(&self, handle: Handle) -> &V {
        self.values.get(self.nodes.get(handle).value)
    }

    /// Returns a mutable reference to the value stored at a node.
    pub(crate) fn value_of_mut(&mut self, handle: Handle) -> &mut V {
        let value_handle = self.nodes.get(handle).value;
        self.values.get_mut(value_handle)
    }

    /// Returns a mutable reference to a value by value handle from a raw
    /// pointer.
    ///
    /// # Safety
    /// - `ptr` must point to a valid, allocated `RawNaviTreeMap`.
    /// - The caller must have logical exclusive access to the value at
    ///   `handle` and must not hold another reference into the values arena.
    pub(crate) unsafe fn value_mut_ptr<'a>(ptr: *mut Self, handle: Handle) -> &'a mut V {
        // SAFETY: We only access the `values` field, avoiding aliasing with
        // the `nodes` field.
        unsafe { (*core::ptr::addr_of_mut!((*ptr).values)).get_mut(handle) }
    }

    /// Returns the key and a mutable reference to the value at `handle`.
    ///
    /// Splits the borrow across the two arenas: the key stays borrowed from
    /// `nodes` while the value is borrowed mutably from `values`.
    pub(crate) fn entry_mut(&mut self, handle: Handle) -> (&K, &mut V) {
        let node = self.nodes.get(handle);
        let value_handle = node.value;
        (&node.key, self.values.get_mut(value_handle))
    }

    /// Returns the in-order successor of `handle` from a raw pointer, reading
    /// only the nodes arena.
    ///
    /// # Safety
    /// - `ptr` must point to a valid, allocated `RawNaviTreeMap`.
    pub(crate) unsafe fn successor_ptr(ptr: *const Self, handle: Handle) -> Option<Handle> {
        // SAFETY: Only the `nodes` field is read, never the `values` field, so
        // this cannot alias a `&mut V` handed out through `value_mut_ptr`.
        unsafe {
            if let Some(right) = Self::node_ptr(ptr, handle).right {
                let mut cur = right;
                while let Some(left) = Self::node_ptr(ptr, cur).left {
                    cur = left;
                }
                return Some(cur);
            }
            let mut cur = handle;
            while let Some(parent) = Self::node_ptr(ptr, cur).parent {
                if Self::node_ptr(ptr, parent).right == Some(cur) {
                    cur = parent;
                } else {
                    return Some(parent);
                }
            }
            None
        }
    }

    /// Returns the in-order predecessor of `handle` from a raw pointer,
    /// reading only the nodes arena.
    ///
    /// # Safety
    /// - `ptr` must point to a valid, allocated `RawNaviTreeMap`.
    pub(crate) unsafe fn predecessor_ptr(ptr: *const Self, handle: Handle) -> Option<Handle> {
        // SAFETY: Only the `nodes` field is read, never the `values` field, so
        // this cannot alias a `&mut V` handed out through `value_mut_ptr`.
        unsafe {
            if let Some(left) = Self::node_ptr(ptr, handle).left {
                let mut cur = left;
                while let Some(right) = Self::node_ptr(ptr, cur).right {
                    cur = right;
                }
                return Some(cur);
            }
            let mut cur = handle;
            while let Some(parent) = Self::node_ptr(ptr, cur).parent {
                if Self::node_ptr(ptr, parent).left == Some(cur) {
                    cur = parent;
                } else {
                    return Some(parent);
                }
            }
            None
        }
    }

    // ─── Link accessors used by the balancing strategies ─────────────────────

    #[inline]
    pub(crate) fn parent_of(&self, handle: Handle) -> Option<Handle> {
        self.nodes.get(handle).parent
    }

    #[inline]
    pub(crate) fn left_of(&self, handle: Handle) -> Option<Handle> {
        self.nodes.get(handle).left
    }

    #[inline]
    pub(crate) fn right_of(&self, handle: Handle) -> Option<Handle> {
        self.nodes.get(handle).right
    }

    #[inline]
    pub(crate) fn meta_of(&self, handle: Handle) -> B::Meta {
        self.nodes.get(handle).meta
    }

    #[inline]
    pub(crate) fn set_meta(&mut self, handle: Handle, meta: B::Meta) {
        self.nodes.get_mut(handle).meta = meta;
    }

    // ─── Rotations ───────────────────────────────────────────────────────────

    /// Rotates the subtree rooted at `handle` to the left in O(1).
    ///
    /// This is the only place (with its mirror) where child and parent links
    /// change together; both directions of every affected link are repaired
    /// before returning.
    pub(crate) fn rotate_left(&mut self, handle: Handle) {
        let pivot = self.nodes.get(handle).right.expect("`RawNaviTreeMap::rotate_left()` - no right child!");
        let inner = self.nodes.get(pivot).left;

        self.nodes.get_mut(handle).right = inner;
        if let Some(inner) = inner {
            self.nodes.get_mut(inner).parent = Some(handle);
        }

        let parent = self.nodes.get(handle).parent;
        self.nodes.get_mut(pivot).parent = parent;
        match parent {
            None => self.root = Some(pivot),
            Some(p) => {
                let parent_node = self.nodes.get_mut(p);
                if parent_node.left == Some(handle) {
                    parent_node.left = Some(pivot);
                } else {
                    parent_node.right = Some(pivot);
                }
            }
        }

        self.nodes.get_mut(pivot).left = Some(handle);
        self.nodes.get_mut(handle).parent = Some(pivot);
    }

    /// Rotates the subtree rooted at `handle` to the right in O(1).
    pub(crate) fn rotate_right(&mut self, handle: Handle) {
        let pivot = self.nodes.get(handle).left.expect("`RawNaviTreeMap::rotate_right()` - no left child!");
        let inner = self.nodes.get(pivot).right;

        self.nodes.get_mut(handle).left = inner;
        if let Some(inner) = inner {
            self.nodes.get_mut(inner).parent = Some(handle);
        }

        let parent = self.nodes.get(handle).parent;
        self.nodes.get_mut(pivot).parent = parent;
        match parent {
            None => self.root = Some(pivot),
            Some(p) => {
                let parent_node = self.nodes.get_mut(p);
                if parent_node.left == Some(handle) {
                    parent_node.left = Some(pivot);
                } else {
                    parent_node.right = Some(pivot);
                }
            }
        }

        self.nodes.get_mut(pivot).right = Some(handle);
        self.nodes.get_mut(handle).parent = Some(pivot);
    }

    // ─── In-order walks ──────────────────────────────────────────────────────

    /// Returns the minimum node of the subtree rooted at `handle`.
    pub(crate) fn min_node(&self, handle: Handle) -> Handle {
        let mut cur = handle;
        while let Some(left) = self.nodes.get(cur).left {
            cur = left;
        }
        cur
    }

    /// Returns the maximum node of the subtree rooted at `handle`.
    pub(crate) fn max_node(&self, handle: Handle) -> Handle {
        let mut cur = handle;
        while let Some(right) = self.nodes.get(cur).right {
            cur = right;
        }
        cur
    }

    /// Returns the in-order successor of `handle`, if any.
    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        if let Some(right) = self.nodes.get(handle).right {
            return Some(self.min_node(right));
        }
        let mut cur = handle;
        while let Some(parent) = self.nodes.get(cur).parent {
            if self.nodes.get(parent).right == Some(cur) {
                cur = parent;
            } else {
                return Some(parent);
            }
        }
        None
    }

    /// Returns the in-order predecessor of `handle`, if any.
    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        if let Some(left) = self.nodes.get(handle).left {
            return Some(self.max_node(left));
        }
        let mut cur = handle;
        while let Some(parent) = self.nodes.get(cur).parent {
            if self.nodes.get(parent).left == Some(cur) {
                cur = parent;
            } else {
                return Some(parent);
            }
        }
        None
    }
}

impl<K, V, B: Balance, C: Comparator<K>> RawNaviTreeMap<K, V, B, C> {
    /// Searches for a key and returns its node handle if present.
    pub(crate) fn search(&self, key: &K) -> Option<Handle> {
        let mut cur = self.root;
        while let Some(h) = cur {
            match self.cmp.compare(key, &self.nodes.get(h).key) {
                Ordering::Equal => return Some(h),
                Ordering::Less => cur = self.nodes.get(h).left,
                Ordering::Greater => cur = self.nodes.get(h).right,
            }
        }
        None
    }

    /// Returns a reference to the value corresponding to the key.
    pub(crate) fn get(&self, key: &K) -> Option<&V> {
        self.search(key).map(|h| self.value_of(h))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub(crate) fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let handle = self.search(key)?;
        Some(self.value_of_mut(handle))
    }

    /// Inserts a key-value pair into the tree.
    /// Returns the old value if the key was already present.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        let Some(mut cur) = self.root else {
            let value_handle = self.values.alloc(value);
            let handle = self.nodes.alloc(Node::new(key, value_handle, B::leaf_meta()));
            self.root = Some(handle);
            self.first = Some(handle);
            self.last = Some(handle);
            self.len = 1;
            B::after_insert(self, handle);
            return None;
        };

        // Descend to the insertion point.
        let (parent, went_left) = loop {
            match self.cmp.compare(&key, &self.nodes.get(cur).key) {
                Ordering::Equal => {
                    // Key exists, replace the value in place to avoid
                    // alloc/free churn.
                    let value_handle = self.nodes.get(cur).value;
                    return Some(core::mem::replace(self.values.get_mut(value_handle), value));
                }
                Ordering::Less => match self.nodes.get(cur).left {
                    Some(left) => cur = left,
                    None => break (cur, true),
                },
                Ordering::Greater => match self.nodes.get(cur).right {
                    Some(right) => cur = right,
                    None => break (cur, false),
                },
            }
        };

        let value_handle = self.values.alloc(value);
        let handle = self.nodes.alloc(Node::new(key, value_handle, B::leaf_meta()));
        self.nodes.get_mut(handle).parent = Some(parent);
        if went_left {
            self.nodes.get_mut(parent).left = Some(handle);
            // The minimum has no left child, so a left child of the old
            // minimum is the new minimum.
            if self.first == Some(parent) {
                self.first = Some(handle);
            }
        } else {
            self.nodes.get_mut(parent).right = Some(handle);
            if self.last == Some(parent) {
                self.last = Some(handle);
            }
        }
        self.len += 1;
        B::after_insert(self, handle);
        None
    }

    /// Removes a key from the tree and returns the key-value pair.
    pub(crate) fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let handle = self.search(key)?;
        let (key, value, _) = self.remove_at(handle);
        Some((key, value))
    }

    /// Removes the entry at `handle` and returns its key, value, and the
    /// physical [`RemoveOutcome`].
    pub(crate) fn remove_at(&mut self, handle: Handle) -> (K, V, RemoveOutcome) {
        let node = self.nodes.get(handle);
        let (unlink, absorbed_into) = match (node.left, node.right) {
            // Two children: splice out the in-order successor instead and
            // migrate its key/value into `handle` below. `handle` keeps its
            // own balancing metadata, so the fix-up runs entirely at the
            // successor's old position.
            (Some(_), Some(right)) => (self.min_node(right), Some(handle)),
            _ => (handle, None),
        };

        // Extremes must be recomputed while the links are still intact. The
        // spliced successor is never the minimum (the two-child node is
        // smaller), but it can be the maximum, in which case the absorbing
        // node now holds the largest key.
        if self.first == Some(unlink) {
            self.first = self.successor(unlink);
        }
        if self.last == Some(unlink) {
            self.last = match absorbed_into {
                Some(target) => Some(target),
                None => self.predecessor(unlink),
            };
        }

        // Splice `unlink` out; it has at most one child.
        let child = self.nodes.get(unlink).only_child();
        let parent = self.nodes.get(unlink).parent;
        if let Some(child) = child {
            self.nodes.get_mut(child).parent = parent;
        }
        match parent {
            None => self.root = child,
            Some(p) => {
                let parent_node = self.nodes.get_mut(p);
                if parent_node.left == Some(unlink) {
                    parent_node.left = child;
                } else {
                    parent_node.right = child;
                }
            }
        }
        let spliced = self.nodes.take(unlink);

        let (removed_key, removed_value_handle) = match absorbed_into {
            Some(target) => {
                let target_node = self.nodes.get_mut(target);
                let old_key = core::mem::replace(&mut target_node.key, spliced.key);
                let old_value = core::mem::replace(&mut target_node.value, spliced.value);
                (old_key, old_value)
            }
            None => (spliced.key, spliced.value),
        };
        let removed_value = self.values.take(removed_value_handle);
        self.len -= 1;

        B::after_remove(self, parent, child, spliced.meta);

        (
            removed_key,
            removed_value,
            RemoveOutcome {
                freed: unlink,
                absorbed_into,
            },
        )
    }

    /// Removes and returns the first key-value pair.
    pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
        let first = self.first?;
        let (key, value, _) = self.remove_at(first);
        Some((key, value))
    }

    /// Removes and returns the last key-value pair.
    pub(crate) fn pop_last(&mut self) -> Option<(K, V)> {
        let last = self.last?;
        let (key, value, _) = self.remove_at(last);
        Some((key, value))
    }

    // ─── Bound queries ───────────────────────────────────────────────────────

    /// Finds the first node with key >= the given key.
    pub(crate) fn lower_bound(&self, key: &K) -> Option<Handle> {
        let mut cur = self.root;
        let mut best = None;
        while let Some(h) = cur {
            match self.cmp.compare(key, &self.nodes.get(h).key) {
                Ordering::Greater => cur = self.nodes.get(h).right,
                _ => {
                    best = Some(h);
                    cur = self.nodes.get(h).left;
                }
            }
        }
        best
    }

    /// Finds the first node with key > the given key.
    pub(crate) fn upper_bound(&self, key: &K) -> Option<Handle> {
        let mut cur = self.root;
        let mut best = None;
        while let Some(h) = cur {
            match self.cmp.compare(key, &self.nodes.get(h).key) {
                Ordering::Less => {
                    best = Some(h);
                    cur = self.nodes.get(h).left;
                }
                _ => cur = self.nodes.get(h).right,
            }
        }
        best
    }

    /// Finds the last node with key <= the given key.
    pub(crate) fn upper_bound_inclusive(&self, key: &K) -> Option<Handle> {
        let mut cur = self.root;
        let mut best = None;
        while let Some(h) = cur {
            match self.cmp.compare(key, &self.nodes.get(h).key) {
                Ordering::Less => cur = self.nodes.get(h).left,
                _ => {
                    best = Some(h);
                    cur = self.nodes.get(h).right;
                }
            }
        }
        best
    }

    /// Finds the last node with key < the given key.
    pub(crate) fn lower_bound_exclusive(&self, key: &K) -> Option<Handle> {
        let mut cur = self.root;
        let mut best = None;
        while let Some(h) = cur {
            match self.cmp.compare(key, &self.nodes.get(h).key) {
                Ordering::Greater => {
                    best = Some(h);
                    cur = self.nodes.get(h).right;
                }
                _ => cur = self.nodes.get(h).left,
            }
        }
        best
    }

    /// Drains all key-value pairs in key order, leaving the tree empty.
    ///
    /// The handle order is collected up front because taking nodes tears down
    /// the links the in-order walk needs.
    pub(crate) fn drain_in_order(&mut self) -> Vec<(K, V)> {
        let mut order = Vec::with_capacity(self.len);
        let mut cur = self.first;
        while let Some(h) = cur {
            order.push(h);
            cur = self.successor(h);
        }

        let mut result = Vec::with_capacity(self.len);
        for h in order {
            let node = self.nodes.take(h);
            let value = self.values.take(node.value);
            result.push((node.key, value));
        }

        self.nodes.clear();
        self.values.clear();
        self.root = None;
        self.first = None;
        self.last = None;
        self.len = 0;
        result
    }
}

impl<K: Clone, V: Clone, B: Balance, C: Clone> Clone for RawNaviTreeMap<K, V, B, C> {
    /// A deep structural copy: handles are plain indices, so cloning both
    /// arenas slot-for-slot reproduces the exact tree shape, including the
    /// balancing metadata of every node.
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            values: self.values.clone(),
            root: self.root,
            first: self.first,
            last: self.last,
            len: self.len,
            cmp: self.cmp.clone(),
        }
    }
}

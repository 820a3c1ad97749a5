use std::marker::PhantomData;
use std::ptr;

// ////////////////////////////////////////////////////////////////////////////
// SkipNode
// ////////////////////////////////////////////////////////////////////////////

/// SkipNodes make up the SkipList. Every level of the list is a chain of
/// nodes bounded by a head sentinel on the left and a tail sentinel on the
/// right; copies of the same key on consecutive levels form a tower.
///
/// The list owns the head sentinels, and each chain is owned left-to-right
/// through `next`: every node is allocated with `Box::into_raw` and released
/// exactly once, either by [`unlink`][SkipNode::unlink] during removal or by
/// [`free_chain`][SkipNode::free_chain] when the level comes down.
///
/// `prev`, `above` and `below` are traversal links only and never own the
/// node they point to.
pub struct SkipNode<T> {
    // key is None exactly when the node is a boundary sentinel.
    pub key: Option<T>,
    // The immediately previous node on the same level.
    pub prev: *mut SkipNode<T>,
    // The next node on the same level; null only on the tail sentinel.
    // The chain is owned through this link.
    pub next: *mut SkipNode<T>,
    // The copy of this key one level up, if the tower reaches that far.
    pub above: *mut SkipNode<T>,
    // The copy of this key one level down; null on the bottom level.
    pub below: *mut SkipNode<T>,
    // Owns self.next.
    _phantom_link: PhantomData<SkipNode<T>>,
}

impl<T> SkipNode<T> {
    /// Create a new boundary sentinel, unlinked in all four directions.
    pub fn sentinel() -> Self {
        SkipNode {
            key: None,
            prev: ptr::null_mut(),
            next: ptr::null_mut(),
            above: ptr::null_mut(),
            below: ptr::null_mut(),
            _phantom_link: PhantomData,
        }
    }

    /// Create a new node carrying `key`, unlinked in all four directions.
    pub fn new(key: T) -> Self {
        SkipNode {
            key: Some(key),
            ..SkipNode::sentinel()
        }
    }

    /// Returns `true` if the node is one of the two boundary sentinels of
    /// its level.
    pub fn is_sentinel(&self) -> bool {
        self.key.is_none()
    }

    /// Splice `node` into the chain immediately after `pred`.
    ///
    /// SAFETY: `pred` must be a live node left of its level's tail sentinel,
    /// and `node` must be freshly allocated with `Box::into_raw` and not yet
    /// linked anywhere.
    pub unsafe fn splice_after(pred: *mut Self, node: *mut Self) {
        let next = (*pred).next;
        (*node).prev = pred;
        (*node).next = next;
        if !next.is_null() {
            (*next).prev = node;
        }
        (*pred).next = node;
    }

    /// Allocate a copy of `below`'s key one level up, vertically stitched to
    /// `below`, and return it. The new node is not yet linked horizontally.
    ///
    /// SAFETY: `below` must be a live node with no `above` link and no
    /// outstanding borrows.
    pub unsafe fn new_above(below: *mut Self) -> *mut Self
    where
        T: Clone,
    {
        let node = Box::into_raw(Box::new(SkipNode {
            key: (*below).key.clone(),
            prev: ptr::null_mut(),
            next: ptr::null_mut(),
            above: ptr::null_mut(),
            below,
            _phantom_link: PhantomData,
        }));
        (*below).above = node;
        node
    }

    /// Detach `node` from its horizontal neighbors and reclaim it, leaving
    /// the neighbors linked to each other. Vertical neighbors are left for
    /// the caller to fix.
    ///
    /// SAFETY: `node` must have been allocated with `Box::into_raw`, must
    /// still be linked into its level, and must not be reclaimed again.
    pub unsafe fn unlink(node: *mut Self) -> Box<Self> {
        let mut node = Box::from_raw(node);
        if !node.prev.is_null() {
            (*node.prev).next = node.next;
        }
        if !node.next.is_null() {
            (*node.next).prev = node.prev;
        }
        // A detached node must not reach back into the chain.
        node.prev = ptr::null_mut();
        node.next = ptr::null_mut();
        node
    }

    /// Walk a chain left to right, reclaiming every node including the one
    /// given.
    ///
    /// SAFETY: every node on the chain must have been allocated with
    /// `Box::into_raw`, be owned by this chain alone, and not be reachable
    /// afterwards.
    pub unsafe fn free_chain(mut node: *mut Self) {
        while !node.is_null() {
            let next = (*node).next;
            drop(Box::from_raw(node));
            node = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::SkipNode;

    #[test]
    fn sentinel_has_no_key() {
        let node: SkipNode<i64> = SkipNode::sentinel();
        assert!(node.is_sentinel());
        assert!(node.prev.is_null());
        assert!(node.next.is_null());
        assert!(node.above.is_null());
        assert!(node.below.is_null());
    }

    #[test]
    fn new_carries_key() {
        let node = SkipNode::new(7);
        assert!(!node.is_sentinel());
        assert_eq!(node.key, Some(7));
    }

    #[test]
    fn splice_and_unlink_restore_the_chain() {
        let head = Box::into_raw(Box::new(SkipNode::<i64>::sentinel()));
        let tail = Box::into_raw(Box::new(SkipNode::<i64>::sentinel()));
        let node = Box::into_raw(Box::new(SkipNode::new(3)));
        unsafe {
            (*head).next = tail;
            (*tail).prev = head;

            SkipNode::splice_after(head, node);
            assert_eq!((*head).next, node);
            assert_eq!((*tail).prev, node);
            assert_eq!((*node).prev, head);
            assert_eq!((*node).next, tail);

            let detached = SkipNode::unlink(node);
            assert_eq!(detached.key, Some(3));
            assert!(detached.next.is_null());
            assert_eq!((*head).next, tail);
            assert_eq!((*tail).prev, head);

            SkipNode::free_chain(head);
        }
    }

    #[test]
    fn new_above_stitches_the_tower() {
        let below = Box::into_raw(Box::new(SkipNode::new(5)));
        unsafe {
            let above = SkipNode::new_above(below);
            assert_eq!((*below).above, above);
            assert_eq!((*above).below, below);
            assert_eq!((*above).key, Some(5));
            drop(Box::from_raw(above));
            drop(Box::from_raw(below));
        }
    }
}

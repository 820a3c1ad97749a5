//! A sentinel-bounded, quad-linked skip list over a totally ordered key
//! type.

use std::{fmt, iter, ptr};

use crate::coin::{CoinFlipper, FairCoin};
use crate::skipnode::SkipNode;

/// The fixed number of levels in every [`SkipList`].
///
/// The topmost level exists only as headroom for the insertion climb and
/// never holds a real key, so towers reach at most level `MAX_HEIGHT - 2`.
pub const MAX_HEIGHT: usize = 6;

// ////////////////////////////////////////////////////////////////////////////
// SkipList
// ////////////////////////////////////////////////////////////////////////////

/// An ordered set of keys stored as a skip list: a fixed ladder of
/// [`MAX_HEIGHT`] sentinel-bounded levels, where the bottom level holds
/// every key in strictly increasing order and each higher level holds a
/// random, thinning subset of the level beneath it. Search, insertion and
/// removal all run in expected `O(log(n))`.
///
/// Copies of the same key on consecutive levels are stitched into a tower;
/// how high each tower reaches is decided at insertion time by a
/// [`CoinFlipper`], one level per "grow" answer, truncated one level below
/// the structural ceiling.
///
/// Inserting a key which is already present and removing a key which is
/// absent are both silent no-ops, never errors.
///
/// The list performs no internal synchronization; shared mutation is ruled
/// out by the usual `&mut self` requirement, and callers wanting concurrent
/// access must wrap the list in a lock of their own.
///
/// # Examples
///
/// ```
/// use towerlist::SkipList;
///
/// let mut list = SkipList::new();
/// list.insert(5);
/// list.insert(1);
/// list.insert(9);
/// assert!(list.contains(&5));
/// assert_eq!(list.remove(&5), Some(5));
/// assert!(!list.contains(&5));
/// assert_eq!(list.len(), 2);
/// ```
pub struct SkipList<T> {
    // Head sentinels, bottom level first. Each level's chain is owned
    // left-to-right starting at its head; the ladder is released in drop.
    heads: [*mut SkipNode<T>; MAX_HEIGHT],
    // Number of keys on the bottom level.
    len: usize,
    // Decides, per insertion, how many levels the new tower climbs.
    coin: Box<dyn CoinFlipper + Send>,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<T> SkipList<T> {
    /// Create a new, empty skip list with a fair coin seeded from system
    /// entropy.
    ///
    /// # Examples
    ///
    /// ```
    /// use towerlist::SkipList;
    ///
    /// let mut list: SkipList<i64> = SkipList::new();
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_coin(FairCoin::new())
    }

    /// Create a new, empty skip list whose fair coin is seeded with `seed`,
    /// making the shape of the list reproducible for a given insertion
    /// sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use towerlist::SkipList;
    ///
    /// let mut a = SkipList::with_seed(42);
    /// let mut b = SkipList::with_seed(42);
    /// a.insert(1);
    /// b.insert(1);
    /// assert_eq!(a.dump(), b.dump());
    /// ```
    #[inline]
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_coin(FairCoin::with_seed(seed))
    }

    /// Create a new, empty skip list using the provided coin to decide
    /// tower growth.
    ///
    /// # Examples
    ///
    /// ```
    /// use towerlist::{BiasedCoin, SkipList};
    ///
    /// let coin = BiasedCoin::new(0.25).expect("probability is in (0, 1)");
    /// let mut list = SkipList::with_coin(coin);
    /// list.insert(1);
    /// assert!(list.contains(&1));
    /// ```
    #[must_use]
    pub fn with_coin(coin: impl CoinFlipper + Send + 'static) -> Self {
        SkipList {
            heads: Self::build_ladder(),
            len: 0,
            coin: Box::new(coin),
        }
    }

    /// Returns the number of keys in the skip list.
    ///
    /// # Examples
    ///
    /// ```
    /// use towerlist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.extend(0..10);
    /// assert_eq!(list.len(), 10);
    /// ```
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the skip list contains no keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use towerlist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// assert!(list.is_empty());
    ///
    /// list.insert(1);
    /// assert!(!list.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears the skip list, removing all keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use towerlist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.extend(0..10);
    /// list.clear();
    /// assert!(list.is_empty());
    /// ```
    pub fn clear(&mut self) {
        // SAFETY: every node of every level is owned by its chain alone,
        // heads included, and the ladder is rebuilt before anything can
        // observe the old pointers.
        unsafe {
            for &head in &self.heads {
                SkipNode::free_chain(head);
            }
        }
        self.heads = Self::build_ladder();
        self.len = 0;
    }

    /// Allocate the fixed ladder: one head and one tail sentinel per level,
    /// with both boundary columns stitched vertically.
    fn build_ladder() -> [*mut SkipNode<T>; MAX_HEIGHT] {
        let mut heads = [ptr::null_mut(); MAX_HEIGHT];
        let mut tails = [ptr::null_mut(); MAX_HEIGHT];
        for level in 0..MAX_HEIGHT {
            heads[level] = Box::into_raw(Box::new(SkipNode::sentinel()));
            tails[level] = Box::into_raw(Box::new(SkipNode::sentinel()));
            // SAFETY: both nodes were just allocated and are not aliased.
            unsafe {
                (*heads[level]).next = tails[level];
                (*tails[level]).prev = heads[level];
            }
        }
        for level in 0..MAX_HEIGHT - 1 {
            // SAFETY: the sentinels of adjacent levels are live and
            // distinct.
            unsafe {
                (*heads[level]).above = heads[level + 1];
                (*heads[level + 1]).below = heads[level];
                (*tails[level]).above = tails[level + 1];
                (*tails[level + 1]).below = tails[level];
            }
        }
        heads
    }
}

impl<T> SkipList<T>
where
    T: Ord,
{
    /// Returns `true` if the key is contained in the skip list.
    ///
    /// # Examples
    ///
    /// ```
    /// use towerlist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.extend(0..10);
    /// assert!(list.contains(&4));
    /// assert!(!list.contains(&15));
    /// ```
    #[must_use]
    pub fn contains(&self, key: &T) -> bool {
        let node = self.search(key);
        // SAFETY: search returns a live node on the bottom level.
        unsafe { (*node).key.as_ref() == Some(key) }
    }

    /// Removes a key from the skip list, returning it, or `None` if the key
    /// was not present. Removal takes down the key's entire tower without
    /// disturbing neighboring towers.
    ///
    /// # Examples
    ///
    /// ```
    /// use towerlist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.extend(0..10);
    /// assert_eq!(list.remove(&4), Some(4));
    /// assert!(list.remove(&4).is_none());
    /// ```
    pub fn remove(&mut self, key: &T) -> Option<T> {
        let bottom = self.search(key);
        // SAFETY: search returns a live bottom-level node; the nodes of a
        // tower are linked through `above` and each is owned by its own
        // level's chain, so each is unlinked and reclaimed exactly once.
        unsafe {
            if (*bottom).key.as_ref() != Some(key) {
                return None;
            }
            self.len -= 1;

            let mut removed = None;
            let mut current = bottom;
            while !current.is_null() {
                let above = (*current).above;
                let mut node = SkipNode::unlink(current);
                if !above.is_null() {
                    (*above).below = ptr::null_mut();
                }
                if removed.is_none() {
                    removed = node.key.take();
                }
                current = above;
            }
            removed
        }
    }

    /// Returns the right-most node on the bottom level whose key is less
    /// than or equal to `key`, or the bottom head sentinel if every key is
    /// greater.
    ///
    /// This is the classic descent: starting at the top-left sentinel, drop
    /// one level, then advance right past every real node whose key does
    /// not exceed the target, and repeat until the bottom level is reached.
    fn search(&self, key: &T) -> *mut SkipNode<T> {
        let mut current = self.heads[MAX_HEIGHT - 1];
        // SAFETY: the ladder sentinels are live for the lifetime of the
        // list, every chain ends in a tail sentinel (whose key is None, and
        // which therefore stops the rightward scan before `next` can be
        // null), and `below` links only ever point one level down the same
        // column.
        unsafe {
            while !(*current).below.is_null() {
                current = (*current).below;
                loop {
                    let next = (*current).next;
                    match (*next).key.as_ref() {
                        Some(next_key) if next_key <= key => current = next,
                        _ => break,
                    }
                }
            }
        }
        current
    }

    /// Checks the integrity of the skip list: strict order and sentinel
    /// bounds on every level, the subset property between adjacent levels,
    /// mutually consistent tower links, an empty ceiling level, and an
    /// accurate key count.
    #[allow(dead_code)]
    fn check(&self) {
        // SAFETY: all links are maintained by insert/remove; this merely
        // walks them.
        unsafe {
            for level in 0..MAX_HEIGHT {
                let head = self.heads[level];
                assert!((*head).is_sentinel());
                assert!((*head).prev.is_null());
                if level > 0 {
                    assert_eq!((*head).below, self.heads[level - 1]);
                    assert_eq!((*self.heads[level - 1]).above, head);
                }

                let mut count = 0;
                let mut last_key: Option<&T> = None;
                let mut prev = head;
                let mut node = (*head).next;
                loop {
                    assert!(!node.is_null());
                    assert_eq!((*node).prev, prev);
                    match (*node).key.as_ref() {
                        Some(key) => {
                            if let Some(last) = last_key {
                                assert!(last < key);
                            }
                            last_key = Some(key);
                            count += 1;

                            if level > 0 {
                                let below = (*node).below;
                                assert!(!below.is_null());
                                assert_eq!((*below).above, node);
                                assert!((*below).key.as_ref() == Some(key));
                            }
                            let above = (*node).above;
                            if !above.is_null() {
                                assert_eq!((*above).below, node);
                            }
                        }
                        // The tail sentinel terminates the level.
                        None => {
                            assert!((*node).next.is_null());
                            break;
                        }
                    }
                    prev = node;
                    node = (*node).next;
                }

                if level == 0 {
                    assert_eq!(count, self.len);
                }
                if level == MAX_HEIGHT - 1 {
                    assert_eq!(count, 0);
                }
            }
        }
    }
}

impl<T> SkipList<T>
where
    T: Ord + Clone,
{
    /// Insert a key into the skip list. Returns `true` if the key was not
    /// already present; inserting a duplicate is a no-op returning `false`.
    ///
    /// The new key is spliced into the bottom level at its sorted position,
    /// and its tower then grows one level per "grow" answer from the coin,
    /// stopping one level below the structural ceiling. Each level of the
    /// tower carries its own clone of the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use towerlist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// assert!(list.insert(5));
    /// assert!(list.insert(3));
    /// assert!(!list.insert(5));
    /// assert_eq!(list.len(), 2);
    /// ```
    pub fn insert(&mut self, key: T) -> bool {
        let mut current = self.search(&key);
        // SAFETY: search returns a live bottom-level node. Walking left
        // along `prev` in the climb always terminates: every head sentinel
        // below the ceiling has an `above` link, and the climb never leaves
        // the levels for which that holds.
        unsafe {
            if (*current).key.as_ref() == Some(&key) {
                return false;
            }
            self.len += 1;

            let mut below = Box::into_raw(Box::new(SkipNode::new(key)));
            SkipNode::splice_after(current, below);

            let mut level = 0;
            while self.coin.flip() && level + 2 < MAX_HEIGHT {
                // The nearest tower to the left tells us where this key
                // goes on the next level up.
                while (*current).above.is_null() {
                    current = (*current).prev;
                }
                current = (*current).above;

                let node = SkipNode::new_above(below);
                SkipNode::splice_after(current, node);
                below = node;
                level += 1;
            }
        }
        true
    }
}

impl<T> SkipList<T>
where
    T: fmt::Debug,
{
    /// Render every level from the top down as one line of keys in order,
    /// with sentinels shown as `*`. Diagnostic only.
    ///
    /// # Examples
    ///
    /// ```
    /// use towerlist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert(3);
    /// list.insert(1);
    /// let rows = list.dump();
    /// assert_eq!(rows.last().unwrap(), "* 1 3 *");
    /// ```
    #[must_use]
    pub fn dump(&self) -> Vec<String> {
        (0..MAX_HEIGHT)
            .rev()
            .map(|level| self.dump_level(level))
            .collect()
    }

    fn dump_level(&self, level: usize) -> String {
        let mut line = String::from("*");
        // SAFETY: the chain is live and ends in a tail sentinel.
        unsafe {
            let mut node = (*self.heads[level]).next;
            while let Some(key) = (*node).key.as_ref() {
                line.push_str(&format!(" {key:?}"));
                node = (*node).next;
            }
        }
        line.push_str(" *");
        line
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

// The raw links are an implementation detail of an owned container;
// mutation goes through `&mut self` and reads through `&self` touch no
// interior mutability.
unsafe impl<T: Send> Send for SkipList<T> {}
unsafe impl<T: Sync> Sync for SkipList<T> {}

impl<T> Drop for SkipList<T> {
    fn drop(&mut self) {
        // SAFETY: every node of every level is owned by its chain alone,
        // heads included, so each is reclaimed exactly once.
        unsafe {
            for &head in &self.heads {
                SkipNode::free_chain(head);
            }
        }
    }
}

impl<T> Default for SkipList<T> {
    fn default() -> SkipList<T> {
        SkipList::new()
    }
}

impl<T> Extend<T> for SkipList<T>
where
    T: Ord + Clone,
{
    #[inline]
    fn extend<I: iter::IntoIterator<Item = T>>(&mut self, iterable: I) {
        for element in iterable {
            self.insert(element);
        }
    }
}

impl<T> iter::FromIterator<T> for SkipList<T>
where
    T: Ord + Clone,
{
    #[inline]
    fn from_iter<I>(iter: I) -> SkipList<T>
    where
        I: iter::IntoIterator<Item = T>,
    {
        let mut list = SkipList::new();
        list.extend(iter);
        list
    }
}

impl<T> fmt::Debug for SkipList<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        // SAFETY: the bottom chain is live and ends in a tail sentinel.
        unsafe {
            let mut node = (*self.heads[0]).next;
            let mut first = true;
            while let Some(key) = (*node).key.as_ref() {
                if !first {
                    write!(f, ", ")?;
                }
                write!(f, "{key:?}")?;
                first = false;
                node = (*node).next;
            }
        }
        write!(f, "]")
    }
}

impl<T> fmt::Display for SkipList<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        // SAFETY: the bottom chain is live and ends in a tail sentinel.
        unsafe {
            let mut node = (*self.heads[0]).next;
            let mut first = true;
            while let Some(key) = (*node).key.as_ref() {
                if !first {
                    write!(f, ", ")?;
                }
                write!(f, "{key}")?;
                first = false;
                node = (*node).next;
            }
        }
        write!(f, "]")
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////

//! A BST with lazy (soft) deletion. Removing a value only marks its node as a tombstone, leaving
//! the shape of the tree alone. Tombstones can be physically removed one at a time with
//! [`LazyTree::remove_hard`] or all at once with [`LazyTree::collect_garbage`].
//!
//! # Examples
//!
//! ```
//! use lazy_bst::{LazyTree, NotFound};
//!
//! let mut tree = LazyTree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), Err(NotFound));
//!
//! assert!(tree.insert(1));
//! assert!(tree.insert(2));
//! assert_eq!(tree.find(&1), Ok(&1));
//!
//! // A soft delete hides the value but keeps its node around.
//! assert!(tree.remove(&1));
//! assert_eq!(tree.find(&1), Err(NotFound));
//! assert_eq!(tree.len(), 1);
//! assert_eq!(tree.len_hard(), 2);
//!
//! // Collecting garbage gets rid of the node for good.
//! tree.collect_garbage();
//! assert_eq!(tree.len(), 1);
//! assert_eq!(tree.len_hard(), 1);
//! ```

use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, trace};

use crate::error::{NotFound, Result};
use crate::traverse::{Iter, Visitor};
use crate::util::{HardRemoval, Side};

type Link<T> = Option<Box<Node<T>>>;

/// An unbalanced Binary Search Tree over values of type `T` which supports both soft and hard
/// deletion.
///
/// The tree keeps two sizes. [`len`][LazyTree::len] counts the values that are logically present
/// while [`len_hard`][LazyTree::len_hard] counts every node in the tree, tombstoned or not.
pub struct LazyTree<T> {
    root: Link<T>,
    /// Number of nodes that aren't tombstoned.
    len: usize,
    /// Number of nodes, including tombstones.
    len_hard: usize,
}

impl<T> Default for LazyTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for LazyTree<T> {
    fn drop(&mut self) {
        self.release_nodes();
    }
}

impl<T> Clone for LazyTree<T>
where
    T: Clone,
{
    /// Deep copies every node, tombstones included. The sizes are copied as-is rather than being
    /// rebuilt through `insert`.
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            len: self.len,
            len_hard: self.len_hard,
        }
    }
}

impl<T> fmt::Debug for LazyTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Live<'a, T>(&'a LazyTree<T>);

        impl<T: fmt::Debug> fmt::Debug for Live<'_, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_set().entries(self.0.iter()).finish()
            }
        }

        f.debug_struct("LazyTree")
            .field("values", &Live(self))
            .field("len", &self.len)
            .field("len_hard", &self.len_hard)
            .finish()
    }
}

impl<T> LazyTree<T> {
    /// Generate a new, empty `LazyTree`.
    pub fn new() -> Self {
        Self {
            root: None,
            len: 0,
            len_hard: 0,
        }
    }

    /// Whether the tree has no logically present values. A tree holding only tombstones is
    /// empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of values logically present in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// The number of nodes physically present in the tree, including tombstones.
    pub fn len_hard(&self) -> usize {
        self.len_hard
    }

    /// Removes every node from the tree, tombstoned or not.
    pub fn clear(&mut self) {
        let released = self.release_nodes();
        trace!(released, "cleared tree");
        self.len = 0;
        self.len_hard = 0;
    }

    /// The number of edges on the longest path from the root to a leaf. Tombstones count like any
    /// other node. An empty tree has a height of `-1` and a tree with a single node has a height
    /// of `0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_bst::LazyTree;
    ///
    /// // Without balancing, ascending inserts build a linked list.
    /// let tree: LazyTree<i32> = (0..10).collect();
    /// assert_eq!(tree.height(), 9);
    /// ```
    pub fn height(&self) -> isize {
        Node::height(&self.root)
    }

    /// Returns the smallest value logically present in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_bst::{LazyTree, NotFound};
    ///
    /// let mut tree: LazyTree<i32> = [2, 1, 3].into_iter().collect();
    /// tree.remove(&1);
    /// assert_eq!(tree.find_min(), Ok(&2));
    ///
    /// tree.remove(&2);
    /// tree.remove(&3);
    /// assert_eq!(tree.find_min(), Err(NotFound));
    /// ```
    pub fn find_min(&self) -> Result<&T> {
        self.extreme(Side::Left, Node::is_live)
    }

    /// Returns the largest value logically present in the tree.
    pub fn find_max(&self) -> Result<&T> {
        self.extreme(Side::Right, Node::is_live)
    }

    /// Returns the smallest value physically present in the tree, even if it is a tombstone.
    pub fn find_min_hard(&self) -> Result<&T> {
        self.extreme(Side::Left, Node::is_present)
    }

    /// Returns the largest value physically present in the tree, even if it is a tombstone.
    pub fn find_max_hard(&self) -> Result<&T> {
        self.extreme(Side::Right, Node::is_present)
    }

    /// Hands every logically present value to `visitor` in ascending order.
    pub fn traverse<V>(&self, visitor: &mut V)
    where
        V: Visitor<T> + ?Sized,
    {
        if let Some(root) = self.root.as_deref() {
            root.traverse(visitor);
        }
    }

    /// Returns an iterator over the logically present values in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref(), self.len)
    }

    /// Physically removes every tombstoned node. The logically present values (and so
    /// [`len`][LazyTree::len]) don't change while [`len_hard`][LazyTree::len_hard] drops to
    /// match it.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_bst::LazyTree;
    ///
    /// let mut tree: LazyTree<i32> = (0..10).collect();
    /// for x in (0..10).step_by(2) {
    ///     tree.remove(&x);
    /// }
    /// assert_eq!(tree.len_hard(), 10);
    ///
    /// tree.collect_garbage();
    /// assert_eq!(tree.len(), 5);
    /// assert_eq!(tree.len_hard(), 5);
    /// assert!(tree.iter().eq([1, 3, 5, 7, 9].iter()));
    /// ```
    pub fn collect_garbage(&mut self) {
        let reclaimed = Node::collect_garbage(&mut self.root);
        self.len_hard -= reclaimed;
        debug!(reclaimed, len_hard = self.len_hard, "collected garbage");
        self.debug_check_sizes();
    }

    fn extreme(&self, side: Side, counts: fn(&Node<T>) -> bool) -> Result<&T> {
        Node::extreme(&self.root, side, counts)
            .map(|node| &node.value)
            .ok_or(NotFound)
    }

    /// Drops every node without recursing so that degenerate (list shaped) trees can't overflow
    /// the stack. Returns how many nodes were released.
    fn release_nodes(&mut self) -> usize {
        let mut stack: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        let mut released = 0;
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
            released += 1;
        }
        released
    }

    /// In debug builds, recounts the tree and checks it against the stored sizes.
    fn debug_check_sizes(&self) {
        if cfg!(debug_assertions) {
            let (live, total) = Node::count(&self.root);
            assert_eq!(self.len, live, "logical size out of sync");
            assert_eq!(self.len_hard, total, "physical size out of sync");
        }
    }
}

impl<T> LazyTree<T>
where
    T: Ord,
{
    /// Inserts `value` into the tree. Returns `true` if a new node was created and `false` if a
    /// node holding `value` already existed.
    ///
    /// Inserting a value that was soft deleted does **not** bring it back. Its node is still in
    /// the tree so the insert is a no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_bst::LazyTree;
    ///
    /// let mut tree = LazyTree::new();
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    ///
    /// tree.remove(&1);
    /// assert!(!tree.insert(1));
    /// assert!(!tree.contains(&1));
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let inserted = match self.root.as_deref_mut() {
            Some(root) => root.insert(value),
            None => {
                self.root = Some(Node::new_boxed(value));
                true
            }
        };

        if inserted {
            self.len += 1;
            self.len_hard += 1;
        }
        inserted
    }

    /// Finds the node holding `value` if it is logically present. Tombstoned values are reported
    /// as missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_bst::{LazyTree, NotFound};
    ///
    /// let mut tree = LazyTree::new();
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.find(&1), Ok(&1));
    /// assert_eq!(tree.find(&42), Err(NotFound));
    /// ```
    pub fn find(&self, value: &T) -> Result<&T> {
        self.root
            .as_deref()
            .and_then(|root| root.find(value))
            .filter(|node| !node.tombstoned)
            .map(|node| &node.value)
            .ok_or(NotFound)
    }

    /// Whether `value` is logically present in the tree.
    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_ok()
    }

    /// Soft deletes `value` by marking its node as a tombstone. Returns `true` if `value` was
    /// logically present. The shape of the tree is untouched.
    pub fn remove(&mut self, value: &T) -> bool {
        match self.root.as_deref_mut().and_then(|root| root.find_mut(value)) {
            Some(node) if !node.tombstoned => {
                node.tombstoned = true;
                self.len -= 1;
                true
            }
            _ => false,
        }
    }

    /// Physically removes the node holding `value`, whether or not it had been soft deleted.
    /// Returns `true` if such a node existed.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_bst::LazyTree;
    ///
    /// let mut tree: LazyTree<i32> = [5, 3, 8].into_iter().collect();
    /// tree.remove(&5);
    ///
    /// assert!(tree.remove_hard(&5));
    /// assert!(!tree.remove_hard(&5));
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.len_hard(), 2);
    /// ```
    pub fn remove_hard(&mut self, value: &T) -> bool {
        match Node::remove_hard(&mut self.root, value) {
            HardRemoval::NotFound => false,
            HardRemoval::Removed { was_live } => {
                self.len_hard -= 1;
                if was_live {
                    self.len -= 1;
                }
                self.debug_check_sizes();
                true
            }
        }
    }
}

impl<T> Extend<T> for LazyTree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> FromIterator<T> for LazyTree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, T> IntoIterator for &'a LazyTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
    /// Set by a soft delete. A tombstoned node still orders its subtrees like any other node.
    pub(crate) tombstoned: bool,
}

impl<T> Node<T> {
    fn new_boxed(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            left: None,
            right: None,
            tombstoned: false,
        })
    }

    fn is_live(&self) -> bool {
        !self.tombstoned
    }

    fn is_present(&self) -> bool {
        true
    }

    fn child(&self, side: Side) -> &Link<T> {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Finds the most extreme node towards `side` for which `counts` holds.
    ///
    /// The extreme subtree is searched first. Failing that the node itself is the answer if it
    /// counts. Failing that, the opposite subtree may still hold nodes more extreme than any
    /// ancestor so it is searched too.
    fn extreme(link: &Link<T>, side: Side, counts: fn(&Self) -> bool) -> Option<&Self> {
        let node = link.as_deref()?;
        Self::extreme(node.child(side), side, counts).or_else(|| {
            if counts(node) {
                Some(node)
            } else {
                Self::extreme(node.child(side.opposite()), side, counts)
            }
        })
    }

    fn height(link: &Link<T>) -> isize {
        match link {
            Some(node) => 1 + Self::height(&node.left).max(Self::height(&node.right)),
            None => -1,
        }
    }

    fn traverse<V>(&self, visitor: &mut V)
    where
        V: Visitor<T> + ?Sized,
    {
        if let Some(left) = self.left.as_deref() {
            left.traverse(visitor);
        }
        if !self.tombstoned {
            visitor.visit(&self.value);
        }
        if let Some(right) = self.right.as_deref() {
            right.traverse(visitor);
        }
    }

    /// Returns `(live, total)` node counts for the subtree.
    fn count(link: &Link<T>) -> (usize, usize) {
        match link {
            Some(node) => {
                let (left_live, left_total) = Self::count(&node.left);
                let (right_live, right_total) = Self::count(&node.right);
                (
                    left_live + right_live + usize::from(!node.tombstoned),
                    left_total + right_total + 1,
                )
            }
            None => (0, 0),
        }
    }

    /// Removes every tombstone in the subtree, children first, and returns how many nodes were
    /// removed. By the time a tombstoned node is spliced out its subtrees hold no tombstones, so
    /// whatever successor takes its place is live.
    fn collect_garbage(link: &mut Link<T>) -> usize {
        let Some(node) = link.as_deref_mut() else {
            return 0;
        };
        let mut reclaimed =
            Self::collect_garbage(&mut node.left) + Self::collect_garbage(&mut node.right);
        if node.tombstoned {
            Self::splice_out(link);
            reclaimed += 1;
        }
        reclaimed
    }

    /// Physically removes the node in `link`.
    ///
    /// With at most one child, the child takes the node's place. With two children, the node
    /// takes over the value and tombstone of its in-order successor (the minimum of its right
    /// subtree) and the successor's node is unlinked instead.
    fn splice_out(link: &mut Link<T>) {
        let Some(mut node) = link.take() else {
            return;
        };
        match (node.left.take(), node.right.take()) {
            (None, None) => trace!("spliced out leaf"),
            (Some(child), None) | (None, Some(child)) => {
                trace!("spliced out node with one child");
                *link = Some(child);
            }
            (Some(left), Some(right)) => {
                trace!("spliced out node with two children");
                let mut right = Some(right);
                if let Some(successor) = Self::detach_min(&mut right) {
                    node.value = successor.value;
                    node.tombstoned = successor.tombstoned;
                }
                node.left = Some(left);
                node.right = right;
                *link = Some(node);
            }
        }
    }

    /// Unlinks the leftmost node of the subtree, putting its right child in its place.
    fn detach_min(link: &mut Link<T>) -> Link<T> {
        if link.as_ref()?.left.is_some() {
            return Self::detach_min(&mut link.as_mut()?.left);
        }
        let mut min = link.take()?;
        *link = min.right.take();
        Some(min)
    }
}

impl<T> Node<T>
where
    T: Ord,
{
    /// Finds the node holding `value`, tombstoned or not.
    fn find(&self, value: &T) -> Option<&Self> {
        match value.cmp(&self.value) {
            Ordering::Less => self.left.as_deref()?.find(value),
            Ordering::Equal => Some(self),
            Ordering::Greater => self.right.as_deref()?.find(value),
        }
    }

    fn find_mut(&mut self, value: &T) -> Option<&mut Self> {
        match value.cmp(&self.value) {
            Ordering::Less => self.left.as_deref_mut()?.find_mut(value),
            Ordering::Equal => Some(self),
            Ordering::Greater => self.right.as_deref_mut()?.find_mut(value),
        }
    }

    fn insert(&mut self, value: T) -> bool {
        let child = match value.cmp(&self.value) {
            Ordering::Less => &mut self.left,
            Ordering::Equal => return false,
            Ordering::Greater => &mut self.right,
        };
        let inserted = match child.as_deref_mut() {
            Some(child) => child.insert(value),
            None => {
                *child = Some(Self::new_boxed(value));
                true
            }
        };

        if cfg!(debug_assertions) {
            self.assert_local_order();
        }
        inserted
    }

    fn remove_hard(link: &mut Link<T>, value: &T) -> HardRemoval {
        let Some(node) = link.as_deref_mut() else {
            return HardRemoval::NotFound;
        };
        match value.cmp(&node.value) {
            Ordering::Less => Self::remove_hard(&mut node.left, value),
            Ordering::Greater => Self::remove_hard(&mut node.right, value),
            Ordering::Equal => {
                // Sizes follow the node being removed, not the successor that may replace it.
                let was_live = !node.tombstoned;
                Self::splice_out(link);
                if cfg!(debug_assertions) {
                    if let Some(node) = link.as_deref() {
                        node.assert_local_order();
                    }
                }
                HardRemoval::Removed { was_live }
            }
        }
    }

    fn assert_local_order(&self) {
        if let Some(left) = self.left.as_deref() {
            assert!(self.value > left.value);
        }
        if let Some(right) = self.right.as_deref() {
            assert!(self.value < right.value);
        }
    }
}

//! Ordered visitation of the live values in a [`LazyTree`][crate::LazyTree].
//!
//! Both flavors walk the tree in order (left subtree, node, right subtree) and skip tombstoned
//! nodes while still descending into their subtrees. [`Visitor`]s are pushed values by
//! [`LazyTree::traverse`][crate::LazyTree::traverse] while an [`Iter`] lets the caller pull them.
//!
//! # Examples
//!
//! ```
//! use lazy_bst::LazyTree;
//!
//! let mut tree: LazyTree<i32> = [5, 3, 8].into_iter().collect();
//! tree.remove(&5);
//!
//! let mut visited = Vec::new();
//! tree.traverse(&mut |x: &i32| visited.push(*x));
//!
//! assert_eq!(visited, [3, 8]);
//! assert!(tree.iter().eq(visited.iter()));
//! ```

use std::iter::FusedIterator;

use crate::lazy::Node;

/// Anything that can be handed the values of a tree one at a time.
///
/// Every `FnMut(&T)` closure is a `Visitor`.
pub trait Visitor<T: ?Sized> {
    /// Called once per live value, in ascending order.
    fn visit(&mut self, value: &T);
}

impl<T, F> Visitor<T> for F
where
    T: ?Sized,
    F: FnMut(&T),
{
    fn visit(&mut self, value: &T) {
        self(value)
    }
}

/// A borrowing iterator over the live values of a tree in ascending order.
///
/// Created by [`LazyTree::iter`][crate::LazyTree::iter].
pub struct Iter<'a, T> {
    // Nodes whose left subtree has been (or is being) yielded but which haven't been yielded
    // themselves. The top of the stack is always the next candidate.
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, remaining: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node = self.stack.pop()?;
            self.push_left_spine(node.right.as_deref());
            if !node.tombstoned {
                self.remaining = self.remaining.saturating_sub(1);
                return Some(&node.value);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

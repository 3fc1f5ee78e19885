//! This crate exposes a Binary Search Tree (BST) with lazy deletion.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! ## Lazy deletion
//!
//! Deleting from a BST usually means restructuring the links around the
//! deleted `Node`. A lazy tree offers a cheaper alternative: a "soft" delete
//! only marks the `Node` as a tombstone. The `Node` keeps its place in the
//! tree (so the invariants above still hold for it) but every query that
//! cares about the tree's logical contents skips it.
//!
//! Tombstones pile up, so the tree can also "hard" delete a single value
//! (physically splicing its `Node` out) or collect all of its garbage at once,
//! turning every tombstone into a hard delete without changing which values
//! are logically present.
//!
//! The tree is not self-balancing. Inserting values in sorted order yields a
//! tree shaped like a linked list.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod lazy;
pub mod traverse;
mod util;

#[cfg(test)]
mod test;

pub use error::{NotFound, Result};
pub use lazy::LazyTree;
pub use traverse::{Iter, Visitor};

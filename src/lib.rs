//! This crate exposes a Binary Search Tree (BST) over integer keys with order-statistic and range
//! queries, mostly for educational purposes, plus a small command language for driving it.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of key (the key that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of the BST here are:
//!
//! 1. For every `Node` in the BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in the BST, all the `Node`s in its right subtree have a
//!    key greater than or equal to its own key. Inserting a key twice keeps both copies.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! The benefits of these invariants are many. For instance, searching for
//! keys in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). BSTs also naturally support sorted
//! iteration by visiting the left subtree, then the subtree root, then the right
//! subtree. Visiting the right subtree first instead gives the keys in descending order,
//! which is how [`ordered::Tree::kth_largest`] finds its answer.
//!
//! [`ordered::Tree`] does no rebalancing, so its height depends entirely on the order
//! keys were inserted in.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod config;
pub mod error;
pub mod ordered;
pub mod script;
mod util;

pub use error::{LabError, Result};

//! An unbalanced BST over `i32` keys that supports order-statistic and range queries.
//!
//! Duplicates are allowed. A key equal to a node's key is always routed into that node's right
//! subtree, so every key in a node's left subtree is strictly smaller than it and every key in its
//! right subtree is greater or equal.
//!
//! Traversals don't print anything themselves. They hand each key to a caller-supplied closure,
//! in the order the traversal visits it.
//!
//! # Examples
//!
//! ```
//! use bst_lab::ordered::Tree;
//!
//! let mut tree: Tree = [50, 30, 70, 20, 40, 60, 80].into_iter().collect();
//!
//! let mut in_range = Vec::new();
//! tree.range(35, 65, |key| in_range.push(key));
//! assert_eq!(in_range, [40, 50, 60]);
//!
//! assert_eq!(tree.kth_largest(1), Some(80));
//! assert_eq!(tree.kth_largest(3), Some(60));
//! assert_eq!(tree.kth_largest(8), None);
//!
//! // Deleting a node with two children promotes its in-order successor.
//! assert!(tree.delete(50));
//! assert!(!tree.search(50));
//! assert_eq!(tree.iter().collect::<Vec<_>>(), [20, 30, 40, 60, 70, 80]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use tracing::trace;

use crate::util::DeleteResult;

/// An owning slot for a subtree. `None` is the empty subtree.
type Link = Option<Box<Node>>;

/// A Binary Search Tree of `i32` keys. This can be used for inserting, searching for, and deleting
/// keys, for walking them in the three depth-first orders, and for range and k-th largest queries.
///
/// The tree is not self-balancing. Inserting keys in sorted order produces a tree whose height is
/// its length.
#[derive(Default)]
pub struct Tree {
    root: Link,
    len: usize,
}

impl Drop for Tree {
    // Dropping a `Box<Node>` drops its children recursively, which would blow the stack on a
    // degenerate tree. Detach every node first so each `Box` dropped here is a leaf.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl Clone for Tree {
    // A derived `Clone` would recurse once per level. Instead, list the nodes in reverse postorder
    // with an explicit stack, then rebuild from the leaves up, keeping finished subtrees on a
    // second stack.
    fn clone(&self) -> Self {
        let mut order: Vec<&Node> = Vec::with_capacity(self.len);
        let mut pending: Vec<&Node> = self.root.as_deref().into_iter().collect();
        while let Some(node) = pending.pop() {
            order.push(node);
            pending.extend(node.left.as_deref());
            pending.extend(node.right.as_deref());
        }

        let mut built: Vec<Box<Node>> = Vec::new();
        for node in order.into_iter().rev() {
            // Postorder builds a node's left subtree before its right one, so the right is on top.
            let right = node
                .right
                .as_ref()
                .map(|_| built.pop().expect("Right child built before parent"));
            let left = node
                .left
                .as_ref()
                .map(|_| built.pop().expect("Left child built before parent"));
            built.push(Box::new(Node {
                key: node.key,
                left,
                right,
            }));
        }

        Self {
            root: built.pop(),
            len: self.len,
        }
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Tree {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Returns `true` if the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of keys in the tree. Each duplicate counts separately.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Inserts `key` into the tree. Keys already present are inserted again as a new node in the
    /// right subtree of the existing one.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_lab::ordered::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(3);
    /// tree.insert(3);
    ///
    /// assert_eq!(tree.len(), 2);
    /// assert!(tree.search(3));
    /// ```
    pub fn insert(&mut self, key: i32) {
        match self.root.as_mut() {
            Some(root) => root.insert(key),
            None => self.root = Some(Node::new_boxed(key)),
        }
        self.len += 1;
    }

    /// Returns `true` if any node holds `key`.
    pub fn search(&self, key: i32) -> bool {
        self.root.as_ref().map_or(false, |root| root.search(key))
    }

    /// Deletes one node holding `key` and returns whether there was one to delete. Deleting a
    /// key that isn't in the tree leaves the tree unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_lab::ordered::Tree;
    ///
    /// let mut tree: Tree = [5, 3, 8, 3].into_iter().collect();
    ///
    /// assert!(tree.delete(3));
    /// assert!(tree.search(3));
    /// assert!(tree.delete(3));
    /// assert!(!tree.search(3));
    ///
    /// // Nothing left to delete.
    /// assert!(!tree.delete(3));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn delete(&mut self, key: i32) -> bool {
        match Node::delete_from(&mut self.root, key) {
            DeleteResult::NotFound => {
                trace!(key, "delete: key not in tree");
                false
            }
            _ => {
                self.len -= 1;
                true
            }
        }
    }

    /// Calls `emit` with every key in `low..=high`, in ascending order. Subtrees that can't hold
    /// such keys aren't visited. When `low > high` nothing is emitted.
    pub fn range<F>(&self, low: i32, high: i32, mut emit: F)
    where
        F: FnMut(i32),
    {
        if low > high {
            trace!(low, high, "range: inverted bounds");
            return;
        }
        if let Some(root) = &self.root {
            root.range(low, high, &mut emit);
        }
    }

    /// Finds the `k`th largest key, counting from 1, with duplicates counted separately. Returns
    /// `None` when `k` is 0 or greater than [`len`][Tree::len].
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_lab::ordered::Tree;
    ///
    /// let tree: Tree = [2, 9, 9, 4].into_iter().collect();
    ///
    /// assert_eq!(tree.kth_largest(1), Some(9));
    /// assert_eq!(tree.kth_largest(2), Some(9));
    /// assert_eq!(tree.kth_largest(3), Some(4));
    /// assert_eq!(tree.kth_largest(0), None);
    /// assert_eq!(tree.kth_largest(5), None);
    /// ```
    pub fn kth_largest(&self, k: usize) -> Option<i32> {
        if k == 0 || k > self.len {
            trace!(k, len = self.len, "kth_largest: rank out of range");
            return None;
        }
        let mut visited = 0;
        self.root
            .as_ref()
            .and_then(|root| root.kth_largest(k, &mut visited))
    }

    /// Calls `emit` with every key in left, node, right order. This gives the keys in ascending
    /// order.
    pub fn inorder<F>(&self, mut emit: F)
    where
        F: FnMut(i32),
    {
        if let Some(root) = &self.root {
            root.inorder(&mut emit);
        }
    }

    /// Calls `emit` with every key in node, left, right order.
    pub fn preorder<F>(&self, mut emit: F)
    where
        F: FnMut(i32),
    {
        if let Some(root) = &self.root {
            root.preorder(&mut emit);
        }
    }

    /// Calls `emit` with every key in left, right, node order.
    pub fn postorder<F>(&self, mut emit: F)
    where
        F: FnMut(i32),
    {
        if let Some(root) = &self.root {
            root.postorder(&mut emit);
        }
    }

    /// The smallest key in the tree.
    pub fn min(&self) -> Option<i32> {
        self.root.as_ref().map(|root| root.min_key())
    }

    /// The largest key in the tree.
    pub fn max(&self) -> Option<i32> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(node.key)
    }

    /// The number of nodes on the longest path from the root to a leaf. An empty tree has a
    /// height of 0.
    pub fn height(&self) -> usize {
        Node::height(&self.root)
    }

    /// An iterator over the keys in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.root.as_deref(), self.len)
    }

    /// Checks that every node's left subtree holds only smaller keys and its right subtree holds
    /// only greater or equal keys.
    pub fn is_ordered(&self) -> bool {
        Node::is_ordered(&self.root, None, None)
    }
}

impl Extend<i32> for Tree {
    fn extend<I: IntoIterator<Item = i32>>(&mut self, keys: I) {
        for key in keys {
            self.insert(key);
        }
    }
}

impl FromIterator<i32> for Tree {
    fn from_iter<I: IntoIterator<Item = i32>>(keys: I) -> Self {
        let mut tree = Self::new();
        tree.extend(keys);
        tree
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = i32;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An in-order iterator over a [`Tree`]'s keys. It keeps the path of nodes still waiting to be
/// visited on a stack instead of recursing.
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    fn new(root: Option<&'a Node>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some(node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}
impl FusedIterator for Iter<'_> {}

struct Node {
    key: i32,
    left: Link,
    right: Link,
}

impl Node {
    fn new_boxed(key: i32) -> Box<Self> {
        Box::new(Self {
            key,
            left: None,
            right: None,
        })
    }

    fn insert(&mut self, key: i32) {
        let child = if key < self.key {
            &mut self.left
        } else {
            &mut self.right
        };
        match child {
            Some(child) => child.insert(key),
            None => *child = Some(Self::new_boxed(key)),
        }
    }

    fn search(&self, key: i32) -> bool {
        let child = match key.cmp(&self.key) {
            Ordering::Equal => return true,
            Ordering::Less => &self.left,
            Ordering::Greater => &self.right,
        };
        child.as_ref().map_or(false, |child| child.search(key))
    }

    /// Deletes `key` from the subtree in `link`, relinking `link` if the subtree's root is the
    /// node removed. Only ever returns [`DeleteResult::NotFound`] or
    /// [`DeleteResult::DeletedChild`].
    fn delete_from(link: &mut Link, key: i32) -> DeleteResult<Link> {
        match link.as_mut().map(|node| node.delete(key)) {
            Some(DeleteResult::ReplaceSelf(replacement)) => {
                *link = replacement;
                DeleteResult::DeletedChild
            }
            Some(DeleteResult::DeletedChild) => DeleteResult::DeletedChild,
            None | Some(DeleteResult::NotFound) => DeleteResult::NotFound,
        }
    }

    /// Deletes the node with the given `key` from this subtree. See the documentation on
    /// [`DeleteResult`] to see what the various return values mean.
    fn delete(&mut self, key: i32) -> DeleteResult<Link> {
        match key.cmp(&self.key) {
            Ordering::Less => Self::delete_from(&mut self.left, key),
            Ordering::Greater => Self::delete_from(&mut self.right, key),
            Ordering::Equal => match (self.left.take(), self.right.take()) {
                (None, None) => DeleteResult::ReplaceSelf(None),
                (Some(child), None) | (None, Some(child)) => {
                    DeleteResult::ReplaceSelf(Some(child))
                }

                // With two children we keep this node in place and give it the key of its
                // in-order successor, then delete that key from the right subtree. The successor
                // has no left child so that second delete unlinks it directly.
                (left @ Some(_), Some(right)) => {
                    let successor = right.min_key();
                    self.key = successor;
                    self.left = left;
                    self.right = Some(right);
                    match Self::delete_from(&mut self.right, successor) {
                        DeleteResult::DeletedChild => DeleteResult::DeletedChild,
                        _ => panic!("Successor not found but self.right was not null"),
                    }
                }
            },
        }
    }

    fn min_key(&self) -> i32 {
        let mut node = self;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        node.key
    }

    fn range<F>(&self, low: i32, high: i32, emit: &mut F)
    where
        F: FnMut(i32),
    {
        if self.key > low {
            if let Some(left) = &self.left {
                left.range(low, high, emit);
            }
        }
        if low <= self.key && self.key <= high {
            emit(self.key);
        }
        // `<=` rather than `<`: duplicates of `high` live in the right subtree.
        if self.key <= high {
            if let Some(right) = &self.right {
                right.range(low, high, emit);
            }
        }
    }

    /// Walks this subtree in descending order, counting visited nodes in `visited`, and stops as
    /// soon as the `k`th one is reached.
    fn kth_largest(&self, k: usize, visited: &mut usize) -> Option<i32> {
        if let Some(found) = self
            .right
            .as_ref()
            .and_then(|right| right.kth_largest(k, visited))
        {
            return Some(found);
        }
        *visited += 1;
        if *visited == k {
            return Some(self.key);
        }
        self.left
            .as_ref()
            .and_then(|left| left.kth_largest(k, visited))
    }

    fn inorder<F: FnMut(i32)>(&self, emit: &mut F) {
        if let Some(left) = &self.left {
            left.inorder(emit);
        }
        emit(self.key);
        if let Some(right) = &self.right {
            right.inorder(emit);
        }
    }

    fn preorder<F: FnMut(i32)>(&self, emit: &mut F) {
        emit(self.key);
        if let Some(left) = &self.left {
            left.preorder(emit);
        }
        if let Some(right) = &self.right {
            right.preorder(emit);
        }
    }

    fn postorder<F: FnMut(i32)>(&self, emit: &mut F) {
        if let Some(left) = &self.left {
            left.postorder(emit);
        }
        if let Some(right) = &self.right {
            right.postorder(emit);
        }
        emit(self.key);
    }

    fn height(link: &Link) -> usize {
        match link {
            None => 0,
            Some(node) => Self::height(&node.left).max(Self::height(&node.right)) + 1,
        }
    }

    /// Every key in `link` must be `>= lower` and `< upper` where those bounds exist.
    fn is_ordered(link: &Link, lower: Option<i32>, upper: Option<i32>) -> bool {
        let Some(node) = link else {
            return true;
        };
        lower.map_or(true, |lower| node.key >= lower)
            && upper.map_or(true, |upper| node.key < upper)
            && Self::is_ordered(&node.left, lower, Some(node.key))
            && Self::is_ordered(&node.right, Some(node.key), upper)
    }
}

//! # avl-index
//!
//! A height-balanced ordered index over string keys.
//!
//! Every insert restores the AVL invariant (the heights of a node's two
//! subtrees differ by at most one) before returning, so lookups and inserts
//! stay logarithmic no matter what order the keys arrive in.
//!
//! ## Example
//!
//! ```rust
//! use avl_index::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! for key in ["a", "b", "c"] {
//!     tree.insert(key).unwrap();
//! }
//!
//! assert_eq!(tree.retrieve("b"), Some("b"));
//! assert_eq!(tree.retrieve("z"), None);
//! assert_eq!(tree.height(), 2);
//! assert_eq!(tree.traverse_inorder(), vec!["a", "b", "c"]);
//! ```

#![deny(unsafe_code)]

pub mod driver;
mod error;
mod shared;

pub use error::{IndexError, Result};
pub use shared::SharedIndex;

use std::cmp::Ordering;
use std::fmt::{self, Write as _};
use std::iter::FusedIterator;

// =============================================================================
// Configuration
// =============================================================================

/// What [`AvlTree::insert`] does with a key that is already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Equal keys route to the right subtree and become a new node.
    #[default]
    Multiset,
    /// Equal keys are ignored; the tree is left untouched.
    Reject,
}

/// Construction-time switches for an [`AvlTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Restore the AVL invariant after each insert. Turning this off yields
    /// a plain binary search tree.
    pub balancing: bool,
    /// Ask the [`driver`] to trace each insert and dump the tree after it.
    pub show_steps: bool,
    /// Duplicate-key handling.
    pub duplicates: DuplicatePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            balancing: true,
            show_steps: false,
            duplicates: DuplicatePolicy::Multiset,
        }
    }
}

impl Config {
    /// Enable or disable rebalancing after each insert.
    pub fn balancing(mut self, on: bool) -> Self {
        self.balancing = on;
        self
    }

    /// Enable or disable per-insert tracing in the [`driver`].
    pub fn show_steps(mut self, on: bool) -> Self {
        self.show_steps = on;
        self
    }

    /// Set the duplicate-key policy.
    pub fn duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }
}

// =============================================================================
// Nodes
// =============================================================================

type Link = Option<Box<Node>>;

struct Node {
    key: String,
    /// Leaf = 1.
    height: u32,
    left: Link,
    right: Link,
}

impl Node {
    fn leaf(key: String) -> Box<Self> {
        Box::new(Self {
            key,
            height: 1,
            left: None,
            right: None,
        })
    }

    #[inline]
    fn factor(&self) -> i64 {
        i64::from(height(&self.left)) - i64::from(height(&self.right))
    }

    #[inline]
    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }
}

/// Height of a subtree; an absent subtree has height 0.
#[inline]
fn height(link: &Link) -> u32 {
    link.as_ref().map_or(0, |n| n.height)
}

// =============================================================================
// Rotation primitives
// =============================================================================

/// Lifts the left child of `root` into its place.
///
/// The pivot's right subtree becomes `root`'s left subtree. Heights are
/// recomputed bottom-up: `root` first, then the pivot.
fn rotate_right(mut root: Box<Node>) -> Box<Node> {
    let mut pivot = root.left.take().expect("rotate_right requires a left child");
    root.left = pivot.right.take();
    root.update_height();
    pivot.right = Some(root);
    pivot.update_height();
    pivot
}

/// Mirror of [`rotate_right`].
fn rotate_left(mut root: Box<Node>) -> Box<Node> {
    let mut pivot = root.right.take().expect("rotate_left requires a right child");
    root.right = pivot.left.take();
    root.update_height();
    pivot.left = Some(root);
    pivot.update_height();
    pivot
}

/// Restores the balance of `root`, whose children are already balanced and
/// whose height is current. Returns the new local root.
fn rebalance(mut root: Box<Node>) -> Box<Node> {
    let factor = root.factor();
    if factor > 1 {
        let left = root.left.take().expect("left-heavy node has a left child");
        // Left-left: single rotation. Left-right: straighten the child first.
        root.left = Some(if left.factor() >= 0 {
            left
        } else {
            rotate_left(left)
        });
        root = rotate_right(root);
    } else if factor < -1 {
        let right = root.right.take().expect("right-heavy node has a right child");
        root.right = Some(if right.factor() <= 0 {
            right
        } else {
            rotate_right(right)
        });
        root = rotate_left(root);
    }
    debug_assert!(
        (-1..=1).contains(&root.factor()),
        "AVL balance violated at {:?}",
        root.key
    );
    root
}

/// Inserts `leaf` below `link` and returns the (possibly rotated) subtree.
///
/// Nodes on the search path are detached on the way down and kept on an
/// explicit ancestor stack; on the way back up each one gets its child
/// reattached, its height recomputed and, if enabled, its balance restored.
/// Depth is bounded by heap memory, not the call stack.
fn insert_at(link: Link, leaf: Box<Node>, balancing: bool) -> Box<Node> {
    let mut path: Vec<(Box<Node>, bool)> = Vec::new();
    let mut next = link;

    while let Some(mut node) = next {
        // Equal keys route right.
        let went_left = leaf.key < node.key;
        next = if went_left {
            node.left.take()
        } else {
            node.right.take()
        };
        path.push((node, went_left));
    }

    let mut subtree = leaf;
    while let Some((mut node, went_left)) = path.pop() {
        if went_left {
            node.left = Some(subtree);
        } else {
            node.right = Some(subtree);
        }
        node.update_height();
        subtree = if balancing { rebalance(node) } else { node };
    }
    subtree
}

/// Deep copy of a subtree, built bottom-up from a post-order walk.
fn clone_link(link: &Link) -> Link {
    // (node, children already cloned)
    let mut pending: Vec<(&Node, bool)> =
        link.as_deref().map(|n| (n, false)).into_iter().collect();
    let mut built: Vec<Box<Node>> = Vec::new();

    while let Some((node, children_done)) = pending.pop() {
        if children_done {
            // The right clone was finished last, so it sits on top.
            let right = node
                .right
                .as_ref()
                .map(|_| built.pop().expect("right subtree was cloned"));
            let left = node
                .left
                .as_ref()
                .map(|_| built.pop().expect("left subtree was cloned"));
            built.push(Box::new(Node {
                key: node.key.clone(),
                height: node.height,
                left,
                right,
            }));
        } else {
            pending.push((node, true));
            if let Some(right) = node.right.as_deref() {
                pending.push((right, false));
            }
            if let Some(left) = node.left.as_deref() {
                pending.push((left, false));
            }
        }
    }

    debug_assert!(built.len() <= 1);
    built.pop()
}

// =============================================================================
// AvlTree
// =============================================================================

/// An ordered index of owned string keys kept as an AVL tree.
///
/// Keys compare byte-wise (`str`'s `Ord`). There is no removal; the tree
/// releases all of its nodes when dropped or [cleared](Self::clear).
pub struct AvlTree {
    root: Link,
    count: usize,
    config: Config,
}

impl AvlTree {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            root: None,
            count: 0,
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of nodes, duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the root; `0` for an empty tree.
    #[inline]
    pub fn height(&self) -> u32 {
        height(&self.root)
    }

    /// Inserts an owned copy of `key`.
    ///
    /// Returns `Ok(true)` when a node was created and `Ok(false)` when the
    /// key was already present under [`DuplicatePolicy::Reject`]. If the key
    /// cannot be allocated, the tree is left exactly as it was.
    pub fn insert(&mut self, key: &str) -> Result<bool> {
        if self.config.duplicates == DuplicatePolicy::Reject && self.contains(key) {
            return Ok(false);
        }

        let mut owned = String::new();
        owned.try_reserve_exact(key.len())?;
        owned.push_str(key);

        let leaf = Node::leaf(owned);
        self.root = Some(insert_at(self.root.take(), leaf, self.config.balancing));
        self.count += 1;
        Ok(true)
    }

    /// Returns the stored key equal to `key`, if any.
    pub fn retrieve(&self, key: &str) -> Option<&str> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(node.key.as_str()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(node.key.as_str()),
            };
        }
        None
    }

    pub fn contains(&self, key: &str) -> bool {
        self.retrieve(key).is_some()
    }

    /// Ascending inorder iterator over the keys.
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter {
            stack: Vec::with_capacity(self.height() as usize),
            remaining: self.count,
        };
        iter.descend_left(self.root.as_deref());
        iter
    }

    /// All keys in ascending order.
    pub fn traverse_inorder(&self) -> Vec<&str> {
        self.iter().collect()
    }

    /// Right-to-left indented dump of the tree shape, for inspection.
    pub fn structure(&self) -> Structure<'_> {
        Structure {
            root: self.root.as_deref(),
        }
    }

    pub fn print_structure(&self) {
        print!("{}", self.structure());
    }

    /// Releases every node. The tree stays usable and is empty afterwards.
    pub fn clear(&mut self) {
        // Iterative: the recursive `Box` drop overflows on list-shaped trees.
        let mut stack: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
        self.count = 0;
    }
}

impl Default for AvlTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AvlTree {
    fn drop(&mut self) {
        self.clear();
    }
}

impl Clone for AvlTree {
    fn clone(&self) -> Self {
        Self {
            root: clone_link(&self.root),
            count: self.count,
            config: self.config.clone(),
        }
    }
}

impl fmt::Debug for AvlTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a AvlTree {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

// =============================================================================
// Traversal
// =============================================================================

pub struct Iter<'a> {
    /// Ancestors whose key and right subtree are still pending.
    stack: Vec<&'a Node>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    fn descend_left(&mut self, mut node: Option<&'a Node>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend_left(node.right.as_deref());
        self.remaining -= 1;
        Some(node.key.as_str())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

/// Display adapter returned by [`AvlTree::structure`].
///
/// Emits one key per line, right subtree first, indented by one tab per
/// level of depth. Reading the output with the head tilted left shows the
/// tree.
pub struct Structure<'a> {
    root: Option<&'a Node>,
}

impl fmt::Display for Structure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack: Vec<(&Node, usize)> = Vec::new();
        let mut current = self.root.map(|n| (n, 0usize));
        loop {
            while let Some((node, depth)) = current {
                stack.push((node, depth));
                current = node.right.as_deref().map(|r| (r, depth + 1));
            }
            let Some((node, depth)) = stack.pop() else {
                return Ok(());
            };
            for _ in 0..depth {
                f.write_char('\t')?;
            }
            writeln!(f, "{}", node.key)?;
            current = node.left.as_deref().map(|l| (l, depth + 1));
        }
    }
}


#[cfg(test)]
mod proptests;

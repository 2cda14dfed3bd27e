pub use debug::BalanceReport;
pub use iter::Iter;

mod crud;
mod debug;
mod iter;
mod node;
mod query;

use node::Link;

/// Represents an AVL tree of [`Person`](crate::Person) records. All tree algorithms in PersonDB
/// are implemented here.
///
/// Every node exclusively owns its two subtrees. Records are ordered by [`Key`](crate::Key) and
/// keys are unique within a tree. After every insertion and deletion the heights of the two
/// subtrees of any node differ by at most one.
///
/// Different kinds of algorithms are implemented in different `mod`s.
/// See [`node`] for rotations, [`crud`], [`iter`], [`query`], [`debug`] for more details.
#[derive(Default)]
pub struct AvlTree {
    root: Link,
    len: usize,
}

impl AvlTree {
    #[inline]
    pub fn new() -> Self {
        Default::default()
    }

    /// The number of records in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The record stored at the root node, if any.
    #[inline]
    pub fn root(&self) -> Option<&crate::Person> {
        self.root.as_ref().map(|n| &n.person)
    }

    /// The height of the tree, `0` when it is empty.
    #[inline]
    pub fn height(&self) -> usize {
        node::height(&self.root)
    }
}

use std::iter::FusedIterator;

use crate::{
    avl::{
        node::{Link, Node},
        AvlTree,
    },
    person::Person,
};

impl AvlTree {
    /// Iterate over all records in ascending key order.
    ///
    /// The traversal borrows the tree and has no side effects, so it may be restarted at will.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.root, self.len)
    }
}

impl<'a> IntoIterator for &'a AvlTree {
    type Item = &'a Person;
    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An in-order iterator over the records of an [`AvlTree`].
///
/// Uses an explicit stack rather than recursion; the stack never grows beyond the tree height.
pub struct Iter<'a> {
    /// Nodes whose left subtree has been visited but which have not been yielded yet.
    stack: Vec<&'a Node>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    fn new(root: &'a Link, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_leftmost_path(root);
        iter
    }

    fn push_leftmost_path(&mut self, mut link: &'a Link) {
        while let Some(node) = link {
            self.stack.push(node);
            link = &node.left;
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Person;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.remaining -= 1;
        self.push_leftmost_path(&node.right);
        Some(&node.person)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

use crate::person::Person;

/// An optional, exclusively owned subtree.
pub(crate) type Link = Option<Box<Node>>;

pub(crate) struct Node {
    pub(crate) person: Person,
    pub(crate) left: Link,
    pub(crate) right: Link,
    /// Cached height of the subtree rooted here, a leaf has height `1`.
    pub(crate) height: usize,
}

impl Node {
    #[inline]
    pub(crate) fn leaf(person: Person) -> Box<Self> {
        Box::new(Self {
            person,
            left: None,
            right: None,
            height: 1,
        })
    }

    #[inline]
    pub(crate) fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    /// `height(left) - height(right)`.
    #[inline]
    pub(crate) fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }
}

#[inline]
pub(crate) fn height(link: &Link) -> usize {
    link.as_ref().map_or(0, |n| n.height)
}

#[inline]
fn balance_factor(link: &Link) -> isize {
    link.as_ref().map_or(0, |n| n.balance_factor())
}

/// Rotate the subtree right, its left child becomes the new subtree root.
///
/// ```text
///       node            pivot
///      /    \          /     \
///    pivot   c   =>   a      node
///   /    \                  /    \
///  a      b                b      c
/// ```
pub(crate) fn rotate_right(mut node: Box<Node>) -> Box<Node> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };

    node.left = pivot.right.take();
    node.update_height();

    pivot.right = Some(node);
    pivot.update_height();
    pivot
}

/// Rotate the subtree left, its right child becomes the new subtree root.
pub(crate) fn rotate_left(mut node: Box<Node>) -> Box<Node> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };

    node.right = pivot.left.take();
    node.update_height();

    pivot.left = Some(node);
    pivot.update_height();
    pivot
}

/// Refresh the cached height of `node` and restore the AVL property at it.
///
/// Must be applied to every node on a modified path, innermost first. Returns the new root of
/// the subtree.
pub(crate) fn rebalance(mut node: Box<Node>) -> Box<Node> {
    node.update_height();

    let balance = node.balance_factor();
    if balance > 1 {
        // Left-right case: straighten the left child first.
        if balance_factor(&node.left) < 0 {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }
    if balance < -1 {
        // Right-left case: straighten the right child first.
        if balance_factor(&node.right) > 0 {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }

    node
}

#[cfg(test)]
mod tests {
    use super::{rebalance, rotate_left, rotate_right, Link, Node};
    use crate::person::tests::person;

    fn node(last: &str, left: Link, right: Link) -> Box<Node> {
        let mut node = Node::leaf(person(last, "X", (2000, 1, 1)));
        node.left = left;
        node.right = right;
        node.update_height();
        node
    }

    fn name(link: &Link) -> Option<&str> {
        link.as_ref().map(|n| n.person.last_name.as_str())
    }

    #[test]
    fn test_rotate_right() {
        // C(B(A, b'), c') => B(A, C(b', c'))
        let a = node("A", None, None);
        let inner = node("Ba", None, None);
        let b = node("B", Some(a), Some(inner));
        let c = node("C", Some(b), Some(node("D", None, None)));
        assert_eq!(c.height, 3);

        let root = rotate_right(c);
        assert_eq!(root.person.last_name, "B");
        assert_eq!(name(&root.left), Some("A"));
        assert_eq!(name(&root.right), Some("C"));

        let c = root.right.as_ref().unwrap();
        // The inner child moved across.
        assert_eq!(name(&c.left), Some("Ba"));
        assert_eq!(name(&c.right), Some("D"));
        assert_eq!(c.height, 2);
        assert_eq!(root.height, 3);
    }

    #[test]
    fn test_rotate_left() {
        let c = node("C", None, None);
        let b = node("B", None, Some(c));
        let a = node("A", None, Some(b));

        let root = rotate_left(a);
        assert_eq!(root.person.last_name, "B");
        assert_eq!(name(&root.left), Some("A"));
        assert_eq!(name(&root.right), Some("C"));
        assert_eq!(root.height, 2);
        assert_eq!(root.left.as_ref().unwrap().height, 1);
    }

    #[test]
    fn test_rotation_without_pivot_is_noop() {
        let root = rotate_right(node("A", None, None));
        assert_eq!(root.person.last_name, "A");
        let root = rotate_left(root);
        assert_eq!(root.person.last_name, "A");
        assert_eq!(root.height, 1);
    }

    #[test]
    fn test_rebalance_cases() {
        // Left-left.
        let root = rebalance(node("C", Some(node("B", Some(node("A", None, None)), None)), None));
        assert_eq!(root.person.last_name, "B");

        // Left-right.
        let root = rebalance(node("C", Some(node("A", None, Some(node("B", None, None)))), None));
        assert_eq!(root.person.last_name, "B");
        assert_eq!(name(&root.left), Some("A"));
        assert_eq!(name(&root.right), Some("C"));

        // Right-right.
        let root = rebalance(node("A", None, Some(node("B", None, Some(node("C", None, None))))));
        assert_eq!(root.person.last_name, "B");

        // Right-left.
        let root = rebalance(node("A", None, Some(node("C", Some(node("B", None, None)), None))));
        assert_eq!(root.person.last_name, "B");
        assert_eq!(root.height, 2);
        assert_eq!(root.balance_factor(), 0);
    }
}

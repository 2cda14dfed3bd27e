use std::cmp::Ordering;

use crate::{
    avl::{
        node::{rebalance, Link, Node},
        AvlTree,
    },
    key::Key,
    person::Person,
};

impl AvlTree {
    /// Insert a record by its key.
    ///
    /// Returns `false` and leaves the tree untouched when a record with the same key already
    /// exists: the first record stored under a key wins.
    pub fn insert(&mut self, person: Person) -> bool {
        let (root, inserted) = insert_inner(self.root.take(), person);
        self.root = Some(root);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Check if the tree contains a record with the given names.
    #[inline]
    pub fn contains(&self, first: &str, last: &str) -> bool {
        self.get(first, last).is_some()
    }

    /// Get the record with the given names.
    pub fn get(&self, first: &str, last: &str) -> Option<&Person> {
        let key = Key { last, first };
        let mut link = &self.root;

        while let Some(node) = link {
            link = match key.cmp(&node.person.key()) {
                Ordering::Less => &node.left,
                Ordering::Greater => &node.right,
                Ordering::Equal => return Some(&node.person),
            };
        }
        None
    }

    /// Get mutable access to the record with the given names.
    ///
    /// Callers must not change `last_name` or `first_name` through the returned reference.
    pub(crate) fn get_mut(&mut self, first: &str, last: &str) -> Option<&mut Person> {
        let key = Key { last, first };
        let mut link = &mut self.root;

        while let Some(node) = link {
            match key.cmp(&node.person.key()) {
                Ordering::Less => link = &mut node.left,
                Ordering::Greater => link = &mut node.right,
                Ordering::Equal => return Some(&mut node.person),
            }
        }
        None
    }

    /// Delete the record with the given names, returning it if it was present.
    pub fn delete(&mut self, first: &str, last: &str) -> Option<Person> {
        let key = Key { last, first };
        let (root, removed) = delete_inner(self.root.take(), key);
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }
}

fn insert_inner(link: Link, person: Person) -> (Box<Node>, bool) {
    let Some(mut node) = link else {
        return (Node::leaf(person), true);
    };

    let inserted = match person.key().cmp(&node.person.key()) {
        Ordering::Less => {
            let (left, inserted) = insert_inner(node.left.take(), person);
            node.left = Some(left);
            inserted
        }
        Ordering::Greater => {
            let (right, inserted) = insert_inner(node.right.take(), person);
            node.right = Some(right);
            inserted
        }
        Ordering::Equal => false,
    };

    if inserted {
        (rebalance(node), true)
    } else {
        (node, false)
    }
}

fn delete_inner(link: Link, key: Key) -> (Link, Option<Person>) {
    let Some(mut node) = link else {
        return (None, None);
    };

    let removed = match key.cmp(&node.person.key()) {
        Ordering::Less => {
            let (left, removed) = delete_inner(node.left.take(), key);
            node.left = left;
            removed
        }
        Ordering::Greater => {
            let (right, removed) = delete_inner(node.right.take(), key);
            node.right = right;
            removed
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            // Leaf or one child: splice the child (if any) into this slot.
            (None, child) | (child, None) => return (child, Some(node.person)),
            // Two children: the in-order successor takes over this node.
            (left, Some(right)) => {
                let (right, successor) = take_min(right);
                node.left = left;
                node.right = right;
                Some(std::mem::replace(&mut node.person, successor))
            }
        },
    };

    if removed.is_none() {
        return (Some(node), None);
    }
    (Some(rebalance(node)), removed)
}

/// Detach the leftmost record of the subtree, rebalancing on the way back up.
fn take_min(mut node: Box<Node>) -> (Link, Person) {
    match node.left.take() {
        None => (node.right.take(), node.person),
        Some(left) => {
            let (left, min) = take_min(left);
            node.left = left;
            (Some(rebalance(node)), min)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{avl::AvlTree, person::tests::person};

    fn build(lasts: &[&str]) -> AvlTree {
        let mut tree = AvlTree::new();
        for last in lasts {
            assert!(tree.insert(person(last, "X", (2000, 1, 1))));
        }
        tree
    }

    fn lasts(tree: &AvlTree) -> Vec<&str> {
        tree.iter().map(|p| p.last_name.as_str()).collect()
    }

    #[test]
    fn test_insert_rotates_to_balance() {
        let tree = build(&["A", "B", "C"]);
        assert_eq!(tree.root().unwrap().last_name, "B");
        assert_eq!(tree.height(), 2);
        assert!(tree.check().balanced);

        let tree = build(&["C", "B", "A"]);
        assert_eq!(tree.root().unwrap().last_name, "B");
        assert_eq!(tree.height(), 2);
    }

    #[test]
    fn test_insert_duplicate_keeps_first() {
        let mut tree = AvlTree::new();
        let mut first = person("Smith", "John", (1980, 1, 1));
        first.zip_code = "11111".to_owned();
        let mut second = first.clone();
        second.zip_code = "22222".to_owned();

        assert!(tree.insert(first));
        assert!(!tree.insert(second));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get("John", "Smith").unwrap().zip_code, "11111");
    }

    #[test]
    fn test_get() {
        let mut tree = AvlTree::new();
        tree.insert(person("Smith", "John", (1980, 1, 1)));
        tree.insert(person("Smith", "Adam", (1980, 1, 1)));
        tree.insert(person("Doe", "Jane", (1975, 6, 15)));

        assert!(tree.get("John", "Smith").is_some());
        assert!(tree.get("Jane", "Doe").is_some());
        // Argument order is (first, last).
        assert!(tree.get("Smith", "John").is_none());
        // Case-sensitive.
        assert!(tree.get("john", "Smith").is_none());
        assert!(!tree.contains("Eve", "Smith"));
    }

    #[test]
    fn test_delete_leaf_and_one_child() {
        let mut tree = build(&["B", "A", "C", "D"]);

        // "D" is a leaf.
        assert_eq!(tree.delete("X", "D").unwrap().last_name, "D");
        assert_eq!(lasts(&tree), ["A", "B", "C"]);

        tree.insert(person("D", "X", (2000, 1, 1)));
        // "C" has one child.
        assert_eq!(tree.delete("X", "C").unwrap().last_name, "C");
        assert_eq!(lasts(&tree), ["A", "B", "D"]);
        assert_eq!(tree.len(), 3);
        assert!(tree.check().balanced);
    }

    #[test]
    fn test_delete_two_children_uses_successor() {
        let mut tree = build(&["D", "B", "F", "A", "C", "E", "G"]);
        assert_eq!(tree.root().unwrap().last_name, "D");

        let removed = tree.delete("X", "D").unwrap();
        assert_eq!(removed.last_name, "D");

        // "E" was the in-order successor of "D".
        assert_eq!(tree.root().unwrap().last_name, "E");
        assert_eq!(lasts(&tree), ["A", "B", "C", "E", "F", "G"]);
        assert_eq!(tree.len(), 6);
        assert!(tree.check().balanced);
    }

    #[test]
    fn test_delete_absent() {
        let mut tree = build(&["A", "B", "C"]);
        assert!(tree.delete("Y", "B").is_none());
        assert!(tree.delete("X", "Z").is_none());
        assert_eq!(tree.len(), 3);

        let mut empty = AvlTree::new();
        assert!(empty.delete("X", "A").is_none());
        assert_eq!(empty.len(), 0);
    }

    #[test]
    fn test_delete_rebalances() {
        let mut tree = build(&["B", "A", "D", "C", "E"]);
        tree.delete("X", "A");

        // Removing "A" makes the root right-heavy.
        assert_eq!(tree.root().unwrap().last_name, "D");
        assert_eq!(tree.height(), 3);
        assert!(tree.check().balanced);
    }

    #[test]
    fn test_get_mut() {
        let mut tree = build(&["A", "B", "C"]);
        tree.get_mut("X", "C").unwrap().zip_code = "99999".to_owned();
        assert_eq!(tree.get("X", "C").unwrap().zip_code, "99999");
        assert!(tree.get_mut("X", "Q").is_none());
    }
}

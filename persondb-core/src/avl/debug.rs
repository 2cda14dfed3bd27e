use std::fmt::{Debug, Formatter};

use crate::avl::{node::Link, AvlTree};

/// The result of an integrity check over an [`AvlTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceReport {
    /// The measured height, `0` for an empty tree.
    pub height: usize,
    /// Whether every node's subtree heights differ by at most one.
    pub balanced: bool,
}

impl AvlTree {
    /// Measure the height of the tree and check the AVL property in a single post-order pass.
    ///
    /// Heights are measured from the structure itself; cached heights are not trusted.
    #[inline]
    pub fn check(&self) -> BalanceReport {
        check_node(&self.root)
    }

    #[inline]
    pub(crate) fn dump(&self, f: &mut Formatter) -> std::fmt::Result {
        writeln!(f, "┓")?;
        dump_node(&self.root, String::new(), true, f)
    }
}

fn check_node(link: &Link) -> BalanceReport {
    let Some(node) = link else {
        return BalanceReport {
            height: 0,
            balanced: true,
        };
    };

    let left = check_node(&node.left);
    let right = check_node(&node.right);

    BalanceReport {
        height: 1 + left.height.max(right.height),
        balanced: left.balanced && right.balanced && left.height.abs_diff(right.height) <= 1,
    }
}

/// Right subtrees are drawn above left ones, so the picture reads as the tree turned sideways.
fn dump_node(link: &Link, prefix: String, is_last: bool, f: &mut Formatter) -> std::fmt::Result {
    let Some(node) = link else {
        return Ok(());
    };

    let weld = if is_last { "┗" } else { "┣" };
    writeln!(
        f,
        "{}{}━ {} {} (h={})",
        prefix, weld, node.person.last_name, node.person.first_name, node.height
    )?;

    let next_prefix = prefix + if is_last { "   " } else { "┃  " };
    match (&node.right, &node.left) {
        (None, None) => Ok(()),
        (right, None) | (None, right) => dump_node(right, next_prefix, true, f),
        (right, left) => {
            dump_node(right, next_prefix.clone(), false, f)?;
            dump_node(left, next_prefix, true, f)
        }
    }
}

impl Debug for AvlTree {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.dump(f)
    }
}

use std::cmp::Ordering;

use crate::{
    avl::{node::Link, AvlTree},
    key::compare,
    person::Person,
};

impl AvlTree {
    /// All records sharing the given last name, in key order.
    ///
    /// Records are ordered by last name first, so the descent skips every subtree that cannot
    /// hold the name.
    pub fn family(&self, last: &str) -> Vec<&Person> {
        let mut found = Vec::new();
        family_inner(&self.root, last, &mut found);
        found
    }

    /// All records with the given first name, in key order.
    ///
    /// The first name is not the primary ordering, so this visits every record.
    pub fn with_first_name<'a>(&'a self, first: &'a str) -> impl Iterator<Item = &'a Person> + 'a {
        self.iter().filter(move |p| compare(first, &p.first_name) == Ordering::Equal)
    }

    /// The record with the earliest birth date.
    ///
    /// On ties the record that comes first in key order wins.
    pub fn oldest(&self) -> Option<&Person> {
        let mut iter = self.iter();
        let mut oldest = iter.next()?;
        for person in iter {
            if person.birth_date() < oldest.birth_date() {
                oldest = person;
            }
        }
        Some(oldest)
    }
}

fn family_inner<'a>(link: &'a Link, last: &str, found: &mut Vec<&'a Person>) {
    let Some(node) = link else {
        return;
    };

    match compare(last, &node.person.last_name) {
        Ordering::Less => family_inner(&node.left, last, found),
        Ordering::Greater => family_inner(&node.right, last, found),
        Ordering::Equal => {
            family_inner(&node.left, last, found);
            found.push(&node.person);
            family_inner(&node.right, last, found);
        }
    }
}

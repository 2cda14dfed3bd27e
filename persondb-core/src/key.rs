use std::cmp::Ordering;

/// Compares two names byte by byte.
///
/// The first differing byte decides the order (case-sensitive, so `'A' < 'a'`). When one name is
/// a prefix of the other, the shorter one comes first. No case folding or locale rules apply.
pub fn compare(a: &str, b: &str) -> Ordering {
    let (a, b) = (a.as_bytes(), b.as_bytes());

    for (x, y) in a.iter().zip(b) {
        if x != y {
            return x.cmp(y);
        }
    }

    a.len().cmp(&b.len())
}

/// The identity of a record: its last name and first name, ordered in that priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key<'a> {
    pub last: &'a str,
    pub first: &'a str,
}

impl Ord for Key<'_> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self.last, other.last).then_with(|| compare(self.first, other.first))
    }
}

impl PartialOrd for Key<'_> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering::{Equal, Greater, Less};

    use super::{compare, Key};

    #[test]
    fn test_compare() {
        assert_eq!(compare("Smith", "Smith"), Equal);
        assert_eq!(compare("Doe", "Smith"), Less);
        assert_eq!(compare("Smith", "Doe"), Greater);

        // Case-sensitive: uppercase letters sort before lowercase ones.
        assert_eq!(compare("Zed", "adam"), Less);
        assert_eq!(compare("a", "A"), Greater);

        // A prefix sorts first.
        assert_eq!(compare("Smith", "Smithers"), Less);
        assert_eq!(compare("Smithers", "Smith"), Greater);
        assert_eq!(compare("", "A"), Less);
        assert_eq!(compare("", ""), Equal);
    }

    #[test]
    fn test_compare_matches_byte_order() {
        let names = ["", "a", "A", "ab", "aB", "Ab", "b", "ba", "Zz", "zZ", "é", "e"];
        for a in names {
            for b in names {
                assert_eq!(compare(a, b), a.as_bytes().cmp(b.as_bytes()), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn test_key_order() {
        let doe_jane = Key { last: "Doe", first: "Jane" };
        let doe_john = Key { last: "Doe", first: "John" };
        let smith_adam = Key { last: "Smith", first: "Adam" };

        assert!(doe_jane < doe_john);
        // The last name takes priority over the first name.
        assert!(doe_john < smith_adam);
        assert_eq!(doe_jane.cmp(&Key { last: "Doe", first: "Jane" }), Equal);
    }
}

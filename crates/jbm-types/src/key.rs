//! Canonical ordering of object keys.
//!
//! Object entries are stored sorted by key length first, then by the raw
//! bytes of the key. Shorter keys always sort before longer ones, so `"z"`
//! precedes `"aa"`. Every object in the system obeys this order, which is
//! what lets two objects be merged in a single linear pass.

use std::cmp::Ordering;

/// Compare two keys in canonical order: length ascending, then bytewise.
#[inline]
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    a.len()
        .cmp(&b.len())
        .then_with(|| a.as_bytes().cmp(b.as_bytes()))
}

/// Returns `true` if `keys` is strictly increasing in canonical order
/// (sorted, no duplicates).
pub fn is_canonical<'a, I>(keys: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let mut prev: Option<&str> = None;
    for key in keys {
        if let Some(p) = prev {
            if compare_keys(p, key) != Ordering::Less {
                return false;
            }
        }
        prev = Some(key);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn shorter_key_sorts_first() {
        assert_eq!(compare_keys("z", "aa"), Ordering::Less);
        assert_eq!(compare_keys("aa", "z"), Ordering::Greater);
    }

    #[test]
    fn equal_length_is_bytewise() {
        assert_eq!(compare_keys("ab", "ac"), Ordering::Less);
        assert_eq!(compare_keys("B", "a"), Ordering::Less);
        assert_eq!(compare_keys("same", "same"), Ordering::Equal);
    }

    #[test]
    fn multibyte_keys_compare_by_byte_length() {
        // "é" is two bytes in UTF-8.
        assert_eq!(compare_keys("é", "ab"), Ordering::Greater);
        assert_eq!(compare_keys("é", "abc"), Ordering::Less);
    }

    #[test]
    fn empty_key_is_smallest() {
        assert_eq!(compare_keys("", "a"), Ordering::Less);
    }

    #[test]
    fn canonical_sequence_detection() {
        assert!(is_canonical(["a", "b", "aa", "abc"]));
        assert!(is_canonical(std::iter::empty::<&str>()));
        assert!(!is_canonical(["aa", "b"]));
        assert!(!is_canonical(["a", "a"]));
    }

    proptest! {
        #[test]
        fn comparator_is_antisymmetric(a in ".{0,8}", b in ".{0,8}") {
            prop_assert_eq!(compare_keys(&a, &b), compare_keys(&b, &a).reverse());
        }

        #[test]
        fn sorting_yields_canonical_sequence(mut keys in prop::collection::vec("[a-c]{0,3}", 0..16)) {
            keys.sort_by(|a, b| compare_keys(a, b));
            keys.dedup();
            prop_assert!(is_canonical(keys.iter().map(String::as_str)));
        }
    }
}

use std::fmt;
use std::hash::{Hash, Hasher};

/// A snapshot of one item monitored by a [`StreamSummary`](crate::StreamSummary).
///
/// `count` never understates the item's true frequency, and overstates it by
/// at most `error`. The error bound is fixed when the item starts being
/// monitored: zero if it entered a free slot, otherwise the count of the
/// item it displaced.
///
/// Equality and hashing look at the item only, so two snapshots of the same
/// item taken at different times are equal.
#[derive(Debug)]
pub struct Element<'a, T> {
    pub item: &'a T,
    pub count: u64,
    pub error: u64,
}

// Derives would require `T: Clone`/`T: Copy`; only the reference is copied.
impl<T> Clone for Element<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Element<'_, T> {}

impl<T: PartialEq> PartialEq for Element<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.item == other.item
    }
}

impl<T: Eq> Eq for Element<'_, T> {}

impl<T: Hash> Hash for Element<'_, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.item.hash(state);
    }
}

impl<'a, T> Element<'a, T> {
    pub(crate) fn new(item: &'a T, count: u64, error: u64) -> Self {
        debug_assert!(error <= count, "error bound exceeds count");
        Element { item, count, error }
    }

    /// Lower bound of the item's true frequency.
    pub fn guaranteed(&self) -> u64 {
        self.count - self.error
    }
}

impl<T: fmt::Display> fmt::Display for Element<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.item, self.count, self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guaranteed() {
        let item = "a";
        let element = Element::new(&item, 5, 2);
        assert_eq!(element.guaranteed(), 3);
    }

    #[test]
    fn test_display() {
        let item = String::from("hello");
        let element = Element::new(&item, 7, 1);
        assert_eq!(element.to_string(), "hello:7:1");
    }

    #[test]
    fn test_identity_is_the_item() {
        use std::collections::HashSet;

        let (a, b) = ("a", "b");
        let before = Element::new(&a, 1, 0);
        let after = Element::new(&a, 4, 0);
        let evicted = Element::new(&b, 1, 0);
        assert_eq!(before, after);
        assert_ne!(before, evicted);

        let set: HashSet<_> = [before, after, evicted].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_copy_without_item_clone() {
        struct Opaque;
        let item = Opaque;
        let element = Element::new(&item, 1, 0);
        let copied = element;
        assert_eq!(element.count, copied.count);
        assert!(std::ptr::eq(element.item, copied.item));
    }
}

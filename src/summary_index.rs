use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use ahash::RandomState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Slot {
    count: u64,
    error: u64,
    sequence: u64, // arrival at the current count level
}

/// The two indexes of a stream summary, kept consistent with each other.
///
/// `counters` maps every monitored item to its slot and `buckets` groups the
/// same items by count. An item lives in exactly one bucket, the one keyed by
/// its count, and empty buckets are removed immediately, so the first bucket
/// always holds the minimum count. Within a bucket items are ordered by the
/// sequence number they received when they reached that count.
#[derive(Clone)]
pub(crate) struct SummaryIndex<T> {
    counters: HashMap<T, Slot, RandomState>,
    buckets: BTreeMap<u64, BTreeMap<u64, T>>, // count -> sequence -> item
    capacity: usize,
    sequence: u64,
}

impl<T: Hash + Eq + Clone> SummaryIndex<T> {
    pub(crate) fn with_capacity_and_hasher(capacity: usize, hasher: RandomState) -> Self {
        Self {
            counters: HashMap::with_capacity_and_hasher(capacity, hasher),
            buckets: BTreeMap::new(),
            capacity,
            sequence: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn len(&self) -> usize {
        self.counters.len()
    }

    pub(crate) fn is_full(&self) -> bool {
        self.counters.len() >= self.capacity
    }

    /// Returns the monitored item equal to `item` with its count and error.
    pub(crate) fn get<Q>(&self, item: &Q) -> Option<(&T, u64, u64)>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.counters
            .get_key_value(item)
            .map(|(key, slot)| (key, slot.count, slot.error))
    }

    pub(crate) fn min_count(&self) -> Option<u64> {
        self.buckets.keys().next().copied()
    }

    /// Moves a monitored item one count level up and returns its new count.
    ///
    /// Returns `None`, leaving everything untouched, if `item` is not monitored.
    pub(crate) fn increment<Q>(&mut self, item: &Q) -> Option<u64>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.counters.get_mut(item)?;
        let key = Self::detach(&mut self.buckets, slot.count, slot.sequence)?;

        self.sequence += 1;
        slot.count += 1;
        slot.sequence = self.sequence;
        self.buckets
            .entry(slot.count)
            .or_default()
            .insert(self.sequence, key);
        Some(slot.count)
    }

    /// Starts monitoring `item`, which must not be monitored yet.
    pub(crate) fn insert(&mut self, item: T, count: u64, error: u64) {
        debug_assert!(count > 0 && error < count);
        debug_assert!(!self.is_full(), "insert into a full index");
        debug_assert!(!self.counters.contains_key(&item), "item already monitored");

        self.sequence += 1;
        self.buckets
            .entry(count)
            .or_default()
            .insert(self.sequence, item.clone());
        self.counters.insert(
            item,
            Slot {
                count,
                error,
                sequence: self.sequence,
            },
        );
    }

    /// Stops monitoring the item that has held the minimum count the longest.
    ///
    /// Returns the evicted item with its count and error, or `None` if the
    /// index is empty.
    pub(crate) fn evict_min(&mut self) -> Option<(T, u64, u64)> {
        let mut bucket = self.buckets.first_entry()?;
        let (_, item) = bucket.get_mut().pop_first()?;
        if bucket.get().is_empty() {
            bucket.remove();
        }

        let slot = self.counters.remove(&item)?;
        Some((item, slot.count, slot.error))
    }

    /// Iterates `(item, count, error)` in no particular order.
    pub(crate) fn iter(&self) -> impl ExactSizeIterator<Item = (&T, u64, u64)> + '_ {
        self.counters
            .iter()
            .map(|(item, slot)| (item, slot.count, slot.error))
    }

    /// Iterates `(item, count, error)` by count descending. Items with equal
    /// counts come in the order they reached that count.
    pub(crate) fn iter_desc(&self) -> impl Iterator<Item = (&T, u64, u64)> + '_ {
        self.buckets
            .iter()
            .rev()
            .flat_map(|(&count, bucket)| bucket.values().map(move |item| (item, count)))
            .map(move |(item, count)| (item, count, self.counters[item].error))
    }

    fn detach(
        buckets: &mut BTreeMap<u64, BTreeMap<u64, T>>,
        count: u64,
        sequence: u64,
    ) -> Option<T> {
        let bucket = buckets.get_mut(&count)?;
        let item = bucket.remove(&sequence);
        if bucket.is_empty() {
            buckets.remove(&count);
        }
        item
    }

    /// Panics if the two indexes disagree.
    #[cfg(test)]
    pub(crate) fn validate(&self) {
        assert!(self.counters.len() <= self.capacity, "capacity exceeded");
        let bucketed: usize = self.buckets.values().map(BTreeMap::len).sum();
        assert_eq!(bucketed, self.counters.len(), "buckets do not partition counters");

        for (&count, bucket) in &self.buckets {
            assert!(!bucket.is_empty(), "empty bucket for count {}", count);
            for (&sequence, item) in bucket {
                let slot = self.counters.get(item).expect("bucketed item not in counters");
                assert_eq!(slot.count, count, "item in the wrong bucket");
                assert_eq!(slot.sequence, sequence, "stale sequence");
                assert!(slot.error <= slot.count, "error exceeds count");
            }
        }

        let min = self.counters.values().map(|slot| slot.count).min();
        assert_eq!(self.min_count(), min, "first bucket is not the minimum count");
    }
}

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use ahash::RandomState;
use tracing::{debug, trace};

use crate::element::Element;
use crate::error::SummaryError;
use crate::summary_index::SummaryIndex;

/// Space-Saving stream summary.
///
/// Monitors at most `capacity` distinct items. An item that is already
/// monitored has its count incremented. A new item takes a free slot with
/// count 1 and error 0; when no slot is free it replaces the item that has
/// held the minimum count `m` the longest, and starts at count `m + 1` with
/// error `m`.
///
/// Every reported count satisfies `count - error <= true count <= count`, and
/// no error bound ever exceeds the current minimum count.
///
/// # Example
///
/// ```
/// use spacesaving::StreamSummary;
///
/// let mut summary = StreamSummary::new(2).unwrap();
/// for word in ["a", "a", "a", "b", "c"] {
///     summary.add(word);
/// }
///
/// let top: Vec<_> = summary.most_frequents().iter().map(|e| *e.item).collect();
/// assert_eq!(top, vec!["a"]);
/// assert_eq!(summary.count("c"), Some(2));
/// assert_eq!(summary.error("c"), Some(1));
/// ```
#[derive(Clone)]
pub struct StreamSummary<T> {
    index: SummaryIndex<T>,
    stream_len: u64,
}

impl<T: Hash + Eq + Clone> StreamSummary<T> {
    /// Creates a summary monitoring at most `capacity` items.
    ///
    /// Fails with [`SummaryError::Configuration`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, SummaryError> {
        Self::with_hasher(capacity, RandomState::new())
    }

    /// Like [`new`](Self::new), with an explicit hasher for the item index.
    pub fn with_hasher(capacity: usize, hasher: RandomState) -> Result<Self, SummaryError> {
        if capacity == 0 {
            return Err(SummaryError::Configuration {
                name: "capacity",
                value: capacity,
            });
        }

        Ok(StreamSummary {
            index: SummaryIndex::with_capacity_and_hasher(capacity, hasher),
            stream_len: 0,
        })
    }

    /// Records one occurrence of `item`.
    pub fn add(&mut self, item: T) {
        self.stream_len += 1;

        if let Some(count) = self.index.increment(&item) {
            trace!(count, "incremented monitored item");
            return;
        }

        if !self.index.is_full() {
            self.index.insert(item, 1, 0);
            trace!(monitored = self.index.len(), "monitoring new item");
            return;
        }

        // A full index with capacity > 0 always has a minimum to evict.
        let evicted = self.index.evict_min();
        debug_assert!(evicted.is_some(), "full summary without a minimum bucket");
        if let Some((_, min_count, error)) = evicted {
            debug!(count = min_count, error, "evicted item with minimum count");
            self.index.insert(item, min_count + 1, min_count);
        }
    }

    /// Records one occurrence of `item` if present.
    ///
    /// `None` is rejected with [`SummaryError::InvalidArgument`] and leaves
    /// the summary unchanged.
    pub fn try_add(&mut self, item: Option<T>) -> Result<(), SummaryError> {
        let item = item.ok_or(SummaryError::InvalidArgument("value"))?;
        self.add(item);
        Ok(())
    }

    /// Maximum number of items monitored at once.
    pub fn capacity(&self) -> usize {
        self.index.capacity()
    }

    /// Number of items currently monitored.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.len() == 0
    }

    /// Number of occurrences recorded so far.
    pub fn stream_len(&self) -> u64 {
        self.stream_len
    }

    /// Smallest count among monitored items, `None` if nothing is monitored.
    pub fn min_count(&self) -> Option<u64> {
        self.index.min_count()
    }

    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(item).is_some()
    }

    pub fn get<Q>(&self, item: &Q) -> Option<Element<'_, T>>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index
            .get(item)
            .map(|(item, count, error)| Element::new(item, count, error))
    }

    /// Estimated count of `item`, `None` if it is not monitored.
    pub fn count<Q>(&self, item: &Q) -> Option<u64>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(item).map(|element| element.count)
    }

    /// Error bound of `item`'s count, `None` if it is not monitored.
    pub fn error<Q>(&self, item: &Q) -> Option<u64>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(item).map(|element| element.error)
    }

    /// All monitored items, in no particular order.
    pub fn frequencies(&self) -> impl ExactSizeIterator<Item = Element<'_, T>> + '_ {
        self.index
            .iter()
            .map(|(item, count, error)| Element::new(item, count, error))
    }

    /// All monitored items by count descending.
    ///
    /// Items with equal counts are listed in the order they reached that
    /// count, which is also the order they would be evicted in.
    pub fn sorted_frequencies(&self) -> Vec<Element<'_, T>> {
        self.index
            .iter_desc()
            .map(|(item, count, error)| Element::new(item, count, error))
            .collect()
    }

    /// The leading items of [`sorted_frequencies`](Self::sorted_frequencies)
    /// whose rank is certain.
    ///
    /// An item qualifies when its guaranteed count is still strictly above
    /// the count of the next item in the sorted list. The last item has no
    /// successor to compare against and is never included.
    pub fn most_frequents(&self) -> Vec<Element<'_, T>> {
        self.sorted_frequencies()
            .windows(2)
            .filter(|pair| pair[0].guaranteed() > pair[1].count)
            .map(|pair| pair[0])
            .collect()
    }
}

impl<T: Hash + Eq + Clone + fmt::Display> fmt::Display for StreamSummary<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, element) in self.sorted_frequencies().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", element)?;
        }
        write!(f, "}}")
    }
}

impl<T: Hash + Eq + Clone + fmt::Debug> fmt::Debug for StreamSummary<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamSummary")
            .field("capacity", &self.capacity())
            .field("stream_len", &self.stream_len)
            .field("elements", &self.sorted_frequencies())
            .finish()
    }
}

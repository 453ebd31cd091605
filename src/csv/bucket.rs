//! Append-only chunked storage
//!
//! Items live in fixed-capacity buckets so that appending never moves
//! items already stored; only the last bucket accepts new items.

use std::collections::TryReserveError;

/// Number of items held by one bucket
pub const BUCKET_CAPACITY: usize = 1000;

#[derive(Debug, Clone)]
pub struct BucketList<T> {
    buckets: Vec<Vec<T>>,
    len: usize,
}

impl<T> Default for BucketList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BucketList<T> {
    pub fn new() -> Self {
        Self {
            buckets: Vec::new(),
            len: 0,
        }
    }

    /// Append an item, opening a new bucket when the last one is full.
    pub fn push(&mut self, item: T) -> Result<(), TryReserveError> {
        let needs_bucket = self
            .buckets
            .last()
            .map_or(true, |bucket| bucket.len() == BUCKET_CAPACITY);

        if needs_bucket {
            let mut bucket = Vec::new();
            bucket.try_reserve_exact(BUCKET_CAPACITY)?;
            self.buckets.try_reserve(1)?;
            self.buckets.push(bucket);
            tracing::trace!(buckets = self.buckets.len(), "opened new bucket");
        }

        if let Some(bucket) = self.buckets.last_mut() {
            bucket.push(item);
            self.len += 1;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Item at `index`, in insertion order
    pub fn get(&self, index: usize) -> Option<&T> {
        self.buckets
            .get(index / BUCKET_CAPACITY)
            .and_then(|bucket| bucket.get(index % BUCKET_CAPACITY))
    }

    pub fn last(&self) -> Option<&T> {
        self.buckets.last().and_then(|bucket| bucket.last())
    }

    /// Forward traversal across bucket boundaries; restartable by calling again.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.buckets.iter().flatten()
    }
}

impl<T> IntoIterator for BucketList<T> {
    type Item = T;
    type IntoIter = std::iter::Flatten<std::vec::IntoIter<Vec<T>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.into_iter().flatten()
    }
}

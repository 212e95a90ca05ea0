use std::fmt;
use crate::error::SortError;
use crate::key::BucketKey;

/// The per-bucket sequences of one sort invocation.
///
/// Storage is released when the store is dropped, so an early return on any
/// error path frees every bucket.
pub struct BucketStore<T> {
    buckets: Vec<Vec<T>>,
}

impl<T> BucketStore<T> {
    /// Allocates `bucket_count` empty buckets, each pre-sized for an even share of
    /// `expected_len` elements.
    pub fn with_capacity(bucket_count: usize, expected_len: usize) -> Result<Self, SortError> {
        let mut buckets: Vec<Vec<T>> = Vec::new();
        buckets
            .try_reserve_exact(bucket_count)
            .map_err(|_| SortError::AllocationFailure { requested: bucket_count })?;

        let share = expected_len.div_ceil(bucket_count.max(1));
        for _ in 0..bucket_count {
            let mut bucket = Vec::new();
            bucket
                .try_reserve(share)
                .map_err(|_| SortError::AllocationFailure { requested: share })?;
            buckets.push(bucket);
        }

        Ok(Self { buckets })
    }

    #[inline]
    pub fn push(&mut self, bucket: usize, value: T) {
        self.buckets[bucket].push(value);
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn bucket(&self, idx: usize) -> &[T] {
        &self.buckets[idx]
    }

    pub fn iter(&self) -> impl Iterator<Item = &[T]> {
        self.buckets.iter().map(Vec::as_slice)
    }

    pub fn buckets_mut(&mut self) -> &mut [Vec<T>] {
        &mut self.buckets
    }

    pub fn total_len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.buckets.iter().map(Vec::len).collect()
    }
}

impl<T: BucketKey> fmt::Display for BucketStore<T> {
    /// One line per bucket, keys in zero-padded hex so range boundaries are easy to read.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, bucket) in self.buckets.iter().enumerate() {
            write!(f, "bucket {}:", i)?;
            for key in bucket {
                write!(f, " {:0width$x}", key, width = T::HEX_WIDTH)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

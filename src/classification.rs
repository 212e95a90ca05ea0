use log::debug;
use crate::buckets::BucketStore;
use crate::error::SortError;
use crate::key::BucketKey;

/// Maps keys onto `bucket_count` equally wide ranges of the key domain.
#[derive(Debug, Clone, Copy)]
pub struct RangePartitioner<T> {
    divisor: T,
    bucket_count: usize,
}

impl<T: BucketKey> RangePartitioner<T> {
    pub fn new(bucket_count: usize) -> Result<Self, SortError> {
        if bucket_count == 0 {
            return Err(SortError::ZeroBuckets);
        }
        let divisor = T::range_divisor(bucket_count).ok_or(SortError::BucketsExceedDomain {
            buckets: bucket_count,
            domain_max: T::domain_max(),
        })?;
        Ok(Self { divisor, bucket_count })
    }

    pub fn bucket_count(&self) -> usize {
        self.bucket_count
    }

    /// Keys at the very top of the domain round past the last range and are clamped into it.
    #[inline]
    pub fn find_bucket(&self, key: T) -> usize {
        key.range_index(self.divisor).min(self.bucket_count - 1)
    }

    pub fn classify(&self, arr: &[T], store: &mut BucketStore<T>) {
        debug_assert_eq!(store.len(), self.bucket_count);
        for &key in arr {
            store.push(self.find_bucket(key), key);
        }
        debug!("Classified {} elements into {} buckets", arr.len(), self.bucket_count);
    }
}

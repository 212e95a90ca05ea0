use crate::config::{advise_thread_count, SortConfig, DEFAULT_BUCKET_COUNT};
use crate::error::SortError;
use crate::key::BucketKey;
use crate::sorter::{BucketSorter, SortStats};

/// Sorts `arr` in place with `bucket_count` value ranges spread over `thread_count` workers.
///
/// Both counts must be at least 1. On error the contents of `arr` are unchanged.
pub fn bucket_sort<T: BucketKey>(arr: &mut [T], bucket_count: usize, thread_count: usize) -> Result<SortStats, SortError> {
    let config = SortConfig::new(bucket_count, thread_count)?;
    BucketSorter::new(config)?.sort(arr)
}

pub fn is_sorted<T: Ord>(arr: &[T]) -> bool {
    first_unsorted(arr).is_none()
}

/// Index `i` of the first pair with `arr[i] > arr[i + 1]`.
pub fn first_unsorted<T: Ord>(arr: &[T]) -> Option<usize> {
    arr.windows(2).position(|w| w[0] > w[1])
}

pub struct BucketSortBuilder<'a, T> {
    data: &'a mut [T],
    buckets: usize,
    threads: Option<usize>,
}

impl<'a, T: BucketKey> BucketSortBuilder<'a, T> {
    pub(crate) fn new(data: &'a mut [T]) -> Self {
        Self {
            data,
            buckets: DEFAULT_BUCKET_COUNT,
            threads: None,
        }
    }

    pub fn with_buckets(mut self, buckets: usize) -> Self {
        self.buckets = buckets;

        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);

        self
    }

    pub fn with_single_threading(mut self) -> Self {
        self.threads = Some(1);

        self
    }

    /// Thread count picked from the hardware and the bucket count.
    pub fn with_multi_threading(mut self) -> Self {
        self.threads = None;

        self
    }

    pub fn sort(self) -> Result<SortStats, SortError> {
        let threads = self.threads.unwrap_or_else(|| advise_thread_count(self.buckets));
        bucket_sort(self.data, self.buckets, threads)
    }
}

pub trait BucketSort<T> {
    /// Sorts with the default bucket count and advised thread count.
    fn bucket_sort_unstable(&mut self) -> Result<SortStats, SortError>;

    fn bucket_sort_builder(&mut self) -> BucketSortBuilder<'_, T>;
}

impl<T: BucketKey> BucketSort<T> for [T] {
    fn bucket_sort_unstable(&mut self) -> Result<SortStats, SortError> {
        self.bucket_sort_builder().sort()
    }

    fn bucket_sort_builder(&mut self) -> BucketSortBuilder<'_, T> {
        BucketSortBuilder::new(self)
    }
}

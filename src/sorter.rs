use std::time::Instant;
use log::{debug, log_enabled, trace, Level};
use crate::buckets::BucketStore;
use crate::classification::RangePartitioner;
use crate::cleanup::reassemble;
use crate::config::{SortConfig, DEBUG_DUMP_LIMIT};
use crate::dispatcher::WorkDispatcher;
use crate::error::SortError;
use crate::key::BucketKey;
use crate::parallel::{WorkerPool, WorkerReport};
use crate::quicksort;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortStats {
    pub bucket_count: usize,
    pub thread_count: usize,
    /// Elements per bucket after classification. Empty when the input had fewer than two elements.
    pub bucket_sizes: Vec<usize>,
    pub workers: Vec<WorkerReport>,
}

impl SortStats {
    fn untouched(bucket_count: usize, thread_count: usize) -> Self {
        Self {
            bucket_count,
            thread_count,
            bucket_sizes: Vec::new(),
            workers: Vec::new(),
        }
    }

    pub fn empty_buckets(&self) -> usize {
        self.bucket_sizes.iter().filter(|&&n| n == 0).count()
    }

    pub fn largest_bucket(&self) -> usize {
        self.bucket_sizes.iter().copied().max().unwrap_or(0)
    }

    pub fn buckets_sorted(&self) -> usize {
        self.workers.iter().map(|w| w.buckets).sum()
    }
}

/// One configured bucket sort. Holds no state between calls, so a single
/// sorter can be shared and several can run at the same time.
#[derive(Debug)]
pub struct BucketSorter<T> {
    config: SortConfig,
    partitioner: RangePartitioner<T>,
    pool: WorkerPool,
}

impl<T: BucketKey> BucketSorter<T> {
    /// Buckets are the unit of work, so the pool never gets more threads than there are buckets.
    pub fn new(config: SortConfig) -> Result<Self, SortError> {
        Ok(Self {
            partitioner: RangePartitioner::new(config.bucket_count)?,
            pool: WorkerPool::new(config.thread_count.min(config.bucket_count))?,
            config,
        })
    }

    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    pub fn sort(&self, arr: &mut [T]) -> Result<SortStats, SortError> {
        self.sort_with(arr, quicksort::sort::<T>)
    }

    /// Like `sort`, with `sort_bucket` applied to each bucket instead of the built-in quicksort.
    pub fn sort_with<F>(&self, arr: &mut [T], sort_bucket: F) -> Result<SortStats, SortError>
    where
        F: Fn(&mut [T]) + Sync,
    {
        if arr.len() <= 1 {
            return Ok(SortStats::untouched(self.config.bucket_count, self.pool.threads()));
        }

        let dump = arr.len() <= DEBUG_DUMP_LIMIT && log_enabled!(Level::Trace);
        if dump {
            trace!("Input: {}", hex_line(arr));
        }

        debug!(
            "Bucket sort of {} elements, {} buckets, {} threads",
            arr.len(),
            self.config.bucket_count,
            self.pool.threads()
        );

        // Step 1: classification
        let start = Instant::now();
        let mut store = BucketStore::with_capacity(self.config.bucket_count, arr.len())?;
        self.partitioner.classify(arr, &mut store);
        let bucket_sizes = store.sizes();
        trace!("Classification took {:?}", start.elapsed());
        if dump {
            trace!("Buckets after classification:\n{}", store);
        }

        // Step 2: sort buckets in parallel
        let start = Instant::now();
        let workers = {
            let dispatcher = WorkDispatcher::new(store.buckets_mut());
            self.pool.run(&dispatcher, sort_bucket)?
        };
        trace!("Parallel phase took {:?}", start.elapsed());
        if dump {
            trace!("Buckets after sorting:\n{}", store);
        }

        // Step 3: reassembly
        let start = Instant::now();
        reassemble(arr, &store)?;
        trace!("Reassembly took {:?}", start.elapsed());
        if dump {
            trace!("Output: {}", hex_line(arr));
        }

        debug!("Workers: {:?}", workers);

        Ok(SortStats {
            bucket_count: self.config.bucket_count,
            thread_count: self.pool.threads(),
            bucket_sizes,
            workers,
        })
    }
}

fn hex_line<T: BucketKey>(arr: &[T]) -> String {
    arr.iter()
        .map(|key| format!("{:0width$x}", key, width = T::HEX_WIDTH))
        .collect::<Vec<_>>()
        .join(" ")
}

use once_cell::sync::Lazy;
use crate::error::SortError;

/// Ranges of at most this many elements are finished with insertion sort.
pub const INSERTION_THRESHOLD: usize = 16;
/// Buffers up to this length get their buckets dumped at trace level.
pub const DEBUG_DUMP_LIMIT: usize = 100;
pub const DEFAULT_BUCKET_COUNT: usize = 64;
/// Worker count forced on single-core machines so the parallel path still runs.
pub const SINGLE_CORE_THREADS: usize = 2;

const _: () = {
    assert!(INSERTION_THRESHOLD >= 2, "INSERTION_THRESHOLD must be at least 2");
    assert!(DEFAULT_BUCKET_COUNT > 0, "DEFAULT_BUCKET_COUNT must be positive");
    assert!(SINGLE_CORE_THREADS > 1, "SINGLE_CORE_THREADS must keep more than one worker");
};

static HARDWARE_THREADS: Lazy<usize> = Lazy::new(|| num_cpus::get().max(1));

pub fn hardware_threads() -> usize {
    *HARDWARE_THREADS
}

/// Picks a worker count for `bucket_count` buckets on this machine.
pub fn advise_thread_count(bucket_count: usize) -> usize {
    advise_thread_count_for(bucket_count, hardware_threads())
}

pub fn advise_thread_count_for(bucket_count: usize, hardware: usize) -> usize {
    let hardware = hardware.max(1);
    if hardware == 1 && bucket_count > 1 {
        SINGLE_CORE_THREADS
    } else if bucket_count < hardware {
        bucket_count.max(1)
    } else {
        hardware
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    pub bucket_count: usize,
    pub thread_count: usize,
}

impl SortConfig {
    pub fn new(bucket_count: usize, thread_count: usize) -> Result<Self, SortError> {
        if bucket_count == 0 {
            return Err(SortError::ZeroBuckets);
        }
        if thread_count == 0 {
            return Err(SortError::ZeroThreads);
        }
        Ok(Self { bucket_count, thread_count })
    }

    pub fn advised(bucket_count: usize) -> Result<Self, SortError> {
        Self::new(bucket_count, advise_thread_count(bucket_count))
    }
}

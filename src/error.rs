use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    ZeroBuckets,
    ZeroThreads,
    /// `T::MAX / buckets` is zero, so the partition formula has no valid divisor.
    BucketsExceedDomain { buckets: usize, domain_max: u128 },
    AllocationFailure { requested: usize },
    ThreadPool(String),
    WorkerFailure { worker: usize, bucket: usize, message: String },
    ElementCountMismatch { expected: usize, found: usize },
}

impl fmt::Display for SortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortError::ZeroBuckets => write!(f, "bucket count must be at least 1"),
            SortError::ZeroThreads => write!(f, "thread count must be at least 1"),
            SortError::BucketsExceedDomain { buckets, domain_max } => write!(
                f,
                "{} buckets exceed the key domain (max key {:#x}); divisor would be 0",
                buckets, domain_max
            ),
            SortError::AllocationFailure { requested } => {
                write!(f, "could not reserve {} elements of bucket storage", requested)
            }
            SortError::ThreadPool(msg) => write!(f, "could not start worker threads: {}", msg),
            SortError::WorkerFailure { worker, bucket, message } => write!(
                f,
                "worker {} failed while sorting bucket {}: {}",
                worker, bucket, message
            ),
            SortError::ElementCountMismatch { expected, found } => write!(
                f,
                "buckets hold {} elements but the buffer holds {}",
                found, expected
            ),
        }
    }
}

impl Error for SortError {}

impl SortError {
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SortError::ZeroBuckets | SortError::ZeroThreads | SortError::BucketsExceedDomain { .. }
        )
    }
}

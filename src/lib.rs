pub mod sort;
mod base_case;
mod buckets;
mod classification;
mod cleanup;
mod config;
mod dispatcher;
mod error;
mod key;
mod parallel;
pub mod quicksort;
mod sorter;

pub use sort::{bucket_sort, first_unsorted, is_sorted, BucketSort, BucketSortBuilder};
pub use buckets::BucketStore;
pub use classification::RangePartitioner;
pub use cleanup::reassemble;
pub use config::{advise_thread_count, advise_thread_count_for, hardware_threads, SortConfig, DEBUG_DUMP_LIMIT, DEFAULT_BUCKET_COUNT, INSERTION_THRESHOLD};
pub use dispatcher::{Claim, WorkDispatcher};
pub use error::SortError;
pub use key::BucketKey;
pub use parallel::{WorkerPool, WorkerReport};
pub use sorter::{BucketSorter, SortStats};

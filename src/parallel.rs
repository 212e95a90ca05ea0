use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use crossbeam_channel::unbounded;
use log::{debug, error, trace};
use rayon::ThreadPoolBuilder;
use crate::dispatcher::{Claim, WorkDispatcher};
use crate::error::SortError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerReport {
    pub worker: usize,
    pub buckets: usize,
    pub elements: usize,
}

/// A fixed number of worker threads draining one `WorkDispatcher`.
#[derive(Debug)]
pub struct WorkerPool {
    threads: usize,
}

impl WorkerPool {
    pub fn new(threads: usize) -> Result<Self, SortError> {
        if threads == 0 {
            return Err(SortError::ZeroThreads);
        }
        Ok(Self { threads })
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Runs every worker to completion and blocks until all of them have exited.
    ///
    /// Never starts more workers than the dispatcher has buckets.
    ///
    /// A panic inside `sort_bucket` aborts the dispatcher, lets the other workers
    /// finish the bucket they hold, and is returned as `SortError::WorkerFailure`.
    pub fn run<T, F>(&self, dispatcher: &WorkDispatcher<'_, T>, sort_bucket: F) -> Result<Vec<WorkerReport>, SortError>
    where
        T: Send,
        F: Fn(&mut [T]) + Sync,
    {
        let workers = self.threads.min(dispatcher.total()).max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("bucket-worker-{}", i))
            .build()
            .map_err(|e| SortError::ThreadPool(e.to_string()))?;

        debug!("Starting {} workers for {} buckets", workers, dispatcher.total());

        let (tx, rx) = unbounded();
        let sort_bucket = &sort_bucket;
        pool.scope(|s| {
            for worker in 0..workers {
                let tx = tx.clone();
                s.spawn(move |_| {
                    // The receiver outlives the scope.
                    let _ = tx.send(work(worker, dispatcher, sort_bucket));
                });
            }
        });
        drop(tx);

        let mut reports = Vec::with_capacity(workers);
        let mut failure = None;
        for outcome in rx.iter() {
            match outcome {
                Ok(report) => reports.push(report),
                Err(e) => {
                    failure.get_or_insert(e);
                }
            }
        }
        if let Some(e) = failure {
            return Err(e);
        }

        reports.sort_by_key(|r| r.worker);
        debug!("All workers joined, {} of {} buckets sorted", dispatcher.claimed(), dispatcher.total());
        Ok(reports)
    }
}

fn work<T, F>(worker: usize, dispatcher: &WorkDispatcher<'_, T>, sort_bucket: &F) -> Result<WorkerReport, SortError>
where
    F: Fn(&mut [T]),
{
    let mut report = WorkerReport { worker, buckets: 0, elements: 0 };

    while let Some(Claim { index, bucket }) = dispatcher.claim_next() {
        let len = bucket.len();
        trace!("Worker {} sorting bucket {} ({} elements)", worker, index, len);

        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| sort_bucket(bucket.as_mut_slice()))) {
            dispatcher.abort();
            let message = panic_message(payload.as_ref());
            error!("Worker {} failed on bucket {}: {}", worker, index, message);
            return Err(SortError::WorkerFailure { worker, bucket: index, message });
        }

        report.buckets += 1;
        report.elements += len;
    }

    Ok(report)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buckets(n: usize) -> Vec<Vec<u32>> {
        (0..n).map(|i| (0..(i as u32 % 7) * 10).rev().collect()).collect()
    }

    #[test]
    fn sorts_every_bucket() {
        let mut data = buckets(32);
        let expected_elements: usize = data.iter().map(Vec::len).sum();
        let reports = {
            let dispatcher = WorkDispatcher::new(&mut data);
            WorkerPool::new(4).unwrap().run(&dispatcher, |b| b.sort_unstable()).unwrap()
        };

        assert!(data.iter().all(|b| b.windows(2).all(|w| w[0] <= w[1])));
        assert_eq!(reports.len(), 4);
        assert_eq!(reports.iter().map(|r| r.buckets).sum::<usize>(), 32);
        assert_eq!(reports.iter().map(|r| r.elements).sum::<usize>(), expected_elements);
        assert_eq!(reports.iter().map(|r| r.worker).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn workers_capped_at_bucket_count() {
        let mut data = buckets(2);
        let dispatcher = WorkDispatcher::new(&mut data);
        let pool = WorkerPool::new(40_000).unwrap();
        assert_eq!(pool.threads(), 40_000);
        let reports = pool.run(&dispatcher, |b| b.sort_unstable()).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports.iter().map(|r| r.buckets).sum::<usize>(), 2);
    }

    #[test]
    fn no_buckets_still_runs_one_worker() {
        let mut data: Vec<Vec<u32>> = Vec::new();
        let dispatcher = WorkDispatcher::new(&mut data);
        let reports = WorkerPool::new(8).unwrap().run(&dispatcher, |b| b.sort_unstable()).unwrap();
        assert_eq!(reports, vec![WorkerReport { worker: 0, buckets: 0, elements: 0 }]);
    }

    #[test]
    fn panicking_worker_fails_the_run() {
        let mut data = buckets(16);
        let dispatcher = WorkDispatcher::new(&mut data);
        let res = WorkerPool::new(3).unwrap().run(&dispatcher, |b| {
            if b.len() == 30 {
                panic!("bad bucket");
            }
            b.sort_unstable();
        });

        match res {
            Err(SortError::WorkerFailure { message, bucket, .. }) => {
                assert_eq!(message, "bad bucket");
                assert_eq!(bucket % 7, 3);
            }
            other => panic!("expected a worker failure, got {:?}", other),
        }
        assert!(dispatcher.is_aborted());
    }

    #[test]
    fn zero_threads_rejected() {
        assert_eq!(WorkerPool::new(0).unwrap_err(), SortError::ZeroThreads);
    }
}

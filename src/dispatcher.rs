use std::slice::IterMut;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

/// A bucket handed to exactly one worker.
pub struct Claim<'a, T> {
    pub index: usize,
    pub bucket: &'a mut Vec<T>,
}

struct Counter<'a, T> {
    next: usize,
    pending: IterMut<'a, Vec<T>>,
}

/// Hands out buckets in index order to whichever worker asks next.
///
/// The lock only covers taking the next index; the bucket itself is returned
/// as an exclusive borrow, so sorting never happens under the lock and no two
/// workers can ever see the same bucket.
pub struct WorkDispatcher<'a, T> {
    counter: Mutex<Counter<'a, T>>,
    total: usize,
    aborted: AtomicBool,
}

impl<'a, T> WorkDispatcher<'a, T> {
    pub fn new(buckets: &'a mut [Vec<T>]) -> Self {
        Self {
            total: buckets.len(),
            counter: Mutex::new(Counter {
                next: 0,
                pending: buckets.iter_mut(),
            }),
            aborted: AtomicBool::new(false),
        }
    }

    /// Returns `None` once every bucket has been claimed or the run was aborted,
    /// and keeps returning `None` from then on.
    pub fn claim_next(&self) -> Option<Claim<'a, T>> {
        if self.aborted.load(Ordering::Acquire) {
            return None;
        }

        // Nothing panics while the guard is held, a poisoned lock still has a valid counter.
        let mut counter = self.counter.lock().unwrap_or_else(PoisonError::into_inner);
        let bucket = counter.pending.next()?;
        let index = counter.next;
        counter.next += 1;

        Some(Claim { index, bucket })
    }

    pub fn abort(&self) {
        self.aborted.store(true, Ordering::Release);
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Acquire)
    }

    pub fn claimed(&self) -> usize {
        self.counter.lock().unwrap_or_else(PoisonError::into_inner).next
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn claims_in_index_order_then_none() {
        let mut buckets: Vec<Vec<u32>> = vec![vec![1], vec![], vec![3, 2]];
        let dispatcher = WorkDispatcher::new(&mut buckets);

        let indices: Vec<usize> = std::iter::from_fn(|| dispatcher.claim_next())
            .map(|claim| claim.index)
            .collect();
        assert_eq!(indices, vec![0, 1, 2]);

        assert!(dispatcher.claim_next().is_none());
        assert!(dispatcher.claim_next().is_none());
        assert_eq!(dispatcher.claimed(), 3);
    }

    #[test]
    fn claims_grant_mutable_access() {
        let mut buckets: Vec<Vec<u32>> = vec![vec![2, 1]; 4];
        {
            let dispatcher = WorkDispatcher::new(&mut buckets);
            while let Some(claim) = dispatcher.claim_next() {
                claim.bucket.push(claim.index as u32);
            }
        }
        assert_eq!(buckets[3], vec![2, 1, 3]);
    }

    #[test]
    fn concurrent_claims_cover_every_bucket_once() {
        let mut buckets: Vec<Vec<u64>> = vec![Vec::new(); 1_000];
        let dispatcher = WorkDispatcher::new(&mut buckets);

        let per_thread: Vec<Vec<usize>> = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(|| {
                        let mut mine = Vec::new();
                        while let Some(claim) = dispatcher.claim_next() {
                            mine.push(claim.index);
                        }
                        mine
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let all: Vec<usize> = per_thread.into_iter().flatten().collect();
        assert_eq!(all.len(), 1_000);
        let unique: HashSet<usize> = all.into_iter().collect();
        assert_eq!(unique, (0..1_000).collect());
    }

    #[test]
    fn abort_stops_dispatching() {
        let mut buckets: Vec<Vec<u8>> = vec![Vec::new(); 5];
        let dispatcher = WorkDispatcher::new(&mut buckets);
        assert_eq!(dispatcher.claim_next().map(|c| c.index), Some(0));
        dispatcher.abort();
        assert!(dispatcher.is_aborted());
        assert!(dispatcher.claim_next().is_none());
        assert_eq!(dispatcher.claimed(), 1);
        assert_eq!(dispatcher.total(), 5);
    }

    #[test]
    fn no_buckets() {
        let mut buckets: Vec<Vec<u8>> = Vec::new();
        let dispatcher = WorkDispatcher::new(&mut buckets);
        assert!(dispatcher.claim_next().is_none());
    }
}

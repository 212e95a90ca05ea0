//! Sequential in-place quicksort used on a single bucket.
//!
//! Lomuto partitioning with the first element as pivot. Ranges are kept on an
//! explicit stack instead of recursing, and the smaller side is always taken
//! next, so the stack never holds more than `O(log n)` ranges. After
//! `2 * floor(log2(n))` nested partition steps a range is heapsorted,
//! which caps the worst case (already sorted or reverse sorted buckets) at
//! `O(n log n)`. Short ranges are finished with insertion sort.
//!
//! Not stable.

use crate::base_case::{heapsort, insertion_sort};
use crate::config::INSERTION_THRESHOLD;

pub fn sort<T: Copy + Ord>(arr: &mut [T]) {
    if arr.len() < 2 {
        return;
    }
    let limit = 2 * (arr.len() | 1).ilog2();
    quicksort(arr, limit);
}

fn quicksort<T: Copy + Ord>(arr: &mut [T], limit: u32) {
    // (first, last, partition steps left before falling back to heapsort)
    let mut stack: Vec<(usize, usize, u32)> = Vec::with_capacity(usize::BITS as usize);
    stack.push((0, arr.len(), limit));

    while let Some((first, last, limit)) = stack.pop() {
        let v = &mut arr[first..last];
        if v.len() <= INSERTION_THRESHOLD {
            insertion_sort(v);
            continue;
        }

        if limit == 0 {
            heapsort(v);
            continue;
        }

        let pivot = first + lomuto_partition(v);

        // Pushed last, popped first.
        let left = (first, pivot, limit - 1);
        let right = (pivot + 1, last, limit - 1);
        if pivot - first < last - pivot - 1 {
            stack.push(right);
            stack.push(left);
        } else {
            stack.push(left);
            stack.push(right);
        }
    }
}

/// Returns the final position of the pivot `v[0]`; everything before it is smaller.
fn lomuto_partition<T: Copy + Ord>(v: &mut [T]) -> usize {
    let pivot = v[0];
    let mut small = 0;
    for i in 1..v.len() {
        if v[i] < pivot {
            small += 1;
            v.swap(small, i);
        }
    }
    v.swap(0, small);
    small
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn check(mut input: Vec<u32>) {
        let mut expected = input.clone();
        expected.sort_unstable();
        sort(&mut input);
        assert_eq!(input, expected);
    }

    #[test]
    fn partition_places_pivot() {
        let mut v = [5u32, 3, 3, 1, 9, 2];
        let p = lomuto_partition(&mut v);
        assert_eq!(p, 4);
        assert_eq!(v[p], 5);
        assert!(v[..p].iter().all(|&x| x < 5));
        assert!(v[p + 1..].iter().all(|&x| x >= 5));
    }

    #[test]
    fn boundary_example() {
        let mut v = vec![5u32, 3, 3, 1, 9, 2];
        sort(&mut v);
        assert_eq!(v, vec![1, 2, 3, 3, 5, 9]);
    }

    #[test]
    fn random() {
        let mut rng = StdRng::seed_from_u64(12345);
        for len in [0, 1, 2, 17, 100, 1_000, 50_000] {
            check((0..len).map(|_| rng.gen()).collect());
        }
    }

    #[test]
    fn adversarial_patterns() {
        check((0..100_000).collect());
        check((0..100_000).rev().collect());
        check(vec![7; 100_000]);
        check((0..100_000).map(|i| i % 3).collect());
    }

    #[test]
    fn heapsort_fallback_on_zero_limit() {
        let mut v: Vec<u64> = (0..1_000).rev().collect();
        quicksort(&mut v, 0);
        assert!(v.windows(2).all(|w| w[0] <= w[1]));
    }
}

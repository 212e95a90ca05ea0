pub fn insertion_sort<T: Copy + Ord>(arr: &mut [T]) {
    for j in 1..arr.len() {
        let key = arr[j];
        let mut i = j;
        while i > 0 && arr[i - 1] > key {
            arr[i] = arr[i - 1];
            i -= 1;
        }
        arr[i] = key;
    }
}

pub fn heapsort<T: Copy + Ord>(arr: &mut [T]) {
    let len = arr.len();
    if len < 2 {
        return;
    }

    for i in (0..len / 2).rev() {
        sift_down(arr, i);
    }

    for i in (1..len).rev() {
        arr.swap(0, i);
        sift_down(&mut arr[..i], 0);
    }
}

// Max-heap: parent >= child.
fn sift_down<T: Copy + Ord>(arr: &mut [T], mut node: usize) {
    let len = arr.len();
    loop {
        let mut child = 2 * node + 1;
        if child >= len {
            break;
        }
        if child + 1 < len && arr[child] < arr[child + 1] {
            child += 1;
        }
        if arr[node] >= arr[child] {
            break;
        }
        arr.swap(node, child);
        node = child;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_sort_small() {
        let mut arr = [9u32, 4, 4, 0, 7, 1];
        insertion_sort(&mut arr);
        assert_eq!(arr, [0, 1, 4, 4, 7, 9]);
    }

    #[test]
    fn heapsort_reverse() {
        let mut arr: Vec<u16> = (0..500).rev().collect();
        heapsort(&mut arr);
        assert!(arr.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(arr.len(), 500);
    }

    #[test]
    fn trivial_inputs() {
        let mut empty: [u8; 0] = [];
        insertion_sort(&mut empty);
        heapsort(&mut empty);
        let mut one = [3u8];
        insertion_sort(&mut one);
        heapsort(&mut one);
        assert_eq!(one, [3]);
    }
}

use crate::buckets::BucketStore;
use crate::error::SortError;

/// Writes the buckets back into `arr` in bucket order.
///
/// The element count is checked before anything is written, so on error `arr`
/// is left as it was.
pub fn reassemble<T: Copy>(arr: &mut [T], store: &BucketStore<T>) -> Result<(), SortError> {
    let found = store.total_len();
    if found != arr.len() {
        return Err(SortError::ElementCountMismatch { expected: arr.len(), found });
    }

    let mut dst = 0;
    for bucket in store.iter() {
        let target_slice = &mut arr[dst..dst + bucket.len()];
        target_slice.copy_from_slice(bucket);
        dst += bucket.len();
    }

    Ok(())
}

use std::fmt::{Debug, LowerHex};

/// An unsigned fixed-width integer that can be range-partitioned into buckets.
///
/// Buckets split the whole domain `0..=MAX_KEY` into equally wide ranges, so the
/// trait only needs the domain maximum and a way to divide keys by the range width.
///
/// Implemented for `u8`, `u16`, `u32`, `u64`, `u128` and `usize`.
pub trait BucketKey: Copy + Ord + Debug + LowerHex + Send + Sync {
    const MAX_KEY: Self;
    /// Number of hex digits used when dumping keys.
    const HEX_WIDTH: usize;

    /// Width of one bucket range: `MAX_KEY / buckets`, or `None` when that is zero.
    fn range_divisor(buckets: usize) -> Option<Self>;

    /// `self / divisor`, saturated to `usize`.
    fn range_index(self, divisor: Self) -> usize;

    fn domain_max() -> u128;
}

macro_rules! impl_bucket_key {
    ($($t:ty),*) => {
        $(
            impl BucketKey for $t {
                const MAX_KEY: Self = <$t>::MAX;
                const HEX_WIDTH: usize = std::mem::size_of::<$t>() * 2;

                #[inline]
                fn range_divisor(buckets: usize) -> Option<Self> {
                    let buckets = <$t>::try_from(buckets).ok()?;
                    match Self::MAX_KEY.checked_div(buckets) {
                        Some(0) | None => None,
                        divisor => divisor,
                    }
                }

                #[inline]
                fn range_index(self, divisor: Self) -> usize {
                    usize::try_from(self / divisor).unwrap_or(usize::MAX)
                }

                #[inline]
                fn domain_max() -> u128 {
                    <$t>::MAX as u128
                }
            }
        )*
    };
}

impl_bucket_key!(u8, u16, u32, u64, u128, usize);

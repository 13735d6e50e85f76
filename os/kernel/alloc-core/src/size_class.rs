//! Maps a block size to the segregated-list bin it belongs to.

use crate::config::NUM_BINS;

/// Returns the bin index for a block of `size` bytes.
///
/// Bin `i` (for `i < NUM_BINS - 1`) holds blocks of size `2^i <= size <
/// 2^(i+1)`; the last bin is a catch-all for everything at or above
/// `2^(NUM_BINS - 1)`. Equivalent to `min(NUM_BINS - 1, floor(log2(size)))`.
pub(crate) fn list_index(size: usize) -> usize {
    debug_assert!(size > 0);
    let log = usize::BITS - 1 - size.leading_zeros();
    (log as usize).min(NUM_BINS - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_sizes_map_to_low_bins() {
        assert_eq!(list_index(1), 0);
        assert_eq!(list_index(2), 1);
        assert_eq!(list_index(3), 1);
        assert_eq!(list_index(4), 2);
    }

    #[test]
    fn power_of_two_boundaries_land_in_their_own_bin() {
        for i in 0..19u32 {
            let size = 1usize << i;
            assert_eq!(list_index(size), i as usize);
            assert_eq!(list_index(size * 2 - 1), i as usize);
        }
    }

    #[test]
    fn sizes_at_or_above_the_top_boundary_saturate_to_the_last_bin() {
        assert_eq!(list_index(1 << 19), NUM_BINS - 1);
        assert_eq!(list_index(1 << 20), NUM_BINS - 1);
        assert_eq!(list_index(usize::MAX), NUM_BINS - 1);
    }

    #[test]
    fn index_is_monotonic_non_decreasing() {
        let mut prev = list_index(1);
        for size in 1..=4096 {
            let idx = list_index(size);
            assert!(idx >= prev);
            prev = idx;
        }
    }
}

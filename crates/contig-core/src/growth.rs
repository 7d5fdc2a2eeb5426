//! Capacity growth policy.
//!
//! Both containers grow by doubling, which keeps `push` amortised O(1).
//! Sized construction rounds up to a power of two so that a buffer built
//! from N elements has the same capacity as one that reached N by pushing.

/// Largest power of two representable in `usize`.
const MAX_POW2: usize = 1 << (usize::BITS - 1);

/// Smallest power of two `>= requested`.
///
/// Returns `0` for `requested == 0`; sized construction uses that as the
/// "nothing requested" sentinel. Requests above the largest representable
/// power of two saturate to it rather than overflowing.
pub fn next_capacity(requested: usize) -> usize {
    if requested == 0 {
        return 0;
    }
    requested.checked_next_power_of_two().unwrap_or(MAX_POW2)
}

/// Capacity to grow to when a buffer of `current` capacity is full.
///
/// Doubles, never returns zero (a moved-from buffer with capacity 0 grows
/// to 1), and saturates at `usize::MAX`.
pub fn grown_capacity(current: usize) -> usize {
    if current == 0 {
        return 1;
    }
    current.saturating_mul(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_sentinel() {
        assert_eq!(next_capacity(0), 0);
    }

    #[test]
    fn rounds_up_to_power_of_two() {
        assert_eq!(next_capacity(1), 1);
        assert_eq!(next_capacity(2), 2);
        assert_eq!(next_capacity(3), 4);
        assert_eq!(next_capacity(5), 8);
        assert_eq!(next_capacity(8), 8);
        assert_eq!(next_capacity(1000), 1024);
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        assert_eq!(next_capacity(usize::MAX), MAX_POW2);
        assert_eq!(grown_capacity(usize::MAX), usize::MAX);
    }

    #[test]
    fn growth_never_requests_zero() {
        assert_eq!(grown_capacity(0), 1);
        assert_eq!(grown_capacity(1), 2);
        assert_eq!(grown_capacity(15), 30);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn next_capacity_is_smallest_covering_power(n in 1usize..1 << 40) {
                let cap = next_capacity(n);
                prop_assert!(cap.is_power_of_two());
                prop_assert!(cap >= n);
                prop_assert!(cap / 2 < n);
            }

            #[test]
            fn growth_is_strictly_increasing(cap in 0usize..1 << 40) {
                prop_assert!(grown_capacity(cap) > cap);
            }
        }
    }
}

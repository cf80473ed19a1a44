//! Capacity policy and storage-transition planning.
//!
//! Everything here is pure: the functions only look at sizes and decide,
//! the actual element moves happen in [`SpillVec`](crate::SpillVec).

/// Where the live elements of a [`SpillVec`](crate::SpillVec) currently are.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    /// The fixed `N`-slot buffer embedded in the container.
    Inline,
    /// A separately allocated buffer whose capacity exceeds `N`.
    Heap,
}

/// Computes the capacity a container should have to hold `desired` elements.
///
/// - `desired <= n` fits inline, so the answer is `n`.
/// - `desired <= current` still fits in the current buffer, which is kept.
/// - Otherwise the buffer grows to `floor(3 * desired / 2)`.
///
/// # Examples
///
/// ```
/// # use spillvec::growth::decide_capacity;
/// assert_eq!(decide_capacity(3, 4, 4), 4);
/// assert_eq!(decide_capacity(5, 4, 4), 7);
/// assert_eq!(decide_capacity(6, 4, 7), 7);
/// assert_eq!(decide_capacity(8, 4, 7), 12);
/// ```
#[inline]
pub const fn decide_capacity(desired: usize, n: usize, current: usize) -> usize {
    if desired <= n {
        n
    } else if desired <= current {
        current
    } else {
        // floor(3d / 2) == d + floor(d / 2), without the intermediate overflow.
        desired.saturating_add(desired / 2)
    }
}

/// What a size change requires from the storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Transition {
    /// The active buffer keeps serving; elements are shifted in place.
    Stay,
    /// Inline buffer overflows, move everything into a new heap buffer.
    Promote { capacity: usize },
    /// Heap buffer is too small, move into a larger one.
    Grow { capacity: usize },
    /// Few enough elements remain to fit inline, release the heap buffer.
    Demote,
}

/// Decides the transition needed to go to `new_len` live elements.
///
/// `capacity` is the capacity of the currently active storage.
#[inline]
pub(crate) const fn plan(location: Location, capacity: usize, new_len: usize, n: usize) -> Transition {
    match location {
        Location::Inline => {
            if new_len <= n {
                Transition::Stay
            } else {
                Transition::Promote {
                    capacity: decide_capacity(new_len, n, n),
                }
            }
        }
        Location::Heap => {
            if new_len <= n {
                Transition::Demote
            } else if new_len > capacity {
                Transition::Grow {
                    capacity: decide_capacity(new_len, n, capacity),
                }
            } else {
                Transition::Stay
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_fits_inline() {
        for desired in 0..=16 {
            assert_eq!(decide_capacity(desired, 16, 16), 16);
        }
        // The current capacity does not matter while it fits inline.
        assert_eq!(decide_capacity(3, 4, 100), 4);
    }

    #[test]
    fn capacity_keeps_large_enough_buffer() {
        assert_eq!(decide_capacity(7, 4, 7), 7);
        assert_eq!(decide_capacity(20, 16, 30), 30);
    }

    #[test]
    fn capacity_grows_by_half() {
        assert_eq!(decide_capacity(5, 4, 4), 7);
        assert_eq!(decide_capacity(17, 16, 16), 25);
        assert_eq!(decide_capacity(1, 0, 0), 1);
        assert_eq!(decide_capacity(2, 0, 1), 3);
        assert_eq!(decide_capacity(usize::MAX, 4, 4), usize::MAX);
    }

    #[test]
    fn capacity_always_holds_desired() {
        let mut cap = 4;
        for desired in 0..1000 {
            cap = decide_capacity(desired, 4, cap);
            assert!(cap >= desired);
            assert!(cap >= 4);
        }
    }

    #[test]
    fn plan_inline() {
        assert_eq!(plan(Location::Inline, 4, 0, 4), Transition::Stay);
        assert_eq!(plan(Location::Inline, 4, 4, 4), Transition::Stay);
        assert_eq!(
            plan(Location::Inline, 4, 5, 4),
            Transition::Promote { capacity: 7 }
        );
        assert_eq!(
            plan(Location::Inline, 4, 10, 4),
            Transition::Promote { capacity: 15 }
        );
    }

    #[test]
    fn plan_heap() {
        assert_eq!(plan(Location::Heap, 7, 4, 4), Transition::Demote);
        assert_eq!(plan(Location::Heap, 7, 0, 4), Transition::Demote);
        assert_eq!(plan(Location::Heap, 7, 5, 4), Transition::Stay);
        assert_eq!(plan(Location::Heap, 7, 7, 4), Transition::Stay);
        assert_eq!(plan(Location::Heap, 7, 8, 4), Transition::Grow { capacity: 12 });
    }
}

/// Returned by the checked accessors when the index is not below the length.
///
/// # Examples
///
/// ```
/// # use spillvec::{spillvec, SpillVec, OutOfRange};
/// let vec: SpillVec<i32, 4> = spillvec![1, 2, 3];
/// assert_eq!(vec.at(3), Err(OutOfRange { index: 3, len: 3 }));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[error("index {index} out of range for length {len}")]
pub struct OutOfRange {
    /// The offending index.
    pub index: usize,
    /// The length of the vector at the time of access.
    pub len: usize,
}

#[cfg(test)]
mod tests {
    use super::OutOfRange;
    use alloc::string::ToString;

    #[test]
    fn display_names_index() {
        let err = OutOfRange { index: 9, len: 2 };
        assert_eq!(err.to_string(), "index 9 out of range for length 2");
    }

    #[test]
    fn is_core_error() {
        fn assert_error<E: core::error::Error>(_: &E) {}
        assert_error(&OutOfRange { index: 0, len: 0 });
    }
}

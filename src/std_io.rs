extern crate std;

use std::io::{IoSlice, Write};

use crate::SpillVec;

/// Write is implemented for `SpillVec<u8, N>` by appending to the vector.
///
/// Each call moves storage at most once, the whole buffer is inserted in one go.
impl<const N: usize> Write for SpillVec<u8, N> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let len = self.len();
        self.insert_from(len, buf.iter().copied());
        Ok(buf.len())
    }

    #[inline]
    fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> std::io::Result<usize> {
        let len = self.len();
        let num = bufs.iter().map(|b| b.len()).sum::<usize>();
        self.insert_from(len, bufs.iter().flat_map(|b| b.iter().copied()));
        Ok(num)
    }

    #[inline(always)]
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{IoSlice, SpillVec, Write};

    #[test]
    fn write_and_vectored() {
        let mut v: SpillVec<u8, 4> = SpillVec::new();

        let n = v.write(b"hello").unwrap();
        assert_eq!(n, 5);
        assert_eq!(v.len(), 5);
        assert_eq!(v, b"hello");
        assert_eq!(v.capacity(), 7);

        let bufs = [IoSlice::new(b" "), IoSlice::new(b"world")];
        let n = v.write_vectored(&bufs).unwrap();
        assert_eq!(n, 6);
        assert_eq!(v, b"hello world");
    }

    #[test]
    fn small_writes_stay_inline() {
        let mut v: SpillVec<u8, 8> = SpillVec::new();
        write!(v, "{}-{}", 12, 34).unwrap();
        assert_eq!(v, b"12-34");
        assert!(v.is_inline());
    }

    #[test]
    fn write_all_grows() {
        let mut v: SpillVec<u8, 3> = SpillVec::new();
        let data = [b'x'; 257];
        v.write_all(&data).unwrap();
        v.flush().unwrap();
        assert_eq!(v.len(), 257);
        assert!(v.iter().all(|&c| c == b'x'));
    }
}

use core::{
    fmt,
    iter::FusedIterator,
    mem::{ManuallyDrop, MaybeUninit},
    ptr, slice,
};

/// A fixed-capacity vector whose `N` slots live inside the value itself.
///
/// This is the inline storage of [`SpillVec`](crate::SpillVec). It can be used
/// on its own when the maximum length is known in advance.
///
/// # Panics
/// Any operation that would make `len > N`.
///
/// # Examples
///
/// ```
/// use spillvec::StackVec;
///
/// let mut vec: StackVec<String, 4> = StackVec::new();
/// assert_eq!(vec.capacity(), 4);
///
/// vec.push("Hello".to_string());
/// vec.push("world".to_string());
/// assert_eq!(vec, ["Hello", "world"]);
/// assert_eq!(vec.pop().as_deref(), Some("world"));
/// ```
pub struct StackVec<T, const N: usize> {
    data: [MaybeUninit<T>; N],
    len: usize,
}

impl<T, const N: usize> Drop for StackVec<T, N> {
    // Slots are `MaybeUninit`, so the live prefix is dropped by hand.
    fn drop(&mut self) {
        if self.len > 0 {
            // SAFETY: the first `len` slots are initialized.
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.as_mut_ptr(), self.len));
            }
        }
    }
}

impl<T, const N: usize> StackVec<T, N> {
    /// Constructs a new, empty `StackVec`.
    ///
    /// The whole buffer is part of the value, so `N` should stay small
    /// enough not to overflow the stack.
    #[inline]
    pub const fn new() -> Self {
        Self {
            data: [const { MaybeUninit::uninit() }; N],
            len: 0,
        }
    }

    /// Returns a raw pointer to the buffer.
    ///
    /// The pointer is only valid while the `StackVec` is not moved.
    #[inline(always)]
    pub const fn as_ptr(&self) -> *const T {
        self.data.as_ptr().cast()
    }

    /// Returns a raw mutable pointer to the buffer.
    ///
    /// The pointer is only valid while the `StackVec` is not moved.
    #[inline(always)]
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr().cast()
    }

    /// Forces the length of the vector to `new_len`.
    ///
    /// # Safety
    /// - `new_len <= N`.
    /// - The first `new_len` slots must be initialized.
    /// - Elements cut off by a shorter length are no longer dropped by the vector.
    #[inline(always)]
    pub const unsafe fn set_len(&mut self, new_len: usize) {
        debug_assert!(new_len <= N);
        self.len = new_len;
    }

    /// Returns the number of elements in the vector.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the vector contains no elements.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if `len == N`.
    #[inline(always)]
    pub const fn is_full(&self) -> bool {
        self.len >= N
    }

    /// Always `N`.
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Appends an element to the back of the vector.
    ///
    /// # Panics
    /// Panics if the vector is full.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::StackVec;
    /// let mut vec = StackVec::<i32, 2>::new();
    /// vec.push(1);
    /// vec.push(2);
    /// assert!(vec.is_full());
    /// ```
    #[inline]
    pub fn push(&mut self, value: T) {
        assert!(self.len < N, "length overflow during `push`");
        // SAFETY: len < N.
        unsafe { ptr::write(self.as_mut_ptr().add(self.len), value) };
        self.len += 1;
    }

    /// Removes the last element and returns it, or `None` if empty.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot at the old `len - 1` is initialized and now outside the live prefix.
        Some(unsafe { ptr::read(self.as_ptr().add(self.len)) })
    }

    /// Keeps the first `len` elements and drops the rest.
    ///
    /// Has no effect if `len >= self.len()`.
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        if len < self.len {
            let tail = self.len - len;
            // Shrink first so a panicking destructor leaks instead of double dropping.
            self.len = len;
            // SAFETY: `len..len + tail` was the initialized tail.
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.as_mut_ptr().add(len), tail));
            }
        }
    }

    /// Drops every element.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Extracts a slice of the live elements.
    #[inline]
    pub const fn as_slice(&self) -> &[T] {
        // SAFETY: the first `len` slots are initialized.
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    /// Extracts a mutable slice of the live elements.
    #[inline]
    pub const fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: the first `len` slots are initialized.
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }
}

impl<T, const N: usize> Default for StackVec<T, N> {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const N: usize> Clone for StackVec<T, N> {
    fn clone(&self) -> Self {
        let mut vec = Self::new();
        for item in self.as_slice() {
            vec.push(item.clone());
        }
        vec
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        for item in source.as_slice() {
            self.push(item.clone());
        }
    }
}

crate::utils::impl_slice_traits!(StackVec<T, N>);

impl<T, U, const N: usize, const P: usize> PartialEq<StackVec<U, P>> for StackVec<T, N>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &StackVec<U, P>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, const N: usize> IntoIterator for StackVec<T, N> {
    type Item = T;
    type IntoIter = IntoIter<T, N>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        let end = self.len;
        IntoIter {
            vec: ManuallyDrop::new(self),
            start: 0,
            end,
        }
    }
}

/// An iterator that consumes a [`StackVec`] and yields its items by value.
pub struct IntoIter<T, const N: usize> {
    vec: ManuallyDrop<StackVec<T, N>>,
    start: usize,
    end: usize,
}

impl<T, const N: usize> IntoIter<T, N> {
    /// The elements not yielded yet.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `start..end` are the initialized, not yet yielded slots.
        unsafe { slice::from_raw_parts(self.vec.as_ptr().add(self.start), self.end - self.start) }
    }
}

impl<T, const N: usize> Iterator for IntoIter<T, N> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.start += 1;
        // SAFETY: the slot is initialized and is read exactly once.
        Some(unsafe { ptr::read(self.vec.as_ptr().add(self.start - 1)) })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.start;
        (n, Some(n))
    }
}

impl<T, const N: usize> DoubleEndedIterator for IntoIter<T, N> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: the slot is initialized and is read exactly once.
        Some(unsafe { ptr::read(self.vec.as_ptr().add(self.end)) })
    }
}

impl<T, const N: usize> ExactSizeIterator for IntoIter<T, N> {}

impl<T, const N: usize> FusedIterator for IntoIter<T, N> {}

impl<T, const N: usize> Drop for IntoIter<T, N> {
    fn drop(&mut self) {
        let rest = ptr::slice_from_raw_parts_mut(
            // SAFETY: in bounds of the buffer.
            unsafe { self.vec.as_mut_ptr().add(self.start) },
            self.end - self.start,
        );
        // SAFETY: only the not yet yielded elements are dropped.
        unsafe { ptr::drop_in_place(rest) };
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for IntoIter<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

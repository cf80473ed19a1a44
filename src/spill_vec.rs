use alloc::vec::Vec;
use core::{fmt, iter::FusedIterator, mem::ManuallyDrop, ptr, slice};

use crate::{
    OutOfRange, StackVec,
    growth::{self, Location, Transition},
    utils::normalize_range,
};

enum Storage<T, const N: usize> {
    Inline(StackVec<T, N>),
    Heap(Vec<T>),
}

/// A vector that keeps up to `N` elements inline and spills to the heap beyond that.
///
/// The storage follows the length on every size-changing call:
///
/// - while `len <= N` the elements live in an inline buffer and `capacity() == N`;
/// - once `len > N` they move to a heap buffer sized by
///   [`decide_capacity`](crate::growth::decide_capacity) (1.5x growth);
/// - as soon as `len` falls back to `N` or below, they move back inline and the
///   heap buffer is released.
///
/// Any such move invalidates raw pointers obtained from [`as_ptr`](SpillVec::as_ptr).
///
/// # Examples
///
/// ```
/// use spillvec::{SpillVec, Location};
///
/// let mut vec: SpillVec<i32, 4> = SpillVec::new();
/// vec.extend([1, 2, 3, 4]);
/// assert_eq!(vec.capacity(), 4);
/// assert!(vec.is_inline());
///
/// vec.push(5);
/// assert_eq!(vec.capacity(), 7);
/// assert_eq!(vec.location(), Location::Heap);
///
/// vec.pop();
/// assert_eq!(vec.capacity(), 4);
/// assert!(vec.is_inline());
/// assert_eq!(vec, [1, 2, 3, 4]);
/// ```
#[repr(transparent)]
pub struct SpillVec<T, const N: usize = 16>(Storage<T, N>);

/// One size change: `removed` elements at `at` give way to the incoming ones.
///
/// `len` is the number of slots occupied before the change, removed span included.
#[derive(Clone, Copy, Debug)]
struct Splice {
    len: usize,
    at: usize,
    removed: usize,
}

/// Moves `src[..at]`, `incoming` and `src[at + removed..][..tail]` into `dst`, in that order.
///
/// With `src == dst` the suffix is shifted in place and the prefix is left alone.
///
/// # Safety
/// - `dst` has room for `at + incoming.len() + tail` elements.
/// - `incoming` does not overlap either buffer and is not used by the caller afterwards.
/// - The removed span of `src` holds no live value.
#[inline]
unsafe fn move_segments<T>(
    src: *mut T,
    dst: *mut T,
    at: usize,
    removed: usize,
    tail: usize,
    incoming: &[T],
) {
    unsafe {
        if !ptr::eq(src, dst) {
            ptr::copy_nonoverlapping(src, dst, at);
        }
        ptr::copy(src.add(at + removed), dst.add(at + incoming.len()), tail);
        ptr::copy_nonoverlapping(incoming.as_ptr(), dst.add(at), incoming.len());
    }
}

/// Creates a [`SpillVec`] containing the arguments.
///
/// The syntax is the one of [`vec!`](https://doc.rust-lang.org/std/macro.vec.html).
/// More than `N` elements start out on the heap.
///
/// # Examples
///
/// ```
/// # use spillvec::{spillvec, SpillVec};
/// let vec: SpillVec<String, 4> = spillvec![];
/// let vec: SpillVec<i64, 4> = spillvec![1; 3]; // Needs `Clone`.
/// let vec: SpillVec<_, 4> = spillvec![1, 2, 3, 4, 5];
/// assert!(!vec.is_inline());
/// ```
#[macro_export]
macro_rules! spillvec {
    [] => { $crate::SpillVec::new() };
    [$elem:expr; $n:expr] => { $crate::SpillVec::from_elem($elem, $n) };
    [$($item:expr),+ $(,)?] => { $crate::SpillVec::from([ $($item),+ ]) };
}

impl<T, const N: usize> SpillVec<T, N> {
    /// Constructs a new, empty `SpillVec` with inline storage.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::SpillVec;
    /// let vec: SpillVec<u8> = SpillVec::new();
    /// assert_eq!(vec.capacity(), 16);
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self(Storage::Inline(StackVec::new()))
    }

    /// Returns where the elements currently live.
    #[inline]
    pub fn location(&self) -> Location {
        match &self.0 {
            Storage::Inline(_) => Location::Inline,
            Storage::Heap(_) => Location::Heap,
        }
    }

    /// Returns `true` if the elements are stored inline.
    #[inline(always)]
    pub fn is_inline(&self) -> bool {
        matches!(self.0, Storage::Inline(_))
    }

    /// Returns the number of elements in the vector.
    #[inline]
    pub fn len(&self) -> usize {
        match &self.0 {
            Storage::Inline(vec) => vec.len(),
            Storage::Heap(vec) => vec.len(),
        }
    }

    /// Returns `true` if the vector contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of slots of the active storage.
    ///
    /// This is `N` while inline and always greater than `N` on the heap.
    #[inline]
    pub fn capacity(&self) -> usize {
        match &self.0 {
            Storage::Inline(vec) => vec.capacity(),
            Storage::Heap(vec) => vec.capacity(),
        }
    }

    /// Returns a raw pointer to the active buffer.
    ///
    /// Any call that changes the length may move the elements and leave this pointer dangling.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        match &self.0 {
            Storage::Inline(vec) => vec.as_ptr(),
            Storage::Heap(vec) => vec.as_ptr(),
        }
    }

    /// Returns a raw mutable pointer to the active buffer.
    ///
    /// Any call that changes the length may move the elements and leave this pointer dangling.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        match &mut self.0 {
            Storage::Inline(vec) => vec.as_mut_ptr(),
            Storage::Heap(vec) => vec.as_mut_ptr(),
        }
    }

    /// Extracts a slice containing the entire vector.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        match &self.0 {
            Storage::Inline(vec) => vec.as_slice(),
            Storage::Heap(vec) => vec.as_slice(),
        }
    }

    /// Extracts a mutable slice of the entire vector.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match &mut self.0 {
            Storage::Inline(vec) => vec.as_mut_slice(),
            Storage::Heap(vec) => vec.as_mut_slice(),
        }
    }

    /// # Safety
    /// See [`Vec::set_len`]. The storage is not migrated.
    #[inline]
    unsafe fn set_len(&mut self, new_len: usize) {
        // SAFETY: forwarded to the caller.
        unsafe {
            match &mut self.0 {
                Storage::Inline(vec) => vec.set_len(new_len),
                Storage::Heap(vec) => vec.set_len(new_len),
            }
        }
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    /// [`OutOfRange`] if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::{spillvec, SpillVec};
    /// let vec: SpillVec<_, 2> = spillvec!['a', 'b', 'c'];
    /// assert_eq!(vec.at(2), Ok(&'c'));
    /// assert!(vec.at(3).is_err());
    /// ```
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, OutOfRange> {
        let len = self.len();
        self.as_slice().get(index).ok_or(OutOfRange { index, len })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    /// [`OutOfRange`] if `index >= len`.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        let len = self.len();
        self.as_mut_slice().get_mut(index).ok_or(OutOfRange { index, len })
    }

    /// Applies `splice` and brings the storage in line with the new length.
    ///
    /// Every size-changing operation ends up here.
    ///
    /// # Safety
    /// - `splice.at + splice.removed <= splice.len`, and `0..splice.len` is the
    ///   occupied range of the active buffer.
    /// - The removed span has already been moved out or dropped.
    /// - `incoming` is moved in: the caller must forget it afterwards.
    unsafe fn relocate(&mut self, splice: Splice, incoming: &[T]) {
        let Splice { len, at, removed } = splice;
        let tail = len - at - removed;
        let new_len = len - removed + incoming.len();
        let capacity = self.capacity();

        match growth::plan(self.location(), capacity, new_len, N) {
            Transition::Stay => unsafe {
                let base = self.as_mut_ptr();
                move_segments(base, base, at, removed, tail, incoming);
                self.set_len(new_len);
            },
            Transition::Promote { capacity: target } | Transition::Grow { capacity: target } => {
                let mut heap = Vec::with_capacity(target);
                // SAFETY: `heap` holds `target >= new_len` slots.
                unsafe {
                    self.set_len(0);
                    move_segments(self.as_mut_ptr(), heap.as_mut_ptr(), at, removed, tail, incoming);
                    heap.set_len(new_len);
                }
                tracing::trace!(len = new_len, from = capacity, to = heap.capacity(), "moved to heap buffer");
                self.0 = Storage::Heap(heap);
            }
            Transition::Demote => {
                let mut inline = StackVec::new();
                // SAFETY: `new_len <= N`.
                unsafe {
                    self.set_len(0);
                    move_segments(self.as_mut_ptr(), inline.as_mut_ptr(), at, removed, tail, incoming);
                    inline.set_len(new_len);
                }
                tracing::trace!(len = new_len, from = capacity, to = N, "returned inline");
                self.0 = Storage::Inline(inline);
            }
        }
    }

    /// Builds a vector out of elements the caller gives up ownership of.
    ///
    /// # Safety
    /// `items` must be forgotten by the caller afterwards.
    #[inline]
    unsafe fn from_moved(items: &[T]) -> Self {
        let mut vec = Self::new();
        // SAFETY: empty vector, ownership of `items` is transferred.
        unsafe {
            vec.relocate(
                Splice {
                    len: 0,
                    at: 0,
                    removed: 0,
                },
                items,
            );
        }
        vec
    }

    /// Appends an element to the back of the vector.
    ///
    /// # Time complexity
    /// Amortized O(1). Spilling to (or growing) the heap copies all elements once.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::{spillvec, SpillVec};
    /// let mut vec: SpillVec<_, 2> = spillvec![1, 2];
    /// vec.push(3);
    /// assert_eq!(vec, [1, 2, 3]);
    /// assert_eq!(vec.capacity(), 4);
    /// ```
    #[inline]
    pub fn push(&mut self, value: T) {
        let len = self.len();
        let value = ManuallyDrop::new(value);
        // SAFETY: appending one owned value.
        unsafe {
            self.relocate(
                Splice {
                    len,
                    at: len,
                    removed: 0,
                },
                slice::from_ref(&*value),
            );
        }
    }

    /// Removes the last element and returns it, or `None` if the vector is empty.
    ///
    /// Returns to inline storage once `len <= N`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::{spillvec, SpillVec};
    /// let mut vec: SpillVec<_, 2> = spillvec![1, 2, 3];
    /// assert_eq!(vec.pop(), Some(3));
    /// assert!(vec.is_inline());
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        // SAFETY: the last slot is read once and then reported as removed.
        unsafe {
            let value = ptr::read(self.as_ptr().add(len - 1));
            self.relocate(
                Splice {
                    len,
                    at: len - 1,
                    removed: 1,
                },
                &[],
            );
            Some(value)
        }
    }

    /// Drops every element and returns to inline storage.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::{spillvec, SpillVec};
    /// let mut vec: SpillVec<_, 2> = spillvec![1, 2, 3];
    /// vec.clear();
    /// assert!(vec.is_empty());
    /// assert!(vec.is_inline());
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        self.erase(..);
    }

    /// Keeps the first `len` elements and drops the rest.
    ///
    /// Has no effect if `len >= self.len()`.
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        if len < self.len() {
            self.erase(len..);
        }
    }

    /// Inserts `element` before `index`, shifting everything after it to the right.
    ///
    /// Returns a reference to the inserted element.
    ///
    /// # Panics
    /// Panics if `index > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::{spillvec, SpillVec};
    /// let mut vec: SpillVec<_, 3> = spillvec!['a', 'b', 'c'];
    /// *vec.insert(1, 'x') = 'd';
    /// assert_eq!(vec, ['a', 'd', 'b', 'c']);
    /// assert!(!vec.is_inline());
    /// ```
    pub fn insert(&mut self, index: usize, element: T) -> &mut T {
        let len = self.len();
        assert!(index <= len, "insertion index should be <= len");
        let element = ManuallyDrop::new(element);
        // SAFETY: one owned value moved in at a valid index.
        unsafe {
            self.relocate(
                Splice {
                    len,
                    at: index,
                    removed: 0,
                },
                slice::from_ref(&*element),
            );
        }
        &mut self.as_mut_slice()[index]
    }

    /// Inserts every item of `iter` before `index`, keeping their order.
    ///
    /// The items are gathered first and then moved in with a single storage
    /// transition. Returns the inserted run. An empty `iter` leaves the vector untouched.
    ///
    /// # Panics
    /// Panics if `index > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::{spillvec, SpillVec};
    /// let mut vec: SpillVec<_, 4> = spillvec![1, 5];
    /// let run = vec.insert_from(1, [2, 3, 4]);
    /// assert_eq!(run, [2, 3, 4]);
    /// assert_eq!(vec, [1, 2, 3, 4, 5]);
    /// assert_eq!(vec.capacity(), 7);
    /// ```
    pub fn insert_from<I: IntoIterator<Item = T>>(&mut self, index: usize, iter: I) -> &mut [T] {
        let len = self.len();
        assert!(index <= len, "insertion index should be <= len");

        let mut staged: Self = iter.into_iter().collect();
        let inserted = staged.len();
        if inserted != 0 {
            // SAFETY: `staged` gives up its elements right after the move.
            unsafe {
                self.relocate(
                    Splice {
                        len,
                        at: index,
                        removed: 0,
                    },
                    staged.as_slice(),
                );
                staged.set_len(0);
            }
        }
        &mut self.as_mut_slice()[index..index + inserted]
    }

    /// Removes the elements in `range`, shifting everything after it to the left.
    ///
    /// Returns to inline storage once `len <= N`. An empty range leaves the vector untouched.
    ///
    /// # Panics
    /// Panics if the range is decreasing or ends past `len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::{spillvec, SpillVec};
    /// let mut vec: SpillVec<_, 4> = spillvec![1, 2, 3, 4, 5, 6];
    /// vec.erase(1..3);
    /// assert_eq!(vec, [1, 4, 5, 6]);
    /// assert!(vec.is_inline());
    /// ```
    pub fn erase<R: core::ops::RangeBounds<usize>>(&mut self, range: R) {
        let len = self.len();
        let (start, end) = normalize_range(&range, len);
        if start == end {
            return;
        }
        // SAFETY: `start..end` is dropped before being reported as removed.
        // Shrinking first means a panicking destructor leaks the tail instead of double dropping.
        unsafe {
            self.set_len(start);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.as_mut_ptr().add(start),
                end - start,
            ));
            self.relocate(
                Splice {
                    len,
                    at: start,
                    removed: end - start,
                },
                &[],
            );
        }
    }

    /// Removes and returns the element at `index`, shifting everything after it to the left.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::{spillvec, SpillVec};
    /// let mut vec: SpillVec<_, 4> = spillvec!['a', 'b', 'c'];
    /// assert_eq!(vec.remove(1), 'b');
    /// assert_eq!(vec, ['a', 'c']);
    /// ```
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.len();
        assert!(index < len, "removal index should be < len");
        // SAFETY: the slot is read once and then reported as removed.
        unsafe {
            let value = ptr::read(self.as_ptr().add(index));
            self.relocate(
                Splice {
                    len,
                    at: index,
                    removed: 1,
                },
                &[],
            );
            value
        }
    }

    /// Converts the vector into a [`Vec`].
    ///
    /// Heap data is handed over without copying.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        match self.0 {
            Storage::Inline(vec) => vec.into_iter().collect(),
            Storage::Heap(vec) => vec,
        }
    }
}

impl<T: Clone, const N: usize> SpillVec<T, N> {
    /// Creates a `SpillVec` with `num` clones of `elem`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::SpillVec;
    /// let vec: SpillVec<i32, 4> = SpillVec::from_elem(7, 3);
    /// assert_eq!(vec, [7, 7, 7]);
    /// ```
    #[inline]
    pub fn from_elem(elem: T, num: usize) -> Self {
        core::iter::repeat_n(elem, num).collect()
    }
}

impl<T, const N: usize> Default for SpillVec<T, N> {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const N: usize> Clone for SpillVec<T, N> {
    /// Deep copy, rebuilt by pushing clones of each element.
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    /// Releases the current storage, then pushes clones of `source`.
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.extend(source.iter().cloned());
    }
}

impl<T, const N: usize> Extend<T> for SpillVec<T, N> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T: 'a + Clone, const N: usize> Extend<&'a T> for SpillVec<T, N> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().cloned());
    }
}

impl<T, const N: usize> FromIterator<T> for SpillVec<T, N> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Self::new();
        vec.extend(iter);
        vec
    }
}

crate::utils::impl_slice_traits!(SpillVec<T, N>);

impl<T, U, const N: usize, const M: usize> PartialEq<SpillVec<U, M>> for SpillVec<T, N>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &SpillVec<U, M>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, const N: usize, const P: usize> From<[T; P]> for SpillVec<T, N> {
    fn from(value: [T; P]) -> Self {
        let value = ManuallyDrop::new(value);
        // SAFETY: the array is forgotten.
        unsafe { Self::from_moved(value.as_slice()) }
    }
}

impl<T, const N: usize> From<Vec<T>> for SpillVec<T, N> {
    fn from(mut value: Vec<T>) -> Self {
        // SAFETY: `value` gives up its elements right after the move.
        unsafe {
            let vec = Self::from_moved(value.as_slice());
            value.set_len(0);
            vec
        }
    }
}

impl<T: Clone, const N: usize> From<&[T]> for SpillVec<T, N> {
    #[inline]
    fn from(value: &[T]) -> Self {
        value.iter().cloned().collect()
    }
}

impl<T, const N: usize> From<SpillVec<T, N>> for Vec<T> {
    #[inline]
    fn from(value: SpillVec<T, N>) -> Self {
        value.into_vec()
    }
}

impl<T, const N: usize> IntoIterator for SpillVec<T, N> {
    type Item = T;
    type IntoIter = IntoIter<T, N>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        match self.0 {
            Storage::Inline(vec) => IntoIter::Inline(vec.into_iter()),
            Storage::Heap(vec) => IntoIter::Heap(vec.into_iter()),
        }
    }
}

/// An iterator that consumes a [`SpillVec`] and yields its items by value.
pub enum IntoIter<T, const N: usize> {
    Inline(crate::stack_vec::IntoIter<T, N>),
    Heap(alloc::vec::IntoIter<T>),
}

impl<T, const N: usize> IntoIter<T, N> {
    /// The elements not yielded yet.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        match self {
            IntoIter::Inline(iter) => iter.as_slice(),
            IntoIter::Heap(iter) => iter.as_slice(),
        }
    }
}

impl<T, const N: usize> Iterator for IntoIter<T, N> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        match self {
            IntoIter::Inline(iter) => iter.next(),
            IntoIter::Heap(iter) => iter.next(),
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            IntoIter::Inline(iter) => iter.size_hint(),
            IntoIter::Heap(iter) => iter.size_hint(),
        }
    }
}

impl<T, const N: usize> DoubleEndedIterator for IntoIter<T, N> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        match self {
            IntoIter::Inline(iter) => iter.next_back(),
            IntoIter::Heap(iter) => iter.next_back(),
        }
    }
}

impl<T, const N: usize> ExactSizeIterator for IntoIter<T, N> {}

impl<T, const N: usize> FusedIterator for IntoIter<T, N> {}

impl<T: fmt::Debug, const N: usize> fmt::Debug for IntoIter<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

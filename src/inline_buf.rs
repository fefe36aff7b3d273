//! The fixed inline storage of a [`VlVec`](crate::VlVec) and its owning iterator.

use core::{
    fmt,
    iter::FusedIterator,
    mem::{ManuallyDrop, MaybeUninit},
    ptr, slice,
};

/// Fixed storage of exactly `C` slots embedded in a [`VlVec`](crate::VlVec).
///
/// Only the first `len` slots hold live values.
/// It never allocates and never grows; callers check for room before writing.
pub(crate) struct InlineBuf<T, const C: usize> {
    data: [MaybeUninit<T>; C],
    len: usize,
}

impl<T, const C: usize> Drop for InlineBuf<T, C> {
    // Internal data using `MaybeUninit`, we need to call `drop` manually.
    fn drop(&mut self) {
        if self.len > 0 {
            // SAFETY: the first `len` slots are initialized.
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.as_mut_ptr(), self.len));
            }
        }
    }
}

impl<T, const C: usize> InlineBuf<T, C> {
    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            data: [const { MaybeUninit::uninit() }; C],
            len: 0,
        }
    }

    #[inline(always)]
    pub(crate) const fn as_ptr(&self) -> *const T {
        &raw const self.data as *const T
    }

    #[inline(always)]
    pub(crate) const fn as_mut_ptr(&mut self) -> *mut T {
        &raw mut self.data as *mut T
    }

    #[inline(always)]
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub(crate) const fn is_full(&self) -> bool {
        self.len >= C
    }

    #[inline]
    pub(crate) const fn as_slice(&self) -> &[T] {
        // SAFETY: the first `len` slots are initialized.
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    #[inline]
    pub(crate) const fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: the first `len` slots are initialized.
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    /// Appends `value`.
    ///
    /// # Panics
    /// Panics if the buffer is full.
    #[inline]
    pub(crate) fn push(&mut self, value: T) {
        let len = self.len;
        assert!(len < C, "length overflow during `push`");
        // SAFETY: `len < C`, the slot is in bounds and uninitialized.
        unsafe { ptr::write(self.as_mut_ptr().add(len), value) };
        self.len = len + 1;
    }

    #[inline]
    pub(crate) fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot was live and is now past `len`, so it is read exactly once.
        unsafe { Some(ptr::read(self.as_ptr().add(self.len))) }
    }

    /// Drops every element at or past `len`.
    pub(crate) fn truncate(&mut self, len: usize) {
        if self.len > len {
            let tail = self.len - len;
            // Shorten first so a panicking destructor cannot cause a double drop.
            self.len = len;
            // SAFETY: the tail slots were live and are no longer reachable.
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.as_mut_ptr().add(len), tail));
            }
        }
    }

    /// Removes the elements in `first..last`, shifting the tail left to close the gap.
    ///
    /// Requires `first <= last <= len`.
    pub(crate) fn remove_range(&mut self, first: usize, last: usize) {
        debug_assert!(first <= last && last <= self.len);
        let removed = last - first;
        self.as_mut_slice()[first..].rotate_left(removed);
        self.truncate(self.len - removed);
    }

    /// Removes and returns the element at `index`, shifting the tail left.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    pub(crate) fn remove(&mut self, index: usize) -> T {
        let len = self.len;
        assert!(index < len, "removal index (is {index}) should be < len (is {len})");
        self.as_mut_slice()[index..].rotate_left(1);
        match self.pop() {
            Some(value) => value,
            None => unreachable!(),
        }
    }
}

impl<T, const C: usize> IntoIterator for InlineBuf<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T, C>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            buf: ManuallyDrop::new(self),
            index: 0,
        }
    }
}

/// An iterator that moves elements out of the inline buffer.
pub struct IntoIter<T, const C: usize> {
    buf: ManuallyDrop<InlineBuf<T, C>>,
    index: usize,
}

impl<T, const C: usize> IntoIter<T, C> {
    /// Returns the remaining items as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.buf.as_slice()[self.index..]
    }

    /// Returns the remaining items as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let index = self.index;
        &mut self.buf.as_mut_slice()[index..]
    }
}

impl<T, const C: usize> Iterator for IntoIter<T, C> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.buf.len {
            self.index += 1;
            // SAFETY: slots in `index..len` are live and each is read once.
            unsafe { Some(ptr::read(self.buf.as_ptr().add(self.index - 1))) }
        } else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buf.len - self.index;
        (remaining, Some(remaining))
    }
}

impl<T, const C: usize> DoubleEndedIterator for IntoIter<T, C> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.index < self.buf.len {
            self.buf.len -= 1;
            // SAFETY: the last live slot is read once and then excluded by `len`.
            unsafe { Some(ptr::read(self.buf.as_ptr().add(self.buf.len))) }
        } else {
            None
        }
    }
}

impl<T, const C: usize> ExactSizeIterator for IntoIter<T, C> {}

impl<T, const C: usize> FusedIterator for IntoIter<T, C> {}

impl<T, const C: usize> Drop for IntoIter<T, C> {
    fn drop(&mut self) {
        let remaining = self.buf.len - self.index;
        if remaining > 0 {
            // SAFETY: slots in `index..len` have not been moved out.
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                    self.buf.as_mut_ptr().add(self.index),
                    remaining,
                ));
            }
        }
    }
}

impl<T: fmt::Debug, const C: usize> fmt::Debug for IntoIter<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

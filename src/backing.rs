use alloc::vec::Vec;
use core::{fmt, iter::FusedIterator};

use crate::{VlVecError, inline_buf::{self, InlineBuf}};

/// Which buffer currently holds the elements of a [`VlVec`](crate::VlVec).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackingKind {
    /// The fixed buffer embedded in the vector itself.
    Inline,
    /// A buffer owned by the vector on the heap.
    Heap,
}

/// An exclusively owned heap buffer together with the capacity it was requested with.
///
/// `Vec` may hand out more room than requested; the recorded `capacity` is the
/// one the vector reports and grows against.
pub(crate) struct HeapBuf<T> {
    vec: Vec<T>,
    capacity: usize,
}

impl<T> HeapBuf<T> {
    pub(crate) fn try_with_capacity(capacity: usize) -> Result<Self, VlVecError> {
        let mut vec = Vec::new();
        vec.try_reserve_exact(capacity)
            .map_err(|_| VlVecError::AllocFailed { capacity })?;
        Ok(Self { vec, capacity })
    }

    /// Adopts `vec`, making sure it has room for at least `capacity` elements.
    pub(crate) fn from_vec(mut vec: Vec<T>, capacity: usize) -> Self {
        debug_assert!(capacity >= vec.len());
        vec.reserve_exact(capacity - vec.len());
        Self { vec, capacity }
    }
}

/// The active storage of a vector. Exactly one variant exists at a time,
/// so the inactive buffer cannot be read or written by accident.
pub(crate) enum Backing<T, const C: usize> {
    Inline(InlineBuf<T, C>),
    Heap(HeapBuf<T>),
}

impl<T, const C: usize> Backing<T, C> {
    /// Creates an empty backing able to hold `capacity` elements.
    ///
    /// Capacities within `C` use the inline buffer and never allocate.
    pub(crate) fn try_with_capacity(capacity: usize) -> Result<Self, VlVecError> {
        if capacity <= C {
            Ok(Backing::Inline(InlineBuf::new()))
        } else {
            HeapBuf::try_with_capacity(capacity).map(Backing::Heap)
        }
    }

    #[inline]
    pub(crate) const fn kind(&self) -> BackingKind {
        match self {
            Backing::Inline(_) => BackingKind::Inline,
            Backing::Heap(_) => BackingKind::Heap,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        match self {
            Backing::Inline(buf) => buf.len(),
            Backing::Heap(buf) => buf.vec.len(),
        }
    }

    #[inline]
    pub(crate) const fn capacity(&self) -> usize {
        match self {
            Backing::Inline(_) => C,
            Backing::Heap(buf) => buf.capacity,
        }
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[T] {
        match self {
            Backing::Inline(buf) => buf.as_slice(),
            Backing::Heap(buf) => buf.vec.as_slice(),
        }
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        match self {
            Backing::Inline(buf) => buf.as_mut_slice(),
            Backing::Heap(buf) => buf.vec.as_mut_slice(),
        }
    }

    #[inline]
    pub(crate) fn as_ptr(&self) -> *const T {
        match self {
            Backing::Inline(buf) => buf.as_ptr(),
            Backing::Heap(buf) => buf.vec.as_ptr(),
        }
    }

    #[inline]
    pub(crate) fn as_mut_ptr(&mut self) -> *mut T {
        match self {
            Backing::Inline(buf) => buf.as_mut_ptr(),
            Backing::Heap(buf) => buf.vec.as_mut_ptr(),
        }
    }

    /// Appends `value` into room the caller has already made.
    ///
    /// # Panics
    /// Panics if the inline buffer is full. A full heap buffer would reallocate
    /// behind the recorded capacity, which is a bug in the caller.
    #[inline]
    pub(crate) fn push_within_capacity(&mut self, value: T) {
        match self {
            Backing::Inline(buf) => buf.push(value),
            Backing::Heap(buf) => {
                debug_assert!(buf.vec.len() < buf.capacity, "heap backing has no room left");
                buf.vec.push(value);
            }
        }
    }

    #[inline]
    pub(crate) fn pop(&mut self) -> Option<T> {
        match self {
            Backing::Inline(buf) => buf.pop(),
            Backing::Heap(buf) => buf.vec.pop(),
        }
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        match self {
            Backing::Inline(buf) => buf.truncate(len),
            Backing::Heap(buf) => buf.vec.truncate(len),
        }
    }

    /// Removes `first..last` and closes the gap. Requires `first <= last <= len`.
    pub(crate) fn remove_range(&mut self, first: usize, last: usize) {
        match self {
            Backing::Inline(buf) => buf.remove_range(first, last),
            Backing::Heap(buf) => {
                buf.vec.drain(first..last);
            }
        }
    }

    pub(crate) fn remove(&mut self, index: usize) -> T {
        match self {
            Backing::Inline(buf) => buf.remove(index),
            Backing::Heap(buf) => buf.vec.remove(index),
        }
    }

    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            Backing::Inline(buf) => buf.into_iter().collect(),
            Backing::Heap(buf) => buf.vec,
        }
    }
}

impl<T, const C: usize> IntoIterator for Backing<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T, C>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        match self {
            Backing::Inline(buf) => IntoIter::Inline(buf.into_iter()),
            Backing::Heap(buf) => IntoIter::Heap(buf.vec.into_iter()),
        }
    }
}

/// An iterator that consumes a [`VlVec`](crate::VlVec) and yields its items by value.
///
/// The variant matches the backing the vector had when it was consumed.
///
/// ```
/// # use vlvec::{vlvec, VlVec, inline_buf, vl_vec::IntoIter};
/// let vec: VlVec<i32, 4> = vlvec![1, 2];
/// match vec.into_iter() {
///     IntoIter::Inline(iter) => {
///         let iter: inline_buf::IntoIter<i32, 4> = iter;
///         assert_eq!(iter.as_slice(), [1, 2]);
///     }
///     IntoIter::Heap(_) => unreachable!(),
/// }
/// ```
pub enum IntoIter<T, const C: usize> {
    /// Drains the inline buffer.
    Inline(inline_buf::IntoIter<T, C>),
    /// Drains the heap buffer.
    Heap(alloc::vec::IntoIter<T>),
}

impl<T, const C: usize> IntoIter<T, C> {
    /// Returns the remaining items as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        match self {
            IntoIter::Inline(iter) => iter.as_slice(),
            IntoIter::Heap(iter) => iter.as_slice(),
        }
    }

    /// Returns the remaining items as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match self {
            IntoIter::Inline(iter) => iter.as_mut_slice(),
            IntoIter::Heap(iter) => iter.as_mut_slice(),
        }
    }
}

impl<T, const C: usize> Iterator for IntoIter<T, C> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
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

impl<T, const C: usize> DoubleEndedIterator for IntoIter<T, C> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        match self {
            IntoIter::Inline(iter) => iter.next_back(),
            IntoIter::Heap(iter) => iter.next_back(),
        }
    }
}

impl<T, const C: usize> ExactSizeIterator for IntoIter<T, C> {}

impl<T, const C: usize> FusedIterator for IntoIter<T, C> {}

impl<T: fmt::Debug, const C: usize> fmt::Debug for IntoIter<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

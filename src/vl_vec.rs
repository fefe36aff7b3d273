use alloc::vec::Vec;
use core::{cmp::Ordering, fmt, hash, iter, mem, ops, slice};

use tracing::{debug, trace};

use crate::{
    BackingKind, VlVecError,
    backing::{Backing, HeapBuf},
    error::infallible,
    inline_buf::InlineBuf,
    policy::next_capacity,
};

pub use crate::backing::IntoIter;

/// The inline capacity used when none is given.
pub const INIT_STATIC_CAP: usize = 16;

/// A vector that keeps up to `C` elements inline and moves to the heap beyond that.
///
/// The elements live in exactly one buffer at a time:
///
/// - **Inline**: a fixed array of `C` slots embedded in the vector. Its capacity is always `C`.
/// - **Heap**: an owned allocation sized by [`next_capacity`](crate::policy::next_capacity),
///   i.e. `3 * (len + growth) / 2` when a growth does not fit.
///
/// Adding elements past the current capacity moves everything to a new heap buffer.
/// Removing elements so that `len <= C` moves everything back inline and frees the heap.
/// Both moves keep the values and their order.
///
/// # Invalidation
///
/// Any operation that changes the length or the capacity may move every element.
/// References and slice iterators borrow the vector, so the compiler rejects using them
/// across such an operation. The `usize` positions returned by [`insert`](VlVec::insert)
/// and [`erase`](VlVec::erase) are plain indices and only describe the vector as it was
/// right after that call.
///
/// # Examples
///
/// ```
/// use vlvec::{BackingKind, VlVec};
///
/// let mut vec: VlVec<u32, 4> = VlVec::new();
/// vec.extend([1, 2, 3, 4]);
/// assert_eq!(vec.backing_kind(), BackingKind::Inline);
/// assert_eq!(vec.capacity(), 4);
///
/// // The fifth element does not fit: 3 * 5 / 2 = 7 slots on the heap.
/// vec.push(5);
/// assert_eq!(vec.backing_kind(), BackingKind::Heap);
/// assert_eq!(vec.capacity(), 7);
///
/// // Dropping back to four elements returns to the inline buffer.
/// vec.pop();
/// assert_eq!(vec.backing_kind(), BackingKind::Inline);
/// assert_eq!(vec, [1, 2, 3, 4]);
/// ```
pub struct VlVec<T, const C: usize = INIT_STATIC_CAP> {
    backing: Backing<T, C>,
}

/// Creates a [`VlVec`] containing the arguments.
///
/// The syntax is similar to [`vec!`](https://doc.rust-lang.org/std/macro.vec.html).
/// If there are more elements than the inline capacity, they are stored on the heap.
///
/// # Examples
///
/// ```
/// # use vlvec::{vlvec, VlVec};
/// let vec: VlVec<String, 10> = vlvec![];
/// let vec: VlVec<i64, 10> = vlvec![1; 5]; // Need to support Clone.
/// let vec: VlVec<_, 10> = vlvec![1, 2, 3, 4];
/// ```
#[macro_export]
macro_rules! vlvec {
    [] => { $crate::VlVec::new() };
    [$elem:expr; $n:expr] => { $crate::VlVec::from_elem($elem, $n) };
    [$($item:expr),+ $(,)?] => { $crate::VlVec::from_buf([ $($item),+ ]) };
}

impl<T, const C: usize> VlVec<T, C> {
    /// Constructs a new, empty `VlVec` using the inline buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vlvec::VlVec;
    /// let vec: VlVec<i32, 8> = VlVec::new();
    /// assert!(vec.is_inline());
    /// assert_eq!(vec.capacity(), 8);
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self {
            backing: Backing::Inline(InlineBuf::new()),
        }
    }

    /// Creates a `VlVec` from an array.
    ///
    /// # Examples
    /// ```
    /// # use vlvec::VlVec;
    /// let vec: VlVec<i32, 5> = VlVec::from_buf([1, 2, 3]);
    /// assert_eq!(vec.len(), 3);
    /// assert!(vec.is_inline());
    ///
    /// let vec: VlVec<i32, 2> = VlVec::from_buf([1, 2, 3]);
    /// assert!(!vec.is_inline());
    /// assert_eq!(vec.capacity(), 4);
    /// ```
    pub fn from_buf<const P: usize>(arr: [T; P]) -> Self {
        let mut vec = Self::new();
        vec.insert_many(0, arr);
        vec
    }

    /// Returns the number of elements the inline buffer can hold, `C`.
    #[inline(always)]
    pub const fn inline_capacity(&self) -> usize {
        C
    }

    /// Returns which buffer holds the elements right now.
    #[inline(always)]
    pub const fn backing_kind(&self) -> BackingKind {
        self.backing.kind()
    }

    /// Returns `true` if the elements are stored in the inline buffer.
    #[inline(always)]
    pub const fn is_inline(&self) -> bool {
        matches!(self.backing, Backing::Inline(_))
    }

    /// Returns the number of elements in the vector.
    #[inline]
    pub fn len(&self) -> usize {
        self.backing.len()
    }

    /// Returns `true` if the vector contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of elements the active buffer can hold.
    ///
    /// This is `C` while inline, and the capacity chosen at the last growth while on the heap.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.backing.capacity()
    }

    /// Extracts a slice containing the entire vector.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.backing.as_slice()
    }

    /// Extracts a mutable slice of the entire vector.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.backing.as_mut_slice()
    }

    /// Returns a raw pointer to the active buffer.
    ///
    /// The pointer is invalidated by any operation that changes the length or the capacity.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.backing.as_ptr()
    }

    /// Returns a raw mutable pointer to the active buffer.
    ///
    /// The pointer is invalidated by any operation that changes the length or the capacity.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.backing.as_mut_ptr()
    }

    /// Returns a reference to the element at `index`, or
    /// [`VlVecError::OutOfRange`] if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vlvec::{vlvec, VlVec, VlVecError};
    /// let vec: VlVec<_, 4> = vlvec![10, 20, 30];
    /// assert_eq!(vec.at(1), Ok(&20));
    /// assert_eq!(vec.at(3), Err(VlVecError::OutOfRange { index: 3, len: 3 }));
    /// ```
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, VlVecError> {
        let len = self.len();
        self.as_slice()
            .get(index)
            .ok_or(VlVecError::OutOfRange { index, len })
    }

    /// Returns a mutable reference to the element at `index`, or
    /// [`VlVecError::OutOfRange`] if `index >= len`.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, VlVecError> {
        let len = self.len();
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(VlVecError::OutOfRange { index, len })
    }

    /// Installs `next` as the active backing and moves every live element into it, in order.
    ///
    /// This is the only place elements change buffers. `next` must be empty and
    /// able to hold the current length.
    fn install(&mut self, next: Backing<T, C>) {
        debug_assert!(next.len() == 0 && next.capacity() >= self.len());
        let previous = mem::replace(&mut self.backing, next);
        let from = previous.kind();
        for item in previous {
            self.backing.push_within_capacity(item);
        }
        trace!(
            ?from,
            to = ?self.backing.kind(),
            len = self.len(),
            capacity = self.capacity(),
            "backing transition"
        );
    }

    /// Moves to a new backing of `capacity` slots, allocating it before the current
    /// backing is touched so that a failed allocation leaves the vector unchanged.
    fn replace_backing(&mut self, capacity: usize) -> Result<(), VlVecError> {
        let next = Backing::try_with_capacity(capacity).inspect_err(|err| {
            debug!(capacity, len = self.len(), %err, "failed to allocate a new backing");
        })?;
        self.install(next);
        Ok(())
    }

    /// Makes room for `growth` more elements, moving to the heap if they do not fit.
    fn try_grow_for(&mut self, growth: usize) -> Result<(), VlVecError> {
        let len = self.len();
        let required = len.checked_add(growth).ok_or(VlVecError::CapacityOverflow)?;
        if required <= self.capacity() {
            return Ok(());
        }
        let capacity = next_capacity(C, len, growth).ok_or(VlVecError::CapacityOverflow)?;
        self.replace_backing(capacity)
    }

    /// Returns to the inline buffer if the heap is in use and the elements fit inline.
    fn shrink_if_fits(&mut self) {
        if !self.is_inline() && self.len() <= C {
            self.install(Backing::Inline(InlineBuf::new()));
        }
    }

    /// Appends an element to the back of the vector.
    ///
    /// If the active buffer is full, every element moves to a new heap buffer of
    /// `3 * (len + 1) / 2` slots.
    ///
    /// # Panics
    /// Panics if the new capacity overflows `usize`.
    ///
    /// # Examples
    /// ```
    /// # use vlvec::{vlvec, VlVec};
    /// let mut vec: VlVec<_, 2> = vlvec![1, 2];
    /// vec.push(3);
    /// assert_eq!(vec, [1, 2, 3]);
    /// assert_eq!(vec.capacity(), 4);
    /// ```
    #[inline]
    pub fn push(&mut self, value: T) {
        infallible::<T, _>(self.try_push(value))
    }

    /// Appends an element to the back of the vector, returning an error instead of
    /// panicking if the heap buffer cannot be allocated.
    ///
    /// On error the vector is unchanged and `value` is dropped.
    pub fn try_push(&mut self, value: T) -> Result<(), VlVecError> {
        if self.len() == self.capacity() {
            self.try_grow_for(1)?;
        }
        self.backing.push_within_capacity(value);
        Ok(())
    }

    /// Removes the last element and returns it, or `None` if the vector is empty.
    ///
    /// If the heap is in use and at most `C` elements remain, they move back inline.
    ///
    /// # Examples
    /// ```
    /// # use vlvec::{vlvec, VlVec};
    /// let mut vec: VlVec<_, 2> = vlvec![1, 2, 3];
    /// assert!(!vec.is_inline());
    /// assert_eq!(vec.pop(), Some(3));
    /// assert!(vec.is_inline());
    /// assert_eq!(vec.capacity(), 2);
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        let value = self.backing.pop()?;
        self.shrink_if_fits();
        Some(value)
    }

    /// Inserts the items of `iter` before position `index` and returns the index of
    /// the first inserted item.
    ///
    /// - `index` past the end is treated as the end, so the items are appended.
    /// - If the items do not fit, every element moves to a new heap buffer sized by
    ///   [`next_capacity`](crate::policy::next_capacity) with the item count as growth.
    /// - Elements from `index` onwards are shifted right to make room; the items keep
    ///   their source order.
    /// - An empty `iter` changes nothing.
    ///
    /// # Panics
    /// Panics if the new capacity overflows `usize`.
    ///
    /// # Examples
    /// ```
    /// # use vlvec::{vlvec, VlVec};
    /// let mut vec: VlVec<_, 4> = vlvec![1, 5];
    /// let at = vec.insert_many(1, [2, 3, 4]);
    /// assert_eq!(at, 1);
    /// assert_eq!(vec, [1, 2, 3, 4, 5]);
    /// assert_eq!(vec.capacity(), 7);
    /// ```
    pub fn insert_many<I>(&mut self, index: usize, iter: I) -> usize
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        infallible::<T, _>(self.try_insert_many(index, iter))
    }

    /// Fallible version of [`insert_many`](VlVec::insert_many).
    ///
    /// On error the vector is unchanged.
    pub fn try_insert_many<I>(&mut self, index: usize, iter: I) -> Result<usize, VlVecError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = iter.into_iter();
        let index = index.min(self.len());
        let count = iter.len();
        if count == 0 {
            return Ok(index);
        }
        self.try_grow_for(count)?;

        // New items are written after the tail, then the tail is rotated past them.
        // Only `count` items are taken, so a miscounting iterator cannot overflow
        // the room made above.
        let old_len = self.len();
        let guard = AppendGuard { vec: self, old_len };
        for item in iter.take(count) {
            guard.vec.backing.push_within_capacity(item);
        }
        let inserted = guard.vec.len() - old_len;
        mem::forget(guard);

        self.as_mut_slice()[index..].rotate_right(inserted);
        // An iterator that yields fewer items than it reported may leave a short heap.
        self.shrink_if_fits();
        Ok(index)
    }

    /// Inserts `element` before position `index` and returns `index`.
    ///
    /// `index` past the end appends. See [`insert_many`](VlVec::insert_many).
    ///
    /// # Examples
    /// ```
    /// # use vlvec::{vlvec, VlVec};
    /// let mut vec: VlVec<_, 4> = vlvec!['a', 'b', 'c'];
    ///
    /// vec.insert(1, 'd');
    /// assert_eq!(vec, ['a', 'd', 'b', 'c']);
    /// assert!(vec.is_inline());
    ///
    /// vec.insert(4, 'e');
    /// assert_eq!(vec, ['a', 'd', 'b', 'c', 'e']);
    /// assert!(!vec.is_inline());
    /// ```
    #[inline]
    pub fn insert(&mut self, index: usize, element: T) -> usize {
        self.insert_many(index, iter::once(element))
    }

    /// Fallible version of [`insert`](VlVec::insert).
    #[inline]
    pub fn try_insert(&mut self, index: usize, element: T) -> Result<usize, VlVecError> {
        self.try_insert_many(index, iter::once(element))
    }

    /// Removes the elements in `first..last` and returns the index of the element
    /// that now follows the removed range (equal to `len()` if none does).
    ///
    /// If `first >= len` or `first >= last` nothing is removed and `len()` is returned.
    /// `last` past the end is treated as the end.
    ///
    /// If the heap is in use and at most `C` elements remain, they move back inline.
    ///
    /// # Examples
    /// ```
    /// # use vlvec::{vlvec, VlVec};
    /// let mut vec: VlVec<_, 4> = vlvec![1, 2, 3, 4, 5, 6];
    /// assert_eq!(vec.erase(1, 3), 1);
    /// assert_eq!(vec, [1, 4, 5, 6]);
    /// assert!(vec.is_inline());
    ///
    /// // Empty or invalid ranges are ignored.
    /// assert_eq!(vec.erase(2, 2), 4);
    /// assert_eq!(vec.erase(9, 12), 4);
    /// assert_eq!(vec, [1, 4, 5, 6]);
    /// ```
    pub fn erase(&mut self, first: usize, last: usize) -> usize {
        let len = self.len();
        if first >= len || first >= last {
            return len;
        }
        let last = last.min(len);
        // The gap is closed in the current buffer before the survivors move inline.
        self.backing.remove_range(first, last);
        self.shrink_if_fits();
        first
    }

    /// Removes the element at `index` and returns the index of the element that now
    /// follows it. Equivalent to `erase(index, index + 1)`.
    #[inline]
    pub fn erase_at(&mut self, index: usize) -> usize {
        self.erase(index, index.saturating_add(1))
    }

    /// Removes and returns the element at `index`, shifting all elements after it to the left.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use vlvec::{vlvec, VlVec};
    /// let mut v: VlVec<_, 4> = vlvec!['a', 'b', 'c'];
    /// assert_eq!(v.remove(1), 'b');
    /// assert_eq!(v, ['a', 'c']);
    /// ```
    pub fn remove(&mut self, index: usize) -> T {
        let value = self.backing.remove(index);
        self.shrink_if_fits();
        value
    }

    /// Shortens the vector, keeping the first `len` elements and dropping the rest.
    ///
    /// If the heap is in use and at most `C` elements remain, they move back inline.
    pub fn truncate(&mut self, len: usize) {
        self.backing.truncate(len);
        self.shrink_if_fits();
    }

    /// Removes all values and returns to the inline buffer, freeing any heap buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vlvec::{vlvec, VlVec};
    /// let mut vec: VlVec<_, 4> = vlvec![1, 2, 3, 4, 5];
    /// assert!(!vec.is_inline());
    /// vec.clear();
    /// assert!(vec.is_empty());
    /// assert!(vec.is_inline());
    /// assert_eq!(vec.capacity(), 4);
    /// ```
    pub fn clear(&mut self) {
        if self.is_inline() {
            self.backing.truncate(0);
        } else {
            self.backing = Backing::Inline(InlineBuf::new());
            trace!(to = ?BackingKind::Inline, "backing released by clear");
        }
    }

    /// Converts the `VlVec` into a [`Vec`].
    ///
    /// Heap data is handed over without copying.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.backing.into_vec()
    }
}

impl<T: Clone, const C: usize> VlVec<T, C> {
    /// Creates a `VlVec` with `count` copies of `value`.
    ///
    /// # Examples
    /// ```
    /// # use vlvec::VlVec;
    /// let vec: VlVec<i32, 16> = VlVec::from_elem(7, 20);
    /// assert_eq!(vec.len(), 20);
    /// assert_eq!(vec.capacity(), 30);
    /// assert!(vec.iter().all(|&x| x == 7));
    /// ```
    pub fn from_elem(value: T, count: usize) -> Self {
        let mut vec = Self::new();
        vec.insert_many(0, iter::repeat_n(value, count));
        vec
    }

    /// Clones the items of `other` and inserts them before position `index`.
    ///
    /// Returns the index of the first inserted item. See [`insert_many`](VlVec::insert_many).
    ///
    /// # Examples
    /// ```
    /// # use vlvec::VlVec;
    /// let mut vec: VlVec<i32, 4> = VlVec::new();
    /// vec.insert_from_slice(0, &[1, 2, 3]);
    /// assert_eq!(vec, [1, 2, 3]);
    /// ```
    #[inline]
    pub fn insert_from_slice(&mut self, index: usize, other: &[T]) -> usize {
        self.insert_many(index, other.iter().cloned())
    }

    /// Clones and appends all elements in a slice to the `VlVec`.
    ///
    /// # Examples
    /// ```
    /// # use vlvec::{vlvec, VlVec};
    /// let mut vec: VlVec<_, 5> = vlvec![1];
    /// vec.extend_from_slice(&[2, 3, 4]);
    /// assert_eq!(vec, [1, 2, 3, 4]);
    /// ```
    #[inline]
    pub fn extend_from_slice(&mut self, other: &[T]) {
        self.insert_many(self.len(), other.iter().cloned());
    }
}

/// Drops the items appended by an unfinished insertion if the source iterator panics,
/// restoring the original length and backing.
struct AppendGuard<'a, T, const C: usize> {
    vec: &'a mut VlVec<T, C>,
    old_len: usize,
}

impl<T, const C: usize> Drop for AppendGuard<'_, T, C> {
    fn drop(&mut self) {
        self.vec.truncate(self.old_len);
    }
}

impl<T, const C: usize> Default for VlVec<T, C> {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const C: usize> Clone for VlVec<T, C> {
    /// Clones the elements into a vector with the same backing kind and capacity.
    ///
    /// A heap-backed source gets a fresh heap buffer; buffers are never shared.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vlvec::{vlvec, VlVec};
    /// let vec: VlVec<_, 2> = vlvec![1, 2, 3];
    /// let mut copy = vec.clone();
    /// assert_eq!(copy.capacity(), vec.capacity());
    ///
    /// copy.push(4);
    /// assert_eq!(vec, [1, 2, 3]);
    /// ```
    fn clone(&self) -> Self {
        let mut backing = infallible::<T, _>(Backing::try_with_capacity(self.capacity()));
        for item in self.as_slice() {
            backing.push_within_capacity(item.clone());
        }
        Self { backing }
    }

    /// Replaces the contents of `self` with a clone of `source`, taking on its
    /// backing kind and capacity.
    ///
    /// The new storage is fully built before the old one is dropped.
    fn clone_from(&mut self, source: &Self) {
        *self = source.clone();
    }
}

impl<T, const C: usize> ops::Deref for VlVec<T, C> {
    type Target = [T];
    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, const C: usize> ops::DerefMut for VlVec<T, C> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug, const C: usize> fmt::Debug for VlVec<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<T, const C: usize> AsRef<[T]> for VlVec<T, C> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, const C: usize> AsMut<[T]> for VlVec<T, C> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, const C: usize> core::borrow::Borrow<[T]> for VlVec<T, C> {
    #[inline]
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, const C: usize> core::borrow::BorrowMut<[T]> for VlVec<T, C> {
    #[inline]
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: hash::Hash, const C: usize> hash::Hash for VlVec<T, C> {
    #[inline]
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        hash::Hash::hash(self.as_slice(), state);
    }
}

impl<T, I: slice::SliceIndex<[T]>, const C: usize> ops::Index<I> for VlVec<T, C> {
    type Output = <I as slice::SliceIndex<[T]>>::Output;
    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        ops::Index::index(self.as_slice(), index)
    }
}

impl<T, I: slice::SliceIndex<[T]>, const C: usize> ops::IndexMut<I> for VlVec<T, C> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        ops::IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

// Length is compared first by the slice comparison; backing and capacity are ignored.
impl<T, U, const C: usize> PartialEq<VlVec<U, C>> for VlVec<T, C>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &VlVec<U, C>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, const C: usize> Eq for VlVec<T, C> {}

impl<T, U, const C: usize> PartialEq<[U]> for VlVec<T, C>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T, U, const C: usize> PartialEq<&[U]> for VlVec<T, C>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T, U, const C: usize, const P: usize> PartialEq<[U; P]> for VlVec<T, C>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &[U; P]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, U, const C: usize, const P: usize> PartialEq<&[U; P]> for VlVec<T, C>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &&[U; P]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialOrd, const C: usize> PartialOrd for VlVec<T, C> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        PartialOrd::partial_cmp(self.as_slice(), other.as_slice())
    }
}

impl<T: Ord, const C: usize> Ord for VlVec<T, C> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        Ord::cmp(self.as_slice(), other.as_slice())
    }
}

impl<T, const C: usize> Extend<T> for VlVec<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (hint, _) = iter.size_hint();
        infallible::<T, _>(self.try_grow_for(hint));
        for item in iter {
            self.push(item);
        }
        self.shrink_if_fits();
    }
}

impl<'a, T: 'a + Clone, const C: usize> Extend<&'a T> for VlVec<T, C> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().cloned());
    }
}

impl<T, const C: usize> FromIterator<T> for VlVec<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Self::new();
        vec.extend(iter);
        vec
    }
}

impl<T, const C: usize> IntoIterator for VlVec<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T, C>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.backing.into_iter()
    }
}

impl<'a, T, const C: usize> IntoIterator for &'a VlVec<T, C> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T, const C: usize> IntoIterator for &'a mut VlVec<T, C> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T, const C: usize, const P: usize> From<[T; P]> for VlVec<T, C> {
    #[inline]
    fn from(value: [T; P]) -> Self {
        Self::from_buf(value)
    }
}

impl<T: Clone, const C: usize> From<&[T]> for VlVec<T, C> {
    fn from(value: &[T]) -> Self {
        let mut vec = Self::new();
        vec.extend_from_slice(value);
        vec
    }
}

impl<T, const C: usize> From<Vec<T>> for VlVec<T, C> {
    /// Elements that fit inline are moved into the inline buffer.
    /// Otherwise the allocation is kept and topped up to the policy capacity.
    fn from(value: Vec<T>) -> Self {
        let len = value.len();
        if len <= C {
            let mut vec = Self::new();
            for item in value {
                vec.backing.push_within_capacity(item);
            }
            return vec;
        }
        let capacity = infallible::<T, _>(next_capacity(C, 0, len).ok_or(VlVecError::CapacityOverflow));
        Self {
            backing: Backing::Heap(HeapBuf::from_vec(value, capacity)),
        }
    }
}

impl<T, const C: usize> From<VlVec<T, C>> for Vec<T> {
    #[inline]
    fn from(value: VlVec<T, C>) -> Self {
        value.into_vec()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::vlvec;
    use alloc::{rc::Rc, string::String, vec};
    use core::cell::Cell;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    fn check_invariants<T, const C: usize>(vec: &VlVec<T, C>) {
        assert!(vec.len() <= vec.capacity());
        match vec.backing_kind() {
            BackingKind::Inline => assert_eq!(vec.capacity(), C),
            BackingKind::Heap => {
                assert!(vec.len() > C);
                assert!(vec.capacity() > C);
            }
        }
    }

    fn sequence<const C: usize>(n: u32) -> VlVec<u32, C> {
        (0..n).collect()
    }

    #[derive(Clone)]
    struct Counted(Rc<Cell<usize>>);

    impl Drop for Counted {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn starts_empty_and_inline() {
        let vec: VlVec<u32> = VlVec::new();
        assert!(vec.is_empty());
        assert_eq!(vec.len(), 0);
        assert_eq!(vec.capacity(), 16);
        assert_eq!(vec.inline_capacity(), 16);
        assert_eq!(vec.backing_kind(), BackingKind::Inline);
    }

    #[test]
    fn push_past_inline_moves_to_heap_once() {
        let mut vec: VlVec<u32, 16> = VlVec::new();
        for i in 0..16 {
            vec.push(i);
            check_invariants(&vec);
        }
        assert!(vec.is_inline());
        assert_eq!(vec.len(), 16);
        assert_eq!(vec.capacity(), 16);

        vec.push(16);
        assert_eq!(vec.backing_kind(), BackingKind::Heap);
        assert_eq!(vec.capacity(), 25);
        assert_eq!(vec, (0..17).collect::<Vec<_>>().as_slice());

        // No further move until the heap buffer is full.
        for i in 17..25 {
            vec.push(i);
        }
        assert_eq!(vec.capacity(), 25);
        vec.push(25);
        assert_eq!(vec.capacity(), 39);
        check_invariants(&vec);
    }

    #[test]
    fn pop_back_to_inline_keeps_prefix() {
        let mut vec: VlVec<u32, 16> = sequence(17);
        assert!(!vec.is_inline());

        assert_eq!(vec.pop(), Some(16));
        assert_eq!(vec.pop(), Some(15));
        assert_eq!(vec.len(), 15);
        assert!(vec.is_inline());
        assert_eq!(vec.capacity(), 16);
        assert_eq!(vec, (0..15).collect::<Vec<_>>().as_slice());
    }

    #[test]
    fn pop_on_empty_is_none() {
        let mut vec: VlVec<u32, 4> = VlVec::new();
        assert_eq!(vec.pop(), None);
        check_invariants(&vec);
    }

    #[test]
    fn insert_into_empty_at_front() {
        let mut vec: VlVec<u32, 16> = VlVec::new();
        assert_eq!(vec.insert_many(0, [7, 8, 9]), 0);
        assert_eq!(vec.len(), 3);
        assert_eq!(vec, [7, 8, 9]);
        assert!(vec.is_inline());
    }

    #[test]
    fn insert_shifts_tail_and_grows_by_count() {
        let mut vec: VlVec<u32, 4> = vlvec![0, 1, 2, 3];
        assert_eq!(vec.insert_many(2, [10, 11, 12]), 2);
        assert_eq!(vec, [0, 1, 10, 11, 12, 2, 3]);
        // 3 * (4 + 3) / 2
        assert_eq!(vec.capacity(), 10);
        check_invariants(&vec);

        assert_eq!(vec.insert(0, 99), 0);
        assert_eq!(vec, [99, 0, 1, 10, 11, 12, 2, 3]);
        assert_eq!(vec.capacity(), 10);
    }

    #[test]
    fn insert_past_end_appends() {
        let mut vec: VlVec<u32, 4> = vlvec![1, 2];
        assert_eq!(vec.insert(10, 3), 2);
        assert_eq!(vec, [1, 2, 3]);
    }

    #[test]
    fn insert_nothing_is_a_no_op() {
        let mut vec: VlVec<u32, 2> = vlvec![1, 2];
        assert_eq!(vec.insert_many(1, []), 1);
        assert_eq!(vec.insert_from_slice(7, &[]), 2);
        assert_eq!(vec, [1, 2]);
        assert!(vec.is_inline());
    }

    #[test]
    fn insert_then_erase_round_trips() {
        for len in 0..20u32 {
            for index in 0..=len as usize {
                for count in 0..6u32 {
                    let original: VlVec<u32, 8> = sequence(len);
                    let mut vec = original.clone();
                    let items: Vec<u32> = (100..100 + count).collect();

                    let at = vec.insert_from_slice(index, &items);
                    assert_eq!(at, index);
                    assert_eq!(&vec[index..index + count as usize], items.as_slice());
                    check_invariants(&vec);

                    vec.erase(index, index + count as usize);
                    assert_eq!(vec, original);
                    check_invariants(&vec);
                }
            }
        }
    }

    #[test]
    fn erase_empty_range_returns_end() {
        let mut vec: VlVec<u32, 4> = sequence(6);
        for i in 0..6 {
            assert_eq!(vec.erase(i, i), 6);
        }
        assert_eq!(vec, [0, 1, 2, 3, 4, 5]);
        assert!(!vec.is_inline());
    }

    #[test]
    fn erase_invalid_ranges_are_ignored() {
        let mut vec: VlVec<u32, 4> = sequence(3);
        assert_eq!(vec.erase(3, 4), 3);
        assert_eq!(vec.erase(5, 9), 3);
        assert_eq!(vec.erase(2, 1), 3);
        assert_eq!(vec, [0, 1, 2]);
    }

    #[test]
    fn erase_clamps_last_to_end() {
        let mut vec: VlVec<u32, 4> = sequence(5);
        assert_eq!(vec.erase(3, 100), 3);
        assert_eq!(vec, [0, 1, 2]);
        assert!(vec.is_inline());
    }

    #[test]
    fn erase_returns_position_of_follower() {
        let mut vec: VlVec<u32, 4> = sequence(8);
        let next = vec.erase(2, 5);
        assert_eq!(next, 2);
        assert_eq!(vec[next], 5);
        assert_eq!(vec, [0, 1, 5, 6, 7]);
        assert!(!vec.is_inline());

        assert_eq!(vec.erase_at(4), 4);
        assert_eq!(vec.len(), 4);
        assert!(vec.is_inline());
        assert_eq!(vec, [0, 1, 5, 6]);
    }

    #[test]
    fn erase_shrink_boundary() {
        // Removing down to exactly `C` elements returns inline with the survivors in order.
        let mut vec: VlVec<u32, 4> = sequence(7);
        vec.erase(1, 4);
        assert!(vec.is_inline());
        assert_eq!(vec, [0, 4, 5, 6]);

        // One element above `C` stays on the heap.
        let mut vec: VlVec<u32, 4> = sequence(7);
        vec.erase(0, 2);
        assert!(!vec.is_inline());
        assert_eq!(vec, [2, 3, 4, 5, 6]);
    }

    #[test]
    fn erase_front_from_heap_into_inline() {
        let mut vec: VlVec<u32, 16> = sequence(40);
        assert_eq!(vec.erase(0, 30), 0);
        assert!(vec.is_inline());
        assert_eq!(vec, (30..40).collect::<Vec<_>>().as_slice());
    }

    #[test]
    fn remove_and_truncate_shrink() {
        let mut vec: VlVec<u32, 4> = sequence(5);
        assert_eq!(vec.remove(0), 0);
        assert!(vec.is_inline());
        assert_eq!(vec, [1, 2, 3, 4]);

        let mut vec: VlVec<u32, 4> = sequence(10);
        vec.truncate(8);
        assert!(!vec.is_inline());
        vec.truncate(2);
        assert!(vec.is_inline());
        assert_eq!(vec, [0, 1]);
    }

    #[test]
    #[should_panic]
    fn remove_out_of_bounds_panics() {
        let mut vec: VlVec<u32, 4> = sequence(2);
        vec.remove(2);
    }

    #[test]
    fn push_then_pop_restores_sequence() {
        for len in 0..12u32 {
            let mut vec: VlVec<u32, 5> = sequence(len);
            let before = vec.clone();
            vec.push(77);
            assert_eq!(vec.pop(), Some(77));
            assert_eq!(vec, before);
            assert_eq!(vec.len(), before.len());
            check_invariants(&vec);
        }
    }

    #[test]
    fn clear_releases_heap() {
        let mut vec: VlVec<u32, 4> = sequence(9);
        vec.clear();
        assert!(vec.is_empty());
        assert!(vec.is_inline());
        assert_eq!(vec.capacity(), 4);

        vec.push(1);
        assert_eq!(vec, [1]);
    }

    #[test]
    fn checked_access() {
        let mut vec: VlVec<u32, 2> = sequence(3);
        assert_eq!(vec.at(2), Ok(&2));
        assert_eq!(vec.at(3), Err(VlVecError::OutOfRange { index: 3, len: 3 }));
        *vec.at_mut(0).unwrap() = 10;
        assert_eq!(vec[0], 10);
        assert!(vec.at_mut(5).is_err());
    }

    #[test]
    fn pointer_follows_backing() {
        let mut vec: VlVec<u32, 2> = sequence(2);
        assert_eq!(unsafe { *vec.as_ptr().add(1) }, 1);
        vec.push(2);
        assert_eq!(unsafe { *vec.as_ptr().add(2) }, 2);
        unsafe { *vec.as_mut_ptr() = 5 };
        assert_eq!(vec, [5, 1, 2]);
    }

    #[test]
    fn iteration_forward_and_reverse() {
        let mut vec: VlVec<u32, 3> = sequence(5);
        let forward: Vec<u32> = vec.iter().copied().collect();
        let backward: Vec<u32> = vec.iter().rev().copied().collect();
        assert_eq!(forward, [0, 1, 2, 3, 4]);
        assert_eq!(backward, [4, 3, 2, 1, 0]);

        for item in &mut vec {
            *item *= 2;
        }
        let owned: Vec<u32> = vec.into_iter().rev().collect();
        assert_eq!(owned, [8, 6, 4, 2, 0]);
    }

    #[test]
    fn equality_ignores_representation() {
        let inline: VlVec<u32, 4> = vlvec![1, 2, 3];

        let mut shrunk: VlVec<u32, 4> = VlVec::new();
        shrunk.extend([9, 9, 1, 2, 3, 9]);
        shrunk.erase(0, 2);
        shrunk.pop();
        assert!(shrunk.is_inline());

        // Same elements on the heap with different capacities.
        let packed: VlVec<u32, 4> = vlvec![1, 2, 3, 4, 5];
        assert_eq!(packed.capacity(), 7);
        let mut roomy: VlVec<u32, 4> = (1..=8).collect();
        roomy.truncate(5);
        assert!(!roomy.is_inline());
        assert_eq!(roomy.capacity(), 12);

        let shorter: VlVec<u32, 4> = vlvec![1, 2];
        let different: VlVec<u32, 4> = vlvec![1, 2, 4];

        assert_eq!(inline, shrunk);
        assert_eq!(packed, roomy);
        assert_ne!(inline, packed);
        assert_ne!(inline, shorter);
        assert_ne!(inline, different);
    }

    #[test]
    fn clone_does_not_alias() {
        let original: VlVec<String, 2> = ["a", "b", "c"].iter().map(|s| String::from(*s)).collect();
        let mut copy = original.clone();
        assert_eq!(copy.backing_kind(), original.backing_kind());
        assert_eq!(copy.capacity(), original.capacity());
        assert_ne!(copy.as_ptr(), original.as_ptr());

        copy[0].push('!');
        copy.push(String::from("d"));
        assert_eq!(original, ["a", "b", "c"]);
        assert_eq!(copy, ["a!", "b", "c", "d"]);
    }

    #[test]
    fn clone_from_takes_source_shape() {
        let heap: VlVec<u32, 4> = sequence(9);
        let inline: VlVec<u32, 4> = sequence(2);

        let mut target = inline.clone();
        target.clone_from(&heap);
        assert_eq!(target, heap);
        assert_eq!(target.capacity(), heap.capacity());
        assert!(!target.is_inline());

        target.clone_from(&inline);
        assert_eq!(target, inline);
        assert!(target.is_inline());
        assert_eq!(target.capacity(), 4);
    }

    #[test]
    fn fill_and_range_construction() {
        let filled: VlVec<u8, 16> = VlVec::from_elem(3, 17);
        assert_eq!(filled.len(), 17);
        assert_eq!(filled.capacity(), 25);
        assert!(filled.iter().all(|&x| x == 3));

        let small: VlVec<u8, 16> = vlvec![3; 16];
        assert!(small.is_inline());

        let empty: VlVec<u8, 16> = VlVec::from_elem(3, 0);
        assert!(empty.is_empty());

        let ranged: VlVec<u32, 4> = (0..10).collect();
        assert_eq!(ranged.capacity(), 15);
        assert_eq!(ranged, (0..10).collect::<Vec<_>>().as_slice());
    }

    #[test]
    fn conversions() {
        let from_vec: VlVec<u32, 4> = VlVec::from(vec![1, 2, 3]);
        assert!(from_vec.is_inline());

        let from_vec: VlVec<u32, 4> = VlVec::from(vec![1, 2, 3, 4, 5, 6]);
        assert!(!from_vec.is_inline());
        assert_eq!(from_vec.capacity(), 9);
        assert_eq!(from_vec.into_vec(), [1, 2, 3, 4, 5, 6]);

        let from_slice: VlVec<u32, 4> = VlVec::from(&[1u32, 2][..]);
        assert_eq!(from_slice, [1, 2]);
        let back: Vec<u32> = from_slice.into();
        assert_eq!(back, [1, 2]);
    }

    #[test]
    fn extend_by_reference() {
        let mut vec: VlVec<u32, 2> = VlVec::new();
        vec.extend(&[1, 2, 3]);
        assert_eq!(vec, [1, 2, 3]);
        assert_eq!(vec.capacity(), 4);
    }

    #[test]
    fn ordering_and_hash_follow_slices() {
        use core::hash::{Hash, Hasher};
        use std::collections::hash_map::DefaultHasher;

        fn hash_of<H: Hash + ?Sized>(value: &H) -> u64 {
            let mut hasher = DefaultHasher::new();
            value.hash(&mut hasher);
            hasher.finish()
        }

        let a: VlVec<u32, 2> = vlvec![1, 2, 3];
        let b: VlVec<u32, 2> = vlvec![1, 3];
        assert!(a < b);
        assert_eq!(a.cmp(&a.clone()), Ordering::Equal);

        let small: VlVec<u32, 8> = vlvec![1, 2, 3];
        assert_eq!(hash_of(&a), hash_of(small.as_slice()));
    }

    #[test]
    fn transitions_drop_each_element_once() {
        let drops = Rc::new(Cell::new(0));
        {
            let mut vec: VlVec<Counted, 3> = VlVec::new();
            for _ in 0..10 {
                vec.push(Counted(drops.clone()));
            }
            assert_eq!(drops.get(), 0);
            vec.erase(1, 8);
            assert_eq!(drops.get(), 7);
            assert!(vec.is_inline());
            vec.insert_many(1, (0..5).map(|_| Counted(drops.clone())));
            assert!(!vec.is_inline());
            vec.clear();
            assert_eq!(drops.get(), 15);
            vec.push(Counted(drops.clone()));
        }
        assert_eq!(drops.get(), 16);
    }

    #[test]
    fn clone_panic_rolls_insert_back() {
        #[derive(Debug, PartialEq)]
        struct Fragile(u32);

        impl Clone for Fragile {
            fn clone(&self) -> Self {
                assert!(self.0 != 13, "unlucky");
                Fragile(self.0)
            }
        }

        // The insert moves the vector to the heap before the clone fails.
        let mut vec: VlVec<Fragile, 4> = (0..3).map(Fragile).collect();
        let source = [Fragile(1), Fragile(13), Fragile(2)];
        let result = catch_unwind(AssertUnwindSafe(|| {
            vec.insert_from_slice(1, &source);
        }));
        assert!(result.is_err());
        check_invariants(&vec);
        assert!(vec.is_inline());
        assert_eq!(vec, [Fragile(0), Fragile(1), Fragile(2)]);

        // Starting on the heap, the vector keeps its elements and stays there.
        let mut vec: VlVec<Fragile, 4> = (0..6).map(Fragile).collect();
        let result = catch_unwind(AssertUnwindSafe(|| {
            vec.insert_from_slice(0, &source);
        }));
        assert!(result.is_err());
        check_invariants(&vec);
        assert_eq!(vec, (0..6).map(Fragile).collect::<Vec<_>>().as_slice());

        vec.clear();
        vec.push(Fragile(5));
        assert_eq!(vec, [Fragile(5)]);
    }

    #[test]
    fn panicking_insert_drops_appended_items() {
        let drops = Rc::new(Cell::new(0));
        let mut vec: VlVec<Counted, 2> = VlVec::new();
        vec.push(Counted(drops.clone()));

        let source = drops.clone();
        let result = catch_unwind(AssertUnwindSafe(|| {
            vec.insert_many(
                0,
                (0..4).map(|i| {
                    assert!(i != 2, "source failed");
                    Counted(source.clone())
                }),
            );
        }));
        assert!(result.is_err());
        // Two items were appended and then dropped by the rollback.
        assert_eq!(drops.get(), 2);
        assert_eq!(vec.len(), 1);
        assert!(vec.is_inline());
        check_invariants(&vec);
    }

    #[test]
    fn failed_growth_leaves_vector_unchanged() {
        let mut vec: VlVec<u64, 4> = sequence_u64(3);
        let err = vec.try_insert_many(1, iter::repeat_n(0u64, usize::MAX / 4));
        assert!(matches!(err, Err(VlVecError::AllocFailed { .. })));
        assert_eq!(vec, [0, 1, 2]);
        assert!(vec.is_inline());

        let err = vec.try_insert_many(0, iter::repeat_n(0u64, usize::MAX));
        assert_eq!(err, Err(VlVecError::CapacityOverflow));
        assert_eq!(vec, [0, 1, 2]);

        assert_eq!(vec.try_insert(0, 9), Ok(0));
        assert_eq!(vec.try_push(10), Ok(()));
        assert_eq!(vec, [9, 0, 1, 2, 10]);
    }

    fn sequence_u64<const C: usize>(n: u64) -> VlVec<u64, C> {
        (0..n).collect()
    }

    #[test]
    fn zero_inline_capacity_always_uses_heap() {
        let mut vec: VlVec<u32, 0> = VlVec::new();
        assert!(vec.is_inline());
        vec.push(1);
        assert!(!vec.is_inline());
        assert_eq!(vec.capacity(), 1);
        vec.push(2);
        assert_eq!(vec.capacity(), 3);
        vec.pop();
        vec.pop();
        assert!(vec.is_inline());
        assert_eq!(vec.capacity(), 0);
    }

    #[test]
    fn zero_sized_elements() {
        let mut vec: VlVec<(), 2> = VlVec::new();
        for _ in 0..5 {
            vec.push(());
        }
        assert_eq!(vec.len(), 5);
        assert_eq!(vec.capacity(), 7);
        vec.erase(0, 4);
        assert!(vec.is_inline());
        assert_eq!(vec.len(), 1);
    }

    #[test]
    fn heap_only_past_inline_capacity() {
        let mut built: Vec<VlVec<u32, 4>> = vec![
            VlVec::new(),
            VlVec::default(),
            VlVec::from_elem(1, 3),
            VlVec::from_elem(1, 6),
            (0..4).collect(),
            (0..9).filter(|x| x % 2 == 0).collect(),
            VlVec::from(vec![1, 2]),
            VlVec::from(vec![1, 2, 3, 4, 5]),
            VlVec::from(&[1u32, 2, 3, 4][..]),
            vlvec![7; 4],
            vlvec![1, 2, 3, 4, 5, 6],
        ];
        let clones: Vec<VlVec<u32, 4>> = built.iter().cloned().collect();
        built.extend(clones);

        for vec in &mut built {
            check_invariants(&*vec);
            let len = vec.len();
            vec.extend(iter::empty::<u32>());
            check_invariants(&*vec);
            vec.truncate(len.saturating_sub(2));
            check_invariants(&*vec);

            let mut target: VlVec<u32, 4> = vlvec![9; 9];
            target.clone_from(vec);
            check_invariants(&target);
        }
    }

    #[test]
    fn random_operations_match_vec_model() {
        use rand::{Rng, SeedableRng, rngs::StdRng};

        let mut rng = StdRng::seed_from_u64(0x5EED_0516);
        let mut vec: VlVec<u32, 5> = VlVec::new();
        let mut model: Vec<u32> = Vec::new();

        for step in 0..50_000u32 {
            match rng.random_range(0..10) {
                0..=2 => {
                    vec.push(step);
                    model.push(step);
                }
                3 => assert_eq!(vec.pop(), model.pop()),
                4 => {
                    let index = rng.random_range(0..=model.len() + 2);
                    let count = rng.random_range(0..8u32);
                    let items: Vec<u32> = (step..step + count).collect();
                    let at = vec.insert_from_slice(index, &items);
                    let at_model = index.min(model.len());
                    assert_eq!(at, at_model);
                    for (offset, item) in items.into_iter().enumerate() {
                        model.insert(at_model + offset, item);
                    }
                }
                5 if !model.is_empty() => {
                    let first = rng.random_range(0..model.len());
                    let last = rng.random_range(first..=model.len() + 1);
                    let next = vec.erase(first, last);
                    if first == last {
                        assert_eq!(next, model.len());
                    } else {
                        assert_eq!(next, first);
                        model.drain(first..last.min(model.len()));
                    }
                }
                6 => {
                    // Spans that start past the end or run backwards.
                    let len = model.len();
                    let first = rng.random_range(len..len + 4);
                    assert_eq!(vec.erase(first, first + 2), len);
                    if len > 0 {
                        let first = rng.random_range(1..=len);
                        assert_eq!(vec.erase(first, first - 1), len);
                    }
                }
                7 => {
                    let len = rng.random_range(0..=model.len() + 1);
                    vec.truncate(len);
                    model.truncate(len);
                }
                8 => {
                    let copy = vec.clone();
                    assert_eq!(copy, vec);
                    assert_eq!(copy.capacity(), vec.capacity());
                    check_invariants(&copy);
                    vec = copy;
                }
                _ => {
                    if rng.random_bool(0.1) {
                        vec.clear();
                        model.clear();
                    }
                }
            }
            assert_eq!(vec.as_slice(), model.as_slice());
            check_invariants(&vec);
        }
    }

    #[test]
    fn debug_matches_slice() {
        let vec: VlVec<u32, 2> = vlvec![1, 2, 3];
        assert_eq!(alloc::format!("{vec:?}"), "[1, 2, 3]");
    }
}

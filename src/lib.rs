//! ## Intro
//!
//! A vector that stores small collections inline and moves them to the heap
//! only while they are too large for the inline buffer.
//!
//! [`VlVec<T, C>`] embeds a buffer of `C` slots. As long as the length stays within `C`,
//! no allocation happens. When an insertion would overflow the active buffer, every element
//! moves to a heap buffer sized by the [growth policy](policy::next_capacity); when removals
//! bring the length back to `C` or below, the elements move back inline and the heap
//! buffer is freed.
//!
//! ```
//! # use vlvec::{vlvec, BackingKind, VlVec};
//! let mut vec: VlVec<i32, 4> = vlvec![1, 2, 3];
//! assert_eq!(vec.backing_kind(), BackingKind::Inline);
//!
//! // Inserting past the inline capacity migrates to the heap.
//! vec.insert_many(0, [-2, -1]);
//! assert_eq!(vec.backing_kind(), BackingKind::Heap);
//! assert_eq!(vec, [-2, -1, 1, 2, 3]);
//!
//! // Erasing back down to 4 elements migrates back.
//! vec.erase(0, 1);
//! assert_eq!(vec.backing_kind(), BackingKind::Inline);
//! assert_eq!(vec, [-1, 1, 2, 3]);
//! ```
//!
//! ## Growth policy
//!
//! Growth is not amortized by doubling. Each time `k` elements do not fit, the new
//! capacity is `3 * (len + k) / 2`, computed from the current length.
//! See [`policy::next_capacity`].
//!
//! ## Errors
//!
//! Checked access ([`VlVec::at`]) returns [`VlVecError::OutOfRange`].
//! The `try_*` mutators return [`VlVecError::CapacityOverflow`] or
//! [`VlVecError::AllocFailed`] instead of panicking, and leave the vector unchanged.
//! Erasing an empty or out-of-range span is a no-op, not an error.
//!
//! ## Logging
//!
//! Backing transitions are reported as `trace` events through [`tracing`],
//! failed allocations as `debug` events.
//!
//! ## `no_std` support
//!
//! This crate requires only `core` and `alloc`.
//!
//! ### Alias
//!
//! - [`MiniVlVec<T>`] = `VlVec<T, 8>`, for tiny collections
//! - `VlVec<T>` defaults to an inline capacity of [`INIT_STATIC_CAP`] (16).
#![no_std]

extern crate alloc;

mod backing;
mod error;

pub mod inline_buf;
pub mod policy;

pub mod vl_vec;

#[doc(inline)]
pub use backing::BackingKind;
#[doc(inline)]
pub use error::VlVecError;
#[doc(inline)]
pub use vl_vec::{INIT_STATIC_CAP, VlVec};

/// A small `VlVec` with an inline capacity of 8 elements.
///
/// This is an alias for [`VlVec<T, 8>`].
///
/// # Examples
///
/// ```
/// # use vlvec::MiniVlVec;
/// let mut vec: MiniVlVec<i32> = MiniVlVec::new();
/// vec.extend([1, 2, 3, 4, 5, 6, 7, 8]);
/// assert!(vec.is_inline());
///
/// vec.push(9);
/// assert!(!vec.is_inline());
/// assert_eq!(vec.capacity(), 13);
/// ```
pub type MiniVlVec<T> = VlVec<T, 8>;

use core::{alloc::Layout, fmt};

/// Error type for checked element access and fallible growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VlVecError {
    /// Checked access with `index >= len`.
    OutOfRange {
        /// The requested index.
        index: usize,
        /// The length of the vector at the time of the access.
        len: usize,
    },
    /// The capacity computation overflowed `usize`.
    CapacityOverflow,
    /// The allocator could not provide a heap buffer.
    AllocFailed {
        /// The number of slots that were requested.
        capacity: usize,
    },
}

impl fmt::Display for VlVecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VlVecError::OutOfRange { index, len } => {
                write!(f, "Index out of range error. (index: {index}, len: {len})")
            }
            VlVecError::CapacityOverflow => f.write_str("capacity overflow"),
            VlVecError::AllocFailed { capacity } => {
                write!(f, "failed to allocate a heap buffer of {capacity} elements")
            }
        }
    }
}

impl core::error::Error for VlVecError {}

/// Unwraps the result of a growth operation on behalf of the infallible mutators.
///
/// Overflow panics like `Vec` does; allocation failure goes to the global
/// allocation error handler with the layout of the requested buffer.
pub(crate) fn infallible<T, R>(result: Result<R, VlVecError>) -> R {
    match result {
        Ok(value) => value,
        Err(VlVecError::AllocFailed { capacity }) => match Layout::array::<T>(capacity) {
            Ok(layout) => alloc::alloc::handle_alloc_error(layout),
            Err(_) => panic!("capacity overflow"),
        },
        Err(err) => panic!("{err}"),
    }
}

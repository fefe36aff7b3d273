//! Growth policy shared by every mutator that adds elements.

/// Computes the capacity to use when `growth` elements are about to be added
/// to a vector currently holding `current_size` elements.
///
/// - If the result still fits the inline buffer, the inline capacity is returned.
/// - Otherwise the target is `floor(3 * (current_size + growth) / 2)`.
///
/// The target is recomputed from the current size on every growth event, so
/// single-element growth past the threshold yields a fresh, larger target each time.
///
/// Returns `None` if the computation overflows `usize`.
///
/// # Examples
///
/// ```
/// # use vlvec::policy::next_capacity;
/// assert_eq!(next_capacity(16, 15, 1), Some(16));
/// assert_eq!(next_capacity(16, 16, 1), Some(25));
/// assert_eq!(next_capacity(16, 0, 40), Some(60));
/// assert_eq!(next_capacity(16, usize::MAX, 1), None);
/// ```
#[inline]
pub const fn next_capacity(inline_capacity: usize, current_size: usize, growth: usize) -> Option<usize> {
    let Some(required) = current_size.checked_add(growth) else {
        return None;
    };
    if required <= inline_capacity {
        return Some(inline_capacity);
    }
    match required.checked_mul(3) {
        Some(scaled) => Some(scaled / 2),
        None => None,
    }
}

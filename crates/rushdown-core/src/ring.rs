//! Wrap-around index helpers for fixed-size ring buffers
//!
//! All ring arithmetic in the engine goes through these helpers instead of
//! raw `%`, which would produce negative results for negative operands.

/// Wrap a possibly-negative index into `[0, len)`
///
/// # Example
///
/// ```
/// use rushdown_core::wrap_index;
///
/// assert_eq!(wrap_index(5, 64), 5);
/// assert_eq!(wrap_index(64, 64), 0);
/// assert_eq!(wrap_index(-1, 64), 63);
/// ```
pub fn wrap_index(index: isize, len: usize) -> usize {
    debug_assert!(len > 0, "ring length must be non-zero");
    let len = len as isize;
    (((index % len) + len) % len) as usize
}

/// Step one slot backwards in a ring of the given length
pub fn previous_index(index: usize, len: usize) -> usize {
    wrap_index(index as isize - 1, len)
}

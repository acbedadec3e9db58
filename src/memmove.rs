//! Overlap-safe byte move.
#![allow(unsafe_code)]

/// Move `n` bytes from `src` to `dest` with memmove semantics.
///
/// The result is the same as if all of `src` were read before any byte of
/// `dest` is written, so overlapping regions in either direction are fine.
///
/// # Safety
///
/// - `src` must be valid for reads of `n` bytes
/// - `dest` must be valid for writes of `n` bytes
/// - Regions may overlap
#[inline(always)]
pub unsafe fn move_bytes(dest: *mut u8, src: *const u8, n: usize) -> *mut u8 {
    if n == 0 || core::ptr::eq(dest as *const u8, src) {
        return dest;
    }

    // SAFETY: caller guarantees both regions are valid for `n` bytes.
    // `ptr::copy` picks the copy direction itself.
    unsafe { core::ptr::copy(src, dest, n) };
    dest
}

//! # Heap Shim
//!
//! Thin wrapper over the C allocator. No headers, no size tracking, no
//! retries: exhaustion is reported as `None` and left to the caller.

use std::ptr::{self, NonNull};
use tracing::warn;

/// Allocates at least `size` bytes, suitably aligned for any C type.
///
/// Returns `None` when the host allocator is exhausted. A zero `size` is
/// passed through to the allocator unchanged: depending on the C library it
/// yields either `None` or a unique block that must still be released, so
/// `None` only means exhaustion when `size > 0`.
pub fn allocate(size: usize) -> Option<NonNull<u8>> {
    // SAFETY: malloc has no preconditions; a null return maps to None.
    let block = NonNull::new(unsafe { libc::malloc(size) }.cast::<u8>());
    if block.is_none() && size > 0 {
        warn!(size, "host allocator exhausted");
    }
    block
}

/// Resizes `block` to at least `new_size` bytes, keeping the first
/// `min(old_size, new_size)` bytes.
///
/// `old_size` is accepted for symmetry with hosts that need it; the C
/// allocator does not. A `None` block behaves like [`allocate`]. Resizing to
/// zero releases the block and returns `None`. On failure the original block
/// is left untouched and still owned by the caller.
///
/// # Safety
///
/// `block` must be `None` or a live block returned by this module that has not
/// been released.
pub unsafe fn reallocate(
    block: Option<NonNull<u8>>,
    old_size: usize,
    new_size: usize,
) -> Option<NonNull<u8>> {
    if new_size == 0 {
        release(block);
        return None;
    }

    let raw = block.map_or(ptr::null_mut(), |b| b.as_ptr().cast::<libc::c_void>());
    let resized = NonNull::new(libc::realloc(raw, new_size).cast::<u8>());
    if resized.is_none() {
        warn!(old_size, new_size, "host allocator exhausted during reallocation");
    }
    resized
}

/// Returns `block` to the host allocator. `None` is a no-op.
///
/// # Safety
///
/// `block` must be `None` or a live block returned by this module; releasing
/// the same block twice is undefined behaviour.
pub unsafe fn release(block: Option<NonNull<u8>>) {
    if let Some(block) = block {
        libc::free(block.as_ptr().cast::<libc::c_void>());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_release() {
        let block = allocate(64).expect("allocation failed");
        unsafe {
            ptr::write_bytes(block.as_ptr(), 0xAB, 64);
            assert_eq!(*block.as_ptr().add(63), 0xAB);
            release(Some(block));
        }
    }

    #[test]
    fn test_zero_size_allocation_is_releasable() {
        let block = allocate(0);
        unsafe { release(block) };
    }

    #[test]
    fn test_release_none_is_noop() {
        unsafe { release(None) };
    }

    #[test]
    fn test_exhaustion_returns_none() {
        assert!(allocate(usize::MAX).is_none());
    }

    #[test]
    fn test_reallocate_grow_preserves_prefix() {
        unsafe {
            let block = allocate(16).unwrap();
            for i in 0..16u8 {
                *block.as_ptr().add(usize::from(i)) = i;
            }

            let grown = reallocate(Some(block), 16, 4096).unwrap();
            for i in 0..16u8 {
                assert_eq!(*grown.as_ptr().add(usize::from(i)), i);
            }
            release(Some(grown));
        }
    }

    #[test]
    fn test_reallocate_shrink_preserves_prefix() {
        unsafe {
            let block = allocate(128).unwrap();
            ptr::write_bytes(block.as_ptr(), 7, 128);

            let shrunk = reallocate(Some(block), 128, 8).unwrap();
            for i in 0..8 {
                assert_eq!(*shrunk.as_ptr().add(i), 7);
            }
            release(Some(shrunk));
        }
    }

    #[test]
    fn test_failed_reallocate_keeps_original_block() {
        unsafe {
            let block = allocate(16).unwrap();
            for i in 0..16u8 {
                *block.as_ptr().add(usize::from(i)) = i + 100;
            }

            assert!(reallocate(Some(block), 16, usize::MAX).is_none());

            for i in 0..16u8 {
                assert_eq!(*block.as_ptr().add(usize::from(i)), i + 100);
            }
            release(Some(block));
        }
    }

    #[test]
    fn test_reallocate_from_none_allocates() {
        unsafe {
            let block = reallocate(None, 0, 32).unwrap();
            release(Some(block));
        }
    }

    #[test]
    fn test_reallocate_to_zero_releases() {
        unsafe {
            let block = allocate(32);
            assert!(reallocate(block, 32, 0).is_none());
        }
    }
}

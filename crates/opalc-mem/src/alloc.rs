//! The allocator capability and the process-heap implementation.

use std::alloc::Layout;
use std::ptr::NonNull;

/// Alignment guaranteed for every block handed out by an [`Allocator`].
///
/// Large enough for any scalar the front end stores in allocator-backed
/// storage (u64 key/value arrays, atom records with u64 headers).
pub const BLOCK_ALIGN: usize = 16;

/// A resizable-allocation capability.
///
/// The whole contract is a single operation mapping an old region to a new
/// one. Every owning structure in the front end takes an allocator
/// explicitly; none of them assume a global one.
///
/// # Contract
///
/// - `resize(None, 0, n)` with `n > 0` allocates fresh storage.
/// - `resize(Some(p), old, n)` with `n > old` grows the region; contents up
///   to `old` are preserved, contents beyond are unspecified.
/// - `resize(Some(p), old, n)` with `0 < n <= old` may return the same
///   storage unchanged. Shrinking is a no-op, not a guaranteed reclaim.
/// - `resize(Some(p), old, 0)` releases the region and returns `None`.
/// - Failure is signaled by `None`; the old region is left intact.
pub trait Allocator {
    /// Map the region `(old, old_size)` to a region of `new_size` bytes.
    fn resize(
        &self,
        old: Option<NonNull<u8>>,
        old_size: usize,
        new_size: usize,
    ) -> Option<NonNull<u8>>;
}

/// Allocator backed by the process heap.
///
/// Delegates to `std::alloc`. Unlike [`crate::FixedVmAllocator`], growth may
/// move the storage, so callers must always use the returned pointer.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemAllocator;

impl SystemAllocator {
    /// Creates a heap-backed allocator.
    pub const fn new() -> Self {
        SystemAllocator
    }
}

impl Allocator for SystemAllocator {
    fn resize(
        &self,
        old: Option<NonNull<u8>>,
        old_size: usize,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        unsafe {
            match (old, new_size) {
                (None, 0) => None,
                (None, n) => {
                    let layout = Layout::from_size_align(n, BLOCK_ALIGN).ok()?;
                    NonNull::new(std::alloc::alloc(layout))
                }
                (Some(p), 0) => {
                    if old_size > 0 {
                        let layout = Layout::from_size_align(old_size, BLOCK_ALIGN).ok()?;
                        std::alloc::dealloc(p.as_ptr(), layout);
                    }
                    None
                }
                (Some(p), n) => {
                    if old_size == 0 {
                        let layout = Layout::from_size_align(n, BLOCK_ALIGN).ok()?;
                        return NonNull::new(std::alloc::alloc(layout));
                    }
                    let layout = Layout::from_size_align(old_size, BLOCK_ALIGN).ok()?;
                    NonNull::new(std::alloc::realloc(p.as_ptr(), layout, n))
                }
            }
        }
    }
}

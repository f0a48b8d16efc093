//! Fixed-capacity virtual-memory arena.

use std::ptr::NonNull;

use crate::alloc::Allocator;
use crate::os;
use crate::page::align_to_page;

/// Allocator that reserves a fixed address range and grows in place.
///
/// On the first allocation the entire capacity is reserved as an
/// inaccessible address range; only the requested (page-rounded) prefix is
/// committed. Growth commits the additional page range without moving the
/// base address, which is what lets indices and pointers into arena-resident
/// structures survive a grow. Shrinking never decommits.
///
/// Requests beyond the reserved capacity fail deterministically: the
/// failure is logged and the call returns `None`. This is a hard ceiling,
/// not a retryable condition.
///
/// The allocator itself is a stateless capability; each fresh allocation
/// obtained from it carries its own reservation of the full capacity. In
/// practice one arena serves one big growable region.
#[derive(Clone, Copy, Debug)]
pub struct FixedVmAllocator {
    reserve_size: usize,
}

impl FixedVmAllocator {
    /// Creates an arena allocator with the given capacity in bytes.
    ///
    /// The capacity is rounded up to the page size and bounds every region
    /// later obtained through [`Allocator::resize`].
    pub fn new(reserve_size: usize) -> Self {
        Self {
            reserve_size: align_to_page(reserve_size),
        }
    }

    /// The reserved capacity in bytes (page-rounded).
    pub fn capacity(&self) -> usize {
        self.reserve_size
    }
}

impl Allocator for FixedVmAllocator {
    fn resize(
        &self,
        old: Option<NonNull<u8>>,
        old_size: usize,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        let old_size = align_to_page(old_size);
        let new_size = align_to_page(new_size);

        // Shrink-in-place is a no-op; nothing is decommitted.
        if new_size > 0 && new_size <= old_size {
            return old;
        }

        if new_size > self.reserve_size {
            log::error!(
                "fixed virtual memory arena out of memory: wanted {} bytes but only {} are reserved",
                new_size,
                self.reserve_size
            );
            return None;
        }

        match (old, new_size) {
            (None, 0) => None,
            (None, wanted) => {
                let base = os::reserve(self.reserve_size)?;
                if !os::commit(base.as_ptr(), wanted) {
                    os::release(base.as_ptr(), self.reserve_size);
                    return None;
                }
                Some(base)
            }
            (Some(base), 0) => {
                os::release(base.as_ptr(), self.reserve_size);
                None
            }
            (Some(base), wanted) => {
                let extra = unsafe { base.as_ptr().add(old_size) };
                if !os::commit(extra, wanted - old_size) {
                    return None;
                }
                Some(base)
            }
        }
    }
}

//! Page size helpers.
//!
//! The fixed virtual-memory arena rounds every request up to the OS page
//! size before reserving or committing. The size is queried once and cached.

use std::sync::atomic::{AtomicUsize, Ordering};

/// System page size (cached)
static SYSTEM_PAGE_SIZE: AtomicUsize = AtomicUsize::new(0);

/// Get system page size dynamically
///
/// Returns the actual system page size from the OS and caches the result.
pub fn page_size() -> usize {
    let cached = SYSTEM_PAGE_SIZE.load(Ordering::Relaxed);
    if cached != 0 {
        return cached;
    }

    let size = page_size::get();
    SYSTEM_PAGE_SIZE.store(size, Ordering::Relaxed);
    size
}

/// Align size to page boundary (round up)
pub fn align_to_page(size: usize) -> usize {
    let ps = page_size();
    (size + ps - 1) & !(ps - 1)
}

/// Check if address is page-aligned
pub fn is_page_aligned(addr: usize) -> bool {
    addr % page_size() == 0
}

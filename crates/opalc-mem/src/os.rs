//! Platform virtual-memory primitives.
//!
//! Exactly the four operations the fixed arena needs: reserve an address
//! range without committing it, commit a sub-range, and release the whole
//! range. Sizes passed here must already be page-aligned.

use std::ptr::NonNull;

/// Reserve `size` bytes of address space without committing physical memory.
///
/// The returned range is inaccessible until [`commit`] is called on it.
#[cfg(unix)]
pub(crate) fn reserve(size: usize) -> Option<NonNull<u8>> {
    #[cfg(target_os = "linux")]
    const NORESERVE: libc::c_int = libc::MAP_NORESERVE;
    #[cfg(not(target_os = "linux"))]
    const NORESERVE: libc::c_int = 0;

    let ptr = unsafe {
        libc::mmap(
            std::ptr::null_mut(),
            size,
            libc::PROT_NONE,
            libc::MAP_PRIVATE | libc::MAP_ANONYMOUS | NORESERVE,
            -1,
            0,
        )
    };

    if ptr == libc::MAP_FAILED {
        log::error!(
            "failed to reserve {} bytes of address space: {}",
            size,
            std::io::Error::last_os_error()
        );
        return None;
    }

    NonNull::new(ptr as *mut u8)
}

/// Commit `size` bytes starting at `ptr`, making them readable and writable.
#[cfg(unix)]
pub(crate) fn commit(ptr: *mut u8, size: usize) -> bool {
    let result = unsafe {
        libc::mprotect(
            ptr as *mut libc::c_void,
            size,
            libc::PROT_READ | libc::PROT_WRITE,
        )
    };

    if result != 0 {
        log::error!(
            "failed to commit {} bytes: {}",
            size,
            std::io::Error::last_os_error()
        );
        return false;
    }
    true
}

/// Release a range previously obtained from [`reserve`].
///
/// `size` must be the full reserved size, committed or not.
#[cfg(unix)]
pub(crate) fn release(ptr: *mut u8, size: usize) {
    let result = unsafe { libc::munmap(ptr as *mut libc::c_void, size) };
    if result != 0 {
        log::error!(
            "failed to release {} bytes: {}",
            size,
            std::io::Error::last_os_error()
        );
    }
}

#[cfg(windows)]
pub(crate) fn reserve(size: usize) -> Option<NonNull<u8>> {
    use windows_sys::Win32::System::Memory::{VirtualAlloc, MEM_RESERVE, PAGE_NOACCESS};

    let ptr = unsafe { VirtualAlloc(std::ptr::null(), size, MEM_RESERVE, PAGE_NOACCESS) };

    if ptr.is_null() {
        log::error!(
            "failed to reserve {} bytes of address space: {}",
            size,
            std::io::Error::last_os_error()
        );
        return None;
    }

    NonNull::new(ptr as *mut u8)
}

#[cfg(windows)]
pub(crate) fn commit(ptr: *mut u8, size: usize) -> bool {
    use windows_sys::Win32::System::Memory::{VirtualAlloc, MEM_COMMIT, PAGE_READWRITE};

    let result = unsafe { VirtualAlloc(ptr as *const _, size, MEM_COMMIT, PAGE_READWRITE) };

    if result.is_null() {
        log::error!(
            "failed to commit {} bytes: {}",
            size,
            std::io::Error::last_os_error()
        );
        return false;
    }
    true
}

#[cfg(windows)]
pub(crate) fn release(ptr: *mut u8, _size: usize) {
    use windows_sys::Win32::System::Memory::{VirtualFree, MEM_RELEASE};

    let result = unsafe { VirtualFree(ptr as *mut _, 0, MEM_RELEASE) };
    if result == 0 {
        log::error!(
            "failed to release reservation: {}",
            std::io::Error::last_os_error()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::page_size;

    #[test]
    fn test_reserve_commit_release() {
        let ps = page_size();
        let base = reserve(ps * 4).unwrap();

        assert!(commit(base.as_ptr(), ps));

        // Committed pages must be readable and writable.
        unsafe {
            let bytes = std::slice::from_raw_parts_mut(base.as_ptr(), ps);
            bytes[0] = 0xAB;
            bytes[ps - 1] = 0xCD;
            assert_eq!(bytes[0], 0xAB);
            assert_eq!(bytes[ps - 1], 0xCD);
        }

        release(base.as_ptr(), ps * 4);
    }

    #[test]
    fn test_commit_subrange() {
        let ps = page_size();
        let base = reserve(ps * 8).unwrap();

        assert!(commit(base.as_ptr(), ps * 2));
        assert!(commit(unsafe { base.as_ptr().add(ps * 2) }, ps * 2));

        unsafe {
            let bytes = std::slice::from_raw_parts_mut(base.as_ptr(), ps * 4);
            bytes[ps * 4 - 1] = 0x42;
            assert_eq!(bytes[ps * 4 - 1], 0x42);
        }

        release(base.as_ptr(), ps * 8);
    }
}

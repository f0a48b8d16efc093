//! opalc-mem - Memory Allocation Primitives
//!
//! This crate provides the allocator abstraction shared by every owning
//! structure in the Opal compiler front end. An [`Allocator`] is a small
//! capability value exposing a single resize/free operation; callers thread
//! one explicitly into every allocating call instead of relying on a
//! process-wide default, which keeps resource lifetimes explicit and
//! testable.
//!
//! Two implementations are provided:
//!
//! - [`SystemAllocator`] - a thin wrapper over the process heap. Growth may
//!   move the storage, as with any reallocation.
//! - [`FixedVmAllocator`] - a fixed-capacity arena backed by virtual memory.
//!   The entire address range is reserved up front and physical pages are
//!   committed on demand as the allocation grows, so the base address never
//!   moves. Pointers and offsets into arena-resident structures stay valid
//!   across growth.
//!
//! # Example
//!
//! ```
//! use opalc_mem::{Allocator, FixedVmAllocator};
//!
//! let arena = FixedVmAllocator::new(1024 * 1024);
//! let block = arena.resize(None, 0, 4096).expect("reserve failed");
//! let block = arena.resize(Some(block), 4096, 8192).expect("grow failed");
//! arena.resize(Some(block), 8192, 0);
//! ```

pub mod alloc;
pub mod arena;
pub mod page;

mod os;

pub use alloc::{Allocator, SystemAllocator};
pub use arena::FixedVmAllocator;

//! Content-addressed string interning.
//!
//! An [`Atom`] is a handle to an immutable byte string stored once inside
//! the table's arena. Interning the same bytes twice returns the same
//! handle, so handle equality *is* content equality and name comparisons
//! downstream are a single integer compare.
//!
//! Records are bucketed by a 64-bit content hash, but the stored bytes are
//! always verified before a handle is reused: two distinct strings whose
//! hashes collide receive distinct handles via re-probing with derived
//! hashes. The table is the sole source of truth for identity; callers must
//! never compare the underlying text themselves.
//!
//! All records and the lookup table's storage live inside one fixed
//! virtual-memory arena. The arena's base address never moves across
//! growth, which is what keeps the `u32` record offsets used as handles
//! stable for the table's whole lifetime. Atoms are never freed
//! individually; everything is released at once when the table is dropped.

use std::hash::Hasher;
use std::ptr::NonNull;

use opalc_mem::page::align_to_page;
use opalc_mem::{Allocator, FixedVmAllocator};
use static_assertions::assert_eq_size;
use thiserror::Error;

use crate::hash::{HashError, HashTable, TOMBSTONE};

/// Default arena capacity for a fresh table.
pub const DEFAULT_CAPACITY: usize = 16 * 1024 * 1024;

/// Record header: content hash (8 bytes) + text length (4 bytes).
const HEADER_SIZE: usize = 12;

/// Probe schedule for content collisions, from the interner's bucketing:
/// derived keys `hash + i * PROBE_PRIME` spread colliding contents across
/// distinct lookup entries.
const MAX_PROBES: u64 = 32;
const PROBE_PRIME: u64 = 0x9e37_79b9_7f4a_7c15;

/// Handle to an interned string.
///
/// Internally the byte offset of the record inside the owning table's
/// arena. Handles are only meaningful together with the table that issued
/// them; comparing handles from different tables is a logic error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Atom(u32);

assert_eq_size!(Atom, u32);

impl Atom {
    /// Raw arena offset, useful for logging and tests.
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Error type for interning operations
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum AtomError {
    /// The arena cannot hold another record.
    #[error("atom arena exhausted: needed {needed} bytes of {reserved} reserved")]
    ArenaFull { needed: usize, reserved: usize },

    /// The probe schedule was exhausted without placing the record.
    #[error("could not register atom within {MAX_PROBES} probe attempts")]
    ProbesExhausted,

    /// The lookup table could not grow.
    #[error(transparent)]
    Table(#[from] HashError),
}

/// Interning table: content hash to arena-resident record.
///
/// Owns a [`FixedVmAllocator`] sized at construction, a bump-allocated
/// record region inside it, and a [`HashTable`] mapping probe keys to
/// record offsets. Dropping the table releases all of it in one step.
pub struct AtomTable {
    alloc: FixedVmAllocator,
    lookup: HashTable,
    /// Base of the record region; never moves once set.
    base: Option<NonNull<u8>>,
    /// Bytes currently committed for the record region.
    committed: usize,
    /// Bump offset of the next record.
    used: usize,
    count: u32,
}

impl AtomTable {
    /// Creates a table with [`DEFAULT_CAPACITY`] of reserved arena space.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a table whose arena reserves `capacity` bytes.
    ///
    /// Nothing is reserved or committed until the first intern.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            alloc: FixedVmAllocator::new(capacity),
            lookup: HashTable::new(),
            base: None,
            committed: 0,
            used: 0,
            count: 0,
        }
    }

    /// Number of distinct atoms stored.
    pub fn len(&self) -> usize {
        self.count as usize
    }

    /// Returns true if nothing has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Bytes of the record region currently in use.
    pub fn arena_used(&self) -> usize {
        self.used
    }

    fn hash_bytes(bytes: &[u8]) -> u64 {
        let mut hasher = ahash::AHasher::default();
        hasher.write(bytes);
        hasher.finish()
    }

    /// Interns `bytes`, returning the existing handle if the exact content
    /// is already stored.
    pub fn intern(&mut self, bytes: &[u8]) -> Result<Atom, AtomError> {
        self.intern_with(Self::hash_bytes(bytes), bytes)
    }

    /// Looks up `bytes` without inserting.
    pub fn find(&self, bytes: &[u8]) -> Option<Atom> {
        self.find_with(Self::hash_bytes(bytes), bytes)
    }

    pub(crate) fn intern_with(&mut self, hash: u64, bytes: &[u8]) -> Result<Atom, AtomError> {
        let mut key = hash;
        for probe in 1..=MAX_PROBES {
            // Keys that land on the table's reserved slot markers take the
            // next derived key instead.
            if key < TOMBSTONE {
                match self.lookup.get(key) {
                    Some(offset) => {
                        let atom = Atom(offset as u32);
                        if self.bytes(atom) == bytes {
                            return Ok(atom);
                        }
                        // Same key, different content: keep probing.
                    }
                    None => {
                        let atom = self.push_record(hash, bytes)?;
                        self.lookup.insert(key, atom.0 as u64, &self.alloc)?;
                        self.count += 1;
                        return Ok(atom);
                    }
                }
            }
            key = hash.wrapping_add(probe.wrapping_mul(PROBE_PRIME));
        }
        Err(AtomError::ProbesExhausted)
    }

    pub(crate) fn find_with(&self, hash: u64, bytes: &[u8]) -> Option<Atom> {
        let mut key = hash;
        for probe in 1..=MAX_PROBES {
            if key < TOMBSTONE {
                let offset = self.lookup.get(key)?;
                let atom = Atom(offset as u32);
                if self.bytes(atom) == bytes {
                    return Some(atom);
                }
            }
            key = hash.wrapping_add(probe.wrapping_mul(PROBE_PRIME));
        }
        None
    }

    /// The interned text of `atom`.
    pub fn bytes(&self, atom: Atom) -> &[u8] {
        let base = match self.base {
            Some(b) => b.as_ptr(),
            None => return &[],
        };
        let offset = atom.0 as usize;
        debug_assert!(offset + HEADER_SIZE <= self.used);
        unsafe {
            let len = (base.add(offset + 8) as *const u32).read() as usize;
            std::slice::from_raw_parts(base.add(offset + HEADER_SIZE), len)
        }
    }

    /// The interned text as UTF-8, with invalid sequences replaced.
    pub fn text(&self, atom: Atom) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(self.bytes(atom))
    }

    /// The content hash stored in the record of `atom`.
    pub fn hash_of(&self, atom: Atom) -> u64 {
        let base = match self.base {
            Some(b) => b.as_ptr(),
            None => return 0,
        };
        debug_assert!(atom.0 as usize + HEADER_SIZE <= self.used);
        unsafe { (base.add(atom.0 as usize) as *const u64).read() }
    }

    /// Appends a record `[hash][len][bytes][NUL]` to the region, growing the
    /// committed range as needed. Records are 8-byte aligned so the header
    /// reads stay aligned.
    fn push_record(&mut self, hash: u64, bytes: &[u8]) -> Result<Atom, AtomError> {
        let record_size = (HEADER_SIZE + bytes.len() + 1 + 7) & !7;
        let offset = self.used;
        let needed = offset + record_size;

        if offset > u32::MAX as usize {
            return Err(AtomError::ArenaFull {
                needed,
                reserved: self.alloc.capacity(),
            });
        }
        self.ensure_committed(needed)?;

        let Some(base) = self.base else {
            return Err(AtomError::ArenaFull {
                needed,
                reserved: self.alloc.capacity(),
            });
        };
        let base = base.as_ptr();
        unsafe {
            let record = base.add(offset);
            (record as *mut u64).write(hash);
            (record.add(8) as *mut u32).write(bytes.len() as u32);
            std::ptr::copy_nonoverlapping(bytes.as_ptr(), record.add(HEADER_SIZE), bytes.len());
            record.add(HEADER_SIZE + bytes.len()).write(0);
        }

        self.used = needed;
        Ok(Atom(offset as u32))
    }

    fn ensure_committed(&mut self, needed: usize) -> Result<(), AtomError> {
        if needed <= self.committed {
            return Ok(());
        }

        let full = AtomError::ArenaFull {
            needed,
            reserved: self.alloc.capacity(),
        };
        if needed > self.alloc.capacity() {
            return Err(full);
        }

        // Double the committed range so record appends stay amortized.
        let target = needed
            .max(self.committed.saturating_mul(2))
            .min(self.alloc.capacity());
        match self.base {
            None => {
                self.base = Some(self.alloc.resize(None, 0, target).ok_or(full)?);
            }
            Some(base) => {
                self.alloc
                    .resize(Some(base), self.committed, target)
                    .ok_or(full)?;
            }
        }
        self.committed = align_to_page(target);
        Ok(())
    }
}

impl Default for AtomTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AtomTable {
    fn drop(&mut self) {
        self.lookup.free(&self.alloc);
        if let Some(base) = self.base.take() {
            self.alloc.resize(Some(base), self.committed, 0);
        }
    }
}

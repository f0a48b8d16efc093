//! Open-addressing hash table from 64-bit key to 64-bit value.
//!
//! This is the generic associative primitive of the front end. It makes two
//! deliberate trade-offs:
//!
//! - Probing past a key's home bucket is capped at [`MAX_PROBE_DISTANCE`]
//!   slots. A lookup that exhausts the bound reports "not found" exactly
//!   like a true miss; an insertion that exhausts it grows the table and
//!   retries. The cap bounds worst-case lookup latency.
//! - Two key values are reserved as slot markers and can never be stored.
//!   Operations on a reserved key are rejected instead of corrupting the
//!   table.
//!
//! The table owns no allocator. Every allocating operation takes one
//! explicitly, and [`HashTable::free`] must be called with the same
//! allocator before the table is discarded.

use std::mem;
use std::ptr::NonNull;

use opalc_mem::Allocator;
use thiserror::Error;

/// Marker for a slot whose key was removed. Probing continues past it.
pub const TOMBSTONE: u64 = 0xFFFF_FFFF_FFFF_FFFE;

/// Marker for a slot that never held a key. Probing stops at it.
pub const UNUSED: u64 = 0xFFFF_FFFF_FFFF_FFFF;

/// Maximum number of slots scanned past the home bucket before a lookup
/// gives up or an insertion forces a grow.
pub const MAX_PROBE_DISTANCE: u32 = 6;

/// Error type for hash table operations
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum HashError {
    /// The key collides with one of the reserved slot markers.
    #[error("key {0:#018x} is reserved for slot bookkeeping")]
    ReservedKey(u64),

    /// The supplied allocator could not provide backing storage.
    #[error("allocator could not satisfy the table's storage request")]
    OutOfMemory,
}

/// Map from `u64` to `u64` with linear probing and a bounded probe distance.
///
/// Keys and values live in parallel arrays inside one allocation. A table
/// with zero buckets owns no storage at all; the first insertion allocates.
///
/// No iteration or deletion ordering is guaranteed.
pub struct HashTable {
    num_buckets: u32,
    /// Combined storage: keys at `[0, n)`, values at `[n, 2n)`.
    slots: Option<NonNull<u64>>,
}

impl HashTable {
    /// Creates an empty table owning no storage.
    pub const fn new() -> Self {
        Self {
            num_buckets: 0,
            slots: None,
        }
    }

    /// Number of buckets currently allocated.
    pub fn num_buckets(&self) -> u32 {
        self.num_buckets
    }

    fn keys(&self) -> &[u64] {
        match self.slots {
            Some(p) => unsafe { std::slice::from_raw_parts(p.as_ptr(), self.num_buckets as usize) },
            None => &[],
        }
    }

    fn keys_mut(&mut self) -> &mut [u64] {
        match self.slots {
            Some(p) => unsafe {
                std::slice::from_raw_parts_mut(p.as_ptr(), self.num_buckets as usize)
            },
            None => &mut [],
        }
    }

    fn values(&self) -> &[u64] {
        match self.slots {
            Some(p) => unsafe {
                std::slice::from_raw_parts(
                    p.as_ptr().add(self.num_buckets as usize),
                    self.num_buckets as usize,
                )
            },
            None => &[],
        }
    }

    fn values_mut(&mut self) -> &mut [u64] {
        match self.slots {
            Some(p) => unsafe {
                std::slice::from_raw_parts_mut(
                    p.as_ptr().add(self.num_buckets as usize),
                    self.num_buckets as usize,
                )
            },
            None => &mut [],
        }
    }

    /// Index of the slot holding `key`, if it is live within the probe bound.
    fn index_of(&self, key: u64) -> Option<usize> {
        if self.num_buckets == 0 || key >= TOMBSTONE {
            return None;
        }

        let keys = self.keys();
        let buckets = self.num_buckets as u64;
        let home = key % buckets;

        for distance in 0..=MAX_PROBE_DISTANCE as u64 {
            let i = ((home + distance) % buckets) as usize;
            if keys[i] == key {
                return Some(i);
            }
            if keys[i] == UNUSED {
                return None;
            }
            // Tombstones are skipped, never matched.
        }
        None
    }

    /// Index of an unused-or-tombstone slot for `key` within the probe bound.
    fn insert_slot(&self, key: u64) -> Option<usize> {
        if self.num_buckets == 0 {
            return None;
        }

        let keys = self.keys();
        let buckets = self.num_buckets as u64;
        let home = key % buckets;

        for distance in 0..=MAX_PROBE_DISTANCE as u64 {
            let i = ((home + distance) % buckets) as usize;
            if keys[i] == UNUSED || keys[i] == TOMBSTONE {
                return Some(i);
            }
        }
        None
    }

    /// Returns true if `key` is live in the table.
    pub fn contains(&self, key: u64) -> bool {
        self.index_of(key).is_some()
    }

    /// Looks up the value stored for `key`.
    pub fn get(&self, key: u64) -> Option<u64> {
        self.index_of(key).map(|i| self.values()[i])
    }

    /// Looks up `key`, falling back to `default` on a miss.
    pub fn get_or(&self, key: u64, default: u64) -> u64 {
        self.get(key).unwrap_or(default)
    }

    /// Overwrites the value for `key` if it is live; does nothing otherwise.
    pub fn update(&mut self, key: u64, value: u64) {
        if let Some(i) = self.index_of(key) {
            self.values_mut()[i] = value;
        }
    }

    /// Returns a mutable reference to the value slot for `key`, inserting a
    /// zero value first if the key is absent.
    ///
    /// Grows the table as many times as needed to place the key within the
    /// probe bound; growth strictly increases the bucket count, so the loop
    /// terminates.
    pub fn slot_mut(
        &mut self,
        key: u64,
        alloc: &dyn Allocator,
    ) -> Result<&mut u64, HashError> {
        if key >= TOMBSTONE {
            return Err(HashError::ReservedKey(key));
        }

        if let Some(i) = self.index_of(key) {
            return Ok(&mut self.values_mut()[i]);
        }

        let slot = loop {
            if let Some(i) = self.insert_slot(key) {
                break i;
            }
            self.grow(alloc)?;
        };

        self.keys_mut()[slot] = key;
        self.values_mut()[slot] = 0;
        Ok(&mut self.values_mut()[slot])
    }

    /// Inserts or overwrites the value for `key`.
    pub fn insert(
        &mut self,
        key: u64,
        value: u64,
        alloc: &dyn Allocator,
    ) -> Result<(), HashError> {
        *self.slot_mut(key, alloc)? = value;
        Ok(())
    }

    /// Removes `key`, returning its previous value.
    ///
    /// The slot is tombstoned; no compaction or rehash happens.
    pub fn remove(&mut self, key: u64) -> Option<u64> {
        let i = self.index_of(key)?;
        let value = self.values()[i];
        self.keys_mut()[i] = TOMBSTONE;
        Some(value)
    }

    /// Resets every slot to unused without freeing storage.
    pub fn clear(&mut self) {
        if let Some(slots) = self.slots {
            unsafe {
                std::ptr::write_bytes(slots.as_ptr(), 0xFF, self.num_buckets as usize * 2);
            }
        }
    }

    /// Releases backing storage through `alloc` and zeroes the bookkeeping.
    ///
    /// Must be called with the allocator the table was grown with. The table
    /// is reusable afterwards; the next insertion allocates fresh storage.
    pub fn free(&mut self, alloc: &dyn Allocator) {
        if let Some(slots) = self.slots.take() {
            let bytes = Self::storage_bytes(self.num_buckets);
            alloc.resize(Some(slots.cast()), bytes, 0);
        }
        self.num_buckets = 0;
    }

    fn storage_bytes(buckets: u32) -> usize {
        buckets as usize * 2 * mem::size_of::<u64>()
    }

    /// Reallocates to `2*n + 11` buckets and reinserts every live entry.
    ///
    /// Tombstones are discarded by the migration. In the pathological case
    /// where even the larger table cannot place some key within the probe
    /// bound, the target size is grown again and the migration restarted.
    fn grow(&mut self, alloc: &dyn Allocator) -> Result<(), HashError> {
        let mut target = self
            .num_buckets
            .checked_mul(2)
            .and_then(|n| n.checked_add(11))
            .ok_or(HashError::OutOfMemory)?;

        'retry: loop {
            let bytes = Self::storage_bytes(target);
            let slots = alloc
                .resize(None, 0, bytes)
                .ok_or(HashError::OutOfMemory)?
                .cast::<u64>();

            let mut next = HashTable {
                num_buckets: target,
                slots: Some(slots),
            };
            next.clear();

            for i in 0..self.num_buckets as usize {
                let key = self.keys()[i];
                if key == UNUSED || key == TOMBSTONE {
                    continue;
                }
                match next.insert_slot(key) {
                    Some(j) => {
                        next.keys_mut()[j] = key;
                        next.values_mut()[j] = self.values()[i];
                    }
                    None => {
                        alloc.resize(Some(slots.cast()), bytes, 0);
                        target = target
                            .checked_mul(2)
                            .and_then(|n| n.checked_add(11))
                            .ok_or(HashError::OutOfMemory)?;
                        continue 'retry;
                    }
                }
            }

            self.free(alloc);
            *self = next;
            return Ok(());
        }
    }
}

impl Default for HashTable {
    fn default() -> Self {
        Self::new()
    }
}

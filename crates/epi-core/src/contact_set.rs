//! `ContactSet` — Robin-Hood open-addressed set of integer keys.
//!
//! # Why not `HashSet<u64>`?
//!
//! The multi-hop adjacency build creates and destroys millions of small sets
//! (one "seen" set plus one frontier per hop distance, per person).  This
//! table trades generality for a tight memory layout: a flat slot array of
//! `(probe shift, key)` pairs, power-of-two sizing, and a bounded probe
//! length equal to `log2(size)`, so membership tests are short contiguous
//! scans.
//!
//! # Invariants
//!
//! - Every occupied slot records its displacement (`shift`) from its home
//!   index.  A probe walk stops at the first slot whose shift is smaller
//!   than the current probe distance, or at an empty slot — the Robin-Hood
//!   invariant guarantees the key cannot be further on.
//! - The slot array holds `bitmask + log2(size)` usable slots plus one
//!   trailing sentinel pre-marked occupied (shift 0), so probe loops never
//!   need an explicit bounds check.
//! - Exceeding the probe bound or a 0.9 load factor doubles the table and
//!   rehashes; the bound changes with the size, so growth is a full rebuild.
//!
//! Removal is intentionally unsupported: no consumer needs it, and its
//! absence is what keeps the probe-stop rule valid.

/// Marks an unoccupied slot.
const EMPTY: i16 = -1;

/// Grow once live entries exceed this fraction of the bitmask.
const MAX_LOAD: f64 = 0.9;

#[derive(Copy, Clone)]
struct Slot {
    shift: i16,
    key: u64,
}

impl Slot {
    const VACANT: Slot = Slot { shift: EMPTY, key: 0 };
}

/// An open-addressed Robin-Hood set of `u64` keys.
///
/// A fresh set holds no storage; the first insert allocates the minimum
/// table (8 logical slots).
#[derive(Default)]
pub struct ContactSet {
    slots: Vec<Slot>,
    len: u32,
    log_size: u32,
    bitmask: u32,
}

impl ContactSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct keys in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// FNV-1a-style mix over the key's 8 little-endian bytes, 32-bit digest.
    fn hash(key: u64) -> u32 {
        let mut h: u32 = 2_166_136_261;
        for byte in key.to_le_bytes() {
            h ^= byte as u32;
            let spread = (h << 24)
                .wrapping_add(h << 8)
                .wrapping_add(h << 7)
                .wrapping_add(h << 7)
                .wrapping_add(h << 4)
                .wrapping_add(h << 1);
            h = h.wrapping_add(spread);
        }
        h
    }

    /// Insert `key`.  Inserting a key already present is a no-op.
    pub fn insert(&mut self, key: u64) {
        if self.slots.is_empty() {
            self.resize(1);
        }

        loop {
            let mut idx = (Self::hash(key) & self.bitmask) as usize;
            let mut shift: i16 = 0;

            // Probe the existing run for the key.
            while self.slots[idx].shift >= shift {
                if self.slots[idx].key == key {
                    return;
                }
                idx += 1;
                shift += 1;
            }

            if shift as u32 == self.log_size || self.len as f64 > MAX_LOAD * self.bitmask as f64 {
                self.grow();
                continue; // re-probe from scratch: the bitmask changed
            }

            self.place(key, idx, shift);
            return;
        }
    }

    /// Place `key` at `idx` with probe distance `shift`, displacing poorer
    /// occupants Robin-Hood style.
    fn place(&mut self, mut key: u64, mut idx: usize, mut shift: i16) {
        loop {
            let slot = &mut self.slots[idx];
            if slot.shift == EMPTY {
                slot.shift = shift;
                slot.key = key;
                self.len += 1;
                return;
            }

            // The probing key is richer (larger shift): it takes the slot
            // and the old occupant continues probing from the next one.
            std::mem::swap(&mut slot.key, &mut key);
            std::mem::swap(&mut slot.shift, &mut shift);

            loop {
                idx += 1;
                shift += 1;
                if shift as u32 == self.log_size {
                    self.grow();
                    self.insert(key);
                    return;
                }
                if self.slots[idx].shift < shift {
                    break;
                }
            }
        }
    }

    /// `true` iff `key` has been inserted.
    pub fn contains(&self, key: u64) -> bool {
        if self.slots.is_empty() {
            return false;
        }
        let mut idx = (Self::hash(key) & self.bitmask) as usize;
        let mut shift: i16 = 0;
        while self.slots[idx].shift >= shift {
            if self.slots[idx].key == key {
                return true;
            }
            idx += 1;
            shift += 1;
        }
        false
    }

    /// Iterator over all keys, in table order (not semantically meaningful).
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        let usable = self.slots.len().saturating_sub(1); // exclude the sentinel
        self.slots[..usable]
            .iter()
            .filter(|s| s.shift >= 0)
            .map(|s| s.key)
    }

    /// Materialize the keys as a `Vec`, in table order.
    pub fn to_list(&self) -> Vec<u64> {
        self.iter().collect()
    }

    /// Double the table.
    fn grow(&mut self) {
        self.resize(self.bitmask << 1);
    }

    /// Rebuild the table at the smallest power of two ≥ `request` (min 8).
    /// A no-op if the table is already at least that large.
    fn resize(&mut self, request: u32) {
        let request = request.max(8);
        let log_size = 32 - (request - 1).leading_zeros();
        if !self.slots.is_empty() && log_size <= self.log_size {
            return;
        }

        let old = std::mem::take(&mut self.slots);
        self.log_size = log_size;
        self.bitmask = (1u32 << log_size) - 1;
        self.len = 0;

        let n_usable = (self.bitmask + log_size) as usize;
        self.slots = vec![Slot::VACANT; n_usable + 1];
        self.slots[n_usable].shift = 0; // sentinel: terminates probe walks

        if let Some((_sentinel, usable)) = old.split_last() {
            for slot in usable {
                if slot.shift >= 0 {
                    self.insert(slot.key);
                }
            }
        }
    }
}

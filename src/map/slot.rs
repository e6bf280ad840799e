//! Slot definitions
//!
//! A slot is 8 bytes inside a page: a 4-byte key followed by a 4-byte value.
//! The key doubles as the slot state:
//!
//! ```text
//! key ==  0  -> Empty      (never written, ends a probe)
//! key == -1  -> Tombstone  (deleted, probed past, reusable)
//! otherwise  -> Occupied   (live key with its value)
//! ```

use bytes::{Buf, BufMut};

use super::layout::{EMPTY_KEY, SLOT_SIZE, TOMBSTONE_KEY};

/// Decoded state of one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Never written
    Empty,

    /// Previously deleted
    Tombstone,

    /// A live entry
    Occupied { key: i32, value: i32 },
}

impl Slot {
    /// Decode a slot from exactly `SLOT_SIZE` bytes
    ///
    /// Returns `None` if `bytes` is not slot-sized.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != SLOT_SIZE {
            return None;
        }
        let mut src = bytes;
        let key = src.get_i32();
        let value = src.get_i32();
        Some(Self::from_raw(key, value))
    }

    /// Classify a raw key/value pair
    pub fn from_raw(key: i32, value: i32) -> Self {
        match key {
            EMPTY_KEY => Slot::Empty,
            TOMBSTONE_KEY => Slot::Tombstone,
            key => Slot::Occupied { key, value },
        }
    }

    /// Raw key/value pair as stored on the page
    pub fn to_raw(self) -> (i32, i32) {
        match self {
            Slot::Empty => (EMPTY_KEY, 0),
            Slot::Tombstone => (TOMBSTONE_KEY, 0),
            Slot::Occupied { key, value } => (key, value),
        }
    }

    /// Encode into exactly `SLOT_SIZE` bytes
    ///
    /// Returns `false` (and writes nothing) if `dst` is not slot-sized.
    pub fn encode(self, dst: &mut [u8]) -> bool {
        if dst.len() != SLOT_SIZE {
            return false;
        }
        let (key, value) = self.to_raw();
        let mut out = dst;
        out.put_i32(key);
        out.put_i32(value);
        true
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Slot::Occupied { .. })
    }
}

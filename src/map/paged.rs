//! PagedByteMap implementation
//!
//! Integer map packed into a single `PageBuffer`.

use bytes::Buf;
use tracing::{debug, trace};

use crate::config::MapConfig;
use crate::error::{PagedKvError, Result};

use super::buffer::PageBuffer;
use super::dump::Dump;
use super::header::{self, SpecialKey};
use super::layout::{METADATA_SIZE, SLOT_SIZE, TOMBSTONE_KEY};
use super::slot::Slot;

/// Fixed-capacity map from `i32` to `i32`
///
/// A missing key and a key stored with value `0` both read back as `0`;
/// callers that need to tell them apart must track presence themselves.
pub struct PagedByteMap {
    config: MapConfig,
    buffer: PageBuffer,
}

/// Occupancy counters across the whole map
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MapStats {
    /// Live entries in page storage
    pub live: usize,

    /// Deleted slots awaiting reuse
    pub tombstones: usize,

    /// Never-written slots
    pub empty: usize,

    /// Special keys currently set (0..=2)
    pub special_present: usize,
}

impl MapStats {
    /// Live entries including special keys
    pub fn total_entries(&self) -> usize {
        self.live + self.special_present
    }
}

impl PagedByteMap {
    /// Allocate a zeroed map and write its header
    pub fn new(config: MapConfig) -> Result<Self> {
        config.validate()?;

        let mut buffer = PageBuffer::zeroed(&config)?;
        header::write_config(&mut buffer, &config)?;

        debug!(
            page_size = config.page_size,
            number_of_pages = config.number_of_pages,
            bytes = buffer.len(),
            "allocated paged map"
        );

        Ok(Self { config, buffer })
    }

    /// Rebuild a map from a raw buffer, e.g. one taken with `as_bytes`
    ///
    /// The geometry is read from the header and must match the length.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() < METADATA_SIZE {
            return Err(PagedKvError::InvalidConfig(format!(
                "buffer of {} bytes is shorter than the {}-byte header",
                bytes.len(),
                METADATA_SIZE
            )));
        }
        let mut src = &bytes[..METADATA_SIZE];
        let page_size = src.get_i32();
        let number_of_pages = src.get_i32();
        if page_size < 0 || number_of_pages < 0 {
            return Err(PagedKvError::InvalidConfig(format!(
                "negative geometry in header: page_size {}, number_of_pages {}",
                page_size, number_of_pages
            )));
        }

        let config = MapConfig::new(page_size as u32, number_of_pages as u32);
        config.validate()?;
        let buffer = PageBuffer::from_vec(bytes, &config)?;
        Ok(Self { config, buffer })
    }

    /// Page a non-special key belongs to: `|key mod number_of_pages|`
    ///
    /// Computed in 64-bit so `i32::MIN` is well-defined.
    pub fn home_page(&self, key: i32) -> usize {
        let remainder = i64::from(key) % i64::from(self.config.number_of_pages);
        remainder.unsigned_abs() as usize
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Look up a key, `0` if absent
    pub fn get(&self, key: i32) -> Result<i32> {
        if let Some(special) = SpecialKey::from_key(key) {
            return Ok(header::read_special(&self.buffer, special)?.unwrap_or(0));
        }

        let page = self.home_page(key);
        for slot in self.page_slots(page)? {
            match slot {
                Slot::Occupied { key: stored, value } if stored == key => return Ok(value),
                Slot::Empty => break,
                _ => {}
            }
        }
        Ok(0)
    }

    /// Insert or overwrite a key
    ///
    /// Claims the first slot in the home page that is empty, tombstoned or
    /// already holds `key`. A page with none of those yields `PageOverflow`
    /// and is left untouched.
    ///
    /// A tombstone ahead of an existing entry is claimed before the entry is
    /// reached, so the page then holds two copies of `key`. Reads see the
    /// newer one first; deleting it uncovers the older value.
    pub fn put(&mut self, key: i32, value: i32) -> Result<()> {
        if let Some(special) = SpecialKey::from_key(key) {
            return header::write_special(&mut self.buffer, special, value);
        }
        if key == TOMBSTONE_KEY {
            return Err(PagedKvError::ReservedKey(key));
        }

        let page = self.home_page(key);
        let target = self.page_slots(page)?.position(|slot| match slot {
            Slot::Empty | Slot::Tombstone => true,
            Slot::Occupied { key: stored, .. } => stored == key,
        });

        let index = target.ok_or(PagedKvError::PageOverflow { key, page })?;
        trace!(key, page, index, "writing slot");
        self.write_slot(page, index, Slot::Occupied { key, value })
    }

    /// Remove a key, returning whether it was present
    pub fn delete(&mut self, key: i32) -> Result<bool> {
        if let Some(special) = SpecialKey::from_key(key) {
            let present = header::read_special(&self.buffer, special)?.is_some();
            header::clear_special(&mut self.buffer, special)?;
            return Ok(present);
        }

        let page = self.home_page(key);
        let mut found = None;
        for (index, slot) in self.page_slots(page)?.enumerate() {
            match slot {
                Slot::Occupied { key: stored, .. } if stored == key => {
                    found = Some(index);
                    break;
                }
                Slot::Empty => break,
                _ => {}
            }
        }

        match found {
            Some(index) => {
                trace!(key, page, index, "tombstoning slot");
                self.write_slot(page, index, Slot::Tombstone)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Hex rendering of the whole buffer, produced when formatted
    pub fn dump(&self) -> Dump<'_> {
        Dump::new(self.buffer.as_bytes(), self.buffer.page_size())
    }

    // =========================================================================
    // Slot Access
    // =========================================================================

    /// Decoded slots of one page, in probe order
    pub fn page_slots(&self, page: usize) -> Result<impl Iterator<Item = Slot> + '_> {
        let bytes = self.buffer.page(page)?;
        Ok(bytes.chunks_exact(SLOT_SIZE).filter_map(Slot::decode))
    }

    fn write_slot(&mut self, page: usize, index: usize, slot: Slot) -> Result<()> {
        let bytes = self.buffer.page_mut(page)?;
        let offset = index * SLOT_SIZE;
        let dst = bytes
            .get_mut(offset..offset + SLOT_SIZE)
            .ok_or(PagedKvError::OutOfBounds {
                offset,
                len: SLOT_SIZE,
            })?;
        if slot.encode(dst) {
            Ok(())
        } else {
            Err(PagedKvError::OutOfBounds {
                offset,
                len: SLOT_SIZE,
            })
        }
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Count live, deleted and empty slots
    pub fn stats(&self) -> Result<MapStats> {
        let mut stats = MapStats::default();
        for page in 0..self.buffer.number_of_pages() {
            for slot in self.page_slots(page)? {
                match slot {
                    Slot::Empty => stats.empty += 1,
                    Slot::Tombstone => stats.tombstones += 1,
                    Slot::Occupied { .. } => stats.live += 1,
                }
            }
        }
        for special in [SpecialKey::A, SpecialKey::B] {
            if header::read_special(&self.buffer, special)?.is_some() {
                stats.special_present += 1;
            }
        }
        Ok(stats)
    }

    /// Geometry as recorded in the buffer header
    pub fn header_config(&self) -> Result<MapConfig> {
        header::read_config(&self.buffer)
    }

    /// Raw buffer, header included
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }
}

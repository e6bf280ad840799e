//! Map header
//!
//! ```text
//! ┌────────────┬────────────┬───────┬─────────┬───────┬─────────┐
//! │ page_size  │ num_pages  │ A set │ A value │ B set │ B value │
//! │    (4)     │    (4)     │  (1)  │   (4)   │  (1)  │   (4)   │
//! └────────────┴────────────┴───────┴─────────┴───────┴─────────┘
//! ```
//!
//! The two special keys live here instead of in a page, so they never take
//! part in probing.

use crate::config::MapConfig;
use crate::error::Result;

use super::buffer::PageBuffer;
use super::layout::{
    NUM_OF_PAGES_OFFSET, PAGE_SIZE_OFFSET, SPECIAL_KEY_A, SPECIAL_KEY_A_EXISTS_OFFSET,
    SPECIAL_KEY_A_VALUE_OFFSET, SPECIAL_KEY_B, SPECIAL_KEY_B_EXISTS_OFFSET,
    SPECIAL_KEY_B_VALUE_OFFSET, SPECIAL_KEY_RESET_FLAG, SPECIAL_KEY_SET_FLAG,
};

/// One of the two reserved keys stored out-of-band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialKey {
    A,
    B,
}

impl SpecialKey {
    /// Classify a key; `None` for ordinary keys
    pub fn from_key(key: i32) -> Option<Self> {
        match key {
            SPECIAL_KEY_A => Some(SpecialKey::A),
            SPECIAL_KEY_B => Some(SpecialKey::B),
            _ => None,
        }
    }

    /// The key this slot answers to
    pub fn key(self) -> i32 {
        match self {
            SpecialKey::A => SPECIAL_KEY_A,
            SpecialKey::B => SPECIAL_KEY_B,
        }
    }

    fn exists_offset(self) -> usize {
        match self {
            SpecialKey::A => SPECIAL_KEY_A_EXISTS_OFFSET,
            SpecialKey::B => SPECIAL_KEY_B_EXISTS_OFFSET,
        }
    }

    fn value_offset(self) -> usize {
        match self {
            SpecialKey::A => SPECIAL_KEY_A_VALUE_OFFSET,
            SpecialKey::B => SPECIAL_KEY_B_VALUE_OFFSET,
        }
    }
}

/// Write the geometry mirror
pub fn write_config(buf: &mut PageBuffer, config: &MapConfig) -> Result<()> {
    // validate() guarantees both fit in i32
    buf.write_i32(PAGE_SIZE_OFFSET, config.page_size as i32)?;
    buf.write_i32(NUM_OF_PAGES_OFFSET, config.number_of_pages as i32)?;
    Ok(())
}

/// Read the geometry mirror back
pub fn read_config(buf: &PageBuffer) -> Result<MapConfig> {
    let page_size = buf.read_i32(PAGE_SIZE_OFFSET)?;
    let number_of_pages = buf.read_i32(NUM_OF_PAGES_OFFSET)?;
    Ok(MapConfig::new(page_size as u32, number_of_pages as u32))
}

/// Stored value of a special key, `None` if its flag is clear
pub fn read_special(buf: &PageBuffer, special: SpecialKey) -> Result<Option<i32>> {
    if buf.read_u8(special.exists_offset())? == SPECIAL_KEY_SET_FLAG {
        Ok(Some(buf.read_i32(special.value_offset())?))
    } else {
        Ok(None)
    }
}

pub fn write_special(buf: &mut PageBuffer, special: SpecialKey, value: i32) -> Result<()> {
    buf.write_u8(special.exists_offset(), SPECIAL_KEY_SET_FLAG)?;
    buf.write_i32(special.value_offset(), value)
}

/// Clear the flag and zero the value
pub fn clear_special(buf: &mut PageBuffer, special: SpecialKey) -> Result<()> {
    buf.write_u8(special.exists_offset(), SPECIAL_KEY_RESET_FLAG)?;
    buf.write_i32(special.value_offset(), 0)
}

//! Byte layout of the map buffer
//!
//! All multi-byte integers are big-endian two's-complement.

// =============================================================================
// Header Offsets
// =============================================================================

/// Page size field (4 bytes)
pub const PAGE_SIZE_OFFSET: usize = 0;

/// Page count field (4 bytes)
pub const NUM_OF_PAGES_OFFSET: usize = 4;

/// Special key A presence flag (1 byte)
pub const SPECIAL_KEY_A_EXISTS_OFFSET: usize = 8;

/// Special key A value (4 bytes)
pub const SPECIAL_KEY_A_VALUE_OFFSET: usize = 9;

/// Special key B presence flag (1 byte)
pub const SPECIAL_KEY_B_EXISTS_OFFSET: usize = 13;

/// Special key B value (4 bytes)
pub const SPECIAL_KEY_B_VALUE_OFFSET: usize = 14;

/// First byte of the pages region
pub const PAGES_OFFSET: usize = 18;

/// Header size in bytes
pub const METADATA_SIZE: usize = PAGES_OFFSET;

/// Header field start offsets, in order
pub const HEADER_FIELDS: [usize; 7] = [
    PAGE_SIZE_OFFSET,
    NUM_OF_PAGES_OFFSET,
    SPECIAL_KEY_A_EXISTS_OFFSET,
    SPECIAL_KEY_A_VALUE_OFFSET,
    SPECIAL_KEY_B_EXISTS_OFFSET,
    SPECIAL_KEY_B_VALUE_OFFSET,
    PAGES_OFFSET,
];

// =============================================================================
// Slots
// =============================================================================

pub const KEY_SIZE: usize = 4;
pub const VALUE_SIZE: usize = 4;

/// One key-value slot
pub const SLOT_SIZE: usize = KEY_SIZE + VALUE_SIZE;

/// Key stored in a slot that was never written
pub const EMPTY_KEY: i32 = 0;

/// Key stored in a slot whose entry was deleted
pub const TOMBSTONE_KEY: i32 = -1;

// =============================================================================
// Special Keys
// =============================================================================

pub const SPECIAL_KEY_A: i32 = 1;
pub const SPECIAL_KEY_B: i32 = 0;

pub const SPECIAL_KEY_SET_FLAG: u8 = 1;
pub const SPECIAL_KEY_RESET_FLAG: u8 = 0;

//! Diagnostic dump
//!
//! Renders the buffer as lowercase hex. Header fields are separated by a
//! space; each page is bracketed with `:` between key and value and `,`
//! after every slot:
//!
//! ```text
//! 00000010 00000002 00 00000000 00 00000000 [00000000:00000000,00000000:00000000,][...]
//! ```

use std::fmt;

use super::layout::{HEADER_FIELDS, KEY_SIZE, METADATA_SIZE, SLOT_SIZE};

/// Lazy hex view of a map buffer
pub struct Dump<'a> {
    bytes: &'a [u8],
    page_size: usize,
}

impl<'a> Dump<'a> {
    pub(crate) fn new(bytes: &'a [u8], page_size: usize) -> Self {
        Self { bytes, page_size }
    }

    fn fmt_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = &self.bytes[..METADATA_SIZE.min(self.bytes.len())];
        for (i, byte) in header.iter().enumerate() {
            write!(f, "{:02x}", byte)?;
            // A space closes every field, the last one included
            if HEADER_FIELDS[1..].contains(&(i + 1)) {
                f.write_str(" ")?;
            }
        }
        Ok(())
    }

    fn fmt_page(&self, f: &mut fmt::Formatter<'_>, page: &[u8]) -> fmt::Result {
        f.write_str("[")?;
        for (j, byte) in page.iter().enumerate() {
            write!(f, "{:02x}", byte)?;
            let written = j + 1;
            if written % SLOT_SIZE == 0 {
                f.write_str(",")?;
            } else if written % KEY_SIZE == 0 {
                f.write_str(":")?;
            }
        }
        f.write_str("]")
    }
}

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_header(f)?;
        if self.page_size == 0 || self.bytes.len() <= METADATA_SIZE {
            return Ok(());
        }
        for page in self.bytes[METADATA_SIZE..].chunks(self.page_size) {
            self.fmt_page(f, page)?;
        }
        Ok(())
    }
}

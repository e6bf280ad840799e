//! Bounds-checked byte buffer
//!
//! Owns the flat map storage and hands out header fields and pages by offset.
//! Every access is checked and reports `OutOfBounds` instead of panicking.

use std::ops::Range;

use bytes::{Buf, BufMut};

use crate::config::MapConfig;
use crate::error::{PagedKvError, Result};

use super::layout::PAGES_OFFSET;

/// Flat storage for one map: header followed by equally sized pages
pub struct PageBuffer {
    bytes: Vec<u8>,
    page_size: usize,
    number_of_pages: usize,
}

impl PageBuffer {
    /// Allocate a zero-filled buffer for a validated config
    ///
    /// Storage is reserved fallibly so an oversized map surfaces
    /// `AllocationFailure` rather than aborting the process.
    pub fn zeroed(config: &MapConfig) -> Result<Self> {
        let len = config.buffer_len();

        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(len)
            .map_err(|_| PagedKvError::AllocationFailure { bytes: len })?;
        bytes.resize(len, 0);

        Ok(Self {
            bytes,
            page_size: config.page_size as usize,
            number_of_pages: config.number_of_pages as usize,
        })
    }

    /// Adopt existing bytes laid out for `config`
    pub fn from_vec(bytes: Vec<u8>, config: &MapConfig) -> Result<Self> {
        let expected = config.buffer_len();
        if bytes.len() != expected {
            return Err(PagedKvError::InvalidConfig(format!(
                "buffer is {} bytes, geometry needs {}",
                bytes.len(),
                expected
            )));
        }
        Ok(Self {
            bytes,
            page_size: config.page_size as usize,
            number_of_pages: config.number_of_pages as usize,
        })
    }

    // =========================================================================
    // Raw Access
    // =========================================================================

    fn range(&self, offset: usize, len: usize) -> Result<Range<usize>> {
        let end = offset
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or(PagedKvError::OutOfBounds { offset, len })?;
        Ok(offset..end)
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8> {
        let range = self.range(offset, 1)?;
        Ok(self.bytes[range.start])
    }

    pub fn write_u8(&mut self, offset: usize, value: u8) -> Result<()> {
        let range = self.range(offset, 1)?;
        self.bytes[range.start] = value;
        Ok(())
    }

    pub fn read_i32(&self, offset: usize) -> Result<i32> {
        let range = self.range(offset, 4)?;
        let mut src = &self.bytes[range];
        Ok(src.get_i32())
    }

    pub fn write_i32(&mut self, offset: usize, value: i32) -> Result<()> {
        let range = self.range(offset, 4)?;
        let mut dst = &mut self.bytes[range];
        dst.put_i32(value);
        Ok(())
    }

    // =========================================================================
    // Pages
    // =========================================================================

    fn page_range(&self, page: usize) -> Result<Range<usize>> {
        if page >= self.number_of_pages {
            return Err(PagedKvError::OutOfBounds {
                offset: PAGES_OFFSET.saturating_add(page.saturating_mul(self.page_size)),
                len: self.page_size,
            });
        }
        self.range(PAGES_OFFSET + page * self.page_size, self.page_size)
    }

    /// Bytes of one page
    pub fn page(&self, page: usize) -> Result<&[u8]> {
        let range = self.page_range(page)?;
        Ok(&self.bytes[range])
    }

    /// Mutable bytes of one page
    pub fn page_mut(&mut self, page: usize) -> Result<&mut [u8]> {
        let range = self.page_range(page)?;
        Ok(&mut self.bytes[range])
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn number_of_pages(&self) -> usize {
        self.number_of_pages
    }
}

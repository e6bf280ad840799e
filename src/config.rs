//! Configuration for PagedKV
//!
//! Centralized configuration with sensible defaults.

use crate::error::{PagedKvError, Result};
use crate::map::layout::{METADATA_SIZE, SLOT_SIZE};

/// Geometry of a paged map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapConfig {
    /// Bytes per page (multiple of the 8-byte slot size)
    pub page_size: u32,

    /// Number of pages, fixed for the lifetime of the map
    pub number_of_pages: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            page_size: 64,
            number_of_pages: 4,
        }
    }
}

impl MapConfig {
    /// Create a config with the given geometry
    pub fn new(page_size: u32, number_of_pages: u32) -> Self {
        Self {
            page_size,
            number_of_pages,
        }
    }

    /// Create a new config builder
    pub fn builder() -> MapConfigBuilder {
        MapConfigBuilder::default()
    }

    /// Check the geometry can back a map
    ///
    /// Both fields are mirrored into the header as signed 32-bit integers,
    /// so they must fit in `i32`.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(PagedKvError::InvalidConfig(
                "page_size must be positive".to_string(),
            ));
        }
        if self.page_size as usize % SLOT_SIZE != 0 {
            return Err(PagedKvError::InvalidConfig(format!(
                "page_size {} is not a multiple of the {}-byte slot size",
                self.page_size, SLOT_SIZE
            )));
        }
        if self.number_of_pages == 0 {
            return Err(PagedKvError::InvalidConfig(
                "number_of_pages must be positive".to_string(),
            ));
        }
        if self.page_size > i32::MAX as u32 || self.number_of_pages > i32::MAX as u32 {
            return Err(PagedKvError::InvalidConfig(format!(
                "page_size {} and number_of_pages {} must both fit in a signed 32-bit field",
                self.page_size, self.number_of_pages
            )));
        }
        self.checked_buffer_len().ok_or_else(|| {
            PagedKvError::InvalidConfig(format!(
                "{} pages of {} bytes overflow the addressable buffer size",
                self.number_of_pages, self.page_size
            ))
        })?;
        Ok(())
    }

    /// Slots per page
    pub fn slots_per_page(&self) -> usize {
        self.page_size as usize / SLOT_SIZE
    }

    /// Total buffer length (header plus pages)
    ///
    /// Only meaningful once `validate` has passed.
    pub fn buffer_len(&self) -> usize {
        self.checked_buffer_len().unwrap_or(usize::MAX)
    }

    fn checked_buffer_len(&self) -> Option<usize> {
        (self.page_size as usize)
            .checked_mul(self.number_of_pages as usize)?
            .checked_add(METADATA_SIZE)
    }
}

/// Builder for MapConfig
#[derive(Default)]
pub struct MapConfigBuilder {
    config: MapConfig,
}

impl MapConfigBuilder {
    /// Set the page size (in bytes)
    pub fn page_size(mut self, bytes: u32) -> Self {
        self.config.page_size = bytes;
        self
    }

    /// Set the number of pages
    pub fn number_of_pages(mut self, count: u32) -> Self {
        self.config.number_of_pages = count;
        self
    }

    /// Validate and build
    pub fn build(self) -> Result<MapConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration for the command shell
#[derive(Debug, Clone, Default)]
pub struct ShellConfig {
    // -------------------------------------------------------------------------
    // Startup
    // -------------------------------------------------------------------------
    /// Map to create before reading any input
    pub preinit: Option<MapConfig>,

    // -------------------------------------------------------------------------
    // Error Handling
    // -------------------------------------------------------------------------
    /// Abort the loop on the first failed command instead of reporting and continuing
    pub stop_on_error: bool,
}

impl ShellConfig {
    /// Create a new config builder
    pub fn builder() -> ShellConfigBuilder {
        ShellConfigBuilder::default()
    }
}

/// Builder for ShellConfig
#[derive(Default)]
pub struct ShellConfigBuilder {
    config: ShellConfig,
}

impl ShellConfigBuilder {
    /// Initialize a map with this geometry before the first command
    pub fn preinit(mut self, map: MapConfig) -> Self {
        self.config.preinit = Some(map);
        self
    }

    /// Stop at the first failed command
    pub fn stop_on_error(mut self, stop: bool) -> Self {
        self.config.stop_on_error = stop;
        self
    }

    pub fn build(self) -> ShellConfig {
        self.config
    }
}

//! Engine Module
//!
//! Owns the current map and executes commands against it.
//!
//! ## Responsibilities
//! - Create and replace the map on `init`
//! - Reject operations until a map exists
//! - Serialize mutations while allowing concurrent reads

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::config::MapConfig;
use crate::error::{PagedKvError, Result};
use crate::map::{MapStats, PagedByteMap};
use crate::protocol::{Command, Response};

/// The command engine
///
/// ## Concurrency Model: Single-Writer / Multiple-Reader (SWMR)
///
/// One `RwLock` guards the whole buffer:
/// - **Writes** (init/put/delete) take the write lock, one at a time
/// - **Reads** (get/dump/stats) share the read lock
///
/// No ordering beyond lock acquisition order is promised.
pub struct Engine {
    /// `None` until the first successful `init`
    map: RwLock<Option<PagedByteMap>>,
}

impl Engine {
    /// Engine with no map; every operation but `init` fails until one is created
    pub fn new() -> Self {
        Self {
            map: RwLock::new(None),
        }
    }

    /// Engine with a map already initialized
    pub fn with_map(config: MapConfig) -> Result<Self> {
        let engine = Self::new();
        engine.init(config)?;
        Ok(engine)
    }

    /// Execute a command
    ///
    /// Routes commands to appropriate handlers
    pub fn execute(&self, command: Command) -> Result<Response> {
        match command {
            Command::Init {
                page_size,
                number_of_pages,
            } => {
                self.init(MapConfig::new(page_size, number_of_pages))?;
                Ok(Response::Empty)
            }
            Command::Get { key } => Ok(Response::Value(self.get(key)?)),
            Command::Put { key, value } => {
                self.put(key, value)?;
                Ok(Response::Empty)
            }
            Command::Delete { key } => {
                self.delete(key)?;
                Ok(Response::Empty)
            }
            Command::Dump => Ok(Response::Dump(self.dump()?)),
        }
    }

    /// Discard any existing map and create a fresh one
    ///
    /// The old map is kept if the new one cannot be built.
    pub fn init(&self, config: MapConfig) -> Result<()> {
        let map = PagedByteMap::new(config)?;

        let mut guard = self.map.write();
        let replaced = guard.replace(map).is_some();

        info!(
            page_size = config.page_size,
            number_of_pages = config.number_of_pages,
            slots_per_page = config.slots_per_page(),
            replaced,
            "map initialized"
        );
        Ok(())
    }

    /// Get a value by key, `0` when absent
    pub fn get(&self, key: i32) -> Result<i32> {
        let guard = self.map.read();
        let map = guard.as_ref().ok_or(PagedKvError::UninitializedMap)?;

        let value = map.get(key)?;
        debug!(key, value, "get");
        Ok(value)
    }

    /// Put a key-value pair
    pub fn put(&self, key: i32, value: i32) -> Result<()> {
        let mut guard = self.map.write();
        let map = guard.as_mut().ok_or(PagedKvError::UninitializedMap)?;

        match map.put(key, value) {
            Ok(()) => {
                debug!(key, value, "put");
                Ok(())
            }
            Err(e @ PagedKvError::PageOverflow { .. }) => {
                warn!(key, error = %e, "put rejected");
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Delete a key; deleting an absent key is not an error
    pub fn delete(&self, key: i32) -> Result<()> {
        let mut guard = self.map.write();
        let map = guard.as_mut().ok_or(PagedKvError::UninitializedMap)?;

        let removed = map.delete(key)?;
        debug!(key, removed, "delete");
        Ok(())
    }

    /// Render the buffer
    pub fn dump(&self) -> Result<String> {
        let guard = self.map.read();
        let map = guard.as_ref().ok_or(PagedKvError::UninitializedMap)?;
        Ok(map.dump().to_string())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    pub fn is_initialized(&self) -> bool {
        self.map.read().is_some()
    }

    /// Geometry of the current map
    pub fn config(&self) -> Option<MapConfig> {
        self.map.read().as_ref().map(|map| *map.config())
    }

    /// Occupancy of the current map
    pub fn stats(&self) -> Result<MapStats> {
        let guard = self.map.read();
        guard
            .as_ref()
            .ok_or(PagedKvError::UninitializedMap)?
            .stats()
    }

    /// Copy of the raw buffer
    pub fn snapshot(&self) -> Result<Vec<u8>> {
        let guard = self.map.read();
        let map = guard.as_ref().ok_or(PagedKvError::UninitializedMap)?;
        Ok(map.as_bytes().to_vec())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

//! # PagedKV
//!
//! A fixed-capacity integer key-value store with:
//! - One flat byte buffer holding a header and a fixed number of pages
//! - Linear probing inside a key's home page, with tombstoned deletes
//! - Two reserved keys stored out-of-band in the header
//! - A line-oriented command shell
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Command Shell                            │
//! │            (stdin / file, whitespace tokens)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Command
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Engine                                 │
//! │            (Single Writer / Multi Reader)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!               ┌──────────────┐
//!               │ PagedByteMap │
//!               │ header|pages │
//!               └──────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod map;
pub mod protocol;
pub mod engine;
pub mod shell;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{PagedKvError, Result};
pub use config::{MapConfig, ShellConfig};
pub use engine::Engine;
pub use map::PagedByteMap;
pub use shell::Shell;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of PagedKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

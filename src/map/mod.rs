//! Map Module
//!
//! The paged integer map and its on-buffer encoding.
//!
//! ## Buffer Layout
//! ```text
//! ┌──────────────────┬──────────┬──────────┬─────┬──────────────┐
//! │   Header (18)    │  Page 0  │  Page 1  │ ... │  Page N - 1  │
//! └──────────────────┴──────────┴──────────┴─────┴──────────────┘
//!                    │◄────────── page_size bytes each ─────────►│
//!
//! Page:  [key (4) | value (4)] [key (4) | value (4)] ...
//! ```
//!
//! ## Probing
//! A key lives in page `|key mod N|`. Lookups scan that page from the first
//! slot, step over tombstones and stop at the first empty slot. There is no
//! spill into neighbouring pages; a full page rejects new keys.
//!
//! ## Special Keys
//! Keys `1` and `0` are kept in the header with their own presence flag.
//! Key `0` can therefore never appear in a page, which is what lets a zero
//! key mark an empty slot.

pub mod layout;

mod buffer;
mod dump;
mod header;
mod paged;
mod slot;

pub use buffer::PageBuffer;
pub use dump::Dump;
pub use header::SpecialKey;
pub use paged::{MapStats, PagedByteMap};
pub use slot::Slot;

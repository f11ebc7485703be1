//! Page Module
//!
//! Fixed-capacity pages holding a packed record region plus a parallel-array
//! header describing sizes and offsets. Pages are always written at their
//! full capacity (zero-padded), so page `k` begins at byte `k * capacity` in
//! the backing file.
//!
//! ## Index Page Format (default 32 MiB)
//! ```text
//! ┌────────┬──────────┬────────────┬────────────┬────────────┬─────────────┐
//! │ count  │ keySizes │ keyOffsets │ valPageIds │ valOffsets │ packed keys │
//! │ u32 BE │ [u32 BE] │  [u32 BE]  │  [u32 BE]  │  [u32 BE]  │ … zero pad  │
//! └────────┴──────────┴────────────┴────────────┴────────────┴─────────────┘
//! ```
//!
//! ## Value Page Format (default 64 MiB)
//! ```text
//! ┌────────┬──────────┬────────────┬───────────────────────────────────────┐
//! │ count  │ valSizes │ valOffsets │ packed values … zero pad              │
//! │ u64 BE │ [u64 BE] │  [u64 BE]  │                                       │
//! └────────┴──────────┴────────────┴───────────────────────────────────────┘
//! ```

mod index;
mod value;
mod reader;
mod writer;

pub use index::{IndexEntry, IndexPage};
pub use value::ValuePage;
pub use reader::{IndexFileReader, ValueFileReader};
pub use writer::PageWriter;

// =============================================================================
// Shared Constants (used by builders, readers, config validation)
// =============================================================================

/// Index page header prefix: count (u32)
pub const INDEX_PAGE_HEADER: usize = 4;

/// Per-entry header cost in an index page:
/// keySize (4) + keyOffset (4) + valPageId (4) + valOffset (4)
pub const INDEX_ENTRY_SIZE: usize = 16;

/// Value page header prefix: count (u64)
pub const VALUE_PAGE_HEADER: usize = 8;

/// Per-entry header cost in a value page: valSize (8) + valOffset (8)
pub const VALUE_ENTRY_SIZE: usize = 16;

// =============================================================================
// Pos
// =============================================================================

/// Locator for a value: the entry at slot `val_offset` inside value page
/// `val_page_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pos {
    /// Which value page the entry lives in
    pub val_page_id: u32,

    /// The entry's slot within that page
    pub val_offset: u32,
}

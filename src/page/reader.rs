//! Page File Readers
//!
//! Memory-map a compiled page file and decode one page at a positional
//! offset. Decoded results are freshly allocated copies, so a single reader
//! instance supports concurrent `&self` reads without locking.

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

use crate::error::{Result, StrataError};

use super::index::{IndexEntry, IndexPage};
use super::value::ValuePage;

/// Shared mmap plumbing for both page files.
///
/// A zero-length file is representable: no mapping is made (mapping an empty
/// file fails at the OS level) and every page read fails with `Overflow`.
struct PageFile {
    mmap: Option<Mmap>,
    len: u64,
    page_size: usize,
}

impl PageFile {
    fn open(path: &Path, page_size: usize) -> Result<Self> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        let mmap = if len == 0 {
            None
        } else {
            // Safety: the compiled page files are treated as read-only for
            // the life of the engine; nothing remaps or truncates them.
            Some(unsafe { Mmap::map(&file)? })
        };

        Ok(Self {
            mmap,
            len,
            page_size,
        })
    }

    /// Slice the full page starting at `offset`, or `Overflow` when the page
    /// does not fit below the mapped length.
    fn page_at(&self, offset: u64) -> Result<&[u8]> {
        let end = offset + self.page_size as u64;
        match &self.mmap {
            Some(mmap) if end <= self.len => {
                let start = offset as usize;
                Ok(&mmap[start..start + self.page_size])
            }
            _ => Err(StrataError::Overflow {
                offset,
                file_len: self.len,
            }),
        }
    }
}

// =============================================================================
// Index File
// =============================================================================

/// Reader over the compiled index file
pub struct IndexFileReader {
    file: PageFile,
}

impl IndexFileReader {
    /// Memory-map an index file
    pub fn open(path: &Path, page_size: usize) -> Result<Self> {
        Ok(Self {
            file: PageFile::open(path, page_size)?,
        })
    }

    /// Decode the page at `page_offset` into its entries.
    ///
    /// Fails with `Overflow` past the file end and `RangeError` on a corrupt
    /// page.
    pub fn read(&self, page_offset: u64) -> Result<Vec<IndexEntry>> {
        let page = self.file.page_at(page_offset)?;
        IndexPage::decode(page)
    }

    /// Mapped file length in bytes
    pub fn len(&self) -> u64 {
        self.file.len
    }

    /// Whether the file holds no pages at all
    pub fn is_empty(&self) -> bool {
        self.file.len == 0
    }
}

// =============================================================================
// Value File
// =============================================================================

/// Reader over the compiled value file
pub struct ValueFileReader {
    file: PageFile,
}

impl ValueFileReader {
    /// Memory-map a value file
    pub fn open(path: &Path, page_size: usize) -> Result<Self> {
        Ok(Self {
            file: PageFile::open(path, page_size)?,
        })
    }

    /// Decode slot `val_offset` of the page at `page_offset`.
    ///
    /// Fails with `Overflow` past the file end and `RangeError` for a slot at
    /// or beyond the page's entry count.
    pub fn read(&self, page_offset: u64, val_offset: u32) -> Result<Vec<u8>> {
        let page = self.file.page_at(page_offset)?;
        ValuePage::decode_entry(page, val_offset)
    }

    /// Mapped file length in bytes
    pub fn len(&self) -> u64 {
        self.file.len
    }

    /// Whether the file holds no pages at all
    pub fn is_empty(&self) -> bool {
        self.file.len == 0
    }
}

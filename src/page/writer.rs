//! Page Writer
//!
//! Appends encoded, capacity-padded pages to a single file. Page `k` always
//! begins at byte `k * capacity`; previously flushed pages are never
//! rewritten.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, StrataError};

/// Appends fixed-stride pages to one file
pub struct PageWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    /// Capacity every written page must match
    page_size: usize,
    /// Number of pages flushed so far
    pages_written: u32,
}

impl PageWriter {
    /// Create a page file, truncating any previous build.
    ///
    /// Truncation keeps rebuilds from the same log byte-identical.
    pub fn create(path: &Path, page_size: usize) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            page_size,
            pages_written: 0,
        })
    }

    /// Append one encoded page and flush it.
    ///
    /// A page becomes visible only once fully flushed; flushing per page is
    /// the only durability boundary the format has.
    pub fn write_page(&mut self, page: &[u8]) -> Result<()> {
        if page.len() != self.page_size {
            return Err(StrataError::RangeError(format!(
                "encoded page is {} bytes, expected {}",
                page.len(),
                self.page_size
            )));
        }

        self.writer.write_all(page)?;
        self.writer.flush()?;
        self.pages_written += 1;

        tracing::debug!(
            path = %self.path.display(),
            page = self.pages_written - 1,
            "flushed page"
        );
        Ok(())
    }

    /// Number of pages flushed so far
    pub fn pages_written(&self) -> u32 {
        self.pages_written
    }

    /// Sync file contents to disk
    pub fn sync(&mut self) -> Result<()> {
        self.writer.flush()?;
        self.writer.get_ref().sync_all()?;
        Ok(())
    }
}

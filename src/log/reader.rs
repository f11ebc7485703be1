//! Log Reader
//!
//! Streaming parser over a memory-mapped raw log. Reads go through a
//! fixed-size working window refilled at increasing absolute file offsets;
//! any field whose bytes straddle a window boundary is reassembled
//! transparently, including keys and values larger than the window itself.

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

use crate::error::{Result, StrataError};

use super::DEFAULT_WINDOW_SIZE;

/// Streaming reader over a raw log file
pub struct LogReader {
    /// Read-only mapping of the whole log; `None` for an empty file
    mmap: Option<Mmap>,
    /// Mapped file length in bytes
    file_len: u64,
    /// Absolute file offset where the current window begins
    window_start: u64,
    /// Working window; holds `window_len` valid bytes
    window: Vec<u8>,
    window_len: usize,
    /// Read cursor within the window
    pos: usize,
    window_size: usize,
}

impl LogReader {
    /// Open a log with the default 1 MiB window
    pub fn open(path: &Path) -> Result<Self> {
        Self::with_window(path, DEFAULT_WINDOW_SIZE)
    }

    /// Open a log with an explicit window size.
    ///
    /// Small windows force boundary crossings with tiny fixtures, which is
    /// what the boundary tests rely on.
    pub fn with_window(path: &Path, window_size: usize) -> Result<Self> {
        let file = File::open(path)?;
        let file_len = file.metadata()?.len();
        let mmap = if file_len == 0 {
            None
        } else {
            // Safety: the raw log is external read-only input; it is never
            // mutated while a build is running.
            Some(unsafe { Mmap::map(&file)? })
        };

        Ok(Self {
            mmap,
            file_len,
            window_start: 0,
            window: vec![0u8; window_size],
            window_len: 0,
            pos: 0,
            window_size,
        })
    }

    /// Read the next record's key size field
    pub fn read_key_size(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.fill(&mut buf)?;
        Ok(u32::from_be_bytes(buf))
    }

    /// Read the next record's value size field
    pub fn read_value_size(&mut self) -> Result<u64> {
        let mut buf = [0u8; 8];
        self.fill(&mut buf)?;
        Ok(u64::from_be_bytes(buf))
    }

    /// Read `n` key bytes
    pub fn read_key(&mut self, n: u32) -> Result<Vec<u8>> {
        self.read_bytes(n as usize)
    }

    /// Read `n` value bytes
    pub fn read_value(&mut self, n: u64) -> Result<Vec<u8>> {
        self.read_bytes(n as usize)
    }

    /// Advance the cursor by `n` bytes without materializing them
    pub fn skip(&mut self, n: u64) -> Result<()> {
        let mut remaining = n as usize;
        while remaining > 0 {
            if self.pos == self.window_len {
                self.refill()?;
            }
            let take = remaining.min(self.window_len - self.pos);
            self.pos += take;
            remaining -= take;
        }
        Ok(())
    }

    /// Absolute byte offset of the read cursor
    pub fn offset(&self) -> u64 {
        self.window_start + self.pos as u64
    }

    /// Mapped log length in bytes
    pub fn len(&self) -> u64 {
        self.file_len
    }

    /// Whether the log holds no records at all
    pub fn is_empty(&self) -> bool {
        self.file_len == 0
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Read exactly `n` bytes into a fresh buffer
    fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut out = vec![0u8; n];
        self.fill(&mut out)?;
        Ok(out)
    }

    /// Fill `out` from the window, refilling across as many boundaries as the
    /// field spans
    fn fill(&mut self, out: &mut [u8]) -> Result<()> {
        let mut written = 0;
        while written < out.len() {
            if self.pos == self.window_len {
                self.refill()?;
            }
            let take = (out.len() - written).min(self.window_len - self.pos);
            out[written..written + take]
                .copy_from_slice(&self.window[self.pos..self.pos + take]);
            self.pos += take;
            written += take;
        }
        Ok(())
    }

    /// Load the next window from the mapping.
    ///
    /// Fails with `EndOfStream` when the next window would start at or past
    /// the mapped length — the expected signal that the log is consumed.
    fn refill(&mut self) -> Result<()> {
        let next = self.window_start + self.window_len as u64;
        if next >= self.file_len {
            return Err(StrataError::EndOfStream);
        }

        let mmap = self.mmap.as_ref().ok_or(StrataError::EndOfStream)?;
        let take = self.window_size.min((self.file_len - next) as usize);
        let start = next as usize;
        self.window[..take].copy_from_slice(&mmap[start..start + take]);

        self.window_start = next;
        self.window_len = take;
        self.pos = 0;
        Ok(())
    }
}

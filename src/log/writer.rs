//! Log Writer
//!
//! Buffered producer of the raw log record format. The engine itself only
//! consumes logs; this writer exists for fixtures, benches, and the build
//! CLI's demo data.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;

/// Appends records to a raw log file
pub struct LogWriter {
    writer: BufWriter<File>,
    /// Number of records appended
    record_count: u64,
}

impl LogWriter {
    /// Create a log file, truncating any existing content
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: BufWriter::new(file),
            record_count: 0,
        })
    }

    /// Append one record: key_size, key, value_size, value
    pub fn append(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.writer.write_all(&(key.len() as u32).to_be_bytes())?;
        self.writer.write_all(key)?;
        self.writer.write_all(&(value.len() as u64).to_be_bytes())?;
        self.writer.write_all(value)?;
        self.record_count += 1;
        Ok(())
    }

    /// Number of records appended so far
    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    /// Flush and sync the log to disk
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        self.writer.get_ref().sync_all()?;
        Ok(())
    }
}

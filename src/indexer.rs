//! Indexer
//!
//! The build pipeline: streams the raw log record by record and compiles it
//! into the paged index and value files. Strictly single-threaded — page ids
//! and slots are cumulative state that must advance in log order.

use crate::config::Config;
use crate::error::{Result, StrataError};
use crate::log::LogReader;
use crate::page::{IndexPage, PageWriter, ValuePage};

/// Statistics from a completed build
#[derive(Debug, Clone, Copy)]
pub struct BuildStats {
    /// Records compiled from the log
    pub records: u64,
    /// Index pages flushed (including the final partial page)
    pub index_pages: u32,
    /// Value pages flushed (including the final partial page)
    pub value_pages: u32,
}

/// Compiles a raw log into paged index/value files
pub struct Indexer {
    config: Config,
}

impl Indexer {
    /// Create an indexer for the given configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run a full build: raw log → index file + value file.
    ///
    /// Always a complete rebuild; the output files are truncated first. I/O
    /// failures are fatal and never retried — already-flushed pages are left
    /// as-is.
    pub fn run(&self) -> Result<BuildStats> {
        tracing::info!(log = %self.config.log_path.display(), "building index");

        let mut reader = LogReader::open(&self.config.log_path)?;
        let mut index_writer =
            PageWriter::create(&self.config.index_path, self.config.index_page_size)?;
        let mut value_writer =
            PageWriter::create(&self.config.value_path, self.config.value_page_size)?;

        let mut index_page = IndexPage::new(self.config.index_page_size);
        let mut value_page = ValuePage::new(self.config.value_page_size);
        let mut val_page_id: u32 = 0;
        let mut records: u64 = 0;

        loop {
            // EndOfStream at the key-size position is the clean end of the
            // log; anywhere later in a record it means a truncated log and
            // propagates as a build failure.
            let key_size = match reader.read_key_size() {
                Ok(n) => n,
                Err(StrataError::EndOfStream) => break,
                Err(e) => return Err(e),
            };
            let key = reader.read_key(key_size)?;
            let value_size = reader.read_value_size()?;
            let value = reader.read_value(value_size)?;

            // Value side: on overflow, flush and roll, then retry the same
            // append — the overflowing record becomes the first entry of the
            // fresh page, never split across two.
            let slot = match value_page.append(&value) {
                Ok(slot) => slot,
                Err(StrataError::PageFull { .. }) => {
                    value_writer.write_page(&value_page.encode())?;
                    value_page = ValuePage::new(self.config.value_page_size);
                    val_page_id += 1;
                    // A value too large for an empty page is fatal here.
                    value_page.append(&value)?
                }
                Err(e) => return Err(e),
            };

            // Index side, symmetric. The entry records exactly the page and
            // slot the value just landed in; the two page streams roll
            // independently but stay referentially consistent.
            if let Err(err) = index_page.append(&key, val_page_id, slot) {
                match err {
                    StrataError::PageFull { .. } => {
                        index_writer.write_page(&index_page.encode())?;
                        index_page = IndexPage::new(self.config.index_page_size);
                        index_page.append(&key, val_page_id, slot)?;
                    }
                    e => return Err(e),
                }
            }

            records += 1;
        }

        // Flush whatever remains, zero-padded to capacity. Unconditional: an
        // empty log still yields one empty page per file.
        value_writer.write_page(&value_page.encode())?;
        index_writer.write_page(&index_page.encode())?;
        value_writer.sync()?;
        index_writer.sync()?;

        let stats = BuildStats {
            records,
            index_pages: index_writer.pages_written(),
            value_pages: value_writer.pages_written(),
        };
        tracing::info!(
            records = stats.records,
            index_pages = stats.index_pages,
            value_pages = stats.value_pages,
            "build complete"
        );
        Ok(stats)
    }
}

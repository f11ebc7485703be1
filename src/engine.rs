//! Engine Module
//!
//! The serving side: loads the compiled index file into the in-memory index,
//! then answers exact-match point lookups against the value file.
//!
//! ## Concurrency Model
//!
//! `open` does all the mutable work; the engine it returns is read-only.
//! The MemIndex is never touched again and the file readers decode into
//! fresh allocations, so `get` takes `&self` and many threads may call it
//! concurrently without locking.

use crate::config::Config;
use crate::error::{Result, StrataError};
use crate::mem_index::MemIndex;
use crate::page::{IndexFileReader, Pos, ValueFileReader};

/// The read-only lookup engine over a compiled file pair
pub struct Engine {
    config: Config,

    /// Key → Pos mapping built from the index file; immutable after open
    index: MemIndex,

    /// Mapped value file; decodes are fresh copies, safe for `&self` reads
    values: ValueFileReader,
}

impl Engine {
    /// Open a compiled file pair and build the in-memory index.
    ///
    /// Iterates index-file offsets `0, P, 2P, …`, inserting every decoded
    /// entry; the first failed page read is the end of the file, not an
    /// error. There is no half-initialized engine state — a changed log
    /// requires a fresh build and a fresh `open`.
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;
        tracing::info!(index = %config.index_path.display(), "loading index");

        let index_reader = IndexFileReader::open(&config.index_path, config.index_page_size)?;
        let values = ValueFileReader::open(&config.value_path, config.value_page_size)?;

        let mut index = MemIndex::new();
        let mut offset: u64 = 0;
        loop {
            let entries = match index_reader.read(offset) {
                Ok(entries) => entries,
                Err(_) => break,
            };
            for entry in entries {
                index.insert(
                    entry.key,
                    Pos {
                        val_page_id: entry.val_page_id,
                        val_offset: entry.val_offset,
                    },
                );
            }
            offset += config.index_page_size as u64;
        }

        tracing::info!(keys = index.len(), "index loaded");
        Ok(Self {
            config,
            index,
            values,
        })
    }

    /// Look up a key's value.
    ///
    /// Fails with `KeyNotFound` when the key is absent. A value-page read
    /// that fails (overflow, bad slot, corrupt page) also degrades to
    /// `KeyNotFound` — serving errors never abort the process.
    pub fn get(&self, key: &[u8]) -> Result<Vec<u8>> {
        let pos = self.index.search(key).ok_or(StrataError::KeyNotFound)?;

        let page_offset = u64::from(pos.val_page_id) * self.config.value_page_size as u64;
        match self.values.read(page_offset, pos.val_offset) {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::warn!(
                    val_page_id = pos.val_page_id,
                    val_offset = pos.val_offset,
                    error = %err,
                    "value read failed, degrading to not-found"
                );
                Err(StrataError::KeyNotFound)
            }
        }
    }

    /// Number of keys in the in-memory index
    pub fn key_count(&self) -> usize {
        self.index.len()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

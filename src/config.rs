//! Configuration for StrataKV
//!
//! Centralized configuration with sensible defaults. Paths and page sizes are
//! explicit values passed into the build and serve constructors, never
//! process-wide constants.

use std::path::PathBuf;

use crate::error::{Result, StrataError};
use crate::page::{INDEX_ENTRY_SIZE, INDEX_PAGE_HEADER, VALUE_ENTRY_SIZE, VALUE_PAGE_HEADER};

/// Default index page capacity: 32 MiB
pub const DEFAULT_INDEX_PAGE_SIZE: usize = 32 * 1024 * 1024;

/// Default value page capacity: 64 MiB
pub const DEFAULT_VALUE_PAGE_SIZE: usize = 64 * 1024 * 1024;

/// Main configuration for a StrataKV instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // File Locations
    // -------------------------------------------------------------------------
    /// The raw append-only log the build consumes (read-only, never mutated)
    pub log_path: PathBuf,

    /// The compiled index page file
    pub index_path: PathBuf,

    /// The compiled value page file
    pub value_path: PathBuf,

    // -------------------------------------------------------------------------
    // Page Geometry
    // -------------------------------------------------------------------------
    /// Index page capacity in bytes; page k starts at byte k * index_page_size
    pub index_page_size: usize,

    /// Value page capacity in bytes; page k starts at byte k * value_page_size
    pub value_page_size: usize,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP listen address for the read server
    pub listen_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("./stratakv_data/raw.log"),
            index_path: PathBuf::from("./stratakv_data/000000000.idx"),
            value_path: PathBuf::from("./stratakv_data/000000000.val"),
            index_page_size: DEFAULT_INDEX_PAGE_SIZE,
            value_page_size: DEFAULT_VALUE_PAGE_SIZE,
            listen_addr: "127.0.0.1:6379".to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check that the page sizes can hold at least one entry header.
    ///
    /// A page smaller than its own header space could never accept an append
    /// and the build would roll pages forever.
    pub fn validate(&self) -> Result<()> {
        let index_floor = INDEX_PAGE_HEADER + INDEX_ENTRY_SIZE;
        if self.index_page_size <= index_floor {
            return Err(StrataError::Config(format!(
                "index_page_size must exceed {} bytes, got {}",
                index_floor, self.index_page_size
            )));
        }
        let value_floor = VALUE_PAGE_HEADER + VALUE_ENTRY_SIZE;
        if self.value_page_size <= value_floor {
            return Err(StrataError::Config(format!(
                "value_page_size must exceed {} bytes, got {}",
                value_floor, self.value_page_size
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the raw log path
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_path = path.into();
        self
    }

    /// Set the index file path
    pub fn index_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.index_path = path.into();
        self
    }

    /// Set the value file path
    pub fn value_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.value_path = path.into();
        self
    }

    /// Set the index page capacity (in bytes)
    pub fn index_page_size(mut self, size: usize) -> Self {
        self.config.index_page_size = size;
        self
    }

    /// Set the value page capacity (in bytes)
    pub fn value_page_size(mut self, size: usize) -> Self {
        self.config.value_page_size = size;
        self
    }

    /// Set the TCP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

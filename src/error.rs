//! Error types for StrataKV
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using StrataError
pub type Result<T> = std::result::Result<T, StrataError>;

/// Unified error type for StrataKV operations
#[derive(Debug, Error)]
pub enum StrataError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Log Errors
    // -------------------------------------------------------------------------
    /// The raw log has been fully consumed. This is the expected end-of-build
    /// signal, not a fault.
    #[error("end of log stream")]
    EndOfStream,

    // -------------------------------------------------------------------------
    // Page Errors
    // -------------------------------------------------------------------------
    /// The entry does not fit into the current page. Resolved internally by
    /// flushing and rolling to a fresh page; only surfaces when a single
    /// entry exceeds an empty page's capacity.
    #[error("page full: entry of {entry_size} bytes does not fit ({used_size}/{page_size} bytes used)")]
    PageFull {
        entry_size: usize,
        used_size: usize,
        page_size: usize,
    },

    #[error("page offset {offset} overflows file of {file_len} bytes")]
    Overflow { offset: u64, file_len: u64 },

    #[error("range error: {0}")]
    RangeError(String),

    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("Key not found")]
    KeyNotFound,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

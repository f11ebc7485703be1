//! Raw Log Module
//!
//! The raw log is an external, read-only input: a back-to-back sequence of
//! records terminated by end-of-file, with no framing beyond the fields
//! themselves.
//!
//! ## Record Format
//! ```text
//! ┌──────────┬────────┬────────────┬────────┐
//! │ key_size │  key   │ value_size │ value  │
//! │  u32 BE  │ bytes  │   u64 BE   │ bytes  │
//! └──────────┴────────┴────────────┴────────┘
//! ```

mod reader;
mod writer;

pub use reader::LogReader;
pub use writer::LogWriter;

/// Default working-window size for streaming log reads: 1 MiB
pub const DEFAULT_WINDOW_SIZE: usize = 1024 * 1024;

//! # StrataKV
//!
//! An embedded key-value engine that compiles an append-only log of
//! key/value records into paged on-disk files, then serves read-only
//! exact-match lookups from an in-memory index built over those pages.
//!
//! ## Architecture Overview
//!
//! ```text
//!                        BUILD PHASE
//! ┌──────────┐     ┌─────────────────────────────────────┐
//! │ raw log  │────▶│              Indexer                 │
//! │ (mmap)   │     │  LogReader → IndexPage / ValuePage   │
//! └──────────┘     │            → PageWriter              │
//!                  └─────────┬──────────────────┬────────┘
//!                            ▼                  ▼
//!                     ┌────────────┐     ┌────────────┐
//!                     │ index file │     │ value file │
//!                     │ (32 MiB    │     │ (64 MiB    │
//!                     │  pages)    │     │  pages)    │
//!                     └─────┬──────┘     └─────┬──────┘
//!                        SERVE PHASE           │
//!                           ▼                  ▼
//!                  ┌────────────────┐   ┌──────────────┐
//!                  │ Engine::open   │   │  Engine::get │
//!                  │ (MemIndex:     │──▶│  key → Pos → │
//!                  │  key → Pos)    │   │  value bytes │
//!                  └────────────────┘   └──────────────┘
//! ```
//!
//! The compiled files are immutable: a changed log requires a fresh build
//! and a fresh [`Engine`] instance.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod log;
pub mod page;
pub mod mem_index;
pub mod indexer;
pub mod engine;
pub mod server;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, StrataError};
pub use config::Config;
pub use engine::Engine;
pub use indexer::Indexer;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of StrataKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

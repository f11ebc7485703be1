//! StrataKV Server Binary
//!
//! Opens a compiled file pair and serves read-only lookups over TCP.

use std::sync::Arc;

use clap::Parser;
use stratakv::server::Server;
use stratakv::{Config, Engine};
use tracing_subscriber::{fmt, EnvFilter};

/// StrataKV Server
#[derive(Parser, Debug)]
#[command(name = "stratakv-server")]
#[command(about = "Read-only key-value server over compiled page files")]
#[command(version)]
struct Args {
    /// Compiled index file
    #[arg(long, default_value = "./stratakv_data/000000000.idx")]
    index: String,

    /// Compiled value file
    #[arg(long, default_value = "./stratakv_data/000000000.val")]
    value: String,

    /// Index page size in MiB (must match the build)
    #[arg(long, default_value = "32")]
    index_page_mb: usize,

    /// Value page size in MiB (must match the build)
    #[arg(long, default_value = "64")]
    value_page_mb: usize,

    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:6379")]
    listen: String,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,stratakv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("StrataKV Server v{}", stratakv::VERSION);
    tracing::info!("Index file: {}", args.index);
    tracing::info!("Value file: {}", args.value);
    tracing::info!("Listen address: {}", args.listen);

    let config = Config::builder()
        .index_path(&args.index)
        .value_path(&args.value)
        .index_page_size(args.index_page_mb * 1024 * 1024)
        .value_page_size(args.value_page_mb * 1024 * 1024)
        .listen_addr(&args.listen)
        .build();

    let engine = match Engine::open(config.clone()) {
        Ok(e) => Arc::new(e),
        Err(e) => {
            tracing::error!("Failed to open engine: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Engine serving {} keys", engine.key_count());

    let server = Server::new(config, engine);
    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

//! StrataKV Build Binary
//!
//! Compiles a raw log into the paged index/value file pair. Always a full
//! rebuild; there is no incremental mode.

use clap::Parser;
use stratakv::log::LogWriter;
use stratakv::{Config, Indexer};
use tracing_subscriber::{fmt, EnvFilter};

/// StrataKV Builder
#[derive(Parser, Debug)]
#[command(name = "stratakv-build")]
#[command(about = "Compile an append-only log into paged index/value files")]
#[command(version)]
struct Args {
    /// Raw log to compile
    #[arg(long, default_value = "./stratakv_data/raw.log")]
    log: String,

    /// Output index file
    #[arg(long, default_value = "./stratakv_data/000000000.idx")]
    index: String,

    /// Output value file
    #[arg(long, default_value = "./stratakv_data/000000000.val")]
    value: String,

    /// Index page size in MiB
    #[arg(long, default_value = "32")]
    index_page_mb: usize,

    /// Value page size in MiB
    #[arg(long, default_value = "64")]
    value_page_mb: usize,

    /// Write N synthetic records into the log before building
    #[arg(long)]
    demo: Option<u64>,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,stratakv=debug"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    tracing::info!("StrataKV Build v{}", stratakv::VERSION);

    if let Some(count) = args.demo {
        if let Err(e) = write_demo_log(&args.log, count) {
            tracing::error!("Failed to write demo log: {}", e);
            std::process::exit(1);
        }
        tracing::info!("Wrote {} demo records to {}", count, args.log);
    }

    let config = Config::builder()
        .log_path(&args.log)
        .index_path(&args.index)
        .value_path(&args.value)
        .index_page_size(args.index_page_mb * 1024 * 1024)
        .value_page_size(args.value_page_mb * 1024 * 1024)
        .build();

    let stats = Indexer::new(config)
        .and_then(|indexer| indexer.run())
        .unwrap_or_else(|e| {
            tracing::error!("Build failed: {}", e);
            std::process::exit(1);
        });

    tracing::info!(
        "Built {} records into {} index page(s) and {} value page(s)",
        stats.records,
        stats.index_pages,
        stats.value_pages
    );
}

/// Produce a synthetic raw log for trying the engine out
fn write_demo_log(path: &str, count: u64) -> stratakv::Result<()> {
    if let Some(dir) = std::path::Path::new(path).parent() {
        std::fs::create_dir_all(dir)?;
    }
    let mut writer = LogWriter::create(std::path::Path::new(path))?;
    for i in 0..count {
        let key = format!("key{:09}", i);
        let value = format!("value-{}", i);
        writer.append(key.as_bytes(), value.as_bytes())?;
    }
    writer.finish()
}

//! Read Server
//!
//! Line-oriented TCP protocol over the engine: `get <key>\n` answers with the
//! value bytes and a newline, `(nil)` for a miss, `(error) ERR …` for a
//! malformed command. Thread-per-connection; the engine is lock-free for
//! reads, so connections share one `Arc<Engine>`.

use std::io::{BufRead, BufReader, BufWriter, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

use crate::config::Config;
use crate::engine::Engine;
use crate::error::{Result, StrataError};

const ERR_EMPTY_CMD: &str = "(error) ERR unknown command\n";
const NIL_REPLY: &str = "(nil)\n";

/// TCP server for read-only lookups
pub struct Server {
    config: Config,
    engine: Arc<Engine>,
}

impl Server {
    /// Create a server over an opened engine
    pub fn new(config: Config, engine: Arc<Engine>) -> Self {
        Self { config, engine }
    }

    /// Accept connections until the listener fails (blocking)
    pub fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.listen_addr)?;
        tracing::info!(addr = %self.config.listen_addr, "server listening");

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let engine = Arc::clone(&self.engine);
                    thread::spawn(move || {
                        if let Err(e) = handle_connection(stream, engine) {
                            tracing::warn!("connection error: {}", e);
                        }
                    });
                }
                Err(e) => {
                    tracing::warn!("accept failed: {}", e);
                }
            }
        }
        Ok(())
    }
}

/// Serve one client until it disconnects
fn handle_connection(stream: TcpStream, engine: Arc<Engine>) -> Result<()> {
    let peer_addr = stream
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    // Disable Nagle's algorithm for low latency
    stream.set_nodelay(true)?;

    let mut reader = BufReader::new(stream.try_clone()?);
    let mut writer = BufWriter::new(stream);

    tracing::debug!("connection established from {}", peer_addr);

    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            tracing::debug!("client {} disconnected", peer_addr);
            return Ok(());
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let reply: Vec<u8> = match parts.as_slice() {
            [] => ERR_EMPTY_CMD.into(),
            [cmd, rest @ ..] if cmd.eq_ignore_ascii_case("get") => {
                if rest.len() != 1 {
                    format!("(error) ERR wrong number of arguments for '{}' command\n", cmd)
                        .into_bytes()
                } else {
                    match engine.get(rest[0].as_bytes()) {
                        Ok(mut value) => {
                            value.push(b'\n');
                            value
                        }
                        Err(StrataError::KeyNotFound) => NIL_REPLY.into(),
                        Err(e) => format!("(error) ERR {}\n", e).into_bytes(),
                    }
                }
            }
            [cmd, ..] => format!("(error) ERR unknown command '{}'\n", cmd).into_bytes(),
        };

        writer.write_all(&reply)?;
        writer.flush()?;
    }
}

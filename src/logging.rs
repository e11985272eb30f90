// Structured logging setup.
//
// The terminal belongs to the game, so logs are written to a file. The
// filter is read from `ENDGAME_LOG`, then `RUST_LOG`, then falls back to
// the given default level.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_ENV: &str = "ENDGAME_LOG";

pub fn filter(default_level: &str) -> EnvFilter {
    std::env::var(LOG_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install the global subscriber, appending to `path`. Calling this more
/// than once is harmless; later calls keep the first subscriber.
pub fn init(path: &Path, default_level: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    fmt()
        .with_env_filter(filter(default_level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .ok();

    Ok(())
}

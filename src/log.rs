// src/log.rs
//! Logging setup for the binary: human-readable lines on stderr, mirrored
//! without colours to `.store/debug.log`.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::consts::{LOG_FILE, STORE_DIR};

/// Install the global subscriber. `RUST_LOG` wins over `verbose`.
/// Calling it twice is harmless.
pub fn init(verbose: bool) {
    let default = if verbose { "edcs_migrants=debug" } else { "edcs_migrants=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let file_layer = open_log_file(Path::new(STORE_DIR)).map(|f| {
        fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_writer(Mutex::new(f))
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(file_layer)
        .try_init();
}

/// `None` if the store dir or the file cannot be opened.
fn open_log_file(dir: &Path) -> Option<File> {
    fs::create_dir_all(dir).ok()?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))
        .ok()
}

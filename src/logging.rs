//! Log backend setup.
//!
//! The code logs through the `log` facade. The backend writes to a file,
//! since stdout belongs to the kiosk UI while it runs.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Route log records to `path` (appending), filtered by `RUST_LOG` or `level`.
pub fn init_file_logging(path: &Path, level: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // try_init also installs the `log` -> tracing bridge
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_thread_names(true)
        .try_init()
        .map_err(|e| std::io::Error::other(e.to_string()))
}

//! Tracing setup. The prompt owns the terminal, so nothing is logged unless
//! asked for.

use std::fs::File;

/// Log file written when `MAGPIE_LOG` is set.
pub const LOG_FILE: &str = "magpie.log";

/// Initialize logging.
///
/// - `MAGPIE_LOG` set: debug logs for this crate go to `magpie.log`.
/// - `RUST_LOG` set: formatted logs on stderr, filtered by `RUST_LOG`.
/// - Otherwise no subscriber is installed.
pub fn init() {
    if std::env::var_os("MAGPIE_LOG").is_some() {
        use tracing_subscriber::prelude::*;
        match File::create(LOG_FILE) {
            Ok(file) => {
                let file_layer = tracing_subscriber::fmt::layer()
                    .with_writer(file)
                    .with_ansi(false);
                let filter = tracing_subscriber::EnvFilter::new("magpie=debug");
                let _ = tracing_subscriber::registry()
                    .with(file_layer.with_filter(filter))
                    .try_init();
            }
            Err(err) => {
                eprintln!("Failed to create log file: {err}");
            }
        }
    } else if std::env::var_os("RUST_LOG").is_some() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }
}

//! Tracing initialization and subscriber setup.
//!
//! Logs are written to a file under the data directory: the terminal is
//! owned by the UI, so nothing may print to stdout or stderr while the
//! application runs.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::infrastructure::paths;
use crate::Config;

/// Initializes the tracing subscriber with file-based output.
///
/// The filter directive comes from `config.log_level` (default `info`) and
/// accepts the full `EnvFilter` syntax, e.g. `gatescan=debug`.
///
/// Observability is optional: if the data directory or log file cannot be
/// created, initialization silently does nothing rather than blocking
/// startup. Idempotent; only the first call takes effect.
pub fn init_tracing(config: &Config) {
    let level = config
        .log_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let data_dir = paths::data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths::log_file())
    else {
        return;
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file));

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(fmt_layer);

    let _ = subscriber.try_init();
}

//! Filesystem locations for persisted state, configuration, and logs.
//!
//! Follows the XDG base directory convention: data under
//! `$XDG_DATA_HOME/gatescan` and configuration under
//! `$XDG_CONFIG_HOME/gatescan`, with the usual `~/.local/share` and
//! `~/.config` fallbacks.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "gatescan";

/// Returns the data directory for persisted state and logs.
///
/// Typically `~/.local/share/gatescan`.
#[must_use]
pub fn data_dir() -> PathBuf {
    env::var_os("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| home_dir().join(".local").join("share"))
        .join(APP_DIR)
}

/// Returns the configuration directory.
///
/// Typically `~/.config/gatescan`.
#[must_use]
pub fn config_dir() -> PathBuf {
    env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| home_dir().join(".config"))
        .join(APP_DIR)
}

/// Path of the persisted session document.
#[must_use]
pub fn session_file() -> PathBuf {
    data_dir().join("session.json")
}

/// Path of the configuration file.
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Path of the log file.
///
/// Logs go to a file because the terminal itself is owned by the UI.
#[must_use]
pub fn log_file() -> PathBuf {
    data_dir().join("gatescan.log")
}

fn home_dir() -> PathBuf {
    env::var_os("HOME").map_or_else(|| PathBuf::from("."), PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_live_under_their_directories() {
        assert!(session_file().starts_with(data_dir()));
        assert!(log_file().starts_with(data_dir()));
        assert!(config_file().starts_with(config_dir()));
    }
}

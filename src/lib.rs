//! Gatescan: a terminal console for stadium access control operators.
//!
//! Gatescan is the gate-side front end to a stadium access-control backend:
//! - Operator login against the backend, with the session persisted locally
//! - Fuzzy-searchable match list split into upcoming and finished tabs
//! - A scan-to-verdict workflow that submits one QR payload at a time and
//!   presents the accept/reject verdict before re-arming
//! - Per-zone usage and fraud statistics for any match, on demand
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal Runtime (main.rs)                         │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Session Layer │   │ Gateway Layer │
//! │ (ui/)         │   │ (session/)    │   │ (gateway/)    │
//! │ - Rendering   │   │ - JSON store  │   │ - HTTP client │
//! │ - Theming     │   │ - Atomic save │   │ - Wire types  │
//! │ - Components  │   │ - Store trait │   │ - Scan seam   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Scan, Infrastructure & Domain Layers               │
//! │  - Scan workflow state machine (scan/)              │
//! │  - Filesystem locations (infrastructure/)           │
//! │  - Value types and errors (domain/)                 │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: application state machine with event/action model
//! - [`domain`]: core value types and the error taxonomy
//! - [`gateway`]: HTTP client for the access-control API
//! - [`scan`]: the decode-to-verdict workflow state machine
//! - [`session`]: persisted operator session storage
//! - [`infrastructure`]: filesystem locations
//! - [`ui`]: terminal rendering with theme support
//! - `observability`: file-based tracing (internal)
//!
//! # Configuration
//!
//! Configuration is read from `~/.config/gatescan/config.toml`:
//!
//! ```toml
//! base_url = "https://test.clubafricain.site/api"
//! theme = "dark"
//! # theme_file = "/path/to/theme.toml"
//! log_level = "gatescan=debug"
//! ```
//!
//! Every key is optional; CLI flags override the file.

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod gateway;
pub mod infrastructure;
pub mod observability;
pub mod scan;
pub mod session;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode, MatchTab, Screen, SearchFocus};
pub use domain::{GatescanError, Match, Result, ScanVerdict, Session};
pub use gateway::ApiClient;
pub use ui::Theme;

use std::path::Path;

use serde::Deserialize;

/// Default API base URL when neither the config file nor the CLI sets one.
pub const DEFAULT_BASE_URL: &str = "https://test.clubafricain.site/api";

/// Application configuration.
///
/// Loaded from the TOML config file, then overridden by CLI flags. Every
/// field has a working default so a missing config file is not an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// API base URL. Default: [`DEFAULT_BASE_URL`].
    pub base_url: Option<String>,

    /// Built-in theme name. Ignored if `theme_file` is set.
    #[serde(rename = "theme")]
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. Takes precedence over `theme`.
    pub theme_file: Option<String>,

    /// Log filter directive, full `EnvFilter` syntax. Default: `info`.
    pub log_level: Option<String>,
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// A missing file yields the defaults; a present but malformed file is
    /// an error, so a typo never silently reverts the operator to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GatescanError::Config`] when the file exists but cannot be
    /// read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| GatescanError::Config(format!("failed to read config file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| GatescanError::Config(format!("failed to parse config file: {e}")))
    }

    /// The effective base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

/// Builds the initial application state from configuration.
///
/// Resolves the theme (custom file first, then built-in name, then the
/// default) and returns a fresh [`AppState`] on the login screen. Theme
/// resolution failures fall back to the default rather than aborting.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing gatescan");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |name| {
                Theme::from_name(name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |file| {
            Theme::from_file(file).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %file, error = %e, "failed to load theme file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_file_yields_defaults() {
        let config = Config::load("/definitely/not/a/config.toml").expect("defaults");
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert!(config.theme_name.is_none());
    }

    #[test]
    fn config_file_overrides_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "base_url = \"https://staging.example.org/api\"\nlog_level = \"debug\"\n",
        )
        .expect("write");

        let config = Config::load(&path).expect("load");
        assert_eq!(config.base_url(), "https://staging.example.org/api");
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = [not toml").expect("write");

        assert!(matches!(
            Config::load(&path),
            Err(GatescanError::Config(_))
        ));
    }
}

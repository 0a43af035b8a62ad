//! Theme management and color resolution.
//!
//! Colors are specified as hex strings so custom themes can be loaded from
//! TOML files, and resolved to [`ratatui`] colors at render time. One theme
//! ships built in; a config file can point at a custom one.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! success_fg = "#a6e3a1"
//! error_fg = "#f38ba8"
//! warning_fg = "#f9e2af"
//! info_fg = "#89b4fa"
//! ```

use std::fs;
use std::path::Path;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::domain::error::{GatescanError, Result};

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,

    /// Selected row foreground.
    pub selection_fg: String,
    /// Selected row background.
    pub selection_bg: String,

    pub text_normal: String,
    /// Dimmed text (footer, secondary info).
    pub text_dim: String,

    pub border: String,
    pub search_bar_border: String,

    /// Fuzzy match highlight foreground.
    pub match_highlight_fg: String,
    /// Fuzzy match highlight background.
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Verdict and dialog accents.
    pub success_fg: String,
    pub error_fg: String,
    pub warning_fg: String,
    pub info_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` when the name is unknown; `dark` is the only built-in.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dark" => Some(Self::dark()),
            _ => None,
        }
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`GatescanError::Config`] when the file cannot be read or the
    /// TOML does not parse.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(&path)
            .map_err(|e| GatescanError::Config(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| GatescanError::Config(format!("failed to parse theme TOML: {e}")))
    }

    /// The built-in dark palette.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            colors: ThemeColors {
                header_fg: "#cdd6f4".to_string(),
                selection_fg: "#1e1e2e".to_string(),
                selection_bg: "#f5c2e7".to_string(),
                text_normal: "#cdd6f4".to_string(),
                text_dim: "#6c7086".to_string(),
                border: "#45475a".to_string(),
                search_bar_border: "#f5c2e7".to_string(),
                match_highlight_fg: "#1e1e2e".to_string(),
                match_highlight_bg: "#f9e2af".to_string(),
                empty_state_fg: "#89b4fa".to_string(),
                success_fg: "#a6e3a1".to_string(),
                error_fg: "#f38ba8".to_string(),
                warning_fg: "#f9e2af".to_string(),
                info_fg: "#89b4fa".to_string(),
            },
        }
    }

    /// Resolves a hex string to a terminal color.
    ///
    /// Falls back to white on malformed input rather than failing a render.
    #[must_use]
    pub fn color(hex: &str) -> Color {
        let (r, g, b) = Self::hex_to_rgb(hex);
        Color::Rgb(r, g, b)
    }

    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        // is_ascii keeps the byte-range slicing below from landing inside a
        // multi-byte character in a user-supplied theme value.
        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parses_with_and_without_hash() {
        assert_eq!(Theme::color("#ff0000"), Color::Rgb(255, 0, 0));
        assert_eq!(Theme::color("00ff00"), Color::Rgb(0, 255, 0));
    }

    #[test]
    fn malformed_hex_falls_back_to_white() {
        assert_eq!(Theme::color("nope"), Color::Rgb(255, 255, 255));
        assert_eq!(Theme::color("#ffff"), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn multibyte_hex_falls_back_to_white_without_panicking() {
        // "aééb" is four chars but six bytes, so it passes a byte-length
        // check while slicing mid-character would panic.
        assert_eq!(Theme::color("aééb"), Color::Rgb(255, 255, 255));
        assert_eq!(Theme::color("#aééb"), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn custom_theme_round_trips_through_toml() {
        let theme = Theme::dark();
        let serialized = toml::to_string(&theme).expect("serialize");
        let parsed: Theme = toml::from_str(&serialized).expect("parse");
        assert_eq!(parsed.name, "dark");
        assert_eq!(parsed.colors.header_fg, theme.colors.header_fg);
    }
}

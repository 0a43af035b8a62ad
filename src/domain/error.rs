//! Error types for the gatescan console.
//!
//! This module defines the centralized error type [`GatescanError`] and a type
//! alias [`Result`] used throughout the crate. All errors are implemented with
//! the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Scan-path failures never escape the scan controller as errors: they are
//! folded into a [`crate::domain::ScanVerdict`] and surfaced as a one-shot
//! dialog. The variants here cover everything else: storage, configuration,
//! and transport plumbing.

use thiserror::Error;

/// The main error type for gatescan operations.
///
/// Consolidates all error conditions that can occur while running the console,
/// from session persistence to HTTP transport. Variants that wrap external
/// errors use `#[from]` for automatic conversion.
#[derive(Debug, Error)]
pub enum GatescanError {
    /// The server rejected the submitted payload as invalid.
    ///
    /// Carries the server-supplied, user-facing message.
    #[error("Validation failure: {0}")]
    Validation(String),

    /// The HTTP exchange failed: network error, timeout, or an unparsable
    /// response body.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// Session store operation failed.
    ///
    /// The string contains a description of what went wrong while reading or
    /// writing the persisted session document.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for GatescanError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// A specialized `Result` type for gatescan operations.
pub type Result<T> = std::result::Result<T, GatescanError>;

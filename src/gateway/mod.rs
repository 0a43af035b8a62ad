//! API gateway layer.
//!
//! Four stateless operations against a fixed base endpoint: login, match
//! listing, scan submission, and statistics fetch. The scan submission sits
//! behind the [`ScanGateway`] trait so the scan controller can be exercised
//! against a scripted gateway in tests.
//!
//! # Organization
//!
//! - [`client`]: reqwest implementation with the fixed 10 s timeout
//! - [`types`]: wire request/response shapes and domain conversions

pub mod client;
pub mod types;

use async_trait::async_trait;

use crate::domain::error::Result;
use crate::domain::{ScanAttempt, ScanReply};

pub use client::ApiClient;

/// The single-operation seam the scan controller depends on.
///
/// The controller never sees HTTP: it hands over an attempt and a token and
/// receives either a structured reply or a transport error, which it maps to
/// a verdict itself.
#[async_trait]
pub trait ScanGateway: Send + Sync {
    /// Submits one scan attempt.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport-level failures; a server-side
    /// rejection is a successful call with `success: false` in the reply.
    async fn submit_scan(&self, attempt: &ScanAttempt, token: &str) -> Result<ScanReply>;
}

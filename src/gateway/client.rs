//! HTTP client for the access-control API.
//!
//! [`ApiClient`] is stateless beyond its base URL: the bearer token is passed
//! into each authenticated call rather than cached, so the client never holds
//! credentials the application state has already discarded. Every operation
//! is a single fire-and-await exchange with the fixed timeout; there is no
//! caching, pagination, or retry.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use tracing::Instrument;

use crate::domain::error::{GatescanError, Result};
use crate::domain::stats::{MatchStatistics, StatsOutcome};
use crate::domain::{Match, ScanAttempt, ScanReply, Session, User};
use crate::gateway::types::{
    LoginRequest, LoginResponse, MatchStatsResponse, MatchesResponse, ScanRequest, ScanResponse,
};
use crate::gateway::ScanGateway;

/// Fixed request timeout, matching the backend contract.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Message shown when a statistics fetch cannot produce a snapshot.
const STATS_UNAVAILABLE_MESSAGE: &str = "Statistics are unavailable right now";

/// Every exchange negotiates JSON both ways, including the GET operations.
fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

/// Client for the four access-control endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the given base URL.
    ///
    /// The timeout and JSON content negotiation are fixed; only the base URL
    /// varies between environments.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(json_headers())
            .build()
            .map_err(|e| GatescanError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    /// Authenticates the operator.
    ///
    /// A structured `success: false` answer becomes a
    /// [`GatescanError::Validation`] carrying the server message; a success
    /// answer missing its token or user is treated as a transport-level
    /// malformation.
    ///
    /// # Errors
    ///
    /// [`GatescanError::Validation`] on rejected credentials,
    /// [`GatescanError::Transport`] on network or parse failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let span = tracing::debug_span!("login", email = %email);
        async {
            let body = LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            };

            let resp: LoginResponse = self
                .client
                .post(self.url("/auth/login"))
                .json(&body)
                .send()
                .await?
                .json()
                .await?;

            if !resp.success {
                return Err(GatescanError::Validation(
                    resp.message.unwrap_or_else(|| "Login failed".to_string()),
                ));
            }

            match (resp.token, resp.user) {
                (Some(token), Some(user)) => {
                    tracing::info!(user = %user.name, "login succeeded");
                    Ok(Session::new(
                        token,
                        User {
                            id: user.id,
                            email: user.email,
                            name: user.name,
                        },
                    ))
                }
                _ => Err(GatescanError::Transport(
                    "login response missing token or user".to_string(),
                )),
            }
        }
        .instrument(span)
        .await
    }

    /// Fetches the current match list.
    ///
    /// # Errors
    ///
    /// [`GatescanError::Validation`] when the server answers
    /// `success: false`, [`GatescanError::Transport`] otherwise.
    pub async fn list_matches(&self, token: &str) -> Result<Vec<Match>> {
        let span = tracing::debug_span!("list_matches");
        async {
            let resp: MatchesResponse = self
                .client
                .get(self.url("/games"))
                .bearer_auth(token)
                .send()
                .await?
                .json()
                .await?;

            if !resp.success {
                return Err(GatescanError::Validation(
                    resp.message
                        .unwrap_or_else(|| "Failed to load matches".to_string()),
                ));
            }

            let matches: Vec<Match> = resp
                .matches
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect();

            tracing::debug!(count = matches.len(), "matches loaded");
            Ok(matches)
        }
        .instrument(span)
        .await
    }

    /// Fetches usage/fraud statistics for one match.
    ///
    /// Contracted to never raise: transport and parse failures fold into
    /// [`StatsOutcome::Unavailable`] the same way a structured server failure
    /// does, so callers need no error handling on this path.
    pub async fn fetch_match_stats(&self, match_id: &str, token: &str) -> StatsOutcome {
        let span = tracing::debug_span!("fetch_match_stats", match_id = %match_id);

        let result: Result<MatchStatsResponse> = async {
            let resp = self
                .client
                .get(self.url(&format!("/stats/matches/{match_id}")))
                .bearer_auth(token)
                .send()
                .await?
                .json()
                .await?;
            Ok(resp)
        }
        .instrument(span)
        .await;

        match result {
            Ok(resp) if resp.success => StatsOutcome::Loaded(MatchStatistics::from(resp)),
            Ok(resp) => StatsOutcome::Unavailable {
                message: resp
                    .message
                    .unwrap_or_else(|| STATS_UNAVAILABLE_MESSAGE.to_string()),
            },
            Err(e) => {
                tracing::warn!(error = %e, "statistics fetch failed");
                StatsOutcome::Unavailable {
                    message: STATS_UNAVAILABLE_MESSAGE.to_string(),
                }
            }
        }
    }
}

#[async_trait]
impl ScanGateway for ApiClient {
    async fn submit_scan(&self, attempt: &ScanAttempt, token: &str) -> Result<ScanReply> {
        let span = tracing::debug_span!("submit_scan", match_id = %attempt.match_id);
        async {
            let body = ScanRequest {
                game_id: attempt.match_id.clone(),
                qr_code_data: attempt.payload.clone(),
                scanned_by: attempt.operator.clone(),
            };

            let resp: ScanResponse = self
                .client
                .post(self.url("/stadium-access/scan"))
                .bearer_auth(token)
                .json(&body)
                .send()
                .await?
                .json()
                .await?;

            tracing::debug!(success = resp.success, "scan reply received");
            Ok(ScanReply {
                success: resp.success,
                message: resp.message,
                ticket: resp.ticket.map(Into::into),
            })
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_doubled_slash() {
        let client = ApiClient::new("https://api.example.org/api/").expect("client");
        assert_eq!(
            client.url("/auth/login"),
            "https://api.example.org/api/auth/login"
        );
    }

    #[test]
    fn every_exchange_carries_json_content_negotiation() {
        let headers = json_headers();
        assert_eq!(
            headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
        assert_eq!(
            headers.get(ACCEPT).and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
    }

    // The operation futures must stay spawnable; an entered span guard held
    // across an await would make them `!Send`.
    #[test]
    fn operation_futures_are_send() {
        fn assert_send<F: std::future::Future + Send>(_: F) {}

        let client = ApiClient::new("https://api.example.org/api").expect("client");
        assert_send(client.login("jean@example.com", "pw"));
        assert_send(client.list_matches("token"));
        assert_send(client.fetch_match_stats("42", "token"));
    }
}

//! Scan attempt and verdict domain types.
//!
//! A [`ScanAttempt`] is constructed the instant a decode event is accepted by
//! the controller latch and is submitted exactly once; a [`ScanVerdict`] is
//! the server's (or the transport layer's) one-shot answer. Verdicts are held
//! only long enough to render a dialog, then discarded.

use serde::{Deserialize, Serialize};

/// Default message when the server rejects a scan without explanation.
pub const DEFAULT_REJECTION_MESSAGE: &str = "This passport is not valid for this match";

/// Generic message for transport-level failures.
///
/// Deliberately independent of the underlying error text: raw transport
/// errors go to the log, not to the gate operator.
pub const TECHNICAL_ERROR_MESSAGE: &str =
    "Scan could not be processed. Check your connection and try again";

/// One decoded payload bound for the backend.
///
/// Built from the decode event plus the operator context the instant the
/// controller latch accepts the event. Never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanAttempt {
    /// Match the ticket is being checked against.
    pub match_id: String,
    /// Raw decoded QR payload, passed through untouched.
    pub payload: String,
    /// Display name of the scanning operator.
    pub operator: String,
}

/// Ticket details returned on an accepted scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub match_id: String,
    pub seat_number: String,
    pub is_valid: bool,
}

/// Why a scan failed before or during the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A precondition (token, match id, operator) was not met; no network
    /// call was made.
    MissingCredential,
    /// The HTTP exchange failed or the response was unparsable.
    Transport,
}

/// The one-shot outcome of a scan exchange.
///
/// Exactly one verdict exists per accepted decode event. The three shapes
/// map to the three dialog styles the operator sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanVerdict {
    /// The server accepted the ticket.
    Accepted {
        /// Ticket details when the server includes them.
        ticket: Option<Ticket>,
    },
    /// The server rejected the ticket with a structured, user-facing message.
    Rejected { message: String },
    /// The exchange never produced a server answer.
    Failed {
        kind: FailureKind,
        /// User-facing description; generic for transport failures.
        message: String,
    },
}

impl ScanVerdict {
    /// Builds the precondition-failure verdict for a missing credential.
    #[must_use]
    pub fn missing_credential(what: &str) -> Self {
        Self::Failed {
            kind: FailureKind::MissingCredential,
            message: format!("Missing {what}"),
        }
    }

    /// Builds the generic transport-failure verdict.
    #[must_use]
    pub fn transport_failure() -> Self {
        Self::Failed {
            kind: FailureKind::Transport,
            message: TECHNICAL_ERROR_MESSAGE.to_string(),
        }
    }

    /// Whether the server accepted the ticket.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// The server's structured reply to a scan submission, before it is mapped
/// to a verdict.
///
/// Returned by the gateway seam so the controller owns the reply-to-verdict
/// mapping (including the default rejection message).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReply {
    pub success: bool,
    pub message: Option<String>,
    pub ticket: Option<Ticket>,
}

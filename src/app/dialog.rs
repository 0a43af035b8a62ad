//! Modal dialog model.
//!
//! Every operator-facing outcome (login failure, scan verdict, logout
//! confirmation, permission denial) surfaces through one modal dialog slot
//! in the application state. A dialog blocks all other input until it is
//! confirmed, cancelled, or dismissed, and carries a typed follow-up so the
//! handler knows what the answer means without re-deriving context.

use crate::domain::scan::DEFAULT_REJECTION_MESSAGE;
use crate::domain::{ScanVerdict, Ticket};

/// Visual style of a dialog, mapped to a theme color by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Success,
    Error,
    Warning,
    Info,
    /// Two-button confirm/cancel dialog.
    Confirm,
}

/// What confirming (or dismissing) the dialog should trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUp {
    /// Nothing beyond closing the dialog.
    None,
    /// Clear the session and return to the login screen.
    Logout,
    /// Re-request the capture permission.
    RequestPermission,
    /// Re-arm the scan controller for the next passport.
    AcknowledgeVerdict,
}

/// One modal dialog awaiting an operator answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
    pub follow_up: FollowUp,
}

impl Dialog {
    /// Simple informational dialog with no follow-up.
    #[must_use]
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Info,
            title: title.into(),
            message: message.into(),
            follow_up: FollowUp::None,
        }
    }

    /// Error dialog with no follow-up.
    #[must_use]
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Error,
            title: title.into(),
            message: message.into(),
            follow_up: FollowUp::None,
        }
    }

    /// Logout confirmation.
    #[must_use]
    pub fn confirm_logout() -> Self {
        Self {
            kind: DialogKind::Confirm,
            title: "Log out".to_string(),
            message: "End this session and return to login?".to_string(),
            follow_up: FollowUp::Logout,
        }
    }

    /// Offer to re-request a deniable capture permission.
    #[must_use]
    pub fn confirm_permission_retry() -> Self {
        Self {
            kind: DialogKind::Confirm,
            title: "Scanner unavailable".to_string(),
            message: "Capture permission was denied. Request it again?".to_string(),
            follow_up: FollowUp::RequestPermission,
        }
    }

    /// Terminal permission denial; the workflow cannot proceed.
    #[must_use]
    pub fn permission_blocked() -> Self {
        Self {
            kind: DialogKind::Warning,
            title: "Scanner unavailable".to_string(),
            message: "Capture permission is permanently denied on this terminal.".to_string(),
            follow_up: FollowUp::None,
        }
    }

    /// Maps a scan verdict to its presentation dialog.
    ///
    /// Dismissing any of these re-arms the controller, so the operator gets
    /// back to a live scanner with a single keypress regardless of outcome.
    #[must_use]
    pub fn for_verdict(verdict: &ScanVerdict) -> Self {
        match verdict {
            ScanVerdict::Accepted { ticket } => Self {
                kind: DialogKind::Success,
                title: "Access granted".to_string(),
                message: ticket
                    .as_ref()
                    .map_or_else(|| "Ticket accepted".to_string(), Self::ticket_summary),
                follow_up: FollowUp::AcknowledgeVerdict,
            },
            ScanVerdict::Rejected { message } => Self {
                kind: DialogKind::Error,
                title: "Access denied".to_string(),
                message: if message.is_empty() {
                    DEFAULT_REJECTION_MESSAGE.to_string()
                } else {
                    message.clone()
                },
                follow_up: FollowUp::AcknowledgeVerdict,
            },
            ScanVerdict::Failed { message, .. } => Self {
                kind: DialogKind::Warning,
                title: "Scan failed".to_string(),
                message: message.clone(),
                follow_up: FollowUp::AcknowledgeVerdict,
            },
        }
    }

    fn ticket_summary(ticket: &Ticket) -> String {
        format!("Ticket accepted. Seat {}", ticket.seat_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scan::TECHNICAL_ERROR_MESSAGE;

    #[test]
    fn accepted_verdict_shows_the_seat() {
        let dialog = Dialog::for_verdict(&ScanVerdict::Accepted {
            ticket: Some(Ticket {
                id: "t1".to_string(),
                match_id: "42".to_string(),
                seat_number: "A12".to_string(),
                is_valid: true,
            }),
        });
        assert_eq!(dialog.kind, DialogKind::Success);
        assert!(dialog.message.contains("A12"));
        assert_eq!(dialog.follow_up, FollowUp::AcknowledgeVerdict);
    }

    #[test]
    fn empty_rejection_falls_back_to_the_default_message() {
        let dialog = Dialog::for_verdict(&ScanVerdict::Rejected {
            message: String::new(),
        });
        assert_eq!(dialog.message, DEFAULT_REJECTION_MESSAGE);
    }

    #[test]
    fn transport_failure_uses_the_generic_message() {
        let dialog = Dialog::for_verdict(&ScanVerdict::transport_failure());
        assert_eq!(dialog.kind, DialogKind::Warning);
        assert_eq!(dialog.message, TECHNICAL_ERROR_MESSAGE);
    }
}

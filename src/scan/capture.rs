//! Capture capability boundary.
//!
//! The backend does not care where a decoded payload comes from; the
//! controller only needs a capability that can be granted or denied and a
//! stream of `{format, payload}` decode events. On a handheld device that is
//! the camera; in this console it is the interactive terminal, where the
//! operator's wedge scanner (or keyboard) types the payload.

use serde::{Deserialize, Serialize};

/// Barcode symbologies the capture surface reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecodeFormat {
    /// Standard QR code (the passport format).
    Qr,
    /// PDF417, printed on some legacy tickets.
    Pdf417,
}

/// One decoded payload delivered by the capture surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeEvent {
    pub format: DecodeFormat,
    /// Raw decoded content, passed to the backend untouched.
    pub payload: String,
}

impl DecodeEvent {
    /// Convenience constructor for the common QR case.
    #[must_use]
    pub fn qr(payload: impl Into<String>) -> Self {
        Self {
            format: DecodeFormat::Qr,
            payload: payload.into(),
        }
    }
}

/// State of the capture permission gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    /// Never requested.
    Undetermined,
    Granted,
    /// Denied, but a re-request may succeed.
    Denied,
    /// Denied and re-requesting cannot help.
    DeniedPermanently,
}

impl PermissionStatus {
    /// Whether the capture surface may be engaged.
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }

    /// Whether offering a re-request to the operator makes sense.
    #[must_use]
    pub const fn can_ask_again(self) -> bool {
        matches!(self, Self::Undetermined | Self::Denied)
    }
}

/// Gate guarding access to the capture surface.
///
/// Mirrors a mobile camera-permission API: a query that does not prompt, and
/// a request that may.
pub trait PermissionGate {
    /// Current status without prompting.
    fn status(&self) -> PermissionStatus;

    /// Requests the capability, possibly prompting, and returns the outcome.
    fn request(&mut self) -> PermissionStatus;
}

/// Permission gate for the terminal capture surface.
///
/// Capture needs an interactive terminal to read scanner keystrokes from, so
/// the request succeeds exactly when stdin is a TTY. A non-TTY stdin cannot
/// become one, hence `DeniedPermanently`.
#[derive(Debug)]
pub struct TerminalGate {
    status: PermissionStatus,
}

impl TerminalGate {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            status: PermissionStatus::Undetermined,
        }
    }
}

impl Default for TerminalGate {
    fn default() -> Self {
        Self::new()
    }
}

impl PermissionGate for TerminalGate {
    fn status(&self) -> PermissionStatus {
        self.status
    }

    fn request(&mut self) -> PermissionStatus {
        use crossterm::tty::IsTty;

        self.status = if std::io::stdin().is_tty() {
            PermissionStatus::Granted
        } else {
            PermissionStatus::DeniedPermanently
        };

        tracing::debug!(status = ?self.status, "capture permission requested");
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn granted_is_the_only_engageable_status() {
        assert!(PermissionStatus::Granted.is_granted());
        assert!(!PermissionStatus::Denied.is_granted());
        assert!(!PermissionStatus::DeniedPermanently.is_granted());
        assert!(!PermissionStatus::Undetermined.is_granted());
    }

    #[test]
    fn permanent_denial_is_not_re_askable() {
        assert!(PermissionStatus::Denied.can_ask_again());
        assert!(PermissionStatus::Undetermined.can_ask_again());
        assert!(!PermissionStatus::DeniedPermanently.can_ask_again());
        assert!(!PermissionStatus::Granted.can_ask_again());
    }
}

//! The scan workflow controller.
//!
//! This is the one stateful core of the console: a finite state machine that
//! gates exactly one decode-to-verdict round trip at a time and guarantees
//! the capture surface never gets a second attempt in flight while one is
//! being processed.
//!
//! # States
//!
//! ```text
//!          begin              granted
//!  Idle ──────────► AwaitingPermission ──────► Armed ◄──────────────┐
//!   ▲                    │ denied               │ first decode      │
//!   │                    ▼                      ▼ (latch set)       │ acknowledge
//!   │                  Idle                 Processing              │ (latch reset)
//!   │                                           │ verdict           │
//!   └──────────── stop (from any state) ◄── Resolved ───────────────┘
//! ```
//!
//! Decode events arriving in `Processing` or `Resolved` are discarded by the
//! `scanned` latch. The latch check happens synchronously on the single event
//! loop that delivers decode events, so two events can never both pass the
//! `Armed → Processing` guard.
//!
//! The workflow always resets rather than terminating: every verdict
//! (accepted, rejected, or transport failure) re-arms the controller after
//! acknowledgement so the operator can scan the next passport immediately.

use crate::domain::scan::DEFAULT_REJECTION_MESSAGE;
use crate::domain::{ScanAttempt, ScanVerdict};
use crate::gateway::ScanGateway;
use crate::scan::capture::{DecodeEvent, PermissionStatus};

/// Phase of the scan workflow state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    /// Capture capability not engaged; no attempt in flight.
    Idle,
    /// Capability requested, not yet granted or denied.
    AwaitingPermission,
    /// Capability granted and engaged; ready to accept one decode event.
    Armed,
    /// A decode event was captured and the verdict request is in flight.
    Processing,
    /// A verdict arrived and is being presented to the operator.
    Resolved,
}

/// Per-match context a controller instance is bound to.
///
/// The attempt fields that do not come from the decode event itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanContext {
    pub match_id: String,
    pub operator: String,
}

/// The scan workflow state machine.
///
/// One instance exists per open scan screen. At most one [`ScanAttempt`] is
/// in flight per instance at any time, enforced by the `scanned` latch
/// rather than by the network layer.
#[derive(Debug)]
pub struct ScanController {
    context: ScanContext,
    phase: ScanPhase,
    /// Single-in-flight latch: set when a decode event is accepted, reset
    /// only on acknowledgement or stop.
    scanned: bool,
    /// Verdict held for presentation; discarded on acknowledgement.
    verdict: Option<ScanVerdict>,
    /// Outcome of the last permission request, for the re-request offer.
    permission: PermissionStatus,
}

impl ScanController {
    /// Creates an idle controller bound to one match and operator.
    #[must_use]
    pub const fn new(context: ScanContext) -> Self {
        Self {
            context,
            phase: ScanPhase::Idle,
            scanned: false,
            verdict: None,
            permission: PermissionStatus::Undetermined,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> ScanPhase {
        self.phase
    }

    #[must_use]
    pub const fn context(&self) -> &ScanContext {
        &self.context
    }

    #[must_use]
    pub const fn permission(&self) -> PermissionStatus {
        self.permission
    }

    /// Verdict currently being presented, if any.
    #[must_use]
    pub const fn verdict(&self) -> Option<&ScanVerdict> {
        self.verdict.as_ref()
    }

    /// Starts the workflow: `Idle → AwaitingPermission`.
    ///
    /// No-op outside `Idle`; starting is an explicit operator request and
    /// cannot interrupt an exchange.
    pub fn begin(&mut self) {
        if self.phase == ScanPhase::Idle {
            tracing::debug!(match_id = %self.context.match_id, "scan workflow started");
            self.phase = ScanPhase::AwaitingPermission;
        }
    }

    /// Applies the outcome of a permission request.
    ///
    /// `AwaitingPermission → Armed` when granted, back to `Idle` on any
    /// denial. The presentation layer may offer a re-request, which requires
    /// explicit operator confirmation before `begin` is called again.
    pub fn permission_result(&mut self, status: PermissionStatus) {
        self.permission = status;

        if self.phase != ScanPhase::AwaitingPermission {
            return;
        }

        if status.is_granted() {
            tracing::debug!("capture permission granted, arming");
            self.phase = ScanPhase::Armed;
        } else {
            tracing::debug!(status = ?status, "capture permission not granted");
            self.phase = ScanPhase::Idle;
        }
    }

    /// Offers a decode event to the latch.
    ///
    /// Returns the attempt to submit when this is the first event accepted
    /// while `Armed`; returns `None` and discards the event in every other
    /// phase, including `Processing` and `Resolved`.
    pub fn accept_decode(&mut self, event: DecodeEvent) -> Option<ScanAttempt> {
        if self.phase != ScanPhase::Armed || self.scanned {
            tracing::trace!(phase = ?self.phase, "decode event discarded by latch");
            return None;
        }

        self.scanned = true;
        self.phase = ScanPhase::Processing;

        tracing::debug!(
            match_id = %self.context.match_id,
            format = ?event.format,
            "decode event accepted"
        );

        Some(ScanAttempt {
            match_id: self.context.match_id.clone(),
            payload: event.payload,
            operator: self.context.operator.clone(),
        })
    }

    /// Exchanges one accepted attempt for a verdict.
    ///
    /// Preconditions are checked first: a missing token, match id, or
    /// operator identity fails fast with a `MissingCredential` verdict and
    /// no network call. Otherwise exactly one gateway call is made; a
    /// structured rejection surfaces the server message (or a default), and
    /// a transport failure surfaces the generic technical message, never
    /// the raw error text.
    ///
    /// The controller ends in `Resolved` holding the verdict in all cases;
    /// [`acknowledge`](Self::acknowledge) then re-arms it.
    pub async fn submit_scan<G>(
        &mut self,
        gateway: &G,
        attempt: &ScanAttempt,
        token: Option<&str>,
    ) -> ScanVerdict
    where
        G: ScanGateway + ?Sized,
    {
        let verdict = match Self::check_preconditions(attempt, token) {
            Err(verdict) => verdict,
            Ok(token) => match gateway.submit_scan(attempt, token).await {
                Ok(reply) if reply.success => ScanVerdict::Accepted {
                    ticket: reply.ticket,
                },
                Ok(reply) => ScanVerdict::Rejected {
                    message: reply
                        .message
                        .unwrap_or_else(|| DEFAULT_REJECTION_MESSAGE.to_string()),
                },
                Err(e) => {
                    tracing::warn!(error = %e, "scan exchange failed");
                    ScanVerdict::transport_failure()
                }
            },
        };

        self.resolve(verdict.clone());
        verdict
    }

    /// Validates the credentials an exchange needs before any network use.
    fn check_preconditions<'t>(
        attempt: &ScanAttempt,
        token: Option<&'t str>,
    ) -> std::result::Result<&'t str, ScanVerdict> {
        let token = match token {
            Some(t) if !t.trim().is_empty() => t,
            _ => return Err(ScanVerdict::missing_credential("authentication token")),
        };
        if attempt.match_id.trim().is_empty() {
            return Err(ScanVerdict::missing_credential("match identifier"));
        }
        if attempt.operator.trim().is_empty() {
            return Err(ScanVerdict::missing_credential("operator identity"));
        }
        Ok(token)
    }

    /// Records a verdict: `→ Resolved`.
    ///
    /// Also the entry point for verdicts produced outside `submit_scan`
    /// (precondition failures detected before an attempt was built).
    pub fn resolve(&mut self, verdict: ScanVerdict) {
        tracing::debug!(accepted = verdict.is_accepted(), "verdict resolved");
        self.verdict = Some(verdict);
        self.phase = ScanPhase::Resolved;
    }

    /// Completes the verdict presentation: `Resolved → Armed`.
    ///
    /// Resets the latch and discards the verdict so the same capture session
    /// continues uninterrupted. No-op outside `Resolved`.
    pub fn acknowledge(&mut self) {
        if self.phase == ScanPhase::Resolved {
            self.scanned = false;
            self.verdict = None;
            self.phase = ScanPhase::Armed;
            tracing::debug!("verdict acknowledged, re-armed");
        }
    }

    /// Stops the workflow from any state: `→ Idle`.
    ///
    /// Called when the operator closes the capture view. Clears the latch
    /// and any held verdict.
    pub fn stop(&mut self) {
        tracing::debug!(match_id = %self.context.match_id, "scan workflow stopped");
        self.phase = ScanPhase::Idle;
        self.scanned = false;
        self.verdict = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::{GatescanError, Result};
    use crate::domain::{ScanReply, Ticket};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted gateway counting how many exchanges actually happen.
    struct StubGateway {
        reply: Result<ScanReply>,
        calls: AtomicUsize,
    }

    impl StubGateway {
        fn accepting(seat: &str) -> Self {
            Self {
                reply: Ok(ScanReply {
                    success: true,
                    message: None,
                    ticket: Some(Ticket {
                        id: "t1".to_string(),
                        match_id: "42".to_string(),
                        seat_number: seat.to_string(),
                        is_valid: true,
                    }),
                }),
                calls: AtomicUsize::new(0),
            }
        }

        fn rejecting(message: &str) -> Self {
            Self {
                reply: Ok(ScanReply {
                    success: false,
                    message: Some(message.to_string()),
                    ticket: None,
                }),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(GatescanError::Transport("connection reset".to_string())),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ScanGateway for StubGateway {
        async fn submit_scan(&self, _attempt: &ScanAttempt, _token: &str) -> Result<ScanReply> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Ok(reply) => Ok(reply.clone()),
                Err(GatescanError::Transport(msg)) => {
                    Err(GatescanError::Transport(msg.clone()))
                }
                Err(_) => unreachable!("stub only scripts transport errors"),
            }
        }
    }

    fn armed_controller() -> ScanController {
        let mut controller = ScanController::new(ScanContext {
            match_id: "42".to_string(),
            operator: "Jean".to_string(),
        });
        controller.begin();
        controller.permission_result(PermissionStatus::Granted);
        assert_eq!(controller.phase(), ScanPhase::Armed);
        controller
    }

    #[test]
    fn permission_denial_returns_to_idle() {
        let mut controller = ScanController::new(ScanContext {
            match_id: "42".to_string(),
            operator: "Jean".to_string(),
        });
        controller.begin();
        assert_eq!(controller.phase(), ScanPhase::AwaitingPermission);

        controller.permission_result(PermissionStatus::Denied);
        assert_eq!(controller.phase(), ScanPhase::Idle);
        assert!(controller.permission().can_ask_again());

        // Re-request after operator confirmation.
        controller.begin();
        controller.permission_result(PermissionStatus::Granted);
        assert_eq!(controller.phase(), ScanPhase::Armed);
    }

    #[test]
    fn latch_accepts_only_the_first_decode() {
        let mut controller = armed_controller();

        let first = controller.accept_decode(DecodeEvent::qr("QR123"));
        assert!(first.is_some());
        assert_eq!(controller.phase(), ScanPhase::Processing);

        // Everything after the first event is a no-op, in Processing...
        assert!(controller.accept_decode(DecodeEvent::qr("QR124")).is_none());
        assert!(controller.accept_decode(DecodeEvent::qr("QR125")).is_none());

        // ...and still in Resolved.
        controller.resolve(ScanVerdict::transport_failure());
        assert!(controller.accept_decode(DecodeEvent::qr("QR126")).is_none());
        assert_eq!(controller.phase(), ScanPhase::Resolved);
    }

    #[test]
    fn decode_ignored_while_not_armed() {
        let mut controller = ScanController::new(ScanContext {
            match_id: "42".to_string(),
            operator: "Jean".to_string(),
        });
        assert!(controller.accept_decode(DecodeEvent::qr("QR123")).is_none());
        controller.begin();
        assert!(controller.accept_decode(DecodeEvent::qr("QR123")).is_none());
    }

    #[tokio::test]
    async fn empty_token_never_reaches_the_network() {
        let gateway = StubGateway::accepting("A12");
        let mut controller = armed_controller();
        let attempt = controller
            .accept_decode(DecodeEvent::qr("QR123"))
            .expect("accepted");

        let verdict = controller.submit_scan(&gateway, &attempt, Some("")).await;

        assert_eq!(gateway.call_count(), 0);
        assert!(matches!(
            verdict,
            ScanVerdict::Failed {
                kind: crate::domain::FailureKind::MissingCredential,
                ..
            }
        ));
        assert_eq!(controller.phase(), ScanPhase::Resolved);
    }

    #[tokio::test]
    async fn missing_token_entirely_also_fails_fast() {
        let gateway = StubGateway::accepting("A12");
        let mut controller = armed_controller();
        let attempt = controller
            .accept_decode(DecodeEvent::qr("QR123"))
            .expect("accepted");

        let verdict = controller.submit_scan(&gateway, &attempt, None).await;

        assert_eq!(gateway.call_count(), 0);
        assert!(!verdict.is_accepted());
    }

    #[tokio::test]
    async fn accepted_scan_surfaces_seat_and_re_arms() {
        let gateway = StubGateway::accepting("A12");
        let mut controller = armed_controller();
        let attempt = controller
            .accept_decode(DecodeEvent::qr("QR123"))
            .expect("accepted");

        let verdict = controller
            .submit_scan(&gateway, &attempt, Some("abc"))
            .await;

        assert_eq!(gateway.call_count(), 1);
        match &verdict {
            ScanVerdict::Accepted { ticket: Some(t) } => assert_eq!(t.seat_number, "A12"),
            other => panic!("expected accepted verdict, got {other:?}"),
        }
        assert_eq!(controller.phase(), ScanPhase::Resolved);

        controller.acknowledge();
        assert_eq!(controller.phase(), ScanPhase::Armed);
        assert!(controller.verdict().is_none());

        // Latch is reset: the next decode is accepted again.
        assert!(controller.accept_decode(DecodeEvent::qr("QR999")).is_some());
    }

    #[tokio::test]
    async fn rejected_scan_carries_server_message_and_re_arms() {
        let gateway = StubGateway::rejecting("expired");
        let mut controller = armed_controller();
        let attempt = controller
            .accept_decode(DecodeEvent::qr("QR123"))
            .expect("accepted");

        let verdict = controller
            .submit_scan(&gateway, &attempt, Some("abc"))
            .await;

        assert_eq!(
            verdict,
            ScanVerdict::Rejected {
                message: "expired".to_string()
            }
        );
        controller.acknowledge();
        assert_eq!(controller.phase(), ScanPhase::Armed);
    }

    #[tokio::test]
    async fn rejection_without_message_uses_the_default() {
        let gateway = StubGateway {
            reply: Ok(ScanReply {
                success: false,
                message: None,
                ticket: None,
            }),
            calls: AtomicUsize::new(0),
        };
        let mut controller = armed_controller();
        let attempt = controller
            .accept_decode(DecodeEvent::qr("QR123"))
            .expect("accepted");

        let verdict = controller
            .submit_scan(&gateway, &attempt, Some("abc"))
            .await;

        assert_eq!(
            verdict,
            ScanVerdict::Rejected {
                message: DEFAULT_REJECTION_MESSAGE.to_string()
            }
        );
    }

    #[tokio::test]
    async fn transport_failure_is_generic_and_re_arms() {
        let gateway = StubGateway::failing();
        let mut controller = armed_controller();
        let attempt = controller
            .accept_decode(DecodeEvent::qr("QR123"))
            .expect("accepted");

        let verdict = controller
            .submit_scan(&gateway, &attempt, Some("abc"))
            .await;

        // The raw error text ("connection reset") must not leak into the
        // operator-facing message.
        match &verdict {
            ScanVerdict::Failed { kind, message } => {
                assert_eq!(*kind, crate::domain::FailureKind::Transport);
                assert!(!message.contains("connection reset"));
            }
            other => panic!("expected transport failure, got {other:?}"),
        }

        controller.acknowledge();
        assert_eq!(controller.phase(), ScanPhase::Armed);
        assert!(controller.accept_decode(DecodeEvent::qr("QR124")).is_some());
    }

    #[tokio::test]
    async fn every_verdict_shape_leaves_a_re_armable_controller() {
        for gateway in [
            StubGateway::accepting("A12"),
            StubGateway::rejecting("expired"),
            StubGateway::failing(),
        ] {
            let mut controller = armed_controller();
            let attempt = controller
                .accept_decode(DecodeEvent::qr("QR123"))
                .expect("accepted");
            controller
                .submit_scan(&gateway, &attempt, Some("abc"))
                .await;
            assert_eq!(controller.phase(), ScanPhase::Resolved);
            controller.acknowledge();
            assert_eq!(controller.phase(), ScanPhase::Armed);
        }
    }

    #[test]
    fn stop_returns_to_idle_from_any_phase() {
        let mut controller = armed_controller();
        controller.accept_decode(DecodeEvent::qr("QR123"));
        controller.stop();
        assert_eq!(controller.phase(), ScanPhase::Idle);
        assert!(controller.verdict().is_none());

        let mut controller = armed_controller();
        controller.resolve(ScanVerdict::transport_failure());
        controller.stop();
        assert_eq!(controller.phase(), ScanPhase::Idle);
    }
}

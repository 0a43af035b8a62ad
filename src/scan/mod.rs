//! Scan workflow: capture capability and the verdict state machine.
//!
//! # Organization
//!
//! - [`capture`]: decode events, permission statuses, and the terminal gate
//! - [`controller`]: the `Idle → AwaitingPermission → Armed → Processing →
//!   Resolved` state machine with its single-in-flight latch

pub mod capture;
pub mod controller;

pub use capture::{DecodeEvent, DecodeFormat, PermissionGate, PermissionStatus, TerminalGate};
pub use controller::{ScanContext, ScanController, ScanPhase};

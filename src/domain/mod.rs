//! Domain layer for the gatescan console.
//!
//! This module contains the core domain types for the console, independent of
//! HTTP, terminal, or persistence concerns. Business rules live server-side;
//! what belongs here are the value types the rest of the crate passes around
//! and the central error taxonomy.
//!
//! # Organization
//!
//! - [`error`]: Error types and result alias
//! - [`session`]: Operator session and user identity
//! - [`matches`]: Match snapshots and status parsing
//! - [`scan`]: Scan attempts, replies, and verdicts
//! - [`stats`]: Per-zone and per-match usage statistics

pub mod error;
pub mod matches;
pub mod scan;
pub mod session;
pub mod stats;

pub use error::{GatescanError, Result};
pub use matches::{Match, MatchStatus};
pub use scan::{FailureKind, ScanAttempt, ScanReply, ScanVerdict, Ticket};
pub use session::{Session, User};
pub use stats::{MatchStatistics, StatsOutcome, StatsSummary, ZoneStatistic};

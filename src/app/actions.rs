//! Actions representing side effects to be executed by the runtime.
//!
//! The event handler is synchronous and pure with respect to I/O: it mutates
//! [`AppState`](super::AppState) and returns a `Vec<Action>`. The main loop
//! then executes the actions (network exchanges, session persistence,
//! permission requests) and feeds the results back in as events.

use crate::domain::ScanAttempt;

/// Commands produced by the event handler for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Tears down the terminal and exits.
    Quit,

    /// Exchanges credentials for a session.
    ///
    /// Resolves to `LoginSucceeded` or `LoginFailed`.
    Login { email: String, password: String },

    /// Fetches the match list with the current session token.
    ///
    /// Resolves to `MatchesLoaded` or `MatchesFailed`.
    LoadMatches,

    /// Fetches the statistics snapshot for one match.
    ///
    /// Always resolves to `StatsLoaded`; unavailability is a value, not an
    /// error.
    FetchStats { match_id: String },

    /// Requests the capture permission from the gate.
    ///
    /// Resolves to `PermissionResult`.
    RequestPermission,

    /// Submits one accepted scan attempt.
    ///
    /// Resolves to `VerdictResolved`.
    SubmitScan { attempt: ScanAttempt },

    /// Persists the current session to the store.
    SaveSession,

    /// Removes the persisted session from the store.
    ClearSession,
}

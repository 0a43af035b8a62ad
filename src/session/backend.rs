//! Session store abstraction.
//!
//! This module defines the [`SessionStore`] trait that abstracts over session
//! persistence backends. The trait is deliberately minimal: three methods
//! mapping directly to the three lifecycle moments of an operator session:
//! restore at startup, save at login, clear at logout.

use crate::domain::error::Result;
use crate::domain::Session;

/// Abstraction over persistent session storage.
///
/// The token and user record are owned as one [`Session`] value, so a store
/// can never observe a token without its user or vice versa.
///
/// # Implementations
///
/// - [`JsonSessionStore`](crate::session::JsonSessionStore): single JSON
///   document with atomic writes (default)
pub trait SessionStore: Send {
    /// Restores the persisted session, if any.
    ///
    /// Returns `Ok(None)` when nothing is stored. A corrupt document is an
    /// error rather than `None` so the operator learns the restore failed.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored document exists but cannot be read or
    /// parsed.
    fn load(&self) -> Result<Option<Session>>;

    /// Persists the token and user record together.
    ///
    /// Overwrites any previously stored session.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save(&mut self, session: &Session) -> Result<()>;

    /// Removes the persisted session.
    ///
    /// Idempotent: clearing when nothing is stored is a successful no-op.
    ///
    /// # Errors
    ///
    /// Returns an error only if an existing document cannot be removed.
    fn clear(&mut self) -> Result<()>;
}

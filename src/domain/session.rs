//! Operator session domain model.
//!
//! A [`Session`] pairs the opaque bearer token with the authenticated
//! operator's identity. The two are created together at login and destroyed
//! together at logout; no state exists where one is present without the
//! other, which is why they live in a single struct rather than two values.

use serde::{Deserialize, Serialize};

/// The authenticated operator as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned identifier.
    pub id: String,
    /// Login email address.
    pub email: String,
    /// Display name, also sent as the `scanned_by` operator identity on
    /// scan submissions.
    pub name: String,
}

/// An authenticated operator session.
///
/// Created on successful login, persisted across restarts by the session
/// store, and destroyed on logout. The bearer token is attached to every
/// authenticated gateway call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token issued by the backend.
    pub token: String,
    /// The operator this token belongs to.
    pub user: User,
}

impl Session {
    /// Creates a session from a freshly issued token and user record.
    #[must_use]
    pub const fn new(token: String, user: User) -> Self {
        Self { token, user }
    }

    /// The operator identity submitted with each scan.
    #[must_use]
    pub fn operator(&self) -> &str {
        &self.user.name
    }
}

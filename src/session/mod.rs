//! Session persistence layer.
//!
//! Persists the operator's bearer token and identity across restarts. The
//! store is the only writer of the session document; everything else reads
//! the in-memory [`crate::domain::Session`] owned by the application state.
//!
//! # Organization
//!
//! - [`backend`]: The [`SessionStore`] trait
//! - [`json`]: JSON file implementation with atomic writes

pub mod backend;
pub mod json;

pub use backend::SessionStore;
pub use json::JsonSessionStore;

//! JSON file-based session store.
//!
//! Persists the operator session as a single human-readable JSON document,
//! using atomic file writes (write-to-temp + rename) so the document is never
//! left half-written, even if the process dies mid-save.
//!
//! Storing token and user in one document makes the set/cleared-together
//! invariant structural: there is no write ordering to get wrong.

use crate::domain::error::{GatescanError, Result};
use crate::domain::Session;
use crate::session::backend::SessionStore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// On-disk container format.
///
/// Wraps the session in a versioned object so the format can migrate without
/// guessing at bare `Session` documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredSession {
    /// Version of the storage format for future migrations.
    version: u32,
    /// When this document was written, RFC 3339.
    saved_at: chrono::DateTime<chrono::Utc>,
    session: Session,
}

const STORAGE_VERSION: u32 = 1;

/// JSON file session store.
///
/// # Thread Safety
///
/// `Send` but not `Sync`; the store is owned by the single runtime shell,
/// matching the single-operator, single-device access pattern.
pub struct JsonSessionStore {
    /// Path to the JSON document on disk.
    file_path: PathBuf,
}

impl JsonSessionStore {
    /// Creates a store backed by the given file path.
    ///
    /// Parent directories are created eagerly so the first save cannot fail
    /// on a missing directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON session store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Ok(Self { file_path })
    }
}

impl SessionStore for JsonSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        if !self.file_path.exists() {
            tracing::debug!("no stored session found");
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.file_path)?;
        let stored: StoredSession = serde_json::from_str(&contents)
            .map_err(|e| GatescanError::Storage(format!("failed to parse session file: {e}")))?;

        tracing::debug!(
            version = stored.version,
            user = %stored.session.user.name,
            "session restored"
        );
        Ok(Some(stored.session))
    }

    fn save(&mut self, session: &Session) -> Result<()> {
        let _span = tracing::debug_span!("session_save", user = %session.user.name).entered();

        let stored = StoredSession {
            version: STORAGE_VERSION,
            saved_at: chrono::Utc::now(),
            session: session.clone(),
        };

        let json = serde_json::to_string_pretty(&stored)
            .map_err(|e| GatescanError::Storage(format!("failed to serialize session: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!("session saved");
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        if self.file_path.exists() {
            std::fs::remove_file(&self.file_path)?;
            tracing::debug!("session cleared");
        } else {
            tracing::trace!("clear with nothing stored, no-op");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;

    fn sample_session() -> Session {
        Session::new(
            "abc".to_string(),
            User {
                id: "7".to_string(),
                email: "jean@example.com".to_string(),
                name: "Jean".to_string(),
            },
        )
    }

    fn store_in(dir: &tempfile::TempDir) -> JsonSessionStore {
        JsonSessionStore::new(dir.path().join("session.json")).expect("store creation")
    }

    #[test]
    fn load_after_save_returns_exactly_what_was_saved() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(&dir);

        let session = sample_session();
        store.save(&session).expect("save");

        let restored = store.load().expect("load").expect("stored session");
        assert_eq!(restored, session);
        assert_eq!(restored.token, "abc");
        assert_eq!(restored.user.name, "Jean");
    }

    #[test]
    fn load_without_save_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        assert!(store.load().expect("load").is_none());
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(&dir);

        // Nothing stored yet: both calls must succeed.
        store.clear().expect("first clear");
        store.clear().expect("second clear");

        store.save(&sample_session()).expect("save");
        store.clear().expect("clear after save");
        assert!(store.load().expect("load").is_none());
        store.clear().expect("clear again");
    }

    #[test]
    fn corrupt_document_is_a_storage_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").expect("write");

        let store = JsonSessionStore::new(path).expect("store creation");
        let err = store.load().expect_err("corrupt load");
        assert!(matches!(err, GatescanError::Storage(_)));
    }

    #[test]
    fn save_replaces_previous_session() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(&dir);

        store.save(&sample_session()).expect("first save");

        let replacement = Session::new(
            "xyz".to_string(),
            User {
                id: "8".to_string(),
                email: "amira@example.com".to_string(),
                name: "Amira".to_string(),
            },
        );
        store.save(&replacement).expect("second save");

        let restored = store.load().expect("load").expect("stored session");
        assert_eq!(restored, replacement);
    }
}

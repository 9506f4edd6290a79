//! Persistent store for the session token.
//!
//! The store keeps a single opaque bearer token in memory, mirrored to a
//! fixed file in the application data directory so a session survives a
//! restart. Operations are synchronous and never fail from the caller's
//! point of view: persistence problems are logged and the in-memory value
//! stays authoritative.

use std::path::PathBuf;
use std::sync::Mutex;

use tracing::warn;

/// Token file name in the data directory
const TOKEN_FILE: &str = "auth_token";

/// Holds at most one session token. Constructed once and shared by handle
/// (`Arc<SessionStore>`) between the API client and the application; writes
/// are simple replacements, last write wins.
pub struct SessionStore {
    data_dir: PathBuf,
    token: Mutex<Option<String>>,
}

impl SessionStore {
    /// Create a store rooted at `data_dir`, loading any previously
    /// persisted token.
    pub fn new(data_dir: PathBuf) -> Self {
        let token = match std::fs::read_to_string(data_dir.join(TOKEN_FILE)) {
            Ok(contents) => {
                let trimmed = contents.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Err(_) => None,
        };

        Self {
            data_dir,
            token: Mutex::new(token),
        }
    }

    /// Store a token, replacing any prior value. Surrounding whitespace is
    /// trimmed so the value round-trips unchanged through the file; a
    /// whitespace-only token is treated as a clear.
    pub fn set(&self, token: &str) {
        let token = token.trim();
        if token.is_empty() {
            self.clear();
            return;
        }

        *self.token.lock().unwrap() = Some(token.to_string());

        if let Err(e) = std::fs::create_dir_all(&self.data_dir) {
            warn!(error = %e, "Failed to create session directory");
            return;
        }
        if let Err(e) = std::fs::write(self.token_path(), token) {
            warn!(error = %e, "Failed to persist session token");
        }
    }

    /// Remove the token, in memory and on disk.
    pub fn clear(&self) {
        *self.token.lock().unwrap() = None;

        let path = self.token_path();
        if path.exists() {
            if let Err(e) = std::fs::remove_file(&path) {
                warn!(error = %e, "Failed to remove session token file");
            }
        }
    }

    /// Whether a non-empty token is currently held.
    pub fn is_present(&self) -> bool {
        self.token
            .lock()
            .unwrap()
            .as_ref()
            .map(|t| !t.is_empty())
            .unwrap_or(false)
    }

    /// Get the current token, if any.
    pub fn token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn token_path(&self) -> PathBuf {
        self.data_dir.join(TOKEN_FILE)
    }
}

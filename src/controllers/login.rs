//! Login screen controller.

use crate::api::AuthError;
use crate::models::Credentials;

use super::{Phase, Route};

/// Fixed user-facing message for a failed login. No error detail from the
/// server is surfaced.
pub const INVALID_CREDENTIALS_MSG: &str = "Invalid email or password. Please try again.";

/// Shown when submit is pressed with an empty field.
pub const MISSING_FIELDS_MSG: &str = "Email and password are required";

#[derive(Default)]
pub struct LoginController {
    pub identifier: String,
    pub secret: String,
    pub phase: Phase,
    pub error: Option<&'static str>,
}

impl LoginController {
    /// Create a controller, prefilling the email field.
    pub fn new(last_email: Option<String>) -> Self {
        Self {
            identifier: last_email.unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Begin a submission. Returns the credentials to send, or `None` when
    /// a field is empty or a request is already in flight (double submits
    /// are ignored rather than racing).
    pub fn submit(&mut self) -> Option<Credentials> {
        if self.phase == Phase::Submitting {
            return None;
        }
        if self.identifier.is_empty() || self.secret.is_empty() {
            self.error = Some(MISSING_FIELDS_MSG);
            return None;
        }

        self.error = None;
        self.phase = Phase::Submitting;
        Some(Credentials {
            identifier: self.identifier.clone(),
            secret: self.secret.clone(),
        })
    }

    /// Apply the login result. Success navigates to the dashboard; failure
    /// shows the fixed message and stays on the page.
    pub fn finish(&mut self, result: Result<(), AuthError>) -> Option<Route> {
        if self.phase != Phase::Submitting {
            return None;
        }
        self.phase = Phase::Idle;

        match result {
            Ok(()) => {
                self.secret.clear();
                Some(Route::Dashboard)
            }
            Err(_) => {
                self.error = Some(INVALID_CREDENTIALS_MSG);
                None
            }
        }
    }
}

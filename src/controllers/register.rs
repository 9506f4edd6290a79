//! Registration screen controller.

use std::time::Duration;

use crate::api::AuthError;
use crate::models::Registration;

use super::{Phase, Route};

/// Delay before navigating to the login screen after a successful
/// registration, long enough to read the confirmation message.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(2000);

/// Fixed user-facing messages.
pub const REGISTER_SUCCESS_MSG: &str = "Registration successful! Redirecting to login...";
pub const REGISTER_FAILED_MSG: &str =
    "Registration failed. Check the details or try a different email.";
pub const MISSING_FIELDS_MSG: &str = "All fields are required";

/// A navigation the application should perform after a delay. The schedule
/// must be cancelled if the user navigates away before it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredNav {
    pub route: Route,
    pub delay: Duration,
}

#[derive(Default)]
pub struct RegisterController {
    pub first_name: String,
    pub last_name: String,
    pub identifier: String,
    pub secret: String,
    pub phase: Phase,
    pub error: Option<&'static str>,
    pub success: Option<&'static str>,
}

impl RegisterController {
    /// Begin a submission. Returns the payload to send, or `None` when a
    /// field is empty or a request is already in flight.
    pub fn submit(&mut self) -> Option<Registration> {
        if self.phase == Phase::Submitting {
            return None;
        }
        if self.first_name.is_empty()
            || self.last_name.is_empty()
            || self.identifier.is_empty()
            || self.secret.is_empty()
        {
            self.error = Some(MISSING_FIELDS_MSG);
            return None;
        }

        self.error = None;
        self.success = None;
        self.phase = Phase::Submitting;
        Some(Registration {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            identifier: self.identifier.clone(),
            secret: self.secret.clone(),
        })
    }

    /// Apply the registration result. Success shows the confirmation and
    /// asks for a deferred navigation to the login screen; failure shows
    /// the fixed error message.
    pub fn finish(&mut self, result: Result<(), AuthError>) -> Option<DeferredNav> {
        if self.phase != Phase::Submitting {
            return None;
        }
        self.phase = Phase::Idle;

        match result {
            Ok(()) => {
                self.success = Some(REGISTER_SUCCESS_MSG);
                Some(DeferredNav {
                    route: Route::Login,
                    delay: REDIRECT_DELAY,
                })
            }
            Err(_) => {
                self.error = Some(REGISTER_FAILED_MSG);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> RegisterController {
        RegisterController {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            identifier: "ada@example.com".to_string(),
            secret: "hunter2".to_string(),
            ..RegisterController::default()
        }
    }

    #[test]
    fn test_submit_yields_registration() {
        let mut controller = filled();
        let reg = controller.submit().expect("should submit");
        assert_eq!(reg.first_name, "Ada");
        assert_eq!(reg.identifier, "ada@example.com");
        assert_eq!(controller.phase, Phase::Submitting);
    }

    #[test]
    fn test_submit_requires_all_fields() {
        let mut controller = filled();
        controller.last_name.clear();
        assert!(controller.submit().is_none());
        assert_eq!(controller.error, Some(MISSING_FIELDS_MSG));
    }

    #[test]
    fn test_submit_refused_while_in_flight() {
        let mut controller = filled();
        assert!(controller.submit().is_some());
        assert!(controller.submit().is_none());
    }

    #[test]
    fn test_success_defers_navigation_to_login() {
        let mut controller = filled();
        controller.submit();

        let deferred = controller.finish(Ok(())).expect("should defer");
        assert_eq!(deferred.route, Route::Login);
        assert_eq!(deferred.delay, REDIRECT_DELAY);
        assert_eq!(controller.success, Some(REGISTER_SUCCESS_MSG));
        assert!(controller.error.is_none());
    }

    #[test]
    fn test_failure_shows_fixed_message() {
        let mut controller = filled();
        controller.submit();

        assert!(controller
            .finish(Err(AuthError::InvalidResponse("bad".to_string())))
            .is_none());
        assert_eq!(controller.error, Some(REGISTER_FAILED_MSG));
        assert!(controller.success.is_none());
        assert_eq!(controller.phase, Phase::Idle);
    }

    #[test]
    fn test_resubmit_clears_stale_messages() {
        let mut controller = filled();
        controller.submit();
        controller.finish(Err(AuthError::Unauthorized));
        assert!(controller.error.is_some());

        controller.submit();
        assert!(controller.error.is_none());
        assert!(controller.success.is_none());
    }
}

//! Dashboard screen controller.

use crate::api::AuthError;
use crate::models::UserProfile;

use super::Phase;

/// Result of applying a profile response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardOutcome {
    /// The session is invalid or expired: clear the token and navigate to
    /// the login screen.
    SessionInvalid,
}

#[derive(Default)]
pub struct DashboardController {
    pub profile: Option<UserProfile>,
    pub phase: Phase,
}

impl DashboardController {
    /// Request the profile load on entering the screen. Returns `true` when
    /// a fetch should be issued; repeated calls while one is in flight are
    /// ignored.
    pub fn start_load(&mut self) -> bool {
        if self.phase == Phase::Submitting {
            return false;
        }
        self.profile = None;
        self.phase = Phase::Submitting;
        true
    }

    /// Apply the profile result. Any failure is interpreted as an invalid
    /// session and yields `SessionInvalid` exactly once per failed load.
    pub fn finish(
        &mut self,
        result: Result<UserProfile, AuthError>,
    ) -> Option<DashboardOutcome> {
        if self.phase != Phase::Submitting {
            return None;
        }
        self.phase = Phase::Idle;

        match result {
            Ok(profile) => {
                self.profile = Some(profile);
                None
            }
            Err(_) => Some(DashboardOutcome::SessionInvalid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_load_once_per_flight() {
        let mut controller = DashboardController::default();
        assert!(controller.start_load());
        assert!(!controller.start_load());
    }

    #[test]
    fn test_success_stores_profile_for_display() {
        let mut controller = DashboardController::default();
        controller.start_load();

        let profile = UserProfile {
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            ..UserProfile::default()
        };
        assert!(controller.finish(Ok(profile)).is_none());
        assert_eq!(
            controller.profile.as_ref().map(|p| p.display_name()),
            Some("Ada Lovelace".to_string())
        );
        assert_eq!(controller.phase, Phase::Idle);
    }

    #[test]
    fn test_any_failure_is_session_invalid_exactly_once() {
        let mut controller = DashboardController::default();
        controller.start_load();

        let outcome = controller.finish(Err(AuthError::Unauthorized));
        assert_eq!(outcome, Some(DashboardOutcome::SessionInvalid));
        assert!(controller.profile.is_none());

        // The same failure event cannot produce a second outcome
        assert!(controller.finish(Err(AuthError::Unauthorized)).is_none());
    }

    #[test]
    fn test_non_auth_failures_also_invalidate() {
        let mut controller = DashboardController::default();
        controller.start_load();

        let err = AuthError::from_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert_eq!(
            controller.finish(Err(err)),
            Some(DashboardOutcome::SessionInvalid)
        );
    }
}

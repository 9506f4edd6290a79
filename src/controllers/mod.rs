//! Per-screen controllers.
//!
//! Each controller is a small IO-free state machine: the application feeds
//! it form input and request results, and it answers with the payload to
//! send or the route to navigate to. Keeping the controllers free of HTTP
//! and terminal concerns is what makes the auth flow testable.

pub mod dashboard;
pub mod login;
pub mod register;

pub use dashboard::{DashboardController, DashboardOutcome};
pub use login::LoginController;
pub use register::{DeferredNav, RegisterController};

/// Navigation targets. The path strings are the only protocol exposed to
/// the routing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/auth/login",
            Route::Register => "/auth/register",
            Route::Dashboard => "/dashboard",
        }
    }
}

/// Submission lifecycle of a screen: `Submitting` while a request is in
/// flight, `Idle` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Login.path(), "/auth/login");
        assert_eq!(Route::Register.path(), "/auth/register");
        assert_eq!(Route::Dashboard.path(), "/dashboard");
    }
}

//! Application state management.
//!
//! This module contains the core `App` struct wiring the screen controllers
//! to the auth client and the session store. Remote calls are spawned onto
//! tokio and report back through an MPSC channel, so the UI thread is never
//! blocked; `check_background_tasks` drains the channel between frames.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::api::{AuthClient, AuthError};
use crate::auth::SessionStore;
use crate::config::Config;
use crate::controllers::{
    DashboardController, DashboardOutcome, DeferredNav, LoginController, RegisterController,
    Route,
};
use crate::models::{LoginResponse, RegisterAck, UserProfile};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
/// Each screen has at most one request in flight, so a handful is plenty.
const CHANNEL_BUFFER_SIZE: usize = 16;

/// Maximum length for email input.
pub const MAX_EMAIL_LENGTH: usize = 50;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum length for name inputs on the registration form.
pub const MAX_NAME_LENGTH: usize = 50;

// ============================================================================
// UI State Types
// ============================================================================

/// The currently displayed screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    Dashboard,
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFocus {
    Email,
    Password,
    Button,
}

impl LoginFocus {
    pub fn next(&self) -> Self {
        match self {
            LoginFocus::Email => LoginFocus::Password,
            LoginFocus::Password => LoginFocus::Button,
            LoginFocus::Button => LoginFocus::Email,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            LoginFocus::Email => LoginFocus::Button,
            LoginFocus::Password => LoginFocus::Email,
            LoginFocus::Button => LoginFocus::Password,
        }
    }
}

/// Registration form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterFocus {
    FirstName,
    LastName,
    Email,
    Password,
    Button,
}

impl RegisterFocus {
    pub fn next(&self) -> Self {
        match self {
            RegisterFocus::FirstName => RegisterFocus::LastName,
            RegisterFocus::LastName => RegisterFocus::Email,
            RegisterFocus::Email => RegisterFocus::Password,
            RegisterFocus::Password => RegisterFocus::Button,
            RegisterFocus::Button => RegisterFocus::FirstName,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            RegisterFocus::FirstName => RegisterFocus::Button,
            RegisterFocus::LastName => RegisterFocus::FirstName,
            RegisterFocus::Email => RegisterFocus::LastName,
            RegisterFocus::Password => RegisterFocus::Email,
            RegisterFocus::Button => RegisterFocus::Password,
        }
    }
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Results sent back from spawned auth requests (and the deferred redirect
/// timer) to the main loop.
enum AuthEvent {
    LoginFinished(Result<LoginResponse, AuthError>),
    RegisterFinished(Result<RegisterAck, AuthError>),
    ProfileLoaded(Result<UserProfile, AuthError>),
    RedirectDue(Route),
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    // Core services
    pub config: Config,
    pub session: Arc<SessionStore>,
    pub api: AuthClient,

    // UI state
    pub screen: Screen,
    pub login: LoginController,
    pub register: RegisterController,
    pub dashboard: DashboardController,
    pub login_focus: LoginFocus,
    pub register_focus: RegisterFocus,

    // Background task channel
    events_rx: mpsc::Receiver<AuthEvent>,
    events_tx: mpsc::Sender<AuthEvent>,

    // Pending post-registration redirect, aborted on navigation
    redirect_task: Option<JoinHandle<()>>,
}

impl App {
    /// Create a new application instance. The session store lives under
    /// `data_dir`; a token persisted by a previous run is picked up here.
    pub fn new(config: Config, data_dir: PathBuf) -> Result<Self> {
        let session = Arc::new(SessionStore::new(data_dir));
        let api = AuthClient::new(config.api_base_url(), session.clone())?;

        let (events_tx, events_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        let login = LoginController::new(config.last_email.clone());
        let login_focus = if login.identifier.is_empty() {
            LoginFocus::Email
        } else {
            LoginFocus::Password
        };

        Ok(Self {
            config,
            session,
            api,
            screen: Screen::Login,
            login,
            register: RegisterController::default(),
            dashboard: DashboardController::default(),
            login_focus,
            register_focus: RegisterFocus::FirstName,
            events_rx,
            events_tx,
            redirect_task: None,
        })
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Switch screens. Any pending deferred redirect is cancelled; entering
    /// the dashboard kicks off the profile fetch.
    pub fn navigate(&mut self, route: Route) {
        self.cancel_redirect();

        self.screen = match route {
            Route::Login => Screen::Login,
            Route::Register => Screen::Register,
            Route::Dashboard => Screen::Dashboard,
        };

        if self.screen == Screen::Dashboard && self.dashboard.start_load() {
            self.spawn_profile_fetch();
        }
    }

    /// Manual logout from the dashboard: clear the session and return to
    /// the login screen.
    pub fn logout(&mut self) {
        self.api.logout();
        info!("Logged out");
        self.navigate(Route::Login);
    }

    fn cancel_redirect(&mut self) {
        if let Some(task) = self.redirect_task.take() {
            task.abort();
        }
    }

    // =========================================================================
    // Submissions
    // =========================================================================

    /// Submit the login form, if the controller allows it.
    pub fn submit_login(&mut self) {
        let Some(credentials) = self.login.submit() else {
            return;
        };

        let api = self.api.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.login(&credentials).await;
            let _ = tx.send(AuthEvent::LoginFinished(result)).await;
        });
    }

    /// Submit the registration form, if the controller allows it.
    pub fn submit_register(&mut self) {
        let Some(registration) = self.register.submit() else {
            return;
        };

        let api = self.api.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.register(&registration).await;
            let _ = tx.send(AuthEvent::RegisterFinished(result)).await;
        });
    }

    fn spawn_profile_fetch(&self) {
        let api = self.api.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.profile().await;
            let _ = tx.send(AuthEvent::ProfileLoaded(result)).await;
        });
    }

    fn schedule_redirect(&mut self, deferred: DeferredNav) {
        self.cancel_redirect();

        let tx = self.events_tx.clone();
        self.redirect_task = Some(tokio::spawn(async move {
            tokio::time::sleep(deferred.delay).await;
            let _ = tx.send(AuthEvent::RedirectDue(deferred.route)).await;
        }));
    }

    // =========================================================================
    // Event Handling
    // =========================================================================

    /// Drain completed background tasks and apply their results. Called
    /// from the main loop between frames.
    pub fn check_background_tasks(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.on_auth_event(event);
        }
    }

    fn on_auth_event(&mut self, event: AuthEvent) {
        match event {
            AuthEvent::LoginFinished(result) => {
                if let Err(ref e) = result {
                    error!(error = %e, "Login failed");
                }
                // Only an accepted (non-stale) success navigates and updates
                // the remembered email
                if let Some(route) = self.login.finish(result.map(|_| ())) {
                    info!("Login successful");
                    self.config.last_email = Some(self.login.identifier.clone());
                    self.navigate(route);
                }
            }
            AuthEvent::RegisterFinished(result) => {
                match result {
                    Ok(ref ack) => info!(message = ?ack.message, "Registration successful"),
                    Err(ref e) => error!(error = %e, "Registration failed"),
                }
                if let Some(deferred) = self.register.finish(result.map(|_| ())) {
                    self.schedule_redirect(deferred);
                }
            }
            AuthEvent::ProfileLoaded(result) => {
                if let Err(ref e) = result {
                    warn!(error = %e, "Profile fetch failed, invalidating session");
                }
                if let Some(DashboardOutcome::SessionInvalid) = self.dashboard.finish(result) {
                    self.api.logout();
                    self.navigate(Route::Login);
                }
            }
            AuthEvent::RedirectDue(route) => {
                self.navigate(route);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    /// Unreachable base URL: spawned requests fail fast with a network
    /// error instead of hitting anything real.
    fn test_app(dir: &tempfile::TempDir) -> App {
        let config = Config {
            api_base_url: Some("http://127.0.0.1:9/api".to_string()),
            last_email: None,
        };
        App::new(config, dir.path().to_path_buf()).unwrap()
    }

    async fn drain_until<F: Fn(&App) -> bool>(app: &mut App, done: F) {
        for _ in 0..200 {
            app.check_background_tasks();
            if done(app) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("condition not reached");
    }

    #[tokio::test]
    async fn test_login_success_event_navigates_to_dashboard() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);

        app.login.identifier = "a@b.com".to_string();
        app.login.secret = "x".to_string();
        assert!(app.login.submit().is_some());

        app.on_auth_event(AuthEvent::LoginFinished(Ok(LoginResponse {
            access_token: Some("T1".to_string()),
        })));

        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(app.config.last_email.as_deref(), Some("a@b.com"));
    }

    #[tokio::test]
    async fn test_stale_login_result_leaves_config_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);

        // No submission in flight: the result is stale and must be dropped
        app.login.identifier = "a@b.com".to_string();
        app.on_auth_event(AuthEvent::LoginFinished(Ok(LoginResponse {
            access_token: Some("T1".to_string()),
        })));

        assert_eq!(app.screen, Screen::Login);
        assert_eq!(app.config.last_email, None);
    }

    #[tokio::test]
    async fn test_failed_login_shows_message_and_stays() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);

        app.login.identifier = "a@b.com".to_string();
        app.login.secret = "x".to_string();
        app.submit_login();

        // The spawned request fails against the unreachable host
        drain_until(&mut app, |a| a.login.error.is_some()).await;

        assert_eq!(app.screen, Screen::Login);
        assert!(!app.session.is_present());
        assert_eq!(
            app.login.error,
            Some(crate::controllers::login::INVALID_CREDENTIALS_MSG)
        );
    }

    #[tokio::test]
    async fn test_profile_failure_clears_session_and_redirects() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);

        app.session.set("stale-token");
        app.navigate(Route::Dashboard);
        assert_eq!(app.screen, Screen::Dashboard);

        app.on_auth_event(AuthEvent::ProfileLoaded(Err(AuthError::Unauthorized)));

        assert!(!app.session.is_present());
        assert_eq!(app.screen, Screen::Login);
    }

    #[tokio::test]
    async fn test_manual_logout_clears_session_and_redirects() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);

        app.session.set("T1");
        app.screen = Screen::Dashboard;

        app.logout();
        assert!(!app.session.is_present());
        assert_eq!(app.screen, Screen::Login);
    }

    #[tokio::test]
    async fn test_redirect_fires_after_delay_not_before() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.screen = Screen::Register;

        app.schedule_redirect(DeferredNav {
            route: Route::Login,
            delay: Duration::from_millis(50),
        });

        app.check_background_tasks();
        assert_eq!(app.screen, Screen::Register);

        drain_until(&mut app, |a| a.screen == Screen::Login).await;
    }

    #[tokio::test]
    async fn test_navigation_cancels_pending_redirect() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.screen = Screen::Login;

        app.schedule_redirect(DeferredNav {
            route: Route::Dashboard,
            delay: Duration::from_millis(30),
        });
        app.navigate(Route::Register);

        tokio::time::sleep(Duration::from_millis(80)).await;
        app.check_background_tasks();
        assert_eq!(app.screen, Screen::Register);
    }

    #[tokio::test]
    async fn test_register_success_event_schedules_redirect() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.navigate(Route::Register);

        app.register.first_name = "Ada".to_string();
        app.register.last_name = "Lovelace".to_string();
        app.register.identifier = "ada@example.com".to_string();
        app.register.secret = "hunter2".to_string();
        assert!(app.register.submit().is_some());

        app.on_auth_event(AuthEvent::RegisterFinished(Ok(RegisterAck {
            message: Some("user registered successfully".to_string()),
        })));

        assert!(app.register.success.is_some());
        assert!(app.redirect_task.is_some());
        assert_eq!(app.screen, Screen::Register);
        // No token side effect from registration
        assert!(!app.session.is_present());
    }
}

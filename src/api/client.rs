//! API client for the authentication endpoints.
//!
//! This module provides the `AuthClient` struct for exchanging credentials
//! for a bearer token, registering new users, and fetching the profile of
//! the logged-in user. The client owns the token lifecycle: a successful
//! login writes the returned token into the shared `SessionStore`, and
//! `logout` removes it.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, Client};
use tracing::{debug, warn};

use crate::auth::SessionStore;
use crate::models::{Credentials, LoginResponse, RegisterAck, Registration, UserProfile};

use super::AuthError;

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// API client for the auth endpoints.
/// Clone is cheap - reqwest::Client uses Arc internally for connection
/// pooling, and the session store is shared by handle.
#[derive(Clone)]
pub struct AuthClient {
    http: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl AuthClient {
    /// Create a new client against `base_url` (e.g. `http://host:8080/api`),
    /// attaching tokens from the given session store.
    pub fn new(base_url: String, session: Arc<SessionStore>) -> Result<Self, AuthError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    /// Exchange credentials for a session token.
    ///
    /// On success the returned `access_token`, if present and non-empty, is
    /// written to the session store. A 2xx response without a token is
    /// accepted and leaves the store untouched.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AuthError> {
        let url = format!("{}/auth/login", self.base_url);

        let response = self.http.post(&url).json(credentials).send().await?;
        let response = Self::check_response(response).await?;

        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;

        self.absorb_token(&login);
        Ok(login)
    }

    /// Register a new user. Pure pass-through: no token side effect.
    pub async fn register(&self, registration: &Registration) -> Result<RegisterAck, AuthError> {
        let url = format!("{}/auth/register", self.base_url);

        let response = self.http.post(&url).json(registration).send().await?;
        let response = Self::check_response(response).await?;

        response
            .json()
            .await
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))
    }

    /// Fetch the profile of the logged-in user.
    pub async fn profile(&self) -> Result<UserProfile, AuthError> {
        let url = format!("{}/auth/me", self.base_url);

        let response = self
            .http
            .get(&url)
            .headers(self.auth_headers())
            .send()
            .await?;
        let response = Self::check_response(response).await?;

        response
            .json()
            .await
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))
    }

    /// Clear the session. No network call.
    pub fn logout(&self) {
        self.session.clear();
        debug!("Session cleared");
    }

    /// Whether a session token is currently held.
    pub fn is_logged_in(&self) -> bool {
        self.session.is_present()
    }

    /// Header middleware stage: attach `Authorization: Bearer <token>` when
    /// the store holds a token, otherwise add nothing.
    fn auth_headers(&self) -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = self.session.token() {
            match header::HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(header::AUTHORIZATION, value);
                }
                Err(e) => {
                    warn!(error = %e, "Token is not a valid header value, sending unauthenticated");
                }
            }
        }
        headers
    }

    /// Store the access token from a login response, if one was returned.
    fn absorb_token(&self, login: &LoginResponse) {
        match login.access_token.as_deref() {
            Some(token) if !token.is_empty() => {
                self.session.set(token);
                debug!("Session token stored");
            }
            _ => {
                warn!("Login response contained no access token");
            }
        }
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, AuthError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(AuthError::from_status(status, &body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_store() -> (AuthClient, Arc<SessionStore>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(SessionStore::new(dir.path().to_path_buf()));
        let client =
            AuthClient::new("http://localhost:8080/api".to_string(), store.clone()).unwrap();
        (client, store, dir)
    }

    #[test]
    fn test_login_response_token_is_stored() {
        let (client, store, _dir) = client_with_store();

        client.absorb_token(&LoginResponse {
            access_token: Some("T1".to_string()),
        });

        assert!(client.is_logged_in());
        assert_eq!(store.token().as_deref(), Some("T1"));
    }

    #[test]
    fn test_tokenless_login_response_leaves_store_untouched() {
        let (client, store, _dir) = client_with_store();
        store.set("existing");

        client.absorb_token(&LoginResponse { access_token: None });
        assert_eq!(store.token().as_deref(), Some("existing"));

        client.absorb_token(&LoginResponse {
            access_token: Some(String::new()),
        });
        assert_eq!(store.token().as_deref(), Some("existing"));
    }

    #[test]
    fn test_logout_always_clears_session() {
        let (client, _store, _dir) = client_with_store();

        client.logout();
        assert!(!client.is_logged_in());

        client.absorb_token(&LoginResponse {
            access_token: Some("T1".to_string()),
        });
        assert!(client.is_logged_in());

        client.logout();
        assert!(!client.is_logged_in());
    }

    #[test]
    fn test_auth_headers_attach_bearer_iff_token_present() {
        let (client, store, _dir) = client_with_store();

        assert!(client.auth_headers().get(header::AUTHORIZATION).is_none());

        store.set("T1");
        let headers = client.auth_headers();
        assert_eq!(
            headers.get(header::AUTHORIZATION).unwrap(),
            &header::HeaderValue::from_static("Bearer T1")
        );
    }
}

//! Typed request and response payloads for the auth API.
//!
//! Requests serialize to the wire field names the server expects; responses
//! deserialize leniently (optional fields) since the server's shapes are not
//! contractual beyond what the screens display.

use serde::{Deserialize, Serialize};

/// Login form input. Transient: held only while a submission is in flight,
/// never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    #[serde(rename = "email")]
    pub identifier: String,
    #[serde(rename = "password")]
    pub secret: String,
}

/// Registration form input.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "email")]
    pub identifier: String,
    #[serde(rename = "password")]
    pub secret: String,
}

/// Body of a successful login. The token is optional: a 2xx response
/// without one is accepted and simply leaves the session untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Registration acknowledgement; the message is informational only.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterAck {
    #[serde(default)]
    pub message: Option<String>,
}

/// The authenticated user's profile, as returned by `/auth/me`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserProfile {
    /// Full name for display, falling back to the email address.
    pub fn display_name(&self) -> String {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .iter()
            .flatten()
            .copied()
            .collect::<Vec<_>>()
            .join(" ");

        if !name.is_empty() {
            name
        } else if let Some(ref email) = self.email {
            email.clone()
        } else {
            "Unknown user".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_serialize_to_wire_names() {
        let creds = Credentials {
            identifier: "a@b.com".to_string(),
            secret: "x".to_string(),
        };
        let json = serde_json::to_value(&creds).unwrap();
        assert_eq!(json["email"], "a@b.com");
        assert_eq!(json["password"], "x");
        assert!(json.get("identifier").is_none());
    }

    #[test]
    fn test_registration_serializes_to_wire_names() {
        let reg = Registration {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            identifier: "ada@example.com".to_string(),
            secret: "hunter2".to_string(),
        };
        let json = serde_json::to_value(&reg).unwrap();
        assert_eq!(json["first_name"], "Ada");
        assert_eq!(json["last_name"], "Lovelace");
        assert_eq!(json["email"], "ada@example.com");
        assert_eq!(json["password"], "hunter2");
    }

    #[test]
    fn test_login_response_with_token() {
        let resp: LoginResponse =
            serde_json::from_str(r#"{"access_token": "T1"}"#).unwrap();
        assert_eq!(resp.access_token.as_deref(), Some("T1"));
    }

    #[test]
    fn test_login_response_without_token() {
        let resp: LoginResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.access_token.is_none());

        // Unknown fields are tolerated
        let resp: LoginResponse =
            serde_json::from_str(r#"{"token_type": "bearer"}"#).unwrap();
        assert!(resp.access_token.is_none());
    }

    #[test]
    fn test_profile_parses_leniently() {
        let json = r#"{
            "id": "3f1c2a9e-0000-0000-0000-000000000000",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com"
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.display_name(), "Ada Lovelace");

        let partial: UserProfile =
            serde_json::from_str(r#"{"email": "ada@example.com"}"#).unwrap();
        assert_eq!(partial.display_name(), "ada@example.com");

        let empty: UserProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.display_name(), "Unknown user");
    }
}

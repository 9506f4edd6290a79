//! HTTP client for the authentication API.

pub mod client;
pub mod error;

pub use client::AuthClient;
pub use error::AuthError;

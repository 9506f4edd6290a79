//! Session management for the bearer token.
//!
//! `SessionStore` is the persistence boundary for the session token: at most
//! one token exists at a time, and its presence is the sole logged-in signal.

pub mod store;

pub use store::SessionStore;

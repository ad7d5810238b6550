//! authsession - Session client for a user authentication API
//!
//! Exchanges credentials for a bearer token, keeps the token and user
//! record in a persistent store, and clears them when the server rejects
//! the token.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod session;
pub mod ui;

pub use error::{AuthError, AuthResult};
pub use session::{SessionClient, SessionStore};

//! Remote authentication API
//!
//! Wire types for the `/api/users` endpoints and the HTTP transport that
//! carries them. The session client only talks to the server through the
//! [`Transport`] trait, so tests can script responses without a network.

pub mod transport;
pub mod types;

pub use transport::{ApiRequest, ApiResponse, Method, Transport, UreqTransport};
pub use types::{AuthData, AuthResponse, ErrorResponse, LoginPayload, ProfileResponse, RegisterPayload};

/// Registration endpoint
pub const REGISTER_PATH: &str = "/api/users/register";

/// Login endpoint
pub const LOGIN_PATH: &str = "/api/users/login";

/// Profile endpoint (requires a bearer token)
pub const PROFILE_PATH: &str = "/api/users/profile";

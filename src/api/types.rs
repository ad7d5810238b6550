//! Request and response bodies exchanged with the authentication API

use super::transport::REDACTED;
use crate::error::FieldError;
use crate::session::{Session, User};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Registration credentials
#[derive(Clone, Serialize)]
pub struct RegisterPayload {
    pub name: String,
    pub email: String,
    pub password: String,

    /// Role requested for the new account; the server picks one when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl RegisterPayload {
    /// Create a registration payload without an explicit role
    pub fn new(name: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            role: None,
        }
    }

    /// Request a specific role
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// Login credentials
#[derive(Clone, Serialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

impl LoginPayload {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for RegisterPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterPayload")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &REDACTED)
            .field("role", &self.role)
            .finish()
    }
}

impl fmt::Debug for LoginPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginPayload")
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

/// `data` member of a register/login response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthData {
    pub user: User,

    #[serde(default)]
    pub token: Option<String>,
}

/// Successful register/login response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub message: String,

    pub data: AuthData,
}

impl AuthResponse {
    /// Session carried by this response, if the server issued a token
    pub fn session(&self) -> Option<Session> {
        self.data
            .token
            .as_deref()
            .filter(|token| !token.is_empty())
            .map(|token| Session::new(token, self.data.user.clone()))
    }
}

/// Successful profile response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub success: bool,

    pub data: User,
}

/// Body of any rejected request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: Option<String>,
    pub errors: Option<Vec<FieldError>>,
}

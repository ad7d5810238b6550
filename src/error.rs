//! Error types for authsession
//!
//! All modules use `AuthResult<T>` as their return type.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for authsession operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Message used when the server rejects a registration without saying why
pub const REGISTER_FALLBACK_MESSAGE: &str = "Error en el registro";

/// Message used when the server rejects a login without saying why
pub const LOGIN_FALLBACK_MESSAGE: &str = "Error en el login";

/// Message used when the server rejects a profile fetch without saying why
pub const PROFILE_FALLBACK_MESSAGE: &str = "Error al obtener perfil";

/// A single field-level validation error reported by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All errors that can occur in authsession
#[derive(Error, Debug)]
pub enum AuthError {
    // Remote API errors
    #[error("{message}")]
    Request {
        status: u16,
        message: String,
        errors: Vec<FieldError>,
    },

    #[error("No hay token de autenticación")]
    NotAuthenticated,

    #[error("Error de conexión con el servidor")]
    Network {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Malformed response from server: {0}")]
    MalformedResponse(String),

    // Storage errors
    #[error("Session storage error: {context}")]
    Storage {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl AuthError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a storage error with context
    pub fn storage(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Storage {
            context: context.into(),
            source,
        }
    }

    /// Create a network error wrapping the transport failure
    pub fn network(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Network {
            source: source.into(),
        }
    }

    /// Create a request error from a rejected call
    pub fn request(status: u16, message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self::Request {
            status,
            message: message.into(),
            errors,
        }
    }

    /// HTTP status of a rejected request, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Field-level validation errors reported by the server
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Request { errors, .. } => errors,
            _ => &[],
        }
    }

    /// Check if the server refused the credentials or token
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Request { status: 401, .. })
    }

    /// Check if a caller may reasonably retry. The client never retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Request { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::NotAuthenticated => Some("Run: authsession login"),
            Self::Request { status: 401, .. } => Some("Run: authsession login"),
            Self::Network { .. } => Some("Check --api-url or PUBLIC_API_URL"),
            Self::ConfigInvalid { .. } => Some("Run: authsession config path"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = AuthError::request(401, "Credenciales inválidas", vec![]);
        assert_eq!(err.to_string(), "Credenciales inválidas");
        assert_eq!(
            AuthError::NotAuthenticated.to_string(),
            "No hay token de autenticación"
        );
    }

    #[test]
    fn network_error_hides_cause() {
        let err = AuthError::network(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ));
        assert_eq!(err.to_string(), "Error de conexión con el servidor");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn error_hint() {
        assert_eq!(
            AuthError::NotAuthenticated.hint(),
            Some("Run: authsession login")
        );
        assert_eq!(AuthError::Internal("x".into()).hint(), None);
    }

    #[test]
    fn error_retryable() {
        assert!(AuthError::request(503, "down", vec![]).is_retryable());
        assert!(!AuthError::request(400, "bad", vec![]).is_retryable());
        assert!(!AuthError::NotAuthenticated.is_retryable());
    }

    #[test]
    fn field_errors_exposed() {
        let err = AuthError::request(
            422,
            "Validación fallida",
            vec![FieldError {
                field: "email".into(),
                message: "Email inválido".into(),
            }],
        );
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.field_errors().len(), 1);
        assert!(AuthError::NotAuthenticated.field_errors().is_empty());
    }
}

//! Session records as persisted between runs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage key holding the raw bearer token
pub const TOKEN_KEY: &str = "authToken";

/// Storage key holding the JSON-serialized user
pub const USER_KEY: &str = "user";

/// User record as returned by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque user identifier
    pub id: String,

    pub name: String,

    pub email: String,

    /// Role assigned by the server
    pub role: String,

    /// Creation timestamp, kept exactly as the server sent it
    pub created_at: String,
}

impl User {
    /// Parse `created_at` as an RFC 3339 timestamp
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }
}

/// Bearer token paired with the user it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }
}

/// Local authentication state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No token stored
    Anonymous,
    /// A token is stored; the server may still reject it
    Active,
}

//! Configuration schema for authsession
//!
//! Configuration is stored at `~/.config/authsession/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Remote API settings
    pub api: ApiConfig,

    /// Session storage and invalidation settings
    pub session: SessionConfig,

    /// Environment capabilities
    pub capabilities: CapabilitiesConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the authentication API
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }
}

/// How a failed profile fetch is recognized as an invalidated token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidationPolicy {
    /// HTTP 401 from the profile endpoint
    #[default]
    Status,
    /// Error message contains one of the configured markers
    Message,
    /// Either of the above
    Either,
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Directory holding the persisted session (defaults to the state dir)
    pub store_dir: Option<PathBuf>,

    /// Route the guard redirects anonymous callers to
    pub login_route: String,

    /// Rule that decides when a profile failure clears the session
    pub invalidation: InvalidationPolicy,

    /// Substrings marking an expired or invalid token (used by `message`)
    pub invalidation_markers: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_dir: None,
            login_route: "/auth/login".to_string(),
            invalidation: InvalidationPolicy::Status,
            invalidation_markers: vec!["expirado".to_string(), "inválido".to_string()],
        }
    }
}

/// Capabilities of the environment the client runs in
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CapabilitiesConfig {
    /// Persist the session between runs
    pub persistence: bool,

    /// Allow the guard to navigate to the login route
    pub navigation: bool,
}

impl Default for CapabilitiesConfig {
    fn default() -> Self {
        Self {
            persistence: true,
            navigation: true,
        }
    }
}

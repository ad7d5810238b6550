//! Session client
//!
//! Mediates between callers and the remote authentication API, keeping the
//! stored session consistent with what the server last said:
//!
//! - `register` / `login` store `{token, user}` when the server issues a token
//! - `get_profile` clears the session when the server invalidates the token
//! - `logout` clears it unconditionally
//!
//! The store is shared without locking across operations, so concurrent
//! calls interleave and the last write wins.

use crate::api::{
    ApiRequest, ApiResponse, AuthResponse, ErrorResponse, LoginPayload, ProfileResponse,
    RegisterPayload, Transport, LOGIN_PATH, PROFILE_PATH, REGISTER_PATH,
};
use crate::config::{Config, InvalidationPolicy};
use crate::error::{
    AuthError, AuthResult, LOGIN_FALLBACK_MESSAGE, PROFILE_FALLBACK_MESSAGE,
    REGISTER_FALLBACK_MESSAGE,
};
use crate::session::guard::{Capabilities, Navigator};
use crate::session::state::{Session, SessionState, User, TOKEN_KEY, USER_KEY};
use crate::session::store::SessionStore;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Decides whether a rejected profile fetch means the token is no longer valid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidationRule {
    pub policy: InvalidationPolicy,
    pub markers: Vec<String>,
}

impl InvalidationRule {
    pub fn new(policy: InvalidationPolicy, markers: Vec<String>) -> Self {
        Self { policy, markers }
    }

    /// Check a rejected response against the rule
    pub fn matches(&self, status: u16, message: &str) -> bool {
        match self.policy {
            InvalidationPolicy::Status => status == 401,
            InvalidationPolicy::Message => self.message_matches(message),
            InvalidationPolicy::Either => status == 401 || self.message_matches(message),
        }
    }

    fn message_matches(&self, message: &str) -> bool {
        let message = message.to_lowercase();
        self.markers
            .iter()
            .any(|marker| !marker.is_empty() && message.contains(&marker.to_lowercase()))
    }
}

impl Default for InvalidationRule {
    fn default() -> Self {
        let session = crate::config::schema::SessionConfig::default();
        Self::new(session.invalidation, session.invalidation_markers)
    }
}

/// Client for the remote authentication API with a locally cached session
pub struct SessionClient {
    transport: Arc<dyn Transport>,
    store: Arc<dyn SessionStore>,
    navigator: Option<Arc<dyn Navigator>>,
    capabilities: Capabilities,
    login_route: String,
    invalidation: InvalidationRule,
}

impl SessionClient {
    /// Create a client with full capabilities and default policies
    pub fn new(transport: Arc<dyn Transport>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            transport,
            store,
            navigator: None,
            capabilities: Capabilities::default(),
            login_route: crate::config::schema::SessionConfig::default().login_route,
            invalidation: InvalidationRule::default(),
        }
    }

    /// Create a client configured from the `[session]` and `[capabilities]` sections
    pub fn from_config(
        config: &Config,
        transport: Arc<dyn Transport>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self::new(transport, store)
            .with_capabilities(Capabilities::from(&config.capabilities))
            .with_login_route(config.session.login_route.clone())
            .with_invalidation(InvalidationRule::new(
                config.session.invalidation,
                config.session.invalidation_markers.clone(),
            ))
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn with_login_route(mut self, route: impl Into<String>) -> Self {
        self.login_route = route.into();
        self
    }

    pub fn with_invalidation(mut self, rule: InvalidationRule) -> Self {
        self.invalidation = rule;
        self
    }

    /// Route anonymous callers are sent to
    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Create an account and store the issued session
    pub async fn register(&self, payload: &RegisterPayload) -> AuthResult<AuthResponse> {
        debug!("Registering {}", payload.email);
        let body = serde_json::to_string(payload)?;
        self.submit_credentials(REGISTER_PATH, body, REGISTER_FALLBACK_MESSAGE)
            .await
    }

    /// Log in and store the issued session
    pub async fn login(&self, payload: &LoginPayload) -> AuthResult<AuthResponse> {
        debug!("Logging in {}", payload.email);
        let body = serde_json::to_string(payload)?;
        self.submit_credentials(LOGIN_PATH, body, LOGIN_FALLBACK_MESSAGE)
            .await
    }

    async fn submit_credentials(
        &self,
        path: &str,
        body: String,
        fallback: &str,
    ) -> AuthResult<AuthResponse> {
        let response = self
            .transport
            .send(ApiRequest::post_json(path, body))
            .await?;

        if !response.is_success() {
            return Err(rejection(&response, fallback));
        }

        let auth: AuthResponse = parse_success(&response)?;

        if let Some(session) = auth.session() {
            self.persist(&session).await?;
        } else {
            debug!("Response carried no token, session left untouched");
        }

        Ok(auth)
    }

    /// Fetch the current user with the stored token
    ///
    /// Fails with [`AuthError::NotAuthenticated`] without touching the network
    /// when no token is stored. A rejection the invalidation rule recognizes
    /// clears the session before the error is returned.
    pub async fn get_profile(&self) -> AuthResult<User> {
        let token = self.get_token().await.ok_or(AuthError::NotAuthenticated)?;

        let response = self
            .transport
            .send(ApiRequest::get(PROFILE_PATH).with_bearer(token))
            .await?;

        if !response.is_success() {
            let err = rejection(&response, PROFILE_FALLBACK_MESSAGE);
            if self.invalidation.matches(response.status, &err.to_string()) {
                info!("Server rejected the stored token, clearing session");
                if let Err(clear_err) = self.logout().await {
                    warn!("Failed to clear rejected session: {}", clear_err);
                }
            }
            return Err(err);
        }

        let profile: ProfileResponse = parse_success(&response)?;
        Ok(profile.data)
    }

    /// Stored bearer token
    pub async fn get_token(&self) -> Option<String> {
        if !self.capabilities.has_persistence {
            return None;
        }

        match self.store.get(TOKEN_KEY).await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("Could not read stored token: {}", e);
                None
            }
        }
    }

    /// Stored user; an unreadable record counts as absent
    pub async fn get_user(&self) -> Option<User> {
        if !self.capabilities.has_persistence {
            return None;
        }

        let raw = match self.store.get(USER_KEY).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Could not read stored user: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                debug!("Ignoring malformed stored user: {}", e);
                None
            }
        }
    }

    /// Stored token and user together, if both are present
    pub async fn session(&self) -> Option<Session> {
        let token = self.get_token().await?;
        let user = self.get_user().await?;
        Some(Session::new(token, user))
    }

    /// Whether a token is stored. Says nothing about its validity on the server.
    pub async fn is_authenticated(&self) -> bool {
        self.get_token().await.is_some()
    }

    pub async fn state(&self) -> SessionState {
        if self.is_authenticated().await {
            SessionState::Active
        } else {
            SessionState::Anonymous
        }
    }

    /// Remove the stored session
    pub async fn logout(&self) -> AuthResult<()> {
        if !self.capabilities.has_persistence {
            return Ok(());
        }

        self.store.remove(TOKEN_KEY).await?;
        self.store.remove(USER_KEY).await?;
        info!("Session cleared");
        Ok(())
    }

    /// Remove the stored session, then send the caller to the login route
    pub async fn logout_and_redirect(&self) -> AuthResult<()> {
        self.logout().await?;
        self.navigate_to_login();
        Ok(())
    }

    /// Redirect to the login route when no token is stored
    ///
    /// Returns whether a redirect happened. Never calls the server.
    pub async fn require_auth(&self) -> bool {
        if !self.capabilities.can_navigate || self.navigator.is_none() {
            return false;
        }

        if self.is_authenticated().await {
            return false;
        }

        self.navigate_to_login()
    }

    fn navigate_to_login(&self) -> bool {
        if !self.capabilities.can_navigate {
            return false;
        }
        match self.navigator {
            Some(ref navigator) => {
                debug!("Redirecting to {}", self.login_route);
                navigator.navigate(&self.login_route);
                true
            }
            None => false,
        }
    }

    async fn persist(&self, session: &Session) -> AuthResult<()> {
        if !self.capabilities.has_persistence {
            debug!("Persistence unavailable, session not stored");
            return Ok(());
        }

        // Token last: its presence marks an active session
        let user = serde_json::to_string(&session.user)?;
        self.store.set(USER_KEY, &user).await?;
        if let Err(e) = self.store.set(TOKEN_KEY, &session.token).await {
            if let Err(cleanup_err) = self.store.remove(USER_KEY).await {
                warn!("Failed to remove partial session: {}", cleanup_err);
            }
            return Err(e);
        }

        info!("Session stored for {}", session.user.email);
        Ok(())
    }
}

/// Build the error for a non-success response
fn rejection(response: &ApiResponse, fallback: &str) -> AuthError {
    let parsed: ErrorResponse = serde_json::from_str(&response.body).unwrap_or_else(|e| {
        debug!("Error body is not JSON: {}", e);
        ErrorResponse::default()
    });

    let message = parsed
        .message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());

    AuthError::request(response.status, message, parsed.errors.unwrap_or_default())
}

fn parse_success<T: DeserializeOwned>(response: &ApiResponse) -> AuthResult<T> {
    serde_json::from_str(&response.body).map_err(|e| AuthError::MalformedResponse(e.to_string()))
}

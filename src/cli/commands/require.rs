//! Require command - guard for scripts that need a session

use super::open_client;
use crate::config::Config;
use crate::error::{AuthError, AuthResult};
use crate::session::Navigator;
use crate::ui::{self, UiContext};
use console::style;
use std::sync::Arc;

/// Navigator for a terminal: names the login route the user should open
struct ConsoleNavigator;

impl ConsoleNavigator {
    fn message(route: &str) -> String {
        format!("{} {}", style("Login required:").yellow(), route)
    }
}

impl Navigator for ConsoleNavigator {
    fn navigate(&self, route: &str) {
        eprintln!("{}", Self::message(route));
    }
}

/// Execute the require command
///
/// Succeeds when a session is stored. Otherwise the guard redirects and the
/// command fails so scripts can stop early.
pub async fn execute(config: &Config) -> AuthResult<()> {
    let ctx = UiContext::detect();
    let navigator: Arc<dyn Navigator> = Arc::new(ConsoleNavigator);
    let client = open_client(config, Some(navigator)).await?;

    if client.require_auth().await || !client.is_authenticated().await {
        return Err(AuthError::NotAuthenticated);
    }

    ui::step_ok(&ctx, "Session present");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_message_names_route_only() {
        let message = console::strip_ansi_codes(&ConsoleNavigator::message("/auth/login")).to_string();
        assert_eq!(message, "Login required: /auth/login");
    }
}

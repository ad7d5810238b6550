//! Status command - show the local session state

use super::open_client;
use crate::config::{Config, ConfigManager};
use crate::error::AuthResult;
use crate::session::SessionState;
use crate::ui::{self, UiContext};

/// Execute the status command
///
/// Only inspects local storage; the server may already have rejected the token.
pub async fn execute(config: &Config) -> AuthResult<()> {
    let ctx = UiContext::detect();
    let client = open_client(config, None).await?;

    ui::section(&ctx, "Session");

    let state = client.state().await;
    let label = match state {
        SessionState::Active => "active",
        SessionState::Anonymous => "anonymous",
    };
    ui::key_value_status(&ctx, "State", label, state == SessionState::Active);

    if let Some(user) = client.get_user().await {
        ui::key_value(&ctx, "User", &format!("{} <{}>", user.name, user.email));
    }

    ui::key_value(&ctx, "API", &config.api.base_url);

    if client.capabilities().has_persistence {
        let dir = ConfigManager::session_dir(config);
        ui::key_value(&ctx, "Store", &dir.display().to_string());
    } else {
        ui::key_value_status(&ctx, "Store", "disabled", false);
    }

    if state == SessionState::Anonymous {
        ui::remark(&ctx, "Run: authsession login");
    }

    Ok(())
}

//! Logout command - remove the stored session

use super::open_client;
use crate::config::Config;
use crate::error::AuthResult;
use crate::ui::{self, UiContext};

/// Execute the logout command
pub async fn execute(config: &Config) -> AuthResult<()> {
    let ctx = UiContext::detect();
    let client = open_client(config, None).await?;

    let was_authenticated = client.is_authenticated().await;
    client.logout().await?;

    if was_authenticated {
        ui::step_ok(&ctx, "Session cleared");
    } else {
        ui::remark(&ctx, "No stored session");
    }
    Ok(())
}

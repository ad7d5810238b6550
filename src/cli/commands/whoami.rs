//! Whoami command - show the stored user without contacting the server

use super::{open_client, print_user};
use crate::cli::args::{OutputArgs, OutputFormat};
use crate::config::Config;
use crate::error::{AuthError, AuthResult};
use crate::ui::{self, UiContext};

/// Execute the whoami command
pub async fn execute(args: OutputArgs, config: &Config) -> AuthResult<()> {
    let ctx = match args.format {
        OutputFormat::Json => UiContext::non_interactive(),
        OutputFormat::Text => UiContext::detect(),
    };
    let client = open_client(config, None).await?;

    if let Some(user) = client.get_user().await {
        return print_user(&ctx, &user, args.format);
    }

    if !client.is_authenticated().await {
        return Err(AuthError::NotAuthenticated);
    }

    ui::step_warn_hint(
        &ctx,
        "A token is stored but the user record is unreadable",
        "Run: authsession profile",
    );
    Ok(())
}

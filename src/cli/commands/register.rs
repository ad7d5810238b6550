//! Register command - create an account and start a session

use super::{open_client, report_field_errors};
use crate::api::RegisterPayload;
use crate::cli::args::RegisterArgs;
use crate::config::Config;
use crate::error::AuthResult;
use crate::ui::{self, TaskSpinner, UiContext};

/// Execute the register command
pub async fn execute(args: RegisterArgs, config: &Config) -> AuthResult<()> {
    let ctx = UiContext::detect();

    let name = ui::input(&ctx, args.name, "Name", "--name").await?;
    let email = ui::input(&ctx, args.email, "Email", "--email").await?;
    let password = ui::password(&ctx, args.password, "--password").await?;

    let mut payload = RegisterPayload::new(name, email, password);
    if let Some(role) = args.role {
        payload = payload.with_role(role);
    }

    let client = open_client(config, None).await?;

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start("Creating account...");

    match client.register(&payload).await {
        Ok(response) => {
            let user = &response.data.user;
            spinner.stop(&format!("Registered {} <{}>", user.name, user.email));
            if response.session().is_none() {
                ui::step_warn_hint(
                    &ctx,
                    "Server issued no token",
                    "Run: authsession login",
                );
            }
            Ok(())
        }
        Err(e) => {
            spinner.stop_error("Registration failed");
            report_field_errors(&ctx, &e);
            Err(e)
        }
    }
}

//! Login command - start a session

use super::{open_client, report_field_errors};
use crate::api::LoginPayload;
use crate::cli::args::LoginArgs;
use crate::config::Config;
use crate::error::AuthResult;
use crate::ui::{self, TaskSpinner, UiContext};

/// Execute the login command
pub async fn execute(args: LoginArgs, config: &Config) -> AuthResult<()> {
    let ctx = UiContext::detect();

    let email = ui::input(&ctx, args.email, "Email", "--email").await?;
    let password = ui::password(&ctx, args.password, "--password").await?;
    let payload = LoginPayload::new(email, password);

    let client = open_client(config, None).await?;

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start("Logging in...");

    match client.login(&payload).await {
        Ok(response) => {
            let user = &response.data.user;
            spinner.stop(&format!("Logged in as {} <{}>", user.name, user.email));
            Ok(())
        }
        Err(e) => {
            spinner.stop_error("Login failed");
            report_field_errors(&ctx, &e);
            Err(e)
        }
    }
}

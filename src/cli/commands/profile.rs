//! Profile command - fetch the current user from the server

use super::{open_client, print_user};
use crate::cli::args::{OutputArgs, OutputFormat};
use crate::config::Config;
use crate::error::AuthResult;
use crate::ui::{self, TaskSpinner, UiContext};

/// Execute the profile command
pub async fn execute(args: OutputArgs, config: &Config) -> AuthResult<()> {
    let ctx = match args.format {
        OutputFormat::Json => UiContext::non_interactive(),
        OutputFormat::Text => UiContext::detect(),
    };
    let client = open_client(config, None).await?;

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start("Fetching profile...");

    let user = match client.get_profile().await {
        Ok(user) => {
            spinner.clear();
            user
        }
        Err(e) => {
            spinner.stop_error("Profile request failed");
            if !client.is_authenticated().await && e.status().is_some() {
                ui::remark(&ctx, "Stored session was cleared");
            }
            return Err(e);
        }
    };

    if args.format == OutputFormat::Text {
        ui::section(&ctx, "Profile");
    }
    print_user(&ctx, &user, args.format)
}

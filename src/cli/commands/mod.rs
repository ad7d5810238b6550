//! CLI command implementations

pub mod completions;
pub mod config;
pub mod login;
pub mod logout;
pub mod profile;
pub mod register;
pub mod require;
pub mod status;
pub mod whoami;

pub use completions::execute as completions;
pub use config::execute as config;
pub use login::execute as login;
pub use logout::execute as logout;
pub use profile::execute as profile;
pub use register::execute as register;
pub use require::execute as require;
pub use status::execute as status;
pub use whoami::execute as whoami;

use crate::api::UreqTransport;
use crate::cli::args::OutputFormat;
use crate::config::{Config, ConfigManager};
use crate::error::{AuthError, AuthResult};
use crate::session::{FileStore, MemoryStore, Navigator, SessionClient, SessionStore, User};
use crate::ui::{self, UiContext};
use std::sync::Arc;
use tracing::debug;

/// Build a session client from configuration
///
/// The session lives in a [`FileStore`] unless persistence is disabled, in
/// which case an empty in-memory store stands in.
pub async fn open_client(
    config: &Config,
    navigator: Option<Arc<dyn Navigator>>,
) -> AuthResult<SessionClient> {
    let transport = Arc::new(UreqTransport::new(config.api.base_url.clone()));

    let store: Arc<dyn SessionStore> = if config.capabilities.persistence {
        let dir = ConfigManager::session_dir(config);
        debug!("Session store at {}", dir.display());
        Arc::new(FileStore::open(dir).await?)
    } else {
        Arc::new(MemoryStore::new())
    };

    let client = SessionClient::from_config(config, transport, store);
    Ok(match navigator {
        Some(navigator) => client.with_navigator(navigator),
        None => client,
    })
}

/// Print a user in the requested format
pub(crate) fn print_user(ctx: &UiContext, user: &User, format: OutputFormat) -> AuthResult<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(user)?);
        }
        OutputFormat::Text => {
            ui::key_value(ctx, "ID", &user.id);
            ui::key_value(ctx, "Name", &user.name);
            ui::key_value(ctx, "Email", &user.email);
            ui::key_value(ctx, "Role", &user.role);
            let created = user
                .created_at_utc()
                .map(|ts| ts.format("%Y-%m-%d %H:%M UTC").to_string())
                .unwrap_or_else(|| user.created_at.clone());
            ui::key_value(ctx, "Created", &created);
        }
    }
    Ok(())
}

/// Print server-side validation errors attached to a rejected request
pub(crate) fn report_field_errors(ctx: &UiContext, err: &AuthError) {
    for field_error in err.field_errors() {
        ui::step_error_detail(ctx, &field_error.field, &field_error.message);
    }
}

//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager, InvalidationPolicy};
use crate::error::{AuthError, AuthResult};
use crate::ui::{self, UiContext};
use std::path::PathBuf;

/// Keys accepted by `config set`
const VALID_KEYS: [&str; 8] = [
    "general.log_format",
    "api.base_url",
    "session.store_dir",
    "session.login_route",
    "session.invalidation",
    "session.invalidation_markers",
    "capabilities.persistence",
    "capabilities.navigation",
];

/// Execute the config command
pub async fn execute(args: ConfigArgs, config: &Config, manager: &ConfigManager) -> AuthResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => println!("{}", manager.path().display()),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value }) => set_value(manager, &key, &value).await?,
    }

    Ok(())
}

fn show_config(config: &Config) -> AuthResult<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

async fn init_config(manager: &ConfigManager, force: bool) -> AuthResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn_hint(
            &ctx,
            &format!("Config already exists at {}", path.display()),
            "Use --force to overwrite",
        );
        return Ok(());
    }

    manager.save(&Config::default()).await?;

    ui::step_ok_detail(
        &ctx,
        "Configuration initialized",
        &path.display().to_string(),
    );

    Ok(())
}

async fn set_value(manager: &ConfigManager, key: &str, value: &str) -> AuthResult<()> {
    let ctx = UiContext::detect();

    // Edit the file as written, not the copy with command-line overrides applied
    let mut config = manager.load().await?;

    if let Err(e) = apply_value(&mut config, key, value) {
        ui::step_error_detail(&ctx, "Cannot set", key);
        ui::remark(&ctx, &format!("Valid keys: {}", VALID_KEYS.join(", ")));
        return Err(e);
    }

    manager.save(&config).await?;
    ui::step_ok(&ctx, &format!("Set {} = {}", key, value));

    Ok(())
}

/// Apply a dot-separated key to the configuration
fn apply_value(config: &mut Config, key: &str, value: &str) -> AuthResult<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "log_format"] => match value {
            "text" | "json" => config.general.log_format = value.to_string(),
            _ => {
                return Err(AuthError::User(format!(
                    "Invalid log format: {}. Use text/json",
                    value
                )))
            }
        },

        ["api", "base_url"] => {
            if !value.starts_with("http://") && !value.starts_with("https://") {
                return Err(AuthError::User(format!("Invalid URL: {}", value)));
            }
            config.api.base_url = value.to_string();
        }

        ["session", "store_dir"] => config.session.store_dir = Some(PathBuf::from(value)),
        ["session", "login_route"] => config.session.login_route = value.to_string(),
        ["session", "invalidation"] => config.session.invalidation = parse_policy(value)?,
        ["session", "invalidation_markers"] => {
            config.session.invalidation_markers = value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        ["capabilities", "persistence"] => config.capabilities.persistence = parse_bool(value)?,
        ["capabilities", "navigation"] => config.capabilities.navigation = parse_bool(value)?,

        _ => return Err(AuthError::User(format!("Unknown config key: {}", key))),
    }

    Ok(())
}

fn parse_policy(value: &str) -> AuthResult<InvalidationPolicy> {
    match value.to_lowercase().as_str() {
        "status" => Ok(InvalidationPolicy::Status),
        "message" => Ok(InvalidationPolicy::Message),
        "either" => Ok(InvalidationPolicy::Either),
        _ => Err(AuthError::User(format!(
            "Invalid invalidation policy: {}. Use status/message/either",
            value
        ))),
    }
}

fn parse_bool(value: &str) -> AuthResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(AuthError::User(format!(
            "Invalid boolean value: {}. Use true/false",
            value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn apply_known_keys() {
        let mut config = Config::default();

        apply_value(&mut config, "api.base_url", "https://auth.example.com").unwrap();
        apply_value(&mut config, "session.login_route", "/login").unwrap();
        apply_value(&mut config, "session.invalidation", "either").unwrap();
        apply_value(&mut config, "session.invalidation_markers", "expired, invalid,").unwrap();
        apply_value(&mut config, "capabilities.navigation", "no").unwrap();

        assert_eq!(config.api.base_url, "https://auth.example.com");
        assert_eq!(config.session.login_route, "/login");
        assert_eq!(config.session.invalidation, InvalidationPolicy::Either);
        assert_eq!(config.session.invalidation_markers, vec!["expired", "invalid"]);
        assert!(!config.capabilities.navigation);
    }

    #[test]
    fn apply_rejects_bad_values() {
        let mut config = Config::default();
        assert!(apply_value(&mut config, "vm.name", "x").is_err());
        assert!(apply_value(&mut config, "api.base_url", "localhost:3000").is_err());
        assert!(apply_value(&mut config, "session.invalidation", "never").is_err());
        assert!(apply_value(&mut config, "capabilities.persistence", "maybe").is_err());
    }

    #[tokio::test]
    async fn set_value_persists() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp.path().join("config.toml"));

        set_value(&manager, "session.login_route", "/login").await.unwrap();

        let loaded = manager.load().await.unwrap();
        assert_eq!(loaded.session.login_route, "/login");
    }
}

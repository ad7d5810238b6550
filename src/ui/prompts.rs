//! Interactive prompts for credentials that were not passed as flags

use super::context::UiContext;
use crate::error::{AuthError, AuthResult};

/// Use `value` if given, otherwise prompt for it
///
/// Fails when the value is missing and the terminal cannot prompt, naming
/// the flag that supplies it.
pub async fn input(
    ctx: &UiContext,
    value: Option<String>,
    message: &str,
    flag: &str,
) -> AuthResult<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    ensure_prompt(ctx, flag)?;

    let message = message.to_string();
    let result = tokio::task::spawn_blocking(move || {
        cliclack::input(&message)
            .validate(|text: &String| {
                if text.trim().is_empty() {
                    Err("Value required")
                } else {
                    Ok(())
                }
            })
            .interact::<String>()
    })
    .await
    .map_err(|e| AuthError::User(format!("Prompt task failed: {}", e)))?;

    result.map_err(|e| AuthError::User(format!("Prompt failed: {}", e)))
}

/// Use `value` if given, otherwise prompt for a masked password
pub async fn password(ctx: &UiContext, value: Option<String>, flag: &str) -> AuthResult<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    ensure_prompt(ctx, flag)?;

    let result = tokio::task::spawn_blocking(|| cliclack::password("Password").mask('▪').interact())
        .await
        .map_err(|e| AuthError::User(format!("Prompt task failed: {}", e)))?;

    result.map_err(|e| AuthError::User(format!("Prompt failed: {}", e)))
}

fn ensure_prompt(ctx: &UiContext, flag: &str) -> AuthResult<()> {
    if ctx.can_prompt() {
        Ok(())
    } else {
        Err(AuthError::User(format!(
            "Missing {} (no terminal to prompt in)",
            flag
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn provided_value_skips_prompt() {
        let ctx = UiContext::non_interactive();
        let value = input(&ctx, Some("a@x.com".into()), "Email", "--email")
            .await
            .unwrap();
        assert_eq!(value, "a@x.com");
    }

    #[tokio::test]
    async fn missing_value_non_interactive_fails() {
        let ctx = UiContext::non_interactive();
        let err = password(&ctx, None, "--password").await.unwrap_err();
        assert!(err.to_string().contains("--password"));
    }
}

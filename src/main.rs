//! authsession - Session client CLI
//!
//! CLI entry point that dispatches to subcommands.

use authsession::cli::{Cli, Commands};
use authsession::config::ConfigManager;
use authsession::error::AuthResult;
use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> AuthResult<()> {
    let cli = Cli::parse();

    // Completions need neither config nor logging
    if let Commands::Completions(args) = cli.command {
        return authsession::cli::commands::completions(args);
    }

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let mut config = config_manager.load().await?;

    init_logging(cli.verbose, &config.general.log_format);
    debug!("Using config {}", config_manager.path().display());

    // Command-line overrides win over the file
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    if let Some(dir) = cli.store_dir {
        config.session.store_dir = Some(dir);
    }

    authsession::ui::init_theme();

    match cli.command {
        Commands::Completions(_) => unreachable!("Completions handled above"),
        Commands::Register(args) => authsession::cli::commands::register(args, &config).await,
        Commands::Login(args) => authsession::cli::commands::login(args, &config).await,
        Commands::Profile(args) => authsession::cli::commands::profile(args, &config).await,
        Commands::Whoami(args) => authsession::cli::commands::whoami(args, &config).await,
        Commands::Status => authsession::cli::commands::status(&config).await,
        Commands::Logout => authsession::cli::commands::logout(&config).await,
        Commands::Require => authsession::cli::commands::require(&config).await,
        Commands::Config(args) => {
            authsession::cli::commands::config(args, &config, &config_manager).await
        }
    }
}

/// Initialize logging: 0 = warn, 1 = info, 2+ = debug
fn init_logging(verbose: u8, log_format: &str) {
    let filter = match verbose {
        0 => EnvFilter::new("authsession=warn"),
        1 => EnvFilter::new("authsession=info"),
        _ => EnvFilter::new("authsession=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if log_format == "json" {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}

//! CLI argument definitions using clap derive

use crate::api::transport::REDACTED;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::fmt;
use std::path::PathBuf;

/// authsession - Session client for the user authentication API
///
/// Registers, logs in and fetches the profile of the current user,
/// keeping the session token between runs.
#[derive(Parser, Debug)]
#[command(name = "authsession")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "AUTHSESSION_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the authentication API
    #[arg(long, global = true, env = "PUBLIC_API_URL")]
    pub api_url: Option<String>,

    /// Directory the session is stored in
    #[arg(long, global = true, env = "AUTHSESSION_STORE_DIR")]
    pub store_dir: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account and start a session
    Register(RegisterArgs),

    /// Log in and start a session
    Login(LoginArgs),

    /// Fetch the current user from the server
    Profile(OutputArgs),

    /// Show the stored user without contacting the server
    Whoami(OutputArgs),

    /// Show whether a session is stored
    Status,

    /// Remove the stored session
    Logout,

    /// Fail with the login route when no session is stored
    Require,

    /// Show or edit configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the register command
#[derive(Parser)]
pub struct RegisterArgs {
    /// Display name (prompted when omitted)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Email address (prompted when omitted)
    #[arg(short, long)]
    pub email: Option<String>,

    /// Password (prompted when omitted)
    #[arg(short, long, env = "AUTHSESSION_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Role to request; the server assigns one when omitted
    #[arg(short, long)]
    pub role: Option<String>,
}

/// Arguments for the login command
#[derive(Parser)]
pub struct LoginArgs {
    /// Email address (prompted when omitted)
    #[arg(short, long)]
    pub email: Option<String>,

    /// Password (prompted when omitted)
    #[arg(short, long, env = "AUTHSESSION_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl fmt::Debug for RegisterArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterArgs")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| REDACTED))
            .field("role", &self.role)
            .finish()
    }
}

impl fmt::Debug for LoginArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginArgs")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| REDACTED))
            .finish()
    }
}

/// Output selection shared by commands that print a user
#[derive(Parser, Debug)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for user records
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable fields
    Text,
    /// JSON output
    Json,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., api.base_url)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Arguments for the completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: Shell,
}

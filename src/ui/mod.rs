//! Terminal output for the CLI
//!
//! Uses `cliclack` for spinners and prompts in an interactive terminal and
//! falls back to plain lines in CI or when stdout is piped.

mod context;
mod output;
mod progress;
mod prompts;
mod theme;

pub use context::UiContext;
pub use output::{
    key_value, key_value_status, remark, section, step_error_detail, step_ok, step_ok_detail,
    step_warn_hint,
};
pub use progress::TaskSpinner;
pub use prompts::{input, password};
pub use theme::{init_theme, SessionTheme};

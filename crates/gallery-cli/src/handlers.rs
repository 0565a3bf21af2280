//! Command handlers for CLI subcommands
//!
//! Each submodule implements one subcommand; shared document and bounds
//! plumbing lives in `utils`.

mod check;
mod completions;
mod config;
mod submit;
mod utils;
mod validate;

pub use check::handle_check;
pub use completions::handle_completions;
pub use config::handle_config;
pub use submit::{handle_reconcile, handle_submit};
pub use validate::handle_validate;

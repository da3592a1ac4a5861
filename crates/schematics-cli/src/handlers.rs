//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod flat;
mod operate;
mod utils;
mod validate;

pub use completions::handle_completions;
pub use flat::{handle_deflate, handle_flatten};
pub use operate::handle_operate;
pub use validate::handle_validate;

//! Command-line interface definitions and helpers.
//!
//! This module contains all CLI argument parsing and subcommand handlers.

mod args;
mod commands;

pub use args::{Args, Command, ConfigAction, GenerateArgs, SessionArgs, VideoOptions};
pub use commands::{handle_config_action, run_generate, run_session, run_session_loop};

//! Command-line interface for kitbag.
//!
//! This module provides CLI argument parsing using clap's derive macros
//! and the command implementations. The CLI is a thin dispatch layer: it
//! parses arguments, loads the project config, calls the core library,
//! and renders the report.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{AddArgs, Cli, Commands, InitArgs, ListArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};

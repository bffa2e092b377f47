//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// kitbag - install registry UI components into your project.
#[derive(Debug, Parser)]
#[command(name = "kitbag")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a fresh kitbag.json for this project
    Init(InitArgs),

    /// Resolve items and install them into the project
    Add(AddArgs),

    /// List installable items across configured registries
    List(ListArgs),
}

/// Arguments for the `init` command.
#[derive(Debug, Clone, clap::Args)]
pub struct InitArgs {
    /// Visual style to configure
    #[arg(long)]
    pub style: Option<String>,

    /// Icon library to configure
    #[arg(long)]
    pub icon_library: Option<String>,

    /// Base color for generated themes
    #[arg(long)]
    pub base_color: Option<String>,

    /// Project keeps sources under src/
    #[arg(long)]
    pub src_dir: bool,

    /// Remote registry base URL (repeatable)
    #[arg(long = "registry")]
    pub registries: Vec<String>,

    /// Overwrite an existing kitbag.json
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `add` command.
#[derive(Debug, Clone, clap::Args)]
pub struct AddArgs {
    /// Registry item names to install
    #[arg(required = true)]
    pub items: Vec<String>,

    /// Replace files that already exist (default: skip them)
    #[arg(long, conflicts_with = "merge")]
    pub overwrite: bool,

    /// Deep-merge mergeable config files instead of skipping them
    #[arg(long, conflicts_with = "overwrite")]
    pub merge: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ListArgs {
    /// Only list items of this kind (ui, block, page, ...)
    #[arg(long = "type")]
    pub kind: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_requires_at_least_one_item() {
        let result = Cli::try_parse_from(["kitbag", "add"]);
        assert!(result.is_err());
    }

    #[test]
    fn add_parses_items_and_policy() {
        let cli = Cli::try_parse_from(["kitbag", "add", "button", "card", "--overwrite"]).unwrap();
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.items, vec!["button", "card"]);
                assert!(args.overwrite);
            }
            other => panic!("expected add, got {:?}", other),
        }
    }

    #[test]
    fn overwrite_and_merge_conflict() {
        let result = Cli::try_parse_from(["kitbag", "add", "button", "--overwrite", "--merge"]);
        assert!(result.is_err());
    }

    #[test]
    fn init_accepts_repeatable_registries() {
        let cli = Cli::try_parse_from([
            "kitbag",
            "init",
            "--registry",
            "https://a.example.com/r",
            "--registry",
            "https://b.example.com/r",
        ])
        .unwrap();
        match cli.command {
            Commands::Init(args) => assert_eq!(args.registries.len(), 2),
            other => panic!("expected init, got {:?}", other),
        }
    }
}

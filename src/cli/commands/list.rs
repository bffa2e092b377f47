//! `kitbag list` - list installable items across configured registries.

use crate::cli::args::ListArgs;
use crate::cli::commands::{Command, CommandResult};
use crate::config;
use crate::error::Result;
use crate::install::registry_for;
use console::style;
use std::path::{Path, PathBuf};

/// Prints the installable (non-internal) items the registries offer.
pub struct ListCommand {
    project_root: PathBuf,
    args: ListArgs,
}

impl ListCommand {
    pub fn new(project_root: &Path, args: ListArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }
}

impl Command for ListCommand {
    fn execute(&self) -> Result<CommandResult> {
        let config = config::load_config(&self.project_root)?;
        let registry = registry_for(&self.project_root, &config)?;

        let mut summaries = registry.list_installable();
        if let Some(kind) = &self.args.kind {
            summaries.retain(|s| s.kind.as_deref() == Some(kind.as_str()));
        }

        if summaries.is_empty() {
            println!("No installable items found.");
            return Ok(CommandResult::success());
        }

        for summary in &summaries {
            let kind = summary.kind.as_deref().unwrap_or("?");
            match &summary.description {
                Some(description) => println!(
                    "{:24} {:8} {}",
                    style(&summary.name).bold(),
                    style(kind).dim(),
                    description
                ),
                None => println!("{:24} {}", style(&summary.name).bold(), style(kind).dim()),
            }
        }

        Ok(CommandResult::success())
    }
}

//! `kitbag add` - resolve items and install them into the project.

use crate::cli::args::AddArgs;
use crate::cli::commands::{Command, CommandResult};
use crate::error::Result;
use crate::install::{install, InstallOptions, InstallReport};
use crate::materialize::{FileOutcome, OverwritePolicy};
use console::style;
use std::path::{Path, PathBuf};

/// Runs the full install pipeline for the requested items.
pub struct AddCommand {
    project_root: PathBuf,
    args: AddArgs,
}

impl AddCommand {
    pub fn new(project_root: &Path, args: AddArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    fn policy(&self) -> OverwritePolicy {
        if self.args.overwrite {
            OverwritePolicy::Overwrite
        } else if self.args.merge {
            OverwritePolicy::MergeIfMergeable
        } else {
            OverwritePolicy::SkipExisting
        }
    }

    fn print_report(&self, report: &InstallReport) {
        println!(
            "{} installed {} item(s): {}",
            style("✓").green().bold(),
            report.items.len(),
            report.items.join(", ")
        );

        for entry in &report.writes.entries {
            let tag = match entry.outcome {
                FileOutcome::Written => style("created").green(),
                FileOutcome::Overwritten => style("replaced").yellow(),
                FileOutcome::Merged => style("merged").cyan(),
                FileOutcome::Unchanged => style("unchanged").dim(),
                FileOutcome::Skipped => style("skipped").yellow(),
            };
            println!("  {} {}", tag, entry.path.display());
        }

        for warning in &report.tree_warnings {
            println!("  {} {}", style("warning:").yellow().bold(), warning);
        }
        for warning in &report.config_warnings {
            println!("  {} {}", style("warning:").yellow().bold(), warning);
        }

        if !report.dependencies.is_empty() {
            let specs: Vec<String> = report.dependencies.iter().map(|d| d.to_string()).collect();
            println!("  install dependencies: {}", specs.join(" "));
        }
        if !report.dev_dependencies.is_empty() {
            let specs: Vec<String> = report
                .dev_dependencies
                .iter()
                .map(|d| d.to_string())
                .collect();
            println!("  install dev dependencies: {}", specs.join(" "));
        }
        if !report.env_vars.is_empty() {
            println!("  environment defaults:");
            for (name, value) in &report.env_vars {
                println!("    {}={}", name, value);
            }
        }

        for failure in &report.transform_failures {
            eprintln!("  {} {}", style("failed:").red().bold(), failure.error);
        }
    }
}

impl Command for AddCommand {
    fn execute(&self) -> Result<CommandResult> {
        let options = InstallOptions {
            policy: self.policy(),
        };

        let report = install(&self.project_root, &self.args.items, &options)?;
        self.print_report(&report);

        if report.is_success() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(overwrite: bool, merge: bool) -> AddArgs {
        AddArgs {
            items: vec!["button".to_string()],
            overwrite,
            merge,
        }
    }

    #[test]
    fn default_policy_is_skip_existing() {
        let cmd = AddCommand::new(Path::new("/tmp"), args(false, false));
        assert_eq!(cmd.policy(), OverwritePolicy::SkipExisting);
    }

    #[test]
    fn overwrite_flag_selects_overwrite() {
        let cmd = AddCommand::new(Path::new("/tmp"), args(true, false));
        assert_eq!(cmd.policy(), OverwritePolicy::Overwrite);
    }

    #[test]
    fn merge_flag_selects_merge() {
        let cmd = AddCommand::new(Path::new("/tmp"), args(false, true));
        assert_eq!(cmd.policy(), OverwritePolicy::MergeIfMergeable);
    }
}

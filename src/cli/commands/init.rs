//! `kitbag init` - write a fresh project configuration.

use crate::cli::args::InitArgs;
use crate::cli::commands::{Command, CommandResult};
use crate::config::{self, ProjectConfig};
use crate::error::Result;
use console::style;
use std::path::{Path, PathBuf};

/// Writes `kitbag.json`, refusing to clobber an existing one unless forced.
pub struct InitCommand {
    project_root: PathBuf,
    args: InitArgs,
}

impl InitCommand {
    pub fn new(project_root: &Path, args: InitArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }
}

impl Command for InitCommand {
    fn execute(&self) -> Result<CommandResult> {
        let path = config::config_path(&self.project_root);
        if path.exists() && !self.args.force {
            eprintln!(
                "{} {} already exists (use --force to overwrite)",
                style("error:").red().bold(),
                path.display()
            );
            return Ok(CommandResult::failure(1));
        }

        let mut config = ProjectConfig::default();
        if let Some(style_name) = &self.args.style {
            config.style = style_name.clone();
        }
        if let Some(icon_library) = &self.args.icon_library {
            config.icon_library = icon_library.clone();
        }
        if let Some(base_color) = &self.args.base_color {
            config.base_color = base_color.clone();
        }
        config.src_dir = self.args.src_dir;
        config.registries = self.args.registries.clone();

        config::save_config(&self.project_root, &config)?;

        println!(
            "{} wrote {} (style: {}, icons: {})",
            style("✓").green().bold(),
            path.display(),
            config.style,
            config.icon_library
        );

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args() -> InitArgs {
        InitArgs {
            style: None,
            icon_library: None,
            base_color: None,
            src_dir: false,
            registries: Vec::new(),
            force: false,
        }
    }

    #[test]
    fn init_writes_default_config() {
        let temp = TempDir::new().unwrap();
        let result = InitCommand::new(temp.path(), args()).execute().unwrap();

        assert!(result.success);
        let config = config::load_config(temp.path()).unwrap();
        assert_eq!(config.style, "slate");
    }

    #[test]
    fn init_refuses_to_clobber_without_force() {
        let temp = TempDir::new().unwrap();
        InitCommand::new(temp.path(), args()).execute().unwrap();

        let mut custom = ProjectConfig::default();
        custom.style = "brutal".to_string();
        config::save_config(temp.path(), &custom).unwrap();

        let result = InitCommand::new(temp.path(), args()).execute().unwrap();
        assert!(!result.success);
        assert_eq!(config::load_config(temp.path()).unwrap().style, "brutal");
    }

    #[test]
    fn init_force_overwrites() {
        let temp = TempDir::new().unwrap();
        InitCommand::new(temp.path(), args()).execute().unwrap();

        let forced = InitArgs {
            style: Some("brutal".to_string()),
            force: true,
            ..args()
        };
        let result = InitCommand::new(temp.path(), forced).execute().unwrap();

        assert!(result.success);
        assert_eq!(config::load_config(temp.path()).unwrap().style, "brutal");
    }
}

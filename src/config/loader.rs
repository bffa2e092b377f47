//! Reading and writing `kitbag.json`.
//!
//! The config is rewritten atomically (temp file + rename) so a crash
//! mid-write never leaves a truncated config behind. Output is always
//! 2-space indented JSON with a trailing newline; key order follows the
//! existing document because the parser preserves insertion order.

use crate::config::{ProjectConfig, CONFIG_FILE};
use crate::error::{KitbagError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Path of the config file for a project root.
pub fn config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_FILE)
}

/// Load the project config.
pub fn load_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = config_path(project_root);
    if !path.exists() {
        return Err(KitbagError::ConfigNotFound { path });
    }

    let content = fs::read_to_string(&path)?;
    serde_json::from_str(&content).map_err(|e| KitbagError::ConfigParseError {
        path,
        message: e.to_string(),
    })
}

/// Write the project config atomically.
pub fn save_config(project_root: &Path, config: &ProjectConfig) -> Result<()> {
    let path = config_path(project_root);
    let json = serde_json::to_string_pretty(config).map_err(|e| KitbagError::ConfigParseError {
        path: path.clone(),
        message: e.to_string(),
    })?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, format!("{}\n", json))?;
    fs::rename(&tmp, &path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_is_a_distinct_error() {
        let temp = TempDir::new().unwrap();
        let result = load_config(temp.path());
        assert!(matches!(result, Err(KitbagError::ConfigNotFound { .. })));
    }

    #[test]
    fn save_then_load_round_trips() {
        let temp = TempDir::new().unwrap();
        let mut config = ProjectConfig::default();
        config.style = "brutal".to_string();
        config.registries.push("https://ui.example.com/r".to_string());

        save_config(temp.path(), &config).unwrap();
        let loaded = load_config(temp.path()).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn output_is_two_space_indented_with_trailing_newline() {
        let temp = TempDir::new().unwrap();
        save_config(temp.path(), &ProjectConfig::default()).unwrap();

        let content = fs::read_to_string(config_path(temp.path())).unwrap();
        assert!(content.starts_with("{\n  \"style\""));
        assert!(content.ends_with("}\n"));
    }

    #[test]
    fn save_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        save_config(temp.path(), &ProjectConfig::default()).unwrap();

        let entries: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries, vec![CONFIG_FILE.to_string()]);
    }

    #[test]
    fn malformed_config_reports_parse_error() {
        let temp = TempDir::new().unwrap();
        fs::write(config_path(temp.path()), "{ nope").unwrap();

        let result = load_config(temp.path());
        assert!(matches!(result, Err(KitbagError::ConfigParseError { .. })));
    }
}

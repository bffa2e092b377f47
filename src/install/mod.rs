//! End-to-end install pipeline.
//!
//! One install run is: resolve the requested items, fold them into a tree,
//! transform every file for the consumer's style, icon library, and
//! aliases, materialize the files, and merge the new configuration back
//! into `kitbag.json`.
//!
//! Resolution and validation failures abort before anything touches disk.
//! Transform failures are collected per file so one bad file does not
//! block unrelated ones; the successfully transformed files are still
//! materialized and the failures surface in the report.

use crate::builtin;
use crate::config::{self, merger::ConfigFragment, MergeWarning, ProjectConfig};
use crate::error::{KitbagError, Result};
use crate::materialize::{Materializer, OutputFile, OverwritePolicy, WriteReport};
use crate::registry::item::FontSpec;
use crate::registry::{Registry, RemoteRegistry};
use crate::transform::{ImportRewrites, TransformContext};
use crate::tree::{self, PackageSpec, TreeWarning};
use std::collections::BTreeMap;
use std::path::Path;

/// Options for one install run.
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    pub policy: OverwritePolicy,
}

/// One file that failed transformation.
#[derive(Debug)]
pub struct TransformFailure {
    /// Target path of the failed file.
    pub target: String,
    pub error: KitbagError,
}

/// Outcome of one install run.
#[derive(Debug, Default)]
pub struct InstallReport {
    /// Resolved item names, in resolution order.
    pub items: Vec<String>,
    /// Per-file write outcomes.
    pub writes: WriteReport,
    /// Files that failed transformation and were not written.
    pub transform_failures: Vec<TransformFailure>,
    /// Conflicts recorded while folding items.
    pub tree_warnings: Vec<TreeWarning>,
    /// Values changed while merging into the project config.
    pub config_warnings: Vec<MergeWarning>,
    /// Packages the consumer still needs to install.
    pub dependencies: Vec<PackageSpec>,
    pub dev_dependencies: Vec<PackageSpec>,
    /// Environment defaults the resolved items expect.
    pub env_vars: BTreeMap<String, String>,
    /// Fonts the resolved items expect.
    pub fonts: Vec<FontSpec>,
}

impl InstallReport {
    /// Whether every file made it through transformation.
    pub fn is_success(&self) -> bool {
        self.transform_failures.is_empty()
    }
}

/// Build the registry for a project from its configuration.
pub fn registry_for(project_root: &Path, config: &ProjectConfig) -> Result<Registry> {
    let remotes = config
        .registries
        .iter()
        .map(RemoteRegistry::new)
        .collect();
    Registry::new(Some(project_root), remotes)
}

/// Canonical import-path rewrites for a project's aliases.
fn rewrites_for(config: &ProjectConfig) -> ImportRewrites {
    ImportRewrites::new()
        .rewrite("@/registry/ui", config.aliases.ui.clone())
        .rewrite("@/registry/hooks", config.aliases.hooks.clone())
        .rewrite("@/registry/lib", config.aliases.lib.clone())
        .rewrite("@/registry/blocks", config.aliases.components.clone())
        .rewrite("@/registry", config.aliases.components.clone())
        .strip("@/registry/example-helpers")
}

/// Run the full install pipeline for the named items.
pub fn install(
    project_root: &Path,
    item_names: &[String],
    options: &InstallOptions,
) -> Result<InstallReport> {
    let mut config = config::load_config(project_root)?;
    let registry = registry_for(project_root, &config)?;
    install_with(project_root, &registry, &mut config, item_names, options)
}

/// Install against a registry and config the caller already holds.
pub fn install_with(
    project_root: &Path,
    registry: &Registry,
    config: &mut ProjectConfig,
    item_names: &[String],
    options: &InstallOptions,
) -> Result<InstallReport> {
    // Resolution must complete before any transformation or write begins.
    let resolution = registry.resolve(item_names)?;
    tracing::info!(
        "Resolved {} item(s) for {} request(s)",
        resolution.items.len(),
        item_names.len()
    );

    let tree = tree::build_tree(&resolution)?;
    for warning in &tree.warnings {
        tracing::warn!("{}", warning);
    }

    let context = TransformContext {
        style_map: builtin::load_style_map(Some(project_root), &config.style)?,
        icon_library: builtin::load_icon_library(Some(project_root), &config.icon_library)?,
        rewrites: rewrites_for(config),
    };

    let mut outputs = Vec::new();
    let mut transform_failures = Vec::new();

    for file in &tree.files {
        let content = match &file.content {
            Some(content) => content,
            None => {
                transform_failures.push(TransformFailure {
                    target: file.target_path.clone(),
                    error: KitbagError::Schema {
                        name: file.item.clone(),
                        field: "files.content".to_string(),
                        message: format!("no content for '{}'", file.source_path),
                    },
                });
                continue;
            }
        };

        match context.transform(&file.target_path, content) {
            Ok(transformed) => outputs.push(OutputFile {
                target: file.target_path.clone(),
                kind: file.file_type,
                content: transformed,
            }),
            Err(error) => transform_failures.push(TransformFailure {
                target: file.target_path.clone(),
                error,
            }),
        }
    }

    let materializer = Materializer::new(project_root, config, options.policy);
    let writes = materializer.write_all(&outputs)?;

    let fragment = ConfigFragment {
        css_vars: tree.css_vars.clone(),
        ..Default::default()
    };
    let config_warnings = fragment.merge_into(config);
    config::save_config(project_root, config)?;

    Ok(InstallReport {
        items: resolution.names().iter().map(|s| s.to_string()).collect(),
        writes,
        transform_failures,
        tree_warnings: tree.warnings,
        config_warnings,
        dependencies: tree.dependencies,
        dev_dependencies: tree.dev_dependencies,
        env_vars: tree.env_vars,
        fonts: tree.fonts,
    })
}

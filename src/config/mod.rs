//! Consumer project configuration.
//!
//! A project that installs registry items keeps its settings in
//! `kitbag.json` at the project root: path aliases, the chosen visual
//! style and icon library, base color, RTL flag, and the registry sources
//! to resolve from. The file is read once per install, mutated in memory
//! by the merger, and written back atomically at the end.
//!
//! # Modules
//!
//! - [`loader`] - reading and atomically rewriting `kitbag.json`
//! - [`merger`] - deep-merge of config fragments and JSON documents

pub mod loader;
pub mod merger;

pub use loader::{config_path, load_config, save_config};
pub use merger::{deep_merge, ConfigFragment, MergeWarning};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the config file at the project root.
pub const CONFIG_FILE: &str = "kitbag.json";

/// Persisted consumer project settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Visual style name; selects the style map applied to sources.
    #[serde(default = "default_style")]
    pub style: String,

    /// Icon library identifier; selects the icon mapping table.
    #[serde(default = "default_icon_library")]
    pub icon_library: String,

    /// Base color for generated themes.
    #[serde(default = "default_base_color")]
    pub base_color: String,

    /// Whether the project renders right-to-left.
    #[serde(default)]
    pub rtl: bool,

    /// Whether project sources live under `src/`.
    #[serde(default)]
    pub src_dir: bool,

    /// Import path aliases of the consumer project.
    #[serde(default)]
    pub aliases: Aliases,

    /// Remote registry base URLs, in resolution order.
    #[serde(default)]
    pub registries: Vec<String>,

    /// CSS variables applied by previous installs, scope -> name -> value.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub css_vars: BTreeMap<String, BTreeMap<String, String>>,

    /// Keys written by other tools; round-tripped untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            style: default_style(),
            icon_library: default_icon_library(),
            base_color: default_base_color(),
            rtl: false,
            src_dir: false,
            aliases: Aliases::default(),
            registries: Vec::new(),
            css_vars: BTreeMap::new(),
            extra: serde_json::Map::new(),
        }
    }
}

fn default_style() -> String {
    "slate".to_string()
}

fn default_icon_library() -> String {
    "lucide".to_string()
}

fn default_base_color() -> String {
    "zinc".to_string()
}

/// Import path aliases used when rewriting registry sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Aliases {
    #[serde(default = "default_components_alias")]
    pub components: String,

    #[serde(default = "default_ui_alias")]
    pub ui: String,

    #[serde(default = "default_lib_alias")]
    pub lib: String,

    #[serde(default = "default_hooks_alias")]
    pub hooks: String,

    #[serde(default = "default_utils_alias")]
    pub utils: String,
}

impl Default for Aliases {
    fn default() -> Self {
        Self {
            components: default_components_alias(),
            ui: default_ui_alias(),
            lib: default_lib_alias(),
            hooks: default_hooks_alias(),
            utils: default_utils_alias(),
        }
    }
}

fn default_components_alias() -> String {
    "@/components".to_string()
}

fn default_ui_alias() -> String {
    "@/components/ui".to_string()
}

fn default_lib_alias() -> String {
    "@/lib".to_string()
}

fn default_hooks_alias() -> String {
    "@/hooks".to_string()
}

fn default_utils_alias() -> String {
    "@/lib/utils".to_string()
}

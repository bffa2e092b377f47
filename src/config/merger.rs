//! Deep merge for configuration values.
//!
//! Installs layer new configuration onto the consumer's existing settings.
//! This module implements the merge semantics for both the typed config
//! (via [`ConfigFragment`]) and raw JSON documents (via [`deep_merge`],
//! used when materializing mergeable config files).
//!
//! # Merge Rules
//!
//! - Objects are merged recursively; sibling keys are never discarded
//! - Arrays are merged by deduplication, not concatenation
//! - Scalars in the fragment replace scalars in the base
//! - A fragment never deletes a key the consumer already has

use crate::config::ProjectConfig;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Warning recorded when a merge changes an existing value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeWarning {
    /// Dotted path of the changed key, e.g. `cssVars.dark.accent`.
    pub path: String,
    pub previous: String,
    pub new: String,
}

impl fmt::Display for MergeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} changed from '{}' to '{}'",
            self.path, self.previous, self.new
        )
    }
}

/// New configuration produced by one install.
///
/// Scalar fields are only applied when explicitly set; `None` never clears
/// an existing value.
#[derive(Debug, Clone, Default)]
pub struct ConfigFragment {
    pub style: Option<String>,
    pub icon_library: Option<String>,
    pub base_color: Option<String>,
    pub rtl: Option<bool>,
    pub css_vars: BTreeMap<String, BTreeMap<String, String>>,
    pub registries: Vec<String>,
}

impl ConfigFragment {
    /// Merge this fragment into a config, returning warnings for every
    /// value that changed.
    pub fn merge_into(&self, config: &mut ProjectConfig) -> Vec<MergeWarning> {
        let mut warnings = Vec::new();

        if let Some(style) = &self.style {
            merge_scalar("style", &mut config.style, style, &mut warnings);
        }
        if let Some(icon_library) = &self.icon_library {
            merge_scalar(
                "iconLibrary",
                &mut config.icon_library,
                icon_library,
                &mut warnings,
            );
        }
        if let Some(base_color) = &self.base_color {
            merge_scalar("baseColor", &mut config.base_color, base_color, &mut warnings);
        }
        if let Some(rtl) = self.rtl {
            if config.rtl != rtl {
                warnings.push(MergeWarning {
                    path: "rtl".to_string(),
                    previous: config.rtl.to_string(),
                    new: rtl.to_string(),
                });
                config.rtl = rtl;
            }
        }

        for (scope, vars) in &self.css_vars {
            let merged_scope = config.css_vars.entry(scope.clone()).or_default();
            for (name, value) in vars {
                if let Some(previous) = merged_scope.get(name) {
                    if previous != value {
                        warnings.push(MergeWarning {
                            path: format!("cssVars.{}.{}", scope, name),
                            previous: previous.clone(),
                            new: value.clone(),
                        });
                    }
                }
                merged_scope.insert(name.clone(), value.clone());
            }
        }

        for registry in &self.registries {
            if !config.registries.contains(registry) {
                config.registries.push(registry.clone());
            }
        }

        warnings
    }
}

fn merge_scalar(path: &str, slot: &mut String, new: &str, warnings: &mut Vec<MergeWarning>) {
    if slot != new {
        warnings.push(MergeWarning {
            path: path.to_string(),
            previous: slot.clone(),
            new: new.to_string(),
        });
        *slot = new.to_string();
    }
}

/// Deep merge two JSON values.
///
/// Objects merge recursively without discarding sibling keys; arrays merge
/// by deduplication; anything else is replaced by the overlay.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            let mut result = base_map.clone();

            for (key, overlay_value) in overlay_map {
                match base_map.get(key) {
                    Some(base_value) => {
                        result.insert(key.clone(), deep_merge(base_value, overlay_value));
                    }
                    None => {
                        result.insert(key.clone(), overlay_value.clone());
                    }
                }
            }

            Value::Object(result)
        }

        (Value::Array(base_items), Value::Array(overlay_items)) => {
            let mut result = base_items.clone();
            for item in overlay_items {
                if !result.contains(item) {
                    result.push(item.clone());
                }
            }
            Value::Array(result)
        }

        (_, overlay) => overlay.clone(),
    }
}

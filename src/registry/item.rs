//! Registry item schema definitions.
//!
//! A registry item is one named, installable unit: its source files, the
//! other items it depends on, the packages it needs, and the style data
//! (CSS variables, fonts, env defaults) it contributes to the consumer
//! project. Items travel as JSON with camelCase keys.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One installable registry unit.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistryItem {
    /// Item name (must be unique within a registry).
    pub name: String,

    /// What kind of unit this is.
    #[serde(rename = "type")]
    pub kind: ItemKind,

    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,

    /// Source files this item installs, in order.
    #[serde(default)]
    pub files: Vec<RegistryFile>,

    /// Names of other registry items this item requires.
    #[serde(default)]
    pub registry_dependencies: Vec<String>,

    /// Runtime package specs (`name` or `name@range`).
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Build-time package specs.
    #[serde(default)]
    pub dev_dependencies: Vec<String>,

    /// Theme scope -> variable name -> value.
    #[serde(default)]
    pub css_vars: BTreeMap<String, BTreeMap<String, String>>,

    /// Environment variable name -> default value.
    #[serde(default)]
    pub env_vars: BTreeMap<String, String>,

    /// Fonts this item requires.
    #[serde(default)]
    pub fonts: Vec<FontSpec>,

    /// Free-form display metadata. Never affects resolution or transformation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl RegistryItem {
    /// Internal items are resolvable as dependencies but are not
    /// independently installable and are hidden from listings.
    pub fn is_internal(&self) -> bool {
        self.kind == ItemKind::Internal
    }
}

/// Item kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A UI primitive (button, input, dialog).
    Ui,
    /// A composed block built from primitives.
    Block,
    /// A usage example.
    Example,
    /// A full page.
    Page,
    /// A non-visual library helper.
    Lib,
    /// A reusable hook.
    Hook,
    /// A theme definition (CSS variables only, usually no files).
    Theme,
    /// Registry-internal helper, not independently installable.
    Internal,
}

impl ItemKind {
    /// Kind tag as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Ui => "ui",
            ItemKind::Block => "block",
            ItemKind::Example => "example",
            ItemKind::Page => "page",
            ItemKind::Lib => "lib",
            ItemKind::Hook => "hook",
            ItemKind::Theme => "theme",
            ItemKind::Internal => "internal",
        }
    }
}

/// One source file within a registry item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistryFile {
    /// Path of the file within the registry.
    pub source_path: String,

    /// Path to install to. May start with an alias segment (`@/...`)
    /// resolved against the consumer's path configuration.
    pub target_path: String,

    /// Role of the file in the consumer project.
    #[serde(default)]
    pub file_type: FileKind,

    /// Inline source text. Remote items must carry it; local items may
    /// omit it, in which case `sourcePath` is read from disk next to the
    /// item document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Role tag for an installed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    #[default]
    Component,
    Lib,
    Hook,
    Page,
    Style,
    Config,
}

impl FileKind {
    /// Whether files of this kind may be deep-merged instead of overwritten.
    pub fn is_mergeable(&self) -> bool {
        matches!(self, FileKind::Config)
    }
}

/// A font requirement contributed by an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FontSpec {
    /// Font family name, also the dedup key.
    pub family: String,

    /// Where the font comes from (e.g. `google`, `bunny`, `local`).
    #[serde(default = "default_font_provider")]
    pub provider: String,

    /// Requested weights, as strings so ranges like `100..900` survive.
    #[serde(default)]
    pub weights: Vec<String>,
}

fn default_font_provider() -> String {
    "google".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_item() {
        let json = r#"{
            "name": "button",
            "type": "ui",
            "files": [
                { "sourcePath": "ui/button.tsx", "targetPath": "@/components/ui/button.tsx" }
            ]
        }"#;
        let item: RegistryItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.name, "button");
        assert_eq!(item.kind, ItemKind::Ui);
        assert_eq!(item.files.len(), 1);
        assert_eq!(item.files[0].file_type, FileKind::Component);
        assert!(item.files[0].content.is_none());
        assert!(item.registry_dependencies.is_empty());
        assert!(item.css_vars.is_empty());
    }

    #[test]
    fn inline_file_content_is_parsed() {
        let json = r#"{
            "name": "utils",
            "type": "lib",
            "files": [{
                "sourcePath": "lib/utils.ts",
                "targetPath": "@/lib/utils.ts",
                "content": "export const cn = () => {}\n"
            }]
        }"#;
        let item: RegistryItem = serde_json::from_str(json).unwrap();
        assert_eq!(
            item.files[0].content.as_deref(),
            Some("export const cn = () => {}\n")
        );
    }

    #[test]
    fn parse_full_item() {
        let json = r##"{
            "name": "login-form",
            "type": "block",
            "description": "Login form with validation",
            "files": [
                { "sourcePath": "blocks/login-form.tsx", "targetPath": "@/components/login-form.tsx" },
                { "sourcePath": "blocks/login.css", "targetPath": "@/styles/login.css", "fileType": "style" }
            ],
            "registryDependencies": ["button", "input"],
            "dependencies": ["zod@^3.24.0"],
            "devDependencies": ["@types/node"],
            "cssVars": { "dark": { "accent": "#111" } },
            "envVars": { "AUTH_URL": "http://localhost:3000" },
            "fonts": [{ "family": "Inter", "weights": ["400", "600"] }],
            "meta": { "preview": { "width": 400 } }
        }"##;
        let item: RegistryItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind, ItemKind::Block);
        assert_eq!(item.registry_dependencies, vec!["button", "input"]);
        assert_eq!(item.files[1].file_type, FileKind::Style);
        assert_eq!(item.css_vars["dark"]["accent"], "#111");
        assert_eq!(item.fonts[0].provider, "google");
        assert!(item.meta.is_some());
    }

    #[test]
    fn unknown_kind_tag_is_rejected() {
        let json = r#"{ "name": "x", "type": "gizmo" }"#;
        assert!(serde_json::from_str::<RegistryItem>(json).is_err());
    }

    #[test]
    fn internal_items_are_flagged() {
        let json = r#"{ "name": "chart-helpers", "type": "internal" }"#;
        let item: RegistryItem = serde_json::from_str(json).unwrap();
        assert!(item.is_internal());
    }

    #[test]
    fn config_files_are_mergeable() {
        assert!(FileKind::Config.is_mergeable());
        assert!(!FileKind::Component.is_mergeable());
    }

    #[test]
    fn json_schema_reflects_wire_shape() {
        // Registry authors validate their documents against this schema.
        let schema = schemars::schema_for!(RegistryItem);
        let json = serde_json::to_value(&schema).unwrap();
        let properties = json["properties"].as_object().unwrap();
        assert!(properties.contains_key("registryDependencies"));
        assert!(properties.contains_key("cssVars"));
        assert!(properties.contains_key("type"));
    }

    #[test]
    fn item_round_trips_through_json() {
        let json = r##"{
            "name": "badge",
            "type": "ui",
            "files": [{ "sourcePath": "ui/badge.tsx", "targetPath": "@/components/ui/badge.tsx" }],
            "cssVars": { "light": { "badge-bg": "#eee" } }
        }"##;
        let item: RegistryItem = serde_json::from_str(json).unwrap();
        let out = serde_json::to_string(&item).unwrap();
        let back: RegistryItem = serde_json::from_str(&out).unwrap();
        assert_eq!(back.name, item.name);
        assert_eq!(back.css_vars, item.css_vars);
    }
}

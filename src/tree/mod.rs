//! Aggregate result of folding resolved registry items.
//!
//! The tree builder collapses the resolved item set into one merged view:
//! files deduplicated by target path, package dependencies deduplicated by
//! name, CSS variables deep-merged, fonts and env defaults deduplicated.
//! Folding is purely functional — the same item set always produces the
//! same tree, which is what makes re-running an install idempotent before
//! any transformation happens.

pub mod builder;

pub use builder::build_tree;

use crate::registry::item::{FileKind, FontSpec};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// One file scheduled for installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeFile {
    /// Path of the file within its registry.
    pub source_path: String,
    /// Aliased target path, not yet resolved against the consumer config.
    pub target_path: String,
    /// Role of the file in the consumer project.
    pub file_type: FileKind,
    /// Name of the item that contributed the file.
    pub item: String,
    /// Source text, when the item carried or resolved it.
    pub content: Option<String>,
}

/// A package dependency, split into name and optional version range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageSpec {
    pub name: String,
    pub range: Option<String>,
}

impl PackageSpec {
    /// Parse `name` or `name@range`; scoped names (`@scope/pkg@range`)
    /// split on the last `@`.
    pub fn parse(spec: &str) -> Self {
        // Skip the first byte so a scope's leading `@` never splits.
        match spec.get(1..).and_then(|tail| tail.rfind('@')) {
            Some(i) => {
                let at = i + 1;
                Self {
                    name: spec[..at].to_string(),
                    range: Some(spec[at + 1..].to_string()),
                }
            }
            None => Self {
                name: spec.to_string(),
                range: None,
            },
        }
    }
}

impl fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.range {
            Some(range) => write!(f, "{}@{}", self.name, range),
            None => write!(f, "{}", self.name),
        }
    }
}

/// The merged aggregate of a resolved item set.
#[derive(Debug, Clone, Default)]
pub struct ResolvedTree {
    /// Files in deterministic install order, deduplicated by target path.
    pub files: Vec<TreeFile>,
    /// Runtime packages, deduplicated by name.
    pub dependencies: Vec<PackageSpec>,
    /// Build-time packages, deduplicated by name.
    pub dev_dependencies: Vec<PackageSpec>,
    /// Theme scope -> variable -> value, deep-merged across items.
    pub css_vars: BTreeMap<String, BTreeMap<String, String>>,
    /// Environment defaults, first writer wins.
    pub env_vars: BTreeMap<String, String>,
    /// Fonts deduplicated by family.
    pub fonts: Vec<FontSpec>,
    /// Non-fatal conflicts observed during the fold.
    pub warnings: Vec<TreeWarning>,
}

/// Non-fatal conflict recorded while folding items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeWarning {
    /// Two items defined the same CSS variable with different values.
    CssVarRedefined {
        scope: String,
        name: String,
        previous: String,
        kept: String,
    },
    /// Two items requested the same package with different ranges.
    DependencyConflict {
        package: String,
        kept: String,
        discarded: String,
        /// Whether the two requirements cannot both be satisfied.
        incompatible: bool,
    },
    /// Two items shipped different defaults for one environment variable.
    EnvVarConflict {
        name: String,
        kept: String,
        ignored: String,
    },
}

impl fmt::Display for TreeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeWarning::CssVarRedefined {
                scope,
                name,
                previous,
                kept,
            } => write!(
                f,
                "CSS variable {}.{} redefined: '{}' replaces '{}'",
                scope, name, kept, previous
            ),
            TreeWarning::DependencyConflict {
                package,
                kept,
                discarded,
                incompatible,
            } => {
                if *incompatible {
                    write!(
                        f,
                        "Incompatible version ranges for {}: kept '{}', discarded '{}'",
                        package, kept, discarded
                    )
                } else {
                    write!(
                        f,
                        "Version range conflict for {}: kept '{}', discarded '{}'",
                        package, kept, discarded
                    )
                }
            }
            TreeWarning::EnvVarConflict {
                name,
                kept,
                ignored,
            } => write!(
                f,
                "Environment default {} already set to '{}', ignoring '{}'",
                name, kept, ignored
            ),
        }
    }
}

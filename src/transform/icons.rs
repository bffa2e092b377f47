//! Icon placeholder rewriting.
//!
//! Registry sources reference icons through one canonical placeholder
//! element, `<RegistryIcon name="search" />`, so the same source can serve
//! any icon library. This transform resolves each placeholder through the
//! consumer's configured library table, replaces the element with the
//! mapped component, emits one deduplicated import per needed export, and
//! removes the placeholder import once nothing uses it.
//!
//! The pass is structural: it works on scanned import statements and JSX
//! elements, not raw text, so identifiers that merely contain the
//! placeholder name are never touched.

use crate::error::{KitbagError, Result};
use crate::transform::scanner::{self, ImportStatement, Span};
use crate::transform::{apply_edits, statement_removal_span, Edit};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Tag name of the canonical icon placeholder element.
pub const ICON_PLACEHOLDER: &str = "RegistryIcon";

/// Mapping table for one icon library.
#[derive(Debug, Clone, Deserialize)]
pub struct IconLibrary {
    /// Library identifier (e.g. `lucide`).
    #[serde(default)]
    pub name: String,
    /// Package the icons are imported from (e.g. `lucide-react`).
    pub package: String,
    /// Canonical icon name -> the library's export name.
    pub icons: BTreeMap<String, String>,
}

impl IconLibrary {
    /// Parse a library table from JSON. `label` names the source in errors.
    pub fn parse(label: &str, json: &str) -> Result<Self> {
        let mut library: IconLibrary =
            serde_json::from_str(json).map_err(|e| KitbagError::ConfigParseError {
                path: PathBuf::from(label),
                message: e.to_string(),
            })?;
        if library.name.is_empty() {
            library.name = PathBuf::from(label)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| label.to_string());
        }
        Ok(library)
    }

    /// Export name for a canonical icon, if the library maps it.
    pub fn export_for(&self, icon: &str) -> Option<&str> {
        self.icons.get(icon).map(String::as_str)
    }
}

/// Rewrite every icon placeholder in `source` for the given library.
///
/// `file` names the file in errors. Sources without placeholders are
/// returned unchanged, which keeps the pass idempotent: transformed output
/// contains no placeholder elements to match.
pub fn transform_icons(file: &str, source: &str, library: &IconLibrary) -> Result<String> {
    let elements = scanner::scan_jsx_elements(source, ICON_PLACEHOLDER)
        .map_err(|e| scan_error(file, e))?;
    if elements.is_empty() {
        return Ok(source.to_string());
    }

    let imports = scanner::scan_imports(source).map_err(|e| scan_error(file, e))?;

    let mut edits: Vec<Edit> = Vec::new();
    let mut needed: BTreeSet<&str> = BTreeSet::new();

    for element in &elements {
        let name_attr = element.attribute("name").ok_or_else(|| KitbagError::Transform {
            file: file.to_string(),
            message: format!("<{}> element is missing a 'name' attribute", ICON_PLACEHOLDER),
        })?;
        let icon = name_attr
            .string_value
            .as_deref()
            .ok_or_else(|| KitbagError::Transform {
                file: file.to_string(),
                message: format!(
                    "<{}> requires a literal name, not an expression",
                    ICON_PLACEHOLDER
                ),
            })?;

        let export = library
            .export_for(icon)
            .ok_or_else(|| KitbagError::UnmappedIcon {
                icon: icon.to_string(),
                library: library.name.clone(),
                file: file.to_string(),
            })?;
        needed.insert(export);

        // Swap the tag names, drop the name attribute, keep everything else.
        edits.push(Edit {
            span: element.name_span,
            text: export.to_string(),
        });
        if let Some(close) = element.close_name_span {
            edits.push(Edit {
                span: close,
                text: export.to_string(),
            });
        }
        edits.push(Edit {
            span: attribute_removal_span(source, name_attr.span),
            text: String::new(),
        });
    }

    // Imports the source already has from the target package stay as-is.
    let mut to_import: Vec<&str> = needed
        .iter()
        .copied()
        .filter(|&export| {
            !imports
                .iter()
                .any(|i| !i.reexport && i.specifier == library.package && i.binds(export))
        })
        .collect();

    for &export in &to_import {
        if let Some(conflict) = imports
            .iter()
            .find(|i| !i.reexport && i.specifier != library.package && i.binds(export))
        {
            return Err(KitbagError::Transform {
                file: file.to_string(),
                message: format!(
                    "icon import '{}' collides with an existing import from \"{}\"",
                    export, conflict.specifier
                ),
            });
        }
    }

    let placeholder_imports: Vec<&ImportStatement> = imports
        .iter()
        .filter(|i| !i.reexport && i.binds(ICON_PLACEHOLDER))
        .collect();

    // The new import goes where the placeholder import was, keeping import
    // order stable; sources without one get it after the last import.
    let mut new_import = String::new();
    if !to_import.is_empty() {
        to_import.sort_unstable();
        new_import = format!(
            "import {{ {} }} from \"{}\"",
            to_import.join(", "),
            library.package
        );
    }

    let mut import_inserted = false;
    for &placeholder in &placeholder_imports {
        let only_placeholder = placeholder.named.len() == 1
            && placeholder.default.is_none()
            && placeholder.namespace.is_none();

        if only_placeholder {
            if !import_inserted && !new_import.is_empty() {
                edits.push(Edit {
                    span: placeholder.span,
                    text: statement_with_semicolon(source, placeholder, &new_import),
                });
                import_inserted = true;
            } else {
                edits.push(Edit {
                    span: statement_removal_span(source, placeholder.span),
                    text: String::new(),
                });
            }
        } else {
            // The statement also binds other names; drop just the
            // placeholder binding.
            edits.push(Edit {
                span: placeholder.span,
                text: rebuild_import_without(source, placeholder, ICON_PLACEHOLDER),
            });
        }
    }

    if !import_inserted && !new_import.is_empty() {
        let insert_at = imports
            .iter()
            .filter(|i| !i.reexport)
            .map(|i| i.span.end)
            .max()
            .unwrap_or(0);
        let text = if insert_at == 0 {
            format!("{}\n", new_import)
        } else {
            format!("\n{}", new_import)
        };
        edits.push(Edit {
            span: Span {
                start: insert_at,
                end: insert_at,
            },
            text,
        });
    }

    Ok(apply_edits(source, edits))
}

/// Widen an attribute span to swallow the whitespace before it.
fn attribute_removal_span(source: &str, span: Span) -> Span {
    let mut start = span.start;
    while start > 0 && source.as_bytes()[start - 1].is_ascii_whitespace() {
        start -= 1;
    }
    Span {
        start,
        end: span.end,
    }
}

/// Wrap a scan failure with the file it happened in.
fn scan_error(file: &str, e: scanner::ScanError) -> KitbagError {
    KitbagError::Transform {
        file: file.to_string(),
        message: e.to_string(),
    }
}

/// Match the original statement's semicolon style.
fn statement_with_semicolon(source: &str, original: &ImportStatement, text: &str) -> String {
    if original.span.slice(source).trim_end().ends_with(';') {
        format!("{};", text)
    } else {
        text.to_string()
    }
}

/// Re-emit an import statement without one named binding.
fn rebuild_import_without(source: &str, import: &ImportStatement, binding: &str) -> String {
    let mut clauses = Vec::new();
    if let Some(default) = &import.default {
        clauses.push(default.clone());
    }
    if let Some(namespace) = &import.namespace {
        clauses.push(format!("* as {}", namespace));
    }
    let named: Vec<String> = import
        .named
        .iter()
        .filter(|b| b.local_name() != binding)
        .map(|b| match &b.alias {
            Some(alias) => format!("{} as {}", b.name, alias),
            None => b.name.clone(),
        })
        .collect();
    if !named.is_empty() {
        clauses.push(format!("{{ {} }}", named.join(", ")));
    }

    let rebuilt = format!("import {} from \"{}\"", clauses.join(", "), import.specifier);
    statement_with_semicolon(source, import, &rebuilt)
}

//! Registry item schema validation.
//!
//! Raw registry JSON is an untrusted boundary: it is checked field by field
//! before any resolver logic touches it. Validation collects every violation
//! for an item rather than stopping at the first, so registry authors can
//! fix a batch of problems in one pass.

use crate::error::{KitbagError, Result};
use crate::registry::item::RegistryItem;
use serde_json::Value;
use std::collections::HashSet;

/// A single schema violation with the path of the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted path into the item JSON, e.g. `files[2].targetPath`.
    pub field: String,
    /// Human-readable description of the violation.
    pub message: String,
}

/// Kind tags accepted on the wire.
const KNOWN_KINDS: &[&str] = &[
    "ui", "block", "example", "page", "lib", "hook", "theme", "internal",
];

/// Validate a raw JSON value into a typed [`RegistryItem`].
///
/// Returns a [`KitbagError::Schema`] naming the first offending field and
/// carrying the total violation count when more than one was found.
pub fn validate_item(raw: &Value) -> Result<RegistryItem> {
    match check_item(raw) {
        Ok(item) => Ok(item),
        Err(issues) => {
            let name = raw
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("<unnamed>")
                .to_string();
            let first = &issues[0];
            let message = if issues.len() == 1 {
                first.message.clone()
            } else {
                format!("{} (and {} more issue(s))", first.message, issues.len() - 1)
            };
            Err(KitbagError::Schema {
                name,
                field: first.field.clone(),
                message,
            })
        }
    }
}

/// Validate a raw JSON value, returning every violation found.
pub fn check_item(raw: &Value) -> std::result::Result<RegistryItem, Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    let obj = match raw.as_object() {
        Some(obj) => obj,
        None => {
            return Err(vec![ValidationIssue {
                field: ".".to_string(),
                message: "registry item must be a JSON object".to_string(),
            }]);
        }
    };

    check_name(obj, &mut issues);
    check_kind(obj, &mut issues);
    check_files(obj, &mut issues);
    check_css_vars(obj, &mut issues);

    if !issues.is_empty() {
        return Err(issues);
    }

    // Structural checks passed; let serde handle the full shape.
    serde_json::from_value(raw.clone()).map_err(|e| {
        vec![ValidationIssue {
            field: ".".to_string(),
            message: e.to_string(),
        }]
    })
}

fn check_name(obj: &serde_json::Map<String, Value>, issues: &mut Vec<ValidationIssue>) {
    match obj.get("name") {
        None => issues.push(ValidationIssue {
            field: "name".to_string(),
            message: "required field is missing".to_string(),
        }),
        Some(Value::String(s)) if s.trim().is_empty() => issues.push(ValidationIssue {
            field: "name".to_string(),
            message: "must not be empty".to_string(),
        }),
        Some(Value::String(s)) if s.chars().any(char::is_whitespace) => {
            issues.push(ValidationIssue {
                field: "name".to_string(),
                message: "must not contain whitespace".to_string(),
            })
        }
        Some(Value::String(_)) => {}
        Some(_) => issues.push(ValidationIssue {
            field: "name".to_string(),
            message: "must be a string".to_string(),
        }),
    }
}

fn check_kind(obj: &serde_json::Map<String, Value>, issues: &mut Vec<ValidationIssue>) {
    match obj.get("type") {
        None => issues.push(ValidationIssue {
            field: "type".to_string(),
            message: "required field is missing".to_string(),
        }),
        Some(Value::String(s)) if !KNOWN_KINDS.contains(&s.as_str()) => {
            issues.push(ValidationIssue {
                field: "type".to_string(),
                message: format!(
                    "unknown kind '{}' (expected one of: {})",
                    s,
                    KNOWN_KINDS.join(", ")
                ),
            })
        }
        Some(Value::String(_)) => {}
        Some(_) => issues.push(ValidationIssue {
            field: "type".to_string(),
            message: "must be a string".to_string(),
        }),
    }
}

fn check_files(obj: &serde_json::Map<String, Value>, issues: &mut Vec<ValidationIssue>) {
    let files = match obj.get("files") {
        None => return,
        Some(Value::Array(files)) => files,
        Some(_) => {
            issues.push(ValidationIssue {
                field: "files".to_string(),
                message: "must be an array".to_string(),
            });
            return;
        }
    };

    let mut seen_targets: HashSet<&str> = HashSet::new();

    for (i, file) in files.iter().enumerate() {
        let obj = match file.as_object() {
            Some(obj) => obj,
            None => {
                issues.push(ValidationIssue {
                    field: format!("files[{}]", i),
                    message: "must be an object".to_string(),
                });
                continue;
            }
        };

        for key in ["sourcePath", "targetPath"] {
            match obj.get(key) {
                None => issues.push(ValidationIssue {
                    field: format!("files[{}].{}", i, key),
                    message: "required field is missing".to_string(),
                }),
                Some(Value::String(s)) if s.trim().is_empty() => {
                    issues.push(ValidationIssue {
                        field: format!("files[{}].{}", i, key),
                        message: "must not be empty".to_string(),
                    })
                }
                Some(Value::String(_)) => {}
                Some(_) => issues.push(ValidationIssue {
                    field: format!("files[{}].{}", i, key),
                    message: "must be a string".to_string(),
                }),
            }
        }

        // A single item must not target one output path twice.
        if let Some(target) = obj.get("targetPath").and_then(Value::as_str) {
            if !target.trim().is_empty() && !seen_targets.insert(target) {
                issues.push(ValidationIssue {
                    field: format!("files[{}].targetPath", i),
                    message: format!("duplicate target path '{}' within item", target),
                });
            }
        }
    }
}

fn check_css_vars(obj: &serde_json::Map<String, Value>, issues: &mut Vec<ValidationIssue>) {
    let scopes = match obj.get("cssVars") {
        None => return,
        Some(Value::Object(scopes)) => scopes,
        Some(_) => {
            issues.push(ValidationIssue {
                field: "cssVars".to_string(),
                message: "must be an object of scope -> variables".to_string(),
            });
            return;
        }
    };

    for (scope, vars) in scopes {
        if scope.trim().is_empty() || scope.chars().any(char::is_whitespace) {
            issues.push(ValidationIssue {
                field: format!("cssVars.{}", scope),
                message: "scope name must be a single non-empty token".to_string(),
            });
        }
        if !vars.is_object() {
            issues.push(ValidationIssue {
                field: format!("cssVars.{}", scope),
                message: "scope must map variable names to string values".to_string(),
            });
        } else if let Some(vars) = vars.as_object() {
            for (name, value) in vars {
                if !value.is_string() {
                    issues.push(ValidationIssue {
                        field: format!("cssVars.{}.{}", scope, name),
                        message: "variable value must be a string".to_string(),
                    });
                }
            }
        }
    }
}

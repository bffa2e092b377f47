//! Folding a resolved item set into one [`ResolvedTree`].

use crate::error::{KitbagError, Result};
use crate::registry::item::FontSpec;
use crate::registry::resolver::Resolution;
use crate::tree::{PackageSpec, ResolvedTree, TreeFile, TreeWarning};
use semver::{Version, VersionReq};
use std::collections::HashMap;

/// Fold a resolution into the merged tree.
///
/// Items are folded in resolution order, so every merge rule that says
/// "last wins" means "the item visited last wins". A target-path collision
/// between two distinct source files is an error, never a silent overwrite.
pub fn build_tree(resolution: &Resolution) -> Result<ResolvedTree> {
    let mut tree = ResolvedTree::default();
    let mut file_index: HashMap<String, usize> = HashMap::new();
    let mut dep_index: HashMap<String, usize> = HashMap::new();
    let mut dev_dep_index: HashMap<String, usize> = HashMap::new();

    for resolved in &resolution.items {
        let item = &resolved.item;

        for file in &item.files {
            match file_index.get(&file.target_path) {
                None => {
                    file_index.insert(file.target_path.clone(), tree.files.len());
                    tree.files.push(TreeFile {
                        source_path: file.source_path.clone(),
                        target_path: file.target_path.clone(),
                        file_type: file.file_type,
                        item: item.name.clone(),
                        content: file.content.clone(),
                    });
                }
                Some(&i) => {
                    let existing = &mut tree.files[i];
                    if existing.source_path == file.source_path {
                        // Same registry file referenced twice: last writer wins.
                        existing.item = item.name.clone();
                        existing.file_type = file.file_type;
                        if file.content.is_some() {
                            existing.content = file.content.clone();
                        }
                    } else {
                        return Err(KitbagError::TargetCollision {
                            target: file.target_path.clone(),
                            first: existing.source_path.clone(),
                            second: file.source_path.clone(),
                        });
                    }
                }
            }
        }

        for spec in &item.dependencies {
            merge_package(
                PackageSpec::parse(spec),
                &mut tree.dependencies,
                &mut dep_index,
                &mut tree.warnings,
            );
        }
        for spec in &item.dev_dependencies {
            merge_package(
                PackageSpec::parse(spec),
                &mut tree.dev_dependencies,
                &mut dev_dep_index,
                &mut tree.warnings,
            );
        }

        for (scope, vars) in &item.css_vars {
            let merged_scope = tree.css_vars.entry(scope.clone()).or_default();
            for (name, value) in vars {
                if let Some(previous) = merged_scope.get(name) {
                    if previous != value {
                        tree.warnings.push(TreeWarning::CssVarRedefined {
                            scope: scope.clone(),
                            name: name.clone(),
                            previous: previous.clone(),
                            kept: value.clone(),
                        });
                    }
                }
                merged_scope.insert(name.clone(), value.clone());
            }
        }

        for (name, value) in &item.env_vars {
            match tree.env_vars.get(name) {
                None => {
                    tree.env_vars.insert(name.clone(), value.clone());
                }
                Some(kept) if kept != value => {
                    tree.warnings.push(TreeWarning::EnvVarConflict {
                        name: name.clone(),
                        kept: kept.clone(),
                        ignored: value.clone(),
                    });
                }
                Some(_) => {}
            }
        }

        for font in &item.fonts {
            merge_font(font, &mut tree.fonts);
        }
    }

    Ok(tree)
}

/// Merge one package spec into the deduplicated list.
///
/// On a range conflict the most specific (non-wildcard) range is kept;
/// equally specific but different ranges keep the later one. Either way a
/// warning is recorded, flagged as incompatible when the two requirements
/// cannot both be satisfied.
fn merge_package(
    incoming: PackageSpec,
    packages: &mut Vec<PackageSpec>,
    index: &mut HashMap<String, usize>,
    warnings: &mut Vec<TreeWarning>,
) {
    match index.get(&incoming.name) {
        None => {
            index.insert(incoming.name.clone(), packages.len());
            packages.push(incoming);
        }
        Some(&i) => {
            let existing = &mut packages[i];
            if existing.range == incoming.range {
                return;
            }

            let incompatible = ranges_incompatible(
                existing.range.as_deref(),
                incoming.range.as_deref(),
            );
            let keep_incoming =
                specificity(incoming.range.as_deref()) >= specificity(existing.range.as_deref());

            let (kept, discarded) = if keep_incoming {
                let discarded = std::mem::replace(existing, incoming);
                (packages[i].clone(), discarded)
            } else {
                (existing.clone(), incoming)
            };

            warnings.push(TreeWarning::DependencyConflict {
                package: kept.name.clone(),
                kept: kept.range.unwrap_or_else(|| "*".to_string()),
                discarded: discarded.range.unwrap_or_else(|| "*".to_string()),
                incompatible,
            });
        }
    }
}

/// How constraining a version range is: exact pin > bounded range > wildcard.
fn specificity(range: Option<&str>) -> u8 {
    match range {
        None => 0,
        Some(r) if matches!(r, "*" | "x" | "latest") => 0,
        Some(r) if Version::parse(r.trim_start_matches('=')).is_ok() => 2,
        Some(_) => 1,
    }
}

/// Best-effort incompatibility check between two version ranges.
///
/// Only pins are decidable without a full range-intersection algorithm:
/// two different pins conflict, and a pin outside the other side's parsed
/// requirement conflicts. Everything else is treated as compatible.
fn ranges_incompatible(a: Option<&str>, b: Option<&str>) -> bool {
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) => (a, b),
        _ => return false,
    };

    let pin_a = Version::parse(a.trim_start_matches('='));
    let pin_b = Version::parse(b.trim_start_matches('='));

    match (&pin_a, &pin_b) {
        (Ok(va), Ok(vb)) => va != vb,
        (Ok(va), Err(_)) => VersionReq::parse(b).map(|req| !req.matches(va)).unwrap_or(false),
        (Err(_), Ok(vb)) => VersionReq::parse(a).map(|req| !req.matches(vb)).unwrap_or(false),
        (Err(_), Err(_)) => false,
    }
}

/// Dedupe fonts by family, taking the union of requested weights.
fn merge_font(incoming: &FontSpec, fonts: &mut Vec<FontSpec>) {
    match fonts.iter_mut().find(|f| f.family == incoming.family) {
        None => fonts.push(incoming.clone()),
        Some(existing) => {
            for weight in &incoming.weights {
                if !existing.weights.contains(weight) {
                    existing.weights.push(weight.clone());
                }
            }
        }
    }
}

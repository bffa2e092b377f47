//! Writing transformed files into the consumer project.
//!
//! The materializer is the only component (besides the config loader) that
//! mutates the consumer project on disk. It resolves aliased target paths
//! against the project's path configuration, refuses anything that would
//! land outside the project root, creates parent directories, and applies
//! the configured overwrite policy per file.
//!
//! Writes are not transactional: on failure, files already written stay in
//! place and the error carries the written / not-written lists so the
//! caller can decide on cleanup.

use crate::config::{merger, ProjectConfig};
use crate::error::{KitbagError, Result};
use crate::registry::item::FileKind;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Canonical registry alias prefixes and the consumer alias each maps to.
fn canonical_alias_targets(config: &ProjectConfig) -> Vec<(&'static str, &str)> {
    vec![
        ("@/registry/ui", config.aliases.ui.as_str()),
        ("@/registry/hooks", config.aliases.hooks.as_str()),
        ("@/registry/lib", config.aliases.lib.as_str()),
        ("@/registry/blocks", config.aliases.components.as_str()),
        ("@/registry", config.aliases.components.as_str()),
    ]
}

/// How to treat a target file that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    /// Replace unconditionally.
    Overwrite,
    /// Leave existing files untouched and report them as skipped.
    #[default]
    SkipExisting,
    /// Deep-merge structured config files; skip everything else.
    MergeIfMergeable,
}

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Created fresh.
    Written,
    /// Existed with different content and was replaced.
    Overwritten,
    /// Existed with byte-identical content; nothing to do.
    Unchanged,
    /// Existed with consumer modifications and was left untouched.
    Skipped,
    /// Existing JSON config was deep-merged with the incoming fragment.
    Merged,
}

/// One file scheduled for materialization, post-transformation.
#[derive(Debug, Clone)]
pub struct OutputFile {
    /// Aliased target path from the resolved tree.
    pub target: String,
    pub kind: FileKind,
    pub content: String,
}

/// Per-file record in a write report.
#[derive(Debug, Clone)]
pub struct WriteEntry {
    /// Aliased target path as given.
    pub target: String,
    /// Resolved filesystem path.
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

/// Result of one materialization run.
#[derive(Debug, Clone, Default)]
pub struct WriteReport {
    pub entries: Vec<WriteEntry>,
}

impl WriteReport {
    /// Targets that were written, overwritten, or merged.
    pub fn written(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| {
                matches!(
                    e.outcome,
                    FileOutcome::Written | FileOutcome::Overwritten | FileOutcome::Merged
                )
            })
            .map(|e| e.target.as_str())
            .collect()
    }

    /// Targets left untouched because the consumer had modified them.
    pub fn skipped(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.outcome == FileOutcome::Skipped)
            .map(|e| e.target.as_str())
            .collect()
    }
}

/// Writes output files under one project root.
pub struct Materializer<'a> {
    root: &'a Path,
    config: &'a ProjectConfig,
    policy: OverwritePolicy,
}

impl<'a> Materializer<'a> {
    pub fn new(root: &'a Path, config: &'a ProjectConfig, policy: OverwritePolicy) -> Self {
        Self {
            root,
            config,
            policy,
        }
    }

    /// Resolve an aliased target path to a filesystem path under the root.
    ///
    /// Canonical registry aliases map to the consumer's configured aliases
    /// first; any remaining `@/` prefix is anchored at the source base
    /// (`src/` when the project uses one). Paths that would escape the
    /// project root are refused.
    pub fn resolve_target(&self, target: &str) -> Result<PathBuf> {
        let mut resolved = target.to_string();

        for (canonical, alias) in canonical_alias_targets(self.config) {
            if let Some(rest) = strip_segment_prefix(&resolved, canonical) {
                resolved = format!("{}{}", alias, rest);
                break;
            }
        }

        let relative = if let Some(rest) = resolved.strip_prefix("@/") {
            if self.config.src_dir {
                format!("src/{}", rest)
            } else {
                rest.to_string()
            }
        } else if let Some(rest) = resolved.strip_prefix("~/") {
            rest.to_string()
        } else {
            resolved
        };

        safe_join(self.root, &relative)
    }

    /// Write every file under the configured policy.
    ///
    /// Stops at the first filesystem failure and reports it with the
    /// written / not-written lists; files already on disk stay there.
    pub fn write_all(&self, files: &[OutputFile]) -> Result<WriteReport> {
        let mut report = WriteReport::default();

        for (index, file) in files.iter().enumerate() {
            let path = self.resolve_target(&file.target)?;

            match self.write_one(file, &path) {
                Ok(outcome) => {
                    tracing::debug!("{:?}: {}", outcome, file.target);
                    report.entries.push(WriteEntry {
                        target: file.target.clone(),
                        path,
                        outcome,
                    });
                }
                Err(e) => {
                    return Err(KitbagError::Write {
                        failed: file.target.clone(),
                        message: e.to_string(),
                        written: report.written().iter().map(|s| s.to_string()).collect(),
                        not_written: files[index..]
                            .iter()
                            .map(|f| f.target.clone())
                            .collect(),
                    });
                }
            }
        }

        Ok(report)
    }

    fn write_one(&self, file: &OutputFile, path: &Path) -> std::io::Result<FileOutcome> {
        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &file.content)?;
            return Ok(FileOutcome::Written);
        }

        let existing = fs::read(path)?;
        if content_digest(&existing) == content_digest(file.content.as_bytes()) {
            return Ok(FileOutcome::Unchanged);
        }

        match self.policy {
            OverwritePolicy::Overwrite => {
                fs::write(path, &file.content)?;
                Ok(FileOutcome::Overwritten)
            }
            OverwritePolicy::SkipExisting => Ok(FileOutcome::Skipped),
            OverwritePolicy::MergeIfMergeable => {
                if !file.kind.is_mergeable() {
                    return Ok(FileOutcome::Skipped);
                }
                let base: serde_json::Value = match serde_json::from_slice(&existing) {
                    Ok(value) => value,
                    Err(_) => return Ok(FileOutcome::Skipped),
                };
                let overlay: serde_json::Value = match serde_json::from_str(&file.content) {
                    Ok(value) => value,
                    Err(_) => return Ok(FileOutcome::Skipped),
                };
                let merged = merger::deep_merge(&base, &overlay);
                let json = serde_json::to_string_pretty(&merged)
                    .map_err(|e| std::io::Error::other(e.to_string()))?;
                fs::write(path, format!("{}\n", json))?;
                Ok(FileOutcome::Merged)
            }
        }
    }
}

/// Digest used to tell consumer-modified files from identical rewrites.
fn content_digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Strip `prefix` from `path` when it matches a whole path segment.
fn strip_segment_prefix<'p>(path: &'p str, prefix: &str) -> Option<&'p str> {
    match path.strip_prefix(prefix) {
        Some("") => Some(""),
        Some(rest) if rest.starts_with('/') => Some(rest),
        _ => None,
    }
}

/// Join a relative path onto the root, refusing traversal outside it.
fn safe_join(root: &Path, relative: &str) -> Result<PathBuf> {
    let mut path = root.to_path_buf();

    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::CurDir => {}
            _ => {
                return Err(KitbagError::PathEscapesRoot {
                    path: PathBuf::from(relative),
                });
            }
        }
    }

    Ok(path)
}

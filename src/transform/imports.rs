//! Import path rewriting.
//!
//! Registry sources import their own files through canonical alias paths
//! (`@/registry/ui/button`). In the consumer project those files live under
//! the consumer's configured aliases instead, so every matching specifier
//! is rewritten. Matching happens at path-segment boundaries only:
//! `@/registry/ui` rewrites `@/registry/ui/button` but never
//! `@/registry/ui-kit/button`.
//!
//! Imports of source-tree-only helpers (paths on the strip list) have no
//! consumer-side equivalent and are removed outright, since leaving them
//! would produce an unresolvable import in the target project.

use crate::error::{KitbagError, Result};
use crate::transform::scanner;
use crate::transform::{apply_edits, statement_removal_span, Edit};

/// Canonical-prefix -> consumer-prefix rewrites plus a strip list.
#[derive(Debug, Clone, Default)]
pub struct ImportRewrites {
    /// Rewrite pairs, kept sorted longest-prefix-first so the most
    /// specific alias wins.
    rewrites: Vec<(String, String)>,
    /// Prefixes whose imports are dropped entirely.
    strip: Vec<String>,
}

impl ImportRewrites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one canonical -> consumer prefix rewrite.
    pub fn rewrite(mut self, canonical: impl Into<String>, target: impl Into<String>) -> Self {
        self.rewrites.push((canonical.into(), target.into()));
        self.rewrites
            .sort_by_key(|(canonical, _)| std::cmp::Reverse(canonical.len()));
        self
    }

    /// Add one prefix whose imports are stripped.
    pub fn strip(mut self, prefix: impl Into<String>) -> Self {
        self.strip.push(prefix.into());
        self
    }

    /// Whether a specifier should be stripped.
    fn should_strip(&self, specifier: &str) -> bool {
        self.strip
            .iter()
            .any(|prefix| matches_at_boundary(specifier, prefix))
    }

    /// Rewritten specifier, if any rewrite prefix matches.
    fn rewritten(&self, specifier: &str) -> Option<String> {
        for (canonical, target) in &self.rewrites {
            if matches_at_boundary(specifier, canonical) {
                let rest = &specifier[canonical.len()..];
                return Some(format!("{}{}", target, rest));
            }
        }
        None
    }
}

/// Prefix match that only succeeds on a whole path segment.
fn matches_at_boundary(specifier: &str, prefix: &str) -> bool {
    match specifier.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => rest.starts_with('/'),
        None => false,
    }
}

/// Rewrite aliased import paths in one source file.
pub fn rewrite_imports(file: &str, source: &str, rewrites: &ImportRewrites) -> Result<String> {
    let imports = scanner::scan_imports(source).map_err(|e| KitbagError::Transform {
        file: file.to_string(),
        message: e.to_string(),
    })?;

    let mut edits: Vec<Edit> = Vec::new();

    for import in &imports {
        if rewrites.should_strip(&import.specifier) {
            edits.push(Edit {
                span: statement_removal_span(source, import.span),
                text: String::new(),
            });
            continue;
        }

        if let Some(target) = rewrites.rewritten(&import.specifier) {
            edits.push(Edit {
                span: import.specifier_span,
                text: target,
            });
        }
    }

    Ok(apply_edits(source, edits))
}

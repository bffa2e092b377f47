//! Source transformation pipeline.
//!
//! Each resolved file passes through up to three independent rewrites
//! before it is written into the consumer project:
//!
//! 1. [`style`] - canonical style tokens -> the chosen style's values
//! 2. [`icons`] - canonical icon placeholders -> the chosen icon library
//! 3. [`imports`] - canonical alias paths -> the consumer's aliases
//!
//! The style pass is plain token substitution and runs on any text file.
//! The icon and import passes are structural and only run on script
//! sources. Files are independent of each other; a failure in one file is
//! reported with its path and does not corrupt the others.

pub mod icons;
pub mod imports;
pub mod scanner;
pub mod style;

pub use icons::{transform_icons, IconLibrary, ICON_PLACEHOLDER};
pub use imports::{rewrite_imports, ImportRewrites};
pub use style::StyleMap;

use crate::error::Result;
use crate::transform::scanner::Span;

/// One text edit produced by a structural pass: replace `span` with `text`.
pub(crate) struct Edit {
    pub span: Span,
    pub text: String,
}

/// Apply non-overlapping edits back-to-front so earlier spans stay valid.
pub(crate) fn apply_edits(source: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by_key(|e| e.span.start);
    let mut out = source.to_string();
    for edit in edits.iter().rev() {
        out.replace_range(edit.span.start..edit.span.end, &edit.text);
    }
    out
}

/// Widen a statement span to swallow one trailing newline.
pub(crate) fn statement_removal_span(source: &str, span: Span) -> Span {
    let bytes = source.as_bytes();
    let mut end = span.end;
    if end < bytes.len() && bytes[end] == b'\r' {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'\n' {
        end += 1;
    }
    Span {
        start: span.start,
        end,
    }
}

/// File extensions the structural passes understand.
fn is_script_source(path: &str) -> bool {
    std::path::Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e, "ts" | "tsx" | "js" | "jsx" | "mjs" | "cjs"))
        .unwrap_or(false)
}

/// Everything one transformation run needs, shared across files.
pub struct TransformContext {
    pub style_map: StyleMap,
    pub icon_library: IconLibrary,
    pub rewrites: ImportRewrites,
}

impl TransformContext {
    /// Run the full per-file pipeline on one source text.
    ///
    /// `path` is the file's target path, used for error context and to
    /// decide whether the structural passes apply.
    pub fn transform(&self, path: &str, source: &str) -> Result<String> {
        let styled = self.style_map.apply(source);

        if !is_script_source(path) {
            return Ok(styled);
        }

        let with_icons = transform_icons(path, &styled, &self.icon_library)?;
        rewrite_imports(path, &with_icons, &self.rewrites)
    }
}

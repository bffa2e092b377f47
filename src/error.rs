//! Error types for kitbag operations.
//!
//! This module defines [`KitbagError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `KitbagError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `KitbagError::Other`) for unexpected errors
//! - Every fatal error carries the dependency chain or file path that
//!   triggered it, so nothing surfaces as a bare low-level failure

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for kitbag operations.
#[derive(Debug, Error)]
pub enum KitbagError {
    /// A registry item failed schema validation.
    #[error("Invalid registry item '{name}': {field}: {message}")]
    Schema {
        name: String,
        /// Dotted path to the offending field, e.g. `files[2].targetPath`.
        field: String,
        message: String,
    },

    /// A requested or depended-upon item is missing from every source.
    #[error("Registry item '{name}' not found (required via {chain})")]
    ItemNotFound { name: String, chain: String },

    /// Registry dependency cycle detected.
    #[error("Circular registry dependency: {chain}")]
    CircularDependency { chain: String },

    /// An internal item was requested directly.
    #[error("Registry item '{name}' is internal and cannot be installed directly")]
    NotInstallable { name: String },

    /// A source transformation failed for one file.
    #[error("Failed to transform {file}: {message}")]
    Transform { file: String, message: String },

    /// An icon has no mapping in the configured icon library.
    #[error("Icon '{icon}' has no mapping for library '{library}' in {file}")]
    UnmappedIcon {
        icon: String,
        library: String,
        file: String,
    },

    /// Two distinct source files resolve to the same output path.
    #[error("Output path collision at '{target}': provided by both '{first}' and '{second}'")]
    TargetCollision {
        target: String,
        first: String,
        second: String,
    },

    /// A filesystem write failed partway through an install.
    ///
    /// Already-written files are left in place; the lists let the caller
    /// decide on cleanup.
    #[error(
        "Failed to write {failed}: {message} ({} file(s) written before failure, {} not written)",
        .written.len(),
        .not_written.len()
    )]
    Write {
        failed: String,
        message: String,
        written: Vec<String>,
        not_written: Vec<String>,
    },

    /// Project configuration file not found at expected location.
    #[error("Project configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a configuration or registry file.
    #[error("Failed to parse {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A target path escapes the consumer project root.
    #[error("Refusing to write outside the project root: {path}")]
    PathEscapesRoot { path: PathBuf },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for kitbag operations.
pub type Result<T> = std::result::Result<T, KitbagError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_displays_name_field_and_message() {
        let err = KitbagError::Schema {
            name: "button".into(),
            field: "files[0].targetPath".into(),
            message: "must not be empty".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("button"));
        assert!(msg.contains("files[0].targetPath"));
        assert!(msg.contains("must not be empty"));
    }

    #[test]
    fn item_not_found_displays_chain() {
        let err = KitbagError::ItemNotFound {
            name: "label".into(),
            chain: "form -> field -> label".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("label"));
        assert!(msg.contains("form -> field -> label"));
    }

    #[test]
    fn circular_dependency_displays_chain() {
        let err = KitbagError::CircularDependency {
            chain: "a -> b -> a".into(),
        };
        assert!(err.to_string().contains("a -> b -> a"));
    }

    #[test]
    fn transform_error_displays_file_and_message() {
        let err = KitbagError::Transform {
            file: "components/widget.tsx".into(),
            message: "unterminated template literal".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("components/widget.tsx"));
        assert!(msg.contains("unterminated template literal"));
    }

    #[test]
    fn unmapped_icon_displays_icon_and_library() {
        let err = KitbagError::UnmappedIcon {
            icon: "search".into(),
            library: "hero".into(),
            file: "ui/input.tsx".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("search"));
        assert!(msg.contains("hero"));
        assert!(msg.contains("ui/input.tsx"));
    }

    #[test]
    fn target_collision_displays_all_paths() {
        let err = KitbagError::TargetCollision {
            target: "components/widget.ts".into(),
            first: "registry/a/widget.ts".into(),
            second: "registry/b/widget.ts".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("components/widget.ts"));
        assert!(msg.contains("registry/a/widget.ts"));
        assert!(msg.contains("registry/b/widget.ts"));
    }

    #[test]
    fn write_error_displays_partial_progress() {
        let err = KitbagError::Write {
            failed: "lib/utils.ts".into(),
            message: "permission denied".into(),
            written: vec!["a.ts".into(), "b.ts".into(), "c.ts".into()],
            not_written: vec!["d.ts".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("lib/utils.ts"));
        assert!(msg.contains("3 file(s) written"));
        assert!(msg.contains("1 not written"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: KitbagError = io_err.into();
        assert!(matches!(err, KitbagError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(KitbagError::ConfigNotFound {
                path: PathBuf::from("/proj/kitbag.json"),
            })
        }
        assert!(returns_error().is_err());
    }
}

//! kitbag - registry-driven UI component installer.
//!
//! kitbag materializes reusable UI source artifacts ("registry items")
//! into a consumer project: it resolves an item's full dependency graph,
//! rewrites its source for the project's chosen visual style, icon
//! library, and path aliases, and merges the result into the project's
//! file tree and configuration without clobbering unrelated edits.
//!
//! # Modules
//!
//! - [`builtin`] - embedded style maps and icon tables
//! - [`cli`] - command-line interface and argument parsing
//! - [`config`] - consumer project configuration and deep merge
//! - [`error`] - error types and result aliases
//! - [`install`] - end-to-end install pipeline
//! - [`materialize`] - writing files under an overwrite policy
//! - [`registry`] - item loading, validation, and dependency resolution
//! - [`transform`] - style, icon, and import-path rewriting
//! - [`tree`] - folding resolved items into one merged tree
//!
//! # Example
//!
//! ```
//! use kitbag::transform::StyleMap;
//!
//! // Resolve canonical style tokens against one visual style.
//! let map = StyleMap::parse("demo.css", "STYLE_RADIUS: rounded-md;").unwrap();
//! let out = map.apply(r#"<div className="STYLE_RADIUS border" />"#);
//! assert_eq!(out, r#"<div className="rounded-md border" />"#);
//! ```
//!
//! For the full pipeline, see [`install::install`] and the integration
//! tests.

pub mod builtin;
pub mod cli;
pub mod config;
pub mod error;
pub mod install;
pub mod materialize;
pub mod registry;
pub mod transform;
pub mod tree;

pub use error::{KitbagError, Result};

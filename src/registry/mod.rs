//! Item registry for kitbag.
//!
//! This module handles loading, validating, and resolving registry items
//! from multiple sources:
//! - Project-local items (`.kitbag/registry/`)
//! - Remote registries (`{base}/{name}.json`)
//!
//! # Resolution Order
//!
//! Sources are consulted in order (first match wins):
//! 1. Project-local
//! 2. Remote registries, in configuration order
//!
//! # Example
//!
//! ```no_run
//! use kitbag::registry::{Registry, RemoteRegistry};
//!
//! let remotes = vec![RemoteRegistry::new("https://ui.example.com/r")];
//! let registry = Registry::new(None, remotes).unwrap();
//! let resolution = registry.resolve(&["button".to_string()]).unwrap();
//! for resolved in &resolution.items {
//!     println!("{}", resolved.item.name);
//! }
//! ```

pub mod fetch;
pub mod item;
pub mod local;
pub mod remote;
pub mod resolver;
pub mod validator;

// Re-exports
pub use fetch::HttpFetcher;
pub use item::{FileKind, FontSpec, ItemKind, RegistryFile, RegistryItem};
pub use local::LocalSource;
pub use remote::{IndexEntry, RemoteRegistry};
pub use resolver::{ItemOrigin, ItemSummary, Registry, Resolution, ResolvedItem};
pub use validator::{check_item, validate_item, ValidationIssue};

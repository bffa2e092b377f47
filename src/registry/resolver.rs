//! Item resolution from multiple sources and transitive dependency closure.
//!
//! Source order (first match wins):
//! 1. Project-local (`.kitbag/registry/`)
//! 2. Remote registries, in configuration order
//!
//! Dependency resolution is a depth-first traversal over
//! `registryDependencies` with an explicit visiting stack. An item already
//! resolved is never fetched or processed again; a name encountered while it
//! is still on the visiting stack is a cycle and fails the whole resolution
//! with the offending chain.

use crate::error::{KitbagError, Result};
use crate::registry::fetch::HttpFetcher;
use crate::registry::item::RegistryItem;
use crate::registry::local::LocalSource;
use crate::registry::remote::RemoteRegistry;
use crate::registry::validator;
use std::collections::HashSet;
use std::path::Path;

/// Where a resolved item came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOrigin {
    /// Project-local registry directory.
    Local,
    /// Remote registry, identified by its base URL.
    Remote { url: String },
}

/// A resolved item together with its origin.
#[derive(Debug, Clone)]
pub struct ResolvedItem {
    pub item: RegistryItem,
    pub origin: ItemOrigin,
}

/// Output of one resolution call: the deduplicated transitive closure of
/// the requested items, in first-visited order.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub items: Vec<ResolvedItem>,
}

impl Resolution {
    /// Names in resolution order.
    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|r| r.item.name.as_str()).collect()
    }
}

/// Item registry resolving from local and remote sources.
pub struct Registry {
    local: LocalSource,
    remotes: Vec<RemoteRegistry>,
    fetcher: HttpFetcher,
}

/// Summary of one installable item for listings.
#[derive(Debug, Clone)]
pub struct ItemSummary {
    pub name: String,
    pub kind: Option<String>,
    pub description: Option<String>,
}

impl Registry {
    /// Create a registry for a project with the given remote sources.
    pub fn new(project_root: Option<&Path>, remotes: Vec<RemoteRegistry>) -> Result<Self> {
        Ok(Self {
            local: LocalSource::new(project_root)?,
            remotes,
            fetcher: HttpFetcher::new(),
        })
    }

    /// Create a registry from pre-built sources (used by tests).
    pub fn with_sources(local: LocalSource, remotes: Vec<RemoteRegistry>) -> Self {
        Self {
            local,
            remotes,
            fetcher: HttpFetcher::new(),
        }
    }

    /// Load and validate one item by name.
    ///
    /// `Ok(None)` means no source has the item; transport failures are
    /// returned as errors so callers can tell a broken registry apart from
    /// a genuinely missing dependency. For local items, file content not
    /// inlined in the document is read from disk next to it.
    pub fn load(&self, name: &str) -> Result<Option<(RegistryItem, ItemOrigin)>> {
        if let Some((raw, path)) = self.local.get_with_path(name) {
            let mut item = validator::validate_item(raw)?;
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            for file in &mut item.files {
                if file.content.is_none() {
                    let candidate = base.join(&file.source_path);
                    if candidate.is_file() {
                        file.content = Some(std::fs::read_to_string(&candidate)?);
                    }
                }
            }
            return Ok(Some((item, ItemOrigin::Local)));
        }

        for remote in &self.remotes {
            match remote.fetch_item(name, &self.fetcher) {
                Ok(Some(raw)) => {
                    let item = validator::validate_item(&raw)?;
                    return Ok(Some((
                        item,
                        ItemOrigin::Remote {
                            url: remote.url.clone(),
                        },
                    )));
                }
                Ok(None) => continue,
                Err(e) => return Err(KitbagError::Other(e)),
            }
        }

        Ok(None)
    }

    /// Installable (non-internal) items across all sources.
    ///
    /// Local items shadow remote entries of the same name; a remote source
    /// without a discovery index is skipped with a warning rather than
    /// failing the listing.
    pub fn list_installable(&self) -> Vec<ItemSummary> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut summaries = Vec::new();

        let mut local_names = self.local.item_names();
        local_names.sort_unstable();
        for name in local_names {
            let raw = self.local.get(name).expect("name came from this source");
            let kind = raw.get("type").and_then(|v| v.as_str());
            if kind == Some("internal") {
                continue;
            }
            if seen.insert(name.to_string()) {
                summaries.push(ItemSummary {
                    name: name.to_string(),
                    kind: kind.map(String::from),
                    description: raw
                        .get("description")
                        .and_then(|v| v.as_str())
                        .map(String::from),
                });
            }
        }

        for remote in &self.remotes {
            match remote.fetch_index(&self.fetcher) {
                Ok(Some(entries)) => {
                    for entry in entries {
                        if entry.kind.as_deref() == Some("internal") {
                            continue;
                        }
                        if seen.insert(entry.name.clone()) {
                            summaries.push(ItemSummary {
                                name: entry.name,
                                kind: entry.kind,
                                description: entry.description,
                            });
                        }
                    }
                }
                Ok(None) => {
                    tracing::debug!("Registry {} publishes no index", remote.url);
                }
                Err(e) => {
                    tracing::warn!("Failed to list registry {}: {}", remote.url, e);
                }
            }
        }

        summaries
    }

    /// Resolve the transitive closure of the requested item names.
    ///
    /// The result is deduplicated and ordered by first visit, so repeated
    /// runs with the same inputs produce the same file-write order.
    /// Internal items may participate as dependencies but are rejected as
    /// direct requests.
    pub fn resolve(&self, requested: &[String]) -> Result<Resolution> {
        let mut acc = Vec::new();
        let mut seen = HashSet::new();
        let mut visiting = HashSet::new();
        let mut chain = Vec::new();

        for name in requested {
            if let Some((item, _)) = self.load(name)? {
                if item.is_internal() {
                    return Err(KitbagError::NotInstallable { name: name.clone() });
                }
            }
            self.visit(name, &mut chain, &mut visiting, &mut seen, &mut acc)?;
        }

        Ok(Resolution { items: acc })
    }

    fn visit(
        &self,
        name: &str,
        chain: &mut Vec<String>,
        visiting: &mut HashSet<String>,
        seen: &mut HashSet<String>,
        acc: &mut Vec<ResolvedItem>,
    ) -> Result<()> {
        if visiting.contains(name) {
            let start = chain
                .iter()
                .position(|n| n == name)
                .expect("visiting names are on the chain");
            let mut cycle: Vec<String> = chain[start..].to_vec();
            cycle.push(name.to_string());
            return Err(KitbagError::CircularDependency {
                chain: cycle.join(" -> "),
            });
        }

        if seen.contains(name) {
            return Ok(());
        }

        let (item, origin) = self.load(name)?.ok_or_else(|| KitbagError::ItemNotFound {
            name: name.to_string(),
            chain: if chain.is_empty() {
                "direct request".to_string()
            } else {
                chain.join(" -> ")
            },
        })?;

        tracing::debug!("Resolved '{}' from {:?}", name, origin);

        seen.insert(name.to_string());
        acc.push(ResolvedItem {
            item: item.clone(),
            origin,
        });

        visiting.insert(name.to_string());
        chain.push(name.to_string());

        for dep in &item.registry_dependencies {
            self.visit(dep, chain, visiting, seen, acc)?;
        }

        chain.pop();
        visiting.remove(name);

        Ok(())
    }
}

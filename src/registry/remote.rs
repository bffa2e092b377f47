//! Remote registry sources.
//!
//! A remote registry is a base URL serving one JSON document per item at
//! `{base}/{name}.json`, plus an optional `index.json` listing installable
//! items for discovery. Sources are consulted in configuration order;
//! the first source that has an item wins.

use crate::registry::fetch::HttpFetcher;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One remote registry endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteRegistry {
    /// Base URL, without a trailing slash.
    pub url: String,
}

impl RemoteRegistry {
    /// Create a source for a base URL, normalizing a trailing slash away.
    pub fn new(url: impl Into<String>) -> Self {
        let mut url = url.into();
        while url.ends_with('/') {
            url.pop();
        }
        Self { url }
    }

    /// URL of one item document.
    pub fn item_url(&self, name: &str) -> String {
        format!("{}/{}.json", self.url, name)
    }

    /// URL of the optional discovery index.
    pub fn index_url(&self) -> String {
        format!("{}/index.json", self.url)
    }

    /// Fetch one raw item, `Ok(None)` when the registry does not have it.
    pub fn fetch_item(&self, name: &str, fetcher: &HttpFetcher) -> Result<Option<Value>> {
        fetcher.fetch_json(&self.item_url(name))
    }

    /// Fetch the discovery index entries, if the registry publishes one.
    pub fn fetch_index(&self, fetcher: &HttpFetcher) -> Result<Option<Vec<IndexEntry>>> {
        match fetcher.fetch_json(&self.index_url())? {
            None => Ok(None),
            Some(value) => {
                let entries: Vec<IndexEntry> = serde_json::from_value(value)?;
                Ok(Some(entries))
            }
        }
    }
}

/// One entry of a registry's discovery index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

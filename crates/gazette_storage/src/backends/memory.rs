use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use gazette_core::{ManifestEntry, ManifestStore, Result};

/// In-memory manifest. Nothing persists across runs; useful for tests and
/// dry runs.
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, ManifestEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ManifestStore for MemoryStore {
    async fn contains(&self, link: &str) -> Result<bool> {
        Ok(self.entries.read().await.contains_key(link))
    }

    async fn insert(&self, entry: ManifestEntry) -> Result<()> {
        self.entries
            .write()
            .await
            .entry(entry.link.clone())
            .or_insert(entry);
        Ok(())
    }

    async fn entries(&self) -> Result<Vec<ManifestEntry>> {
        Ok(self.entries.read().await.values().cloned().collect())
    }

    async fn flush(&self) -> Result<()> {
        Ok(())
    }
}

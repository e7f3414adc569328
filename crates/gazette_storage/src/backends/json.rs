use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;

use gazette_core::{Error, ManifestEntry, ManifestStore, Result};

/// Manifest persisted as a JSON map of link → entry, normally at
/// `<output>/manifest.json`. Loaded once at open; `flush` writes the whole
/// map through a temp file and rename so a crash never leaves a truncated
/// manifest behind.
pub struct JsonStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, ManifestEntry>>,
}

impl JsonStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let text = std::fs::read_to_string(&path)?;
            serde_json::from_str(&text)
                .map_err(|e| Error::Storage(format!("Corrupt manifest {}: {}", path.display(), e)))?
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl ManifestStore for JsonStore {
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
        let entries = self.entries.read().await;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(&*entries)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, text)?;
        std::fs::rename(&tmp, &self.path)?;
        tracing::debug!("💾 Flushed {} manifest entries to {}", entries.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn entry(link: &str) -> ManifestEntry {
        ManifestEntry {
            link: link.to_string(),
            file: "one-abc123.html".to_string(),
            title: "One".to_string(),
            source: "Example Wire".to_string(),
            published_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");

        let store = JsonStore::open(&path).unwrap();
        store.insert(entry("https://a.example/1")).await.unwrap();
        store.flush().await.unwrap();

        let reopened = JsonStore::open(&path).unwrap();
        assert!(reopened.contains("https://a.example/1").await.unwrap());
        let entries = reopened.entries().await.unwrap();
        assert_eq!(entries, vec![entry("https://a.example/1")]);
    }

    #[tokio::test]
    async fn open_without_existing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path().join("manifest.json")).unwrap();
        assert!(store.entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn flush_creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site/manifest.json");
        let store = JsonStore::open(&path).unwrap();
        store.insert(entry("https://a.example/1")).await.unwrap();
        store.flush().await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn corrupt_manifest_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(JsonStore::open(&path).is_err());
    }
}

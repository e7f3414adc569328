use std::path::Path;
use std::sync::Arc;

use gazette_core::{Error, ManifestStore, Result};

pub mod backends;

pub use backends::{JsonStore, MemoryStore};

/// Name → backend factory, mirroring the CLI's `--store` flag.
pub async fn create_store(kind: &str, path: &Path) -> Result<Arc<dyn ManifestStore>> {
    match kind {
        "memory" => Ok(Arc::new(MemoryStore::new())),
        "json" => Ok(Arc::new(JsonStore::open(path)?)),
        other => Err(Error::Storage(format!("Unknown manifest store: {}", other))),
    }
}

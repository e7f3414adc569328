use async_trait::async_trait;

use crate::types::ManifestEntry;
use crate::Result;

/// Persisted record of which story links have already been rendered.
/// Read at the start of a run, extended as pages are written, flushed at
/// the end. Backends live in `gazette_storage`.
#[async_trait]
pub trait ManifestStore: Send + Sync {
    /// Whether a page has already been rendered for this link.
    async fn contains(&self, link: &str) -> Result<bool>;

    /// Record a newly rendered page. Inserting an already-present link
    /// leaves the existing entry untouched.
    async fn insert(&self, entry: ManifestEntry) -> Result<()>;

    /// All known entries, in unspecified order.
    async fn entries(&self) -> Result<Vec<ManifestEntry>>;

    /// Persist any pending changes.
    async fn flush(&self) -> Result<()>;
}

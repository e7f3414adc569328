use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// One configured feed, loaded from the feed list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSource {
    pub url: Url,
}

impl FeedSource {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    /// Display name for logs when the feed document carries no title.
    pub fn display_name(&self) -> &str {
        self.url.host_str().unwrap_or_else(|| self.url.as_str())
    }
}

/// One article entry extracted from a feed. `link` is the primary key:
/// two stories with the same link are the same story.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    pub title: String,
    pub link: Url,
    pub summary: String,
    pub published_at: DateTime<Utc>,
    /// Display title of the originating feed; not unique across feeds.
    pub source: String,
    /// URL of the originating feed, for rules that are per-feed.
    pub feed: Url,
}

/// One rendered article page, as recorded in the manifest. Carries enough
/// metadata to rebuild the index page without re-reading article files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub link: String,
    pub file: String,
    pub title: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
}

impl ManifestEntry {
    pub fn for_story(story: &Story, file: String) -> Self {
        Self {
            link: story.link.to_string(),
            file,
            title: story.title.clone(),
            source: story.source.clone(),
            published_at: story.published_at,
        }
    }
}

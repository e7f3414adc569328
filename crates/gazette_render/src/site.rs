use std::path::{Path, PathBuf};

use gazette_core::{slug_for, Error, ManifestEntry, Result, Story};

use crate::page;

const STORIES_DIR: &str = "stories";
const INDEX_FILE: &str = "index.html";

/// Owns all output-tree mutation: one HTML file per story under
/// `stories/`, plus the regenerated `index.html` at the root.
pub struct SiteWriter {
    output_dir: PathBuf,
    site_title: String,
}

impl SiteWriter {
    pub fn new(output_dir: impl Into<PathBuf>, site_title: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            site_title: site_title.into(),
        }
    }

    pub fn prepare(&self) -> Result<()> {
        std::fs::create_dir_all(self.output_dir.join(STORIES_DIR))?;
        Ok(())
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Render one story to its slug-derived file and return the file name.
    /// An existing file is left untouched, so a page is never rewritten
    /// once published. Missing required fields here mean the filter let
    /// something through it should not have; that story fails alone.
    pub fn write_article(&self, story: &Story) -> Result<String> {
        if story.title.trim().is_empty() {
            return Err(Error::Render(format!(
                "{}: story has no title after filtering",
                story.link
            )));
        }

        let file = format!("{}.html", slug_for(&story.link));
        let path = self.output_dir.join(STORIES_DIR).join(&file);
        if path.exists() {
            tracing::debug!("Page already exists, leaving untouched: {}", file);
            return Ok(file);
        }

        std::fs::write(&path, page::article_page(story))?;
        tracing::info!("📝 Wrote {}", file);
        Ok(file)
    }

    /// Regenerate the index from the full known-story set, old and new.
    pub fn write_index(&self, entries: &[ManifestEntry]) -> Result<()> {
        let html = page::index_page(&self.site_title, entries);
        std::fs::write(self.output_dir.join(INDEX_FILE), html)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use url::Url;

    fn story(link: &str, title: &str) -> Story {
        Story {
            title: title.to_string(),
            link: Url::parse(link).unwrap(),
            summary: "A summary.".to_string(),
            published_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            source: "Example Wire".to_string(),
            feed: Url::parse("https://a.example/rss").unwrap(),
        }
    }

    #[test]
    fn writes_article_under_stories_dir() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SiteWriter::new(dir.path(), "News");
        writer.prepare().unwrap();

        let file = writer.write_article(&story("https://a.example/1", "X")).unwrap();
        let path = dir.path().join("stories").join(&file);
        assert!(path.exists());
        let html = std::fs::read_to_string(path).unwrap();
        assert!(html.contains("<h1>X</h1>"));
    }

    #[test]
    fn existing_page_is_not_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SiteWriter::new(dir.path(), "News");
        writer.prepare().unwrap();

        let file = writer.write_article(&story("https://a.example/1", "Original")).unwrap();
        let path = dir.path().join("stories").join(&file);
        let before = std::fs::read_to_string(&path).unwrap();

        // Same link with a modified title maps to the same file and must
        // not alter it.
        let file2 = writer.write_article(&story("https://a.example/1", "Changed")).unwrap();
        assert_eq!(file, file2);
        assert_eq!(before, std::fs::read_to_string(&path).unwrap());
        assert!(before.contains("Original"));
    }

    #[test]
    fn empty_title_is_a_render_error() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SiteWriter::new(dir.path(), "News");
        writer.prepare().unwrap();

        let err = writer.write_article(&story("https://a.example/1", " ")).unwrap_err();
        assert!(matches!(err, Error::Render(_)));
        assert!(!err.is_fatal());
    }

    #[test]
    fn index_lists_entries_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SiteWriter::new(dir.path(), "News");
        writer.prepare().unwrap();

        let entries = vec![ManifestEntry {
            link: "https://a.example/1".to_string(),
            file: "a-example-1-abcd1234.html".to_string(),
            title: "X".to_string(),
            source: "Example Wire".to_string(),
            published_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }];

        writer.write_index(&entries).unwrap();
        let first = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert!(first.contains("stories/a-example-1-abcd1234.html"));
        assert!(first.contains("X"));

        writer.write_index(&entries).unwrap();
        let second = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert_eq!(first, second);
    }
}

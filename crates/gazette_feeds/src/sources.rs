use std::path::Path;

use url::Url;

use gazette_core::{Error, FeedSource, Result};

/// Load the feed list: one URL per line, `#` comments and blank lines
/// ignored. A missing or unreadable file is a fatal configuration error;
/// an unparseable URL only costs that one line.
pub fn load_feed_sources(path: &Path) -> Result<Vec<FeedSource>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Feed list not readable: {}: {}", path.display(), e)))?;

    let mut sources = Vec::new();
    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match Url::parse(line) {
            Ok(url) => sources.push(FeedSource::new(url)),
            Err(e) => {
                tracing::warn!("Skipping invalid feed URL on line {}: {} ({})", lineno + 1, line, e)
            }
        }
    }
    Ok(sources)
}

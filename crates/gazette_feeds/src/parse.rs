use std::str::FromStr;

use chrono::{DateTime, Utc};
use url::Url;

use gazette_core::{Error, FeedSource, Result, Story};

/// Parse a raw feed document into stories. Tries Atom first, then RSS; a
/// document that is neither is an `Error::Parse` for the whole feed.
/// Individual entries missing a title, a resolvable link, or a parseable
/// publish date are skipped, never fatal.
pub fn parse_feed(xml: &str, source: &FeedSource) -> Result<Vec<Story>> {
    match atom_syndication::Feed::from_str(xml) {
        Ok(feed) => Ok(atom_stories(&feed, source)),
        Err(_) => match rss::Channel::from_str(xml) {
            Ok(channel) => Ok(rss_stories(&channel, source)),
            Err(_) => Err(Error::Parse(format!(
                "{}: not a recognizable RSS or Atom document",
                source.url
            ))),
        },
    }
}

fn rss_stories(channel: &rss::Channel, source: &FeedSource) -> Vec<Story> {
    let source_name = non_empty(channel.title()).unwrap_or_else(|| source.display_name().to_string());

    channel
        .items()
        .iter()
        .filter_map(|item| {
            let story = rss_story(item, &source_name, &source.url);
            if story.is_none() {
                tracing::debug!("Skipping malformed entry in {}", source.url);
            }
            story
        })
        .collect()
}

fn rss_story(item: &rss::Item, source_name: &str, feed: &Url) -> Option<Story> {
    let title = item.title().and_then(non_empty)?;
    // Some feeds only carry the link in the guid.
    let link = item
        .link()
        .or_else(|| item.guid().map(|guid| guid.value()))?;
    let link = Url::parse(link.trim()).ok()?;
    let published_at = item.pub_date().and_then(parse_timestamp)?;
    let summary = item.description().map(str::trim).unwrap_or("").to_string();

    Some(Story {
        title,
        link,
        summary,
        published_at,
        source: source_name.to_string(),
        feed: feed.clone(),
    })
}

fn atom_stories(feed: &atom_syndication::Feed, source: &FeedSource) -> Vec<Story> {
    let source_name =
        non_empty(feed.title()).unwrap_or_else(|| source.display_name().to_string());

    feed.entries()
        .iter()
        .filter_map(|entry| {
            let story = atom_story(entry, &source_name, &source.url);
            if story.is_none() {
                tracing::debug!("Skipping malformed entry in {}", source.url);
            }
            story
        })
        .collect()
}

fn atom_story(
    entry: &atom_syndication::Entry,
    source_name: &str,
    feed: &Url,
) -> Option<Story> {
    let title = non_empty(entry.title())?;
    let link = entry
        .links()
        .iter()
        .find(|link| link.rel() == "alternate")
        .or_else(|| entry.links().first())?;
    let link = Url::parse(link.href().trim()).ok()?;
    // Atom requires `updated`; `published` is preferred when present.
    let published_at = entry
        .published()
        .unwrap_or_else(|| entry.updated())
        .with_timezone(&Utc);
    let summary = entry
        .summary()
        .map(|text| text.as_str())
        .or_else(|| entry.content().and_then(|content| content.value()))
        .map(str::trim)
        .unwrap_or("")
        .to_string();

    Some(Story {
        title,
        link,
        summary,
        published_at,
        source: source_name.to_string(),
        feed: feed.clone(),
    })
}

/// Timestamps are normalized to UTC so index ordering is well-defined.
/// RSS pubDate is RFC 2822, but ISO 8601 shows up in the wild.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

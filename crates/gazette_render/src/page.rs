use chrono::{DateTime, Utc};

use gazette_core::{ManifestEntry, Story};

use crate::escape::escape_html;

fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Fixed article template. Every feed-supplied field is escaped; the
/// output depends only on the story, so re-rendering is byte-stable.
pub fn article_page(story: &Story) -> String {
    let title = escape_html(&story.title);
    let link = escape_html(story.link.as_str());
    let source = escape_html(&story.source);
    let published = format_timestamp(&story.published_at);

    let mut lines = vec![
        "<!DOCTYPE html>".to_string(),
        "<html lang=\"en\">".to_string(),
        "<head>".to_string(),
        "<meta charset=\"utf-8\">".to_string(),
        format!("<title>{}</title>", title),
        "</head>".to_string(),
        "<body>".to_string(),
        "<article>".to_string(),
        format!("  <h1>{}</h1>", title),
        format!("  <p><strong>Source:</strong> {}</p>", source),
        format!("  <p><strong>Published:</strong> {}</p>", published),
        format!("  <p><a href=\"{}\">Read original story</a></p>", link),
    ];
    if !story.summary.trim().is_empty() {
        lines.push("  <div class=\"story-summary\">".to_string());
        lines.push(format!("    <p>{}</p>", escape_html(story.summary.trim())));
        lines.push("  </div>".to_string());
    }
    lines.extend(["</article>".to_string(), "</body>".to_string(), "</html>".to_string()]);

    lines.join("\n") + "\n"
}

/// The index lists every known story, newest first, ties broken by link
/// order so the page is identical no matter which feed arrived first.
pub fn index_page(site_title: &str, entries: &[ManifestEntry]) -> String {
    let mut entries: Vec<&ManifestEntry> = entries.iter().collect();
    entries.sort_by(|a, b| {
        b.published_at
            .cmp(&a.published_at)
            .then_with(|| a.link.cmp(&b.link))
    });

    let title = escape_html(site_title);
    let mut lines = vec![
        "<!DOCTYPE html>".to_string(),
        "<html lang=\"en\">".to_string(),
        "<head>".to_string(),
        "<meta charset=\"utf-8\">".to_string(),
        format!("<title>{}</title>", title),
        "</head>".to_string(),
        "<body>".to_string(),
        format!("<h1>{}</h1>", title),
        "<ul>".to_string(),
    ];
    for entry in entries {
        lines.push(format!(
            "  <li><a href=\"stories/{}\">{}</a> ({}, {})</li>",
            escape_html(&entry.file),
            escape_html(&entry.title),
            escape_html(&entry.source),
            format_timestamp(&entry.published_at),
        ));
    }
    lines.extend(["</ul>".to_string(), "</body>".to_string(), "</html>".to_string()]);

    lines.join("\n") + "\n"
}

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use url::Url;

use gazette_core::Story;

/// Inclusion rules, exposed as configuration rather than baked in.
#[derive(Debug, Clone)]
pub struct FilterRules {
    /// Drop stories older than this many days. `None` keeps everything.
    pub max_age_days: Option<i64>,
    /// Cap on stories accepted per feed, in feed order. `None` is unlimited.
    pub per_feed_limit: Option<usize>,
    /// Hostname suffixes to reject, for feed URLs and story links alike.
    pub blocked_domains: Vec<String>,
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            max_age_days: None,
            per_feed_limit: None,
            blocked_domains: vec!["fool.com".to_string(), "lendingtree.com".to_string()],
        }
    }
}

impl FilterRules {
    /// Suffix match on the hostname: `fool.com` blocks `www.fool.com` but
    /// not `notfool.com`.
    pub fn blocks(&self, url: &Url) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        let host = host.to_ascii_lowercase();
        self.blocked_domains.iter().any(|domain| {
            let domain = domain.to_ascii_lowercase();
            host == domain || host.ends_with(&format!(".{}", domain))
        })
    }

    fn admits(&self, story: &Story, now: DateTime<Utc>) -> bool {
        if story.title.trim().is_empty() {
            return false;
        }
        if self.blocks(&story.link) {
            return false;
        }
        if let Some(days) = self.max_age_days {
            if story.published_at < now - Duration::days(days) {
                return false;
            }
        }
        true
    }
}

/// Select the stories to render: drop anything already in the manifest,
/// apply the inclusion rules, and dedupe within the run (first seen wins,
/// stable with respect to feed list order; the rest are dropped silently).
/// Output is reverse-chronological, ties broken by link string order.
pub fn select(
    candidates: Vec<Story>,
    published: &HashSet<String>,
    rules: &FilterRules,
    now: DateTime<Utc>,
) -> Vec<Story> {
    let mut seen: HashSet<String> = HashSet::new();
    // Keyed by feed URL, not display title: titles are not unique.
    let mut per_feed: HashMap<String, usize> = HashMap::new();
    let mut accepted = Vec::new();

    for story in candidates {
        let key = story.link.to_string();
        if published.contains(&key) || seen.contains(&key) {
            continue;
        }
        if !rules.admits(&story, now) {
            continue;
        }
        if let Some(limit) = rules.per_feed_limit {
            let count = per_feed.entry(story.feed.to_string()).or_insert(0);
            if *count >= limit {
                continue;
            }
            *count += 1;
        }
        seen.insert(key);
        accepted.push(story);
    }

    accepted.sort_by(|a, b| {
        b.published_at
            .cmp(&a.published_at)
            .then_with(|| a.link.as_str().cmp(b.link.as_str()))
    });
    accepted
}

use std::collections::HashSet;
use std::path::PathBuf;

use chrono::Utc;
use clap::Args;

use gazette_core::{ManifestEntry, ManifestStore, Result, Story};
use gazette_feeds::sources::load_feed_sources;
use gazette_feeds::{filter, FeedManager, FilterRules};
use gazette_render::SiteWriter;
use gazette_storage::create_store;

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Feed list file, one URL per line.
    #[arg(long, default_value = "rss_feeds.txt")]
    pub feeds: PathBuf,

    /// Output directory for the site tree.
    #[arg(long, default_value = "site")]
    pub output: PathBuf,

    /// Manifest store backend (json or memory).
    #[arg(long, default_value = "json")]
    pub store: String,

    /// Index page heading.
    #[arg(long, default_value = "News Stories")]
    pub title: String,

    /// Drop stories older than this many days.
    #[arg(long)]
    pub max_age_days: Option<i64>,

    /// Cap on stories accepted per feed.
    #[arg(long)]
    pub per_feed_limit: Option<usize>,

    /// Additional blocked domain, on top of the built-in list (repeatable).
    #[arg(long = "block-domain")]
    pub block_domains: Vec<String>,
}

impl BuildArgs {
    pub fn rules(&self) -> FilterRules {
        let mut rules = FilterRules {
            max_age_days: self.max_age_days,
            per_feed_limit: self.per_feed_limit,
            ..FilterRules::default()
        };
        rules.blocked_domains.extend(self.block_domains.iter().cloned());
        rules
    }
}

/// One full run: load config, fetch + parse all feeds, filter against the
/// manifest, render, reindex. Per-feed and per-story failures are logged
/// and absorbed; only configuration and storage errors propagate.
pub async fn run_build(args: &BuildArgs) -> Result<()> {
    // A broken feed list aborts here, before any output mutation.
    let mut sources = load_feed_sources(&args.feeds)?;
    let rules = args.rules();

    sources.retain(|source| {
        let keep = !rules.blocks(&source.url);
        if !keep {
            tracing::info!("Skipping blocklisted feed {}", source.url);
        }
        keep
    });

    let manager = FeedManager::new(sources)?;
    let harvest = manager.collect().await;

    let writer = SiteWriter::new(&args.output, &args.title);
    writer.prepare()?;
    let store = create_store(&args.store, &args.output.join("manifest.json")).await?;

    let (written, pages_failed) =
        publish_stories(harvest.stories, store.as_ref(), &writer, &rules).await?;

    tracing::info!(
        "✨ Wrote {} stories ({} feeds failed, {} pages failed)",
        written,
        harvest.failures.len(),
        pages_failed
    );
    Ok(())
}

/// Filter, render, and reindex one candidate set. Split from the fetch
/// phase so it runs against canned stories in tests.
pub async fn publish_stories(
    candidates: Vec<Story>,
    store: &dyn ManifestStore,
    writer: &SiteWriter,
    rules: &FilterRules,
) -> Result<(usize, usize)> {
    let published: HashSet<String> = store
        .entries()
        .await?
        .iter()
        .map(|entry| entry.link.clone())
        .collect();
    let accepted = filter::select(candidates, &published, rules, Utc::now());

    let mut written = 0;
    let mut failed = 0;
    for story in &accepted {
        match writer.write_article(story) {
            Ok(file) => {
                store.insert(ManifestEntry::for_story(story, file)).await?;
                written += 1;
            }
            Err(e) => {
                tracing::error!("Skipping story {}: {}", story.link, e);
                failed += 1;
            }
        }
    }

    store.flush().await?;
    writer.write_index(&store.entries().await?)?;

    Ok((written, failed))
}

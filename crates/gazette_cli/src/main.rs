mod pipeline;

use std::path::PathBuf;

use clap::Parser;
use url::Url;

use gazette_core::{Error, FeedSource, Result};
use gazette_feeds::sources::load_feed_sources;
use gazette_feeds::FeedManager;

use crate::pipeline::BuildArgs;

#[derive(Parser, Debug)]
#[command(
    name = "gazette",
    author,
    version,
    about = "Fetch RSS/Atom feeds and regenerate a static news site",
    long_about = None
)]
struct Cli {
    /// With no subcommand, runs a full build.
    #[command(flatten)]
    build: BuildArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Fetch all feeds and regenerate the site tree (the default).
    Build(BuildArgs),
    /// List the configured feed sources.
    Sources {
        #[arg(long, default_value = "rss_feeds.txt")]
        feeds: PathBuf,
    },
    /// Fetch and parse a single feed URL and print its stories.
    Feed { url: String },
}

fn diagnostic_writer() -> fn() -> std::io::Stderr {
    std::io::stderr
}

/// Diagnostics, including non-fatal per-feed failure reports, go to
/// stderr; stdout stays clean for command output like `sources`.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(diagnostic_writer())
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        None => pipeline::run_build(&cli.build).await,
        Some(Commands::Build(args)) => pipeline::run_build(&args).await,
        Some(Commands::Sources { feeds }) => run_sources(&feeds),
        Some(Commands::Feed { url }) => run_feed(&url).await,
    };

    // Per-feed and per-story failures were absorbed upstream; anything
    // that reaches here is unrecoverable for the whole run.
    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run_sources(feeds: &std::path::Path) -> Result<()> {
    let sources = load_feed_sources(feeds)?;
    for source in &sources {
        println!("{}", source.url);
    }
    Ok(())
}

async fn run_feed(url: &str) -> Result<()> {
    let url =
        Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))?;
    let source = FeedSource::new(url);

    let manager = FeedManager::new(vec![source.clone()])?;
    let stories = manager.collect_one(&source).await?;

    for story in &stories {
        println!(
            "{}  {}\n    {}",
            story.published_at.format("%Y-%m-%d %H:%M"),
            story.title,
            story.link
        );
    }
    println!("{} stories from {}", stories.len(), source.display_name());
    Ok(())
}

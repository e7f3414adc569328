use futures::future::join_all;

use gazette_core::{Error, FeedSource, Result, Story};

use crate::fetch::Fetcher;
use crate::parse::parse_feed;

/// Everything one run collected: the full candidate set across all feeds,
/// plus the feeds that failed. Fetch or parse failures never abort the
/// run; the pipeline continues with a partial result set.
pub struct Harvest {
    pub stories: Vec<Story>,
    pub failures: Vec<(FeedSource, Error)>,
}

/// Runs the fetch + parse phase for every configured feed. Fetches run
/// concurrently; results are folded back in feed list order so dedup
/// downstream stays stable with respect to the source list.
pub struct FeedManager {
    fetcher: Fetcher,
    sources: Vec<FeedSource>,
}

impl FeedManager {
    pub fn new(sources: Vec<FeedSource>) -> Result<Self> {
        Ok(Self {
            fetcher: Fetcher::new()?,
            sources,
        })
    }

    pub fn sources(&self) -> &[FeedSource] {
        &self.sources
    }

    pub async fn collect(&self) -> Harvest {
        let fetches = self.sources.iter().map(|source| async move {
            let xml = self.fetcher.fetch(source).await?;
            parse_feed(&xml, source)
        });
        let results = join_all(fetches).await;

        let mut stories = Vec::new();
        let mut failures = Vec::new();
        for (source, result) in self.sources.iter().zip(results) {
            match result {
                Ok(found) => {
                    tracing::info!("📰 {}: {} stories", source.display_name(), found.len());
                    stories.extend(found);
                }
                Err(e) => {
                    tracing::error!("Skipping feed {}: {}", source.url, e);
                    failures.push((source.clone(), e));
                }
            }
        }

        Harvest { stories, failures }
    }

    /// Fetch and parse a single feed, errors included. Used by the
    /// one-feed debug command.
    pub async fn collect_one(&self, source: &FeedSource) -> Result<Vec<Story>> {
        let xml = self.fetcher.fetch(source).await?;
        parse_feed(&xml, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use url::Url;

    const GOOD_FEED: &str = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Working Wire</title>
    <item>
      <title>Good story</title>
      <link>https://a.example/good</link>
      <pubDate>Mon, 01 Jan 2024 00:00:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;

    /// Serve one HTTP response on a loopback port and return the feed URL.
    async fn serve_once(body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = [0u8; 2048];
                let _ = stream.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/rss+xml\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });
        format!("http://{}/rss", addr)
    }

    fn source(url: &str) -> FeedSource {
        FeedSource::new(Url::parse(url).unwrap())
    }

    #[tokio::test]
    async fn broken_feed_does_not_block_other_feeds() {
        let good = serve_once(GOOD_FEED).await;
        let bad = serve_once("<html><body>front page</body></html>").await;

        let sources = vec![source(&good), source(&bad)];
        let manager = FeedManager::new(sources.clone()).unwrap();
        let harvest = manager.collect().await;

        assert_eq!(harvest.stories.len(), 1);
        assert_eq!(harvest.stories[0].title, "Good story");
        assert_eq!(harvest.failures.len(), 1);
        assert_eq!(harvest.failures[0].0, sources[1]);
        assert!(matches!(harvest.failures[0].1, Error::Parse(_)));
    }

    #[tokio::test]
    async fn unreachable_feed_is_a_contained_fetch_failure() {
        // Bind to learn a free port, then close it before fetching.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let dead = format!("http://{}/rss", listener.local_addr().unwrap());
        drop(listener);

        let good = serve_once(GOOD_FEED).await;
        let sources = vec![source(&dead), source(&good)];
        let manager = FeedManager::new(sources).unwrap();
        let harvest = manager.collect().await;

        assert_eq!(harvest.stories.len(), 1);
        assert_eq!(harvest.failures.len(), 1);
        assert!(matches!(harvest.failures[0].1, Error::Fetch(_)));
    }

    #[tokio::test]
    async fn collect_one_returns_the_feeds_stories() {
        let good = serve_once(GOOD_FEED).await;
        let source = source(&good);
        let manager = FeedManager::new(vec![source.clone()]).unwrap();

        let stories = manager.collect_one(&source).await.unwrap();
        assert_eq!(stories.len(), 1);
        assert_eq!(stories[0].link.as_str(), "https://a.example/good");
    }
}

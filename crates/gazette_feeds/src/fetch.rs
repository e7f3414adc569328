use std::time::Duration;

use reqwest::Client;

use gazette_core::{Error, FeedSource, Result};

/// Some feed hosts 403 the default reqwest agent.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.36";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Retrieves raw feed documents. Every failure is an `Error::Fetch` scoped
/// to the one feed; the caller decides whether to continue.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }

    pub async fn fetch(&self, source: &FeedSource) -> Result<String> {
        let response = self
            .client
            .get(source.url.clone())
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("{}: {}", source.url, e)))?;

        let response = response
            .error_for_status()
            .map_err(|e| Error::Fetch(format!("{}: {}", source.url, e)))?;

        response
            .text()
            .await
            .map_err(|e| Error::Fetch(format!("{}: {}", source.url, e)))
    }
}

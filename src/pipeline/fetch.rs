use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::SourceError;

/// Loads the raw bytes behind a source reference.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    async fn fetch(&self, source: &str) -> Result<Vec<u8>, SourceError>;
}

/// Fetches `http(s)://` references over the network and everything else
/// (`file://` or bare paths) from disk.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    async fn fetch_http(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }
        let bytes = response.bytes().await?;
        debug!(url, len = bytes.len(), "fetched source");
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl MediaFetcher for HttpFetcher {
    async fn fetch(&self, source: &str) -> Result<Vec<u8>, SourceError> {
        if is_remote(source) {
            self.fetch_http(source).await
        } else {
            let path = local_path(source);
            let bytes = tokio::fs::read(path).await?;
            debug!(path = %path.display(), len = bytes.len(), "read local source");
            Ok(bytes)
        }
    }
}

fn is_remote(source: &str) -> bool {
    let lower = source.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Local references drop the `file://` scheme and any query string.
fn local_path(source: &str) -> &Path {
    let source = source.strip_prefix("file://").unwrap_or(source);
    let source = source.split('?').next().unwrap_or(source);
    Path::new(source)
}

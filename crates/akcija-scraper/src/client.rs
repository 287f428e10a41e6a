//! HTTP access for page fetches and image downloads.
//!
//! Requests are awaited one at a time by every caller in this crate; the
//! client never fans out.

use std::path::Path;
use std::time::Duration;

use reqwest::Client;
use tokio::io::AsyncWriteExt;

use crate::error::ScraperError;

pub struct PageClient {
    client: Client,
}

impl PageClient {
    /// Creates a `PageClient` that sends `user_agent` on every request.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches `url` and returns the response body as text.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] for any non-2xx response.
    /// - [`ScraperError::Http`] for network or TLS failures.
    pub async fn fetch_html(&self, url: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }

    /// Streams the body of `url` into `dest`, returning the number of bytes
    /// written. A partially written file is removed when the transfer fails.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] for any non-2xx response.
    /// - [`ScraperError::Http`] if the request or body stream fails.
    /// - [`ScraperError::Io`] if `dest` cannot be created or written.
    pub async fn download_to_file(&self, url: &str, dest: &Path) -> Result<u64, ScraperError> {
        let mut response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|e| ScraperError::io(dest, e))?;

        let mut written: u64 = 0;
        let outcome: Result<(), ScraperError> = async {
            while let Some(chunk) = response.chunk().await? {
                file.write_all(&chunk)
                    .await
                    .map_err(|e| ScraperError::io(dest, e))?;
                written += chunk.len() as u64;
            }
            file.flush().await.map_err(|e| ScraperError::io(dest, e))
        }
        .await;

        if let Err(e) = outcome {
            drop(file);
            if let Err(cleanup) = tokio::fs::remove_file(dest).await {
                tracing::debug!(
                    path = %dest.display(),
                    error = %cleanup,
                    "could not remove partial download"
                );
            }
            return Err(e);
        }

        Ok(written)
    }
}

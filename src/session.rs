use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::CollectorConfig;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Timeout for {url}")]
    Timeout { url: String },
    #[error("No 200 returned for URL {url}, got {status}")]
    Status { url: String, status: StatusCode },
    #[error("Couldn't fetch {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url } | Self::Status { url, .. } | Self::Connection { url, .. } => url,
        }
    }

    fn from_reqwest(url: &str, e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Connection {
                url: url.to_string(),
                source: e,
            }
        }
    }
}

/// Pooled HTTP client shared by all the requests of one run.
#[derive(Debug)]
pub struct HttpSession {
    client: reqwest::Client,
    connect_retries: usize,
}

impl HttpSession {
    pub fn new(config: &CollectorConfig) -> anyhow::Result<Self> {
        let client = reqwest::ClientBuilder::new()
            .user_agent(&config.user_agent)
            .timeout(Duration::try_from_secs_f32(config.timeout)?)
            .gzip(true)
            .deflate(true)
            .build()?;

        Ok(Self {
            client,
            connect_retries: config.connect_retries,
        })
    }

    /// Issues a single GET and returns the body of a 200 response.
    ///
    /// Only failures to establish the connection are retried, at most
    /// `connect_retries` times.
    pub async fn get(&self, url: &str) -> Result<String, FetchError> {
        let mut retries = 0;
        let resp = loop {
            match self.client.get(url).send().await {
                Ok(resp) => break resp,
                Err(e) if e.is_connect() && !e.is_timeout() && retries < self.connect_retries => {
                    retries += 1;
                    log::warn!(
                        "Connection to {url} failed ({retries}/{}): {e}",
                        self.connect_retries
                    );
                }
                Err(e) => return Err(FetchError::from_reqwest(url, e)),
            }
        };

        if resp.status() != StatusCode::OK {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: resp.status(),
            });
        }

        resp.text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))
    }
}

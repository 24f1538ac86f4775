use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::error::{GraphbookError, Result};
use crate::types::{Post, Student};

const NON_CONNECTIONS_PATH: &str = "nonConnections";
const CONNECT_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("graphbook-cli/", env!("CARGO_PKG_VERSION"));

/// Read access to the Graphbook backend.
#[async_trait]
pub trait GraphbookApi: Send + Sync {
    /// Users not yet connected to the user identified by `email`.
    async fn non_connections(&self, email: &str) -> Result<Vec<Student>>;

    /// The auxiliary posts listing, returned as sent.
    async fn posts(&self) -> Result<Vec<Post>>;
}

pub struct GraphbookClient {
    http: Client,
    base_url: Url,
    posts_url: Url,
}

impl GraphbookClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout())
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: parse_base_url(&config.base_url)?,
            posts_url: Url::parse(&config.posts_url)
                .map_err(|_| GraphbookError::InvalidUrl(config.posts_url.clone()))?,
        })
    }

    fn non_connections_url(&self, email: &str) -> Result<Url> {
        let mut url = self
            .base_url
            .join(NON_CONNECTIONS_PATH)
            .map_err(|_| GraphbookError::InvalidUrl(self.base_url.to_string()))?;
        url.query_pairs_mut().append_pair("email", email);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(%url, "GET");

        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(GraphbookError::ApiError {
                status: status.as_u16(),
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<failed to read response body>".to_string()),
            });
        }

        let body = response.text().await?;
        debug!(%url, status = status.as_u16(), bytes = body.len(), "response received");

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl GraphbookApi for GraphbookClient {
    async fn non_connections(&self, email: &str) -> Result<Vec<Student>> {
        let url = self.non_connections_url(email)?;
        self.get_json(url).await
    }

    async fn posts(&self) -> Result<Vec<Post>> {
        self.get_json(self.posts_url.clone()).await
    }
}

/// Parse the backend root so that relative joins append instead of replacing
/// the last path segment.
fn parse_base_url(raw: &str) -> Result<Url> {
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&with_slash).map_err(|_| GraphbookError::InvalidUrl(raw.to_string()))
}

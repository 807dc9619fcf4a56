//! Shared retrieval path for the fetch proxy and the verifier.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use tracing::{debug, warn};
use url::Url;

use selectorlab_config::NetworkConfig;
use selectorlab_protocols::FetchError;

use crate::rewrite::is_html;

/// Validate a target URL. Only `http` and `https` are accepted.
pub fn parse_target(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url.trim()).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        message: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::UnsupportedScheme(other.to_string())),
    }
}

/// A fetched page before any rewriting.
#[derive(Debug, Clone)]
pub struct Retrieved {
    pub requested_url: String,
    /// URL after redirects.
    pub final_url: Url,
    pub content_type: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Retrieved {
    /// Fail with a content error unless the response is HTML.
    pub fn ensure_html(&self) -> Result<(), FetchError> {
        if is_html(self.content_type.as_deref(), &self.body) {
            Ok(())
        } else {
            Err(FetchError::NotHtml {
                url: self.final_url.to_string(),
                content_type: self
                    .content_type
                    .clone()
                    .unwrap_or_else(|| "unknown".to_string()),
            })
        }
    }
}

/// Server-side HTTP retrieval with a bounded timeout.
#[derive(Debug, Clone)]
pub struct Retriever {
    client: Client,
    timeout: Duration,
    user_agent: String,
}

impl Retriever {
    pub fn new(timeout: Duration, user_agent: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            timeout,
            user_agent: user_agent.into(),
        }
    }

    /// Build from network configuration, applying the effective timeout.
    pub fn from_config(config: &NetworkConfig) -> Self {
        Self::new(config.effective_timeout(), config.user_agent.clone())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// GET a page. Non-success statuses are errors.
    pub async fn retrieve(&self, url: &str) -> Result<Retrieved, FetchError> {
        let target = parse_target(url)?;
        debug!(url = %target, timeout_secs = self.timeout.as_secs(), "Retrieving page");

        let response = self
            .client
            .get(target.clone())
            .timeout(self.timeout)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %target, error = %e, "Retrieval failed");
                if e.is_timeout() {
                    FetchError::Timeout {
                        url: url.to_string(),
                        seconds: self.timeout.as_secs(),
                    }
                } else {
                    FetchError::Network {
                        url: url.to_string(),
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %target, status = status.as_u16(), "Retrieval returned non-success status");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();

        let body = response.text().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        debug!(url = %final_url, bytes = body.len(), "Retrieved page");
        Ok(Retrieved {
            requested_url: url.to_string(),
            final_url,
            content_type,
            headers,
            body,
        })
    }

    /// GET a page and require an HTML response.
    pub async fn retrieve_html(&self, url: &str) -> Result<Retrieved, FetchError> {
        let retrieved = self.retrieve(url).await?;
        retrieved.ensure_html()?;
        Ok(retrieved)
    }
}

#[cfg(test)]
#[path = "retrieval_tests.rs"]
mod tests;

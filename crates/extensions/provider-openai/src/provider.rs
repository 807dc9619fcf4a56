//! OpenAI-compatible provider implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use tracing::debug;

use selectorlab_protocols::error::ProviderError;
use selectorlab_protocols::provider::{CompletionRequest, CompletionResponse, LLMProvider};

use crate::api::{ApiRequest, ApiResponse, ErrorEnvelope, ModelList};
use crate::converter::{convert_messages, parse_response};

/// Chat-completions client for an OpenAI-compatible base address such as
/// `http://127.0.0.1:1234/v1`.
pub struct OpenAIProvider {
    api_key: Option<String>,
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl OpenAIProvider {
    /// Create a provider for `base_url`; `/chat/completions` and `/models`
    /// are appended to it.
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.is_empty()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
            timeout,
        }
    }

    fn endpoint(&self, route: &str) -> String {
        format!("{}/{}", self.base_url, route)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.timeout(self.timeout);
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    fn build_request(&self, request: &CompletionRequest) -> ApiRequest {
        ApiRequest {
            model: request.model.clone(),
            messages: convert_messages(&request.messages),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            stream: false,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ProviderError> {
        let response = self.authorize(builder).send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout(self.timeout.as_secs())
            } else {
                ProviderError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&text)
            .map(|envelope| envelope.error.message)
            .unwrap_or(text);

        Err(match status.as_u16() {
            401 | 403 => ProviderError::AuthenticationFailed(message),
            429 => ProviderError::RateLimited {
                retry_after_seconds: retry_after.unwrap_or(0),
            },
            code => ProviderError::ApiError {
                status: code,
                message,
            },
        })
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, ProviderError> {
        let api_request = self.build_request(&request);
        let url = self.endpoint("chat/completions");
        debug!(url = %url, model = %api_request.model, "Sending completion request");

        let response = self.send(self.client.post(&url).json(&api_request)).await?;
        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        parse_response(api_response)
    }

    async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        let url = self.endpoint("models");
        let response = self.send(self.client.get(&url)).await?;
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        // A 200 without a model list still proves the endpoint is up.
        let models = serde_json::from_str::<ModelList>(&text).unwrap_or_default();
        Ok(models.data.into_iter().map(|m| m.id).collect())
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;

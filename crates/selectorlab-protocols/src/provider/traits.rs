//! LLM Provider trait definition.

use async_trait::async_trait;

use super::{CompletionRequest, CompletionResponse};
use crate::error::ProviderError;

/// Core trait for chat-completion backends.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Base address requests are sent to.
    fn base_url(&self) -> &str;

    /// Generate a completion (non-streaming).
    async fn complete(&self, request: CompletionRequest)
        -> Result<CompletionResponse, ProviderError>;

    /// List model ids served by the endpoint. Doubles as a reachability check.
    async fn list_models(&self) -> Result<Vec<String>, ProviderError>;
}

//! Live assistant backed by an OpenAI-compatible endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use selectorlab_config::Config;
use selectorlab_protocols::assistant::{Assistant, GenerationContext};
use selectorlab_protocols::error::AssistantError;
use selectorlab_protocols::provider::{CompletionRequest, LLMProvider, Message};
use selectorlab_protocols::types::{GeneratedLocators, Provenance, RefinementSuggestion};
use selectorlab_protocols::wire::RefineRequest;
use selectorlab_provider_openai::OpenAIProvider;

use crate::parse::{parse_generation, parse_refinement};
use crate::prompts::{generation_messages, refinement_messages};

/// Sends prompts to a chat-completions provider and parses the replies.
pub struct LiveAssistant {
    provider: Arc<dyn LLMProvider>,
    model: String,
    temperature: f32,
    max_tokens: u32,
    max_context_chars: usize,
}

impl LiveAssistant {
    pub fn new(provider: Arc<dyn LLMProvider>, config: &Config) -> Self {
        Self {
            provider,
            model: config.assistant.model.clone(),
            temperature: config.assistant.temperature,
            max_tokens: config.assistant.max_tokens,
            max_context_chars: config.assistant.max_context_chars,
        }
    }

    /// Live assistant for `endpoint`, using the configured key and the
    /// effective network timeout.
    pub fn for_endpoint(endpoint: &str, config: &Config) -> Self {
        let provider = OpenAIProvider::with_base_url(
            endpoint,
            config.assistant.api_key.clone(),
            config.network.effective_timeout(),
        );
        Self::new(Arc::new(provider), config)
    }

    pub fn endpoint(&self) -> &str {
        self.provider.base_url()
    }

    async fn ask(&self, messages: Vec<Message>) -> Result<String, AssistantError> {
        let request = CompletionRequest::new(self.model.clone(), messages)
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature);
        let response = self.provider.complete(request).await?;
        debug!(
            endpoint = %self.endpoint(),
            chars = response.content.len(),
            completion_tokens = response.usage.completion_tokens,
            "Assistant replied"
        );
        Ok(response.content)
    }
}

#[async_trait]
impl Assistant for LiveAssistant {
    fn provenance(&self) -> Provenance {
        Provenance::Live {
            endpoint: self.endpoint().to_string(),
        }
    }

    async fn generate(&self, ctx: &GenerationContext) -> Result<GeneratedLocators, AssistantError> {
        let reply = self
            .ask(generation_messages(ctx, self.max_context_chars))
            .await?;
        let locators = parse_generation(&reply, &ctx.url)?;
        info!(
            url = %ctx.url,
            fields = locators.fields().len(),
            "Generated locators"
        );
        Ok(GeneratedLocators {
            locators,
            provenance: self.provenance(),
            raw_response: Some(reply),
        })
    }

    async fn refine(&self, request: &RefineRequest) -> Result<RefinementSuggestion, AssistantError> {
        let reply = self.ask(refinement_messages(request)).await?;
        parse_refinement(&reply, &request.field_name, self.provenance())
    }
}

#[cfg(test)]
#[path = "live_tests.rs"]
mod tests;

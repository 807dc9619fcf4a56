//! Per-session assistant selection and the fallback policy.

use std::sync::Arc;

use tracing::{debug, info, warn};

use selectorlab_config::Config;
use selectorlab_protocols::assistant::{Assistant, GenerationContext};
use selectorlab_protocols::error::AssistantError;
use selectorlab_protocols::types::{GeneratedLocators, Provenance, RefinementSuggestion, SyntheticReason};
use selectorlab_protocols::wire::RefineRequest;
use selectorlab_tools_web::{Retriever, Verifier};

use crate::discovery::{configured_candidates, discover_among};
use crate::live::LiveAssistant;
use crate::mock::MockAssistant;
use crate::probe::ConnectivityProbe;

/// Choose the assistant for a session.
///
/// An explicit `mock_mode` wins. Without one, the configured endpoint is
/// probed, then auto-discovery runs, and the mock answers if both fail.
pub async fn select_assistant(config: &Config) -> Arc<dyn Assistant> {
    select_assistant_among(config, &configured_candidates(config)).await
}

/// [`select_assistant`] with an explicit discovery candidate list.
pub async fn select_assistant_among(config: &Config, candidates: &[String]) -> Arc<dyn Assistant> {
    let configured = config.assistant.endpoint_url.as_str();
    match config.assistant.mock_mode {
        Some(true) => {
            info!("Mock mode configured, using synthetic assistant");
            Arc::new(MockAssistant::new(SyntheticReason::Configured))
        }
        Some(false) => {
            info!(endpoint = %configured, "Mock mode disabled, using live assistant");
            Arc::new(LiveAssistant::for_endpoint(configured, config))
        }
        None => {
            let probe = ConnectivityProbe::from_config(config);
            if probe.probe(configured).await.reachable {
                return Arc::new(LiveAssistant::for_endpoint(configured, config));
            }

            let configured = configured.trim_end_matches('/');
            let others: Vec<String> = candidates
                .iter()
                .filter(|c| c.as_str() != configured)
                .cloned()
                .collect();
            match discover_among(&probe, &others).await {
                Some(endpoint) => Arc::new(LiveAssistant::for_endpoint(&endpoint, config)),
                None => {
                    warn!("No assistant endpoint reachable, using synthetic assistant");
                    Arc::new(MockAssistant::new(SyntheticReason::ProbeFailed))
                }
            }
        }
    }
}

/// Session-scoped entry point for generation and refinement.
///
/// An unavailable live endpoint falls back to the mock for that call; the
/// result's provenance records the fallback.
pub struct AssistantBridge {
    assistant: Arc<dyn Assistant>,
    retriever: Retriever,
    verifier: Verifier,
}

impl AssistantBridge {
    pub fn new(assistant: Arc<dyn Assistant>, config: &Config) -> Self {
        Self {
            assistant,
            retriever: Retriever::from_config(&config.network),
            verifier: Verifier::from_config(&config.network, &config.verify),
        }
    }

    /// Select an assistant for `config` and wrap it.
    pub async fn connect(config: &Config) -> Self {
        Self::new(select_assistant(config).await, config)
    }

    pub fn provenance(&self) -> Provenance {
        self.assistant.provenance()
    }

    /// Propose a locator set for `intent` on `url`.
    ///
    /// Page markup is included in the prompt when it can be retrieved.
    pub async fn generate(&self, url: &str, intent: &str) -> Result<GeneratedLocators, AssistantError> {
        let mut ctx = GenerationContext::new(url, intent);
        if !self.provenance().is_synthetic() {
            match self.retriever.retrieve_html(url).await {
                Ok(page) => ctx = ctx.with_markup(page.body),
                Err(e) => warn!(url = %url, error = %e, "Generating without page markup"),
            }
        }

        match self.assistant.generate(&ctx).await {
            Err(e) if e.is_unavailable() => {
                warn!(error = %e, "Assistant unavailable, answering with synthetic locators");
                fallback(&e).generate(&ctx).await
            }
            other => other,
        }
    }

    pub async fn refine(&self, request: &RefineRequest) -> Result<RefinementSuggestion, AssistantError> {
        match self.assistant.refine(request).await {
            Err(e) if e.is_unavailable() => {
                warn!(field = %request.field_name, error = %e, "Assistant unavailable, answering with synthetic refinement");
                fallback(&e).refine(request).await
            }
            other => other,
        }
    }

    /// Refine a field using the markup around its current first match.
    pub async fn refine_field(
        &self,
        url: &str,
        field_name: &str,
        current_expression: &str,
    ) -> Result<RefinementSuggestion, AssistantError> {
        let parent_html_snippet = match self.verifier.context_snippet(url, current_expression).await {
            Ok(Some(snippet)) => snippet,
            Ok(None) => {
                debug!(url = %url, expression = %current_expression, "No match to take context from");
                String::new()
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Refining without context markup");
                String::new()
            }
        };

        self.refine(&RefineRequest {
            field_name: field_name.to_string(),
            current_expression: current_expression.to_string(),
            parent_html_snippet,
        })
        .await
    }
}

fn fallback(err: &AssistantError) -> MockAssistant {
    MockAssistant::new(SyntheticReason::Fallback(err.to_string()))
}

#[cfg(test)]
#[path = "bridge_tests.rs"]
mod tests;

//! Assistant trait: the seam between live and synthetic suggestion sources.

use async_trait::async_trait;

use crate::error::AssistantError;
use crate::types::{GeneratedLocators, Provenance, RefinementSuggestion};
use crate::wire::RefineRequest;

/// Input to locator generation.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    pub url: String,
    pub intent: String,
    /// Markup excerpt of the target page, when it could be retrieved.
    pub markup_excerpt: Option<String>,
}

impl GenerationContext {
    pub fn new(url: impl Into<String>, intent: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            intent: intent.into(),
            markup_excerpt: None,
        }
    }

    pub fn with_markup(mut self, markup: impl Into<String>) -> Self {
        self.markup_excerpt = Some(markup.into());
        self
    }
}

/// Source of locator suggestions.
///
/// Implementations tag every result with their [`Provenance`].
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Provenance attached to results from this assistant.
    fn provenance(&self) -> Provenance;

    /// Propose a locator set for a natural-language intent.
    async fn generate(&self, ctx: &GenerationContext) -> Result<GeneratedLocators, AssistantError>;

    /// Propose a better expression for one locator.
    async fn refine(&self, request: &RefineRequest) -> Result<RefinementSuggestion, AssistantError>;
}

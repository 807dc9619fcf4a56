//! Locator verifier: runs a candidate locator against a live page.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use selectorlab_config::{NetworkConfig, VerifyConfig};
use selectorlab_protocols::error::{SelectorError, VerifyError};
use selectorlab_protocols::types::{ExtractionMode, Locator, VerificationResult};
use selectorlab_protocols::wire::{SelectorTestRequest, SelectorTestResponse};

use crate::retrieval::Retriever;

/// Verifies locators against freshly retrieved markup.
///
/// Retrieval shares the proxy's path but skips the embedding rewrite.
/// Verification has no side effects.
#[derive(Debug, Clone)]
pub struct Verifier {
    retriever: Retriever,
    preview_chars: usize,
}

impl Verifier {
    pub fn new(retriever: Retriever, preview_chars: usize) -> Self {
        Self {
            retriever,
            preview_chars,
        }
    }

    pub fn from_config(network: &NetworkConfig, verify: &VerifyConfig) -> Self {
        Self::new(Retriever::from_config(network), verify.preview_chars)
    }

    pub fn preview_chars(&self) -> usize {
        self.preview_chars
    }

    /// Verify an ad-hoc expression. The locator is named after the expression.
    ///
    /// An extraction suffix embedded in `expression` wins over `mode`.
    pub async fn verify(
        &self,
        url: &str,
        expression: &str,
        mode: ExtractionMode,
    ) -> Result<VerificationResult, VerifyError> {
        let locator = adhoc_locator(expression, mode)?;
        self.verify_locator(url, &locator).await
    }

    /// Verify a named locator.
    pub async fn verify_locator(
        &self,
        url: &str,
        locator: &Locator,
    ) -> Result<VerificationResult, VerifyError> {
        // Syntax errors are reported before any network traffic.
        compile_selector(locator.css())?;

        let retrieved = self.retriever.retrieve_html(url).await?;
        let result = verify_html(&retrieved.body, locator, self.preview_chars)?;
        info!(
            url = %url,
            field = %locator.name(),
            expression = %locator.expression(),
            match_count = result.match_count,
            "Verified locator"
        );
        Ok(result)
    }

    /// Serve a selector-test request, echoing the field name for
    /// reconciliation of out-of-order results.
    pub async fn handle(&self, request: &SelectorTestRequest) -> SelectorTestResponse {
        let outcome = match &request.field_name {
            Some(name) => {
                match Locator::new(name.as_str(), &request.expression, request.extraction_mode.clone()) {
                    Ok(locator) => self.verify_locator(&request.url, &locator).await,
                    Err(e) => Err(e.into()),
                }
            }
            None => {
                self.verify(&request.url, &request.expression, request.extraction_mode.clone())
                    .await
            }
        };
        SelectorTestResponse::from_outcome(request.field_name.clone(), &outcome)
    }

    /// Outer markup of the first match's parent element, for refinement
    /// prompts. `None` when nothing matches.
    pub async fn context_snippet(
        &self,
        url: &str,
        expression: &str,
    ) -> Result<Option<String>, VerifyError> {
        let locator = adhoc_locator(expression, ExtractionMode::Text)?;
        compile_selector(locator.css())?;

        let retrieved = self.retriever.retrieve_html(url).await?;
        Ok(context_snippet_html(
            &retrieved.body,
            locator.css(),
            self.preview_chars.saturating_mul(4),
        )?)
    }
}

fn adhoc_locator(expression: &str, mode: ExtractionMode) -> Result<Locator, SelectorError> {
    let name = expression.trim();
    if name.is_empty() {
        return Err(SelectorError::EmptyExpression);
    }
    Locator::new(name, expression, mode)
}

fn compile_selector(css: &str) -> Result<Selector, SelectorError> {
    Selector::parse(css).map_err(|e| SelectorError::Syntax {
        expression: css.to_string(),
        message: e.to_string(),
    })
}

/// Apply a locator to markup and build bounded previews of the first match.
pub fn verify_html(
    markup: &str,
    locator: &Locator,
    preview_chars: usize,
) -> Result<VerificationResult, SelectorError> {
    let selector = compile_selector(locator.css())?;
    let document = Html::parse_document(markup);

    let mut matches = document.select(&selector);
    let Some(first) = matches.next() else {
        debug!(expression = %locator.expression(), "No matches");
        return Ok(VerificationResult::empty(locator.clone()));
    };
    let match_count = 1 + matches.count();

    let sample_text = match locator.mode() {
        ExtractionMode::Attribute(name) => first
            .value()
            .attr(name)
            .map(|value| truncate_preview(value.trim(), preview_chars)),
        ExtractionMode::Text | ExtractionMode::Html => {
            Some(truncate_preview(&element_text(first), preview_chars))
        }
    };

    Ok(VerificationResult {
        locator: locator.clone(),
        match_count,
        sample_text,
        sample_html: Some(truncate_preview(&first.html(), preview_chars)),
        error: None,
    })
}

/// Outer markup of the parent of the first element matching `css`.
pub fn context_snippet_html(
    markup: &str,
    css: &str,
    limit: usize,
) -> Result<Option<String>, SelectorError> {
    let selector = compile_selector(css)?;
    let document = Html::parse_document(markup);
    Ok(document.select(&selector).next().map(|first| {
        let context = first.parent().and_then(ElementRef::wrap).unwrap_or(first);
        truncate_preview(&context.html(), limit)
    }))
}

/// Bound a preview to `max_chars` characters, marking the cut with `...`.
pub fn truncate_preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Concatenated descendant text, trimmed at the ends only.
fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
#[path = "verifier_tests.rs"]
mod tests;

//! Deterministic offline assistant.

use async_trait::async_trait;
use tracing::info;

use selectorlab_protocols::assistant::{Assistant, GenerationContext};
use selectorlab_protocols::error::AssistantError;
use selectorlab_protocols::types::{
    ExtractionMode, GeneratedLocators, Locator, LocatorSet, Provenance, RefinementSuggestion,
    SyntheticReason, split_expression,
};
use selectorlab_protocols::wire::RefineRequest;

/// Intent keywords and the canned field each one contributes.
const KEYWORD_FIELDS: &[(&[&str], &str, &str)] = &[
    (&["price"], "price", ".product_main .price_color::text"),
    (&["title"], "title", ".product_main h1::text"),
    (&["availability", "stock"], "availability", ".product_main .availability::text"),
    (&["description"], "description", "#product_description + p::text"),
    (&["category"], "category", ".breadcrumb li:nth-child(3) a::text"),
    (&["image"], "image", ".item.active img::attr(src)"),
    (&["review", "rating"], "rating", ".star-rating::attr(class)"),
    (&["link"], "link", "a::attr(href)"),
];

const PAGINATION_KEYWORDS: &[&str] = &["pagination", "next page"];
const PAGINATION_EXPRESSION: &str = ".next a::attr(href)";

const GENERIC_FIELDS: &[(&str, &str)] = &[
    ("title", "h1::text"),
    ("price", ".price::text"),
    ("content", "p::text"),
    ("links", "a::attr(href)"),
    ("images", "img::attr(src)"),
];

const MOCK_CONFIDENCE: f32 = 0.5;

/// Canned responder used when no live endpoint is available.
///
/// Output is plausible but fixed, and always tagged synthetic.
#[derive(Debug, Clone)]
pub struct MockAssistant {
    reason: SyntheticReason,
}

impl MockAssistant {
    pub fn new(reason: SyntheticReason) -> Self {
        Self { reason }
    }

    pub fn reason(&self) -> &SyntheticReason {
        &self.reason
    }

    fn canned_locators(&self, ctx: &GenerationContext) -> Result<LocatorSet, AssistantError> {
        let intent = ctx.intent.to_lowercase();
        let mut set = LocatorSet::new(ctx.url.clone());

        for (keywords, name, expression) in KEYWORD_FIELDS {
            if keywords.iter().any(|k| intent.contains(k)) {
                set.upsert_field(canned(name, expression)?);
            }
        }
        if PAGINATION_KEYWORDS.iter().any(|k| intent.contains(k)) {
            set.pagination = Some(canned("pagination", PAGINATION_EXPRESSION)?);
        }

        if set.fields().is_empty() {
            for (name, expression) in GENERIC_FIELDS {
                set.upsert_field(canned(name, expression)?);
            }
        }
        Ok(set)
    }
}

fn canned(name: &str, expression: &str) -> Result<Locator, AssistantError> {
    Locator::parse(name, expression).map_err(|e| AssistantError::Parse(e.to_string()))
}

/// Extraction mode guessed from a field name.
fn mode_for_field(field_name: &str) -> ExtractionMode {
    let name = field_name.to_lowercase();
    if name.contains("link") || name.contains("url") || name.contains("href") {
        ExtractionMode::Attribute("href".to_string())
    } else if name.contains("image") || name.contains("img") || name.contains("photo") {
        ExtractionMode::Attribute("src".to_string())
    } else {
        ExtractionMode::Text
    }
}

#[async_trait]
impl Assistant for MockAssistant {
    fn provenance(&self) -> Provenance {
        Provenance::Synthetic {
            reason: self.reason.clone(),
        }
    }

    async fn generate(&self, ctx: &GenerationContext) -> Result<GeneratedLocators, AssistantError> {
        let locators = self.canned_locators(ctx)?;
        info!(url = %ctx.url, fields = locators.fields().len(), reason = ?self.reason, "Returning synthetic locators");
        Ok(GeneratedLocators {
            locators,
            provenance: self.provenance(),
            raw_response: None,
        })
    }

    async fn refine(&self, request: &RefineRequest) -> Result<RefinementSuggestion, AssistantError> {
        let css = split_expression(&request.current_expression)
            .map(|(css, _)| css.to_string())
            .unwrap_or_else(|_| request.current_expression.trim().to_string());
        let mode = mode_for_field(&request.field_name);
        let locator = Locator::new(request.field_name.as_str(), &css, mode)
            .map_err(|e| AssistantError::Parse(e.to_string()))?;

        Ok(RefinementSuggestion {
            field_name: request.field_name.clone(),
            proposed_expression: locator.expression(),
            proposed_extraction_mode: locator.mode().clone(),
            confidence: MOCK_CONFIDENCE,
            rationale: format!(
                "Synthetic suggestion: kept the current selector and chose `{}` extraction from the field name.",
                locator.mode()
            ),
            provenance: self.provenance(),
        })
    }
}

//! Assistant output: generated locator sets and refinement suggestions.

use serde::{Deserialize, Serialize};

use super::{ExtractionMode, LocatorSet};

/// Why a synthetic (mock) response was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SyntheticReason {
    /// Mock mode was switched on explicitly.
    Configured,
    /// The connectivity probe found no reachable endpoint.
    ProbeFailed,
    /// The live endpoint failed for this call.
    Fallback(String),
}

/// Marks whether output came from a real assistant or the mock responder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Provenance {
    Live { endpoint: String },
    Synthetic { reason: SyntheticReason },
}

impl Provenance {
    pub fn is_synthetic(&self) -> bool {
        matches!(self, Self::Synthetic { .. })
    }
}

/// Locator set proposed by an assistant for a natural-language intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedLocators {
    pub locators: LocatorSet,
    pub provenance: Provenance,
    /// Raw assistant reply, kept for inspection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

/// A proposed replacement for one locator's expression.
///
/// The user always decides: there is no automatic acceptance threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinementSuggestion {
    pub field_name: String,
    pub proposed_expression: String,
    pub proposed_extraction_mode: ExtractionMode,
    /// In `[0, 1]`.
    pub confidence: f32,
    pub rationale: String,
    pub provenance: Provenance,
}

impl RefinementSuggestion {
    /// Clamp a raw score into `[0, 1]`; NaN becomes 0.
    pub fn clamp_confidence(raw: f64) -> f32 {
        if raw.is_nan() {
            0.0
        } else {
            raw.clamp(0.0, 1.0) as f32
        }
    }
}

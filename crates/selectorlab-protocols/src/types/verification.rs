//! Verification results.

use serde::{Deserialize, Serialize};

use super::Locator;
use crate::error::ErrorKind;

/// What a locator matched on a live page.
///
/// Ephemeral: computed on demand and superseded by the next call for the
/// same locator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub locator: Locator,
    pub match_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
}

impl VerificationResult {
    /// A successful result with no matches.
    pub fn empty(locator: Locator) -> Self {
        Self {
            locator,
            match_count: 0,
            sample_text: None,
            sample_html: None,
            error: None,
        }
    }

    pub fn field_name(&self) -> &str {
        self.locator.name()
    }

    pub fn has_matches(&self) -> bool {
        self.match_count > 0
    }
}

//! Request and response shapes for the pipeline's endpoints.
//!
//! Server routing is out of scope; these types are what a routing layer
//! would carry.

use serde::{Deserialize, Serialize};

use crate::error::{
    AssistantError, ErrorKind, FetchError, SelectorError, SynthesisError, TransferError, VerifyError,
};
use crate::types::{ExtractionMode, VerificationResult};

/// Structured failure reported instead of an empty result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireError {
    pub kind: ErrorKind,
    pub message: String,
    /// Which request input was invalid, when the user can correct it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
}

impl WireError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            input: None,
        }
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }
}

impl From<&FetchError> for WireError {
    fn from(err: &FetchError) -> Self {
        let wire = Self::new(err.kind(), err.to_string());
        match err.input() {
            Some(input) => wire.with_input(input),
            None => wire,
        }
    }
}

impl From<&VerifyError> for WireError {
    fn from(err: &VerifyError) -> Self {
        let wire = Self::new(err.kind(), err.to_string());
        match err.input() {
            Some(input) => wire.with_input(input),
            None => wire,
        }
    }
}

impl From<&SelectorError> for WireError {
    fn from(err: &SelectorError) -> Self {
        Self::new(err.kind(), err.to_string()).with_input(err.input())
    }
}

impl From<&SynthesisError> for WireError {
    fn from(err: &SynthesisError) -> Self {
        Self::new(err.kind(), err.to_string()).with_input(err.input())
    }
}

impl From<&AssistantError> for WireError {
    fn from(err: &AssistantError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

impl From<&TransferError> for WireError {
    fn from(err: &TransferError) -> Self {
        Self::new(err.kind(), err.to_string()).with_input(err.input())
    }
}

/// Proxy fetch endpoint request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyFetchRequest {
    pub url: String,
}

/// Proxy fetch endpoint response: rewritten markup or an explicit failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyFetchResponse {
    pub success: bool,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<WireError>,
}

impl ProxyFetchResponse {
    pub fn ok(url: impl Into<String>, markup: String) -> Self {
        Self {
            success: true,
            url: url.into(),
            markup: Some(markup),
            error: None,
        }
    }

    pub fn failed(url: impl Into<String>, err: &FetchError) -> Self {
        Self {
            success: false,
            url: url.into(),
            markup: None,
            error: Some(err.into()),
        }
    }
}

/// Selector-test endpoint request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorTestRequest {
    pub url: String,
    pub expression: String,
    #[serde(default)]
    pub extraction_mode: ExtractionMode,
    /// Echoed back so concurrent results can be reconciled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
}

/// Selector-test endpoint response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorTestResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    pub match_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<WireError>,
}

impl SelectorTestResponse {
    pub fn from_outcome(
        field_name: Option<String>,
        outcome: &Result<VerificationResult, VerifyError>,
    ) -> Self {
        match outcome {
            Ok(result) => Self {
                success: true,
                field_name,
                match_count: result.match_count,
                sample_text: result.sample_text.clone(),
                sample_html: result.sample_html.clone(),
                error: None,
            },
            Err(err) => Self {
                success: false,
                field_name,
                match_count: 0,
                sample_text: None,
                sample_html: None,
                error: Some(err.into()),
            },
        }
    }
}

/// Assistant refine request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefineRequest {
    pub field_name: String,
    pub current_expression: String,
    pub parent_html_snippet: String,
}

/// Connectivity report for the configured assistant endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeReport {
    pub endpoint: String,
    pub reachable: bool,
    #[serde(default)]
    pub models: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

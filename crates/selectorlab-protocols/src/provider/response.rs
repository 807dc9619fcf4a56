//! Completion response types.

use serde::{Deserialize, Serialize};

/// Token usage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// Response from a completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Model used.
    pub model: String,

    /// Text of the assistant's reply.
    pub content: String,

    /// Token usage, when reported.
    #[serde(default)]
    pub usage: Usage,
}

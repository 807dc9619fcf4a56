//! # SelectorLab Protocols
//!
//! Shared definitions for the locator derivation pipeline.
//! Contains only data types and interface definitions - no I/O.
//!
//! ## Core Traits
//!
//! - [`Assistant`] - Live or synthetic locator suggestion source
//! - [`LLMProvider`] - Chat-completion backend used by the live assistant

pub mod assistant;
pub mod error;
pub mod provider;
pub mod types;
pub mod wire;

// Re-export core traits
pub use assistant::{Assistant, GenerationContext};
pub use provider::{CompletionRequest, CompletionResponse, LLMProvider, Message, MessageRole};
pub use error::{
    AssistantError, ErrorKind, FetchError, ProviderError, SelectorError, SynthesisError,
    TransferError, VerifyError,
};
pub use types::*;

//! OpenAI-compatible chat-completions provider for SelectorLab.
//!
//! Local inference servers (LM Studio and similar) expose the same
//! `/chat/completions` and `/models` routes, so one client covers both.

mod api;
mod converter;
mod provider;

pub use provider::OpenAIProvider;

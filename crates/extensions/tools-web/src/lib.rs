//! Web tools for SelectorLab.
//!
//! Provides the shared page retrieval path, the fetch proxy that makes a
//! third-party page embeddable, and the locator verifier.

mod proxy;
mod retrieval;
mod rewrite;
mod verifier;

pub use proxy::FetchProxy;
pub use retrieval::{Retrieved, Retriever, parse_target};
pub use rewrite::{filter_headers, is_html, rewrite_for_embedding};
pub use verifier::{Verifier, context_snippet_html, truncate_preview, verify_html};

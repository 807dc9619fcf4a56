//! Proxied documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Markup fetched on the server and rewritten for framed display.
///
/// Transient: recomputed on every load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxiedDocument {
    /// URL the caller asked for.
    pub origin_url: String,
    /// URL after redirects; relative references resolve against this.
    pub final_url: String,
    pub rewritten_markup: String,
    /// Response headers that survived framing-header stripping.
    #[serde(default)]
    pub headers: Vec<(String, String)>,
    pub fetched_at: DateTime<Utc>,
}

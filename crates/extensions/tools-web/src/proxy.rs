//! Fetch proxy: server-side retrieval rewritten for framed display.

use chrono::Utc;
use tracing::{info, warn};

use selectorlab_protocols::FetchError;
use selectorlab_protocols::types::ProxiedDocument;
use selectorlab_protocols::wire::{ProxyFetchRequest, ProxyFetchResponse};

use crate::retrieval::Retriever;
use crate::rewrite::{filter_headers, rewrite_for_embedding};

/// Retrieves third-party pages on the server and makes them embeddable.
#[derive(Debug, Clone)]
pub struct FetchProxy {
    retriever: Retriever,
}

impl FetchProxy {
    pub fn new(retriever: Retriever) -> Self {
        Self { retriever }
    }

    /// Fetch `url` and rewrite it for the inspection surface.
    pub async fn fetch_for_embedding(&self, url: &str) -> Result<ProxiedDocument, FetchError> {
        let retrieved = self.retriever.retrieve_html(url).await?;
        let rewritten_markup = rewrite_for_embedding(&retrieved.body, &retrieved.final_url);

        info!(
            url = %retrieved.requested_url,
            final_url = %retrieved.final_url,
            bytes = rewritten_markup.len(),
            "Proxied page for embedding"
        );

        Ok(ProxiedDocument {
            origin_url: retrieved.requested_url,
            final_url: retrieved.final_url.to_string(),
            rewritten_markup,
            headers: filter_headers(&retrieved.headers),
            fetched_at: Utc::now(),
        })
    }

    /// Serve a proxy fetch request. Failures become an explicit failure
    /// response, never an empty document.
    pub async fn handle(&self, request: &ProxyFetchRequest) -> ProxyFetchResponse {
        match self.fetch_for_embedding(&request.url).await {
            Ok(doc) => ProxyFetchResponse::ok(doc.origin_url, doc.rewritten_markup),
            Err(e) => {
                warn!(url = %request.url, error = %e, "Proxy fetch failed");
                ProxyFetchResponse::failed(&request.url, &e)
            }
        }
    }
}

#[cfg(test)]
#[path = "proxy_tests.rs"]
mod tests;

//! Inspected documents and the access check into them.
//!
//! The inspection surface reads into a document it loaded through the
//! fetch proxy. Every access goes through [`InspectedDocument::access`],
//! which returns a typed error instead of failing somewhere deeper.

use ego_tree::{NodeId, NodeRef};
use scraper::{Html, Node, Selector};
use url::Url;

use selectorlab_protocols::error::{SelectorError, SynthesisError};

use crate::synthesizer::Synthesizer;

/// Markup loaded into the inspection surface, keyed by its origin.
pub struct InspectedDocument {
    url: Url,
    html: Html,
}

impl InspectedDocument {
    /// Parse `markup` as the document served for `url`.
    pub fn load(url: &str, markup: &str) -> Result<Self, SynthesisError> {
        let url = Url::parse(url).map_err(|_| SynthesisError::NoDocument)?;
        Ok(Self {
            url,
            html: Html::parse_document(markup),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Check that a frame showing `frame_url` may be read from here.
    ///
    /// Access is granted only when the frame shows the loaded document's origin.
    pub fn access(&self, frame_url: &str) -> Result<DocumentAccess<'_>, SynthesisError> {
        let denied = || SynthesisError::AccessDenied {
            requested: frame_url.to_string(),
            loaded: self.url.to_string(),
        };
        let requested = Url::parse(frame_url).map_err(|_| denied())?;
        if requested.origin() != self.url.origin() {
            return Err(denied());
        }
        Ok(DocumentAccess { html: &self.html })
    }
}

/// Granted read access to an inspected document.
pub struct DocumentAccess<'a> {
    html: &'a Html,
}

impl<'a> DocumentAccess<'a> {
    /// Resolve a pointer target to a node of this document.
    pub fn node(&self, id: NodeId) -> Result<NodeRef<'a, Node>, SynthesisError> {
        self.html
            .tree
            .get(id)
            .ok_or_else(|| SynthesisError::UnknownNode(format!("{:?}", id)))
    }

    /// Node id of the first element matching a CSS selector.
    pub fn first_match(&self, css: &str) -> Result<Option<NodeId>, SelectorError> {
        let selector = Selector::parse(css).map_err(|e| SelectorError::Syntax {
            expression: css.to_string(),
            message: e.to_string(),
        })?;
        Ok(self.html.select(&selector).next().map(|el| el.id()))
    }

    /// Synthesize a path for the node behind a pointer target.
    pub fn synthesize(&self, synthesizer: &Synthesizer, id: NodeId) -> Result<String, SynthesisError> {
        synthesizer.synthesize(self.node(id)?)
    }
}

//! Locator synthesis for SelectorLab.
//!
//! Turns a clicked element of an inspected document into a CSS path.

mod document;
mod synthesizer;

pub use document::{DocumentAccess, InspectedDocument};
pub use synthesizer::{Synthesizer, escape_ident};

pub use ego_tree::NodeId;

//! CSS path synthesis.

use std::collections::HashSet;

use ego_tree::NodeRef;
use scraper::{ElementRef, Node};
use tracing::debug;

use selectorlab_protocols::error::SynthesisError;

/// Builds `html > body > div.list > p:nth-of-type(2)`-style paths.
///
/// Per ancestor: an id ends the path (`tag#id`), else the first usable
/// class (`tag.class`), else a 1-based `:nth-of-type(n)` qualifier when
/// `n > 1`. Classes injected by inspection tooling are skipped.
#[derive(Debug, Clone, Default)]
pub struct Synthesizer {
    excluded_classes: HashSet<String>,
}

impl Synthesizer {
    pub fn new<I, S>(excluded_classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded_classes: excluded_classes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_excluded(&self, class: &str) -> bool {
        self.excluded_classes.contains(class)
    }

    /// Synthesize a path for the clicked node.
    pub fn synthesize(&self, node: NodeRef<'_, Node>) -> Result<String, SynthesisError> {
        let element = ElementRef::wrap(node).ok_or_else(|| SynthesisError::NotAnElement {
            node_kind: node_kind(node.value()).to_string(),
        })?;

        let mut segments = Vec::new();
        let mut current = Some(element);

        while let Some(el) = current {
            let tag = el.value().name().to_ascii_lowercase();
            if tag == "html" {
                segments.push(tag);
                break;
            }

            if let Some(id) = el.value().attr("id").map(str::trim).filter(|id| !id.is_empty()) {
                segments.push(format!("{}#{}", tag, escape_ident(id)));
                break;
            }

            segments.push(self.segment(el, tag));
            current = el.parent().and_then(ElementRef::wrap);
        }

        segments.reverse();
        let path = segments.join(" > ");
        debug!(path = %path, "Synthesized locator");
        Ok(path)
    }

    fn segment(&self, el: ElementRef<'_>, tag: String) -> String {
        if let Some(class) = self.first_usable_class(el) {
            return format!("{}.{}", tag, escape_ident(class));
        }
        match same_tag_position(el) {
            1 => tag,
            n => format!("{}:nth-of-type({})", tag, n),
        }
    }

    fn first_usable_class<'a>(&self, el: ElementRef<'a>) -> Option<&'a str> {
        el.value()
            .attr("class")?
            .split_whitespace()
            .find(|class| !self.is_excluded(class))
    }
}

/// 1-based position among element siblings sharing the tag name.
fn same_tag_position(el: ElementRef<'_>) -> usize {
    let name = el.value().name();
    1 + el
        .prev_siblings()
        .filter_map(ElementRef::wrap)
        .filter(|sibling| sibling.value().name().eq_ignore_ascii_case(name))
        .count()
}

fn node_kind(node: &Node) -> &'static str {
    match node {
        Node::Document => "document",
        Node::Fragment => "fragment",
        Node::Doctype(_) => "doctype",
        Node::Comment(_) => "comment",
        Node::Text(_) => "text",
        Node::Element(_) => "element",
        Node::ProcessingInstruction(_) => "processing-instruction",
    }
}

/// Escape an id or class so it is valid as a CSS identifier.
///
/// Follows CSSOM "serialize an identifier": a leading digit, a digit after
/// a leading `-`, and control characters become code point escapes, and a
/// lone `-` is escaped.
pub fn escape_ident(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    if chars == ['-'] {
        return "\\-".to_string();
    }

    let mut out = String::with_capacity(ident.len());
    for (i, &c) in chars.iter().enumerate() {
        let numeric_start =
            c.is_ascii_digit() && (i == 0 || (i == 1 && chars[0] == '-'));
        if c == '\0' {
            out.push('\u{FFFD}');
        } else if c.is_ascii_control() || numeric_start {
            out.push_str(&format!("\\{:x} ", c as u32));
        } else if c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() {
            out.push(c);
        } else {
            out.push('\\');
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
#[path = "synthesizer_tests.rs"]
mod tests;

//! Text rewrites that make a fetched page embeddable.
//!
//! Markup is treated as text; nothing from the page is parsed into a DOM
//! or evaluated.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use url::Url;

static FRAMING_META: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)<meta\b[^>]*\bhttp-equiv\s*=\s*["']?\s*(?:x-frame-options|content-security-policy(?:-report-only)?)\b[^>]*>"#,
    )
    .expect("framing meta pattern")
});

static BASE_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<base\b(?P<pre>[^>]*?)\bhref\s*=\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<bare>[^\s>]+))(?P<post>[^>]*)>"#)
        .expect("base href pattern")
});

static HEAD_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<head\b[^>]*>").expect("head pattern"));

static HTML_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<html\b[^>]*>").expect("html pattern"));

/// Response headers that never travel with a proxied document.
const DROPPED_HEADERS: &[&str] = &[
    "x-frame-options",
    "content-security-policy",
    "content-security-policy-report-only",
    // hop-by-hop
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    // no longer matches the rewritten body
    "content-length",
];

/// Whether a response is HTML.
///
/// A declared content type decides on its own. Without one, the body must
/// start like an HTML document.
pub fn is_html(content_type: Option<&str>, body: &str) -> bool {
    match content_type.map(str::trim).filter(|ct| !ct.is_empty()) {
        Some(ct) => ct.to_ascii_lowercase().contains("html"),
        None => {
            let head: String = body.trim_start().chars().take(32).collect::<String>().to_ascii_lowercase();
            head.starts_with("<!doctype html") || head.starts_with("<html")
        }
    }
}

/// Drop framing-restriction and hop-by-hop headers.
pub fn filter_headers(headers: &[(String, String)]) -> Vec<(String, String)> {
    headers
        .iter()
        .filter(|(name, _)| !DROPPED_HEADERS.contains(&name.to_ascii_lowercase().as_str()))
        .cloned()
        .collect()
}

/// Rewrite markup so it can be framed and its relative references resolve
/// against `base`.
pub fn rewrite_for_embedding(markup: &str, base: &Url) -> String {
    let stripped = FRAMING_META.replace_all(markup, "");
    apply_base_href(&stripped, base)
}

fn apply_base_href(markup: &str, base: &Url) -> String {
    if BASE_HREF.is_match(markup) {
        return BASE_HREF
            .replacen(markup, 1, |caps: &Captures<'_>| {
                let href = caps
                    .name("dq")
                    .or_else(|| caps.name("sq"))
                    .or_else(|| caps.name("bare"))
                    .map_or("", |m| m.as_str());
                let resolved = base
                    .join(href.trim())
                    .map(|u| u.to_string())
                    .unwrap_or_else(|_| base.to_string());
                format!(
                    "<base{}href=\"{}\"{}>",
                    caps.name("pre").map_or(" ", |m| m.as_str()),
                    escape_attr(&resolved),
                    caps.name("post").map_or("", |m| m.as_str()),
                )
            })
            .into_owned();
    }

    let tag = format!("<base href=\"{}\">", escape_attr(base.as_str()));
    if let Some(m) = HEAD_OPEN.find(markup) {
        return splice(markup, m.end(), &tag);
    }
    if let Some(m) = HTML_OPEN.find(markup) {
        return splice(markup, m.end(), &format!("<head>{}</head>", tag));
    }
    format!("{}{}", tag, markup)
}

fn splice(markup: &str, at: usize, insert: &str) -> String {
    let mut out = String::with_capacity(markup.len() + insert.len());
    out.push_str(&markup[..at]);
    out.push_str(insert);
    out.push_str(&markup[at..]);
    out
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

#[cfg(test)]
#[path = "rewrite_tests.rs"]
mod tests;

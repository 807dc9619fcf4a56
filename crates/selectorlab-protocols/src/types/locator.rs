//! Locators and the expression dialect.
//!
//! An expression is a CSS selector optionally followed by an extraction
//! suffix: `::text`, `::html` or `::attr(NAME)`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SelectorError;

/// How content is pulled from a matched node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ExtractionMode {
    /// Trimmed text content.
    #[default]
    Text,
    /// Value of the named attribute.
    Attribute(String),
    /// Serialized outer markup.
    Html,
}

impl ExtractionMode {
    /// Render as an expression suffix, e.g. `::attr(href)`.
    pub fn suffix(&self) -> String {
        format!("::{}", self)
    }

    /// Keywords match case-insensitively. The attribute name keeps its case.
    fn parse_suffix(suffix: &str) -> Option<Self> {
        if suffix.eq_ignore_ascii_case("text") {
            return Some(Self::Text);
        }
        if suffix.eq_ignore_ascii_case("html") {
            return Some(Self::Html);
        }

        let head = suffix.get(..5)?;
        if !head.eq_ignore_ascii_case("attr(") {
            return None;
        }
        let name = suffix[5..].strip_suffix(')')?.trim();
        let name = name.trim_matches(|c| c == '"' || c == '\'');
        if name.is_empty() {
            None
        } else {
            Some(Self::Attribute(name.to_string()))
        }
    }
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Html => f.write_str("html"),
            Self::Attribute(name) => write!(f, "attr({})", name),
        }
    }
}

impl FromStr for ExtractionMode {
    type Err = SelectorError;

    /// Accepts `text`, `html`, `attr(NAME)`, `attr:NAME` and `attribute:NAME`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(mode) = Self::parse_suffix(s) {
            return Ok(mode);
        }
        for prefix in ["attr:", "attribute:"] {
            let matched = s
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix));
            if matched {
                let name = s[prefix.len()..].trim();
                if !name.is_empty() {
                    return Ok(Self::Attribute(name.to_string()));
                }
            }
        }
        Err(SelectorError::InvalidMode(s.to_string()))
    }
}

impl TryFrom<String> for ExtractionMode {
    type Error = SelectorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ExtractionMode> for String {
    fn from(mode: ExtractionMode) -> Self {
        mode.to_string()
    }
}

/// Split an expression into its CSS part and optional embedded mode.
///
/// Only the last `::` outside quotes, brackets and parentheses starts the
/// suffix, so `a[href*="::"]` stays plain CSS. The CSS part is returned
/// trimmed. It is not compiled here.
pub fn split_expression(expression: &str) -> Result<(&str, Option<ExtractionMode>), SelectorError> {
    let expression = expression.trim();
    if expression.is_empty() {
        return Err(SelectorError::EmptyExpression);
    }

    let (css, mode) = match last_top_level_separator(expression) {
        Some(pos) => {
            let suffix = expression[pos + 2..].trim();
            let mode = ExtractionMode::parse_suffix(suffix).ok_or_else(|| {
                SelectorError::UnknownSuffix {
                    expression: expression.to_string(),
                    suffix: suffix.to_string(),
                }
            })?;
            (expression[..pos].trim(), Some(mode))
        }
        None => (expression, None),
    };

    if css.is_empty() {
        return Err(SelectorError::EmptyExpression);
    }
    Ok((css, mode))
}

/// Byte offset of the last `::` that is not inside a string, an attribute
/// selector or a functional pseudo-class argument.
fn last_top_level_separator(expression: &str) -> Option<usize> {
    let bytes = expression.as_bytes();
    let mut quote: Option<u8> = None;
    let mut depth = 0usize;
    let mut last = None;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(_) if b == b'\\' => i += 1,
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'\\' => i += 1,
                b'"' | b'\'' => quote = Some(b),
                b'[' | b'(' => depth += 1,
                b']' | b')' => depth = depth.saturating_sub(1),
                b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                    last = Some(i);
                    i += 1;
                }
                _ => {}
            },
        }
        i += 1;
    }
    last
}

/// A named rule identifying data within a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LocatorRepr", into = "LocatorRepr")]
pub struct Locator {
    name: String,
    css: String,
    mode: ExtractionMode,
}

impl Locator {
    /// Build a locator from a name and a (possibly suffixed) expression.
    ///
    /// An embedded suffix wins over `default_mode`.
    pub fn new(
        name: impl Into<String>,
        expression: &str,
        default_mode: ExtractionMode,
    ) -> Result<Self, SelectorError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(SelectorError::EmptyName);
        }
        let (css, mode) = split_expression(expression)?;
        Ok(Self {
            name,
            css: css.to_string(),
            mode: mode.unwrap_or(default_mode),
        })
    }

    /// Build a locator, taking the mode from the expression suffix or `text`.
    pub fn parse(name: impl Into<String>, expression: &str) -> Result<Self, SelectorError> {
        Self::new(name, expression, ExtractionMode::Text)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The CSS part of the expression, without the extraction suffix.
    pub fn css(&self) -> &str {
        &self.css
    }

    pub fn mode(&self) -> &ExtractionMode {
        &self.mode
    }

    /// Canonical expression: CSS part plus extraction suffix.
    pub fn expression(&self) -> String {
        format!("{}{}", self.css, self.mode.suffix())
    }

    /// Replace expression and mode, keeping the name.
    pub fn replace_expression(
        &mut self,
        expression: &str,
        mode: ExtractionMode,
    ) -> Result<(), SelectorError> {
        let (css, embedded) = split_expression(expression)?;
        self.css = css.to_string();
        self.mode = embedded.unwrap_or(mode);
        Ok(())
    }
}

/// Serialized shape of a locator: `{name, expression}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LocatorRepr {
    name: String,
    expression: String,
}

impl TryFrom<LocatorRepr> for Locator {
    type Error = SelectorError;

    fn try_from(repr: LocatorRepr) -> Result<Self, Self::Error> {
        Locator::parse(repr.name, &repr.expression)
    }
}

impl From<Locator> for LocatorRepr {
    fn from(locator: Locator) -> Self {
        Self {
            expression: locator.expression(),
            name: locator.name,
        }
    }
}

#[cfg(test)]
#[path = "locator_tests.rs"]
mod tests;

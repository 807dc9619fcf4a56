//! Parsing assistant replies into locator sets and suggestions.
//!
//! Replies are free text that should contain one JSON object, either in a
//! ```` ```json ```` fence or inline.

use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use selectorlab_protocols::error::AssistantError;
use selectorlab_protocols::types::{
    ExtractionMode, Locator, LocatorSet, LocatorSetError, Provenance, RefinementSuggestion,
};

const ITEM_CONTAINER_KEYS: &[&str] = &["item_container", "items", "container"];
const PAGINATION_KEYS: &[&str] = &["pagination", "next_page"];

/// Locate the JSON object in a reply: a fenced `json` block if present,
/// otherwise the first balanced `{...}`.
pub fn extract_json(reply: &str) -> Option<&str> {
    if let Some(start) = reply.find("```json") {
        let body = &reply[start + "```json".len()..];
        let block = body.find("```").map_or(body, |end| &body[..end]).trim();
        if block.starts_with('{') {
            return Some(block);
        }
    }
    first_balanced_object(reply)
}

fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Object entries in document order; a repeated key keeps its first value.
struct OrderedEntries(Vec<(String, Value)>);

impl OrderedEntries {
    fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

impl<'de> Deserialize<'de> for OrderedEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = OrderedEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, Value)> = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    if !entries.iter().any(|(k, _)| *k == key) {
                        entries.push((key, value));
                    }
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

fn parse_object(reply: &str) -> Result<OrderedEntries, AssistantError> {
    let json = extract_json(reply)
        .ok_or_else(|| AssistantError::Parse("reply contains no JSON object".to_string()))?;
    serde_json::from_str(json)
        .map_err(|e: serde_json::Error| AssistantError::Parse(format!("invalid JSON object: {}", e)))
}

/// Map a generation reply onto a locator set for `target_url`.
///
/// Accepts `{item_container, pagination, fields: [{name, expression}]}` and
/// the flat `{name: expression}` form, where container and pagination keys
/// are promoted. Unusable entries are skipped; a reply with no usable
/// locator at all is a parse error.
pub fn parse_generation(reply: &str, target_url: &str) -> Result<LocatorSet, AssistantError> {
    let entries = parse_object(reply)?;
    let mut set = LocatorSet::new(target_url);

    match entries.get("fields") {
        Some(fields) => parse_structured(&entries, fields, &mut set)?,
        None => parse_flat(&entries, &mut set),
    }

    if set.is_empty() {
        return Err(AssistantError::Parse(
            "reply contains no usable locators".to_string(),
        ));
    }
    Ok(set)
}

fn parse_structured(
    entries: &OrderedEntries,
    fields: &Value,
    set: &mut LocatorSet,
) -> Result<(), AssistantError> {
    let fields = fields
        .as_array()
        .ok_or_else(|| AssistantError::Parse("`fields` is not a list".to_string()))?;

    for field in fields {
        let name = field.get("name").and_then(Value::as_str);
        let expression = field
            .get("expression")
            .or_else(|| field.get("selector"))
            .and_then(Value::as_str);
        match (name, expression) {
            (Some(name), Some(expression)) => add_field(set, name, expression),
            _ => warn!(entry = %field, "Skipping field without name and expression"),
        }
    }

    set.item_container = role_locator(entries.get("item_container"), "item_container");
    set.pagination = role_locator(entries.get("pagination"), "pagination");
    Ok(())
}

fn parse_flat(entries: &OrderedEntries, set: &mut LocatorSet) {
    for (key, value) in &entries.0 {
        let Some(expression) = value.as_str() else {
            continue;
        };
        let key = key.as_str();
        if ITEM_CONTAINER_KEYS.contains(&key) {
            if set.item_container.is_none() {
                set.item_container = build_locator("item_container", expression);
            }
        } else if PAGINATION_KEYS.contains(&key) {
            if set.pagination.is_none() {
                set.pagination = build_locator("pagination", expression);
            }
        } else {
            add_field(set, key, expression);
        }
    }
}

fn role_locator(value: Option<&Value>, name: &str) -> Option<Locator> {
    let expression = match value? {
        Value::String(s) => s.as_str(),
        Value::Object(obj) => obj.get("expression").and_then(Value::as_str)?,
        _ => return None,
    };
    build_locator(name, expression)
}

fn build_locator(name: &str, expression: &str) -> Option<Locator> {
    if expression.trim().is_empty() || expression.trim().eq_ignore_ascii_case("null") {
        return None;
    }
    match Locator::parse(name, expression) {
        Ok(locator) => Some(locator),
        Err(e) => {
            warn!(name = %name, expression = %expression, error = %e, "Skipping unusable locator");
            None
        }
    }
}

fn add_field(set: &mut LocatorSet, name: &str, expression: &str) {
    let Some(locator) = build_locator(name, expression) else {
        return;
    };
    if let Err(LocatorSetError::DuplicateName(name)) = set.add_field(locator) {
        warn!(name = %name, "Ignoring repeated field name");
    }
}

/// Map a refinement reply onto a suggestion for `field_name`.
///
/// `confidence` must be a number; it is clamped to `[0, 1]`.
pub fn parse_refinement(
    reply: &str,
    field_name: &str,
    provenance: Provenance,
) -> Result<RefinementSuggestion, AssistantError> {
    let entries = parse_object(reply)?;

    let expression = entries
        .get("proposed_expression")
        .and_then(Value::as_str)
        .ok_or_else(|| AssistantError::Parse("missing `proposed_expression`".to_string()))?;

    let mode = match entries.get("proposed_extraction_mode") {
        None | Some(Value::Null) => ExtractionMode::Text,
        Some(Value::String(s)) => s
            .parse::<ExtractionMode>()
            .map_err(|e| AssistantError::Parse(e.to_string()))?,
        Some(other) => {
            return Err(AssistantError::Parse(format!(
                "`proposed_extraction_mode` is not a string: {}",
                other
            )));
        }
    };

    let confidence = entries
        .get("confidence")
        .and_then(Value::as_f64)
        .ok_or_else(|| AssistantError::Parse("`confidence` is missing or not a number".to_string()))?;

    let locator = Locator::new(field_name, expression, mode)
        .map_err(|e| AssistantError::Parse(e.to_string()))?;

    let rationale = entries
        .get("rationale")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string();

    Ok(RefinementSuggestion {
        field_name: field_name.to_string(),
        proposed_expression: locator.expression(),
        proposed_extraction_mode: locator.mode().clone(),
        confidence: RefinementSuggestion::clamp_confidence(confidence),
        rationale,
        provenance,
    })
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;

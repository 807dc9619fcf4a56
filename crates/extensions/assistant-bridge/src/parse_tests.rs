use super::*;
use selectorlab_protocols::types::SyntheticReason;

const URL: &str = "https://books.example.test/catalogue/";

fn live() -> Provenance {
    Provenance::Live {
        endpoint: "http://127.0.0.1:1234/v1".to_string(),
    }
}

#[test]
fn test_extract_json_prefers_fence() {
    let reply = "Sure! {\"ignored\": 1}\n```json\n{\"title\": \"h1::text\"}\n```\nDone.";
    assert_eq!(extract_json(reply), Some("{\"title\": \"h1::text\"}"));
}

#[test]
fn test_extract_json_balanced_object() {
    let reply = r#"Here you go: {"a": {"b": "}"}, "c": "x"} trailing {"d": 1}"#;
    assert_eq!(extract_json(reply), Some(r#"{"a": {"b": "}"}, "c": "x"}"#));
}

#[test]
fn test_extract_json_none() {
    assert_eq!(extract_json("I cannot help with that."), None);
    assert_eq!(extract_json("{ unterminated"), None);
}

#[test]
fn test_parse_structured_reply() {
    let reply = r#"```json
{
  "item_container": "article.product_pod",
  "pagination": {"name": "next", "expression": "li.next a::attr(href)"},
  "fields": [
    {"name": "title", "expression": "h3 a::attr(title)"},
    {"name": "price", "expression": ".price_color::text"},
    {"name": "title", "expression": "h3 a::text"}
  ]
}
```"#;
    let set = parse_generation(reply, URL).unwrap();
    assert_eq!(set.target_url, URL);
    assert_eq!(set.item_container.as_ref().unwrap().css(), "article.product_pod");
    assert_eq!(
        set.pagination.as_ref().unwrap().expression(),
        "li.next a::attr(href)"
    );
    let names: Vec<&str> = set.fields().iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["title", "price"]);
    assert_eq!(set.field("title").unwrap().expression(), "h3 a::attr(title)");
}

#[test]
fn test_parse_structured_null_roles() {
    let reply = r#"{"item_container": null, "pagination": "null", "fields": [{"name": "h", "expression": "h1"}]}"#;
    let set = parse_generation(reply, URL).unwrap();
    assert!(set.item_container.is_none());
    assert!(set.pagination.is_none());
    assert_eq!(set.field("h").unwrap().expression(), "h1::text");
}

#[test]
fn test_parse_flat_reply_promotes_roles() {
    let reply = r#"{
        "items": "article.product_pod",
        "title": "h3 a::text",
        "price": ".price_color::text",
        "next_page": ".next a::attr(href)",
        "price": "p.price::text"
    }"#;
    let set = parse_generation(reply, URL).unwrap();
    assert_eq!(set.item_container.as_ref().unwrap().name(), "item_container");
    assert_eq!(set.pagination.as_ref().unwrap().css(), ".next a");
    let fields = set.field_expressions();
    assert_eq!(
        fields,
        vec![
            ("title".to_string(), "h3 a::text".to_string()),
            ("price".to_string(), ".price_color::text".to_string()),
        ]
    );
}

#[test]
fn test_parse_flat_skips_unusable_entries() {
    let reply = r#"{"title": "h1::text", "mock": true, "bad": "p::shout", "empty": ""}"#;
    let set = parse_generation(reply, URL).unwrap();
    assert_eq!(set.fields().len(), 1);
}

#[test]
fn test_parse_generation_errors() {
    for reply in [
        "no json here",
        "{}",
        "[1, 2, 3]",
        r#"{"fields": "h1"}"#,
        r#"{"fields": []}"#,
        r#"{"only": "::text"}"#,
    ] {
        let err = parse_generation(reply, URL).unwrap_err();
        assert!(matches!(err, AssistantError::Parse(_)), "{}", reply);
        assert!(!err.is_unavailable());
    }
}

#[test]
fn test_parse_refinement() {
    let reply = r#"The price sits in a span.
```json
{
  "proposed_expression": "div.card span.price",
  "proposed_extraction_mode": "text",
  "confidence": 0.87,
  "rationale": "Scoped to the card to avoid the header price. "
}
```"#;
    let suggestion = parse_refinement(reply, "price", live()).unwrap();
    assert_eq!(suggestion.field_name, "price");
    assert_eq!(suggestion.proposed_expression, "div.card span.price::text");
    assert_eq!(suggestion.proposed_extraction_mode, ExtractionMode::Text);
    assert!((suggestion.confidence - 0.87).abs() < 1e-6);
    assert_eq!(suggestion.rationale, "Scoped to the card to avoid the header price.");
    assert!(!suggestion.provenance.is_synthetic());
}

#[test]
fn test_parse_refinement_attribute_modes() {
    let reply = r#"{"proposed_expression": "a.detail", "proposed_extraction_mode": "attribute:href", "confidence": 1}"#;
    let suggestion = parse_refinement(reply, "link", live()).unwrap();
    assert_eq!(
        suggestion.proposed_extraction_mode,
        ExtractionMode::Attribute("href".to_string())
    );
    assert_eq!(suggestion.proposed_expression, "a.detail::attr(href)");
    assert_eq!(suggestion.rationale, "");
}

#[test]
fn test_parse_refinement_embedded_suffix_wins() {
    let reply = r#"{"proposed_expression": "img.cover::attr(src)", "proposed_extraction_mode": "text", "confidence": 0.6}"#;
    let suggestion = parse_refinement(reply, "image", live()).unwrap();
    assert_eq!(
        suggestion.proposed_extraction_mode,
        ExtractionMode::Attribute("src".to_string())
    );
}

#[test]
fn test_parse_refinement_clamps_confidence() {
    let high = r#"{"proposed_expression": "h1", "confidence": 3.5}"#;
    let low = r#"{"proposed_expression": "h1", "confidence": -1}"#;
    assert_eq!(parse_refinement(high, "t", live()).unwrap().confidence, 1.0);
    assert_eq!(parse_refinement(low, "t", live()).unwrap().confidence, 0.0);
}

#[test]
fn test_parse_refinement_confidence_required() {
    for reply in [
        r#"{"proposed_expression": "h1"}"#,
        r#"{"proposed_expression": "h1", "confidence": "high"}"#,
        r#"{"proposed_expression": "h1", "confidence": null}"#,
    ] {
        assert!(matches!(
            parse_refinement(reply, "t", live()),
            Err(AssistantError::Parse(_))
        ));
    }
}

#[test]
fn test_parse_refinement_invalid_parts() {
    let missing = r#"{"confidence": 0.5}"#;
    let bad_mode = r#"{"proposed_expression": "h1", "proposed_extraction_mode": "pixels", "confidence": 0.5}"#;
    let bad_suffix = r#"{"proposed_expression": "h1::shout", "confidence": 0.5}"#;
    for reply in [missing, bad_mode, bad_suffix] {
        assert!(parse_refinement(reply, "t", live()).is_err(), "{}", reply);
    }
}

#[test]
fn test_parse_refinement_keeps_given_provenance() {
    let reply = r#"{"proposed_expression": "h1", "confidence": 0.5}"#;
    let provenance = Provenance::Synthetic {
        reason: SyntheticReason::Configured,
    };
    let suggestion = parse_refinement(reply, "t", provenance.clone()).unwrap();
    assert_eq!(suggestion.provenance, provenance);
}

//! Transfer payload encoding.
//!
//! The payload is the JSON form of a [`LocatorSet`]:
//! `{target_url, item_container, pagination, fields: [{name, expression}]}`.

use selectorlab_protocols::error::TransferError;
use selectorlab_protocols::types::LocatorSet;

/// Serialize a locator set into a transfer payload.
pub fn export_payload(set: &LocatorSet) -> Result<String, TransferError> {
    set.validate()
        .map_err(|e| TransferError::Corrupt(e.to_string()))?;
    serde_json::to_string(set).map_err(|e| TransferError::Corrupt(e.to_string()))
}

/// Parse and validate a transfer payload.
///
/// Either the whole set is returned or an error is; nothing is applied
/// partially.
pub fn import_payload(text: &str) -> Result<LocatorSet, TransferError> {
    let set: LocatorSet =
        serde_json::from_str(text).map_err(|e| TransferError::Corrupt(e.to_string()))?;
    set.validate()
        .map_err(|e| TransferError::Corrupt(e.to_string()))?;
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use selectorlab_protocols::types::Locator;

    fn sample() -> LocatorSet {
        let mut set = LocatorSet::new("https://books.example.test/catalogue/");
        set.item_container = Some(Locator::parse("item_container", "article.product_pod").unwrap());
        set.pagination = Some(Locator::parse("pagination", "li.next a::attr(href)").unwrap());
        set.add_field(Locator::parse("title", "h3 a::attr(title)").unwrap()).unwrap();
        set.add_field(Locator::parse("price", ".price_color").unwrap()).unwrap();
        set
    }

    #[test]
    fn test_round_trip() {
        let set = sample();
        let restored = import_payload(&export_payload(&set).unwrap()).unwrap();
        assert_eq!(restored, set);
        assert_eq!(restored.field_expressions(), set.field_expressions());
    }

    #[test]
    fn test_payload_shape() {
        let payload: serde_json::Value =
            serde_json::from_str(&export_payload(&sample()).unwrap()).unwrap();
        assert_eq!(payload["target_url"], "https://books.example.test/catalogue/");
        assert_eq!(payload["fields"][1]["name"], "price");
        assert_eq!(payload["fields"][1]["expression"], ".price_color::text");
        assert_eq!(payload["pagination"]["expression"], "li.next a::attr(href)");
    }

    #[test]
    fn test_import_rejects_malformed_json() {
        let err = import_payload("{\"target_url\": ").unwrap_err();
        assert!(matches!(err, TransferError::Corrupt(_)));
    }

    #[test]
    fn test_import_rejects_bad_expression() {
        let payload = r#"{"target_url": "https://a.test/", "fields": [{"name": "x", "expression": "div::bogus"}]}"#;
        assert!(matches!(import_payload(payload), Err(TransferError::Corrupt(_))));
    }

    #[test]
    fn test_import_rejects_duplicate_names() {
        let payload = r#"{"target_url": "https://a.test/", "fields": [
            {"name": "price", "expression": ".a"},
            {"name": "price", "expression": ".b"}
        ]}"#;
        let err = import_payload(payload).unwrap_err();
        assert!(err.to_string().contains("price"));
    }

    #[test]
    fn test_import_minimal_payload() {
        let set = import_payload(r#"{"target_url": "https://a.test/"}"#).unwrap();
        assert!(set.is_empty());
    }
}

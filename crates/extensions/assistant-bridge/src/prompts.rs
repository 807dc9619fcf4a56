//! Prompt construction for generation and refinement.

use selectorlab_protocols::assistant::GenerationContext;
use selectorlab_protocols::provider::Message;
use selectorlab_protocols::wire::RefineRequest;

const TRUNCATION_MARKER: &str = "\n<!-- markup truncated -->";

const GENERATION_SYSTEM: &str = "\
You write precise CSS selectors for extracting structured data from web pages.
Selectors may end with an extraction suffix:
- `::text` for the trimmed text content (use it whenever text is wanted),
- `::attr(NAME)` for an attribute value, e.g. `a.next::attr(href)`,
- `::html` for the element's markup.
Reply with a single JSON object and nothing else.";

const REFINEMENT_SYSTEM: &str = "\
You improve CSS selectors used for web data extraction.
You receive a field name, the selector currently used for it and the markup of
the matched element's parent. Propose a more precise selector and say how the
value should be extracted: `text`, `html` or `attr(NAME)`.
Reply with a single JSON object and nothing else.";

/// Cut markup to at most `limit` characters, marking the cut.
pub fn truncate_markup(markup: &str, limit: usize) -> String {
    match markup.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{}", &markup[..cut], TRUNCATION_MARKER),
        None => markup.to_string(),
    }
}

/// Messages asking for a locator set.
pub fn generation_messages(ctx: &GenerationContext, max_context_chars: usize) -> Vec<Message> {
    let mut user = format!(
        "Target page: {}\nWhat to extract: {}\n",
        ctx.url, ctx.intent
    );

    if let Some(markup) = ctx.markup_excerpt.as_deref() {
        user.push_str("\nPage markup:\n```html\n");
        user.push_str(&truncate_markup(markup, max_context_chars));
        user.push_str("\n```\n");
    }

    user.push_str(
        r#"
Answer in this shape:
```json
{
  "item_container": "css selector of one repeating record, or null",
  "pagination": "css selector of the next-page link with ::attr(href), or null",
  "fields": [
    {"name": "title", "expression": "h3 a::text"},
    {"name": "price", "expression": ".price_color::text"}
  ]
}
```
Field expressions are relative to the item container when there is one."#,
    );

    vec![Message::system(GENERATION_SYSTEM), Message::user(user)]
}

/// Messages asking for a refinement of one locator.
pub fn refinement_messages(request: &RefineRequest) -> Vec<Message> {
    let user = format!(
        r#"Field: {}
Current selector: {}

Markup around the current match:
```html
{}
```

Answer in this shape:
```json
{{
  "proposed_expression": "css selector, optionally with an extraction suffix",
  "proposed_extraction_mode": "text | html | attr(NAME)",
  "confidence": 0.0,
  "rationale": "one or two sentences"
}}
```
Confidence is a number between 0 and 1."#,
        request.field_name, request.current_expression, request.parent_html_snippet
    );

    vec![Message::system(REFINEMENT_SYSTEM), Message::user(user)]
}

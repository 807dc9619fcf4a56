use super::*;
use scraper::{Html, Selector};

use crate::document::InspectedDocument;

fn synthesize_first(html: &str, css: &str) -> String {
    synthesize_with(&Synthesizer::default(), html, css)
}

fn synthesize_with(synthesizer: &Synthesizer, html: &str, css: &str) -> String {
    let document = Html::parse_document(html);
    let selector = Selector::parse(css).unwrap();
    let element = document.select(&selector).next().unwrap();
    synthesizer.synthesize(*element).unwrap()
}

#[test]
fn test_id_terminates_path() {
    let html = r#"<html><body><div class="wrap"><span id="total">9</span></div></body></html>"#;
    assert_eq!(synthesize_first(html, "#total"), "span#total");
}

#[test]
fn test_ancestor_id_terminates_ascent() {
    let html = r#"
        <html><body>
          <section class="outer"><div id="main"><ul><li>one</li><li>two</li></ul></div></section>
        </body></html>"#;
    assert_eq!(
        synthesize_first(html, "li:nth-of-type(2)"),
        "div#main > ul > li:nth-of-type(2)"
    );
}

#[test]
fn test_id_segment_independent_of_depth() {
    let shallow = r#"<html><body><p id="x">a</p></body></html>"#;
    let deep = r#"<html><body><div><div><div class="c"><p id="x">a</p></div></div></div></body></html>"#;
    assert_eq!(synthesize_first(shallow, "#x"), synthesize_first(deep, "#x"));
}

#[test]
fn test_class_first_child_has_no_position() {
    let html = r#"<html><body><div class="product"><div class="price">$9.99</div><div>x</div></div></body></html>"#;
    let path = synthesize_first(html, "div.price");
    assert!(path.ends_with("div.price"));
    assert!(!path.contains("nth-of-type"));
    assert_eq!(path, "html > body > div.product > div.price");
}

#[test]
fn test_class_suppresses_position_even_when_not_first() {
    let html = r#"<html><body><div><p>a</p><p class="lead">b</p></div></body></html>"#;
    assert_eq!(synthesize_first(html, "p.lead"), "html > body > div > p.lead");
}

#[test]
fn test_first_class_is_used() {
    let html = r#"<html><body><span class="price sale big">1</span></body></html>"#;
    assert_eq!(synthesize_first(html, "span"), "html > body > span.price");
}

#[test]
fn test_position_qualifier_for_later_siblings() {
    let html = r#"<html><body><ul><li>1</li><li>2</li><li>3</li></ul></body></html>"#;
    assert_eq!(
        synthesize_first(html, "li:nth-of-type(3)"),
        "html > body > ul > li:nth-of-type(3)"
    );
    assert_eq!(synthesize_first(html, "li"), "html > body > ul > li");
}

#[test]
fn test_position_counts_same_tag_only() {
    let html = r#"<html><body><div><h2>t</h2><p>a</p><span>s</span><p>b</p></div></body></html>"#;
    assert_eq!(
        synthesize_first(html, "p:nth-of-type(2)"),
        "html > body > div > p:nth-of-type(2)"
    );
}

#[test]
fn test_excluded_class_is_skipped() {
    let synthesizer = Synthesizer::new(["selectorlab-highlight"]);
    let html = r#"<html><body><a class="selectorlab-highlight title-link" href="/x">x</a></body></html>"#;
    assert_eq!(
        synthesize_with(&synthesizer, html, "a"),
        "html > body > a.title-link"
    );
}

#[test]
fn test_only_excluded_class_falls_back_to_position() {
    let synthesizer = Synthesizer::new(["selectorlab-highlight", "devtools-hover"]);
    let html = r#"<html><body><div><b>1</b><b class="devtools-hover">2</b></div></body></html>"#;
    assert_eq!(
        synthesize_with(&synthesizer, html, "b.devtools-hover"),
        "html > body > div > b:nth-of-type(2)"
    );
}

#[test]
fn test_html_is_root_segment() {
    let html = r#"<html><body><p>x</p></body></html>"#;
    let path = synthesize_first(html, "p");
    assert!(path.starts_with("html > "));
    assert_eq!(synthesize_first(html, "html"), "html");
}

#[test]
fn test_text_node_is_rejected() {
    let document = Html::parse_document("<html><body><p>hello</p></body></html>");
    let selector = Selector::parse("p").unwrap();
    let p = document.select(&selector).next().unwrap();
    let text = p.first_child().unwrap();
    let err = Synthesizer::default().synthesize(text).unwrap_err();
    assert_eq!(
        err,
        SynthesisError::NotAnElement {
            node_kind: "text".to_string()
        }
    );
}

#[test]
fn test_document_node_is_rejected() {
    let document = Html::parse_document("<p>x</p>");
    let err = Synthesizer::default()
        .synthesize(document.tree.root())
        .unwrap_err();
    assert!(matches!(err, SynthesisError::NotAnElement { .. }));
}

#[test]
fn test_escape_ident() {
    assert_eq!(escape_ident("main-content_1"), "main-content_1");
    assert_eq!(escape_ident("a:b"), "a\\:b");
    assert_eq!(escape_ident("1st"), "\\31 st");
}

#[test]
fn test_escape_ident_dash_prefixes() {
    assert_eq!(escape_ident("-1col"), "-\\31 col");
    assert_eq!(escape_ident("-"), "\\-");
    assert_eq!(escape_ident("--wide"), "--wide");
    assert_eq!(escape_ident("-a1"), "-a1");
    assert_eq!(escape_ident("a\tb"), "a\\9 b");
}

#[test]
fn test_dash_digit_class_path_is_valid_selector() {
    let html = r#"<html><body><div><span class="-1col">x</span><span>y</span></div></body></html>"#;
    let path = synthesize_first(html, "span");
    assert!(path.ends_with("div > span.-\\31 col"), "{}", path);
    let document = Html::parse_document(html);
    let selector = Selector::parse(&path).unwrap();
    let matches: Vec<_> = document.select(&selector).collect();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].text().collect::<String>(), "x");
}

#[test]
fn test_synthesized_path_selects_clicked_element() {
    let html = r#"<html><body><div class="list"><p>a</p><p>b</p></div></body></html>"#;
    let path = synthesize_first(html, "p:nth-of-type(2)");
    let document = Html::parse_document(html);
    let selector = Selector::parse(&path).unwrap();
    let matches: Vec<_> = document.select(&selector).collect();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].text().collect::<String>(), "b");
}

#[test]
fn test_access_same_origin() {
    let doc = InspectedDocument::load(
        "https://example.test/list",
        r#"<html><body><span class="price">1</span></body></html>"#,
    )
    .unwrap();
    let access = doc.access("https://example.test/other").unwrap();
    let id = access.first_match("span.price").unwrap().unwrap();
    let path = access.synthesize(&Synthesizer::default(), id).unwrap();
    assert_eq!(path, "html > body > span.price");
}

#[test]
fn test_access_cross_origin_is_denied() {
    let doc = InspectedDocument::load("https://example.test/list", "<p>x</p>").unwrap();
    let err = doc.access("https://evil.test/").err().unwrap();
    assert!(matches!(err, SynthesisError::AccessDenied { .. }));
    assert_eq!(err.kind(), selectorlab_protocols::ErrorKind::SynthesisInput);
}

#[test]
fn test_access_bad_selector() {
    let doc = InspectedDocument::load("https://example.test/", "<p>x</p>").unwrap();
    let access = doc.access("https://example.test/").unwrap();
    assert!(access.first_match("p[").is_err());
    assert_eq!(access.first_match("table").unwrap(), None);
}

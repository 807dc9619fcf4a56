use super::*;

fn base() -> Url {
    Url::parse("https://shop.example.test/catalog/page-2.html").unwrap()
}

#[test]
fn test_is_html_by_content_type() {
    assert!(is_html(Some("text/html; charset=utf-8"), ""));
    assert!(is_html(Some("application/xhtml+xml"), ""));
    assert!(!is_html(Some("application/json"), "<html></html>"));
}

#[test]
fn test_is_html_sniffs_without_content_type() {
    assert!(is_html(None, "  <!DOCTYPE html><html></html>"));
    assert!(is_html(Some(""), "<HTML><body></body></HTML>"));
    assert!(!is_html(None, "plain text"));
}

#[test]
fn test_filter_headers() {
    let headers = vec![
        ("X-Frame-Options".to_string(), "DENY".to_string()),
        ("content-security-policy".to_string(), "frame-ancestors 'none'".to_string()),
        ("Content-Security-Policy-Report-Only".to_string(), "x".to_string()),
        ("transfer-encoding".to_string(), "chunked".to_string()),
        ("content-length".to_string(), "12".to_string()),
        ("content-type".to_string(), "text/html".to_string()),
        ("cache-control".to_string(), "no-cache".to_string()),
    ];
    let kept = filter_headers(&headers);
    let names: Vec<&str> = kept.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["content-type", "cache-control"]);
}

#[test]
fn test_inserts_base_after_head() {
    let markup = r#"<html><head><title>t</title></head><body><img src="a.png"></body></html>"#;
    let out = rewrite_for_embedding(markup, &base());
    assert_eq!(
        out,
        r#"<html><head><base href="https://shop.example.test/catalog/page-2.html"><title>t</title></head><body><img src="a.png"></body></html>"#
    );
}

#[test]
fn test_head_with_attributes() {
    let markup = r#"<html><head lang="en"><title>t</title></head></html>"#;
    let out = rewrite_for_embedding(markup, &base());
    assert!(out.starts_with(r#"<html><head lang="en"><base href="#));
}

#[test]
fn test_header_element_is_not_head() {
    let markup = r#"<html><body><header>nav</header></body></html>"#;
    let out = rewrite_for_embedding(markup, &base());
    assert!(out.starts_with(r#"<html><head><base href="https://shop.example.test/catalog/page-2.html"></head><body><header>"#));
}

#[test]
fn test_prepends_without_html_element() {
    let out = rewrite_for_embedding("<p>fragment</p>", &base());
    assert_eq!(
        out,
        r#"<base href="https://shop.example.test/catalog/page-2.html"><p>fragment</p>"#
    );
}

#[test]
fn test_existing_relative_base_is_resolved() {
    let markup = r#"<html><head><base href="/static/" target="_blank"></head></html>"#;
    let out = rewrite_for_embedding(markup, &base());
    assert_eq!(
        out,
        r#"<html><head><base href="https://shop.example.test/static/" target="_blank"></head></html>"#
    );
}

#[test]
fn test_existing_absolute_base_is_kept() {
    let markup = r#"<head><BASE HREF='https://cdn.example.test/assets/'></head>"#;
    let out = rewrite_for_embedding(markup, &base());
    assert!(out.contains(r#"href="https://cdn.example.test/assets/""#));
    assert_eq!(out.matches("<base").count() + out.matches("<BASE").count(), 1);
}

#[test]
fn test_strips_framing_meta() {
    let markup = r#"<html><head><meta charset="utf-8"><meta http-equiv="Content-Security-Policy" content="frame-ancestors 'none'"><meta HTTP-EQUIV='X-Frame-Options' content='DENY'></head></html>"#;
    let out = rewrite_for_embedding(markup, &base());
    assert!(out.contains(r#"<meta charset="utf-8">"#));
    assert!(!out.to_ascii_lowercase().contains("content-security-policy"));
    assert!(!out.to_ascii_lowercase().contains("x-frame-options"));
}

#[test]
fn test_keeps_other_meta_http_equiv() {
    let markup = r#"<head><meta http-equiv="refresh" content="30"></head>"#;
    let out = rewrite_for_embedding(markup, &base());
    assert!(out.contains(r#"http-equiv="refresh""#));
}

#[test]
fn test_scripts_are_untouched() {
    let markup = r#"<html><head><script>document.write("<p>x</p>")</script></head></html>"#;
    let out = rewrite_for_embedding(markup, &base());
    assert!(out.contains(r#"<script>document.write("<p>x</p>")</script>"#));
}

#[test]
fn test_base_href_escapes_ampersand() {
    let base = Url::parse("https://example.test/list?a=1&b=2").unwrap();
    let out = rewrite_for_embedding("<head></head>", &base);
    assert!(out.contains(r#"href="https://example.test/list?a=1&amp;b=2""#));
}

use super::*;
use selectorlab_protocols::ErrorKind;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn retriever() -> Retriever {
    Retriever::new(Duration::from_secs(5), "selectorlab-test")
}

#[test]
fn test_parse_target_accepts_http() {
    assert!(parse_target("http://example.test/").is_ok());
    assert!(parse_target(" https://example.test/list ").is_ok());
}

#[test]
fn test_parse_target_rejects_other_schemes() {
    let err = parse_target("ftp://example.test/file").unwrap_err();
    assert!(matches!(err, FetchError::UnsupportedScheme(ref s) if s == "ftp"));
    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(err.input(), Some("url"));

    let err = parse_target("javascript:alert(1)").unwrap_err();
    assert!(matches!(err, FetchError::UnsupportedScheme(_)));
}

#[test]
fn test_parse_target_rejects_garbage() {
    let err = parse_target("not a url").unwrap_err();
    assert!(matches!(err, FetchError::InvalidUrl { .. }));
}

#[test]
fn test_from_config_uses_effective_timeout() {
    let config = NetworkConfig {
        timeout_secs: 7,
        relaxed_timeout_secs: 90,
        compat_layer: Some(false),
        ..Default::default()
    };
    assert_eq!(Retriever::from_config(&config).timeout(), Duration::from_secs(7));

    let relaxed = NetworkConfig {
        compat_layer: Some(true),
        ..config
    };
    assert_eq!(Retriever::from_config(&relaxed).timeout(), Duration::from_secs(90));
}

#[tokio::test]
async fn test_retrieve_success_sends_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .and(header("user-agent", "selectorlab-test"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html><body>ok</body></html>", "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let retrieved = retriever()
        .retrieve(&format!("{}/page", server.uri()))
        .await
        .unwrap();
    assert_eq!(retrieved.final_url.path(), "/page");
    assert_eq!(retrieved.content_type.as_deref(), Some("text/html"));
    assert!(retrieved.body.contains("ok"));
    assert!(retrieved.ensure_html().is_ok());
}

#[tokio::test]
async fn test_retrieve_404_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = retriever()
        .retrieve(&format!("{}/missing", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 404, .. }));
    assert_eq!(err.kind(), ErrorKind::Network);
}

#[tokio::test]
async fn test_retrieve_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html></html>", "text/html")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let retriever = Retriever::new(Duration::from_millis(200), "selectorlab-test");
    let err = retriever.retrieve(&server.uri()).await.unwrap_err();
    assert!(matches!(err, FetchError::Timeout { .. }));
}

#[tokio::test]
async fn test_retrieve_unreachable_is_network_error() {
    let err = retriever()
        .retrieve("http://127.0.0.1:1/")
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Network { .. }));
}

#[tokio::test]
async fn test_retrieve_html_rejects_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{\"a\":1}", "application/json"))
        .mount(&server)
        .await;

    let err = retriever().retrieve_html(&server.uri()).await.unwrap_err();
    assert!(matches!(err, FetchError::NotHtml { ref content_type, .. } if content_type == "application/json"));
    assert_eq!(err.kind(), ErrorKind::Content);
}

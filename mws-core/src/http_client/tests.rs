#![allow(clippy::disallowed_methods)] // unwrap() is acceptable in tests

use super::*;
use crate::config::ProxyConfig;
use crate::error::{Error, NetworkError};
use std::collections::BTreeMap;
use std::time::Duration;
use wiremock::matchers::{body_bytes, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> HttpClient {
    HttpClient::new(HttpConfig::default()).unwrap()
}

#[test]
fn test_http_client_creation() {
    assert!(HttpClient::new(HttpConfig::default()).is_ok());
}

#[test]
fn test_http_client_rejects_invalid_config() {
    let config = HttpConfig {
        timeout: Duration::from_secs(600),
        ..Default::default()
    };
    let err = HttpClient::new(config).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

#[test]
fn test_http_client_rejects_invalid_proxy() {
    let config = HttpConfig {
        proxy: Some(ProxyConfig::new("not a url")),
        ..Default::default()
    };
    assert!(HttpClient::new(config).is_err());
}

#[test]
fn test_config_validation_warnings() {
    let config = HttpConfig {
        timeout: Duration::from_millis(500),
        connect_timeout: Duration::from_secs(2),
        ..Default::default()
    };
    let result = config.validate().unwrap();
    assert_eq!(result.warnings.len(), 2);
}

#[test]
fn test_config_validation_zero_sizes() {
    let zero_request = HttpConfig {
        max_request_size: 0,
        ..Default::default()
    };
    assert_eq!(
        zero_request.validate().unwrap_err().field_name(),
        "max_request_size"
    );

    let zero_response = HttpConfig {
        max_response_size: 0,
        ..Default::default()
    };
    assert_eq!(
        zero_response.validate().unwrap_err().field_name(),
        "max_response_size"
    );
}

#[tokio::test]
async fn test_post_sends_query_headers_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Feeds"))
        .and(query_param("Action", "SubmitFeed"))
        .and(query_param("Version", "2009-01-01"))
        .and(header("Content-Type", "text/xml"))
        .and(body_bytes(b"<?xml version=\"1.0\"?><a/>".to_vec()))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let query = vec![
        ("Action".to_string(), "SubmitFeed".to_string()),
        ("Version".to_string(), "2009-01-01".to_string()),
    ];
    let mut headers = BTreeMap::new();
    headers.insert("Content-Type".to_string(), "text/xml".to_string());

    let response = client()
        .post(
            &format!("{}/Feeds", server.uri()),
            &query,
            &headers,
            Some(b"<?xml version=\"1.0\"?><a/>".to_vec()),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.body(), b"ok");
}

#[tokio::test]
async fn test_post_returns_non_200_as_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(503)
                .insert_header("x-mws-request-id", "abc")
                .set_body_string("throttled"),
        )
        .mount(&server)
        .await;

    let response = client()
        .post(&server.uri(), &[], &BTreeMap::new(), None)
        .await
        .unwrap();

    assert_eq!(response.status(), 503);
    assert!(!response.is_ok());
    assert_eq!(response.header("X-MWS-Request-Id"), Some("abc"));
    assert_eq!(response.body(), b"throttled");
}

#[tokio::test]
async fn test_post_keeps_body_bytes_verbatim() {
    let server = MockServer::start().await;
    let bytes = vec![0x82, 0xa0, b'\t', 0xff, b'\n'];
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(bytes.clone(), "text/plain"))
        .mount(&server)
        .await;

    let response = client()
        .post(&server.uri(), &[], &BTreeMap::new(), None)
        .await
        .unwrap();

    assert_eq!(response.body(), bytes.as_slice());
    assert_eq!(response.content_type(), Some("text/plain"));
}

#[tokio::test]
async fn test_post_rejects_oversized_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(2048)))
        .mount(&server)
        .await;

    let client = HttpClient::new(HttpConfig {
        max_response_size: 1024,
        ..Default::default()
    })
    .unwrap();

    let err = client
        .post(&server.uri(), &[], &BTreeMap::new(), None)
        .await
        .unwrap_err();

    match err {
        Error::Network(ne) => {
            assert!(matches!(*ne, NetworkError::ResponseTooLarge { limit: 1024, .. }));
        }
        other => panic!("Expected ResponseTooLarge, got {other:?}"),
    }
}

#[tokio::test]
async fn test_post_rejects_oversized_request() {
    let client = HttpClient::new(HttpConfig {
        max_request_size: 4,
        ..Default::default()
    })
    .unwrap();

    let err = client
        .post("http://127.0.0.1:9/", &[], &BTreeMap::new(), Some(vec![0; 5]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidRequest(_)));
}

#[tokio::test]
async fn test_post_rejects_invalid_header() {
    let mut headers = BTreeMap::new();
    headers.insert("Bad Header".to_string(), "x".to_string());

    let err = client()
        .post("http://127.0.0.1:9/", &[], &headers, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidRequest(_)));
}

#[tokio::test]
async fn test_post_connection_refused_is_network_error() {
    let err = client()
        .post("http://127.0.0.1:9/", &[], &BTreeMap::new(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Network(_)));
}

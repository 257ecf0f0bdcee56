#![allow(clippy::disallowed_methods)] // unwrap() is acceptable in tests

use super::*;
use crate::error::{Error, FaultKind};
use crate::marketplace::Marketplace;
use crate::parser::{FlatFile, XmlResponse};
use wiremock::matchers::{body_bytes, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SECTION: SectionConfig = SectionConfig::new("/", "2009-01-01").merchant_param("Merchant");

fn offline_client() -> Client {
    let config = ClientConfig::builder()
        .merchant_id("A2MERCHANT")
        .marketplace("US")
        .build();
    Client::new(config, SECTION).unwrap()
}

fn mock_client(server: &MockServer) -> Client {
    let config = ClientConfig::builder()
        .merchant_id("A2MERCHANT")
        .auth_token("amzn.mws.token")
        .aws_access_key_id("AKIAEXAMPLE")
        .marketplace("US")
        .endpoint_override(server.uri())
        .build();
    Client::new(config, SECTION).unwrap()
}

fn utf8_client() -> Client {
    let mut client = offline_client();
    client
        .set_marketplace(Marketplace::new("X1", "ZZ", "localhost", "UTF-8"))
        .unwrap();
    client
}

fn query_value(client: &Client, key: &str) -> Option<String> {
    let operation = client.operation().unwrap();
    client
        .query(operation)
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}

#[test]
fn test_set_body_none_removes_content_type() {
    let mut client = utf8_client();
    client.set_body(Some("a\tb")).unwrap();
    client.set_body(None).unwrap();
    assert!(client.body().is_none());
    assert!(!client.headers().contains_key("Content-Type"));
}

#[test]
fn test_set_body_xml_is_verbatim() {
    let mut client = offline_client();
    let xml = "<?xml version=\"1.0\"?><AmazonEnvelope>é</AmazonEnvelope>";
    client.set_body(Some(xml)).unwrap();
    assert_eq!(client.headers()["Content-Type"], "text/xml");
    assert_eq!(client.body(), Some(xml.as_bytes()));
}

#[test]
fn test_set_body_tab_separated_uses_marketplace_encoding() {
    let mut client = utf8_client();
    client.set_body(Some("a\tb\tc")).unwrap();
    assert_eq!(
        client.headers()["Content-Type"],
        "text/tab-separated-values; charset=UTF-8"
    );
    assert_eq!(client.body(), Some(b"a\tb\tc".as_slice()));
}

#[test]
fn test_set_body_reencodes_text() {
    let mut client = offline_client();
    client.set_marketplace("JP").unwrap();
    client.set_body(Some("sku\tあ")).unwrap();
    assert_eq!(
        client.headers()["Content-Type"],
        "text/tab-separated-values; charset=Windows-31J"
    );
    assert_eq!(client.body(), Some(b"sku\t\x82\xa0".as_slice()));
}

#[test]
fn test_set_body_unrepresentable_keeps_previous_body() {
    let mut client = offline_client();
    client.set_marketplace("JP").unwrap();
    client.set_body(Some("sku\tあ")).unwrap();

    let err = client.set_body(Some("sku\t한")).unwrap_err();
    assert!(matches!(err, Error::Encoding(_)));
    assert_eq!(client.body(), Some(b"sku\t\x82\xa0".as_slice()));
}

#[test]
fn test_set_body_without_marketplace() {
    let mut client = Client::new(ClientConfig::default(), SECTION).unwrap();
    let err = client.set_body(Some("a\tb")).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
    assert!(client.body().is_none());

    client.set_body(Some("<?xml version=\"1.0\"?><a/>")).unwrap();
    assert_eq!(client.headers()["Content-Type"], "text/xml");
}

#[test]
fn test_set_marketplace_unknown_keeps_current() {
    let mut client = offline_client();
    assert!(matches!(client.set_marketplace("XX"), Err(Error::Configuration(_))));
    assert_eq!(client.marketplace().unwrap().country_code(), "US");
}

#[test]
fn test_new_rejects_unknown_marketplace() {
    let config = ClientConfig::builder().marketplace("ZZ").build();
    assert!(Client::new(config, SECTION).is_err());
}

#[test]
fn test_endpoint() {
    let mut client = offline_client();
    assert_eq!(client.endpoint().unwrap(), "https://mws.amazonservices.com/");

    client.set_marketplace("DE").unwrap();
    assert_eq!(client.endpoint().unwrap(), "https://mws-eu.amazonservices.com/");

    let orphan = Client::new(ClientConfig::default(), SECTION).unwrap();
    assert!(matches!(orphan.endpoint(), Err(Error::Configuration(_))));
}

#[test]
fn test_endpoint_override_keeps_section_path() {
    let config = ClientConfig::builder()
        .endpoint_override("http://127.0.0.1:8080/")
        .build();
    let client = Client::new(config, SectionConfig::new("/Orders/2013-09-01", "2013-09-01")).unwrap();
    assert_eq!(client.endpoint().unwrap(), "http://127.0.0.1:8080/Orders/2013-09-01");
}

#[test]
fn test_query_order_and_standing_params() {
    let mut client = offline_client();
    client.set_operation("GetReportCount", [("ReportTypeList.Type.1", "_X_")]);

    let operation = client.operation().unwrap().clone();
    let query = client.query(&operation);
    let keys: Vec<_> = query.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, ["Action", "ReportTypeList.Type.1", "Merchant", "Version"]);
    assert_eq!(query[0].1, "GetReportCount");
}

#[test]
fn test_standing_params_follow_current_credentials() {
    let mut client = offline_client();
    client.set_operation("GetReportCount", Vec::<(String, String)>::new());
    assert!(query_value(&client, "MWSAuthToken").is_none());

    client.set_merchant_id("A3OTHER");
    client.set_auth_token("amzn.mws.later");
    client.set_aws_access_key_id("AKIALATER");
    assert_eq!(query_value(&client, "Merchant").as_deref(), Some("A3OTHER"));
    assert_eq!(query_value(&client, "MWSAuthToken").as_deref(), Some("amzn.mws.later"));
    assert_eq!(query_value(&client, "AWSAccessKeyId").as_deref(), Some("AKIALATER"));

    client.clear_auth_token();
    assert!(query_value(&client, "MWSAuthToken").is_none());
}

#[test]
fn test_content_md5_value_only_with_body() {
    let mut client = utf8_client();
    client.set_operation("SubmitFeed", [("FeedType", "_POST_FLAT_FILE_LISTINGS_DATA_")]);
    assert!(query_value(&client, "ContentMD5Value").is_none());

    client.set_body(Some("sku\tprice")).unwrap();
    let expected = content_md5(b"sku\tprice");
    assert_eq!(query_value(&client, "ContentMD5Value"), Some(expected));
}

fn content_md5(bytes: &[u8]) -> String {
    use base64::{Engine as _, engine::general_purpose};
    use md5::{Digest, Md5};
    general_purpose::STANDARD.encode(Md5::digest(bytes))
}

#[tokio::test]
async fn test_execute_without_operation_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut client = mock_client(&server);
    let err = client.execute().await.unwrap_err();
    assert!(matches!(err, Error::InvalidRequest(_)));
}

#[tokio::test]
async fn test_execute_parses_xml() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(query_param("Action", "GetServiceStatus"))
        .and(query_param("Merchant", "A2MERCHANT"))
        .and(query_param("MWSAuthToken", "amzn.mws.token"))
        .and(query_param("AWSAccessKeyId", "AKIAEXAMPLE"))
        .and(query_param("Version", "2009-01-01"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<GetServiceStatusResponse><GetServiceStatusResult><Status>GREEN</Status>\
             </GetServiceStatusResult></GetServiceStatusResponse>",
            "text/xml",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = mock_client(&server);
    client.set_operation("GetServiceStatus", Vec::<(String, String)>::new());
    let parsed = client.execute().await.unwrap();

    assert_eq!(parsed.as_xml().unwrap().text("Status").as_deref(), Some("GREEN"));
    assert!(client.operation().is_none());
}

#[tokio::test]
async fn test_execute_parses_flat_file_in_marketplace_encoding() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            b"sku\tname\nA\tcaf\xe9\n".to_vec(),
            "application/octet-stream",
        ))
        .mount(&server)
        .await;

    let mut client = mock_client(&server);
    client.set_operation("GetReport", [("ReportId", "1")]);
    let file: FlatFile = client.execute_as().await.unwrap();

    assert_eq!(file.rows().unwrap()[0]["name"], "café");
}

#[tokio::test]
async fn test_execute_with_bypasses_parser() {
    const DOCUMENT: &str = "<?xml version=\"1.0\"?><a/>";
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(DOCUMENT, "text/xml"))
        .mount(&server)
        .await;

    let mut client = mock_client(&server);
    client.set_operation("GetServiceStatus", Vec::<(String, String)>::new());
    let length = client
        .execute_with(|response| Ok(response.body().len()))
        .await
        .unwrap();
    assert_eq!(length, DOCUMENT.len());
}

#[tokio::test]
async fn test_execute_sends_body_and_clears_it_after_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(query_param("Action", "SubmitFeed"))
        .and(header("Content-Type", "text/xml"))
        .and(body_bytes(b"<?xml version=\"1.0\"?><AmazonEnvelope/>".to_vec()))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<SubmitFeedResponse><FeedSubmissionId>50</FeedSubmissionId></SubmitFeedResponse>",
            "text/xml",
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(query_param("Action", "GetFeedSubmissionCount"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<Count>0</Count>", "text/xml"))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = mock_client(&server);
    client
        .set_body(Some("<?xml version=\"1.0\"?><AmazonEnvelope/>"))
        .unwrap();
    client.set_operation("SubmitFeed", [("FeedType", "_POST_PRODUCT_DATA_")]);
    client.execute().await.unwrap();

    assert!(client.body().is_none());
    assert!(!client.headers().contains_key("Content-Type"));

    client.set_operation("GetFeedSubmissionCount", Vec::<(String, String)>::new());
    let parsed: XmlResponse = client.execute_as().await.unwrap();
    assert_eq!(parsed.text("Count").as_deref(), Some("0"));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[1].body.is_empty());
    assert!(!requests[1].headers.contains_key("content-type"));
    assert!(!requests[1].url.query().unwrap_or_default().contains("ContentMD5Value"));
}

#[tokio::test]
async fn test_execute_classifies_service_fault() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_raw(
            "<ErrorResponse><Error><Type>Sender</Type><Code>FeedProcessingResultNotReady</Code>\
             <Message>Feed Submission Result is not ready for Feed 123</Message></Error>\
             <RequestID>r-1</RequestID></ErrorResponse>",
            "text/xml",
        ))
        .mount(&server)
        .await;

    let mut client = mock_client(&server);
    client
        .set_body(Some("<?xml version=\"1.0\"?><AmazonEnvelope/>"))
        .unwrap();
    client.set_operation("GetFeedSubmissionResult", [("FeedSubmissionId", "123")]);
    let err = client.execute().await.unwrap_err();

    let fault = err.as_service().unwrap();
    assert_eq!(fault.kind(), &FaultKind::FeedProcessingResultNotReady);
    assert_eq!(fault.message(), "Feed Submission Result is not ready for Feed 123");
    assert_eq!(fault.http_failure().status(), 404);
    assert!(err.is_retryable());

    // body survives a failed exchange, operation does not
    assert!(client.body().is_some());
    assert!(client.operation().is_none());
}

#[tokio::test]
async fn test_execute_numeric_fault_surfaces_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_raw(
            "<ErrorResponse><Error><Code>500</Code></Error></ErrorResponse>",
            "text/xml",
        ))
        .mount(&server)
        .await;

    let mut client = mock_client(&server);
    client.set_operation("GetServiceStatus", Vec::<(String, String)>::new());
    let err = client.execute().await.unwrap_err();

    match err {
        Error::HttpStatus(failure) => {
            assert_eq!(failure.status(), 500);
            assert!(String::from_utf8_lossy(failure.body()).contains("<Code>500</Code>"));
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_execute_non_xml_failure_surfaces_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let mut client = mock_client(&server);
    client.set_operation("GetServiceStatus", Vec::<(String, String)>::new());
    let err = client.execute().await.unwrap_err();
    assert_eq!(err.as_http_status().unwrap().status(), 502);
    assert!(err.as_service().is_none());
}

//! Client integration tests against a mocked cPanel instance

mod common;

use common::helpers::create_test_client;
use cpanel_requests::{
    CPanel, Error, HttpAuthorization, Parameters, Protocol, ResponseKind, TokenAuthorization,
    resource::LogFiles,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

fn params(value: serde_json::Value) -> Parameters {
    value.as_object().cloned().unwrap()
}

#[tokio::test]
async fn test_token_api_call() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/execute/Email/list_pops"))
        .and(header("authorization", "cpanel foo:TOKEN123"))
        .and(query_param("regex", "^info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 1,
            "data": [{"email": "info@example.com"}],
            "errors": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut cpanel = create_test_client(
        &server,
        TokenAuthorization::new("foo", "TOKEN123"),
        temp_dir.path(),
    );
    let response = cpanel
        .api("Email", "list_pops", params(json!({"regex": "^info"})))
        .await
        .unwrap();

    assert_eq!(response.kind(), ResponseKind::Json);
    assert!(response.is_valid());
    assert!(!response.is_valid_for("foo"));
    let data = response.data().as_json().unwrap();
    assert_eq!(data["data"][0]["email"], "info@example.com");

    cpanel.close().await.unwrap();
}

#[tokio::test]
async fn test_web_response() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello world!"))
        .mount(&server)
        .await;

    let mut cpanel = create_test_client(
        &server,
        TokenAuthorization::new("foo", "TOKEN123"),
        temp_dir.path(),
    );
    let response = cpanel
        .api("Fileman", "get_file_content", Parameters::new())
        .await
        .unwrap();

    assert_eq!(response.kind(), ResponseKind::Web);
    assert_eq!(response.data().as_text(), Some("hello world!"));
    assert!(response.is_valid());
}

#[tokio::test]
async fn test_session_api_call_and_logout() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/login"))
        .and(query_param("user", "foo"))
        .and(query_param("pass", "bar"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": 1, "security_token": "/cpsess0123456789"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cpsess0123456789/execute/Quota/get_quota_info"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": 1, "data": {"megabytes_used": 42}})),
        )
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>bye</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let authorization = HttpAuthorization::new("foo", "bar")
        .with_storage(common::helpers::create_test_storage(temp_dir.path()));
    let mut cpanel = create_test_client(&server, authorization, temp_dir.path());

    for _ in 0..2 {
        let response = cpanel
            .api("Quota", "get_quota_info", Parameters::new())
            .await
            .unwrap();
        assert_eq!(
            response.data().as_json().unwrap()["data"]["megabytes_used"],
            42
        );
    }

    cpanel.close().await.unwrap();
}

#[tokio::test]
async fn test_failed_login_is_request_failed() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": 0})))
        .mount(&server)
        .await;

    let authorization = HttpAuthorization::new("foo", "wrong")
        .with_storage(common::helpers::create_test_storage(temp_dir.path()));
    let mut cpanel = create_test_client(&server, authorization, temp_dir.path());

    let err = cpanel
        .api("Quota", "get_quota_info", Parameters::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::RequestFailed { .. }));
    assert!(err.is_authentication_failure());
}

#[tokio::test]
async fn test_failed_requests_are_logged() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let mut cpanel = create_test_client(
        &server,
        TokenAuthorization::new("foo", "TOKEN123"),
        temp_dir.path(),
    );
    let response = cpanel
        .api("Email", "list_pops", Parameters::new())
        .await
        .unwrap();
    assert!(!response.is_valid());

    let log_file = cpanel.log_file().unwrap();
    let contents = std::fs::read_to_string(log_file.path()).unwrap();
    assert!(contents.contains("request-"));
    assert!(contents.contains("GET Email/list_pops 500"));

    let logs = LogFiles::new(temp_dir.path().join("logs"));
    assert_eq!(logs.list_all().unwrap(), vec![log_file.clone()]);
}

#[tokio::test]
async fn test_successful_requests_are_not_logged() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": 1, "data": {}})))
        .mount(&server)
        .await;

    let mut cpanel = create_test_client(
        &server,
        TokenAuthorization::new("foo", "TOKEN123"),
        temp_dir.path(),
    );
    cpanel
        .api("Email", "list_pops", Parameters::new())
        .await
        .unwrap();

    assert!(cpanel.log_file().is_none());
}

#[tokio::test]
async fn test_malformed_json_is_request_failed() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{not json", "application/json"))
        .mount(&server)
        .await;

    let mut cpanel = create_test_client(
        &server,
        TokenAuthorization::new("foo", "TOKEN123"),
        temp_dir.path(),
    );
    let err = cpanel
        .api("Email", "list_pops", Parameters::new())
        .await
        .unwrap_err();

    match err {
        Error::RequestFailed {
            source: Some(source),
            ..
        } => assert!(matches!(*source, Error::InvalidResponseData { .. })),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(cpanel.log_file().is_some());
}

#[tokio::test]
async fn test_unreachable_host_is_request_failed() {
    let temp_dir = TempDir::new().unwrap();
    let mut cpanel = CPanel::new(Box::new(TokenAuthorization::new("foo", "TOKEN123")), "127.0.0.1")
        .with_protocol(Protocol::Http)
        .with_port(1)
        .with_storage(common::helpers::create_test_storage(temp_dir.path()));

    let err = cpanel
        .api("Quota", "get_quota_info", Parameters::new())
        .await
        .unwrap_err();

    match err {
        Error::RequestFailed {
            source: Some(source),
            ..
        } => assert!(matches!(*source, Error::Network(_))),
        other => panic!("unexpected error: {other:?}"),
    }

    let contents = std::fs::read_to_string(cpanel.log_file().unwrap().path()).unwrap();
    assert!(contents.contains("GET Quota/get_quota_info"));
}

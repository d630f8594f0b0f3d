use std::sync::Once;

use monitor_client::{ApiClient, ApiError, ApiSettings};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(monitor_logging::initialize_for_tests);
}

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri(), ApiSettings::default()).expect("client")
}

#[tokio::test]
async fn sign_in_posts_credentials_and_returns_token_text() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/signin"))
        .and(body_json(serde_json::json!({
            "login": "admin@example.com",
            "password": "secret",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("tok-123"))
        .mount(&server)
        .await;

    let token = client(&server)
        .sign_in("admin@example.com", "secret")
        .await
        .expect("sign in");
    assert_eq!(token, "tok-123");
}

#[tokio::test]
async fn test_token_checks_for_ok_body() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/test/tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/test/stale"))
        .respond_with(ResponseTemplate::new(200).set_body_string("error"))
        .mount(&server)
        .await;

    let api = client(&server);
    assert!(api.test_token("tok-123").await.expect("live token"));
    assert!(!api.test_token("stale").await.expect("stale token"));
}

#[tokio::test]
async fn reports_listing_embeds_token_in_path() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/reports/tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            "2024-05-01 10:00:00",
            "2024-05-02 12:30:00",
        ])))
        .mount(&server)
        .await;

    let keys = client(&server).reports("tok-123").await.expect("reports");
    assert_eq!(keys.len(), 2);
    assert_eq!(keys[0], "2024-05-01 10:00:00");
}

#[tokio::test]
async fn report_sends_key_as_json_string_body() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/report/tok-123"))
        .and(body_json(serde_json::json!("2024-05-01 10:00:00")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "TotalLinks": 42,
            "URLs": ["http://a"],
            "Errors": {
                "http://a/missing": {
                    "HTTPStatus": 404,
                    "Error": "404 Not Found",
                    "ParentURL": "http://a",
                },
            },
        })))
        .mount(&server)
        .await;

    let report = client(&server)
        .report("tok-123", "2024-05-01 10:00:00")
        .await
        .expect("report");
    assert_eq!(report.total_links, 42);
    assert_eq!(report.urls, vec!["http://a"]);
    let detail = &report.errors["http://a/missing"];
    assert_eq!(detail.http_status, 404);
    assert_eq!(detail.parent_url, "http://a");
}

#[tokio::test]
async fn job_errors_maps_url_to_detail() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/processerrors/104/tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "http://broken": {
                "HTTPStatus": 500,
                "Error": "500 Internal Server Error",
                "ParentURL": "http://root",
            },
        })))
        .mount(&server)
        .await;

    let listing = client(&server)
        .job_errors("tok-123", 104)
        .await
        .expect("listing");
    assert_eq!(listing.len(), 1);
    assert_eq!(listing["http://broken"].http_status, 500);
}

#[tokio::test]
async fn non_success_status_surfaces_as_api_error() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/reports/expired"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client(&server)
        .reports("expired")
        .await
        .expect_err("unauthorized");
    assert!(matches!(err, ApiError::Status(401)));
}

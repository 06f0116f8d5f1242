use monitor_stream_rs::requests::RequestToHttpString;
use monitor_stream_rs::{Credentials, Cursor, MonitorClient, MonitorError};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn requests_carry_json_and_bearer_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2.0/datasets/monitor/stream"))
        .and(header("Content-Type", "application/json"))
        .and(header("Authorization", "Bearer eyJ0eXAi.token-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"endCursor": "c1"})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2.0/datasets/monitor/stream"))
        .and(header("Content-Type", "application/json"))
        .and(header("Authorization", "Bearer eyJ0eXAi.token-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"endCursor": "c1"})))
        .mount(&server)
        .await;

    let pages = monitor_stream_rs::fetch_all(
        &monitor_stream_rs::dataset_url(&server.uri()),
        "eyJ0eXAi.token-123",
        1,
    )
    .await
    .unwrap();
    assert_eq!(pages.len(), 1);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    for request in requests {
        let content_types: Vec<_> = request.headers.get_all("content-type").iter().collect();
        let authorizations: Vec<_> = request.headers.get_all("authorization").iter().collect();
        assert_eq!(content_types, vec!["application/json"]);
        assert_eq!(authorizations, vec!["Bearer eyJ0eXAi.token-123"]);
    }
}

#[tokio::test]
async fn prepared_request_dump_redacts_the_token() {
    let client = MonitorClient::builder()
        .base_path("https://lens.example.net:8443/api/v2.0/datasets/monitor/")
        .credentials(Credentials::new("secret-token"))
        .build();

    let mut cursor = Cursor::new(25);
    cursor.set_cursor_id("c7".to_string());
    let request = client.prepare_request(&cursor).unwrap();
    let dump = request.to_http_string().unwrap();

    assert!(dump.starts_with("GET /api/v2.0/datasets/monitor/stream?cursor=c7&limit=25 HTTP/1.1\n"));
    assert!(dump.contains("host: lens.example.net:8443\n"));
    assert!(dump.contains("content-type: application/json\n"));
    assert!(dump.contains("authorization: Bearer <redacted>\n"));
    assert!(!dump.contains("secret-token"));
}

#[tokio::test]
async fn empty_token_is_rejected_before_sending() {
    let client = MonitorClient::builder()
        .base_path("https://lens.example.net/api/v2.0/datasets/monitor")
        .credentials(Credentials::new(""))
        .build();

    let err = client.fetch_all(1).await.unwrap_err();
    assert!(matches!(err, MonitorError::MissingCredentials));
}

#[tokio::test]
async fn client_can_be_built_from_a_provider() {
    let provider = Credentials::new("provided-token");
    let client = MonitorClient::from_provider("https://lens.example.net/monitor/", &provider)
        .await
        .unwrap();

    assert_eq!(client.base_path(), "https://lens.example.net/monitor");
    assert_eq!(client.page_size(), monitor_stream_rs::DEFAULT_PAGE_SIZE);
    let headers = client.get_default_headers().unwrap();
    assert_eq!(headers["authorization"], "Bearer provided-token");

    let err = MonitorClient::from_provider("https://lens.example.net/monitor", &Credentials::new(""))
        .await
        .err()
        .unwrap();
    assert!(matches!(err, MonitorError::MissingCredentials));
}

#[tokio::test]
async fn connection_failures_are_transport_errors() {
    let base_path = monitor_stream_rs::dataset_url("http://127.0.0.1:1");

    let err = monitor_stream_rs::fetch_all(&base_path, "token", 1)
        .await
        .unwrap_err();

    assert!(err.is_transport(), "unexpected error: {err:?}");
    assert!(!err.is_protocol());
}

#[tokio::test]
#[ignore = "needs a live monitor dataset, see tests/.env"]
async fn test_live_stream() {
    dotenvy::from_filename("tests/.env").ok();

    let _guard = init_tracing_opentelemetry::TracingConfig::testing()
        .init_subscriber()
        .ok();

    let client = MonitorClient::builder()
        .base_path(std::env::var("MONITOR_BASE_PATH").unwrap().as_str())
        .credentials(Credentials::new(
            std::env::var("MONITOR_ACCESS_TOKEN").unwrap().as_str(),
        ))
        .max_pages(Some(5))
        .build();

    let mut paginator = client.paginator_with_page_size(1).unwrap();
    let first = paginator.next_page().await.unwrap();
    if let Some(page) = first {
        assert!(page["endCursor"].is_string());
    }
}

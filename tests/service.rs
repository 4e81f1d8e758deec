use std::time::Duration;

use testrail_client::{Error, StatusCode, TestCase, TestRailService, TestResult, TestRun};
use wiremock::matchers::{header, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Matches the `?/api/v2/...` part TestRail puts its routing in
struct ApiCall(&'static str);

impl Match for ApiCall {
    fn matches(&self, request: &Request) -> bool {
        request.url.query() == Some(self.0)
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn service_for(server: &MockServer) -> TestRailService {
    TestRailService::builder()
        .base_url(server.uri())
        .username("user")
        .password("pass")
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

/// The service is blocking; keep it off the runtime driving the mock server
async fn blocking<T, F>(f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(f).await.unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_case_over_http() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/index.php"))
        .and(ApiCall("/api/v2/get_case/7"))
        .and(header("authorization", "Basic dXNlcjpwYXNz"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"id":7,"title":"Login","section_id":3,"custom_preconds":"logged out","new_member":true}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let case = blocking(move || {
        let case = service.get_test_case(7).unwrap().unwrap();
        assert!(case.service.as_ref().unwrap().is_bound_to(&service));
        case
    })
    .await;

    assert_eq!(case.title.as_deref(), Some("Login"));
    assert_eq!(case.custom("preconds"), Some(&serde_json::json!("logged out")));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_case_is_api_error() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(ApiCall("/api/v2/get_case/999"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string(r#"{"error":"Field :case_id is not a valid test case."}"#),
        )
        .mount(&server)
        .await;

    let service = service_for(&server);
    let err = blocking(move || service.get_test_case(999).unwrap_err()).await;
    match err {
        Error::Api { status, message, .. } => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(message, "Field :case_id is not a valid test case.");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_result_retries_after_429() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(ApiCall("/api/v2/add_result/40"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(ApiCall("/api/v2/add_result/40"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":1,"test_id":40,"status_id":1}"#))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    blocking(move || service.add_test_result(40, &TestResult::new(1, Some("green"))))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(body, serde_json::json!({"status_id": 1, "comment": "green"}));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_persistent_429_reaches_caller() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(ApiCall("/api/v2/add_case/3"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(2)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let outcome = blocking(move || service.add_test_case(3, &TestCase::new("Logout")))
        .await
        .unwrap();
    assert_eq!(
        outcome.failure().map(|failure| failure.status),
        Some(StatusCode::TOO_MANY_REQUESTS)
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_close_run_rejection() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(ApiCall("/api/v2/close_run/12"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let err = blocking(move || {
        let run = TestRun {
            id: Some(12),
            ..Default::default()
        };
        service.close_test_run(&run).unwrap_err()
    })
    .await;

    let message = err.to_string();
    assert!(message.contains("12"), "{message}");
    assert!(message.ends_with("Internal Server Error (500)"), "{message}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_verify_credentials() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(ApiCall("/api/v2/get_projects"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"error":"Authentication failed"}"#))
        .mount(&server)
        .await;

    let service = service_for(&server);
    assert!(!blocking(move || service.verify_credentials().unwrap()).await);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_slow_server_times_out() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(ApiCall("/api/v2/get_projects"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]").set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let service = TestRailService::builder()
        .base_url(server.uri())
        .username("user")
        .password("pass")
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let err = blocking(move || service.get_projects().unwrap_err()).await;
    assert!(err.is_timeout(), "{err:?}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_project_walk() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(ApiCall("/api/v2/get_projects"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"offset":0,"limit":250,"size":2,"projects":[{"id":1,"name":"Datahub"},{"id":2,"name":"Checkout"}]}"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(ApiCall("/api/v2/get_runs/2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{"id":81,"name":"Nightly","project_id":2}]"#))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let runs = blocking(move || {
        let project = service.get_project_by_name("Checkout").unwrap().unwrap();
        assert!(service.get_project_by_name("Billing").unwrap().is_none());
        project.runs().unwrap()
    })
    .await;

    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].name.as_deref(), Some("Nightly"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_project_on_later_page() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(ApiCall("/api/v2/get_projects"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"offset":0,"limit":1,"size":1,"_links":{"next":"/api/v2/get_projects&offset=1&limit=1","prev":null},"projects":[{"id":1,"name":"Alpha"}]}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(ApiCall("/api/v2/get_projects&offset=1&limit=1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"offset":1,"limit":1,"size":1,"_links":{"next":null,"prev":"/api/v2/get_projects&offset=0&limit=1"},"projects":[{"id":2,"name":"Foo"}]}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let project = blocking(move || service.get_project_by_name("Foo").unwrap()).await;
    assert_eq!(project.and_then(|project| project.id), Some(2));
}

//! Integration tests using wiremock to simulate the Sentry API.

use http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use sentry_api::services::{IssueAlert, MetricAlert, TeamParams};
use sentry_api::{CancellationToken, Client, Error, ListCursorParams, PollPolicy, TaskError};
use serde_json::json;
use std::time::{Duration, Instant};
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn client_for(server: &MockServer) -> Client {
    init_tracing();
    Client::builder()
        .base_url(format!("{}/api/", server.uri()))
        .unwrap()
        .poll_policy(PollPolicy::Fixed {
            delay: Duration::from_millis(10),
            max_attempts: 5,
        })
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_get_organization() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/0/organizations/acme/"))
        .and(header("user-agent", "sentry-api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "2",
            "slug": "acme",
            "name": "Acme Corp",
            "dateCreated": "2022-06-05T17:31:31.170029Z",
            "require2FA": false,
            "features": ["alert-filters", "performance-view"]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client.organizations().get("acme").await.unwrap();

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.slug.as_deref(), Some("acme"));
    assert_eq!(response.name.as_deref(), Some("Acme Corp"));
    assert_eq!(response.require_2fa, Some(false));
    assert_eq!(response.features.len(), 2);
    assert_eq!(
        response.date_created.map(|d| d.to_rfc3339()),
        Some("2022-06-05T17:31:31.170029+00:00".to_string())
    );
}

#[tokio::test]
async fn test_post_sends_json_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/0/organizations/acme/teams/"))
        .and(header("content-type", "application/json"))
        .and(body_string(r#"{"name":"<Ops> & Friends"}"#))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"id": "7", "slug": "ops", "name": "<Ops> & Friends"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let params = TeamParams {
        name: Some("<Ops> & Friends".to_string()),
        slug: None,
    };
    let response = client.teams().create("acme", &params).await.unwrap();

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.slug.as_deref(), Some("ops"));
}

#[tokio::test]
async fn test_error_detail_from_json_object() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/0/projects/acme/missing/"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "The requested resource does not exist"})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.projects().get("acme", "missing").await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.detail(), Some("The requested resource does not exist"));
    match err {
        Error::Api(e) => {
            assert_eq!(e.response.method, Method::GET);
            assert!(e.to_string().ends_with("404 The requested resource does not exist"));
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_detail_variants() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/0/teams/acme/plain/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway\n"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/0/teams/acme/string/"))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#""team is archived""#))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/0/teams/acme/fields/"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string(r#"{"slug": ["This field is required."], "name": ["Too long."]}"#),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let err = client.teams().get("acme", "plain").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
    assert_eq!(err.detail(), Some("Bad Gateway"));

    let err = client.teams().get("acme", "string").await.unwrap_err();
    assert_eq!(err.detail(), Some("team is archived"));

    let err = client.teams().get("acme", "fields").await.unwrap_err();
    assert_eq!(
        err.detail(),
        Some(r#"{"slug":["This field is required."],"name":["Too long."]}"#)
    );
    assert_eq!(
        err.raw_response().as_deref(),
        Some(r#"{"slug": ["This field is required."], "name": ["Too long."]}"#)
    );
}

#[tokio::test]
async fn test_rate_limit_headers_on_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/0/organizations/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Sentry-Rate-Limit-Limit", "40")
                .insert_header("X-Sentry-Rate-Limit-Remaining", "39")
                .insert_header("X-Sentry-Rate-Limit-Reset", "1654566542")
                .insert_header("X-Sentry-Rate-Limit-ConcurrentLimit", "25")
                .insert_header("X-Sentry-Rate-Limit-ConcurrentRemaining", "24")
                .set_body_json(json!([])),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .organizations()
        .list(&ListCursorParams::default())
        .await
        .unwrap();

    assert!(response.is_empty());
    assert_eq!(response.rate.limit, 40);
    assert_eq!(response.rate.remaining, 39);
    assert_eq!(
        response.rate.reset,
        Some(std::time::UNIX_EPOCH + Duration::from_secs(1_654_566_542))
    );
    assert_eq!(response.rate.concurrent_limit, 25);
    assert_eq!(response.rate.concurrent_remaining, 24);
}

#[tokio::test]
async fn test_too_many_requests_with_exhausted_quota() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/0/organizations/"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("X-Sentry-Rate-Limit-Limit", "40")
                .insert_header("X-Sentry-Rate-Limit-Remaining", "0")
                .insert_header("X-Sentry-Rate-Limit-Reset", "1654566542")
                .set_body_json(json!({"detail": "You are attempting to use this endpoint too frequently. Limit is 40 requests in 1 seconds"})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .organizations()
        .list(&ListCursorParams::default())
        .await
        .unwrap_err();

    assert!(err.is_rate_limited());
    match err {
        Error::RateLimited(e) => {
            assert_eq!(e.status(), StatusCode::TOO_MANY_REQUESTS);
            assert_eq!(e.rate.limit, 40);
            assert_eq!(e.rate.remaining, 0);
            assert!(e.detail.starts_with("You are attempting"));
        }
        other => panic!("Expected RateLimited, got {:?}", other),
    }
}

#[tokio::test]
async fn test_too_many_requests_without_exhausted_quota_is_generic() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/0/organizations/"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("X-Sentry-Rate-Limit-Remaining", "5")
                .set_body_json(json!({"detail": "slow down"})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .organizations()
        .list(&ListCursorParams::default())
        .await
        .unwrap_err();

    assert!(!err.is_rate_limited());
    assert!(matches!(err, Error::Api(_)));
    assert_eq!(err.status(), Some(StatusCode::TOO_MANY_REQUESTS));
}

#[tokio::test]
async fn test_pagination_cursor() {
    let mock_server = MockServer::start().await;
    let base = format!("{}/api/0/organizations/acme/members/", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/0/organizations/acme/members/"))
        .and(query_param("cursor", "100:1:0"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "Link",
                    format!(
                        r#"<{base}?&cursor=100:0:1>; rel="previous"; results="true"; cursor="100:0:1", <{base}?&cursor=100:2:0>; rel="next"; results="false"; cursor="100:2:0""#
                    )
                    .as_str(),
                )
                .set_body_json(json!([{"id": "2", "email": "b@example.com"}])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/0/organizations/acme/members/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "Link",
                    format!(
                        r#"<{base}?&cursor=100:-1:1>; rel="previous"; results="false"; cursor="100:-1:1", <{base}?&cursor=100:1:0>; rel="next"; results="true"; cursor="100:1:0""#
                    )
                    .as_str(),
                )
                .set_body_json(json!([{"id": "1", "email": "a@example.com"}])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let members = client.organization_members();

    let first = members
        .list("acme", &ListCursorParams::default())
        .await
        .unwrap();
    assert_eq!(first[0].email, "a@example.com");
    assert_eq!(first.cursor, "100:1:0");
    assert!(first.has_next_page());

    let second = members
        .list("acme", &ListCursorParams::with_cursor(first.cursor.clone()))
        .await
        .unwrap();
    assert_eq!(second[0].email, "b@example.com");
    assert_eq!(second.cursor, "");
    assert!(!second.has_next_page());
}

#[tokio::test]
async fn test_numbers_keep_precision() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/0/organizations/acme/alert-rules/12345/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"id":"12345","timeWindow":0.1000000000000000055511151231257827,"resolveThreshold":12345678901234567890}"#,
        ))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let alert = client.metric_alerts().get("acme", "12345").await.unwrap();

    assert_eq!(
        alert.time_window.as_ref().map(ToString::to_string).as_deref(),
        Some("0.1000000000000000055511151231257827")
    );
    assert_eq!(
        alert.resolve_threshold.as_ref().map(ToString::to_string).as_deref(),
        Some("12345678901234567890")
    );
}

#[tokio::test]
async fn test_delete_with_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/0/projects/acme/pump-station/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .projects()
        .delete("acme", "pump-station")
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(response.raw_body.is_empty());
}

#[tokio::test]
async fn test_empty_body_where_resource_expected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/0/projects/acme/pump-station/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = client
        .new_request(Method::GET, "0/projects/acme/pump-station/")
        .unwrap();
    let response = client
        .execute::<serde_json::Value>(request)
        .await
        .unwrap();
    assert!(response.data.is_none());

    let err = client
        .projects()
        .get("acme", "pump-station")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::EmptyBody { status } if status == StatusCode::OK));
}

#[tokio::test]
async fn test_execute_raw_copies_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/0/projects/acme/pump-station/ownership/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("raw bytes, not JSON"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = client
        .new_request(Method::GET, "0/projects/acme/pump-station/ownership/")
        .unwrap();
    let mut sink = Vec::new();
    let response = client.execute_raw(request, &mut sink).await.unwrap();

    assert_eq!(sink, b"raw bytes, not JSON");
    assert_eq!(response.text(), "raw bytes, not JSON");
}

#[tokio::test]
async fn test_deserialization_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/0/teams/acme/backend/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("invalid json"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.teams().get("acme", "backend").await;

    match result {
        Err(Error::DeserializationFailed {
            raw_response,
            status,
            ..
        }) => {
            assert_eq!(raw_response, "invalid json");
            assert_eq!(status, StatusCode::OK);
        }
        other => panic!("Expected DeserializationFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_issue_alert_created_synchronously() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/0/projects/acme/pump-station/rules/"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": "12345", "name": "Notify"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let alert = IssueAlert {
        name: Some("Notify".to_string()),
        ..Default::default()
    };
    let response = client
        .issue_alerts()
        .create("acme", "pump-station", &alert)
        .await
        .unwrap();

    assert_eq!(response.id.as_deref(), Some("12345"));
}

#[tokio::test]
async fn test_issue_alert_resolved_through_task() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/0/projects/acme/pump-station/rules/"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"uuid": "abc"})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/0/projects/acme/pump-station/rule-task/abc/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "pending", "rule": null, "error": null})),
        )
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/0/projects/acme/pump-station/rule-task/abc/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "rule": {"id": "12345", "name": "Notify Slack", "frequency": 30},
            "error": null
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .issue_alerts()
        .create("acme", "pump-station", &IssueAlert::default())
        .await
        .unwrap();

    assert_eq!(response.id.as_deref(), Some("12345"));
    assert_eq!(response.frequency, Some(30));
}

#[tokio::test]
async fn test_metric_alert_task_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/0/projects/acme/pump-station/alert-rules/9/"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"uuid": "slow"})))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/0/projects/acme/pump-station/alert-rule-task/slow/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "pending"})))
        .expect(5)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .metric_alerts()
        .update("acme", "pump-station", "9", &MetricAlert::default())
        .await
        .unwrap_err();

    match err {
        Error::Task(TaskError::TimedOut { uuid, attempts }) => {
            assert_eq!(uuid, "slow");
            assert_eq!(attempts, 5);
        }
        other => panic!("Expected TimedOut, got {:?}", other),
    }
}

#[tokio::test]
async fn test_metric_alert_task_failed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/0/projects/acme/pump-station/alert-rules/"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"uuid": "bad"})))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/0/projects/acme/pump-station/alert-rule-task/bad/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "failed", "alertRule": null, "error": "boom"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .metric_alerts()
        .create("acme", "pump-station", &MetricAlert::default())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "boom");
    assert!(matches!(
        err,
        Error::Task(TaskError::Failed { ref message }) if message == "boom"
    ));
}

#[tokio::test]
async fn test_task_not_found_stops_polling() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/0/projects/acme/pump-station/rules/"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"uuid": "gone"})))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/0/projects/acme/pump-station/rule-task/gone/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .issue_alerts()
        .create("acme", "pump-station", &IssueAlert::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Task(TaskError::NotFound { ref uuid }) if uuid == "gone"
    ));
}

#[tokio::test]
async fn test_accepted_without_task_handle() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/0/projects/acme/pump-station/rules/"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .issue_alerts()
        .create("acme", "pump-station", &IssueAlert::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Task(TaskError::MissingHandle)));
    assert_eq!(err.to_string(), "missing task uuid");
}

#[tokio::test]
async fn test_cancellation_interrupts_task_polling() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/0/projects/acme/pump-station/rules/"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"uuid": "abc"})))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/0/projects/acme/pump-station/rule-task/abc/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "pending"})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let token = CancellationToken::new();
    let client = Client::builder()
        .base_url(format!("{}/api/", mock_server.uri()))
        .unwrap()
        .build()
        .unwrap()
        .with_cancellation(token.clone());

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        token.cancel();
    });

    let start = Instant::now();
    let err = client
        .issue_alerts()
        .create("acme", "pump-station", &IssueAlert::default())
        .await
        .unwrap_err();
    canceller.await.unwrap();

    assert!(matches!(err, Error::Cancelled));
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_cancellation_interrupts_slow_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/0/organizations/acme/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"slug": "acme"}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let token = CancellationToken::new();
    let client = client_for(&mock_server).with_cancellation(token.clone());

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        token.cancel();
    });

    let start = Instant::now();
    let err = client.organizations().get("acme").await.unwrap_err();
    canceller.await.unwrap();

    assert!(matches!(err, Error::Cancelled));
    assert!(start.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_cancelled_client_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/0/organizations/acme/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"slug": "acme"})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let token = CancellationToken::new();
    token.cancel();
    let client = client_for(&mock_server).with_cancellation(token);

    let err = client.organizations().get("acme").await.unwrap_err();
    assert!(matches!(err, Error::Cancelled));
}

#[tokio::test]
async fn test_base_url_without_trailing_slash() {
    let mock_server = MockServer::start().await;

    let client = Client::builder()
        .base_url(format!("{}/api", mock_server.uri()))
        .unwrap()
        .build()
        .unwrap();

    let err = client.organizations().get("acme").await.unwrap_err();
    assert!(matches!(err, Error::ConfigurationError(_)));
}

#[tokio::test]
async fn test_project_filter_config() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/0/projects/acme/pump-station/filters/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "browser-extensions", "active": true},
            {"id": "legacy-browsers", "active": ["ie_pre_9"]},
            {"id": "web-crawlers", "active": false}
        ])))
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/0/projects/acme/pump-station/filters/legacy-browsers/"))
        .and(body_string(r#"{"subfilters":["ie_pre_9","opera_pre_15"]}"#))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let filters = client.project_filters();

    let config = filters
        .get_filter_config("acme", "pump-station")
        .await
        .unwrap();
    assert!(config.browser_extension);
    assert_eq!(config.legacy_browsers, vec!["ie_pre_9".to_string()]);

    let browsers = vec!["ie_pre_9".to_string(), "opera_pre_15".to_string()];
    filters
        .update_legacy_browsers("acme", "pump-station", &browsers)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_dashboard_widget_validation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/0/organizations/acme/dashboards/widgets/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"title": ["This field is required."]})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .dashboard_widgets()
        .validate("acme", &Default::default())
        .await
        .unwrap();

    let errors = response.data.expect("validation errors");
    assert_eq!(errors["title"], vec!["This field is required.".to_string()]);
}

#[tokio::test]
async fn test_release_deployment_found_on_later_page() {
    let mock_server = MockServer::start().await;
    let base = format!(
        "{}/api/0/organizations/acme/releases/1.2.0/deploys/",
        mock_server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/api/0/organizations/acme/releases/1.2.0/deploys/"))
        .and(query_param("cursor", "100:1:0"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "Link",
                    format!(r#"<{base}?&cursor=100:2:0>; rel="next"; results="false"; cursor="100:2:0""#)
                        .as_str(),
                )
                .set_body_json(json!([
                    {"id": "8", "environment": "staging"},
                    {"id": "9", "environment": "production", "projects": ["pump-station"]}
                ])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/0/organizations/acme/releases/1.2.0/deploys/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "Link",
                    format!(r#"<{base}?&cursor=100:1:0>; rel="next"; results="true"; cursor="100:1:0""#)
                        .as_str(),
                )
                .set_body_json(json!([{"id": "7", "environment": "production"}])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .release_deployments()
        .get("acme", "1.2.0", "9")
        .await
        .unwrap();

    let deploy = response.data.unwrap();
    assert_eq!(deploy.environment, "production");
    assert_eq!(deploy.projects, vec!["pump-station".to_string()]);
}

#[tokio::test]
async fn test_release_deployment_missing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/0/organizations/acme/releases/1.2.0/deploys/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "7"}])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .release_deployments()
        .get("acme", "1.2.0", "9")
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.data.is_none());
}

#[tokio::test]
async fn test_get_pagerduty_integration() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/0/organizations/acme/integrations/123456/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "123456",
            "name": "acme",
            "configData": {
                "service_table": [
                    {"service": "api", "integration_key": "key-1", "id": 7},
                    {"service": "web", "integration_key": "key-2", "id": 8}
                ]
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let integration = client.pagerduty().get("acme", 123456).await.unwrap();

    let services: Vec<_> = integration
        .config_data
        .service_table
        .iter()
        .map(|s| s.service.as_str())
        .collect();
    assert_eq!(services, vec!["api", "web"]);
}

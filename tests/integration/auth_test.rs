//! Integration tests for authentication and the access policy.

mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use helpers::TestApp;

#[tokio::test]
async fn test_ping() {
    let app = TestApp::without_database().await;
    let response = app.request("GET", "/ping", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!("pong"));
}

#[tokio::test]
async fn test_health_reports_unreachable_database() {
    let app = TestApp::without_database().await;
    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["database"], "down");
    assert_eq!(response.body["cache"], "up");
}

#[tokio::test]
async fn test_metrics_count_requests_by_route() {
    let app = TestApp::without_database().await;
    app.request("GET", "/ping", None, None).await;
    app.request("GET", "/ping", None, None).await;

    let response = app.request("GET", "/metrics", None, None).await;
    assert_eq!(response.status, StatusCode::OK);

    let text = response.body.as_str().expect("metrics are plain text");
    assert!(
        text.contains(r#"http_requests_total{endpoint="/ping",method="GET"} 2"#),
        "{text}"
    );
    assert!(text.contains("http_response_time_seconds_bucket"), "{text}");
    assert!(text.contains("pvz_created_total 0"), "{text}");
}

#[tokio::test]
async fn test_missing_token_is_unauthenticated() {
    let app = TestApp::without_database().await;
    let response = app.request("GET", "/pvz", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_every_bad_credential_shape_gets_one_message() {
    let app = TestApp::without_database().await;

    let mut messages = Vec::new();
    for header in [None, Some("Basic dXNlcjpwYXNz"), Some("Bearer "), Some("Bearer nonsense")] {
        let mut req = Request::builder().method("GET").uri("/pvz");
        if let Some(value) = header {
            req = req.header("Authorization", value);
        }
        let response = app
            .router
            .clone()
            .oneshot(req.body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{header:?}");

        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        messages.push(body["message"].clone());
    }

    assert!(messages.iter().all(|m| m == &messages[0]), "{messages:?}");
    assert_eq!(messages[0], "Invalid or expired token");
}

#[tokio::test]
async fn test_dummy_login_rejects_unknown_role() {
    let app = TestApp::without_database().await;
    let response = app
        .request("POST", "/dummyLogin", Some(json!({ "role": "admin" })), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_employee_cannot_create_point() {
    let app = TestApp::without_database().await;
    let token = app.dummy_login("employee").await;

    let response = app
        .request("POST", "/pvz", Some(json!({ "city": "Москва" })), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_moderator_cannot_run_receptions() {
    let app = TestApp::without_database().await;
    let token = app.dummy_login("moderator").await;
    let pvz_id = Uuid::new_v4().to_string();

    let open = app
        .request(
            "POST",
            "/receptions",
            Some(json!({ "pvzId": pvz_id })),
            Some(&token),
        )
        .await;
    assert_eq!(open.status, StatusCode::FORBIDDEN);

    let add = app
        .request(
            "POST",
            "/products",
            Some(json!({ "type": "обувь", "pvzId": pvz_id })),
            Some(&token),
        )
        .await;
    assert_eq!(add.status, StatusCode::FORBIDDEN);

    let close = app
        .request(
            "POST",
            &format!("/pvz/{pvz_id}/close_last_reception"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(close.status, StatusCode::FORBIDDEN);

    let remove = app
        .request(
            "POST",
            &format!("/pvz/{pvz_id}/delete_last_product"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(remove.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let app = TestApp::without_database().await;
    let token = app.dummy_login("employee").await;

    let response = app.request("POST", "/logout", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let revoked = app.request("GET", "/pvz", None, Some(&token)).await;
    assert_eq!(revoked.status, StatusCode::UNAUTHORIZED);

    let garbage = app.request("GET", "/pvz", None, Some("garbage")).await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(revoked.body["message"], garbage.body["message"]);
}

#[tokio::test]
async fn test_second_dummy_login_is_independent() {
    let app = TestApp::without_database().await;
    let first = app.dummy_login("employee").await;
    let second = app.dummy_login("employee").await;

    app.request("POST", "/logout", None, Some(&second)).await;

    let response = app.request("POST", "/logout", None, Some(&first)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_register_validates_before_storing() {
    let app = TestApp::without_database().await;

    let bad_email = app
        .request(
            "POST",
            "/register",
            Some(json!({ "email": "nope", "password": "secret1", "role": "employee" })),
            None,
        )
        .await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);

    let short_password = app
        .request(
            "POST",
            "/register",
            Some(json!({ "email": "a@example.com", "password": "123", "role": "employee" })),
            None,
        )
        .await;
    assert_eq!(short_password.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_and_login() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let email = format!("{}@example.com", Uuid::new_v4());

    let registered = app
        .request(
            "POST",
            "/register",
            Some(json!({ "email": email, "password": "secret1", "role": "moderator" })),
            None,
        )
        .await;
    assert_eq!(registered.status, StatusCode::CREATED);
    assert_eq!(registered.body["role"], "moderator");
    assert!(registered.body.get("passwordHash").is_none());

    let duplicate = app
        .request(
            "POST",
            "/register",
            Some(json!({ "email": email.to_uppercase(), "password": "secret2", "role": "employee" })),
            None,
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let wrong = app
        .request(
            "POST",
            "/login",
            Some(json!({ "email": email, "password": "wrong!" })),
            None,
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    let login = |password: &'static str| {
        let email = email.clone();
        let app = &app;
        async move {
            app.request(
                "POST",
                "/login",
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await
        }
    };

    let first = login("secret1").await;
    assert_eq!(first.status, StatusCode::OK);
    let first_token = first.body["token"].as_str().unwrap().to_string();

    let second = login("secret1").await;
    let second_token = second.body["token"].as_str().unwrap().to_string();

    let superseded = app
        .request("POST", "/logout", None, Some(&first_token))
        .await;
    assert_eq!(superseded.status, StatusCode::UNAUTHORIZED);

    let current = app
        .request("POST", "/logout", None, Some(&second_token))
        .await;
    assert_eq!(current.status, StatusCode::NO_CONTENT);
}

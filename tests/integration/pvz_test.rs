//! Integration tests for point registration and the nested listing.

mod helpers;

use axum::http::StatusCode;
use serde_json::{Value, json};

use helpers::TestApp;

#[tokio::test]
async fn test_listing_rejects_bad_pagination() {
    let app = TestApp::without_database().await;
    let token = app.dummy_login("employee").await;

    for query in [
        "limit=31",
        "limit=0",
        "page=0",
        "page=-1",
        "limit=abc",
        "startDate=2025-01-02T00:00:00Z&endDate=2025-01-01T00:00:00Z",
        "startDate=yesterday",
    ] {
        let response = app
            .request("GET", &format!("/pvz?{query}"), None, Some(&token))
            .await;
        assert_eq!(
            response.status,
            StatusCode::BAD_REQUEST,
            "query {query}: {:?}",
            response.body
        );
        assert_eq!(response.body["error"], "INVALID_INPUT");
    }
}

#[tokio::test]
async fn test_create_rejects_unknown_city() {
    let app = TestApp::without_database().await;
    let token = app.dummy_login("moderator").await;

    let response = app
        .request("POST", "/pvz", Some(json!({ "city": "Paris" })), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_point_accepts_english_alias() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let token = app.dummy_login("moderator").await;

    let response = app
        .request("POST", "/pvz", Some(json!({ "city": "Kazan" })), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["city"], "Казань");
    assert!(response.body["registrationDate"].is_string());
}

fn find_point<'a>(listing: &'a Value, pvz_id: &str) -> Option<&'a Value> {
    listing
        .as_array()?
        .iter()
        .find(|entry| entry["pvz"]["id"] == pvz_id)
}

#[tokio::test]
async fn test_listing_nests_receptions_and_products() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let pvz_id = app.create_point("Москва").await;
    let employee = app.dummy_login("employee").await;

    let opened = app
        .request(
            "POST",
            "/receptions",
            Some(json!({ "pvzId": pvz_id })),
            Some(&employee),
        )
        .await;
    assert_eq!(opened.status, StatusCode::CREATED);
    let opened_at = opened.body["dateTime"].as_str().unwrap().to_string();

    for kind in ["электроника", "clothes"] {
        let added = app
            .request(
                "POST",
                "/products",
                Some(json!({ "type": kind, "pvzId": pvz_id })),
                Some(&employee),
            )
            .await;
        assert_eq!(added.status, StatusCode::CREATED);
    }

    let listing = app
        .request("GET", "/pvz?page=1&limit=30", None, Some(&employee))
        .await;
    assert_eq!(listing.status, StatusCode::OK);

    let entry = find_point(&listing.body, &pvz_id).expect("new point is listed");
    let receptions = entry["receptions"].as_array().unwrap();
    assert_eq!(receptions.len(), 1);
    assert_eq!(receptions[0]["reception"]["status"], "in_progress");

    let products = receptions[0]["products"].as_array().unwrap();
    let kinds: Vec<&str> = products.iter().map(|p| p["type"].as_str().unwrap()).collect();
    assert_eq!(kinds, vec!["электроника", "одежда"]);

    // A window that ends before the reception excludes the point entirely.
    let filtered = app
        .request(
            "GET",
            "/pvz?limit=30&endDate=2000-01-01T00:00:00Z",
            None,
            Some(&employee),
        )
        .await;
    assert_eq!(filtered.status, StatusCode::OK);
    assert!(find_point(&filtered.body, &pvz_id).is_none());

    // A window starting at the reception keeps it.
    let start = opened_at.replace('+', "%2B");
    let windowed = app
        .request(
            "GET",
            &format!("/pvz?limit=30&startDate={start}"),
            None,
            Some(&employee),
        )
        .await;
    assert_eq!(windowed.status, StatusCode::OK);
    assert!(find_point(&windowed.body, &pvz_id).is_some());
}

#[tokio::test]
async fn test_point_without_receptions_listed_without_filter() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let pvz_id = app.create_point("Санкт-Петербург").await;
    let moderator = app.dummy_login("moderator").await;

    let listing = app
        .request("GET", "/pvz?limit=30", None, Some(&moderator))
        .await;
    assert_eq!(listing.status, StatusCode::OK);

    let entry = find_point(&listing.body, &pvz_id).expect("new point is listed");
    assert_eq!(entry["receptions"], json!([]));
}

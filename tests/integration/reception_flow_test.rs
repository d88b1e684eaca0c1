//! End-to-end reception workflow against a real database.
//!
//! Every test here returns early unless `PVZ_TEST_DATABASE_URL` is set.

mod helpers;

use std::collections::HashSet;
use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use tokio::task::JoinSet;

use helpers::TestApp;

#[tokio::test]
async fn test_full_reception_cycle() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let pvz_id = app.create_point("Казань").await;
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
    assert_eq!(opened.body["pvzId"], pvz_id.as_str());
    assert_eq!(opened.body["status"], "in_progress");

    let mut added = Vec::new();
    for _ in 0..50 {
        let response = app
            .request(
                "POST",
                "/products",
                Some(json!({ "type": "electronics", "pvzId": pvz_id })),
                Some(&employee),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body["type"], "электроника");
        assert_eq!(response.body["receptionId"], opened.body["id"]);
        added.push(response.body["id"].as_str().unwrap().to_string());
    }

    let closed = app
        .request(
            "POST",
            &format!("/pvz/{pvz_id}/close_last_reception"),
            None,
            Some(&employee),
        )
        .await;
    assert_eq!(closed.status, StatusCode::OK);
    assert_eq!(closed.body["status"], "close");
    assert_eq!(closed.body["id"], opened.body["id"]);

    let after_close = app
        .request(
            "POST",
            "/products",
            Some(json!({ "type": "обувь", "pvzId": pvz_id })),
            Some(&employee),
        )
        .await;
    assert_eq!(after_close.status, StatusCode::NOT_FOUND);

    let second_close = app
        .request(
            "POST",
            &format!("/pvz/{pvz_id}/close_last_reception"),
            None,
            Some(&employee),
        )
        .await;
    assert_eq!(second_close.status, StatusCode::NOT_FOUND);

    let reopened = app
        .request(
            "POST",
            "/receptions",
            Some(json!({ "pvzId": pvz_id })),
            Some(&employee),
        )
        .await;
    assert_eq!(reopened.status, StatusCode::CREATED);
    assert_ne!(reopened.body["id"], opened.body["id"]);

    let metrics = app.request("GET", "/metrics", None, None).await;
    assert_eq!(metrics.status, StatusCode::OK);
    let text = metrics.body.as_str().expect("metrics are plain text");
    assert!(text.contains("pvz_created_total 1"), "{text}");
    assert!(text.contains("order_receipts_created_total 2"), "{text}");
    assert!(text.contains("products_added_total 50"), "{text}");
}

#[tokio::test]
async fn test_second_open_conflicts() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let pvz_id = app.create_point("Москва").await;
    let employee = app.dummy_login("employee").await;
    let body = json!({ "pvzId": pvz_id });

    let first = app
        .request("POST", "/receptions", Some(body.clone()), Some(&employee))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app
        .request("POST", "/receptions", Some(body), Some(&employee))
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_concurrent_opens_admit_exactly_one() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let app = Arc::new(app);
    let pvz_id = app.create_point("Москва").await;
    let employee = app.dummy_login("employee").await;

    let mut tasks = JoinSet::new();
    for _ in 0..10 {
        let app = Arc::clone(&app);
        let body = json!({ "pvzId": pvz_id });
        let token = employee.clone();
        tasks.spawn(async move {
            app.request("POST", "/receptions", Some(body), Some(&token))
                .await
                .status
        });
    }

    let mut created = 0;
    let mut conflicts = 0;
    while let Some(status) = tasks.join_next().await {
        match status.unwrap() {
            StatusCode::CREATED => created += 1,
            StatusCode::CONFLICT => conflicts += 1,
            other => panic!("unexpected status {other}"),
        }
    }
    assert_eq!(created, 1);
    assert_eq!(conflicts, 9);
}

/// Opens a reception at `pvz_id` and returns its id.
async fn open_reception(app: &TestApp, pvz_id: &str, token: &str) -> String {
    let opened = app
        .request(
            "POST",
            "/receptions",
            Some(json!({ "pvzId": pvz_id })),
            Some(token),
        )
        .await;
    assert_eq!(opened.status, StatusCode::CREATED, "{:?}", opened.body);
    opened.body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_concurrent_removals_take_distinct_products() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let app = Arc::new(app);
    let pvz_id = app.create_point("Казань").await;
    let employee = app.dummy_login("employee").await;
    open_reception(&app, &pvz_id, &employee).await;

    for _ in 0..6 {
        let added = app
            .request(
                "POST",
                "/products",
                Some(json!({ "type": "одежда", "pvzId": pvz_id })),
                Some(&employee),
            )
            .await;
        assert_eq!(added.status, StatusCode::CREATED);
    }

    let mut tasks = JoinSet::new();
    for _ in 0..8 {
        let app = Arc::clone(&app);
        let path = format!("/pvz/{pvz_id}/delete_last_product");
        let token = employee.clone();
        tasks.spawn(async move { app.request("POST", &path, None, Some(&token)).await });
    }

    let mut removed = HashSet::new();
    let mut not_found = 0;
    while let Some(response) = tasks.join_next().await {
        let response = response.unwrap();
        match response.status {
            StatusCode::OK => {
                let id = response.body["id"].as_str().unwrap().to_string();
                assert!(removed.insert(id), "a product was removed twice");
            }
            StatusCode::NOT_FOUND => not_found += 1,
            other => panic!("unexpected status {other}: {:?}", response.body),
        }
    }
    assert_eq!(removed.len(), 6);
    assert_eq!(not_found, 2);
}

#[tokio::test]
async fn test_adds_racing_close_never_land_in_closed_reception() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let app = Arc::new(app);
    let pvz_id = app.create_point("Москва").await;
    let employee = app.dummy_login("employee").await;
    let reception_id = open_reception(&app, &pvz_id, &employee).await;

    let mut tasks = JoinSet::new();
    for i in 0..20 {
        let app = Arc::clone(&app);
        let pvz_id = pvz_id.clone();
        let token = employee.clone();
        tasks.spawn(async move {
            if i == 10 {
                let path = format!("/pvz/{pvz_id}/close_last_reception");
                (true, app.request("POST", &path, None, Some(&token)).await)
            } else {
                let body = json!({ "type": "обувь", "pvzId": pvz_id });
                (false, app.request("POST", "/products", Some(body), Some(&token)).await)
            }
        });
    }

    let mut added = 0_i64;
    while let Some(result) = tasks.join_next().await {
        let (is_close, response) = result.unwrap();
        if is_close {
            assert_eq!(response.status, StatusCode::OK);
            assert_eq!(response.body["status"], "close");
            continue;
        }
        match response.status {
            StatusCode::CREATED => {
                assert_eq!(response.body["receptionId"], reception_id.as_str());
                added += 1;
            }
            StatusCode::NOT_FOUND => {}
            other => panic!("unexpected status {other}: {:?}", response.body),
        }
    }

    // Every stored product was acknowledged, and nothing lands after close.
    let reception_uuid: uuid::Uuid = reception_id.parse().unwrap();
    let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product WHERE reception_id = $1")
        .bind(reception_uuid)
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(stored, added);

    let late = app
        .request(
            "POST",
            "/products",
            Some(json!({ "type": "обувь", "pvzId": pvz_id })),
            Some(&employee),
        )
        .await;
    assert_eq!(late.status, StatusCode::NOT_FOUND);
    let after: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product WHERE reception_id = $1")
        .bind(reception_uuid)
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(after, stored);
}

#[tokio::test]
async fn test_equal_timestamps_remove_latest_insert_first() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let pvz_id = app.create_point("Санкт-Петербург").await;
    let employee = app.dummy_login("employee").await;
    let reception_id: uuid::Uuid = open_reception(&app, &pvz_id, &employee)
        .await
        .parse()
        .unwrap();

    let first = uuid::Uuid::new_v4();
    let second = uuid::Uuid::new_v4();
    // now() is fixed for the statement, so both rows share one date_time.
    sqlx::query(
        "INSERT INTO product (id, date_time, type, reception_id) VALUES \
         ($1, now(), 'обувь', $3), ($2, now(), 'одежда', $3)",
    )
    .bind(first)
    .bind(second)
    .bind(reception_id)
    .execute(&app.db_pool)
    .await
    .unwrap();

    let same_time: bool = sqlx::query_scalar(
        "SELECT COUNT(DISTINCT date_time) = 1 FROM product WHERE reception_id = $1",
    )
    .bind(reception_id)
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert!(same_time);

    let path = format!("/pvz/{pvz_id}/delete_last_product");
    for expected in [second, first] {
        let removed = app.request("POST", &path, None, Some(&employee)).await;
        assert_eq!(removed.status, StatusCode::OK);
        assert_eq!(removed.body["id"], expected.to_string());
    }
}

#[tokio::test]
async fn test_remove_last_is_lifo() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let pvz_id = app.create_point("Санкт-Петербург").await;
    let employee = app.dummy_login("employee").await;

    app.request(
        "POST",
        "/receptions",
        Some(json!({ "pvzId": pvz_id })),
        Some(&employee),
    )
    .await;

    let mut ids = Vec::new();
    for kind in ["обувь", "одежда", "электроника"] {
        let response = app
            .request(
                "POST",
                "/products",
                Some(json!({ "type": kind, "pvzId": pvz_id })),
                Some(&employee),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        ids.push(response.body["id"].clone());
    }

    let remove_path = format!("/pvz/{pvz_id}/delete_last_product");
    for expected in ids.iter().rev() {
        let removed = app
            .request("POST", &remove_path, None, Some(&employee))
            .await;
        assert_eq!(removed.status, StatusCode::OK);
        assert_eq!(&removed.body["id"], expected);
    }

    let empty = app
        .request("POST", &remove_path, None, Some(&employee))
        .await;
    assert_eq!(empty.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_point_is_not_found() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let employee = app.dummy_login("employee").await;
    let missing = uuid::Uuid::new_v4();

    let open = app
        .request(
            "POST",
            "/receptions",
            Some(json!({ "pvzId": missing })),
            Some(&employee),
        )
        .await;
    assert_eq!(open.status, StatusCode::NOT_FOUND);

    let close = app
        .request(
            "POST",
            &format!("/pvz/{missing}/close_last_reception"),
            None,
            Some(&employee),
        )
        .await;
    assert_eq!(close.status, StatusCode::NOT_FOUND);
}

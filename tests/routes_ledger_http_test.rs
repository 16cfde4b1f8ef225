// ABOUTME: HTTP integration tests for the consumption ledger routes
// ABOUTME: Logging foods, daily and weekly aggregation, import, export and clear
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

mod common;
mod helpers;

use axum::http::StatusCode;
use axum::Router;
use common::{off_record, usda_record};
use helpers::axum_test::AxumTestRequest;
use sanus_server::middleware::build_app;
use serde_json::{json, Value};
use uuid::Uuid;

async fn app() -> Router {
    let resources = common::create_default_resources().await;
    build_app(&resources)
}

async fn log(app: &Router, user: Uuid, body: &Value) -> Value {
    AxumTestRequest::post("/api/ledger/entries")
        .user(user)
        .json(body)
        .send(app.clone())
        .await
        .assert_status(StatusCode::CREATED)
        .json()
}

#[tokio::test]
async fn test_log_food_returns_entry_and_calories() {
    let app = app().await;
    let user = Uuid::new_v4();

    let body = log(
        &app,
        user,
        &json!({
            "food": off_record("3017620422003", "Granola", 200.0),
            "grams": "150",
            "date": "2025-03-10"
        }),
    )
    .await;

    assert_eq!(body["date"], "03/10/2025");
    assert_eq!(body["calories"], 300.0);
    assert_eq!(body["entry"]["source"], "OFD");
    assert_eq!(body["entry"]["id"], "3017620422003");
    assert_eq!(body["entry"]["title"], "Granola");
    assert_eq!(body["entry"]["kcal_per_100g"], "200");
    assert_eq!(body["entry"]["grams"], "150");
}

#[tokio::test]
async fn test_usda_entry_uses_fdc_id() {
    let app = app().await;
    let body = log(
        &app,
        Uuid::new_v4(),
        &json!({ "food": usda_record(171_688, "Apples, raw", 52.0), "grams": 100 }),
    )
    .await;

    assert_eq!(body["entry"]["source"], "usda");
    assert_eq!(body["entry"]["id"], "171688");
    assert_eq!(body["entry"]["grams"], "100");
}

#[tokio::test]
async fn test_invalid_grams_rejected() {
    let app = app().await;
    let user = Uuid::new_v4();

    for grams in ["0", "-5", "abc", ""] {
        let body: Value = AxumTestRequest::post("/api/ledger/entries")
            .user(user)
            .json(&json!({ "food": off_record("1", "Tea", 1.0), "grams": grams }))
            .send(app.clone())
            .await
            .assert_status(StatusCode::BAD_REQUEST)
            .json();
        assert_eq!(body["error"]["message"], "Please enter a valid amount in grams");
    }

    let exported: Value = AxumTestRequest::get("/api/ledger")
        .user(user)
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert!(exported["foodConsumes"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_daily_and_weekly_summaries() {
    let app = app().await;
    let user = Uuid::new_v4();

    log(
        &app,
        user,
        &json!({ "food": off_record("1", "Granola", 200.0), "grams": "150", "date": "2025-03-10" }),
    )
    .await;
    log(
        &app,
        user,
        &json!({ "food": off_record("2", "Milk", 64.0), "grams": "250", "date": "2025-03-10" }),
    )
    .await;
    log(
        &app,
        user,
        &json!({ "food": off_record("3", "Rice", 130.0), "grams": "200", "date": "2025-03-08" }),
    )
    .await;

    let daily: Value = AxumTestRequest::get("/api/ledger/daily?date=2025-03-10")
        .user(user)
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(daily["date"], "03/10/2025");
    let foods = daily["foods"].as_array().unwrap();
    assert_eq!(foods.len(), 2);
    assert_eq!(foods[0]["title"], "Granola");
    assert_eq!(foods[0]["calculatedCalories"], 300.0);
    assert_eq!(foods[1]["displayGrams"], 250.0);
    assert_eq!(daily["totalCalories"], 460.0);

    let weekly: Value = AxumTestRequest::get("/api/ledger/weekly?date=2025-03-10")
        .user(user)
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    let days = weekly["days"].as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["date"], "03/04/2025");
    assert_eq!(days[4]["calories"], 260.0);
    assert_eq!(days[6]["date"], "03/10/2025");
    assert_eq!(days[6]["weekday"], "Mon");
    assert_eq!(days[6]["foodCount"], 2);
    assert_eq!(days[6]["isSelected"], true);
    assert_eq!(days[5]["calories"], 0.0);

    AxumTestRequest::get("/api/ledger/daily?date=2025-13-01")
        .user(user)
        .send(app)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_weekly_summary_rejects_out_of_range_years() {
    let app = app().await;
    let user = Uuid::new_v4();

    for date in ["-262143-01-03", "0001-01-01", "1899-12-31", "+10000-01-01"] {
        let body: Value = AxumTestRequest::get(&format!("/api/ledger/weekly?date={date}"))
            .user(user)
            .send(app.clone())
            .await
            .assert_status(StatusCode::BAD_REQUEST)
            .json();
        assert_eq!(body["error"]["code"], "INVALID_FORMAT", "{date}");
    }

    let weekly: Value = AxumTestRequest::get("/api/ledger/weekly?date=1900-01-03")
        .user(user)
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(weekly["days"][0]["date"], "12/28/1899");
}

#[tokio::test]
async fn test_export_newest_day_first() {
    let app = app().await;
    let user = Uuid::new_v4();

    for date in ["2025-03-08", "2025-03-10", "2025-03-08"] {
        log(
            &app,
            user,
            &json!({ "food": off_record("1", "Tea", 1.0), "grams": "250", "date": date }),
        )
        .await;
    }

    let exported: Value = AxumTestRequest::get("/api/ledger")
        .user(user)
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();
    let buckets = exported["foodConsumes"].as_array().unwrap();
    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0]["date"], "03/10/2025");
    assert_eq!(buckets[1]["date"], "03/08/2025");
    assert_eq!(buckets[1]["consumes"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_import_replaces_and_clear_removes() {
    let app = app().await;
    let user = Uuid::new_v4();

    log(
        &app,
        user,
        &json!({ "food": off_record("9", "Old entry", 100.0), "grams": "100", "date": "2025-01-01" }),
    )
    .await;

    let document = json!({
        "foodConsumes": [
            {
                "date": "03/12/2025",
                "consumes": [
                    { "source": "usda", "id": 171_688, "title": "Apples, raw", "kcal_per_100g": 52, "grams": "180" }
                ]
            },
            { "date": "03/11/2025", "consumes": [] }
        ]
    });

    let stored: Value = AxumTestRequest::put("/api/ledger")
        .user(user)
        .json(&document)
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    let buckets = stored["foodConsumes"].as_array().unwrap();
    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0]["date"], "03/12/2025");
    assert_eq!(buckets[0]["consumes"][0]["id"], "171688");
    assert_eq!(buckets[0]["consumes"][0]["kcal_per_100g"], "52");
    assert_eq!(buckets[1]["date"], "03/11/2025");

    let cleared: Value = AxumTestRequest::delete("/api/ledger")
        .user(user)
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(cleared["daysRemoved"], 2);

    let exported: Value = AxumTestRequest::get("/api/ledger")
        .user(user)
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert!(exported["foodConsumes"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_import_rejects_duplicate_dates() {
    let app = app().await;
    let user = Uuid::new_v4();

    let document = json!({
        "foodConsumes": [
            { "date": "03/12/2025", "consumes": [] },
            { "date": "03/12/2025", "consumes": [] }
        ]
    });

    let body: Value = AxumTestRequest::put("/api/ledger")
        .user(user)
        .json(&document)
        .send(app)
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_ledgers_are_per_user() {
    let app = app().await;
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    log(
        &app,
        alice,
        &json!({ "food": off_record("1", "Tea", 1.0), "grams": "250" }),
    )
    .await;

    let exported: Value = AxumTestRequest::get("/api/ledger")
        .user(bob)
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert!(exported["foodConsumes"].as_array().unwrap().is_empty());

    AxumTestRequest::get("/api/ledger")
        .header("x-user-id", "not-a-uuid")
        .send(app)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

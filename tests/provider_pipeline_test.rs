// ABOUTME: End-to-end tests from mocked nutrition APIs through the HTTP routes
// ABOUTME: Real USDA and OpenFoodFacts clients built from server configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

mod common;
mod helpers;

use axum::http::StatusCode;
use axum::Router;
use helpers::axum_test::AxumTestRequest;
use mockito::{Matcher, Server, ServerGuard};
use sanus_server::config::{ProvidersConfig, ServerConfig};
use sanus_server::middleware::build_app;
use sanus_server::resources::ServerResources;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

const USDA_BODY: &str = r#"{"foods":[
    {"fdcId":2003590,"description":"Cheese, cheddar","foodCategory":"Dairy and Egg Products","foodNutrients":[
        {"nutrientName":"Energy","value":408,"unitName":"KCAL"},
        {"nutrientName":"Sodium, Na","value":500,"unitName":"MG"},
        {"nutrientName":"Protein","value":23.3,"unitName":"G"}
    ]}
]}"#;

const OFF_BODY: &str = r#"{"count":1,"products":[
    {"code":"5000436589456","product_name":"Mature Cheddar","brands":"Tesco","nutriments":{"energy-kcal_100g":"416","fat_100g":34.9,"fat_unit":"g"}}
]}"#;

async fn app_for(usda: &ServerGuard, off: &ServerGuard) -> Router {
    let config = ServerConfig {
        providers: ProvidersConfig {
            usda_base_url: usda.url(),
            openfoodfacts_base_url: off.url(),
            ..ProvidersConfig::default()
        },
        ..ServerConfig::default()
    };
    let database = common::create_test_database().await;
    let resources = Arc::new(ServerResources::from_config(database, Arc::new(config)));
    build_app(&resources)
}

#[tokio::test]
async fn test_search_merges_both_providers() {
    let mut usda = Server::new_async().await;
    let mut off = Server::new_async().await;

    let usda_mock = usda
        .mock("GET", "/foods/search")
        .match_query(Matcher::UrlEncoded("query".into(), "cheddar".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(USDA_BODY)
        .create_async()
        .await;
    let off_mock = off
        .mock("GET", "/cgi/search.pl")
        .match_query(Matcher::UrlEncoded("search_terms".into(), "cheddar".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(OFF_BODY)
        .create_async()
        .await;

    let body: Value = AxumTestRequest::get("/api/foods/search?q=cheddar")
        .user(Uuid::new_v4())
        .send(app_for(&usda, &off).await)
        .await
        .assert_status(StatusCode::OK)
        .json();

    usda_mock.assert_async().await;
    off_mock.assert_async().await;

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);

    assert_eq!(results[0]["code"], "usda_2003590");
    assert_eq!(results[0]["product_name"], "Cheese, cheddar");
    assert_eq!(results[0]["nutriments"]["energy-kcal_100g"], 408.0);
    assert_eq!(results[0]["nutriments"]["sodium_100g"], 0.5);
    assert_eq!(results[0]["nutriments"]["sodium_unit"], "g");

    assert_eq!(results[1]["code"], "5000436589456");
    assert_eq!(results[1]["nutriments"]["energy-kcal_100g"], 416.0);
}

#[tokio::test]
async fn test_search_with_failing_usda() {
    let mut usda = Server::new_async().await;
    let mut off = Server::new_async().await;

    usda.mock("GET", "/foods/search")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;
    off.mock("GET", "/cgi/search.pl")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(OFF_BODY)
        .create_async()
        .await;

    let body: Value = AxumTestRequest::get("/api/foods/search?q=cheddar")
        .user(Uuid::new_v4())
        .send(app_for(&usda, &off).await)
        .await
        .assert_status(StatusCode::OK)
        .json();

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["dataSource"], "openfoodfacts");
}

#[tokio::test]
async fn test_search_result_logs_into_ledger() {
    let mut usda = Server::new_async().await;
    let mut off = Server::new_async().await;

    usda.mock("GET", "/foods/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(USDA_BODY)
        .create_async()
        .await;
    off.mock("GET", "/cgi/search.pl")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"products":[]}"#)
        .create_async()
        .await;

    let app = app_for(&usda, &off).await;
    let user = Uuid::new_v4();

    let search: Value = AxumTestRequest::get("/api/foods/search?q=cheddar")
        .user(user)
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    let cheese = search["results"][0].clone();

    let logged: Value = AxumTestRequest::post("/api/ledger/entries")
        .user(user)
        .json(&json!({ "food": cheese, "grams": "30", "date": "2025-04-02" }))
        .send(app.clone())
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert_eq!(logged["entry"]["source"], "usda");
    assert_eq!(logged["entry"]["id"], "2003590");
    assert_eq!(logged["entry"]["kcal_per_100g"], "408");

    let daily: Value = AxumTestRequest::get("/api/ledger/daily?date=2025-04-02")
        .user(user)
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();
    // 408 * 30 / 100 = 122.4
    assert_eq!(daily["totalCalories"], 122.0);
}

#[tokio::test]
async fn test_barcode_lookup_through_openfoodfacts() {
    let usda = Server::new_async().await;
    let mut off = Server::new_async().await;

    off.mock("GET", "/api/v2/product/5000436589456")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":1,"product":{"product_name":"Mature Cheddar","nutriments":{"energy-kcal_100g":416}}}"#)
        .create_async()
        .await;
    off.mock("GET", "/api/v2/product/404404")
        .match_query(Matcher::Any)
        .with_status(404)
        .create_async()
        .await;
    off.mock("GET", "/api/v2/product/500500")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let app = app_for(&usda, &off).await;

    let product: Value = AxumTestRequest::get("/api/foods/barcode/5000436589456")
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(product["code"], "5000436589456");
    assert_eq!(product["dataSource"], "openfoodfacts");

    AxumTestRequest::get("/api/foods/barcode/404404")
        .send(app.clone())
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let body: Value = AxumTestRequest::get("/api/foods/barcode/500500")
        .send(app)
        .await
        .assert_status(StatusCode::BAD_GATEWAY)
        .json();
    assert_eq!(body["error"]["message"], "Failed to fetch product information");
}

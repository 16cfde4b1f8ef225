// ABOUTME: HTTP integration tests for the food routes
// ABOUTME: Search merging and degradation, barcode errors, daily values and nutrition facts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::{off_record, usda_record, FakeLookup, FakeSource};
use helpers::axum_test::AxumTestRequest;
use sanus_core::models::{BiologicalSex, UserProfile};
use sanus_server::middleware::build_app;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

#[tokio::test]
async fn test_search_lists_usda_before_openfoodfacts() {
    let resources = common::create_test_resources(
        FakeSource::new("USDA", vec![usda_record(1, "Apples, raw", 52.0)]),
        FakeSource::new("OpenFoodFacts", vec![off_record("3017620422003", "Nutella", 539.0)]),
        FakeLookup::default(),
    )
    .await;

    let body: Value = AxumTestRequest::get("/api/foods/search?q=apple")
        .user(Uuid::new_v4())
        .send(build_app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["query"], "apple");
    assert_eq!(body["sequence"], 1);
    assert_eq!(body["latest"], true);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["code"], "usda_1");
    assert_eq!(results[0]["dataSource"], "usda");
    assert_eq!(results[0]["fdcId"], 1);
    assert_eq!(results[1]["code"], "3017620422003");
    assert_eq!(results[1]["dataSource"], "openfoodfacts");
    assert_eq!(results[1]["nutriments"]["energy-kcal_100g"], 539.0);
}

#[tokio::test]
async fn test_search_survives_provider_failure() {
    let resources = common::create_test_resources(
        FakeSource::failing("USDA"),
        FakeSource::new("OpenFoodFacts", vec![off_record("1", "Oat milk", 46.0)]),
        FakeLookup::default(),
    )
    .await;

    let body: Value = AxumTestRequest::get("/api/foods/search?q=oat")
        .user(Uuid::new_v4())
        .send(build_app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["results"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_blank_search_makes_no_provider_call() {
    let usda = Arc::new(FakeSource::new("USDA", vec![usda_record(1, "Apples", 52.0)]));
    let off = Arc::new(FakeSource::new("OpenFoodFacts", Vec::new()));
    let resources = Arc::new(sanus_server::resources::ServerResources::new(
        common::create_test_database().await,
        usda.clone(),
        off.clone(),
        Arc::new(FakeLookup::default()),
        Arc::new(sanus_server::config::ServerConfig::default()),
    ));

    let body: Value = AxumTestRequest::get("/api/foods/search?q=%20%20")
        .user(Uuid::new_v4())
        .send(build_app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert!(body["results"].as_array().unwrap().is_empty());
    assert_eq!(usda.call_count(), 0);
    assert_eq!(off.call_count(), 0);
}

#[tokio::test]
async fn test_search_sequences_are_counted_per_user() {
    let resources = common::create_test_resources(
        FakeSource::new("USDA", vec![usda_record(1, "Apples, raw", 52.0)])
            .delayed(Duration::from_millis(50)),
        FakeSource::new("OpenFoodFacts", Vec::new()),
        FakeLookup::default(),
    )
    .await;
    let app = build_app(&resources);
    let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());

    let (first, second) = tokio::join!(
        AxumTestRequest::get("/api/foods/search?q=apple")
            .user(alice)
            .send(app.clone()),
        AxumTestRequest::get("/api/foods/search?q=apricot")
            .user(bob)
            .send(app.clone()),
    );
    for response in [first, second] {
        let body: Value = response.assert_status(StatusCode::OK).json();
        assert_eq!(body["sequence"], 1);
        assert_eq!(body["latest"], true);
    }

    let again: Value = AxumTestRequest::get("/api/foods/search?q=apples")
        .user(alice)
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(again["sequence"], 2);
    assert_eq!(again["latest"], true);

    AxumTestRequest::get("/api/foods/search?q=apple")
        .send(app)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_barcode_found_and_not_found() {
    let product = off_record("737628064502", "Thai peanut noodle kit", 385.0);
    let resources = common::create_test_resources(
        FakeSource::new("USDA", Vec::new()),
        FakeSource::new("OpenFoodFacts", Vec::new()),
        FakeLookup::with_product(product),
    )
    .await;
    let app = build_app(&resources);

    let body: Value = AxumTestRequest::get("/api/foods/barcode/737628064502")
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["product_name"], "Thai peanut noodle kit");

    let body: Value = AxumTestRequest::get("/api/foods/barcode/000000")
        .send(app.clone())
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .json();
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
    assert_eq!(
        body["error"]["message"],
        "Product not found in Open Food Facts database"
    );
    assert_eq!(body["error"]["resource_id"], "000000");

    AxumTestRequest::get("/api/foods/barcode/abc123")
        .send(app)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_barcode_provider_failure_is_user_facing() {
    let resources = common::create_test_resources(
        FakeSource::new("USDA", Vec::new()),
        FakeSource::new("OpenFoodFacts", Vec::new()),
        FakeLookup::failing(),
    )
    .await;

    let body: Value = AxumTestRequest::get("/api/foods/barcode/123")
        .send(build_app(&resources))
        .await
        .assert_status(StatusCode::BAD_GATEWAY)
        .json();
    assert_eq!(body["error"]["message"], "Failed to fetch product information");
}

#[tokio::test]
async fn test_daily_value_uses_reference_bmr_without_profile() {
    let resources = common::create_default_resources().await;
    let user = Uuid::new_v4();

    let body: Value = AxumTestRequest::post("/api/foods/daily-value")
        .user(user)
        .json(&json!({"nutrient": "sodium", "amount": 0.5, "unit": "g"}))
        .send(build_app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();

    // 500 mg of a 2300 mg reference
    assert_eq!(body["dailyValue"], 21.74);
    assert_eq!(body["referenceBmr"], 2000.0);
}

#[tokio::test]
async fn test_daily_value_scales_with_profile_bmr() {
    let resources = common::create_default_resources().await;
    let user = Uuid::new_v4();
    let app = build_app(&resources);

    // 10*60 + 6.25*160 - 5*age - 161 with a birthday that has passed this year
    let profile = UserProfile {
        weight: Some(60.0),
        height: Some(160.0),
        date_of_birth: chrono::NaiveDate::from_ymd_opt(1990, 1, 1),
        biological_sex: Some(BiologicalSex::Xx),
        food_consumes: Vec::new(),
    };
    AxumTestRequest::put("/api/profile")
        .user(user)
        .json(&profile)
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK);

    let body: Value = AxumTestRequest::post("/api/foods/daily-value")
        .user(user)
        .json(&json!({"nutrient": "fat", "amount": 65, "unit": "g"}))
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();

    let bmr = body["referenceBmr"].as_f64().unwrap();
    assert!(bmr < 2000.0);
    let expected = (100.0 * bmr / 2000.0 * 100.0).round() / 100.0;
    assert!((body["dailyValue"].as_f64().unwrap() - expected).abs() < 0.011);
}

#[tokio::test]
async fn test_daily_value_unknown_key_and_bad_unit() {
    let resources = common::create_default_resources().await;
    let user = Uuid::new_v4();
    let app = build_app(&resources);

    let body: Value = AxumTestRequest::post("/api/foods/daily-value")
        .user(user)
        .json(&json!({"nutrient": "caffeine", "amount": 80, "unit": "mg"}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert!(body["dailyValue"].is_null());

    let body: Value = AxumTestRequest::post("/api/foods/daily-value")
        .user(user)
        .json(&json!({"nutrient": "sodium", "amount": 1, "unit": "oz"}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert_eq!(body["error"]["code"], "INVALID_FORMAT");

    AxumTestRequest::post("/api/foods/daily-value")
        .json(&json!({"nutrient": "sodium", "amount": 1, "unit": "g"}))
        .send(app)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_nutrition_facts_panel() {
    let resources = common::create_default_resources().await;
    let user = Uuid::new_v4();

    let record = json!({
        "code": "0051500255162",
        "product_name": "Creamy Peanut Butter",
        "nutriments": {
            "energy-kcal_100g": 588,
            "fat_100g": 50, "fat_unit": "g",
            "sodium_100g": 0.43, "sodium_unit": "g"
        }
    });

    let body: Value = AxumTestRequest::post("/api/foods/nutrition-facts")
        .user(user)
        .json(&record)
        .send(build_app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["energy_kcal"], 588.0);
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["nutrient"], "fat");
    assert_eq!(rows[0]["daily_value"], 76.92);
    assert_eq!(rows[1]["nutrient"], "sodium");
    assert_eq!(rows[1]["unit"], "mg");
    assert_eq!(rows[1]["value"], 430.0);
}

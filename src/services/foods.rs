// ABOUTME: Food business logic: dual-source search, barcode lookup and scoring
// ABOUTME: Daily-value percentages and nutrition facts scaled by the caller's BMR
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

use crate::logging::AppLogger;
use crate::resources::ServerResources;
use crate::services::profile::caller_bmr;
use crate::session::Session;
use chrono::NaiveDate;
use sanus_core::errors::{AppError, AppResult, ErrorCode};
use sanus_core::models::FoodRecord;
use sanus_intelligence::{daily_value, effective_bmr, nutrition_facts, NutritionFacts};
use serde::{Deserialize, Serialize};

/// Message shown when the product database cannot be reached
pub const BARCODE_FETCH_FAILED: &str = "Failed to fetch product information";

/// Message shown when the product database has no such barcode
pub const BARCODE_NOT_FOUND: &str = "Product not found in Open Food Facts database";

/// Combined search results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSearchResponse {
    /// Trimmed query
    pub query: String,
    /// Sequence number the search was issued under
    pub sequence: u64,
    /// False when the same user issued a newer search before this one completed
    pub latest: bool,
    /// USDA results followed by `OpenFoodFacts` results
    pub results: Vec<FoodRecord>,
}

/// Search both nutrition databases on behalf of the session's user
///
/// Provider failures never fail the search; the failing provider simply
/// contributes no results. Sequence numbers count the user's own searches.
pub async fn search_foods(
    resources: &ServerResources,
    session: &Session,
    query: &str,
) -> FoodSearchResponse {
    let client = session.user_id.to_string();
    let outcome = resources.food_search.search(&client, query).await;
    FoodSearchResponse {
        query: query.trim().to_owned(),
        latest: resources.food_search.is_latest(&client, outcome.sequence),
        sequence: outcome.sequence,
        results: outcome.results,
    }
}

/// Look up a product by barcode
///
/// # Errors
///
/// - `INVALID_INPUT` for a blank barcode, `INVALID_FORMAT` for non-digits
/// - `RESOURCE_NOT_FOUND` when the product database has no such product
/// - `EXTERNAL_SERVICE_*` when the product database cannot be reached
pub async fn lookup_barcode(resources: &ServerResources, barcode: &str) -> AppResult<FoodRecord> {
    let barcode = barcode.trim();
    if barcode.is_empty() {
        return Err(AppError::invalid_input("Barcode is required"));
    }
    if !barcode.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::invalid_format("Barcode must contain only digits")
            .with_resource_id(barcode));
    }

    match resources.product_lookup.lookup_barcode(barcode).await {
        Ok(Some(record)) => Ok(record),
        Ok(None) => {
            Err(AppError::new(ErrorCode::ResourceNotFound, BARCODE_NOT_FOUND)
                .with_resource_id(barcode))
        }
        Err(error) => {
            AppLogger::log_barcode_failure(barcode, &error.to_string());
            let mut app_error = AppError::from(error);
            app_error.message = BARCODE_FETCH_FAILED.to_owned();
            Err(app_error.with_resource_id(barcode))
        }
    }
}

/// Daily-value request for one nutrient amount
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyValueRequest {
    /// Nutrient key (e.g. `sodium`, `vitamin-c`)
    pub nutrient: String,
    /// Amount in `unit`
    #[serde(default, deserialize_with = "sanus_core::models::lenient::optional_f64")]
    pub amount: Option<f64>,
    /// Mass unit of `amount`
    pub unit: String,
}

/// Daily-value percentage for one nutrient amount
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyValueResponse {
    /// Nutrient key
    pub nutrient: String,
    /// Amount as given
    pub amount: Option<f64>,
    /// Unit as given
    pub unit: String,
    /// Percentage of the daily value; `None` for unknown nutrients or
    /// absent amounts
    pub daily_value: Option<f64>,
    /// BMR the percentage is scaled to
    pub reference_bmr: f64,
}

/// Daily-value percentage scaled by the caller's BMR as of `today`
///
/// # Errors
///
/// Returns `INVALID_FORMAT` for an unsupported unit, or a database error
pub async fn calculate_daily_value(
    resources: &ServerResources,
    session: &Session,
    request: DailyValueRequest,
    today: NaiveDate,
) -> AppResult<DailyValueResponse> {
    let bmr = caller_bmr(resources, session, today).await?;
    let value = daily_value(request.nutrient.trim(), request.amount, &request.unit, bmr)?;
    Ok(DailyValueResponse {
        nutrient: request.nutrient,
        amount: request.amount,
        unit: request.unit,
        daily_value: value,
        reference_bmr: effective_bmr(bmr),
    })
}

/// Nutrition facts panel of `record` scaled by the caller's BMR as of `today`
///
/// # Errors
///
/// Returns an error if the caller's profile cannot be read
pub async fn food_nutrition_facts(
    resources: &ServerResources,
    session: &Session,
    record: &FoodRecord,
    today: NaiveDate,
) -> AppResult<NutritionFacts> {
    let bmr = caller_bmr(resources, session, today).await?;
    Ok(nutrition_facts(record, bmr))
}

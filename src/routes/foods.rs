// ABOUTME: Food route handlers for search, barcode lookup and nutrient scoring
// ABOUTME: Thin HTTP layer over the food service with JSON request and response bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

use super::today;
use crate::resources::ServerResources;
use crate::services::foods::{self, DailyValueRequest};
use crate::session::Session;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use sanus_core::errors::AppError;
use sanus_core::models::FoodRecord;
use serde::Deserialize;
use std::sync::Arc;

/// Query parameters for food search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Free-text search term
    #[serde(default)]
    pub q: String,
}

/// Food routes
pub struct FoodRoutes;

impl FoodRoutes {
    /// Create all food routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/foods/search", get(Self::handle_search))
            .route("/api/foods/barcode/:barcode", get(Self::handle_barcode))
            .route("/api/foods/daily-value", post(Self::handle_daily_value))
            .route(
                "/api/foods/nutrition-facts",
                post(Self::handle_nutrition_facts),
            )
            .with_state(resources)
    }

    /// Handle GET /api/foods/search - Search USDA and `OpenFoodFacts`
    async fn handle_search(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<SearchQuery>,
    ) -> Result<Response, AppError> {
        let session = Session::from_headers(&headers)?;
        let response = foods::search_foods(&resources, &session, &query.q).await;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/foods/barcode/:barcode - Look up a product
    async fn handle_barcode(
        State(resources): State<Arc<ServerResources>>,
        Path(barcode): Path<String>,
    ) -> Result<Response, AppError> {
        let record = foods::lookup_barcode(&resources, &barcode).await?;
        Ok((StatusCode::OK, Json(record)).into_response())
    }

    /// Handle POST /api/foods/daily-value - Percentage of the daily value
    async fn handle_daily_value(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<DailyValueRequest>,
    ) -> Result<Response, AppError> {
        let session = Session::from_headers(&headers)?;
        let response =
            foods::calculate_daily_value(&resources, &session, request, today()).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/foods/nutrition-facts - Nutrition facts panel
    async fn handle_nutrition_facts(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(record): Json<FoodRecord>,
    ) -> Result<Response, AppError> {
        let session = Session::from_headers(&headers)?;
        let facts = foods::food_nutrition_facts(&resources, &session, &record, today()).await?;
        Ok((StatusCode::OK, Json(facts)).into_response())
    }
}

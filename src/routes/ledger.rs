// ABOUTME: Consumption ledger route handlers
// ABOUTME: Log foods, export/import/clear the ledger, daily and weekly summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

use super::{date_or_today, today, DateQuery};
use crate::resources::ServerResources;
use crate::services::ledger::{self, FoodConsumesDocument, LogFoodRequest};
use crate::session::Session;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use sanus_core::errors::AppError;
use serde_json::json;
use std::sync::Arc;

/// Ledger routes
pub struct LedgerRoutes;

impl LedgerRoutes {
    /// Create all ledger routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/ledger",
                get(Self::handle_export)
                    .put(Self::handle_import)
                    .delete(Self::handle_clear),
            )
            .route("/api/ledger/entries", post(Self::handle_log_food))
            .route("/api/ledger/daily", get(Self::handle_daily))
            .route("/api/ledger/weekly", get(Self::handle_weekly))
            .with_state(resources)
    }

    /// Handle GET /api/ledger - Export the `foodConsumes` document
    async fn handle_export(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let session = Session::from_headers(&headers)?;
        let document = ledger::export_ledger(&resources, &session).await?;
        Ok((StatusCode::OK, Json(document)).into_response())
    }

    /// Handle PUT /api/ledger - Replace the ledger with an imported document
    async fn handle_import(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(document): Json<FoodConsumesDocument>,
    ) -> Result<Response, AppError> {
        let session = Session::from_headers(&headers)?;
        let stored = ledger::import_ledger(&resources, &session, document).await?;
        Ok((StatusCode::OK, Json(stored)).into_response())
    }

    /// Handle DELETE /api/ledger - Remove every entry
    async fn handle_clear(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let session = Session::from_headers(&headers)?;
        let removed = ledger::clear_ledger(&resources, &session).await?;
        Ok((StatusCode::OK, Json(json!({ "daysRemoved": removed }))).into_response())
    }

    /// Handle POST /api/ledger/entries - Log a food
    async fn handle_log_food(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<LogFoodRequest>,
    ) -> Result<Response, AppError> {
        let session = Session::from_headers(&headers)?;
        let logged = ledger::log_food(&resources, &session, request, today()).await?;
        Ok((StatusCode::CREATED, Json(logged)).into_response())
    }

    /// Handle GET /api/ledger/daily - Foods and calories of one day
    async fn handle_daily(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<DateQuery>,
    ) -> Result<Response, AppError> {
        let session = Session::from_headers(&headers)?;
        let date = date_or_today(query.date.as_deref())?;
        let summary = ledger::daily_summary(&resources, &session, date).await?;
        Ok((StatusCode::OK, Json(summary)).into_response())
    }

    /// Handle GET /api/ledger/weekly - Calories of the 7 days ending at a date
    async fn handle_weekly(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<DateQuery>,
    ) -> Result<Response, AppError> {
        let session = Session::from_headers(&headers)?;
        let end = date_or_today(query.date.as_deref())?;
        let weekly = ledger::weekly_summary(&resources, &session, end).await?;
        Ok((StatusCode::OK, Json(weekly)).into_response())
    }
}

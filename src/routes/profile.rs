// ABOUTME: Profile route handlers for body metrics and derived BMI/BMR
// ABOUTME: The ledger half of the profile is managed through the ledger routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

use super::{date_or_today, today, DateQuery};
use crate::resources::ServerResources;
use crate::services::profile;
use crate::session::Session;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use sanus_core::errors::AppError;
use sanus_core::models::UserProfile;
use std::sync::Arc;

/// Profile routes
pub struct ProfileRoutes;

impl ProfileRoutes {
    /// Create all profile routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/profile",
                get(Self::handle_get).put(Self::handle_update),
            )
            .route("/api/profile/metrics", get(Self::handle_metrics))
            .with_state(resources)
    }

    /// Handle GET /api/profile - Body metrics and ledger
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let session = Session::from_headers(&headers)?;
        let profile = profile::load_profile(&resources, &session).await?;
        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    /// Handle PUT /api/profile - Replace body metrics
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(update): Json<UserProfile>,
    ) -> Result<Response, AppError> {
        let session = Session::from_headers(&headers)?;
        let profile = profile::update_profile(&resources, &session, update, today()).await?;
        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    /// Handle GET /api/profile/metrics - BMI, BMI category and BMR
    async fn handle_metrics(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<DateQuery>,
    ) -> Result<Response, AppError> {
        let session = Session::from_headers(&headers)?;
        let as_of = date_or_today(query.date.as_deref())?;
        let metrics = profile::body_metrics(&resources, &session, as_of).await?;
        Ok((StatusCode::OK, Json(metrics)).into_response())
    }
}

// ABOUTME: HTTP route modules for the Sanus nutrition API
// ABOUTME: Assembles health, food, ledger and profile routes into one router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

//! Route module for the Sanus server
//!
//! Each domain has a `XRoutes` type whose `routes` function returns an axum
//! router bound to the shared [`ServerResources`].

/// Food search, barcode and scoring routes
pub mod foods;
/// Health check routes
pub mod health;
/// Consumption ledger routes
pub mod ledger;
/// Profile routes
pub mod profile;

pub use foods::FoodRoutes;
pub use health::HealthRoutes;
pub use ledger::LedgerRoutes;
pub use profile::ProfileRoutes;

use crate::resources::ServerResources;
use axum::Router;
use chrono::{Datelike, Local, NaiveDate};
use std::ops::RangeInclusive;
use sanus_core::errors::{AppError, AppResult};
use serde::Deserialize;
use std::sync::Arc;

/// Every route of the server
pub fn router(resources: &Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(resources)))
        .merge(FoodRoutes::routes(Arc::clone(resources)))
        .merge(LedgerRoutes::routes(Arc::clone(resources)))
        .merge(ProfileRoutes::routes(Arc::clone(resources)))
}

/// Query parameters selecting a day
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    /// `YYYY-MM-DD`; today when absent
    pub date: Option<String>,
}

/// Years a ledger date may fall in
const LEDGER_YEARS: RangeInclusive<i32> = 1900..=9999;

/// Server-local calendar date
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse an optional `YYYY-MM-DD` query value, defaulting to today
pub(crate) fn date_or_today(raw: Option<&str>) -> AppResult<NaiveDate> {
    let Some(raw) = raw.map(str::trim).filter(|d| !d.is_empty()) else {
        return Ok(today());
    };
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
        AppError::invalid_format(format!("Invalid date {raw:?}, expected YYYY-MM-DD: {e}"))
    })?;
    if !LEDGER_YEARS.contains(&date.year()) {
        return Err(AppError::invalid_format(format!(
            "Invalid date {raw:?}, year must be between {} and {}",
            LEDGER_YEARS.start(),
            LEDGER_YEARS.end()
        )));
    }
    Ok(date)
}

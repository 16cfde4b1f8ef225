// ABOUTME: Ledger business logic: logging foods, import/export and aggregation
// ABOUTME: Entries are validated here and appended atomically in the store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

use crate::logging::AppLogger;
use crate::resources::ServerResources;
use crate::session::Session;
use chrono::NaiveDate;
use sanus_core::errors::AppResult;
use sanus_core::models::{ConsumptionEntry, DailyConsumptionBucket, FoodRecord, LedgerDate};
use sanus_intelligence::{day_summary, entry_from_food, weekly_calories, DayPoint, DaySummary};
use serde::{Deserialize, Serialize};

/// The exported ledger document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodConsumesDocument {
    /// Buckets, newest first
    #[serde(default)]
    pub food_consumes: Vec<DailyConsumptionBucket>,
}

/// A food to log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogFoodRequest {
    /// The selected search or barcode result
    pub food: FoodRecord,
    /// Amount eaten in grams, as typed
    #[serde(deserialize_with = "sanus_core::models::lenient::string_or_number")]
    pub grams: String,
    /// Day to log under; today when absent
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Result of logging a food
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedFood {
    /// Bucket the entry went into
    pub date: LedgerDate,
    /// The stored entry
    pub entry: ConsumptionEntry,
    /// Calories of the entry
    pub calories: f64,
}

/// Seven-day calorie series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyCalories {
    /// Last day of the window
    pub end: LedgerDate,
    /// Oldest day first
    pub days: Vec<DayPoint>,
}

/// Log `request.grams` of `request.food` under `request.date` (or `today`)
///
/// # Errors
///
/// Returns `INVALID_INPUT` when grams is not a positive number, or a database
/// error if the append fails
pub async fn log_food(
    resources: &ServerResources,
    session: &Session,
    request: LogFoodRequest,
    today: NaiveDate,
) -> AppResult<LoggedFood> {
    let entry = entry_from_food(&request.food, &request.grams)?;
    let date = LedgerDate::new(request.date.unwrap_or(today));

    resources
        .database
        .ledger()
        .append_entry(session.user_id, date, &entry)
        .await?;

    AppLogger::log_food_logged(
        &session.user_id.to_string(),
        &date.to_string(),
        &entry.source,
        &entry.id,
        &entry.grams,
    );

    Ok(LoggedFood {
        date,
        calories: entry.calories(),
        entry,
    })
}

/// The caller's ledger document
///
/// # Errors
///
/// Returns an error if the database read fails
pub async fn export_ledger(
    resources: &ServerResources,
    session: &Session,
) -> AppResult<FoodConsumesDocument> {
    Ok(FoodConsumesDocument {
        food_consumes: resources.database.ledger().load(session.user_id).await?,
    })
}

/// Replace the caller's ledger with `document`
///
/// # Errors
///
/// Returns `INVALID_INPUT` when two buckets share a date, or a database error
pub async fn import_ledger(
    resources: &ServerResources,
    session: &Session,
    document: FoodConsumesDocument,
) -> AppResult<FoodConsumesDocument> {
    resources
        .database
        .ledger()
        .replace(session.user_id, &document.food_consumes)
        .await?;

    let entries = document
        .food_consumes
        .iter()
        .map(|bucket| bucket.consumes.len())
        .sum::<usize>();
    AppLogger::log_ledger_imported(
        &session.user_id.to_string(),
        document.food_consumes.len(),
        entries,
    );

    export_ledger(resources, session).await
}

/// Remove every entry of the caller, returning the number of days removed
///
/// # Errors
///
/// Returns an error if the database operation fails
pub async fn clear_ledger(resources: &ServerResources, session: &Session) -> AppResult<u64> {
    let removed = resources.database.ledger().clear(session.user_id).await?;
    AppLogger::log_ledger_cleared(&session.user_id.to_string(), removed);
    Ok(removed)
}

/// Foods and calories logged on `date`
///
/// # Errors
///
/// Returns an error if the database read fails
pub async fn daily_summary(
    resources: &ServerResources,
    session: &Session,
    date: NaiveDate,
) -> AppResult<DaySummary> {
    let buckets = resources.database.ledger().load(session.user_id).await?;
    Ok(day_summary(&buckets, LedgerDate::new(date)))
}

/// Calories of the 7 days ending at `end`
///
/// # Errors
///
/// Returns an error if the database read fails or the window starts
/// before the earliest representable date
pub async fn weekly_summary(
    resources: &ServerResources,
    session: &Session,
    end: NaiveDate,
) -> AppResult<WeeklyCalories> {
    let buckets = resources.database.ledger().load(session.user_id).await?;
    Ok(WeeklyCalories {
        end: LedgerDate::new(end),
        days: weekly_calories(&buckets, end)?,
    })
}

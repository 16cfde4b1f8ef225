// ABOUTME: Consumption ledger accumulation and calorie aggregation
// ABOUTME: Entry construction, per-date bucket append, daily sums and 7-day series
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

//! Consumption Ledger Accumulator
//!
//! The ledger is a list of per-date buckets, newest bucket first. Each bucket
//! keeps its entries in the order they were logged.

use crate::rounding::round_to;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use sanus_core::constants::ledger::{
    INVALID_GRAMS_MESSAGE, SOURCE_OFF, SOURCE_USDA, UNKNOWN_PRODUCT, WEEK_DAYS,
};
use sanus_core::errors::{AppError, AppResult};
use sanus_core::models::{
    parse_decimal_lossy, ConsumptionEntry, DailyConsumptionBucket, DataSource, FoodRecord,
    LedgerDate,
};
use serde::{Deserialize, Serialize};

/// Build a ledger entry for `grams` of `record`
///
/// # Errors
///
/// Returns `INVALID_INPUT` when `grams` does not parse to a positive number,
/// or when a USDA record carries no fdcId.
pub fn entry_from_food(record: &FoodRecord, grams: &str) -> AppResult<ConsumptionEntry> {
    let grams = grams.trim();
    let amount = parse_decimal_lossy(grams);
    if amount <= 0.0 || grams.is_empty() {
        return Err(AppError::invalid_input(INVALID_GRAMS_MESSAGE));
    }

    let (source, id) = match record.data_source {
        DataSource::Usda => {
            let fdc_id = record.fdc_id.ok_or_else(|| {
                AppError::invalid_input("USDA food is missing its fdcId")
                    .with_resource_id(record.code.clone())
            })?;
            (SOURCE_USDA, fdc_id.to_string())
        }
        DataSource::OpenFoodFacts => (SOURCE_OFF, record.code.clone()),
    };

    Ok(ConsumptionEntry {
        source: source.to_owned(),
        id,
        title: record
            .display_name()
            .unwrap_or(UNKNOWN_PRODUCT)
            .to_owned(),
        kcal_per_100g: format_decimal(record.kcal_per_100g().unwrap_or(0.0)),
        grams: grams.to_owned(),
    })
}

/// Render a number the shortest way that reads back exactly (`200`, `52.5`)
fn format_decimal(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// Append `entry` to the bucket of `date`
///
/// The entry goes to the end of an existing bucket; otherwise a new bucket is
/// created at the front of the ledger.
pub fn append_entry(
    buckets: &mut Vec<DailyConsumptionBucket>,
    date: LedgerDate,
    entry: ConsumptionEntry,
) {
    if let Some(bucket) = buckets.iter_mut().find(|b| b.date == date) {
        bucket.consumes.push(entry);
    } else {
        buckets.insert(0, DailyConsumptionBucket::new(date, entry));
    }
}

/// First bucket logged for `date`
#[must_use]
pub fn find_bucket(
    buckets: &[DailyConsumptionBucket],
    date: LedgerDate,
) -> Option<&DailyConsumptionBucket> {
    buckets.iter().find(|b| b.date == date)
}

/// Total calories logged on `date`; 0 when the date has no bucket
#[must_use]
pub fn daily_calories(buckets: &[DailyConsumptionBucket], date: LedgerDate) -> f64 {
    find_bucket(buckets, date).map_or(0.0, |bucket| {
        bucket.consumes.iter().map(ConsumptionEntry::calories).sum()
    })
}

/// One day of the weekly calorie series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPoint {
    /// Day in ledger format
    pub date: LedgerDate,
    /// Short weekday name (`Mon`)
    pub weekday: String,
    /// Calories, rounded to a whole number
    pub calories: f64,
    /// Number of entries logged that day
    pub food_count: usize,
    /// True for the day the series was requested for
    pub is_selected: bool,
}

/// The 7 days ending at `end`, oldest first
///
/// # Errors
///
/// Returns `INVALID_INPUT` when the window reaches before the earliest
/// representable date
pub fn weekly_calories(
    buckets: &[DailyConsumptionBucket],
    end: NaiveDate,
) -> AppResult<Vec<DayPoint>> {
    (0..WEEK_DAYS)
        .rev()
        .map(|offset| {
            let day = end.checked_sub_signed(Duration::days(offset)).ok_or_else(|| {
                AppError::invalid_input(format!("No 7-day window ends at {end}"))
                    .with_resource_id(end.to_string())
            })?;
            let date = LedgerDate::from(day);
            let food_count = find_bucket(buckets, date).map_or(0, |b| b.consumes.len());
            Ok(DayPoint {
                date,
                weekday: short_weekday(day.weekday()).to_owned(),
                calories: round_to(daily_calories(buckets, date), 0),
                food_count,
                is_selected: offset == 0,
            })
        })
        .collect()
}

const fn short_weekday(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Calories of one logged food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodCalories {
    /// The logged entry
    #[serde(flatten)]
    pub entry: ConsumptionEntry,
    /// Calories rounded to a whole number
    pub calculated_calories: f64,
    /// Grams as a number
    pub display_grams: f64,
}

/// Everything logged on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    /// Day in ledger format
    pub date: LedgerDate,
    /// Foods in logging order
    pub foods: Vec<FoodCalories>,
    /// Total calories, rounded after summing
    pub total_calories: f64,
}

/// Per-food calories and the total for `date`
#[must_use]
pub fn day_summary(buckets: &[DailyConsumptionBucket], date: LedgerDate) -> DaySummary {
    let foods = find_bucket(buckets, date)
        .map(|bucket| {
            bucket
                .consumes
                .iter()
                .map(|entry| FoodCalories {
                    calculated_calories: round_to(entry.calories(), 0),
                    display_grams: parse_decimal_lossy(&entry.grams),
                    entry: entry.clone(),
                })
                .collect()
        })
        .unwrap_or_default();

    DaySummary {
        date,
        foods,
        total_calories: round_to(daily_calories(buckets, date), 0),
    }
}

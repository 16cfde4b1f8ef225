// ABOUTME: Nutrition facts panel for a single food record
// ABOUTME: Picks display units for small micronutrient amounts and attaches daily values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

use crate::daily_value::{daily_value, effective_bmr};
use crate::rounding::round_to;
use sanus_core::constants::nutrients::ENERGY_KCAL;
use sanus_core::models::FoodRecord;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How the per-100g amount of a row is rounded before display
#[derive(Clone, Copy)]
enum Precision {
    OneDecimal,
    Raw,
}

/// Panel rows in label order: (label, nutrient key, precision)
const PANEL: [(&str, &str, Precision); 17] = [
    ("Total Fat", "fat", Precision::OneDecimal),
    ("Total Carbohydrates", "carbohydrates", Precision::OneDecimal),
    ("Protein", "proteins", Precision::OneDecimal),
    ("Sugars", "sugars", Precision::OneDecimal),
    ("Dietary Fiber", "fiber", Precision::OneDecimal),
    ("Saturated Fat", "saturated-fat", Precision::OneDecimal),
    ("Sodium", "sodium", Precision::Raw),
    ("Salt", "salt", Precision::OneDecimal),
    ("Cholesterol", "cholesterol", Precision::Raw),
    ("Calcium", "calcium", Precision::Raw),
    ("Iron", "iron", Precision::Raw),
    ("Vitamin C", "vitamin-c", Precision::Raw),
    ("Potassium", "potassium", Precision::Raw),
    ("Vitamin A", "vitamin-a", Precision::Raw),
    ("Vitamin B12", "vitamin-b12", Precision::Raw),
    ("Vitamin B2 (Riboflavin)", "vitamin-b2", Precision::Raw),
    ("Vitamin D", "vitamin-d", Precision::Raw),
];

/// Shown in mg when a gram amount is below 1
const MILLIGRAM_DISPLAY: [&str; 9] = [
    "calcium",
    "iron",
    "vitamin-c",
    "sodium",
    "potassium",
    "vitamin-a",
    "vitamin-b12",
    "vitamin-b2",
    "vitamin-d",
];

/// Shown in µg when the amount is below 1 mg
const MICROGRAM_DISPLAY: [&str; 3] = ["vitamin-b12", "vitamin-d", "vitamin-a"];

/// One line of the nutrition facts panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionFactRow {
    /// Display label
    pub label: String,
    /// Nutrient key
    pub nutrient: String,
    /// Amount per 100 g in `unit`
    pub value: f64,
    /// Display unit
    pub unit: String,
    /// Daily-value percentage, when the unit and key allow one
    pub daily_value: Option<f64>,
}

/// Nutrition facts of a record per 100 g
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    /// Energy per 100 g
    pub energy_kcal: Option<f64>,
    /// Nutrient rows present in the record
    pub rows: Vec<NutritionFactRow>,
    /// BMR the percentages are scaled to
    pub reference_bmr: f64,
}

/// Build the nutrition facts panel of `record`, scaling daily values by `bmr`
///
/// Nutrients missing from the record, or present with a zero amount, are
/// left out. A unit the daily-value calculator rejects yields a row without
/// a percentage.
#[must_use]
pub fn nutrition_facts(record: &FoodRecord, bmr: Option<f64>) -> NutritionFacts {
    let rows = PANEL
        .iter()
        .filter_map(|(label, key, precision)| {
            let nutrient = record.nutriments.get(key)?;
            if nutrient.value.is_nan() || nutrient.value.abs() < f64::EPSILON {
                return None;
            }
            let value = match precision {
                Precision::OneDecimal => round_to(nutrient.value, 1),
                Precision::Raw => nutrient.value,
            };
            let unit = nutrient.unit.as_deref().unwrap_or("g");
            let (value, unit) = display_quantity(key, value, unit);

            let daily = daily_value(key, Some(value), &unit, bmr).unwrap_or_else(|error| {
                debug!(nutrient = %key, unit = %unit, error = %error, "No daily value for row");
                None
            });

            Some(NutritionFactRow {
                label: (*label).to_owned(),
                nutrient: (*key).to_owned(),
                value,
                unit,
                daily_value: daily,
            })
        })
        .collect();

    NutritionFacts {
        energy_kcal: record.nutriments.per_100g(ENERGY_KCAL),
        rows,
        reference_bmr: effective_bmr(bmr),
    }
}

/// Pick a readable unit for small micronutrient amounts
fn display_quantity(key: &str, value: f64, unit: &str) -> (f64, String) {
    let mut shown = value;
    let mut shown_unit = unit.to_owned();

    if unit == "g" && value < 1.0 && MILLIGRAM_DISPLAY.contains(&key) {
        shown = round_to(value * 1_000.0, 2);
        shown_unit = "mg".to_owned();
    }

    if unit == "g" && value < 0.001 && MICROGRAM_DISPLAY.contains(&key) {
        shown = round_to(value * 1_000_000.0, 2);
        shown_unit = "µg".to_owned();
    } else if shown_unit == "mg" && shown < 1.0 && MICROGRAM_DISPLAY.contains(&key) {
        shown = round_to(shown * 1_000.0, 2);
        shown_unit = "µg".to_owned();
    }

    (shown, shown_unit)
}

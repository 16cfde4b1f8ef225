// ABOUTME: Daily-value percentages for nutrients, scaled by the user's BMR
// ABOUTME: Reference intake table and fixed-ratio mass unit conversion (g, mg, µg)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

//! Daily-Value Calculator
//!
//! `percentage = (amount in reference unit / reference amount) * 100 * (bmr / 2000)`
//!
//! The reference table follows the FDA label daily values (salt follows the
//! WHO recommendation), expressed against a 2000 kcal diet. Scaling by the
//! user's BMR personalizes the percentage.

use crate::rounding::round_to;
use sanus_core::constants::daily_value::REFERENCE_BMR;
use sanus_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mass unit accepted by the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MassUnit {
    /// Grams
    #[serde(rename = "g")]
    Gram,
    /// Milligrams
    #[serde(rename = "mg")]
    Milligram,
    /// Micrograms
    #[serde(rename = "µg")]
    Microgram,
}

impl MassUnit {
    /// All supported units
    pub const ALL: [Self; 3] = [Self::Gram, Self::Milligram, Self::Microgram];

    /// Parse a unit label, case-insensitively
    ///
    /// Micrograms accept `µg` (micro sign), `μg` (Greek mu), `ug` and `mcg`.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_FORMAT` for any other label.
    pub fn parse(raw: &str) -> AppResult<Self> {
        match raw.trim().to_lowercase().as_str() {
            "g" => Ok(Self::Gram),
            "mg" => Ok(Self::Milligram),
            "µg" | "μg" | "ug" | "mcg" => Ok(Self::Microgram),
            other => Err(AppError::invalid_format(format!(
                "Unsupported unit '{other}': expected g, mg or µg"
            ))
            .with_details(serde_json::json!({ "unit": raw }))),
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gram => "g",
            Self::Milligram => "mg",
            Self::Microgram => "µg",
        }
    }

    const fn micrograms(self) -> f64 {
        match self {
            Self::Gram => 1_000_000.0,
            Self::Milligram => 1_000.0,
            Self::Microgram => 1.0,
        }
    }
}

impl fmt::Display for MassUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Convert `amount` between mass units
#[must_use]
pub fn convert_mass(amount: f64, from: MassUnit, to: MassUnit) -> f64 {
    if from == to {
        return amount;
    }
    amount * from.micrograms() / to.micrograms()
}

/// Reference daily intake of one nutrient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceIntake {
    /// Daily amount
    pub amount: f64,
    /// Unit of `amount`
    pub unit: MassUnit,
}

/// Nutrient keys with a reference intake
pub const NUTRIENT_KEYS: [&str; 21] = [
    "fat",
    "saturated-fat",
    "cholesterol",
    "sodium",
    "carbohydrates",
    "fiber",
    "protein",
    "proteins",
    "sugars",
    "sugar",
    "calcium",
    "iron",
    "vitamin-c",
    "potassium",
    "salt",
    "vitamin-a",
    "vitamin-b12",
    "vitamin-b2",
    "vitamin-d",
    "vitamin-b1",
    "vitamin-b6",
];

/// Reference daily intake for a nutrient key
#[must_use]
pub fn reference_intake(key: &str) -> Option<ReferenceIntake> {
    use MassUnit::{Gram, Microgram, Milligram};

    let (amount, unit) = match key {
        "fat" => (65.0, Gram),
        "saturated-fat" => (20.0, Gram),
        "cholesterol" => (300.0, Milligram),
        "sodium" => (2300.0, Milligram),
        "carbohydrates" => (300.0, Gram),
        "fiber" => (25.0, Gram),
        "protein" | "proteins" => (50.0, Gram),
        "sugars" | "sugar" => (50.0, Gram),
        "calcium" => (1000.0, Milligram),
        "iron" => (18.0, Milligram),
        "vitamin-c" => (60.0, Milligram),
        "potassium" => (3500.0, Milligram),
        "salt" => (6.0, Gram),
        "vitamin-a" => (900.0, Microgram),
        "vitamin-b12" => (2.4, Microgram),
        "vitamin-b2" => (1.3, Milligram),
        "vitamin-d" => (20.0, Microgram),
        "vitamin-b1" => (1.2, Milligram),
        "vitamin-b6" => (1.7, Milligram),
        _ => return None,
    };
    Some(ReferenceIntake { amount, unit })
}

/// BMR the percentages are scaled to: `bmr` when it is a positive finite
/// number, the 2000 kcal reference otherwise
#[must_use]
pub fn effective_bmr(bmr: Option<f64>) -> f64 {
    bmr.filter(|b| b.is_finite() && *b > 0.0)
        .unwrap_or(REFERENCE_BMR)
}

/// Percentage of the daily value that `amount` of nutrient `key` provides
///
/// `bmr` scales the percentage relative to a 2000 kcal reference; when it is
/// absent or not positive the reference is used. The result is rounded to 2
/// decimals.
///
/// Returns `Ok(None)` when the key has no reference intake or when the amount
/// is absent, zero, negative or non-finite.
///
/// # Errors
///
/// Returns `INVALID_FORMAT` when `unit` is not one of g, mg or µg.
pub fn daily_value(
    key: &str,
    amount: Option<f64>,
    unit: &str,
    bmr: Option<f64>,
) -> AppResult<Option<f64>> {
    let Some(reference) = reference_intake(key) else {
        return Ok(None);
    };
    let Some(amount) = amount.filter(|a| a.is_finite() && *a > 0.0) else {
        return Ok(None);
    };

    let unit = MassUnit::parse(unit)?;
    let converted = convert_mass(amount, unit, reference.unit);
    let percentage =
        (converted / reference.amount) * 100.0 * (effective_bmr(bmr) / REFERENCE_BMR);
    Ok(Some(round_to(percentage, 2)))
}

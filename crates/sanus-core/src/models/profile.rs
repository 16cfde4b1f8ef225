// ABOUTME: User profile model with body metrics and consumption ledger
// ABOUTME: BiologicalSex uses the xy/xx encoding stored by the client app
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

use super::lenient;
use super::DailyConsumptionBucket;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Biological sex used by the BMR formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiologicalSex {
    /// Male constant in Mifflin-St Jeor
    Xy,
    /// Female constant in Mifflin-St Jeor
    Xx,
}

impl BiologicalSex {
    /// Wire name (`xy` / `xx`)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Xy => "xy",
            Self::Xx => "xx",
        }
    }

    /// Parse the wire name
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "xy" => Some(Self::Xy),
            "xx" => Some(Self::Xx),
            _ => None,
        }
    }
}

/// Body metrics and ledger of one user
///
/// Every metric is optional: profiles are created before setup completes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Weight in kilograms
    #[serde(default, deserialize_with = "lenient::optional_f64")]
    pub weight: Option<f64>,
    /// Height in centimeters
    #[serde(default, deserialize_with = "lenient::optional_f64")]
    pub height: Option<f64>,
    /// Date of birth
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    /// Biological sex
    #[serde(default)]
    pub biological_sex: Option<BiologicalSex>,
    /// Consumption ledger, newest bucket first
    #[serde(default)]
    pub food_consumes: Vec<DailyConsumptionBucket>,
}

// ABOUTME: Body metric calculations using peer-reviewed formulas
// ABOUTME: Mifflin-St Jeor BMR, calendar-aware age, BMI and BMI category
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

//! Nutrition Calculator Module
//!
//! Computes the body metrics the daily-value calculator scales by. Profiles
//! are frequently incomplete, so the profile-level helpers return `None`
//! instead of failing when an input is missing.
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>
//!
//! - World Health Organization (2000). Obesity: preventing and managing the global epidemic.
//!   WHO Technical Report Series 894.

use crate::config::{BmiCategoryConfig, BmrConfig};
use crate::rounding::round_to;
use chrono::{Datelike, NaiveDate};
use sanus_core::models::{BiologicalSex, UserProfile};
use serde::{Deserialize, Serialize};
use std::fmt;

/// WHO adult BMI category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    /// BMI below 18.5
    #[serde(rename = "Underweight")]
    Underweight,
    /// BMI 18.5 to below 25
    #[serde(rename = "Normal weight")]
    NormalWeight,
    /// BMI 25 to below 30
    #[serde(rename = "Overweight")]
    Overweight,
    /// BMI 30 and above
    #[serde(rename = "Obese")]
    Obese,
}

impl BmiCategory {
    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::NormalWeight => "Normal weight",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Body metrics derived from a profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyMetrics {
    /// Body mass index, 1 decimal
    pub bmi: Option<f64>,
    /// Category of `bmi`
    pub bmi_category: Option<BmiCategory>,
    /// Basal metabolic rate in kcal/day, 1 decimal
    pub bmr: Option<f64>,
}

impl BodyMetrics {
    /// Compute every metric the profile allows, as of `today`
    #[must_use]
    pub fn for_profile(profile: &UserProfile, today: NaiveDate) -> Self {
        let bmi = user_bmi(profile);
        Self {
            bmi,
            bmi_category: bmi.and_then(|b| bmi_category(b, &BmiCategoryConfig::default())),
            bmr: user_bmr(profile, today, &BmrConfig::default()),
        }
    }
}

/// Calculate Basal Metabolic Rate using the Mifflin-St Jeor equation
///
/// Formula:
/// - Men: BMR = 10 x weight(kg) + 6.25 x height(cm) - 5 x age(years) + 5
/// - Women: BMR = 10 x weight(kg) + 6.25 x height(cm) - 5 x age(years) - 161
///
/// The raw value is returned unrounded and unclamped.
///
/// # Reference
/// Mifflin et al. (1990) - DOI: 10.1093/ajcn/51.2.241
#[must_use]
pub fn calculate_mifflin_st_jeor(
    weight_kg: f64,
    height_cm: f64,
    age: i32,
    sex: BiologicalSex,
    config: &BmrConfig,
) -> f64 {
    let weight_component = config.msj_weight_coef * weight_kg;
    let height_component = config.msj_height_coef * height_cm;
    let age_component = config.msj_age_coef * f64::from(age);

    let sex_constant = match sex {
        BiologicalSex::Xy => config.msj_male_constant,
        BiologicalSex::Xx => config.msj_female_constant,
    };

    weight_component + height_component + age_component + sex_constant
}

/// Whole years between `date_of_birth` and `today`
///
/// One year is subtracted while the birthday has not yet occurred in
/// `today`'s year.
#[must_use]
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    let birthday_pending = today.month() < date_of_birth.month()
        || (today.month() == date_of_birth.month() && today.day() < date_of_birth.day());
    if birthday_pending {
        age -= 1;
    }
    age
}

/// BMR of a profile rounded to 1 decimal, or `None` when any input is missing
///
/// Zero or non-finite weight and height count as missing.
#[must_use]
pub fn user_bmr(profile: &UserProfile, today: NaiveDate, config: &BmrConfig) -> Option<f64> {
    let weight = present(profile.weight)?;
    let height = present(profile.height)?;
    let date_of_birth = profile.date_of_birth?;
    let sex = profile.biological_sex?;

    let age = age_on(date_of_birth, today);
    let bmr = calculate_mifflin_st_jeor(weight, height, age, sex, config);
    Some(round_to(bmr, 1))
}

/// Body mass index: `weight_kg / height_m²`, rounded to 1 decimal
#[must_use]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    round_to(weight_kg / (height_m * height_m), 1)
}

/// BMI of a profile, or `None` when weight or height is missing
#[must_use]
pub fn user_bmi(profile: &UserProfile) -> Option<f64> {
    Some(calculate_bmi(present(profile.weight)?, present(profile.height)?))
}

/// Category of a BMI value; `None` for zero or non-finite input
#[must_use]
pub fn bmi_category(bmi: f64, config: &BmiCategoryConfig) -> Option<BmiCategory> {
    if !bmi.is_finite() || bmi.abs() < f64::EPSILON {
        return None;
    }
    let category = if bmi < config.underweight_below {
        BmiCategory::Underweight
    } else if bmi < config.normal_below {
        BmiCategory::NormalWeight
    } else if bmi < config.overweight_below {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    };
    Some(category)
}

fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && v.abs() > f64::EPSILON)
}

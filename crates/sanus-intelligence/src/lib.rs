// ABOUTME: Nutrition scoring algorithms for the Sanus pipeline
// ABOUTME: BMR and BMI, daily-value percentages, nutrition facts and ledger aggregation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

#![deny(unsafe_code)]

//! # Sanus Intelligence
//!
//! Pure computations over the core models. Nothing here performs I/O: the
//! server crate loads profiles and ledgers, then calls into these functions.
//!
//! - **`nutrition_calculator`**: Mifflin-St Jeor BMR, BMI and BMI category
//! - **`daily_value`**: Unit conversion and daily-value percentages scaled by BMR
//! - **`nutrition_facts`**: Per-record nutrition panel with display units
//! - **`ledger`**: Entry construction, bucket append, daily and weekly totals

/// Calculator coefficients
pub mod config;
/// Daily-value percentages and mass unit conversion
pub mod daily_value;
/// Consumption ledger accumulation and aggregation
pub mod ledger;
/// BMR, BMI and body metric helpers
pub mod nutrition_calculator;
/// Nutrition facts panel for a single food record
pub mod nutrition_facts;

mod rounding;

pub use config::{BmrConfig, BmiCategoryConfig};
pub use daily_value::{
    convert_mass, daily_value, effective_bmr, reference_intake, MassUnit, ReferenceIntake,
};
pub use ledger::{
    append_entry, daily_calories, day_summary, entry_from_food, find_bucket, weekly_calories,
    DayPoint, DaySummary, FoodCalories,
};
pub use nutrition_calculator::{
    age_on, bmi_category, calculate_bmi, calculate_mifflin_st_jeor, user_bmi, user_bmr,
    BmiCategory, BodyMetrics,
};
pub use nutrition_facts::{nutrition_facts, NutritionFactRow, NutritionFacts};

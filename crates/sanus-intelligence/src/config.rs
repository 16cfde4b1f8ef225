// ABOUTME: Coefficient configuration for body metric calculations
// ABOUTME: Mifflin-St Jeor coefficients and BMI category thresholds with defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

use serde::{Deserialize, Serialize};

/// BMR (Basal Metabolic Rate) calculation configuration
///
/// Reference: Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
/// American Journal of Clinical Nutrition, 51(2), 241-247. DOI: 10.1093/ajcn/51.2.241
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Mifflin-St Jeor weight coefficient (10.0)
    pub msj_weight_coef: f64,
    /// Mifflin-St Jeor height coefficient (6.25)
    pub msj_height_coef: f64,
    /// Mifflin-St Jeor age coefficient (-5.0)
    pub msj_age_coef: f64,
    /// Mifflin-St Jeor male constant (+5)
    pub msj_male_constant: f64,
    /// Mifflin-St Jeor female constant (-161)
    pub msj_female_constant: f64,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            msj_weight_coef: 10.0,
            msj_height_coef: 6.25,
            msj_age_coef: -5.0,
            msj_male_constant: 5.0,
            msj_female_constant: -161.0,
        }
    }
}

/// Upper bounds (exclusive) of the WHO adult BMI categories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmiCategoryConfig {
    /// Below this is underweight (18.5)
    pub underweight_below: f64,
    /// Below this is normal weight (25.0)
    pub normal_below: f64,
    /// Below this is overweight, otherwise obese (30.0)
    pub overweight_below: f64,
}

impl Default for BmiCategoryConfig {
    fn default() -> Self {
        Self {
            underweight_below: 18.5,
            normal_below: 25.0,
            overweight_below: 30.0,
        }
    }
}

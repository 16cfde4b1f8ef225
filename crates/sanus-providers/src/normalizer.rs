// ABOUTME: Normalizes USDA nutrient lists into the per-100g nutriments convention
// ABOUTME: Name-based nutrient mapping with mg/µg to g conversion for micronutrients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

//! USDA Record Normalizer
//!
//! USDA search hits list nutrients as `{nutrientName, value, unitName}`.
//! This module maps the ones the app displays onto `OpenFoodFacts` keys.
//! Names and units compare case-insensitively; unknown names are dropped.

use crate::usda::{UsdaFood, UsdaNutrient};
use sanus_core::constants::nutrients::{ENERGY_KCAL, ENERGY_KJ};
use sanus_core::models::{DataSource, FoodRecord, Nutriments};
use tracing::debug;

/// How the unit of a mapped nutrient is recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnitRule {
    /// Energy: value kept, no unit field
    Energy,
    /// Macronutrient: value and the lowercased USDA unit kept
    Native,
    /// Micronutrient: value converted to grams, unit field `g`
    Grams,
}

/// Map a lowercased USDA nutrient name and unit to a nutriments key
fn map_nutrient(name: &str, unit: &str) -> Option<(&'static str, UnitRule)> {
    if name.contains("energy") {
        return match unit {
            "kcal" => Some((ENERGY_KCAL, UnitRule::Energy)),
            "kj" => Some((ENERGY_KJ, UnitRule::Energy)),
            _ => None,
        };
    }

    let mapped = match name {
        "protein" => ("proteins", UnitRule::Native),
        "total lipid (fat)" => ("fat", UnitRule::Native),
        "carbohydrate, by difference" => ("carbohydrates", UnitRule::Native),
        "total sugars" | "sugars, total" => ("sugars", UnitRule::Native),
        "sugars, added" => ("added-sugars", UnitRule::Native),
        "fiber, total dietary" => ("fiber", UnitRule::Native),
        "sodium, na" => ("sodium", UnitRule::Grams),
        "calcium, ca" => ("calcium", UnitRule::Grams),
        "iron, fe" => ("iron", UnitRule::Grams),
        "potassium, k" => ("potassium", UnitRule::Grams),
        "thiamin" => ("vitamin-b1", UnitRule::Grams),
        "riboflavin" => ("vitamin-b2", UnitRule::Grams),
        "vitamin b-6" => ("vitamin-b6", UnitRule::Grams),
        n if n == "vitamin c" || n.contains("ascorbic") => ("vitamin-c", UnitRule::Grams),
        _ => return None,
    };
    Some(mapped)
}

/// Convert a micronutrient amount to grams
fn to_grams(value: f64, unit: &str) -> Option<f64> {
    match unit {
        "g" => Some(value),
        "mg" => Some(value / 1_000.0),
        "µg" | "μg" | "ug" | "mcg" => Some(value / 1_000_000.0),
        _ => None,
    }
}

fn apply_nutrient(nutriments: &mut Nutriments, nutrient: &UsdaNutrient) {
    let Some(value) = nutrient.value.filter(|v| v.is_finite()) else {
        return;
    };
    let name = nutrient.nutrient_name.trim().to_lowercase();
    let unit = nutrient.unit_name.trim().to_lowercase();
    let Some((key, rule)) = map_nutrient(&name, &unit) else {
        return;
    };

    match rule {
        UnitRule::Energy => nutriments.insert(key, value, None),
        UnitRule::Native => nutriments.insert(key, value, Some(&unit)),
        UnitRule::Grams => match to_grams(value, &unit) {
            Some(grams) => nutriments.insert(key, grams, Some("g")),
            None => debug!(nutrient = %name, unit = %unit, "Skipping nutrient with unconvertible unit"),
        },
    }
}

/// `en:` category tag: lowercase with whitespace runs replaced by `-`
fn category_tag(category: &str) -> String {
    let slug = category
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    format!("en:{slug}")
}

/// Normalize one USDA search hit into a `FoodRecord`
#[must_use]
pub fn normalize_usda_food(food: &UsdaFood) -> FoodRecord {
    let mut nutriments = Nutriments::new();
    for nutrient in &food.food_nutrients {
        apply_nutrient(&mut nutriments, nutrient);
    }

    let category = food
        .food_category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let brands = food
        .brand_name
        .clone()
        .filter(|b| !b.is_empty())
        .or_else(|| category.map(|c| format!("USDA - {c}")))
        .unwrap_or_else(|| "USDA Database".to_owned());

    FoodRecord {
        code: format!("usda_{}", food.fdc_id),
        product_name: Some(food.description.clone()),
        brands: Some(brands),
        nutriments,
        nutrition_grades: None,
        data_source: DataSource::Usda,
        fdc_id: Some(food.fdc_id),
        categories_tags: category.map(|c| vec![category_tag(c)]),
        image_front_url: None,
    }
}

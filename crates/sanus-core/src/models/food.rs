// ABOUTME: Food record model shared by both nutrition providers
// ABOUTME: Nutriments map with flat <key>_100g / <key>_unit wire serialization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

use crate::constants::nutrients::{PER_100G_SUFFIX, UNIT_SUFFIX};
use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// External database a record came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// `OpenFoodFacts` product database
    #[default]
    OpenFoodFacts,
    /// USDA `FoodData` Central
    Usda,
}

impl DataSource {
    /// Wire name of the source
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenFoodFacts => "openfoodfacts",
            Self::Usda => "usda",
        }
    }
}

/// Amount of one nutrient per 100 g of food
#[derive(Debug, Clone, PartialEq)]
pub struct NutrientValue {
    /// Amount per 100 g
    pub value: f64,
    /// Unit of `value`, when the record states one
    pub unit: Option<String>,
}

/// Nutrient amounts per 100 g keyed by nutrient name (`fat`, `energy-kcal`, ...)
///
/// Serialized flat: every entry becomes `<key>_100g` and, when a unit is
/// known, `<key>_unit`. Other keys found while deserializing (`_serving`,
/// `_value`, bare keys) are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Nutriments(BTreeMap<String, NutrientValue>);

impl Nutriments {
    /// Create an empty nutrient map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a nutrient amount
    pub fn insert(&mut self, key: impl Into<String>, value: f64, unit: Option<&str>) {
        self.0.insert(
            key.into(),
            NutrientValue {
                value,
                unit: unit.map(str::to_owned),
            },
        );
    }

    /// Nutrient entry for `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&NutrientValue> {
        self.0.get(key)
    }

    /// Amount per 100 g for `key`
    #[must_use]
    pub fn per_100g(&self, key: &str) -> Option<f64> {
        self.0.get(key).map(|n| n.value)
    }

    /// Unit recorded for `key`
    #[must_use]
    pub fn unit(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|n| n.unit.as_deref())
    }

    /// Number of nutrients present
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no nutrient is present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate nutrients in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NutrientValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Serialize for Nutriments {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let units = self.0.values().filter(|n| n.unit.is_some()).count();
        let mut map = serializer.serialize_map(Some(self.0.len() + units))?;
        for (key, nutrient) in &self.0 {
            map.serialize_entry(&format!("{key}{PER_100G_SUFFIX}"), &nutrient.value)?;
            if let Some(unit) = &nutrient.unit {
                map.serialize_entry(&format!("{key}{UNIT_SUFFIX}"), unit)?;
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Nutriments {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<BTreeMap<String, serde_json::Value>>::deserialize(deserializer)?
            .unwrap_or_default();

        let mut values = BTreeMap::new();
        let mut units: BTreeMap<&str, &str> = BTreeMap::new();
        for (field, value) in &raw {
            if let Some(key) = field.strip_suffix(PER_100G_SUFFIX) {
                if let Some(amount) = json_amount(value) {
                    values.insert(key.to_owned(), amount);
                }
            } else if let Some(key) = field.strip_suffix(UNIT_SUFFIX) {
                if let Some(unit) = value.as_str() {
                    units.insert(key, unit);
                }
            }
        }

        Ok(Self(
            values
                .into_iter()
                .map(|(key, value)| {
                    let unit = units.get(key.as_str()).map(|u| (*u).to_owned());
                    (key, NutrientValue { value, unit })
                })
                .collect(),
        ))
    }
}

fn json_amount(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

/// A food returned by either provider, in the `OpenFoodFacts` field convention
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    /// Identifier unique within its source (barcode or `usda_<fdcId>`)
    #[serde(default)]
    pub code: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    /// Brand or origin label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brands: Option<String>,
    /// Nutrients per 100 g
    #[serde(default)]
    pub nutriments: Nutriments,
    /// Letter grade (`a`..`e`) when the source rates the product
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition_grades: Option<String>,
    /// Source database
    #[serde(rename = "dataSource", default)]
    pub data_source: DataSource,
    /// USDA numeric identifier
    #[serde(rename = "fdcId", default, skip_serializing_if = "Option::is_none")]
    pub fdc_id: Option<u64>,
    /// Category tags such as `en:vegetables-and-vegetable-products`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories_tags: Option<Vec<String>>,
    /// Front image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_front_url: Option<String>,
}

impl FoodRecord {
    /// Name shown to users, falling back to nothing when the source had none
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.product_name.as_deref().filter(|name| !name.is_empty())
    }

    /// Energy per 100 g in kilocalories, if the record carries it
    #[must_use]
    pub fn kcal_per_100g(&self) -> Option<f64> {
        use crate::constants::nutrients::{ENERGY_KCAL, ENERGY_KCAL_LEGACY};
        self.nutriments
            .per_100g(ENERGY_KCAL)
            .filter(|kcal| kcal.abs() > f64::EPSILON)
            .or_else(|| self.nutriments.per_100g(ENERGY_KCAL_LEGACY))
    }
}

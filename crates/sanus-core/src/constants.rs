// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Provider names, nutrient keys, date formats and calculator defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

//! Constants module
//!
//! Constants are grouped into small domain modules rather than one flat list.

/// External provider display names and defaults
pub mod providers {
    /// Display name used in logs and errors for `OpenFoodFacts`
    pub const OPENFOODFACTS: &str = "OpenFoodFacts";
    /// Display name used in logs and errors for USDA `FoodData` Central
    pub const USDA: &str = "USDA";
    /// Default `OpenFoodFacts` base URL
    pub const DEFAULT_OPENFOODFACTS_BASE_URL: &str = "https://world.openfoodfacts.org";
    /// Default USDA `FoodData` Central base URL
    pub const DEFAULT_USDA_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";
    /// Public USDA demo key
    pub const DEFAULT_USDA_API_KEY: &str = "DEMO_KEY";
    /// USDA data type queried by the search
    pub const DEFAULT_USDA_DATA_TYPE: &str = "Foundation";
    /// Results requested from each provider per search
    pub const DEFAULT_PAGE_SIZE: u32 = 10;
    /// Fields requested from the `OpenFoodFacts` search endpoint
    pub const OFF_SEARCH_FIELDS: &str =
        "code,product_name,brands,image_front_url,nutrition_grades,nutriments";
    /// Fields requested from the `OpenFoodFacts` product endpoint
    pub const OFF_PRODUCT_FIELDS: &str = "product_name,brands,categories_tags,ingredients_text,nutriments,nutrition_grades,image_url,image_front_url,quantity,packaging";
}

/// Nutrient keys in the per-100g naming convention
pub mod nutrients {
    /// Energy in kilocalories
    pub const ENERGY_KCAL: &str = "energy-kcal";
    /// Legacy underscore spelling of the energy key seen in some records
    pub const ENERGY_KCAL_LEGACY: &str = "energy_kcal";
    /// Energy in kilojoules
    pub const ENERGY_KJ: &str = "energy-kj";
    /// Suffix carrying the per-100g amount
    pub const PER_100G_SUFFIX: &str = "_100g";
    /// Suffix carrying the unit
    pub const UNIT_SUFFIX: &str = "_unit";
}

/// Ledger constants
pub mod ledger {
    /// `chrono` format of a bucket date (`MM/DD/YYYY`)
    pub const DATE_FORMAT: &str = "%m/%d/%Y";
    /// Source tag for USDA entries
    pub const SOURCE_USDA: &str = "usda";
    /// Source tag for `OpenFoodFacts` entries
    pub const SOURCE_OFF: &str = "OFD";
    /// Title used when a record has no product name
    pub const UNKNOWN_PRODUCT: &str = "Unknown Product";
    /// Number of days in the weekly series
    pub const WEEK_DAYS: i64 = 7;
    /// Rejection message for a non-positive gram amount
    pub const INVALID_GRAMS_MESSAGE: &str = "Please enter a valid amount in grams";
}

/// Daily-value defaults
pub mod daily_value {
    /// Reference BMR the daily-value table is expressed against
    pub const REFERENCE_BMR: f64 = 2000.0;
}

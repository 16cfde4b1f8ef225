// ABOUTME: Nutrition database clients for the Sanus pipeline
// ABOUTME: OpenFoodFacts and USDA clients, USDA normalization and dual-source search
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

#![deny(unsafe_code)]

//! # Sanus Providers
//!
//! Outbound clients for the two nutrition databases and the search that
//! combines them.
//!
//! - **`openfoodfacts`**: Product search and barcode lookup
//! - **`usda`**: `FoodData` Central search
//! - **`normalizer`**: Maps USDA nutrient lists onto the per-100g field convention
//! - **`search`**: `FoodSource` seam and the fail-independent dual-source search
//! - **`http_client`**: Shared pooled `reqwest` client

/// Shared HTTP client with connection pooling
pub mod http_client;
/// USDA nutrient list normalization
pub mod normalizer;
/// `OpenFoodFacts` client
pub mod openfoodfacts;
/// Dual-source search and provider traits
pub mod search;
/// USDA `FoodData` Central client
pub mod usda;

pub use http_client::{
    initialize_shared_client, shared_client, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS,
};
pub use normalizer::normalize_usda_food;
pub use openfoodfacts::{OpenFoodFactsClient, OpenFoodFactsConfig};
pub use search::{DualSourceSearch, FoodSource, ProductLookup, SearchOutcome};
pub use usda::{UsdaClient, UsdaConfig, UsdaFood, UsdaNutrient};

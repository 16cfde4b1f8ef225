// ABOUTME: Shared server resources handed to every route as axum state
// ABOUTME: Wires the database, the dual-source food search and the barcode lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

use crate::config::ServerConfig;
use crate::database::Database;
use sanus_providers::{
    DualSourceSearch, FoodSource, OpenFoodFactsClient, ProductLookup, UsdaClient,
};
use std::sync::Arc;

/// Everything a request handler needs, created once at startup
#[derive(Clone)]
pub struct ServerResources {
    /// Profile and ledger storage
    pub database: Arc<Database>,
    /// Concurrent USDA + `OpenFoodFacts` search
    pub food_search: Arc<DualSourceSearch>,
    /// Barcode lookup against `OpenFoodFacts`
    pub product_lookup: Arc<dyn ProductLookup>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Assemble resources from explicit parts
    #[must_use]
    pub fn new(
        database: Database,
        usda: Arc<dyn FoodSource>,
        openfoodfacts: Arc<dyn FoodSource>,
        product_lookup: Arc<dyn ProductLookup>,
        config: Arc<ServerConfig>,
    ) -> Self {
        Self {
            database: Arc::new(database),
            food_search: Arc::new(DualSourceSearch::new(usda, openfoodfacts)),
            product_lookup,
            config,
        }
    }

    /// Build the production provider clients from `config`
    ///
    /// The `OpenFoodFacts` client serves both search and barcode lookup.
    #[must_use]
    pub fn from_config(database: Database, config: Arc<ServerConfig>) -> Self {
        let usda = Arc::new(UsdaClient::new(config.providers.usda()));
        let openfoodfacts = Arc::new(OpenFoodFactsClient::new(config.providers.openfoodfacts()));
        Self::new(
            database,
            usda,
            openfoodfacts.clone(),
            openfoodfacts,
            config,
        )
    }
}

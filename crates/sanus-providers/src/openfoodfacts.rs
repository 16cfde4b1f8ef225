// ABOUTME: OpenFoodFacts API client for product search and barcode lookup
// ABOUTME: Requests a fixed field subset so records match the shared FoodRecord shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

//! `OpenFoodFacts` API Client
//!
//! Two endpoints are used:
//! - `GET /cgi/search.pl` for free-text product search
//! - `GET /api/v2/product/{barcode}` for a single product
//!
//! Records are already in the per-100g convention; the client only tags them
//! with their data source.
//!
//! # API Reference
//! <https://openfoodfacts.github.io/openfoodfacts-server/api/>

use crate::http_client::{fetch_json, shared_client};
use crate::search::{FoodSource, ProductLookup};
use async_trait::async_trait;
use sanus_core::constants::providers::{
    DEFAULT_OPENFOODFACTS_BASE_URL, DEFAULT_PAGE_SIZE, OFF_PRODUCT_FIELDS, OFF_SEARCH_FIELDS,
    OPENFOODFACTS,
};
use sanus_core::errors::{ProviderError, ProviderResult};
use sanus_core::models::{DataSource, FoodRecord};
use serde::Deserialize;
use tracing::debug;

/// `OpenFoodFacts` client configuration
#[derive(Debug, Clone)]
pub struct OpenFoodFactsConfig {
    /// Base URL (default: <https://world.openfoodfacts.org>)
    pub base_url: String,
    /// Results per search (default: 10)
    pub page_size: u32,
}

impl Default for OpenFoodFactsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPENFOODFACTS_BASE_URL.to_owned(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    products: Vec<FoodRecord>,
}

#[derive(Debug, Deserialize)]
struct ProductResponse {
    #[serde(default)]
    status: i64,
    #[serde(default)]
    product: Option<FoodRecord>,
}

/// `OpenFoodFacts` API client
#[derive(Debug, Clone)]
pub struct OpenFoodFactsClient {
    config: OpenFoodFactsConfig,
    http_client: reqwest::Client,
}

impl OpenFoodFactsClient {
    /// Create a client on the shared connection pool
    #[must_use]
    pub fn new(config: OpenFoodFactsConfig) -> Self {
        Self::with_client(config, shared_client().clone())
    }

    /// Create a client with a caller-supplied HTTP client
    #[must_use]
    pub const fn with_client(config: OpenFoodFactsConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// Search products by free text, in API order, tagged `openfoodfacts`
    ///
    /// # Errors
    /// Returns a `ProviderError` when the request fails, the API answers with a
    /// non-success status, or the body is not a search response.
    pub async fn search_products(&self, query: &str) -> ProviderResult<Vec<FoodRecord>> {
        let url = format!("{}/cgi/search.pl", self.base_url());
        let request = self.http_client.get(&url).query(&[
            ("search_terms", query),
            ("search_simple", "1"),
            ("action", "process"),
            ("json", "1"),
            ("page_size", &self.config.page_size.to_string()),
            ("fields", OFF_SEARCH_FIELDS),
        ]);

        let response: SearchResponse = fetch_json(OPENFOODFACTS, request).await?;
        debug!(provider = OPENFOODFACTS, query = %query, hits = response.products.len(), "OpenFoodFacts search returned");

        Ok(response
            .products
            .into_iter()
            .map(|mut product| {
                product.data_source = DataSource::OpenFoodFacts;
                product
            })
            .collect())
    }

    /// Look up one product by barcode
    ///
    /// Returns `Ok(None)` when the database has no such product, including
    /// the 404 the v2 API answers for unknown codes.
    ///
    /// # Errors
    /// Returns a `ProviderError` for network, status and decoding failures.
    pub async fn get_product(&self, barcode: &str) -> ProviderResult<Option<FoodRecord>> {
        let barcode = barcode.trim();
        let url = format!("{}/api/v2/product/{barcode}", self.base_url());
        let request = self
            .http_client
            .get(&url)
            .query(&[("fields", OFF_PRODUCT_FIELDS), ("lc", "en")]);

        let response: ProductResponse = match fetch_json(OPENFOODFACTS, request).await {
            Ok(response) => response,
            Err(ProviderError::HttpStatus { status: 404, .. }) => return Ok(None),
            Err(e) => return Err(e),
        };

        if response.status != 1 {
            return Ok(None);
        }
        Ok(response.product.map(|mut product| {
            product.code = barcode.to_owned();
            product.data_source = DataSource::OpenFoodFacts;
            product
        }))
    }
}

#[async_trait]
impl FoodSource for OpenFoodFactsClient {
    fn name(&self) -> &'static str {
        OPENFOODFACTS
    }

    async fn search(&self, query: &str) -> ProviderResult<Vec<FoodRecord>> {
        self.search_products(query).await
    }
}

#[async_trait]
impl ProductLookup for OpenFoodFactsClient {
    async fn lookup_barcode(&self, barcode: &str) -> ProviderResult<Option<FoodRecord>> {
        self.get_product(barcode).await
    }
}

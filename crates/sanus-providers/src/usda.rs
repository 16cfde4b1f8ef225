// ABOUTME: USDA FoodData Central API client for food search
// ABOUTME: Queries one data type and returns records normalized to the per-100g convention
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

//! USDA `FoodData` Central API Client
//!
//! Searches the Foundation foods data set. Every food in the response is
//! normalized through [`crate::normalizer`] so USDA and `OpenFoodFacts` results
//! share one shape.
//!
//! # API Reference
//! USDA `FoodData` Central API: <https://fdc.nal.usda.gov/api-guide.html>

use crate::http_client::{fetch_json, shared_client};
use crate::normalizer::normalize_usda_food;
use crate::search::FoodSource;
use async_trait::async_trait;
use sanus_core::constants::providers::{
    DEFAULT_PAGE_SIZE, DEFAULT_USDA_API_KEY, DEFAULT_USDA_BASE_URL, DEFAULT_USDA_DATA_TYPE, USDA,
};
use sanus_core::errors::ProviderResult;
use sanus_core::models::FoodRecord;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// USDA API client configuration
#[derive(Debug, Clone)]
pub struct UsdaConfig {
    /// USDA API key (free from <https://fdc.nal.usda.gov/api-key-signup.html>)
    pub api_key: String,
    /// Base URL for USDA API (default: <https://api.nal.usda.gov/fdc/v1>)
    pub base_url: String,
    /// Data type filter (default: `Foundation`)
    pub data_type: String,
    /// Results per search (default: 10)
    pub page_size: u32,
}

impl Default for UsdaConfig {
    fn default() -> Self {
        Self {
            api_key: DEFAULT_USDA_API_KEY.to_owned(),
            base_url: DEFAULT_USDA_BASE_URL.to_owned(),
            data_type: DEFAULT_USDA_DATA_TYPE.to_owned(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Nutrient line of a USDA search hit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsdaNutrient {
    /// Nutrient name (e.g. `Protein`, `Sodium, Na`)
    pub nutrient_name: String,
    /// Amount per 100 g; some lines carry none
    #[serde(default)]
    pub value: Option<f64>,
    /// Unit label (e.g. `G`, `MG`, `KCAL`)
    #[serde(default)]
    pub unit_name: String,
}

/// One food in a USDA search response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsdaFood {
    /// `FoodData` Central ID
    pub fdc_id: u64,
    /// Food description
    #[serde(default)]
    pub description: String,
    /// Brand name (branded foods only)
    #[serde(default)]
    pub brand_name: Option<String>,
    /// Food category
    #[serde(default)]
    pub food_category: Option<String>,
    /// Nutrient lines
    #[serde(default)]
    pub food_nutrients: Vec<UsdaNutrient>,
}

/// USDA API search response
///
/// Hits stay raw so one malformed food does not fail the whole page.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<serde_json::Value>,
}

/// USDA `FoodData` Central API Client
#[derive(Debug, Clone)]
pub struct UsdaClient {
    config: UsdaConfig,
    http_client: reqwest::Client,
}

impl UsdaClient {
    /// Create a client on the shared connection pool
    #[must_use]
    pub fn new(config: UsdaConfig) -> Self {
        Self::with_client(config, shared_client().clone())
    }

    /// Create a client with a caller-supplied HTTP client
    #[must_use]
    pub const fn with_client(config: UsdaConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Search for foods and return the USDA hits in API order
    ///
    /// Hits that do not parse as a [`UsdaFood`] (for example a missing
    /// `fdcId`) are skipped.
    ///
    /// # Errors
    /// Returns a `ProviderError` when the request fails, the API answers with a
    /// non-success status, or the body is not a search response.
    pub async fn search_foods(&self, query: &str) -> ProviderResult<Vec<UsdaFood>> {
        let url = format!("{}/foods/search", self.config.base_url.trim_end_matches('/'));
        let request = self.http_client.get(&url).query(&[
            ("query", query),
            ("dataType", self.config.data_type.as_str()),
            ("api_key", self.config.api_key.as_str()),
            ("pageSize", &self.config.page_size.to_string()),
        ]);

        let response: SearchResponse = fetch_json(USDA, request).await?;
        let hits = response.foods.len();
        let foods: Vec<UsdaFood> = response
            .foods
            .into_iter()
            .filter_map(|hit| match serde_json::from_value::<UsdaFood>(hit) {
                Ok(food) => Some(food),
                Err(e) => {
                    warn!(provider = USDA, error = %e, "Skipping malformed USDA hit");
                    None
                }
            })
            .collect();
        debug!(provider = USDA, query = %query, hits, kept = foods.len(), "USDA search returned");
        Ok(foods)
    }
}

#[async_trait]
impl FoodSource for UsdaClient {
    fn name(&self) -> &'static str {
        USDA
    }

    async fn search(&self, query: &str) -> ProviderResult<Vec<FoodRecord>> {
        let foods = self.search_foods(query).await?;
        Ok(foods.iter().map(normalize_usda_food).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use sanus_core::errors::ProviderError;

    fn client(base_url: String) -> UsdaClient {
        UsdaClient::with_client(
            UsdaConfig {
                api_key: "test-key".to_owned(),
                base_url,
                ..UsdaConfig::default()
            },
            reqwest::Client::new(),
        )
    }

    #[tokio::test]
    async fn test_search_sends_expected_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/foods/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("query".into(), "raw broccoli".into()),
                Matcher::UrlEncoded("dataType".into(), "Foundation".into()),
                Matcher::UrlEncoded("api_key".into(), "test-key".into()),
                Matcher::UrlEncoded("pageSize".into(), "10".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"foods":[{"fdcId":747447,"description":"Broccoli, raw","foodCategory":"Vegetables and Vegetable Products","foodNutrients":[{"nutrientName":"Protein","value":2.57,"unitName":"G"}]}]}"#,
            )
            .create_async()
            .await;

        let records = client(server.url()).search("raw broccoli").await.unwrap();
        mock.assert_async().await;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, "usda_747447");
        assert_eq!(records[0].nutriments.per_100g("proteins"), Some(2.57));
    }

    #[tokio::test]
    async fn test_search_http_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/foods/search")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body("API_KEY_INVALID")
            .create_async()
            .await;

        let err = client(server.url()).search_foods("apple").await.unwrap_err();
        match err {
            ProviderError::HttpStatus { status, body, .. } => {
                assert_eq!(status, 403);
                assert_eq!(body, "API_KEY_INVALID");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_missing_foods_is_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/foods/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"totalHits":0}"#)
            .create_async()
            .await;

        let foods = client(server.url()).search_foods("zzz").await.unwrap();
        assert!(foods.is_empty());
    }

    #[tokio::test]
    async fn test_search_skips_hit_without_fdc_id() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/foods/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"foods":[{"description":"Mystery food","foodNutrients":[]},{"fdcId":"not-a-number","description":"Bad id"},{"fdcId":1750340,"description":"Apples, fuji, with skin, raw","foodNutrients":[{"nutrientName":"Energy","value":63.0,"unitName":"KCAL"}]}]}"#,
            )
            .create_async()
            .await;

        let records = client(server.url()).search("apple").await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, "usda_1750340");
        assert_eq!(
            records[0].product_name.as_deref(),
            Some("Apples, fuji, with skin, raw")
        );
    }
}

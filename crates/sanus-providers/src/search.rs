// ABOUTME: Dual-source food search over USDA and OpenFoodFacts
// ABOUTME: Fail-independent concurrent join with per-client sequence numbers for superseded searches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

//! Dual-Source Query Component
//!
//! Both providers are queried concurrently. A provider that fails contributes
//! no results and is logged; it never fails the other provider or the search.
//! Results list every USDA hit first, then every `OpenFoodFacts` hit, each in
//! the order the provider returned them.
//!
//! Each search takes a sequence number when it starts. Sequences are counted
//! per client, so one client's searches never supersede another's. A client
//! that issues searches while typing can drop results from any search that is
//! no longer the latest one it issued.

use async_trait::async_trait;
use dashmap::DashMap;
use sanus_core::errors::ProviderResult;
use sanus_core::models::FoodRecord;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// A nutrition database that can be searched by free text
#[async_trait]
pub trait FoodSource: Send + Sync {
    /// Display name used in logs
    fn name(&self) -> &'static str;

    /// Search the database, returning records in provider order
    async fn search(&self, query: &str) -> ProviderResult<Vec<FoodRecord>>;
}

/// A database that can resolve a single product by barcode
#[async_trait]
pub trait ProductLookup: Send + Sync {
    /// `Ok(None)` when the product does not exist
    async fn lookup_barcode(&self, barcode: &str) -> ProviderResult<Option<FoodRecord>>;
}

/// Results of one search together with the sequence number it was issued under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Sequence number, increasing with every non-empty search of one client
    pub sequence: u64,
    /// USDA results followed by `OpenFoodFacts` results
    pub results: Vec<FoodRecord>,
}

/// Concurrent search over a USDA source and an `OpenFoodFacts` source
pub struct DualSourceSearch {
    usda: Arc<dyn FoodSource>,
    openfoodfacts: Arc<dyn FoodSource>,
    /// Latest sequence issued, keyed by client
    sequences: DashMap<String, u64>,
}

impl DualSourceSearch {
    /// Combine the two sources
    #[must_use]
    pub fn new(usda: Arc<dyn FoodSource>, openfoodfacts: Arc<dyn FoodSource>) -> Self {
        Self {
            usda,
            openfoodfacts,
            sequences: DashMap::new(),
        }
    }

    /// Sequence number of the most recent search `client` issued (0 before any)
    #[must_use]
    pub fn latest_sequence(&self, client: &str) -> u64 {
        self.sequences.get(client).map_or(0, |latest| *latest)
    }

    /// True when `client` issued no search after the one tagged `sequence`
    #[must_use]
    pub fn is_latest(&self, client: &str, sequence: u64) -> bool {
        self.latest_sequence(client) == sequence
    }

    fn next_sequence(&self, client: &str) -> u64 {
        let mut latest = self.sequences.entry(client.to_owned()).or_insert(0);
        *latest += 1;
        *latest
    }

    /// Search both sources on behalf of `client`
    ///
    /// An empty or whitespace-only query returns no results without any
    /// network call and without taking a sequence number.
    pub async fn search(&self, client: &str, query: &str) -> SearchOutcome {
        let query = query.trim();
        if query.is_empty() {
            return SearchOutcome {
                sequence: self.latest_sequence(client),
                results: Vec::new(),
            };
        }

        let sequence = self.next_sequence(client);
        let started = Instant::now();

        let (usda, openfoodfacts) = tokio::join!(
            Self::collect(self.usda.as_ref(), query),
            Self::collect(self.openfoodfacts.as_ref(), query),
        );

        let usda_count = usda.len();
        let off_count = openfoodfacts.len();
        let mut results = usda;
        results.extend(openfoodfacts);

        info!(
            query = %query,
            sequence,
            usda_results = usda_count,
            openfoodfacts_results = off_count,
            duration_ms = started.elapsed().as_millis(),
            "Food search completed"
        );

        SearchOutcome { sequence, results }
    }

    /// Search both sources, discarding the results if `client` issued a
    /// newer search while this one ran
    pub async fn search_latest(&self, client: &str, query: &str) -> Option<SearchOutcome> {
        let outcome = self.search(client, query).await;
        self.is_latest(client, outcome.sequence).then_some(outcome)
    }

    async fn collect(source: &dyn FoodSource, query: &str) -> Vec<FoodRecord> {
        match source.search(query).await {
            Ok(records) => records,
            Err(error) => {
                warn!(
                    provider = source.name(),
                    query = %query,
                    error = %error,
                    "Food provider search failed, continuing without its results"
                );
                Vec::new()
            }
        }
    }
}

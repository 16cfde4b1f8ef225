// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: In-memory database, fake nutrition providers and ready-made server resources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `sanus_server`

use async_trait::async_trait;
use sanus_core::errors::{ProviderError, ProviderResult};
use sanus_core::models::{DataSource, FoodRecord, Nutriments};
use sanus_providers::{FoodSource, ProductLookup};
use sanus_server::{
    config::{DatabaseUrl, ServerConfig},
    database::Database,
    resources::ServerResources,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Database {
    init_test_logging();
    Database::new(&DatabaseUrl::Memory)
        .await
        .expect("in-memory database")
}

/// A search provider answering every query with fixed records
pub struct FakeSource {
    name: &'static str,
    records: Vec<FoodRecord>,
    fail: bool,
    delay: Duration,
    pub calls: AtomicUsize,
}

impl FakeSource {
    pub fn new(name: &'static str, records: Vec<FoodRecord>) -> Self {
        Self {
            name,
            records,
            fail: false,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    /// Answer every query only after `delay`
    pub fn delayed(self, delay: Duration) -> Self {
        Self { delay, ..self }
    }

    pub fn failing(name: &'static str) -> Self {
        Self {
            fail: true,
            ..Self::new(name, Vec::new())
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FoodSource for FakeSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn search(&self, _query: &str) -> ProviderResult<Vec<FoodRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        if self.fail {
            return Err(ProviderError::Network {
                provider: self.name.to_owned(),
                message: "connection refused".to_owned(),
            });
        }
        Ok(self.records.clone())
    }
}

/// Barcode lookup over a fixed product table
#[derive(Default)]
pub struct FakeLookup {
    products: HashMap<String, FoodRecord>,
    fail: bool,
}

impl FakeLookup {
    pub fn with_product(record: FoodRecord) -> Self {
        let mut products = HashMap::new();
        products.insert(record.code.clone(), record);
        Self {
            products,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            products: HashMap::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl ProductLookup for FakeLookup {
    async fn lookup_barcode(&self, barcode: &str) -> ProviderResult<Option<FoodRecord>> {
        if self.fail {
            return Err(ProviderError::HttpStatus {
                provider: "OpenFoodFacts".to_owned(),
                status: 503,
                body: "Service Unavailable".to_owned(),
            });
        }
        Ok(self.products.get(barcode).cloned())
    }
}

/// Resources over an in-memory database and the given fakes
pub async fn create_test_resources(
    usda: FakeSource,
    openfoodfacts: FakeSource,
    lookup: FakeLookup,
) -> Arc<ServerResources> {
    let database = create_test_database().await;
    Arc::new(ServerResources::new(
        database,
        Arc::new(usda),
        Arc::new(openfoodfacts),
        Arc::new(lookup),
        Arc::new(ServerConfig::default()),
    ))
}

/// Resources with empty providers
pub async fn create_default_resources() -> Arc<ServerResources> {
    create_test_resources(
        FakeSource::new("USDA", Vec::new()),
        FakeSource::new("OpenFoodFacts", Vec::new()),
        FakeLookup::default(),
    )
    .await
}

/// `OpenFoodFacts` record with an energy value
pub fn off_record(code: &str, name: &str, kcal: f64) -> FoodRecord {
    let mut nutriments = Nutriments::new();
    nutriments.insert("energy-kcal", kcal, Some("kcal"));
    FoodRecord {
        code: code.to_owned(),
        product_name: Some(name.to_owned()),
        nutriments,
        data_source: DataSource::OpenFoodFacts,
        ..FoodRecord::default()
    }
}

/// USDA record with an energy value
pub fn usda_record(fdc_id: u64, name: &str, kcal: f64) -> FoodRecord {
    let mut nutriments = Nutriments::new();
    nutriments.insert("energy-kcal", kcal, None);
    FoodRecord {
        code: format!("usda_{fdc_id}"),
        product_name: Some(name.to_owned()),
        brands: Some("USDA Database".to_owned()),
        nutriments,
        data_source: DataSource::Usda,
        fdc_id: Some(fdc_id),
        ..FoodRecord::default()
    }
}

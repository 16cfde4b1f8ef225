// ABOUTME: Main library entry point for the Sanus nutrition API
// ABOUTME: REST surface over food search, daily-value scoring and the consumption ledger
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

#![deny(unsafe_code)]

//! # Sanus Server
//!
//! HTTP service for the Sanus nutrition pipeline:
//!
//! - **Food search**: USDA `FoodData` Central and `OpenFoodFacts` queried
//!   concurrently, results normalized to one per-100g record shape
//! - **Barcode lookup**: single products from `OpenFoodFacts`
//! - **Daily values**: nutrient percentages scaled by the caller's BMR
//! - **Consumption ledger**: per-date buckets of logged foods with daily and
//!   weekly calorie totals
//!
//! ## Architecture
//!
//! - `sanus-core`: models, errors and constants
//! - `sanus-intelligence`: pure nutrition algorithms
//! - `sanus-providers`: HTTP clients and the dual-source search
//! - this crate: configuration, persistence, services and routes
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use sanus_server::config::ServerConfig;
//! use sanus_core::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Sanus server configured: {}", config.summary());
//!     Ok(())
//! }
//! ```

/// Environment-based configuration
pub mod config;

/// `SQLite` persistence for profiles and ledgers
pub mod database;

/// Structured logging setup and domain log events
pub mod logging;

/// CORS and tracing layers, application assembly
pub mod middleware;

/// Shared resources handed to route handlers
pub mod resources;

/// HTTP routes
pub mod routes;

/// Business logic between routes and stores
pub mod services;

/// Per-request caller identity
pub mod session;

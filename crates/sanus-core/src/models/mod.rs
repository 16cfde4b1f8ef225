// ABOUTME: Core data models for the Sanus nutrition pipeline
// ABOUTME: Re-exports food records, consumption ledger and profile structures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

//! # Data Models
//!
//! Shared data structures used by the provider clients, the algorithms and
//! the HTTP layer. Field names on the wire follow the per-100g convention of
//! `OpenFoodFacts` and the `foodConsumes` document shape, so serialized values
//! can be exchanged with existing clients unchanged.
//!
//! ## Core Models
//!
//! - `FoodRecord`: One search or barcode result from either provider
//! - `Nutriments`: Nutrient amounts per 100 g, flattened on the wire
//! - `ConsumptionEntry` / `DailyConsumptionBucket`: The consumption ledger
//! - `UserProfile`: Body metrics used for BMR scaling

mod food;
/// Serde helpers for numbers stored as strings and vice versa
pub mod lenient;
mod ledger;
mod profile;

pub use food::{DataSource, FoodRecord, NutrientValue, Nutriments};
pub use ledger::{parse_decimal_lossy, ConsumptionEntry, DailyConsumptionBucket, LedgerDate};
pub use profile::{BiologicalSex, UserProfile};

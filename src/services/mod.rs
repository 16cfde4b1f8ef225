// ABOUTME: Business logic between the HTTP routes and the stores and providers
// ABOUTME: Food lookup and scoring, ledger updates and aggregation, profile metrics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

//! Service layer
//!
//! Route handlers parse requests and build a [`crate::session::Session`];
//! everything else happens here. Services that depend on the calendar take
//! the date explicitly.

/// Food search, barcode lookup, daily values and nutrition facts
pub mod foods;
/// Consumption ledger updates and aggregation
pub mod ledger;
/// Profile metrics and derived body metrics
pub mod profile;

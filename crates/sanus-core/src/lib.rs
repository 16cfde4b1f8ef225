// ABOUTME: Core types and constants for the Sanus nutrition service
// ABOUTME: Foundation crate with error handling, food records, ledger and profile models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

#![deny(unsafe_code)]

//! # Sanus Core
//!
//! Foundation crate providing shared types for the Sanus nutrition pipeline.
//! It changes infrequently, so the algorithm and provider crates can compile
//! against it in parallel.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode` and `ProviderError`
//! - **constants**: Nutrient keys, date formats and provider names
//! - **models**: Food records, consumption ledger and user profile

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`FoodRecord`, `ConsumptionEntry`, `UserProfile`, ...)
pub mod models;

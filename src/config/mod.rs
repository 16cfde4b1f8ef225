// ABOUTME: Configuration module for the Sanus server
// ABOUTME: Re-exports the environment-driven server configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

/// Environment-based configuration
pub mod environment;

pub use environment::{DatabaseUrl, HttpClientConfig, ProvidersConfig, ServerConfig};

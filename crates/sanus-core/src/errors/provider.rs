// ABOUTME: Error type for outbound nutrition provider requests
// ABOUTME: Separates network, HTTP status, parse and not-found failures per provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

use super::{AppError, ErrorCode};
use thiserror::Error;

/// Failure of a single provider request
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// The request never produced a response (DNS, connect, timeout)
    #[error("{provider} request failed: {message}")]
    Network {
        /// Provider display name
        provider: String,
        /// Transport error message
        message: String,
    },

    /// The provider answered with a non-success status
    #[error("{provider} returned HTTP {status}: {body}")]
    HttpStatus {
        /// Provider display name
        provider: String,
        /// HTTP status code
        status: u16,
        /// Response body (may be empty)
        body: String,
    },

    /// The provider answered but the body could not be decoded
    #[error("{provider} response could not be parsed: {message}")]
    Parse {
        /// Provider display name
        provider: String,
        /// Decoder error message
        message: String,
    },

    /// The provider has no record for the requested identifier
    #[error("{resource} not found in {provider}")]
    NotFound {
        /// Provider display name
        provider: String,
        /// Identifier that was looked up
        resource: String,
    },
}

impl ProviderError {
    /// Name of the provider that failed
    #[must_use]
    pub fn provider(&self) -> &str {
        match self {
            Self::Network { provider, .. }
            | Self::HttpStatus { provider, .. }
            | Self::Parse { provider, .. }
            | Self::NotFound { provider, .. } => provider,
        }
    }

    /// Classify a `reqwest` error for the given provider
    #[cfg(feature = "provider-errors")]
    #[must_use]
    pub fn from_reqwest(provider: &str, error: &reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Parse {
                provider: provider.to_owned(),
                message: error.to_string(),
            }
        } else if let Some(status) = error.status() {
            Self::HttpStatus {
                provider: provider.to_owned(),
                status: status.as_u16(),
                body: String::new(),
            }
        } else {
            Self::Network {
                provider: provider.to_owned(),
                message: error.to_string(),
            }
        }
    }
}

/// Result alias for provider calls
pub type ProviderResult<T> = Result<T, ProviderError>;

impl From<ProviderError> for AppError {
    fn from(error: ProviderError) -> Self {
        let code = match &error {
            ProviderError::Network { .. } => ErrorCode::ExternalServiceUnavailable,
            ProviderError::HttpStatus { .. } | ProviderError::Parse { .. } => {
                ErrorCode::ExternalServiceError
            }
            ProviderError::NotFound { .. } => ErrorCode::ResourceNotFound,
        };
        let message = error.to_string();
        Self::new(code, message).with_source(error)
    }
}

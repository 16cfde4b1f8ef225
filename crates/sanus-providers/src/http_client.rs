// ABOUTME: Shared HTTP client with connection pooling for nutrition provider calls
// ABOUTME: Singleton pattern with configurable timeouts initialized at server startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

use reqwest::{Client, ClientBuilder, RequestBuilder};
use sanus_core::errors::{ProviderError, ProviderResult};
use serde::de::DeserializeOwned;
use std::sync::OnceLock;
use std::time::Duration;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Configured timeout values for the shared client
static CLIENT_TIMEOUTS: OnceLock<(u64, u64)> = OnceLock::new();

/// Global shared HTTP client with configured timeouts
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// Initialize the shared HTTP client timeout configuration
///
/// Must be called once at server startup before either provider client is
/// created. Without it the defaults apply (30s timeout, 10s connect timeout).
pub fn initialize_shared_client(timeout_secs: u64, connect_timeout_secs: u64) {
    let _ = CLIENT_TIMEOUTS.set((timeout_secs, connect_timeout_secs));
}

/// Get the shared HTTP client for provider API calls
///
/// Both provider clients clone this handle, so they share one connection pool.
pub fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| {
        let (timeout, connect_timeout) = CLIENT_TIMEOUTS
            .get()
            .copied()
            .unwrap_or((DEFAULT_TIMEOUT_SECS, DEFAULT_CONNECT_TIMEOUT_SECS));

        ClientBuilder::new()
            .timeout(Duration::from_secs(timeout))
            .connect_timeout(Duration::from_secs(connect_timeout))
            .user_agent(concat!("sanus-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// Send `request` and decode a JSON body, classifying failures for `provider`
///
/// Non-2xx responses become `HttpStatus` with the body text attached.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    provider: &str,
    request: RequestBuilder,
) -> ProviderResult<T> {
    let response = request
        .send()
        .await
        .map_err(|e| ProviderError::from_reqwest(provider, &e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::HttpStatus {
            provider: provider.to_owned(),
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        });
    }

    response.json::<T>().await.map_err(|e| ProviderError::Parse {
        provider: provider.to_owned(),
        message: e.to_string(),
    })
}

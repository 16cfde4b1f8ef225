// ABOUTME: Environment-based server configuration for the Sanus nutrition API
// ABOUTME: Parses listener, database, provider and HTTP client settings from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

//! Environment-based configuration
//!
//! Every setting has a default, so the server starts with no environment at
//! all. Values that are present but malformed are configuration errors.

use sanus_core::constants::providers::{
    DEFAULT_OPENFOODFACTS_BASE_URL, DEFAULT_PAGE_SIZE, DEFAULT_USDA_API_KEY, DEFAULT_USDA_BASE_URL,
    DEFAULT_USDA_DATA_TYPE,
};
use sanus_core::errors::{AppError, AppResult};
use sanus_providers::{
    OpenFoodFactsConfig, UsdaConfig, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

/// Default HTTP port
pub const DEFAULT_HTTP_PORT: u16 = 8081;

/// Default bind address
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/sanus.db";

/// Database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database file
    SQLite {
        /// Path to the database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse a `sqlite:` URL or a bare file path
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let path_str = s.strip_prefix("sqlite:").unwrap_or(s);
        if path_str == ":memory:" {
            Self::Memory
        } else {
            Self::SQLite {
                path: PathBuf::from(path_str),
            }
        }
    }

    /// Connection string understood by sqlx
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".into(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(DEFAULT_DATABASE_URL)
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Settings shared by the two nutrition database clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// `OpenFoodFacts` base URL
    pub openfoodfacts_base_url: String,
    /// USDA `FoodData` Central base URL
    pub usda_base_url: String,
    /// USDA API key
    pub usda_api_key: String,
    /// USDA data type filter
    pub usda_data_type: String,
    /// Results requested from each provider per search
    pub page_size: u32,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            openfoodfacts_base_url: DEFAULT_OPENFOODFACTS_BASE_URL.to_owned(),
            usda_base_url: DEFAULT_USDA_BASE_URL.to_owned(),
            usda_api_key: DEFAULT_USDA_API_KEY.to_owned(),
            usda_data_type: DEFAULT_USDA_DATA_TYPE.to_owned(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ProvidersConfig {
    /// Load provider settings from environment (or defaults)
    ///
    /// # Errors
    ///
    /// Returns an error if `FOOD_SEARCH_PAGE_SIZE` is not a positive integer
    pub fn from_env() -> AppResult<Self> {
        let page_size: u32 = parse_env("FOOD_SEARCH_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        if page_size == 0 {
            return Err(AppError::config(
                "FOOD_SEARCH_PAGE_SIZE must be greater than zero",
            ));
        }

        Ok(Self {
            openfoodfacts_base_url: env_var_or(
                "OPENFOODFACTS_BASE_URL",
                DEFAULT_OPENFOODFACTS_BASE_URL,
            ),
            usda_base_url: env_var_or("USDA_BASE_URL", DEFAULT_USDA_BASE_URL),
            usda_api_key: env_var_or("USDA_API_KEY", DEFAULT_USDA_API_KEY),
            usda_data_type: env_var_or("USDA_DATA_TYPE", DEFAULT_USDA_DATA_TYPE),
            page_size,
        })
    }

    /// USDA client settings
    #[must_use]
    pub fn usda(&self) -> UsdaConfig {
        UsdaConfig {
            api_key: self.usda_api_key.clone(),
            base_url: self.usda_base_url.clone(),
            data_type: self.usda_data_type.clone(),
            page_size: self.page_size,
        }
    }

    /// `OpenFoodFacts` client settings
    #[must_use]
    pub fn openfoodfacts(&self) -> OpenFoodFactsConfig {
        OpenFoodFactsConfig {
            base_url: self.openfoodfacts_base_url.clone(),
            page_size: self.page_size,
        }
    }
}

/// Outbound HTTP client timeouts
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Total request timeout in seconds
    pub timeout_secs: u64,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl HttpClientConfig {
    /// Load timeouts from environment (or defaults)
    ///
    /// # Errors
    ///
    /// Returns an error if a timeout is not a whole number of seconds
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            timeout_secs: parse_env("HTTP_CLIENT_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            connect_timeout_secs: parse_env(
                "HTTP_CLIENT_CONNECT_TIMEOUT_SECS",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )?,
        })
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listener port
    pub http_port: u16,
    /// HTTP bind address
    pub host: String,
    /// Ledger and profile store
    pub database: DatabaseUrl,
    /// Nutrition database clients
    pub providers: ProvidersConfig,
    /// Outbound HTTP client timeouts
    pub http_client: HttpClientConfig,
    /// Comma-separated CORS origins, `*` for any
    pub cors_allowed_origins: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            host: DEFAULT_HOST.to_owned(),
            database: DatabaseUrl::default(),
            providers: ProvidersConfig::default(),
            http_client: HttpClientConfig::default(),
            cors_allowed_origins: "*".to_owned(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if any variable is present but malformed
    pub fn from_env() -> AppResult<Self> {
        let config = Self {
            http_port: parse_env("HTTP_PORT", DEFAULT_HTTP_PORT)?,
            host: env_var_or("HOST", DEFAULT_HOST),
            database: DatabaseUrl::parse_url(&env_var_or("DATABASE_URL", DEFAULT_DATABASE_URL)),
            providers: ProvidersConfig::from_env()?,
            http_client: HttpClientConfig::from_env()?,
            cors_allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", "*"),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check values that parse but cannot work
    ///
    /// # Errors
    ///
    /// Returns an error for an empty host or a blank provider base URL
    pub fn validate(&self) -> AppResult<()> {
        if self.host.trim().is_empty() {
            return Err(AppError::config("HOST must not be empty"));
        }
        for (name, url) in [
            ("OPENFOODFACTS_BASE_URL", &self.providers.openfoodfacts_base_url),
            ("USDA_BASE_URL", &self.providers.usda_base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(AppError::config(format!(
                    "{name} must be an http(s) URL, got {url:?}"
                )));
            }
        }
        Ok(())
    }

    /// Socket address the server binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    /// One-line configuration summary for startup logs, secrets redacted
    #[must_use]
    pub fn summary(&self) -> String {
        let key = if self.providers.usda_api_key == DEFAULT_USDA_API_KEY {
            DEFAULT_USDA_API_KEY
        } else {
            "[configured]"
        };
        format!(
            "listen={} database={} openfoodfacts={} usda={} usda_key={key} data_type={} page_size={} timeout={}s connect_timeout={}s",
            self.bind_address(),
            self.database,
            self.providers.openfoodfacts_base_url,
            self.providers.usda_base_url,
            self.providers.usda_data_type,
            self.providers.page_size,
            self.http_client.timeout_secs,
            self.http_client.connect_timeout_secs,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, falling back to `default` when unset
fn parse_env<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("Invalid {key} value {raw:?}: {e}"))),
        Err(_) => Ok(default),
    }
}

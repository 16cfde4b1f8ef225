// ABOUTME: SQLite persistence for user profiles and consumption ledgers
// ABOUTME: Owns the connection pool, schema migrations and the per-table managers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

//! # Database Management
//!
//! One `SQLite` database holds every user's profile metrics and consumption
//! ledger. Tables are created on startup if they do not exist.

mod ledger;
mod profiles;

pub use ledger::LedgerManager;
pub use profiles::ProfileManager;

use crate::config::DatabaseUrl;
use sanus_core::errors::{AppError, AppResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;

/// Connections kept for a file-backed database
const FILE_POOL_SIZE: u32 = 5;

/// Database manager for profile and ledger storage
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the database and run migrations
    ///
    /// An in-memory database lives in a single pooled connection that is
    /// never recycled, so every caller sees the same data.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated
    pub async fn new(url: &DatabaseUrl) -> AppResult<Self> {
        if let DatabaseUrl::SQLite { path } = url {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::database(format!(
                        "Failed to create database directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let options = SqliteConnectOptions::from_str(&url.to_connection_string())
            .map_err(|e| AppError::database(format!("Invalid database URL {url}: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if url.is_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(FILE_POOL_SIZE)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database {url}: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        info!(database = %url, "Database ready");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Ledger operations
    #[must_use]
    pub fn ledger(&self) -> LedgerManager {
        LedgerManager::new(self.pool.clone())
    }

    /// Profile operations
    #[must_use]
    pub fn profiles(&self) -> ProfileManager {
        ProfileManager::new(self.pool.clone())
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if a schema statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_profiles().await?;
        self.migrate_ledger().await?;
        Ok(())
    }

    async fn migrate_profiles(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_profiles (
                user_id TEXT PRIMARY KEY,
                weight REAL,
                height REAL,
                date_of_birth TEXT,
                biological_sex TEXT CHECK (biological_sex IN ('xy', 'xx')),
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create user_profiles table: {e}")))?;
        Ok(())
    }

    async fn migrate_ledger(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS food_consume_days (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                date TEXT NOT NULL,
                created_at TEXT NOT NULL,
                UNIQUE (user_id, date)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::database(format!("Failed to create food_consume_days table: {e}"))
        })?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS food_consumes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                day_id INTEGER NOT NULL REFERENCES food_consume_days(id) ON DELETE CASCADE,
                source TEXT NOT NULL,
                external_id TEXT NOT NULL,
                title TEXT NOT NULL,
                kcal_per_100g TEXT NOT NULL,
                grams TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create food_consumes table: {e}")))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_food_consumes_day ON food_consumes(day_id)")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::database(format!("Failed to create food_consumes index: {e}"))
            })?;

        Ok(())
    }
}

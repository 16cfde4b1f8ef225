// ABOUTME: Database operations for the per-user consumption ledger
// ABOUTME: Atomic entry append into date buckets, export, import and clear
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

use chrono::Utc;
use sanus_core::errors::{AppError, AppResult};
use sanus_core::models::{ConsumptionEntry, DailyConsumptionBucket, LedgerDate};
use sqlx::{Row, Sqlite, SqlitePool, Transaction};
use std::collections::HashSet;
use uuid::Uuid;

/// Ledger storage
///
/// Days are stored one row per `(user, date)`; the row id records the order in
/// which each day was first logged, so the exported ledger lists days newest
/// first by descending id. Entries keep their insertion order by id.
pub struct LedgerManager {
    pool: SqlitePool,
}

impl LedgerManager {
    /// Create a new ledger manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append `entry` to the bucket of `date` in one transaction
    ///
    /// The bucket is created if the user has none for that date. Concurrent
    /// appends for the same user never overwrite each other.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn append_entry(
        &self,
        user_id: Uuid,
        date: LedgerDate,
        entry: &ConsumptionEntry,
    ) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let day_id = Self::ensure_day(&mut tx, user_id, date).await?;
        Self::insert_entry(&mut tx, day_id, entry).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit food entry: {e}")))?;
        Ok(())
    }

    /// Load the ledger of a user, newest bucket first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored date is corrupt
    pub async fn load(&self, user_id: Uuid) -> AppResult<Vec<DailyConsumptionBucket>> {
        let rows = sqlx::query(
            r"
            SELECT d.id AS day_id, d.date, c.source, c.external_id, c.title,
                   c.kcal_per_100g, c.grams
            FROM food_consume_days d
            LEFT JOIN food_consumes c ON c.day_id = d.id
            WHERE d.user_id = $1
            ORDER BY d.id DESC, c.id ASC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load ledger: {e}")))?;

        let mut buckets: Vec<DailyConsumptionBucket> = Vec::new();
        let mut current_day: Option<i64> = None;

        for row in rows {
            let day_id: i64 = row.get("day_id");
            if current_day != Some(day_id) {
                let raw_date: String = row.get("date");
                let date: LedgerDate = raw_date.parse().map_err(|e| {
                    AppError::database(format!("Corrupt ledger date {raw_date:?}: {e}"))
                })?;
                buckets.push(DailyConsumptionBucket {
                    date,
                    consumes: Vec::new(),
                });
                current_day = Some(day_id);
            }

            let source: Option<String> = row.get("source");
            if let (Some(source), Some(bucket)) = (source, buckets.last_mut()) {
                bucket.consumes.push(ConsumptionEntry {
                    source,
                    id: row.get("external_id"),
                    title: row.get("title"),
                    kcal_per_100g: row.get("kcal_per_100g"),
                    grams: row.get("grams"),
                });
            }
        }

        Ok(buckets)
    }

    /// Replace the whole ledger of a user with `buckets` (newest first)
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` if two buckets share a date, or a database
    /// error if the write fails. On error the stored ledger is unchanged.
    pub async fn replace(&self, user_id: Uuid, buckets: &[DailyConsumptionBucket]) -> AppResult<()> {
        let mut seen = HashSet::new();
        for bucket in buckets {
            if !seen.insert(bucket.date) {
                return Err(AppError::invalid_input(format!(
                    "Ledger contains more than one bucket for {}",
                    bucket.date
                ))
                .with_resource_id(bucket.date.to_string()));
            }
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        Self::delete_all(&mut tx, user_id).await?;

        // Oldest first so the newest bucket gets the highest id
        for bucket in buckets.iter().rev() {
            let day_id = Self::ensure_day(&mut tx, user_id, bucket.date).await?;
            for entry in &bucket.consumes {
                Self::insert_entry(&mut tx, day_id, entry).await?;
            }
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit ledger import: {e}")))?;
        Ok(())
    }

    /// Remove every bucket and entry of a user, returning the number of days removed
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn clear(&self, user_id: Uuid) -> AppResult<u64> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let removed = Self::delete_all(&mut tx, user_id).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit ledger clear: {e}")))?;
        Ok(removed)
    }

    async fn ensure_day(
        tx: &mut Transaction<'_, Sqlite>,
        user_id: Uuid,
        date: LedgerDate,
    ) -> AppResult<i64> {
        sqlx::query(
            r"
            INSERT INTO food_consume_days (user_id, date, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, date) DO NOTHING
            ",
        )
        .bind(user_id.to_string())
        .bind(date.to_string())
        .bind(Utc::now().to_rfc3339())
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create ledger day: {e}")))?;

        let row = sqlx::query("SELECT id FROM food_consume_days WHERE user_id = $1 AND date = $2")
            .bind(user_id.to_string())
            .bind(date.to_string())
            .fetch_one(&mut **tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to read ledger day: {e}")))?;

        Ok(row.get("id"))
    }

    async fn insert_entry(
        tx: &mut Transaction<'_, Sqlite>,
        day_id: i64,
        entry: &ConsumptionEntry,
    ) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO food_consumes (
                day_id, source, external_id, title, kcal_per_100g, grams, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(day_id)
        .bind(&entry.source)
        .bind(&entry.id)
        .bind(&entry.title)
        .bind(&entry.kcal_per_100g)
        .bind(&entry.grams)
        .bind(Utc::now().to_rfc3339())
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert food entry: {e}")))?;
        Ok(())
    }

    async fn delete_all(tx: &mut Transaction<'_, Sqlite>, user_id: Uuid) -> AppResult<u64> {
        sqlx::query(
            r"
            DELETE FROM food_consumes
            WHERE day_id IN (SELECT id FROM food_consume_days WHERE user_id = $1)
            ",
        )
        .bind(user_id.to_string())
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to delete food entries: {e}")))?;

        let result = sqlx::query("DELETE FROM food_consume_days WHERE user_id = $1")
            .bind(user_id.to_string())
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete ledger days: {e}")))?;

        Ok(result.rows_affected())
    }
}

// ABOUTME: Database operations for user body metrics
// ABOUTME: Stores weight, height, date of birth and biological sex per user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

use chrono::{NaiveDate, Utc};
use sanus_core::errors::{AppError, AppResult};
use sanus_core::models::{BiologicalSex, UserProfile};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

/// Profile metric storage; the ledger half of a profile lives in
/// [`super::LedgerManager`]
pub struct ProfileManager {
    pool: SqlitePool,
}

impl ProfileManager {
    /// Create a new profile manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Body metrics of a user, with an empty ledger
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        let row = sqlx::query(
            r"
            SELECT weight, height, date_of_birth, biological_sex
            FROM user_profiles
            WHERE user_id = $1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get profile: {e}")))?;

        Ok(row.as_ref().map(row_to_profile))
    }

    /// Create or overwrite the body metrics of a user
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn upsert(&self, user_id: Uuid, profile: &UserProfile) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO user_profiles (
                user_id, weight, height, date_of_birth, biological_sex, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id) DO UPDATE SET
                weight = excluded.weight,
                height = excluded.height,
                date_of_birth = excluded.date_of_birth,
                biological_sex = excluded.biological_sex,
                updated_at = excluded.updated_at
            ",
        )
        .bind(user_id.to_string())
        .bind(profile.weight)
        .bind(profile.height)
        .bind(profile.date_of_birth)
        .bind(profile.biological_sex.map(BiologicalSex::as_str))
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save profile: {e}")))?;
        Ok(())
    }
}

fn row_to_profile(row: &SqliteRow) -> UserProfile {
    let date_of_birth: Option<NaiveDate> = row.get("date_of_birth");
    let biological_sex: Option<String> = row.get("biological_sex");
    UserProfile {
        weight: row.get("weight"),
        height: row.get("height"),
        date_of_birth,
        biological_sex: biological_sex.as_deref().and_then(BiologicalSex::parse),
        food_consumes: Vec::new(),
    }
}

// ABOUTME: Profile business logic: body metric updates and BMR/BMI derivation
// ABOUTME: Combines stored metrics with the ledger into the full user profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

use crate::resources::ServerResources;
use crate::session::Session;
use chrono::NaiveDate;
use sanus_core::errors::{AppError, AppResult};
use sanus_core::models::UserProfile;
use sanus_intelligence::{user_bmr, BmrConfig, BodyMetrics};

/// Stored metrics of the caller, or an empty profile if none were saved
///
/// # Errors
///
/// Returns an error if the database read fails
pub async fn profile_metrics(
    resources: &ServerResources,
    session: &Session,
) -> AppResult<UserProfile> {
    Ok(resources
        .database
        .profiles()
        .get(session.user_id)
        .await?
        .unwrap_or_default())
}

/// Full profile of the caller, including the ledger
///
/// # Errors
///
/// Returns an error if the database read fails
pub async fn load_profile(resources: &ServerResources, session: &Session) -> AppResult<UserProfile> {
    let mut profile = profile_metrics(resources, session).await?;
    profile.food_consumes = resources.database.ledger().load(session.user_id).await?;
    Ok(profile)
}

/// Replace the caller's body metrics
///
/// The ledger is never touched through this operation; a `foodConsumes`
/// value in `update` is ignored.
///
/// # Errors
///
/// Returns `INVALID_INPUT` for negative or non-finite weight or height, or a
/// date of birth after `today`
pub async fn update_profile(
    resources: &ServerResources,
    session: &Session,
    update: UserProfile,
    today: NaiveDate,
) -> AppResult<UserProfile> {
    validate_metrics(&update, today)?;
    resources
        .database
        .profiles()
        .upsert(session.user_id, &update)
        .await?;
    load_profile(resources, session).await
}

/// BMI, BMI category and BMR of the caller as of `today`
///
/// # Errors
///
/// Returns an error if the database read fails
pub async fn body_metrics(
    resources: &ServerResources,
    session: &Session,
    today: NaiveDate,
) -> AppResult<BodyMetrics> {
    let profile = profile_metrics(resources, session).await?;
    Ok(BodyMetrics::for_profile(&profile, today))
}

/// BMR of the caller as of `today`, `None` when the profile is incomplete
///
/// # Errors
///
/// Returns an error if the database read fails
pub async fn caller_bmr(
    resources: &ServerResources,
    session: &Session,
    today: NaiveDate,
) -> AppResult<Option<f64>> {
    let profile = profile_metrics(resources, session).await?;
    Ok(user_bmr(&profile, today, &BmrConfig::default()))
}

fn validate_metrics(profile: &UserProfile, today: NaiveDate) -> AppResult<()> {
    for (field, value) in [("weight", profile.weight), ("height", profile.height)] {
        if let Some(value) = value {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::invalid_input(format!(
                    "{field} must be a non-negative number"
                )));
            }
        }
    }
    if let Some(date_of_birth) = profile.date_of_birth {
        if date_of_birth > today {
            return Err(AppError::invalid_input("dateOfBirth is in the future"));
        }
    }
    Ok(())
}

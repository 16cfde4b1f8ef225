// ABOUTME: Per-request caller identity supplied by the upstream auth gateway
// ABOUTME: Parses the user id header into a Session passed explicitly to services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

//! Request session
//!
//! Authentication happens in front of this service. The gateway forwards the
//! authenticated user's id in the `x-user-id` header; every handler that
//! touches user data builds a [`Session`] from it and hands it to the service
//! layer. There is no process-wide "current user".

use axum::http::HeaderMap;
use sanus_core::errors::{AppError, AppResult};
use uuid::Uuid;

/// Header carrying the authenticated user id
pub const USER_ID_HEADER: &str = "x-user-id";

/// Identity of the caller of one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    /// Authenticated user
    pub user_id: Uuid,
}

impl Session {
    /// Session for a known user
    #[must_use]
    pub const fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }

    /// Read the session from request headers
    ///
    /// # Errors
    ///
    /// Returns `AUTH_REQUIRED` when the header is absent and `AUTH_INVALID`
    /// when it is not a UUID
    pub fn from_headers(headers: &HeaderMap) -> AppResult<Self> {
        let raw = headers
            .get(USER_ID_HEADER)
            .ok_or_else(AppError::auth_required)?
            .to_str()
            .map_err(|_| AppError::auth_invalid("User id header is not valid text"))?;

        let user_id = Uuid::parse_str(raw.trim())
            .map_err(|e| AppError::auth_invalid(format!("Invalid user id: {e}")))?;
        Ok(Self { user_id })
    }
}

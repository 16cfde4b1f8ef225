// ABOUTME: HTTP middleware applied to every route
// ABOUTME: CORS policy and request tracing layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

/// CORS configuration
pub mod cors;

pub use cors::setup_cors;

use crate::resources::ServerResources;
use crate::routes;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// The full application: every route wrapped in tracing and CORS layers
pub fn build_app(resources: &Arc<ServerResources>) -> Router {
    routes::router(resources)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(setup_cors(&resources.config))
}

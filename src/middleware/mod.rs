// ABOUTME: HTTP middleware applied to every route of the nutrition API
// ABOUTME: CORS, request id propagation, request tracing, and body size limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Cross-origin policy
pub mod cors;

pub use cors::setup_cors;

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, Request};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::request_id::{
    MakeRequestUuid, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use tracing::{info_span, Span};

use crate::constants::limits;

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Span for one HTTP request, tagged with its correlation id
fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .unwrap_or_default();

    info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}

/// Wrap `router` with the shared middleware stack
///
/// Order (outermost first): request id assignment, tracing, id propagation to
/// the response, CORS, body size limit.
#[must_use]
pub fn apply(router: Router, cors_origins: &[String]) -> Router {
    let header = HeaderName::from_static(REQUEST_ID_HEADER);

    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(header.clone(), MakeRequestUuid))
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(PropagateRequestIdLayer::new(header))
            .layer(setup_cors(cors_origins))
            .layer(DefaultBodyLimit::max(limits::MAX_REQUEST_BODY_BYTES)),
    )
}

//! Request timing.

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use brandkit_core::analytics::PerformanceEvent;
use std::time::Instant;

use crate::state::AppState;

/// Record every request as a [`PerformanceEvent`], keyed by the route
/// template (`/api/design-systems/{id}`) rather than the concrete path.
pub async fn record_performance(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let started = Instant::now();
    let response = next.run(request).await;
    let elapsed = started.elapsed().as_millis() as u64;

    state.analytics.record_performance(PerformanceEvent::new(
        &method,
        &endpoint,
        response.status().as_u16(),
        elapsed,
    ));
    response
}

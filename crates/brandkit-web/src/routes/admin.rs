//! Admin route handlers.

use axum::{extract::State, Json};
use brandkit_core::analytics::Metrics;
use brandkit_core::palette::PaletteCacheStats;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiQuery, UserId};
use crate::state::AppState;

const DEFAULT_DAYS: u32 = 7;
const MAX_DAYS: u32 = 365;

#[derive(Deserialize)]
pub struct MetricsQuery {
    pub days: Option<u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResponse {
    #[serde(flatten)]
    pub metrics: Metrics,
    pub cache: PaletteCacheStats,
}

pub async fn metrics(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    ApiQuery(query): ApiQuery<MetricsQuery>,
) -> ApiResult<Json<MetricsResponse>> {
    if !state.config.is_admin(&user_id) {
        return Err(ApiError::forbidden("Admin access required"));
    }

    let days = query.days.unwrap_or(DEFAULT_DAYS).clamp(1, MAX_DAYS);
    Ok(Json(MetricsResponse {
        metrics: state.analytics.metrics(days),
        cache: state.engine.palette().cache_stats(),
    }))
}

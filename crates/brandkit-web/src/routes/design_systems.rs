//! Saved design system route handlers.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use brandkit_codegen::{export_design_system, ExportFormat};
use brandkit_core::analytics::UsageEvent;
use brandkit_core::design::{DesignSummary, DesignSystem, DesignSystemData};
use brandkit_core::palette::BrandAnalysis;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiQuery, UserId};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateDesignSystemRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub data: DesignSystemData,
    pub analysis: Option<BrandAnalysis>,
}

#[derive(Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
}

pub async fn list_design_systems(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> ApiResult<Json<Vec<DesignSummary>>> {
    let designs = state.store.list(&user_id).await?;
    Ok(Json(designs.iter().map(DesignSystem::summary).collect()))
}

pub async fn create_design_system(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    ApiJson(req): ApiJson<CreateDesignSystemRequest>,
) -> ApiResult<(StatusCode, Json<DesignSystem>)> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiError::bad_request("name is required"));
    }
    req.data.validate()?;

    let design = DesignSystem::new(&user_id, name, req.description.trim(), req.analysis, req.data);
    state.store.save(&design).await?;
    state.analytics.record_usage(UsageEvent::new(&user_id, "save"));
    tracing::info!(id = %design.id, owner = %user_id, "Saved design system");

    Ok((StatusCode::CREATED, Json(design)))
}

pub async fn get_design_system(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
) -> ApiResult<Json<DesignSystem>> {
    let design = state.store.get(&user_id, &id).await?;
    Ok(Json(design))
}

pub async fn delete_design_system(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if !state.store.delete(&user_id, &id).await? {
        return Err(ApiError::not_found(format!("Design system not found: {}", id)));
    }
    state.analytics.record_usage(UsageEvent::new(&user_id, "delete"));
    Ok(StatusCode::NO_CONTENT)
}

pub async fn export(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<ExportQuery>,
) -> ApiResult<Response> {
    let format = ExportFormat::parse(query.format.as_deref().unwrap_or("css"))?;
    let design = state.store.get(&user_id, &id).await?;
    let body = export_design_system(&design.name, &design.data, format)?;
    state
        .analytics
        .record_usage(UsageEvent::new(&user_id, &format!("export_{}", format.as_str())));

    let disposition = format!("attachment; filename=\"{}\"", format.filename());
    Ok((
        [
            (header::CONTENT_TYPE, format.mime_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

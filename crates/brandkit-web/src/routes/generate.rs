//! Generation route handlers.

use axum::{extract::State, Json};
use brandkit_codegen::{ComponentKind, GenerateRequest};
use brandkit_core::analytics::{AiEvent, UsageEvent};
use brandkit_core::color::AccessibilityResult;
use brandkit_core::design::{DesignSystem, DesignSystemData, GeneratedComponent};
use brandkit_core::palette::{AnalysisReport, AnalysisSource, BrandAnalysis, ColorSystem};
use brandkit_core::typography::{TypographyGenerator, TypographySystem};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, UserId};
use crate::state::AppState;

const MAX_DESCRIPTION_LEN: usize = 2000;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBody {
    pub description: String,
    pub personality: Option<String>,
    pub industry: Option<String>,
    #[serde(default)]
    pub save: bool,
    pub name: Option<String>,
    #[serde(default)]
    pub skip_ai: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub analysis: BrandAnalysis,
    pub analysis_source: AnalysisSource,
    #[serde(flatten)]
    pub data: DesignSystemData,
}

#[derive(Deserialize)]
pub struct PaletteBody {
    pub description: Option<String>,
    pub primary: Option<String>,
}

#[derive(Serialize)]
pub struct PaletteResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<BrandAnalysis>,
    pub palette: ColorSystem,
}

#[derive(Deserialize)]
pub struct TypographyBody {
    pub personality: String,
    pub industry: Option<String>,
    pub seed: Option<u64>,
}

#[derive(Serialize)]
pub struct TypographyResponse {
    pub success: bool,
    pub typography: TypographySystem,
}

#[derive(Deserialize)]
pub struct ComponentsBody {
    pub primary: String,
    pub personality: Option<String>,
    pub industry: Option<String>,
    pub kind: Option<String>,
}

#[derive(Serialize)]
pub struct ComponentsResponse {
    pub success: bool,
    pub components: Vec<GeneratedComponent>,
}

#[derive(Deserialize)]
pub struct AccessibilityBody {
    pub foreground: String,
    pub background: String,
}

fn validate_description(description: &str) -> ApiResult<()> {
    if description.trim().is_empty() {
        return Err(ApiError::bad_request("description is required"));
    }
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ApiError::bad_request(format!(
            "description must be at most {} characters",
            MAX_DESCRIPTION_LEN
        )));
    }
    Ok(())
}

/// Record an AI event when the classifier was called.
fn record_ai(state: &AppState, report: &AnalysisReport) {
    let (Some(latency), Some(classifier)) = (report.ai_latency, state.engine.classifier()) else {
        return;
    };
    state.analytics.record_ai(AiEvent::new(
        classifier.model(),
        report.ai_error.is_none(),
        latency.as_millis() as u64,
    ));
}

/// Default name for a saved generation: the first few words of the description.
fn default_name(description: &str) -> String {
    let words: Vec<&str> = description.split_whitespace().take(4).collect();
    words.join(" ")
}

pub async fn generate(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    ApiJson(body): ApiJson<GenerateBody>,
) -> ApiResult<Json<GenerateResponse>> {
    validate_description(&body.description)?;

    let request = GenerateRequest {
        description: body.description.trim().to_string(),
        personality: body.personality,
        industry: body.industry,
        skip_ai: body.skip_ai,
    };
    let generation = state.engine.generate(&request).await?;
    record_ai(&state, &generation.report);
    state.analytics.record_usage(UsageEvent::new(&user_id, "generate"));

    let mut id = None;
    if body.save {
        let name = body
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| default_name(&request.description));
        let design = DesignSystem::new(
            &user_id,
            name.trim(),
            &request.description,
            Some(generation.report.analysis.clone()),
            generation.data.clone(),
        );
        state.store.save(&design).await?;
        state.analytics.record_usage(UsageEvent::new(&user_id, "save"));
        id = Some(design.id);
    }

    Ok(Json(GenerateResponse {
        success: true,
        id,
        analysis_source: generation.report.source,
        analysis: generation.report.analysis,
        data: generation.data,
    }))
}

pub async fn palette(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<PaletteBody>,
) -> ApiResult<Json<PaletteResponse>> {
    if let Some(primary) = body.primary.as_deref().filter(|p| !p.trim().is_empty()) {
        let palette = state.engine.palette_from_primary(primary)?;
        return Ok(Json(PaletteResponse {
            success: true,
            analysis: None,
            palette,
        }));
    }

    let description = body
        .description
        .ok_or_else(|| ApiError::bad_request("description or primary is required"))?;
    validate_description(&description)?;

    let report = state.engine.analyze(&description, false).await;
    record_ai(&state, &report);
    let palette = state.engine.palette().generate_palette(&report.analysis)?;
    Ok(Json(PaletteResponse {
        success: true,
        analysis: Some(report.analysis),
        palette,
    }))
}

pub async fn typography(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<TypographyBody>,
) -> ApiResult<Json<TypographyResponse>> {
    let industry = body.industry.as_deref();
    let typography = match body.seed {
        Some(seed) => TypographyGenerator::with_seed(seed).generate_typography_system(&body.personality, industry),
        None => state
            .engine
            .typography()
            .generate_typography_system(&body.personality, industry),
    };
    Ok(Json(TypographyResponse {
        success: true,
        typography,
    }))
}

pub async fn components(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ComponentsBody>,
) -> ApiResult<Json<ComponentsResponse>> {
    let kind = match body.kind.as_deref() {
        Some(k) => Some(
            ComponentKind::parse(k).ok_or_else(|| ApiError::bad_request(format!("Unknown component kind: {}", k)))?,
        ),
        None => None,
    };

    let components = state.engine.components_from_primary(
        &body.primary,
        body.personality.as_deref(),
        body.industry.as_deref(),
        kind,
    )?;
    Ok(Json(ComponentsResponse {
        success: true,
        components,
    }))
}

pub async fn accessibility(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<AccessibilityBody>,
) -> ApiResult<Json<AccessibilityResult>> {
    let result = state
        .engine
        .palette()
        .check_accessibility(&body.foreground, &body.background)?;
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_name() {
        assert_eq!(default_name("Modern fintech app for Gen Z"), "Modern fintech app for");
        assert_eq!(default_name("  Acme  "), "Acme");
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description("A bakery").is_ok());
        assert!(validate_description("   ").is_err());
        assert!(validate_description(&"x".repeat(MAX_DESCRIPTION_LEN + 1)).is_err());
    }
}

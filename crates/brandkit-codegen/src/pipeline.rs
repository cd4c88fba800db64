//! End-to-end design system generation.
//!
//! brand text → analysis → palette → typography → spacing → components.

use std::sync::Arc;
use std::time::Duration;

use brandkit_core::design::{DesignSystemData, GeneratedComponent};
use brandkit_core::palette::{
    analyze_with_report, AnalysisReport, BrandAnalysis, BrandClassifier, ClaudeClassifier, ColorSystem,
    PaletteGenerator,
};
use brandkit_core::spacing::generate_spacing;
use brandkit_core::typography::{TypographyGenerator, TypographySystem};
use brandkit_core::BrandkitConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::components::{ComponentKind, ComponentRenderer};
use crate::error::CodegenResult;

/// Input to [`DesignEngine::generate`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub description: String,
    /// Overrides the personality derived from the brand tone.
    #[serde(default)]
    pub personality: Option<String>,
    /// Overrides the detected industry.
    #[serde(default)]
    pub industry: Option<String>,
    /// Skip the AI classifier even when one is configured.
    #[serde(default)]
    pub skip_ai: bool,
}

impl GenerateRequest {
    pub fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            ..Self::default()
        }
    }
}

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct Generation {
    pub report: AnalysisReport,
    pub data: DesignSystemData,
}

impl Generation {
    pub fn analysis(&self) -> &BrandAnalysis {
        &self.report.analysis
    }
}

/// Owns the generators and the optional classifier. Shared across requests.
pub struct DesignEngine {
    palette: PaletteGenerator,
    typography: TypographyGenerator,
    renderer: ComponentRenderer,
    classifier: Option<Arc<dyn BrandClassifier>>,
}

impl DesignEngine {
    /// Engine without a classifier; analysis uses the keyword tables.
    pub fn new(cache_capacity: usize) -> CodegenResult<Self> {
        Ok(Self {
            palette: PaletteGenerator::new(cache_capacity),
            typography: TypographyGenerator::new(),
            renderer: ComponentRenderer::new()?,
            classifier: None,
        })
    }

    /// Engine from configuration. A Claude classifier is attached when an API
    /// key is configured.
    pub fn from_config(config: &BrandkitConfig) -> CodegenResult<Self> {
        let mut engine = Self::new(config.cache_capacity)?;
        if let Some(key) = config.ai.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            info!(model = %config.ai.model, "AI brand classification enabled");
            let classifier = ClaudeClassifier::new(
                key,
                &config.ai.model,
                Duration::from_secs(config.ai.timeout_secs),
            )?;
            engine = engine.with_classifier(Arc::new(classifier));
        }
        Ok(engine)
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn BrandClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Replace the typography generator, e.g. with a seeded one.
    pub fn with_typography(mut self, typography: TypographyGenerator) -> Self {
        self.typography = typography;
        self
    }

    pub fn classifier(&self) -> Option<&dyn BrandClassifier> {
        self.classifier.as_deref()
    }

    pub fn palette(&self) -> &PaletteGenerator {
        &self.palette
    }

    pub fn typography(&self) -> &TypographyGenerator {
        &self.typography
    }

    pub fn renderer(&self) -> &ComponentRenderer {
        &self.renderer
    }

    /// Analyze a description. Never fails; see [`analyze_with_report`].
    pub async fn analyze(&self, description: &str, skip_ai: bool) -> AnalysisReport {
        let classifier = if skip_ai { None } else { self.classifier() };
        analyze_with_report(classifier, description).await
    }

    /// Full pipeline for a brand description.
    pub async fn generate(&self, request: &GenerateRequest) -> CodegenResult<Generation> {
        let mut report = self.analyze(&request.description, request.skip_ai).await;
        if let Some(industry) = request.industry.as_deref().filter(|s| !s.trim().is_empty()) {
            report.analysis.industry = industry.trim().to_lowercase();
        }

        let data = self.generate_from_analysis(&report.analysis, request.personality.as_deref())?;
        info!(
            industry = %report.analysis.industry,
            tone = %report.analysis.tone,
            source = ?report.source,
            primary = %data.colors.primary.s500,
            personality = %data.typography.personality,
            "Generated design system"
        );
        Ok(Generation { report, data })
    }

    /// Everything after analysis. The personality defaults to the brand tone;
    /// tones that are not personalities resolve through the industry.
    pub fn generate_from_analysis(
        &self,
        analysis: &BrandAnalysis,
        personality: Option<&str>,
    ) -> CodegenResult<DesignSystemData> {
        let colors = self.palette.generate_palette(analysis)?;
        let personality = personality.unwrap_or(analysis.tone.as_str());
        let typography = self
            .typography
            .generate_typography_system(personality, Some(analysis.industry.as_str()));
        self.assemble(colors, typography)
    }

    /// Palette around a caller-chosen primary color.
    pub fn palette_from_primary(&self, primary: &str) -> CodegenResult<ColorSystem> {
        let reasoning = format!("Built around the provided primary color {}.", primary.trim());
        Ok(self.palette.palette_from_primary(primary, &reasoning)?)
    }

    /// Components for a caller-chosen primary color, every kind or just `kind`.
    pub fn components_from_primary(
        &self,
        primary: &str,
        personality: Option<&str>,
        industry: Option<&str>,
        kind: Option<ComponentKind>,
    ) -> CodegenResult<Vec<GeneratedComponent>> {
        let colors = self.palette_from_primary(primary)?;
        let typography = self
            .typography
            .generate_typography_system(personality.unwrap_or_default(), industry);
        match kind {
            Some(kind) => self.renderer.render_kind(kind, &colors, &typography),
            None => self.renderer.generate_all(&colors, &typography),
        }
    }

    fn assemble(&self, colors: ColorSystem, typography: TypographySystem) -> CodegenResult<DesignSystemData> {
        let components = self.renderer.generate_all(&colors, &typography)?;
        debug!(components = components.len(), "Rendered components");
        Ok(DesignSystemData {
            colors,
            typography,
            spacing: generate_spacing(),
            components,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use brandkit_core::palette::{AiError, AnalysisSource};
    use brandkit_core::typography::Personality;

    struct Travel;

    #[async_trait]
    impl BrandClassifier for Travel {
        fn model(&self) -> &str {
            "test-model"
        }

        async fn classify(&self, _description: &str) -> Result<BrandAnalysis, AiError> {
            Ok(BrandAnalysis {
                industry: "travel".to_string(),
                tone: "calm".to_string(),
                emotions: vec!["calm".to_string()],
                keywords: vec!["ocean".to_string()],
            })
        }
    }

    struct Broken;

    #[async_trait]
    impl BrandClassifier for Broken {
        fn model(&self) -> &str {
            "broken"
        }

        async fn classify(&self, _description: &str) -> Result<BrandAnalysis, AiError> {
            Err(AiError::EmptyResponse)
        }
    }

    fn engine() -> DesignEngine {
        DesignEngine::new(64)
            .unwrap()
            .with_typography(TypographyGenerator::with_seed(11))
    }

    #[tokio::test]
    async fn test_keyword_pipeline() {
        let generation = engine()
            .generate(&GenerateRequest::new("Modern fintech app for Gen Z"))
            .await
            .unwrap();

        assert_eq!(generation.report.source, AnalysisSource::Local);
        assert_eq!(generation.analysis().industry, "fintech");
        assert_eq!(generation.data.colors.primary.s500, "#1E40AF");
        assert!(!generation.data.colors.reasoning.is_empty());
        // "innovative" is not a personality, so fintech → corporate.
        assert_eq!(generation.data.typography.personality, Personality::Corporate);
        assert_eq!(generation.data.components.len(), 14);
    }

    #[tokio::test]
    async fn test_overrides() {
        let request = GenerateRequest {
            description: "Modern fintech app for Gen Z".to_string(),
            personality: Some("playful".to_string()),
            industry: Some("Food".to_string()),
            skip_ai: false,
        };
        let generation = engine().generate(&request).await.unwrap();
        assert_eq!(generation.analysis().industry, "food");
        assert_eq!(generation.data.colors.primary.s500, "#DC2626");
        assert_eq!(generation.data.typography.personality, Personality::Playful);
    }

    #[tokio::test]
    async fn test_classifier_is_used_unless_skipped() {
        let engine = engine().with_classifier(Arc::new(Travel));
        let generation = engine.generate(&GenerateRequest::new("anything")).await.unwrap();
        assert_eq!(generation.report.source, AnalysisSource::Ai);
        assert_eq!(generation.data.colors.primary.s500, "#0891B2");

        let request = GenerateRequest {
            skip_ai: true,
            ..GenerateRequest::new("Modern fintech app for Gen Z")
        };
        let generation = engine.generate(&request).await.unwrap();
        assert_eq!(generation.report.source, AnalysisSource::Local);
        assert!(generation.report.ai_latency.is_none());
    }

    #[tokio::test]
    async fn test_classifier_failure_still_generates() {
        let engine = engine().with_classifier(Arc::new(Broken));
        let generation = engine
            .generate(&GenerateRequest::new("Modern fintech app for Gen Z"))
            .await
            .unwrap();
        assert_eq!(generation.report.source, AnalysisSource::Local);
        assert!(generation.report.ai_error.is_some());
        assert_eq!(generation.data.colors.primary.s500, "#1E40AF");
    }

    #[test]
    fn test_palette_from_primary() {
        let palette = engine().palette_from_primary("#0d9488").unwrap();
        assert_eq!(palette.primary.s500, "#0D9488");
        assert!(palette.reasoning.contains("#0d9488"));
        assert!(engine().palette_from_primary("teal").is_err());
    }

    #[test]
    fn test_components_from_primary() {
        let engine = engine();
        let all = engine
            .components_from_primary("#0d9488", Some("minimal"), None, None)
            .unwrap();
        assert_eq!(all.len(), 14);
        assert!(all[0].code.css.contains("#0D9488"));

        let alerts = engine
            .components_from_primary("#0d9488", None, Some("finance"), Some(ComponentKind::Alert))
            .unwrap();
        assert_eq!(alerts.len(), 4);
        assert!(alerts.iter().all(|c| c.category == "feedback"));

        assert!(engine.components_from_primary("teal", None, None, None).is_err());
    }

    #[test]
    fn test_from_config_without_key_has_no_classifier() {
        let engine = DesignEngine::from_config(&BrandkitConfig::default()).unwrap();
        assert!(engine.classifier().is_none());
    }

    #[test]
    fn test_from_config_with_key_attaches_classifier() {
        let mut config = BrandkitConfig::default();
        config.ai.api_key = Some("sk-test".to_string());
        config.ai.model = "claude-test".to_string();
        let engine = DesignEngine::from_config(&config).unwrap();
        assert_eq!(engine.classifier().map(|c| c.model()), Some("claude-test"));
    }
}

//! AI brand classification with a rule-based fallback.
//!
//! The classifier is an optional collaborator: when it is absent or fails,
//! [`analyze_brand_description`] logs the reason and falls back to the local
//! keyword tables, so callers always get an analysis.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

use super::analysis::{analyze_locally, BrandAnalysis};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Prompt asking for a strict JSON classification of a brand description.
const CLASSIFICATION_PROMPT: &str = r##"Classify the following brand description for a design system generator. Return ONLY a valid JSON object (no markdown, no explanation) with this exact structure:

{"industry": "fintech", "tone": "innovative", "emotions": ["trust", "energetic"], "keywords": ["payments", "young"]}

Rules:
- industry: one lowercase word such as technology, fintech, healthcare, education, ecommerce, food, fashion, design, engineering, realestate, travel, fitness, entertainment, environment, nonprofit, legal, or general
- tone: one lowercase word such as professional, playful, luxurious, elegant, bold, calm, friendly, minimal, innovative, or trustworthy
- emotions: 1 to 3 lowercase words
- keywords: up to 6 short lowercase words taken from or implied by the description

Brand description:
"##;

/// Failure of the AI classification step.
#[derive(Error, Debug)]
pub enum AiError {
    #[error("AI request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("AI API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("AI response had no text content")]
    EmptyResponse,

    #[error("AI response was not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("AI response is missing field '{0}'")]
    MissingField(&'static str),
}

/// External text classifier producing a [`BrandAnalysis`].
#[async_trait]
pub trait BrandClassifier: Send + Sync {
    /// Model identifier, used for logging and analytics.
    fn model(&self) -> &str;

    /// Classify a brand description.
    async fn classify(&self, description: &str) -> Result<BrandAnalysis, AiError>;
}

/// Where an analysis came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisSource {
    Ai,
    Local,
}

/// Outcome of [`analyze_with_report`].
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub analysis: BrandAnalysis,
    pub source: AnalysisSource,
    /// Set whenever the classifier was called.
    pub ai_latency: Option<Duration>,
    /// The classifier's failure, when it was called and failed.
    pub ai_error: Option<String>,
}

/// Analyze a brand description, preferring the classifier when given.
/// Never fails.
pub async fn analyze_brand_description(
    classifier: Option<&dyn BrandClassifier>,
    description: &str,
) -> BrandAnalysis {
    analyze_with_report(classifier, description).await.analysis
}

/// Like [`analyze_brand_description`], also reporting how the result was
/// obtained.
pub async fn analyze_with_report(
    classifier: Option<&dyn BrandClassifier>,
    description: &str,
) -> AnalysisReport {
    let Some(classifier) = classifier else {
        debug!("No classifier configured, using keyword analysis");
        return AnalysisReport {
            analysis: analyze_locally(description),
            source: AnalysisSource::Local,
            ai_latency: None,
            ai_error: None,
        };
    };

    let started = Instant::now();
    let result = classifier.classify(description).await;
    let latency = started.elapsed();

    match result {
        Ok(analysis) => {
            debug!(model = classifier.model(), ?latency, industry = %analysis.industry, "AI classification succeeded");
            AnalysisReport {
                analysis: analysis.normalized(),
                source: AnalysisSource::Ai,
                ai_latency: Some(latency),
                ai_error: None,
            }
        }
        Err(e) => {
            warn!(model = classifier.model(), error = %e, "AI classification failed, falling back to keyword analysis");
            AnalysisReport {
                analysis: analyze_locally(description),
                source: AnalysisSource::Local,
                ai_latency: Some(latency),
                ai_error: Some(e.to_string()),
            }
        }
    }
}

/// Classifier backed by the Anthropic Messages API.
pub struct ClaudeClassifier {
    api_key: String,
    model: String,
    api_url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

impl ClaudeClassifier {
    /// Create a new client with the given API key, model and request timeout.
    pub fn new(api_key: &str, model: &str, timeout: Duration) -> Result<Self, AiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            api_url: ANTHROPIC_API_URL.to_string(),
            client,
        })
    }

    /// Point the client at a different Messages endpoint (proxies, tests).
    pub fn with_api_url(mut self, url: &str) -> Self {
        self.api_url = url.to_string();
        self
    }
}

#[async_trait]
impl BrandClassifier for ClaudeClassifier {
    fn model(&self) -> &str {
        &self.model
    }

    async fn classify(&self, description: &str) -> Result<BrandAnalysis, AiError> {
        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: 512,
            messages: vec![Message {
                role: "user".to_string(),
                content: format!("{}{}", CLASSIFICATION_PROMPT, description.trim()),
            }],
        };

        debug!(model = %self.model, "Calling Claude for brand classification");
        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: MessagesResponse = response.json().await?;
        let text = body
            .content
            .iter()
            .find(|c| c.content_type == "text")
            .and_then(|c| c.text.as_deref())
            .ok_or(AiError::EmptyResponse)?;

        parse_analysis(text)
    }
}

/// Parse and validate a classifier reply.
pub fn parse_analysis(text: &str) -> Result<BrandAnalysis, AiError> {
    #[derive(Deserialize)]
    struct Raw {
        #[serde(default)]
        industry: Option<String>,
        #[serde(default)]
        tone: Option<String>,
        #[serde(default)]
        emotions: Vec<String>,
        #[serde(default)]
        keywords: Vec<String>,
    }

    let raw: Raw = serde_json::from_str(&extract_json(text))?;
    let industry = raw
        .industry
        .filter(|s| !s.trim().is_empty())
        .ok_or(AiError::MissingField("industry"))?;
    let tone = raw
        .tone
        .filter(|s| !s.trim().is_empty())
        .ok_or(AiError::MissingField("tone"))?;

    Ok(BrandAnalysis {
        industry,
        tone,
        emotions: raw.emotions,
        keywords: raw.keywords,
    }
    .normalized())
}

/// Extract JSON from a string that might be wrapped in markdown code blocks.
fn extract_json(text: &str) -> String {
    let trimmed = text.trim();

    if let Some(start) = trimmed.find("```json") {
        let after_marker = &trimmed[start + 7..];
        if let Some(end) = after_marker.find("```") {
            return after_marker[..end].trim().to_string();
        }
    }

    if let Some(start) = trimmed.find("```") {
        let after_marker = &trimmed[start + 3..];
        if let Some(end) = after_marker.find("```") {
            return after_marker[..end].trim().to_string();
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if end > start {
            return trimmed[start..=end].to_string();
        }
    }

    trimmed.to_string()
}

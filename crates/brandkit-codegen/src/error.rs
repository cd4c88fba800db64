//! Code generation errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Failed to render {template}: {source}")]
    Render {
        template: String,
        #[source]
        source: tera::Error,
    },

    #[error("Unknown {kind} variant: {variant}")]
    UnknownVariant { kind: String, variant: String },

    #[error("Unknown export format: {0} (expected css, scss, tailwind, json or markdown)")]
    UnknownFormat(String),

    #[error(transparent)]
    Core(#[from] brandkit_core::BrandkitError),

    #[error("Failed to set up the AI classifier: {0}")]
    Classifier(#[from] brandkit_core::palette::AiError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CodegenError {
    /// Whether the error was caused by caller input.
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::UnknownVariant { .. } | Self::UnknownFormat(_) => true,
            Self::Core(e) => e.is_client_error(),
            _ => false,
        }
    }
}

pub type CodegenResult<T> = Result<T, CodegenError>;

//! API error responses.
//!
//! Every failure is returned as `{"error": "<message>"}` with a matching
//! status code.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use brandkit_codegen::CodegenError;
use brandkit_core::BrandkitError;
use serde_json::json;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<BrandkitError> for ApiError {
    fn from(e: BrandkitError) -> Self {
        match e {
            BrandkitError::DesignSystemNotFound(_) => Self::not_found(e.to_string()),
            e if e.is_client_error() => Self::bad_request(e.to_string()),
            e => {
                tracing::error!(error = %e, "Request failed");
                Self::internal(e.to_string())
            }
        }
    }
}

impl From<CodegenError> for ApiError {
    fn from(e: CodegenError) -> Self {
        match e {
            CodegenError::Core(inner) => inner.into(),
            e if e.is_client_error() => Self::bad_request(e.to_string()),
            e => {
                tracing::error!(error = %e, "Code generation failed");
                Self::internal(e.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

//! Error → response mapping.
//!
//! One envelope for every failure: `{ success: false, error, issues? }`.
//! Validation problems are the caller's to fix (400); a missing provider
//! is infrastructure (503); a compilation failure means the sequence was
//! well-formed but unbuildable (422); proxied upstream failures are 502.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::balance::ProviderError;
use crate::compiler::builder::BuildError;
use crate::dsl::validate::ValidationFailure;

/// Request-scoped failure, mapped onto the wire envelope.
#[derive(Debug)]
pub enum ApiError {
    Validation(ValidationFailure),
    Provider(ProviderError),
    Build(BuildError),
    Proxy(String),
}

impl From<ValidationFailure> for ApiError {
    fn from(err: ValidationFailure) -> Self {
        Self::Validation(err)
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        Self::Provider(err)
    }
}

impl From<BuildError> for ApiError {
    fn from(err: BuildError) -> Self {
        Self::Build(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(failure) => {
                let body = json!({
                    "success": false,
                    "error": failure.to_string(),
                    "issues": failure.issues,
                });
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiError::Provider(err) => {
                let status = match err {
                    ProviderError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
                    ProviderError::Upstream(_) => StatusCode::BAD_GATEWAY,
                };
                let body = json!({"success": false, "error": err.to_string()});
                (status, Json(body)).into_response()
            }
            ApiError::Build(err) => {
                let body = json!({"success": false, "error": err.to_string()});
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
            ApiError::Proxy(message) => {
                let body = json!({"success": false, "error": message});
                (StatusCode::BAD_GATEWAY, Json(body)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err: ApiError = ProviderError::Unavailable { operation: "utxos" }.into();
        assert_eq!(
            err.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );

        let err: ApiError = BuildError::EmptySequence.into();
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );

        let err = ApiError::Proxy("health proxy failed".into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}

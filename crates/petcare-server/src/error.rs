//! Wire-level error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use petcare_core::CoreError;
use serde_json::json;
use thiserror::Error;

/// API error carrying the wire status; internal detail is logged, only the
/// fixed Portuguese message goes to the client.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("not found")]
    NotFound,

    #[error("validation: {0}")]
    Validation(String),

    #[error("internal: {0}")]
    Internal(String),
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Authentication => ApiError::Unauthorized,
            CoreError::Authorization(detail) => ApiError::Forbidden(detail),
            CoreError::NotFound => ApiError::NotFound,
            CoreError::Validation(detail) => ApiError::Validation(detail),
            CoreError::Store(detail) => ApiError::Internal(detail),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, Json(json!({"msg": "Acesso negado"})))
                    .into_response()
            }
            ApiError::Forbidden(detail) => {
                tracing::warn!(%detail, "write rejected by role gate");
                (
                    StatusCode::FORBIDDEN,
                    Json(json!({"msg": "Apenas veterinários podem prescrever!"})),
                )
                    .into_response()
            }
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({"msg": "Cliente/Pet não encontrado"})),
            )
                .into_response(),
            ApiError::Validation(detail) => {
                tracing::warn!(%detail, "request failed validation");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"msg": "Por favor, preencha todos os campos obrigatórios."})),
                )
                    .into_response()
            }
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Erro ao processar prescrição"})),
                )
                    .into_response()
            }
        }
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Payment signature verification failed")]
    SignatureMismatch,

    #[error("{0}")]
    NotFound(String),

    #[error("Payment provider error: {0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Upstream(err.to_string())
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub timestamp: chrono::DateTime<Utc>,
    pub request_id: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();

        let (status, error_code) = match &self {
            GatewayError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            GatewayError::SignatureMismatch => (StatusCode::BAD_REQUEST, "AUTHENTICATION_ERROR"),
            GatewayError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            GatewayError::Upstream(_) => (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_ERROR"),
            GatewayError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        // Server-side faults carry upstream detail that must not reach
        // clients in production; the full error still goes to the logs.
        let message = match &self {
            GatewayError::Upstream(_) if is_production() => {
                "Payment provider request failed".to_string()
            }
            GatewayError::Internal(_) if is_production() => {
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        let body = ErrorResponse {
            success: false,
            error: message,
            error_code: error_code.to_string(),
            timestamp: Utc::now(),
            request_id,
        };

        tracing::error!(
            error = ?self,
            error_code = error_code,
            "Request failed"
        );

        (status, Json(body)).into_response()
    }
}

fn is_production() -> bool {
    std::env::var("ENVIRONMENT")
        .map(|env| matches!(env.to_lowercase().as_str(), "production" | "prod"))
        .unwrap_or(false)
}

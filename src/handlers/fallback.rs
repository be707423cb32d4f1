use axum::{http::StatusCode, http::Uri, Json};

use crate::models::EndpointIndex;

pub const AVAILABLE_ENDPOINTS: &[&str] = &[
    "GET /",
    "POST /create-order",
    "POST /verify-payment",
    "GET /order/:id",
    "GET /payment/:id",
];

pub async fn unknown_endpoint(uri: Uri) -> (StatusCode, Json<EndpointIndex>) {
    (
        StatusCode::NOT_FOUND,
        Json(EndpointIndex {
            success: false,
            error: format!("No route for {}", uri.path()),
            endpoints: AVAILABLE_ENDPOINTS.iter().map(|e| e.to_string()).collect(),
        }),
    )
}

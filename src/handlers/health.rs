use axum::Json;
use chrono::Utc;

use crate::models::Liveness;

pub async fn liveness() -> Json<Liveness> {
    Json(Liveness {
        status: "running".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

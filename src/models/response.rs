use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    pub timestamp: DateTime<Utc>,
    pub request_id: String,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            timestamp: Utc::now(),
            request_id: uuid::Uuid::new_v4().to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Liveness {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

/// Body of the catch-all 404, pointing callers at the routes that exist.
#[derive(Serialize, Deserialize, Debug)]
pub struct EndpointIndex {
    pub success: bool,
    pub error: String,
    pub endpoints: Vec<String>,
}

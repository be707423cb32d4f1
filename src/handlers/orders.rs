use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use crate::{
    error::GatewayError,
    handlers::AppState,
    models::{ApiResponse, CreateOrderPayload, CreateOrderRequest, OrderSummary},
};

pub async fn create_order(
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<Json<ApiResponse<OrderSummary>>, GatewayError> {
    // Validation happens before any provider traffic.
    let amount = req.amount_minor()?;

    let currency = req
        .currency
        .clone()
        .unwrap_or_else(|| state.settings.default_currency.clone());
    let receipt = req.receipt.clone().unwrap_or_else(generated_receipt);

    let payload = CreateOrderPayload {
        amount,
        currency,
        receipt,
        notes: req.notes.clone(),
        payment_capture: state.settings.auto_capture as u8,
    };

    let order = state.razorpay.create_order(&payload).await?;

    Ok(Json(ApiResponse::ok(OrderSummary::from(order))))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<ApiResponse<OrderSummary>>, GatewayError> {
    let order_id = order_id.trim();
    if order_id.is_empty() {
        return Err(GatewayError::Validation("order id is required".to_string()));
    }

    let order = state.razorpay.fetch_order(order_id).await?;

    Ok(Json(ApiResponse::ok(OrderSummary::from(order))))
}

/// Timestamp-derived merchant reference; the provider treats receipts as
/// opaque, so per-call uniqueness is all that matters.
fn generated_receipt() -> String {
    format!("rcpt_{}", Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use crate::services::RazorpayClient;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    fn test_state(server: &mockito::ServerGuard) -> AppState {
        let client = RazorpayClient::new("rzp_test_key", "test_secret_key", Duration::from_secs(2))
            .unwrap()
            .with_base_url(server.url());

        AppState {
            razorpay: Arc::new(client),
            settings: Arc::new(Config {
                environment: Environment::Development,
                host: "127.0.0.1".to_string(),
                port: 0,
                razorpay_key_id: "rzp_test_key".to_string(),
                razorpay_key_secret: "test_secret_key".to_string(),
                default_currency: "INR".to_string(),
                auto_capture: true,
                allowed_origins: vec!["*".to_string()],
                provider_timeout_secs: 2,
            }),
        }
    }

    const ORDER_BODY: &str = r#"{
        "id": "order_MkWkHXbLjKEPcQ",
        "entity": "order",
        "amount": 50000,
        "currency": "INR",
        "receipt": "rcpt_1700000000000",
        "status": "created",
        "created_at": 1700000000
    }"#;

    #[tokio::test]
    async fn invalid_amount_never_reaches_provider() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", "/orders").expect(0).create_async().await;

        for amount in [json!(0), json!(-100), json!("not a number"), json!(12.5)] {
            let req = CreateOrderRequest {
                amount: Some(amount),
                ..Default::default()
            };

            let result = create_order(State(test_state(&server)), Json(req)).await;
            assert!(matches!(result, Err(GatewayError::Validation(_))));
        }

        let req = CreateOrderRequest::default();
        let result = create_order(State(test_state(&server)), Json(req)).await;
        assert!(matches!(result, Err(GatewayError::Validation(_))));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn defaults_currency_and_generates_receipt() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/orders")
            .match_body(mockito::Matcher::AllOf(vec![
                mockito::Matcher::PartialJson(json!({
                    "amount": 50000,
                    "currency": "INR",
                    "payment_capture": 1
                })),
                mockito::Matcher::Regex(r#""receipt":"rcpt_\d+""#.to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(ORDER_BODY)
            .create_async()
            .await;

        let req = CreateOrderRequest {
            amount: Some(json!(50000)),
            ..Default::default()
        };

        let response = create_order(State(test_state(&server)), Json(req))
            .await
            .unwrap();
        assert!(response.0.success);
        assert_eq!(response.0.data.amount, 50000);

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn blank_order_id_is_rejected() {
        let server = mockito::Server::new_async().await;

        let result = get_order(State(test_state(&server)), Path("   ".to_string())).await;
        assert!(matches!(result, Err(GatewayError::Validation(_))));
    }

    #[tokio::test]
    async fn lookup_normalizes_provider_order() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/orders/order_MkWkHXbLjKEPcQ")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(ORDER_BODY)
            .create_async()
            .await;

        let response = get_order(
            State(test_state(&server)),
            Path("order_MkWkHXbLjKEPcQ".to_string()),
        )
        .await
        .unwrap();

        assert_eq!(response.0.data.id, "order_MkWkHXbLjKEPcQ");
        assert_eq!(response.0.data.status, "created");
        assert_eq!(response.0.data.created_at.timestamp(), 1_700_000_000);
    }
}

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Inbound body for `POST /create-order`.
///
/// The amount is kept loose on purpose: checkout clients send it either as
/// a JSON number or as a numeric string, always denominated in the smallest
/// currency unit (paise for INR).
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CreateOrderRequest {
    pub amount: Option<serde_json::Value>,
    pub currency: Option<String>,
    pub receipt: Option<String>,
    pub notes: Option<HashMap<String, String>>,
}

impl CreateOrderRequest {
    /// Validates the amount and returns it in the smallest currency unit.
    ///
    /// Fractional values are rejected rather than truncated so the amount
    /// forwarded upstream is exactly what the client asked for.
    pub fn amount_minor(&self) -> Result<i64, GatewayError> {
        let value = self
            .amount
            .as_ref()
            .ok_or_else(|| GatewayError::Validation("amount is required".to_string()))?;

        let minor = match value {
            serde_json::Value::Number(n) => n.as_i64(),
            serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };

        match minor {
            Some(v) if v > 0 => Ok(v),
            _ => Err(GatewayError::Validation(
                "amount must be a positive integer in the smallest currency unit".to_string(),
            )),
        }
    }
}

/// Body sent to the provider's order-creation endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderPayload {
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<HashMap<String, String>>,
    pub payment_capture: u8,
}

/// Subset of the provider's order entity the gateway relays.
///
/// Unknown fields are ignored; the provider stays authoritative for the
/// full record.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub receipt: Option<String>,
    pub status: String,
    pub created_at: i64,
}

/// Normalized order fields returned to the client.
#[derive(Serialize, Deserialize, Debug)]
pub struct OrderSummary {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub receipt: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<ProviderOrder> for OrderSummary {
    fn from(order: ProviderOrder) -> Self {
        Self {
            id: order.id,
            amount: order.amount,
            currency: order.currency,
            receipt: order.receipt,
            status: order.status,
            created_at: DateTime::from_timestamp(order.created_at, 0).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request_with_amount(amount: serde_json::Value) -> CreateOrderRequest {
        CreateOrderRequest {
            amount: Some(amount),
            ..Default::default()
        }
    }

    #[test]
    fn missing_amount_is_rejected() {
        let req = CreateOrderRequest::default();
        assert!(req.amount_minor().is_err());
    }

    #[test]
    fn integer_amount_passes_through_exactly() {
        assert_eq!(request_with_amount(json!(50000)).amount_minor().unwrap(), 50000);
        assert_eq!(request_with_amount(json!(1)).amount_minor().unwrap(), 1);
    }

    #[test]
    fn numeric_string_amount_is_accepted() {
        assert_eq!(
            request_with_amount(json!("25099")).amount_minor().unwrap(),
            25099
        );
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        assert!(request_with_amount(json!(0)).amount_minor().is_err());
        assert!(request_with_amount(json!(-500)).amount_minor().is_err());
        assert!(request_with_amount(json!("-1")).amount_minor().is_err());
    }

    #[test]
    fn non_numeric_amounts_are_rejected() {
        assert!(request_with_amount(json!("ten rupees")).amount_minor().is_err());
        assert!(request_with_amount(json!(true)).amount_minor().is_err());
        assert!(request_with_amount(json!({"value": 100})).amount_minor().is_err());
    }

    #[test]
    fn fractional_amounts_are_rejected_not_truncated() {
        assert!(request_with_amount(json!(100.5)).amount_minor().is_err());
        assert!(request_with_amount(json!("100.5")).amount_minor().is_err());
    }

    #[test]
    fn provider_order_normalizes_timestamp() {
        let order = ProviderOrder {
            id: "order_MkWkHXbLjKEPcQ".to_string(),
            amount: 50000,
            currency: "INR".to_string(),
            receipt: Some("rcpt_1700000000000".to_string()),
            status: "created".to_string(),
            created_at: 1_700_000_000,
        };

        let summary = OrderSummary::from(order);
        assert_eq!(summary.id, "order_MkWkHXbLjKEPcQ");
        assert_eq!(summary.created_at.timestamp(), 1_700_000_000);
    }
}

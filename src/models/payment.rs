use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Inbound body for `POST /verify-payment`, matching the field names the
/// provider's checkout script posts back to the merchant.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct VerifyPaymentRequest {
    pub razorpay_order_id: Option<String>,
    pub razorpay_payment_id: Option<String>,
    pub razorpay_signature: Option<String>,
    /// Opaque booking metadata from the travel client, echoed back
    /// unvalidated.
    pub booking: Option<serde_json::Value>,
}

impl VerifyPaymentRequest {
    /// Returns `(order_id, payment_id, signature)` or a validation error if
    /// any of the three is missing or blank.
    pub fn require_fields(&self) -> Result<(&str, &str, &str), GatewayError> {
        let order_id = Self::non_empty(&self.razorpay_order_id, "razorpay_order_id")?;
        let payment_id = Self::non_empty(&self.razorpay_payment_id, "razorpay_payment_id")?;
        let signature = Self::non_empty(&self.razorpay_signature, "razorpay_signature")?;
        Ok((order_id, payment_id, signature))
    }

    fn non_empty<'a>(field: &'a Option<String>, name: &str) -> Result<&'a str, GatewayError> {
        match field.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(GatewayError::Validation(format!("{} is required", name))),
        }
    }
}

/// Subset of the provider's payment entity the gateway relays.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderPayment {
    pub id: String,
    pub order_id: Option<String>,
    pub amount: i64,
    pub currency: String,
    pub status: String,
    pub method: Option<String>,
    #[serde(default)]
    pub captured: bool,
    pub created_at: i64,
}

/// Normalized payment fields returned to the client.
#[derive(Serialize, Deserialize, Debug)]
pub struct PaymentSummary {
    pub id: String,
    pub order_id: Option<String>,
    pub amount: i64,
    pub currency: String,
    pub status: String,
    pub method: Option<String>,
    pub captured: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ProviderPayment> for PaymentSummary {
    fn from(payment: ProviderPayment) -> Self {
        Self {
            id: payment.id,
            order_id: payment.order_id,
            amount: payment.amount,
            currency: payment.currency,
            status: payment.status,
            method: payment.method,
            captured: payment.captured,
            created_at: DateTime::from_timestamp(payment.created_at, 0).unwrap_or_default(),
        }
    }
}

/// Result of a signature verification.
///
/// `payment` is best-effort enrichment from the provider; when that lookup
/// fails the signature check alone remains authoritative and `detail`
/// says why the summary is absent.
#[derive(Serialize, Deserialize, Debug)]
pub struct VerificationOutcome {
    pub verified: bool,
    pub order_id: String,
    pub payment_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_request_yields_all_fields() {
        let req = VerifyPaymentRequest {
            razorpay_order_id: Some("order_A".to_string()),
            razorpay_payment_id: Some("pay_B".to_string()),
            razorpay_signature: Some("deadbeef".to_string()),
            booking: None,
        };

        let (order_id, payment_id, signature) = req.require_fields().unwrap();
        assert_eq!(order_id, "order_A");
        assert_eq!(payment_id, "pay_B");
        assert_eq!(signature, "deadbeef");
    }

    #[test]
    fn missing_or_blank_fields_are_rejected() {
        let mut req = VerifyPaymentRequest {
            razorpay_order_id: Some("order_A".to_string()),
            razorpay_payment_id: Some("pay_B".to_string()),
            razorpay_signature: Some("deadbeef".to_string()),
            booking: None,
        };

        req.razorpay_signature = None;
        assert!(req.require_fields().is_err());

        req.razorpay_signature = Some("   ".to_string());
        assert!(req.require_fields().is_err());

        req.razorpay_signature = Some("deadbeef".to_string());
        req.razorpay_order_id = None;
        assert!(req.require_fields().is_err());
    }
}

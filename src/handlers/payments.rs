use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::GatewayError,
    handlers::AppState,
    models::{ApiResponse, PaymentSummary, VerificationOutcome, VerifyPaymentRequest},
    services::signature,
};

pub async fn verify_payment(
    State(state): State<AppState>,
    Json(req): Json<VerifyPaymentRequest>,
) -> Result<Json<ApiResponse<VerificationOutcome>>, GatewayError> {
    // Field checks happen before any provider traffic.
    let (order_id, payment_id, claimed) = req.require_fields()?;

    if !signature::verify_signature(
        order_id,
        payment_id,
        &state.settings.razorpay_key_secret,
        claimed,
    ) {
        tracing::warn!(
            "Signature mismatch for order {} / payment {}",
            order_id,
            payment_id
        );
        return Err(GatewayError::SignatureMismatch);
    }

    // The signature check alone is authoritative. The live payment record
    // is best-effort enrichment; losing it does not revoke authenticity.
    let (payment, detail) = match state.razorpay.fetch_payment(payment_id).await {
        Ok(payment) => (Some(PaymentSummary::from(payment)), None),
        Err(err) => {
            tracing::warn!(
                "Payment {} verified but its record could not be fetched: {}",
                payment_id,
                err
            );
            (
                None,
                Some("payment record could not be fetched from the provider".to_string()),
            )
        }
    };

    Ok(Json(ApiResponse::ok(VerificationOutcome {
        verified: true,
        order_id: order_id.to_string(),
        payment_id: payment_id.to_string(),
        payment,
        detail,
        booking: req.booking.clone(),
    })))
}

pub async fn get_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<String>,
) -> Result<Json<ApiResponse<PaymentSummary>>, GatewayError> {
    let payment_id = payment_id.trim();
    if payment_id.is_empty() {
        return Err(GatewayError::Validation(
            "payment id is required".to_string(),
        ));
    }

    let payment = state.razorpay.fetch_payment(payment_id).await?;

    Ok(Json(ApiResponse::ok(PaymentSummary::from(payment))))
}

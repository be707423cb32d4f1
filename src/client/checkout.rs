use anyhow::Result;
use reqwest::Client;
use rzp_gateway::services::signature;
use serde_json::{json, Value};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // Load configuration
    dotenvy::dotenv().ok();

    let base_url =
        std::env::var("GATEWAY_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let key_secret = std::env::var("RAZORPAY_KEY_SECRET")?;

    println!("Checkout Smoke Client");
    println!("=====================");
    println!("Gateway: {}", base_url);
    println!();

    let client = Client::new();

    println!("Step 1: Checking liveness...");
    let response = client.get(&base_url).send().await?;
    if !response.status().is_success() {
        anyhow::bail!("Liveness check failed: {}", response.status());
    }
    let liveness: Value = response.json().await?;
    println!("   [OK] {}", serde_json::to_string(&liveness)?);
    println!();

    println!("Step 2: Creating a 500.00 INR order (50000 paise)...");
    let response = client
        .post(format!("{}/create-order", base_url))
        .json(&json!({
            "amount": 50000,
            "notes": { "booking_ref": "TRV-SMOKE-1" }
        }))
        .send()
        .await?;

    if !response.status().is_success() {
        let error_text = response.text().await?;
        anyhow::bail!("Order creation failed: {}", error_text);
    }

    let body: Value = response.json().await?;
    let order_id = body["data"]["id"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("No order id in response"))?
        .to_string();
    println!("   [OK] Created order {}", order_id);
    println!("   {}", serde_json::to_string_pretty(&body["data"])?);
    println!();

    // A payment id the provider never issued; the gateway verifies the
    // HMAC first, so this still exercises both verification branches.
    let payment_id = "pay_smoke_000000001";

    println!("Step 3: Submitting a tampered signature (expecting rejection)...");
    let response = client
        .post(format!("{}/verify-payment", base_url))
        .json(&json!({
            "razorpay_order_id": order_id,
            "razorpay_payment_id": payment_id,
            "razorpay_signature": "0000000000000000000000000000000000000000000000000000000000000000"
        }))
        .send()
        .await?;

    if response.status().as_u16() != 400 {
        anyhow::bail!(
            "Expected 400 for a tampered signature, got {}",
            response.status()
        );
    }
    println!("   [OK] Tampered signature rejected");
    println!();

    println!("Step 4: Submitting a correctly signed verification...");
    let signed = signature::expected_signature(&order_id, payment_id, &key_secret);
    let response = client
        .post(format!("{}/verify-payment", base_url))
        .json(&json!({
            "razorpay_order_id": order_id,
            "razorpay_payment_id": payment_id,
            "razorpay_signature": signed,
            "booking": { "booking_ref": "TRV-SMOKE-1" }
        }))
        .send()
        .await?;

    if !response.status().is_success() {
        let error_text = response.text().await?;
        anyhow::bail!("Signed verification failed: {}", error_text);
    }

    let outcome: Value = response.json().await?;
    println!("   [OK] Signature accepted");
    println!("{}", serde_json::to_string_pretty(&outcome["data"])?);

    Ok(())
}

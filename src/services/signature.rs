//! Payment-callback signature verification.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Computes the signature the provider is expected to have sent for a
/// given order/payment pair: hex-encoded HMAC-SHA256 over
/// `"{order_id}|{payment_id}"` keyed by the shared secret.
pub fn expected_signature(order_id: &str, payment_id: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies a claimed signature using constant-time comparison, so the
/// check leaks no timing information about how much of it matched.
pub fn verify_signature(order_id: &str, payment_id: &str, secret: &str, claimed: &str) -> bool {
    let expected = expected_signature(order_id, payment_id, secret);
    expected.as_bytes().ct_eq(claimed.as_bytes()).into()
}

//! Webhook signature verification.
//!
//! Meta signs every webhook payload with HMAC-SHA256 using the app secret and
//! ships it in the `X-Hub-Signature-256` header as `sha256=<hex>`. The
//! signature is computed over the raw request body bytes, so verification has
//! to happen before JSON parsing, and the comparison must be constant-time.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Verifies the `X-Hub-Signature-256` header against the raw request body.
///
/// Returns `false` for a malformed header, undecodable hex or a signature
/// mismatch; the caller rejects the request in all three cases.
pub fn verify_signature(signature_header: &str, payload: &[u8], app_secret: &str) -> bool {
    let signature_hex = match signature_header.strip_prefix("sha256=") {
        Some(sig) => sig,
        None => {
            logfire::warn!("Invalid signature header format: expected 'sha256=' prefix");
            return false;
        }
    };

    let expected_signature = match hex::decode(signature_hex) {
        Ok(sig) => sig,
        Err(e) => {
            logfire::warn!(
                "Failed to decode signature hex: {error}",
                error = e.to_string()
            );
            return false;
        }
    };

    let mut mac = match HmacSha256::new_from_slice(app_secret.as_bytes()) {
        Ok(m) => m,
        Err(e) => {
            logfire::error!(
                "Failed to create HMAC instance: {error}",
                error = e.to_string()
            );
            return false;
        }
    };

    mac.update(payload);
    let computed_signature = mac.finalize().into_bytes();

    // Constant-time comparison to prevent timing attacks
    let is_valid: bool = computed_signature.ct_eq(&expected_signature[..]).into();

    if !is_valid {
        logfire::warn!("Webhook signature verification failed: signatures do not match");
    }

    is_valid
}

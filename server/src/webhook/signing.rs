//! HMAC-SHA256 Webhook Signatures
//!
//! LINE signs each request body with the channel secret and sends the
//! Base64-encoded digest in `x-line-signature`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the request signature.
pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// Sign a payload with HMAC-SHA256 and return the Base64-encoded signature.
pub fn sign_payload(secret: &str, payload: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(payload);
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Verify a Base64 HMAC-SHA256 signature against a payload in constant time.
pub fn verify_signature(secret: &str, payload: &[u8], signature: &str) -> bool {
    let Ok(expected) = STANDARD.decode(signature.trim()) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(payload);
    mac.verify_slice(&expected).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify() {
        let secret = "channel_secret_12345";
        let payload = br#"{"destination":"U1","events":[]}"#;
        let sig = sign_payload(secret, payload);
        assert!(verify_signature(secret, payload, &sig));
        assert!(!verify_signature("wrong_secret", payload, &sig));
        assert!(!verify_signature(secret, b"tampered payload", &sig));
    }

    #[test]
    fn rejects_garbage_signature() {
        assert!(!verify_signature("secret", b"body", "not base64!!"));
        assert!(!verify_signature("secret", b"body", ""));
    }

    #[test]
    fn signature_is_base64_of_sha256() {
        let sig = sign_payload("secret", b"body");
        // 32-byte digest = 44 Base64 chars with padding
        assert_eq!(sig.len(), 44);
        assert!(sig.ends_with('='));
    }
}

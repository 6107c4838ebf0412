use base64::{engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD}, Engine};
use serde_json::Value;
use tracing::debug;

use shared_models::auth::JwtClaims;

/// Decodes the payload segment of a JWT without checking its signature.
///
/// The result is for display only; the backend is the one validating tokens.
pub fn decode_payload(token: &str) -> Option<Value> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() < 2 {
        debug!("Token has no payload segment");
        return None;
    }

    let payload_b64 = parts[1].trim_end_matches('=');

    let bytes = match URL_SAFE_NO_PAD.decode(payload_b64) {
        Ok(bytes) => bytes,
        Err(_) => match STANDARD_NO_PAD.decode(payload_b64) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!("Failed to decode token payload: {}", e);
                return None;
            }
        },
    };

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(value) if value.is_object() => Some(value),
        Ok(_) => {
            debug!("Token payload is not a JSON object");
            None
        }
        Err(e) => {
            debug!("Failed to parse token payload: {}", e);
            None
        }
    }
}

pub fn decode_claims(token: &str) -> Option<JwtClaims> {
    decode_payload(token).and_then(|payload| serde_json::from_value(payload).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{JwtTestUtils, TestUser};

    #[test]
    fn decodes_signed_token_payload() {
        let user = TestUser::admin("admin");
        let token = JwtTestUtils::create_test_token(&user, "secret", Some(1));

        let payload = decode_payload(&token).unwrap();
        assert_eq!(payload["sub"], "admin");
        assert_eq!(payload["role"], "ADMIN");

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("admin"));
        assert!(claims.exp.unwrap() > claims.iat.unwrap());
    }

    #[test]
    fn malformed_tokens_yield_none() {
        assert!(decode_payload("not-a-jwt").is_none());
        assert!(decode_payload(&JwtTestUtils::create_malformed_token()).is_none());
        assert!(decode_payload("a.bnVsbA.c").is_none()); // "null"
    }

    #[test]
    fn accepts_padded_segments() {
        // {"sub":"x"} with standard padding
        let token = "eyJhbGciOiJub25lIn0.eyJzdWIiOiJ4In0=.sig";
        assert_eq!(decode_payload(token).unwrap()["sub"], "x");
    }
}

//! HMAC-SHA512 signature generation for ICE3X API authentication.
//!
//! Every authenticated request is signed as:
//! ```text
//! base64(HMAC-SHA512(path + "\n" + timestamp + "\n" + json_body, base64_decode(private_key)))
//! ```
//!
//! The result is sent in the `signature` header, next to the `apikey` and
//! `timestamp` headers.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::auth::Credentials;
use crate::error::Ice3xError;

type HmacSha512 = Hmac<Sha512>;

/// Build the message that gets signed for a request.
///
/// `path` is the request path only (e.g. `/order/trade/history`), not the
/// full URL, and `json_body` must be byte-identical to the body sent.
pub fn signing_message(path: &str, timestamp: u64, json_body: &str) -> String {
    format!("{path}\n{timestamp}\n{json_body}")
}

/// Sign an arbitrary message with a base64 encoded private key.
///
/// # Returns
///
/// Base64-encoded HMAC-SHA512 signature.
pub fn sign_message(private_key: &str, message: &str) -> Result<String, Ice3xError> {
    let key = BASE64
        .decode(private_key)
        .map_err(|_| Ice3xError::Auth("Private key must be valid base64.".to_string()))?;

    let mut hmac = HmacSha512::new_from_slice(&key)
        .map_err(|e| Ice3xError::Auth(format!("Invalid HMAC key: {e}")))?;
    hmac.update(message.as_bytes());

    Ok(BASE64.encode(hmac.finalize().into_bytes()))
}

/// Sign a request for the ICE3X API.
///
/// # Arguments
///
/// * `credentials` - API credentials containing the private key
/// * `path` - The API endpoint path (e.g., "/order/trade/history")
/// * `timestamp` - Unix epoch milliseconds, also sent in the `timestamp` header
/// * `json_body` - The JSON POST body
///
/// # Example
///
/// ```rust,no_run
/// use ice3x_api_client::auth::{Credentials, sign_request};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("api_key", "c2VjcmV0"); // base64 of "secret"
/// let signature = sign_request(
///     &credentials,
///     "/order/trade/history",
///     1700000000000,
///     r#"{"currency":"ZAR","instrument":"BTC","limit":10,"since":1}"#,
/// )?;
/// # Ok(())
/// # }
/// ```
pub fn sign_request(
    credentials: &Credentials,
    path: &str,
    timestamp: u64,
    json_body: &str,
) -> Result<String, Ice3xError> {
    let message = signing_message(path, timestamp, json_body);
    sign_message(credentials.expose_secret(), &message)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATH: &str = "/order/trade/history";
    const TIMESTAMP: u64 = 1_700_000_000_000;
    const BODY: &str = r#"{"currency":"ZAR","instrument":"BTC","limit":10,"since":1}"#;

    fn credentials() -> Credentials {
        Credentials::new("K", BASE64.encode("secret"))
    }

    #[test]
    fn test_signing_message_layout() {
        assert_eq!(
            signing_message(PATH, TIMESTAMP, BODY),
            "/order/trade/history\n1700000000000\n{\"currency\":\"ZAR\",\"instrument\":\"BTC\",\"limit\":10,\"since\":1}"
        );
    }

    #[test]
    fn test_known_signature() {
        let signature = sign_request(&credentials(), PATH, TIMESTAMP, BODY).unwrap();
        assert_eq!(
            signature,
            "Uto5D5tP3w+iPn9tqatOGlC0mIZSahGOZ2SF/2lPOI+bks9YlqMJwM/HxodpdyBsamT/OZH6igaxDLYhqoVGyA=="
        );
    }

    #[test]
    fn test_signature_shape() {
        let signature = sign_request(&credentials(), PATH, TIMESTAMP, BODY).unwrap();
        // HMAC-SHA512 produces 64 bytes, base64 encoded = 88 chars (with padding)
        assert_eq!(signature.len(), 88);
        assert_eq!(BASE64.decode(&signature).unwrap().len(), 64);
    }

    #[test]
    fn test_signature_consistency() {
        let sig1 = sign_request(&credentials(), PATH, TIMESTAMP, BODY).unwrap();
        let sig2 = sign_request(&credentials(), PATH, TIMESTAMP, BODY).unwrap();
        assert_eq!(sig1, sig2);
    }

    #[test]
    fn test_signature_changes_with_timestamp() {
        let sig1 = sign_request(&credentials(), PATH, TIMESTAMP, BODY).unwrap();
        let sig2 = sign_request(&credentials(), PATH, TIMESTAMP + 1, BODY).unwrap();
        assert_ne!(sig1, sig2);
    }

    #[test]
    fn test_signature_changes_with_path() {
        let sig1 = sign_request(&credentials(), PATH, TIMESTAMP, BODY).unwrap();
        let sig2 = sign_request(&credentials(), "/order/trade/historz", TIMESTAMP, BODY).unwrap();
        assert_ne!(sig1, sig2);
    }

    #[test]
    fn test_signature_changes_with_any_body_byte() {
        let original = sign_request(&credentials(), PATH, TIMESTAMP, BODY).unwrap();
        let bytes = BODY.as_bytes();
        for i in 0..bytes.len() {
            let mut altered = bytes.to_vec();
            altered[i] = if altered[i] == b'x' { b'y' } else { b'x' };
            let altered = String::from_utf8(altered).unwrap();
            let signature = sign_request(&credentials(), PATH, TIMESTAMP, &altered).unwrap();
            assert_ne!(signature, original, "byte {i} did not affect the signature");
        }
    }

    #[test]
    fn test_invalid_base64_key() {
        let credentials = Credentials::new("K", "not base64!!");
        let err = sign_request(&credentials, PATH, TIMESTAMP, BODY).unwrap_err();
        assert!(matches!(err, Ice3xError::Auth(_)));
    }
}

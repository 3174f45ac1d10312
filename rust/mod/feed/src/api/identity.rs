use axum::http::{HeaderMap, header};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::model::UserId;

/// Decode the caller identity from `Authorization: Bearer <credential>`.
///
/// The credential is a base64-encoded JSON blob `{"id": n}` — an unsigned
/// stand-in for a real token scheme; swapping in signed tokens only means
/// replacing this function. Anything malformed (missing header, bad
/// base64, non-object, non-numeric id) yields `None`, which never matches
/// a real user id, so every authorization check fails closed.
pub fn identity(headers: &HeaderMap) -> Option<UserId> {
    let token = headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?;
    let bytes = STANDARD.decode(token).ok()?;
    let value: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    value.get("id")?.as_u64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(auth: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(auth).unwrap());
        headers
    }

    fn bearer(json: &str) -> String {
        format!("Bearer {}", STANDARD.encode(json))
    }

    #[test]
    fn test_valid_credential() {
        let headers = headers_with(&bearer(r#"{"id": 4}"#));
        assert_eq!(identity(&headers), Some(4));
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(identity(&HeaderMap::new()), None);
    }

    #[test]
    fn test_malformed_credentials_fail_closed() {
        // Not base64.
        assert_eq!(identity(&headers_with("Bearer $$$")), None);
        // Base64 but not JSON.
        let headers = headers_with(&format!("Bearer {}", STANDARD.encode("not json")));
        assert_eq!(identity(&headers), None);
        // JSON but id is not a number.
        assert_eq!(identity(&headers_with(&bearer(r#"{"id": "4"}"#))), None);
        // No Bearer prefix.
        assert_eq!(identity(&headers_with(&STANDARD.encode(r#"{"id": 4}"#))), None);
    }
}

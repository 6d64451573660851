//! Response accessors
//!
//! Stateless helpers for reading status, headers and body out of an
//! `HttpResponse`.

use super::transport::HttpResponse;
use crate::error::Result;
use crate::types::JsonValue;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

/// Status code expected from a successful call unless stated otherwise
pub const DEFAULT_SUCCESS_STATUS: u16 = 200;

/// Check the response status against an expected code
pub fn was_successful(response: &HttpResponse, expected_status: u16) -> bool {
    response.status.as_u16() == expected_status
}

/// Numeric status code
pub fn status_code(response: &HttpResponse) -> u16 {
    response.status.as_u16()
}

/// All response headers
pub fn headers(response: &HttpResponse) -> &HeaderMap {
    &response.headers
}

/// A single header value, if present and valid UTF-8
pub fn header<'a>(response: &'a HttpResponse, name: &str) -> Option<&'a str> {
    response.headers.get(name).and_then(|v| v.to_str().ok())
}

/// Raw body as text
pub fn content(response: &HttpResponse) -> String {
    String::from_utf8_lossy(&response.body).into_owned()
}

/// JSON-decoded body
pub fn decode_content(response: &HttpResponse) -> Result<JsonValue> {
    Ok(serde_json::from_slice(&response.body)?)
}

/// JSON-decoded body into a concrete type
pub fn decode_content_as<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
    Ok(serde_json::from_slice(&response.body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn test_was_successful() {
        let ok = HttpResponse::new(200, "{}");
        let created = HttpResponse::new(201, "{}");

        assert!(was_successful(&ok, DEFAULT_SUCCESS_STATUS));
        assert!(!was_successful(&created, DEFAULT_SUCCESS_STATUS));
        assert!(was_successful(&created, 201));
    }

    #[test]
    fn test_status_and_headers() {
        let response = HttpResponse::new(404, "missing").with_header("X-Request-Id", "abc");

        assert_eq!(status_code(&response), 404);
        assert_eq!(header(&response, "x-request-id"), Some("abc"));
        assert_eq!(headers(&response).len(), 1);
        assert_eq!(content(&response), "missing");
    }

    #[test]
    fn test_decode_content() {
        let response = HttpResponse::json(200, &json!({"user_id": "auth|1"}));
        let value = decode_content(&response).unwrap();
        assert_eq!(value["user_id"], "auth|1");
    }

    #[test]
    fn test_decode_content_invalid_json() {
        let response = HttpResponse::new(200, "not json");
        assert!(decode_content(&response).is_err());
    }

    #[test]
    fn test_decode_content_as() {
        #[derive(Deserialize)]
        struct User {
            name: String,
        }

        let response = HttpResponse::json(200, &json!({"name": "Alice"}));
        let user: User = decode_content_as(&response).unwrap();
        assert_eq!(user.name, "Alice");
    }
}

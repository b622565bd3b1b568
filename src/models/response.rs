//! HTTP response data models.
//!
//! This module defines the structures used to hand a completed response back
//! to callers: status information, headers, the raw body and timing metrics.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Timing breakdown for a single request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestTiming {
    /// Time from request start until the request was handed to reqwest.
    ///
    /// This is URL validation and request building only, usually close to
    /// zero.
    pub connect: Duration,

    /// Request handed to reqwest until response headers arrived.
    ///
    /// reqwest does not expose DNS, TCP or TLS phases separately, so they are
    /// counted here together with server time.
    pub first_byte: Duration,

    /// Time spent reading the response body.
    pub download: Duration,
}

impl RequestTiming {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of all phases.
    pub fn total(&self) -> Duration {
        self.connect + self.first_byte + self.download
    }
}

/// Represents an HTTP response received from a server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpResponse {
    /// HTTP status code (e.g., 200, 404, 500).
    pub status_code: u16,

    /// Canonical reason phrase, or "Unknown".
    pub status_text: String,

    /// Response headers. Values that are not valid UTF-8 are dropped.
    pub headers: HashMap<String, String>,

    /// Response body as raw bytes.
    pub body: Vec<u8>,

    /// Total request duration from start to completion.
    pub duration: Duration,

    pub timing: RequestTiming,

    /// Headers plus body, in bytes.
    pub size: usize,
}

impl HttpResponse {
    /// Creates a new HttpResponse with the given status code and text.
    pub fn new(status_code: u16, status_text: String) -> Self {
        Self {
            status_code,
            status_text,
            headers: HashMap::new(),
            body: Vec::new(),
            duration: Duration::from_secs(0),
            timing: RequestTiming::new(),
            size: 0,
        }
    }

    /// Checks if the response status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Gets the Content-Type header value if present.
    ///
    /// Header names are matched case-insensitively.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.as_str())
    }

    /// Attempts to parse the response body as UTF-8 text.
    pub fn body_as_string(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.clone())
    }

    /// Decodes the body as JSON into `T`.
    ///
    /// The Content-Type header is not consulted; a body that parses is
    /// accepted whatever the server claims it is.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Adds a header to the response.
    pub fn add_header(&mut self, name: String, value: String) {
        self.headers.insert(name, value);
    }

    /// Sets the response body and recomputes `size`.
    pub fn set_body(&mut self, body: Vec<u8>) {
        self.size = self.calculate_headers_size() + body.len();
        self.body = body;
    }

    fn calculate_headers_size(&self) -> usize {
        self.headers
            .iter()
            .map(|(k, v)| k.len() + v.len() + 4) // ": " and "\r\n"
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Todo;

    #[test]
    fn test_request_timing_total() {
        let timing = RequestTiming {
            connect: Duration::from_millis(30),
            first_byte: Duration::from_millis(100),
            download: Duration::from_millis(50),
        };
        assert_eq!(timing.total(), Duration::from_millis(180));
        assert_eq!(RequestTiming::new().total(), Duration::ZERO);
    }

    #[test]
    fn test_is_success() {
        assert!(HttpResponse::new(200, "OK".to_string()).is_success());
        assert!(HttpResponse::new(204, "No Content".to_string()).is_success());
        assert!(!HttpResponse::new(301, "Moved".to_string()).is_success());
        assert!(!HttpResponse::new(404, "Not Found".to_string()).is_success());
    }

    #[test]
    fn test_content_type_case_insensitive() {
        let mut response = HttpResponse::new(200, "OK".to_string());
        response.add_header(
            "content-type".to_string(),
            "application/json; charset=utf-8".to_string(),
        );
        assert_eq!(
            response.content_type(),
            Some("application/json; charset=utf-8")
        );
    }

    #[test]
    fn test_set_body_updates_size() {
        let mut response = HttpResponse::new(200, "OK".to_string());
        response.add_header("X-A".to_string(), "b".to_string());
        response.set_body(b"hello".to_vec());
        // "X-A" + "b" + 4 separators + 5 body bytes
        assert_eq!(response.size, 13);
    }

    #[test]
    fn test_json_decodes_body() {
        let mut response = HttpResponse::new(200, "OK".to_string());
        response.set_body(br#"{"userId":1,"id":2,"title":"t","completed":true}"#.to_vec());

        let todo: Todo = response.json().unwrap();
        assert_eq!(todo, Todo::new(1, 2, "t", true));
    }

    #[test]
    fn test_json_rejects_malformed_body() {
        let mut response = HttpResponse::new(200, "OK".to_string());
        response.set_body(b"<html>oops</html>".to_vec());
        assert!(response.json::<serde_json::Value>().is_err());
    }
}

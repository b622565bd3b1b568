//! HTTP request execution error types.

use thiserror::Error;

/// Errors that can occur while executing a request or decoding its body.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Connection failures, DNS errors and other network-level issues.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The request took longer than the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Only HTTP and HTTPS are supported.
    #[error("Unsupported protocol: {0}")]
    UnsupportedProtocol(String),

    /// Certificate validation or handshake failure.
    #[error("TLS/SSL error: {0}")]
    TlsError(String),

    /// The client or request could not be constructed.
    #[error("Request build error: {0}")]
    BuildError(String),

    /// Non-2xx status, only raised when status checking is enabled.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The response body is not valid JSON for the requested type.
    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl RequestError {
    /// Builds a [`RequestError::Decode`] from a serde error.
    pub fn decode(url: impl Into<String>, err: serde_json::Error) -> Self {
        RequestError::Decode {
            url: url.into(),
            message: err.to_string(),
        }
    }
}

/// Maps reqwest's error kinds onto our variants.
///
/// The TLS check only looks at the `source()` chain: the top-level message
/// embeds the request URL, which may itself contain "SSL" or "TLS".
impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return RequestError::Timeout;
        }
        if err.is_builder() {
            return RequestError::BuildError(err.to_string());
        }

        let tls_failure = source_chain_mentions_tls(&err);
        let message = err.to_string();
        if tls_failure {
            RequestError::TlsError(message)
        } else if err.is_connect() {
            RequestError::NetworkError(format!("Connection failed: {}", message))
        } else {
            RequestError::NetworkError(message)
        }
    }
}

fn source_chain_mentions_tls(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = err.source();
    while let Some(cause) = current {
        let text = cause.to_string();
        if text.contains("certificate") || text.contains("TLS") || text.contains("SSL") {
            return true;
        }
        current = cause.source();
    }
    false
}

impl From<url::ParseError> for RequestError {
    fn from(err: url::ParseError) -> Self {
        RequestError::InvalidUrl(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let network_err = RequestError::NetworkError("Connection refused".to_string());
        assert_eq!(network_err.to_string(), "Network error: Connection refused");

        assert_eq!(RequestError::Timeout.to_string(), "Request timed out");

        let status_err = RequestError::Status {
            status: 404,
            url: "http://x/todos/9".to_string(),
        };
        assert_eq!(status_err.to_string(), "HTTP 404 from http://x/todos/9");
    }

    #[test]
    fn test_decode_helper() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = RequestError::decode("http://x/todos/1", serde_err);
        match err {
            RequestError::Decode { url, message } => {
                assert_eq!(url, "http://x/todos/1");
                assert!(!message.is_empty());
            }
            other => panic!("Expected Decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_url_parse_error() {
        let err: RequestError = url::Url::parse("::nope").unwrap_err().into();
        assert!(matches!(err, RequestError::InvalidUrl(_)));
    }

    #[derive(Debug)]
    struct Layer(&'static str, Option<Box<Layer>>);

    impl std::fmt::Display for Layer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.0)
        }
    }

    impl std::error::Error for Layer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            self.1.as_deref().map(|e| e as &(dyn std::error::Error + 'static))
        }
    }

    #[test]
    fn test_tls_detection_ignores_top_level_message() {
        let refused = Layer(
            "error sending request for url (http://127.0.0.1:1/SSL/1)",
            Some(Box::new(Layer("tcp connect error: Connection refused", None))),
        );
        assert!(!source_chain_mentions_tls(&refused));

        let handshake = Layer(
            "error sending request for url (https://example.com/1)",
            Some(Box::new(Layer(
                "client error (Connect)",
                Some(Box::new(Layer("invalid peer certificate: UnknownIssuer", None))),
            ))),
        );
        assert!(source_chain_mentions_tls(&handshake));
    }

    #[test]
    fn test_error_is_error_trait() {
        let err: &dyn std::error::Error = &RequestError::Timeout;
        assert_eq!(format!("{}", err), "Request timed out");
    }
}

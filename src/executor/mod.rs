//! HTTP request executor.
//!
//! Wraps a single `reqwest::Client` configured from an [`ExecutionConfig`].
//! The client holds a connection pool, so one executor should be shared by
//! every request a caller makes; cloning is cheap.

pub mod config;
pub mod error;
pub mod timing;

pub use config::ExecutionConfig;
pub use error::RequestError;
pub use timing::{format_timing_compact, TimingCheckpoints};

use crate::models::request::HttpRequest;
use crate::models::response::HttpResponse;
use std::collections::HashMap;

/// Executes HTTP requests with a shared, preconfigured client.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: reqwest::Client,
    config: ExecutionConfig,
}

impl HttpExecutor {
    /// Builds the underlying client.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use todo_fetch::executor::{ExecutionConfig, HttpExecutor};
    /// use todo_fetch::models::HttpRequest;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let executor = HttpExecutor::new(&ExecutionConfig::default())?;
    /// let response = executor
    ///     .execute(&HttpRequest::get("https://jsonplaceholder.typicode.com/todos/1"))
    ///     .await?;
    /// println!("Status: {}", response.status_code);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: &ExecutionConfig) -> Result<Self, RequestError> {
        let redirect_policy = if config.follow_redirects {
            reqwest::redirect::Policy::limited(config.max_redirects as usize)
        } else {
            reqwest::redirect::Policy::none()
        };

        let client = reqwest::Client::builder()
            .timeout(config.timeout_duration())
            .redirect(redirect_policy)
            .danger_accept_invalid_certs(!config.validate_ssl)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| RequestError::BuildError(e.to_string()))?;

        if !config.validate_ssl {
            log::warn!("TLS certificate validation is disabled");
        }

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Executes a request and returns the complete response.
    ///
    /// Every status code is returned as a response; only transport failures
    /// and invalid URLs are errors.
    pub async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, RequestError> {
        let request_id = uuid::Uuid::new_v4();
        let mut checkpoints = TimingCheckpoints::new();

        validate_url(&request.url)?;

        let mut req_builder = self.client.request(request.method.into(), &request.url);
        for (name, value) in &request.headers {
            req_builder = req_builder.header(name, value);
        }

        log::debug!("[{}] {} {}", request_id, request.method, request.url);
        checkpoints.mark_request_sent();

        let response = req_builder.send().await.map_err(|e| {
            log::debug!("[{}] request failed: {}", request_id, e);
            RequestError::from(e)
        })?;

        checkpoints.mark_first_byte_received();

        let status = response.status();
        let status_code = status.as_u16();
        let status_text = status.canonical_reason().unwrap_or("Unknown").to_string();

        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(value_str) = value.to_str() {
                headers.insert(name.as_str().to_string(), value_str.to_string());
            }
        }

        let body = response.bytes().await.map_err(RequestError::from)?.to_vec();

        checkpoints.mark_response_complete();
        let timing = checkpoints.to_request_timing();

        log::debug!(
            "[{}] {} {} in {}",
            request_id,
            status_code,
            request.url,
            format_timing_compact(&timing)
        );

        let mut http_response = HttpResponse::new(status_code, status_text);
        http_response.headers = headers;
        http_response.set_body(body);
        http_response.duration = timing.total();
        http_response.timing = timing;

        Ok(http_response)
    }
}

/// Validates that the URL is well-formed and uses HTTP or HTTPS.
pub fn validate_url(url: &str) -> Result<(), RequestError> {
    let parsed = url::Url::parse(url)?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(RequestError::UnsupportedProtocol(format!(
            "Only HTTP and HTTPS are supported, got: {}",
            scheme
        )));
    }

    Ok(())
}

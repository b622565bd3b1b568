//! Fetching JSON resources by identifier.
//!
//! A [`TodoClient`] turns identifiers into request targets by appending them
//! to a fixed base path, and decodes each response body as JSON. The
//! centrepiece is [`TodoClient::fetch_pair`], which fetches two resources and
//! returns both bodies in input order.

use crate::config::FetchConfig;
use crate::executor::{ExecutionConfig, HttpExecutor, RequestError};
use crate::models::{HttpRequest, HttpResponse, Todo};
use serde::de::DeserializeOwned;
use std::fmt::Display;

/// Builds a request target by appending `id` to `base`.
///
/// This is plain concatenation: no separator is inserted and nothing is
/// escaped, so `target_url("https://h/todos/", 5)` is `https://h/todos/5`.
pub fn target_url(base: &str, id: impl Display) -> String {
    format!("{}{}", base, id)
}

/// Client for a JSON resource collection rooted at a base URL.
#[derive(Debug, Clone)]
pub struct TodoClient {
    executor: HttpExecutor,
    base_url: String,
    concurrent_requests: bool,
    error_for_status: bool,
}

impl TodoClient {
    /// Creates a client with sequential requests and no status checking.
    pub fn new(executor: HttpExecutor, base_url: impl Into<String>) -> Self {
        Self {
            executor,
            base_url: base_url.into(),
            concurrent_requests: false,
            error_for_status: false,
        }
    }

    /// Creates a client and its executor from a [`FetchConfig`].
    pub fn from_config(config: &FetchConfig) -> Result<Self, RequestError> {
        let executor = HttpExecutor::new(&ExecutionConfig::from(config))?;
        Ok(Self::new(executor, config.base_url.clone())
            .concurrent_requests(config.concurrent_requests)
            .error_for_status(config.error_for_status))
    }

    /// Issue both requests of a pair at the same time.
    pub fn concurrent_requests(mut self, enabled: bool) -> Self {
        self.concurrent_requests = enabled;
        self
    }

    /// Fail with [`RequestError::Status`] on non-2xx responses.
    pub fn error_for_status(mut self, enabled: bool) -> Self {
        self.error_for_status = enabled;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Target URL for `id` under this client's base.
    pub fn url_for(&self, id: impl Display) -> String {
        target_url(&self.base_url, id)
    }

    /// Fetches `id` and decodes the body as `T`.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        id: impl Display,
    ) -> Result<T, RequestError> {
        let url = self.url_for(id);
        let response = self.send(&url).await?;
        decode(&url, &response)
    }

    /// Fetches two resources and returns their decoded bodies in input order.
    ///
    /// By default the second request is sent only after the first response has
    /// arrived; with [`concurrent_requests`](Self::concurrent_requests) both are
    /// in flight together. Body decoding always happens for both responses
    /// together. The first error encountered is returned unchanged.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use todo_fetch::config::FetchConfig;
    /// use todo_fetch::fetch::TodoClient;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = TodoClient::from_config(&FetchConfig::default())?;
    /// let (first, second): (serde_json::Value, serde_json::Value) =
    ///     client.fetch_pair(5, 4).await?;
    /// println!("{} / {}", first["title"], second["title"]);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn fetch_pair<A, B, T>(&self, id: A, id2: B) -> Result<(T, T), RequestError>
    where
        A: Display,
        B: Display,
        T: DeserializeOwned,
    {
        let url1 = self.url_for(id);
        let url2 = self.url_for(id2);

        let (r1, r2) = if self.concurrent_requests {
            log::debug!("Fetching {} and {} concurrently", url1, url2);
            tokio::try_join!(self.send(&url1), self.send(&url2))?
        } else {
            log::debug!("Fetching {} then {}", url1, url2);
            let r1 = self.send(&url1).await?;
            let r2 = self.send(&url2).await?;
            (r1, r2)
        };

        tokio::try_join!(
            async { decode::<T>(&url1, &r1) },
            async { decode::<T>(&url2, &r2) }
        )
    }

    /// Typed form of [`fetch_pair`](Self::fetch_pair) for [`Todo`] items.
    pub async fn fetch_todo_pair(
        &self,
        id: impl Display,
        id2: impl Display,
    ) -> Result<(Todo, Todo), RequestError> {
        self.fetch_pair(id, id2).await
    }

    async fn send(&self, url: &str) -> Result<HttpResponse, RequestError> {
        let response = self
            .executor
            .execute(&HttpRequest::get(url).with_header("Accept", "application/json"))
            .await?;

        if self.error_for_status && !response.is_success() {
            return Err(RequestError::Status {
                status: response.status_code,
                url: url.to_string(),
            });
        }

        if !response.is_success() {
            log::info!(
                "{} returned {} {}; decoding body anyway",
                url,
                response.status_code,
                response.status_text
            );
        }

        Ok(response)
    }
}

fn decode<T: DeserializeOwned>(url: &str, response: &HttpResponse) -> Result<T, RequestError> {
    response.json().map_err(|e| RequestError::decode(url, e))
}

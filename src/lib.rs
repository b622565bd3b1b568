//! todo-fetch
//!
//! Fetches JSON resources that live under a common base URL and joins the
//! results. The core operation takes two identifiers, requests
//! `<base><id>` and `<base><id2>`, decodes both bodies as JSON and returns
//! them as an ordered pair.
//!
//! # Architecture
//!
//! - **models**: request/response structures and the [`Todo`](models::Todo) resource
//! - **config**: user settings, validation and the global configuration
//! - **executor**: HTTP execution on top of reqwest, error taxonomy, timing
//! - **fetch**: identifier-to-URL construction and the fetch-and-join routines
//! - **runtime**: a table of named async exports callable with JSON arguments
//!
//! # Usage
//!
//! ```no_run
//! use todo_fetch::config::FetchConfig;
//! use todo_fetch::fetch::TodoClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = TodoClient::from_config(&FetchConfig::default())?;
//! let (a, b) = client.fetch_todo_pair(5, 4).await?;
//! println!("{} / {}", a.title, b.title);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod executor;
pub mod fetch;
pub mod models;
pub mod runtime;

pub use config::FetchConfig;
pub use executor::{ExecutionConfig, HttpExecutor, RequestError};
pub use fetch::{target_url, TodoClient};
pub use models::Todo;
pub use runtime::{Runtime, RuntimeError};

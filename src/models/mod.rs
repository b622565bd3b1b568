//! Data models for HTTP requests, responses and the remote todo resource.

pub mod request;
pub mod response;
pub mod todo;

pub use request::{HttpMethod, HttpRequest};
pub use response::{HttpResponse, RequestTiming};
pub use todo::Todo;

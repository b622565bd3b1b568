//! Export runtime integration tests against a local mock server.

use serde::Deserialize;
use serde_json::{json, Value};
use todo_fetch::config::FetchConfig;
use todo_fetch::fetch::TodoClient;
use todo_fetch::runtime::{Runtime, RuntimeError};
use todo_fetch::RequestError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    user_id: i64,
    id: i64,
    title: String,
    completed: bool,
}

async fn runtime_for(server: &MockServer) -> Runtime {
    for id in [4, 5] {
        Mock::given(method("GET"))
            .and(path(format!("/todos/{}", id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "userId": 1,
                "id": id,
                "title": format!("item {}", id),
                "completed": false
            })))
            .mount(server)
            .await;
    }

    let config = FetchConfig {
        base_url: format!("{}/todos/", server.uri()),
        ..Default::default()
    };
    Runtime::new(TodoClient::from_config(&config).unwrap())
}

#[tokio::test]
async fn test_hello_into_fixed_array() {
    let server = MockServer::start().await;
    let runtime = runtime_for(&server).await;

    let value: [ApiResponse; 2] = runtime.call("hello", &[5, 4]).await.unwrap();
    assert_eq!(value[0].id, 5);
    assert_eq!(value[1].id, 4);
    assert_eq!(value[0].title, "item 5");
    assert_eq!(value[1].user_id, 1);
    assert!(!value[1].completed);
}

#[tokio::test]
async fn test_hello_with_string_ids() {
    let server = MockServer::start().await;
    let runtime = runtime_for(&server).await;

    let value: Vec<Value> = runtime.call("hello", &["4", "5"]).await.unwrap();
    assert_eq!(value.len(), 2);
    assert_eq!(value[0]["id"], 4);
    assert_eq!(value[1]["id"], 5);
}

#[tokio::test]
async fn test_hello_decode_failure_surfaces_as_request_error() {
    let server = MockServer::start().await;
    let runtime = runtime_for(&server).await;

    // /todos/6 is not mounted; wiremock answers 404 with an empty body
    let result: Result<Value, _> = runtime.call("hello", &[5, 6]).await;
    assert!(matches!(
        result,
        Err(RuntimeError::Request(RequestError::Decode { .. }))
    ));
}

#[tokio::test]
async fn test_multiple_exports_on_one_runtime() {
    let server = MockServer::start().await;
    let runtime = runtime_for(&server).await;

    let sum: i32 = runtime.call("sum", &[4, 5]).await.unwrap();
    let product: i32 = runtime.call("product", &[4, 5]).await.unwrap();
    let mixed: Vec<Value> = runtime
        .call("handler", &[json!("Hello there"), json!(100)])
        .await
        .unwrap();

    assert_eq!(sum, 9);
    assert_eq!(product, 20);
    assert_eq!(mixed, vec![json!("Hello there"), json!(100)]);
}

#[tokio::test]
async fn test_hello_whole_float_ids_request_integer_paths() {
    let server = MockServer::start().await;
    let runtime = runtime_for(&server).await;

    let value: [ApiResponse; 2] = runtime.call("hello", &[5.0, 4.0]).await.unwrap();
    assert_eq!(value[0].id, 5);
    assert_eq!(value[1].id, 4);

    let paths: Vec<String> = server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    assert_eq!(paths, vec!["/todos/5", "/todos/4"]);
}

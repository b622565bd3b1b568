//! Named, callable exports.
//!
//! A [`Runtime`] is a table of async functions addressed by name. Callers pass
//! a slice of serializable arguments and pick the result type; arguments and
//! results cross the table as `serde_json::Value`, so exports can accept and
//! return heterogeneous data.
//!
//! The built-in exports are:
//!
//! | name      | arguments  | result                                   |
//! |-----------|------------|------------------------------------------|
//! | `hello`   | `id, id2`  | both fetched bodies, in argument order   |
//! | `sum`     | `a, b`     | `a + b`                                  |
//! | `product` | `a, b`     | `a * b`                                  |
//! | `handler` | any        | the arguments echoed back as an array    |

use crate::executor::RequestError;
use crate::fetch::TodoClient;
use futures_util::future::{BoxFuture, FutureExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while calling an export.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("No export named '{0}'")]
    UnknownExport(String),

    #[error("Export '{name}' takes {expected} argument(s), got {got}")]
    Arity {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("Invalid argument {index} for '{name}': {message}")]
    InvalidArgument {
        name: String,
        index: usize,
        message: String,
    },

    #[error("Export '{0}' overflowed a 64-bit integer")]
    Overflow(String),

    #[error("Failed to serialize arguments: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to convert result: {0}")]
    Deserialize(#[source] serde_json::Error),

    #[error(transparent)]
    Request(#[from] RequestError),
}

type ExportFn =
    Arc<dyn Fn(Vec<Value>) -> BoxFuture<'static, Result<Value, RuntimeError>> + Send + Sync>;

#[derive(Clone)]
struct Export {
    arity: Option<usize>,
    func: ExportFn,
}

/// Table of callable exports.
#[derive(Clone)]
pub struct Runtime {
    exports: BTreeMap<String, Export>,
}

impl Runtime {
    /// Creates a runtime with the built-in exports, using `client` for `hello`.
    pub fn new(client: TodoClient) -> Self {
        let mut runtime = Self::empty();

        runtime.register("hello", Some(2), move |args| {
            let client = client.clone();
            async move {
                let (first, second): (Value, Value) = client
                    .fetch_pair(id_fragment(&args[0]), id_fragment(&args[1]))
                    .await?;
                Ok::<_, RuntimeError>(Value::Array(vec![first, second]))
            }
        });

        runtime.register("sum", Some(2), |args| async move {
            let (a, b) = integer_pair("sum", &args)?;
            a.checked_add(b)
                .map(Value::from)
                .ok_or_else(|| overflow("sum"))
        });

        runtime.register("product", Some(2), |args| async move {
            let (a, b) = integer_pair("product", &args)?;
            a.checked_mul(b)
                .map(Value::from)
                .ok_or_else(|| overflow("product"))
        });

        runtime.register("handler", None, |args| async move {
            Ok::<_, RuntimeError>(Value::Array(args))
        });

        runtime
    }

    /// Creates a runtime with no exports.
    pub fn empty() -> Self {
        Self {
            exports: BTreeMap::new(),
        }
    }

    /// Registers (or replaces) an export.
    ///
    /// With `arity` set, calls with a different number of arguments fail with
    /// [`RuntimeError::Arity`] before `f` runs.
    pub fn register<F, Fut>(&mut self, name: impl Into<String>, arity: Option<usize>, f: F)
    where
        F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, RuntimeError>> + Send + 'static,
    {
        let func: ExportFn = Arc::new(move |args| f(args).boxed());
        self.exports.insert(name.into(), Export { arity, func });
    }

    /// Export names, sorted.
    pub fn exports(&self) -> Vec<&str> {
        self.exports.keys().map(String::as_str).collect()
    }

    pub fn has_export(&self, name: &str) -> bool {
        self.exports.contains_key(name)
    }

    /// Calls export `name` with `args` and converts the result into `T`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use todo_fetch::config::FetchConfig;
    /// use todo_fetch::fetch::TodoClient;
    /// use todo_fetch::runtime::Runtime;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let runtime = Runtime::new(TodoClient::from_config(&FetchConfig::default())?);
    /// let sum: i32 = runtime.call("sum", &[4, 5]).await?;
    /// assert_eq!(sum, 9);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn call<A, T>(&self, name: &str, args: &[A]) -> Result<T, RuntimeError>
    where
        A: Serialize,
        T: DeserializeOwned,
    {
        let args = args
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(RuntimeError::Serialize)?;

        let value = self.call_value(name, args).await?;
        serde_json::from_value(value).map_err(RuntimeError::Deserialize)
    }

    /// Calls export `name` with already-converted arguments.
    pub async fn call_value(&self, name: &str, args: Vec<Value>) -> Result<Value, RuntimeError> {
        let export = self
            .exports
            .get(name)
            .ok_or_else(|| RuntimeError::UnknownExport(name.to_string()))?;

        if let Some(expected) = export.arity {
            if args.len() != expected {
                return Err(RuntimeError::Arity {
                    name: name.to_string(),
                    expected,
                    got: args.len(),
                });
            }
        }

        log::debug!("Calling export '{}' with {} argument(s)", name, args.len());
        (export.func)(args).await
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("exports", &self.exports())
            .finish()
    }
}

/// Renders an argument the way it is spliced into a URL.
///
/// Strings are used verbatim. Whole floating-point numbers print without a
/// fraction (`5.0` becomes `5`), everything else uses its JSON text.
fn id_fragment(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => (f as i64).to_string(),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

fn integer_pair(name: &str, args: &[Value]) -> Result<(i64, i64), RuntimeError> {
    let integer = |index: usize| {
        args[index]
            .as_i64()
            .ok_or_else(|| RuntimeError::InvalidArgument {
                name: name.to_string(),
                index,
                message: format!("expected an integer, got {}", args[index]),
            })
    };
    Ok((integer(0)?, integer(1)?))
}

fn overflow(name: &str) -> RuntimeError {
    RuntimeError::Overflow(name.to_string())
}

//! todo-fetch command-line entry point.
//!
//! Calls one export (by default `hello 5 4`) and prints the result as pretty
//! JSON on stdout. Logging goes to stderr and is controlled by `RUST_LOG`.

use anyhow::{anyhow, Context};
use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;
use todo_fetch::config::{load_config, load_config_file, FetchConfig};
use todo_fetch::fetch::TodoClient;
use todo_fetch::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "todo-fetch", version, about = "Fetch and join JSON resources by id")]
struct Cli {
    /// JSON settings file with a "todo-fetch" section
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL each id is appended to
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Send both requests at the same time
    #[arg(long)]
    concurrent: bool,

    /// Fail on non-2xx responses
    #[arg(long)]
    fail_on_status: bool,

    /// Export to call
    #[arg(short, long, default_value = "hello")]
    export: String,

    /// List available exports and exit
    #[arg(long)]
    list: bool,

    /// Export arguments; parsed as JSON when possible, otherwise taken as strings
    args: Vec<String>,
}

impl Cli {
    fn fetch_config(&self) -> anyhow::Result<FetchConfig> {
        let mut config = match &self.config {
            Some(path) => load_config_file(path).map_err(|e| anyhow!(e))?,
            None => load_config(None).map_err(|e| anyhow!(e))?,
        };

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout_ms {
            config.timeout = timeout;
        }
        config.concurrent_requests |= self.concurrent;
        config.error_for_status |= self.fail_on_status;

        config.validate().map_err(|e| anyhow!(e))?;
        Ok(config)
    }

    fn export_args(&self) -> Vec<Value> {
        if self.args.is_empty() && self.export == "hello" {
            return vec![Value::from(5), Value::from(4)];
        }
        self.args.iter().map(|arg| parse_arg(arg)).collect()
    }
}

fn parse_arg(arg: &str) -> Value {
    serde_json::from_str(arg).unwrap_or_else(|_| Value::String(arg.to_string()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("todo_fetch=info"))
        .init();

    let cli = Cli::parse();
    let config = cli.fetch_config()?;
    log::debug!("Effective configuration: {:?}", config);

    let client = TodoClient::from_config(&config).context("Failed to build HTTP client")?;
    let runtime = Runtime::new(client);

    if cli.list {
        for name in runtime.exports() {
            println!("{}", name);
        }
        return Ok(());
    }

    let args = cli.export_args();
    log::info!("Calling '{}' against {}", cli.export, config.base_url);

    let result = tokio::select! {
        result = runtime.call_value(&cli.export, args) => result,
        _ = tokio::signal::ctrl_c() => {
            log::warn!("Interrupted");
            return Err(anyhow!("interrupted"));
        }
    };

    let value = result.with_context(|| format!("Export '{}' failed", cli.export))?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

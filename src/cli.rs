//! Command line front end: call a backend function from a shell.
//!
//! ```bash
//! fncall --base-address http://localhost:8080/api/v1/site call GET getUsers --params '{"limit":10}'
//! fncall --base-address http://localhost:8080/api/v1/site dispatch post_update_status --params '{"id":1}'
//! ```

use crate::config::InvokerConfig;
use crate::dispatcher::Dispatcher;
use crate::invoker::Invoker;
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "fncall")]
#[command(about = "Invoke backend functions over HTTP", long_about = None)]
pub struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Address prefix for `/_functions/{name}`
    #[arg(long, global = true)]
    pub base_address: Option<String>,

    /// Origin a relative base address is resolved against
    #[arg(long, global = true)]
    pub origin: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Call a function by verb and name
    Call {
        /// GET, POST, PUT, DELETE or PATCH (any case)
        verb: String,
        /// Function name
        function: String,
        /// Parameter object as JSON
        #[arg(short, long)]
        params: Option<String>,
        /// Print the whole response envelope instead of `data.result`
        #[arg(long, default_value_t = false)]
        full: bool,
    },
    /// Call a function through a `<verb>_<function>` dispatch key
    Dispatch {
        /// Dispatch key, e.g. `get_fetchThing`
        key: String,
        /// Parameter object as JSON
        #[arg(short, long)]
        params: Option<String>,
    },
}

impl Cli {
    /// Effective config: environment, then `--config` file, then flags.
    pub fn invoker_config(&self) -> anyhow::Result<InvokerConfig> {
        let mut config = InvokerConfig::from_env();
        if let Some(path) = &self.config {
            config = config.merge(InvokerConfig::from_yaml_file(path)?);
        }
        Ok(config.merge(InvokerConfig {
            base_address: self.base_address.clone(),
            origin: self.origin.clone(),
            timeout_ms: self.timeout_ms,
        }))
    }
}

/// Parse the `--params` argument.
pub fn parse_params(raw: Option<&str>) -> anyhow::Result<Option<Value>> {
    raw.map(|s| {
        serde_json::from_str(s).with_context(|| format!("--params is not valid JSON: {}", s))
    })
        .transpose()
}

/// Run the parsed command and return the JSON value to print.
pub async fn run(cli: Cli) -> anyhow::Result<Value> {
    let invoker = Invoker::new(cli.invoker_config()?)?;
    let output = match &cli.command {
        Commands::Call {
            verb,
            function,
            params,
            full,
        } => {
            let params = parse_params(params.as_deref())?;
            if *full {
                invoker
                    .call_full(verb, function, params.as_ref())
                    .await?
                    .into_inner()
            } else {
                invoker
                    .call_result(verb, function, params.as_ref())
                    .await?
                    .unwrap_or(Value::Null)
            }
        }
        Commands::Dispatch { key, params } => {
            let params = parse_params(params.as_deref())?;
            Dispatcher::new(invoker)
                .call(key, params.as_ref())
                .await?
                .unwrap_or(Value::Null)
        }
    };
    Ok(output)
}

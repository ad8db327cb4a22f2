use clap::Parser;
use fncall::cli::{run, Cli};
use fncall::logging::{init_logging_with_config, LogConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging_with_config(&LogConfig::from_env())?;

    let output = run(cli).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

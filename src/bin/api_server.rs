use corenorm::{start_server, AnnotatorSet, ApiConfig, NormalizerConfig};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "corenorm-api")]
#[command(about = "corenorm Normalization API Server")]
struct Args {
    /// Host to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind the server to
    #[arg(long, default_value = "8080")]
    port: u16,

    /// YAML config providing the default annotators
    #[arg(long)]
    config: Option<PathBuf>,

    /// Default annotators as a comma-separated list (overrides the config)
    #[arg(long)]
    annotators: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let file_config = match &args.config {
        Some(path) => NormalizerConfig::from_yaml(path)?,
        None => NormalizerConfig::default(),
    };
    let annotators = match &args.annotators {
        Some(list) => AnnotatorSet::parse_list(list),
        None => file_config.annotator_set(),
    };

    log::info!("Configuration: host={}, port={}, annotators={}", args.host, args.port, annotators);

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        annotators,
    };

    start_server(config).await?;

    Ok(())
}

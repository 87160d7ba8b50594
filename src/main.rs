use clap::Parser;
use husk::config::AppConfig;
use husk::server::ServerBuilder;
use husk::telemetry::init_tracing;
use std::path::PathBuf;

/// Order and employee REST service
#[derive(Parser, Debug)]
#[command(name = "husk-server", version)]
struct Args {
    /// YAML configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Listen host, overriding configuration
    #[arg(long)]
    host: Option<String>,

    /// Listen port, overriding configuration
    #[arg(long, short)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::from_yaml_file(path)?,
        None => AppConfig::default(),
    }
    .with_env_overrides()?;

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    init_tracing(&config.logging.filter)?;
    tracing::info!(
        config = ?args.config,
        policy = ?config.orders.status_policy,
        "starting husk-server"
    );

    let addr = config.bind_addr()?;
    ServerBuilder::from_config(&config)
        .serve(&addr.to_string())
        .await
}

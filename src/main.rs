use anyhow::{Context, Result};
use clap::Parser;
use landed_jobs::{start_web_server, AppConfig};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "landed-jobs", version, about = "Job description intake API")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    /// Configuration section to use (local, production)
    #[arg(long)]
    env: Option<String>,

    /// Override the configured port
    #[arg(long)]
    port: Option<u16>,

    /// Also write JSON logs to this file, truncated on startup
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_ref())?;

    let mut config = AppConfig::load(&cli.config, cli.env.as_deref())?;
    if let Some(port) = cli.port {
        config = config.with_port(port);
    }

    info!("Environment: {}", config.environment);
    info!("Data directory: {}", config.server.data_dir.display());
    info!("CORS origins: {:?}", config.server.cors_origins);

    start_web_server(config).await
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let json_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;

            Some(
                fmt::layer()
                    .json()
                    .with_writer(Mutex::new(file))
                    .with_current_span(false)
                    .with_span_list(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("landed_jobs=info,rocket::server=off")),
        )
        .with(fmt::layer())
        .with(json_layer)
        .init();

    Ok(())
}

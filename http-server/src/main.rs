mod config;
mod routes;
mod setup;
mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use config::Config;
use setup::initialize_app;
use telemetry::{init_telemetry, log_shutdown_info, log_startup_info};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "todo-service")]
#[command(about = "Todo CRUD HTTP service")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CONFIG_FILE")]
    config: Option<String>,

    /// Database URL override
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Listen address override
    #[arg(long, env = "LISTEN_ADDR")]
    listen_addr: Option<String>,

    /// Log level override
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(config_file) => Config::from_file(config_file)?,
        None => Config::from_env()?,
    };

    // Apply CLI overrides
    if let Some(ref database_url) = cli.database_url {
        config.database.url = Some(database_url.clone());
    }

    if let Some(ref listen_addr) = cli.listen_addr {
        config.server.listen_addr = listen_addr.clone();
    }

    if let Some(ref log_level) = cli.log_level {
        config.logging.level = log_level.clone();
    }

    Ok(config)
}

async fn shutdown_signal() {
    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        .expect("Failed to register SIGTERM handler");
    let mut sigint = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())
        .expect("Failed to register SIGINT handler");

    tokio::select! {
        _ = sigterm.recv() => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, initiating graceful shutdown");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let config = load_config(&cli).context("Failed to load configuration")?;

    init_telemetry(&config.logging).context("Failed to initialize telemetry")?;

    if let Err(e) = config.validate() {
        error!(error = %e, "Configuration validation failed");
        std::process::exit(1);
    }

    log_startup_info(&config);

    let app = initialize_app(&config)
        .await
        .context("Failed to initialize application")?;

    let addr = config.server_address();
    info!("Starting todo service on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    log_shutdown_info();
    Ok(())
}

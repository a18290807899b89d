use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use imgconv::config::Config;
use imgconv::error::ServiceError;

/// imgconv - HTTP image conversion and resize service
#[derive(Parser, Debug)]
#[command(name = "imgconv")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override server.address
    #[arg(long)]
    address: Option<String>,

    /// Override server.port
    #[arg(short, long)]
    port: Option<u16>,

    /// Test configuration and exit
    #[arg(long)]
    check: bool,
}

fn load_config(args: &Args) -> Result<Config, ServiceError> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path).map_err(ServiceError::Config)?,
        None => Config::default(),
    };

    if let Some(address) = &args.address {
        config.server.address = address.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    config.validate().map_err(ServiceError::Config)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = load_config(&args).context("Failed to load configuration")?;

    if args.check {
        println!("configuration OK");
        return Ok(());
    }

    imgconv::logging::init_subscriber(&config.logging)
        .context("Failed to initialize logging subsystem")?;

    tracing::info!(
        config_file = ?args.config,
        server_address = %config.server.address,
        server_port = config.server.port,
        error_policy = ?config.server.error_policy,
        jpeg_quality = config.image.jpeg_quality,
        "Configuration loaded successfully"
    );

    imgconv::server::run(config).await?;
    Ok(())
}

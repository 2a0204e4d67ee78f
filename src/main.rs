//! SendIT CLI server
//!
//! ```sh
//! # Run with default config (~/.config/sendit/config.toml)
//! sendit
//!
//! # Custom config path and port
//! sendit --config /etc/sendit/config.toml --port 8080
//!
//! # Validate config without starting
//! sendit --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use sendit::config::AppConfig;
use sendit::server::{init_tracing, ServerHandle, ServerOptions};

/// SendIT parcel delivery tracking API.
#[derive(Parser, Debug)]
#[command(
    name = "sendit",
    version,
    about = "Parcel delivery tracking REST API",
    long_about = "SendIT: REST API for placing parcel delivery orders and tracking \
                  them through their lifecycle.\n\n\
                  Default config: ~/.config/sendit/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "SENDIT_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the default admin user.
    #[arg(long)]
    no_admin: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(sendit::default_config_path);

    let loaded = AppConfig::load(&config_path);
    let (mut config, load_error) = match loaded {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // CLI overrides apply before tracing so --log-level takes effect
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    if cli.check {
        return match load_error {
            Some(e) => {
                eprintln!("❌ {}: {}", config_path.display(), e);
                Err(e.into())
            }
            None => {
                config.validate()?;
                println!("✅ Configuration is valid");
                println!("   Config file : {}", config_path.display());
                println!("   API address : {}", config.listen_addr());
                println!("   Database    : {}", config.database.url);
                println!("   Log level   : {}", config.logging.level);
                Ok(())
            }
        };
    }

    init_tracing(&config);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }
    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
    }
    if let Some(ref level) = cli.log_level {
        info!("CLI override: log_level = {}", level);
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        create_default_admin: !cli.no_admin,
    })
    .await?;

    handle.install_signal_handler();
    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}

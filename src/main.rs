use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use hype_meter::api::{start_server, ApiState};
use hype_meter::config::{Config, DEFAULT_CONFIG_PATH};
use hype_meter::database::{MemoryStore, RetentionService};
use hype_meter::logging::init_tracing;
use hype_meter::HypeAnalyzer;

#[derive(Parser, Debug)]
#[command(name = "hype-meter", about = "Hype-to-price divergence meter service")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Overrides the configured log level
    #[arg(long)]
    log_level: Option<String>,

    /// Overrides the configured snapshot path
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Overrides the configured save path
    #[arg(long)]
    save_snapshot: Option<PathBuf>,

    /// Validate configuration and exit
    #[arg(long)]
    dry_run: bool,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if cli.config.exists() {
        Config::load_from_file(&cli.config)?
    } else {
        Config::default()
    };
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(snapshot) = &cli.snapshot {
        config.store.snapshot_path = Some(snapshot.clone());
    }
    if let Some(save) = &cli.save_snapshot {
        config.store.save_path = Some(save.clone());
    }
    config.validate()?;
    Ok(config)
}

fn load_store(config: &Config) -> Result<MemoryStore> {
    match &config.store.snapshot_path {
        Some(path) if path.exists() => Ok(MemoryStore::load_snapshot(path)?),
        Some(path) => {
            warn!("Snapshot {} not found, starting with an empty store", path.display());
            Ok(MemoryStore::new())
        }
        None => Ok(MemoryStore::new()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let _guard = init_tracing(&config.logging)?;

    info!("🚀 Hype Meter starting");
    if !cli.config.exists() {
        warn!("Config {} not found, using defaults", cli.config.display());
    }

    if cli.dry_run {
        info!("✅ Configuration valid: {:?}", config);
        return Ok(());
    }

    let store = Arc::new(load_store(&config)?);
    let analyzer = Arc::new(HypeAnalyzer::new(store.clone()));

    let (shutdown_tx, _) = broadcast::channel::<()>(16);

    let retention = RetentionService::new(
        Arc::clone(&store),
        config.store.retention_hours,
        Duration::from_secs(config.store.cleanup_interval_secs),
    );
    let retention_task = tokio::spawn(retention.run(shutdown_tx.subscribe()));

    let mut server_shutdown = shutdown_tx.subscribe();
    let server_task = start_server(ApiState::new(analyzer), &config.server, async move {
        let _ = server_shutdown.recv().await;
    })
    .await?;

    info!("✅ All services started. Press Ctrl+C to stop.");
    signal::ctrl_c().await?;
    info!("🛑 Received shutdown signal");
    let _ = shutdown_tx.send(());

    if let Err(e) = server_task.await {
        error!("API server task failed: {}", e);
    }
    match retention_task.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!("Retention service error: {}", e),
        Err(e) => error!("Retention task failed: {}", e),
    }

    if let Some(path) = &config.store.save_path {
        if let Err(e) = store.save_snapshot(path) {
            error!("Failed to save snapshot {}: {}", path.display(), e);
        }
    }

    info!("👋 Hype Meter stopped");
    Ok(())
}

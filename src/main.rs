use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use syspulse::app::App;
use syspulse::config::{self, load_config, load_config_from_path};
use syspulse::format::format_tick;
use syspulse::logging;
use syspulse::store::MetricStore;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "syspulse",
    about = "Samples CPU and memory usage into a SQLite database"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to the SQLite database (created if absent)
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Sampling interval in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Stop after this many ticks instead of running until Ctrl+C.
    #[arg(long)]
    ticks: Option<u64>,

    /// Log level or filter directive, e.g. `debug` or `syspulse=trace`
    #[arg(long)]
    log_level: Option<String>,

    /// Emit logs as JSON lines.
    #[arg(long, default_value_t = false)]
    log_json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);
    logging::init_tracing(&config.logging.level, config.logging.json)?;

    if config.general.interval_ms == 0 {
        return Err(eyre!("--interval-ms must be greater than 0"));
    }
    if cli.ticks == Some(0) {
        return Err(eyre!("--ticks must be greater than 0"));
    }

    info!(version = env!("CARGO_PKG_VERSION"), "SysPulse started");

    let db_path = &config.storage.db_path;
    let store = MetricStore::open_at(db_path)
        .map_err(|e| eyre!("could not open metrics database {}: {e}", db_path.display()))?;

    let app = App::from_config(&config, store);
    run(
        app,
        Duration::from_millis(config.general.interval_ms),
        cli.ticks,
    )
    .await
}

async fn run(mut app: App, interval: Duration, max_ticks: Option<u64>) -> Result<()> {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!("collection loop started (Ctrl+C to stop)");
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let tick = app.tick();
                if !tick.metrics.is_empty() {
                    info!("{}", format_tick(&tick.metrics));
                }
                if max_ticks.is_some_and(|n| app.ticks() >= n) {
                    break;
                }
            }
            signal = &mut shutdown => {
                if let Err(e) = signal {
                    warn!(error = %e, "failed to listen for Ctrl+C");
                }
                info!("shutdown requested");
                break;
            }
        }
    }

    app.shutdown()?;
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> config::Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(ref path) = cli.db_path {
        config.storage.db_path = path.clone();
    }
    if let Some(ms) = cli.interval_ms {
        config.general.interval_ms = ms;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if cli.log_json {
        config.logging.json = true;
    }

    config
}

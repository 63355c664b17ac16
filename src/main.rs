use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
use config::{AppConfig, CliConfig, FileConfig};

mod remote;
use remote::HttpFeedClient;

mod store;
use store::FeedState;

mod sync;
use sync::build_engine;

#[derive(Parser, Debug)]
struct CliArgs {
    /// Base URL of the remote feed service.
    #[clap(long)]
    pub remote_url: Option<String>,

    /// Username whose notification feed is synchronized.
    #[clap(long)]
    pub username: Option<String>,

    /// Pause between poll cycles, in milliseconds.
    #[clap(long, default_value_t = 5000)]
    pub poll_interval_ms: u64,

    /// Timeout in seconds for remote feed requests.
    #[clap(long, default_value_t = 30)]
    pub remote_timeout_secs: u64,

    /// Path to an optional TOML config file; its values override CLI args.
    #[clap(long)]
    pub config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };

    let cli_config = CliConfig {
        remote_url: cli_args.remote_url,
        username: cli_args.username,
        poll_interval_ms: cli_args.poll_interval_ms,
        remote_timeout_secs: cli_args.remote_timeout_secs,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    info!(
        "notifeed {}-{}, syncing feed for {} against {} (poll every {}ms)",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        config.username,
        config.remote_url,
        config.poll_interval_ms
    );

    let service = Arc::new(HttpFeedClient::new(
        config.remote_url.clone(),
        config.remote_timeout_secs,
    )?);
    let state = FeedState::shared(config.username.clone());

    let (engine, handle) = build_engine(config.sync_settings(), state, service);
    let engine_task = tokio::spawn(engine.run());

    // Kick off the initial full fetch; the supervisor takes over from there
    handle.request_full_fetch().await?;

    tokio::signal::ctrl_c().await?;
    info!("Received ctrl-c, logging out");
    handle.logout();

    engine_task.await?;
    info!("Sync engine stopped");

    Ok(())
}

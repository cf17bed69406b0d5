//! Competitor Intelligence: dealer promotion monitoring dashboard
//!
//! Entry point. Loads configuration, initialises structured logging,
//! builds the data provider and session, and serves the dashboard
//! until Ctrl+C.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use competitor_intel::config::{self, AppConfig};
use competitor_intel::dashboard::{self, DashboardState};
use competitor_intel::data::{DataProvider, FeedProvider};
use competitor_intel::session::PresentationSession;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let config_path = std::env::var("COMPETITOR_INTEL_CONFIG")
        .unwrap_or_else(|_| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = AppConfig::load(&config_path)?;

    init_logging();

    let provider = FeedProvider::from_config(&cfg.provider)?;
    if !provider.is_live() {
        warn!("No live feed configured, dashboard will show demo data");
    }
    info!(
        config = %config_path,
        provider = provider.name(),
        port = cfg.dashboard.port,
        discount_threshold = cfg.alerts.discount_threshold,
        "Competitor Intelligence starting up"
    );

    let session = PresentationSession::new(Arc::new(provider));
    info!(session = %session.id(), "Session created");

    let port = cfg.dashboard.port;
    let state = Arc::new(DashboardState::new(session, cfg));

    dashboard::serve_dashboard(state, port, async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Shutdown signal received.");
    })
    .await?;

    info!("Competitor Intelligence shut down cleanly.");
    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("competitor_intel=info"));

    let json_logging = std::env::var("COMPETITOR_INTEL_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}

// Main entry point for the portal API server

use std::sync::Arc;

use anyhow::{Context, Result};
use portal_core::kernel::{
    session_layer, BaseBenefitSubmitter, HttpBenefitSubmitter, ServerDeps, SystemClock,
    UnconfiguredSubmitter,
};
use portal_core::{server::build_app, Config};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,portal_core=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    info!("Starting dental care plan portal API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    let wizard = config.wizard().context("Invalid wizard configuration")?;
    info!("Configuration loaded");

    let submitter: Arc<dyn BaseBenefitSubmitter> = match &config.submission_api_url {
        Some(url) => Arc::new(
            HttpBenefitSubmitter::new(url.clone()).context("Failed to create submission client")?,
        ),
        None => {
            warn!("SUBMISSION_API_URL not set, submissions will fail");
            Arc::new(UnconfiguredSubmitter)
        }
    };

    let sessions = session_layer(config.session_ttl(), config.session_cookie_secure);
    let deps = ServerDeps::new(submitter, Arc::new(SystemClock), wizard);
    let app = build_app(deps, sessions, &config.allowed_origins);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    info!("Starting server on {}", addr);
    info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

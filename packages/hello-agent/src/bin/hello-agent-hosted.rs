//! Hello agent binary for deployments behind a reverse proxy: adds CORS,
//! `X-Forwarded-*` normalization and reports `THEORIQ_URI` on `/health`.

use hello_agent::{agent, AppState, Config, Variant};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    hello_agent::init_tracing();

    info!("Starting hosted hello agent");

    let config = Config::load().unwrap_or_else(|e| {
        error!(error = %e, "FATAL: config error, fix env vars or agent.toml");
        std::process::exit(1);
    });

    match config.theoriq_uri() {
        Some(uri) => info!(theoriq_uri = %uri, "Theoriq platform configured"),
        None => warn!("THEORIQ_URI not set"),
    }
    info!(
        port = config.flask_port,
        cors = %config.cors_allowed_origins,
        "Configuration loaded"
    );

    let state = Arc::new(AppState::new(config, Variant::Hosted, agent::execute_fn())?);
    hello_agent::serve(state).await?;

    Ok(())
}

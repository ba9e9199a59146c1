//! Hello agent binary.

use hello_agent::{agent, AppState, Config, Variant};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    hello_agent::init_tracing();

    info!("Starting hello agent");

    let config = Config::load().unwrap_or_else(|e| {
        error!(error = %e, "FATAL: config error, fix env vars or agent.toml");
        std::process::exit(1);
    });

    info!(port = config.flask_port, "Configuration loaded");

    let state = Arc::new(AppState::new(config, Variant::Plain, agent::execute_fn())?);
    hello_agent::serve(state).await?;

    Ok(())
}

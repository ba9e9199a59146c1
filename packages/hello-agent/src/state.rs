//! Application state shared across handlers.

use crate::config::Config;
use crate::context::ExecuteFn;
use crate::identity::AgentIdentity;
use std::time::Instant;
use tracing::info;

/// Which flavour of the service is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Execute blueprint, health and error handlers.
    Plain,
    /// Plain plus CORS, proxy-header normalization and `THEORIQ_URI` on `/health`.
    Hosted,
}

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub identity: AgentIdentity,
    pub variant: Variant,
    pub execute: ExecuteFn,
    pub theoriq_uri: Option<String>,
    pub start_time: Instant,
}

impl AppState {
    /// Create application state, loading the agent key from configuration.
    pub fn new(config: Config, variant: Variant, execute: ExecuteFn) -> Result<Self, crate::Error> {
        let identity = AgentIdentity::from_config(&config)?;
        info!(agent = %identity.address(), "Loaded agent key");
        Ok(Self::with_identity(config, identity, variant, execute))
    }

    pub fn with_identity(
        config: Config,
        identity: AgentIdentity,
        variant: Variant,
        execute: ExecuteFn,
    ) -> Self {
        let theoriq_uri = match variant {
            Variant::Hosted => config.theoriq_uri(),
            Variant::Plain => None,
        };
        Self {
            config,
            identity,
            variant,
            execute,
            theoriq_uri,
            start_time: Instant::now(),
        }
    }
}

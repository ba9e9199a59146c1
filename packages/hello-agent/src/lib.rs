//! # Hello Agent
//!
//! A minimal Theoriq agent. Every execute request is answered with a greeting
//! built from the text of the last dialog item, priced at 1 USDC.
//!
//! ## Quick Start
//! ```bash
//! AGENT_PRIVATE_KEY=0x... cargo run --bin hello-agent
//! ```
//!
//! ## Endpoints
//! - `POST /api/v1alpha2/execute` - Run the agent on a dialog
//! - `GET /api/v1alpha2/system/public-key` - Agent public key
//! - `POST /api/v1alpha2/system/challenge` - Sign a nonce with the agent key
//! - `GET /health` - Health check
//! - `GET /metrics` - Prometheus metrics

pub mod agent;
pub mod config;
pub mod context;
mod error;
mod handlers;
pub mod identity;
pub mod metrics;
pub mod middleware;
mod response;
mod router;
mod server;
mod state;

pub use config::Config;
pub use context::{ExecuteContext, ExecuteFn, ExecuteResponse, ExecuteRuntimeError};
pub use error::{AgentError, Error};
pub use identity::AgentIdentity;
pub use router::{create as create_router, API_PREFIX};
pub use server::{init_tracing, serve};
pub use state::{AppState, Variant};

//! souk-api entrypoint
//!
//! Loads configuration, initializes tracing, builds the store-backed state
//! and router, and serves with graceful shutdown.

mod extract;
mod models;
mod routes;
mod services;
mod state;

use souk_service::prelude::*;

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    init_tracing(&config);

    let state = AppState::new();
    let app = routes::api_router()
        .merge(health_router())
        .with_state(state);

    Server::new(config).serve(app).await?;
    Ok(())
}

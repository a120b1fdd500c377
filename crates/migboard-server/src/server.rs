//! Server lifecycle: initial data, listener and graceful shutdown.

use crate::error::ServerResult;
use crate::routes::create_router;
use crate::state::AppState;
use migboard_config::Config;
use migboard_data::generate;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Main server structure.
pub struct MigboardServer {
    config: Arc<Config>,
}

impl MigboardServer {
    /// Creates a new server instance.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Builds the application state seeded with the synthetic table.
    pub fn build_state(&self) -> ServerResult<AppState> {
        let table = generate(&self.config.generator)?;
        info!(
            rows = table.len(),
            seed = self.config.generator.seed,
            "Generated initial migration table"
        );
        Ok(AppState::new(self.config.as_ref().clone(), table))
    }

    /// Starts serving until Ctrl-C.
    pub async fn start(&self) -> ServerResult<()> {
        let state = self.build_state()?;
        let app = create_router(state);

        let address = self.config.server.bind_address();
        let listener = TcpListener::bind(&address).await?;
        let local = listener.local_addr()?;
        info!(address = %local, "Migboard listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Migboard stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
